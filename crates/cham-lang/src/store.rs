// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Named reaction definitions.

use std::collections::BTreeMap;

use cham_core::Reaction;

/// Reactions saved under a name (`name : reactions`) for later reuse as
/// `:name` inside programs.
#[derive(Clone, Debug, Default)]
pub struct ReactionStore {
    entries: BTreeMap<String, Vec<Reaction>>,
}

impl ReactionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Saves `reactions` under `name`, returning what was there before.
    pub fn put(
        &mut self,
        name: impl Into<String>,
        reactions: Vec<Reaction>,
    ) -> Option<Vec<Reaction>> {
        self.entries.insert(name.into(), reactions)
    }

    /// Reactions stored under `name`.
    pub fn get(&self, name: &str) -> Option<&[Reaction]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Drops `name`, returning its reactions.
    pub fn remove(&mut self, name: &str) -> Option<Vec<Reaction>> {
        self.entries.remove(name)
    }

    /// Stored names in ascending order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Iterates `(name, reactions)` in ascending name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Reaction])> + '_ {
        self.entries
            .iter()
            .map(|(name, reactions)| (name.as_str(), reactions.as_slice()))
    }

    /// Number of stored names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
