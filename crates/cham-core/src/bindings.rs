// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-attempt binding environment.

use rustc_hash::FxHashMap;

use crate::error::EvalError;
use crate::term::Ident;

/// Identifier → value map for one reaction attempt.
///
/// Keys borrow the reaction's identifier text, so building an environment
/// never allocates strings. A fresh environment is created for every
/// permutation the matcher tries and dropped afterwards.
#[derive(Debug, Default, Clone)]
pub struct Bindings<'a> {
    vars: FxHashMap<&'a str, i64>,
}

impl<'a> Bindings<'a> {
    /// Creates an empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty environment sized for `n` identifiers.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            vars: FxHashMap::with_capacity_and_hasher(n, Default::default()),
        }
    }

    /// Binds `name` to `value`, replacing any earlier binding.
    pub fn bind(&mut self, name: &'a str, value: i64) {
        self.vars.insert(name, value);
    }

    /// Returns the value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<i64> {
        self.vars.get(name).copied()
    }

    /// Returns the value bound to `ident`.
    pub fn lookup(&self, ident: &Ident) -> Result<i64, EvalError> {
        self.get(ident.as_str())
            .ok_or_else(|| EvalError::UnboundIdentifier(ident.clone()))
    }

    /// Number of bound identifiers.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
