// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The solution: a multiset of [`IntTuple`]s with a cached cardinality.

use core::fmt;

use rustc_hash::FxHashMap;

use crate::tuple::IntTuple;

/// A bag of tuples.
///
/// Invariants:
/// - no entry has multiplicity 0 (exhausted entries are removed);
/// - `cardinality` always equals the sum of live multiplicities;
/// - `index` maps every live tuple to its position in `entries`.
///
/// Distinct tuples are kept in first-insertion order, so [`Multiset::slice`]
/// and [`Multiset::partition`] are reproducible for a given history of
/// operations. Nothing in the engine relies on that order for correctness.
#[derive(Clone, Default)]
pub struct Multiset {
    entries: Vec<(IntTuple, usize)>,
    index: FxHashMap<IntTuple, usize>,
    cardinality: usize,
}

impl Multiset {
    /// Creates an empty multiset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `tuple`.
    pub fn add(&mut self, tuple: IntTuple) {
        self.add_many(tuple, 1);
    }

    /// Adds one occurrence of every tuple in `tuples`.
    pub fn add_all<I>(&mut self, tuples: I)
    where
        I: IntoIterator<Item = IntTuple>,
    {
        for tuple in tuples {
            self.add(tuple);
        }
    }

    /// Adds `count` occurrences of `tuple`. A zero count is a no-op.
    pub fn add_many(&mut self, tuple: IntTuple, count: usize) {
        if count == 0 {
            return;
        }
        if let Some(&pos) = self.index.get(&tuple) {
            self.entries[pos].1 += count;
        } else {
            self.index.insert(tuple, self.entries.len());
            self.entries.push((tuple, count));
        }
        self.cardinality += count;
    }

    /// Removes one occurrence of `tuple`.
    ///
    /// # Panics
    ///
    /// Panics if `tuple` is not present. The matcher only ever takes
    /// elements it just read from this multiset, so a miss means the
    /// multiset was mutated underneath it.
    #[allow(clippy::panic)]
    pub fn take(&mut self, tuple: &IntTuple) {
        let Some(&pos) = self.index.get(tuple) else {
            panic!("cannot take {tuple} from multiset: not present");
        };
        self.cardinality -= 1;
        if self.entries[pos].1 > 1 {
            self.entries[pos].1 -= 1;
            return;
        }
        self.index.remove(tuple);
        self.entries.remove(pos);
        for (moved, _) in &self.entries[pos..] {
            if let Some(slot) = self.index.get_mut(moved) {
                *slot -= 1;
            }
        }
    }

    /// Total number of elements, counting multiplicity. O(1).
    #[inline]
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// Returns `true` if the multiset holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cardinality == 0
    }

    /// Multiplicity of `tuple` (0 when absent).
    pub fn multiplicity(&self, tuple: &IntTuple) -> usize {
        self.index.get(tuple).map_or(0, |&pos| self.entries[pos].1)
    }

    /// Number of distinct tuples.
    pub fn distinct(&self) -> usize {
        self.entries.len()
    }

    /// Iterates `(tuple, multiplicity)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&IntTuple, usize)> + '_ {
        self.entries.iter().map(|(t, c)| (t, *c))
    }

    /// Iterates every element repeated by its multiplicity.
    pub fn elements(&self) -> impl Iterator<Item = IntTuple> + '_ {
        self.entries
            .iter()
            .flat_map(|(t, c)| std::iter::repeat(*t).take(*c))
    }

    /// Materializes every element repeated by its multiplicity.
    ///
    /// `slice().len() == cardinality()`.
    pub fn slice(&self) -> Vec<IntTuple> {
        let mut out = Vec::with_capacity(self.cardinality);
        out.extend(self.elements());
        out
    }

    /// Like [`Multiset::slice`] but in ascending tuple order, for output.
    pub fn sorted(&self) -> Vec<IntTuple> {
        let mut out = self.slice();
        out.sort_unstable();
        out
    }

    /// Splits the contents into contiguous chunks of [`Multiset::slice`],
    /// each holding `size` elements except possibly the last.
    ///
    /// The chunks partition the original element-for-element; `self` is left
    /// untouched. An empty multiset yields no chunks.
    ///
    /// # Panics
    ///
    /// Panics if `size == 0`.
    pub fn partition(&self, size: usize) -> Vec<Multiset> {
        assert!(size > 0, "partition size must be positive");

        let mut parts = Vec::with_capacity(self.cardinality.div_ceil(size));
        let mut current = Multiset::new();

        for (tuple, count) in self.iter() {
            let mut remaining = count;
            while remaining > 0 {
                let room = size - current.cardinality;
                let n = remaining.min(room);
                current.add_many(*tuple, n);
                remaining -= n;
                if current.cardinality == size {
                    parts.push(std::mem::take(&mut current));
                }
            }
        }
        if !current.is_empty() {
            parts.push(current);
        }

        parts
    }

    /// Adds every element of `other` with its full multiplicity.
    pub fn merge(&mut self, other: Multiset) {
        if self.is_empty() {
            *self = other;
            return;
        }
        for (tuple, count) in other.entries {
            self.add_many(tuple, count);
        }
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
        self.cardinality = 0;
    }
}

/// Multisets are equal when every tuple has the same multiplicity in both;
/// insertion order is ignored.
impl PartialEq for Multiset {
    fn eq(&self, other: &Self) -> bool {
        self.cardinality == other.cardinality
            && self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|(t, c)| other.multiplicity(t) == *c)
    }
}

impl Eq for Multiset {}

impl FromIterator<IntTuple> for Multiset {
    fn from_iter<I: IntoIterator<Item = IntTuple>>(iter: I) -> Self {
        let mut set = Self::new();
        set.add_all(iter);
        set
    }
}

impl Extend<IntTuple> for Multiset {
    fn extend<I: IntoIterator<Item = IntTuple>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl fmt::Debug for Multiset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Multiset")
            .field("cardinality", &self.cardinality)
            .field("entries", &self.entries)
            .finish()
    }
}

impl fmt::Display for Multiset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, tuple) in self.sorted().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{tuple}")?;
        }
        f.write_str("}")
    }
}
