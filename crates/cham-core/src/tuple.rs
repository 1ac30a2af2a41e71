// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Fixed-capacity integer tuples: the atomic element of a solution.

use core::fmt;

/// Maximum number of integers a tuple can hold.
///
/// Tuples are used as multiset keys, so they are stored inline as a
/// fixed-size array rather than a heap slice. Raise this if programs need
/// wider tuples; every tuple grows with it.
pub const TUPLE_CAPACITY: usize = 16;

/// An ordered sequence of 1..=[`TUPLE_CAPACITY`] integers, compared and
/// hashed by value.
///
/// Unused slots are always zero so the derived `Eq`/`Hash`/`Ord` only ever
/// see the populated prefix plus a constant tail.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntTuple {
    // `shape` leads so that ordering groups tuples by dimensionality first.
    shape: u8,
    values: [i64; TUPLE_CAPACITY],
}

impl IntTuple {
    /// Builds a tuple from `values`, truncating anything past
    /// [`TUPLE_CAPACITY`].
    ///
    /// # Panics
    ///
    /// Panics if `values` is empty; a zero-dimensional tuple is never valid.
    pub fn new(values: &[i64]) -> Self {
        assert!(!values.is_empty(), "tuple shape cannot be 0");
        let shape = values.len().min(TUPLE_CAPACITY);
        let mut arr = [0i64; TUPLE_CAPACITY];
        arr[..shape].copy_from_slice(&values[..shape]);
        Self {
            shape: shape as u8,
            values: arr,
        }
    }

    /// Builds a one-dimensional tuple.
    pub fn scalar(value: i64) -> Self {
        Self::new(&[value])
    }

    /// Number of populated slots.
    #[inline]
    pub fn dimensions(&self) -> usize {
        usize::from(self.shape)
    }

    /// Returns `true` when both tuples have the same dimensionality.
    #[inline]
    pub fn shape_matches(&self, other: &Self) -> bool {
        self.shape == other.shape
    }

    /// The populated values.
    #[inline]
    pub fn as_slice(&self) -> &[i64] {
        &self.values[..self.dimensions()]
    }
}

impl From<i64> for IntTuple {
    fn from(value: i64) -> Self {
        Self::scalar(value)
    }
}

impl fmt::Debug for IntTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntTuple{:?}", self.as_slice())
    }
}

impl fmt::Display for IntTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [single] = self.as_slice() {
            return write!(f, "{single}");
        }
        f.write_str("[")?;
        for (i, v) in self.as_slice().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}
