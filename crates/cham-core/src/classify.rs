// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Structural reaction classification.
use core::cmp::Ordering;
use core::fmt;

/// How one application of a reaction changes solution cardinality.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReactionType {
    /// Consumes more elements than it produces.
    Reducing,
    /// Consumes and produces the same number of elements.
    Constant,
    /// Produces more elements than it consumes.
    Expanding,
}

/// Classifies a reaction by its input and output arity.
///
/// Purely structural: a reaction whose products happen to evaluate back to
/// its inputs is still `Constant`, never anything value-dependent.
pub fn classify(inputs: usize, outputs: usize) -> ReactionType {
    match inputs.cmp(&outputs) {
        Ordering::Greater => ReactionType::Reducing,
        Ordering::Equal => ReactionType::Constant,
        Ordering::Less => ReactionType::Expanding,
    }
}

impl fmt::Display for ReactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reducing => f.write_str("reducing"),
            Self::Constant => f.write_str("constant"),
            Self::Expanding => f.write_str("expanding"),
        }
    }
}
