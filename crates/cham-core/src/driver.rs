// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Sequential driver: apply one reaction until the solution is stable.

use tracing::trace;

use crate::error::ReactionError;
use crate::matcher::{attempt_reaction, ReactionOutcome};
use crate::multiset::Multiset;
use crate::reaction::Reaction;

/// Upper bound on the number of reactions a driver run may perform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StepLimit {
    /// Run until no reaction applies.
    #[default]
    Unbounded,
    /// Stop after this many successful reactions. `Steps(0)` performs none
    /// and leaves the solution untouched; use [`StepLimit::Unbounded`] to run
    /// to stability.
    Steps(usize),
}

impl StepLimit {
    fn reached(self, performed: usize) -> bool {
        match self {
            Self::Unbounded => false,
            Self::Steps(limit) => performed >= limit,
        }
    }
}

/// Repeatedly applies `reaction` to `solution`.
///
/// Stops when the cardinality drops below the reaction's input arity, when
/// an attempt finds no match, or when `limit` is reached. Returns the number
/// of reactions performed.
///
/// # Errors
///
/// Propagates the first [`ReactionError`] from the matcher. Reactions
/// performed before the failure stay applied.
pub fn run_reactions(
    reaction: &Reaction,
    solution: &mut Multiset,
    limit: StepLimit,
) -> Result<usize, ReactionError> {
    let k = reaction.input_arity();
    let mut performed = 0;
    while solution.cardinality() >= k && !limit.reached(performed) {
        match attempt_reaction(reaction, solution)? {
            ReactionOutcome::Reacted => performed += 1,
            ReactionOutcome::NoReaction => break,
        }
    }
    trace!(
        performed,
        cardinality = solution.cardinality(),
        "driver run finished"
    );
    Ok(performed)
}
