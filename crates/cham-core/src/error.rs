// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy for evaluation.
//!
//! Structural invariant violations (taking an absent tuple, building a
//! zero-dimensional tuple, partitioning by zero) are panics and never show up
//! here. Everything in this module is recoverable and reported to callers.
use core::fmt;

use thiserror::Error;

use crate::classify::ReactionType;
use crate::term::Ident;

/// Failure while evaluating an integer or boolean term.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// An identifier was read that no input pattern bound.
    #[error("unbound identifier: {0}")]
    UnboundIdentifier(Ident),
    /// Division or remainder with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,
    /// Integer arithmetic left the `i64` range.
    #[error("integer overflow")]
    Overflow,
}

/// Which part of a reaction was being evaluated when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The `if` condition.
    Condition,
    /// One of the product terms.
    Product,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Condition => f.write_str("condition"),
            Self::Product => f.write_str("product"),
        }
    }
}

/// Failure while applying one reaction to a multiset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReactionError {
    /// A term failed to evaluate.
    #[error("error evaluating reaction {phase}: {source}")]
    Eval {
        /// Condition or product.
        phase: Phase,
        /// Underlying evaluation failure.
        #[source]
        source: EvalError,
    },
    /// An expanding reaction went past the configured depth limit.
    #[error("expansion exceeded the configured depth limit of {limit}")]
    ExpansionDepthExceeded {
        /// The configured limit.
        limit: usize,
    },
}

impl ReactionError {
    pub(crate) fn condition(source: EvalError) -> Self {
        Self::Eval {
            phase: Phase::Condition,
            source,
        }
    }

    pub(crate) fn product(source: EvalError) -> Self {
        Self::Eval {
            phase: Phase::Product,
            source,
        }
    }
}

/// Where in the evaluator a reaction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Inside the partitioned strategy for the given reaction type.
    Partitioned(ReactionType),
    /// During the final unpartitioned pass.
    FinalPass,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Partitioned(ty) => write!(f, "{ty} partitioned pass"),
            Self::FinalPass => f.write_str("final pass"),
        }
    }
}

/// Errors emitted by the engine.
#[derive(Debug, Error)]
pub enum ChamError {
    /// A reaction failed while being applied; evaluation stopped.
    #[error("error evaluating reaction {index} ({stage}): {source}")]
    Reaction {
        /// Zero-based position of the reaction in the program.
        index: usize,
        /// Strategy stage that was running.
        stage: Stage,
        /// Underlying failure.
        #[source]
        source: ReactionError,
    },
    /// A reaction declared no input patterns; it could fire forever.
    #[error("reaction {index} has no inputs")]
    EmptyInput {
        /// Zero-based position of the reaction in the program.
        index: usize,
    },
    /// The engine configuration was rejected.
    #[error("invalid engine config: {0}")]
    InvalidConfig(&'static str),
    /// The dedicated worker pool could not be built.
    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
