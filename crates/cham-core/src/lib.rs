// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! cham-core: chemical-reaction multiset rewriting engine.
//!
//! A [`Program`] is an initial solution (a [`Multiset`] of [`IntTuple`]s) and
//! an ordered list of [`Reaction`]s. Each reaction consumes a fixed number of
//! elements that satisfy its condition and inserts computed products. The
//! [`Engine`] applies every reaction until the solution is stable for it,
//! first over partitions of the solution in parallel, then once more over the
//! whole solution.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::module_name_repetitions,
    clippy::use_self,
    clippy::cast_possible_truncation
)]

mod bindings;
mod classify;
mod config;
mod driver;
mod engine;
mod error;
mod matcher;
mod multiset;
mod parallel;
mod reaction;
mod term;
mod tuple;

pub use bindings::Bindings;
pub use classify::{classify, ReactionType};
pub use config::EngineConfig;
pub use driver::{run_reactions, StepLimit};
pub use engine::{evaluate, Engine};
pub use error::{ChamError, EvalError, Phase, ReactionError, Stage};
pub use matcher::{attempt_reaction, KPermutations, ReactionOutcome};
pub use multiset::Multiset;
pub use parallel::Executor;
pub use reaction::{IdentTuple, Program, Reaction, TermTuple};
pub use term::{ArithOp, BoolTerm, CompareOp, Ident, IntTerm};
pub use tuple::{IntTuple, TUPLE_CAPACITY};
