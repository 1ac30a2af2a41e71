// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Partitioned parallel execution.
//!
//! A round splits the solution into fixed-size partitions, runs one worker
//! per partition with no shared mutable state, waits for every worker, then
//! clears the solution and merges all partitions back. The merge happens on
//! failure too, so an error never loses elements.

mod exec;
mod strategy;

pub use exec::Executor;
pub(crate) use strategy::Strategy;
