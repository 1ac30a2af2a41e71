// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The `cham` interpreter: command-line parsing, logging setup, output
//! formatting and the interactive loop.
//!
//! Library crates stay free of I/O; everything that prints lives here.

pub mod cli;
pub mod logging;
pub mod output;
pub mod repl;
pub mod session;
