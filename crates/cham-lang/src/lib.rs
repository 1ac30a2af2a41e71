// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! cham-lang: text front end for the Cham engine.
//!
//! Turns source text into [`cham_core::Program`]s and named reaction
//! definitions. Programs look like
//!
//! ```text
//! {1, 1, 1, 1} | x, y => x + y if x == y
//! ```
//!
//! and definitions like `sum : x, y => x + y if true`, referenced later as
//! `:sum`.
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
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod error;
mod lexer;
mod parser;
mod store;
mod token;

pub use error::{ParseError, ParseErrorKind};
pub use lexer::{tokenize, Lexer};
pub use parser::{parse_definition, parse_program, parse_statement, Definition, Parser, Statement};
pub use store::ReactionStore;
pub use token::{Position, Token, TokenKind};
