// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Lexing and parsing errors.

use thiserror::Error;

use crate::token::Position;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// A character that starts no token.
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    /// `/*` without a closing `*/`.
    #[error("unterminated block comment")]
    UnterminatedComment,
    /// A literal that does not fit in a 64-bit integer.
    #[error("integer literal out of range: {0}")]
    IntegerOutOfRange(String),
    /// The parser needed something else here.
    #[error("expected {expected} but found {found}")]
    UnexpectedToken {
        /// What the grammar allows here.
        expected: String,
        /// The token actually present.
        found: String,
    },
    /// A tuple with more elements than a solution tuple can hold.
    #[error("tuple has {width} elements; at most {max} are allowed")]
    TupleTooWide {
        /// Elements written.
        width: usize,
        /// Tuple capacity.
        max: usize,
    },
    /// `:name` referred to nothing in the reaction store.
    #[error("unknown reaction `{0}`")]
    UnknownReaction(String),
}

/// A lexing or parsing failure at a source position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("error while parsing (at {position}): {kind}")]
pub struct ParseError {
    /// Failure category.
    pub kind: ParseErrorKind,
    /// Where it was detected.
    pub position: Position,
}

impl ParseError {
    /// Creates an error.
    pub fn new(kind: ParseErrorKind, position: Position) -> Self {
        Self { kind, position }
    }

    /// Renders the offending source line with a caret under the error
    /// column, followed by the message.
    ///
    /// Falls back to just the message when the position lies outside
    /// `source`.
    pub fn render(&self, source: &str) -> String {
        let Some(line) = source.lines().nth(self.position.line.saturating_sub(1)) else {
            return self.to_string();
        };
        let pad = " ".repeat(self.position.column.saturating_sub(1));
        format!("{self}\n\n{line}\n{pad}^ here")
    }
}
