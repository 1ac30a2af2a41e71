// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Hand-written scanner over `char`s.

use std::iter::Peekable;
use std::str::Chars;

use crate::error::{ParseError, ParseErrorKind};
use crate::token::{Position, Token, TokenKind};

/// Streaming lexer. Yields [`TokenKind::Eof`] once input is exhausted and
/// keeps yielding it on further calls.
pub struct Lexer<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), ParseError> {
        loop {
            match self.chars.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('/') => {
                    let mut ahead = self.chars.clone();
                    ahead.next();
                    match ahead.next() {
                        Some('/') => {
                            while let Some(&c) = self.chars.peek() {
                                if c == '\n' {
                                    break;
                                }
                                self.bump();
                            }
                        }
                        Some('*') => {
                            let start = self.position();
                            self.bump();
                            self.bump();
                            let mut closed = false;
                            while let Some(c) = self.bump() {
                                if c == '*' && self.eat('/') {
                                    closed = true;
                                    break;
                                }
                            }
                            if !closed {
                                return Err(ParseError::new(
                                    ParseErrorKind::UnterminatedComment,
                                    start,
                                ));
                            }
                        }
                        _ => return Ok(()),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Scans the next token.
    ///
    /// # Errors
    ///
    /// Unknown characters, unterminated block comments and literals that do
    /// not fit in `u64`.
    pub fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_trivia()?;
        let start = self.position();
        let Some(c) = self.bump() else {
            return Ok(Token::new(TokenKind::Eof, start));
        };

        let kind = match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '=' if self.eat('>') => TokenKind::Arrow,
            '=' if self.eat('=') => TokenKind::EqEq,
            '!' if self.eat('=') => TokenKind::Ne,
            '!' => TokenKind::Bang,
            '<' if self.eat('=') => TokenKind::Le,
            '<' => TokenKind::Lt,
            '>' if self.eat('=') => TokenKind::Ge,
            '>' => TokenKind::Gt,
            '&' if self.eat('&') => TokenKind::AndAnd,
            '|' if self.eat('|') => TokenKind::OrOr,
            '|' => TokenKind::Pipe,
            '0'..='9' => self.number(c, start)?,
            'a'..='z' | '_' => self.word(c),
            other => {
                return Err(ParseError::new(ParseErrorKind::UnexpectedChar(other), start));
            }
        };
        Ok(Token::new(kind, start))
    }

    fn number(&mut self, first: char, start: Position) -> Result<TokenKind, ParseError> {
        let mut digits = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.bump();
        }
        digits
            .parse::<u64>()
            .map(TokenKind::Number)
            .map_err(move |_| ParseError::new(ParseErrorKind::IntegerOutOfRange(digits), start))
    }

    fn word(&mut self, first: char) -> TokenKind {
        let mut word = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
                break;
            }
            word.push(c);
            self.bump();
        }
        TokenKind::from_word(&word)
    }
}

/// Scans all of `source`. The last token is always [`TokenKind::Eof`].
///
/// # Errors
///
/// The first lexing error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}
