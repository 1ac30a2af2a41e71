// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recursive-descent parser for programs and reaction definitions.
//!
//! ```text
//! program      := input '|' reactions EOF
//! definition   := IDENT ':' reactions EOF
//! input        := '{' '}' | '{' num-tuple {',' num-tuple} '}' | num-tuple {',' num-tuple}
//! reactions    := reaction-ref {'|' reaction-ref}
//! reaction-ref := ':' IDENT | reaction
//! reaction     := ident-tuple {',' ident-tuple} '=>' products 'if' bexp
//! ```

use core::fmt;

use cham_core::{
    ArithOp, BoolTerm, CompareOp, IdentTuple, IntTerm, IntTuple, Program, Reaction, TermTuple,
    TUPLE_CAPACITY,
};

use crate::error::{ParseError, ParseErrorKind};
use crate::lexer::tokenize;
use crate::store::ReactionStore;
use crate::token::{Position, Token, TokenKind};

/// `name : reactions`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    /// Name the reactions are stored under.
    pub name: String,
    /// Reactions with any `:name` references already spliced in.
    pub reactions: Vec<Reaction>,
}

impl fmt::Display for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :", self.name)?;
        for (i, reaction) in self.reactions.iter().enumerate() {
            if i > 0 {
                f.write_str(" |")?;
            }
            write!(f, " {reaction}")?;
        }
        Ok(())
    }
}

/// One line of input: something to run or something to remember.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Statement {
    /// A program to evaluate.
    Program(Program),
    /// A named reaction list to store.
    Definition(Definition),
}

/// Parser over a fully tokenized source.
///
/// `:name` references are resolved against `store` while parsing.
pub struct Parser<'s> {
    tokens: Vec<Token>,
    pos: usize,
    store: &'s ReactionStore,
}

impl<'s> Parser<'s> {
    /// Tokenizes `source`.
    ///
    /// # Errors
    ///
    /// The first lexing error.
    pub fn new(source: &str, store: &'s ReactionStore) -> Result<Self, ParseError> {
        let tokens = tokenize(source)?;
        Ok(Self {
            tokens,
            pos: 0,
            store,
        })
    }

    // ── token cursor ────────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn peek_nth_kind(&self, n: usize) -> &TokenKind {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)].kind
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: expected.to_owned(),
                found: token.kind.to_string(),
            },
            token.position,
        )
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn ident(&mut self) -> Result<(String, Position), ParseError> {
        match self.peek_kind() {
            TokenKind::Ident(name) => {
                let name = name.clone();
                let token = self.advance();
                Ok((name, token.position))
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    fn check_width(width: usize, at: Position) -> Result<(), ParseError> {
        if width > TUPLE_CAPACITY {
            return Err(ParseError::new(
                ParseErrorKind::TupleTooWide {
                    width,
                    max: TUPLE_CAPACITY,
                },
                at,
            ));
        }
        Ok(())
    }

    /// Parses `item {',' item}`.
    fn comma_list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let mut items = vec![item(self)?];
        while self.eat(&TokenKind::Comma) {
            items.push(item(self)?);
        }
        Ok(items)
    }

    /// Parses `'[' item {',' item} ']'` or a bare item.
    fn bracketed<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T, ParseError>,
    ) -> Result<Vec<T>, ParseError> {
        let start = self.peek().position;
        if !self.eat(&TokenKind::LBracket) {
            return Ok(vec![item(self)?]);
        }
        let items = self.comma_list(item)?;
        self.expect(&TokenKind::RBracket, "`,` or `]`")?;
        Self::check_width(items.len(), start)?;
        Ok(items)
    }

    // ── statements ──────────────────────────────────────────────────────

    /// Parses a program or a definition, whichever the input is.
    ///
    /// # Errors
    ///
    /// Any syntax error, an over-wide tuple, or an unknown `:name`.
    pub fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        let is_definition = matches!(self.peek_kind(), TokenKind::Ident(_))
            && self.peek_nth_kind(1) == &TokenKind::Colon;
        if is_definition {
            self.parse_definition().map(Statement::Definition)
        } else {
            self.parse_program().map(Statement::Program)
        }
    }

    /// Parses `input '|' reactions EOF`.
    ///
    /// # Errors
    ///
    /// See [`Parser::parse_statement`].
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let input = self.input()?;
        self.expect(&TokenKind::Pipe, "`|`")?;
        let reactions = self.reactions()?;
        self.expect(&TokenKind::Eof, "`|` or end of input")?;
        Ok(Program::new(input, reactions))
    }

    /// Parses `IDENT ':' reactions EOF`.
    ///
    /// # Errors
    ///
    /// See [`Parser::parse_statement`].
    pub fn parse_definition(&mut self) -> Result<Definition, ParseError> {
        let (name, _) = self.ident()?;
        self.expect(&TokenKind::Colon, "`:`")?;
        let reactions = self.reactions()?;
        self.expect(&TokenKind::Eof, "`|` or end of input")?;
        Ok(Definition { name, reactions })
    }

    // ── solution literal ────────────────────────────────────────────────

    fn input(&mut self) -> Result<Vec<IntTuple>, ParseError> {
        if !self.eat(&TokenKind::LBrace) {
            return self.comma_list(Self::num_tuple);
        }
        if self.eat(&TokenKind::RBrace) {
            return Ok(Vec::new());
        }
        let tuples = self.comma_list(Self::num_tuple)?;
        self.expect(&TokenKind::RBrace, "`,` or `}`")?;
        Ok(tuples)
    }

    fn num_tuple(&mut self) -> Result<IntTuple, ParseError> {
        let values = self.bracketed(Self::int)?;
        Ok(IntTuple::new(&values))
    }

    fn int(&mut self) -> Result<i64, ParseError> {
        let negative = self.eat(&TokenKind::Minus);
        let token = self.peek().clone();
        let TokenKind::Number(n) = token.kind else {
            return Err(self.unexpected("integer"));
        };
        self.advance();
        Self::to_i64(n, negative, token.position)
    }

    fn to_i64(n: u64, negative: bool, at: Position) -> Result<i64, ParseError> {
        let value = if negative {
            0i64.checked_sub_unsigned(n)
        } else {
            i64::try_from(n).ok()
        };
        value.ok_or_else(|| {
            let text = if negative { format!("-{n}") } else { n.to_string() };
            ParseError::new(ParseErrorKind::IntegerOutOfRange(text), at)
        })
    }

    // ── reactions ───────────────────────────────────────────────────────

    fn reactions(&mut self) -> Result<Vec<Reaction>, ParseError> {
        let mut reactions = Vec::new();
        loop {
            self.reaction_ref(&mut reactions)?;
            if !self.eat(&TokenKind::Pipe) {
                return Ok(reactions);
            }
        }
    }

    fn reaction_ref(&mut self, out: &mut Vec<Reaction>) -> Result<(), ParseError> {
        if !self.eat(&TokenKind::Colon) {
            out.push(self.reaction()?);
            return Ok(());
        }
        let (name, at) = self.ident()?;
        let Some(stored) = self.store.get(&name) else {
            return Err(ParseError::new(ParseErrorKind::UnknownReaction(name), at));
        };
        out.extend_from_slice(stored);
        Ok(())
    }

    fn reaction(&mut self) -> Result<Reaction, ParseError> {
        let inputs = self.comma_list(Self::ident_tuple)?;
        self.expect(&TokenKind::Arrow, "`,` or `=>`")?;
        let products = self.products()?;
        self.expect(&TokenKind::If, "`,` or `if`")?;
        let condition = self.bexp()?;
        Ok(Reaction::new(inputs, products, condition))
    }

    fn ident_tuple(&mut self) -> Result<IdentTuple, ParseError> {
        let names = self.bracketed(|p| p.ident().map(|(name, _)| name))?;
        Ok(IdentTuple::new(names))
    }

    fn products(&mut self) -> Result<Vec<TermTuple>, ParseError> {
        if !self.eat(&TokenKind::LBrace) {
            return self.comma_list(Self::term_tuple);
        }
        if self.eat(&TokenKind::RBrace) {
            return Ok(Vec::new());
        }
        let products = self.comma_list(Self::term_tuple)?;
        self.expect(&TokenKind::RBrace, "`,` or `}`")?;
        Ok(products)
    }

    fn term_tuple(&mut self) -> Result<TermTuple, ParseError> {
        self.bracketed(Self::aexp).map(TermTuple::new)
    }

    // ── arithmetic ──────────────────────────────────────────────────────

    fn aexp(&mut self) -> Result<IntTerm, ParseError> {
        let mut left = self.aterm()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Plus => ArithOp::Add,
                TokenKind::Minus => ArithOp::Sub,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.aterm()?;
            left = IntTerm::binary(op, left, right);
        }
    }

    fn aterm(&mut self) -> Result<IntTerm, ParseError> {
        let mut left = self.afactor()?;
        loop {
            let op = match self.peek_kind() {
                TokenKind::Star => ArithOp::Mul,
                TokenKind::Slash => ArithOp::Div,
                TokenKind::Percent => ArithOp::Rem,
                _ => return Ok(left),
            };
            self.advance();
            let right = self.afactor()?;
            left = IntTerm::binary(op, left, right);
        }
    }

    fn afactor(&mut self) -> Result<IntTerm, ParseError> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Number(n) => {
                self.advance();
                Self::to_i64(n, false, token.position).map(IntTerm::number)
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(IntTerm::var(name))
            }
            TokenKind::Minus => {
                self.advance();
                // Fold `-literal` so that i64::MIN is expressible.
                if let TokenKind::Number(n) = *self.peek_kind() {
                    let at = self.advance().position;
                    return Self::to_i64(n, true, at).map(IntTerm::number);
                }
                Ok(IntTerm::neg(self.afactor()?))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.aexp()?;
                self.expect(&TokenKind::RParen, "operator or `)`")?;
                Ok(inner)
            }
            _ => Err(self.unexpected("number, identifier, `-` or `(`")),
        }
    }

    // ── boolean ─────────────────────────────────────────────────────────

    fn bexp(&mut self) -> Result<BoolTerm, ParseError> {
        let mut left = self.bterm()?;
        while self.eat(&TokenKind::OrOr) {
            let right = self.bterm()?;
            left = BoolTerm::or(left, right);
        }
        Ok(left)
    }

    fn bterm(&mut self) -> Result<BoolTerm, ParseError> {
        let mut left = self.bnot()?;
        while self.eat(&TokenKind::AndAnd) {
            let right = self.bnot()?;
            left = BoolTerm::and(left, right);
        }
        Ok(left)
    }

    fn bnot(&mut self) -> Result<BoolTerm, ParseError> {
        if self.eat(&TokenKind::Bang) {
            return Ok(BoolTerm::not(self.bnot()?));
        }
        self.bfactor()
    }

    fn bfactor(&mut self) -> Result<BoolTerm, ParseError> {
        match self.peek_kind() {
            TokenKind::True => {
                self.advance();
                Ok(BoolTerm::Literal(true))
            }
            TokenKind::False => {
                self.advance();
                Ok(BoolTerm::Literal(false))
            }
            TokenKind::LParen => {
                // `(` opens either a boolean group or parenthesized
                // arithmetic on the left of a comparison.
                let save = self.pos;
                match self.paren_bexp() {
                    Ok(term) => Ok(term),
                    Err(first) => {
                        self.pos = save;
                        self.comparison().map_err(|second| {
                            if first.position > second.position {
                                first
                            } else {
                                second
                            }
                        })
                    }
                }
            }
            _ => self.comparison(),
        }
    }

    fn paren_bexp(&mut self) -> Result<BoolTerm, ParseError> {
        self.expect(&TokenKind::LParen, "`(`")?;
        let inner = self.bexp()?;
        self.expect(&TokenKind::RParen, "`&&`, `||` or `)`")?;
        Ok(inner)
    }

    fn comparison(&mut self) -> Result<BoolTerm, ParseError> {
        let left = self.aexp()?;
        let op = match self.peek_kind() {
            TokenKind::Lt => CompareOp::Lt,
            TokenKind::Le => CompareOp::Le,
            TokenKind::Gt => CompareOp::Gt,
            TokenKind::Ge => CompareOp::Ge,
            TokenKind::EqEq => CompareOp::Eq,
            TokenKind::Ne => CompareOp::Ne,
            _ => return Err(self.unexpected("comparison operator")),
        };
        self.advance();
        let right = self.aexp()?;
        Ok(BoolTerm::compare(op, left, right))
    }
}

/// Parses `source` as a program.
///
/// # Errors
///
/// See [`Parser::parse_statement`].
pub fn parse_program(source: &str, store: &ReactionStore) -> Result<Program, ParseError> {
    Parser::new(source, store)?.parse_program()
}

/// Parses `source` as a definition.
///
/// # Errors
///
/// See [`Parser::parse_statement`].
pub fn parse_definition(source: &str, store: &ReactionStore) -> Result<Definition, ParseError> {
    Parser::new(source, store)?.parse_definition()
}

/// Parses `source` as whichever statement it is.
///
/// # Errors
///
/// See [`Parser::parse_statement`].
pub fn parse_statement(source: &str, store: &ReactionStore) -> Result<Statement, ParseError> {
    Parser::new(source, store)?.parse_statement()
}
