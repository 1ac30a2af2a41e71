// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Integer and boolean terms used in reaction conditions and products.
//!
//! Operators are closed enums dispatched by a single `eval` per term kind.
//! Arithmetic is checked: overflow and division by zero surface as
//! [`EvalError`]s rather than wrapping or panicking.

use core::fmt;

use crate::bindings::Bindings;
use crate::error::EvalError;

/// A variable name bound by a reaction's input pattern.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ident(String);

impl Ident {
    /// Creates an identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Binary arithmetic operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArithOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/` (truncating toward zero)
    Div,
    /// `%` (sign follows the dividend)
    Rem,
}

impl ArithOp {
    /// Applies the operator with overflow and zero-divisor checks.
    pub fn apply(self, left: i64, right: i64) -> Result<i64, EvalError> {
        let out = match self {
            Self::Add => left.checked_add(right),
            Self::Sub => left.checked_sub(right),
            Self::Mul => left.checked_mul(right),
            Self::Div | Self::Rem if right == 0 => return Err(EvalError::DivisionByZero),
            Self::Div => left.checked_div(right),
            Self::Rem => left.checked_rem(right),
        };
        out.ok_or(EvalError::Overflow)
    }

    /// Source symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div | Self::Rem => 2,
        }
    }
}

/// Integer comparison operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl CompareOp {
    /// Applies the comparison.
    pub fn apply(self, left: i64, right: i64) -> bool {
        match self {
            Self::Eq => left == right,
            Self::Ne => left != right,
            Self::Lt => left < right,
            Self::Le => left <= right,
            Self::Gt => left > right,
            Self::Ge => left >= right,
        }
    }

    /// Source symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

/// An expression producing an integer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntTerm {
    /// Integer literal.
    Number(i64),
    /// Reference to a bound identifier.
    Var(Ident),
    /// Unary negation.
    Neg(Box<IntTerm>),
    /// Binary arithmetic.
    Binary {
        /// Operator.
        op: ArithOp,
        /// Left operand.
        left: Box<IntTerm>,
        /// Right operand.
        right: Box<IntTerm>,
    },
}

impl IntTerm {
    /// Literal term.
    pub fn number(value: i64) -> Self {
        Self::Number(value)
    }

    /// Variable term.
    pub fn var(name: impl Into<String>) -> Self {
        Self::Var(Ident::new(name))
    }

    /// Negation term.
    pub fn neg(term: IntTerm) -> Self {
        Self::Neg(Box::new(term))
    }

    /// Binary term.
    pub fn binary(op: ArithOp, left: IntTerm, right: IntTerm) -> Self {
        Self::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Evaluates the term against `env`.
    pub fn eval(&self, env: &Bindings<'_>) -> Result<i64, EvalError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Var(ident) => env.lookup(ident),
            Self::Neg(inner) => inner.eval(env)?.checked_neg().ok_or(EvalError::Overflow),
            Self::Binary { op, left, right } => op.apply(left.eval(env)?, right.eval(env)?),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Binary { op, .. } => op.precedence(),
            Self::Number(_) | Self::Var(_) | Self::Neg(_) => 3,
        }
    }

    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        let prec = self.precedence();
        if prec < min {
            f.write_str("(")?;
        }
        match self {
            Self::Number(n) => write!(f, "{n}")?,
            Self::Var(ident) => write!(f, "{ident}")?,
            Self::Neg(inner) => {
                f.write_str("-")?;
                inner.fmt_prec(f, 3)?;
            }
            Self::Binary { op, left, right } => {
                left.fmt_prec(f, prec)?;
                write!(f, " {} ", op.symbol())?;
                right.fmt_prec(f, prec + 1)?;
            }
        }
        if prec < min {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for IntTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}

/// An expression producing a boolean.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoolTerm {
    /// `true` / `false`.
    Literal(bool),
    /// Integer comparison.
    Compare {
        /// Operator.
        op: CompareOp,
        /// Left operand.
        left: IntTerm,
        /// Right operand.
        right: IntTerm,
    },
    /// `!`
    Not(Box<BoolTerm>),
    /// `&&` (short-circuit)
    And(Box<BoolTerm>, Box<BoolTerm>),
    /// `||` (short-circuit)
    Or(Box<BoolTerm>, Box<BoolTerm>),
}

impl BoolTerm {
    /// Comparison term.
    pub fn compare(op: CompareOp, left: IntTerm, right: IntTerm) -> Self {
        Self::Compare { op, left, right }
    }

    /// Negation.
    pub fn not(term: BoolTerm) -> Self {
        Self::Not(Box::new(term))
    }

    /// Conjunction.
    pub fn and(left: BoolTerm, right: BoolTerm) -> Self {
        Self::And(Box::new(left), Box::new(right))
    }

    /// Disjunction.
    pub fn or(left: BoolTerm, right: BoolTerm) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }

    /// Evaluates the term against `env`.
    pub fn eval(&self, env: &Bindings<'_>) -> Result<bool, EvalError> {
        match self {
            Self::Literal(b) => Ok(*b),
            Self::Compare { op, left, right } => Ok(op.apply(left.eval(env)?, right.eval(env)?)),
            Self::Not(inner) => Ok(!inner.eval(env)?),
            Self::And(left, right) => Ok(left.eval(env)? && right.eval(env)?),
            Self::Or(left, right) => Ok(left.eval(env)? || right.eval(env)?),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Self::Or(..) => 1,
            Self::And(..) => 2,
            Self::Literal(_) | Self::Compare { .. } | Self::Not(_) => 3,
        }
    }

    fn fmt_prec(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        let prec = self.precedence();
        if prec < min {
            f.write_str("(")?;
        }
        match self {
            Self::Literal(b) => write!(f, "{b}")?,
            Self::Compare { op, left, right } => write!(f, "{left} {} {right}", op.symbol())?,
            Self::Not(inner) => {
                f.write_str("!")?;
                // Comparisons bind looser than `!` in print form; always wrap them.
                match inner.as_ref() {
                    Self::Literal(_) | Self::Not(_) => inner.fmt_prec(f, 3)?,
                    _ => {
                        f.write_str("(")?;
                        inner.fmt_prec(f, 0)?;
                        f.write_str(")")?;
                    }
                }
            }
            Self::And(left, right) | Self::Or(left, right) => {
                let symbol = if matches!(self, Self::And(..)) {
                    "&&"
                } else {
                    "||"
                };
                left.fmt_prec(f, prec)?;
                write!(f, " {symbol} ")?;
                right.fmt_prec(f, prec + 1)?;
            }
        }
        if prec < min {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl fmt::Display for BoolTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_prec(f, 0)
    }
}
