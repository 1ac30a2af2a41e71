// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reaction and program definitions.
use core::fmt;

use crate::classify::{classify, ReactionType};
use crate::term::{BoolTerm, Ident, IntTerm};
use crate::tuple::IntTuple;

/// Input pattern for one reactant: a tuple of identifiers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdentTuple {
    /// Identifiers bound positionally to the reactant's values.
    pub idents: Vec<Ident>,
}

impl IdentTuple {
    /// Builds a pattern from identifier names.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            idents: names.into_iter().map(Ident::new).collect(),
        }
    }

    /// Number of identifiers; a reactant must have the same dimensionality.
    pub fn dimensions(&self) -> usize {
        self.idents.len()
    }

    /// Returns `true` when `tuple` has the same dimensionality as this pattern.
    pub fn shape_matches(&self, tuple: &IntTuple) -> bool {
        self.dimensions() == tuple.dimensions()
    }
}

/// Output product: a tuple of integer terms.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermTuple {
    /// Terms evaluated positionally into the product tuple.
    pub terms: Vec<IntTerm>,
}

impl TermTuple {
    /// Builds a product from terms.
    pub fn new(terms: Vec<IntTerm>) -> Self {
        Self { terms }
    }

    /// Number of terms.
    pub fn dimensions(&self) -> usize {
        self.terms.len()
    }
}

/// A rewrite rule: consume inputs matching the patterns under the condition,
/// produce the products.
///
/// Reactions are immutable once built; the engine only ever reads them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reaction {
    /// Ordered input patterns; the i-th pattern binds the i-th chosen element.
    pub inputs: Vec<IdentTuple>,
    /// Ordered products added when the reaction fires.
    pub products: Vec<TermTuple>,
    /// Condition over the bound identifiers.
    pub condition: BoolTerm,
}

impl Reaction {
    /// Creates a reaction.
    pub fn new(inputs: Vec<IdentTuple>, products: Vec<TermTuple>, condition: BoolTerm) -> Self {
        Self {
            inputs,
            products,
            condition,
        }
    }

    /// Elements consumed per application (`k`).
    pub fn input_arity(&self) -> usize {
        self.inputs.len()
    }

    /// Elements produced per application (`m`).
    pub fn output_arity(&self) -> usize {
        self.products.len()
    }

    /// Structural classification of this reaction.
    pub fn reaction_type(&self) -> ReactionType {
        classify(self.input_arity(), self.output_arity())
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for IdentTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [single] = self.idents.as_slice() {
            return write!(f, "{single}");
        }
        f.write_str("[")?;
        write_list(f, &self.idents)?;
        f.write_str("]")
    }
}

impl fmt::Display for TermTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let [single] = self.terms.as_slice() {
            return write!(f, "{single}");
        }
        f.write_str("[")?;
        write_list(f, &self.terms)?;
        f.write_str("]")
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, &self.inputs)?;
        f.write_str(" => ")?;
        if self.products.is_empty() {
            f.write_str("{}")?;
        } else {
            write_list(f, &self.products)?;
        }
        write!(f, " if {}", self.condition)
    }
}

/// A complete program: the initial solution plus reactions applied in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    /// Initial solution contents.
    pub input: Vec<IntTuple>,
    /// Reactions, applied one after another.
    pub reactions: Vec<Reaction>,
}

impl Program {
    /// Creates a program.
    pub fn new(input: Vec<IntTuple>, reactions: Vec<Reaction>) -> Self {
        Self { input, reactions }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        write_list(f, &self.input)?;
        f.write_str("}")?;
        for reaction in &self.reactions {
            write!(f, " | {reaction}")?;
        }
        Ok(())
    }
}
