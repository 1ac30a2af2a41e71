// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Reactant search: ordered k-permutations over a materialized multiset.
//!
//! The matcher is first-match: the first permutation (in lexicographic index
//! order) whose shapes match and whose condition holds is committed, and the
//! search stops. There is no scoring or fairness between candidates.

use crate::bindings::Bindings;
use crate::error::ReactionError;
use crate::multiset::Multiset;
use crate::reaction::{IdentTuple, Reaction};
use crate::tuple::IntTuple;

/// Result of a single reaction attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReactionOutcome {
    /// A permutation matched; inputs were consumed and products inserted.
    Reacted,
    /// No permutation matched; the multiset is unchanged.
    NoReaction,
}

/// Lexicographic enumerator of k-permutations of `0..n` without repetition.
///
/// `[0, 1, 2]`, `[0, 1, 3]`, …, `[0, 2, 1]`, … for `k = 3`. Yields nothing
/// when `k > n` and exactly one empty permutation when `k == 0`.
#[derive(Debug, Clone)]
pub struct KPermutations {
    n: usize,
    idx: Vec<usize>,
    used: Vec<bool>,
    started: bool,
    exhausted: bool,
}

impl KPermutations {
    /// Creates an enumerator positioned before the first permutation.
    pub fn new(n: usize, k: usize) -> Self {
        let exhausted = k > n;
        let mut used = vec![false; n];
        let idx: Vec<usize> = if exhausted { Vec::new() } else { (0..k).collect() };
        for &i in &idx {
            used[i] = true;
        }
        Self {
            n,
            idx,
            used,
            started: false,
            exhausted,
        }
    }

    /// Advances to the next permutation and returns it.
    pub fn advance(&mut self) -> Option<&[usize]> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(&self.idx);
        }
        if self.step() {
            Some(&self.idx)
        } else {
            self.exhausted = true;
            None
        }
    }

    fn step(&mut self) -> bool {
        let k = self.idx.len();
        for pos in (0..k).rev() {
            let current = self.idx[pos];
            self.used[current] = false;
            let Some(next) = (current + 1..self.n).find(|&v| !self.used[v]) else {
                continue;
            };
            self.idx[pos] = next;
            self.used[next] = true;
            // Refill the tail with the smallest unused indices, ascending.
            let mut candidate = 0;
            for slot in pos + 1..k {
                while self.used[candidate] {
                    candidate += 1;
                }
                self.idx[slot] = candidate;
                self.used[candidate] = true;
            }
            return true;
        }
        false
    }
}

impl Iterator for KPermutations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        self.advance().map(<[usize]>::to_vec)
    }
}

/// Tries to apply `reaction` once to `solution`.
///
/// Every candidate gets a fresh [`Bindings`]. A permutation is skipped when
/// any chosen element's dimensionality differs from its pattern. Products
/// are evaluated before anything is consumed, so a failing product leaves
/// `solution` untouched.
///
/// # Errors
///
/// Returns [`ReactionError::Eval`] when the condition or a product fails to
/// evaluate. The search stops at the first such failure.
pub fn attempt_reaction(
    reaction: &Reaction,
    solution: &mut Multiset,
) -> Result<ReactionOutcome, ReactionError> {
    let k = reaction.input_arity();
    if k > solution.cardinality() {
        return Ok(ReactionOutcome::NoReaction);
    }
    let elements = solution.slice();
    let width: usize = reaction.inputs.iter().map(IdentTuple::dimensions).sum();
    let mut perms = KPermutations::new(elements.len(), k);

    while let Some(choice) = perms.advance() {
        let shapes_match = reaction
            .inputs
            .iter()
            .zip(choice)
            .all(|(pattern, &i)| pattern.shape_matches(&elements[i]));
        if !shapes_match {
            continue;
        }

        let mut env = Bindings::with_capacity(width);
        for (pattern, &i) in reaction.inputs.iter().zip(choice) {
            for (ident, &value) in pattern.idents.iter().zip(elements[i].as_slice()) {
                env.bind(ident.as_str(), value);
            }
        }

        if !reaction
            .condition
            .eval(&env)
            .map_err(ReactionError::condition)?
        {
            continue;
        }

        let mut products = Vec::with_capacity(reaction.output_arity());
        for product in &reaction.products {
            let values = product
                .terms
                .iter()
                .map(|term| term.eval(&env))
                .collect::<Result<Vec<_>, _>>()
                .map_err(ReactionError::product)?;
            products.push(IntTuple::new(&values));
        }

        for &i in choice {
            solution.take(&elements[i]);
        }
        solution.add_all(products);
        return Ok(ReactionOutcome::Reacted);
    }

    Ok(ReactionOutcome::NoReaction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{EvalError, Phase};
    use crate::reaction::TermTuple;
    use crate::term::{ArithOp, BoolTerm, CompareOp, IntTerm};

    fn perms(n: usize, k: usize) -> Vec<Vec<usize>> {
        KPermutations::new(n, k).collect()
    }

    #[test]
    fn permutations_are_lexicographic_and_complete() {
        assert_eq!(
            perms(3, 2),
            vec![
                vec![0, 1],
                vec![0, 2],
                vec![1, 0],
                vec![1, 2],
                vec![2, 0],
                vec![2, 1],
            ]
        );
        assert_eq!(perms(4, 3).len(), 24);
        assert_eq!(perms(5, 2).len(), 20);
    }

    #[test]
    fn permutation_edge_sizes() {
        assert!(perms(2, 3).is_empty());
        assert_eq!(perms(0, 0), vec![Vec::<usize>::new()]);
        assert_eq!(perms(1, 1), vec![vec![0]]);
    }

    #[test]
    fn permutations_never_repeat_an_index() {
        for p in perms(5, 3) {
            let mut sorted = p.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 3, "{p:?}");
        }
    }

    fn max_reaction() -> Reaction {
        // x, y => x if x >= y
        Reaction::new(
            vec![IdentTuple::new(["x"]), IdentTuple::new(["y"])],
            vec![TermTuple::new(vec![IntTerm::var("x")])],
            BoolTerm::compare(CompareOp::Ge, IntTerm::var("x"), IntTerm::var("y")),
        )
    }

    #[test]
    fn first_match_consumes_inputs_and_adds_products() {
        let mut solution: Multiset = [3, 1, 2].into_iter().map(IntTuple::from).collect();
        let outcome = attempt_reaction(&max_reaction(), &mut solution);
        assert_eq!(outcome, Ok(ReactionOutcome::Reacted));
        // Slice is [3, 1, 2]; permutation (0, 1) binds x = 3, y = 1 and fires.
        assert_eq!(solution.to_string(), "{2, 3}");
    }

    #[test]
    fn shape_mismatch_is_skipped() {
        let pair_sum = Reaction::new(
            vec![IdentTuple::new(["a", "b"])],
            vec![TermTuple::new(vec![IntTerm::binary(
                ArithOp::Add,
                IntTerm::var("a"),
                IntTerm::var("b"),
            )])],
            BoolTerm::Literal(true),
        );
        let mut solution = Multiset::new();
        solution.add(IntTuple::scalar(9));
        solution.add(IntTuple::new(&[2, 5]));
        assert_eq!(
            attempt_reaction(&pair_sum, &mut solution),
            Ok(ReactionOutcome::Reacted)
        );
        assert_eq!(solution.to_string(), "{7, 9}");
    }

    #[test]
    fn too_few_elements_is_no_reaction() {
        let mut solution: Multiset = std::iter::once(IntTuple::scalar(1)).collect();
        assert_eq!(
            attempt_reaction(&max_reaction(), &mut solution),
            Ok(ReactionOutcome::NoReaction)
        );
        assert_eq!(solution.cardinality(), 1);
    }

    #[test]
    fn product_failure_leaves_solution_intact() {
        let divide = Reaction::new(
            vec![IdentTuple::new(["x"]), IdentTuple::new(["y"])],
            vec![TermTuple::new(vec![IntTerm::binary(
                ArithOp::Div,
                IntTerm::var("x"),
                IntTerm::var("y"),
            )])],
            BoolTerm::Literal(true),
        );
        let mut solution: Multiset = [1, 0].into_iter().map(IntTuple::from).collect();
        let before = solution.clone();
        let err = attempt_reaction(&divide, &mut solution);
        assert_eq!(
            err,
            Err(ReactionError::Eval {
                phase: Phase::Product,
                source: EvalError::DivisionByZero,
            })
        );
        assert_eq!(solution, before);
    }

    #[test]
    fn condition_failure_is_reported() {
        let bad = Reaction::new(
            vec![IdentTuple::new(["x"])],
            vec![],
            BoolTerm::compare(CompareOp::Eq, IntTerm::var("q"), IntTerm::number(0)),
        );
        let mut solution: Multiset = std::iter::once(IntTuple::scalar(1)).collect();
        assert!(matches!(
            attempt_reaction(&bad, &mut solution),
            Err(ReactionError::Eval {
                phase: Phase::Condition,
                source: EvalError::UnboundIdentifier(_),
            })
        ));
    }
}
