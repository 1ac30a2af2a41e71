// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Property tests for the multiset, matcher and evaluator.

#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use proptest::prelude::*;
use proptest::test_runner::{Config as PropConfig, RngAlgorithm, TestRng, TestRunner};

use cham_core::{
    attempt_reaction, classify, run_reactions, BoolTerm, IdentTuple, IntTuple, Multiset, Program,
    Reaction, ReactionOutcome, ReactionType, StepLimit, TermTuple,
};
use common::{engine, merge_equal, sum_all, var, WORKER_COUNTS};

fn tuple() -> impl Strategy<Value = IntTuple> {
    prop::collection::vec(-5i64..5, 1..4).prop_map(|values| IntTuple::new(&values))
}

fn solution() -> impl Strategy<Value = Multiset> {
    prop::collection::vec(tuple(), 0..60).prop_map(|tuples| tuples.into_iter().collect())
}

/// `x0, .., x{k-1} => x0 (m times) if true`
fn always_fires(k: usize, m: usize) -> Reaction {
    let inputs = (0..k).map(|i| IdentTuple::new([format!("x{i}")])).collect();
    let products = (0..m).map(|_| TermTuple::new(vec![var("x0")])).collect();
    Reaction::new(inputs, products, BoolTerm::Literal(true))
}

proptest! {
    #![proptest_config(PropConfig { cases: 96, ..PropConfig::default() })]

    #[test]
    fn partition_then_merge_is_identity(set in solution(), size in 1usize..12) {
        let parts = set.partition(size);
        let mut merged = Multiset::new();
        for part in parts {
            prop_assert!(!part.is_empty());
            prop_assert!(part.cardinality() <= size);
            merged.merge(part);
        }
        prop_assert_eq!(merged, set);
    }

    #[test]
    fn add_then_take_restores(set in solution(), t in tuple()) {
        let mut changed = set.clone();
        changed.add(t);
        prop_assert_eq!(changed.cardinality(), set.cardinality() + 1);
        changed.take(&t);
        prop_assert_eq!(changed, set);
    }

    #[test]
    fn slice_length_is_cardinality(set in solution()) {
        prop_assert_eq!(set.slice().len(), set.cardinality());
        let total: usize = set.iter().map(|(_, count)| count).sum();
        prop_assert_eq!(total, set.cardinality());
    }

    #[test]
    fn successful_match_changes_cardinality_by_m_minus_k(
        values in prop::collection::vec(-50i64..50, 4..30),
        k in 1usize..4,
        m in 0usize..4,
    ) {
        let mut set: Multiset = values.into_iter().map(IntTuple::scalar).collect();
        let before = set.cardinality();
        let outcome = attempt_reaction(&always_fires(k, m), &mut set).expect("no eval errors");
        prop_assert_eq!(outcome, ReactionOutcome::Reacted);
        prop_assert_eq!(set.cardinality() + k, before + m);
    }

    #[test]
    fn classifier_matches_arity_order(i in 0usize..64, o in 0usize..64) {
        let expected = match i.cmp(&o) {
            std::cmp::Ordering::Greater => ReactionType::Reducing,
            std::cmp::Ordering::Equal => ReactionType::Constant,
            std::cmp::Ordering::Less => ReactionType::Expanding,
        };
        prop_assert_eq!(classify(i, o), expected);
    }

    #[test]
    fn evaluated_solution_is_stable(values in prop::collection::vec(0i64..4, 0..48)) {
        let reaction = merge_equal();
        let program = Program::new(
            values.into_iter().map(IntTuple::scalar).collect(),
            vec![reaction.clone()],
        );
        let mut result = engine(0).evaluate(&program).expect("evaluate");
        let snapshot = result.clone();
        let performed = run_reactions(&reaction, &mut result, StepLimit::Unbounded);
        prop_assert_eq!(performed, Ok(0));
        prop_assert_eq!(result, snapshot);
    }
}

#[test]
fn proptest_seed_pinned_sum_is_worker_invariant() {
    const SEED_BYTES: [u8; 32] = [
        0x43, 0x48, 0x41, 0x4d, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0,
    ];

    let rng = TestRng::from_seed(RngAlgorithm::ChaCha, &SEED_BYTES);
    let mut runner = TestRunner::new_with_rng(
        PropConfig {
            cases: 32,
            ..PropConfig::default()
        },
        rng,
    );

    let values = prop::collection::vec(-1_000i64..1_000, 1..120);
    runner
        .run(&values, |values| {
            let expected: i64 = values.iter().sum();
            let program = Program::new(
                values.into_iter().map(IntTuple::scalar).collect(),
                vec![sum_all()],
            );
            for &workers in WORKER_COUNTS {
                let result = engine(workers).evaluate(&program).expect("evaluate");
                prop_assert_eq!(result.cardinality(), 1);
                prop_assert_eq!(result.multiplicity(&IntTuple::scalar(expected)), 1);
            }
            Ok(())
        })
        .expect("property holds");
}
