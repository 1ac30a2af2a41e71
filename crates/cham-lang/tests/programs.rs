// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Source text through the parser and the engine.

#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]

use cham_core::{evaluate, ChamError, EvalError, IntTuple, Multiset, ReactionError};
use cham_lang::{parse_program, parse_statement, ReactionStore, Statement};

fn run(source: &str) -> Result<Multiset, ChamError> {
    let program = parse_program(source, &ReactionStore::new()).expect("parse");
    evaluate(&program)
}

fn scalars(values: &[i64]) -> Multiset {
    values.iter().copied().map(IntTuple::scalar).collect()
}

#[test]
fn equal_values_merge_pairwise() {
    let three = run("{1, 1, 1} | x, y => x + y if x == y").expect("evaluate");
    assert_eq!(three.to_string(), "{1, 2}");
    let four = run("{1, 1, 1, 1} | x, y => x + y if x == y").expect("evaluate");
    assert_eq!(four.to_string(), "{4}");
}

#[test]
fn expansion_fills_the_solution_with_zeros() {
    let result = run("{5} | x => x - 1, x - 1 if x > 0").expect("evaluate");
    assert_eq!(result, scalars(&[0; 32]));
}

#[test]
fn false_condition_is_not_an_error() {
    let result = run("{3, 4} | x, y => x + y if false").expect("evaluate");
    assert_eq!(result.to_string(), "{3, 4}");
}

#[test]
fn division_by_zero_surfaces() {
    let err = run("{1, 0} | x, y => x / y if true").unwrap_err();
    let ChamError::Reaction { source, .. } = &err else {
        panic!("expected reaction error, got {err}");
    };
    assert!(matches!(
        source,
        ReactionError::Eval {
            source: EvalError::DivisionByZero,
            ..
        }
    ));
    assert!(err.to_string().contains("division by zero"), "{err}");
}

#[test]
fn maximum_of_a_solution() {
    let result = run("{4, 9, 1, 7, 3, 12, 5, 8, 2, 6, 11, 10, 0, 13, 15, 14, 16, 17, 18} \
                      | x, y => x if x >= y")
    .expect("evaluate");
    assert_eq!(result.to_string(), "{18}");
}

#[test]
fn tuples_swap_into_order() {
    let result = run("{[3, 1], [2, 5], [9, 4]} | [a, b] => [b, a] if a > b").expect("evaluate");
    assert_eq!(result.to_string(), "{[1, 3], [2, 5], [4, 9]}");
}

#[test]
fn primes_by_sieve() {
    let numbers: Vec<String> = (2..=30).map(|n| n.to_string()).collect();
    let source = format!("{{{}}} | x, y => y if x % y == 0", numbers.join(", "));
    let result = run(&source).expect("evaluate");
    assert_eq!(
        result.to_string(),
        "{2, 3, 5, 7, 11, 13, 17, 19, 23, 29}"
    );
}

#[test]
fn stored_definitions_chain() {
    let mut store = ReactionStore::new();
    for line in [
        "double : x => x * 2 if x < 50",
        "sum : x, y => x + y if true",
        "both : :double | :sum",
    ] {
        let Statement::Definition(def) = parse_statement(line, &store).expect("parse") else {
            panic!("expected definition: {line}");
        };
        store.put(def.name, def.reactions);
    }
    assert_eq!(store.names(), vec!["both", "double", "sum"]);
    assert_eq!(store.get("both").map(<[_]>::len), Some(2));

    let program = parse_program("{3, 10} | :both", &store).expect("parse");
    // 3 -> 96, 10 -> 80; then summed.
    assert_eq!(evaluate(&program).expect("evaluate").to_string(), "{176}");
}
