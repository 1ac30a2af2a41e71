// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Workload builders shared by the cham benchmarks.

use cham_core::{IntTuple, Program};
use cham_lang::{parse_program, ParseError, ReactionStore};

/// `n` copies of `1` merged pairwise by equality (reducing).
pub const MERGE_EQUAL: &str = "x, y => x + y if x == y";
/// Sum of everything (reducing, always fires).
pub const SUM_ALL: &str = "x, y => x + y if true";
/// Pairs swapped into order (constant).
pub const SORT_PAIRS: &str = "[a, b] => [b, a] if a > b";
/// Each positive value splits in two (expanding).
pub const SPLIT_DOWN: &str = "x => x - 1, x - 1 if x > 0";

/// Builds a program over `input` with the single reaction `reaction`.
pub fn program(input: Vec<IntTuple>, reaction: &str) -> Result<Program, ParseError> {
    let mut program = parse_program(&format!("{{}} | {reaction}"), &ReactionStore::new())?;
    program.input = input;
    Ok(program)
}

/// `1..=n` as scalars.
pub fn counting(n: i64) -> Vec<IntTuple> {
    (1..=n).map(IntTuple::scalar).collect()
}

/// `n` descending pairs `[i + 1, i]`.
pub fn descending_pairs(n: i64) -> Vec<IntTuple> {
    (0..n).map(|i| IntTuple::new(&[i + 1, i])).collect()
}
