// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code)]

use cham_core::{
    ArithOp, BoolTerm, CompareOp, Engine, EngineConfig, IdentTuple, IntTerm, IntTuple, Multiset,
    Reaction, TermTuple,
};

/// Worker counts every invariance test runs under (0 = shared pool,
/// 1 = serial, others = dedicated pools).
pub const WORKER_COUNTS: &[usize] = &[0, 1, 2, 4, 8];

/// Seeds for the deterministic shuffles in invariance tests.
pub const SEEDS: &[u64] = &[
    0x0000_0000_0000_0001,
    0x1234_5678_9ABC_DEF0,
    0xDEAD_BEEF_CAFE_BABE,
    0x0F0F_0F0F_F0F0_F0F0,
];

/// Tiny deterministic RNG (xorshift64*) so tests don't need `rand`.
#[derive(Clone)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    /// Value in `[0, upper)`; modulo bias is fine for tests.
    pub fn gen_range_usize(&mut self, upper: usize) -> usize {
        if upper <= 1 {
            return 0;
        }
        (self.next_u64() as usize) % upper
    }
}

/// Fisher–Yates shuffle (deterministic).
pub fn shuffle<T>(rng: &mut XorShift64, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range_usize(i + 1);
        items.swap(i, j);
    }
}

pub fn engine(workers: usize) -> Engine {
    Engine::new(EngineConfig::default().with_workers(workers)).expect("engine")
}

pub fn scalars(values: impl IntoIterator<Item = i64>) -> Vec<IntTuple> {
    values.into_iter().map(IntTuple::scalar).collect()
}

pub fn multiset(values: impl IntoIterator<Item = i64>) -> Multiset {
    scalars(values).into_iter().collect()
}

pub fn var(name: &str) -> IntTerm {
    IntTerm::var(name)
}

pub fn num(value: i64) -> IntTerm {
    IntTerm::number(value)
}

pub fn bin(op: ArithOp, left: IntTerm, right: IntTerm) -> IntTerm {
    IntTerm::binary(op, left, right)
}

pub fn cmp(op: CompareOp, left: IntTerm, right: IntTerm) -> BoolTerm {
    BoolTerm::compare(op, left, right)
}

/// Scalar patterns `x, y, ...`.
pub fn inputs(names: &[&str]) -> Vec<IdentTuple> {
    names.iter().map(|n| IdentTuple::new([*n])).collect()
}

/// Scalar products.
pub fn products(terms: Vec<IntTerm>) -> Vec<TermTuple> {
    terms.into_iter().map(|t| TermTuple::new(vec![t])).collect()
}

/// `x, y => x + y if x == y`
pub fn merge_equal() -> Reaction {
    Reaction::new(
        inputs(&["x", "y"]),
        products(vec![bin(ArithOp::Add, var("x"), var("y"))]),
        cmp(CompareOp::Eq, var("x"), var("y")),
    )
}

/// `x => x - 1, x - 1 if x > 0`
pub fn split_down() -> Reaction {
    let dec = || bin(ArithOp::Sub, var("x"), num(1));
    Reaction::new(
        inputs(&["x"]),
        products(vec![dec(), dec()]),
        cmp(CompareOp::Gt, var("x"), num(0)),
    )
}

/// `x, y => x + y if true`
pub fn sum_all() -> Reaction {
    Reaction::new(
        inputs(&["x", "y"]),
        products(vec![bin(ArithOp::Add, var("x"), var("y"))]),
        BoolTerm::Literal(true),
    )
}

/// `x, y => x, y if false`
pub fn inert_pair() -> Reaction {
    Reaction::new(
        inputs(&["x", "y"]),
        products(vec![var("x"), var("y")]),
        BoolTerm::Literal(false),
    )
}

/// Binary decomposition of `n`: the only solution of distinct powers of two
/// summing to `n`.
pub fn powers_of_two(n: u32) -> Multiset {
    (0..32)
        .filter(|bit| n & (1 << bit) != 0)
        .map(|bit| IntTuple::scalar(1i64 << bit))
        .collect()
}
