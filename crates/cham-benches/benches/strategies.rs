// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
// criterion_group!/criterion_main! expand to undocumented functions that cannot
// carry #[allow] (attributes on macro invocations are ignored). Crate-level
// suppress is required for benchmark binaries using Criterion.
#![allow(missing_docs)]
#![allow(clippy::expect_used)]
//! Whole-program evaluation per reaction type, serial vs pooled.
//!
//! ```sh
//! cargo bench --package cham-benches --bench strategies
//! ```
use cham_benches::{
    counting, descending_pairs, program, MERGE_EQUAL, SORT_PAIRS, SPLIT_DOWN, SUM_ALL,
};
use cham_core::{Engine, EngineConfig, IntTuple, Program};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;

const WORKERS: [usize; 3] = [1, 0, 4];

fn label(workers: usize) -> &'static str {
    match workers {
        0 => "shared",
        1 => "serial",
        _ => "pool_4w",
    }
}

fn engines() -> Vec<(usize, Engine)> {
    WORKERS
        .iter()
        .map(|&w| {
            let engine = Engine::new(EngineConfig::default().with_workers(w)).expect("engine");
            (w, engine)
        })
        .collect()
}

fn bench_program(
    c: &mut Criterion,
    group_name: &str,
    sizes: &[u32],
    make: impl Fn(u32) -> Program,
) {
    let mut group = c.benchmark_group(group_name);
    group
        .warm_up_time(Duration::from_secs(1))
        .measurement_time(Duration::from_secs(3))
        .sample_size(20);
    let engines = engines();
    for &n in sizes {
        let program = make(n);
        group.throughput(Throughput::Elements(u64::from(n)));
        for (workers, engine) in &engines {
            group.bench_with_input(BenchmarkId::new(label(*workers), n), &program, |b, p| {
                b.iter(|| criterion::black_box(engine.evaluate(p).expect("evaluate")));
            });
        }
    }
    group.finish();
}

fn bench_reducing(c: &mut Criterion) {
    bench_program(c, "reducing_sum", &[256, 4_096], |n| {
        program(counting(i64::from(n)), SUM_ALL).expect("parse")
    });
    bench_program(c, "reducing_merge_equal", &[256, 4_096], |n| {
        program(vec![IntTuple::scalar(1); n as usize], MERGE_EQUAL).expect("parse")
    });
}

fn bench_constant(c: &mut Criterion) {
    bench_program(c, "constant_sort_pairs", &[256, 4_096], |n| {
        program(descending_pairs(i64::from(n)), SORT_PAIRS).expect("parse")
    });
}

fn bench_expanding(c: &mut Criterion) {
    // {d} grows to 2^d zeros.
    bench_program(c, "expanding_split", &[8, 12], |d| {
        program(vec![IntTuple::scalar(i64::from(d))], SPLIT_DOWN).expect("parse")
    });
}

criterion_group!(benches, bench_reducing, bench_constant, bench_expanding);
criterion_main!(benches);
