// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Partition/merge and add/take costs of the solution container.
use cham_benches::{counting, descending_pairs};
use cham_core::{IntTuple, Multiset};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};

fn bench_partition_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition_merge");
    for &n in &[1_000i64, 10_000] {
        let solution: Multiset = counting(n)
            .into_iter()
            .chain(descending_pairs(n))
            .collect();
        group.throughput(Throughput::Elements(solution.cardinality() as u64));
        for size in [8usize, 32] {
            group.bench_with_input(
                BenchmarkId::new(format!("size_{size}"), n),
                &solution,
                |b, s| {
                    b.iter(|| {
                        let parts = s.partition(size);
                        let mut merged = Multiset::new();
                        for part in parts {
                            merged.merge(part);
                        }
                        criterion::black_box(merged)
                    });
                },
            );
        }
    }
    group.finish();
}

fn bench_add_take(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_take");
    for &n in &[1_000u32, 10_000] {
        group.throughput(Throughput::Elements(u64::from(n)));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter_batched(
                || counting(i64::from(n)),
                |tuples| {
                    let mut m: Multiset = tuples.iter().copied().collect();
                    // Front-to-back removal is the matcher's common pattern.
                    for t in &tuples {
                        m.take(t);
                    }
                    m.add(IntTuple::scalar(0));
                    criterion::black_box(m)
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_partition_merge, bench_add_take);
criterion_main!(benches);
