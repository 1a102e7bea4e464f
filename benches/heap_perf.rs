//! Hollow heap throughput against the reference heaps
//!
//! Compares `HollowHeap`, the crate's `SimpleBinaryHeap` and
//! `std::collections::BinaryHeap` on shuffled input.
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench heap_perf
//!
//! # Only one workload
//! cargo bench --bench heap_perf -- 'insert_drain/'
//! ```
//!
//! ## Workloads
//!
//! - `insert`: insert every key, no extraction
//! - `insert_drain`: insert every key, then pop until empty
//! - `decrease_key`: hollow heap only, lower every key once before draining

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hollow_heap::simple_binary::SimpleBinaryHeap;
use hollow_heap::{Heap, HollowHeap};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cmp::Reverse;
use std::collections::BinaryHeap;

const SIZES: [usize; 7] = [500, 1000, 2000, 10_000, 20_000, 50_000, 100_000];

/// Keys 0..n in a fixed random order
fn shuffled_keys(n: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(0x5eed_0f_4011);
    let mut keys: Vec<u64> = (0..n as u64).collect();
    keys.shuffle(&mut rng);
    keys
}

fn fill<H: Heap<u64, u64>>(keys: &[u64]) -> H {
    let mut heap = H::new();
    for &key in keys {
        heap.push(key, key);
    }
    heap
}

fn drain<H: Heap<u64, u64>>(mut heap: H) -> u64 {
    let mut checksum = 0u64;
    while let Some((key, _)) = heap.pop() {
        checksum = checksum.wrapping_add(key);
    }
    checksum
}

fn benchmark_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.sample_size(20);

    for &n in &SIZES {
        let keys = shuffled_keys(n);

        group.bench_with_input(BenchmarkId::new("hollow", n), &keys, |b, keys| {
            b.iter(|| black_box(fill::<HollowHeap<u64, u64>>(keys)))
        });
        group.bench_with_input(BenchmarkId::new("simple_binary", n), &keys, |b, keys| {
            b.iter(|| black_box(fill::<SimpleBinaryHeap<u64, u64>>(keys)))
        });
        group.bench_with_input(BenchmarkId::new("std_binary", n), &keys, |b, keys| {
            b.iter(|| {
                let heap: BinaryHeap<Reverse<u64>> = keys.iter().map(|&k| Reverse(k)).collect();
                black_box(heap)
            })
        });
    }

    group.finish();
}

fn benchmark_insert_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_drain");
    group.sample_size(10);

    for &n in &SIZES {
        let keys = shuffled_keys(n);

        group.bench_with_input(BenchmarkId::new("hollow", n), &keys, |b, keys| {
            b.iter(|| black_box(drain(fill::<HollowHeap<u64, u64>>(keys))))
        });
        group.bench_with_input(
            BenchmarkId::new("hollow_rank_hint", n),
            &keys,
            |b, keys| {
                b.iter(|| {
                    let mut heap = HollowHeap::with_rank_hint(keys.len());
                    for &key in keys.iter() {
                        heap.insert(key, key);
                    }
                    black_box(drain(heap))
                })
            },
        );
        group.bench_with_input(BenchmarkId::new("simple_binary", n), &keys, |b, keys| {
            b.iter(|| black_box(drain(fill::<SimpleBinaryHeap<u64, u64>>(keys))))
        });
        group.bench_with_input(BenchmarkId::new("std_binary", n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap: BinaryHeap<Reverse<u64>> = BinaryHeap::new();
                for &key in keys.iter() {
                    heap.push(Reverse(key));
                }
                let mut checksum = 0u64;
                while let Some(Reverse(key)) = heap.pop() {
                    checksum = checksum.wrapping_add(key);
                }
                black_box(checksum)
            })
        });
    }

    group.finish();
}

fn benchmark_decrease_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key");
    group.sample_size(10);

    for &n in &SIZES {
        let keys = shuffled_keys(n);

        group.bench_with_input(BenchmarkId::new("hollow", n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = HollowHeap::new();
                let offset = keys.len() as u64;
                let handles: Vec<_> = keys.iter().map(|&k| heap.insert(k, k + offset)).collect();
                for (handle, &key) in handles.iter().zip(keys.iter()) {
                    heap.reduce_key(handle, key).unwrap();
                }
                black_box(drain(heap))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_insert_drain,
    benchmark_decrease_key
);
criterion_main!(benches);
