//! Classic vs naive cut policy benchmarks
//!
//! Runs identical operation sequences against both cut policies, so the
//! numbers show what cascading cuts cost (on decrease) and what they save
//! (on extract-min).
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench cut_policy
//!
//! # Only the replayed workloads
//! cargo bench --bench cut_policy -- 'replay/'
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_fibonacci_heap::workload::{replay, ReplayOptions};
use rust_fibonacci_heap::{Cascading, CutPolicy, FibonacciHeap, Naive};
use std::fmt::Write;

// ============================================================================
// Simple PRNG for reproducible benchmarks
// ============================================================================

/// Linear congruential generator for reproducible random numbers
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state >> 16
    }

    fn next_range(&mut self, min: u32, max: u32) -> u32 {
        let range = (max - min) as u64;
        if range == 0 {
            return min;
        }
        min + (self.next() % range) as u32
    }
}

// ============================================================================
// Workloads
// ============================================================================

/// Insert n elements, extract once so trees form, lower every remaining
/// element by a random amount and drain the heap.
fn decrease_then_drain<C: CutPolicy>(n: u32, seed: u64) -> u64 {
    let mut rng = Lcg::new(seed);
    let mut heap: FibonacciHeap<u32, u64, C> = FibonacciHeap::default();
    let handles: Vec<_> = (0..n)
        .map(|i| heap.insert(u64::from(rng.next_range(n, 4 * n)), i))
        .collect();
    heap.pop().expect("benchmark heap is consistent");

    for handle in handles.iter().skip(1) {
        if let Some(node) = heap.get(*handle) {
            let priority = *node.priority();
            let lower = priority.saturating_sub(u64::from(rng.next_range(1, n)));
            heap.decrease(*handle, lower).expect("handle is live");
        }
    }

    let mut checksum = 0;
    while let Some((priority, _)) = heap.pop().expect("benchmark heap is consistent") {
        checksum ^= priority;
    }
    checksum
}

/// A one-run workload script in the replay format: insert `n` elements, then
/// mix extract-min with random decreases.
fn random_script(n: u32, seed: u64) -> String {
    let mut rng = Lcg::new(seed);
    let mut script = String::new();
    writeln!(script, "# {}", n - 1).unwrap();
    for id in 0..n {
        writeln!(script, "I {id} {}", rng.next_range(0, 10 * n)).unwrap();
    }
    for _ in 0..n / 2 {
        if rng.next_range(0, 4) == 0 {
            script.push_str("M\n");
        } else {
            writeln!(script, "D {} {}", rng.next_range(0, n), rng.next_range(0, n)).unwrap();
        }
    }
    script
}

// ============================================================================
// Benchmarks
// ============================================================================

fn benchmark_push_pop(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_pop");
    group.sample_size(20);

    for &n in &[1_000u32, 10_000, 100_000] {
        group.bench_with_input(BenchmarkId::new("classic", n), &n, |b, &n| {
            b.iter(|| {
                let mut heap: FibonacciHeap<u32, u32, Cascading> = FibonacciHeap::default();
                heap.extend((0..n).rev().map(|i| (i, i)));
                while let Some(min) = heap.pop().expect("benchmark heap is consistent") {
                    black_box(min);
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("naive", n), &n, |b, &n| {
            b.iter(|| {
                let mut heap: FibonacciHeap<u32, u32, Naive> = FibonacciHeap::default();
                heap.extend((0..n).rev().map(|i| (i, i)));
                while let Some(min) = heap.pop().expect("benchmark heap is consistent") {
                    black_box(min);
                }
            })
        });
    }

    group.finish();
}

fn benchmark_decrease_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_heavy");
    group.sample_size(20);

    for &n in &[1_000u32, 10_000, 50_000] {
        group.bench_with_input(BenchmarkId::new("classic", n), &n, |b, &n| {
            b.iter(|| black_box(decrease_then_drain::<Cascading>(n, 42)))
        });
        group.bench_with_input(BenchmarkId::new("naive", n), &n, |b, &n| {
            b.iter(|| black_box(decrease_then_drain::<Naive>(n, 42)))
        });
    }

    group.finish();
}

fn benchmark_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");
    group.sample_size(10);

    for &n in &[1_000u32, 10_000] {
        let script = random_script(n, 12345);
        group.bench_with_input(BenchmarkId::new("classic_only", n), &script, |b, script| {
            b.iter(|| black_box(replay(script.as_bytes(), ReplayOptions { classic_only: true })))
        });
        group.bench_with_input(BenchmarkId::new("both", n), &script, |b, script| {
            b.iter(|| black_box(replay(script.as_bytes(), ReplayOptions::default())))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_push_pop,
    benchmark_decrease_heavy,
    benchmark_replay,
);

criterion_main!(benches);
