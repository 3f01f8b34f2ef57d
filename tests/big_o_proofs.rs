//! Big-O complexity proofs for heap operations
//!
//! This module empirically verifies that heap operations meet the theoretical
//! complexity bounds using the `big-o-test` crate.
//!
//! ## Testing Strategy
//!
//! We use `test_algorithm` to measure batch operations. Note that for batch operations:
//! - O(1) amortized per-element operations appear as O(n) for n operations
//! - O(log n) operations appear as O(n log n) for n operations
//!
//! Note: These are empirical tests, not formal proofs. They detect significant
//! deviations from expected behavior but may not catch subtle issues with
//! specific input patterns.

use big_o_test::{test_algorithm, BigOAlgorithmComplexity};
use rust_fibonacci_heap::{Cascading, CutPolicy, FibonacciHeap, Naive};

use ctor::ctor;
use parking_lot::RwLock;
use std::sync::Arc;

/// Sets up the ENV, affecting the Rust's test runner
#[ctor]
fn setup_env() {
    // cause tests to run serially -- this may be replaced by using the `serial_test` crate
    std::env::set_var("RUST_TEST_THREADS", "1");
}

type Heap<C> = FibonacciHeap<i32, i32, C>;

// ============================================================================
// Helper functions for each operation
// ============================================================================

fn fill<C: CutPolicy>(heap: &mut Heap<C>, n: i32) {
    for i in 0..n {
        heap.insert(i, i);
    }
}

/// Replaces the shared heap with an empty one whose arena already fits `n`
/// elements, so the measured peak never includes an arena doubling.
fn fresh<C: CutPolicy>(heap: &mut Heap<C>, n: i32) {
    *heap = Heap::with_capacity(n as usize + 1);
}

/// n insertions are O(1) each, so the batch is O(n)
fn test_insert_batch_complexity<C: CutPolicy + Send + Sync>(name: &str) {
    let heap = Arc::new(RwLock::new(Heap::<C>::default()));
    let insert_all = |n: i32| {
        let mut h = heap.write();
        fresh(&mut h, n);
        fill(&mut h, n);
        42
    };

    test_algorithm(
        &format!("{name} insert batch"),
        3,
        || {
            *heap.write() = Heap::default();
        },
        1000,
        || insert_all(1000),
        2000,
        || insert_all(2000),
        BigOAlgorithmComplexity::ON,
        BigOAlgorithmComplexity::ON,
    );
}

/// n pops are O(log n) amortized each, so the batch is O(n log n)
fn test_pop_batch_complexity<C: CutPolicy + Send + Sync>(name: &str) {
    let heap = Arc::new(RwLock::new(Heap::<C>::default()));
    let pop_all = |n: i32| {
        let mut h = heap.write();
        fresh(&mut h, n);
        fill(&mut h, n);
        for _ in 0..n {
            assert!(
                h.pop().unwrap().is_some(),
                "pop() must succeed after pushing elements"
            );
        }
        42
    };

    test_algorithm(
        &format!("{name} pop batch"),
        3,
        || {
            *heap.write() = Heap::default();
        },
        1000,
        || pop_all(1000),
        2000,
        || pop_all(2000),
        BigOAlgorithmComplexity::ONLogN,
        BigOAlgorithmComplexity::ON,
    );
}

/// n decreases on a consolidated forest are O(1) amortized each, so the
/// batch is O(n) plus the single O(n) consolidation.
fn test_decrease_batch_complexity<C: CutPolicy + Send + Sync>(name: &str) {
    let heap = Arc::new(RwLock::new(Heap::<C>::default()));
    let decrease_all = |n: i32| {
        let mut h = heap.write();
        fresh(&mut h, n);
        let mut handles = Vec::with_capacity(n as usize + 1);
        for i in 0..=n {
            handles.push(h.insert(i + 10 * n, i));
        }
        // Consolidate so that most decreases cut.
        h.pop().unwrap();
        for (i, handle) in handles.iter().enumerate().skip(1) {
            assert!(h.decrease(*handle, i as i32).is_ok());
        }
        42
    };

    test_algorithm(
        &format!("{name} decrease batch"),
        3,
        || {
            *heap.write() = Heap::default();
        },
        1000,
        || decrease_all(1000),
        2000,
        || decrease_all(2000),
        BigOAlgorithmComplexity::ON,
        BigOAlgorithmComplexity::ON,
    );
}

// ============================================================================
// Classic
// ============================================================================

#[test]
fn test_classic_insert() {
    test_insert_batch_complexity::<Cascading>("FibonacciHeap");
}

#[test]
fn test_classic_pop() {
    test_pop_batch_complexity::<Cascading>("FibonacciHeap");
}

#[test]
fn test_classic_decrease() {
    test_decrease_batch_complexity::<Cascading>("FibonacciHeap");
}

// ============================================================================
// Naive
// ============================================================================

#[test]
fn test_naive_insert() {
    test_insert_batch_complexity::<Naive>("FibonacciHeap(naive)");
}

#[test]
fn test_naive_pop() {
    // Without decreases the naive variant builds the same binomial trees.
    test_pop_batch_complexity::<Naive>("FibonacciHeap(naive)");
}
