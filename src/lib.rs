//! Amortized Fibonacci heap with instrumentation
//!
//! This crate provides a Fibonacci heap priority queue with handle-based
//! `decrease` and `remove_node`, plus the tooling to measure how much
//! structural work the heap performs.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) insert, find-min and union; O(1) amortized
//!   decrease; O(log n) amortized extract-min
//! - **Cut policies**: classic cascading cuts, or the naive variant that only
//!   marks parents (for measuring what cascading cuts buy)
//! - **Observers**: every structural step is reported to a [`HeapObserver`]
//! - **Workload replay**: scripted runs comparing both policies side by side
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::{Decrease, FibonacciHeap};
//!
//! let mut heap = FibonacciHeap::new();
//! let handle1 = heap.insert(5, "item1");
//! let _handle2 = heap.insert(3, "item2");
//! assert_eq!(heap.decrease(handle1, 1).unwrap(), Decrease::Updated);
//! assert_eq!(heap.peek(), Some((&1, &"item1")));
//! ```

pub mod error;
pub mod fibonacci;
pub mod observer;
pub mod policy;
pub mod rank;
mod storage;
pub mod workload;

pub use error::{HeapError, IntegrityError};
pub use fibonacci::{Decrease, Extracted, FibonacciHandle, FibonacciHeap, NodeRef};
pub use observer::{HeapObserver, NoopObserver, Operation, StepCounter};
pub use policy::{Cascading, CutPolicy, Mode, Naive};
