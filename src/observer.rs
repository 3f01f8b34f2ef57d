//! Instrumentation hook
//!
//! A heap reports its work to a [`HeapObserver`] it owns. Every primitive
//! structural step of an extract-min or decrease-key produces one call with
//! `boundary == false`, and each completed operation ends with one call with
//! `boundary == true`. What counts as a step:
//!
//! - extract-min: promoting one child of the removed minimum to the root
//!   ring, joining two trees during consolidation, visiting one root while
//!   scanning for the new minimum;
//! - decrease-key: one cut (cascading cuts included).
//!
//! Observers never get access to the heap, so they cannot change it. To keep
//! counters outside the heap, pass `&mut StepCounter` as the observer.
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::observer::{Operation, StepCounter};
//! use rust_fibonacci_heap::FibonacciHeap;
//!
//! let mut counter = StepCounter::default();
//! {
//!     let mut heap = FibonacciHeap::with_observer(&mut counter);
//!     for i in 0..8 {
//!         heap.insert(i, i);
//!     }
//!     heap.extract_min().unwrap();
//! }
//! assert_eq!(counter.operations(Operation::ExtractMin), 1);
//! assert!(counter.steps(Operation::ExtractMin) > 0);
//! ```

/// Kind of heap operation a step belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `decrease` (and the decrease half of `remove_node`)
    Decrease,
    /// `extract_min`
    ExtractMin,
}

impl Operation {
    /// Returns true for [`Operation::Decrease`]
    #[inline]
    pub fn is_decrease(self) -> bool {
        matches!(self, Operation::Decrease)
    }
}

/// Receives one call per structural step and one per finished operation.
pub trait HeapObserver {
    /// `boundary` is true for the call closing an operation.
    fn on_step(&mut self, operation: Operation, boundary: bool);
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoopObserver;

impl HeapObserver for NoopObserver {
    #[inline(always)]
    fn on_step(&mut self, _operation: Operation, _boundary: bool) {}
}

impl<O: HeapObserver + ?Sized> HeapObserver for &mut O {
    #[inline]
    fn on_step(&mut self, operation: Operation, boundary: bool) {
        (**self).on_step(operation, boundary);
    }
}

impl<O: HeapObserver + ?Sized> HeapObserver for Box<O> {
    #[inline]
    fn on_step(&mut self, operation: Operation, boundary: bool) {
        (**self).on_step(operation, boundary);
    }
}

/// Adapts a closure into an observer
///
/// ```rust
/// use rust_fibonacci_heap::observer::{FnObserver, Operation};
/// use rust_fibonacci_heap::FibonacciHeap;
///
/// let mut boundaries = 0;
/// let mut heap = FibonacciHeap::with_observer(FnObserver(|_op: Operation, boundary: bool| {
///     if boundary {
///         boundaries += 1;
///     }
/// }));
/// let handle = heap.insert(10, ());
/// heap.decrease(handle, 1).unwrap();
/// drop(heap);
/// assert_eq!(boundaries, 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct FnObserver<F>(pub F);

impl<F: FnMut(Operation, bool)> HeapObserver for FnObserver<F> {
    #[inline]
    fn on_step(&mut self, operation: Operation, boundary: bool) {
        (self.0)(operation, boundary)
    }
}

/// Counts steps and completed operations per operation kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepCounter {
    decrease_steps: u64,
    decrease_ops: u64,
    extract_steps: u64,
    extract_ops: u64,
}

impl StepCounter {
    /// Structural steps recorded for `operation`
    pub fn steps(&self, operation: Operation) -> u64 {
        match operation {
            Operation::Decrease => self.decrease_steps,
            Operation::ExtractMin => self.extract_steps,
        }
    }

    /// Completed operations of kind `operation`
    pub fn operations(&self, operation: Operation) -> u64 {
        match operation {
            Operation::Decrease => self.decrease_ops,
            Operation::ExtractMin => self.extract_ops,
        }
    }

    /// Mean number of steps per completed operation, 0 if none completed.
    pub fn average_steps(&self, operation: Operation) -> f64 {
        match self.operations(operation) {
            0 => 0.0,
            ops => self.steps(operation) as f64 / ops as f64,
        }
    }

    /// Forgets everything counted so far.
    pub fn reset(&mut self) {
        *self = StepCounter::default();
    }
}

impl HeapObserver for StepCounter {
    fn on_step(&mut self, operation: Operation, boundary: bool) {
        let (steps, ops) = match operation {
            Operation::Decrease => (&mut self.decrease_steps, &mut self.decrease_ops),
            Operation::ExtractMin => (&mut self.extract_steps, &mut self.extract_ops),
        };
        if boundary {
            *ops += 1;
        } else {
            *steps += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_counter_separates_kinds() {
        let mut counter = StepCounter::default();
        counter.on_step(Operation::Decrease, false);
        counter.on_step(Operation::Decrease, false);
        counter.on_step(Operation::Decrease, true);
        counter.on_step(Operation::ExtractMin, false);
        counter.on_step(Operation::ExtractMin, true);
        counter.on_step(Operation::ExtractMin, true);

        assert_eq!(counter.steps(Operation::Decrease), 2);
        assert_eq!(counter.operations(Operation::Decrease), 1);
        assert_eq!(counter.steps(Operation::ExtractMin), 1);
        assert_eq!(counter.operations(Operation::ExtractMin), 2);
        assert_eq!(counter.average_steps(Operation::Decrease), 2.0);
        assert_eq!(counter.average_steps(Operation::ExtractMin), 0.5);
    }

    #[test]
    fn test_average_without_operations_is_zero() {
        let mut counter = StepCounter::default();
        counter.on_step(Operation::Decrease, false);
        assert_eq!(counter.average_steps(Operation::Decrease), 0.0);

        counter.reset();
        assert_eq!(counter, StepCounter::default());
    }

    #[test]
    fn test_forwarding_through_references() {
        let mut counter = StepCounter::default();
        {
            let by_ref: &mut StepCounter = &mut counter;
            by_ref.on_step(Operation::ExtractMin, true);
            let mut boxed: Box<dyn HeapObserver + '_> = Box::new(&mut counter);
            boxed.on_step(Operation::ExtractMin, true);
        }
        assert_eq!(counter.operations(Operation::ExtractMin), 2);
        assert!(Operation::Decrease.is_decrease());
        assert!(!Operation::ExtractMin.is_decrease());
    }
}
