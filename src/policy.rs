//! Cut policies
//!
//! When decrease-key cuts a node away from its parent, the parent has lost a
//! child. What happens to that parent is the only difference between the
//! classic Fibonacci heap and the "naive" variant:
//!
//! - [`Cascading`]: the classic rule. An unmarked non-root parent gets marked;
//!   a parent that was already marked is cut as well, and the rule repeats one
//!   level up. This keeps every tree of rank `k` at least `F(k+2)` nodes large
//!   and decrease-key at O(1) amortized.
//! - [`Naive`]: the parent is only marked, never cut. Trees can degenerate,
//!   ranks are no longer logarithmic and extract-min pays for it. This policy
//!   exists to measure the cost of leaving cascading cuts out, not for
//!   production use.
//!
//! The policy is a type parameter of [`FibonacciHeap`](crate::FibonacciHeap),
//! fixed when the heap is constructed.

use std::fmt;

/// Name of the algorithmic variant a policy implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Cascading cuts enabled
    Classic,
    /// Cascading cuts disabled
    Naive,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Classic => write!(f, "classic"),
            Mode::Naive => write!(f, "naive"),
        }
    }
}

/// What to do with a non-root parent after one of its children was cut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentAction {
    /// Set the parent's mark and stop
    Mark,
    /// Cut the parent as well and continue with the grandparent
    Cut,
}

/// Strategy deciding how cuts propagate towards the root.
pub trait CutPolicy: Default + fmt::Debug {
    /// Variant implemented by this policy
    const MODE: Mode;

    /// Called for a parent that is not a root and has just lost a child.
    fn on_child_cut(&self, parent_marked: bool) -> ParentAction;
}

/// Classic Fibonacci-heap policy with cascading cuts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cascading;

impl CutPolicy for Cascading {
    const MODE: Mode = Mode::Classic;

    #[inline]
    fn on_child_cut(&self, parent_marked: bool) -> ParentAction {
        if parent_marked {
            ParentAction::Cut
        } else {
            ParentAction::Mark
        }
    }
}

/// Experimental policy that never cascades
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Naive;

impl CutPolicy for Naive {
    const MODE: Mode = Mode::Naive;

    #[inline]
    fn on_child_cut(&self, _parent_marked: bool) -> ParentAction {
        ParentAction::Mark
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cascading_cuts_marked_parents() {
        assert_eq!(Cascading.on_child_cut(false), ParentAction::Mark);
        assert_eq!(Cascading.on_child_cut(true), ParentAction::Cut);
    }

    #[test]
    fn test_naive_never_cuts() {
        assert_eq!(Naive.on_child_cut(false), ParentAction::Mark);
        assert_eq!(Naive.on_child_cut(true), ParentAction::Mark);
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(Cascading::MODE.to_string(), "classic");
        assert_eq!(Naive::MODE.to_string(), "naive");
    }
}
