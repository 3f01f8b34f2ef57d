//! Error types for heap operations
//!
//! Invalid-but-harmless requests (decreasing to a key that is not smaller,
//! extracting from an empty heap) are not errors: they return an explicit
//! no-op result. The types here cover the two remaining cases:
//!
//! - [`HeapError::InvalidHandle`]: the caller handed in a handle that does not
//!   belong to a live element of this heap
//! - [`HeapError::Integrity`]: the node graph is inconsistent, which is a bug
//!   in the heap itself

use thiserror::Error;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// The handle is no longer valid (element was removed) or belongs to
    /// another heap
    #[error("handle is no longer valid (element was removed or belongs to another heap)")]
    InvalidHandle,
    /// An internal invariant was found broken; the operation was aborted
    #[error("heap integrity violated: {0}")]
    Integrity(#[from] IntegrityError),
}

/// Broken structural invariants detected inside the heap.
///
/// Any of these indicates a bug in the heap implementation, never a misuse
/// by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IntegrityError {
    /// A tree reached a rank that no heap of `len` elements can hold
    #[error("tree of rank {rank} cannot exist in a heap of {len} elements")]
    RankOverflow {
        /// Offending rank
        rank: usize,
        /// Number of elements in the heap at the time
        len: usize,
    },
    /// A node's rank disagrees with the length of its child ring
    #[error("node has rank {rank} but {children} children")]
    RankMismatch {
        /// Stored rank
        rank: usize,
        /// Children actually found in the child ring
        children: usize,
    },
    /// Sibling ring neighbours do not point back at each other
    #[error("sibling ring is broken")]
    BrokenRing,
    /// A child's parent link does not point at the node owning its ring
    #[error("child does not link back to its parent")]
    ParentMismatch,
    /// A child has a smaller priority than its parent
    #[error("child priority is smaller than its parent's")]
    HeapOrder,
    /// A root of the forest carries a mark
    #[error("root node is marked")]
    MarkedRoot,
    /// The cached minimum is missing or not minimal among the roots
    #[error("cached minimum does not hold the smallest root priority")]
    StaleMinimum,
    /// The element counter disagrees with the reachable nodes
    #[error("element count is {expected} but {found} nodes are reachable")]
    CountMismatch {
        /// Value of the element counter
        expected: usize,
        /// Nodes reached by walking the forest
        found: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrity_messages() {
        let err = HeapError::from(IntegrityError::RankOverflow { rank: 9, len: 4 });
        assert_eq!(
            err.to_string(),
            "heap integrity violated: tree of rank 9 cannot exist in a heap of 4 elements"
        );

        let err = IntegrityError::CountMismatch {
            expected: 3,
            found: 2,
        };
        assert_eq!(err.to_string(), "element count is 3 but 2 nodes are reachable");
    }
}
