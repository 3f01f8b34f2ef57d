//! Index-addressed circular doubly-linked rings.
//!
//! This crate provides the sibling-ring primitives used by mergeable heaps
//! whose nodes live in an arena. Nodes are referred to by a copyable key
//! (an index, a slotmap key, ...) and the ring links are plain key fields,
//! never owning references. The arena that stores the nodes implements
//! [`RingLinks`], and [`RingOps`] performs the ring surgery on top of it.
//!
//! # Circular rings
//!
//! In a circular ring:
//! - A single node points to itself (both `next` and `prev`)
//! - There is no head or tail - any node can be the "entry point"
//! - Splicing two rings together is O(1)
//! - Iteration wraps around (must track starting point)
//!
//! There is no "unlinked" state: a node that belongs to no larger ring is a
//! ring of one.
//!
//! # Example
//!
//! ```rust
//! use index_ring::{CircularLink, RingOps};
//!
//! let mut links: Vec<CircularLink<usize>> = (0..4).map(CircularLink::singleton).collect();
//! let ops = RingOps::new();
//!
//! // Build two rings, {0, 1} and {2, 3}, then merge them.
//! ops.insert_after(links.as_mut_slice(), 0, 1);
//! ops.insert_after(links.as_mut_slice(), 2, 3);
//! let merged = ops.splice(links.as_mut_slice(), Some(0), Some(2)).unwrap();
//! assert_eq!(ops.count(links.as_slice(), merged), 4);
//!
//! // Removing a node hands back a surviving member.
//! let rest = ops.remove(links.as_mut_slice(), 1).unwrap();
//! assert_eq!(ops.count(links.as_slice(), rest), 3);
//! assert_eq!(links[1], CircularLink::singleton(1));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

use core::fmt;

use smallvec::SmallVec;

/// Snapshot of the members of one ring.
///
/// Sibling rings of heap nodes are short (O(log n) roots after consolidation,
/// O(log n) children per node), so most snapshots stay inline.
pub type RingSnapshot<K> = SmallVec<[K; 16]>;

// =============================================================================
// CircularLink
// =============================================================================

/// The pair of neighbour keys embedded in every ring member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CircularLink<K> {
    /// Key of the next member (the "right" sibling)
    pub next: K,
    /// Key of the previous member (the "left" sibling)
    pub prev: K,
}

impl<K: Copy> CircularLink<K> {
    /// Creates the link of a one-member ring: both neighbours are `key`.
    #[inline]
    pub const fn singleton(key: K) -> Self {
        CircularLink {
            next: key,
            prev: key,
        }
    }
}

// =============================================================================
// RingLinks
// =============================================================================

/// Access to the ring links of the nodes stored in an arena.
///
/// Implementations may panic when handed a key that does not address a live
/// node; ring members are always live, so that only happens on a bug in the
/// caller.
pub trait RingLinks<K: Copy + Eq> {
    /// Key of the member after `key`.
    fn next(&self, key: K) -> K;

    /// Key of the member before `key`.
    fn prev(&self, key: K) -> K;

    /// Sets the member after `key`.
    fn set_next(&mut self, key: K, next: K);

    /// Sets the member before `key`.
    fn set_prev(&mut self, key: K, prev: K);
}

impl RingLinks<usize> for [CircularLink<usize>] {
    #[inline]
    fn next(&self, key: usize) -> usize {
        self[key].next
    }

    #[inline]
    fn prev(&self, key: usize) -> usize {
        self[key].prev
    }

    #[inline]
    fn set_next(&mut self, key: usize, next: usize) {
        self[key].next = next;
    }

    #[inline]
    fn set_prev(&mut self, key: usize, prev: usize) {
        self[key].prev = prev;
    }
}

// =============================================================================
// RingError
// =============================================================================

/// Structural defects found by [`RingOps::check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingError {
    /// `next(prev(x)) != x` or `prev(next(x)) != x` for some member
    BrokenLink,
    /// Walking `next` did not return to the start within the allowed length
    Unterminated,
}

impl fmt::Display for RingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RingError::BrokenLink => write!(f, "ring neighbours do not point back at each other"),
            RingError::Unterminated => write!(f, "ring does not close within its expected length"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RingError {}

// =============================================================================
// RingOps
// =============================================================================

/// Operations for manipulating index-addressed circular rings.
///
/// All operations except [`count`](RingOps::count),
/// [`collect`](RingOps::collect), [`for_each`](RingOps::for_each) and
/// [`check`](RingOps::check) are O(1).
#[derive(Clone, Copy, Debug, Default)]
pub struct RingOps;

impl RingOps {
    /// Creates a new `RingOps`.
    #[inline]
    pub const fn new() -> Self {
        RingOps
    }

    /// Turns `key` into a one-member ring, discarding its old neighbours.
    ///
    /// The old neighbours are not updated; use [`remove`](RingOps::remove)
    /// to take a member out of a larger ring.
    #[inline]
    pub fn make_singleton<K, L>(&self, links: &mut L, key: K)
    where
        K: Copy + Eq,
        L: RingLinks<K> + ?Sized,
    {
        links.set_next(key, key);
        links.set_prev(key, key);
    }

    /// Returns true if `key` is the only member of its ring.
    #[inline]
    pub fn is_singleton<K, L>(&self, links: &L, key: K) -> bool
    where
        K: Copy + Eq,
        L: RingLinks<K> + ?Sized,
    {
        links.next(key) == key
    }

    /// Inserts the singleton `new` right after `at`.
    #[inline]
    pub fn insert_after<K, L>(&self, links: &mut L, at: K, new: K)
    where
        K: Copy + Eq,
        L: RingLinks<K> + ?Sized,
    {
        debug_assert!(self.is_singleton(links, new), "inserted node is already in a ring");

        let next = links.next(at);
        links.set_next(at, new);
        links.set_prev(new, at);
        links.set_next(new, next);
        links.set_prev(next, new);
    }

    /// Detaches `key` from its ring, relinking its former neighbours.
    ///
    /// Returns a surviving member of the ring, or `None` if `key` was the
    /// only member. Afterwards `key` is a one-member ring.
    #[inline]
    pub fn remove<K, L>(&self, links: &mut L, key: K) -> Option<K>
    where
        K: Copy + Eq,
        L: RingLinks<K> + ?Sized,
    {
        let next = links.next(key);
        if next == key {
            return None;
        }
        let prev = links.prev(key);
        links.set_next(prev, next);
        links.set_prev(next, prev);
        self.make_singleton(links, key);
        Some(next)
    }

    /// Splices two independent rings into one.
    ///
    /// Returns an entry point into the merged ring, or `None` if both were
    /// empty. Callers must not rely on which input is returned.
    ///
    /// `a` and `b` must belong to different rings; splicing a ring with
    /// itself splits it instead.
    #[inline]
    pub fn splice<K, L>(&self, links: &mut L, a: Option<K>, b: Option<K>) -> Option<K>
    where
        K: Copy + Eq,
        L: RingLinks<K> + ?Sized,
    {
        match (a, b) {
            (None, None) => None,
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (Some(a), Some(b)) => {
                // Before:
                //   ... <-> a_prev <-> a <-> ...      ... <-> b_prev <-> b <-> ...
                // After:
                //   ... <-> a_prev <-> b <-> ... <-> b_prev <-> a <-> ...
                let a_prev = links.prev(a);
                let b_prev = links.prev(b);

                links.set_next(a_prev, b);
                links.set_prev(b, a_prev);

                links.set_next(b_prev, a);
                links.set_prev(a, b_prev);

                Some(a)
            }
        }
    }

    /// Counts the members of the ring containing `start`. O(n).
    pub fn count<K, L>(&self, links: &L, start: K) -> usize
    where
        K: Copy + Eq,
        L: RingLinks<K> + ?Sized,
    {
        let mut count = 1;
        let mut current = links.next(start);
        while current != start {
            count += 1;
            current = links.next(current);
        }
        count
    }

    /// Collects the members of the ring containing `start`, beginning at
    /// `start` and following `next`.
    pub fn collect<K, L>(&self, links: &L, start: K) -> RingSnapshot<K>
    where
        K: Copy + Eq,
        L: RingLinks<K> + ?Sized,
    {
        let mut members = RingSnapshot::new();
        members.push(start);
        let mut current = links.next(start);
        while current != start {
            members.push(current);
            current = links.next(current);
        }
        members
    }

    /// Calls `action` once for every member of the ring containing `start`.
    ///
    /// The member list is captured before the first call, so `action` may
    /// relink the visited nodes (move them into other rings, for example)
    /// without disturbing the traversal.
    pub fn for_each<K, L, F>(&self, links: &mut L, start: K, mut action: F)
    where
        K: Copy + Eq,
        L: RingLinks<K> + ?Sized,
        F: FnMut(&mut L, K),
    {
        for key in self.collect(links, start) {
            action(links, key);
        }
    }

    /// Verifies ring integrity around `start`.
    ///
    /// Checks that every member's neighbours point back at it and that the
    /// ring closes after at most `max_len` members. Returns the ring length.
    pub fn check<K, L>(&self, links: &L, start: K, max_len: usize) -> Result<usize, RingError>
    where
        K: Copy + Eq,
        L: RingLinks<K> + ?Sized,
    {
        let mut len = 0;
        let mut current = start;
        loop {
            if len == max_len {
                return Err(RingError::Unterminated);
            }
            let next = links.next(current);
            let prev = links.prev(current);
            if links.prev(next) != current || links.next(prev) != current {
                return Err(RingError::BrokenLink);
            }
            len += 1;
            current = next;
            if current == start {
                return Ok(len);
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
