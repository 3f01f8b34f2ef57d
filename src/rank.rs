//! Rank type and utilities for heap node degree tracking.
//!
//! The rank of a node is the number of its direct children. In a classic
//! Fibonacci heap a tree whose root has rank `k` holds at least `F(k+2)`
//! nodes (`F` being the Fibonacci numbers), which bounds every rank by
//! `log_φ(n)`. Without cascading cuts that bound is gone: a root can keep
//! gathering children while its subtrees are cut down to single nodes, so the
//! only remaining limit is that a tree of rank `k` holds at least `k + 1`
//! nodes.
//!
//! # Why u32?
//!
//! `u8` would cover every classic heap that fits in memory, but the naive
//! cut policy lets ranks grow with the number of elements. `u32` keeps nodes
//! small while covering any rank reachable by a heap of up to 2³² elements;
//! [`checked_increment`] turns anything beyond that into an integrity error.

use crate::error::IntegrityError;

/// Type alias for node rank/degree.
pub type Rank = u32;

/// Increments a rank after a join, validating the result.
///
/// A tree of rank `r` contains at least `r + 1` nodes, so a rank of `len` or
/// more in a heap of `len` elements means the structure is corrupt.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::rank::checked_increment;
///
/// assert_eq!(checked_increment(5, 100), Ok(6));
/// assert!(checked_increment(3, 4).is_err());
/// ```
#[inline]
pub fn checked_increment(rank: Rank, len: usize) -> Result<Rank, IntegrityError> {
    let overflow = IntegrityError::RankOverflow {
        rank: rank as usize + 1,
        len,
    };
    let next = rank.checked_add(1).ok_or(overflow)?;
    if next as usize >= len {
        return Err(overflow);
    }
    Ok(next)
}

/// Decrement a rank value, returning 0 if already at minimum.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::rank::saturating_decrement;
///
/// assert_eq!(saturating_decrement(5), 4);
/// assert_eq!(saturating_decrement(0), 0);
/// ```
#[inline]
pub fn saturating_decrement(rank: Rank) -> Rank {
    rank.saturating_sub(1)
}

/// Largest rank a classic Fibonacci heap of `len` elements can contain.
///
/// This is the largest `k` with `F(k+2) <= len`, i.e. `⌊log_φ(len)⌋` up to
/// rounding, computed on integers.
pub fn fibonacci_degree_bound(len: usize) -> usize {
    // (F(k+2), F(k+3)) starting at k = 0
    let (mut smallest, mut next) = (1usize, 2usize);
    let mut k = 0;
    while next <= len {
        k += 1;
        let Some(following) = smallest.checked_add(next) else {
            break;
        };
        smallest = next;
        next = following;
    }
    k
}

/// Initial size of the consolidation bucket table for a heap of `len`
/// elements.
///
/// Covers every rank of a classic heap with one spare slot for the rank a
/// final join produces. The table still grows on demand, since naive heaps
/// are not bound by the Fibonacci degree limit.
#[inline]
pub fn bucket_capacity(len: usize) -> usize {
    fibonacci_degree_bound(len) + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_increment() {
        assert_eq!(checked_increment(0, 2), Ok(1));
        assert_eq!(checked_increment(127, 1000), Ok(128));
        assert_eq!(checked_increment(254, 1 << 20), Ok(255));
    }

    #[test]
    fn test_checked_increment_rejects_impossible_rank() {
        // A rank-1 tree needs two nodes.
        assert_eq!(
            checked_increment(0, 1),
            Err(IntegrityError::RankOverflow { rank: 1, len: 1 })
        );
        assert!(checked_increment(Rank::MAX, usize::MAX).is_err());
    }

    #[test]
    fn test_saturating_decrement() {
        assert_eq!(saturating_decrement(5), 4);
        assert_eq!(saturating_decrement(1), 0);
        assert_eq!(saturating_decrement(0), 0);
    }

    #[test]
    fn test_fibonacci_degree_bound() {
        // Smallest trees per rank: 1, 2, 3, 5, 8, 13 nodes
        assert_eq!(fibonacci_degree_bound(0), 0);
        assert_eq!(fibonacci_degree_bound(1), 0);
        assert_eq!(fibonacci_degree_bound(2), 1);
        assert_eq!(fibonacci_degree_bound(3), 2);
        assert_eq!(fibonacci_degree_bound(4), 2);
        assert_eq!(fibonacci_degree_bound(5), 3);
        assert_eq!(fibonacci_degree_bound(12), 4);
        assert_eq!(fibonacci_degree_bound(13), 5);
    }

    #[test]
    fn test_degree_bound_is_logarithmic() {
        // log_φ(2^20) ≈ 28.8
        assert_eq!(fibonacci_degree_bound(1 << 20), 28);
        // Terminates on the largest input without overflowing.
        assert!(fibonacci_degree_bound(usize::MAX) < 100);
        assert_eq!(bucket_capacity(1), 2);
    }
}
