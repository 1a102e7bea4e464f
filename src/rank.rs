//! Rank type and utilities for hollow heap nodes.
//!
//! # Why u8?
//!
//! A node's rank bounds the size of the subtree it heads: a full node of rank
//! `r` has at least `F(r + 3) - 1` descendants, where `F` is the Fibonacci
//! sequence. Rank therefore never exceeds `log_φ(n)` where `n` is the number
//! of nodes ever created, which is about 92 for `n = 2⁶⁴`. `u8` leaves plenty
//! of headroom and keeps the node small.
//!
//! # Carry tables
//!
//! Consolidation indexes a carry table by rank. [`carry_capacity`] gives a
//! starting size for a heap of `n` items; the table still grows on demand, so
//! the estimate never caps the heap size.

/// Type alias for node rank.
pub type Rank = u8;

/// Maximum valid rank value.
pub const MAX_RANK: Rank = u8::MAX;

/// Safely increment a rank value, panicking on overflow.
///
/// # Panics
///
/// Panics if `rank == MAX_RANK`. This would require more nodes than fit in
/// memory, so it indicates a corrupted heap.
///
/// # Example
///
/// ```rust
/// use hollow_heap::rank::{checked_increment, Rank};
///
/// let rank: Rank = 5;
/// assert_eq!(checked_increment(rank), 6);
/// ```
#[inline]
pub fn checked_increment(rank: Rank) -> Rank {
    rank.checked_add(1).expect(
        "rank overflow: rank is bounded by log_φ(nodes) and cannot reach u8::MAX",
    )
}

/// Rank given to the node that receives an item moved out by decrease-key.
///
/// A node hollowed by decrease-key keeps only two virtual children, of ranks
/// `r - 2` and `r - 1`. The replacement node takes rank `r - 2` so that the
/// rank invariant still bounds its subtree. Ranks up to 2 map to 0.
///
/// ```rust
/// use hollow_heap::rank::hollowed_rank;
///
/// assert_eq!(hollowed_rank(5), 3);
/// assert_eq!(hollowed_rank(2), 0);
/// ```
#[inline]
pub fn hollowed_rank(rank: Rank) -> Rank {
    if rank > 2 {
        rank - 2
    } else {
        0
    }
}

/// Initial carry table length for a consolidation over roughly `n` items.
///
/// Uses `1.5 * ⌈log₂(n + 1)⌉ + 2`, which is above `log_φ(n)`. Callers must still
/// grow the table when a rank lands past the end.
#[inline]
pub fn carry_capacity(n: usize) -> usize {
    let bits = (usize::BITS - n.leading_zeros()) as usize;
    bits + bits / 2 + 2
}
