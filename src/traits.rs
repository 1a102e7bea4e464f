//! Common traits for heap data structures
//!
//! This module provides the trait hierarchy shared by the heaps in this crate:
//!
//! - [`Heap`]: Base trait for simple heaps without handle support
//! - [`MergeableHeap`]: Heaps that can absorb another heap of the same type
//! - [`DecreaseKeyHeap`]: Extended trait adding handle-based `decrease_key` and `delete`
//!
//! The base [`Heap`] trait follows Rust's standard heap API patterns, so the
//! reference [`SimpleBinaryHeap`](crate::simple_binary::SimpleBinaryHeap) and
//! the [`HollowHeap`](crate::hollow::HollowHeap) can be driven by the same
//! generic code in tests and benchmarks.

use std::fmt;

/// Error type for heap operations
///
/// Every variant describes a caller precondition violation. Operations that
/// return one of these errors leave the heap untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// The heap holds no items
    Empty,
    /// The new priority is greater than the current priority
    PriorityIncreased,
    /// The handle is no longer valid (element was removed)
    InvalidHandle,
    /// The handle was issued by a different heap
    ForeignHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::Empty => write!(f, "heap is empty"),
            HeapError::PriorityIncreased => {
                write!(f, "new priority is greater than current priority")
            }
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (element was removed)")
            }
            HeapError::ForeignHandle => {
                write!(f, "handle belongs to a different heap")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in the heap, used for decrease_key and delete
///
/// This is an opaque type that identifies a specific element in the heap.
/// Handles are `Clone` but not `Copy`: they share bookkeeping with the heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element (returns `()`)
/// - `pop` removes and returns the minimum
/// - `peek` returns the minimum without removing it
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (priority, item) pairs to separate the ordering key from the data.
///
/// # Example
///
/// ```rust
/// use hollow_heap::Heap;
/// use hollow_heap::simple_binary::SimpleBinaryHeap;
///
/// let mut heap = SimpleBinaryHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P: Ord> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the minimum priority and associated item without removing it
    ///
    /// Note that `BinaryHeap` is a max-heap, while these heaps are min-heaps.
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the minimum priority and associated item
    fn pop(&mut self) -> Option<(P, T)>;
}

/// Heaps that can absorb another heap of the same type
pub trait MergeableHeap<T, P: Ord>: Heap<T, P> {
    /// Merges another heap into this one, consuming the other heap
    ///
    /// # Time Complexity
    /// O(1) for the hollow heap, O(m log(n + m)) for the reference binary heap.
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with handle-based `decrease_key` and `delete`
///
/// # Example
///
/// ```rust
/// use hollow_heap::{DecreaseKeyHeap, Heap, HollowHeap};
///
/// let mut heap = HollowHeap::new();
/// let handle = heap.push_with_handle(10, "item");
/// heap.decrease_key(&handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<T, P: Ord>: Heap<T, P> {
    /// The handle type for this heap
    type Handle: Handle;

    /// Inserts an element with the given priority, returning a handle
    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle;

    /// Lowers the priority of the element identified by the handle
    ///
    /// # Errors
    /// - `HeapError::PriorityIncreased` if `new_priority` is greater than the
    ///   current priority
    /// - `HeapError::InvalidHandle` if the element was already removed
    /// - `HeapError::ForeignHandle` if the handle belongs to another heap
    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError>;

    /// Removes the element identified by the handle, returning it
    ///
    /// # Errors
    /// Same handle errors as [`decrease_key`](DecreaseKeyHeap::decrease_key).
    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError>;
}
