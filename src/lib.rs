//! Two-parent Hollow Heap for Rust
//!
//! This crate provides a [`HollowHeap`]: a priority queue with efficient
//! `decrease_key` and arbitrary deletion, after Hansen, Kaplan, Tarjan and Zwick.
//!
//! # Features
//!
//! - O(1) insert, find-min, decrease-key and meld
//! - O(log n) amortized delete and delete-min
//! - Handles that follow their item through decrease-key and meld, and report
//!   misuse ([`HeapError`]) instead of corrupting the heap
//!
//! The heap is single-threaded (`!Send`, `!Sync`). Structural events are
//! reported through the [`log`] facade at `trace`/`debug` level.
//!
//! # Example
//!
//! ```rust
//! use hollow_heap::{HeapError, HollowHeap};
//!
//! let mut heap = HollowHeap::new();
//! let item1 = heap.insert("item1", 5);
//! let _item2 = heap.insert("item2", 3);
//! heap.reduce_key(&item1, 1).unwrap();
//! assert_eq!(heap.get_minimum(), Ok((&1, &"item1")));
//! assert_eq!(heap.reduce_key(&item1, 4), Err(HeapError::PriorityIncreased));
//! ```

mod handle;
pub mod hollow;
mod node;
pub mod rank;
pub mod simple_binary;
pub mod traits;

pub use handle::ItemHandle;
pub use hollow::HollowHeap;
pub use traits::{DecreaseKeyHeap, Heap, HeapError, MergeableHeap};
