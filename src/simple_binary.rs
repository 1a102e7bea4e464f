//! Reference binary heap
//!
//! A plain array-backed binary min-heap. It has no handles and no
//! `decrease_key`; it exists as the baseline the hollow heap is measured and
//! cross-checked against in the benchmarks and differential tests.
//!
//! # Time Complexity
//!
//! | Operation  | Complexity   |
//! |------------|--------------|
//! | `push`     | O(log n)     |
//! | `pop`      | O(log n)     |
//! | `peek`     | O(1)         |
//! | `from_vec` | O(n)         |
//! | `merge`    | O(n + m)     |
//!
//! # Example
//!
//! ```rust
//! use hollow_heap::Heap;
//! use hollow_heap::simple_binary::SimpleBinaryHeap;
//!
//! let mut heap = SimpleBinaryHeap::from_vec(vec![(3, "three"), (1, "one"), (2, "two")]);
//!
//! assert_eq!(heap.peek(), Some((&1, &"one")));
//! assert_eq!(heap.pop(), Some((1, "one")));
//! assert_eq!(heap.pop(), Some((2, "two")));
//! assert_eq!(heap.pop(), Some((3, "three")));
//! assert_eq!(heap.pop(), None);
//! ```

use crate::traits::{Heap, MergeableHeap};

/// A simple binary min-heap of (priority, item) pairs
#[derive(Debug, Clone)]
pub struct SimpleBinaryHeap<T, P: Ord> {
    data: Vec<(P, T)>,
}

impl<T, P: Ord> SimpleBinaryHeap<T, P> {
    /// Builds a heap from unordered pairs with bottom-up heapify
    pub fn from_vec(data: Vec<(P, T)>) -> Self {
        let mut heap = Self { data };
        heap.heapify();
        heap
    }

    fn heapify(&mut self) {
        for index in (0..self.data.len() / 2).rev() {
            self.sift_down(index);
        }
    }

    /// Move element at index up to maintain heap property
    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.data[index].0 < self.data[parent].0 {
                self.data.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;

            if left < len && self.data[left].0 < self.data[smallest].0 {
                smallest = left;
            }
            if right < len && self.data[right].0 < self.data[smallest].0 {
                smallest = right;
            }

            if smallest == index {
                break;
            }
            self.data.swap(index, smallest);
            index = smallest;
        }
    }
}

impl<T, P: Ord> Heap<T, P> for SimpleBinaryHeap<T, P> {
    fn new() -> Self {
        Self { data: Vec::new() }
    }

    fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn push(&mut self, priority: P, item: T) {
        self.data.push((priority, item));
        self.sift_up(self.data.len() - 1);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.data.first().map(|(p, t)| (p, t))
    }

    fn pop(&mut self) -> Option<(P, T)> {
        if self.data.is_empty() {
            return None;
        }

        let result = self.data.swap_remove(0);
        if !self.data.is_empty() {
            self.sift_down(0);
        }

        Some(result)
    }
}

impl<T, P: Ord> MergeableHeap<T, P> for SimpleBinaryHeap<T, P> {
    fn merge(&mut self, other: Self) {
        self.data.extend(other.data);
        self.heapify();
    }
}

impl<T, P: Ord> Default for SimpleBinaryHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}
