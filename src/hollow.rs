//! Hollow Heap implementation
//!
//! A hollow heap is a simple data structure with the same amortized efficiency as
//! the classical Fibonacci heap, but with a simpler implementation. This is the
//! two-parent variant: the whole heap is a single heap-ordered DAG.
//!
//! # Time Complexity
//!
//! | Operation        | Complexity           |
//! |------------------|----------------------|
//! | `insert`         | O(1) worst-case      |
//! | `get_minimum`    | O(1) worst-case      |
//! | `reduce_key`     | O(1) worst-case      |
//! | `merge_heap`     | O(1) worst-case      |
//! | `delete_item`    | O(log n) amortized   |
//! | `delete_minimum` | O(log n) amortized   |
//!
//! # Key Ideas
//!
//! 1. **Lazy deletion**: deleting an item only empties ("hollows") its node.
//!    The structural work is deferred until the minimum itself is removed.
//!
//! 2. **Decrease-key by moving the item**: instead of cutting a subtree, the
//!    item moves to a new node with the lower key. The old node becomes hollow
//!    and is kept as a child of the new node, its *second parent*, while still
//!    sitting in the child list of its *first parent*.
//!
//! 3. **Consolidation on delete-min**: the sweep walks the hollow nodes below
//!    the removed root, releases them from their parents, and combines the
//!    surviving full subtrees by rank, like a binomial heap's carry propagation.
//!
//! # References
//!
//! - Hansen, T.D., Kaplan, H., Tarjan, R.E., Zwick, U. (2015). "Hollow Heaps."
//!   *ICALP 2015*. [arXiv:1510.06535](https://arxiv.org/abs/1510.06535)
//! - Hansen, T.D., Kaplan, H., Tarjan, R.E., Zwick, U. (2017). "Hollow Heaps."
//!   *ACM Transactions on Algorithms*, 13(3), 42.

use crate::handle::{ItemHandle, ItemSlot, Owner};
use crate::node::{is_same, link, ranked_link, Entry, Node, NodeRef, NodeState};
use crate::rank::{carry_capacity, hollowed_rank};
use crate::traits::{DecreaseKeyHeap, Heap, HeapError, MergeableHeap};
use log::{debug, trace};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

/// Counters reported at the end of a consolidation sweep
#[derive(Debug, Default)]
struct SweepStats {
    visited: usize,
    reclaimed: usize,
    links: usize,
}

/// Two-parent Hollow Heap
///
/// A min-heap of `(key, value)` pairs. [`insert`](HollowHeap::insert) returns an
/// [`ItemHandle`] that can later lower the item's key or delete it.
///
/// # Example
///
/// ```rust
/// use hollow_heap::HollowHeap;
///
/// let mut heap = HollowHeap::new();
/// let five = heap.insert("five", 5);
/// heap.insert("three", 3);
///
/// heap.reduce_key(&five, 1).unwrap();
/// assert_eq!(heap.get_minimum(), Ok((&1, &"five")));
/// assert_eq!(heap.delete_minimum(), Ok((1, "five")));
/// assert_eq!(heap.len(), 1);
/// ```
pub struct HollowHeap<T, P: Ord> {
    /// Root of the heap (None if empty); always a full node
    root: Option<NodeRef<T, P>>,
    /// Number of live items in the heap
    len: usize,
    owner: Rc<Owner>,
    /// Expected item count, used to pre-size the carry table
    rank_hint: usize,
}

impl<T, P: Ord + Clone> Default for HollowHeap<T, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, P: Ord> Drop for HollowHeap<T, P> {
    fn drop(&mut self) {
        // Unlink iteratively: long sibling chains would otherwise recurse once per node.
        let mut stack: Vec<NodeRef<T, P>> = self.root.take().into_iter().collect();
        while let Some(node_rc) = stack.pop() {
            let mut node = node_rc.borrow_mut();
            if let Some(child) = node.child.take() {
                stack.push(child);
            }
            if let Some(next) = node.next.take() {
                stack.push(next);
            }
            if let Some(entry) = &node.entry {
                entry.slot.detach();
            }
        }
    }
}

impl<T, P: Ord + fmt::Debug> fmt::Debug for HollowHeap<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.root.as_ref().map(|root| root.borrow());
        f.debug_struct("HollowHeap")
            .field("len", &self.len)
            .field("min_key", &root.as_ref().map(|node| &node.key))
            .finish()
    }
}

impl<T, P: Ord + Clone> HollowHeap<T, P> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            owner: Owner::new(),
            rank_hint: 0,
        }
    }

    /// Creates a new empty heap whose consolidation tables are pre-sized for
    /// about `expected_len` items. The tables still grow past the hint.
    pub fn with_rank_hint(expected_len: usize) -> Self {
        let mut heap = Self::new();
        heap.rank_hint = expected_len;
        heap
    }

    /// Returns the number of live items
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap holds no items
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `value` with priority `key` and returns its handle
    pub fn insert(&mut self, value: T, key: P) -> ItemHandle<T, P> {
        let slot = Rc::new(ItemSlot::new(Rc::clone(&self.owner)));
        let node = Node::new(
            Entry {
                value,
                slot: Rc::clone(&slot),
            },
            key,
        )
        .into_ref();
        slot.attach(&node);

        self.root = Some(match self.root.take() {
            None => node,
            Some(root) => link(node, root),
        });
        self.len += 1;

        ItemHandle::new(slot)
    }

    /// Returns the minimum key and its value
    ///
    /// # Errors
    /// `HeapError::Empty` if the heap holds no items.
    pub fn get_minimum(&self) -> Result<(&P, &T), HeapError> {
        let root_rc = self.root.as_ref().ok_or(HeapError::Empty)?;

        // SAFETY: We bypass RefCell's dynamic borrow checking to return
        // references with lifetime tied to `&self`. This is safe because:
        // 1. The Rc in `self.root` keeps the node alive for `&self`'s lifetime
        // 2. Every mutation of a node reachable from the root goes through a
        //    `&mut self` method, which the borrow checker rules out while these
        //    references exist; handles only ever borrow nodes immutably
        // 3. The root is never hollow, so `entry` is `Some`
        unsafe {
            let ptr = root_rc.as_ptr();
            match (*ptr).entry.as_ref() {
                Some(entry) => Ok((&(*ptr).key, &entry.value)),
                None => Err(HeapError::Empty),
            }
        }
    }

    /// Returns true if `handle` refers to a live item of this heap
    pub fn contains(&self, handle: &ItemHandle<T, P>) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Returns the current key of the item behind `handle`
    pub fn key_of(&self, handle: &ItemHandle<T, P>) -> Result<P, HeapError> {
        let node = self.resolve(handle)?;
        let key = node.borrow().key.clone();
        Ok(key)
    }

    /// Lowers the key of the item behind `handle` to `new_key`
    ///
    /// A key equal to the current one is accepted.
    ///
    /// # Errors
    /// - `HeapError::PriorityIncreased` if `new_key` is greater than the current key
    /// - `HeapError::InvalidHandle` if the item was already deleted
    /// - `HeapError::ForeignHandle` if the item belongs to another heap
    pub fn reduce_key(&mut self, handle: &ItemHandle<T, P>, new_key: P) -> Result<(), HeapError> {
        let node_rc = self.resolve(handle)?;

        if new_key > node_rc.borrow().key {
            return Err(HeapError::PriorityIncreased);
        }

        // The root stays minimal, just update the key in place
        if self.is_root(&node_rc) {
            node_rc.borrow_mut().key = new_key;
            return Ok(());
        }

        // Move the item out; the old node is hollow from here on
        let (entry, old_rank) = {
            let mut node = node_rc.borrow_mut();
            let entry = node.entry.take().ok_or(HeapError::InvalidHandle)?;
            (entry, node.rank)
        };
        let slot = Rc::clone(&entry.slot);
        let rank = hollowed_rank(old_rank);

        let mut new_node = Node::new(entry, new_key);
        new_node.rank = rank;
        new_node.child = Some(Rc::clone(&node_rc));
        let new_node = new_node.into_ref();

        // u.next is left alone: it still links u into its first parent's child list
        node_rc.borrow_mut().second_parent = Some(Rc::downgrade(&new_node));
        slot.attach(&new_node);

        trace!(
            "reduce_key: item moved to a rank {} node, rank {} node hollowed",
            rank,
            old_rank
        );

        let root = self.root.take().expect("non-empty heap must have root");
        self.root = Some(link(new_node, root));
        Ok(())
    }

    /// Removes the item behind `handle` and returns its key and value
    ///
    /// Deleting anything but the minimum only hollows its node; the minimum
    /// triggers a consolidation.
    ///
    /// # Errors
    /// - `HeapError::InvalidHandle` if the item was already deleted
    /// - `HeapError::ForeignHandle` if the item belongs to another heap
    pub fn delete_item(&mut self, handle: &ItemHandle<T, P>) -> Result<(P, T), HeapError> {
        let node_rc = self.resolve(handle)?;
        let removed = Self::hollow_out(&node_rc)?;
        self.len -= 1;

        if self.is_root(&node_rc) {
            drop(node_rc);
            self.consolidate();
        }

        Ok(removed)
    }

    /// Removes the minimum item and returns its key and value
    ///
    /// # Errors
    /// `HeapError::Empty` if the heap holds no items; the heap stays empty.
    pub fn delete_minimum(&mut self) -> Result<(P, T), HeapError> {
        let root_rc = self.root.as_ref().ok_or(HeapError::Empty)?;
        let removed = Self::hollow_out(root_rc).map_err(|_| HeapError::Empty)?;
        self.len -= 1;

        self.consolidate();

        Ok(removed)
    }

    /// Moves every item of `other` into this heap
    ///
    /// Handles issued by `other` stay valid and now refer to items of `self`.
    pub fn merge_heap(&mut self, mut other: Self) {
        Owner::absorb(&self.owner, &other.owner);

        let other_len = std::mem::take(&mut other.len);
        self.rank_hint = self.rank_hint.max(other.rank_hint);
        self.len += other_len;
        trace!("merge_heap: absorbed {} items, {} total", other_len, self.len);

        self.root = match (self.root.take(), other.root.take()) {
            (None, other_root) => other_root,
            (self_root, None) => self_root,
            (Some(self_root), Some(other_root)) => Some(link(self_root, other_root)),
        };
    }

    /// Checks the structural invariants: heap order on every arc (hollow nodes
    /// included), a full root holding the minimum, and `len` matching the
    /// number of full nodes.
    ///
    /// Walks the whole structure, O(number of nodes). Intended for tests and
    /// debugging.
    pub fn verify_heap_order(&self) -> bool {
        let root = match &self.root {
            None => return self.len == 0,
            Some(root) => root,
        };
        if root.borrow().is_hollow() || root.borrow().next.is_some() {
            return false;
        }

        let mut expanded: HashSet<*const ()> = HashSet::new();
        let mut full_nodes = 0;
        let mut stack = vec![Rc::clone(root)];

        while let Some(parent) = stack.pop() {
            if !expanded.insert(Rc::as_ptr(&parent) as *const ()) {
                continue;
            }
            let parent_node = parent.borrow();
            if !parent_node.is_hollow() {
                full_nodes += 1;
            }

            let mut cursor = parent_node.child.clone();
            while let Some(child) = cursor {
                let child_node = child.borrow();
                if child_node.key < parent_node.key {
                    return false;
                }
                // A child reached through its second parent ends that parent's list
                let ends_here = child_node
                    .second_parent
                    .as_ref()
                    .is_some_and(|sp| is_same(sp, &parent));
                cursor = if ends_here {
                    None
                } else {
                    child_node.next.clone()
                };
                drop(child_node);
                stack.push(child);
            }
        }

        full_nodes == self.len
    }

    fn is_root(&self, node: &NodeRef<T, P>) -> bool {
        self.root.as_ref().is_some_and(|root| Rc::ptr_eq(root, node))
    }

    /// Finds the node holding the item behind `handle`
    fn resolve(&self, handle: &ItemHandle<T, P>) -> Result<NodeRef<T, P>, HeapError> {
        let node = handle.slot.node().ok_or(HeapError::InvalidHandle)?;
        if !handle.slot.belongs_to(&self.owner) {
            return Err(HeapError::ForeignHandle);
        }
        Ok(node)
    }

    /// Empties a full node, detaching its handle
    fn hollow_out(node_rc: &NodeRef<T, P>) -> Result<(P, T), HeapError> {
        let mut node = node_rc.borrow_mut();
        let entry = node.entry.take().ok_or(HeapError::InvalidHandle)?;
        entry.slot.detach();
        Ok((node.key.clone(), entry.value))
    }

    /// Rebuilds the heap after its root was hollowed.
    ///
    /// Hollow nodes below the old root are released from the parent being
    /// walked; the ones with no parent left are swept in turn. Full nodes met
    /// on the way are combined by rank and finally folded into one tree.
    fn consolidate(&mut self) {
        let old_root = match self.root.take() {
            Some(root) => root,
            None => return,
        };

        let mut carry: Vec<Option<NodeRef<T, P>>> = Vec::new();
        carry.resize_with(carry_capacity(self.len.max(self.rank_hint)), || None);
        let mut max_rank = 0;
        let mut stats = SweepStats::default();

        // Hollow nodes whose last parent has released them
        let mut pending = vec![old_root];

        while let Some(parent) = pending.pop() {
            stats.reclaimed += 1;
            let mut cursor = parent.borrow_mut().child.take();

            while let Some(node_rc) = cursor {
                stats.visited += 1;
                let state = node_rc.borrow().state();

                #[cfg(feature = "verbose-sweep")]
                trace!(
                    "sweep: node {:p} state {:?} rank {}",
                    Rc::as_ptr(&node_rc),
                    state,
                    node_rc.borrow().rank
                );

                cursor = match state {
                    NodeState::Full => {
                        let next = node_rc.borrow_mut().next.take();
                        Self::carry(&mut carry, &mut max_rank, &mut stats, node_rc);
                        next
                    }
                    NodeState::Hollow => {
                        let next = node_rc.borrow_mut().next.take();
                        pending.push(node_rc);
                        next
                    }
                    NodeState::HollowWithSecondParent => {
                        let mut node = node_rc.borrow_mut();
                        let from_second_parent = node
                            .second_parent
                            .take()
                            .is_some_and(|sp| is_same(&sp, &parent));
                        if from_second_parent {
                            // Walking from the second parent: the rest of the
                            // list belongs to the first parent
                            None
                        } else {
                            node.next.take()
                        }
                    }
                };
            }
        }

        let mut trees = 0;
        let mut new_root: Option<NodeRef<T, P>> = None;
        for tree in carry.into_iter().take(max_rank + 1).flatten() {
            trees += 1;
            new_root = Some(match new_root {
                None => tree,
                Some(acc) => link(acc, tree),
            });
        }

        debug!(
            "consolidate: visited {} nodes, reclaimed {} hollow, {} ranked links, {} trees folded, max rank {}",
            stats.visited, stats.reclaimed, stats.links, trees, max_rank
        );

        self.root = new_root;
    }

    /// Adds a full root to the carry table, linking equal ranks until a free
    /// slot is found
    fn carry(
        table: &mut Vec<Option<NodeRef<T, P>>>,
        max_rank: &mut usize,
        stats: &mut SweepStats,
        mut node: NodeRef<T, P>,
    ) {
        loop {
            let rank = node.borrow().rank as usize;
            if rank >= table.len() {
                table.resize_with(rank + 1, || None);
            }
            match table[rank].take() {
                Some(other) => {
                    stats.links += 1;
                    node = ranked_link(node, other);
                }
                None => {
                    table[rank] = Some(node);
                    *max_rank = (*max_rank).max(rank);
                    return;
                }
            }
        }
    }
}

impl<T, P: Ord + Clone> Heap<T, P> for HollowHeap<T, P> {
    fn new() -> Self {
        HollowHeap::new()
    }

    fn is_empty(&self) -> bool {
        HollowHeap::is_empty(self)
    }

    fn len(&self) -> usize {
        HollowHeap::len(self)
    }

    fn push(&mut self, priority: P, item: T) {
        let _ = self.insert(item, priority);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.get_minimum().ok()
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.delete_minimum().ok()
    }
}

impl<T, P: Ord + Clone> MergeableHeap<T, P> for HollowHeap<T, P> {
    fn merge(&mut self, other: Self) {
        self.merge_heap(other);
    }
}

impl<T, P: Ord + Clone> DecreaseKeyHeap<T, P> for HollowHeap<T, P> {
    type Handle = ItemHandle<T, P>;

    fn push_with_handle(&mut self, priority: P, item: T) -> Self::Handle {
        self.insert(item, priority)
    }

    fn decrease_key(&mut self, handle: &Self::Handle, new_priority: P) -> Result<(), HeapError> {
        self.reduce_key(handle, new_priority)
    }

    fn delete(&mut self, handle: &Self::Handle) -> Result<(P, T), HeapError> {
        self.delete_item(handle)
    }
}
