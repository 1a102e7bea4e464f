//! Hollow heap nodes and the link primitive
//!
//! Each node is either "full" (holds an item) or "hollow" (its item was moved
//! out by decrease-key or removed by delete). Hollow nodes stay in the
//! structure as scaffolding until a consolidation sweep reclaims them.
//!
//! The structure is a DAG rather than a forest: a node hollowed by
//! decrease-key keeps its first parent (from a link) and gains a second parent,
//! the node that received its item. Both parents hold a strong reference, so a
//! node is dropped exactly when the last of its parents releases it.

use crate::handle::ItemSlot;
use crate::rank::{checked_increment, Rank};
use std::cell::RefCell;
use std::ptr;
use std::rc::{Rc, Weak};

/// Type alias for a reference-counted node pointer
pub(crate) type NodeRef<T, P> = Rc<RefCell<Node<T, P>>>;

/// Non-owning node pointer, used for second-parent and item back-references
pub(crate) type WeakNodeRef<T, P> = Weak<RefCell<Node<T, P>>>;

/// The item held by a full node: the user value plus the slot shared with its handle
pub(crate) struct Entry<T, P> {
    pub(crate) value: T,
    pub(crate) slot: Rc<ItemSlot<T, P>>,
}

/// Life state of a node that is still reachable
///
/// A node moves from `Full` to one of the hollow states exactly once and
/// never returns. It is reclaimed (dropped) once both parents released it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeState {
    Full,
    /// Hollow and reachable only through its first parent (or the sweep)
    Hollow,
    /// Hollowed by decrease-key while its second parent still refers to it
    HollowWithSecondParent,
}

pub(crate) struct Node<T, P> {
    /// The item stored in this node (None if hollow)
    pub(crate) entry: Option<Entry<T, P>>,
    /// Kept after hollowing so the node still orders against its descendants
    pub(crate) key: P,
    pub(crate) rank: Rank,
    /// First child in the child list
    pub(crate) child: Option<NodeRef<T, P>>,
    /// Next sibling in the child list of the first parent
    pub(crate) next: Option<NodeRef<T, P>>,
    /// The node that took over this node's item in a decrease-key
    pub(crate) second_parent: Option<WeakNodeRef<T, P>>,
}

impl<T, P> Node<T, P> {
    pub(crate) fn new(entry: Entry<T, P>, key: P) -> Self {
        Node {
            entry: Some(entry),
            key,
            rank: 0,
            child: None,
            next: None,
            second_parent: None,
        }
    }

    pub(crate) fn into_ref(self) -> NodeRef<T, P> {
        Rc::new(RefCell::new(self))
    }

    /// Returns true if this node is hollow (has no item)
    pub(crate) fn is_hollow(&self) -> bool {
        self.entry.is_none()
    }

    pub(crate) fn state(&self) -> NodeState {
        match (&self.entry, &self.second_parent) {
            (Some(_), _) => NodeState::Full,
            (None, None) => NodeState::Hollow,
            (None, Some(_)) => NodeState::HollowWithSecondParent,
        }
    }
}

/// Returns true if `weak` points at `node`
pub(crate) fn is_same<T, P>(weak: &WeakNodeRef<T, P>, node: &NodeRef<T, P>) -> bool {
    ptr::eq(weak.as_ptr(), Rc::as_ptr(node))
}

/// Prepends `child` to `parent`'s child list
fn add_child<T, P>(parent: &NodeRef<T, P>, child: NodeRef<T, P>) {
    let mut parent_mut = parent.borrow_mut();
    child.borrow_mut().next = parent_mut.child.take();
    parent_mut.child = Some(child);
}

/// Links two roots, making the one with the larger key a child of the other.
/// Returns the winner. `w` wins ties.
pub(crate) fn link<T, P: Ord>(v: NodeRef<T, P>, w: NodeRef<T, P>) -> NodeRef<T, P> {
    let v_loses = v.borrow().key >= w.borrow().key;

    if v_loses {
        add_child(&w, v);
        w
    } else {
        add_child(&v, w);
        v
    }
}

/// Links two roots of equal rank and bumps the winner's rank
pub(crate) fn ranked_link<T, P: Ord>(v: NodeRef<T, P>, w: NodeRef<T, P>) -> NodeRef<T, P> {
    let winner = link(v, w);
    {
        let mut node = winner.borrow_mut();
        node.rank = checked_increment(node.rank);
    }
    winner
}
