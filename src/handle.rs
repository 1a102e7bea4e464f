//! Item handles and heap ownership tracking
//!
//! An [`ItemHandle`] shares an [`ItemSlot`] with the node currently holding
//! its item. The slot records which node that is (updated by decrease-key,
//! cleared by delete) and which heap the item was inserted into.
//!
//! Heap identity is an [`Owner`] token. Melding points the consumed heap's
//! token at the receiving heap's token, so ownership checks are a
//! union-find lookup with path compression.

use crate::node::{NodeRef, WeakNodeRef};
use crate::traits::Handle;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Identity token of a heap
pub(crate) struct Owner {
    /// Set once the heap was melded into another one
    merged_into: RefCell<Option<Rc<Owner>>>,
}

impl Owner {
    pub(crate) fn new() -> Rc<Owner> {
        Rc::new(Owner {
            merged_into: RefCell::new(None),
        })
    }

    /// Returns the token of the heap that currently owns `this`'s items
    pub(crate) fn find(this: &Rc<Owner>) -> Rc<Owner> {
        let mut root = Rc::clone(this);
        loop {
            let up = root.merged_into.borrow().clone();
            match up {
                Some(parent) => root = parent,
                None => break,
            }
        }

        // Path compression
        let mut current = Rc::clone(this);
        while !Rc::ptr_eq(&current, &root) {
            let up = current.merged_into.replace(Some(Rc::clone(&root)));
            match up {
                Some(parent) => current = parent,
                None => break,
            }
        }

        root
    }

    /// Records that every item owned by `absorbed` now belongs to `owner`
    pub(crate) fn absorb(owner: &Rc<Owner>, absorbed: &Rc<Owner>) {
        let owner_root = Owner::find(owner);
        let absorbed_root = Owner::find(absorbed);
        if !Rc::ptr_eq(&owner_root, &absorbed_root) {
            *absorbed_root.merged_into.borrow_mut() = Some(owner_root);
        }
    }
}

/// Bookkeeping shared between a handle and the node holding its item
pub(crate) struct ItemSlot<T, P> {
    /// Owning node; dangles (`Weak::new()`) once the item was deleted
    node: RefCell<WeakNodeRef<T, P>>,
    owner: RefCell<Rc<Owner>>,
}

impl<T, P> ItemSlot<T, P> {
    pub(crate) fn new(owner: Rc<Owner>) -> Self {
        ItemSlot {
            node: RefCell::new(Weak::new()),
            owner: RefCell::new(owner),
        }
    }

    /// Points the slot at the node now holding the item
    pub(crate) fn attach(&self, node: &NodeRef<T, P>) {
        *self.node.borrow_mut() = Rc::downgrade(node);
    }

    /// Marks the item as deleted
    pub(crate) fn detach(&self) {
        *self.node.borrow_mut() = Weak::new();
    }

    /// The node holding the item, if the item is still live
    pub(crate) fn node(&self) -> Option<NodeRef<T, P>> {
        self.node.borrow().upgrade()
    }

    /// Returns true if the item belongs to the heap identified by `owner`
    pub(crate) fn belongs_to(&self, owner: &Rc<Owner>) -> bool {
        let mine = Owner::find(&self.owner.borrow());
        let same = Rc::ptr_eq(&mine, &Owner::find(owner));
        *self.owner.borrow_mut() = mine;
        same
    }
}

/// Handle to an element in a [`HollowHeap`](crate::hollow::HollowHeap)
///
/// Returned by [`insert`](crate::hollow::HollowHeap::insert). The handle always
/// follows the item, not the node structure: decrease-key moves the item to a
/// new node and the handle keeps working. After the item is deleted or popped,
/// every operation taking the handle returns
/// [`HeapError::InvalidHandle`](crate::HeapError::InvalidHandle).
pub struct ItemHandle<T, P> {
    pub(crate) slot: Rc<ItemSlot<T, P>>,
}

impl<T, P> ItemHandle<T, P> {
    pub(crate) fn new(slot: Rc<ItemSlot<T, P>>) -> Self {
        ItemHandle { slot }
    }

    /// Returns true while the item is still stored in some heap
    pub fn is_live(&self) -> bool {
        self.slot.node().is_some()
    }
}

impl<T, P> Clone for ItemHandle<T, P> {
    fn clone(&self) -> Self {
        ItemHandle {
            slot: Rc::clone(&self.slot),
        }
    }
}

impl<T, P> PartialEq for ItemHandle<T, P> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.slot, &other.slot)
    }
}

impl<T, P> Eq for ItemHandle<T, P> {}

impl<T, P> fmt::Debug for ItemHandle<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemHandle")
            .field("slot", &Rc::as_ptr(&self.slot))
            .field("live", &self.is_live())
            .finish()
    }
}

impl<T, P> Handle for ItemHandle<T, P> {}
