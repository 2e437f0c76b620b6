//! Link-list cells and the handles that address them.
//!
//! ```text
//!            owning (next)          owning (next)
//!   HEAD ──► ┌──────┐ ───────────► ┌──────┐ ───────────► ┌──────┐ ◄── TAIL
//!            │  a   │              │  b   │              │  c   │
//!            └──────┘ ◄─────────── └──────┘ ◄─────────── └──────┘
//!                     back (prev)           back (prev)
//! ```
//!
//! A [`ListNode`] is allocated once and never moves. While linked it belongs
//! to exactly one list; once unlinked it is handed to the caller as a [`Node`],
//! an owning box whose links are both empty. A [`NodeHandle`] is a plain
//! address of a cell and stays the same across unlink/relink round trips.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::ManuallyDrop;
use std::ptr::NonNull;

pub(crate) type NodePtr<T> = NonNull<ListNode<T>>;

/// A cell of the doubly linked list.
///
/// `next` is the owning direction of the chain, `prev` is a non-owning back
/// pointer. Every mutation of the list restores `next`/`prev` symmetry before
/// it returns.
pub struct ListNode<T> {
    pub(crate) value: T,
    pub(crate) prev: Option<NodePtr<T>>,
    pub(crate) next: Option<NodePtr<T>>,
}

impl<T> ListNode<T> {
    /// Both relation slots are empty.
    #[inline]
    pub(crate) fn is_unlinked(&self) -> bool {
        self.prev.is_none() && self.next.is_none()
    }
}

/// A detached node owned by the caller.
///
/// Created with [`Node::new`] for handle-based insertion, or returned by the
/// `pop_node` family. Dropping a `Node` frees the cell and its value.
///
/// # Example
///
/// ```
/// use strand_core::{DoublyLinkedList, Node};
///
/// let mut list = DoublyLinkedList::new();
/// let node = Node::new(7);
/// let handle = node.handle();
///
/// list.append_node(node);
/// assert_eq!(list.first_handle(), Some(handle));
///
/// let node = list.pop_node().unwrap();
/// assert_eq!(node.handle(), handle);
/// assert_eq!(node.into_value(), 7);
/// ```
pub struct Node<T> {
    ptr: NodePtr<T>,
    _owns: PhantomData<Box<ListNode<T>>>,
}

impl<T> Node<T> {
    /// Allocate a detached node holding `value`.
    pub fn new(value: T) -> Self {
        let cell = Box::new(ListNode {
            value,
            prev: None,
            next: None,
        });
        Node {
            ptr: NonNull::from(Box::leak(cell)),
            _owns: PhantomData,
        }
    }

    /// The handle of this node. It stays valid for as long as the node is
    /// alive, whether detached or linked into a list.
    #[inline]
    pub fn handle(&self) -> NodeHandle<T> {
        NodeHandle::new(self.ptr)
    }

    pub fn value(&self) -> &T {
        // SAFETY: we own the cell exclusively while detached.
        unsafe { &self.ptr.as_ref().value }
    }

    pub fn value_mut(&mut self) -> &mut T {
        // SAFETY: we own the cell exclusively while detached.
        unsafe { &mut self.ptr.as_mut().value }
    }

    /// Consume the node and return its value.
    pub fn into_value(self) -> T {
        let node = ManuallyDrop::new(self);
        // SAFETY: the cell came from `Box::leak` and `node` is never dropped,
        // so ownership moves back into the box exactly once.
        let cell = unsafe { Box::from_raw(node.ptr.as_ptr()) };
        cell.value
    }

    /// Give up ownership of the cell so a list can link it.
    pub(crate) fn into_raw(self) -> NodePtr<T> {
        ManuallyDrop::new(self).ptr
    }

    /// Take ownership of an unlinked cell.
    ///
    /// # Safety
    ///
    /// `ptr` must come from [`Node::into_raw`], must not be reachable from any
    /// list, and must not be owned by another `Node`.
    pub(crate) unsafe fn from_raw(ptr: NodePtr<T>) -> Self {
        debug_assert!(unsafe { ptr.as_ref().is_unlinked() });
        Node {
            ptr,
            _owns: PhantomData,
        }
    }
}

impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        // SAFETY: the cell came from `Box::leak` and is owned by this node.
        unsafe { drop(Box::from_raw(self.ptr.as_ptr())) };
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", self.value())
            .field("handle", &self.handle())
            .finish()
    }
}

// Thread safety: a detached node is a uniquely owned box.
unsafe impl<T: Send> Send for Node<T> {}
unsafe impl<T: Sync> Sync for Node<T> {}

/// Non-owning address of a list cell.
///
/// Handles are obtained from [`Node::handle`] or a list's `get_node`, compare
/// by address, and can be stored anywhere (e.g. in a cache index). Any
/// operation that dereferences a handle is `unsafe`: the caller vouches that the
/// cell is still alive.
pub struct NodeHandle<T> {
    ptr: NodePtr<T>,
}

impl<T> NodeHandle<T> {
    #[inline]
    pub(crate) fn new(ptr: NodePtr<T>) -> Self {
        NodeHandle { ptr }
    }

    #[inline]
    pub(crate) fn ptr(self) -> NodePtr<T> {
        self.ptr
    }
}

impl<T> Clone for NodeHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for NodeHandle<T> {}

impl<T> PartialEq for NodeHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr == other.ptr
    }
}

impl<T> Eq for NodeHandle<T> {}

impl<T> Hash for NodeHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ptr.hash(state);
    }
}

impl<T> fmt::Debug for NodeHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeHandle({:p})", self.ptr)
    }
}

// A handle is only an address. Dereferencing it is unsafe and happens under
// the owning list's synchronization.
unsafe impl<T> Send for NodeHandle<T> {}
unsafe impl<T> Sync for NodeHandle<T> {}
