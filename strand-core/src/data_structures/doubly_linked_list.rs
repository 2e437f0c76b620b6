use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use tracing::{error, trace};

use crate::data_structures::node::{ListNode, Node, NodeHandle, NodePtr};
use crate::error::{ListError, ListResult};

///
/// Unsynchronized doubly linked list engine.
///
/// All positional and node-handle mutations live here. The type takes
/// `&mut self` for every mutation and has no locking of its own; shared use
/// goes through a wrapper that implements [`SafeList`](crate::SafeList).
///
// =============================================================================
// LIST INVARIANTS
// =============================================================================
//
//   len == 0  <=>  head == None  <=>  tail == None
//
//   len == 1  =>   head == tail, and that node has prev == next == None
//
//   for every linked n with n.next == Some(m):  m.prev == Some(n)
//
//   walking head -> tail via `next` visits exactly `len` distinct nodes,
//   walking tail -> head via `prev` visits the same nodes in reverse
//
//   a node handed back to the caller (pop_node, unlink_node) has both
//   relation slots cleared and is unreachable from head/tail
//
// The chain owns its cells through `next`; `prev` never keeps a cell alive.
// Cells are allocated by `Node::new` and freed either by the caller's `Node`
// or by `Drop for DoublyLinkedList`.
//
// =============================================================================
// SPLICE (insert at 0 < index < len)
// =============================================================================
//
// Before:  prev ──────────────► next
//               ◄──────────────
//
// After:   prev ──► node ──► next
//               ◄──      ◄──
//
// =============================================================================
// UNLINK
// =============================================================================
//
// Before:  prev ──► node ──► next
// After:   prev ─────────────► next        node: prev = next = None
//
// When node is the head (prev == None) the list head moves to next; when it
// is the tail (next == None) the list tail moves to prev. A singleton resets
// both to None.
//
pub struct DoublyLinkedList<T> {
    len: usize,
    head: Option<NodePtr<T>>,
    tail: Option<NodePtr<T>>,
    _owns: PhantomData<Box<ListNode<T>>>,
}

impl<T> DoublyLinkedList<T> {
    pub const fn new() -> Self {
        DoublyLinkedList {
            len: 0,
            head: None,
            tail: None,
            _owns: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // =========================================================================
    // Value operations
    // =========================================================================

    /// Link `value` as the new tail. Always succeeds.
    pub fn append(&mut self, value: T) -> bool {
        self.append_node(Node::new(value))
    }

    /// Link `value` as the new head. Always succeeds.
    pub fn prepend(&mut self, value: T) -> bool {
        self.prepend_node(Node::new(value))
    }

    /// Detach the tail and return its value.
    pub fn pop(&mut self) -> Option<T> {
        self.pop_node().map(Node::into_value)
    }

    /// Detach the head and return its value.
    pub fn pop_first(&mut self) -> Option<T> {
        self.pop_first_node().map(Node::into_value)
    }

    pub fn try_pop(&mut self) -> ListResult<T> {
        self.pop().ok_or(ListError::Empty)
    }

    pub fn try_pop_first(&mut self) -> ListResult<T> {
        self.pop_first().ok_or(ListError::Empty)
    }

    pub fn first(&self) -> Option<&T> {
        // SAFETY: head is linked into this list and borrowed through &self
        self.head.map(|ptr| unsafe { &(*ptr.as_ptr()).value })
    }

    pub fn last(&self) -> Option<&T> {
        // SAFETY: tail is linked into this list and borrowed through &self
        self.tail.map(|ptr| unsafe { &(*ptr.as_ptr()).value })
    }

    /// Value at `index`. O(n).
    pub fn get(&self, index: usize) -> Option<&T> {
        self.try_get(index).ok()
    }

    pub fn try_get(&self, index: usize) -> ListResult<&T> {
        let ptr = self.node_at(index)?;
        // SAFETY: ptr is linked into this list and borrowed through &self
        Ok(unsafe { &(*ptr.as_ptr()).value })
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let ptr = self.node_at(index).ok()?;
        // SAFETY: ptr is linked into this list and borrowed through &mut self
        Some(unsafe { &mut (*ptr.as_ptr()).value })
    }

    /// Replace the value at `index` in place. O(n).
    pub fn set(&mut self, index: usize, value: T) -> bool {
        self.try_set(index, value).is_ok()
    }

    /// Replace the value at `index`, returning the previous one.
    pub fn try_set(&mut self, index: usize, value: T) -> ListResult<T> {
        let ptr = self.node_at(index)?;
        // SAFETY: ptr is linked into this list and borrowed through &mut self
        Ok(std::mem::replace(unsafe { &mut (*ptr.as_ptr()).value }, value))
    }

    /// Insert `value` so that it ends up at `index`. O(n).
    ///
    /// `index == 0` prepends, `index == len` appends, anything larger is
    /// rejected and leaves the list unchanged.
    pub fn insert(&mut self, index: usize, value: T) -> bool {
        self.try_insert(index, value).is_ok()
    }

    pub fn try_insert(&mut self, index: usize, value: T) -> ListResult<()> {
        if index > self.len {
            trace!(index, len = self.len, "insert rejected: index out of range");
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        if index == 0 {
            self.prepend(value);
            return Ok(());
        }
        if index == self.len {
            self.append(value);
            return Ok(());
        }

        let prev = self.node_at(index - 1)?;
        let node = Node::new(value).into_raw();
        // SAFETY: prev is linked and is not the tail (index < len), node is
        // freshly allocated and unlinked.
        unsafe { self.link_after(prev, node) };
        Ok(())
    }

    /// Remove the element at `index`, dropping its value. O(n).
    pub fn delete(&mut self, index: usize) -> bool {
        self.try_remove(index).is_ok()
    }

    /// Remove the element at `index` and return its value. O(n).
    pub fn remove(&mut self, index: usize) -> Option<T> {
        self.try_remove(index).ok()
    }

    pub fn try_remove(&mut self, index: usize) -> ListResult<T> {
        let ptr = self.node_at(index)?;
        // SAFETY: ptr was just found by walking this list
        Ok(unsafe { self.unlink(ptr) }.into_value())
    }

    /// Drop every element.
    pub fn clear(&mut self) {
        while self.pop_first_node().is_some() {}
    }

    // =========================================================================
    // Node-handle operations
    // =========================================================================

    /// Link a caller-supplied detached node as the new tail. Always succeeds.
    ///
    /// A [`Node`] is detached by construction, so the node cannot already be
    /// linked elsewhere.
    pub fn append_node(&mut self, node: Node<T>) -> bool {
        let ptr = node.into_raw();
        // SAFETY: ptr is unlinked and now owned by this list
        unsafe {
            (*ptr.as_ptr()).prev = self.tail;
            match self.tail {
                Some(tail) => (*tail.as_ptr()).next = Some(ptr),
                None => self.head = Some(ptr),
            }
        }
        self.tail = Some(ptr);
        self.len += 1;
        true
    }

    /// Link a caller-supplied detached node as the new head. Always succeeds.
    pub fn prepend_node(&mut self, node: Node<T>) -> bool {
        let ptr = node.into_raw();
        // SAFETY: ptr is unlinked and now owned by this list
        unsafe {
            (*ptr.as_ptr()).next = self.head;
            match self.head {
                Some(head) => (*head.as_ptr()).prev = Some(ptr),
                None => self.tail = Some(ptr),
            }
        }
        self.head = Some(ptr);
        self.len += 1;
        true
    }

    /// Detach the tail node and hand it to the caller.
    pub fn pop_node(&mut self) -> Option<Node<T>> {
        let tail = self.tail?;
        // SAFETY: tail is linked into this list
        Some(unsafe { self.unlink(tail) })
    }

    /// Detach the head node and hand it to the caller.
    pub fn pop_first_node(&mut self) -> Option<Node<T>> {
        let head = self.head?;
        // SAFETY: head is linked into this list
        Some(unsafe { self.unlink(head) })
    }

    /// Handle of the node at `index`. O(n).
    pub fn get_node(&self, index: usize) -> Option<NodeHandle<T>> {
        self.node_at(index).ok().map(NodeHandle::new)
    }

    /// Detach `node` and drop it.
    ///
    /// Returns `false` when the node is recognisably not a member: it is
    /// neither head nor tail and both of its relation slots are empty (never
    /// linked, or already popped).
    ///
    /// # Safety
    ///
    /// - `node` must address a live cell: linked into this list, or detached
    ///   and still owned by a [`Node`].
    /// - If the cell is linked into any list, that list must be `self`. A cell
    ///   linked into a different list cannot be told apart from a member by
    ///   local inspection, and passing one corrupts both lists.
    pub unsafe fn delete_node(&mut self, node: NodeHandle<T>) -> bool {
        unsafe { self.unlink_node(node) }.is_some()
    }

    /// Detach `node` and return it without dropping, so it can be relinked
    /// elsewhere. The handle stays valid for the returned [`Node`].
    ///
    /// # Safety
    ///
    /// Same contract as [`delete_node`](Self::delete_node).
    pub unsafe fn unlink_node(&mut self, node: NodeHandle<T>) -> Option<Node<T>> {
        let ptr = node.ptr();
        let is_end = self.head == Some(ptr) || self.tail == Some(ptr);
        // SAFETY: caller guarantees the cell is alive
        if !is_end && unsafe { ptr.as_ref().is_unlinked() } {
            trace!(?node, "unlink rejected: node is not linked into this list");
            return None;
        }
        // SAFETY: caller guarantees that a linked cell belongs to this list
        Some(unsafe { self.unlink(ptr) })
    }

    // =========================================================================
    // Raw cursor (used by lock-holding iterators)
    // =========================================================================

    pub fn first_handle(&self) -> Option<NodeHandle<T>> {
        self.head.map(NodeHandle::new)
    }

    pub fn last_handle(&self) -> Option<NodeHandle<T>> {
        self.tail.map(NodeHandle::new)
    }

    /// Successor of a linked node.
    ///
    /// # Safety
    ///
    /// `node` must be linked into this list.
    pub unsafe fn next_handle(&self, node: NodeHandle<T>) -> Option<NodeHandle<T>> {
        unsafe { node.ptr().as_ref().next.map(NodeHandle::new) }
    }

    /// Predecessor of a linked node.
    ///
    /// # Safety
    ///
    /// `node` must be linked into this list.
    pub unsafe fn prev_handle(&self, node: NodeHandle<T>) -> Option<NodeHandle<T>> {
        unsafe { node.ptr().as_ref().prev.map(NodeHandle::new) }
    }

    /// Borrow the value of a linked node.
    ///
    /// # Safety
    ///
    /// `node` must be linked into this list.
    pub unsafe fn node_value(&self, node: NodeHandle<T>) -> &T {
        unsafe { &(*node.ptr().as_ptr()).value }
    }

    /// Mutably borrow the value of a linked node.
    ///
    /// # Safety
    ///
    /// `node` must be linked into this list.
    pub unsafe fn node_value_mut(&mut self, node: NodeHandle<T>) -> &mut T {
        unsafe { &mut (*node.ptr().as_ptr()).value }
    }

    // =========================================================================
    // Iteration
    // =========================================================================

    /// Borrowing head-to-tail traversal. Mutation is excluded by the borrow.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            head: self.head,
            tail: self.tail,
            len: self.len,
            _marker: PhantomData,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            head: self.head,
            tail: self.tail,
            len: self.len,
            _marker: PhantomData,
        }
    }

    // =========================================================================
    // Invariant checks
    // =========================================================================

    /// Walk the chain in both directions and verify the structural
    /// invariants. Logs the first violation found.
    pub fn check_invariants(&self) -> bool {
        if (self.len == 0) != self.head.is_none() || self.head.is_none() != self.tail.is_none() {
            error!(len = self.len, "empty list must have neither head nor tail");
            return false;
        }

        let mut forward = Vec::with_capacity(self.len);
        let mut prev: Option<NodePtr<T>> = None;
        let mut current = self.head;
        while let Some(ptr) = current {
            if forward.len() == self.len {
                error!(len = self.len, "forward walk longer than len (cycle?)");
                return false;
            }
            // SAFETY: every pointer reachable from head is a live cell
            let node = unsafe { ptr.as_ref() };
            if node.prev != prev {
                error!(position = forward.len(), "prev/next symmetry broken");
                return false;
            }
            forward.push(ptr);
            prev = Some(ptr);
            current = node.next;
        }
        if forward.len() != self.len || prev != self.tail {
            error!(walked = forward.len(), len = self.len, "forward walk does not end at tail");
            return false;
        }

        let mut current = self.tail;
        for &expected in forward.iter().rev() {
            if current != Some(expected) {
                error!("backward walk diverges from forward walk");
                return false;
            }
            // SAFETY: see above
            current = unsafe { expected.as_ref().prev };
        }
        if current.is_some() {
            error!("head has a predecessor");
            return false;
        }
        true
    }

    // =========================================================================
    // Internal
    // =========================================================================

    /// Find the cell at `index`, walking from whichever end is closer.
    fn node_at(&self, index: usize) -> ListResult<NodePtr<T>> {
        if index >= self.len {
            return Err(ListError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        // SAFETY: index < len, so every step below lands on a linked cell
        let found = unsafe {
            if index <= self.len / 2 {
                let mut current = self.head;
                for _ in 0..index {
                    current = current.and_then(|ptr| ptr.as_ref().next);
                }
                current
            } else {
                let mut current = self.tail;
                for _ in index + 1..self.len {
                    current = current.and_then(|ptr| ptr.as_ref().prev);
                }
                current
            }
        };
        found.ok_or(ListError::IndexOutOfRange {
            index,
            len: self.len,
        })
    }

    /// # Safety
    ///
    /// `prev` must be linked into this list and must not be the tail; `node`
    /// must be unlinked and owned by nobody else.
    unsafe fn link_after(&mut self, prev: NodePtr<T>, node: NodePtr<T>) {
        unsafe {
            let next = (*prev.as_ptr()).next;
            debug_assert!(next.is_some());

            (*node.as_ptr()).prev = Some(prev);
            (*node.as_ptr()).next = next;
            (*prev.as_ptr()).next = Some(node);
            if let Some(next) = next {
                (*next.as_ptr()).prev = Some(node);
            }
        }
        self.len += 1;
    }

    /// Detach a member cell and hand ownership to a [`Node`].
    ///
    /// # Safety
    ///
    /// `ptr` must be linked into this list.
    unsafe fn unlink(&mut self, ptr: NodePtr<T>) -> Node<T> {
        unsafe {
            let prev = (*ptr.as_ptr()).prev;
            let next = (*ptr.as_ptr()).next;

            match prev {
                Some(prev) => (*prev.as_ptr()).next = next,
                None => self.head = next,
            }
            match next {
                Some(next) => (*next.as_ptr()).prev = prev,
                None => self.tail = prev,
            }

            (*ptr.as_ptr()).prev = None;
            (*ptr.as_ptr()).next = None;
            self.len -= 1;

            Node::from_raw(ptr)
        }
    }
}

impl<T> Drop for DoublyLinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for DoublyLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DoublyLinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone> Clone for DoublyLinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for DoublyLinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for DoublyLinkedList<T> {}

impl<T> FromIterator<T> for DoublyLinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = DoublyLinkedList::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for DoublyLinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T> IntoIterator for DoublyLinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a DoublyLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DoublyLinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

// Thread safety: the list uniquely owns its cells, like Box<T>.
unsafe impl<T: Send> Send for DoublyLinkedList<T> {}
unsafe impl<T: Sync> Sync for DoublyLinkedList<T> {}

// ============================================================================
// Iterators
// ============================================================================

/// Borrowing iterator over a [`DoublyLinkedList`].
pub struct Iter<'a, T> {
    head: Option<NodePtr<T>>,
    tail: Option<NodePtr<T>>,
    len: usize,
    _marker: PhantomData<&'a ListNode<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|ptr| {
            // SAFETY: the list is borrowed for 'a and ptr is one of its cells
            let node = unsafe { &*ptr.as_ptr() };
            self.len -= 1;
            self.head = node.next;
            &node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|ptr| {
            // SAFETY: the list is borrowed for 'a and ptr is one of its cells
            let node = unsafe { &*ptr.as_ptr() };
            self.len -= 1;
            self.tail = node.prev;
            &node.value
        })
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

/// Mutably borrowing iterator over a [`DoublyLinkedList`].
pub struct IterMut<'a, T> {
    head: Option<NodePtr<T>>,
    tail: Option<NodePtr<T>>,
    len: usize,
    _marker: PhantomData<&'a mut ListNode<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.head.map(|ptr| {
            // SAFETY: the list is mutably borrowed for 'a; `len` guarantees
            // each cell is yielded at most once.
            let node = unsafe { &mut *ptr.as_ptr() };
            self.len -= 1;
            self.head = node.next;
            &mut node.value
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.tail.map(|ptr| {
            // SAFETY: see `next`
            let node = unsafe { &mut *ptr.as_ptr() };
            self.len -= 1;
            self.tail = node.prev;
            &mut node.value
        })
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning iterator over a [`DoublyLinkedList`].
pub struct IntoIter<T> {
    list: DoublyLinkedList<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.list.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

// ============================================================================
// Tests
// ============================================================================
