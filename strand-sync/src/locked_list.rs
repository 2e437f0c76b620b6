use std::fmt;

use parking_lot::RwLock;
use strand_core::{DoublyLinkedList, LruList, Node, NodeHandle, SafeList};

use crate::locked_list_iter::LockedListIter;

/// A [`DoublyLinkedList`] behind a single reader/writer lock.
///
/// Mutations (`append`, `pop`, `insert`, `set`, the node variants, ...) take
/// the write lock for their whole execution; reads (`get`, `get_node`, `len`,
/// `is_empty`, traversal) take the read lock. Guards are scoped, so every exit
/// path releases the lock. There are no retries and no timeouts: a blocked
/// caller waits until the lock is available.
///
/// The lock is `parking_lot::RwLock`, which is task-fair: a queued writer
/// stops new readers from entering. Do not call back into the same list from
/// inside [`for_each`](SafeList::for_each) or while holding a
/// [`LockedListIter`].
///
/// # Example
///
/// ```
/// use strand_core::SafeList;
/// use strand_sync::LockedList;
///
/// let list = LockedList::new();
/// list.append(1);
/// list.append(3);
/// assert!(list.insert(1, 2));
/// assert!(!list.insert(9, 4));
///
/// assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
/// assert_eq!(list.pop(), Some(3));
/// ```
pub struct LockedList<T> {
    inner: RwLock<DoublyLinkedList<T>>,
}

impl<T> LockedList<T> {
    pub fn new() -> Self {
        Self::from_list(DoublyLinkedList::new())
    }

    pub fn from_list(list: DoublyLinkedList<T>) -> Self {
        LockedList {
            inner: RwLock::new(list),
        }
    }

    pub fn into_inner(self) -> DoublyLinkedList<T> {
        self.inner.into_inner()
    }

    /// Verify the structural invariants under the read lock.
    pub fn check_invariants(&self) -> bool {
        self.inner.read().check_invariants()
    }
}

impl<T: Clone> SafeList<T> for LockedList<T> {
    type Iter<'a>
        = LockedListIter<'a, T>
    where
        Self: 'a,
        T: 'a;

    fn append(&self, value: T) -> bool {
        self.inner.write().append(value)
    }

    fn prepend(&self, value: T) -> bool {
        self.inner.write().prepend(value)
    }

    fn pop(&self) -> Option<T> {
        self.inner.write().pop()
    }

    fn pop_first(&self) -> Option<T> {
        self.inner.write().pop_first()
    }

    fn get(&self, index: usize) -> Option<T> {
        self.inner.read().get(index).cloned()
    }

    fn get_and_apply<F, R>(&self, index: usize, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.read().get(index).map(f)
    }

    fn first(&self) -> Option<T> {
        self.inner.read().first().cloned()
    }

    fn last(&self) -> Option<T> {
        self.inner.read().last().cloned()
    }

    fn set(&self, index: usize, value: T) -> bool {
        self.inner.write().set(index, value)
    }

    fn insert(&self, index: usize, value: T) -> bool {
        self.inner.write().insert(index, value)
    }

    fn delete(&self, index: usize) -> bool {
        self.inner.write().delete(index)
    }

    fn remove(&self, index: usize) -> Option<T> {
        self.inner.write().remove(index)
    }

    fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    fn len(&self) -> usize {
        self.inner.read().len()
    }

    fn clear(&self) {
        // Detach under the lock, drop the values after releasing it.
        let detached = std::mem::take(&mut *self.inner.write());
        drop(detached);
    }

    fn iter(&self) -> Self::Iter<'_> {
        LockedListIter::new(self.inner.read())
    }

    fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T),
    {
        let list = self.inner.read();
        for value in list.iter() {
            f(value);
        }
    }

    fn to_vec(&self) -> Vec<T> {
        self.inner.read().iter().cloned().collect()
    }
}

impl<T: Clone> LruList<T> for LockedList<T> {
    fn append_node(&self, node: Node<T>) -> bool {
        self.inner.write().append_node(node)
    }

    fn prepend_node(&self, node: Node<T>) -> bool {
        self.inner.write().prepend_node(node)
    }

    fn pop_node(&self) -> Option<Node<T>> {
        self.inner.write().pop_node()
    }

    fn pop_first_node(&self) -> Option<Node<T>> {
        self.inner.write().pop_first_node()
    }

    fn get_node(&self, index: usize) -> Option<NodeHandle<T>> {
        self.inner.read().get_node(index)
    }

    unsafe fn unlink_node(&self, node: NodeHandle<T>) -> Option<Node<T>> {
        // SAFETY: forwarded caller contract
        unsafe { self.inner.write().unlink_node(node) }
    }

    unsafe fn apply_on_node<F, R>(&self, node: NodeHandle<T>, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        let list = self.inner.read();
        // SAFETY: caller guarantees node is linked into this list; the read
        // lock keeps it linked while `f` runs.
        f(unsafe { list.node_value(node) })
    }

    unsafe fn update_node<F, R>(&self, node: NodeHandle<T>, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut list = self.inner.write();
        // SAFETY: caller guarantees node is linked into this list
        f(unsafe { list.node_value_mut(node) })
    }
}

impl<T> Default for LockedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<DoublyLinkedList<T>> for LockedList<T> {
    fn from(list: DoublyLinkedList<T>) -> Self {
        Self::from_list(list)
    }
}

impl<T> FromIterator<T> for LockedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_list(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for LockedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LockedList").field(&*self.inner.read()).finish()
    }
}
