use crate::data_structures::node::{Node, NodeHandle};

/// Shared, thread-safe list API.
///
/// This trait is the surface façade collections consume. It mirrors the
/// operations of [`DoublyLinkedList`](crate::DoublyLinkedList) but takes
/// `&self`, so implementors provide their own synchronization.
///
/// # Design
///
/// ```text
/// Stack / Deque / LruCache         ← façades, no state of their own
///    ↓ use
/// SafeList / LruList (this trait)  ← shared API, &self
///    ↓ implemented by
/// LockedList (strand-sync)         ← reader/writer lock per list
///    ↓ wraps
/// DoublyLinkedList                 ← unsynchronized engine, &mut self
/// ```
///
/// Values leave the list by clone (`get`, `iter`) because a reference cannot
/// outlive the lock that protects it. Use [`get_and_apply`](Self::get_and_apply)
/// or [`for_each`](Self::for_each) to inspect in place.
///
/// # Example
///
/// ```rust,ignore
/// use strand_core::SafeList;
/// use strand_sync::LockedList;
///
/// let list = LockedList::new();
/// list.append(1);
/// list.append(3);
/// assert!(list.insert(1, 2));
///
/// assert_eq!(list.get(1), Some(2));
/// assert_eq!(list.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
/// ```
///
pub trait SafeList<T: Clone> {
    /// Lazy head-to-tail traversal.
    ///
    /// Implementations that lock must hold the read lock for the lifetime of
    /// the iterator and release it when the iterator is drained or dropped.
    type Iter<'a>: Iterator<Item = T>
    where
        Self: 'a,
        T: 'a;

    fn append(&self, value: T) -> bool;

    fn prepend(&self, value: T) -> bool;

    /// Detach the tail and return its value, `None` when empty.
    fn pop(&self) -> Option<T>;

    /// Detach the head and return its value, `None` when empty.
    fn pop_first(&self) -> Option<T>;

    /// Clone of the value at `index`, `None` when out of range.
    fn get(&self, index: usize) -> Option<T>;

    /// Apply `f` to the value at `index` without cloning it.
    fn get_and_apply<F, R>(&self, index: usize, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R;

    fn first(&self) -> Option<T>;

    fn last(&self) -> Option<T>;

    fn set(&self, index: usize, value: T) -> bool;

    fn insert(&self, index: usize, value: T) -> bool;

    fn delete(&self, index: usize) -> bool;

    fn remove(&self, index: usize) -> Option<T>;

    fn is_empty(&self) -> bool;

    fn len(&self) -> usize;

    fn clear(&self);

    fn iter(&self) -> Self::Iter<'_>;

    /// Visit every value head to tail while holding the read lock once.
    ///
    /// `f` must not call back into the same list.
    fn for_each<F>(&self, f: F)
    where
        F: FnMut(&T);

    fn to_vec(&self) -> Vec<T> {
        let mut result = Vec::new();
        self.for_each(|value| result.push(value.clone()));
        result
    }
}

/// Node-handle capability for cache-eviction structures.
///
/// Given a [`NodeHandle`] obtained from a node before insertion (or from
/// [`get_node`](Self::get_node)), callers can later detach and relink that
/// exact node in O(1), e.g. move-to-back on access and evict-from-front on
/// overflow.
///
/// # Caller contract
///
/// Every method taking a handle is `unsafe`. The handle must address a live
/// node that is either linked into this list or detached and owned by a
/// [`Node`]. A node linked into a *different* list cannot be detected and must
/// never be passed in. Nodes are never shared between lists.
///
pub trait LruList<T: Clone>: SafeList<T> {
    fn append_node(&self, node: Node<T>) -> bool;

    fn prepend_node(&self, node: Node<T>) -> bool;

    fn pop_node(&self) -> Option<Node<T>>;

    fn pop_first_node(&self) -> Option<Node<T>>;

    fn get_node(&self, index: usize) -> Option<NodeHandle<T>>;

    /// Detach `node` and return it for relinking. `None` when the node is
    /// neither head nor tail and has no links (foreign or already removed).
    ///
    /// # Safety
    ///
    /// See the trait-level caller contract.
    unsafe fn unlink_node(&self, node: NodeHandle<T>) -> Option<Node<T>>;

    /// Detach and drop `node`.
    ///
    /// # Safety
    ///
    /// See the trait-level caller contract.
    unsafe fn delete_node(&self, node: NodeHandle<T>) -> bool {
        unsafe { self.unlink_node(node) }.is_some()
    }

    /// Apply `f` to the value of a linked node under the read lock.
    ///
    /// # Safety
    ///
    /// `node` must be linked into this list.
    unsafe fn apply_on_node<F, R>(&self, node: NodeHandle<T>, f: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Apply `f` to the value of a linked node under the write lock.
    ///
    /// # Safety
    ///
    /// `node` must be linked into this list.
    unsafe fn update_node<F, R>(&self, node: NodeHandle<T>, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}
