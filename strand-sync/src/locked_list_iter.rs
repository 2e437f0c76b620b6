//! Lock-holding traversal for LockedList.

use std::iter::FusedIterator;

use parking_lot::RwLockReadGuard;
use strand_core::{DoublyLinkedList, NodeHandle};
use tracing::trace;

// ============================================================================
// LockedListIter - head-to-tail traversal under the read lock
// ============================================================================

/// Iterator over [`LockedList`](crate::LockedList) values.
///
/// The iterator owns the list's read guard. The guard is released as soon as
/// the traversal reaches the tail, or when the iterator is dropped, whichever
/// happens first, so an abandoned traversal can never leave writers blocked.
///
/// Values are cloned out: a reference could not outlive the guard once it has
/// been released.
pub struct LockedListIter<'a, T> {
    guard: Option<RwLockReadGuard<'a, DoublyLinkedList<T>>>,
    current: Option<NodeHandle<T>>,
    remaining: usize,
}

impl<'a, T> LockedListIter<'a, T> {
    pub(crate) fn new(guard: RwLockReadGuard<'a, DoublyLinkedList<T>>) -> Self {
        let current = guard.first_handle();
        let remaining = guard.len();
        Self {
            // Nothing to walk: don't hold the lock at all.
            guard: current.map(|_| guard),
            current,
            remaining,
        }
    }

    /// Whether this iterator still holds the read lock.
    pub fn holds_lock(&self) -> bool {
        self.guard.is_some()
    }
}

impl<T: Clone> Iterator for LockedListIter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let node = self.current?;
        let list = self.guard.as_ref()?;

        // SAFETY: the read guard is held, so no writer can unlink `node`
        // between the moment it was reached and now.
        let (value, next) = unsafe { (list.node_value(node).clone(), list.next_handle(node)) };

        self.current = next;
        self.remaining -= 1;
        if next.is_none() {
            trace!("traversal reached tail, releasing read lock");
            self.guard = None;
        }
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Clone> ExactSizeIterator for LockedListIter<'_, T> {}

impl<T: Clone> FusedIterator for LockedListIter<'_, T> {}

impl<T> Drop for LockedListIter<'_, T> {
    fn drop(&mut self) {
        if self.guard.is_some() {
            trace!(remaining = self.remaining, "traversal abandoned, releasing read lock");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
