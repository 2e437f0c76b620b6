use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::data_structures::SafeList;

/// Double-ended queue over a shared list.
///
/// `back` is the list tail, `front` is the list head. The `append`/`prepend`/
/// `pop`/`pop_first` names of the underlying list are kept as aliases.
pub struct Deque<T, L>
where
    T: Clone,
    L: SafeList<T>,
{
    list: Arc<L>,
    _phantom: PhantomData<T>,
}

impl<T, L> Deque<T, L>
where
    T: Clone,
    L: SafeList<T>,
{
    pub fn new() -> Self
    where
        L: Default,
    {
        Self::from_shared(Arc::new(L::default()))
    }

    /// View an existing list as a deque.
    pub fn from_shared(list: Arc<L>) -> Self {
        Deque {
            list,
            _phantom: PhantomData,
        }
    }

    pub fn shared(&self) -> &Arc<L> {
        &self.list
    }

    pub fn push_back(&self, value: T) {
        self.list.append(value);
    }

    pub fn push_front(&self, value: T) {
        self.list.prepend(value);
    }

    pub fn pop_back(&self) -> Option<T> {
        self.list.pop()
    }

    pub fn pop_front(&self) -> Option<T> {
        self.list.pop_first()
    }

    pub fn back(&self) -> Option<T> {
        self.list.last()
    }

    pub fn front(&self) -> Option<T> {
        self.list.first()
    }

    #[inline]
    pub fn append(&self, value: T) -> bool {
        self.list.append(value)
    }

    #[inline]
    pub fn prepend(&self, value: T) -> bool {
        self.list.prepend(value)
    }

    #[inline]
    pub fn pop(&self) -> Option<T> {
        self.pop_back()
    }

    #[inline]
    pub fn pop_first(&self) -> Option<T> {
        self.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }
}

impl<T, L> Default for Deque<T, L>
where
    T: Clone,
    L: SafeList<T> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, L> Clone for Deque<T, L>
where
    T: Clone,
    L: SafeList<T>,
{
    fn clone(&self) -> Self {
        Self::from_shared(Arc::clone(&self.list))
    }
}

impl<T, L> fmt::Debug for Deque<T, L>
where
    T: Clone + fmt::Debug,
    L: SafeList<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deque")
            .field("items", &self.list.to_vec())
            .finish()
    }
}
