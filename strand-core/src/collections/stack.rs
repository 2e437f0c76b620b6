use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::data_structures::SafeList;

/// LIFO stack over a shared list. The top of the stack is the list tail.
pub struct Stack<T, L>
where
    T: Clone,
    L: SafeList<T>,
{
    list: Arc<L>,
    _phantom: PhantomData<T>,
}

impl<T, L> Stack<T, L>
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

    /// View an existing list as a stack.
    pub fn from_shared(list: Arc<L>) -> Self {
        Stack {
            list,
            _phantom: PhantomData,
        }
    }

    pub fn shared(&self) -> &Arc<L> {
        &self.list
    }

    pub fn push(&self, value: T) {
        self.list.append(value);
    }

    pub fn pop(&self) -> Option<T> {
        self.list.pop()
    }

    /// Top of the stack without removing it.
    pub fn peek(&self) -> Option<T> {
        self.list.last()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }
}

impl<T, L> Default for Stack<T, L>
where
    T: Clone,
    L: SafeList<T> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, L> Clone for Stack<T, L>
where
    T: Clone,
    L: SafeList<T>,
{
    fn clone(&self) -> Self {
        Self::from_shared(Arc::clone(&self.list))
    }
}

impl<T, L> fmt::Debug for Stack<T, L>
where
    T: Clone + fmt::Debug,
    L: SafeList<T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("items", &self.list.to_vec())
            .finish()
    }
}
