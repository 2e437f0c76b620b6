//! Façade collections.
//!
//! Each façade holds a shared reference to one [`SafeList`](crate::SafeList)
//! and translates its own vocabulary into list calls. Façades keep no state
//! of their own, so several of them can view the same list.

pub mod deque;
pub mod stack;

pub use deque::Deque;
pub use stack::Stack;
