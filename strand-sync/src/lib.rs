//! Synchronized implementations of the strand list traits.
//!
//! This crate provides `LockedList`, an implementation of `SafeList` and
//! `LruList` that guards a `DoublyLinkedList` with a `parking_lot` reader/writer
//! lock, and `LruCache`, a fixed-capacity cache built on its node handles.
//!
//! # Usage
//!
//! ```
//! use strand_core::{Deque, SafeList};
//! use strand_sync::LockedList;
//!
//! let deque: Deque<i32, LockedList<i32>> = Deque::new();
//! deque.push_back(1);
//! deque.push_front(0);
//! assert_eq!(deque.pop_back(), Some(1));
//! ```

pub mod locked_list;
pub mod locked_list_iter;
pub mod lru_cache;

pub use locked_list::LockedList;
pub use locked_list_iter::LockedListIter;
pub use lru_cache::LruCache;
