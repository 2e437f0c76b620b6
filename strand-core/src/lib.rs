//! Doubly linked list engine with node handles.
//!
//! The crate is split the same way the list is used:
//!
//! - [`DoublyLinkedList`] - the unsynchronized core; all positional and
//!   node-handle mutations, `&mut self`
//! - [`SafeList`] / [`LruList`] - the shared `&self` API that synchronized
//!   wrappers implement (see `strand-sync`)
//! - [`collections`] - `Stack` and `Deque` façades over any `SafeList`
//! - [`common_tests`] - generic test suites for `SafeList` implementations

pub mod collections;
pub mod common_tests;
pub mod data_structures;
pub mod error;

pub use collections::{Deque, Stack};
pub use data_structures::{DoublyLinkedList, LruList, Node, NodeHandle, SafeList};
pub use error::{ListError, ListResult};
