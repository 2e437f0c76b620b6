//! Data structures of the list engine.
//!
//! # Organization
//!
//! - [`node`] - Link-list cells, detached nodes and node handles
//! - [`doubly_linked_list`] - The unsynchronized engine
//! - [`safe_list`] - Shared `&self` API and the node-handle capability

pub mod doubly_linked_list;
pub mod node;
pub mod safe_list;

pub use doubly_linked_list::{DoublyLinkedList, IntoIter, Iter, IterMut};
pub use node::{Node, NodeHandle};
pub use safe_list::{LruList, SafeList};
