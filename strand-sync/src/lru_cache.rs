use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;

use parking_lot::Mutex;
use strand_core::{LruList, Node, NodeHandle, SafeList};
use tracing::debug;

use crate::locked_list::LockedList;

/// Fixed-capacity least-recently-used cache built on the node-handle
/// capability of [`LruList`].
///
/// ```text
///  index: HashMap<K, NodeHandle>        recency list (LruList<(K, V)>)
///
///    "a" ────────────────────────────►  ┌───┐   ┌───┐   ┌───┐
///    "b" ──────────────────────────────►│ a │──►│ c │──►│ b │
///    "c" ───────────────────────────────┴───┴──►└───┘   └───┘
///                                       front            back
///                                  (evicted first)  (most recent)
/// ```
///
/// A hit relinks the entry's node at the back in O(1) (`unlink_node` +
/// `append_node`, no allocation, same handle). Overflow evicts the front
/// with `pop_first_node`.
///
/// Every cache operation holds the index mutex for its whole duration, so
/// the index and the list always agree: each handle in the index addresses a
/// node that is linked into `list`.
///
/// # Example
///
/// ```
/// use std::num::NonZeroUsize;
/// use strand_sync::LruCache;
///
/// let cache: LruCache<&str, i32> = LruCache::new(NonZeroUsize::new(2).unwrap());
/// cache.put("a", 1);
/// cache.put("b", 2);
/// assert_eq!(cache.get(&"a"), Some(1)); // "a" is now most recent
/// cache.put("c", 3);                    // evicts "b"
/// assert_eq!(cache.get(&"b"), None);
/// assert_eq!(cache.len(), 2);
/// ```
pub struct LruCache<K, V, L = LockedList<(K, V)>>
where
    K: Eq + Hash + Clone,
    V: Clone,
    L: LruList<(K, V)>,
{
    list: L,
    index: Mutex<HashMap<K, NodeHandle<(K, V)>>>,
    capacity: NonZeroUsize,
}

impl<K, V, L> LruCache<K, V, L>
where
    K: Eq + Hash + Clone,
    V: Clone,
    L: LruList<(K, V)>,
{
    pub fn new(capacity: NonZeroUsize) -> Self
    where
        L: Default,
    {
        Self::with_list(capacity, L::default())
    }

    /// Build a cache on a caller-provided list.
    ///
    /// Existing entries are replayed front to back as if `put` in that order:
    /// a repeated key keeps its last value, and the oldest entries are evicted
    /// until at most `capacity` remain.
    pub fn with_list(capacity: NonZeroUsize, list: L) -> Self {
        let mut pending = Vec::with_capacity(list.len());
        while let Some(node) = list.pop_first_node() {
            pending.push(node);
        }

        let cache = LruCache {
            list,
            index: Mutex::new(HashMap::with_capacity(capacity.get())),
            capacity,
        };
        for node in pending {
            let (key, value) = node.into_value();
            cache.put(key, value);
        }
        cache
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.index.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.lock().is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.lock().contains_key(key)
    }

    /// Look up `key` and mark it most recently used.
    pub fn get(&self, key: &K) -> Option<V> {
        let index = self.index.lock();
        let handle = *index.get(key)?;
        // SAFETY: indexed handles are linked into `list` while the index
        // mutex is held.
        let node = unsafe { self.list.unlink_node(handle) }?;
        let value = node.value().1.clone();
        self.list.append_node(node);
        Some(value)
    }

    /// Look up `key` without touching its recency.
    pub fn peek(&self, key: &K) -> Option<V> {
        let index = self.index.lock();
        let handle = *index.get(key)?;
        // SAFETY: see `get`
        Some(unsafe { self.list.apply_on_node(handle, |(_, value)| value.clone()) })
    }

    /// Insert or replace `key`, marking it most recently used. Returns the
    /// previous value for `key`, if any. Evicts the least recently used
    /// entry when the cache is full.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        let mut index = self.index.lock();

        if let Some(&handle) = index.get(&key) {
            // SAFETY: see `get`
            if let Some(mut node) = unsafe { self.list.unlink_node(handle) } {
                let previous = std::mem::replace(&mut node.value_mut().1, value);
                self.list.append_node(node);
                return Some(previous);
            }
        }

        if index.len() >= self.capacity.get() {
            if let Some(evicted) = self.list.pop_first_node() {
                let (evicted_key, _) = evicted.into_value();
                index.remove(&evicted_key);
                debug!(capacity = self.capacity.get(), "evicted least recently used entry");
            }
        }

        let node = Node::new((key.clone(), value));
        index.insert(key, node.handle());
        self.list.append_node(node);
        None
    }

    /// Remove `key` and return its value.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut index = self.index.lock();
        let handle = index.remove(key)?;
        // SAFETY: see `get`
        let node = unsafe { self.list.unlink_node(handle) }?;
        Some(node.into_value().1)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut index = self.index.lock();
        index.clear();
        self.list.clear();
    }

    /// Keys from least to most recently used.
    pub fn keys(&self) -> Vec<K> {
        let _index = self.index.lock();
        let mut keys = Vec::new();
        self.list.for_each(|(key, _)| keys.push(key.clone()));
        keys
    }
}

impl<K, V, L> fmt::Debug for LruCache<K, V, L>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
    L: LruList<(K, V)>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("capacity", &self.capacity)
            .field("keys", &self.keys())
            .finish()
    }
}
