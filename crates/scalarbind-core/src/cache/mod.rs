//! Bounded concurrent cache.
//!
//! Capacity-triggered full clear, not LRU: when a `put` sees the cache at
//! capacity it drops every entry, then inserts. Reads never mutate.


use dashmap::DashMap;
use parking_lot::Mutex;
use std::{borrow::Borrow, hash::Hash};

///
/// BoundedCache
///
/// `get` and the underlying map operations are lock-free with respect to
/// each other; the only lock guards the clear decision.
///

#[derive(Debug)]
pub struct BoundedCache<K, V>
where
    K: Eq + Hash,
{
    map: DashMap<K, V>,
    max_entries: usize,
    clear_guard: Mutex<()>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash,
{
    /// `max_entries` is clamped to at least one.
    #[must_use]
    pub fn new(initial_entries: usize, max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);

        Self {
            map: DashMap::with_capacity(initial_entries.min(max_entries)),
            max_entries,
            clear_guard: Mutex::new(()),
        }
    }

    /// Insert, first clearing everything if the cache is at capacity.
    /// Returns the previous value for `key`, if it survived.
    pub fn put(&self, key: K, value: V) -> Option<V> {
        if self.map.len() >= self.max_entries {
            let _guard = self.clear_guard.lock();

            // another writer may have cleared while we waited
            if self.map.len() >= self.max_entries {
                log::debug!(
                    "bounded cache reached {} entries, clearing",
                    self.max_entries
                );
                self.map.clear();
            }
        }

        self.map.insert(key, value)
    }

    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        V: Clone,
    {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.map.contains_key(key)
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&self) {
        self.map.clear();
    }

    #[must_use]
    pub const fn max_entries(&self) -> usize {
        self.max_entries
    }
}
