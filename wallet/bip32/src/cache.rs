use indexmap::IndexMap;
use std::{collections::hash_map::RandomState, hash::BuildHasher, hash::Hash};

pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Bounded least-recently-used map. Entries are kept in recency order, the
/// front of the map being the next eviction candidate.
#[derive(Clone, Debug)]
pub struct Cache<TKey: Hash + Eq, TData: Clone, S = RandomState> {
    // IndexMap keeps insertion order, which doubles as recency order.
    map: IndexMap<TKey, TData, S>,
    capacity: usize,
}

impl<TKey: Hash + Eq, TData: Clone, S: BuildHasher + Default> Cache<TKey, TData, S> {
    /// A zero capacity disables caching.
    pub fn new(capacity: usize) -> Self {
        Self { map: IndexMap::with_capacity_and_hasher(capacity, S::default()), capacity }
    }

    /// Returns a copy of the entry and marks it most recently used.
    pub fn get(&mut self, key: &TKey) -> Option<TData> {
        let (key, data) = self.map.shift_remove_entry(key)?;
        self.map.insert(key, data.clone());
        Some(data)
    }

    /// Inserts or refreshes an entry, evicting the least recently used one when full.
    pub fn insert(&mut self, key: TKey, data: TData) {
        if self.capacity == 0 {
            return;
        }
        if self.map.shift_remove(&key).is_none() && self.map.len() >= self.capacity {
            self.map.shift_remove_index(0);
        }
        self.map.insert(key, data);
    }

    /// Looks up without changing recency.
    pub fn contains_key(&self, key: &TKey) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}

impl<TKey: Hash + Eq, TData: Clone> Default for Cache<TKey, TData> {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
