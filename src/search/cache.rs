//! Bounded least-recently-used map
//!
//! Entries live in a slab and are threaded on a doubly linked list by index,
//! most recent at the head. Lookups go through an `FxHashMap` from key to
//! slot, so `get` and `insert` are O(1) and eviction order depends only on
//! the sequence of calls.

use rustc_hash::FxHashMap;
use std::hash::Hash;

const NIL: usize = usize::MAX;

struct Slot<K, V> {
    key: K,
    value: V,
    prev: usize,
    next: usize,
}

/// Fixed-capacity map that evicts the least recently used entry
pub struct LruCache<K, V> {
    capacity: usize,
    map: FxHashMap<K, usize>,
    slots: Vec<Slot<K, V>>,
    head: usize,
    tail: usize,
}

impl<K: Clone + Eq + Hash, V: Clone> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            map: FxHashMap::default(),
            slots: Vec::with_capacity(capacity),
            head: NIL,
            tail: NIL,
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Look up `key`, marking it most recently used on a hit
    pub fn get(&mut self, key: &K) -> Option<V> {
        let index = *self.map.get(key)?;
        self.detach(index);
        self.push_front(index);
        Some(self.slots[index].value.clone())
    }

    /// Check for `key` without touching recency
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Insert or overwrite `key`, making it most recently used
    ///
    /// Returns the evicted key when the cache was full.
    pub fn insert(&mut self, key: K, value: V) -> Option<K> {
        if let Some(&index) = self.map.get(&key) {
            self.slots[index].value = value;
            self.detach(index);
            self.push_front(index);
            return None;
        }

        if self.slots.len() < self.capacity {
            let index = self.slots.len();
            self.slots.push(Slot {
                key: key.clone(),
                value,
                prev: NIL,
                next: NIL,
            });
            self.map.insert(key, index);
            self.push_front(index);
            return None;
        }

        // Reuse the tail slot for the new entry
        let index = self.tail;
        self.detach(index);
        let evicted = std::mem::replace(&mut self.slots[index].key, key.clone());
        self.slots[index].value = value;
        self.map.remove(&evicted);
        self.map.insert(key, index);
        self.push_front(index);
        Some(evicted)
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        self.map.clear();
        self.slots.clear();
        self.head = NIL;
        self.tail = NIL;
    }

    /// Keys from most to least recently used
    pub fn keys_by_recency(&self) -> Vec<K> {
        let mut keys = Vec::with_capacity(self.len());
        let mut index = self.head;
        while index != NIL {
            keys.push(self.slots[index].key.clone());
            index = self.slots[index].next;
        }
        keys
    }

    fn detach(&mut self, index: usize) {
        let (prev, next) = (self.slots[index].prev, self.slots[index].next);

        if prev == NIL {
            self.head = next;
        } else {
            self.slots[prev].next = next;
        }

        if next == NIL {
            self.tail = prev;
        } else {
            self.slots[next].prev = prev;
        }

        self.slots[index].prev = NIL;
        self.slots[index].next = NIL;
    }

    fn push_front(&mut self, index: usize) {
        self.slots[index].next = self.head;
        self.slots[index].prev = NIL;

        if self.head != NIL {
            self.slots[self.head].prev = index;
        }
        self.head = index;

        if self.tail == NIL {
            self.tail = index;
        }
    }
}
