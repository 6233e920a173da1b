//! Memoising icon cache.
//!
//! Decoding icons is the slowest part of showing the overlay, so every
//! decoded image is kept for the lifetime of the process.  Failed lookups
//! are remembered as well: a missing icon file or an app class the icon
//! theme does not know is looked up exactly once.
//!
//! Values are expected to be cheap clones of reference-counted toolkit
//! objects (textures, paintables).  [`IconCache::clear`] drops every
//! reference the cache holds.

use std::collections::HashMap;
use std::hash::Hash;

/// `key -> Option<value>` memoisation table.
///
/// `Some(v)` is a successful load, `None` a remembered miss.
#[derive(Debug)]
pub struct IconCache<K, V> {
    entries: HashMap<K, Option<V>>,
}

impl<K, V> Default for IconCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V: Clone> IconCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached value for `key`, running `loader` on first use.
    ///
    /// The loader's result is stored whether or not it produced a value.
    pub fn get_or_load<F>(&mut self, key: K, loader: F) -> Option<V>
    where
        F: FnOnce(&K) -> Option<V>,
    {
        if let Some(hit) = self.entries.get(&key) {
            return hit.clone();
        }
        let value = loader(&key);
        self.entries.insert(key, value.clone());
        value
    }

    /// Look up a value without loading.
    ///
    /// Returns `None` both for unknown keys and for remembered misses; use
    /// [`contains`](Self::contains) to tell them apart.
    pub fn get(&self, key: &K) -> Option<V> {
        self.entries.get(key).cloned().flatten()
    }

    /// Store a value (or a miss) directly.
    pub fn insert(&mut self, key: K, value: Option<V>) {
        self.entries.insert(key, value);
    }

    /// Whether `key` has been looked up before.
    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of remembered keys, hits and misses alike.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of keys that resolved to a value.
    pub fn loaded(&self) -> usize {
        self.entries.values().filter(|v| v.is_some()).count()
    }

    /// Drop every entry and the references they hold.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn loads_once_per_key() {
        let mut cache = IconCache::new();
        let calls = Cell::new(0);
        let load = |k: &u8| {
            calls.set(calls.get() + 1);
            Some(*k as u32 * 10)
        };
        assert_eq!(cache.get_or_load(3, load), Some(30));
        assert_eq!(cache.get_or_load(3, load), Some(30));
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.get_or_load(4, load), Some(40));
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn misses_are_remembered() {
        let mut cache: IconCache<String, u32> = IconCache::new();
        let calls = Cell::new(0);
        for _ in 0..3 {
            let v = cache.get_or_load("unknown-app".to_string(), |_| {
                calls.set(calls.get() + 1);
                None
            });
            assert!(v.is_none());
        }
        assert_eq!(calls.get(), 1);
        assert!(cache.contains(&"unknown-app".to_string()));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.loaded(), 0);
    }

    #[test]
    fn get_does_not_load() {
        let mut cache: IconCache<u8, u32> = IconCache::new();
        assert_eq!(cache.get(&1), None);
        assert!(!cache.contains(&1));
        cache.insert(1, Some(7));
        assert_eq!(cache.get(&1), Some(7));
    }

    #[test]
    fn clear_releases_references() {
        let image = Rc::new("pixels");
        let mut cache = IconCache::new();
        cache.insert(1u8, Some(image.clone()));
        cache.insert(2u8, Some(image.clone()));
        let _ = cache.get_or_load(3u8, |_| Some(image.clone()));
        assert_eq!(Rc::strong_count(&image), 4);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(Rc::strong_count(&image), 1);
    }

    #[test]
    fn hits_hand_out_shared_references() {
        let mut cache = IconCache::new();
        let first = cache.get_or_load(1u8, |_| Some(Rc::new(5))).unwrap();
        let second = cache.get_or_load(1u8, |_| Some(Rc::new(6))).unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        drop(first);
        drop(second);
        // Only the cache's own reference remains.
        assert_eq!(Rc::strong_count(&cache.get(&1).unwrap()), 2);
    }
}
