//! A single independently locked shard.

use parking_lot::RwLock;
use std::collections::HashMap;

/// A single shard containing a portion of the key-value pairs.
///
/// The lock guards this shard's map only. Callers never hold two shard locks
/// at once, so there is no cross-shard lock ordering to get wrong.
pub struct Shard<V> {
    data: RwLock<HashMap<String, V>>,
}

impl<V> Default for Shard<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> std::fmt::Debug for Shard<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shard").field("entries", &self.len()).finish()
    }
}

impl<V> Shard<V> {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Returns a clone of the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.data.read().get(key).cloned()
    }

    /// Inserts or overwrites `key`, returning the previous value.
    pub fn insert(&self, key: String, value: V) -> Option<V> {
        self.data.write().insert(key, value)
    }

    pub fn remove(&self, key: &str) -> Option<V> {
        self.data.write().remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.read().contains_key(key)
    }

    /// Copies out every key under a single read lock.
    pub fn keys(&self) -> Vec<String> {
        self.data.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Empties the shard, returning how many entries were dropped.
    pub fn clear(&self) -> usize {
        let mut data = self.data.write();
        let removed = data.len();
        data.clear();
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let shard = Shard::new();
        assert_eq!(shard.insert("key".to_string(), 1), None);
        assert_eq!(shard.insert("key".to_string(), 2), Some(1));
        assert_eq!(shard.get("key"), Some(2));
        assert_eq!(shard.get("missing"), None);
    }

    #[test]
    fn test_keys_and_clear() {
        let shard = Shard::new();
        shard.insert("a".to_string(), ());
        shard.insert("b".to_string(), ());

        let mut keys = shard.keys();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);

        assert_eq!(shard.clear(), 2);
        assert!(shard.is_empty());
    }

    #[test]
    fn test_remove() {
        let shard = Shard::new();
        shard.insert("key".to_string(), "value");
        assert!(shard.contains_key("key"));
        assert_eq!(shard.remove("key"), Some("value"));
        assert!(!shard.contains_key("key"));
        assert_eq!(shard.remove("key"), None);
    }
}
