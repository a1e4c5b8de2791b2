//! Keyed store of live sessions with an explicit lifecycle.
//!
//! Entries are created once, looked up or mutated in place while they run, and leave the
//! registry either by being finalized by their owner or by being expired by a sweep.

use std::{
    collections::HashMap,
    hash::Hash,
    sync::{Arc, Mutex, MutexGuard},
};

/// Shared map of live sessions. Cloning shares the underlying map.
///
/// The lock is never held across an await point; every method completes synchronously.
pub struct Registry<K, V> {
    entries: Arc<Mutex<HashMap<K, V>>>,
}

impl<K, V> Clone for Registry<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, V> Default for Registry<K, V> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<K: Eq + Hash + Clone, V> Registry<K, V> {
    fn entries(&self) -> MutexGuard<'_, HashMap<K, V>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Registers a new session.
    ///
    /// # Returns
    /// - `true` - Registered
    /// - `false` - A session with this key already exists and was left untouched
    pub fn create(&self, key: K, value: V) -> bool {
        let mut entries = self.entries();
        if entries.contains_key(&key) {
            return false;
        }
        entries.insert(key, value);
        true
    }

    /// Copy of a session.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.entries().get(key).cloned()
    }

    /// Runs `f` on a session in place.
    ///
    /// # Returns
    /// - `Some(R)` - Result of `f`
    /// - `None` - No session with this key
    pub fn with_mut<R>(&self, key: &K, f: impl FnOnce(&mut V) -> R) -> Option<R> {
        self.entries().get_mut(key).map(f)
    }

    /// Removes a session that ended normally and hands it back to the caller.
    pub fn finalize(&self, key: &K) -> Option<V> {
        self.entries().remove(key)
    }

    /// Removes every session matching `predicate`.
    ///
    /// # Returns
    /// - The removed sessions
    pub fn expire(&self, mut predicate: impl FnMut(&K, &V) -> bool) -> Vec<(K, V)> {
        let mut entries = self.entries();
        let expired: Vec<K> = entries
            .iter()
            .filter(|(key, value)| predicate(key, value))
            .map(|(key, _)| key.clone())
            .collect();

        expired
            .into_iter()
            .filter_map(|key| entries.remove(&key).map(|value| (key, value)))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_does_not_overwrite() {
        let registry = Registry::default();

        assert!(registry.create(1u64, "first"));
        assert!(!registry.create(1u64, "second"));
        assert_eq!(registry.get(&1), Some("first"));
    }

    #[test]
    fn with_mut_updates_in_place() {
        let registry = Registry::default();
        registry.create(1u64, 10u32);

        assert_eq!(registry.with_mut(&1, |v| { *v += 5; *v }), Some(15));
        assert_eq!(registry.with_mut(&2, |v| *v), None);
        assert_eq!(registry.get(&1), Some(15));
    }

    #[test]
    fn finalize_removes_entry() {
        let registry = Registry::default();
        registry.create(1u64, "poll");

        assert_eq!(registry.finalize(&1), Some("poll"));
        assert_eq!(registry.finalize(&1), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn expire_removes_matching_entries() {
        let registry = Registry::default();
        for key in 0u64..6 {
            registry.create(key, key * 10);
        }

        let mut expired = registry.expire(|_, value| *value >= 30);
        expired.sort();

        assert_eq!(expired, vec![(3, 30), (4, 40), (5, 50)]);
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(&2), Some(20));
    }

    #[test]
    fn clones_share_entries() {
        let registry = Registry::default();
        let clone = registry.clone();

        clone.create(7u64, ());

        assert_eq!(registry.get(&7), Some(()));
    }
}
