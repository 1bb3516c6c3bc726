use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use dsd_ai::InventoryInsight;
use dsd_core::ItemId;

/// Key/value store abstraction for disposable, process-local read models.
pub trait KeyedStore<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;
    /// Insert or replace (last write wins).
    fn upsert(&self, key: K, value: V);
    /// All values, ordered by key.
    fn list(&self) -> Vec<V>;
}

impl<K, V, S> KeyedStore<K, V> for Arc<S>
where
    S: KeyedStore<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> Option<V> {
        (**self).get(key)
    }

    fn upsert(&self, key: K, value: V) {
        (**self).upsert(key, value)
    }

    fn list(&self) -> Vec<V> {
        (**self).list()
    }
}

/// In-memory store for tests/dev.
#[derive(Debug)]
pub struct InMemoryStore<K, V> {
    inner: RwLock<BTreeMap<K, V>>,
}

impl<K, V> InMemoryStore<K, V> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<K, V> Default for InMemoryStore<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> KeyedStore<K, V> for InMemoryStore<K, V>
where
    K: Clone + Ord + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().ok()?;
        map.get(key).cloned()
    }

    fn upsert(&self, key: K, value: V) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key, value);
        }
    }

    fn list(&self) -> Vec<V> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }
}

/// Restock insights computed this session, keyed by item.
pub type InsightStore = InMemoryStore<ItemId, InventoryInsight>;
