//! Utility extensions shared by both hash map implementations.

use std::hash::{BuildHasher, Hash};

use crate::{ChainedHashMap, ProbingHashMap};

/// Extension trait providing clone-out accessors for map contents.
pub trait HashMapExtensions<K, V> {
    /// Returns the keys of the hash map as a `Vec`.
    fn keys(&self) -> Vec<K>;

    /// Returns the values of the hash map as a `Vec`.
    fn values(&self) -> Vec<V>;

    /// Returns every key-value pair as a `Vec` of tuples, in table order.
    fn entries(&self) -> Vec<(K, V)>;
}

impl<K, V, S> HashMapExtensions<K, V> for ChainedHashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn keys(&self) -> Vec<K> {
        self.iter().map(|(key, _)| key.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, value)| value.clone()).collect()
    }

    fn entries(&self) -> Vec<(K, V)> {
        self.iter().map(|(key, value)| (key.clone(), value.clone())).collect()
    }
}

impl<K, V, S> HashMapExtensions<K, V> for ProbingHashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn keys(&self) -> Vec<K> {
        self.iter().map(|(key, _)| key.clone()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, value)| value.clone()).collect()
    }

    fn entries(&self) -> Vec<(K, V)> {
        self.iter().map(|(key, value)| (key.clone(), value.clone())).collect()
    }
}
