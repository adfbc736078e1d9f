use std::{
    borrow::Borrow,
    hash::{BuildHasher, Hash},
    mem,
};

use crate::{DefaultHashBuilder, prime};

/// Number of slots requested when no capacity is given.
const DEFAULT_CAPACITY: usize = 11;

/// A slot holding a key-value pair and its deletion state
#[derive(Debug, Clone)]
struct Slot<K, V> {
    /// The key in the key-value pair
    key: K,
    /// The value associated with the key
    value: V,
    /// Tombstone flag: set once the entry has been removed. The slot stays
    /// occupied so probe sequences passing through it keep going.
    deleted: bool,
}

/// Allocates `capacity` never-used slots; shared by construction and resize.
fn alloc_slots<K, V>(capacity: usize) -> Vec<Option<Slot<K, V>>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || None);
    slots
}

/// A hash map resolving collisions by open addressing with quadratic probing.
///
/// Each slot holds at most one entry; a collision at the home slot `h` is
/// resolved by probing `(h + j²) mod capacity` for `j = 1, 2, …`. The capacity
/// is kept prime so the probe sequence reaches enough distinct slots, and the
/// table doubles once the load factor (`len / capacity`) reaches 0.5. Removal
/// tombstones the slot instead of emptying it.
///
/// Note: this implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct ProbingHashMap<K, V, S = DefaultHashBuilder> {
    /// The slot array; `None` marks a never-used slot
    slots: Vec<Option<Slot<K, V>>>,
    /// Current number of live (non-tombstoned) entries
    size: usize,
    /// Hasher builder used to derive home slot indices from keys
    build_hasher: S,
}

impl<K, V> ProbingHashMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Creates an empty map with the default initial capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty map with the requested capacity, promoted to the next
    /// prime.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }
}

impl<K, V, S> ProbingHashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
{
    /// Creates an empty map with the default initial capacity and the supplied
    /// hasher builder.
    pub fn with_hasher(build_hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, build_hasher)
    }

    /// Creates an empty map with the requested capacity, promoted to the next
    /// prime, and the supplied hasher builder.
    pub fn with_capacity_and_hasher(capacity: usize, build_hasher: S) -> Self {
        let capacity = prime::next_prime(capacity);
        Self { slots: alloc_slots(capacity), size: 0, build_hasher }
    }

    /// Computes the home slot index for a key: hash modulo the prime capacity.
    #[allow(clippy::cast_possible_truncation, clippy::arithmetic_side_effects)]
    fn home_index<Q: ?Sized + Hash>(&self, key: &Q) -> usize {
        let hash = self.build_hasher.hash_one(key);
        (hash as usize) % self.slots.len()
    }

    /// The j-th slot of the quadratic probe sequence rooted at `origin`.
    #[allow(clippy::arithmetic_side_effects)]
    fn probe(origin: usize, j: usize, capacity: usize) -> usize {
        origin.wrapping_add(j.wrapping_mul(j)) % capacity
    }

    /// Probes for the slot currently holding `key` live. A never-used slot
    /// ends the search; tombstoned slots are skipped over but keep it going.
    fn find_index<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        if self.size == 0 {
            return None;
        }

        let capacity = self.slots.len();
        let origin = self.home_index(key);
        for j in 0..capacity {
            let index = Self::probe(origin, j, capacity);
            match self.slots.get(index) {
                Some(Some(slot)) => {
                    if !slot.deleted && slot.key.borrow() == key {
                        return Some(index);
                    }
                }
                Some(None) | None => return None,
            }
        }
        None
    }

    /// Inserts a key-value pair, growing the table first when the load factor
    /// has reached 0.5. Returns the previous value when the key was already
    /// live. The first tombstone passed during the probe is reused when the
    /// key turns out to be absent.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if self.size.saturating_mul(2) >= self.slots.len() {
            self.resize(self.slots.len().saturating_mul(2));
        }

        let capacity = self.slots.len();
        let origin = self.home_index(&key);
        let mut first_tombstone = None;
        let mut found_live = None;
        let mut free_slot = None;

        for j in 0..capacity {
            let index = Self::probe(origin, j, capacity);
            match self.slots.get(index) {
                Some(Some(slot)) if slot.deleted => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Some(Some(slot)) if slot.key == key => {
                    found_live = Some(index);
                    break;
                }
                Some(Some(_)) => {}
                Some(None) | None => {
                    free_slot = Some(index);
                    break;
                }
            }
        }

        if let Some(index) = found_live {
            if let Some(Some(slot)) = self.slots.get_mut(index) {
                return Some(mem::replace(&mut slot.value, value));
            }
            return None;
        }

        if let Some(index) = first_tombstone.or(free_slot) {
            if let Some(slot) = self.slots.get_mut(index) {
                *slot = Some(Slot { key, value, deleted: false });
                self.size = self.size.saturating_add(1);
            }
        }
        None
    }

    /// Retrieves the value stored under `key`. Removed keys are not found.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_index(key)?;
        match self.slots.get(index) {
            Some(Some(slot)) => Some(&slot.value),
            _ => None,
        }
    }

    /// Retrieves a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_index(key)?;
        match self.slots.get_mut(index) {
            Some(Some(slot)) => Some(&mut slot.value),
            _ => None,
        }
    }

    /// Returns true when the map holds a live entry for `key`.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_index(key).is_some()
    }

    /// Tombstones the entry stored under `key`, returning its value. The slot
    /// stays occupied. Absent or already-removed keys are a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_index(key)?;
        match self.slots.get_mut(index) {
            Some(Some(slot)) => {
                slot.deleted = true;
                self.size = self.size.saturating_sub(1);
                Some(slot.value.clone())
            }
            _ => None,
        }
    }

    /// Empties every slot, tombstones included, while keeping the current
    /// capacity.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.size = 0;
    }

    /// Returns the number of live entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true when the map holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots; always a prime.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the current load factor (`len / capacity`).
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.slots.len() as f64
    }

    /// Counts the never-used slots. Tombstoned slots are occupied, not empty.
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_none()).count()
    }

    /// Rebuilds the table with at least `new_capacity` slots: the request is
    /// promoted to a prime, then doubled (and re-promoted) until the load
    /// factor is at most 0.5. Requests below the current entry count are
    /// ignored, since entries would be lost. Live entries are rehashed against
    /// the new capacity; tombstones are dropped.
    pub fn resize(&mut self, new_capacity: usize) {
        if new_capacity < self.size {
            return;
        }

        let mut capacity = prime::next_prime(new_capacity);
        while self.size.saturating_mul(2) > capacity {
            capacity = prime::next_prime(capacity.saturating_mul(2));
        }

        let old_slots = mem::replace(&mut self.slots, alloc_slots(capacity));
        for slot in old_slots.into_iter().flatten() {
            if !slot.deleted {
                self.place(slot.key, slot.value);
            }
        }
    }

    /// Drops `key`/`value` into the first never-used slot of its probe
    /// sequence. Only valid while rehashing into a fresh table: keys are
    /// distinct and no tombstones exist, so no match or reuse checks apply.
    fn place(&mut self, key: K, value: V) {
        let capacity = self.slots.len();
        let origin = self.home_index(&key);
        for j in 0..capacity {
            let index = Self::probe(origin, j, capacity);
            if let Some(slot @ None) = self.slots.get_mut(index) {
                *slot = Some(Slot { key, value, deleted: false });
                return;
            }
        }
    }

    /// Returns an iterator over the live entries in slot-index order.
    /// Tombstoned slots are skipped.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: self.slots.iter() }
    }
}

impl<K, V> Default for ProbingHashMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Extend<(K, V)> for ProbingHashMap<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ProbingHashMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Iterator over a map's live entries in slot-index order
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Slots not yet visited
    slots: std::slice::Iter<'a, Option<Slot<K, V>>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.slots.next()? {
                Some(slot) if !slot.deleted => return Some((&slot.key, &slot.value)),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut map = ProbingHashMap::new();
        assert_eq!(map.insert("key1".to_string(), 1), None);
        assert_eq!(map.insert("key2".to_string(), 2), None);
        assert_eq!(map.insert("key3".to_string(), 3), None);

        assert_eq!(map.get("key1"), Some(&1));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.get("key3"), Some(&3));
        assert_eq!(map.get("key4"), None);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_update_keeps_size() {
        let mut map = ProbingHashMap::new();
        assert_eq!(map.insert("key1".to_string(), 1), None);
        assert_eq!(map.insert("key1".to_string(), 10), Some(1));
        assert_eq!(map.get("key1"), Some(&10));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove_tombstones_the_slot() {
        let mut map = ProbingHashMap::with_capacity(11);
        map.insert("key1".to_string(), 1);
        map.insert("key2".to_string(), 2);
        let empty_before = map.empty_buckets();

        assert_eq!(map.remove("key1"), Some(1));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("key1"), None);
        assert!(!map.contains_key("key1"));
        // The slot is tombstoned, not freed.
        assert_eq!(map.empty_buckets(), empty_before);

        assert_eq!(map.remove("key1"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_reinsert_after_remove_reuses_tombstone() {
        let mut map = ProbingHashMap::with_capacity(11);
        map.insert("key1".to_string(), 1);
        let empty_before = map.empty_buckets();

        map.remove("key1");
        assert_eq!(map.insert("key1".to_string(), 5), None);
        assert_eq!(map.get("key1"), Some(&5));
        assert_eq!(map.len(), 1);
        assert_eq!(map.empty_buckets(), empty_before);
    }

    #[test]
    fn test_scenario_five_entries() {
        let mut map = ProbingHashMap::with_capacity(11);
        for i in 1..=5 {
            map.insert(i.to_string(), (i * 10).to_string());
        }
        assert_eq!(map.len(), 5);
        assert_eq!(map.capacity(), 11);

        // Requested capacity is below the entry count, so the resize is
        // refused and the load factor stays at 5/11.
        map.resize(2);
        assert_eq!(map.capacity(), 11);
        assert!(map.load_factor() <= 0.5);
        for i in 1..=5 {
            assert_eq!(map.get(&i.to_string()), Some(&(i * 10).to_string()));
        }
    }

    #[test]
    fn test_small_resize_cascades_to_fit() {
        let mut map = ProbingHashMap::with_capacity(11);
        for i in 1..=5 {
            map.insert(i.to_string(), i * 10);
        }

        // 7 admits the 5 entries but exceeds load 0.5, so the capacity
        // doubles (and re-promotes to a prime) until it fits: 7 -> 17.
        map.resize(7);
        assert_eq!(map.capacity(), 17);
        assert_eq!(map.len(), 5);
        assert!(map.load_factor() <= 0.5);
        for i in 1..=5 {
            assert_eq!(map.get(&i.to_string()), Some(&(i * 10)));
        }
    }

    #[test]
    fn test_growth_keeps_load_bounded() {
        let mut map = ProbingHashMap::with_capacity(53);
        for i in 0_usize..150 {
            map.insert(format!("str{i}"), i * 100);
            let bound = 0.5 + 1.0 / (map.capacity() as f64);
            assert!(map.load_factor() <= bound);
            assert!(crate::prime::is_prime(map.capacity()));
        }

        assert_eq!(map.len(), 150);
        for i in 0_usize..150 {
            assert_eq!(map.get(&format!("str{i}")), Some(&(i * 100)));
        }
    }

    #[test]
    fn test_resize_drops_tombstones_not_entries() {
        let mut map = ProbingHashMap::with_capacity(79);
        for key in (1..1000).step_by(13) {
            map.insert(key.to_string(), key * 42);
        }
        map.remove(&1.to_string());
        map.remove(&14.to_string());
        let size = map.len();

        for capacity in (111..1000).step_by(117) {
            map.resize(capacity);
            assert!(crate::prime::is_prime(map.capacity()));
            assert_eq!(map.len(), size);
            assert!(map.load_factor() <= 0.5);

            // Removed keys stay removed across every resize.
            assert!(!map.contains_key(&1.to_string()));
            assert!(!map.contains_key(&14.to_string()));
            for key in (27..1000).step_by(13) {
                assert_eq!(map.get(&key.to_string()), Some(&(key * 42)));
            }
        }
    }

    #[test]
    fn test_empty_buckets_excludes_tombstones() {
        let mut map = ProbingHashMap::with_capacity(101);
        assert_eq!(map.empty_buckets(), 101);

        map.insert("key1".to_string(), 10);
        assert_eq!(map.empty_buckets(), 100);

        map.remove("key1");
        assert_eq!(map.empty_buckets(), 100);

        map.clear();
        assert_eq!(map.empty_buckets(), 101);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut map = ProbingHashMap::new();
        map.insert("key1".to_string(), 1);
        map.insert("key2".to_string(), 2);
        let capacity = map.capacity();

        map.clear();
        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), capacity);
        assert!(!map.contains_key("key1"));

        map.clear();
        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), capacity);
    }

    #[test]
    fn test_iter_skips_tombstones() {
        let mut map = ProbingHashMap::new();
        for i in 0..5 {
            map.insert(i.to_string(), i * 24);
        }
        map.remove("0");
        map.remove("4");

        let mut seen: Vec<i32> = map.iter().map(|(_, &v)| v).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![24, 48, 72]);
    }

    #[test]
    fn test_get_mut() {
        let mut map = ProbingHashMap::new();
        map.insert("key1".to_string(), 1);

        if let Some(value) = map.get_mut("key1") {
            *value += 10;
        }

        assert_eq!(map.get("key1"), Some(&11));
    }

    #[test]
    fn test_from_iter_and_extend() {
        let mut map: ProbingHashMap<String, i32> =
            vec![("a".to_string(), 1), ("b".to_string(), 2)].into_iter().collect();
        map.extend(vec![("c".to_string(), 3)]);

        assert_eq!(map.len(), 3);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("c"), Some(&3));
    }

    #[test]
    fn test_churn_through_tombstones() {
        // Insert/remove cycles accumulate tombstones; lookups and fresh
        // inserts must stay correct throughout.
        let mut map = ProbingHashMap::with_capacity(23);
        for round in 0_usize..10 {
            for i in 0_usize..8 {
                map.insert(format!("r{round}k{i}"), round * 100 + i);
            }
            for i in 0_usize..8 {
                assert_eq!(map.remove(&format!("r{round}k{i}")), Some(round * 100 + i));
            }
            assert!(map.is_empty());
        }

        map.insert("final".to_string(), 7);
        assert_eq!(map.get("final"), Some(&7));
        assert_eq!(map.len(), 1);
    }
}
