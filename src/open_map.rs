//! OpenHashMap: public map over a single open-addressed `Table`.

use crate::table::{Iter, Table};
use core::fmt;

const INITIAL_CAPACITY: usize = 32;
// Live entries may occupy at most `capacity / INVERTED_MAX_LOAD_FACTOR`.
const INVERTED_MAX_LOAD_FACTOR: usize = 2;
const GROWTH_FACTOR: usize = 2;

/// Map from `i32` keys to `i64` values with open addressing.
///
/// Lookups that find nothing return the map's default value (sentinel),
/// `i64::MIN` unless chosen with [`OpenHashMap::with_default_value`]. A
/// stored value equal to the sentinel looks the same as an absent key
/// through [`get`](Self::get); use [`contains_key`](Self::contains_key)
/// when that distinction matters.
///
/// Individual entries cannot be removed; [`clear`](Self::clear) resets the
/// whole map.
#[derive(Clone)]
pub struct OpenHashMap {
    pub(crate) table: Table,
    default_value: i64,
}

impl OpenHashMap {
    pub fn new() -> Self {
        Self::with_default_value(i64::MIN)
    }

    pub fn with_default_value(default_value: i64) -> Self {
        Self {
            table: Table::with_capacity(INITIAL_CAPACITY),
            default_value,
        }
    }

    pub fn default_value(&self) -> i64 {
        self.default_value
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.len() == 0
    }

    /// Length of the slot arrays. The key-zero entry does not use a slot.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn get(&self, key: i32) -> i64 {
        self.table.get(key).unwrap_or(self.default_value)
    }

    pub fn contains_key(&self, key: i32) -> bool {
        self.table.contains_key(key)
    }

    /// Linear scan over every stored value.
    pub fn contains_value(&self, value: i64) -> bool {
        self.table.contains_value(value)
    }

    /// Inserts or overwrites `key`, returning the previous value or the
    /// default value if `key` was absent.
    ///
    /// Grows the table first when a new key would exceed the load factor.
    pub fn put(&mut self, key: i32, value: i64) -> i64 {
        let previous = self.table.get(key);
        if previous.is_none() && self.exceeds_load(1) {
            self.grow_with(&[(key, value)], 1);
        } else {
            self.table.insert(key, value);
        }
        previous.unwrap_or(self.default_value)
    }

    /// Merges all `entries`; later duplicates overwrite earlier ones.
    ///
    /// When the batch adds more distinct keys than the load factor allows
    /// the map grows once for the whole batch rather than per entry.
    pub fn put_all<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (i32, i64)>,
    {
        let entries: Vec<(i32, i64)> = entries.into_iter().collect();
        if entries.is_empty() {
            return;
        }
        // Raw length is an upper bound; only count distinct new keys when it
        // would trip the load check.
        let new_keys = if self.exceeds_load(entries.len()) {
            self.count_new_keys(&entries)
        } else {
            0
        };
        if self.exceeds_load(new_keys) {
            self.grow_with(&entries, new_keys);
        } else {
            for (key, value) in entries {
                self.table.insert(key, value);
            }
        }
    }

    /// Drops all entries and returns to the initial capacity. The default
    /// value is kept.
    pub fn clear(&mut self) {
        log::trace!(
            "clearing {} entries at capacity {}",
            self.len(),
            self.capacity()
        );
        self.table = Table::with_capacity(INITIAL_CAPACITY);
    }

    pub fn iter(&self) -> Iter<'_> {
        self.table.iter()
    }

    #[inline]
    fn exceeds_load(&self, incoming: usize) -> bool {
        self.len() + incoming > self.capacity() / INVERTED_MAX_LOAD_FACTOR
    }

    fn count_new_keys(&self, entries: &[(i32, i64)]) -> usize {
        let mut keys: Vec<i32> = entries.iter().map(|&(k, _)| k).collect();
        keys.sort_unstable();
        keys.dedup();
        keys.into_iter()
            .filter(|&k| !self.table.contains_key(k))
            .count()
    }

    // Full rehash into a fresh generation sized for the current entries plus
    // `new_keys`, then swap it in. The old generation is left untouched until
    // the swap drops it.
    fn grow_with(&mut self, incoming: &[(i32, i64)], new_keys: usize) {
        let target = self.len() + new_keys;
        let capacity = target * GROWTH_FACTOR * INVERTED_MAX_LOAD_FACTOR;
        let mut fresh = Table::with_capacity(capacity);
        for (key, value) in self.table.iter() {
            fresh.insert(key, value);
        }
        for &(key, value) in incoming {
            fresh.insert(key, value);
        }
        debug_assert_eq!(fresh.len(), target);
        log::debug!(
            "resized from capacity {} to {} holding {} entries",
            self.capacity(),
            capacity,
            fresh.len()
        );
        self.table = fresh;
    }
}

impl Default for OpenHashMap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for OpenHashMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a OpenHashMap {
    type Item = (i32, i64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Extend<(i32, i64)> for OpenHashMap {
    fn extend<T: IntoIterator<Item = (i32, i64)>>(&mut self, iter: T) {
        self.put_all(iter);
    }
}

impl FromIterator<(i32, i64)> for OpenHashMap {
    fn from_iter<T: IntoIterator<Item = (i32, i64)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.put_all(iter);
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_map_shape() {
        let m = OpenHashMap::new();
        assert_eq!(m.capacity(), INITIAL_CAPACITY);
        assert_eq!(m.len(), 0);
        assert!(m.is_empty());
        assert_eq!(m.default_value(), i64::MIN);
    }

    /// Invariant: the 17th distinct key triggers exactly one resize to 17 * 4.
    #[test]
    fn resize_on_seventeenth_key() {
        let mut m = OpenHashMap::new();
        for k in 1..=16 {
            m.put(k, i64::from(k));
            assert_eq!(m.capacity(), 32);
        }
        m.put(0, 0);
        assert_eq!(m.capacity(), 68);
        assert_eq!(m.len(), 17);
    }

    /// Invariant: overwriting at the load limit does not grow the table.
    #[test]
    fn overwrite_at_limit_keeps_capacity() {
        let mut m = OpenHashMap::new();
        for k in 1..=16 {
            m.put(k, 1);
        }
        assert_eq!(m.put(16, 2), 1);
        assert_eq!(m.capacity(), 32);
        assert_eq!(m.len(), 16);
    }

    /// Invariant: a batch grows the table only by its distinct new keys.
    #[test]
    fn batch_sized_by_distinct_new_keys() {
        let mut m = OpenHashMap::new();
        for k in 1..=10 {
            m.put(k, 0);
        }
        // 10 existing + 10 incoming exceeds 16, but only 5 keys are new.
        m.put_all((6..=15).map(|k| (k, i64::from(k) * 10)));
        assert_eq!(m.capacity(), 32);
        assert_eq!(m.len(), 15);
        assert_eq!(m.get(5), 0);
        assert_eq!(m.get(6), 60);
        assert_eq!(m.get(15), 150);

        // Two more new keys push past 16: one resize to 17 * 4.
        m.put_all([(16, 1), (17, 1), (16, 2), (1, 5)]);
        assert_eq!(m.capacity(), 68);
        assert_eq!(m.len(), 17);
        assert_eq!(m.get(16), 2);
        assert_eq!(m.get(1), 5);
    }

    /// Invariant: repeating one key in a batch never sizes the table for the repeats.
    #[test]
    fn repeated_key_batch_does_not_grow() {
        let mut m = OpenHashMap::new();
        m.put_all(std::iter::repeat((1, 1)).take(100_000));
        assert_eq!(m.capacity(), INITIAL_CAPACITY);
        assert_eq!(m.len(), 1);

        m.put_all((100..116).map(|k| (k, 0)).chain(std::iter::repeat((7, 7)).take(50)));
        assert_eq!(m.len(), 18);
        assert_eq!(m.capacity(), 18 * 4);
        assert_eq!(m.get(7), 7);
    }

    /// Invariant: keys sharing one origin in a 68-slot table spill past the
    /// polynomial attempts into the linear walk and are still found.
    #[test]
    fn shared_origin_keys_reach_linear_walk() {
        let mut m = OpenHashMap::new();
        for i in 1..=30 {
            m.put(i * 68, i64::from(i));
        }
        assert_eq!(m.capacity(), 68);
        assert_eq!(m.len(), 30);
        assert!(m.table.longest_probe() >= m.capacity());
        for i in 1..=30 {
            assert_eq!(m.get(i * 68), i64::from(i), "key {}", i * 68);
            assert!(m.contains_key(i * 68));
        }
        assert!(!m.contains_key(31 * 68));
        assert_eq!(m.get(31 * 68), i64::MIN);
    }

    #[test]
    fn clear_keeps_default_value() {
        let mut m = OpenHashMap::with_default_value(-1);
        m.put_all((1..100).map(|k| (k, 1)));
        m.clear();
        assert_eq!(m.capacity(), INITIAL_CAPACITY);
        assert_eq!(m.default_value(), -1);
        assert_eq!(m.get(5), -1);
    }

    #[test]
    fn debug_prints_as_map() {
        let mut m = OpenHashMap::new();
        m.put(0, 1);
        m.put(2, 3);
        assert_eq!(format!("{:?}", m), "{0: 1, 2: 3}");
    }

    #[test]
    fn collect_and_extend() {
        let mut m: OpenHashMap = (1..=3).map(|k| (k, i64::from(k))).collect();
        m.extend([(4, 4), (1, 10)]);
        assert_eq!(m.len(), 4);
        assert_eq!(m.get(1), 10);
        let mut pairs: Vec<_> = (&m).into_iter().collect();
        pairs.sort_unstable();
        assert_eq!(pairs, vec![(1, 10), (2, 2), (3, 3), (4, 4)]);
    }
}
