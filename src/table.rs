//! Table: one storage generation of the map.
//!
//! Keys and values live in parallel boxed slices of equal length. A key
//! slot holding `EMPTY` (zero) was never occupied; the entry for key zero
//! lives in a side channel instead. Entries are never removed, so a slot
//! once occupied stays occupied for the lifetime of the generation.

use crate::probe::Probe;
use core::iter::Zip;
use core::slice;

pub(crate) const EMPTY: i32 = 0;

#[derive(Clone, Debug)]
pub(crate) struct Table {
    keys: Box<[i32]>,
    values: Box<[i64]>,
    zero: Option<i64>,
    len: usize,
    // Highest attempt index at which an insertion claimed a slot.
    longest_probe: usize,
}

impl Table {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            keys: vec![EMPTY; capacity].into_boxed_slice(),
            values: vec![0; capacity].into_boxed_slice(),
            zero: None,
            len: 0,
            longest_probe: 0,
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub(crate) fn longest_probe(&self) -> usize {
        self.longest_probe
    }

    // Lookups give up after this many attempts.
    #[inline]
    fn attempt_bound(&self) -> usize {
        self.len.max(self.longest_probe) + 1
    }

    /// Direct insertion into this generation. Returns the overwritten value
    /// if `key` was already present.
    ///
    /// The caller keeps the load factor at or below one half, so an empty
    /// slot always exists on the probe path.
    pub(crate) fn insert(&mut self, key: i32, value: i64) -> Option<i64> {
        if key == EMPTY {
            let previous = self.zero.replace(value);
            if previous.is_none() {
                self.len += 1;
            }
            return previous;
        }

        debug_assert!(self.len < self.capacity(), "insert into a full table");
        for (attempt, slot) in Probe::new(key, self.capacity()).enumerate() {
            let occupant = self.keys[slot];
            if occupant == EMPTY {
                self.keys[slot] = key;
                self.values[slot] = value;
                self.len += 1;
                self.longest_probe = self.longest_probe.max(attempt);
                return None;
            }
            if occupant == key {
                return Some(core::mem::replace(&mut self.values[slot], value));
            }
        }
        unreachable!("probe sequence visits every slot of a non-full table")
    }

    /// Lookup that steps over empty slots until the attempt bound runs out.
    pub(crate) fn get(&self, key: i32) -> Option<i64> {
        if self.len == 0 {
            return None;
        }
        if key == EMPTY {
            return self.zero;
        }
        Probe::new(key, self.capacity())
            .take(self.attempt_bound())
            .find(|&slot| self.keys[slot] == key)
            .map(|slot| self.values[slot])
    }

    /// Lookup that stops at the first empty slot on the probe path.
    pub(crate) fn contains_key(&self, key: i32) -> bool {
        if self.len == 0 {
            return false;
        }
        if key == EMPTY {
            return self.zero.is_some();
        }
        for slot in Probe::new(key, self.capacity()).take(self.attempt_bound()) {
            match self.keys[slot] {
                EMPTY => return false,
                k if k == key => return true,
                _ => {}
            }
        }
        false
    }

    pub(crate) fn contains_value(&self, value: i64) -> bool {
        if self.len == 0 {
            return false;
        }
        if self.zero == Some(value) {
            return true;
        }
        self.keys
            .iter()
            .zip(self.values.iter())
            .any(|(&k, &v)| k != EMPTY && v == value)
    }

    pub(crate) fn iter(&self) -> Iter<'_> {
        Iter {
            zero: self.zero,
            slots: self.keys.iter().zip(self.values.iter()),
            remaining: self.len,
        }
    }

    #[cfg(test)]
    pub(crate) fn occupied_slots(&self) -> usize {
        self.keys.iter().filter(|&&k| k != EMPTY).count()
    }
}

/// Iterator over the entries of an `OpenHashMap`.
///
/// Yields the key-zero entry first (if present), then occupied slots in
/// slot order.
#[derive(Clone, Debug)]
pub struct Iter<'a> {
    zero: Option<i64>,
    slots: Zip<slice::Iter<'a, i32>, slice::Iter<'a, i64>>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (i32, i64);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if let Some(v) = self.zero.take() {
            self.remaining -= 1;
            return Some((EMPTY, v));
        }
        let (&k, &v) = self.slots.by_ref().find(|&(&k, _)| k != EMPTY)?;
        self.remaining -= 1;
        Some((k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_counts_new_keys_only() {
        let mut t = Table::with_capacity(32);
        assert_eq!(t.insert(5, 50), None);
        assert_eq!(t.insert(5, 51), Some(50));
        assert_eq!(t.insert(0, 1), None);
        assert_eq!(t.insert(0, 2), Some(1));
        assert_eq!(t.len(), 2);
        assert_eq!(t.occupied_slots(), 1);
    }

    #[test]
    fn zero_key_never_enters_slots() {
        let mut t = Table::with_capacity(32);
        t.insert(0, 7);
        assert_eq!(t.occupied_slots(), 0);
        assert_eq!(t.get(0), Some(7));
        assert!(t.contains_key(0));
        assert!(t.contains_value(7));
    }

    /// Colliding keys share an origin and are all still found.
    #[test]
    fn colliding_keys_resolve() {
        let mut t = Table::with_capacity(32);
        let keys: Vec<i32> = (0..16).map(|i| 1 + 32 * i).collect();
        for (i, &k) in keys.iter().enumerate() {
            t.insert(k, i as i64);
        }
        for (i, &k) in keys.iter().enumerate() {
            assert_eq!(t.get(k), Some(i as i64));
            assert!(t.contains_key(k));
        }
        assert!(!t.contains_key(1 + 32 * 16));
        assert_eq!(t.get(1 + 32 * 16), None);
    }

    #[test]
    fn empty_slot_values_are_not_matched() {
        let t = Table::with_capacity(32);
        assert!(!t.contains_value(0));
        let mut t = t;
        t.insert(3, 9);
        assert!(!t.contains_value(0));
        assert!(t.contains_value(9));
    }

    #[test]
    fn iter_yields_zero_first_then_slots() {
        let mut t = Table::with_capacity(32);
        t.insert(2, 20);
        t.insert(0, 0);
        t.insert(1, 10);
        let it = t.iter();
        assert_eq!(it.len(), 3);
        let got: Vec<_> = it.collect();
        assert_eq!(got, vec![(0, 0), (1, 10), (2, 20)]);
    }
}
