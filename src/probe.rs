//! Probe sequence for the open-addressed table.
//!
//! Attempt `0` lands on `key mod capacity`. Attempts `1..capacity` follow
//! `|key + 7a + 3a²| mod capacity`. That polynomial does not reach every
//! residue for every capacity the resize policy produces (for a capacity
//! divisible by 4 it only ever adds even offsets mod 4), so attempts
//! `capacity..2 * capacity` fall back to a linear walk from the origin.
//! The sequence is finite and visits every slot at least once.

pub(crate) const LINEAR_STEP: i64 = 7;
pub(crate) const QUADRATIC_STEP: i64 = 3;

/// Iterator over the slot indices probed for one key.
#[derive(Clone, Debug)]
pub(crate) struct Probe {
    key: i64,
    origin: usize,
    capacity: usize,
    attempt: usize,
}

impl Probe {
    pub(crate) fn new(key: i32, capacity: usize) -> Self {
        debug_assert!(capacity > 0, "probing an empty table");
        let key = i64::from(key);
        Self {
            key,
            origin: key.rem_euclid(capacity as i64) as usize,
            capacity,
            attempt: 0,
        }
    }

    /// Number of attempts after which the sequence is exhausted.
    #[inline]
    pub(crate) fn len_bound(capacity: usize) -> usize {
        capacity * 2
    }

    #[inline]
    fn quadratic(&self, attempt: usize) -> usize {
        let a = attempt as i64;
        let offset = a
            .wrapping_mul(LINEAR_STEP)
            .wrapping_add(a.wrapping_mul(a).wrapping_mul(QUADRATIC_STEP));
        (self.key.wrapping_add(offset).unsigned_abs() % self.capacity as u64) as usize
    }
}

impl Iterator for Probe {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        let attempt = self.attempt;
        if attempt >= Self::len_bound(self.capacity) {
            return None;
        }
        self.attempt += 1;
        let slot = if attempt == 0 {
            self.origin
        } else if attempt < self.capacity {
            self.quadratic(attempt)
        } else {
            (self.origin + (attempt - self.capacity)) % self.capacity
        };
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = Self::len_bound(self.capacity) - self.attempt;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Probe {}
