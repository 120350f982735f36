//! Growable vectors of exact numbers.

use std::ops::{Index, IndexMut};
use std::slice;

use crate::ca::Ca;

/// A growable array of [`Ca`] values.
///
/// Every slot below the length holds a live value; new slots start at zero.
/// Shrinking drops the trailing values but keeps the allocation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CaVec {
    entries: Vec<Ca>,
}

impl CaVec {
    /// An empty vector that owns no storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A vector of `len` zeros. A length of zero allocates nothing.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            entries: vec![Ca::zero(); len],
        }
    }

    /// An empty vector with room for `capacity` values.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Number of live values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no live values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of slots allocated.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Resizes to `new_len`.
    ///
    /// Shrinking drops the values past `new_len` and keeps the allocation.
    /// Growing at least doubles the allocation when it is exceeded and
    /// fills the new slots with zero.
    pub fn set_length(&mut self, new_len: usize) {
        let len = self.entries.len();
        if new_len <= len {
            self.entries.truncate(new_len);
            return;
        }

        let capacity = self.entries.capacity();
        if new_len > capacity {
            let target = new_len.max(2 * capacity);
            self.entries.reserve_exact(target - len);
        }
        self.entries.resize_with(new_len, Ca::zero);
    }

    /// Makes this vector a copy of `src`, reusing the allocation.
    pub fn set(&mut self, src: &CaVec) {
        self.entries.clone_from(&src.entries);
    }

    /// Exchanges the contents of two vectors without copying values.
    pub fn swap(&mut self, other: &mut CaVec) {
        std::mem::swap(&mut self.entries, &mut other.entries);
    }

    /// Drops every value and releases the storage.
    pub fn clear(&mut self) {
        self.entries = Vec::new();
    }

    /// Appends a value.
    pub fn push(&mut self, value: Ca) {
        self.entries.push(value);
    }

    /// Removes and returns the last value.
    pub fn pop(&mut self) -> Option<Ca> {
        self.entries.pop()
    }

    /// The value at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Ca> {
        self.entries.get(index)
    }

    /// The live values.
    #[must_use]
    pub fn as_slice(&self) -> &[Ca] {
        &self.entries
    }

    /// Iterates over the live values.
    pub fn iter(&self) -> slice::Iter<'_, Ca> {
        self.entries.iter()
    }

    /// Iterates mutably over the live values.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Ca> {
        self.entries.iter_mut()
    }
}

impl Index<usize> for CaVec {
    type Output = Ca;

    fn index(&self, index: usize) -> &Ca {
        &self.entries[index]
    }
}

impl IndexMut<usize> for CaVec {
    fn index_mut(&mut self, index: usize) -> &mut Ca {
        &mut self.entries[index]
    }
}

impl From<Vec<Ca>> for CaVec {
    fn from(entries: Vec<Ca>) -> Self {
        Self { entries }
    }
}

impl From<&[Ca]> for CaVec {
    fn from(entries: &[Ca]) -> Self {
        Self {
            entries: entries.to_vec(),
        }
    }
}

impl FromIterator<Ca> for CaVec {
    fn from_iter<I: IntoIterator<Item = Ca>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for CaVec {
    type Item = Ca;
    type IntoIter = std::vec::IntoIter<Ca>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a CaVec {
    type Item = &'a Ca;
    type IntoIter = slice::Iter<'a, Ca>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_and_clear() {
        let mut v = CaVec::with_len(0);
        assert!(v.is_empty());
        assert_eq!(v.capacity(), 0);

        let mut w = CaVec::with_len(5);
        assert_eq!(w.len(), 5);
        assert!(w.iter().all(Ca::is_zero_number));

        w.clear();
        w.clear();
        v.clear();
        assert!(w.is_empty());
        assert_eq!(w.capacity(), 0);
    }

    #[test]
    fn test_grow_doubles() {
        let mut v = CaVec::with_len(4);
        let before = v.capacity();
        v.set_length(5);
        assert_eq!(v.len(), 5);
        assert!(v.capacity() >= 2 * before);
        assert!(v[4].is_zero_number());
    }

    #[test]
    fn test_shrink_keeps_allocation() {
        let mut v: CaVec = (1..=6).map(Ca::from).collect();
        let capacity = v.capacity();
        v.set_length(2);
        assert_eq!(v.len(), 2);
        assert_eq!(v.capacity(), capacity);
        assert_eq!(v[1], Ca::from(2));

        v.set_length(2);
        assert_eq!(v.len(), 2);
    }

    #[test]
    fn test_grow_then_shrink_matches_fresh() {
        let mut v = CaVec::with_len(3);
        v.set_length(10);
        v.set_length(3);
        assert_eq!(v, CaVec::with_len(3));
    }

    #[test]
    fn test_set_and_swap() {
        let a: CaVec = vec![Ca::from(1), Ca::from(2)].into();
        let mut b = CaVec::with_len(7);
        b.set(&a);
        assert_eq!(b, a);

        let mut c = CaVec::with_len(1);
        let mut d: CaVec = vec![Ca::from(9)].into();
        c.swap(&mut d);
        assert_eq!(c[0], Ca::from(9));
        assert!(d[0].is_zero_number());
    }
}
