//! Interning tables.
//!
//! Maps values to dense `u32` ids so that each distinct value is stored
//! once. The arena uses one for symbol names; the exact-number context
//! uses them for generator tuples of fields.

use std::hash::{BuildHasherDefault, Hash};

use hashbrown::HashMap;
use rustc_hash::FxHasher;

type FxBuild = BuildHasherDefault<FxHasher>;

/// A table assigning dense ids to distinct values.
#[derive(Debug, Clone)]
pub struct InternTable<T> {
    map: HashMap<T, u32, FxBuild>,
    values: Vec<T>,
}

impl<T: Clone + Eq + Hash> Default for InternTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Eq + Hash> InternTable<T> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            map: HashMap::default(),
            values: Vec::new(),
        }
    }

    /// Interns a value, returning its id and whether it was newly added.
    ///
    /// # Panics
    ///
    /// Panics when more than `u32::MAX` values are interned.
    pub fn insert(&mut self, value: T) -> (u32, bool) {
        if let Some(&id) = self.map.get(&value) {
            return (id, false);
        }

        let id = u32::try_from(self.values.len()).expect("intern table capacity exceeded");
        self.map.insert(value.clone(), id);
        self.values.push(value);
        (id, true)
    }

    /// Interns a value, returning its id.
    pub fn intern(&mut self, value: T) -> u32 {
        self.insert(value).0
    }

    /// The value with the given id.
    #[must_use]
    pub fn get(&self, id: u32) -> Option<&T> {
        self.values.get(id as usize)
    }

    /// The id of a value, if interned.
    #[must_use]
    pub fn get_id(&self, value: &T) -> Option<u32> {
        self.map.get(value).copied()
    }

    /// Number of interned values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing has been interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(id, value)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> {
        (0u32..).zip(self.values.iter())
    }
}
