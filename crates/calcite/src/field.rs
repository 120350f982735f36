//! Fields generated by extensions.

use std::fmt;

use smallvec::SmallVec;

use crate::ext::ExtHandle;

/// Sorted generator tuple of a field.
pub(crate) type Generators = SmallVec<[ExtHandle; 4]>;

/// Handle to an interned field.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldHandle(u32);

impl FieldHandle {
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    /// The index in the context's field table.
    #[must_use]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FieldHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldHandle({})", self.0)
    }
}

/// The field `Q(i)(g_0, …, g_{n-1})` of multivariate rational functions in
/// an ordered tuple of extensions.
///
/// Elements store variable `k` for generator `k`. A field with a single
/// algebraic generator is a number field; its elements are polynomials
/// reduced modulo the generator's minimal polynomial over `Q(i)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaField {
    generators: Generators,
    number_field: bool,
}

impl CaField {
    pub(crate) fn new(generators: Generators, number_field: bool) -> Self {
        Self {
            generators,
            number_field,
        }
    }

    /// Returns true if the field has a single algebraic generator.
    #[must_use]
    pub fn is_number_field(&self) -> bool {
        self.number_field
    }

    /// Number of generators, which is also the number of variables of
    /// its elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Returns true for the trivial field `Q(i)`, which is never interned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Generator `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i` is out of range.
    #[must_use]
    pub fn generator(&self, i: usize) -> ExtHandle {
        self.generators[i]
    }

    /// All generators, in variable order.
    #[must_use]
    pub fn generators(&self) -> &[ExtHandle] {
        &self.generators
    }

    /// The variable index of a generator.
    #[must_use]
    pub fn position(&self, ext: ExtHandle) -> Option<usize> {
        self.generators.binary_search(&ext).ok()
    }
}
