//! Three-valued truth.

use std::fmt;
use std::ops::Not;

/// The outcome of a predicate that may be undecidable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Truth {
    /// Provably true.
    True,
    /// Provably false.
    False,
    /// Could not be decided.
    Unknown,
}

impl Truth {
    /// A decided value.
    #[must_use]
    pub fn from_bool(b: bool) -> Self {
        if b {
            Self::True
        } else {
            Self::False
        }
    }

    /// Returns true only for [`Truth::True`].
    #[must_use]
    pub fn is_true(self) -> bool {
        self == Self::True
    }

    /// Returns true only for [`Truth::False`].
    #[must_use]
    pub fn is_false(self) -> bool {
        self == Self::False
    }

    /// Returns true for [`Truth::Unknown`].
    #[must_use]
    pub fn is_unknown(self) -> bool {
        self == Self::Unknown
    }

    /// Kleene conjunction.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::False, _) | (_, Self::False) => Self::False,
            (Self::True, Self::True) => Self::True,
            _ => Self::Unknown,
        }
    }

    /// Kleene disjunction.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        !(!self).and(!other)
    }
}

impl Not for Truth {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::True => Self::False,
            Self::False => Self::True,
            Self::Unknown => Self::Unknown,
        }
    }
}

impl From<bool> for Truth {
    fn from(b: bool) -> Self {
        Self::from_bool(b)
    }
}

impl fmt::Display for Truth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::True => "T_TRUE",
            Self::False => "T_FALSE",
            Self::Unknown => "T_UNKNOWN",
        };
        f.write_str(s)
    }
}
