//! Expression handles.

use std::fmt;

/// A 32-bit index of an expression in an [`ExprArena`](crate::ExprArena).
///
/// Hash-consing makes handle equality coincide with structural equality
/// within one arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprHandle(u32);

impl ExprHandle {
    /// Wraps an arena index.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The raw arena index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ExprHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_size() {
        assert_eq!(std::mem::size_of::<ExprHandle>(), 4);
        assert_eq!(std::mem::size_of::<Option<ExprHandle>>(), 8);
    }

    #[test]
    fn test_handle_order() {
        assert!(ExprHandle::new(3) < ExprHandle::new(4));
        assert_eq!(ExprHandle::new(7).index(), 7);
    }
}
