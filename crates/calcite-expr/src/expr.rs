//! Expression node types.

use smallvec::SmallVec;

use crate::handle::ExprHandle;

/// Unique identifier for a symbol.
pub type SymbolId = u32;

/// Unique identifier for a function head, see [`functions`].
pub type FunctionId = u32;

/// An expression node stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprNode {
    /// A 64-bit integer literal.
    Integer(i64),

    /// A rational literal (numerator, denominator).
    ///
    /// Invariant: denominator > 1, gcd(num, den) == 1.
    Rational(i64, u64),

    /// A symbolic variable.
    Symbol(SymbolId),

    /// Sum of at least two expressions.
    Add(SmallVec<[ExprHandle; 4]>),

    /// Product of at least two expressions.
    Mul(SmallVec<[ExprHandle; 4]>),

    /// Power expression: base^exp.
    Pow {
        /// The base of the power.
        base: ExprHandle,
        /// The exponent.
        exp: ExprHandle,
    },

    /// Negation: -expr.
    Neg(ExprHandle),

    /// Division: numerator / denominator.
    Div {
        /// The numerator.
        num: ExprHandle,
        /// The denominator.
        den: ExprHandle,
    },

    /// A function application `f(arg1, ...)`; constants have no arguments.
    Function {
        /// The function identifier.
        id: FunctionId,
        /// The arguments.
        args: SmallVec<[ExprHandle; 2]>,
    },

    /// `body` with local definitions `symbol = value`.
    ///
    /// Definitions are visible to `body` and to later definitions.
    Where {
        /// The expression being defined.
        body: ExprHandle,
        /// The bindings, in order.
        defs: SmallVec<[(SymbolId, ExprHandle); 2]>,
    },
}

impl ExprNode {
    /// Returns true if this node is an atom (no children).
    #[must_use]
    pub fn is_atom(&self) -> bool {
        match self {
            ExprNode::Integer(_) | ExprNode::Rational(_, _) | ExprNode::Symbol(_) => true,
            ExprNode::Function { args, .. } => args.is_empty(),
            _ => false,
        }
    }

    /// Returns true if this node is a numeric literal.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, ExprNode::Integer(_) | ExprNode::Rational(_, _))
    }

    /// Returns the children of this node.
    #[must_use]
    pub fn children(&self) -> SmallVec<[ExprHandle; 4]> {
        match self {
            ExprNode::Integer(_) | ExprNode::Rational(_, _) | ExprNode::Symbol(_) => {
                SmallVec::new()
            }
            ExprNode::Add(args) | ExprNode::Mul(args) => args.clone(),
            ExprNode::Pow { base, exp } => smallvec::smallvec![*base, *exp],
            ExprNode::Neg(arg) => smallvec::smallvec![*arg],
            ExprNode::Div { num, den } => smallvec::smallvec![*num, *den],
            ExprNode::Function { args, .. } => args.iter().copied().collect(),
            ExprNode::Where { body, defs } => std::iter::once(*body)
                .chain(defs.iter().map(|&(_, value)| value))
                .collect(),
        }
    }
}

/// Function heads understood by the exact-number importer.
pub mod functions {
    use super::FunctionId;

    /// The constant π.
    pub const PI: FunctionId = 0;
    /// The imaginary unit.
    pub const NUMBER_I: FunctionId = 1;
    /// Natural exponential.
    pub const EXP: FunctionId = 2;
    /// Principal natural logarithm.
    pub const LOG: FunctionId = 3;
    /// Principal square root.
    pub const SQRT: FunctionId = 4;
    /// Sine.
    pub const SIN: FunctionId = 5;
    /// Cosine.
    pub const COS: FunctionId = 6;
    /// Tangent.
    pub const TAN: FunctionId = 7;
    /// Inverse tangent.
    pub const ATAN: FunctionId = 8;
    /// Inverse sine.
    pub const ASIN: FunctionId = 9;
    /// Inverse cosine.
    pub const ACOS: FunctionId = 10;
    /// Real part.
    pub const RE: FunctionId = 11;
    /// Imaginary part.
    pub const IM: FunctionId = 12;
    /// Complex conjugate.
    pub const CONJUGATE: FunctionId = 13;
    /// Absolute value.
    pub const ABS: FunctionId = 14;
    /// Complex sign `z / |z|`.
    pub const SIGN: FunctionId = 15;
    /// Complex argument.
    pub const ARG: FunctionId = 16;
    /// Positive infinity, or with one argument the infinity in that direction.
    pub const INFINITY: FunctionId = 17;
    /// Unsigned infinity.
    pub const UNSIGNED_INFINITY: FunctionId = 18;
    /// The undefined value.
    pub const UNDEFINED: FunctionId = 19;
    /// A value that could not be determined.
    pub const UNKNOWN: FunctionId = 20;
    /// Floor of a real number.
    pub const FLOOR: FunctionId = 21;
    /// Ceiling of a real number.
    pub const CEIL: FunctionId = 22;

    const NAMES: [&str; 23] = [
        "Pi",
        "NumberI",
        "Exp",
        "Log",
        "Sqrt",
        "Sin",
        "Cos",
        "Tan",
        "Atan",
        "Asin",
        "Acos",
        "Re",
        "Im",
        "Conjugate",
        "Abs",
        "Sign",
        "Arg",
        "Infinity",
        "UnsignedInfinity",
        "Undefined",
        "Unknown",
        "Floor",
        "Ceil",
    ];

    /// The display name of a function head.
    #[must_use]
    pub fn name(id: FunctionId) -> Option<&'static str> {
        NAMES.get(id as usize).copied()
    }

    /// The function head with the given name.
    #[must_use]
    pub fn lookup(name: &str) -> Option<FunctionId> {
        NAMES
            .iter()
            .position(|&n| n == name)
            .and_then(|i| FunctionId::try_from(i).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_atom() {
        assert!(ExprNode::Integer(42).is_atom());
        assert!(ExprNode::Symbol(0).is_atom());
        assert!(ExprNode::Function { id: functions::PI, args: SmallVec::new() }.is_atom());
        assert!(!ExprNode::Neg(ExprHandle::new(0)).is_atom());
    }

    #[test]
    fn test_where_children() {
        let node = ExprNode::Where {
            body: ExprHandle::new(5),
            defs: smallvec::smallvec![(0, ExprHandle::new(2)), (1, ExprHandle::new(3))],
        };
        let children: Vec<_> = node.children().into_iter().map(ExprHandle::index).collect();
        assert_eq!(children, vec![5, 2, 3]);
    }

    #[test]
    fn test_function_names() {
        assert_eq!(functions::name(functions::CONJUGATE), Some("Conjugate"));
        assert_eq!(functions::lookup("Sin"), Some(functions::SIN));
        assert_eq!(functions::lookup("Ceil"), Some(functions::CEIL));
        assert_eq!(functions::lookup("Gamma"), None);
        assert_eq!(functions::name(99), None);
    }
}
