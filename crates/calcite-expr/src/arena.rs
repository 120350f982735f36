//! Arena allocator for expression storage.
//!
//! Nodes live contiguously in a `Vec`; hash-consing stores each distinct
//! node once, so equal subexpressions share a handle.

use std::fmt::Write as _;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::expr::{functions, ExprNode, FunctionId, SymbolId};
use crate::handle::ExprHandle;
use crate::intern::InternTable;

/// The main arena for storing expressions.
#[derive(Debug, Default)]
pub struct ExprArena {
    /// Storage for all expression nodes.
    nodes: Vec<ExprNode>,
    /// Interning table: maps node content to its handle.
    intern_map: HashMap<ExprNode, ExprHandle>,
    /// Symbol names.
    symbols: InternTable<String>,
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl ExprArena {
    /// Creates a new empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns an expression node, returning its handle.
    ///
    /// # Panics
    ///
    /// Panics if the arena holds `u32::MAX` nodes.
    pub fn intern(&mut self, node: ExprNode) -> ExprHandle {
        if let Some(&handle) = self.intern_map.get(&node) {
            return handle;
        }

        let index = u32::try_from(self.nodes.len()).expect("arena capacity exceeded");
        let handle = ExprHandle::new(index);
        self.nodes.push(node.clone());
        self.intern_map.insert(node, handle);
        handle
    }

    /// Gets the node at the given handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle is invalid.
    #[must_use]
    pub fn get(&self, handle: ExprHandle) -> &ExprNode {
        &self.nodes[handle.index() as usize]
    }

    /// Interns a symbol name, returning its id.
    pub fn intern_symbol(&mut self, name: &str) -> SymbolId {
        self.symbols.intern(name.to_string())
    }

    /// Gets the name of a symbol by its id.
    #[must_use]
    pub fn symbol_name(&self, id: SymbolId) -> Option<&str> {
        self.symbols.get(id).map(String::as_str)
    }

    /// Returns the number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // === Convenience constructors ===

    /// Creates an integer expression.
    pub fn integer(&mut self, value: i64) -> ExprHandle {
        self.intern(ExprNode::Integer(value))
    }

    /// Creates the rational `num / den` in lowest terms.
    ///
    /// # Panics
    ///
    /// Panics if `den` is zero.
    pub fn rational(&mut self, num: i64, den: i64) -> ExprHandle {
        assert!(den != 0, "rational literal with zero denominator");
        let negative = (num < 0) != (den < 0);
        let (n, d) = (num.unsigned_abs(), den.unsigned_abs());
        let g = gcd(n, d).max(1);
        let (n, d) = (n / g, d / g);
        let n = i64::try_from(n).map_or(i64::MAX, |n| if negative { -n } else { n });
        if d == 1 {
            self.integer(n)
        } else {
            self.intern(ExprNode::Rational(n, d))
        }
    }

    /// Creates a symbol expression.
    pub fn symbol(&mut self, name: &str) -> ExprHandle {
        let id = self.intern_symbol(name);
        self.intern(ExprNode::Symbol(id))
    }

    /// Creates an addition expression.
    pub fn add(&mut self, args: impl Into<SmallVec<[ExprHandle; 4]>>) -> ExprHandle {
        let args = args.into();
        if args.len() == 1 {
            return args[0];
        }
        self.intern(ExprNode::Add(args))
    }

    /// Creates a multiplication expression.
    pub fn mul(&mut self, args: impl Into<SmallVec<[ExprHandle; 4]>>) -> ExprHandle {
        let args = args.into();
        if args.len() == 1 {
            return args[0];
        }
        self.intern(ExprNode::Mul(args))
    }

    /// Creates a power expression.
    pub fn pow(&mut self, base: ExprHandle, exp: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Pow { base, exp })
    }

    /// Creates a negation expression.
    pub fn neg(&mut self, arg: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Neg(arg))
    }

    /// Creates a division expression.
    pub fn div(&mut self, num: ExprHandle, den: ExprHandle) -> ExprHandle {
        self.intern(ExprNode::Div { num, den })
    }

    /// Applies a function head to arguments.
    pub fn call(&mut self, id: FunctionId, args: &[ExprHandle]) -> ExprHandle {
        self.intern(ExprNode::Function {
            id,
            args: args.iter().copied().collect(),
        })
    }

    /// A named constant such as `Pi` or `NumberI`.
    pub fn constant(&mut self, id: FunctionId) -> ExprHandle {
        self.call(id, &[])
    }

    /// `body` where each `(name, value)` is bound in order.
    pub fn where_defs(&mut self, body: ExprHandle, defs: &[(&str, ExprHandle)]) -> ExprHandle {
        let defs = defs
            .iter()
            .map(|&(name, value)| (self.intern_symbol(name), value))
            .collect();
        self.intern(ExprNode::Where { body, defs })
    }

    /// Renders an expression in prefix form, e.g. `Sin(Div(Pi, 6))`.
    #[must_use]
    pub fn format(&self, handle: ExprHandle) -> String {
        let mut out = String::new();
        self.write_expr(&mut out, handle);
        out
    }

    fn write_expr(&self, out: &mut String, handle: ExprHandle) {
        let head = match self.get(handle) {
            ExprNode::Integer(n) => {
                let _ = write!(out, "{n}");
                return;
            }
            ExprNode::Rational(n, d) => {
                let _ = write!(out, "{n}/{d}");
                return;
            }
            ExprNode::Symbol(id) => {
                out.push_str(self.symbol_name(*id).unwrap_or("?"));
                return;
            }
            ExprNode::Function { id, args } if args.is_empty() => {
                out.push_str(functions::name(*id).unwrap_or("?"));
                return;
            }
            ExprNode::Add(_) => "Add",
            ExprNode::Mul(_) => "Mul",
            ExprNode::Pow { .. } => "Pow",
            ExprNode::Neg(_) => "Neg",
            ExprNode::Div { .. } => "Div",
            ExprNode::Function { id, .. } => functions::name(*id).unwrap_or("?"),
            ExprNode::Where { .. } => "Where",
        };

        out.push_str(head);
        out.push('(');
        if let ExprNode::Where { body, defs } = self.get(handle) {
            self.write_expr(out, *body);
            for (name, value) in defs {
                let _ = write!(out, ", Def({}, ", self.symbol_name(*name).unwrap_or("?"));
                self.write_expr(out, *value);
                out.push(')');
            }
        } else {
            for (i, child) in self.get(handle).children().into_iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                self.write_expr(out, child);
            }
        }
        out.push(')');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_basic() {
        let mut arena = ExprArena::new();

        let x = arena.symbol("x");
        let y = arena.symbol("y");

        assert_eq!(x, arena.symbol("x"));
        assert_ne!(x, y);
    }

    #[test]
    fn test_hash_consing() {
        let mut arena = ExprArena::new();

        let x = arena.symbol("x");
        let one = arena.integer(1);

        let sum1 = arena.add(smallvec::smallvec![x, one]);
        let sum2 = arena.add(smallvec::smallvec![x, one]);
        assert_eq!(sum1, sum2);

        // x, 1, (x + 1)
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_rational_normalization() {
        let mut arena = ExprArena::new();
        assert_eq!(arena.rational(4, -6), arena.rational(-2, 3));
        let r = arena.rational(-2, 3);
        assert_eq!(arena.get(r), &ExprNode::Rational(-2, 3));
        assert_eq!(arena.rational(6, 3), arena.integer(2));
    }

    #[test]
    fn test_format() {
        let mut arena = ExprArena::new();
        let pi = arena.constant(functions::PI);
        let six = arena.integer(6);
        let arg = arena.div(pi, six);
        let sin = arena.call(functions::SIN, &[arg]);
        assert_eq!(arena.format(sin), "Sin(Div(Pi, 6))");

        let x = arena.symbol("x");
        let half = arena.rational(1, 2);
        let body = arena.call(functions::EXP, &[x]);
        let w = arena.where_defs(body, &[("x", half)]);
        assert_eq!(arena.format(w), "Where(Exp(x), Def(x, 1/2))");
    }
}
