//! Import of symbolic expressions.
//!
//! [`CaCtx::from_expr`] builds the exact number denoted by an expression of
//! a [`calcite_expr::ExprArena`], applying the context's functions to the
//! imported arguments. Symbols are looked up in the local definitions of
//! enclosing `Where` nodes.

use calcite_expr::{functions, ExprArena, ExprHandle, ExprNode, FunctionId, SymbolId};
use calcite_integers::{Integer, Rational};
use calcite_rings::Q;
use thiserror::Error;

use crate::ca::Ca;
use crate::ctx::CaCtx;
use crate::vec::CaVec;

/// Errors from [`CaCtx::from_expr`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FexprError {
    /// A symbol with no enclosing definition.
    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),

    /// A function head the importer does not handle.
    #[error("unsupported function `{0}`")]
    UnsupportedHead(String),

    /// A function applied to the wrong number of arguments.
    #[error("`{head}` expects {expected} argument(s), found {found}")]
    WrongArity {
        /// The function name.
        head: String,
        /// The number of arguments it takes.
        expected: usize,
        /// The number it was given.
        found: usize,
    },

    /// An exponent that is a special value.
    #[error("invalid exponent `{0}`")]
    InvalidExponent(String),
}

/// Definitions in scope, innermost last.
#[derive(Debug, Default)]
struct LocalDefs {
    symbols: Vec<SymbolId>,
    values: CaVec,
}

impl LocalDefs {
    fn lookup(&self, symbol: SymbolId) -> Option<&Ca> {
        let i = self.symbols.iter().rposition(|&s| s == symbol)?;
        self.values.get(i)
    }

    fn push(&mut self, symbol: SymbolId, value: Ca) {
        self.symbols.push(symbol);
        self.values.push(value);
    }

    fn truncate(&mut self, len: usize) {
        self.symbols.truncate(len);
        self.values.set_length(len);
    }
}

fn head_name(id: FunctionId) -> String {
    functions::name(id).map_or_else(|| format!("#{id}"), str::to_string)
}

fn check_arity(id: FunctionId, expected: usize, found: usize) -> Result<(), FexprError> {
    if expected == found {
        Ok(())
    } else {
        Err(FexprError::WrongArity {
            head: head_name(id),
            expected,
            found,
        })
    }
}

impl CaCtx {
    /// The exact number denoted by `expr`.
    ///
    /// # Errors
    ///
    /// Returns an error for unbound symbols, unknown heads, heads applied to
    /// the wrong number of arguments, and special exponents.
    ///
    /// # Example
    ///
    /// ```
    /// use calcite::{Ca, CaCtx};
    /// use calcite_expr::{functions, ExprArena};
    ///
    /// let mut arena = ExprArena::new();
    /// let two = arena.integer(2);
    /// let root = arena.call(functions::SQRT, &[two]);
    /// let square = arena.pow(root, two);
    ///
    /// let mut ctx = CaCtx::new();
    /// assert_eq!(ctx.from_expr(&arena, square), Ok(Ca::from(2)));
    /// ```
    pub fn from_expr(&mut self, arena: &ExprArena, expr: ExprHandle) -> Result<Ca, FexprError> {
        let mut defs = LocalDefs::default();
        self.import(arena, expr, &mut defs)
    }

    fn import(
        &mut self,
        arena: &ExprArena,
        expr: ExprHandle,
        defs: &mut LocalDefs,
    ) -> Result<Ca, FexprError> {
        match arena.get(expr) {
            ExprNode::Integer(n) => Ok(Ca::from(*n)),
            ExprNode::Rational(n, d) => {
                let q = Rational::new(Integer::from(*n), Integer::from(*d));
                Ok(Ca::from(Q::from(q)))
            }
            ExprNode::Symbol(id) => defs.lookup(*id).cloned().ok_or_else(|| {
                let name = arena.symbol_name(*id).unwrap_or("?");
                FexprError::UnknownSymbol(name.to_string())
            }),
            ExprNode::Add(args) => {
                let mut acc = Ca::zero();
                for &a in args {
                    let x = self.import(arena, a, defs)?;
                    acc = self.add(&acc, &x);
                }
                Ok(acc)
            }
            ExprNode::Mul(args) => {
                let mut acc = Ca::one();
                for &a in args {
                    let x = self.import(arena, a, defs)?;
                    acc = self.mul(&acc, &x);
                }
                Ok(acc)
            }
            ExprNode::Neg(a) => {
                let x = self.import(arena, *a, defs)?;
                Ok(self.neg(&x))
            }
            ExprNode::Div { num, den } => {
                let a = self.import(arena, *num, defs)?;
                let b = self.import(arena, *den, defs)?;
                Ok(self.div(&a, &b))
            }
            ExprNode::Pow { base, exp } => {
                let b = self.import(arena, *base, defs)?;
                let e = self.import(arena, *exp, defs)?;
                if e.is_special() {
                    return Err(FexprError::InvalidExponent(arena.format(*exp)));
                }
                Ok(self.pow(&b, &e))
            }
            ExprNode::Function { id, args } => {
                let mut values = CaVec::with_capacity(args.len());
                for &a in args {
                    values.push(self.import(arena, a, defs)?);
                }
                self.apply(*id, values.as_slice())
            }
            ExprNode::Where { body, defs: bindings } => {
                let outer = defs.symbols.len();
                let result = bindings
                    .iter()
                    .try_for_each(|&(symbol, value)| {
                        let x = self.import(arena, value, defs)?;
                        defs.push(symbol, x);
                        Ok::<(), FexprError>(())
                    })
                    .and_then(|()| self.import(arena, *body, defs));
                defs.truncate(outer);
                result
            }
        }
    }

    fn apply(&mut self, id: FunctionId, args: &[Ca]) -> Result<Ca, FexprError> {
        let constant = |value: Ca| check_arity(id, 0, args.len()).map(|()| value);
        match id {
            functions::PI => {
                check_arity(id, 0, args.len())?;
                Ok(self.pi())
            }
            functions::NUMBER_I => constant(Self::i()),
            functions::UNSIGNED_INFINITY => constant(Self::uinf()),
            functions::UNDEFINED => constant(Self::undefined()),
            functions::UNKNOWN => constant(Self::unknown()),
            functions::INFINITY => match args {
                [] => Ok(Self::pos_inf()),
                [d] => Ok(self.signed_inf(d)),
                _ => Err(FexprError::WrongArity {
                    head: head_name(id),
                    expected: 1,
                    found: args.len(),
                }),
            },
            _ => {
                let f: fn(&mut Self, &Ca) -> Ca = match id {
                    functions::EXP => Self::exp,
                    functions::LOG => Self::log,
                    functions::SQRT => Self::sqrt,
                    functions::SIN => Self::sin,
                    functions::COS => Self::cos,
                    functions::TAN => Self::tan,
                    functions::ATAN => Self::atan,
                    functions::ASIN => Self::asin,
                    functions::ACOS => Self::acos,
                    functions::RE => Self::re,
                    functions::IM => Self::im,
                    functions::CONJUGATE => Self::conj_deep,
                    functions::ABS => Self::abs,
                    functions::SIGN => Self::sgn,
                    functions::ARG => Self::arg,
                    functions::FLOOR => Self::floor,
                    functions::CEIL => Self::ceil,
                    _ => return Err(FexprError::UnsupportedHead(head_name(id))),
                };
                check_arity(id, 1, args.len())?;
                Ok(f(self, &args[0]))
            }
        }
    }
}
