//! Extensions, the generators of fields.
//!
//! An extension is either an algebraic number or a named function applied
//! to exact arguments. Extensions live in the arena of a
//! [`CaCtx`](crate::CaCtx) and are shared by every field that uses them.

use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};

use calcite_ball::ComplexBall;
use calcite_poly::dense::DensePoly;
use calcite_qqbar::Qqbar;
use calcite_rings::Qi;
use rustc_hash::FxHasher;

use crate::ca::Ca;
use crate::ctx::CaCtx;
use crate::vec::CaVec;

/// Multiplier folding argument hashes into an extension hash.
const HASH_MULTIPLIER: u64 = 1_000_003;

/// Handle to an extension in the context arena.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExtHandle(u32);

impl ExtHandle {
    pub(crate) fn new(index: u32) -> Self {
        Self(index)
    }

    /// The arena index.
    #[must_use]
    pub fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for ExtHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExtHandle({})", self.0)
    }
}

/// What an extension is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CaExtHead {
    /// An algebraic number.
    QqBar,
    /// The constant π.
    Pi,
    /// Exponential.
    Exp,
    /// Principal logarithm.
    Log,
    /// Principal power `x^y`.
    Pow,
    /// Principal square root.
    Sqrt,
    /// Sine.
    Sin,
    /// Cosine.
    Cos,
    /// Tangent.
    Tan,
    /// Inverse tangent.
    Atan,
    /// Inverse sine.
    Asin,
    /// Inverse cosine.
    Acos,
    /// Real part.
    Re,
    /// Imaginary part.
    Im,
    /// Complex conjugate.
    Conjugate,
    /// Absolute value.
    Abs,
    /// Complex sign.
    Sign,
    /// Complex argument.
    Arg,
    /// Floor.
    Floor,
    /// Ceiling.
    Ceil,
}

impl CaExtHead {
    /// Number of arguments taken by the head.
    #[must_use]
    pub fn arity(self) -> usize {
        match self {
            Self::QqBar | Self::Pi => 0,
            Self::Pow => 2,
            _ => 1,
        }
    }

    /// Returns true if the head only takes real values.
    #[must_use]
    pub fn is_real_valued(self) -> bool {
        matches!(
            self,
            Self::Pi | Self::Re | Self::Im | Self::Abs | Self::Arg | Self::Floor | Self::Ceil
        )
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::QqBar => "Algebraic",
            Self::Pi => "Pi",
            Self::Exp => "Exp",
            Self::Log => "Log",
            Self::Pow => "Pow",
            Self::Sqrt => "Sqrt",
            Self::Sin => "Sin",
            Self::Cos => "Cos",
            Self::Tan => "Tan",
            Self::Atan => "Atan",
            Self::Asin => "Asin",
            Self::Acos => "Acos",
            Self::Re => "Re",
            Self::Im => "Im",
            Self::Conjugate => "Conjugate",
            Self::Abs => "Abs",
            Self::Sign => "Sign",
            Self::Arg => "Arg",
            Self::Floor => "Floor",
            Self::Ceil => "Ceil",
        }
    }

    fn code(self) -> u64 {
        self as u64
    }
}

impl fmt::Display for CaExtHead {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Payload of an extension.
#[derive(Clone, Debug)]
pub enum ExtData {
    /// An algebraic number with its minimal polynomial over `Q(i)`.
    Algebraic {
        /// The number.
        value: Qqbar,
        /// Monic polynomial over `Q(i)` vanishing at the number.
        reduction: DensePoly<Qi>,
        /// Whether `reduction` is irreducible over `Q(i)`.
        exact: bool,
    },
    /// A function applied to arguments.
    Function {
        /// The arguments.
        args: CaVec,
        /// Enclosure of the value.
        enclosure: ComplexBall,
        /// The value as an algebraic number, computed on first use.
        algebraic: OnceCell<Option<Qqbar>>,
    },
}

/// An extension: one generator of a field.
#[derive(Clone, Debug)]
pub struct CaExt {
    head: CaExtHead,
    hash: u64,
    depth: u32,
    data: ExtData,
}

impl CaExt {
    /// The extension generated by an algebraic number.
    #[must_use]
    pub fn new_qqbar(value: Qqbar) -> Self {
        let (reduction, exact) = value.reduction_poly_over_qi();
        let mut hasher = FxHasher::default();
        value.minpoly().hash(&mut hasher);
        let hash = fold_hash(CaExtHead::QqBar.code(), hasher.finish());

        Self {
            head: CaExtHead::QqBar,
            hash,
            depth: 0,
            data: ExtData::Algebraic {
                value,
                reduction,
                exact,
            },
        }
    }

    /// A constant such as π.
    #[must_use]
    pub fn new_const(head: CaExtHead) -> Self {
        Self {
            head,
            hash: head.code(),
            depth: 0,
            data: ExtData::Function {
                args: CaVec::new(),
                enclosure: function_enclosure(head, &[]),
                algebraic: OnceCell::new(),
            },
        }
    }

    /// `head(x)`.
    #[must_use]
    pub fn new_fx1(ctx: &CaCtx, head: CaExtHead, x: &Ca) -> Self {
        Self::new_fxn(ctx, head, CaVec::from(vec![x.clone()]))
    }

    /// `head(x, y)`.
    #[must_use]
    pub fn new_fx2(ctx: &CaCtx, head: CaExtHead, x: &Ca, y: &Ca) -> Self {
        Self::new_fxn(ctx, head, CaVec::from(vec![x.clone(), y.clone()]))
    }

    /// `head(args…)`.
    ///
    /// The arity is not checked; pairing a head with the wrong number of
    /// arguments is a caller bug.
    #[must_use]
    pub fn new_fxn(ctx: &CaCtx, head: CaExtHead, args: CaVec) -> Self {
        let mut hash = head.code();
        let mut depth = 0;
        let mut balls = Vec::with_capacity(args.len());
        for arg in &args {
            hash = fold_hash(hash, hash_ca(arg));
            depth = depth.max(ctx.depth(arg));
            balls.push(ctx.enclosure(arg));
        }

        Self {
            head,
            hash,
            depth: depth + 1,
            data: ExtData::Function {
                enclosure: function_enclosure(head, &balls),
                args,
                algebraic: OnceCell::new(),
            },
        }
    }

    /// The head.
    #[must_use]
    pub fn head(&self) -> CaExtHead {
        self.head
    }

    /// Structural hash, fixed at construction.
    #[must_use]
    pub fn hash_value(&self) -> u64 {
        self.hash
    }

    /// Nesting depth: 0 for algebraic numbers and constants, otherwise one
    /// more than the deepest generator among the arguments.
    #[must_use]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The payload.
    #[must_use]
    pub fn data(&self) -> &ExtData {
        &self.data
    }

    /// The arguments; empty for algebraic numbers and constants.
    #[must_use]
    pub fn args(&self) -> &[Ca] {
        match &self.data {
            ExtData::Algebraic { .. } => &[],
            ExtData::Function { args, .. } => args.as_slice(),
        }
    }

    /// Returns true for an algebraic number.
    #[must_use]
    pub fn is_algebraic(&self) -> bool {
        matches!(self.data, ExtData::Algebraic { .. })
    }

    /// The algebraic number of a [`CaExtHead::QqBar`] extension.
    #[must_use]
    pub fn qqbar(&self) -> Option<&Qqbar> {
        match &self.data {
            ExtData::Algebraic { value, .. } => Some(value),
            ExtData::Function { .. } => None,
        }
    }

    /// The reduction polynomial over `Q(i)` and its exactness flag.
    #[must_use]
    pub fn reduction(&self) -> Option<(&DensePoly<Qi>, bool)> {
        match &self.data {
            ExtData::Algebraic {
                reduction, exact, ..
            } => Some((reduction, *exact)),
            ExtData::Function { .. } => None,
        }
    }

    /// Enclosure of the value.
    #[must_use]
    pub fn enclosure(&self) -> ComplexBall {
        match &self.data {
            ExtData::Algebraic { value, .. } => value.enclosure(),
            ExtData::Function { enclosure, .. } => *enclosure,
        }
    }

    /// The cached algebraic value of a function extension, computing it
    /// with `init` on first use.
    pub(crate) fn cached_algebraic(&self, init: impl FnOnce() -> Option<Qqbar>) -> Option<&Qqbar> {
        match &self.data {
            ExtData::Algebraic { value, .. } => Some(value),
            ExtData::Function { algebraic, .. } => algebraic.get_or_init(init).as_ref(),
        }
    }
}

fn fold_hash(hash: u64, arg: u64) -> u64 {
    hash.wrapping_mul(HASH_MULTIPLIER).wrapping_add(arg)
}

/// Hash of an exact number, stable within one context.
pub(crate) fn hash_ca(x: &Ca) -> u64 {
    let mut hasher = FxHasher::default();
    x.hash(&mut hasher);
    hasher.finish()
}

/// Enclosure of `head` applied to enclosures of its arguments.
pub(crate) fn function_enclosure(head: CaExtHead, args: &[ComplexBall]) -> ComplexBall {
    match (head, args) {
        (CaExtHead::Pi, []) => ComplexBall::pi(),
        (CaExtHead::Exp, [t]) => t.exp(),
        (CaExtHead::Log, [t]) => t.log(),
        (CaExtHead::Sqrt, [t]) => t.sqrt(),
        (CaExtHead::Sin, [t]) => t.sin(),
        (CaExtHead::Cos, [t]) => t.cos(),
        (CaExtHead::Tan, [t]) => t.tan(),
        (CaExtHead::Atan, [t]) => t.atan(),
        (CaExtHead::Asin, [t]) => t.asin(),
        (CaExtHead::Acos, [t]) => t.acos(),
        (CaExtHead::Re, [t]) => t.re(),
        (CaExtHead::Im, [t]) => t.im(),
        (CaExtHead::Conjugate, [t]) => t.conj(),
        (CaExtHead::Abs, [t]) => t.abs(),
        (CaExtHead::Sign, [t]) if !t.contains_zero() => *t / t.abs(),
        (CaExtHead::Arg, [t]) => t.arg(),
        (CaExtHead::Pow, [x, y]) => (*y * x.log()).exp(),
        (CaExtHead::Floor, [t]) => round_enclosure(t, f64::floor),
        (CaExtHead::Ceil, [t]) => round_enclosure(t, f64::ceil),
        _ => ComplexBall::indeterminate(),
    }
}

fn round_enclosure(t: &ComplexBall, round: fn(f64) -> f64) -> ComplexBall {
    if !t.is_finite() {
        return ComplexBall::indeterminate();
    }
    let lo = round(t.mid.re - t.rad);
    let hi = round(t.mid.re + t.rad);
    if lo == hi {
        ComplexBall::real(lo)
    } else {
        ComplexBall::new(calcite_ball::Complex64::new(0.5 * (lo + hi), 0.0), 0.5 * (hi - lo))
    }
}
