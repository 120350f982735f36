//! The exact-number context.
//!
//! A [`CaCtx`] owns the arena of extensions and the table of fields. Both
//! are append-only: handles stay valid for the lifetime of the context,
//! and a value built in one context must not be used with another.

use std::hash::BuildHasherDefault;

use calcite_ball::ComplexBall;
use calcite_expr::InternTable;
use calcite_poly::algorithms::gcd::poly_inv_mod;
use calcite_poly::dense::DensePoly;
use calcite_poly::sparse::SparsePoly;
use calcite_qqbar::Qqbar;
use calcite_rational_func::RationalFunction;
use calcite_rings::{Qi, Ring, Q};
use hashbrown::HashMap;
use rustc_hash::FxHasher;
use smallvec::SmallVec;
use tracing::debug;

use crate::ca::{Ca, FieldElem, Special};
use crate::ext::{CaExt, CaExtHead, ExtHandle};
use crate::field::{CaField, FieldHandle, Generators};
use crate::options::CaOptions;
use crate::truth::Truth;
use crate::vec::CaVec;

type FxBuild = BuildHasherDefault<FxHasher>;

/// Owner of every extension and field used by exact numbers.
///
/// # Example
///
/// ```
/// use calcite::{Ca, CaCtx};
///
/// let mut ctx = CaCtx::new();
/// let two = Ca::from(2);
/// let s = ctx.sqrt(&two);
/// let square = ctx.sqr(&s);
/// assert_eq!(square, two);
/// ```
#[derive(Debug)]
pub struct CaCtx {
    options: CaOptions,
    exts: Vec<CaExt>,
    function_index: HashMap<(CaExtHead, CaVec), ExtHandle, FxBuild>,
    algebraic_index: HashMap<DensePoly<Q>, SmallVec<[ExtHandle; 2]>, FxBuild>,
    field_table: InternTable<Generators>,
    fields: Vec<CaField>,
}

impl Default for CaCtx {
    fn default() -> Self {
        Self::new()
    }
}

impl CaCtx {
    /// A context with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(CaOptions::default())
    }

    /// A context with the given options.
    #[must_use]
    pub fn with_options(options: CaOptions) -> Self {
        Self {
            options,
            exts: Vec::new(),
            function_index: HashMap::default(),
            algebraic_index: HashMap::default(),
            field_table: InternTable::new(),
            fields: Vec::new(),
        }
    }

    /// The options.
    #[must_use]
    pub fn options(&self) -> &CaOptions {
        &self.options
    }

    /// The extension behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle belongs to another context.
    #[must_use]
    pub fn ext(&self, handle: ExtHandle) -> &CaExt {
        &self.exts[handle.index() as usize]
    }

    /// The field behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle belongs to another context.
    #[must_use]
    pub fn field(&self, handle: FieldHandle) -> &CaField {
        &self.fields[handle.index() as usize]
    }

    /// Number of interned extensions.
    #[must_use]
    pub fn num_exts(&self) -> usize {
        self.exts.len()
    }

    /// Number of interned fields.
    #[must_use]
    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    /// The defining algebraic number of a number field.
    #[must_use]
    pub fn number_field_generator(&self, field: FieldHandle) -> Option<&Qqbar> {
        let field = self.field(field);
        if !field.is_number_field() {
            return None;
        }
        self.ext(field.generator(0)).qqbar()
    }

    // === Interning ===

    /// Interns an extension, returning the handle of an equal one if the
    /// arena already holds it.
    ///
    /// Function extensions are equal when head and arguments are; algebraic
    /// ones when they denote the same number.
    ///
    /// # Panics
    ///
    /// Panics if the arena holds `u32::MAX` extensions.
    pub fn intern_ext(&mut self, ext: CaExt) -> ExtHandle {
        if let Some(value) = ext.qqbar() {
            if let Some(h) = self.find_algebraic(value) {
                return h;
            }
            let key = value.minpoly().clone();
            let h = self.push_ext(ext);
            self.algebraic_index.entry(key).or_default().push(h);
            return h;
        }

        let key = (ext.head(), CaVec::from(ext.args()));
        if let Some(&h) = self.function_index.get(&key) {
            return h;
        }
        let h = self.push_ext(ext);
        self.function_index.insert(key, h);
        h
    }

    fn find_algebraic(&self, value: &Qqbar) -> Option<ExtHandle> {
        self.algebraic_index
            .get(value.minpoly())?
            .iter()
            .copied()
            .find(|&h| self.ext(h).qqbar() == Some(value))
    }

    fn push_ext(&mut self, ext: CaExt) -> ExtHandle {
        let index = u32::try_from(self.exts.len()).expect("extension arena capacity exceeded");
        debug!(index, head = %ext.head(), depth = ext.depth(), "interned extension");
        self.exts.push(ext);
        ExtHandle::new(index)
    }

    /// The field generated by a sorted tuple of distinct extensions.
    pub(crate) fn field_for(&mut self, generators: &[ExtHandle]) -> FieldHandle {
        debug_assert!(generators.windows(2).all(|w| w[0] < w[1]));
        let generators: Generators = generators.iter().copied().collect();
        let (id, new) = self.field_table.insert(generators.clone());
        if new {
            let number_field = generators.len() == 1 && self.ext(generators[0]).is_algebraic();
            debug!(id, generators = generators.len(), number_field, "created field");
            self.fields.push(CaField::new(generators, number_field));
        }
        FieldHandle::new(id)
    }

    // === Constructors ===

    /// The extension itself as an exact number.
    pub fn generator(&mut self, ext: ExtHandle) -> Ca {
        let field = self.field_for(&[ext]);
        Ca::Element(FieldElem {
            field,
            value: RationalFunction::var(0, 1),
        })
    }

    /// If `x` is a bare generator, its extension.
    #[must_use]
    pub fn as_generator(&self, x: &Ca) -> Option<ExtHandle> {
        let elem = x.as_element()?;
        let field = self.field(elem.field);
        (field.len() == 1 && elem.value == RationalFunction::var(0, 1)).then(|| field.generator(0))
    }

    /// The formal node `head(args…)`, with no simplification.
    ///
    /// The arity must match the head.
    pub fn formal(&mut self, head: CaExtHead, args: &[Ca]) -> Ca {
        debug_assert_ne!(head, CaExtHead::QqBar, "formal: algebraic numbers have no arguments");
        debug_assert_eq!(args.len(), head.arity(), "formal: wrong arity for {head}");

        let key = (head, CaVec::from(args));
        let h = match self.function_index.get(&key) {
            Some(&h) => h,
            None => {
                let ext = if args.is_empty() {
                    CaExt::new_const(head)
                } else {
                    CaExt::new_fxn(self, head, key.1)
                };
                self.intern_ext(ext)
            }
        };
        self.generator(h)
    }

    /// An algebraic number as the generator of its own number field.
    ///
    /// Gaussian rationals become numbers. Other values are kept as given,
    /// even roots of unity; see [`CaCtx::from_qqbar`] for the canonical
    /// constructor.
    pub fn algebraic(&mut self, value: Qqbar) -> Ca {
        if let Some(z) = value.as_gaussian_rational() {
            return Ca::Number(z);
        }
        let h = match self.find_algebraic(&value) {
            Some(h) => h,
            None => self.intern_ext(CaExt::new_qqbar(value)),
        };
        self.generator(h)
    }

    /// An algebraic number, with roots of unity written as powers of
    /// `exp(2πi/q)`.
    pub fn from_qqbar(&mut self, value: &Qqbar) -> Ca {
        if let Some(z) = value.as_gaussian_rational() {
            return Ca::Number(z);
        }
        if let Some((p, q)) = value.root_of_unity_order() {
            return self.root_of_unity(p, q);
        }
        self.algebraic(value.clone())
    }

    /// `exp(2πi p/q)` as `ζ^p` in `Q(ζ)`, `ζ = exp(2πi/q)`.
    ///
    /// # Panics
    ///
    /// Panics if `q` is zero.
    pub fn root_of_unity(&mut self, p: i64, q: u32) -> Ca {
        assert!(q > 0, "root_of_unity: order must be positive");
        let (p, q) = reduce_turn(p, q);
        match (p, q) {
            (_, 1) => Ca::one(),
            (_, 2) => Ca::from(-1),
            (1, 4) => Ca::Number(Qi::i()),
            (_, 4) => Ca::Number(-Qi::i()),
            _ => {
                let h = self.algebraic_ext(Qqbar::root_of_unity(1, q));
                let power = u32::try_from(p).unwrap_or(u32::MAX);
                let value = RationalFunction::from_poly(SparsePoly::var(0, 1).pow(power));
                self.make_element(&[h], value)
            }
        }
    }

    fn algebraic_ext(&mut self, value: Qqbar) -> ExtHandle {
        match self.find_algebraic(&value) {
            Some(h) => h,
            None => self.intern_ext(CaExt::new_qqbar(value)),
        }
    }

    /// π.
    pub fn pi(&mut self) -> Ca {
        self.formal(CaExtHead::Pi, &[])
    }

    /// The imaginary unit.
    #[must_use]
    pub fn i() -> Ca {
        Ca::Number(Qi::i())
    }

    /// `+∞`.
    #[must_use]
    pub fn pos_inf() -> Ca {
        Ca::Special(Special::SignedInf(Box::new(Ca::one())))
    }

    /// `-∞`.
    #[must_use]
    pub fn neg_inf() -> Ca {
        Ca::Special(Special::SignedInf(Box::new(Ca::from(-1))))
    }

    /// Infinity in the direction of `x`, which is normalized to `sgn(x)`.
    pub fn signed_inf(&mut self, x: &Ca) -> Ca {
        if x.is_special() {
            return Self::undefined();
        }
        match self.check_is_zero(x) {
            Truth::True => Self::undefined(),
            Truth::False => {
                let direction = self.sgn(x);
                Ca::Special(Special::SignedInf(Box::new(direction)))
            }
            Truth::Unknown => Self::unknown(),
        }
    }

    /// Complex infinity.
    #[must_use]
    pub fn uinf() -> Ca {
        Ca::Special(Special::UnsignedInf)
    }

    /// The undefined value.
    #[must_use]
    pub fn undefined() -> Ca {
        Ca::Special(Special::Undefined)
    }

    /// The unknown value.
    #[must_use]
    pub fn unknown() -> Ca {
        Ca::Special(Special::Unknown)
    }

    // === Numerics ===

    /// An enclosure of the value; the whole plane for special values.
    #[must_use]
    pub fn enclosure(&self, x: &Ca) -> ComplexBall {
        match x {
            Ca::Number(z) => qi_ball(z),
            Ca::Special(_) => ComplexBall::indeterminate(),
            Ca::Element(elem) => {
                let balls: SmallVec<[ComplexBall; 4]> = self
                    .field(elem.field)
                    .generators()
                    .iter()
                    .map(|&g| self.ext(g).enclosure())
                    .collect();
                let num = poly_enclosure(elem.value.numerator(), &balls);
                if elem.value.is_polynomial() {
                    num
                } else {
                    num / poly_enclosure(elem.value.denominator(), &balls)
                }
            }
        }
    }

    /// The largest depth among the generators of `x`.
    #[must_use]
    pub fn depth(&self, x: &Ca) -> u32 {
        match x {
            Ca::Number(_) => 0,
            Ca::Special(Special::SignedInf(direction)) => self.depth(direction),
            Ca::Special(_) => 0,
            Ca::Element(elem) => self
                .field(elem.field)
                .generators()
                .iter()
                .map(|&g| self.ext(g).depth())
                .max()
                .unwrap_or(0),
        }
    }

    // === Field elements ===

    /// The generators of the field holding `x`; none for numbers.
    pub(crate) fn generators_of(&self, x: &Ca) -> Generators {
        match x {
            Ca::Element(elem) => self.field(elem.field).generators().iter().copied().collect(),
            _ => Generators::new(),
        }
    }

    /// `x` as a rational function of `generators`, a sorted superset of
    /// the generators of its field.
    ///
    /// # Panics
    ///
    /// Panics on special values, or if a generator of `x` is missing.
    pub(crate) fn lift(&self, x: &Ca, generators: &[ExtHandle]) -> RationalFunction<Qi> {
        match x {
            Ca::Number(z) => RationalFunction::constant(z.clone(), generators.len()),
            Ca::Element(elem) => {
                let own = self.field(elem.field).generators();
                if own == generators {
                    return elem.value.clone();
                }
                let map: Vec<usize> = own
                    .iter()
                    .map(|g| {
                        generators
                            .binary_search(g)
                            .unwrap_or_else(|_| panic!("lift: generator {g:?} not in target tuple"))
                    })
                    .collect();
                elem.value.remap(&map, generators.len())
            }
            Ca::Special(_) => panic!("lift: special values have no field representation"),
        }
    }

    /// Both operands over the union of their generators.
    pub(crate) fn lift_pair(
        &self,
        a: &Ca,
        b: &Ca,
    ) -> (Generators, RationalFunction<Qi>, RationalFunction<Qi>) {
        let mut union = self.generators_of(a);
        union.extend(self.generators_of(b));
        union.sort_unstable();
        union.dedup();
        let fa = self.lift(a, &union);
        let fb = self.lift(b, &union);
        (union, fa, fb)
    }

    /// Builds the canonical value of a rational function in `generators`.
    ///
    /// Algebraic generators are reduced by their minimal polynomial over
    /// `Q(i)`, unused generators are dropped, and in a number field the
    /// denominator is inverted modulo the minimal polynomial. A result
    /// without generators is a number.
    pub(crate) fn make_element(&mut self, generators: &[ExtHandle], value: RationalFunction<Qi>) -> Ca {
        let mut value = value;
        for (v, &g) in generators.iter().enumerate() {
            if let Some((reduction, _)) = self.ext(g).reduction() {
                if value.used_vars()[v] {
                    value = value.reduce_var(v, reduction);
                }
            }
        }

        let used = value.used_vars();
        let kept: Generators = generators
            .iter()
            .zip(&used)
            .filter(|(_, &u)| u)
            .map(|(&g, _)| g)
            .collect();
        if kept.is_empty() {
            return Ca::Number(value.as_constant().unwrap_or_default());
        }
        if kept.len() < generators.len() {
            let mut map = Vec::with_capacity(used.len());
            let mut next = 0;
            for &u in &used {
                map.push(next);
                if u {
                    next += 1;
                }
            }
            value = value.remap(&map, kept.len());
        }

        if kept.len() == 1 && !value.is_polynomial() {
            if let Some(inverted) = self.invert_denominator(kept[0], &value) {
                value = inverted;
                if let Some(c) = value.as_constant() {
                    return Ca::Number(c);
                }
            }
        }

        let field = self.field_for(&kept);
        Ca::Element(FieldElem { field, value })
    }

    /// `num/den` as a polynomial modulo the reduction polynomial of an
    /// algebraic generator.
    fn invert_denominator(&self, g: ExtHandle, value: &RationalFunction<Qi>) -> Option<RationalFunction<Qi>> {
        let (reduction, _) = self.ext(g).reduction()?;
        let num = value.numerator().to_univariate(0)?;
        let den = value.denominator().to_univariate(0)?;
        let inv = poly_inv_mod(&den, reduction)?;
        let p = num.mul(&inv).rem_monic(reduction);
        Some(RationalFunction::from_poly(SparsePoly::from_univariate(&p, 0, 1)))
    }

    // === Algebraic values of function extensions ===

    /// The value of an extension as an algebraic number, when known.
    ///
    /// Computed once per function extension and cached in it.
    pub(crate) fn ext_algebraic_value(&self, h: ExtHandle) -> Option<&Qqbar> {
        let ext = self.ext(h);
        ext.cached_algebraic(|| match (ext.head(), ext.args()) {
            (CaExtHead::Exp, [t]) => {
                let r = self.rational_multiple_of_pi_i(t)?;
                let (p, q) = half_turn(&r)?;
                Some(Qqbar::root_of_unity(p, q))
            }
            (CaExtHead::Sqrt, [Ca::Number(z)]) => Some(Qqbar::sqrt_gaussian(z)),
            _ => None,
        })
    }

    /// `r` with `t = r·π·i`, read off the representation.
    pub(crate) fn rational_multiple_of_pi_i(&self, t: &Ca) -> Option<Q> {
        let elem = t.as_element()?;
        let field = self.field(elem.field);
        if field.len() != 1
            || self.ext(field.generator(0)).head() != CaExtHead::Pi
            || !elem.value.is_polynomial()
        {
            return None;
        }
        let [(m, c)] = elem.value.numerator().terms() else {
            return None;
        };
        (m.exponent(0) == 1 && c.re.is_zero()).then(|| c.im.clone())
    }
}

/// `(p, q)` in lowest terms with `0 ≤ p < q`.
pub(crate) fn reduce_turn(p: i64, q: u32) -> (i64, u32) {
    let qi = i64::from(q);
    let p = p.rem_euclid(qi);
    let g = gcd_i64(p, qi);
    let q = u32::try_from(qi / g).unwrap_or(q);
    (p / g, q)
}

/// `(p, q)` with `exp(iπr) = exp(2πi p/q)`.
pub(crate) fn half_turn(r: &Q) -> Option<(i64, u32)> {
    let p = r.numerator().to_i64()?;
    let q = r.denominator().to_i64()?.checked_mul(2)?;
    Some((p, u32::try_from(q).ok()?))
}

fn gcd_i64(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.abs().max(1)
}

fn qi_ball(z: &Qi) -> ComplexBall {
    let (re, im) = z.to_f64_pair();
    ComplexBall::approx(re, im)
}

fn poly_enclosure(p: &SparsePoly<Qi>, values: &[ComplexBall]) -> ComplexBall {
    let mut acc = ComplexBall::real(0.0);
    for (m, c) in p.terms() {
        let mut term = qi_ball(c);
        for (v, &e) in m.exponents().iter().enumerate() {
            if e > 0 {
                term = term * values[v].pow_int(i64::from(e));
            }
        }
        acc = acc + term;
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions_are_interned() {
        let mut ctx = CaCtx::new();
        let a = ctx.formal(CaExtHead::Exp, &[Ca::one()]);
        let b = ctx.formal(CaExtHead::Exp, &[Ca::one()]);
        assert_eq!(a, b);
        assert_eq!(ctx.num_exts(), 1);
        assert_eq!(ctx.num_fields(), 1);

        let pi1 = ctx.pi();
        let pi2 = ctx.pi();
        assert_eq!(pi1, pi2);
        assert_eq!(ctx.num_exts(), 2);
    }

    #[test]
    fn test_algebraic_interning() {
        let mut ctx = CaCtx::new();
        let s1 = ctx.algebraic(Qqbar::sqrt_rational(&Q::from_integer(2)));
        let s2 = ctx.algebraic(Qqbar::sqrt_rational(&Q::from_integer(8)).conj());
        // sqrt(8) = 2 sqrt(2) has a different minimal polynomial
        assert_ne!(s1, s2);
        let s3 = ctx.algebraic(Qqbar::sqrt_rational(&Q::from_integer(2)));
        assert_eq!(s1, s3);
        assert!(ctx.as_generator(&s1).is_some());
    }

    #[test]
    fn test_gaussian_algebraic_is_number() {
        let mut ctx = CaCtx::new();
        let i = ctx.algebraic(Qqbar::i());
        assert_eq!(i, CaCtx::i());
        assert_eq!(ctx.num_exts(), 0);
    }

    #[test]
    fn test_root_of_unity_small_orders() {
        let mut ctx = CaCtx::new();
        assert_eq!(ctx.root_of_unity(3, 3), Ca::one());
        assert_eq!(ctx.root_of_unity(1, 2), Ca::from(-1));
        assert_eq!(ctx.root_of_unity(3, 4), Ca::Number(-Qi::i()));
        assert_eq!(ctx.root_of_unity(2, 8), CaCtx::i());
    }

    #[test]
    fn test_root_of_unity_powers() {
        let mut ctx = CaCtx::new();
        let z = ctx.root_of_unity(1, 8);
        let z3 = ctx.root_of_unity(3, 8);
        let cube = ctx.pow_int(&z, 3);
        assert_eq!(cube, z3);
        assert_eq!(ctx.field(z.field().unwrap()), ctx.field(z3.field().unwrap()));

        // exp(2πi·7/8) = ζ^-1
        let inv = ctx.inv(&z);
        assert_eq!(inv, ctx.root_of_unity(-1, 8));
    }

    #[test]
    fn test_number_field_denominator_inverted() {
        let mut ctx = CaCtx::new();
        let s = ctx.sqrt(&Ca::from(2));
        let inv = ctx.inv(&s);
        let elem = inv.as_element().unwrap();
        assert!(elem.value().is_polynomial());
        let back = ctx.mul(&inv, &s);
        assert_eq!(back, Ca::one());
    }

    #[test]
    fn test_enclosure_of_element() {
        let mut ctx = CaCtx::new();
        let pi = ctx.pi();
        let x = ctx.div(&pi, &Ca::from(4));
        let ball = ctx.enclosure(&x);
        assert!(ball.contains(calcite_ball::Complex64::new(std::f64::consts::FRAC_PI_4, 0.0)));
        assert!(ball.rad < 1e-12);
    }

    #[test]
    fn test_depth() {
        let mut ctx = CaCtx::new();
        let e = ctx.formal(CaExtHead::Exp, &[Ca::one()]);
        let ee = ctx.formal(CaExtHead::Exp, &[e.clone()]);
        assert_eq!(ctx.depth(&Ca::one()), 0);
        assert_eq!(ctx.depth(&e), 1);
        assert_eq!(ctx.depth(&ee), 2);
        let sum = ctx.add(&e, &ee);
        assert_eq!(ctx.depth(&sum), 2);
    }

    #[test]
    fn test_unused_generators_dropped() {
        let mut ctx = CaCtx::new();
        let pi = ctx.pi();
        let e = ctx.formal(CaExtHead::Exp, &[Ca::one()]);
        let sum = ctx.add(&pi, &e);
        let back = ctx.sub(&sum, &e);
        assert_eq!(back, pi);
    }
}
