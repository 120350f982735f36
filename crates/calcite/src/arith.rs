//! Field arithmetic on exact numbers.
//!
//! Results are canonical: operands are lifted onto the union of their
//! generators, combined as rational functions and rebuilt through
//! [`CaCtx::make_element`]. Special values follow the extended-complex
//! rules (`∞ + ∞ = ∞` in the same direction, `0 · ∞` undefined, and so on).

use calcite_integers::Integer;
use calcite_rational_func::RationalFunction;
use calcite_rings::{Field, Qi, Ring, Q};
use tracing::trace;

use crate::ca::{Ca, FieldElem, Special};
use crate::ctx::CaCtx;
use crate::ext::CaExtHead;
use crate::truth::Truth;

type Rf = RationalFunction<Qi>;

impl CaCtx {
    fn combine(&mut self, a: &Ca, b: &Ca, op: impl FnOnce(&Rf, &Rf) -> Rf) -> Ca {
        let (generators, fa, fb) = self.lift_pair(a, b);
        let value = op(&fa, &fb);
        self.make_element(&generators, value)
    }

    /// `a + b`.
    pub fn add(&mut self, a: &Ca, b: &Ca) -> Ca {
        match (a, b) {
            (Ca::Number(x), Ca::Number(y)) => Ca::Number(x.clone() + y.clone()),
            (Ca::Special(_), _) | (_, Ca::Special(_)) => self.add_special(a, b),
            (Ca::Number(c), Ca::Element(e)) | (Ca::Element(e), Ca::Number(c)) => {
                let n = e.value.num_vars();
                Ca::Element(FieldElem {
                    field: e.field,
                    value: e.value.add_ref(&Rf::constant(c.clone(), n)),
                })
            }
            _ => self.combine(a, b, Rf::add_ref),
        }
    }

    fn add_special(&mut self, a: &Ca, b: &Ca) -> Ca {
        match (a, b) {
            (Ca::Special(Special::Undefined), _) | (_, Ca::Special(Special::Undefined)) => {
                Self::undefined()
            }
            (Ca::Special(Special::Unknown), _) | (_, Ca::Special(Special::Unknown)) => {
                Self::unknown()
            }
            (Ca::Special(Special::SignedInf(d1)), Ca::Special(Special::SignedInf(d2))) => {
                match self.check_equal(d1, d2) {
                    Truth::True => a.clone(),
                    Truth::False => Self::undefined(),
                    Truth::Unknown => Self::unknown(),
                }
            }
            (Ca::Special(_), Ca::Special(_)) => Self::undefined(),
            (Ca::Special(_), _) => a.clone(),
            _ => b.clone(),
        }
    }

    /// `-x`.
    pub fn neg(&mut self, x: &Ca) -> Ca {
        match x {
            Ca::Number(z) => Ca::Number(-z.clone()),
            Ca::Element(e) => Ca::Element(FieldElem {
                field: e.field,
                value: e.value.neg_ref(),
            }),
            Ca::Special(Special::SignedInf(d)) => {
                let d = self.neg(d);
                Ca::Special(Special::SignedInf(Box::new(d)))
            }
            Ca::Special(_) => x.clone(),
        }
    }

    /// `a - b`.
    pub fn sub(&mut self, a: &Ca, b: &Ca) -> Ca {
        match (a, b) {
            (Ca::Number(x), Ca::Number(y)) => Ca::Number(x.clone() - y.clone()),
            (Ca::Special(_), _) | (_, Ca::Special(_)) | (Ca::Number(_), _) | (_, Ca::Number(_)) => {
                let nb = self.neg(b);
                self.add(a, &nb)
            }
            _ => self.combine(a, b, Rf::sub_ref),
        }
    }

    /// `a · b`.
    pub fn mul(&mut self, a: &Ca, b: &Ca) -> Ca {
        match (a, b) {
            (Ca::Number(x), Ca::Number(y)) => Ca::Number(x.clone() * y.clone()),
            (Ca::Special(_), _) | (_, Ca::Special(_)) => self.mul_special(a, b),
            (Ca::Number(c), Ca::Element(e)) | (Ca::Element(e), Ca::Number(c)) => {
                if c.is_zero() {
                    Ca::zero()
                } else {
                    Ca::Element(FieldElem {
                        field: e.field,
                        value: e.value.scale(c),
                    })
                }
            }
            _ => self.combine(a, b, Rf::mul_ref),
        }
    }

    fn mul_special(&mut self, a: &Ca, b: &Ca) -> Ca {
        match (a, b) {
            (Ca::Special(Special::Undefined), _) | (_, Ca::Special(Special::Undefined)) => {
                Self::undefined()
            }
            (Ca::Special(Special::Unknown), _) | (_, Ca::Special(Special::Unknown)) => {
                Self::unknown()
            }
            (Ca::Special(Special::SignedInf(d1)), Ca::Special(Special::SignedInf(d2))) => {
                let d = self.mul(d1, d2);
                Ca::Special(Special::SignedInf(Box::new(d)))
            }
            (Ca::Special(_), Ca::Special(_)) => Self::uinf(),
            (Ca::Special(inf), x) | (x, Ca::Special(inf)) => self.scale_infinity(inf, x),
            _ => unreachable!("mul_special: no special operand"),
        }
    }

    /// `∞ · x` for finite `x`.
    fn scale_infinity(&mut self, inf: &Special, x: &Ca) -> Ca {
        match self.check_is_zero(x) {
            Truth::True => Self::undefined(),
            Truth::Unknown => Self::unknown(),
            Truth::False => match inf {
                Special::SignedInf(d) => {
                    let dx = self.mul(d, x);
                    self.signed_inf(&dx)
                }
                _ => Self::uinf(),
            },
        }
    }

    /// `x²`.
    pub fn sqr(&mut self, x: &Ca) -> Ca {
        self.mul(x, x)
    }

    /// `1/x`.
    ///
    /// The inverse of zero is complex infinity; the inverse of an
    /// infinity is zero. Unknown when `x` cannot be shown nonzero.
    pub fn inv(&mut self, x: &Ca) -> Ca {
        match x {
            Ca::Number(z) => z.inv().map_or_else(Self::uinf, Ca::Number),
            Ca::Special(Special::SignedInf(_) | Special::UnsignedInf) => Ca::zero(),
            Ca::Special(_) => x.clone(),
            Ca::Element(_) => match self.check_is_zero(x) {
                Truth::True => Self::uinf(),
                Truth::False => self.inv_unchecked(x),
                Truth::Unknown => {
                    trace!("inv: could not decide whether the operand is zero");
                    Self::unknown()
                }
            },
        }
    }

    /// `1/x` for `x` known to be nonzero.
    pub(crate) fn inv_unchecked(&mut self, x: &Ca) -> Ca {
        match x {
            Ca::Element(e) => match e.value.inv() {
                Some(value) => {
                    let generators = self.generators_of(x);
                    self.make_element(&generators, value)
                }
                None => Self::uinf(),
            },
            _ => self.inv(x),
        }
    }

    /// `a / b`.
    pub fn div(&mut self, a: &Ca, b: &Ca) -> Ca {
        if !a.is_special() && !b.is_special() && self.check_is_zero(b).is_false() {
            return self.div_nonzero(a, b);
        }
        let inv = self.inv(b);
        self.mul(a, &inv)
    }

    /// `a / b` for `b` known to be nonzero.
    pub(crate) fn div_nonzero(&mut self, a: &Ca, b: &Ca) -> Ca {
        match (a, b) {
            (Ca::Special(_), _) | (_, Ca::Special(_)) => self.div(a, b),
            (_, Ca::Number(y)) => match y.inv() {
                Some(w) => self.mul(a, &Ca::Number(w)),
                None => self.div(a, b),
            },
            _ => self.combine(a, b, Rf::div_ref),
        }
    }

    /// `x^n`.
    ///
    /// `x^0 = 1` for finite `x`; a negative power of zero is complex
    /// infinity.
    pub fn pow_int(&mut self, x: &Ca, n: i64) -> Ca {
        if x.is_special() {
            return self.pow_int_special(x, n);
        }
        if n >= 0 {
            return self.pow_unsigned(x, n.unsigned_abs());
        }
        let inv = self.inv(x);
        if inv.is_special() {
            return inv;
        }
        self.pow_unsigned(&inv, n.unsigned_abs())
    }

    fn pow_unsigned(&mut self, x: &Ca, mut e: u64) -> Ca {
        let mut result = Ca::one();
        let mut base = x.clone();
        while e > 0 {
            if e & 1 == 1 {
                result = self.mul(&result, &base);
            }
            e >>= 1;
            if e > 0 {
                base = self.sqr(&base);
            }
        }
        result
    }

    fn pow_int_special(&mut self, x: &Ca, n: i64) -> Ca {
        match x {
            Ca::Special(Special::SignedInf(d)) if n > 0 => {
                let d = self.pow_unsigned(d, n.unsigned_abs());
                Ca::Special(Special::SignedInf(Box::new(d)))
            }
            Ca::Special(Special::UnsignedInf) if n > 0 => Self::uinf(),
            Ca::Special(Special::SignedInf(_) | Special::UnsignedInf) if n < 0 => Ca::zero(),
            Ca::Special(Special::SignedInf(_) | Special::UnsignedInf) => Self::undefined(),
            _ => x.clone(),
        }
    }

    /// `x^y`, the principal power.
    ///
    /// Integer exponents use [`CaCtx::pow_int`] and half-integer exponents
    /// go through the square root. Anything else is a formal power.
    pub fn pow(&mut self, x: &Ca, y: &Ca) -> Ca {
        if let Some(q) = y.as_number().filter(|q| q.is_real()).map(|q| &q.re) {
            let num = q.numerator();
            let den = q.denominator();
            if let Some(n) = num.to_i64() {
                if den == Integer::from(1) {
                    return self.pow_int(x, n);
                }
                if den == Integer::from(2) && !x.is_special() {
                    let s = self.sqrt(x);
                    return self.pow_int(&s, n);
                }
            }
            if x.is_zero_number() && q.signum() > 0 {
                return Ca::zero();
            }
        }
        if x.is_unknown() || y.is_unknown() {
            return Self::unknown();
        }
        if x.is_special() || y.is_special() {
            return Self::undefined();
        }
        if x.is_zero_number() {
            return match y.as_number().map(|z| z.re.signum()) {
                Some(1) => Ca::zero(),
                _ => Self::undefined(),
            };
        }
        self.formal(CaExtHead::Pow, &[x.clone(), y.clone()])
    }

    /// `q · x` for a rational `q`.
    pub fn mul_rational(&mut self, x: &Ca, q: &Q) -> Ca {
        self.mul(x, &Ca::from(q.clone()))
    }
}
