//! Three-valued predicates.
//!
//! Each predicate answers [`Truth::True`] or [`Truth::False`] only when the
//! answer is certain. Enclosures refute, exact algebraic reasoning proves,
//! and everything else is [`Truth::Unknown`].

use calcite_poly::algorithms::gcd::poly_gcd;
use calcite_qqbar::Qqbar;
use calcite_rings::Ring;
use tracing::trace;

use crate::ca::{Ca, FieldElem, Special};
use crate::ctx::CaCtx;
use crate::ext::{CaExtHead, ExtHandle};
use crate::truth::Truth;

impl CaCtx {
    /// Whether `x` is zero.
    ///
    /// Special values other than unknown are never zero.
    #[must_use]
    pub fn check_is_zero(&self, x: &Ca) -> Truth {
        match x {
            Ca::Number(z) => Truth::from(z.is_zero()),
            Ca::Special(Special::Unknown) => Truth::Unknown,
            Ca::Special(_) => Truth::False,
            Ca::Element(elem) => self.element_is_zero(x, elem),
        }
    }

    fn element_is_zero(&self, x: &Ca, elem: &FieldElem) -> Truth {
        if !self.enclosure(x).contains_zero() {
            return Truth::False;
        }

        let field = self.field(elem.field);
        if field.len() == 1 {
            let g = field.generator(0);
            if let Some(value) = self.ext_algebraic_value(g) {
                return self.vanishes_at(elem, g, value);
            }
        }

        if self.numerator_is_nonzero_monomial(elem) {
            return Truth::False;
        }

        trace!(field = ?elem.field, "check_is_zero: undecided");
        Truth::Unknown
    }

    /// Whether an element of a one-generator field vanishes when the
    /// generator takes the algebraic value `value`.
    fn vanishes_at(&self, elem: &FieldElem, g: ExtHandle, value: &Qqbar) -> Truth {
        if let Some((_, true)) = self.ext(g).reduction() {
            // reduced modulo an irreducible polynomial, so nonzero
            return Truth::False;
        }
        let Some(num) = elem.value.numerator().to_univariate(0) else {
            return Truth::Unknown;
        };
        let (reduction, exact) = value.reduction_poly_over_qi();
        let r = num.rem_monic(&reduction);
        if r.is_zero() {
            return Truth::True;
        }
        if exact {
            return Truth::False;
        }
        let common = poly_gcd(&r, &reduction);
        if common.is_constant() {
            return Truth::False;
        }
        Truth::from(value.is_root_of_factor(&common))
    }

    /// A single-term numerator over generators that are all nonzero.
    fn numerator_is_nonzero_monomial(&self, elem: &FieldElem) -> bool {
        let [(m, _)] = elem.value.numerator().terms() else {
            return false;
        };
        let field = self.field(elem.field);
        m.exponents()
            .iter()
            .enumerate()
            .filter(|(_, &e)| e > 0)
            .all(|(v, _)| self.ext_is_nonzero(field.generator(v)))
    }

    fn ext_is_nonzero(&self, h: ExtHandle) -> bool {
        let ext = self.ext(h);
        ext.is_algebraic()
            || matches!(ext.head(), CaExtHead::Exp | CaExtHead::Pi)
            || !ext.enclosure().contains_zero()
    }

    /// Whether `a = b`.
    ///
    /// Signed infinities are equal when their directions are; other special
    /// values are compared structurally.
    pub fn check_equal(&mut self, a: &Ca, b: &Ca) -> Truth {
        if a.is_unknown() || b.is_unknown() {
            return Truth::Unknown;
        }
        match (a, b) {
            (Ca::Special(Special::SignedInf(d1)), Ca::Special(Special::SignedInf(d2))) => {
                self.check_equal(d1, d2)
            }
            (Ca::Special(_), _) | (_, Ca::Special(_)) => Truth::from(a == b),
            _ if a == b => Truth::True,
            (Ca::Number(_), Ca::Number(_)) => Truth::False,
            _ => {
                let diff = self.sub(a, b);
                self.check_is_zero(&diff)
            }
        }
    }

    /// Whether `x` is a real number. Infinities are not.
    pub fn check_is_real(&mut self, x: &Ca) -> Truth {
        match x {
            Ca::Number(z) => Truth::from(z.is_real()),
            Ca::Special(Special::Unknown) => Truth::Unknown,
            Ca::Special(_) => Truth::False,
            Ca::Element(elem) => {
                if self.enclosure(x).excludes_real_axis() {
                    return Truth::False;
                }
                if self.is_structurally_real(elem) {
                    return Truth::True;
                }
                let c = self.conj_deep(x);
                if c == *x {
                    return Truth::True;
                }
                self.check_equal(&c, x)
            }
        }
    }

    /// Whether `x` is purely imaginary (including zero).
    pub fn check_is_imaginary(&mut self, x: &Ca) -> Truth {
        let ix = self.mul(x, &Self::i());
        self.check_is_real(&ix)
    }

    /// Real coefficients over generators that only take real values.
    fn is_structurally_real(&self, elem: &FieldElem) -> bool {
        let real_coeffs = |p: &calcite_poly::sparse::SparsePoly<calcite_rings::Qi>| {
            p.terms().iter().all(|(_, c)| c.is_real())
        };
        real_coeffs(elem.value.numerator())
            && real_coeffs(elem.value.denominator())
            && self.field(elem.field).generators().iter().all(|&g| {
                let ext = self.ext(g);
                ext.head().is_real_valued() || ext.qqbar().is_some_and(Qqbar::is_real)
            })
    }

    /// The sign of `x` when it is provably real and its enclosure
    /// excludes zero.
    pub(crate) fn known_real_sign(&mut self, x: &Ca) -> Option<i8> {
        if let Ca::Number(z) = x {
            return z.is_real().then(|| z.re.signum());
        }
        if !self.check_is_real(x).is_true() {
            return None;
        }
        let ball = self.enclosure(x);
        if !ball.is_finite() {
            None
        } else if ball.mid.re - ball.rad > 0.0 {
            Some(1)
        } else if ball.mid.re + ball.rad < 0.0 {
            Some(-1)
        } else {
            None
        }
    }
}
