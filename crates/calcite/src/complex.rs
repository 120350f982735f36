//! Conjugation, real and imaginary parts, absolute value, sign and
//! argument.
//!
//! Each function is exact when the structure of its argument allows it and
//! otherwise returns a formal extension such as `Re(x)`.

use calcite_ball::ComplexBall;
use calcite_integers::Integer;
use calcite_qqbar::Qqbar;
use calcite_rings::{Qi, Ring, Q};
use num_traits::Zero;
use smallvec::SmallVec;

use crate::ca::{Ca, Special};
use crate::ctx::CaCtx;
use crate::ext::{CaExtHead, ExtHandle};
use crate::truth::Truth;

impl CaCtx {
    /// The complex conjugate, pushed through the structure of `x`.
    ///
    /// Generators are conjugated one by one. A generator whose conjugate
    /// cannot be expressed, such as `log(x)` on the branch cut, becomes a
    /// formal `Conjugate`.
    pub fn conj_deep(&mut self, x: &Ca) -> Ca {
        match x {
            Ca::Number(z) => Ca::Number(z.conj()),
            Ca::Special(Special::SignedInf(d)) => {
                let d = self.conj_deep(d);
                Ca::Special(Special::SignedInf(Box::new(d)))
            }
            Ca::Special(_) => x.clone(),
            Ca::Element(elem) => {
                let generators = self.generators_of(x);
                let values: SmallVec<[Ca; 4]> =
                    generators.iter().map(|&g| self.conj_ext(g)).collect();
                let value = elem.value.map_coeffs(Qi::conj);

                let fixed = generators
                    .iter()
                    .zip(&values)
                    .all(|(&g, v)| self.as_generator(v) == Some(g));
                if fixed {
                    return self.make_element(&generators, value);
                }
                self.evaluate(&value, &values, "conj_deep")
            }
        }
    }

    /// The complex conjugate, without looking inside generators.
    pub fn conj_shallow(&mut self, x: &Ca) -> Ca {
        match x {
            Ca::Number(z) => Ca::Number(z.conj()),
            Ca::Special(Special::SignedInf(d)) => {
                let d = self.conj_shallow(d);
                Ca::Special(Special::SignedInf(Box::new(d)))
            }
            Ca::Special(_) => x.clone(),
            Ca::Element(_) => {
                if let Some(h) = self.as_generator(x) {
                    if self.ext(h).head() == CaExtHead::Conjugate {
                        return self.ext(h).args()[0].clone();
                    }
                }
                if self.check_is_real(x).is_true() {
                    return x.clone();
                }
                self.formal(CaExtHead::Conjugate, &[x.clone()])
            }
        }
    }

    /// The conjugate of a single generator.
    fn conj_ext(&mut self, h: ExtHandle) -> Ca {
        let ext = self.ext(h);
        let head = ext.head();
        if let Some(value) = ext.qqbar() {
            if value.is_real() {
                return self.generator(h);
            }
            if value.root_of_unity_order().is_some() {
                let g = self.generator(h);
                return self.inv_unchecked(&g);
            }
            let c = value.conj();
            return self.algebraic(c);
        }
        if head.is_real_valued() {
            return self.generator(h);
        }

        let args: SmallVec<[Ca; 2]> = ext.args().iter().cloned().collect();
        let ball = self.enclosure(&args[0]);
        match head {
            CaExtHead::Conjugate => args[0].clone(),
            CaExtHead::Exp => {
                let t = self.conj_deep(&args[0]);
                self.exp(&t)
            }
            CaExtHead::Sin | CaExtHead::Cos | CaExtHead::Tan => {
                let t = self.conj_deep(&args[0]);
                self.formal(head, &[t])
            }
            CaExtHead::Log | CaExtHead::Sqrt if ball.avoids_negative_real_axis() => {
                let t = self.conj_deep(&args[0]);
                self.formal(head, &[t])
            }
            CaExtHead::Pow if ball.avoids_negative_real_axis() => {
                let base = self.conj_deep(&args[0]);
                let exponent = self.conj_deep(&args[1]);
                self.formal(head, &[base, exponent])
            }
            CaExtHead::Atan
                if ball.is_finite()
                    && (ball.mid.re.abs() > ball.rad || ball.mid.im.abs() + ball.rad < 1.0) =>
            {
                let t = self.conj_deep(&args[0]);
                self.formal(head, &[t])
            }
            CaExtHead::Asin | CaExtHead::Acos
                if ball.excludes_real_axis() || ball.mid.re.abs() + ball.rad < 1.0 =>
            {
                let t = self.conj_deep(&args[0]);
                self.formal(head, &[t])
            }
            CaExtHead::Sign => {
                let t = self.conj_deep(&args[0]);
                self.sgn(&t)
            }
            _ => {
                let g = self.generator(h);
                self.formal(CaExtHead::Conjugate, &[g])
            }
        }
    }

    /// Returns true if every generator of `x` is an algebraic number.
    pub(crate) fn is_algebraic_element(&self, x: &Ca) -> bool {
        x.as_element().is_some_and(|e| {
            self.field(e.field)
                .generators()
                .iter()
                .all(|&g| self.ext(g).is_algebraic())
        })
    }

    /// The real part.
    pub fn re(&mut self, x: &Ca) -> Ca {
        match x {
            Ca::Number(z) => Ca::from(z.re.clone()),
            Ca::Special(s) => self.special_part(s, x, Self::re),
            Ca::Element(_) => {
                if self.check_is_real(x).is_true() {
                    return x.clone();
                }
                if self.is_algebraic_element(x) {
                    let c = self.conj_deep(x);
                    let s = self.add(x, &c);
                    return self.mul(&s, &Ca::from_ratio(1, 2));
                }
                self.formal(CaExtHead::Re, &[x.clone()])
            }
        }
    }

    /// The imaginary part.
    pub fn im(&mut self, x: &Ca) -> Ca {
        match x {
            Ca::Number(z) => Ca::from(z.im.clone()),
            Ca::Special(s) => self.special_part(s, x, Self::im),
            Ca::Element(_) => {
                if self.check_is_real(x).is_true() {
                    return Ca::zero();
                }
                if self.is_algebraic_element(x) {
                    let c = self.conj_deep(x);
                    let d = self.sub(x, &c);
                    return self.mul(&d, &Ca::Number(Qi::new(Q::zero(), Q::new(-1, 2))));
                }
                self.formal(CaExtHead::Im, &[x.clone()])
            }
        }
    }

    /// `Re` or `Im` of a special value: an infinity keeps the signed
    /// direction of the part, if any.
    fn special_part(&mut self, s: &Special, x: &Ca, part: fn(&mut Self, &Ca) -> Ca) -> Ca {
        match s {
            Special::SignedInf(d) => {
                let p = part(self, d);
                match self.check_is_zero(&p) {
                    Truth::True => Self::undefined(),
                    Truth::False => self.signed_inf(&p),
                    Truth::Unknown => Self::unknown(),
                }
            }
            Special::UnsignedInf | Special::Undefined => Self::undefined(),
            Special::Unknown => x.clone(),
        }
    }

    /// The absolute value.
    pub fn abs(&mut self, x: &Ca) -> Ca {
        match x {
            Ca::Number(z) => self.sqrt_of_rational(&z.norm()),
            Ca::Special(Special::SignedInf(_) | Special::UnsignedInf) => Self::pos_inf(),
            Ca::Special(_) => x.clone(),
            Ca::Element(_) => {
                match self.known_real_sign(x) {
                    Some(s) if s > 0 => return x.clone(),
                    Some(_) => return self.neg(x),
                    None => {}
                }
                if self.is_algebraic_element(x) {
                    let c = self.conj_deep(x);
                    let n = self.mul(x, &c);
                    if let Ca::Number(z) = &n {
                        if z.is_real() {
                            return self.sqrt_of_rational(&z.re);
                        }
                    }
                }
                self.formal(CaExtHead::Abs, &[x.clone()])
            }
        }
    }

    fn sqrt_of_rational(&mut self, r: &Q) -> Ca {
        match r.sqrt_exact() {
            Some(s) => Ca::from(s),
            None => self.from_qqbar(&Qqbar::sqrt_rational(r)),
        }
    }

    /// The complex sign `x/|x|`, with `sgn(0) = 0`.
    pub fn sgn(&mut self, x: &Ca) -> Ca {
        match x {
            Ca::Number(z) if z.is_zero() => Ca::zero(),
            Ca::Number(z) if z.is_real() => Ca::from(i64::from(z.re.signum())),
            Ca::Number(z) if z.re.is_zero() => {
                Ca::Number(Qi::new(Q::zero(), Q::from_integer(i64::from(z.im.signum()))))
            }
            Ca::Number(_) => {
                let a = self.abs(x);
                self.div_nonzero(x, &a)
            }
            Ca::Special(Special::SignedInf(d)) => (**d).clone(),
            Ca::Special(Special::UnsignedInf | Special::Undefined) => Self::undefined(),
            Ca::Special(Special::Unknown) => x.clone(),
            Ca::Element(_) => {
                match self.check_is_zero(x) {
                    Truth::True => return Ca::zero(),
                    Truth::Unknown => return self.formal(CaExtHead::Sign, &[x.clone()]),
                    Truth::False => {}
                }
                if let Some(s) = self.known_real_sign(x) {
                    return Ca::from(i64::from(s));
                }
                if self.is_algebraic_element(x) {
                    let a = self.abs(x);
                    let formal_abs = self
                        .as_generator(&a)
                        .is_some_and(|h| self.ext(h).head() == CaExtHead::Abs);
                    if !formal_abs {
                        return self.div_nonzero(x, &a);
                    }
                }
                self.formal(CaExtHead::Sign, &[x.clone()])
            }
        }
    }

    /// The principal argument in `(-π, π]`, with `arg(0) = 0`.
    pub fn arg(&mut self, x: &Ca) -> Ca {
        match x {
            Ca::Number(z) if z.is_zero() => Ca::zero(),
            Ca::Number(z) if z.is_real() => {
                if z.re.signum() > 0 {
                    Ca::zero()
                } else {
                    self.pi()
                }
            }
            Ca::Number(z) if z.re.is_zero() => {
                let pi = self.pi();
                let half = Ca::from_ratio(i64::from(z.im.signum()), 2);
                self.mul(&pi, &half)
            }
            Ca::Number(_) => self.formal(CaExtHead::Arg, &[x.clone()]),
            Ca::Special(Special::SignedInf(d)) => {
                let d = (**d).clone();
                self.arg(&d)
            }
            Ca::Special(Special::UnsignedInf | Special::Undefined) => Self::undefined(),
            Ca::Special(Special::Unknown) => x.clone(),
            Ca::Element(_) => match self.known_real_sign(x) {
                Some(s) if s > 0 => Ca::zero(),
                Some(_) => self.pi(),
                None => self.formal(CaExtHead::Arg, &[x.clone()]),
            },
        }
    }

    /// The floor of a real number.
    pub fn floor(&mut self, x: &Ca) -> Ca {
        self.round_to_integer(x, CaExtHead::Floor)
    }

    /// The ceiling of a real number.
    pub fn ceil(&mut self, x: &Ca) -> Ca {
        self.round_to_integer(x, CaExtHead::Ceil)
    }

    fn round_to_integer(&mut self, x: &Ca, head: CaExtHead) -> Ca {
        let round = if head == CaExtHead::Floor { f64::floor } else { f64::ceil };
        match x {
            Ca::Number(z) if z.is_real() => Ca::from(Q::from(round_rational(&z.re, head))),
            Ca::Number(_) => Self::undefined(),
            Ca::Special(Special::SignedInf(_)) => {
                if self.check_is_real(x.inf_direction().unwrap_or(x)).is_true() {
                    x.clone()
                } else {
                    Self::undefined()
                }
            }
            Ca::Special(Special::Unknown) => x.clone(),
            Ca::Special(_) => Self::undefined(),
            Ca::Element(_) => match self.check_is_real(x) {
                Truth::False => Self::undefined(),
                Truth::Unknown => self.formal(head, &[x.clone()]),
                Truth::True => match integer_in(&self.enclosure(x), round) {
                    Some(n) => Ca::from(n),
                    None => self.formal(head, &[x.clone()]),
                },
            },
        }
    }
}

/// The common rounding of every real point of the ball, if there is one.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn integer_in(ball: &ComplexBall, round: fn(f64) -> f64) -> Option<i64> {
    let lo = round(ball.mid.re - ball.rad);
    let hi = round(ball.mid.re + ball.rad);
    (ball.is_finite() && lo == hi && lo.abs() < 9.0e15).then(|| lo as i64)
}

/// `⌊r⌋` or `⌈r⌉` for a rational `r`.
fn round_rational(r: &Q, head: CaExtHead) -> Integer {
    let num = r.numerator();
    let den = r.denominator();
    let q = &num / &den;
    let exact = (&num % &den).is_zero();
    if exact {
        return q;
    }
    match head {
        CaExtHead::Floor if num.is_negative() => q - Integer::from(1),
        CaExtHead::Ceil if !num.is_negative() => q + Integer::from(1),
        _ => q,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_parts() {
        let mut ctx = CaCtx::new();
        let z = Ca::gaussian(3, 4);
        assert_eq!(ctx.re(&z), Ca::from(3));
        assert_eq!(ctx.im(&z), Ca::from(4));
        assert_eq!(ctx.abs(&z), Ca::from(5));
        assert_eq!(ctx.conj_deep(&z), Ca::gaussian(3, -4));
        assert_eq!(ctx.sgn(&z), Ca::Number(Qi::new(Q::new(3, 5), Q::new(4, 5))));
    }

    #[test]
    fn test_abs_irrational() {
        let mut ctx = CaCtx::new();
        let a = ctx.abs(&Ca::gaussian(1, 1));
        let s = ctx.sqrt(&Ca::from(2));
        assert_eq!(a, s);
    }

    #[test]
    fn test_conj_root_of_unity() {
        let mut ctx = CaCtx::new();
        let z = ctx.root_of_unity(1, 5);
        let c = ctx.conj_deep(&z);
        assert_eq!(c, ctx.root_of_unity(4, 5));
        let back = ctx.conj_deep(&c);
        assert_eq!(back, z);
        assert_eq!(ctx.abs(&z), Ca::one());
        assert_eq!(ctx.sgn(&z), z);
    }

    #[test]
    fn test_re_im_algebraic() {
        let mut ctx = CaCtx::new();
        let z = ctx.root_of_unity(1, 8);
        let re = ctx.re(&z);
        let im = ctx.im(&z);
        assert_eq!(re, im);
        assert_eq!(ctx.sqr(&re), Ca::from_ratio(1, 2));
        assert_eq!(ctx.check_is_real(&re), Truth::True);
    }

    #[test]
    fn test_conj_exp() {
        let mut ctx = CaCtx::new();
        let e = ctx.formal(CaExtHead::Exp, &[CaCtx::i()]);
        let c = ctx.conj_deep(&e);
        let expected = ctx.inv(&e);
        assert_eq!(c, expected);
        assert_eq!(ctx.conj_deep(&c), e);
    }

    #[test]
    fn test_conj_shallow() {
        let mut ctx = CaCtx::new();
        let pi = ctx.pi();
        assert_eq!(ctx.conj_shallow(&pi), pi);
        let e = ctx.formal(CaExtHead::Exp, &[CaCtx::i()]);
        let c = ctx.conj_shallow(&e);
        let h = ctx.as_generator(&c).unwrap();
        assert_eq!(ctx.ext(h).head(), CaExtHead::Conjugate);
        assert_eq!(ctx.conj_shallow(&c), e);
    }

    #[test]
    fn test_log_on_branch_cut_stays_formal() {
        let mut ctx = CaCtx::new();
        let pi = ctx.pi();
        let t = ctx.neg(&pi);
        let l = ctx.formal(CaExtHead::Log, &[t]);
        let c = ctx.conj_deep(&l);
        let h = ctx.as_generator(&c).unwrap();
        assert_eq!(ctx.ext(h).head(), CaExtHead::Conjugate);
    }

    #[test]
    fn test_sign_and_arg() {
        let mut ctx = CaCtx::new();
        let pi = ctx.pi();
        let npi = ctx.neg(&pi);
        assert_eq!(ctx.sgn(&npi), Ca::from(-1));
        assert_eq!(ctx.arg(&npi), pi);
        assert_eq!(ctx.arg(&Ca::from(-2)), pi);
        let half_pi = ctx.mul(&pi, &Ca::from_ratio(-1, 2));
        assert_eq!(ctx.arg(&Ca::gaussian(0, -3)), half_pi);
        assert_eq!(ctx.sgn(&CaCtx::neg_inf()), Ca::from(-1));
        assert_eq!(ctx.abs(&CaCtx::neg_inf()), CaCtx::pos_inf());
    }

    #[test]
    fn test_floor_ceil() {
        let mut ctx = CaCtx::new();
        assert_eq!(ctx.floor(&Ca::from_ratio(-7, 2)), Ca::from(-4));
        assert_eq!(ctx.ceil(&Ca::from_ratio(-7, 2)), Ca::from(-3));
        assert_eq!(ctx.floor(&Ca::from_ratio(7, 2)), Ca::from(3));
        assert_eq!(ctx.ceil(&Ca::from_ratio(7, 2)), Ca::from(4));
        assert_eq!(ctx.floor(&Ca::from(5)), Ca::from(5));
        let pi = ctx.pi();
        assert_eq!(ctx.floor(&pi), Ca::from(3));
        assert_eq!(ctx.ceil(&pi), Ca::from(4));
        assert_eq!(ctx.floor(&Ca::gaussian(1, 1)), CaCtx::undefined());
    }
}
