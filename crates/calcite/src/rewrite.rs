//! Rewriting into complex normal form.
//!
//! The rewriter replaces each generator of a value by a canonical
//! equivalent and evaluates the value's rational function at the results:
//!
//! - real and imaginary parts, conjugates, absolute values, signs and
//!   arguments are expanded with the deep conjugate;
//! - circular functions become exponentials of `i·t`, and their inverses
//!   become logarithms;
//! - algebraic numbers that are polynomials in a root of unity are written
//!   in the cyclotomic field.
//!
//! With `deep` set, arguments are rewritten first and `sqrt`, `exp` and
//! `log` are re-applied when their argument changes. Other heads are left
//! as they are.

use calcite_rings::{Qi, Ring, Q};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::ca::{Ca, FieldElem, Special};
use crate::ctx::CaCtx;
use crate::ext::{CaExtHead, ExtHandle};
use crate::truth::Truth;

impl CaCtx {
    /// `x` in complex normal form.
    ///
    /// The result denotes the same number as `x`, and rewriting it again
    /// with the same `deep` flag returns it unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the context is inconsistent: an algebraic extension
    /// without a value, or a generator substitution whose denominator
    /// vanishes.
    pub fn rewrite_complex_normal_form(&mut self, x: &Ca, deep: bool) -> Ca {
        self.rewrite_cnf(x, deep, 0)
    }

    fn rewrite_cnf(&mut self, x: &Ca, deep: bool, level: usize) -> Ca {
        let elem = match x {
            Ca::Special(Special::SignedInf(d)) => {
                let d = self.sgn(d);
                let d = self.rewrite_cnf(&d, deep, level + 1);
                return Ca::Special(Special::SignedInf(Box::new(d)));
            }
            Ca::Special(_) | Ca::Number(_) => return x.clone(),
            Ca::Element(elem) => elem,
        };

        if self
            .options()
            .rewrite_depth_limit
            .is_some_and(|limit| level >= limit)
        {
            trace!(level, "rewrite depth limit reached");
            return x.clone();
        }

        if self.field(elem.field).is_number_field() {
            return self.rewrite_number_field_element(x, elem);
        }
        self.rewrite_field_element(x, elem, deep, level)
    }

    fn rewrite_number_field_element(&mut self, x: &Ca, elem: &FieldElem) -> Ca {
        let h = self.field(elem.field).generator(0);
        let g = self.rewrite_algebraic(h);
        if g == self.generator(h) {
            return x.clone();
        }
        self.evaluate(&elem.value, &[g], "rewrite_complex_normal_form")
    }

    fn rewrite_field_element(&mut self, x: &Ca, elem: &FieldElem, deep: bool, level: usize) -> Ca {
        let generators: SmallVec<[ExtHandle; 4]> =
            self.field(elem.field).generators().iter().copied().collect();

        let used = elem.value.used_vars();

        let mut values = SmallVec::<[Ca; 4]>::new();
        let mut changed = false;
        for (v, &h) in generators.iter().enumerate() {
            if !used.get(v).copied().unwrap_or(false) {
                values.push(Ca::zero());
                continue;
            }
            let g = self.rewrite_ext_cnf(h, deep, level);
            changed |= g != self.generator(h);
            values.push(g);
        }

        if !changed {
            return x.clone();
        }
        debug!(field = ?elem.field, generators = generators.len(), "rewriting field element");
        self.evaluate(&elem.value, &values, "rewrite_complex_normal_form")
    }

    /// The canonical form of one generator.
    fn rewrite_ext_cnf(&mut self, h: ExtHandle, deep: bool, level: usize) -> Ca {
        let head = self.ext(h).head();
        trace!(ext = ?h, %head, deep, "rewrite_ext_complex_normal_form");

        let r = match head {
            CaExtHead::QqBar => return self.rewrite_algebraic(h),
            CaExtHead::Re
            | CaExtHead::Im
            | CaExtHead::Conjugate
            | CaExtHead::Abs
            | CaExtHead::Sign
            | CaExtHead::Arg
            | CaExtHead::Sin
            | CaExtHead::Cos
            | CaExtHead::Tan
            | CaExtHead::Atan
            | CaExtHead::Asin
            | CaExtHead::Acos => {
                let mut t = self.ext(h).args()[0].clone();
                if deep {
                    t = self.rewrite_cnf(&t, deep, level + 1);
                }
                self.rewrite_function(head, &t)
            }
            CaExtHead::Sqrt | CaExtHead::Exp | CaExtHead::Log => {
                if !deep {
                    return self.generator(h);
                }
                let arg = self.ext(h).args()[0].clone();
                let t = self.rewrite_cnf(&arg, deep, level + 1);
                if t == arg {
                    return self.generator(h);
                }
                match head {
                    CaExtHead::Sqrt => self.sqrt(&t),
                    CaExtHead::Exp => self.exp(&t),
                    _ => self.log(&t),
                }
            }
            // TODO: rewrite the arguments of Pow, Floor and Ceil when deep.
            CaExtHead::Pi | CaExtHead::Pow | CaExtHead::Floor | CaExtHead::Ceil => {
                return self.generator(h);
            }
        };

        // square roots and logarithms introduced above may hold algebraic
        // numbers that are not yet in cyclotomic form
        if r == self.generator(h) {
            return r;
        }
        self.rewrite_cnf(&r, deep, level + 1)
    }

    fn rewrite_algebraic(&mut self, h: ExtHandle) -> Ca {
        let Some(value) = self.ext(h).qqbar() else {
            panic!("rewrite_ext_complex_normal_form: algebraic extension without a value");
        };
        if value.is_i() || value.root_of_unity_order().is_some() {
            return self.generator(h);
        }

        let options = self.options();
        let form = value.try_as_cyclotomic(options.cyclotomic_degree_limit, options.lll_scale_bits);
        match form {
            Some(form) if form.order != 0 => {
                debug!(order = form.order, "cyclotomic form found");
                let zeta = self.root_of_unity(1, form.order);
                self.evaluate_dense(&form.coeffs, &zeta)
            }
            _ => self.generator(h),
        }
    }

    /// `head(t)` written through exponentials, logarithms and conjugates.
    fn rewrite_function(&mut self, head: CaExtHead, t: &Ca) -> Ca {
        match head {
            CaExtHead::Re => {
                let c = self.conj_deep(t);
                let s = self.add(t, &c);
                self.mul(&s, &Ca::from_ratio(1, 2))
            }
            CaExtHead::Im => {
                let c = self.conj_deep(t);
                let d = self.sub(t, &c);
                self.mul(&d, &Ca::Number(Qi::new(Q::zero(), Q::new(-1, 2))))
            }
            CaExtHead::Conjugate => self.conj_deep(t),
            CaExtHead::Abs => self.abs_via_conj(t),
            CaExtHead::Sign => match self.check_is_zero(t) {
                Truth::True => Ca::zero(),
                Truth::False => {
                    let a = self.abs_via_conj(t);
                    self.div_nonzero(t, &a)
                }
                Truth::Unknown => {
                    trace!("sign: zero test undecided");
                    self.sgn(t)
                }
            },
            CaExtHead::Arg => match self.check_is_zero(t) {
                Truth::True => Ca::zero(),
                Truth::False => {
                    let a = self.abs_via_conj(t);
                    let s = self.div_nonzero(t, &a);
                    let l = self.log(&s);
                    self.mul(&l, &Ca::gaussian(0, -1))
                }
                Truth::Unknown => {
                    trace!("arg: zero test undecided");
                    self.arg(t)
                }
            },
            CaExtHead::Sin => self.sin(t),
            CaExtHead::Cos => self.cos(t),
            CaExtHead::Tan => self.tan(t),
            CaExtHead::Atan => self.atan(t),
            CaExtHead::Asin => self.asin(t),
            CaExtHead::Acos => self.acos(t),
            _ => panic!("rewrite_ext_complex_normal_form: unexpected head {head}"),
        }
    }

    /// `sqrt(t·conj(t))`.
    fn abs_via_conj(&mut self, t: &Ca) -> Ca {
        let c = self.conj_deep(t);
        let n = self.mul(t, &c);
        self.sqrt(&n)
    }
}

#[cfg(test)]
mod tests {
    use calcite_ball::Complex64;
    use calcite_poly::dense::DensePoly;
    use calcite_qqbar::Qqbar;

    use super::*;
    use crate::options::CaOptions;

    #[test]
    fn test_numbers_and_specials_unchanged() {
        let mut ctx = CaCtx::new();
        for x in [Ca::from_ratio(2, 3), Ca::gaussian(1, -1), CaCtx::uinf(), CaCtx::undefined()] {
            assert_eq!(ctx.rewrite_complex_normal_form(&x, true), x);
        }
    }

    #[test]
    fn test_root_of_unity_is_fixpoint() {
        let mut ctx = CaCtx::new();
        let z = ctx.root_of_unity(2, 7);
        assert_eq!(ctx.rewrite_complex_normal_form(&z, false), z);
        assert_eq!(ctx.rewrite_complex_normal_form(&z, true), z);
    }

    #[test]
    fn test_re_of_gaussian() {
        let mut ctx = CaCtx::new();
        let x = ctx.formal(CaExtHead::Re, &[Ca::gaussian(3, 4)]);
        assert_eq!(ctx.rewrite_complex_normal_form(&x, false), Ca::from(3));
        let y = ctx.formal(CaExtHead::Im, &[Ca::gaussian(3, 4)]);
        assert_eq!(ctx.rewrite_complex_normal_form(&y, false), Ca::from(4));
    }

    #[test]
    fn test_abs_sign_arg() {
        let mut ctx = CaCtx::new();
        let a = ctx.formal(CaExtHead::Abs, &[Ca::from(-2)]);
        assert_eq!(ctx.rewrite_complex_normal_form(&a, false), Ca::from(2));

        let s = ctx.formal(CaExtHead::Sign, &[Ca::zero()]);
        assert_eq!(ctx.rewrite_complex_normal_form(&s, false), Ca::zero());
        let s = ctx.formal(CaExtHead::Sign, &[Ca::from(3)]);
        assert_eq!(ctx.rewrite_complex_normal_form(&s, false), Ca::one());

        let g = ctx.formal(CaExtHead::Arg, &[Ca::from(-1)]);
        let pi = ctx.pi();
        assert_eq!(ctx.rewrite_complex_normal_form(&g, false), pi);
    }

    #[test]
    fn test_zero_arguments() {
        let mut ctx = CaCtx::new();
        assert_eq!(ctx.sqrt(&Ca::zero()), Ca::zero());

        for head in [CaExtHead::Abs, CaExtHead::Sign, CaExtHead::Arg] {
            let x = ctx.formal(head, &[Ca::zero()]);
            assert_eq!(ctx.rewrite_complex_normal_form(&x, false), Ca::zero());
        }

        let re = ctx.formal(CaExtHead::Re, &[Ca::zero()]);
        let s = ctx.formal(CaExtHead::Sqrt, &[re]);
        assert_eq!(ctx.rewrite_complex_normal_form(&s, true), Ca::zero());
    }

    #[test]
    fn test_inverse_functions_at_branch_points() {
        let mut ctx = CaCtx::new();
        let pi = ctx.pi();
        let half_pi = ctx.mul(&pi, &Ca::from_ratio(1, 2));

        let cases = [
            (CaExtHead::Asin, Ca::one(), half_pi.clone()),
            (CaExtHead::Asin, Ca::zero(), Ca::zero()),
            (CaExtHead::Acos, Ca::one(), Ca::zero()),
            (CaExtHead::Acos, Ca::from(-1), pi),
            (CaExtHead::Acos, Ca::zero(), half_pi),
        ];
        for (head, arg, expected) in cases {
            let x = ctx.formal(head, &[arg]);
            assert_eq!(ctx.rewrite_complex_normal_form(&x, false), expected);
        }
    }

    #[test]
    fn test_inverse_sine_and_cosine() {
        let mut ctx = CaCtx::new();
        let pi = ctx.pi();
        let pi_6 = ctx.mul(&pi, &Ca::from_ratio(1, 6));
        let pi_3 = ctx.mul(&pi, &Ca::from_ratio(1, 3));
        let asin = ctx.formal(CaExtHead::Asin, &[Ca::from_ratio(1, 2)]);
        let acos = ctx.formal(CaExtHead::Acos, &[Ca::from_ratio(1, 2)]);

        // the logarithm of ζ12 and ζ6 is found once sqrt(3)/2 is cyclotomic
        assert_eq!(ctx.rewrite_complex_normal_form(&asin, true), pi_6);
        assert_eq!(ctx.rewrite_complex_normal_form(&acos, true), pi_3);

        let shallow = ctx.rewrite_complex_normal_form(&asin, false);
        assert_ne!(ctx.check_equal(&shallow, &pi_6), Truth::False);
        assert_eq!(ctx.rewrite_complex_normal_form(&shallow, false), shallow);
    }

    #[test]
    fn test_sign_and_arg_with_undecided_zero_test() {
        let mut ctx = CaCtx::new();
        let t = Ca::from_ratio(3, 5);
        let sin = ctx.formal(CaExtHead::Sin, &[t.clone()]);
        let cos = ctx.formal(CaExtHead::Cos, &[t.clone()]);
        let tan = ctx.formal(CaExtHead::Tan, &[t]);
        let quotient = ctx.div(&sin, &cos);
        let d = ctx.sub(&quotient, &tan);
        assert_eq!(ctx.check_is_zero(&d), Truth::Unknown);

        for head in [CaExtHead::Sign, CaExtHead::Arg] {
            let x = ctx.formal(head, &[d.clone()]);
            let r = ctx.rewrite_complex_normal_form(&x, false);
            assert_ne!(ctx.check_equal(&x, &r), Truth::False);
            assert_eq!(ctx.rewrite_complex_normal_form(&r, false), r);

            // the rewritten argument is decided to be zero
            assert_eq!(ctx.rewrite_complex_normal_form(&x, true), Ca::zero());
        }
    }

    #[test]
    fn test_new_square_roots_are_cyclotomic() {
        let mut ctx = CaCtx::new();
        let z = ctx.root_of_unity(1, 8);
        let z3 = ctx.root_of_unity(3, 8);
        let sqrt2 = ctx.sub(&z, &z3);

        let a = ctx.formal(CaExtHead::Abs, &[Ca::gaussian(1, 1)]);
        let r = ctx.rewrite_complex_normal_form(&a, false);
        assert_eq!(r, sqrt2);
        assert_eq!(ctx.rewrite_complex_normal_form(&r, false), r);

        let re = ctx.formal(CaExtHead::Re, &[Ca::from(2)]);
        let s = ctx.formal(CaExtHead::Sqrt, &[re]);
        assert_eq!(ctx.rewrite_complex_normal_form(&s, true), sqrt2);
    }

    #[test]
    fn test_cubic_algebraic_generator() {
        // 2cos(2π/7) = ζ7 + ζ7^6, a root of x^3 + x^2 - 2x - 1
        let mut ctx = CaCtx::new();
        let minpoly = DensePoly::from_i64s(&[-1, -2, 1, 1]);
        let value = Qqbar::from_poly_approx(&minpoly, Complex64::new(1.25, 0.0)).unwrap();
        let x = ctx.algebraic(value);

        let r = ctx.rewrite_complex_normal_form(&x, false);
        let z = ctx.root_of_unity(1, 7);
        let z6 = ctx.root_of_unity(6, 7);
        let expected = ctx.add(&z, &z6);
        assert_eq!(r, expected);
        assert_eq!(ctx.rewrite_complex_normal_form(&r, true), r);
    }

    #[test]
    fn test_sqrt_of_composite_conductor() {
        let mut ctx = CaCtx::new();
        for n in [6, 7] {
            let s = ctx.sqrt(&Ca::from(n));
            let r = ctx.rewrite_complex_normal_form(&s, false);
            let generator = ctx.number_field_generator(r.field().unwrap()).unwrap();
            assert!(generator.root_of_unity_order().is_some());
            assert_eq!(ctx.sqr(&r), Ca::from(n));
        }
    }

    #[test]
    fn test_sin_pi_over_six() {
        let mut ctx = CaCtx::new();
        let pi = ctx.pi();
        let t = ctx.mul(&pi, &Ca::from_ratio(1, 6));
        let x = ctx.formal(CaExtHead::Sin, &[t]);
        assert_eq!(ctx.rewrite_complex_normal_form(&x, true), Ca::from_ratio(1, 2));
    }

    #[test]
    fn test_exp_rewritten_only_when_deep() {
        let mut ctx = CaCtx::new();
        let inner = ctx.formal(CaExtHead::Re, &[Ca::from(2)]);
        let x = ctx.formal(CaExtHead::Exp, &[inner]);
        assert_eq!(ctx.rewrite_complex_normal_form(&x, false), x);

        let expected = ctx.exp(&Ca::from(2));
        assert_eq!(ctx.rewrite_complex_normal_form(&x, true), expected);
    }

    #[test]
    fn test_only_changed_generators_substituted() {
        let mut ctx = CaCtx::new();
        let pi = ctx.pi();
        let re = ctx.formal(CaExtHead::Re, &[Ca::gaussian(3, 4)]);
        let x = ctx.add(&pi, &re);
        let expected = ctx.add(&pi, &Ca::from(3));
        assert_eq!(ctx.rewrite_complex_normal_form(&x, false), expected);
    }

    #[test]
    fn test_conjugate_involution() {
        let mut ctx = CaCtx::new();
        let e = ctx.exp(&Ca::one());
        let pi = ctx.pi();
        let ipi = ctx.mul(&pi, &CaCtx::i());
        let t = ctx.add(&e, &ipi);
        let inner = ctx.formal(CaExtHead::Conjugate, &[t.clone()]);
        let outer = ctx.formal(CaExtHead::Conjugate, &[inner]);
        assert_eq!(ctx.rewrite_complex_normal_form(&outer, false), t);
        assert_eq!(ctx.rewrite_complex_normal_form(&outer, true), t);
    }

    #[test]
    fn test_depth_limit_copies() {
        let mut ctx = CaCtx::with_options(CaOptions::default().with_rewrite_depth_limit(Some(0)));
        let x = ctx.formal(CaExtHead::Re, &[Ca::gaussian(3, 4)]);
        assert_eq!(ctx.rewrite_complex_normal_form(&x, true), x);
    }

    #[test]
    fn test_opaque_heads_unchanged() {
        let mut ctx = CaCtx::new();
        let f = ctx.formal(CaExtHead::Floor, &[Ca::from_ratio(7, 2)]);
        assert_eq!(ctx.rewrite_complex_normal_form(&f, true), f);
        let pi = ctx.pi();
        assert_eq!(ctx.rewrite_complex_normal_form(&pi, true), pi);
    }
}
