//! Substitution of exact values into polynomials and rational functions.

use calcite_poly::dense::DensePoly;
use calcite_poly::sparse::SparsePoly;
use calcite_rational_func::RationalFunction;
use calcite_rings::{Qi, Q};

use crate::ca::Ca;
use crate::ctx::CaCtx;
use crate::truth::Truth;

impl CaCtx {
    /// `value(values[0], values[1], …)`.
    ///
    /// The values replace generators of the field `value` was taken from,
    /// by values equal to them, so the denominator cannot vanish. Slots for
    /// variables that do not occur are ignored.
    ///
    /// # Panics
    ///
    /// Panics, naming `routine`, if the denominator evaluates to a provable
    /// zero.
    pub(crate) fn evaluate(
        &mut self,
        value: &RationalFunction<Qi>,
        values: &[Ca],
        routine: &'static str,
    ) -> Ca {
        let num = self.evaluate_poly(value.numerator(), values);
        if value.is_polynomial() {
            return num;
        }
        let den = self.evaluate_poly(value.denominator(), values);
        if num.is_special() || den.is_special() {
            return self.div(&num, &den);
        }
        match self.check_is_zero(&den) {
            Truth::True => panic!("{routine}: impossible zero division"),
            Truth::False | Truth::Unknown => self.div_nonzero(&num, &den),
        }
    }

    fn evaluate_poly(&mut self, p: &SparsePoly<Qi>, values: &[Ca]) -> Ca {
        let mut acc = Ca::zero();
        for (m, c) in p.terms() {
            let mut term = Ca::Number(c.clone());
            for (v, &e) in m.exponents().iter().enumerate() {
                if e > 0 {
                    let power = self.pow_int(&values[v], i64::from(e));
                    term = self.mul(&term, &power);
                }
            }
            acc = self.add(&acc, &term);
        }
        acc
    }

    /// `p(x)` by Horner's rule.
    pub fn evaluate_dense(&mut self, p: &DensePoly<Q>, x: &Ca) -> Ca {
        let mut acc = Ca::zero();
        for c in p.coeffs().iter().rev() {
            acc = self.mul(&acc, x);
            acc = self.add(&acc, &Ca::from(c.clone()));
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_dense() {
        let mut ctx = CaCtx::new();
        // x² - 2 at sqrt(2)
        let p = DensePoly::new(vec![Q::from_integer(-2), Q::from_integer(0), Q::from_integer(1)]);
        let s = ctx.sqrt(&Ca::from(2));
        assert_eq!(ctx.evaluate_dense(&p, &s), Ca::zero());
        assert_eq!(ctx.evaluate_dense(&p, &Ca::from(3)), Ca::from(7));
    }

    #[test]
    fn test_evaluate_rational_function() {
        let mut ctx = CaCtx::new();
        let x = SparsePoly::<Qi>::var(0, 2);
        let y = SparsePoly::<Qi>::var(1, 2);
        // (x + y) / y at (π, 2)
        let f = RationalFunction::new(x.add(&y), y);
        let pi = ctx.pi();
        let r = ctx.evaluate(&f, &[pi.clone(), Ca::from(2)], "test");
        let expected = {
            let s = ctx.add(&pi, &Ca::from(2));
            ctx.mul(&s, &Ca::from_ratio(1, 2))
        };
        assert_eq!(r, expected);
    }

    #[test]
    #[should_panic(expected = "test: impossible zero division")]
    fn test_zero_denominator_panics() {
        let mut ctx = CaCtx::new();
        let x = SparsePoly::<Qi>::var(0, 1);
        let f = RationalFunction::new(SparsePoly::one(1), x);
        let _ = ctx.evaluate(&f, &[Ca::zero()], "test");
    }
}
