//! Exponential, logarithm and square root.

use calcite_poly::algorithms::cyclotomic::euler_phi;
use calcite_qqbar::Qqbar;
use calcite_rings::{Qi, Ring, Q};

use crate::ca::{Ca, Special};
use crate::ctx::{half_turn, reduce_turn, CaCtx};
use crate::ext::CaExtHead;

impl CaCtx {
    /// `exp(x)`.
    ///
    /// `exp(r·π·i)` for rational `r` becomes a root of unity when its degree
    /// is within [`CaOptions::qqbar_degree_limit`](crate::CaOptions), and
    /// `exp(log y) = y`. An argument with a negative leading coefficient is
    /// written as `1/exp(-x)`, so `exp(x)` and `exp(-x)` share a generator.
    pub fn exp(&mut self, x: &Ca) -> Ca {
        match x {
            Ca::Special(Special::SignedInf(d)) => {
                return if **d == Ca::one() {
                    Self::pos_inf()
                } else if **d == Ca::from(-1) {
                    Ca::zero()
                } else {
                    Self::undefined()
                };
            }
            Ca::Special(Special::Unknown) => return x.clone(),
            Ca::Special(_) => return Self::undefined(),
            Ca::Number(z) if z.is_zero() => return Ca::one(),
            _ => {}
        }

        if let Some((p, q)) = self.rational_multiple_of_pi_i(x).as_ref().and_then(half_turn) {
            let (p, q) = reduce_turn(p, q);
            if matches!(q, 1 | 2 | 4) || euler_phi(q) as usize <= self.options().qqbar_degree_limit {
                return self.root_of_unity(p, q);
            }
        }

        if let Some(h) = self.as_generator(x) {
            if self.ext(h).head() == CaExtHead::Log {
                return self.ext(h).args()[0].clone();
            }
        }

        if self.looks_negative(x) {
            let nx = self.neg(x);
            let e = self.exp(&nx);
            return self.inv_unchecked(&e);
        }

        self.formal(CaExtHead::Exp, &[x.clone()])
    }

    /// Whether the leading coefficient of `x` lies in the left half-plane,
    /// or on the negative imaginary axis.
    fn looks_negative(&self, x: &Ca) -> bool {
        let lead = match x {
            Ca::Number(z) => z,
            Ca::Element(elem) => match elem.value.numerator().leading_coeff() {
                Some(c) => c,
                None => return false,
            },
            Ca::Special(_) => return false,
        };
        lead.re.signum() < 0 || (lead.re.is_zero() && lead.im.signum() < 0)
    }

    /// The principal logarithm.
    pub fn log(&mut self, x: &Ca) -> Ca {
        match x {
            Ca::Number(z) if z.is_zero() => Self::neg_inf(),
            Ca::Number(z) => self.log_gaussian(x, z),
            Ca::Special(Special::SignedInf(_) | Special::UnsignedInf) => Self::pos_inf(),
            Ca::Special(Special::Unknown) => x.clone(),
            Ca::Special(_) => Self::undefined(),
            Ca::Element(_) => {
                if let Some(h) = self.as_generator(x) {
                    if self.ext(h).head() == CaExtHead::Exp {
                        let t = self.ext(h).args()[0].clone();
                        if self.enclosure(&t).imag_within(std::f64::consts::PI) {
                            return t;
                        }
                    }
                }
                if let Some((k, q)) = self.root_of_unity_power(x) {
                    // log(exp(2πi k/q)) with k in (-q/2, q/2]
                    let pi = self.pi();
                    let c = Qi::new(Q::zero(), Q::new(2 * k, i64::from(q)));
                    return self.mul(&pi, &Ca::Number(c));
                }
                self.formal(CaExtHead::Log, &[x.clone()])
            }
        }
    }

    fn log_gaussian(&mut self, x: &Ca, z: &Qi) -> Ca {
        if z.is_one() {
            return Ca::zero();
        }
        if z.is_real() && z.re.signum() < 0 {
            // log(r) = log(-r) + πi for r < 0
            let pi = self.pi();
            let ipi = self.mul(&pi, &Self::i());
            if *z == -Qi::one() {
                return ipi;
            }
            let l = self.log(&Ca::from(-z.re.clone()));
            return self.add(&l, &ipi);
        }
        if z.re.is_zero() {
            // log(b·i) = log|b| ± πi/2
            let pi = self.pi();
            let half = Ca::Number(Qi::new(Q::zero(), Q::new(i64::from(z.im.signum()), 2)));
            let ipi2 = self.mul(&pi, &half);
            let b = z.im.abs();
            if b == Q::one() {
                return ipi2;
            }
            let l = self.log(&Ca::from(b));
            return self.add(&l, &ipi2);
        }
        self.formal(CaExtHead::Log, &[x.clone()])
    }

    /// `(k, q)` with `x = exp(2πi k/q)` and `-q/2 < k ≤ q/2`, when `x` is a
    /// power of a root-of-unity generator.
    fn root_of_unity_power(&mut self, x: &Ca) -> Option<(i64, u32)> {
        let elem = x.as_element()?;
        let field = self.field(elem.field);
        if field.len() != 1 {
            return None;
        }
        let h = field.generator(0);
        let (p0, q) = self.ext(h).qqbar()?.root_of_unity_order()?;

        let qi = i64::from(q);
        let g = self.generator(h);
        let mut power = Ca::one();
        for e in 0..qi {
            if power == *x {
                let mut k = (p0 * e).rem_euclid(qi);
                if 2 * k > qi {
                    k -= qi;
                }
                return Some((k, q));
            }
            power = self.mul(&power, &g);
        }
        None
    }

    /// The principal square root.
    ///
    /// Gaussian rationals give exact algebraic results; a power of a root of
    /// unity gives the principal root of unity of twice the order.
    pub fn sqrt(&mut self, x: &Ca) -> Ca {
        match x {
            Ca::Number(z) => {
                let value = Qqbar::sqrt_gaussian(z);
                if value.degree() <= self.options().qqbar_degree_limit {
                    self.from_qqbar(&value)
                } else {
                    self.formal(CaExtHead::Sqrt, &[x.clone()])
                }
            }
            Ca::Special(Special::SignedInf(d)) => {
                let d = self.sqrt(d);
                Ca::Special(Special::SignedInf(Box::new(d)))
            }
            Ca::Special(Special::UnsignedInf) => Self::uinf(),
            Ca::Special(_) => x.clone(),
            Ca::Element(_) => {
                if let Some((k, q)) = self.root_of_unity_power(x) {
                    let (p, q2) = reduce_turn(k, 2 * q);
                    if euler_phi(q2) as usize <= self.options().qqbar_degree_limit {
                        return self.root_of_unity(p, q2);
                    }
                }
                self.formal(CaExtHead::Sqrt, &[x.clone()])
            }
        }
    }
}
