//! Roots of unity and cyclotomic coordinates of algebraic numbers.

use std::f64::consts::PI;

use calcite_ball::Complex64;
use calcite_poly::algorithms::cyclotomic::{cyclotomic_order, cyclotomic_poly, euler_phi};
use calcite_poly::algorithms::gcd::{make_monic, poly_divides};
use calcite_poly::dense::DensePoly;
use calcite_rings::traits::Ring;
use calcite_rings::{Qi, Q};

use crate::lll::find_integer_relation;
use crate::qqbar::Qqbar;
use crate::roots;

/// An algebraic number written as `c(ζ)` with `ζ = exp(2πi/order)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CyclotomicForm {
    /// The order `q` of the root of unity.
    pub order: u32,
    /// `exp(2πi/q)`.
    pub zeta: Qqbar,
    /// Coordinates in the power basis, of degree below `φ(q)`.
    pub coeffs: DensePoly<Q>,
}

impl Qqbar {
    /// If this is a root of unity, returns `(p, q)` with value
    /// `exp(2πi p/q)`, `gcd(p, q) = 1` and `0 ≤ p < q`.
    #[must_use]
    pub fn root_of_unity_order(&self) -> Option<(i64, u32)> {
        let q = cyclotomic_order(self.minpoly())?;
        let turns = self.approx().arg() / (2.0 * PI) * f64::from(q);
        let p = (turns.round() as i64).rem_euclid(i64::from(q));
        Some((p, q))
    }

    /// Minimal polynomial over `Q(i)`, monic, and whether it is known to
    /// be irreducible there.
    ///
    /// For roots of unity of order divisible by 4 the Q-minimal polynomial
    /// splits into two conjugate factors over `Q(i)`; the factor vanishing
    /// here is returned. Odd degrees and quadratic irrationalities outside
    /// `Q(i)` stay irreducible. Otherwise the Q-minimal polynomial is
    /// returned and flagged as possibly reducible.
    #[must_use]
    pub fn reduction_poly_over_qi(&self) -> (DensePoly<Qi>, bool) {
        let monic = make_monic(&self.minpoly().map_coeffs(|c| Qi::from_q(c.clone())));

        if let Some((p, q)) = self.root_of_unity_order() {
            if q % 4 != 0 {
                return (monic, true);
            }
            if let Some(factor) = gaussian_cyclotomic_factor(p, q) {
                if poly_divides(&factor, &monic) {
                    return (factor, true);
                }
            }
            tracing::debug!(p, q, "cyclotomic factor over Q(i) not recovered");
            return (monic, false);
        }

        let exact = self.degree() % 2 == 1
            || (self.degree() == 2 && self.as_gaussian_rational().is_none());
        (monic, exact)
    }

    /// Searches for `q` and `c` with this number equal to `c(exp(2πi/q))`.
    ///
    /// Candidates are tried by increasing `q`, skipping `q ≡ 2 (mod 4)`
    /// and keeping those with `deg | φ(q) ≤ degree_limit`. For each, an
    /// integer relation among the value and the power basis is searched
    /// with LLL at `scale_bits` of precision; a candidate is accepted only
    /// if the minimal polynomial vanishes on it modulo `Φ_q`.
    #[must_use]
    pub fn try_as_cyclotomic(&self, degree_limit: u32, scale_bits: u32) -> Option<CyclotomicForm> {
        let d = u32::try_from(self.degree()).ok()?;
        if d < 2 {
            return None;
        }
        let bound = 2 * degree_limit * degree_limit;

        for q in (3..=bound).filter(|q| q % 4 != 2) {
            let phi = euler_phi(q);
            if phi > degree_limit || phi % d != 0 {
                continue;
            }
            if let Some(coeffs) = self.cyclotomic_coords(q, phi, scale_bits) {
                tracing::debug!(order = q, degree = d, "found cyclotomic form");
                return Some(CyclotomicForm {
                    order: q,
                    zeta: Qqbar::root_of_unity(1, q),
                    coeffs,
                });
            }
        }
        None
    }

    fn cyclotomic_coords(&self, q: u32, phi: u32, scale_bits: u32) -> Option<DensePoly<Q>> {
        let zeta = Complex64::from_polar(1.0, 2.0 * PI / f64::from(q));
        let mut values = vec![self.approx()];
        values.extend((0..phi).map(|k| zeta.powu(k)));

        let m = find_integer_relation(&values, scale_bits)?;
        if m[0] == 0 {
            return None;
        }
        let coeffs = DensePoly::new(m[1..].iter().map(|&mk| -Q::new(mk, m[0])).collect());

        // minpoly(c(t)) ≡ 0 mod Φ_q
        let modulus = cyclotomic_poly(q);
        let mut acc = DensePoly::zero();
        for a in self.minpoly().coeffs().iter().rev() {
            acc = acc
                .mul(&coeffs)
                .add(&DensePoly::constant(a.clone()))
                .rem_monic(&modulus);
        }
        if !acc.is_zero() {
            return None;
        }

        let value = roots::eval(&roots::complex_coeffs(&coeffs), zeta);
        ((value - self.approx()).norm() < self.isolation()).then_some(coeffs)
    }
}

/// The factor of `Φ_q` over `Q(i)` vanishing at `exp(2πi p/q)`, for `4 | q`.
///
/// Its roots are the conjugates fixing `i = ζ^(q/4)`, namely `ζ^(pk)` for
/// `k ≡ 1 (mod 4)` coprime to `q`. The coefficients are Gaussian integers,
/// recovered by rounding.
fn gaussian_cyclotomic_factor(p: i64, q: u32) -> Option<DensePoly<Qi>> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for k in (1..q).filter(|k| k % 4 == 1 && gcd(*k, q) == 1) {
        let angle = 2.0 * PI * (p as f64) * f64::from(k) / f64::from(q);
        let root = Complex64::from_polar(1.0, angle);
        // multiply by (x - root)
        let mut next = vec![Complex64::new(0.0, 0.0); coeffs.len() + 1];
        for (j, c) in coeffs.iter().enumerate() {
            next[j + 1] += c;
            next[j] -= c * root;
        }
        coeffs = next;
    }

    let mut exact = Vec::with_capacity(coeffs.len());
    for c in coeffs {
        let (re, im) = (c.re.round(), c.im.round());
        if (c - Complex64::new(re, im)).norm() > 1e-6 {
            return None;
        }
        exact.push(Qi::new(Q::from_integer(re as i64), Q::from_integer(im as i64)));
    }
    let factor = DensePoly::new(exact);
    (!factor.is_constant() && factor.leading_coeff().is_one()).then_some(factor)
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
