//! Polynomial GCD algorithms.
//!
//! Euclidean division, gcd, extended gcd and inversion modulo a
//! polynomial, over any coefficient field. Number-field elements are
//! brought to polynomial form with [`poly_inv_mod`].

use calcite_rings::traits::Field;

use crate::dense::DensePoly;

/// Computes the monic GCD of two polynomials over a field using the
/// Euclidean algorithm.
#[must_use]
pub fn poly_gcd<F: Field>(a: &DensePoly<F>, b: &DensePoly<F>) -> DensePoly<F> {
    if a.is_zero() {
        return make_monic(b);
    }
    if b.is_zero() {
        return make_monic(a);
    }

    let mut p = a.clone();
    let mut q = b.clone();

    while !q.is_zero() {
        let (_, r) = poly_div_rem(&p, &q);
        p = q;
        q = r;
    }

    make_monic(&p)
}

/// Divides polynomial a by b, returning (quotient, remainder).
///
/// # Panics
///
/// Panics if `b` is the zero polynomial.
#[must_use]
pub fn poly_div_rem<F: Field>(a: &DensePoly<F>, b: &DensePoly<F>) -> (DensePoly<F>, DensePoly<F>) {
    assert!(!b.is_zero(), "poly_div_rem: division by zero polynomial");

    if a.degree() < b.degree() {
        return (DensePoly::zero(), a.clone());
    }

    let b_lead_inv = b
        .leading_coeff()
        .inv()
        .expect("nonzero field element has an inverse");
    let mut quotient = vec![F::zero(); a.degree() - b.degree() + 1];
    let mut remainder = a.coeffs().to_vec();

    while remainder.len() >= b.coeffs().len() {
        let deg_diff = remainder.len() - b.coeffs().len();
        let lead = remainder[remainder.len() - 1].clone();
        let coeff = lead * b_lead_inv.clone();

        quotient[deg_diff] = coeff.clone();

        for (i, bc) in b.coeffs().iter().enumerate() {
            remainder[deg_diff + i] = remainder[deg_diff + i].clone() - coeff.clone() * bc.clone();
        }

        // The leading coefficient is now zero by construction
        remainder.pop();
        while remainder.len() > 1 && remainder.last().map_or(false, calcite_rings::Ring::is_zero) {
            remainder.pop();
        }

        if remainder.is_empty() || (remainder.len() == 1 && remainder[0].is_zero()) {
            break;
        }
    }

    (DensePoly::new(quotient), DensePoly::new(remainder))
}

/// Makes a polynomial monic (leading coefficient = 1).
#[must_use]
pub fn make_monic<F: Field>(p: &DensePoly<F>) -> DensePoly<F> {
    match p.leading_coeff().inv() {
        Some(lead_inv) => p.scale(&lead_inv),
        None => p.clone(),
    }
}

/// Extended polynomial GCD.
///
/// Computes (gcd, s, t) such that gcd = s*a + t*b with gcd monic.
///
/// # Example
///
/// ```
/// use calcite_poly::dense::DensePoly;
/// use calcite_poly::algorithms::gcd::poly_extended_gcd;
/// use calcite_rings::Q;
///
/// let a = DensePoly::<Q>::from_i64s(&[-1, 0, 1]); // x² - 1
/// let b = DensePoly::<Q>::from_i64s(&[-1, 1]); // x - 1
///
/// let (gcd, s, t) = poly_extended_gcd(&a, &b);
/// assert_eq!(gcd, b);
/// assert_eq!(s.mul(&a).add(&t.mul(&b)), gcd);
/// ```
#[must_use]
pub fn poly_extended_gcd<F: Field>(
    a: &DensePoly<F>,
    b: &DensePoly<F>,
) -> (DensePoly<F>, DensePoly<F>, DensePoly<F>) {
    if a.is_zero() && b.is_zero() {
        return (DensePoly::zero(), DensePoly::one(), DensePoly::zero());
    }

    let mut old_r = a.clone();
    let mut r = b.clone();
    let mut old_s = DensePoly::one();
    let mut s = DensePoly::zero();
    let mut old_t = DensePoly::zero();
    let mut t = DensePoly::one();

    while !r.is_zero() {
        let (q, rem) = poly_div_rem(&old_r, &r);

        let new_s = old_s.sub(&q.mul(&s));
        let new_t = old_t.sub(&q.mul(&t));

        old_r = std::mem::replace(&mut r, rem);
        old_s = std::mem::replace(&mut s, new_s);
        old_t = std::mem::replace(&mut t, new_t);
    }

    // Make the gcd monic and adjust s, t accordingly
    let lead_inv = old_r
        .leading_coeff()
        .inv()
        .expect("nonzero gcd has an invertible leading coefficient");

    (
        old_r.scale(&lead_inv),
        old_s.scale(&lead_inv),
        old_t.scale(&lead_inv),
    )
}

/// Inverse of `a` modulo `m`.
///
/// Returns `None` when `a` and `m` share a factor (including `a ≡ 0`).
#[must_use]
pub fn poly_inv_mod<F: Field>(a: &DensePoly<F>, m: &DensePoly<F>) -> Option<DensePoly<F>> {
    let (_, a_red) = poly_div_rem(a, m);
    if a_red.is_zero() {
        return None;
    }
    let (g, s, _) = poly_extended_gcd(&a_red, m);
    if g.degree() != 0 {
        return None;
    }
    Some(poly_div_rem(&s, m).1)
}

/// Returns true if `b` divides `a`.
#[must_use]
pub fn poly_divides<F: Field>(b: &DensePoly<F>, a: &DensePoly<F>) -> bool {
    !b.is_zero() && poly_div_rem(a, b).1.is_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcite_rings::rationals::Q;
    use calcite_rings::traits::Ring;
    use calcite_rings::Qi;

    fn poly(coeffs: &[i64]) -> DensePoly<Q> {
        DensePoly::from_i64s(coeffs)
    }

    #[test]
    fn test_poly_div_rem() {
        // (x^2 + 2x + 1) / (x + 1) = (x + 1), remainder 0
        let (q, r) = poly_div_rem(&poly(&[1, 2, 1]), &poly(&[1, 1]));

        assert_eq!(q, poly(&[1, 1]));
        assert!(r.is_zero());

        // (x^3 + 1) / (x^2) = x, remainder 1
        let (q, r) = poly_div_rem(&poly(&[1, 0, 0, 1]), &poly(&[0, 0, 1]));
        assert_eq!(q, poly(&[0, 1]));
        assert_eq!(r, poly(&[1]));
    }

    #[test]
    fn test_poly_gcd() {
        // gcd(x^2 - 1, x^2 - 2x + 1) = x - 1
        let g = poly_gcd(&poly(&[-1, 0, 1]), &poly(&[1, -2, 1]));
        assert_eq!(g, poly(&[-1, 1]));
    }

    #[test]
    fn test_poly_extended_gcd_coprime() {
        // gcd(x^2 + 1, x - 1) = 1 over Q
        let a = poly(&[1, 0, 1]);
        let b = poly(&[-1, 1]);

        let (gcd, s, t) = poly_extended_gcd(&a, &b);

        assert_eq!(gcd.degree(), 0);
        assert!(gcd.leading_coeff().is_one());
        assert_eq!(s.mul(&a).add(&t.mul(&b)), gcd);
    }

    #[test]
    fn test_poly_extended_gcd_zero() {
        let a = poly(&[1, 2]); // 1 + 2x
        let b = DensePoly::zero();

        let (gcd, s, _) = poly_extended_gcd(&a, &b);

        assert_eq!(gcd.degree(), 1);
        assert!(gcd.leading_coeff().is_one());
        assert_eq!(s.mul(&a), gcd);
    }

    #[test]
    fn test_inv_mod() {
        // x * (x - i) = x^2 - i x ≡ 1 mod x^2 - i x - 1
        let m = DensePoly::new(vec![-Qi::one(), -Qi::i(), Qi::one()]);
        let x = DensePoly::<Qi>::x();
        let inv = poly_inv_mod(&x, &m).unwrap();
        assert_eq!(inv, DensePoly::new(vec![-Qi::i(), Qi::one()]));
    }

    #[test]
    fn test_inv_mod_shared_factor() {
        // x - 1 is not invertible modulo x^2 - 1
        assert!(poly_inv_mod(&poly(&[-1, 1]), &poly(&[-1, 0, 1])).is_none());
        assert!(poly_divides(&poly(&[-1, 1]), &poly(&[-1, 0, 1])));
    }
}
