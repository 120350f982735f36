//! Cyclotomic polynomials.
//!
//! `Φ_n` is computed from the Möbius product
//! `Φ_n(x) = ∏_{d | n} (x^d - 1)^{μ(n/d)}`.

use calcite_rings::rationals::Q;
use calcite_rings::traits::Ring;

use crate::algorithms::gcd::{make_monic, poly_div_rem};
use crate::dense::DensePoly;

/// Euler's totient function.
#[must_use]
pub fn euler_phi(n: u32) -> u32 {
    let mut result = n;
    let mut m = n;
    let mut p = 2;
    while p * p <= m {
        if m % p == 0 {
            while m % p == 0 {
                m /= p;
            }
            result -= result / p;
        }
        p += 1;
    }
    if m > 1 {
        result -= result / m;
    }
    result
}

/// The Möbius function.
#[must_use]
pub fn mobius(n: u32) -> i8 {
    let mut m = n;
    let mut sign = 1i8;
    let mut p = 2;
    while p * p <= m {
        if m % p == 0 {
            m /= p;
            if m % p == 0 {
                return 0;
            }
            sign = -sign;
        }
        p += 1;
    }
    if m > 1 {
        sign = -sign;
    }
    sign
}

/// Positive divisors of `n` in increasing order.
#[must_use]
pub fn divisors(n: u32) -> Vec<u32> {
    (1..=n).filter(|d| n % d == 0).collect()
}

/// The `n`-th cyclotomic polynomial.
///
/// # Panics
///
/// Panics if `n == 0`.
#[must_use]
pub fn cyclotomic_poly(n: u32) -> DensePoly<Q> {
    assert!(n > 0, "cyclotomic_poly: order must be positive");

    let mut num = DensePoly::<Q>::one();
    let mut den = DensePoly::<Q>::one();

    for d in divisors(n) {
        // x^d - 1
        let factor = DensePoly::monomial(Q::one(), d as usize).sub(&DensePoly::one());
        match mobius(n / d) {
            1 => num = num.mul(&factor),
            -1 => den = den.mul(&factor),
            _ => {}
        }
    }

    poly_div_rem(&num, &den).0
}

/// If the polynomial is a rational multiple of some `Φ_n`, returns `n`.
#[must_use]
pub fn cyclotomic_order(p: &DensePoly<Q>) -> Option<u32> {
    if p.is_zero() || p.degree() == 0 {
        return None;
    }
    let monic = make_monic(p);
    let d = u32::try_from(p.degree()).ok()?;

    // φ(n) >= sqrt(n / 2), so n <= 2 d^2
    let bound = (2 * d * d).max(2);
    (1..=bound)
        .filter(|&n| euler_phi(n) == d)
        .find(|&n| cyclotomic_poly(n) == monic)
}
