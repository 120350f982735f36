//! Algebraic structure traits.
//!
//! Polynomials, rational functions and number-field reductions are generic
//! over these traits; the exact-number layer instantiates them with `Qi`.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Add, Mul, Neg, Sub};

/// A ring with identity.
///
/// # Laws
///
/// - Addition is associative and commutative with identity `zero()`
/// - Multiplication is associative with identity `one()`
/// - Multiplication distributes over addition
pub trait Ring:
    Clone
    + Eq
    + Hash
    + Debug
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// The multiplicative identity.
    fn one() -> Self;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// Returns true if this is the multiplicative identity.
    fn is_one(&self) -> bool;

    /// The image of the integer `n` in this ring.
    fn from_i64(n: i64) -> Self {
        let mut acc = Self::zero();
        let mut base = Self::one();
        let mut m = n.unsigned_abs();
        while m > 0 {
            if m & 1 == 1 {
                acc = acc + base.clone();
            }
            base = base.clone() + base;
            m >>= 1;
        }
        if n < 0 {
            -acc
        } else {
            acc
        }
    }

    /// `self^n` by binary powering.
    fn pow(&self, n: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result * base.clone();
            }
            exp >>= 1;
            if exp > 0 {
                base = base.clone() * base;
            }
        }

        result
    }
}

/// A ring whose multiplication commutes.
pub trait CommutativeRing: Ring {}

/// A commutative ring without zero divisors.
pub trait IntegralDomain: CommutativeRing {}

/// An integral domain with division with remainder.
pub trait EuclideanDomain: IntegralDomain {
    /// Quotient and remainder; may panic if `other` is zero.
    fn div_rem(&self, other: &Self) -> (Self, Self);

    /// Greatest common divisor by the Euclidean algorithm.
    fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();

        while !b.is_zero() {
            let r = a.div_rem(&b).1;
            a = b;
            b = r;
        }

        a
    }
}

/// A commutative ring in which every non-zero element is invertible.
pub trait Field: EuclideanDomain {
    /// Multiplicative inverse, `None` for zero.
    fn inv(&self) -> Option<Self>;

    /// Exact division.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    fn field_div(&self, other: &Self) -> Self {
        self.clone() * other.inv().expect("division by zero")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rationals::Q;

    #[test]
    fn test_from_i64() {
        assert_eq!(<Q as Ring>::from_i64(-13), Q::from_integer(-13));
        assert_eq!(<Q as Ring>::from_i64(0), Q::zero());
    }

    #[test]
    fn test_pow() {
        let half = Q::new(1, 2);
        assert_eq!(half.pow(3), Q::new(1, 8));
        assert!(half.pow(0).is_one());
    }
}
