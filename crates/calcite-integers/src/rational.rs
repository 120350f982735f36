//! Arbitrary precision rational numbers.

use dashu::base::{Abs, Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::integer::IBig;
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::Integer;

/// An arbitrary precision rational number.
///
/// Always stored in lowest terms with a positive denominator, so derived
/// equality and hashing are structural.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(RBig);

impl Rational {
    /// Creates `numerator / denominator`.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn new(numerator: Integer, denominator: Integer) -> Self {
        assert!(!denominator.is_zero(), "denominator cannot be zero");
        let negative = denominator.is_negative();
        let value = RBig::from_parts(
            numerator.into_inner(),
            denominator.into_inner().unsigned_abs(),
        );
        if negative {
            Self(-value)
        } else {
            Self(value)
        }
    }

    /// Creates a rational from an integer.
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self(RBig::from(n.into_inner()))
    }

    /// Creates `numerator / denominator` from machine integers.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Self {
        Self::new(Integer::new(numerator), Integer::new(denominator))
    }

    /// The numerator (carries the sign).
    #[must_use]
    pub fn numerator(&self) -> Integer {
        Integer::from(self.0.numerator().clone())
    }

    /// The denominator (always positive).
    #[must_use]
    pub fn denominator(&self) -> Integer {
        Integer::from(IBig::from(self.0.denominator().clone()))
    }

    /// Returns true if the denominator is one.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.0.denominator().is_one()
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
    }

    /// Reciprocal.
    ///
    /// # Panics
    ///
    /// Panics if the value is zero.
    #[must_use]
    pub fn recip(&self) -> Self {
        assert!(!self.is_zero(), "cannot take reciprocal of zero");
        Self(self.0.clone().inv())
    }

    /// Sign as -1, 0 or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        if self.0.is_zero() {
            0
        } else if DashuSigned::is_positive(&self.0) {
            1
        } else {
            -1
        }
    }

    /// Returns true for strictly negative values.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// `self^exp`.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Exact square root, if both numerator and denominator are squares.
    #[must_use]
    pub fn sqrt_exact(&self) -> Option<Self> {
        let num = self.numerator().sqrt_exact()?;
        let den = self.denominator().sqrt_exact()?;
        Some(Self::new(num, den))
    }

    /// Nearest `f64` (up to the rounding of two conversions).
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.numerator().to_f64() / self.denominator().to_f64()
    }

    /// The wrapped `RBig`.
    #[must_use]
    pub fn into_inner(self) -> RBig {
        self.0
    }

    /// Borrows the wrapped `RBig`.
    #[must_use]
    pub fn as_inner(&self) -> &RBig {
        &self.0
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({self})")
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numerator())
        } else {
            write!(f, "{}/{}", self.numerator(), self.denominator())
        }
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for Rational {
            type Output = Rational;

            fn $method(self, rhs: Rational) -> Rational {
                Rational($trait::$method(self.0, rhs.0))
            }
        }

        impl $trait<&Rational> for Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                Rational($trait::$method(self.0, &rhs.0))
            }
        }

        impl $trait for &Rational {
            type Output = Rational;

            fn $method(self, rhs: &Rational) -> Rational {
                Rational($trait::$method(&self.0, &rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Self::Output {
        Rational(-&self.0)
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_integer(Integer::new(n))
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from_integer(Integer::new(i64::from(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowest_terms() {
        let r = Rational::from_i64(4, -6);
        assert_eq!(r.numerator().to_i64(), Some(-2));
        assert_eq!(r.denominator().to_i64(), Some(3));
        assert_eq!(r, Rational::from_i64(-2, 3));
    }

    #[test]
    fn test_sqrt_exact() {
        assert_eq!(
            Rational::from_i64(9, 4).sqrt_exact(),
            Some(Rational::from_i64(3, 2))
        );
        assert_eq!(Rational::from_i64(1, 2).sqrt_exact(), None);
        assert_eq!(Rational::from_i64(-1, 4).sqrt_exact(), None);
    }

    #[test]
    fn test_to_f64() {
        assert!((Rational::from_i64(1, 3).to_f64() - 1.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn test_display() {
        assert_eq!(Rational::from_i64(3, 1).to_string(), "3");
        assert_eq!(Rational::from_i64(-2, 3).to_string(), "-2/3");
    }
}
