//! Arbitrary precision integers.
//!
//! A thin wrapper around `dashu::integer::IBig` exposing the operations the
//! exact-number layer needs: gcd, powers, exact square roots and a lossy
//! conversion to `f64` for seeding enclosures.

use dashu::base::{Abs, Gcd, Signed as DashuSigned};
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// An arbitrary precision integer.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Integer(IBig);

impl Integer {
    /// Creates an integer from an `i64`.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    /// Parses an integer in the given base.
    ///
    /// # Errors
    ///
    /// Returns an error if `s` is not a valid integer literal.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, dashu::base::error::ParseError> {
        IBig::from_str_radix(s, radix).map(Self)
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.clone().abs())
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

    /// Non-negative greatest common divisor.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        if self.is_zero() {
            return other.abs();
        }
        if other.is_zero() {
            return self.abs();
        }
        Self(IBig::from(self.0.clone().gcd(other.0.clone())))
    }

    /// Non-negative least common multiple.
    #[must_use]
    pub fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let g = self.gcd(other);
        Self(&self.0 / &g.0 * &other.0).abs()
    }

    /// `self^exp`.
    #[must_use]
    pub fn pow(&self, exp: u32) -> Self {
        Self(self.0.pow(exp as usize))
    }

    /// Floor of the square root of a non-negative integer.
    ///
    /// Newton iteration started from a power of ten that is known to be
    /// above the root, so the sequence decreases monotonically.
    ///
    /// # Panics
    ///
    /// Panics if `self` is negative.
    #[must_use]
    pub fn isqrt(&self) -> Self {
        assert!(!self.is_negative(), "isqrt of a negative integer");
        if self.0 < IBig::from(2) {
            return self.clone();
        }

        let digits = self.0.to_string().len();
        let two = IBig::from(2);
        let mut x = IBig::from(10).pow(digits.div_ceil(2));
        loop {
            let y = (&x + &self.0 / &x) / &two;
            if y >= x {
                return Self(x);
            }
            x = y;
        }
    }

    /// Exact square root, if `self` is a perfect square.
    #[must_use]
    pub fn sqrt_exact(&self) -> Option<Self> {
        if self.is_negative() {
            return None;
        }
        let r = self.isqrt();
        (&r * &r == *self).then_some(r)
    }

    /// Nearest `f64`; saturates to infinity for huge values.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_string().parse::<f64>().unwrap_or(f64::NAN)
    }

    /// Converts to `i64` when the value fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.clone().try_into().ok()
    }

    /// The wrapped `IBig`.
    #[must_use]
    pub fn into_inner(self) -> IBig {
        self.0
    }

    /// Borrows the wrapped `IBig`.
    #[must_use]
    pub fn as_inner(&self) -> &IBig {
        &self.0
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Implements a binary operator for owned, owned-by-ref and ref-by-ref operands.
macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for Integer {
            type Output = Integer;

            fn $method(self, rhs: Integer) -> Integer {
                Integer($trait::$method(self.0, rhs.0))
            }
        }

        impl $trait<&Integer> for Integer {
            type Output = Integer;

            fn $method(self, rhs: &Integer) -> Integer {
                Integer($trait::$method(self.0, &rhs.0))
            }
        }

        impl $trait for &Integer {
            type Output = Integer;

            fn $method(self, rhs: &Integer) -> Integer {
                Integer($trait::$method(&self.0, &rhs.0))
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);
forward_binop!(Div, div);
forward_binop!(Rem, rem);

impl Neg for Integer {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Neg for &Integer {
    type Output = Integer;

    fn neg(self) -> Self::Output {
        Integer(-&self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::new(i64::from(value))
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        Self(IBig::from(value))
    }
}

impl From<IBig> for Integer {
    fn from(value: IBig) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isqrt() {
        assert_eq!(Integer::new(0).isqrt(), Integer::new(0));
        assert_eq!(Integer::new(1).isqrt(), Integer::new(1));
        assert_eq!(Integer::new(15).isqrt(), Integer::new(3));
        assert_eq!(Integer::new(16).isqrt(), Integer::new(4));
        assert_eq!(Integer::new(99_980_001).isqrt(), Integer::new(9999));
    }

    #[test]
    fn test_sqrt_exact() {
        assert_eq!(Integer::new(144).sqrt_exact(), Some(Integer::new(12)));
        assert_eq!(Integer::new(2).sqrt_exact(), None);
        assert_eq!(Integer::new(-4).sqrt_exact(), None);

        let big = Integer::from_str_radix("123456789012345678901234567890", 10).unwrap();
        let sq = &big * &big;
        assert_eq!(sq.sqrt_exact(), Some(big));
    }

    #[test]
    fn test_gcd_lcm() {
        let a = Integer::new(-48);
        let b = Integer::new(18);
        assert_eq!(a.gcd(&b).to_i64(), Some(6));
        assert_eq!(a.lcm(&b).to_i64(), Some(144));
    }

    #[test]
    fn test_gcd_with_zero() {
        let zero = Integer::new(0);
        assert_eq!(zero.gcd(&Integer::new(-5)), Integer::new(5));
        assert_eq!(Integer::new(-5).gcd(&zero), Integer::new(5));
        assert_eq!(zero.gcd(&zero), zero);
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(Integer::new(-7).to_f64(), -7.0);
        let big = Integer::new(10).pow(30);
        assert!((big.to_f64() - 1e30).abs() < 1e15);
    }
}
