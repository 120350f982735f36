//! The Gaussian rationals Q(i).
//!
//! `Qi` doubles as the exact fast path of an exact number (a value in QQ or
//! QQ(i)) and as the coefficient field of multivariate rational functions,
//! so the imaginary unit never has to appear as a field generator.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::rationals::Q;
use crate::traits::{CommutativeRing, EuclideanDomain, Field, IntegralDomain, Ring};

/// A Gaussian rational `re + im·i`.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Qi {
    /// Real part.
    pub re: Q,
    /// Imaginary part.
    pub im: Q,
}

impl Qi {
    /// `re + im·i`.
    #[must_use]
    pub fn new(re: Q, im: Q) -> Self {
        Self { re, im }
    }

    /// The real rational `q`.
    #[must_use]
    pub fn from_q(q: Q) -> Self {
        Self { re: q, im: Q::zero() }
    }

    /// `num / den` as a real value.
    #[must_use]
    pub fn from_ratio(num: i64, den: i64) -> Self {
        Self::from_q(Q::new(num, den))
    }

    /// The imaginary unit.
    #[must_use]
    pub fn i() -> Self {
        Self { re: Q::zero(), im: Q::one() }
    }

    /// Returns true if the imaginary part vanishes.
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    /// Complex conjugate.
    #[must_use]
    pub fn conj(&self) -> Self {
        Self { re: self.re.clone(), im: -self.im.clone() }
    }

    /// `re² + im²`.
    #[must_use]
    pub fn norm(&self) -> Q {
        self.re.clone() * self.re.clone() + self.im.clone() * self.im.clone()
    }

    /// Multiplies by a real rational.
    #[must_use]
    pub fn scale(&self, q: &Q) -> Self {
        Self { re: self.re.clone() * q.clone(), im: self.im.clone() * q.clone() }
    }

    /// Approximate value as `(re, im)`.
    #[must_use]
    pub fn to_f64_pair(&self) -> (f64, f64) {
        (self.re.to_f64(), self.im.to_f64())
    }
}

impl Ring for Qi {
    fn zero() -> Self {
        Self::default()
    }

    fn one() -> Self {
        Self::from_q(Q::one())
    }

    fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    fn is_one(&self) -> bool {
        self.re.is_one() && self.im.is_zero()
    }

    fn from_i64(n: i64) -> Self {
        Self::from_q(Q::from_integer(n))
    }
}

impl CommutativeRing for Qi {}
impl IntegralDomain for Qi {}

impl EuclideanDomain for Qi {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        (self.field_div(other), Self::zero())
    }

    fn gcd(&self, other: &Self) -> Self {
        if self.is_zero() && other.is_zero() {
            Self::zero()
        } else {
            Self::one()
        }
    }
}

impl Field for Qi {
    fn inv(&self) -> Option<Self> {
        // 1/(a + bi) = (a - bi) / (a² + b²)
        let n = self.norm().inv()?;
        Some(self.conj().scale(&n))
    }
}

impl Add for Qi {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self { re: self.re + rhs.re, im: self.im + rhs.im }
    }
}

impl Sub for Qi {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { re: self.re - rhs.re, im: self.im - rhs.im }
    }
}

impl Mul for Qi {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        if self.im.is_zero() && rhs.im.is_zero() {
            return Self::from_q(self.re * rhs.re);
        }
        let re = self.re.clone() * rhs.re.clone() - self.im.clone() * rhs.im.clone();
        let im = self.re * rhs.im + self.im * rhs.re;
        Self { re, im }
    }
}

impl Neg for Qi {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { re: -self.re, im: -self.im }
    }
}

impl From<Q> for Qi {
    fn from(q: Q) -> Self {
        Self::from_q(q)
    }
}

impl From<i64> for Qi {
    fn from(n: i64) -> Self {
        Self::from_i64(n)
    }
}

impl fmt::Display for Qi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.re.is_zero(), self.im.is_zero()) {
            (_, true) => write!(f, "{}", self.re),
            (true, false) if self.im.is_one() => write!(f, "I"),
            (true, false) => write!(f, "{}*I", self.im),
            (false, false) => {
                if self.im.signum() < 0 {
                    write!(f, "{} - {}*I", self.re, self.im.abs())
                } else {
                    write!(f, "{} + {}*I", self.re, self.im)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qi(a: i64, b: i64) -> Qi {
        Qi::new(Q::from_integer(a), Q::from_integer(b))
    }

    #[test]
    fn test_i_squared() {
        assert_eq!(Qi::i() * Qi::i(), qi(-1, 0));
    }

    #[test]
    fn test_inverse() {
        let z = qi(3, 4);
        let inv = z.inv().unwrap();
        assert_eq!(inv, Qi::new(Q::new(3, 25), Q::new(-4, 25)));
        assert!((z * inv).is_one());
        assert!(Qi::zero().inv().is_none());
    }

    #[test]
    fn test_conj_norm() {
        let z = qi(1, -2);
        assert_eq!(z.conj(), qi(1, 2));
        assert_eq!(z.norm(), Q::from_integer(5));
        assert!(qi(0, -1).norm().is_one());
    }

    #[test]
    fn test_display() {
        assert_eq!(qi(3, 0).to_string(), "3");
        assert_eq!(qi(0, 1).to_string(), "I");
        assert_eq!(qi(1, -2).to_string(), "1 - 2*I");
    }
}
