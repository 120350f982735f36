//! The field of rational numbers Q.

use calcite_integers::{Integer, Rational};

use crate::traits::{CommutativeRing, EuclideanDomain, Field, IntegralDomain, Ring};

/// The field of rational numbers.
///
/// Wraps `calcite_integers::Rational` so the algebraic traits can be
/// implemented on it.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Q(pub Rational);

impl Q {
    /// `num / den`.
    #[must_use]
    pub fn new(num: i64, den: i64) -> Self {
        Self(Rational::from_i64(num, den))
    }

    /// The integer `n`.
    #[must_use]
    pub fn from_integer(n: i64) -> Self {
        Self(Rational::from(n))
    }

    /// Unwraps the inner rational.
    #[must_use]
    pub fn into_inner(self) -> Rational {
        self.0
    }

    /// Borrows the inner rational.
    #[must_use]
    pub fn as_inner(&self) -> &Rational {
        &self.0
    }

    /// Numerator in lowest terms.
    #[must_use]
    pub fn numerator(&self) -> Integer {
        self.0.numerator()
    }

    /// Positive denominator in lowest terms.
    #[must_use]
    pub fn denominator(&self) -> Integer {
        self.0.denominator()
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Sign as -1, 0 or 1.
    #[must_use]
    pub fn signum(&self) -> i8 {
        self.0.signum()
    }

    /// Exact square root when one exists in Q.
    #[must_use]
    pub fn sqrt_exact(&self) -> Option<Self> {
        self.0.sqrt_exact().map(Self)
    }

    /// Nearest `f64`.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64()
    }
}

impl Ring for Q {
    fn zero() -> Self {
        Self(Rational::from(0))
    }

    fn one() -> Self {
        Self(Rational::from(1))
    }

    fn is_zero(&self) -> bool {
        num_traits::Zero::is_zero(&self.0)
    }

    fn is_one(&self) -> bool {
        num_traits::One::is_one(&self.0)
    }

    fn from_i64(n: i64) -> Self {
        Self::from_integer(n)
    }
}

impl CommutativeRing for Q {}
impl IntegralDomain for Q {}

impl EuclideanDomain for Q {
    fn div_rem(&self, other: &Self) -> (Self, Self) {
        (Self(&self.0 / &other.0), Self::zero())
    }

    fn gcd(&self, other: &Self) -> Self {
        if self.is_zero() && other.is_zero() {
            Self::zero()
        } else {
            Self::one()
        }
    }
}

impl Field for Q {
    fn inv(&self) -> Option<Self> {
        (!self.is_zero()).then(|| Self(self.0.recip()))
    }
}

impl std::ops::Add for Q {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl std::ops::Sub for Q {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl std::ops::Mul for Q {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl std::ops::Neg for Q {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<i64> for Q {
    fn from(value: i64) -> Self {
        Self::from_integer(value)
    }
}

impl From<Rational> for Q {
    fn from(value: Rational) -> Self {
        Self(value)
    }
}

impl From<Integer> for Q {
    fn from(value: Integer) -> Self {
        Self(Rational::from(value))
    }
}

impl std::fmt::Display for Q {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
