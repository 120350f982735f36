//! Arithmetic operations for rational functions.
//!
//! Implements field operations: addition, subtraction, multiplication, division.

use std::ops::{Add, Div, Mul, Neg, Sub};

use calcite_rings::traits::Field;

use crate::RationalFunction;

impl<K: Field> RationalFunction<K> {
    /// Adds two rational functions by reference.
    #[must_use]
    pub fn add_ref(&self, other: &Self) -> Self {
        if self.denominator() == other.denominator() {
            return Self::new(
                self.numerator().add(other.numerator()),
                self.denominator().clone(),
            );
        }

        // a/b + c/d = (ad + bc) / bd
        let num = self
            .numerator()
            .mul(other.denominator())
            .add(&other.numerator().mul(self.denominator()));
        let den = self.denominator().mul(other.denominator());

        Self::new(num, den)
    }

    /// Negates a rational function.
    #[must_use]
    pub fn neg_ref(&self) -> Self {
        Self::new(self.numerator().neg(), self.denominator().clone())
    }

    /// Subtracts another rational function from this one.
    #[must_use]
    pub fn sub_ref(&self, other: &Self) -> Self {
        self.add_ref(&other.neg_ref())
    }

    /// Multiplies two rational functions.
    #[must_use]
    pub fn mul_ref(&self, other: &Self) -> Self {
        let num = self.numerator().mul(other.numerator());
        let den = self.denominator().mul(other.denominator());

        Self::new(num, den)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &K) -> Self {
        Self::new(self.numerator().scale(c), self.denominator().clone())
    }

    /// Divides this rational function by another.
    ///
    /// # Panics
    ///
    /// Panics if `other` is zero.
    #[must_use]
    pub fn div_ref(&self, other: &Self) -> Self {
        assert!(!other.is_zero(), "division by zero");

        let num = self.numerator().mul(other.denominator());
        let den = self.denominator().mul(other.numerator());

        Self::new(num, den)
    }

    /// Computes the multiplicative inverse.
    ///
    /// Returns `None` if this is zero.
    #[must_use]
    pub fn inv(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Self::new(
                self.denominator().clone(),
                self.numerator().clone(),
            ))
        }
    }

    /// Raises to an integer power; negative powers invert first.
    ///
    /// Returns `None` for a negative power of zero.
    #[must_use]
    pub fn pow(&self, n: i64) -> Option<Self> {
        let base = if n < 0 { self.inv()? } else { self.clone() };
        let e = u32::try_from(n.unsigned_abs()).ok()?;
        Some(Self::new(
            base.numerator().pow(e),
            base.denominator().pow(e),
        ))
    }
}

impl<K: Field> Add for RationalFunction<K> {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        self.add_ref(&other)
    }
}

impl<K: Field> Add<&RationalFunction<K>> for RationalFunction<K> {
    type Output = Self;

    fn add(self, other: &Self) -> Self::Output {
        self.add_ref(other)
    }
}

impl<K: Field> Sub for RationalFunction<K> {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        self.sub_ref(&other)
    }
}

impl<K: Field> Sub<&RationalFunction<K>> for RationalFunction<K> {
    type Output = Self;

    fn sub(self, other: &Self) -> Self::Output {
        self.sub_ref(other)
    }
}

impl<K: Field> Mul for RationalFunction<K> {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        self.mul_ref(&other)
    }
}

impl<K: Field> Mul<&RationalFunction<K>> for RationalFunction<K> {
    type Output = Self;

    fn mul(self, other: &Self) -> Self::Output {
        self.mul_ref(other)
    }
}

impl<K: Field> Div for RationalFunction<K> {
    type Output = Self;

    fn div(self, other: Self) -> Self::Output {
        self.div_ref(&other)
    }
}

impl<K: Field> Div<&RationalFunction<K>> for RationalFunction<K> {
    type Output = Self;

    fn div(self, other: &Self) -> Self::Output {
        self.div_ref(other)
    }
}

impl<K: Field> Neg for RationalFunction<K> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        self.neg_ref()
    }
}
