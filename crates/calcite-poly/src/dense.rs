//! Dense univariate polynomials.
//!
//! Used for minimal polynomials of algebraic numbers, cyclotomic
//! polynomials and the reduction polynomials of number fields.

use std::fmt;

use calcite_rings::traits::Ring;

/// A dense univariate polynomial.
///
/// Coefficients are stored in ascending degree order. The zero polynomial
/// is stored as a single zero coefficient, so derived equality and hashing
/// are structural.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct DensePoly<R: Ring> {
    /// Coefficients in ascending degree order.
    coeffs: Vec<R>,
}

impl<R: Ring> DensePoly<R> {
    /// Creates a new polynomial from coefficients.
    #[must_use]
    pub fn new(mut coeffs: Vec<R>) -> Self {
        // Normalize: remove trailing zeros
        while coeffs.len() > 1 && coeffs.last().map_or(false, Ring::is_zero) {
            coeffs.pop();
        }

        if coeffs.is_empty() {
            coeffs.push(R::zero());
        }

        Self { coeffs }
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            coeffs: vec![R::zero()],
        }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one() -> Self {
        Self {
            coeffs: vec![R::one()],
        }
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: R) -> Self {
        Self::new(vec![c])
    }

    /// Creates the polynomial x.
    #[must_use]
    pub fn x() -> Self {
        Self::new(vec![R::zero(), R::one()])
    }

    /// Creates the monomial c * x^n.
    #[must_use]
    pub fn monomial(c: R, n: usize) -> Self {
        let mut coeffs = vec![R::zero(); n + 1];
        coeffs[n] = c;
        Self::new(coeffs)
    }

    /// Builds a polynomial from machine-integer coefficients.
    #[must_use]
    pub fn from_i64s(coeffs: &[i64]) -> Self {
        Self::new(coeffs.iter().map(|&c| R::from_i64(c)).collect())
    }

    /// Returns the degree of the polynomial (0 for the zero polynomial).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coeffs.len() == 1 && self.coeffs[0].is_zero()
    }

    /// Returns true if this is a constant (including zero).
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.coeffs.len() == 1
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> &R {
        &self.coeffs[self.coeffs.len() - 1]
    }

    /// Returns true if the leading coefficient is one.
    #[must_use]
    pub fn is_monic(&self) -> bool {
        self.leading_coeff().is_one()
    }

    /// Returns the coefficient of x^i.
    #[must_use]
    pub fn coeff(&self, i: usize) -> R {
        self.coeffs.get(i).cloned().unwrap_or_else(R::zero)
    }

    /// Returns all coefficients.
    #[must_use]
    pub fn coeffs(&self) -> &[R] {
        &self.coeffs
    }

    /// Evaluates the polynomial at a point using Horner's method.
    #[must_use]
    pub fn eval(&self, x: &R) -> R {
        let mut result = R::zero();
        for c in self.coeffs.iter().rev() {
            result = result * x.clone() + c.clone();
        }
        result
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let len = self.coeffs.len().max(other.coeffs.len());
        let mut result = Vec::with_capacity(len);

        for i in 0..len {
            result.push(self.coeff(i) + other.coeff(i));
        }

        Self::new(result)
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self::new(self.coeffs.iter().map(|c| -c.clone()).collect())
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two polynomials (schoolbook).
    ///
    /// Every polynomial in this library has small degree, so the quadratic
    /// algorithm is the only one provided.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }

        let n = self.coeffs.len();
        let m = other.coeffs.len();
        let mut result = vec![R::zero(); n + m - 1];

        for (i, a) in self.coeffs.iter().enumerate() {
            if a.is_zero() {
                continue;
            }
            for (j, b) in other.coeffs.iter().enumerate() {
                result[i + j] = result[i + j].clone() + a.clone() * b.clone();
            }
        }

        Self::new(result)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &R) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        Self::new(self.coeffs.iter().map(|x| x.clone() * c.clone()).collect())
    }

    /// Computes the formal derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        if self.degree() == 0 {
            return Self::zero();
        }

        let mut result = Vec::with_capacity(self.coeffs.len() - 1);
        for (i, c) in self.coeffs.iter().enumerate().skip(1) {
            result.push(R::from_i64(i as i64) * c.clone());
        }

        Self::new(result)
    }

    /// Shifts the polynomial by multiplying by x^n.
    #[must_use]
    pub fn shift(&self, n: usize) -> Self {
        if self.is_zero() || n == 0 {
            return self.clone();
        }

        let mut coeffs = vec![R::zero(); n];
        coeffs.extend(self.coeffs.iter().cloned());
        Self::new(coeffs)
    }

    /// Raises the polynomial to a non-negative integer power.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        let mut exp = n;

        while exp > 0 {
            if exp & 1 == 1 {
                result = result.mul(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.mul(&base);
            }
        }

        result
    }

    /// Applies `f` to every coefficient, changing the coefficient ring.
    #[must_use]
    pub fn map_coeffs<S: Ring>(&self, f: impl Fn(&R) -> S) -> DensePoly<S> {
        DensePoly::new(self.coeffs.iter().map(f).collect())
    }

    /// Remainder modulo a monic polynomial.
    ///
    /// Works over any ring since no leading coefficient has to be inverted.
    ///
    /// # Panics
    ///
    /// Panics if `modulus` is not monic of positive degree.
    #[must_use]
    pub fn rem_monic(&self, modulus: &Self) -> Self {
        assert!(
            modulus.is_monic() && modulus.degree() > 0,
            "rem_monic: modulus must be monic of positive degree"
        );
        let d = modulus.degree();
        let mut rem = self.coeffs.clone();

        while rem.len() > d {
            let lead = rem.pop().unwrap_or_else(R::zero);
            if lead.is_zero() {
                continue;
            }
            let offset = rem.len() - d;
            for (j, m) in modulus.coeffs[..d].iter().enumerate() {
                rem[offset + j] = rem[offset + j].clone() - lead.clone() * m.clone();
            }
        }

        Self::new(rem)
    }
}

impl<R: Ring + fmt::Display> fmt::Display for DensePoly<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        let mut terms = Vec::new();
        for (i, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }

            let term = match (i, c.is_one()) {
                (0, _) => format!("{c}"),
                (1, true) => "x".to_string(),
                (1, false) => format!("({c})*x"),
                (_, true) => format!("x^{i}"),
                (_, false) => format!("({c})*x^{i}"),
            };
            terms.push(term);
        }

        write!(f, "{}", terms.join(" + "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcite_rings::rationals::Q;

    fn poly(coeffs: &[i64]) -> DensePoly<Q> {
        DensePoly::from_i64s(coeffs)
    }

    #[test]
    fn test_basic_ops() {
        let p = poly(&[1, 2]); // 1 + 2x
        let q = poly(&[3, 4]); // 3 + 4x

        let sum = p.add(&q);
        assert_eq!(sum.coeff(0), Q::from_integer(4));
        assert_eq!(sum.coeff(1), Q::from_integer(6));
        assert!(p.sub(&p).is_zero());
    }

    #[test]
    fn test_mul() {
        // (1 + 2x)(3 + 4x) = 3 + 10x + 8x^2
        let prod = poly(&[1, 2]).mul(&poly(&[3, 4]));
        assert_eq!(prod, poly(&[3, 10, 8]));
    }

    #[test]
    fn test_eval() {
        // p(2) = 1 + 4 + 12 = 17
        let p = poly(&[1, 2, 3]);
        assert_eq!(p.eval(&Q::from_integer(2)), Q::from_integer(17));
    }

    #[test]
    fn test_rem_monic() {
        // x^4 mod (x^2 + 1) = 1
        let x4 = DensePoly::<Q>::monomial(Q::from_integer(1), 4);
        assert_eq!(x4.rem_monic(&poly(&[1, 0, 1])), DensePoly::one());
        // x^3 mod (x^2 + 1) = -x
        let x3 = DensePoly::<Q>::monomial(Q::from_integer(1), 3);
        assert_eq!(x3.rem_monic(&poly(&[1, 0, 1])), poly(&[0, -1]));
    }

    #[test]
    fn test_derivative() {
        assert_eq!(poly(&[5, 3, 0, 2]).derivative(), poly(&[3, 0, 6]));
        assert!(poly(&[7]).derivative().is_zero());
    }

    #[test]
    fn test_display() {
        assert_eq!(poly(&[-1, 0, 1]).to_string(), "x^2 + -1");
    }
}
