//! Complex balls.
//!
//! A [`ComplexBall`] is a midpoint in `Complex64` together with a radius
//! such that the represented exact value lies within the radius of the
//! midpoint. Every operation grows the radius by a propagated error bound
//! plus a few ulps of the result, so enclosures stay conservative under
//! floating-point rounding.

use std::f64::consts::PI;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_complex::Complex64;

/// Relative rounding slack added after every operation.
const ROUNDING: f64 = 4.0 * f64::EPSILON;

/// A disk `{ z : |z - mid| <= rad }` in the complex plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ComplexBall {
    /// Midpoint.
    pub mid: Complex64,
    /// Radius; `f64::INFINITY` for an indeterminate value.
    pub rad: f64,
}

impl ComplexBall {
    /// Creates a ball, adding rounding slack for the midpoint.
    #[must_use]
    pub fn new(mid: Complex64, rad: f64) -> Self {
        let slack = ROUNDING * mid.norm();
        let rad = if rad.is_nan() { f64::INFINITY } else { rad.abs() + slack };
        Self { mid, rad }
    }

    /// A ball around the floating-point approximation of an exact value.
    #[must_use]
    pub fn approx(re: f64, im: f64) -> Self {
        Self::new(Complex64::new(re, im), 0.0)
    }

    /// An exactly representable real number.
    #[must_use]
    pub fn real(x: f64) -> Self {
        Self {
            mid: Complex64::new(x, 0.0),
            rad: 0.0,
        }
    }

    /// The ball containing every complex number.
    #[must_use]
    pub fn indeterminate() -> Self {
        Self {
            mid: Complex64::new(0.0, 0.0),
            rad: f64::INFINITY,
        }
    }

    /// An enclosure of π.
    #[must_use]
    pub fn pi() -> Self {
        Self::new(Complex64::new(PI, 0.0), 0.0)
    }

    /// An enclosure of i.
    #[must_use]
    pub fn i() -> Self {
        Self {
            mid: Complex64::new(0.0, 1.0),
            rad: 0.0,
        }
    }

    /// Returns true if the radius and midpoint are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.rad.is_finite() && self.mid.re.is_finite() && self.mid.im.is_finite()
    }

    /// Returns true if zero may lie in the ball.
    #[must_use]
    pub fn contains_zero(&self) -> bool {
        !self.is_finite() || self.mid.norm() <= self.rad
    }

    /// Returns true if the point lies in the ball.
    #[must_use]
    pub fn contains(&self, z: Complex64) -> bool {
        !self.is_finite() || (self.mid - z).norm() <= self.rad
    }

    /// Returns true if the two balls intersect.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !self.is_finite() || !other.is_finite() || (self.mid - other.mid).norm() <= self.rad + other.rad
    }

    /// Returns true if the ball certainly lies off the real axis.
    #[must_use]
    pub fn excludes_real_axis(&self) -> bool {
        self.is_finite() && self.mid.im.abs() > self.rad
    }

    /// Returns true if the ball certainly does not meet the branch cut
    /// `(-∞, 0]` of the principal logarithm and square root.
    #[must_use]
    pub fn avoids_negative_real_axis(&self) -> bool {
        self.is_finite() && (self.mid.re > self.rad || self.mid.im.abs() > self.rad)
    }

    /// Returns true if the imaginary part certainly lies in `(-bound, bound)`.
    #[must_use]
    pub fn imag_within(&self, bound: f64) -> bool {
        self.is_finite() && self.mid.im.abs() + self.rad < bound
    }

    /// Complex conjugate.
    #[must_use]
    pub fn conj(&self) -> Self {
        Self {
            mid: self.mid.conj(),
            rad: self.rad,
        }
    }

    /// Real part.
    #[must_use]
    pub fn re(&self) -> Self {
        Self {
            mid: Complex64::new(self.mid.re, 0.0),
            rad: self.rad,
        }
    }

    /// Imaginary part.
    #[must_use]
    pub fn im(&self) -> Self {
        Self {
            mid: Complex64::new(self.mid.im, 0.0),
            rad: self.rad,
        }
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new(Complex64::new(self.mid.norm(), 0.0), self.rad)
    }

    /// Multiplies by a real scalar.
    #[must_use]
    pub fn scale(&self, c: f64) -> Self {
        Self::new(self.mid * c, self.rad * c.abs())
    }

    /// Multiplicative inverse; indeterminate if the ball contains zero.
    #[must_use]
    pub fn inv(&self) -> Self {
        if self.contains_zero() {
            return Self::indeterminate();
        }
        let m = self.mid.norm();
        // |1/z - 1/m| = |z - m| / (|z| |m|) <= r / (|m| (|m| - r))
        Self::new(self.mid.inv(), self.rad / (m * (m - self.rad)))
    }

    /// Integer power.
    #[must_use]
    pub fn pow_int(&self, n: i64) -> Self {
        let mut result = Self::real(1.0);
        let mut base = if n < 0 { self.inv() } else { *self };
        let mut e = n.unsigned_abs();
        while e > 0 {
            if e & 1 == 1 {
                result = result * base;
            }
            e >>= 1;
            if e > 0 {
                base = base * base;
            }
        }
        result
    }

    /// Exponential.
    #[must_use]
    pub fn exp(&self) -> Self {
        if !self.is_finite() {
            return Self::indeterminate();
        }
        let mid = self.mid.exp();
        // |e^z - e^m| <= |e^m| (e^r - 1)
        Self::new(mid, mid.norm() * self.rad.exp_m1())
    }

    /// Principal logarithm.
    #[must_use]
    pub fn log(&self) -> Self {
        if self.contains_zero() {
            return Self::indeterminate();
        }
        let mid = self.mid.ln();
        if !self.avoids_negative_real_axis() {
            // The imaginary part may jump by 2π across the cut
            return Self {
                mid,
                rad: f64::INFINITY,
            };
        }
        // |log(m + d) - log(m)| <= -ln(1 - r/|m|)
        let ratio = self.rad / self.mid.norm();
        Self::new(mid, -(-ratio).ln_1p())
    }

    /// Principal square root.
    #[must_use]
    pub fn sqrt(&self) -> Self {
        if !self.is_finite() {
            return Self::indeterminate();
        }
        let mid = self.mid.sqrt();
        if self.rad == 0.0 {
            return Self::new(mid, 0.0);
        }
        if self.contains_zero() {
            // |sqrt(z)| <= sqrt(|m| + r)
            return Self::new(Complex64::new(0.0, 0.0), (self.mid.norm() + self.rad).sqrt());
        }
        if !self.avoids_negative_real_axis() {
            return Self {
                mid,
                rad: f64::INFINITY,
            };
        }
        // |sqrt(m + d) - sqrt(m)| = |d| / |sqrt(m + d) + sqrt(m)| <= r / sqrt|m|
        Self::new(mid, self.rad / self.mid.norm().sqrt())
    }

    /// Sine.
    #[must_use]
    pub fn sin(&self) -> Self {
        if !self.is_finite() {
            return Self::indeterminate();
        }
        // |sin'| = |cos| <= cosh(|Im z|) on the ball
        let bound = (self.mid.im.abs() + self.rad).cosh();
        Self::new(self.mid.sin(), self.rad * bound)
    }

    /// Cosine.
    #[must_use]
    pub fn cos(&self) -> Self {
        if !self.is_finite() {
            return Self::indeterminate();
        }
        let bound = (self.mid.im.abs() + self.rad).cosh();
        Self::new(self.mid.cos(), self.rad * bound)
    }

    /// Tangent.
    #[must_use]
    pub fn tan(&self) -> Self {
        self.sin() / self.cos()
    }

    /// Inverse tangent, `(i/2) (log(1 - iz) - log(1 + iz))`.
    #[must_use]
    pub fn atan(&self) -> Self {
        let one = Self::real(1.0);
        let iz = Self::i() * *self;
        let half_i = Self {
            mid: Complex64::new(0.0, 0.5),
            rad: 0.0,
        };
        half_i * ((one - iz).log() - (one + iz).log())
    }

    /// Inverse sine, `-i log(iz + sqrt(1 - z^2))`.
    #[must_use]
    pub fn asin(&self) -> Self {
        let one = Self::real(1.0);
        let root = (one - *self * *self).sqrt();
        -(Self::i() * (Self::i() * *self + root).log())
    }

    /// Inverse cosine, `-i log(z + i sqrt(1 - z^2))`.
    #[must_use]
    pub fn acos(&self) -> Self {
        let one = Self::real(1.0);
        let root = (one - *self * *self).sqrt();
        -(Self::i() * (*self + Self::i() * root).log())
    }

    /// Argument in `(-π, π]`.
    #[must_use]
    pub fn arg(&self) -> Self {
        self.log().im()
    }
}

impl Add for ComplexBall {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.mid + rhs.mid, self.rad + rhs.rad)
    }
}

impl Sub for ComplexBall {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.mid - rhs.mid, self.rad + rhs.rad)
    }
}

impl Mul for ComplexBall {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        let rad = self.mid.norm() * rhs.rad + rhs.mid.norm() * self.rad + self.rad * rhs.rad;
        Self::new(self.mid * rhs.mid, rad)
    }
}

impl Div for ComplexBall {
    type Output = Self;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Self) -> Self::Output {
        self * rhs.inv()
    }
}

impl Neg for ComplexBall {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            mid: -self.mid,
            rad: self.rad,
        }
    }
}

impl fmt::Display for ComplexBall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_finite() {
            return write!(f, "[+/- inf]");
        }
        let re = self.mid.re;
        let im = self.mid.im;
        let tiny = self.rad.max(1e-15);
        match (re.abs() <= tiny, im.abs() <= tiny) {
            (true, true) => write!(f, "0"),
            (false, true) => write!(f, "{re:.6}"),
            (true, false) => write!(f, "{im:.6}*I"),
            (false, false) if im < 0.0 => write!(f, "{re:.6} - {:.6}*I", -im),
            (false, false) => write!(f, "{re:.6} + {im:.6}*I"),
        }
    }
}
