//! Algebraic numbers as (minimal polynomial, isolating approximation).

use std::f64::consts::PI;
use std::fmt;
use std::hash::{Hash, Hasher};

use calcite_ball::{Complex64, ComplexBall};
use calcite_integers::{Integer, Rational};
use calcite_poly::algorithms::cyclotomic::cyclotomic_poly;
use calcite_poly::algorithms::gcd::poly_gcd;
use calcite_poly::dense::DensePoly;
use calcite_rings::traits::{Field, Ring};
use calcite_rings::{Qi, Q};

use crate::error::QqbarError;
use crate::roots::{self, complex_coeffs_qi, nearest_root, polynomial_roots, root_separation};

/// An algebraic number.
///
/// `minpoly` is irreducible over Q with coprime integer coefficients and
/// a positive leading coefficient. `approx` lies within `isolation` of
/// the root and every other root lies further than `3 · isolation` away.
#[derive(Clone, Debug)]
pub struct Qqbar {
    minpoly: DensePoly<Q>,
    approx: Complex64,
    isolation: f64,
}

/// Scales a nonzero rational polynomial to coprime integer coefficients
/// with a positive leading coefficient.
#[must_use]
pub fn primitive_part(p: &DensePoly<Q>) -> DensePoly<Q> {
    if p.is_zero() {
        return p.clone();
    }
    let den = p
        .coeffs()
        .iter()
        .fold(Integer::new(1), |acc, c| acc.lcm(&c.denominator()));
    let ints: Vec<Integer> = p
        .coeffs()
        .iter()
        .map(|c| c.numerator() * (&den / &c.denominator()))
        .collect();
    let mut content = ints.iter().fold(Integer::new(0), |acc, c| acc.gcd(c));
    if ints.last().map_or(false, Integer::is_negative) {
        content = -content;
    }
    DensePoly::new(ints.iter().map(|c| Q::from(c / &content)).collect())
}

fn gcd_u32(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl Qqbar {
    /// The rational number `q`.
    #[must_use]
    pub fn from_rational(q: &Q) -> Self {
        let minpoly = primitive_part(&DensePoly::new(vec![-q.clone(), Q::one()]));
        Self {
            minpoly,
            approx: Complex64::new(q.to_f64(), 0.0),
            isolation: f64::INFINITY,
        }
    }

    /// The Gaussian rational `z`.
    #[must_use]
    pub fn from_gaussian_rational(z: &Qi) -> Self {
        if z.im.is_zero() {
            return Self::from_rational(&z.re);
        }
        // (x - a)^2 + b^2
        let a = &z.re;
        let minpoly = primitive_part(&DensePoly::new(vec![
            z.norm(),
            -(Q::from_integer(2) * a.clone()),
            Q::one(),
        ]));
        let (re, im) = z.to_f64_pair();
        Self {
            minpoly,
            approx: Complex64::new(re, im),
            isolation: im.abs() / 2.0,
        }
    }

    /// The imaginary unit.
    #[must_use]
    pub fn i() -> Self {
        Self::from_gaussian_rational(&Qi::i())
    }

    /// `exp(2πi p/q)`, with `p/q` brought to lowest terms.
    ///
    /// # Panics
    ///
    /// Panics if `q` is zero.
    #[must_use]
    pub fn root_of_unity(p: i64, q: u32) -> Self {
        assert!(q > 0, "root_of_unity: order must be positive");
        let p = u32::try_from(p.rem_euclid(i64::from(q))).unwrap_or(0);
        let g = gcd_u32(p, q);
        let (p, q) = (p / g, q / g);

        match q {
            1 => Self::from_rational(&Q::one()),
            2 => Self::from_rational(&Q::from_integer(-1)),
            _ => Self {
                minpoly: cyclotomic_poly(q),
                approx: Complex64::from_polar(1.0, 2.0 * PI * f64::from(p) / f64::from(q)),
                isolation: (PI / f64::from(q)).sin() / 2.0,
            },
        }
    }

    /// The principal square root of a rational number.
    #[must_use]
    pub fn sqrt_rational(r: &Q) -> Self {
        if let Some(s) = r.sqrt_exact() {
            return Self::from_rational(&s);
        }
        if let Some(s) = (-r.clone()).sqrt_exact() {
            return Self::from_gaussian_rational(&Qi::new(Q::zero(), s));
        }
        let minpoly = primitive_part(&DensePoly::new(vec![-r.clone(), Q::zero(), Q::one()]));
        let x = r.to_f64();
        let root = x.abs().sqrt();
        let approx = if x < 0.0 {
            Complex64::new(0.0, root)
        } else {
            Complex64::new(root, 0.0)
        };
        Self {
            minpoly,
            approx,
            isolation: root / 2.0,
        }
    }

    /// The principal square root of a Gaussian rational.
    ///
    /// `sqrt(a + bi)` with `b ≠ 0` is a Gaussian rational when
    /// `a² + b² = s²` and `(s + a)/2` are rational squares; otherwise it
    /// is a root of the irreducible quartic `x⁴ - 2a x² + a² + b²`.
    #[must_use]
    pub fn sqrt_gaussian(z: &Qi) -> Self {
        if z.im.is_zero() {
            return Self::sqrt_rational(&z.re);
        }
        let a = &z.re;
        let n = z.norm();
        let two = Q::from_integer(2);

        if let Some(s) = n.sqrt_exact() {
            let half = (s + a.clone()).field_div(&two);
            if let Some(x) = half.sqrt_exact() {
                // (x + iy)^2 = a + bi with y = b / 2x
                let y = z.im.field_div(&(two * x.clone()));
                return Self::from_gaussian_rational(&Qi::new(x, y));
            }
        }

        let minpoly = primitive_part(&DensePoly::new(vec![
            n,
            Q::zero(),
            -(two * a.clone()),
            Q::zero(),
            Q::one(),
        ]));
        let (re, im) = z.to_f64_pair();
        let root = Complex64::new(re, im).sqrt();
        Self {
            minpoly,
            approx: root,
            isolation: root.re.abs().min(root.im.abs()) / 2.0,
        }
    }

    /// The root of `poly` closest to `approx`.
    ///
    /// `poly` must be irreducible over Q; it is made primitive here.
    ///
    /// # Errors
    ///
    /// Fails for constant or non-squarefree polynomials, and when the
    /// nearest root is not separated from the others by `approx`.
    pub fn from_poly_approx(poly: &DensePoly<Q>, approx: Complex64) -> Result<Self, QqbarError> {
        if poly.is_constant() {
            return Err(QqbarError::ConstantPolynomial(poly.to_string()));
        }
        if poly_gcd(poly, &poly.derivative()).degree() > 0 {
            return Err(QqbarError::NotSquarefree(poly.to_string()));
        }

        let minpoly = primitive_part(poly);
        if minpoly.degree() == 1 {
            let root = -minpoly.coeff(0).field_div(&minpoly.coeff(1));
            return Ok(Self::from_rational(&root));
        }

        let all = polynomial_roots(&minpoly);
        let sep = root_separation(&all);
        let root = nearest_root(&all, approx)
            .map(|i| all[i])
            .filter(|r| (r - approx).norm() < sep / 2.0)
            .ok_or_else(|| QqbarError::NoRootNear {
                poly: poly.to_string(),
                approx,
            })?;

        Ok(Self {
            minpoly,
            approx: root,
            isolation: sep / 4.0,
        })
    }

    /// The minimal polynomial (primitive, positive leading coefficient).
    #[must_use]
    pub fn minpoly(&self) -> &DensePoly<Q> {
        &self.minpoly
    }

    /// Degree over Q.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.minpoly.degree()
    }

    /// Floating-point approximation.
    #[must_use]
    pub fn approx(&self) -> Complex64 {
        self.approx
    }

    /// Radius isolating this root from its conjugates.
    #[must_use]
    pub fn isolation(&self) -> f64 {
        self.isolation
    }

    /// A tight ball around the value.
    #[must_use]
    pub fn enclosure(&self) -> ComplexBall {
        ComplexBall::new(self.approx, 1e-12 * self.approx.norm().max(1.0))
    }

    /// Returns true if the number is rational.
    #[must_use]
    pub fn is_rational(&self) -> bool {
        self.degree() == 1
    }

    /// The value as a rational number, if it is one.
    #[must_use]
    pub fn as_rational(&self) -> Option<Q> {
        self.is_rational()
            .then(|| -self.minpoly.coeff(0).field_div(&self.minpoly.coeff(1)))
    }

    /// The value as a Gaussian rational, if it is one.
    #[must_use]
    pub fn as_gaussian_rational(&self) -> Option<Qi> {
        match self.degree() {
            1 => self.as_rational().map(Qi::from_q),
            2 => {
                let (c, b, a) = (self.minpoly.coeff(0), self.minpoly.coeff(1), self.minpoly.coeff(2));
                let four = Q::from_integer(4);
                let disc = b.clone() * b.clone() - four * a.clone() * c;
                if disc.signum() >= 0 {
                    return None;
                }
                let root = (-disc).sqrt_exact()?;
                let two_a = Q::from_integer(2) * a;
                let re = -b.field_div(&two_a);
                let im = root.field_div(&two_a);
                let im = if self.approx.im < 0.0 { -im } else { im };
                Some(Qi::new(re, im))
            }
            _ => None,
        }
    }

    /// Returns true if this is `i`.
    #[must_use]
    pub fn is_i(&self) -> bool {
        self.minpoly == DensePoly::from_i64s(&[1, 0, 1]) && self.approx.im > 0.0
    }

    /// Returns true if the number is real.
    ///
    /// A non-real root and its conjugate are both roots, at distance
    /// `2|Im|`, so `|Im approx| < isolation` decides.
    #[must_use]
    pub fn is_real(&self) -> bool {
        self.is_rational() || self.approx.im.abs() < self.isolation
    }

    /// The complex conjugate.
    #[must_use]
    pub fn conj(&self) -> Self {
        Self {
            minpoly: self.minpoly.clone(),
            approx: self.approx.conj(),
            isolation: self.isolation,
        }
    }

    /// Given a factor `g` of the minimal polynomial over `Q(i)`, decides
    /// whether this number is one of its roots.
    ///
    /// The roots of `g` are the `deg g` roots of the minimal polynomial
    /// on which `|g|` is smallest.
    #[must_use]
    pub fn is_root_of_factor(&self, g: &DensePoly<Qi>) -> bool {
        if g.is_constant() {
            return false;
        }
        if g.degree() >= self.degree() {
            return true;
        }
        let gc = complex_coeffs_qi(g);
        let mut ranked: Vec<(f64, Complex64)> = polynomial_roots(&self.minpoly)
            .into_iter()
            .map(|r| (roots::eval(&gc, r).norm(), r))
            .collect();
        ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
        ranked
            .iter()
            .take(g.degree())
            .any(|(_, r)| (r - self.approx).norm() < self.isolation)
    }
}

impl PartialEq for Qqbar {
    fn eq(&self, other: &Self) -> bool {
        self.minpoly == other.minpoly
            && (self.approx - other.approx).norm() <= self.isolation.min(other.isolation)
    }
}

impl Eq for Qqbar {}

impl Hash for Qqbar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.minpoly.hash(state);
    }
}

impl From<Rational> for Qqbar {
    fn from(value: Rational) -> Self {
        Self::from_rational(&Q(value))
    }
}

impl fmt::Display for Qqbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(z) = self.as_gaussian_rational() {
            return write!(f, "{z}");
        }
        let z = self.approx;
        if self.is_real() {
            write!(f, "Algebraic({:.6} root of {})", z.re, self.minpoly)
        } else if z.im < 0.0 {
            write!(f, "Algebraic({:.6} - {:.6}*I root of {})", z.re, -z.im, self.minpoly)
        } else {
            write!(f, "Algebraic({:.6} + {:.6}*I root of {})", z.re, z.im, self.minpoly)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_part() {
        let p = DensePoly::new(vec![Q::new(-1, 2), Q::zero(), Q::new(-3, 4)]);
        assert_eq!(primitive_part(&p), DensePoly::from_i64s(&[2, 0, 3]));

        // zero coefficients do not enter the content
        let p = DensePoly::new(vec![Q::zero(), Q::new(-4, 3), Q::new(2, 3)]);
        assert_eq!(primitive_part(&p), DensePoly::from_i64s(&[0, -2, 1]));
    }

    #[test]
    fn test_zero() {
        let z = Qqbar::from_rational(&Q::zero());
        assert_eq!(z.minpoly(), &DensePoly::from_i64s(&[0, 1]));
        assert_eq!(z.as_rational(), Some(Q::zero()));
        assert_eq!(Qqbar::sqrt_rational(&Q::zero()), z);
        assert_eq!(Qqbar::sqrt_gaussian(&Qi::zero()).as_gaussian_rational(), Some(Qi::zero()));
    }

    #[test]
    fn test_rational() {
        let q = Qqbar::from_rational(&Q::new(-3, 5));
        assert_eq!(q.minpoly(), &DensePoly::from_i64s(&[3, 5]));
        assert_eq!(q.as_rational(), Some(Q::new(-3, 5)));
        assert!(q.is_real());
    }

    #[test]
    fn test_i() {
        let i = Qqbar::i();
        assert!(i.is_i());
        assert!(!i.is_real());
        assert!(!i.conj().is_i());
        assert_eq!(i.as_gaussian_rational(), Some(Qi::i()));
        assert_ne!(i, i.conj());
    }

    #[test]
    fn test_root_of_unity() {
        let z = Qqbar::root_of_unity(2, 10);
        assert_eq!(z.minpoly(), &DensePoly::from_i64s(&[1, 1, 1, 1, 1]));
        assert!((z.approx() - Complex64::from_polar(1.0, 2.0 * PI / 5.0)).norm() < 1e-14);
        assert_eq!(Qqbar::root_of_unity(3, 6).as_rational(), Some(Q::from_integer(-1)));
        assert_eq!(Qqbar::root_of_unity(-1, 4), Qqbar::i().conj());
    }

    #[test]
    fn test_sqrt_rational() {
        let s = Qqbar::sqrt_rational(&Q::from_integer(2));
        assert_eq!(s.minpoly(), &DensePoly::from_i64s(&[-2, 0, 1]));
        assert!(s.approx().re > 0.0);
        assert_eq!(Qqbar::sqrt_rational(&Q::new(9, 4)).as_rational(), Some(Q::new(3, 2)));
        assert_eq!(
            Qqbar::sqrt_rational(&Q::from_integer(-4)).as_gaussian_rational(),
            Some(Qi::new(Q::zero(), Q::from_integer(2)))
        );
        assert!(!Qqbar::sqrt_rational(&Q::from_integer(-3)).is_real());
    }

    #[test]
    fn test_sqrt_gaussian() {
        // sqrt(3 + 4i) = 2 + i
        let z = Qi::new(Q::from_integer(3), Q::from_integer(4));
        assert_eq!(
            Qqbar::sqrt_gaussian(&z).as_gaussian_rational(),
            Some(Qi::new(Q::from_integer(2), Q::one()))
        );

        // sqrt(2i) = 1 + i
        let z = Qi::new(Q::zero(), Q::from_integer(2));
        assert_eq!(
            Qqbar::sqrt_gaussian(&z).as_gaussian_rational(),
            Some(Qi::new(Q::one(), Q::one()))
        );

        // sqrt(1 + i) has degree 4
        let r = Qqbar::sqrt_gaussian(&Qi::new(Q::one(), Q::one()));
        assert_eq!(r.degree(), 4);
        assert_eq!(r.minpoly(), &DensePoly::from_i64s(&[2, 0, -2, 0, 1]));
        assert!(r.approx().re > 0.0 && r.approx().im > 0.0);
    }

    #[test]
    fn test_from_poly_approx() {
        let p = DensePoly::from_i64s(&[-1, 1, 1]);
        let golden = Qqbar::from_poly_approx(&p, Complex64::new(0.6, 0.0)).unwrap();
        assert!((golden.approx().re - (5f64.sqrt() - 1.0) / 2.0).abs() < 1e-14);
        assert!(golden.is_real());
        assert_eq!(golden.degree(), 2);
    }

    #[test]
    fn test_from_poly_approx_errors() {
        let constant = DensePoly::from_i64s(&[3]);
        assert!(matches!(
            Qqbar::from_poly_approx(&constant, Complex64::new(0.0, 0.0)),
            Err(QqbarError::ConstantPolynomial(_))
        ));
        let square = DensePoly::from_i64s(&[1, 2, 1]);
        assert!(matches!(
            Qqbar::from_poly_approx(&square, Complex64::new(-1.0, 0.0)),
            Err(QqbarError::NotSquarefree(_))
        ));
        let quad = DensePoly::from_i64s(&[-2, 0, 1]);
        assert!(matches!(
            Qqbar::from_poly_approx(&quad, Complex64::new(10.0, 0.0)),
            Err(QqbarError::NoRootNear { .. })
        ));
    }

    #[test]
    fn test_is_root_of_factor() {
        // x^4 + 1 = (x^2 - i)(x^2 + i) over Q(i); ζ8 is a root of x^2 - i.
        let zeta = Qqbar::root_of_unity(1, 8);
        let factor = DensePoly::new(vec![-Qi::i(), Qi::zero(), Qi::one()]);
        let other = DensePoly::new(vec![Qi::i(), Qi::zero(), Qi::one()]);
        assert!(zeta.is_root_of_factor(&factor));
        assert!(!zeta.is_root_of_factor(&other));
    }

    #[test]
    fn test_display() {
        assert_eq!(Qqbar::i().to_string(), "I");
        let s = Qqbar::sqrt_rational(&Q::from_integer(2)).to_string();
        assert!(s.starts_with("Algebraic(1.414214"));
    }
}
