//! Core rational function type.
//!
//! A rational function is a quotient of two multivariate polynomials
//! P/Q over a field K. We maintain a normal form so that structurally
//! equal values can be recognised by derived equality:
//! - Zero is represented as 0/1
//! - No monomial divides both numerator and denominator
//! - A constant denominator is folded into the numerator
//! - When one side divides the other, the quotient is taken
//! - In a single variable the numerator and denominator are coprime
//! - The denominator is monic (leading coefficient = 1)

use calcite_poly::algorithms::gcd::{poly_div_rem, poly_gcd};
use calcite_poly::dense::DensePoly;
use calcite_poly::sparse::SparsePoly;
use calcite_rings::traits::Field;

/// A rational function P/Q in `num_vars` variables over a field K.
///
/// # Example
///
/// ```
/// use calcite_poly::sparse::SparsePoly;
/// use calcite_rational_func::RationalFunction;
/// use calcite_rings::Q;
///
/// // (x*y) / x = y
/// let x = SparsePoly::<Q>::var(0, 2);
/// let y = SparsePoly::<Q>::var(1, 2);
/// let f = RationalFunction::new(x.mul(&y), x.clone());
/// assert!(f.is_polynomial());
/// assert_eq!(f.numerator(), &y);
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct RationalFunction<K: Field> {
    numerator: SparsePoly<K>,
    denominator: SparsePoly<K>,
}

impl<K: Field> RationalFunction<K> {
    /// Creates a new rational function from numerator and denominator.
    ///
    /// The result is normalized.
    ///
    /// # Panics
    ///
    /// Panics if the denominator is zero or the variable counts differ.
    #[must_use]
    pub fn new(numerator: SparsePoly<K>, denominator: SparsePoly<K>) -> Self {
        assert!(!denominator.is_zero(), "denominator cannot be zero");
        assert_eq!(
            numerator.num_vars(),
            denominator.num_vars(),
            "numerator and denominator must share variables"
        );

        let mut rf = Self {
            numerator,
            denominator,
        };
        rf.normalize();
        rf
    }

    /// Creates a rational function from a polynomial (denominator = 1).
    #[must_use]
    pub fn from_poly(p: SparsePoly<K>) -> Self {
        let n = p.num_vars();
        Self {
            numerator: p,
            denominator: SparsePoly::one(n),
        }
    }

    /// Creates the zero rational function (0/1).
    #[must_use]
    pub fn zero(num_vars: usize) -> Self {
        Self::from_poly(SparsePoly::zero(num_vars))
    }

    /// Creates the constant rational function 1/1.
    #[must_use]
    pub fn one(num_vars: usize) -> Self {
        Self::from_poly(SparsePoly::one(num_vars))
    }

    /// Creates a constant rational function c/1.
    #[must_use]
    pub fn constant(c: K, num_vars: usize) -> Self {
        Self::from_poly(SparsePoly::constant(c, num_vars))
    }

    /// Creates the variable x_i.
    #[must_use]
    pub fn var(i: usize, num_vars: usize) -> Self {
        Self::from_poly(SparsePoly::var(i, num_vars))
    }

    /// Returns the numerator polynomial.
    #[must_use]
    pub fn numerator(&self) -> &SparsePoly<K> {
        &self.numerator
    }

    /// Returns the denominator polynomial.
    #[must_use]
    pub fn denominator(&self) -> &SparsePoly<K> {
        &self.denominator
    }

    /// Number of variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.numerator.num_vars()
    }

    /// Returns true if this is the zero rational function.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    /// Returns true if this is a polynomial (denominator = 1).
    #[must_use]
    pub fn is_polynomial(&self) -> bool {
        self.denominator.is_one()
    }

    /// The value of a constant rational function.
    #[must_use]
    pub fn as_constant(&self) -> Option<K> {
        if self.is_polynomial() {
            self.numerator.as_constant()
        } else {
            None
        }
    }

    /// Marks which variables occur in the numerator or denominator.
    #[must_use]
    pub fn used_vars(&self) -> Vec<bool> {
        let mut used = self.numerator.used_vars();
        for (u, d) in used.iter_mut().zip(self.denominator.used_vars()) {
            *u |= d;
        }
        used
    }

    /// Renames variable `j` to `map[j]` in a ring of `num_vars` variables.
    #[must_use]
    pub fn remap(&self, map: &[usize], num_vars: usize) -> Self {
        Self::new(
            self.numerator.remap(map, num_vars),
            self.denominator.remap(map, num_vars),
        )
    }

    /// Applies the relation `modulus(x_v) = 0` to numerator and denominator.
    ///
    /// # Panics
    ///
    /// Panics if the denominator reduces to zero, which means the relation
    /// does not hold for a value at which the denominator is nonzero.
    #[must_use]
    pub fn reduce_var(&self, v: usize, modulus: &DensePoly<K>) -> Self {
        let num = self.numerator.reduce_var(v, modulus);
        let den = self.denominator.reduce_var(v, modulus);
        assert!(!den.is_zero(), "reduce_var: denominator reduced to zero");
        Self::new(num, den)
    }

    /// Applies `f` to every coefficient.
    #[must_use]
    pub fn map_coeffs(&self, f: impl Fn(&K) -> K) -> Self {
        Self::new(self.numerator.map_coeffs(&f), self.denominator.map_coeffs(&f))
    }

    /// Normalizes the rational function to canonical form.
    fn normalize(&mut self) {
        let n = self.num_vars();

        // Handle zero numerator
        if self.numerator.is_zero() {
            self.denominator = SparsePoly::one(n);
            return;
        }

        // Strip the common monomial factor
        let content = self
            .numerator
            .monomial_content()
            .gcd(&self.denominator.monomial_content());
        if !content.is_one() {
            self.numerator = self.numerator.div_monomial(&content);
            self.denominator = self.denominator.div_monomial(&content);
        }

        if let Some(c) = self.denominator.as_constant() {
            let inv = c.inv().expect("nonzero constant denominator");
            self.numerator = self.numerator.scale(&inv);
            self.denominator = SparsePoly::one(n);
            return;
        }

        if let Some(q) = self.numerator.div_exact(&self.denominator) {
            self.numerator = q;
            self.denominator = SparsePoly::one(n);
            return;
        }

        if let Some(q) = self.denominator.div_exact(&self.numerator) {
            self.numerator = SparsePoly::one(n);
            self.denominator = q;
        } else {
            self.cancel_univariate_gcd();
        }

        // Make denominator monic
        let lead = self
            .denominator
            .leading_coeff()
            .cloned()
            .unwrap_or_else(K::one);
        if !lead.is_one() {
            let lead_inv = lead.inv().expect("nonzero leading coefficient");
            self.numerator = self.numerator.scale(&lead_inv);
            self.denominator = self.denominator.scale(&lead_inv);
        }
    }

    /// When only one variable occurs, divides out the full polynomial gcd.
    fn cancel_univariate_gcd(&mut self) {
        let used = self.used_vars();
        let mut vars = used.iter().enumerate().filter(|&(_, &u)| u).map(|(i, _)| i);
        let (Some(v), None) = (vars.next(), vars.next()) else {
            return;
        };
        let (Some(num), Some(den)) = (
            self.numerator.to_univariate(v),
            self.denominator.to_univariate(v),
        ) else {
            return;
        };

        let g = poly_gcd(&num, &den);
        if g.degree() > 0 {
            let n = self.num_vars();
            self.numerator = SparsePoly::from_univariate(&poly_div_rem(&num, &g).0, v, n);
            self.denominator = SparsePoly::from_univariate(&poly_div_rem(&den, &g).0, v, n);
        }
    }
}

impl<K: Field + std::fmt::Display> RationalFunction<K> {
    /// Formats the rational function with the given variable names.
    #[must_use]
    pub fn to_string_with(&self, names: &[String]) -> String {
        let num = self.numerator.to_string_with(names);
        if self.is_polynomial() {
            num
        } else {
            let den = self.denominator.to_string_with(names);
            format!("({num}) / ({den})")
        }
    }
}

impl<K: Field + std::fmt::Display> std::fmt::Display for RationalFunction<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_with(&[]))
    }
}
