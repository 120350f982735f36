//! Sparse multivariate polynomials.
//!
//! The numerators and denominators of field elements are sparse
//! polynomials in the field's generators. Terms are kept sorted in
//! descending lexicographic order with no zero coefficients, so two
//! polynomials denote the same value exactly when they compare equal.

use calcite_rings::traits::{Field, Ring};

use crate::dense::DensePoly;
use crate::monomial::Monomial;

/// A sparse multivariate polynomial.
///
/// Terms are stored as (monomial, coefficient) pairs, leading term first.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SparsePoly<R: Ring> {
    /// Terms in descending lex order.
    terms: Vec<(Monomial, R)>,
    /// Number of variables.
    num_vars: usize,
}

impl<R: Ring> SparsePoly<R> {
    /// Creates a new polynomial from terms.
    ///
    /// Terms are sorted and like terms combined.
    #[must_use]
    pub fn new(terms: Vec<(Monomial, R)>, num_vars: usize) -> Self {
        let mut poly = Self { terms, num_vars };
        poly.normalize();
        poly
    }

    /// Creates the zero polynomial.
    #[must_use]
    pub fn zero(num_vars: usize) -> Self {
        Self {
            terms: Vec::new(),
            num_vars,
        }
    }

    /// Creates the constant polynomial 1.
    #[must_use]
    pub fn one(num_vars: usize) -> Self {
        Self::constant(R::one(), num_vars)
    }

    /// Creates a constant polynomial.
    #[must_use]
    pub fn constant(c: R, num_vars: usize) -> Self {
        if c.is_zero() {
            Self::zero(num_vars)
        } else {
            Self {
                terms: vec![(Monomial::one(num_vars), c)],
                num_vars,
            }
        }
    }

    /// Creates a single variable x_i.
    #[must_use]
    pub fn var(i: usize, num_vars: usize) -> Self {
        Self {
            terms: vec![(Monomial::var(i, num_vars), R::one())],
            num_vars,
        }
    }

    /// Returns true if this is the zero polynomial.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if no variable occurs (including zero).
    #[must_use]
    pub fn is_constant(&self) -> bool {
        self.terms.iter().all(|(m, _)| m.is_one())
    }

    /// The value of a constant polynomial.
    #[must_use]
    pub fn as_constant(&self) -> Option<R> {
        match self.terms.as_slice() {
            [] => Some(R::zero()),
            [(m, c)] if m.is_one() => Some(c.clone()),
            _ => None,
        }
    }

    /// Returns true for the polynomial 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.as_constant().map_or(false, |c| c.is_one())
    }

    /// Returns the number of terms.
    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if there are no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the number of variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    /// Returns the terms.
    #[must_use]
    pub fn terms(&self) -> &[(Monomial, R)] {
        &self.terms
    }

    /// Returns the leading coefficient.
    #[must_use]
    pub fn leading_coeff(&self) -> Option<&R> {
        self.terms.first().map(|(_, c)| c)
    }

    /// Sorts terms and combines like terms.
    fn normalize(&mut self) {
        self.terms.sort_by(|a, b| b.0.cmp(&a.0));

        let mut combined: Vec<(Monomial, R)> = Vec::with_capacity(self.terms.len());
        for (m, c) in self.terms.drain(..) {
            if let Some((last, acc)) = combined.last_mut() {
                if *last == m {
                    *acc = acc.clone() + c;
                    continue;
                }
            }
            combined.push((m, c));
        }
        combined.retain(|(_, c)| !c.is_zero());

        self.terms = combined;
    }

    /// Adds two polynomials.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        assert_eq!(self.num_vars, other.num_vars, "add: variable count mismatch");

        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());

        Self::new(terms, self.num_vars)
    }

    /// Negates a polynomial.
    #[must_use]
    pub fn neg(&self) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .map(|(m, c)| (m.clone(), -c.clone()))
                .collect(),
            num_vars: self.num_vars,
        }
    }

    /// Subtracts two polynomials.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Multiplies two polynomials (schoolbook algorithm).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        assert_eq!(self.num_vars, other.num_vars, "mul: variable count mismatch");

        if self.is_zero() || other.is_zero() {
            return Self::zero(self.num_vars);
        }

        let mut terms = Vec::with_capacity(self.len() * other.len());

        for (m1, c1) in &self.terms {
            for (m2, c2) in &other.terms {
                terms.push((m1.mul(m2), c1.clone() * c2.clone()));
            }
        }

        Self::new(terms, self.num_vars)
    }

    /// Multiplies by a scalar.
    #[must_use]
    pub fn scale(&self, c: &R) -> Self {
        if c.is_zero() {
            return Self::zero(self.num_vars);
        }

        Self::new(
            self.terms
                .iter()
                .map(|(m, x)| (m.clone(), x.clone() * c.clone()))
                .collect(),
            self.num_vars,
        )
    }

    /// Multiplies by the term `c * m`.
    #[must_use]
    pub fn mul_term(&self, m: &Monomial, c: &R) -> Self {
        if c.is_zero() {
            return Self::zero(self.num_vars);
        }

        Self::new(
            self.terms
                .iter()
                .map(|(m2, c2)| (m.mul(m2), c2.clone() * c.clone()))
                .collect(),
            self.num_vars,
        )
    }

    /// Raises the polynomial to a non-negative integer power.
    #[must_use]
    pub fn pow(&self, n: u32) -> Self {
        let mut result = Self::one(self.num_vars);
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

    /// Marks which variables occur in some term.
    #[must_use]
    pub fn used_vars(&self) -> Vec<bool> {
        let mut used = vec![false; self.num_vars];
        for (m, _) in &self.terms {
            for (i, &e) in m.exponents().iter().enumerate() {
                if e > 0 {
                    used[i] = true;
                }
            }
        }
        used
    }

    /// Highest exponent of variable `v`.
    #[must_use]
    pub fn degree_in(&self, v: usize) -> u32 {
        self.terms.iter().map(|(m, _)| m.exponent(v)).max().unwrap_or(0)
    }

    /// Computes the total degree.
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.terms
            .iter()
            .map(|(m, _)| m.total_degree())
            .max()
            .unwrap_or(0)
    }

    /// Renames variable `j` to `map[j]` in a ring of `num_vars` variables.
    ///
    /// Used both to lift into a larger generator tuple and to compress onto
    /// the variables that actually occur.
    #[must_use]
    pub fn remap(&self, map: &[usize], num_vars: usize) -> Self {
        Self::new(
            self.terms
                .iter()
                .map(|(m, c)| (m.remap(map, num_vars), c.clone()))
                .collect(),
            num_vars,
        )
    }

    /// Greatest monomial dividing every term (1 for zero).
    #[must_use]
    pub fn monomial_content(&self) -> Monomial {
        let mut iter = self.terms.iter().map(|(m, _)| m);
        match iter.next() {
            None => Monomial::one(self.num_vars),
            Some(first) => iter.fold(first.clone(), |acc, m| acc.gcd(m)),
        }
    }

    /// Divides every term by a monomial that divides all of them.
    ///
    /// # Panics
    ///
    /// Panics if `m` does not divide some term.
    #[must_use]
    pub fn div_monomial(&self, m: &Monomial) -> Self {
        Self {
            terms: self
                .terms
                .iter()
                .map(|(t, c)| {
                    let q = t.div(m).unwrap_or_else(|| panic!("div_monomial: {m} does not divide {t}"));
                    (q, c.clone())
                })
                .collect(),
            num_vars: self.num_vars,
        }
    }

    /// Applies `f` to every coefficient.
    #[must_use]
    pub fn map_coeffs<S: Ring>(&self, f: impl Fn(&R) -> S) -> SparsePoly<S> {
        SparsePoly::new(
            self.terms.iter().map(|(m, c)| (m.clone(), f(c))).collect(),
            self.num_vars,
        )
    }

    /// Reduces the exponents of variable `v` modulo the monic polynomial
    /// `modulus`, i.e. applies the relation `modulus(x_v) = 0`.
    #[must_use]
    pub fn reduce_var(&self, v: usize, modulus: &DensePoly<R>) -> Self {
        let d = modulus.degree();
        let max_e = self.degree_in(v) as usize;
        if d == 0 || max_e < d {
            return self.clone();
        }

        // powers[e] = x^e mod modulus
        let mut powers = Vec::with_capacity(max_e + 1);
        let mut p = DensePoly::<R>::one();
        for _ in 0..=max_e {
            powers.push(p.clone());
            p = p.shift(1).rem_monic(modulus);
        }

        let mut terms = Vec::with_capacity(self.terms.len());
        for (m, c) in &self.terms {
            let e = m.exponent(v) as usize;
            if e < d {
                terms.push((m.clone(), c.clone()));
                continue;
            }
            for (j, pc) in powers[e].coeffs().iter().enumerate() {
                if pc.is_zero() {
                    continue;
                }
                let exp = u32::try_from(j).unwrap_or(u32::MAX);
                terms.push((m.with_exponent(v, exp), c.clone() * pc.clone()));
            }
        }

        Self::new(terms, self.num_vars)
    }

    /// Views the polynomial as univariate in `v`, if no other variable occurs.
    #[must_use]
    pub fn to_univariate(&self, v: usize) -> Option<DensePoly<R>> {
        let mut coeffs = vec![R::zero(); self.degree_in(v) as usize + 1];
        for (m, c) in &self.terms {
            let others = m
                .exponents()
                .iter()
                .enumerate()
                .any(|(i, &e)| i != v && e > 0);
            if others {
                return None;
            }
            coeffs[m.exponent(v) as usize] = c.clone();
        }
        Some(DensePoly::new(coeffs))
    }

    /// Embeds a univariate polynomial as variable `v` of `num_vars`.
    #[must_use]
    pub fn from_univariate(p: &DensePoly<R>, v: usize, num_vars: usize) -> Self {
        let one = Monomial::one(num_vars);
        Self::new(
            p.coeffs()
                .iter()
                .enumerate()
                .filter(|(_, c)| !c.is_zero())
                .map(|(e, c)| {
                    let exp = u32::try_from(e).unwrap_or(u32::MAX);
                    (one.with_exponent(v, exp), c.clone())
                })
                .collect(),
            num_vars,
        )
    }
}

impl<F: Field> SparsePoly<F> {
    /// Exact division.
    ///
    /// Returns `Some(q)` with `self = q * divisor`, or `None` when the
    /// divisor does not divide `self`. In lex order the leading term of a
    /// divisor divides the leading term of every multiple, so the first
    /// failure of that test proves the division is not exact.
    #[must_use]
    pub fn div_exact(&self, divisor: &Self) -> Option<Self> {
        let (lm, lc) = divisor.terms.first()?;
        let lc_inv = lc.inv()?;

        let mut rem = self.clone();
        let mut quotient = Vec::new();

        while let Some((m, c)) = rem.terms.first().cloned() {
            let qm = m.div(lm)?;
            let qc = c * lc_inv.clone();
            rem = rem.sub(&divisor.mul_term(&qm, &qc));
            quotient.push((qm, qc));
        }

        Some(Self::new(quotient, self.num_vars))
    }

    /// Scales so that the leading coefficient is one.
    #[must_use]
    pub fn make_monic(&self) -> Self {
        match self.leading_coeff().and_then(|c| c.inv()) {
            Some(inv) => self.scale(&inv),
            None => self.clone(),
        }
    }
}

impl<R: Ring + std::fmt::Display> SparsePoly<R> {
    /// Formats the polynomial with the given variable names.
    #[must_use]
    pub fn to_string_with(&self, names: &[String]) -> String {
        if self.is_zero() {
            return "0".to_string();
        }

        let terms: Vec<_> = self
            .terms
            .iter()
            .map(|(m, c)| {
                let mon = m.to_string_with(names);
                match (mon.as_str(), c.is_one()) {
                    ("1", _) => format!("{c}"),
                    (_, true) => mon,
                    _ => format!("({c})*{mon}"),
                }
            })
            .collect();

        terms.join(" + ")
    }
}

impl<R: Ring + std::fmt::Display> std::fmt::Display for SparsePoly<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_with(&[]))
    }
}
