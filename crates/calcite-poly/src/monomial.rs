//! Exponent-vector monomials for multivariate polynomials.
//!
//! A field generated by extensions may have any number of generators, so
//! exponents are kept in an inline `SmallVec` rather than bit-packed into a
//! fixed word. Up to four variables stay on the stack.

use smallvec::SmallVec;

/// Exponents of a monomial, one entry per variable.
pub type Exponents = SmallVec<[u32; 4]>;

/// A monomial `x_0^e_0 * x_1^e_1 * ...`.
///
/// The derived ordering is lexicographic on the exponent vector with
/// variable 0 most significant.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct Monomial(Exponents);

impl Monomial {
    /// Creates the monomial 1 in `num_vars` variables.
    #[must_use]
    pub fn one(num_vars: usize) -> Self {
        Self(SmallVec::from_elem(0, num_vars))
    }

    /// Creates the monomial x_i.
    ///
    /// # Panics
    ///
    /// Panics if `i >= num_vars`.
    #[must_use]
    pub fn var(i: usize, num_vars: usize) -> Self {
        assert!(i < num_vars, "variable index out of range");
        let mut exps = SmallVec::from_elem(0, num_vars);
        exps[i] = 1;
        Self(exps)
    }

    /// Creates a monomial from exponents.
    #[must_use]
    pub fn from_exponents(exps: &[u32]) -> Self {
        Self(SmallVec::from_slice(exps))
    }

    /// Number of variables.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.0.len()
    }

    /// Returns the exponent of variable i.
    #[must_use]
    pub fn exponent(&self, i: usize) -> u32 {
        self.0.get(i).copied().unwrap_or(0)
    }

    /// Returns all exponents.
    #[must_use]
    pub fn exponents(&self) -> &[u32] {
        &self.0
    }

    /// Returns true for the monomial 1.
    #[must_use]
    pub fn is_one(&self) -> bool {
        self.0.iter().all(|&e| e == 0)
    }

    /// Multiplies two monomials (adds exponents).
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        debug_assert_eq!(self.num_vars(), other.num_vars());
        Self(self.0.iter().zip(&other.0).map(|(a, b)| a + b).collect())
    }

    /// Divides by another monomial if possible.
    ///
    /// Returns `Some(quotient)` if self is divisible by other.
    #[must_use]
    pub fn div(&self, other: &Self) -> Option<Self> {
        if !other.divides(self) {
            return None;
        }
        Some(Self(self.0.iter().zip(&other.0).map(|(a, b)| a - b).collect()))
    }

    /// Returns true if self divides other.
    #[must_use]
    pub fn divides(&self, other: &Self) -> bool {
        self.0.iter().zip(&other.0).all(|(a, b)| a <= b)
    }

    /// Computes the total degree.
    #[must_use]
    pub fn total_degree(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Computes the greatest common divisor of two monomials.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        Self(self.0.iter().zip(&other.0).map(|(a, b)| *a.min(b)).collect())
    }

    /// Replaces the exponent of variable i.
    #[must_use]
    pub fn with_exponent(&self, i: usize, e: u32) -> Self {
        let mut exps = self.0.clone();
        exps[i] = e;
        Self(exps)
    }

    /// Moves variable `j` to position `map[j]` in a monomial of `num_vars`
    /// variables.
    #[must_use]
    pub fn remap(&self, map: &[usize], num_vars: usize) -> Self {
        let mut exps = SmallVec::from_elem(0, num_vars);
        for (j, &e) in self.0.iter().enumerate() {
            if e > 0 {
                exps[map[j]] += e;
            }
        }
        Self(exps)
    }

    /// Formats the monomial using `x0, x1, ...` as variable names.
    #[must_use]
    pub fn to_string_with(&self, names: &[String]) -> String {
        let mut parts = Vec::new();

        for (i, &e) in self.0.iter().enumerate() {
            if e == 0 {
                continue;
            }
            let var_name = names.get(i).cloned().unwrap_or_else(|| format!("x{i}"));
            if e == 1 {
                parts.push(var_name);
            } else {
                parts.push(format!("{var_name}^{e}"));
            }
        }

        if parts.is_empty() {
            "1".to_string()
        } else {
            parts.join("*")
        }
    }
}

impl std::fmt::Display for Monomial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_with(&[]))
    }
}
