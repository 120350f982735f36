//! # calcite-poly
//!
//! Polynomial arithmetic for calcite.
//!
//! This crate provides:
//! - Dense univariate polynomials (minimal and reduction polynomials)
//! - Sparse multivariate polynomials over exponent-vector monomials, the
//!   numerators and denominators of field elements
//! - Polynomial GCD, inversion modulo a polynomial, cyclotomic polynomials
//!
//! Sparse terms are kept in descending lexicographic order, which makes
//! structural equality a canonical equality test.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod algorithms;
pub mod dense;
pub mod monomial;
pub mod sparse;

#[cfg(test)]
mod proptests;

pub use dense::DensePoly;
pub use monomial::Monomial;
pub use sparse::SparsePoly;
