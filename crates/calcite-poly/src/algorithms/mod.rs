//! Polynomial algorithms.
//!
//! This module contains:
//! - Euclidean division, GCD and inversion modulo a polynomial
//! - Cyclotomic polynomials and Euler's totient

pub mod cyclotomic;
pub mod gcd;
