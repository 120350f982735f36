//! Multivariate rational functions P/Q for calcite.
//!
//! This crate provides:
//! - [`RationalFunction`] for representing P/Q with sparse multivariate
//!   numerator and denominator
//! - Arithmetic operations (add, sub, mul, div, integer powers)
//! - Variable remapping and reduction by algebraic relations
//!
//! Elements of a field generated by extensions are rational functions in
//! the field's generators with Gaussian-rational coefficients.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod arithmetic;
mod rational_func;

pub use rational_func::RationalFunction;
