//! # calcite-integers
//!
//! Arbitrary precision integer and rational arithmetic for calcite.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Arbitrary precision rationals (`Rational`), always in lowest terms
//! - Exact square roots, used when simplifying `sqrt` of rational numbers
//!
//! Conversions to `f64` exist only to seed numeric enclosures; every
//! decision about equality is made on the exact values.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use rational::Rational;
