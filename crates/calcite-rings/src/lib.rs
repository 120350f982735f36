//! # calcite-rings
//!
//! Coefficient structures for calcite.
//!
//! This crate provides:
//! - Abstract traits: `Ring`, `EuclideanDomain`, `Field`
//! - The rationals `Q`
//! - The Gaussian rationals `Qi = Q(i)`, the coefficient field of every
//!   multivariate rational function in the exact-number layer
//!
//! ## Trait Hierarchy
//!
//! ```text
//! Ring
//!  └── CommutativeRing
//!       └── IntegralDomain
//!            └── EuclideanDomain
//!                 └── Field
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod gaussian;
pub mod rationals;
pub mod traits;

#[cfg(test)]
mod proptests;

pub use gaussian::Qi;
pub use rationals::Q;
pub use traits::{CommutativeRing, EuclideanDomain, Field, IntegralDomain, Ring};
