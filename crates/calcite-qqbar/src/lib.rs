//! # calcite-qqbar
//!
//! Exact algebraic numbers.
//!
//! A [`Qqbar`] is the root of an irreducible integer polynomial singled
//! out by a numeric approximation together with a radius isolating it
//! from the other roots. Besides the basic constructors the crate
//! recognizes elements of cyclotomic fields: given an algebraic number it
//! searches for a root of unity `ζ_q` and a rational polynomial `c` with
//! the number equal to `c(ζ_q)`, using an integer relation found by LLL
//! and verified exactly.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cyclotomic;
pub mod error;
pub mod lll;
pub mod qqbar;
pub mod roots;

#[cfg(test)]
mod proptests;

pub use error::QqbarError;
pub use qqbar::Qqbar;
