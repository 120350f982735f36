//! # calcite-ball
//!
//! Numeric enclosures for exact numbers.
//!
//! Every extension carries a [`ComplexBall`] enclosing its value. The
//! enclosures decide branch-cut questions and certify that a value is
//! nonzero when its ball excludes the origin.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ball;

pub use ball::ComplexBall;
pub use num_complex::Complex64;
