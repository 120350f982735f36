//! # Calcite
//!
//! Exact real and complex numbers, represented as elements of fields
//! generated over `Q(i)` by algebraic numbers and formal function values,
//! with a rewriter into complex normal form.
//!
//! ## Features
//!
//! - **Interned extensions**: π, `exp`, `log`, `sqrt`, circular and
//!   measurement functions, and algebraic numbers, each stored once per
//!   [`CaCtx`]
//! - **Canonical field elements**: multivariate rational functions over the
//!   generators actually used
//! - **Three-valued predicates**: zero and equality tests return a [`Truth`]
//! - **Complex normal form**: circular functions through exponentials,
//!   real and imaginary parts through conjugation, algebraic numbers
//!   through roots of unity
//!
//! ## Quick Start
//!
//! ```rust
//! use calcite::{Ca, CaCtx, CaExtHead};
//!
//! let mut ctx = CaCtx::new();
//! let pi = ctx.pi();
//! let angle = ctx.mul(&pi, &Ca::from_ratio(1, 6));
//! let sin = ctx.formal(CaExtHead::Sin, &[angle]);
//! assert_eq!(ctx.rewrite_complex_normal_form(&sin, true), Ca::from_ratio(1, 2));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arith;
pub mod ca;
pub mod complex;
pub mod ctx;
pub mod display;
pub mod elementary;
pub mod eval;
pub mod ext;
pub mod fexpr;
pub mod field;
pub mod options;
pub mod predicates;
pub mod rewrite;
pub mod trig;
pub mod truth;
pub mod vec;

pub use ca::{Ca, FieldElem, Special};
pub use ctx::CaCtx;
pub use ext::{CaExt, CaExtHead, ExtData, ExtHandle};
pub use fexpr::FexprError;
pub use field::{CaField, FieldHandle};
pub use options::CaOptions;
pub use truth::Truth;
pub use vec::CaVec;

#[cfg(test)]
mod proptests;
