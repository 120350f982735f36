//! # calcite-expr
//!
//! Symbolic expression trees for calcite.
//!
//! This crate provides:
//! - Arena-allocated expression storage with hash-consing
//! - Type-safe expression handles
//! - Named function heads (`Exp`, `Sin`, `Conjugate`, ...) and constants
//!   (`Pi`, `NumberI`, `Infinity`, ...)
//! - `Where` nodes binding local symbols, resolved when an expression is
//!   imported as an exact number
//!
//! Expressions are pure syntax: nothing here evaluates or simplifies.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod expr;
pub mod handle;
pub mod intern;

pub use arena::ExprArena;
pub use expr::{functions, ExprNode, FunctionId, SymbolId};
pub use handle::ExprHandle;
pub use intern::InternTable;
