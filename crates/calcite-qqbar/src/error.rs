//! Errors raised when constructing algebraic numbers.

use calcite_ball::Complex64;
use thiserror::Error;

/// Error in constructing an algebraic number from a polynomial.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum QqbarError {
    /// The polynomial has no roots.
    #[error("cannot take a root of the constant polynomial {0}")]
    ConstantPolynomial(String),

    /// The polynomial has a repeated factor.
    #[error("polynomial {0} is not squarefree")]
    NotSquarefree(String),

    /// No root is unambiguously closest to the approximation.
    #[error("no root of {poly} is isolated near {approx}")]
    NoRootNear {
        /// The polynomial, rendered.
        poly: String,
        /// The requested approximation.
        approx: Complex64,
    },
}
