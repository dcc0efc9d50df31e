//! Error types for reordering and factorization.

use thiserror::Error;

/// Errors raised by the reordering and factorization core.
///
/// All variants are recoverable by the caller. The study driver records them
/// per strategy and keeps going.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A strategy needs a per-vertex attribute the graph does not provide.
    #[error("{strategy} requires vertex attribute `{attribute}`, missing on vertex {vertex}")]
    AttributeMissing {
        strategy: &'static str,
        attribute: &'static str,
        vertex: usize,
    },

    /// Factorization met a negative pivot outside the near-zero band.
    #[error("Matrix is not positive semi-definite: pivot {index} is {value:e}")]
    NonPositiveDefinite { index: usize, value: f64 },

    /// Sizes of two operands do not agree.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A mapping that should be a bijection on `[0, n)` is not one.
    #[error("Invalid permutation: index {index} {reason}")]
    InvalidPermutation { index: usize, reason: &'static str },
}

/// Result alias for the core operations.
pub type Result<T> = std::result::Result<T, Error>;
