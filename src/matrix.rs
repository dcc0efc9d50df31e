//! Dense square matrices, the graph pattern builder, and sparsity metrics.

pub mod dense;
pub mod metrics;
pub mod pattern;

pub use dense::DenseMatrix;
pub use metrics::{bandwidth, fill_in, nnz, nnz_lower, sparsity};
pub use pattern::build_pattern_matrix;
