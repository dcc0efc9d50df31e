pub mod cholesky;
pub mod config;
pub mod error;
pub mod geom;
pub mod graph;
pub mod io;
pub mod matrix;
pub mod perm;
pub mod reorder;
pub mod study;

// Prelude
pub use cholesky::{CholeskyConfig, CholeskyFactor, factor, factor_in_place, factor_with};
pub use config::StudyConfig;
pub use error::{Error, Result};
pub use geom::mesh::{Mesh, TriangleIndex};
pub use geom::point::{Axis, Point};
pub use graph::{AdjacencyView, VertexGraph};
pub use matrix::{DenseMatrix, build_pattern_matrix, sparsity};
pub use perm::{Permutation, apply_permutation};
pub use reorder::{CompletionPolicy, NeighborOrder, ReorderStrategy};
pub use study::{StrategyOutcome, StrategyReport, run_strategy, run_study};
