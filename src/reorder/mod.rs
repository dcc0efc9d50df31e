//! Vertex reordering strategies.
//!
//! Every strategy turns a graph into a [`Permutation`] of its vertices. The
//! permuted pattern matrix is then produced by the shared
//! [`apply_permutation`], so strategies differ only in how they rank the
//! vertices.
//!
//! ```text
//! AdjacencyView ──► ReorderStrategy::compute_permutation() ──► Permutation
//!                                                                  │
//! pattern matrix ─────────────► apply_permutation() ◄──────────────┘
//! ```

pub mod coordinate;
pub mod cuthill;
pub mod degree;
pub mod random;

use crate::error::Result;
use crate::geom::point::Axis;
use crate::graph::AdjacencyView;
use crate::matrix::DenseMatrix;
use crate::perm::{Permutation, apply_permutation};
use serde::{Deserialize, Serialize};

pub use cuthill::{CompletionPolicy, NeighborOrder};
pub use random::random_permutation;

/// The closed family of reordering heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReorderStrategy {
    /// Keeps the reference ordering.
    Identity,
    /// Uniformly random ordering. With a seed the ordering is reproducible,
    /// without one it is drawn from the thread RNG.
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
    /// Ascending coordinate along `axis`, ties by index.
    CoordinateSort { axis: Axis },
    /// Ascending degree, ties by index.
    MinDegree,
    /// Descending degree, ties by ascending index.
    MaxDegree,
    /// Breadth-first numbering from a minimum-degree vertex.
    #[serde(rename = "cuthill_mckee")]
    CuthillMcKee {
        #[serde(default)]
        completion: CompletionPolicy,
        #[serde(default)]
        neighbor_order: NeighborOrder,
    },
}

impl ReorderStrategy {
    /// Cuthill–McKee with default completion and neighbor order.
    pub fn cuthill_mckee() -> Self {
        Self::CuthillMcKee {
            completion: CompletionPolicy::default(),
            neighbor_order: NeighborOrder::default(),
        }
    }

    /// Display name of the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity => "Strategy: Identity",
            Self::Random { .. } => "Strategy: Random",
            Self::CoordinateSort { axis: Axis::X } => "Strategy: Sort by X coordinates",
            Self::CoordinateSort { axis: Axis::Y } => "Strategy: Sort by Y coordinates",
            Self::CoordinateSort { axis: Axis::Z } => "Strategy: Sort by Z coordinates",
            Self::MinDegree => "Strategy: Minimum Degree",
            Self::MaxDegree => "Strategy: Maximum Degree",
            Self::CuthillMcKee { .. } => "Strategy: Cuthill",
        }
    }

    /// Computes the old → new vertex permutation for `graph`.
    ///
    /// Only [`ReorderStrategy::CoordinateSort`] can fail, when the graph has
    /// no vertex positions.
    pub fn compute_permutation<G: AdjacencyView + ?Sized>(
        &self,
        graph: &G,
    ) -> Result<Permutation> {
        let n = graph.vertex_count();
        let order = match *self {
            Self::Identity => return Ok(Permutation::identity(n)),
            Self::Random { seed } => return Ok(random::seeded_or_thread(n, seed)),
            Self::CoordinateSort { axis } => {
                coordinate::coordinate_order(graph, axis, self.name())?
            }
            Self::MinDegree => degree::degree_order(graph, false),
            Self::MaxDegree => degree::degree_order(graph, true),
            Self::CuthillMcKee {
                completion,
                neighbor_order,
            } => cuthill::cuthill_mckee_order(graph, completion, neighbor_order),
        };
        Ok(Permutation::from_order_unchecked(order))
    }

    /// Computes the permutation and applies it to `pattern`, returning the
    /// reordered copy.
    pub fn reorder<G: AdjacencyView + ?Sized>(
        &self,
        graph: &G,
        pattern: &DenseMatrix,
    ) -> Result<DenseMatrix> {
        let perm = self.compute_permutation(graph)?;
        apply_permutation(pattern, &perm)
    }
}
