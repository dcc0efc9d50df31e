//! Graph adjacency view consumed by the pattern builder and the reorderings.
//!
//! Vertices are identified by their index in `[0, n)`. That index is the
//! reference ordering: every strategy is compared against it.

use crate::geom::mesh::Mesh;
use crate::geom::point::{Axis, Point};

/// Read-only access to a graph's vertices, adjacency and attributes.
pub trait AdjacencyView {
    /// Number of vertices `n`.
    fn vertex_count(&self) -> usize;

    /// Indices of the vertices adjacent to `v`.
    fn neighbors(&self, v: usize) -> &[usize];

    /// Degree of `v`.
    fn degree(&self, v: usize) -> usize {
        self.neighbors(v).len()
    }

    /// Position of `v`, if the graph carries geometry.
    fn position(&self, _v: usize) -> Option<Point> {
        None
    }

    /// Coordinate of `v` along `axis`, if the graph carries geometry.
    fn coordinate(&self, v: usize, axis: Axis) -> Option<f64> {
        self.position(v).map(|p| p.coordinate(axis))
    }
}

/// Adjacency-list graph with optional vertex positions.
///
/// Neighbor lists are kept sorted ascending and free of duplicates and
/// self-loops, so traversal order is deterministic.
#[derive(Debug, Clone, Default)]
pub struct VertexGraph {
    adjacency: Vec<Vec<usize>>,
    positions: Option<Vec<Point>>,
}

impl VertexGraph {
    /// Builds an abstract graph with `n` vertices from undirected edges.
    ///
    /// Duplicate edges and self-loops are ignored.
    ///
    /// # Panics
    /// Panics if an edge references a vertex outside `[0, n)`.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut adjacency = vec![Vec::new(); n];
        for &(a, b) in edges {
            assert!(
                a < n && b < n,
                "edge ({a}, {b}) out of range for {n} vertices"
            );
            if a == b {
                continue;
            }
            adjacency[a].push(b);
            adjacency[b].push(a);
        }
        for list in adjacency.iter_mut() {
            list.sort_unstable();
            list.dedup();
        }
        Self {
            adjacency,
            positions: None,
        }
    }

    /// Builds the vertex graph of a triangle mesh.
    ///
    /// Two vertices are adjacent when they share a triangle side. Positions
    /// are taken from the mesh.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let graph = Self::from_edges(mesh.vertex_count(), &mesh.edges());
        Self {
            positions: Some(mesh.vertices.clone()),
            ..graph
        }
    }

    /// Attaches vertex positions.
    ///
    /// # Panics
    /// Panics if the number of positions differs from the vertex count.
    pub fn with_positions(mut self, positions: Vec<Point>) -> Self {
        assert_eq!(
            positions.len(),
            self.adjacency.len(),
            "one position per vertex required"
        );
        self.positions = Some(positions);
        self
    }

    /// The six-vertex example graph:
    ///
    /// ```text
    ///         4
    ///         |
    /// 0 - 1 - 2 - 3
    ///         |
    ///         5
    /// ```
    ///
    /// Vertices lie on a plane at their drawing position, so every strategy
    /// (coordinate sort included) can run on it.
    pub fn demo() -> Self {
        let edges = [(0, 1), (1, 2), (2, 3), (2, 4), (2, 5)];
        let positions = vec![
            Point::new(0., 0., 0.),
            Point::new(1., 0., 0.),
            Point::new(2., 0., 0.),
            Point::new(3., 0., 0.),
            Point::new(2., 1., 0.),
            Point::new(2., -1., 0.),
        ];
        Self::from_edges(6, &edges).with_positions(positions)
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Returns true if the graph carries vertex positions.
    pub fn has_positions(&self) -> bool {
        self.positions.is_some()
    }
}

impl AdjacencyView for VertexGraph {
    fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    fn neighbors(&self, v: usize) -> &[usize] {
        &self.adjacency[v]
    }

    fn position(&self, v: usize) -> Option<Point> {
        self.positions.as_ref().map(|p| p[v])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::mesh::TriangleIndex;

    #[test]
    fn test_demo_degrees() {
        let g = VertexGraph::demo();
        let degrees: Vec<usize> = (0..g.vertex_count()).map(|v| g.degree(v)).collect();
        assert_eq!(degrees, vec![1, 2, 4, 1, 1, 1]);
        assert_eq!(g.edge_count(), 5);
        assert_eq!(g.neighbors(2), &[1, 3, 4, 5]);
    }

    #[test]
    fn test_from_edges_ignores_duplicates_and_loops() {
        let g = VertexGraph::from_edges(3, &[(0, 1), (1, 0), (1, 1), (1, 2)]);
        assert_eq!(g.neighbors(0), &[1]);
        assert_eq!(g.neighbors(1), &[0, 2]);
        assert_eq!(g.edge_count(), 2);
        assert!(!g.has_positions());
        assert_eq!(g.position(0), None);
        assert_eq!(g.coordinate(0, Axis::X), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_from_edges_out_of_range() {
        VertexGraph::from_edges(2, &[(0, 2)]);
    }

    #[test]
    fn test_from_mesh() {
        let mesh = Mesh::new(
            vec![
                Point::new(0., 0., 0.),
                Point::new(1., 0., 0.),
                Point::new(1., 1., 0.),
                Point::new(0., 1., 0.),
            ],
            vec![TriangleIndex(0, 1, 2), TriangleIndex(0, 2, 3)],
        );
        let g = VertexGraph::from_mesh(&mesh);
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 5);
        assert_eq!(g.degree(0), 3);
        assert_eq!(g.degree(1), 2);
        assert_eq!(g.coordinate(2, Axis::Y), Some(1.));
    }

    #[test]
    fn test_empty_graph() {
        let g = VertexGraph::from_edges(0, &[]);
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
    }
}
