use crate::graph::AdjacencyView;
use crate::matrix::DenseMatrix;

/// Builds the pattern matrix of a graph.
///
/// Row/column `i` corresponds to vertex `i` of the graph's reference
/// ordering. `M[i][i]` is the degree of vertex `i` and `M[i][j] = M[j][i] =
/// -1` when `i` and `j` are adjacent. All other entries are zero.
///
/// For a simple graph this is the graph Laplacian, which is symmetric
/// positive semi-definite.
pub fn build_pattern_matrix<G: AdjacencyView + ?Sized>(graph: &G) -> DenseMatrix {
    let n = graph.vertex_count();
    let mut m = DenseMatrix::zeros(n);
    for v in 0..n {
        m.set(v, v, graph.degree(v) as f64);
        for &u in graph.neighbors(v) {
            m.set(v, u, -1.0);
            m.set(u, v, -1.0);
        }
    }
    m
}
