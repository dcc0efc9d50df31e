//! Static degree orderings.
//!
//! Vertices are sorted once by their degree in the original graph. True
//! minimum-degree ordering is greedy: it eliminates a vertex, updates the
//! degrees of the vertices touched by the resulting fill, and repeats. The
//! static sort skips those updates, so it is only an approximation of it.

use crate::graph::AdjacencyView;

/// Returns the vertices ordered by degree (`order[new] = old`).
///
/// Ties keep ascending index order in both directions: the sort is stable and
/// only the degree comparison is reversed for `descending`.
pub fn degree_order<G: AdjacencyView + ?Sized>(graph: &G, descending: bool) -> Vec<usize> {
    let degrees: Vec<usize> = (0..graph.vertex_count()).map(|v| graph.degree(v)).collect();
    let mut order: Vec<usize> = (0..degrees.len()).collect();
    order.sort_by(|&a, &b| {
        let c = degrees[a].cmp(&degrees[b]);
        if descending { c.reverse() } else { c }
    });
    order
}
