//! Cuthill–McKee breadth-first numbering.
//!
//! The traversal starts at a vertex of minimum degree (lowest index among
//! ties) and numbers vertices in the order they are reached. A vertex is
//! numbered once and never renumbered. Neighbors of a vertex end up with
//! nearby numbers, which keeps nonzeros close to the diagonal.
//!
//! A single traversal only reaches the start vertex's connected component.
//! [`CompletionPolicy`] decides how the remaining vertices are numbered.

use crate::graph::AdjacencyView;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// How vertices unreachable from the first start vertex are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionPolicy {
    /// Append unvisited vertices after the traversal in index order.
    #[default]
    AppendByIndex,
    /// Start a new traversal from the lowest-degree unvisited vertex until
    /// every component is numbered.
    RestartBfs,
}

/// Order in which a vertex's unvisited neighbors are queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborOrder {
    /// The order the graph lists them in.
    #[default]
    Adjacency,
    /// Ascending degree, ties by index.
    AscendingDegree,
}

/// Returns the Cuthill–McKee ordering of `graph` (`order[new] = old`).
pub fn cuthill_mckee_order<G: AdjacencyView + ?Sized>(
    graph: &G,
    completion: CompletionPolicy,
    neighbor_order: NeighborOrder,
) -> Vec<usize> {
    let n = graph.vertex_count();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);

    if let Some(start) = min_degree_unvisited(graph, &visited) {
        traverse(graph, start, neighbor_order, &mut visited, &mut order);
    }

    match completion {
        CompletionPolicy::AppendByIndex => {
            for v in 0..n {
                if !visited[v] {
                    visited[v] = true;
                    order.push(v);
                }
            }
        }
        CompletionPolicy::RestartBfs => {
            while let Some(start) = min_degree_unvisited(graph, &visited) {
                traverse(graph, start, neighbor_order, &mut visited, &mut order);
            }
        }
    }

    order
}

fn min_degree_unvisited<G: AdjacencyView + ?Sized>(graph: &G, visited: &[bool]) -> Option<usize> {
    // min_by_key returns the first minimum, i.e. the lowest index among ties
    (0..graph.vertex_count())
        .filter(|&v| !visited[v])
        .min_by_key(|&v| graph.degree(v))
}

fn traverse<G: AdjacencyView + ?Sized>(
    graph: &G,
    start: usize,
    neighbor_order: NeighborOrder,
    visited: &mut [bool],
    order: &mut Vec<usize>,
) {
    let mut frontier = VecDeque::from([start]);
    visited[start] = true;
    let mut next: Vec<usize> = Vec::new();

    while let Some(u) = frontier.pop_front() {
        order.push(u);

        next.clear();
        next.extend(graph.neighbors(u).iter().copied().filter(|&w| !visited[w]));
        if neighbor_order == NeighborOrder::AscendingDegree {
            next.sort_by_key(|&w| (graph.degree(w), w));
        }
        for &w in &next {
            // Adjacency lists from other views may repeat a neighbor
            if !visited[w] {
                visited[w] = true;
                frontier.push_back(w);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexGraph;

    fn order(g: &VertexGraph, c: CompletionPolicy, o: NeighborOrder) -> Vec<usize> {
        cuthill_mckee_order(g, c, o)
    }

    #[test]
    fn test_demo_graph() {
        // Start at 0 (degree 1, lowest index), then walk the path into the hub
        let g = VertexGraph::demo();
        assert_eq!(
            order(&g, CompletionPolicy::AppendByIndex, NeighborOrder::Adjacency),
            vec![0, 1, 2, 3, 4, 5]
        );
    }

    #[test]
    fn test_breadth_first_levels() {
        //     1 - 3
        //    /
        //   0 - 2 - 4
        // plus a leaf 5 hanging off 3 so 0 is not the min-degree start
        let g = VertexGraph::from_edges(6, &[(0, 1), (0, 2), (1, 3), (2, 4), (3, 5)]);
        // Degrees: [2, 2, 2, 2, 1, 1] -> start at 4
        assert_eq!(
            order(&g, CompletionPolicy::AppendByIndex, NeighborOrder::Adjacency),
            vec![4, 2, 0, 1, 3, 5]
        );
    }

    #[test]
    fn test_ascending_degree_neighbors() {
        // Hub 0 with neighbors 1 (degree 3), 2 (degree 1), 3 (degree 2)
        let g = VertexGraph::from_edges(6, &[(0, 1), (0, 2), (0, 3), (1, 4), (1, 5), (3, 4)]);
        // Degrees: [3, 3, 1, 2, 2, 1] -> start at 2, then 0
        assert_eq!(
            order(&g, CompletionPolicy::AppendByIndex, NeighborOrder::Adjacency),
            vec![2, 0, 1, 3, 4, 5]
        );
        assert_eq!(
            order(&g, CompletionPolicy::AppendByIndex, NeighborOrder::AscendingDegree),
            vec![2, 0, 3, 1, 4, 5]
        );
    }

    #[test]
    fn test_disconnected_append_by_index() {
        // Components {0, 1}, {2, 3, 4}, and isolated 5
        let g = VertexGraph::from_edges(6, &[(0, 1), (2, 3), (3, 4)]);
        // Degrees: [1, 1, 1, 2, 1, 0] -> start at the isolated vertex 5
        assert_eq!(
            order(&g, CompletionPolicy::AppendByIndex, NeighborOrder::Adjacency),
            vec![5, 0, 1, 2, 3, 4]
        );
    }

    #[test]
    fn test_disconnected_restart() {
        let g = VertexGraph::from_edges(7, &[(0, 1), (1, 2), (3, 4), (4, 5), (4, 6)]);
        // Degrees: [1, 2, 1, 1, 3, 1, 1] -> start at 0
        assert_eq!(
            order(&g, CompletionPolicy::AppendByIndex, NeighborOrder::Adjacency),
            vec![0, 1, 2, 3, 4, 5, 6]
        );
        // After {0, 1, 2} the restart picks 3 and traverses 3 -> 4 -> 5, 6
        assert_eq!(
            order(&g, CompletionPolicy::RestartBfs, NeighborOrder::Adjacency),
            vec![0, 1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn test_restart_differs_from_append() {
        // Second component is numbered from its own min-degree vertex 5
        let g = VertexGraph::from_edges(6, &[(0, 1), (2, 3), (3, 4), (4, 5), (2, 4)]);
        // Degrees: [1, 1, 2, 2, 3, 1]
        assert_eq!(
            order(&g, CompletionPolicy::AppendByIndex, NeighborOrder::Adjacency),
            vec![0, 1, 2, 3, 4, 5]
        );
        assert_eq!(
            order(&g, CompletionPolicy::RestartBfs, NeighborOrder::Adjacency),
            vec![0, 1, 5, 4, 2, 3]
        );
    }

    #[test]
    fn test_total_coverage() {
        let g = VertexGraph::from_edges(10, &[(1, 2), (4, 5), (5, 6), (8, 9)]);
        for c in [CompletionPolicy::AppendByIndex, CompletionPolicy::RestartBfs] {
            let mut o = order(&g, c, NeighborOrder::Adjacency);
            o.sort_unstable();
            assert_eq!(o, (0..10).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_empty_graph() {
        let g = VertexGraph::from_edges(0, &[]);
        assert!(order(&g, CompletionPolicy::RestartBfs, NeighborOrder::Adjacency).is_empty());
    }
}
