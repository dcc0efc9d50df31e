use crate::error::{Error, Result};
use crate::geom::point::Axis;
use crate::graph::AdjacencyView;

/// Returns the vertices ordered by ascending coordinate along `axis`
/// (`order[new] = old`). Ties keep ascending index order.
///
/// Fails with [`Error::AttributeMissing`] on the first vertex without a
/// position.
pub fn coordinate_order<G: AdjacencyView + ?Sized>(
    graph: &G,
    axis: Axis,
    strategy: &'static str,
) -> Result<Vec<usize>> {
    let keys = (0..graph.vertex_count())
        .map(|v| {
            graph.coordinate(v, axis).ok_or(Error::AttributeMissing {
                strategy,
                attribute: "position",
                vertex: v,
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexGraph;
    use crate::Point;

    #[test]
    fn test_sort_by_axis() {
        let g = VertexGraph::from_edges(3, &[]).with_positions(vec![
            Point::new(2., 0., 5.),
            Point::new(1., 1., 4.),
            Point::new(3., -1., 6.),
        ]);
        assert_eq!(coordinate_order(&g, Axis::X, "t").unwrap(), vec![1, 0, 2]);
        assert_eq!(coordinate_order(&g, Axis::Y, "t").unwrap(), vec![2, 0, 1]);
        assert_eq!(coordinate_order(&g, Axis::Z, "t").unwrap(), vec![1, 0, 2]);
    }

    #[test]
    fn test_ties_by_index() {
        let g = VertexGraph::demo();
        // x = [0, 1, 2, 3, 2, 2]: vertices 2, 4, 5 tie
        assert_eq!(
            coordinate_order(&g, Axis::X, "t").unwrap(),
            vec![0, 1, 2, 4, 5, 3]
        );
    }

    #[test]
    fn test_missing_positions() {
        let g = VertexGraph::from_edges(2, &[(0, 1)]);
        assert_eq!(
            coordinate_order(&g, Axis::X, "sort").unwrap_err(),
            Error::AttributeMissing {
                strategy: "sort",
                attribute: "position",
                vertex: 0
            }
        );
    }
}
