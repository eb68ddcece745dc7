/*!
# A* Search

Heuristic point-to-point search keyed on `f = g + h`, with `h` supplied by
the graph's [`estimate_distance`](crate::core::types::NavGraph::estimate_distance).
With an admissible heuristic the returned path cost is optimal; without
coordinates the heuristic is 0 and A* degenerates to Dijkstra.
*/

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::NotNan;

use crate::core::error::{PathinaError, Result};
use crate::core::types::{NavGraph, NodeId};
use crate::search::reconstruct_path;

/// A* pathfinder bound to one graph.
///
/// # Example
///
/// ```rust
/// use pathina::core::grid::{DiagonalMovement, Grid};
/// use pathina::search::AStar;
///
/// let mut grid = Grid::new(3, 3).unwrap();
/// grid.set_diagonal_movement(DiagonalMovement::Always);
/// grid.set_diagonal_movement_cost_multiplier(std::f64::consts::SQRT_2).unwrap();
///
/// let path = AStar::new(&grid).find_path(0, 8).unwrap();
/// assert_eq!(path, vec![0, 4, 8]);
/// ```
pub struct AStar<'g, G: NavGraph> {
    graph: &'g G,
}

impl<'g, G: NavGraph> AStar<'g, G> {
    /// Creates a pathfinder bound to `graph`.
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    /// Finds a minimum-cost path from `start` to `goal`.
    ///
    /// Returns an empty path when no path exists, and `[start]` when
    /// `start == goal`. Out-of-range ids and negative or NaN costs yield an
    /// `InvalidArgument` error.
    pub fn find_path(&self, start: NodeId, goal: NodeId) -> Result<Vec<NodeId>> {
        self.graph.validate_node(start)?;
        self.graph.validate_node(goal)?;
        if start == goal {
            return Ok(vec![start]);
        }

        let n = self.graph.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut predecessor: Vec<Option<NodeId>> = vec![None; n];
        let mut heap = BinaryHeap::new();

        dist[start] = 0.0;
        let h0 = not_nan(self.graph.estimate_distance(start, goal), start, goal)?;
        heap.push(Reverse((h0, NotNan::new(0.0).unwrap(), start)));

        // The heap carries (f, g, node); stale entries are skipped when
        // their g exceeds the best known distance.
        while let Some(Reverse((_, g, node))) = heap.pop() {
            if *g > dist[node] {
                continue;
            }
            if node == goal {
                return Ok(reconstruct_path(&predecessor, start, goal));
            }
            for (neighbor, cost) in self.graph.neighbors(node) {
                if cost < 0.0 {
                    return Err(PathinaError::invalid_argument(format!(
                        "A* requires non-negative costs, but found {} on edge {} -> {}",
                        cost, node, neighbor
                    )));
                }
                let tentative = *g + cost;
                if tentative < dist[neighbor] {
                    dist[neighbor] = tentative;
                    predecessor[neighbor] = Some(node);
                    let h = self.graph.estimate_distance(neighbor, goal);
                    let f = not_nan(tentative + h, neighbor, goal)?;
                    let key = not_nan(tentative, node, neighbor)?;
                    heap.push(Reverse((f, key, neighbor)));
                }
            }
        }
        Ok(Vec::new())
    }
}

fn not_nan(value: f64, from: NodeId, to: NodeId) -> Result<NotNan<f64>> {
    NotNan::new(value).map_err(|_| {
        PathinaError::invalid_argument(format!(
            "A* requires non-NaN costs and estimates, found NaN between {} and {}",
            from, to
        ))
    })
}
