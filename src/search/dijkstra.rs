/*!
# Dijkstra's Algorithm

Point-to-point shortest paths for graphs with non-negative edge costs, using
a binary heap with lazy deletion in place of decrease-key.
*/

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::NotNan;

use crate::core::error::{PathinaError, Result};
use crate::core::types::{NavGraph, NodeId};
use crate::search::reconstruct_path;

/// Dijkstra pathfinder bound to one graph.
///
/// # Example
///
/// ```rust
/// use pathina::core::types::{Digraph, NavGraph};
/// use pathina::search::Dijkstra;
///
/// let g = Digraph::from_edges(4, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 3.0), (2, 3, 1.0)])
///     .unwrap();
/// let path = Dijkstra::new(&g).find_path(0, 3).unwrap();
/// assert_eq!(path, vec![0, 1, 2, 3]);
/// assert_eq!(g.calculate_cost(&path).unwrap(), 3.0);
/// ```
pub struct Dijkstra<'g, G: NavGraph> {
    graph: &'g G,
}

impl<'g, G: NavGraph> Dijkstra<'g, G> {
    /// Creates a pathfinder bound to `graph`.
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    /// Finds a minimum-cost path from `start` to `goal`.
    ///
    /// Returns an empty path when no path exists, and `[start]` when
    /// `start == goal`. Out-of-range ids and negative or NaN edge costs
    /// yield an `InvalidArgument` error.
    ///
    /// # Complexity
    ///
    /// - Time: O(E log V)
    /// - Space: O(V)
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
        heap.push(Reverse((NotNan::new(0.0).unwrap(), start)));

        while let Some(Reverse((d, node))) = heap.pop() {
            if *d > dist[node] {
                continue;
            }
            if node == goal {
                return Ok(reconstruct_path(&predecessor, start, goal));
            }
            for (neighbor, cost) in self.graph.neighbors(node) {
                if cost < 0.0 {
                    return Err(PathinaError::invalid_argument(format!(
                        "Dijkstra requires non-negative costs, but found {} on edge {} -> {}",
                        cost, node, neighbor
                    )));
                }
                let next = *d + cost;
                let Ok(key) = NotNan::new(next) else {
                    return Err(PathinaError::invalid_argument(format!(
                        "Dijkstra requires non-NaN costs on edge {} -> {}",
                        node, neighbor
                    )));
                };
                if next < dist[neighbor] {
                    dist[neighbor] = next;
                    predecessor[neighbor] = Some(node);
                    heap.push(Reverse((key, neighbor)));
                }
            }
        }
        Ok(Vec::new())
    }
}
