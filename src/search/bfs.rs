/*!
# Breadth-First Search

Shortest-hop pathfinding for graphs the caller treats as unweighted. Edge
costs are ignored entirely; weighted callers should use
[`Dijkstra`](crate::search::Dijkstra).
*/

use std::collections::VecDeque;

use crate::core::error::Result;
use crate::core::types::{NavGraph, NodeId};
use crate::search::reconstruct_path;

/// Breadth-first pathfinder bound to one graph.
///
/// # Example
///
/// ```rust
/// use pathina::core::grid::Grid;
/// use pathina::search::Bfs;
///
/// let grid = Grid::new(3, 3).unwrap();
/// let bfs = Bfs::new(&grid);
/// let path = bfs.find_path(0, 8).unwrap();
/// assert_eq!(path.len(), 5);
/// assert_eq!(path[0], 0);
/// assert_eq!(path[4], 8);
/// ```
pub struct Bfs<'g, G: NavGraph> {
    graph: &'g G,
}

impl<'g, G: NavGraph> Bfs<'g, G> {
    /// Creates a pathfinder bound to `graph`.
    pub fn new(graph: &'g G) -> Self {
        Self { graph }
    }

    /// Finds a shortest-hop path from `start` to `goal`.
    ///
    /// Returns an empty path when no path exists, and `[start]` when
    /// `start == goal`. Out-of-range ids yield an `InvalidArgument` error.
    pub fn find_path(&self, start: NodeId, goal: NodeId) -> Result<Vec<NodeId>> {
        self.graph.validate_node(start)?;
        self.graph.validate_node(goal)?;
        if start == goal {
            return Ok(vec![start]);
        }

        let n = self.graph.node_count();
        let mut visited = vec![false; n];
        let mut predecessor: Vec<Option<NodeId>> = vec![None; n];
        let mut queue = VecDeque::from([start]);
        visited[start] = true;

        while let Some(node) = queue.pop_front() {
            for (neighbor, _) in self.graph.neighbors(node) {
                if visited[neighbor] {
                    continue;
                }
                visited[neighbor] = true;
                predecessor[neighbor] = Some(node);
                if neighbor == goal {
                    return Ok(reconstruct_path(&predecessor, start, goal));
                }
                queue.push_back(neighbor);
            }
        }
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Digraph, Graph};

    #[test]
    fn test_bfs_ignores_weights() {
        // The direct edge is expensive but BFS counts hops only.
        let g = Graph::from_edges(3, &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 100.0)]).unwrap();
        let path = Bfs::new(&g).find_path(0, 2).unwrap();
        assert_eq!(path, vec![0, 2]);
    }

    #[test]
    fn test_bfs_disconnected() {
        let g = Graph::from_edges(4, &[(0, 1, 1.0), (2, 3, 1.0)]).unwrap();
        assert_eq!(Bfs::new(&g).find_path(0, 3).unwrap(), vec![]);
    }

    #[test]
    fn test_bfs_trivial_and_invalid() {
        let g = Digraph::from_edges(2, &[(0, 1, 1.0)]).unwrap();
        let bfs = Bfs::new(&g);
        assert_eq!(bfs.find_path(1, 1).unwrap(), vec![1]);
        assert!(bfs.find_path(0, 2).is_err());
    }
}
