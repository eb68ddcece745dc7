/*!
# Resumable Single-Source Search

Resumable variants of BFS and Dijkstra anchored at a fixed start node. The
frontier, distance table, and predecessor map persist between queries, so a
sequence of `distance`/`find_path` calls from the same source only ever
expands each node once.

The underlying graph must stay immutable for the lifetime of an instance;
any weight or topology change invalidates it (the caller's responsibility).
[`ResumableBfs::set_start_node`]/[`ResumableDijkstra::set_start_node`]
perform a full reset; there is no incremental relocation.
*/

use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use ordered_float::NotNan;

use crate::core::error::{PathinaError, Result};
use crate::core::types::{NavGraph, NodeId};
use crate::search::reconstruct_path;

/// Resumable breadth-first search from a fixed start node.
///
/// Distances are hop counts; unreachable nodes report `f64::INFINITY`.
///
/// # Example
///
/// ```rust
/// use pathina::core::types::Graph;
/// use pathina::search::ResumableBfs;
///
/// let g = Graph::from_edges(4, &[(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)]).unwrap();
/// let mut bfs = ResumableBfs::new(&g, 0).unwrap();
/// assert_eq!(bfs.distance(2).unwrap(), 2.0);
/// assert_eq!(bfs.find_path(3).unwrap(), vec![0, 1, 2, 3]);
/// ```
pub struct ResumableBfs<'g, G: NavGraph> {
    graph: &'g G,
    start: NodeId,
    dist: Vec<f64>,
    predecessor: Vec<Option<NodeId>>,
    queue: VecDeque<NodeId>,
}

impl<'g, G: NavGraph> ResumableBfs<'g, G> {
    /// Creates a resumable search anchored at `start`.
    pub fn new(graph: &'g G, start: NodeId) -> Result<Self> {
        graph.validate_node(start)?;
        let mut search = Self {
            graph,
            start,
            dist: Vec::new(),
            predecessor: Vec::new(),
            queue: VecDeque::new(),
        };
        search.reset();
        Ok(search)
    }

    /// Returns the anchored start node.
    pub fn start_node(&self) -> NodeId {
        self.start
    }

    /// Re-anchors the search at `start`, discarding all search state.
    pub fn set_start_node(&mut self, start: NodeId) -> Result<()> {
        self.graph.validate_node(start)?;
        self.start = start;
        self.reset();
        Ok(())
    }

    /// Returns the hop distance from the start node to `node`, expanding the
    /// frontier only as far as needed. Unreachable nodes report
    /// `f64::INFINITY`.
    pub fn distance(&mut self, node: NodeId) -> Result<f64> {
        self.graph.validate_node(node)?;
        self.expand_until(node);
        Ok(self.dist[node])
    }

    /// Returns a shortest-hop path from the start node to `node`, or an
    /// empty path when `node` is unreachable.
    pub fn find_path(&mut self, node: NodeId) -> Result<Vec<NodeId>> {
        self.graph.validate_node(node)?;
        self.expand_until(node);
        if self.dist[node].is_infinite() {
            return Ok(Vec::new());
        }
        Ok(reconstruct_path(&self.predecessor, self.start, node))
    }

    fn reset(&mut self) {
        let n = self.graph.node_count();
        self.dist = vec![f64::INFINITY; n];
        self.predecessor = vec![None; n];
        self.queue.clear();
        self.dist[self.start] = 0.0;
        self.queue.push_back(self.start);
    }

    fn expand_until(&mut self, target: NodeId) {
        // A BFS label is final as soon as it is written.
        if self.dist[target].is_finite() {
            return;
        }
        while let Some(node) = self.queue.pop_front() {
            for (neighbor, _) in self.graph.neighbors(node) {
                if self.dist[neighbor].is_infinite() {
                    self.dist[neighbor] = self.dist[node] + 1.0;
                    self.predecessor[neighbor] = Some(node);
                    self.queue.push_back(neighbor);
                }
            }
            if self.dist[target].is_finite() {
                return;
            }
        }
    }
}

/// Resumable Dijkstra search from a fixed start node.
///
/// The settled set is always exactly the prefix of nodes whose distance is
/// at most every frontier key, so partial expansions agree with a fresh
/// full-graph Dijkstra. Unreachable nodes report `f64::INFINITY`.
pub struct ResumableDijkstra<'g, G: NavGraph> {
    graph: &'g G,
    start: NodeId,
    dist: Vec<f64>,
    predecessor: Vec<Option<NodeId>>,
    settled: Vec<bool>,
    heap: BinaryHeap<Reverse<(NotNan<f64>, NodeId)>>,
}

impl<'g, G: NavGraph> ResumableDijkstra<'g, G> {
    /// Creates a resumable search anchored at `start`.
    pub fn new(graph: &'g G, start: NodeId) -> Result<Self> {
        graph.validate_node(start)?;
        let mut search = Self {
            graph,
            start,
            dist: Vec::new(),
            predecessor: Vec::new(),
            settled: Vec::new(),
            heap: BinaryHeap::new(),
        };
        search.reset();
        Ok(search)
    }

    /// Returns the anchored start node.
    pub fn start_node(&self) -> NodeId {
        self.start
    }

    /// Re-anchors the search at `start`, discarding all search state.
    pub fn set_start_node(&mut self, start: NodeId) -> Result<()> {
        self.graph.validate_node(start)?;
        self.start = start;
        self.reset();
        Ok(())
    }

    /// Returns the shortest-path distance from the start node to `node`,
    /// expanding the frontier until `node` is settled or the frontier is
    /// empty. Unreachable nodes report `f64::INFINITY`.
    pub fn distance(&mut self, node: NodeId) -> Result<f64> {
        self.graph.validate_node(node)?;
        self.expand_until(node)?;
        Ok(self.dist[node])
    }

    /// Returns a minimum-cost path from the start node to `node`, or an
    /// empty path when `node` is unreachable.
    pub fn find_path(&mut self, node: NodeId) -> Result<Vec<NodeId>> {
        self.graph.validate_node(node)?;
        self.expand_until(node)?;
        if self.dist[node].is_infinite() {
            return Ok(Vec::new());
        }
        Ok(reconstruct_path(&self.predecessor, self.start, node))
    }

    fn reset(&mut self) {
        let n = self.graph.node_count();
        self.dist = vec![f64::INFINITY; n];
        self.predecessor = vec![None; n];
        self.settled = vec![false; n];
        self.heap.clear();
        self.dist[self.start] = 0.0;
        self.heap.push(Reverse((NotNan::new(0.0).unwrap(), self.start)));
    }

    fn expand_until(&mut self, target: NodeId) -> Result<()> {
        while !self.settled[target] {
            let Some(Reverse((d, node))) = self.heap.pop() else {
                return Ok(());
            };
            if *d > self.dist[node] || self.settled[node] {
                continue;
            }
            self.settled[node] = true;
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
                if next < self.dist[neighbor] {
                    self.dist[neighbor] = next;
                    self.predecessor[neighbor] = Some(node);
                    self.heap.push(Reverse((key, neighbor)));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Graph;
    use crate::search::Dijkstra;

    fn path_graph(n: usize) -> Graph {
        let edges: Vec<(NodeId, NodeId, f64)> =
            (0..n - 1).map(|i| (i, i + 1, 1.0)).collect();
        Graph::from_edges(n, &edges).unwrap()
    }

    #[test]
    fn test_resumable_bfs_distances_on_path_graph() {
        let g = path_graph(10);
        let mut bfs = ResumableBfs::new(&g, 0).unwrap();
        for k in 0..10 {
            assert_eq!(bfs.distance(k).unwrap(), k as f64);
        }
    }

    #[test]
    fn test_resumable_bfs_unreachable() {
        let g = Graph::from_edges(3, &[(0, 1, 1.0)]).unwrap();
        let mut bfs = ResumableBfs::new(&g, 0).unwrap();
        assert!(bfs.distance(2).unwrap().is_infinite());
        assert_eq!(bfs.find_path(2).unwrap(), vec![]);
        // Earlier answers survive the failed expansion.
        assert_eq!(bfs.distance(1).unwrap(), 1.0);
    }

    #[test]
    fn test_resumable_dijkstra_agrees_with_fresh() {
        let g = Graph::from_edges(
            5,
            &[(0, 1, 2.0), (1, 2, 2.0), (0, 3, 1.0), (3, 4, 1.0), (4, 2, 1.0)],
        )
        .unwrap();
        let mut resumable = ResumableDijkstra::new(&g, 0).unwrap();
        let fresh = Dijkstra::new(&g);
        for node in (0..5).rev() {
            let path = resumable.find_path(node).unwrap();
            assert_eq!(path, fresh.find_path(0, node).unwrap());
        }
        assert_eq!(resumable.distance(2).unwrap(), 3.0);
    }

    #[test]
    fn test_set_start_node_resets() {
        let g = path_graph(5);
        let mut dijkstra = ResumableDijkstra::new(&g, 0).unwrap();
        assert_eq!(dijkstra.distance(4).unwrap(), 4.0);
        dijkstra.set_start_node(4).unwrap();
        assert_eq!(dijkstra.start_node(), 4);
        assert_eq!(dijkstra.distance(0).unwrap(), 4.0);
        assert_eq!(dijkstra.find_path(2).unwrap(), vec![4, 3, 2]);
    }
}
