/*!
# Pathina Graph Types

This module defines the navigation abstraction and the explicit graph types
supported by Pathina.

The [`NavGraph`] trait is the uniform surface every search engine is generic
over: dense node ids, neighbor/predecessor enumeration with edge costs, an
optional distance heuristic, and pause-cost semantics for time-indexed
planning. [`BaseGraph`] is a wrapper around petgraph's `StableGraph` that
provides the explicit weighted-edge-list implementation for both directed and
undirected graphs; the implicit grid implementation lives in
[`crate::core::grid`].

# Examples

```rust
use pathina::core::types::{Digraph, NavGraph};

let mut g = Digraph::with_node_count(3);
g.add_edge(0, 1, 1.5).unwrap();
g.add_edge(1, 2, 2.0).unwrap();

assert_eq!(g.node_count(), 3);
assert!(g.adjacent(0, 1));
assert!(!g.adjacent(1, 0));
assert_eq!(g.calculate_cost(&[0, 1, 2]).unwrap(), 3.5);
```
*/

use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableGraph;
use petgraph::visit::EdgeRef;

pub use petgraph::{Directed, EdgeType, Undirected};

use crate::core::error::{PathinaError, Result};

/// Dense node identifier in `0..node_count()`.
pub type NodeId = usize;

/// Uniform navigation interface over explicit graphs and implicit grids.
///
/// Node ids are dense non-negative integers `0..node_count()`, stable for the
/// lifetime of the graph. All edge costs are finite and non-negative. Search
/// engines hold a shared reference to one implementor and assume the topology
/// and weights do not change for the duration of a search.
pub trait NavGraph {
    /// Returns the number of nodes in the graph.
    fn node_count(&self) -> usize;

    /// Returns true if the graph is directed.
    fn is_directed(&self) -> bool;

    /// Returns true if [`NavGraph::estimate_distance`] is backed by real
    /// coordinates rather than the trivial zero bound.
    fn has_coordinates(&self) -> bool {
        false
    }

    /// Returns the outgoing edges of `node` as `(target, cost)` pairs, in a
    /// deterministic order.
    fn neighbors(&self, node: NodeId) -> Vec<(NodeId, f64)>;

    /// Returns the edges *into* `node` as `(source, cost)` pairs, where the
    /// cost is the cost of the forward edge `source -> node`.
    ///
    /// For undirected graphs this enumerates the same nodes as
    /// [`NavGraph::neighbors`]; for grids the costs follow entry-cost
    /// semantics and may differ from the forward enumeration.
    fn predecessors(&self, node: NodeId) -> Vec<(NodeId, f64)>;

    /// Returns an estimate of the path cost from `source` to `target`.
    ///
    /// The estimate must be an admissible lower bound on the true path cost;
    /// without coordinates it is 0, which degenerates A* to Dijkstra.
    fn estimate_distance(&self, _source: NodeId, _target: NodeId) -> f64 {
        0.0
    }

    /// Returns the cost of remaining at `node` for one time step.
    fn pause_cost(&self, _node: NodeId) -> f64 {
        1.0
    }

    /// Returns true if `node` is a valid id for this graph.
    fn contains_node(&self, node: NodeId) -> bool {
        node < self.node_count()
    }

    /// Validates a node id, returning an `InvalidArgument` error when it is
    /// out of range.
    fn validate_node(&self, node: NodeId) -> Result<()> {
        if self.contains_node(node) {
            Ok(())
        } else {
            Err(PathinaError::invalid_argument(format!(
                "node id {} out of range for graph of {} nodes",
                node,
                self.node_count()
            )))
        }
    }

    /// Returns true if there is an edge from `source` to `target`.
    fn adjacent(&self, source: NodeId, target: NodeId) -> bool {
        if !self.contains_node(source) || !self.contains_node(target) {
            return false;
        }
        self.neighbors(source).iter().any(|&(to, _)| to == target)
    }

    /// Returns the cheapest cost of a direct edge from `source` to `target`,
    /// or `None` when the nodes are not adjacent.
    fn edge_cost(&self, source: NodeId, target: NodeId) -> Option<f64> {
        if !self.contains_node(source) || !self.contains_node(target) {
            return None;
        }
        self.neighbors(source)
            .into_iter()
            .filter(|&(to, _)| to == target)
            .map(|(_, cost)| cost)
            .fold(None, |best: Option<f64>, cost| {
                Some(best.map_or(cost, |b| b.min(cost)))
            })
    }

    /// Computes the total cost of a path.
    ///
    /// Consecutive distinct nodes contribute the cheapest connecting edge
    /// cost; a repeated node is a pause and contributes
    /// [`NavGraph::pause_cost`]. An out-of-range id or a non-adjacent step
    /// yields an `InvalidArgument` error.
    fn calculate_cost(&self, path: &[NodeId]) -> Result<f64> {
        for &node in path {
            self.validate_node(node)?;
        }
        let mut total = 0.0;
        for window in path.windows(2) {
            let (from, to) = (window[0], window[1]);
            if from == to {
                total += self.pause_cost(from);
            } else {
                total += self.edge_cost(from, to).ok_or_else(|| {
                    PathinaError::invalid_argument(format!(
                        "path step {} -> {} is not an edge",
                        from, to
                    ))
                })?;
            }
        }
        Ok(total)
    }

    /// Returns true if every consecutive pair of nodes in `path` is adjacent
    /// or a legitimate pause (a repeated node), and all ids are in range.
    fn is_valid_path(&self, path: &[NodeId]) -> bool {
        if path.iter().any(|&node| !self.contains_node(node)) {
            return false;
        }
        path.windows(2)
            .all(|window| window[0] == window[1] || self.adjacent(window[0], window[1]))
    }
}

/// Base graph structure that wraps around a petgraph `StableGraph`.
///
/// Nodes are created up front so that ids coincide with the dense range
/// `0..node_count()`. Edge weights are validated to be finite and
/// non-negative when the edge is added; self-loops are rejected because a
/// repeated node in a path already means a pause.
///
/// Generic parameter `Ty` selects directedness (petgraph's `Directed` or
/// `Undirected` marker); use the [`Graph`] and [`Digraph`] aliases.
#[derive(Debug, Clone)]
pub struct BaseGraph<Ty: EdgeType> {
    inner: StableGraph<(), f64, Ty>,
    coordinates: Option<Vec<Vec<f64>>>,
    pause_action_cost: f64,
    min_weight: f64,
}

/// Undirected explicit graph.
pub type Graph = BaseGraph<Undirected>;

/// Directed explicit graph.
pub type Digraph = BaseGraph<Directed>;

impl<Ty: EdgeType> Default for BaseGraph<Ty> {
    fn default() -> Self {
        Self::with_node_count(0)
    }
}

impl<Ty: EdgeType> BaseGraph<Ty> {
    /// Creates a graph with `node_count` isolated nodes with ids
    /// `0..node_count`.
    pub fn with_node_count(node_count: usize) -> Self {
        let mut inner = StableGraph::<(), f64, Ty>::with_capacity(node_count, 0);
        for _ in 0..node_count {
            inner.add_node(());
        }
        Self {
            inner,
            coordinates: None,
            pause_action_cost: 1.0,
            min_weight: f64::INFINITY,
        }
    }

    /// Creates a graph with `node_count` nodes and the given `(source,
    /// target, cost)` edges.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pathina::core::types::{Graph, NavGraph};
    ///
    /// let g = Graph::from_edges(3, &[(0, 1, 1.0), (1, 2, 2.0)]).unwrap();
    /// assert_eq!(g.edge_count(), 2);
    /// assert!(g.adjacent(2, 1));
    /// ```
    pub fn from_edges(node_count: usize, edges: &[(NodeId, NodeId, f64)]) -> Result<Self> {
        let mut graph = Self::with_node_count(node_count);
        for &(source, target, cost) in edges {
            graph.add_edge(source, target, cost)?;
        }
        Ok(graph)
    }

    /// Adds an edge from `source` to `target` with the given cost.
    ///
    /// The cost must be finite and non-negative, the ids must be in range,
    /// and `source != target`.
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, cost: f64) -> Result<()> {
        self.validate_node(source)?;
        self.validate_node(target)?;
        if source == target {
            return Err(PathinaError::invalid_argument(format!(
                "self-loop on node {} (a repeated node in a path is a pause)",
                source
            )));
        }
        if !cost.is_finite() || cost < 0.0 {
            return Err(PathinaError::invalid_argument(format!(
                "edge cost must be finite and non-negative, got {} for {} -> {}",
                cost, source, target
            )));
        }
        self.inner
            .add_edge(NodeIndex::new(source), NodeIndex::new(target), cost);
        self.min_weight = self.min_weight.min(cost);
        Ok(())
    }

    /// Returns the number of edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Returns the smallest edge cost in the graph, or 0 when there are no
    /// edges.
    pub fn min_weight(&self) -> f64 {
        if self.min_weight.is_finite() {
            self.min_weight
        } else {
            0.0
        }
    }

    /// Attaches a coordinate vector to every node, enabling the Euclidean
    /// distance heuristic.
    ///
    /// The outer vector must have one entry per node and all entries must
    /// share the same dimension with finite components. When coordinates are
    /// set, the caller guarantees that the Euclidean distance between any two
    /// nodes is a lower bound on the path cost between them (the
    /// admissibility contract of [`NavGraph::estimate_distance`]).
    pub fn set_coordinates(&mut self, coordinates: Vec<Vec<f64>>) -> Result<()> {
        if coordinates.len() != self.node_count() {
            return Err(PathinaError::invalid_argument(format!(
                "expected {} coordinate vectors, got {}",
                self.node_count(),
                coordinates.len()
            )));
        }
        let dimension = coordinates.first().map_or(0, |c| c.len());
        for coordinate in &coordinates {
            if coordinate.len() != dimension {
                return Err(PathinaError::invalid_argument(
                    "coordinate vectors must all have the same dimension",
                ));
            }
            if coordinate.iter().any(|c| !c.is_finite()) {
                return Err(PathinaError::invalid_argument(
                    "coordinate components must be finite",
                ));
            }
        }
        self.coordinates = Some(coordinates);
        Ok(())
    }

    /// Returns the coordinates of a node, if coordinates were set.
    pub fn coordinates_of(&self, node: NodeId) -> Option<&[f64]> {
        self.coordinates
            .as_ref()
            .and_then(|coordinates| coordinates.get(node))
            .map(|coordinate| coordinate.as_slice())
    }

    /// Sets the fixed cost of a pause action. Must be finite and
    /// non-negative. The default is 1.
    pub fn set_pause_action_cost(&mut self, cost: f64) -> Result<()> {
        if !cost.is_finite() || cost < 0.0 {
            return Err(PathinaError::invalid_argument(format!(
                "pause action cost must be finite and non-negative, got {}",
                cost
            )));
        }
        self.pause_action_cost = cost;
        Ok(())
    }

    /// Returns the fixed cost of a pause action.
    pub fn pause_action_cost(&self) -> f64 {
        self.pause_action_cost
    }

    fn edges_in_direction(&self, node: NodeId, direction: Direction) -> Vec<(NodeId, f64)> {
        let index = NodeIndex::new(node);
        self.inner
            .edges_directed(index, direction)
            .map(|edge| {
                let other = if edge.source() == index {
                    edge.target()
                } else {
                    edge.source()
                };
                (other.index(), *edge.weight())
            })
            .collect()
    }
}

impl<Ty: EdgeType> NavGraph for BaseGraph<Ty> {
    fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    fn is_directed(&self) -> bool {
        Ty::is_directed()
    }

    fn has_coordinates(&self) -> bool {
        self.coordinates.is_some()
    }

    fn neighbors(&self, node: NodeId) -> Vec<(NodeId, f64)> {
        if !self.contains_node(node) {
            return Vec::new();
        }
        self.edges_in_direction(node, Direction::Outgoing)
    }

    fn predecessors(&self, node: NodeId) -> Vec<(NodeId, f64)> {
        if !self.contains_node(node) {
            return Vec::new();
        }
        self.edges_in_direction(node, Direction::Incoming)
    }

    fn estimate_distance(&self, source: NodeId, target: NodeId) -> f64 {
        match &self.coordinates {
            Some(coordinates) => {
                let (Some(a), Some(b)) = (coordinates.get(source), coordinates.get(target))
                else {
                    return 0.0;
                };
                a.iter()
                    .zip(b)
                    .map(|(x, y)| (x - y) * (x - y))
                    .sum::<f64>()
                    .sqrt()
            }
            None => 0.0,
        }
    }

    fn pause_cost(&self, _node: NodeId) -> f64 {
        self.pause_action_cost
    }

    fn adjacent(&self, source: NodeId, target: NodeId) -> bool {
        if !self.contains_node(source) || !self.contains_node(target) {
            return false;
        }
        self.inner
            .find_edge(NodeIndex::new(source), NodeIndex::new(target))
            .is_some()
    }
}
