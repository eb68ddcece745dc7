/*!
# Reservation Table

Time-indexed occupancy bookkeeping for multi-agent planning. A reservation
table records, for a graph of a fixed size:

- **Vertex reservations** `(time, vertex)`: the vertex is occupied at that
  time step.
- **Edge reservations** `(time, from, to)`: traversing `from -> to` so that
  the move completes at `time` is forbidden; this is how head-on swaps are
  excluded when edge collisions are enabled.
- **Additive weights** `(time, vertex) -> extra`: soft costs summed on top
  of the graph edge cost when a search enters the vertex at that time.
- **Permanent windows**: a destination cell reserved at *all* times from its
  arrival time on, so parked agents act as dynamic obstacles.

Within one planning episode the table is append-only; there is no removal
API. Mutation is not thread-safe: a coordinator serializes updates and
shares the table by reference with space-time queries.
*/

use std::collections::{HashMap, HashSet};

use crate::core::error::{PathinaError, Result};
use crate::core::types::NodeId;

/// Time-indexed vertex/edge occupancy for a graph of `graph_size` nodes.
///
/// # Example
///
/// ```rust
/// use pathina::mapf::ReservationTable;
///
/// let mut rt = ReservationTable::new(4).with_edge_collision(true);
/// rt.add_path(0, &[3, 2, 1, 0], false, false).unwrap();
///
/// assert!(rt.is_reserved(1, 2));
/// // The opposing traversal 1 -> 2 completing at time 2 is blocked.
/// assert!(rt.is_edge_reserved(2, 1, 2));
/// ```
#[derive(Debug, Clone)]
pub struct ReservationTable {
    graph_size: usize,
    edge_collision: bool,
    vertex_constraints: HashSet<(usize, NodeId)>,
    edge_constraints: HashSet<(usize, NodeId, NodeId)>,
    additional_weights: HashMap<(usize, NodeId), f64>,
    /// Latest finite reservation time per vertex, -1 when never reserved.
    last_reserved: Vec<i64>,
    /// Start of the permanent reservation window per vertex, -1 when open.
    permanent_from: Vec<i64>,
}

impl ReservationTable {
    /// Creates an empty table for a graph of `graph_size` nodes, with edge
    /// collision tracking disabled.
    pub fn new(graph_size: usize) -> Self {
        Self {
            graph_size,
            edge_collision: false,
            vertex_constraints: HashSet::new(),
            edge_constraints: HashSet::new(),
            additional_weights: HashMap::new(),
            last_reserved: vec![-1; graph_size],
            permanent_from: vec![-1; graph_size],
        }
    }

    /// Enables or disables edge collision tracking for subsequent
    /// [`ReservationTable::add_path`] calls.
    pub fn with_edge_collision(mut self, enabled: bool) -> Self {
        self.edge_collision = enabled;
        self
    }

    /// Returns true if edge collision tracking is enabled.
    pub fn edge_collision(&self) -> bool {
        self.edge_collision
    }

    /// Returns the graph size the table was built for.
    pub fn graph_size(&self) -> usize {
        self.graph_size
    }

    /// Returns true if `vertex` is occupied at `time`, either by a finite
    /// reservation or by a permanent window.
    pub fn is_reserved(&self, time: usize, vertex: NodeId) -> bool {
        if vertex >= self.graph_size {
            return false;
        }
        if self.vertex_constraints.contains(&(time, vertex)) {
            return true;
        }
        let from = self.permanent_from[vertex];
        from >= 0 && time as i64 >= from
    }

    /// Returns true if traversing `from -> to` so that the move completes at
    /// `time` is forbidden.
    pub fn is_edge_reserved(&self, time: usize, from: NodeId, to: NodeId) -> bool {
        self.edge_constraints.contains(&(time, from, to))
    }

    /// Reserves `vertex` at `time`.
    pub fn add_vertex_constraint(&mut self, time: usize, vertex: NodeId) -> Result<()> {
        self.validate_node(vertex)?;
        self.vertex_constraints.insert((time, vertex));
        self.last_reserved[vertex] = self.last_reserved[vertex].max(time as i64);
        Ok(())
    }

    /// Forbids the traversal `from -> to` completing at `time`.
    pub fn add_edge_constraint(&mut self, time: usize, from: NodeId, to: NodeId) -> Result<()> {
        self.validate_node(from)?;
        self.validate_node(to)?;
        self.edge_constraints.insert((time, from, to));
        Ok(())
    }

    /// Registers an agent's committed path starting at `start_time`.
    ///
    /// Every step `path[i]` is reserved at `start_time + i`. When edge
    /// collisions are enabled, each transition `path[i] -> path[i + 1]`
    /// additionally reserves the opposing edge at `start_time + i + 1`, so a
    /// head-on swap is rejected. With `reserve_destination`, the final cell
    /// is treated as occupied at every time from the arrival on. With
    /// `reversed`, the path is registered back to front.
    pub fn add_path(
        &mut self,
        start_time: usize,
        path: &[NodeId],
        reserve_destination: bool,
        reversed: bool,
    ) -> Result<()> {
        if path.is_empty() {
            return Err(PathinaError::invalid_argument(
                "cannot reserve an empty path",
            ));
        }
        for &vertex in path {
            self.validate_node(vertex)?;
        }

        let mut path = path.to_vec();
        if reversed {
            path.reverse();
        }
        for (i, &vertex) in path.iter().enumerate() {
            self.vertex_constraints.insert((start_time + i, vertex));
            self.last_reserved[vertex] =
                self.last_reserved[vertex].max((start_time + i) as i64);
        }
        if self.edge_collision {
            for (i, window) in path.windows(2).enumerate() {
                let (from, to) = (window[0], window[1]);
                if from != to {
                    self.edge_constraints.insert((start_time + i + 1, to, from));
                }
            }
        }
        if reserve_destination {
            let destination = path[path.len() - 1];
            let arrival = (start_time + path.len() - 1) as i64;
            let current = self.permanent_from[destination];
            self.permanent_from[destination] = if current < 0 {
                arrival
            } else {
                current.min(arrival)
            };
        }
        Ok(())
    }

    /// Adds `extra` to the additive weight of every `(time, vertex)` pair
    /// along the path, starting at `start_time`. `extra` must be finite and
    /// non-negative.
    pub fn add_weight_path(&mut self, start_time: usize, path: &[NodeId], extra: f64) -> Result<()> {
        if !extra.is_finite() || extra < 0.0 {
            return Err(PathinaError::invalid_argument(format!(
                "additional weight must be finite and non-negative, got {}",
                extra
            )));
        }
        for &vertex in path {
            self.validate_node(vertex)?;
        }
        for (i, &vertex) in path.iter().enumerate() {
            *self
                .additional_weights
                .entry((start_time + i, vertex))
                .or_insert(0.0) += extra;
        }
        Ok(())
    }

    /// Returns the additive weight attached to `(time, vertex)`, or 0.
    pub fn additional_weight(&self, time: usize, vertex: NodeId) -> f64 {
        self.additional_weights
            .get(&(time, vertex))
            .copied()
            .unwrap_or(0.0)
    }

    /// Returns the latest time `vertex` is known to be reserved: the maximum
    /// of its finite reservation times and its permanent-window start, or -1
    /// when it was never reserved.
    ///
    /// Space-time searches use this to decide whether a goal can be settled
    /// on: an agent may only stop on a vertex strictly after this time.
    pub fn last_time_reserved(&self, vertex: NodeId) -> i64 {
        if vertex >= self.graph_size {
            return -1;
        }
        self.last_reserved[vertex].max(self.permanent_from[vertex])
    }

    fn validate_node(&self, vertex: NodeId) -> Result<()> {
        if vertex < self.graph_size {
            Ok(())
        } else {
            Err(PathinaError::invalid_argument(format!(
                "node id {} out of range for reservation table of size {}",
                vertex, self.graph_size
            )))
        }
    }
}
