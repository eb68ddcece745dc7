/*!
# Space-Time A*

A* in the product state space `(vertex, time)`: each expansion advances the
clock by one step, either moving along an edge or pausing in place, and every
candidate state is checked against a [`ReservationTable`]. This is the
single-agent engine that outer MAPF coordinators call once per agent after
committing the other agents' paths to the table.

The heuristic is the graph's spatial `estimate_distance` to the goal, which
stays admissible in the time dimension because waiting never reduces the
remaining spatial cost.

Three query variants are provided:

- [`SpaceTimeAStar::find_path_with_depth_limit`]: best path reaching the
  goal within a time horizon.
- [`SpaceTimeAStar::find_path_with_exact_length`]: a path of exactly the
  requested number of steps, padding with pauses where needed.
- [`SpaceTimeAStar::find_path_with_length_limit`]: minimum-cost path using
  at most the requested number of steps.

All searches plan from time 0; absolute time offsets are the coordinator's
concern.
*/

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use ordered_float::NotNan;

use crate::core::error::{PathinaError, Result};
use crate::core::types::{NavGraph, NodeId};
use crate::mapf::reservation::ReservationTable;

/// State in the product space: a vertex occupied at a time step.
type State = (NodeId, usize);

/// Space-time A* pathfinder bound to one graph.
///
/// # Example
///
/// ```rust
/// use pathina::core::grid::Grid;
/// use pathina::mapf::{ReservationTable, SpaceTimeAStar};
///
/// let grid = Grid::new(5, 1).unwrap();
/// let mut rt = ReservationTable::new(5);
/// // Another agent occupies cell 2 at time 2, so the straight run is
/// // impossible and the planner pauses once.
/// rt.add_vertex_constraint(2, 2).unwrap();
///
/// let planner = SpaceTimeAStar::new(&grid);
/// let path = planner.find_path_with_depth_limit(0, 4, 10, &rt).unwrap();
/// assert_eq!(path.len(), 6);
/// assert_eq!(path[0], 0);
/// assert_eq!(path[5], 4);
/// ```
pub struct SpaceTimeAStar<'g, G: NavGraph> {
    graph: &'g G,
    max_expansions: Option<usize>,
}

impl<'g, G: NavGraph> SpaceTimeAStar<'g, G> {
    /// Creates a planner bound to `graph` with no expansion budget.
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            max_expansions: None,
        }
    }

    /// Sets a cooperative expansion budget: a search that pops more than
    /// `limit` states fails with a `Timeout` error, leaving no state behind.
    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// Clears or replaces the expansion budget.
    pub fn set_max_expansions(&mut self, limit: Option<usize>) {
        self.max_expansions = limit;
    }

    /// Finds the best path that reaches `goal` at any time `t <= max_depth`.
    ///
    /// Returns an empty path when the horizon is exhausted without reaching
    /// (and safely settling on) the goal.
    pub fn find_path_with_depth_limit(
        &self,
        start: NodeId,
        goal: NodeId,
        max_depth: usize,
        reservation_table: &ReservationTable,
    ) -> Result<Vec<NodeId>> {
        self.search(start, goal, max_depth, false, reservation_table)
    }

    /// Finds a path whose length (number of vertices, including the start)
    /// is exactly `length` and that ends at `goal`; pauses pad the path
    /// where needed.
    pub fn find_path_with_exact_length(
        &self,
        start: NodeId,
        goal: NodeId,
        length: usize,
        reservation_table: &ReservationTable,
    ) -> Result<Vec<NodeId>> {
        if length == 0 {
            return Err(PathinaError::invalid_argument(
                "path length must be at least 1",
            ));
        }
        self.search(start, goal, length - 1, true, reservation_table)
    }

    /// Finds the minimum-cost path of length (number of vertices) at most
    /// `max_length` that ends at `goal`.
    pub fn find_path_with_length_limit(
        &self,
        start: NodeId,
        goal: NodeId,
        max_length: usize,
        reservation_table: &ReservationTable,
    ) -> Result<Vec<NodeId>> {
        if max_length == 0 {
            return Err(PathinaError::invalid_argument(
                "path length limit must be at least 1",
            ));
        }
        self.search(start, goal, max_length - 1, false, reservation_table)
    }

    /// Core search over `(vertex, time)` states with `time <= max_time`.
    ///
    /// With `exact`, only a goal state at exactly `max_time` is terminal;
    /// otherwise any goal state is. Either way the goal must be settleable:
    /// an agent stays parked once its plan ends, so a goal state at time `t`
    /// is terminal only when `t > last_time_reserved(goal)`.
    fn search(
        &self,
        start: NodeId,
        goal: NodeId,
        max_time: usize,
        exact: bool,
        reservation_table: &ReservationTable,
    ) -> Result<Vec<NodeId>> {
        self.graph.validate_node(start)?;
        self.graph.validate_node(goal)?;
        if reservation_table.graph_size() != self.graph.node_count() {
            return Err(PathinaError::invalid_argument(format!(
                "reservation table size {} does not match graph size {}",
                reservation_table.graph_size(),
                self.graph.node_count()
            )));
        }
        if reservation_table.is_reserved(0, start) {
            return Ok(Vec::new());
        }

        let mut dist: HashMap<State, f64> = HashMap::new();
        let mut predecessor: HashMap<State, State> = HashMap::new();
        // Heap entries are (f, h, vertex, time, g); ties break toward lower
        // h (deeper progress), then by (vertex, time).
        let mut heap = BinaryHeap::new();

        let h0 = self.not_nan(self.graph.estimate_distance(start, goal))?;
        dist.insert((start, 0), 0.0);
        heap.push(Reverse((h0, h0, start, 0usize, NotNan::new(0.0).unwrap())));

        let mut expansions = 0usize;
        while let Some(Reverse((_, _, vertex, time, g))) = heap.pop() {
            if dist
                .get(&(vertex, time))
                .map_or(true, |&best| *g > best)
            {
                continue;
            }
            expansions += 1;
            if let Some(limit) = self.max_expansions {
                if expansions > limit {
                    return Err(PathinaError::timeout(format!(
                        "space-time search exceeded {} expansions",
                        limit
                    )));
                }
            }

            if vertex == goal
                && (!exact || time == max_time)
                && time as i64 > reservation_table.last_time_reserved(goal)
            {
                return self.reconstruct(&predecessor, start, (vertex, time));
            }
            if time >= max_time {
                continue;
            }

            let next_time = time + 1;
            for (neighbor, cost) in self.graph.neighbors(vertex) {
                if cost < 0.0 {
                    return Err(PathinaError::invalid_argument(format!(
                        "space-time search requires non-negative costs, found {} on {} -> {}",
                        cost, vertex, neighbor
                    )));
                }
                if reservation_table.is_reserved(next_time, neighbor)
                    || reservation_table.is_edge_reserved(next_time, vertex, neighbor)
                {
                    continue;
                }
                let step = cost + reservation_table.additional_weight(next_time, neighbor);
                self.relax(
                    (neighbor, next_time),
                    (vertex, time),
                    *g + step,
                    goal,
                    &mut dist,
                    &mut predecessor,
                    &mut heap,
                )?;
            }
            // Pause action: stay in place for one step.
            if !reservation_table.is_reserved(next_time, vertex) {
                let step = self.graph.pause_cost(vertex)
                    + reservation_table.additional_weight(next_time, vertex);
                self.relax(
                    (vertex, next_time),
                    (vertex, time),
                    *g + step,
                    goal,
                    &mut dist,
                    &mut predecessor,
                    &mut heap,
                )?;
            }
        }
        Ok(Vec::new())
    }

    #[allow(clippy::too_many_arguments)]
    fn relax(
        &self,
        state: State,
        from: State,
        tentative: f64,
        goal: NodeId,
        dist: &mut HashMap<State, f64>,
        predecessor: &mut HashMap<State, State>,
        heap: &mut BinaryHeap<Reverse<(NotNan<f64>, NotNan<f64>, NodeId, usize, NotNan<f64>)>>,
    ) -> Result<()> {
        if dist.get(&state).map_or(true, |&best| tentative < best) {
            dist.insert(state, tentative);
            predecessor.insert(state, from);
            let h = self.not_nan(self.graph.estimate_distance(state.0, goal))?;
            let f = self.not_nan(tentative + *h)?;
            let g = self.not_nan(tentative)?;
            heap.push(Reverse((f, h, state.0, state.1, g)));
        }
        Ok(())
    }

    fn reconstruct(
        &self,
        predecessor: &HashMap<State, State>,
        start: NodeId,
        terminal: State,
    ) -> Result<Vec<NodeId>> {
        let mut path = vec![terminal.0];
        let mut current = terminal;
        while current != (start, 0) {
            current = *predecessor.get(&current).ok_or_else(|| {
                PathinaError::algorithm("space-time path reconstruction failed unexpectedly")
            })?;
            path.push(current.0);
        }
        path.reverse();
        Ok(path)
    }

    fn not_nan(&self, value: f64) -> Result<NotNan<f64>> {
        NotNan::new(value).map_err(|_| {
            PathinaError::invalid_argument(
                "space-time search requires non-NaN costs and estimates",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Grid;
    use crate::core::types::NavGraph;

    fn corridor(length: usize) -> Grid {
        Grid::new(length, 1).unwrap()
    }

    #[test]
    fn test_unconstrained_matches_plain_shortest_path() {
        let grid = corridor(5);
        let rt = ReservationTable::new(5);
        let planner = SpaceTimeAStar::new(&grid);
        let path = planner.find_path_with_depth_limit(0, 4, 10, &rt).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_blocked_cell_forces_pause() {
        let grid = corridor(5);
        let mut rt = ReservationTable::new(5);
        rt.add_vertex_constraint(2, 2).unwrap();
        let planner = SpaceTimeAStar::new(&grid);
        let path = planner.find_path_with_depth_limit(0, 4, 10, &rt).unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path[0], 0);
        assert_eq!(path[5], 4);
        for (i, &vertex) in path.iter().enumerate() {
            assert!(!rt.is_reserved(i, vertex));
        }
    }

    #[test]
    fn test_exact_length_pads_with_pauses() {
        let grid = corridor(3);
        let rt = ReservationTable::new(3);
        let planner = SpaceTimeAStar::new(&grid);
        let path = planner.find_path_with_exact_length(0, 2, 5, &rt).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], 0);
        assert_eq!(path[4], 2);
        assert!(grid.is_valid_path(&path));
    }

    #[test]
    fn test_exact_length_unsatisfiable() {
        let grid = corridor(4);
        let rt = ReservationTable::new(4);
        let planner = SpaceTimeAStar::new(&grid);
        // The goal is 3 steps away; a 2-vertex path cannot reach it.
        assert_eq!(
            planner.find_path_with_exact_length(0, 3, 2, &rt).unwrap(),
            vec![]
        );
    }

    #[test]
    fn test_length_limit() {
        let grid = corridor(4);
        let rt = ReservationTable::new(4);
        let planner = SpaceTimeAStar::new(&grid);
        assert_eq!(
            planner.find_path_with_length_limit(0, 3, 4, &rt).unwrap(),
            vec![0, 1, 2, 3]
        );
        assert_eq!(
            planner.find_path_with_length_limit(0, 3, 3, &rt).unwrap(),
            vec![]
        );
    }

    #[test]
    fn test_timeout_budget() {
        let grid = corridor(5);
        let rt = ReservationTable::new(5);
        let planner = SpaceTimeAStar::new(&grid).with_max_expansions(2);
        let result = planner.find_path_with_depth_limit(0, 4, 10, &rt);
        assert!(matches!(result, Err(PathinaError::Timeout(_))));
    }

    #[test]
    fn test_goal_settling_waits_out_transit() {
        let grid = corridor(3);
        let mut rt = ReservationTable::new(3);
        // Another agent crosses the goal cell at time 4: arriving at time 2
        // and parking would collide, so the plan keeps moving until after.
        rt.add_vertex_constraint(4, 2).unwrap();
        let planner = SpaceTimeAStar::new(&grid);
        let path = planner.find_path_with_depth_limit(0, 2, 10, &rt).unwrap();
        assert!(path.len() >= 6);
        assert_eq!(*path.last().unwrap(), 2);
        for (i, &vertex) in path.iter().enumerate() {
            assert!(!rt.is_reserved(i, vertex));
        }
    }

    #[test]
    fn test_start_reserved_is_no_path() {
        let grid = corridor(3);
        let mut rt = ReservationTable::new(3);
        rt.add_vertex_constraint(0, 0).unwrap();
        let planner = SpaceTimeAStar::new(&grid);
        assert_eq!(
            planner.find_path_with_depth_limit(0, 2, 5, &rt).unwrap(),
            vec![]
        );
    }

    #[test]
    fn test_mismatched_table_size_rejected() {
        let grid = corridor(3);
        let rt = ReservationTable::new(4);
        let planner = SpaceTimeAStar::new(&grid);
        assert!(planner.find_path_with_depth_limit(0, 2, 5, &rt).is_err());
    }
}
