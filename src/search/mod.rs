/*!
# Single-Agent Search Engines

This module implements the single-agent shortest-path engines over the
[`NavGraph`](crate::core::types::NavGraph) interface:

- **BFS:** FIFO frontier, shortest hop count; edge weights are ignored.
- **Dijkstra:** min-priority frontier keyed on tentative distance.
- **A\*:** min-priority frontier keyed on `f = g + h`, with the heuristic
  provided by the graph's `estimate_distance`.
- **Resumable BFS / Dijkstra:** single-source variants that keep their
  frontier alive between queries to amortize repeated lookups from a fixed
  start node.

Every engine holds a shared reference to exactly one graph, validates its
node ids up front, returns `[start]` when `start == goal`, and signals "no
path" with an empty path. Expansion order is deterministic given the same
graph and query.
*/

pub mod astar;
pub mod bfs;
pub mod dijkstra;
pub mod resumable;

pub use astar::AStar;
pub use bfs::Bfs;
pub use dijkstra::Dijkstra;
pub use resumable::{ResumableBfs, ResumableDijkstra};

use crate::core::types::NodeId;

/// Walks the predecessor table back from `goal` to `start`.
pub(crate) fn reconstruct_path(
    predecessor: &[Option<NodeId>],
    start: NodeId,
    goal: NodeId,
) -> Vec<NodeId> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match predecessor[current] {
            Some(previous) => {
                path.push(previous);
                current = previous;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}
