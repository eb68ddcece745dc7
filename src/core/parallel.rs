/*!
# Parallel Batch Queries

Rayon-based helpers for answering many independent path queries against one
immutable graph. Each query runs its own engine instance on its own thread;
the graph is only read, which is the one sharing pattern the concurrency
model allows.

All parallel functions have the `_parallel` suffix to distinguish them from
the single-query engines.
*/

use rayon::prelude::*;

use crate::core::error::Result;
use crate::core::types::{NavGraph, NodeId};
use crate::search::{AStar, Dijkstra};

/// Answers a batch of `(start, goal)` queries with Dijkstra, in parallel.
///
/// The result vector is index-aligned with `queries`.
///
/// # Example
///
/// ```rust
/// use pathina::core::grid::Grid;
/// use pathina::core::parallel::dijkstra_parallel;
///
/// let grid = Grid::new(4, 4).unwrap();
/// let results = dijkstra_parallel(&grid, &[(0, 15), (3, 12)]);
/// assert_eq!(results.len(), 2);
/// assert_eq!(results[0].as_ref().unwrap().len(), 7);
/// ```
pub fn dijkstra_parallel<G>(graph: &G, queries: &[(NodeId, NodeId)]) -> Vec<Result<Vec<NodeId>>>
where
    G: NavGraph + Sync,
{
    queries
        .par_iter()
        .map(|&(start, goal)| Dijkstra::new(graph).find_path(start, goal))
        .collect()
}

/// Answers a batch of `(start, goal)` queries with A*, in parallel.
pub fn a_star_parallel<G>(graph: &G, queries: &[(NodeId, NodeId)]) -> Vec<Result<Vec<NodeId>>>
where
    G: NavGraph + Sync,
{
    queries
        .par_iter()
        .map(|&(start, goal)| AStar::new(graph).find_path(start, goal))
        .collect()
}
