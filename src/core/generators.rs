/*!
# Graph and Grid Generators

Seeded random generators used by benchmarks and property tests:
Erdős–Rényi-style random graphs with uniform random edge costs, and random
grids with uniformly sprinkled obstacles.

All generators take an explicit seed so runs are reproducible. Invalid
parameters (probability outside `[0, 1]`, zero nodes) are reported as
`InvalidArgument` errors.

# Examples

```rust
use pathina::core::generators::random_graph;
use pathina::core::types::{Directed, NavGraph};

let graph = random_graph::<Directed>(50, 0.1, 42).unwrap();
assert_eq!(graph.node_count(), 50);
```
*/

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::error::{PathinaError, Result};
use crate::core::grid::Grid;
use crate::core::types::{BaseGraph, EdgeType};

/// Generates a random graph with `n` nodes where each ordered (or unordered,
/// for undirected graphs) pair is connected with probability `p`; edge costs
/// are uniform in `[1, 10)`.
pub fn random_graph<Ty: EdgeType>(n: usize, p: f64, seed: u64) -> Result<BaseGraph<Ty>> {
    if n == 0 {
        return Err(PathinaError::invalid_argument(
            "number of nodes must be greater than zero",
        ));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(PathinaError::invalid_argument(format!(
            "edge probability must be in [0.0, 1.0], got {}",
            p
        )));
    }

    let mut graph = BaseGraph::<Ty>::with_node_count(n);
    let mut rng = StdRng::seed_from_u64(seed);
    if Ty::is_directed() {
        for i in 0..n {
            for j in 0..n {
                if i != j && rng.random_bool(p) {
                    graph.add_edge(i, j, rng.random_range(1.0..10.0))?;
                }
            }
        }
    } else {
        for i in 0..n {
            for j in (i + 1)..n {
                if rng.random_bool(p) {
                    graph.add_edge(i, j, rng.random_range(1.0..10.0))?;
                }
            }
        }
    }
    Ok(graph)
}

/// Generates a grid of unit-weight cells where each cell is independently an
/// obstacle with probability `obstacle_ratio`.
pub fn random_grid(width: usize, height: usize, obstacle_ratio: f64, seed: u64) -> Result<Grid> {
    if !(0.0..=1.0).contains(&obstacle_ratio) {
        return Err(PathinaError::invalid_argument(format!(
            "obstacle ratio must be in [0.0, 1.0], got {}",
            obstacle_ratio
        )));
    }
    let mut grid = Grid::new(width, height)?;
    let mut rng = StdRng::seed_from_u64(seed);
    for node in 0..width * height {
        if rng.random_bool(obstacle_ratio) {
            grid.add_obstacle(node)?;
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{NavGraph, Undirected};

    #[test]
    fn test_random_graph_is_reproducible() {
        let a = random_graph::<Undirected>(30, 0.2, 7).unwrap();
        let b = random_graph::<Undirected>(30, 0.2, 7).unwrap();
        assert_eq!(a.edge_count(), b.edge_count());
        for node in 0..30 {
            assert_eq!(a.neighbors(node), b.neighbors(node));
        }
    }

    #[test]
    fn test_random_graph_validates_parameters() {
        assert!(random_graph::<Undirected>(0, 0.5, 1).is_err());
        assert!(random_graph::<Undirected>(10, 1.5, 1).is_err());
    }

    #[test]
    fn test_random_grid_obstacle_ratio_extremes() {
        let open = random_grid(4, 4, 0.0, 1).unwrap();
        assert!((0..16).all(|node| !open.has_obstacle(node).unwrap()));
        let blocked = random_grid(4, 4, 1.0, 1).unwrap();
        assert!((0..16).all(|node| blocked.has_obstacle(node).unwrap()));
    }
}
