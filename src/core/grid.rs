/*!
# Weighted 2D Grid

This module provides the implicit grid implementation of
[`NavGraph`](crate::core::types::NavGraph): a rectangular board of cells with
per-cell entry costs, obstacles, configurable diagonal movement, and
independently wrappable borders.

Cells are addressed row-major: the cell at `(x, y)` has id `y * width + x`.
Entering a cell of weight `w` contributes `w` to the path cost (scaled by the
diagonal multiplier for diagonal moves); the starting cell's weight is never
charged. A weight of [`Grid::OBSTACLE`] (`-1`) marks an impassable cell.

# Examples

```rust
use pathina::core::grid::{DiagonalMovement, Grid};
use pathina::core::types::NavGraph;

let mut grid = Grid::new(3, 3).unwrap();
grid.add_obstacle(4).unwrap(); // center cell
assert_eq!(grid.neighbors(0), vec![(1, 1.0), (3, 1.0)]);

grid.set_diagonal_movement(DiagonalMovement::Always);
assert!(!grid.adjacent(0, 4)); // still an obstacle
```
*/

use crate::core::error::{PathinaError, Result};
use crate::core::types::{NavGraph, NodeId};

/// Diagonal movement policy for grids.
///
/// The numeric codes 0..=3 accepted by [`TryFrom<u8>`] match the order of the
/// variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagonalMovement {
    /// Only 4-neighborhood moves.
    #[default]
    Never,
    /// Diagonal allowed iff both adjacent orthogonal cells are passable.
    OnlyWhenNoObstacle,
    /// Diagonal allowed iff at most one adjacent orthogonal cell is an
    /// obstacle.
    IfAtMostOneObstacle,
    /// Diagonal always allowed if the target cell is passable.
    Always,
}

impl TryFrom<u8> for DiagonalMovement {
    type Error = PathinaError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(DiagonalMovement::Never),
            1 => Ok(DiagonalMovement::OnlyWhenNoObstacle),
            2 => Ok(DiagonalMovement::IfAtMostOneObstacle),
            3 => Ok(DiagonalMovement::Always),
            _ => Err(PathinaError::invalid_argument(format!(
                "invalid diagonal movement code {}, expected 0..=3",
                code
            ))),
        }
    }
}

/// How the cost of a pause action is determined on a grid.
///
/// The numeric codes 0/1 accepted by [`TryFrom<u8>`] match the order of the
/// variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PauseCostPolicy {
    /// A fixed cost, set with [`Grid::set_pause_action_cost`].
    #[default]
    Fixed,
    /// The weight of the cell the agent pauses on, clamped to 0 for
    /// obstacles.
    CellWeight,
}

impl TryFrom<u8> for PauseCostPolicy {
    type Error = PathinaError;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(PauseCostPolicy::Fixed),
            1 => Ok(PauseCostPolicy::CellWeight),
            _ => Err(PathinaError::invalid_argument(format!(
                "invalid pause cost policy code {}, expected 0 or 1",
                code
            ))),
        }
    }
}

const ORTHOGONAL_OFFSETS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_OFFSETS: [(isize, isize); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// A rectangular grid with per-cell entry costs.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    weights: Vec<f64>,
    diagonal_movement: DiagonalMovement,
    diagonal_movement_cost_multiplier: f64,
    passable_left_right_border: bool,
    passable_up_down_border: bool,
    pause_cost_policy: PauseCostPolicy,
    pause_action_cost: f64,
    min_weight: f64,
}

impl Grid {
    /// Sentinel weight marking an impassable cell.
    pub const OBSTACLE: f64 = -1.0;

    /// Creates a grid with all cell weights set to 1.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PathinaError::invalid_argument(format!(
                "grid dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            weights: vec![1.0; width * height],
            diagonal_movement: DiagonalMovement::default(),
            diagonal_movement_cost_multiplier: 1.0,
            passable_left_right_border: false,
            passable_up_down_border: false,
            pause_cost_policy: PauseCostPolicy::default(),
            pause_action_cost: 1.0,
            min_weight: 1.0,
        })
    }

    /// Creates a grid from a row-major weight vector of length
    /// `width * height`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pathina::core::grid::Grid;
    ///
    /// let grid = Grid::with_weights(2, 2, vec![1.0, 2.0, Grid::OBSTACLE, 0.5]).unwrap();
    /// assert!(grid.has_obstacle(2).unwrap());
    /// assert_eq!(grid.weight(3).unwrap(), 0.5);
    /// ```
    pub fn with_weights(width: usize, height: usize, weights: Vec<f64>) -> Result<Self> {
        let mut grid = Self::new(width, height)?;
        grid.set_weights(weights)?;
        Ok(grid)
    }

    /// Returns the grid width.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the id of the cell at `(x, y)`, or `None` when the position
    /// is outside the grid.
    pub fn node_at(&self, x: usize, y: usize) -> Option<NodeId> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Returns the `(x, y)` position of a cell id.
    pub fn position_of(&self, node: NodeId) -> Option<(usize, usize)> {
        if node < self.weights.len() {
            Some((node % self.width, node / self.width))
        } else {
            None
        }
    }

    /// Updates the weight of one cell.
    ///
    /// The weight must be finite and non-negative, or exactly
    /// [`Grid::OBSTACLE`]. Weight changes invalidate any outstanding
    /// resumable-search instance bound to this grid.
    pub fn update_weight(&mut self, node: NodeId, weight: f64) -> Result<()> {
        self.validate_node(node)?;
        Self::validate_weight(weight)?;
        self.weights[node] = weight;
        self.refresh_min_weight();
        Ok(())
    }

    /// Replaces all cell weights. The vector must have `width * height`
    /// entries, each finite and non-negative or [`Grid::OBSTACLE`].
    pub fn set_weights(&mut self, weights: Vec<f64>) -> Result<()> {
        if weights.len() != self.width * self.height {
            return Err(PathinaError::invalid_argument(format!(
                "expected {} weights for a {}x{} grid, got {}",
                self.width * self.height,
                self.width,
                self.height,
                weights.len()
            )));
        }
        for &weight in &weights {
            Self::validate_weight(weight)?;
        }
        self.weights = weights;
        self.refresh_min_weight();
        Ok(())
    }

    /// Returns the weight of a cell.
    pub fn weight(&self, node: NodeId) -> Result<f64> {
        self.validate_node(node)?;
        Ok(self.weights[node])
    }

    /// Returns true if the cell is an obstacle.
    pub fn has_obstacle(&self, node: NodeId) -> Result<bool> {
        self.validate_node(node)?;
        Ok(self.weights[node] < 0.0)
    }

    /// Marks a cell as impassable.
    pub fn add_obstacle(&mut self, node: NodeId) -> Result<()> {
        self.update_weight(node, Self::OBSTACLE)
    }

    /// Clears an obstacle, restoring the cell weight to 1.
    pub fn remove_obstacle(&mut self, node: NodeId) -> Result<()> {
        self.update_weight(node, 1.0)
    }

    /// Returns the diagonal movement policy.
    pub fn diagonal_movement(&self) -> DiagonalMovement {
        self.diagonal_movement
    }

    /// Sets the diagonal movement policy.
    pub fn set_diagonal_movement(&mut self, policy: DiagonalMovement) {
        self.diagonal_movement = policy;
    }

    /// Returns the diagonal movement cost multiplier.
    pub fn diagonal_movement_cost_multiplier(&self) -> f64 {
        self.diagonal_movement_cost_multiplier
    }

    /// Sets the multiplier applied to the entry cost of diagonal moves.
    /// Must be finite and non-negative.
    pub fn set_diagonal_movement_cost_multiplier(&mut self, multiplier: f64) -> Result<()> {
        if !multiplier.is_finite() || multiplier < 0.0 {
            return Err(PathinaError::invalid_argument(format!(
                "diagonal movement cost multiplier must be finite and non-negative, got {}",
                multiplier
            )));
        }
        self.diagonal_movement_cost_multiplier = multiplier;
        Ok(())
    }

    /// Returns true if the left/right border wraps around.
    pub fn passable_left_right_border(&self) -> bool {
        self.passable_left_right_border
    }

    /// Makes the left and right borders wrap around (cylinder topology on
    /// the x axis).
    pub fn set_passable_left_right_border(&mut self, passable: bool) {
        self.passable_left_right_border = passable;
    }

    /// Returns true if the top/bottom border wraps around.
    pub fn passable_up_down_border(&self) -> bool {
        self.passable_up_down_border
    }

    /// Makes the top and bottom borders wrap around (cylinder topology on
    /// the y axis).
    pub fn set_passable_up_down_border(&mut self, passable: bool) {
        self.passable_up_down_border = passable;
    }

    /// Returns the pause cost policy.
    pub fn pause_cost_policy(&self) -> PauseCostPolicy {
        self.pause_cost_policy
    }

    /// Sets the pause cost policy.
    pub fn set_pause_cost_policy(&mut self, policy: PauseCostPolicy) {
        self.pause_cost_policy = policy;
    }

    /// Sets the fixed pause action cost used by [`PauseCostPolicy::Fixed`].
    /// Must be finite and non-negative. The default is 1.
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

    /// Returns the smallest passable cell weight, or 0 when every cell is an
    /// obstacle.
    pub fn min_weight(&self) -> f64 {
        if self.min_weight.is_finite() {
            self.min_weight
        } else {
            0.0
        }
    }

    fn validate_weight(weight: f64) -> Result<()> {
        if weight == Self::OBSTACLE || (weight.is_finite() && weight >= 0.0) {
            Ok(())
        } else {
            Err(PathinaError::invalid_argument(format!(
                "cell weight must be non-negative or {} for an obstacle, got {}",
                Self::OBSTACLE,
                weight
            )))
        }
    }

    fn refresh_min_weight(&mut self) {
        self.min_weight = self
            .weights
            .iter()
            .copied()
            .filter(|&w| w >= 0.0)
            .fold(f64::INFINITY, f64::min);
    }

    fn index(&self, x: usize, y: usize) -> NodeId {
        y * self.width + x
    }

    fn passable(&self, node: NodeId) -> bool {
        self.weights[node] >= 0.0
    }

    /// Applies an offset to a position, honoring the border wrap flags.
    fn shift(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<(usize, usize)> {
        let nx = wrap_coordinate(x as isize + dx, self.width, self.passable_left_right_border)?;
        let ny = wrap_coordinate(y as isize + dy, self.height, self.passable_up_down_border)?;
        Some((nx, ny))
    }

    /// Corner rule: counts obstacles among the two orthogonal cells adjacent
    /// to the diagonal step. Off-grid cells count as obstacles.
    fn diagonal_open(&self, x: usize, y: usize, dx: isize, dy: isize) -> bool {
        let blocked = |sx: isize, sy: isize| -> bool {
            match self.shift(x, y, sx, sy) {
                Some((cx, cy)) => !self.passable(self.index(cx, cy)),
                None => true,
            }
        };
        let obstacles = blocked(dx, 0) as usize + blocked(0, dy) as usize;
        match self.diagonal_movement {
            DiagonalMovement::Never => false,
            DiagonalMovement::OnlyWhenNoObstacle => obstacles == 0,
            DiagonalMovement::IfAtMostOneObstacle => obstacles <= 1,
            DiagonalMovement::Always => true,
        }
    }

    /// Shared skeleton of `neighbors`/`predecessors`: enumerates the
    /// passable cells reachable from `node` together with the diagonal flag.
    fn adjacent_cells(&self, node: NodeId) -> Vec<(NodeId, bool)> {
        let Some((x, y)) = self.position_of(node) else {
            return Vec::new();
        };
        if !self.passable(node) {
            return Vec::new();
        }
        let mut cells = Vec::with_capacity(8);
        for &(dx, dy) in &ORTHOGONAL_OFFSETS {
            if let Some((nx, ny)) = self.shift(x, y, dx, dy) {
                let target = self.index(nx, ny);
                if target != node && self.passable(target) {
                    cells.push((target, false));
                }
            }
        }
        if self.diagonal_movement != DiagonalMovement::Never {
            for &(dx, dy) in &DIAGONAL_OFFSETS {
                if !self.diagonal_open(x, y, dx, dy) {
                    continue;
                }
                if let Some((nx, ny)) = self.shift(x, y, dx, dy) {
                    let target = self.index(nx, ny);
                    if target != node && self.passable(target) {
                        cells.push((target, true));
                    }
                }
            }
        }
        cells
    }
}

impl NavGraph for Grid {
    fn node_count(&self) -> usize {
        self.weights.len()
    }

    fn is_directed(&self) -> bool {
        false
    }

    fn has_coordinates(&self) -> bool {
        true
    }

    /// Orthogonal neighbors first, then diagonals; the cost of each edge is
    /// the entry cost of the target cell.
    fn neighbors(&self, node: NodeId) -> Vec<(NodeId, f64)> {
        self.adjacent_cells(node)
            .into_iter()
            .map(|(target, diagonal)| {
                let multiplier = if diagonal {
                    self.diagonal_movement_cost_multiplier
                } else {
                    1.0
                };
                (target, self.weights[target] * multiplier)
            })
            .collect()
    }

    /// Edges into `node`: the same cells as [`NavGraph::neighbors`] (the
    /// topology is symmetric), but every edge costs the entry into `node`.
    fn predecessors(&self, node: NodeId) -> Vec<(NodeId, f64)> {
        let entry = match self.weights.get(node) {
            Some(&w) if w >= 0.0 => w,
            _ => return Vec::new(),
        };
        self.adjacent_cells(node)
            .into_iter()
            .map(|(source, diagonal)| {
                let multiplier = if diagonal {
                    self.diagonal_movement_cost_multiplier
                } else {
                    1.0
                };
                (source, entry * multiplier)
            })
            .collect()
    }

    /// Wrap-aware Manhattan distance (diagonal movement disabled) or the
    /// multiplier-aware octile bound, scaled by the smallest passable cell
    /// weight. Admissible for every multiplier.
    fn estimate_distance(&self, source: NodeId, target: NodeId) -> f64 {
        let (Some((x1, y1)), Some((x2, y2))) = (self.position_of(source), self.position_of(target))
        else {
            return 0.0;
        };
        let mut dx = x1.abs_diff(x2) as f64;
        if self.passable_left_right_border {
            dx = dx.min(self.width as f64 - dx);
        }
        let mut dy = y1.abs_diff(y2) as f64;
        if self.passable_up_down_border {
            dy = dy.min(self.height as f64 - dy);
        }
        let scale = self.min_weight();
        if self.diagonal_movement == DiagonalMovement::Never {
            return (dx + dy) * scale;
        }
        let (low, high) = if dx < dy { (dx, dy) } else { (dy, dx) };
        let multiplier = self.diagonal_movement_cost_multiplier;
        let bound = if multiplier <= 1.0 {
            // Diagonal zigzags dominate: every step costs at least the
            // multiplier and at least max(dx, dy) steps are needed.
            high * multiplier
        } else {
            // Octile, with the diagonal leg capped at two straight moves.
            low * multiplier.min(2.0) + (high - low)
        };
        bound * scale
    }

    fn pause_cost(&self, node: NodeId) -> f64 {
        match self.pause_cost_policy {
            PauseCostPolicy::Fixed => self.pause_action_cost,
            PauseCostPolicy::CellWeight => {
                self.weights.get(node).copied().unwrap_or(0.0).max(0.0)
            }
        }
    }
}

fn wrap_coordinate(coordinate: isize, dimension: usize, wraps: bool) -> Option<usize> {
    let dimension = dimension as isize;
    if (0..dimension).contains(&coordinate) {
        Some(coordinate as usize)
    } else if wraps {
        Some(coordinate.rem_euclid(dimension) as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orthogonal_neighbors_only_by_default() {
        let grid = Grid::new(3, 3).unwrap();
        // Center cell: E, W, S, N.
        assert_eq!(grid.neighbors(4), vec![(5, 1.0), (3, 1.0), (7, 1.0), (1, 1.0)]);
        // Corner cell.
        assert_eq!(grid.neighbors(0), vec![(1, 1.0), (3, 1.0)]);
    }

    #[test]
    fn test_diagonal_policies() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.add_obstacle(1).unwrap();
        grid.add_obstacle(3).unwrap();

        grid.set_diagonal_movement(DiagonalMovement::OnlyWhenNoObstacle);
        assert!(!grid.adjacent(0, 4));

        grid.set_diagonal_movement(DiagonalMovement::IfAtMostOneObstacle);
        assert!(!grid.adjacent(0, 4));
        grid.remove_obstacle(1).unwrap();
        assert!(grid.adjacent(0, 4));

        grid.set_diagonal_movement(DiagonalMovement::Always);
        grid.add_obstacle(1).unwrap();
        assert!(grid.adjacent(0, 4));
    }

    #[test]
    fn test_diagonal_cost_multiplier() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set_diagonal_movement(DiagonalMovement::Always);
        grid.set_diagonal_movement_cost_multiplier(std::f64::consts::SQRT_2)
            .unwrap();
        let cost = grid
            .neighbors(0)
            .into_iter()
            .find(|&(to, _)| to == 4)
            .map(|(_, c)| c)
            .unwrap();
        assert!((cost - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_border_wraparound() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(!grid.adjacent(0, 2));
        grid.set_passable_left_right_border(true);
        assert!(grid.adjacent(0, 2));
        assert!(!grid.adjacent(0, 6));
        grid.set_passable_up_down_border(true);
        assert!(grid.adjacent(0, 6));
    }

    #[test]
    fn test_obstacles_are_skipped() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.add_obstacle(1).unwrap();
        assert_eq!(grid.neighbors(0), vec![(3, 1.0)]);
        // An obstacle has no outgoing edges either.
        assert_eq!(grid.neighbors(1), vec![]);
        assert_eq!(grid.predecessors(1), vec![]);
    }

    #[test]
    fn test_entry_cost_semantics() {
        let grid = Grid::with_weights(2, 1, vec![1.0, 3.0]).unwrap();
        assert_eq!(grid.neighbors(0), vec![(1, 3.0)]);
        assert_eq!(grid.neighbors(1), vec![(0, 1.0)]);
        // Predecessors of 1 charge the entry into 1.
        assert_eq!(grid.predecessors(1), vec![(0, 3.0)]);
    }

    #[test]
    fn test_weight_validation() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(grid.update_weight(0, -2.0).is_err());
        assert!(grid.update_weight(0, f64::NAN).is_err());
        assert!(grid.update_weight(4, 1.0).is_err());
        assert!(grid.update_weight(0, 0.0).is_ok());
        assert!(grid.set_weights(vec![1.0; 3]).is_err());
    }

    #[test]
    fn test_policy_codes() {
        assert_eq!(DiagonalMovement::try_from(0).unwrap(), DiagonalMovement::Never);
        assert_eq!(DiagonalMovement::try_from(3).unwrap(), DiagonalMovement::Always);
        assert!(DiagonalMovement::try_from(4).is_err());
        assert_eq!(PauseCostPolicy::try_from(1).unwrap(), PauseCostPolicy::CellWeight);
        assert!(PauseCostPolicy::try_from(2).is_err());
    }

    #[test]
    fn test_pause_cost_policies() {
        let mut grid = Grid::with_weights(2, 1, vec![2.5, Grid::OBSTACLE]).unwrap();
        assert_eq!(grid.pause_cost(0), 1.0);
        grid.set_pause_action_cost(0.25).unwrap();
        assert_eq!(grid.pause_cost(0), 0.25);
        grid.set_pause_cost_policy(PauseCostPolicy::CellWeight);
        assert_eq!(grid.pause_cost(0), 2.5);
        // Obstacle weight clamps to zero.
        assert_eq!(grid.pause_cost(1), 0.0);
    }

    #[test]
    fn test_estimate_distance_manhattan_and_octile() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert_eq!(grid.estimate_distance(0, 8), 4.0);

        grid.set_diagonal_movement(DiagonalMovement::Always);
        grid.set_diagonal_movement_cost_multiplier(std::f64::consts::SQRT_2)
            .unwrap();
        assert!((grid.estimate_distance(0, 8) - 2.0 * std::f64::consts::SQRT_2).abs() < 1e-12);

        // A multiplier above 2 never beats two straight moves.
        grid.set_diagonal_movement_cost_multiplier(5.0).unwrap();
        assert_eq!(grid.estimate_distance(0, 8), 4.0);

        // A cheap multiplier bounds by max(dx, dy) diagonal steps.
        grid.set_diagonal_movement_cost_multiplier(0.5).unwrap();
        assert_eq!(grid.estimate_distance(0, 8), 1.0);
    }

    #[test]
    fn test_estimate_distance_wrap_aware() {
        let mut grid = Grid::new(5, 1).unwrap();
        assert_eq!(grid.estimate_distance(0, 4), 4.0);
        grid.set_passable_left_right_border(true);
        assert_eq!(grid.estimate_distance(0, 4), 1.0);
    }
}
