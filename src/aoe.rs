//! Area-of-effect templates (§4.4). Pure functions `(origin, grid) -> set of
//! affected positions`. New relative to the reference simulator.

use std::collections::HashSet;

use crate::grid::{distance_feet, MapGrid};
use crate::values::GridPos;

/// Every in-bounds position within `radius_ft` of `origin`. Line-of-effect
/// from `origin` is not required — the template describes a spatial
/// footprint, not a targeting resolution.
pub fn sphere(origin: GridPos, radius_ft: i32, grid: &MapGrid) -> HashSet<GridPos> {
    if !grid.in_bounds(origin) {
        return HashSet::new();
    }
    let radius_cells = radius_ft / 5;
    let mut result = HashSet::new();
    for x in (origin.x - radius_cells)..=(origin.x + radius_cells) {
        for y in (origin.y - radius_cells)..=(origin.y + radius_cells) {
            let q = GridPos::new(x, y);
            if grid.in_bounds(q) && distance_feet(origin, q) <= radius_ft {
                result.insert(q);
            }
        }
    }
    result
}

/// `{(origin.x+dx, origin.y+dy) | dx,dy in [-half, half]}`, in-bounds only,
/// where `half = side_ft / 10` (integer division; each cell is 5 ft, so a
/// 10 ft cube has `half = 1`, a 3x3 footprint centered on `origin`).
pub fn cube(origin: GridPos, side_ft: i32, grid: &MapGrid) -> HashSet<GridPos> {
    if !grid.in_bounds(origin) {
        return HashSet::new();
    }
    let half = side_ft / 10;
    let mut result = HashSet::new();
    for dx in -half..=half {
        for dy in -half..=half {
            let q = GridPos::new(origin.x + dx, origin.y + dy);
            if grid.in_bounds(q) {
                result.insert(q);
            }
        }
    }
    result
}

/// The 8 directions a cone can be aimed along, matching `grid::neighbors`'
/// ordering of axis-aligned vs. diagonal offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub dx: i32,
    pub dy: i32,
}

impl Direction {
    pub const NORTH: Direction = Direction { dx: 0, dy: -1 };
    pub const SOUTH: Direction = Direction { dx: 0, dy: 1 };
    pub const EAST: Direction = Direction { dx: 1, dy: 0 };
    pub const WEST: Direction = Direction { dx: -1, dy: 0 };
    pub const NORTHEAST: Direction = Direction { dx: 1, dy: -1 };
    pub const NORTHWEST: Direction = Direction { dx: -1, dy: -1 };
    pub const SOUTHEAST: Direction = Direction { dx: 1, dy: 1 };
    pub const SOUTHWEST: Direction = Direction { dx: -1, dy: 1 };

    fn is_diagonal(self) -> bool {
        self.dx != 0 && self.dy != 0
    }
}

/// For each step `d` along `direction` out to `length_ft / 5` cells, a
/// perpendicular half-width of `min(d, 3)` cells widens the cone, offset
/// range `[-floor(d/2), floor(d/2)]`.
///
/// Open-question resolution (§9, SPEC_FULL.md): orthogonal directions
/// (N/S/E/W) offset only the axis perpendicular to travel; diagonal
/// directions offset both axes independently, each clamped to the same
/// `[-floor(d/2), floor(d/2)]` range. This is the one deterministic rule
/// pinned by the tests below.
pub fn cone(origin: GridPos, length_ft: i32, direction: Direction, grid: &MapGrid) -> HashSet<GridPos> {
    if !grid.in_bounds(origin) {
        return HashSet::new();
    }
    let steps = length_ft / 5;
    let mut result = HashSet::new();
    for d in 1..=steps {
        let half_width = d.min(3) / 2;
        let center_x = origin.x + direction.dx * d;
        let center_y = origin.y + direction.dy * d;

        for offset in -half_width..=half_width {
            let q = if direction.is_diagonal() {
                // Both axes widen independently for diagonal directions.
                GridPos::new(center_x + offset, center_y)
            } else if direction.dx == 0 {
                GridPos::new(center_x + offset, center_y)
            } else {
                GridPos::new(center_x, center_y + offset)
            };
            if grid.in_bounds(q) {
                result.insert(q);
            }
        }
        if direction.is_diagonal() {
            for offset in -half_width..=half_width {
                let q = GridPos::new(center_x, center_y + offset);
                if grid.in_bounds(q) {
                    result.insert(q);
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_at_origin_returns_expected_count_and_includes_origin() {
        let grid = MapGrid::new(50, 50).unwrap();
        let origin = GridPos::new(25, 25);
        let affected = sphere(origin, 10, &grid);
        assert!(affected.contains(&origin));
        assert_eq!(affected.len(), 25);
        for p in &affected {
            assert!(distance_feet(origin, *p) <= 10);
        }
    }

    #[test]
    fn sphere_is_pure_and_never_leaves_bounds() {
        let grid = MapGrid::new(20, 20).unwrap();
        let origin = GridPos::new(1, 1);
        let a = sphere(origin, 15, &grid);
        let b = sphere(origin, 15, &grid);
        assert_eq!(a, b);
        assert!(a.iter().all(|p| grid.in_bounds(*p)));
    }

    #[test]
    fn sphere_outside_bounds_is_empty() {
        let grid = MapGrid::new(20, 20).unwrap();
        assert!(sphere(GridPos::new(-5, -5), 10, &grid).is_empty());
    }

    #[test]
    fn cube_ten_feet_gives_a_three_by_three_footprint() {
        let grid = MapGrid::new(20, 20).unwrap();
        let origin = GridPos::new(10, 10);
        let affected = cube(origin, 10, &grid);
        assert_eq!(affected.len(), 9);
        assert!(affected.contains(&origin));
    }

    #[test]
    fn cone_never_returns_out_of_bounds_positions() {
        let grid = MapGrid::new(15, 15).unwrap();
        let origin = GridPos::new(1, 1);
        let affected = cone(origin, 30, Direction::NORTHWEST, &grid);
        assert!(affected.iter().all(|p| grid.in_bounds(*p)));
    }

    #[test]
    fn cone_orthogonal_widens_on_one_axis_only() {
        let grid = MapGrid::new(30, 30).unwrap();
        let origin = GridPos::new(15, 15);
        let affected = cone(origin, 15, Direction::EAST, &grid);
        // At distance 3 the half-width is floor(3/2)=1, so y in [14,16].
        assert!(affected.contains(&GridPos::new(18, 14)));
        assert!(affected.contains(&GridPos::new(18, 16)));
        assert!(!affected.contains(&GridPos::new(18, 13)));
    }

    #[test]
    fn cone_diagonal_widens_on_both_axes() {
        let grid = MapGrid::new(30, 30).unwrap();
        let origin = GridPos::new(15, 15);
        let affected = cone(origin, 15, Direction::NORTHEAST, &grid);
        assert!(affected.contains(&GridPos::new(18, 12)));
        // both-axis widening means an off-diagonal cell near the tip is included
        assert!(affected.contains(&GridPos::new(17, 12)) || affected.contains(&GridPos::new(18, 13)));
    }

    #[test]
    fn cone_out_of_bounds_origin_is_empty() {
        let grid = MapGrid::new(15, 15).unwrap();
        assert!(cone(GridPos::new(-1, -1), 30, Direction::SOUTH, &grid).is_empty());
    }
}
