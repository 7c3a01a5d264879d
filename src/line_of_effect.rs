//! Line-of-effect (§4.3): integer Bresenham rasterization plus the
//! obstacle-blocking rule. New relative to the reference simulator, which
//! has no grid to rasterize over.

use crate::grid::{positions_within_range, MapGrid};
use crate::values::GridPos;

/// Positions from `a` to `b` inclusive, such that each consecutive pair
/// differs by at most 1 in each axis. For `a == b` the result is the
/// single position `a`.
pub fn bresenham_line(a: GridPos, b: GridPos) -> Vec<GridPos> {
    let mut points = Vec::new();
    let (mut x, mut y) = (a.x, a.y);
    let dx = (b.x - a.x).abs();
    let dy = -(b.y - a.y).abs();
    let sx = if a.x < b.x { 1 } else { -1 };
    let sy = if a.y < b.y { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        points.push(GridPos::new(x, y));
        if x == b.x && y == b.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    points
}

/// True iff no *interior* position of the line from `a` to `b` has an
/// obstacle. Endpoints are excluded from the check: a target standing on
/// an obstacle is still targetable, and a caster whose own cell is an
/// obstacle is not self-blocking. `occupied_by` never blocks line of
/// effect.
pub fn has_line_of_effect(a: GridPos, b: GridPos, grid: &MapGrid) -> bool {
    let line = bresenham_line(a, b);
    if line.len() <= 2 {
        return true;
    }
    line[1..line.len() - 1]
        .iter()
        .all(|pos| !grid.cell(*pos).has_obstacle)
}

/// Intersection of §4.2's range query with line-of-effect from `center`.
pub fn positions_within_range_and_los(center: GridPos, range_ft: i32, grid: &MapGrid) -> Vec<GridPos> {
    positions_within_range(center, range_ft, grid)
        .into_iter()
        .filter(|q| has_line_of_effect(center, *q, grid))
        .collect()
}
