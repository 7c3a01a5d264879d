//! A* pathfinding and reachability (§4.5), built on the `pathfinding`
//! crate's `astar`/`dijkstra` graph-search primitives. Grounded in
//! `examples/arcade-cabinet-dragons-labyrinth/crates/game-engine/src/ai/pathfinding.rs`,
//! which drives the same crate over a cost-weighted grid — the reference
//! simulator itself has no 2D position system to adapt.

use pathfinding::prelude::{astar, dijkstra_all};
use serde::{Deserialize, Serialize};

use crate::grid::{distance_chebyshev, neighbors, MapGrid};
use crate::values::{GridPos, TerrainType};

/// §6.3: one grid cell is 5 ft. `PathValidator::cost` is denominated in
/// cells, like the rest of this module's `pathfinding`-crate search costs;
/// callers working in feet (turn budgets) go through `cost_ft`/`within_budget_ft`.
const FEET_PER_CELL: u32 = 5;

/// `None` means the cell cannot be entered at all (impassable terrain, an
/// obstacle, or — for intermediate steps — another creature occupying it).
/// The destination of a path may be occupied by a living creature; callers
/// pass `destination_may_be_occupied = true` when computing the final step.
fn movement_cost(pos: GridPos, grid: &MapGrid, allow_destination_occupant: bool) -> Option<u32> {
    if !grid.in_bounds(pos) {
        return None;
    }
    let cell = grid.cell(pos);
    if cell.has_obstacle {
        return None;
    }
    if cell.occupied_by.is_some() && !allow_destination_occupant {
        return None;
    }
    match cell.terrain {
        TerrainType::Normal => Some(1),
        TerrainType::Difficult => Some(2),
        TerrainType::Impassable => None,
        TerrainType::Occupied => {
            if allow_destination_occupant {
                Some(1)
            } else {
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PathResult {
    #[serde(rename = "path_success")]
    Success { path: Vec<GridPos>, total_cost: u32 },
    #[serde(rename = "path_no_path_found")]
    NoPathFound { reason: String },
    #[serde(rename = "path_exceeds_budget")]
    ExceedsMovementBudget {
        required_cost: u32,
        available_cost: u32,
    },
}

fn successors(grid: &MapGrid, destination: GridPos) -> impl Fn(&GridPos) -> Vec<(GridPos, u32)> + '_ {
    move |&pos| {
        neighbors(pos)
            .into_iter()
            .filter(|n| grid.in_bounds(*n))
            .filter_map(|n| {
                let allow_occupant = n == destination;
                movement_cost(n, grid, allow_occupant).map(|cost| (n, cost))
            })
            .collect()
    }
}

/// 8-connected A* from `start` to `destination`. Diagonal moves cost the
/// same as orthogonal moves (D&D 5e rule) — the cost difference comes only
/// from terrain, via `movement_cost`.
pub fn find_path(start: GridPos, destination: GridPos, grid: &MapGrid) -> PathResult {
    if !grid.in_bounds(start) || !grid.in_bounds(destination) {
        return PathResult::NoPathFound {
            reason: "start or destination out of bounds".to_string(),
        };
    }
    let result = astar(
        &start,
        successors(grid, destination),
        |&pos| distance_chebyshev(pos, destination) as u32,
        |&pos| pos == destination,
    );
    match result {
        Some((path, total_cost)) => {
            log::trace!(
                "astar expanded path of length {} at cost {}",
                path.len(),
                total_cost
            );
            PathResult::Success { path, total_cost }
        }
        None => PathResult::NoPathFound {
            reason: format!("no path from {start} to {destination}"),
        },
    }
}

/// Budget-aware entry point: returns `ExceedsMovementBudget` instead of a
/// `Success` whose cost the caller cannot afford.
pub fn find_path_within_budget(
    start: GridPos,
    destination: GridPos,
    budget: u32,
    grid: &MapGrid,
) -> PathResult {
    match find_path(start, destination, grid) {
        PathResult::Success { path, total_cost } if total_cost > budget => {
            PathResult::ExceedsMovementBudget {
                required_cost: total_cost,
                available_cost: budget,
            }
        }
        other => other,
    }
}

/// Every position reachable from `start` at cost `<= budget`, via Dijkstra
/// over the movement-cost graph. `start` is always included.
pub fn reachable(start: GridPos, budget: u32, grid: &MapGrid) -> Vec<GridPos> {
    if !grid.in_bounds(start) {
        return Vec::new();
    }
    let costs = dijkstra_all(&start, |&pos| {
        neighbors(pos)
            .into_iter()
            .filter(|n| grid.in_bounds(*n))
            .filter_map(|n| movement_cost(n, grid, false).map(|cost| (n, cost)))
            .collect::<Vec<_>>()
    });
    let mut reached: Vec<GridPos> = costs
        .into_iter()
        .filter(|(_, (_, cost))| *cost <= budget)
        .map(|(pos, _)| pos)
        .collect();
    reached.push(start);
    reached.sort();
    reached.dedup();
    reached
}

/// `is_valid`: every consecutive pair is 8-adjacent and every interior cell
/// is traversable. `cost`: sum of `MovementCost` over non-start cells.
/// `within_budget`: both of the above plus `cost <= budget`.
pub struct PathValidator;

impl PathValidator {
    pub fn is_valid(path: &[GridPos], grid: &MapGrid) -> bool {
        if path.is_empty() {
            return false;
        }
        path.windows(2).all(|pair| distance_chebyshev(pair[0], pair[1]) == 1)
            && path[1..].iter().enumerate().all(|(i, &pos)| {
                let is_destination = i == path.len() - 2;
                movement_cost(pos, grid, is_destination).is_some()
            })
    }

    pub fn cost(path: &[GridPos], grid: &MapGrid) -> u32 {
        if path.len() < 2 {
            return 0;
        }
        path[1..]
            .iter()
            .enumerate()
            .map(|(i, &pos)| {
                let is_destination = i == path.len() - 2;
                movement_cost(pos, grid, is_destination).unwrap_or(0)
            })
            .sum()
    }

    pub fn within_budget(path: &[GridPos], budget: u32, grid: &MapGrid) -> bool {
        Self::is_valid(path, grid) && Self::cost(path, grid) <= budget
    }

    /// `cost`, converted from cells to feet.
    pub fn cost_ft(path: &[GridPos], grid: &MapGrid) -> u32 {
        Self::cost(path, grid) * FEET_PER_CELL
    }

    /// `within_budget`, with `budget_ft` and the path cost both in feet.
    pub fn within_budget_ft(path: &[GridPos], budget_ft: u32, grid: &MapGrid) -> bool {
        Self::is_valid(path, grid) && Self::cost_ft(path, grid) <= budget_ft
    }
}
