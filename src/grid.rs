//! Grid geometry (§4.2): the map, its cells, and distance/neighbor/range
//! queries. Grounded in the reference simulator's `model/types.rs`, which
//! pairs a plain value struct with a free distance function — generalized
//! here from a 3D float Euclidean `Position` to the spec's 2D integer
//! Chebyshev grid, since the reference simulator has no such grid at all.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::InvalidArgument;
use crate::values::{CreatureId, GridPos, TerrainType};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellProperties {
    #[serde(default)]
    pub terrain: TerrainType,
    #[serde(default)]
    pub has_obstacle: bool,
    #[serde(default)]
    pub occupied_by: Option<CreatureId>,
}

/// `(width, height, cells)`. `cells` serializes as an array of `[GridPos,
/// CellProperties]` pairs (§6.2) rather than an object, since `GridPos` is
/// not a string key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapGrid {
    pub width: u16,
    pub height: u16,
    #[serde(with = "cell_map_as_pairs")]
    cells: HashMap<GridPos, CellProperties>,
}

mod cell_map_as_pairs {
    use super::{CellProperties, GridPos};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::HashMap;

    pub fn serialize<S: Serializer>(
        map: &HashMap<GridPos, CellProperties>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let pairs: Vec<(GridPos, CellProperties)> =
            map.iter().map(|(k, v)| (*k, v.clone())).collect();
        pairs.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<GridPos, CellProperties>, D::Error> {
        let pairs = Vec::<(GridPos, CellProperties)>::deserialize(deserializer)?;
        Ok(pairs.into_iter().collect())
    }
}

impl MapGrid {
    pub fn new(width: u16, height: u16) -> Result<Self, InvalidArgument> {
        if !(10..=100).contains(&width) {
            return Err(InvalidArgument::OutOfBounds {
                what: "MapGrid.width".to_string(),
                value: width as i32,
                min: 10,
                max: 100,
            });
        }
        if !(10..=100).contains(&height) {
            return Err(InvalidArgument::OutOfBounds {
                what: "MapGrid.height".to_string(),
                value: height as i32,
                min: 10,
                max: 100,
            });
        }
        Ok(Self {
            width,
            height,
            cells: HashMap::new(),
        })
    }

    pub fn in_bounds(&self, pos: GridPos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u16) < self.width && (pos.y as u16) < self.height
    }

    /// Unset cells are `Normal`, unobstructed, unoccupied (§3.2).
    pub fn cell(&self, pos: GridPos) -> CellProperties {
        self.cells.get(&pos).cloned().unwrap_or_default()
    }

    pub fn set_cell(&mut self, pos: GridPos, props: CellProperties) {
        self.cells.insert(pos, props);
    }
}

pub fn distance_chebyshev(a: GridPos, b: GridPos) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

pub fn distance_feet(a: GridPos, b: GridPos) -> i32 {
    5 * distance_chebyshev(a, b)
}

/// All 8 surrounding positions, without bounds filtering — callers filter
/// with `MapGrid::in_bounds` themselves, which preserves edge-adjacency
/// symmetry regardless of where `p` sits relative to the grid.
pub fn neighbors(p: GridPos) -> [GridPos; 8] {
    [
        GridPos::new(p.x - 1, p.y - 1),
        GridPos::new(p.x, p.y - 1),
        GridPos::new(p.x + 1, p.y - 1),
        GridPos::new(p.x - 1, p.y),
        GridPos::new(p.x + 1, p.y),
        GridPos::new(p.x - 1, p.y + 1),
        GridPos::new(p.x, p.y + 1),
        GridPos::new(p.x + 1, p.y + 1),
    ]
}

/// Every in-bounds position within `range_ft` of `center`, center included
/// when it is itself in bounds. Iterates the bounding box of the grid
/// rather than an unbounded ring, so the result is always finite.
pub fn positions_within_range(center: GridPos, range_ft: i32, grid: &MapGrid) -> Vec<GridPos> {
    let radius_cells = range_ft / 5;
    let mut result = Vec::new();
    for x in (center.x - radius_cells)..=(center.x + radius_cells) {
        for y in (center.y - radius_cells)..=(center.y + radius_cells) {
            let q = GridPos::new(x, y);
            if grid.in_bounds(q) && distance_feet(center, q) <= range_ft {
                result.push(q);
            }
        }
    }
    result
}
