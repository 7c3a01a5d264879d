//! Movement resolution and opportunity-attack trigger detection (§4.9
//! MovementActionHandler). The reactor trigger zone is derived from each
//! candidate's actual `GridPos` and 5 ft melee reach — never a placeholder
//! position (§9 Open Questions).

use std::collections::HashMap;

use crate::creature::Creature;
use crate::events::{Event, SessionId};
use crate::grid::distance_chebyshev;
use crate::values::{CreatureId, GridPos};

const MELEE_REACH_CELLS: i32 = 1;

/// A reactor is provoked when a step of the mover's path leaves the
/// reactor's threatened range (distance <= reach) while the *next* step
/// does not re-enter it, and the reactor is not the mover itself.
pub fn opportunity_attack_triggers(
    mover_id: CreatureId,
    path: &[GridPos],
    creatures: &HashMap<CreatureId, Creature>,
    mover_disengaged: bool,
) -> Vec<CreatureId> {
    if mover_disengaged || path.len() < 2 {
        return Vec::new();
    }
    let mut triggered = Vec::new();
    for (reactor_id, reactor) in creatures {
        if *reactor_id == mover_id || !reactor.is_alive() || reactor.is_categorically_blocked() {
            continue;
        }
        let threatens = |pos: GridPos| distance_chebyshev(pos, reactor.position) <= MELEE_REACH_CELLS;
        let provoked = path
            .windows(2)
            .any(|step| threatens(step[0]) && !threatens(step[1]));
        if provoked {
            triggered.push(*reactor_id);
        }
    }
    triggered.sort();
    triggered
}

/// Emits `MoveCommitted` for a path already validated by the caller.
pub fn handle_move(
    session_id: SessionId,
    timestamp: i64,
    creature_id: CreatureId,
    path: Vec<GridPos>,
    movement_used: u32,
    movement_remaining: u32,
) -> Vec<Event> {
    vec![Event::MoveCommitted {
        session_id,
        timestamp,
        creature_id,
        path,
        movement_used,
        movement_remaining,
    }]
}
