//! Initiative tracker (§4.6) and its runtime state (§3.3/§3.4). The
//! turn-index wraparound/round-increment skeleton is grounded in
//! `examples/other_examples/.../encounter.rs`'s `end_turn` (`turn_index =
//! (turn_index + 1) % len; if turn_index == 0 { round += 1 }`), extended
//! here with the spec's surprise-round skip logic, delay/resume, and
//! dynamic join/leave, none of which that reference file has.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::InvalidState;
use crate::turn_phase::TurnPhase;
use crate::values::CreatureId;

pub const DEFAULT_SPEED_FT: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitiativeEntry {
    pub creature_id: CreatureId,
    pub roll: i32,
    pub modifier: i32,
}

impl InitiativeEntry {
    pub fn new(creature_id: CreatureId, roll: i32, modifier: i32) -> Self {
        Self {
            creature_id,
            roll,
            modifier,
        }
    }

    pub fn total(&self) -> i32 {
        self.roll + self.modifier
    }
}

/// Total ordering: `total` descending, then `roll` descending, then
/// `modifier` descending, then `creature_id` ascending — stable and
/// deterministic so ties never depend on input order.
fn compare_entries(a: &InitiativeEntry, b: &InitiativeEntry) -> Ordering {
    b.total()
        .cmp(&a.total())
        .then_with(|| b.roll.cmp(&a.roll))
        .then_with(|| b.modifier.cmp(&a.modifier))
        .then_with(|| a.creature_id.cmp(&b.creature_id))
}

fn sorted_insert(order: &mut Vec<InitiativeEntry>, entry: InitiativeEntry) -> usize {
    let index = order
        .binary_search_by(|probe| compare_entries(probe, &entry))
        .unwrap_or_else(|i| i);
    order.insert(index, entry);
    index
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub active_creature_id: CreatureId,
    pub turn_phase: TurnPhase,
    pub turn_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub round_number: u32,
    pub is_surprise_round: bool,
    pub initiative_order: Vec<InitiativeEntry>,
    pub surprised_creatures: HashSet<CreatureId>,
    pub delayed_creatures: HashMap<CreatureId, InitiativeEntry>,
    pub current_turn: Option<TurnState>,
}

impl RoundState {
    fn entry_index(&self, creature_id: CreatureId) -> Option<usize> {
        self.initiative_order
            .iter()
            .position(|e| e.creature_id == creature_id)
    }
}

/// Builds the initial `RoundState` from a sorted (or unsorted — it is
/// re-sorted here) list of entries and the set of creatures who start
/// surprised. If `surprised_creatures` is non-empty the encounter opens on
/// round 0 in a surprise round; `current_turn` points at the first entry
/// not in that set.
pub fn initialize(
    mut entries: Vec<InitiativeEntry>,
    surprised_creatures: HashSet<CreatureId>,
) -> Result<RoundState, InvalidState> {
    if entries.is_empty() {
        return Err(InvalidState::EmptyInitiativeOrder);
    }
    entries.sort_by(compare_entries);

    let is_surprise_round = !surprised_creatures.is_empty();
    let round_number = if is_surprise_round { 0 } else { 1 };

    let first_active = entries
        .iter()
        .position(|e| !surprised_creatures.contains(&e.creature_id));
    let current_turn = match first_active {
        Some(turn_index) => Some(TurnState {
            active_creature_id: entries[turn_index].creature_id,
            turn_phase: TurnPhase::start_turn(entries[turn_index].creature_id, DEFAULT_SPEED_FT),
            turn_index,
        }),
        None => return Err(InvalidState::EmptyInitiativeOrder),
    };

    Ok(RoundState {
        round_number,
        is_surprise_round,
        initiative_order: entries,
        surprised_creatures,
        delayed_creatures: HashMap::new(),
        current_turn,
    })
}

/// Seats `next_index` of `order` as the active turn, skipping forward past
/// any still-surprised creature the same way a normal advance would.
/// Shared by `advance_turn` and `delay_turn`, both of which resolve their
/// own wraparound/round-increment decision before handing off here.
fn seat_turn(
    order: Vec<InitiativeEntry>,
    delayed_creatures: HashMap<CreatureId, InitiativeEntry>,
    next_index: usize,
    round_number: u32,
    is_surprise_round: bool,
    surprised_creatures: HashSet<CreatureId>,
) -> Result<RoundState, InvalidState> {
    let next_creature_id = order[next_index].creature_id;
    if is_surprise_round && surprised_creatures.contains(&next_creature_id) {
        let mut following = next_index + 1;
        let mut round_number = round_number;
        let mut is_surprise_round = is_surprise_round;
        let mut surprised_creatures = surprised_creatures;
        if following >= order.len() {
            following = 0;
            if is_surprise_round {
                is_surprise_round = false;
                surprised_creatures.clear();
                round_number = 1;
            } else {
                round_number += 1;
            }
        }
        return seat_turn(order, delayed_creatures, following, round_number, is_surprise_round, surprised_creatures);
    }

    Ok(RoundState {
        round_number,
        is_surprise_round,
        surprised_creatures,
        delayed_creatures,
        current_turn: Some(TurnState {
            active_creature_id: next_creature_id,
            turn_phase: TurnPhase::start_turn(next_creature_id, DEFAULT_SPEED_FT),
            turn_index: next_index,
        }),
        initiative_order: order,
    })
}

/// Advances to the next non-surprised creature, per §4.6's state machine.
pub fn advance_turn(state: &RoundState) -> Result<RoundState, InvalidState> {
    if state.initiative_order.is_empty() {
        return Err(InvalidState::EmptyInitiativeOrder);
    }
    let current = state
        .current_turn
        .as_ref()
        .ok_or(InvalidState::NoActiveTurn)?;
    if current.turn_index >= state.initiative_order.len() {
        return Err(InvalidState::TurnIndexOutOfBounds {
            index: current.turn_index,
            len: state.initiative_order.len(),
        });
    }

    let mut next_index = current.turn_index + 1;
    let mut round_number = state.round_number;
    let mut is_surprise_round = state.is_surprise_round;
    let mut surprised_creatures = state.surprised_creatures.clone();

    if next_index >= state.initiative_order.len() {
        next_index = 0;
        if is_surprise_round {
            is_surprise_round = false;
            surprised_creatures.clear();
            round_number = 1;
        } else {
            round_number += 1;
        }
    }

    seat_turn(
        state.initiative_order.clone(),
        state.delayed_creatures.clone(),
        next_index,
        round_number,
        is_surprise_round,
        surprised_creatures,
    )
}

/// Sort-inserts `entry`; if the insertion index falls at or before the
/// current turn index, the index is bumped so the active creature stays
/// active.
pub fn add_creature(state: &RoundState, entry: InitiativeEntry) -> Result<RoundState, InvalidState> {
    let mut order = state.initiative_order.clone();
    let insert_index = sorted_insert(&mut order, entry);

    let current_turn = state.current_turn.as_ref().map(|turn| {
        let mut turn = turn.clone();
        if insert_index <= turn.turn_index {
            turn.turn_index += 1;
        }
        turn
    });

    Ok(RoundState {
        round_number: state.round_number,
        is_surprise_round: state.is_surprise_round,
        initiative_order: order,
        surprised_creatures: state.surprised_creatures.clone(),
        delayed_creatures: state.delayed_creatures.clone(),
        current_turn,
    })
}

/// Drops `creature_id` from the order. If it preceded the active turn, the
/// turn index is decremented; if it *was* active, the current turn is
/// cleared for the caller to issue the next `TurnStarted`.
pub fn remove_creature(state: &RoundState, creature_id: CreatureId) -> Result<RoundState, InvalidState> {
    let removed_index = state
        .entry_index(creature_id)
        .ok_or(InvalidState::UnknownCreature { creature_id })?;

    let mut order = state.initiative_order.clone();
    order.remove(removed_index);

    let current_turn = if order.is_empty() {
        None
    } else {
        match &state.current_turn {
            None => None,
            Some(turn) if turn.active_creature_id == creature_id => None,
            Some(turn) => {
                let mut turn = turn.clone();
                if removed_index < turn.turn_index {
                    turn.turn_index -= 1;
                }
                Some(turn)
            }
        }
    };

    Ok(RoundState {
        round_number: state.round_number,
        is_surprise_round: state.is_surprise_round,
        initiative_order: order,
        surprised_creatures: state.surprised_creatures.clone(),
        delayed_creatures: state.delayed_creatures.clone(),
        current_turn,
    })
}

/// Moves `creature_id`'s entry into `delayed_creatures`. If it was active,
/// the turn advances to the next creature.
pub fn delay_turn(state: &RoundState, creature_id: CreatureId) -> Result<RoundState, InvalidState> {
    let index = state
        .entry_index(creature_id)
        .ok_or(InvalidState::UnknownCreature { creature_id })?;

    let mut order = state.initiative_order.clone();
    let entry = order.remove(index);
    let mut delayed_creatures = state.delayed_creatures.clone();
    delayed_creatures.insert(creature_id, entry);

    let was_active = state
        .current_turn
        .as_ref()
        .is_some_and(|t| t.active_creature_id == creature_id);

    if was_active {
        if order.is_empty() {
            return Err(InvalidState::EmptyInitiativeOrder);
        }
        // Removing `index` shifts every later entry left by one, so the
        // entry that now occupies `index` is the one that was next up —
        // unless `index` was the last slot, in which case nothing shifted
        // into it and the turn genuinely wraps to the front of the round.
        let old_len = state.initiative_order.len();
        let (next_index, round_number, is_surprise_round, surprised_creatures) = if index + 1 >= old_len {
            if state.is_surprise_round {
                (0, 1, false, HashSet::new())
            } else {
                (0, state.round_number + 1, state.is_surprise_round, state.surprised_creatures.clone())
            }
        } else {
            (index, state.round_number, state.is_surprise_round, state.surprised_creatures.clone())
        };
        return seat_turn(order, delayed_creatures, next_index, round_number, is_surprise_round, surprised_creatures);
    }

    let current_turn = match &state.current_turn {
        Some(turn) if index < turn.turn_index => Some(TurnState {
            turn_index: turn.turn_index - 1,
            ..turn.clone()
        }),
        other => other.clone(),
    };

    Ok(RoundState {
        round_number: state.round_number,
        is_surprise_round: state.is_surprise_round,
        initiative_order: order,
        surprised_creatures: state.surprised_creatures.clone(),
        delayed_creatures,
        current_turn,
    })
}

/// Removes `creature_id` from `delayed_creatures` and reinserts it
/// immediately after the current turn position with a fresh total of
/// `new_initiative`.
pub fn resume_delayed_turn(
    state: &RoundState,
    creature_id: CreatureId,
    new_initiative: i32,
) -> Result<RoundState, InvalidState> {
    let mut delayed_creatures = state.delayed_creatures.clone();
    let previous = delayed_creatures
        .remove(&creature_id)
        .ok_or(InvalidState::UnknownCreature { creature_id })?;

    let entry = InitiativeEntry::new(creature_id, new_initiative - previous.modifier, previous.modifier);

    let current_index = state
        .current_turn
        .as_ref()
        .map(|t| t.turn_index)
        .unwrap_or(0);

    let mut order = state.initiative_order.clone();
    let insert_at = (current_index + 1).min(order.len());
    order.insert(insert_at, entry);

    let current_turn = state.current_turn.clone();

    Ok(RoundState {
        round_number: state.round_number,
        is_surprise_round: state.is_surprise_round,
        initiative_order: order,
        surprised_creatures: state.surprised_creatures.clone(),
        delayed_creatures,
        current_turn,
    })
}
