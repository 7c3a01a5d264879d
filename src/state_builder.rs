//! The event fold (§4.10): `build_state(events) -> RoundState`. Starts from
//! an empty state and applies each event in order; only the events listed
//! in the fold table affect initiative runtime state, everything else
//! belongs to a separate projection (HP, conditions, spells).

use std::collections::HashSet;

use crate::events::Event;
use crate::initiative::{self, InitiativeEntry, RoundState};
use crate::turn_phase::TurnPhase;

/// Folds `events` into a `RoundState`, starting empty. Events that would
/// put the tracker into an invalid state (e.g. `TurnDelayed` for a creature
/// not in the order) are skipped rather than aborting the whole fold, since
/// a replayed log is assumed to already be consistent and a stray event
/// should not take down the projection.
pub fn build_state(events: &[Event]) -> RoundState {
    let mut state = RoundState {
        round_number: 0,
        is_surprise_round: false,
        initiative_order: Vec::new(),
        surprised_creatures: HashSet::new(),
        delayed_creatures: std::collections::HashMap::new(),
        current_turn: None,
    };

    for event in events {
        state = apply(state, event);
    }
    state
}

fn apply(state: RoundState, event: &Event) -> RoundState {
    match event {
        Event::EncounterStarted {
            initiative_order,
            surprised_creatures,
            ..
        } => initiative::initialize(
            initiative_order.clone(),
            surprised_creatures.iter().copied().collect(),
        )
        .unwrap_or(state),

        Event::RoundStarted { round_number, .. } => {
            let mut next = state.clone();
            next.round_number = *round_number;
            if !next.is_surprise_round {
                next.surprised_creatures.clear();
            }
            next
        }

        Event::TurnStarted {
            creature_id,
            turn_index,
            speed_ft,
            ..
        } => {
            if state.entry_index(*creature_id).is_none() {
                return state;
            }
            let mut next = state.clone();
            next.current_turn = Some(crate::initiative::TurnState {
                active_creature_id: *creature_id,
                turn_phase: TurnPhase::start_turn(*creature_id, *speed_ft),
                turn_index: *turn_index,
            });
            next
        }

        Event::TurnEnded { .. } => {
            let mut next = state.clone();
            next.current_turn = None;
            next
        }

        Event::ReactionUsed { reactor_id, .. } => {
            let mut next = state.clone();
            if let Some(turn) = &mut next.current_turn {
                if turn.active_creature_id == *reactor_id {
                    turn.turn_phase = turn.turn_phase.consume_reaction().unwrap_or(turn.turn_phase);
                }
            }
            next
        }

        Event::TurnDelayed { creature_id, .. } => {
            initiative::delay_turn(&state, *creature_id).unwrap_or(state)
        }

        Event::DelayedTurnResumed {
            creature_id,
            new_initiative,
            ..
        } => initiative::resume_delayed_turn(&state, *creature_id, *new_initiative).unwrap_or(state),

        Event::CreatureAddedToCombat { entry, .. } => {
            initiative::add_creature(&state, *entry).unwrap_or(state)
        }

        Event::CreatureRemovedFromCombat { creature_id, .. } => {
            initiative::remove_creature(&state, *creature_id).unwrap_or(state)
        }

        // Everything else (attacks, damage, conditions, spells, special
        // actions, join/leave bookkeeping beyond initiative) is a separate
        // projection's concern.
        _ => state,
    }
}

trait EntryLookup {
    fn entry_index(&self, creature_id: crate::values::CreatureId) -> Option<usize>;
}

impl EntryLookup for RoundState {
    fn entry_index(&self, creature_id: crate::values::CreatureId) -> Option<usize> {
        self.initiative_order
            .iter()
            .position(|e: &InitiativeEntry| e.creature_id == creature_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initiative::InitiativeEntry;

    fn started_events() -> Vec<Event> {
        vec![Event::EncounterStarted {
            session_id: 1,
            timestamp: 0,
            initiative_order: vec![
                InitiativeEntry::new(1, 15, 3),
                InitiativeEntry::new(2, 10, 3),
            ],
            surprised_creatures: vec![],
        }]
    }

    #[test]
    fn empty_log_yields_empty_round_state() {
        let state = build_state(&[]);
        assert_eq!(state.round_number, 0);
        assert!(state.initiative_order.is_empty());
    }

    #[test]
    fn encounter_started_seeds_the_initiative_order() {
        let state = build_state(&started_events());
        assert_eq!(state.initiative_order.len(), 2);
        assert_eq!(state.current_turn.as_ref().unwrap().active_creature_id, 1);
    }

    #[test]
    fn turn_ended_clears_current_turn() {
        let mut events = started_events();
        events.push(Event::TurnEnded {
            session_id: 1,
            timestamp: 1,
            creature_id: 1,
        });
        let state = build_state(&events);
        assert!(state.current_turn.is_none());
    }

    #[test]
    fn replaying_the_same_log_twice_yields_the_same_state() {
        let events = started_events();
        let a = build_state(&events);
        let b = build_state(&events);
        assert_eq!(a, b);
    }

    #[test]
    fn creature_removed_from_combat_shrinks_the_order() {
        let mut events = started_events();
        events.push(Event::CreatureRemovedFromCombat {
            session_id: 1,
            timestamp: 1,
            creature_id: 2,
        });
        let state = build_state(&events);
        assert_eq!(state.initiative_order.len(), 1);
    }
}
