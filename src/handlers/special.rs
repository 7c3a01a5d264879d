//! Dodge/Disengage/Help/Ready (§4.9 SpecialActionHandler). Each is a direct
//! one-to-one mapping from `GameAction` to its event, with no dice rolls of
//! its own.

use crate::action::GameAction;
use crate::events::{Event, SessionId};

pub fn handle_special(session_id: SessionId, timestamp: i64, action: &GameAction) -> Vec<Event> {
    match action {
        GameAction::Dodge { actor_id } => vec![Event::DodgeAction {
            session_id,
            timestamp,
            creature_id: *actor_id,
        }],
        GameAction::Disengage { actor_id } => vec![Event::DisengageAction {
            session_id,
            timestamp,
            creature_id: *actor_id,
        }],
        GameAction::Help {
            actor_id,
            target_id,
            help_type,
        } => vec![Event::HelpAction {
            session_id,
            timestamp,
            creature_id: *actor_id,
            help_type: help_type.clone(),
            target_id: *target_id,
        }],
        GameAction::Ready {
            actor_id,
            trigger,
            prepared_action_description,
        } => vec![Event::ReadyAction {
            session_id,
            timestamp,
            creature_id: *actor_id,
            trigger: trigger.clone(),
            prepared_action_description: prepared_action_description.clone(),
        }],
        // Dash has no event of its own in the closed event set: its effect
        // is a `TurnPhase` movement-budget change, applied by the caller
        // before any subsequent `Move` is validated.
        other => panic!("handle_special called with non-special action {other:?}"),
    }
}
