//! Action handler dispatch (§4.9). Each submodule owns one handler family;
//! `dispatch` routes a validated `GameAction` to the matching one and
//! returns its events plus the `TurnPhase` the action leaves behind.

pub mod attack;
pub mod movement;
pub mod reaction;
pub mod special;
pub mod spell;

use std::collections::HashMap;

use crate::action::GameAction;
use crate::creature::Creature;
use crate::dice::DiceEngine;
use crate::events::{Event, SessionId};
use crate::grid::MapGrid;
use crate::turn_phase::TurnPhase;

/// Dispatches an already-`Valid` action. Callers run this only after
/// `validation::validate_action` returns `ValidationResult::Valid`.
///
/// Takes `grid` and `turn_phase` directly rather than a full
/// `ActionContext`: the context's `creatures` field borrows the same map
/// this function needs to mutate, and a caller cannot hold both borrows at
/// once.
pub fn dispatch(
    session_id: SessionId,
    timestamp: i64,
    action: &GameAction,
    turn_phase: &TurnPhase,
    grid: &MapGrid,
    creatures: &mut HashMap<crate::values::CreatureId, Creature>,
    dice: &mut DiceEngine,
) -> (Vec<Event>, TurnPhase) {
    match action {
        GameAction::Attack {
            actor_id,
            target_id,
            attack_bonus,
            damage_dice_count,
            damage_die_sides,
            damage_modifier,
            ..
        } => {
            let phase = turn_phase.consume_action().unwrap_or(*turn_phase);
            let (target_ac, hp_current) = creatures
                .get(target_id)
                .map(|c| (c.armor_class, c.hp_current))
                .unwrap_or((10, 0));
            let (events, hp_after) = attack::resolve_attack(
                session_id,
                timestamp,
                *actor_id,
                *target_id,
                *attack_bonus,
                *damage_dice_count,
                *damage_die_sides,
                *damage_modifier,
                target_ac,
                hp_current,
                dice,
            );
            if let Some(target) = creatures.get_mut(target_id) {
                target.hp_current = hp_after;
            }
            (events, phase)
        }
        GameAction::OpportunityAttack {
            actor_id,
            target_id,
            attack_bonus,
            damage_dice_count,
            damage_die_sides,
            damage_modifier,
        } => {
            let phase = turn_phase.consume_reaction().unwrap_or(*turn_phase);
            let events = reaction::resolve_opportunity_attack(
                session_id,
                timestamp,
                *actor_id,
                *target_id,
                *attack_bonus,
                *damage_dice_count,
                *damage_die_sides,
                *damage_modifier,
                creatures,
                dice,
            );
            (events, phase)
        }
        GameAction::CastSpell {
            actor_id,
            spell_id,
            spell_level,
            uses_bonus_action,
            targets,
            effect,
            ..
        } => {
            let phase = if *uses_bonus_action {
                turn_phase
                    .consume_bonus_action(true)
                    .unwrap_or(*turn_phase)
            } else {
                turn_phase.consume_action().unwrap_or(*turn_phase)
            };
            let events = spell::handle_spell_cast(
                session_id,
                timestamp,
                *actor_id,
                spell_id,
                *spell_level,
                targets,
                effect,
                *uses_bonus_action,
                creatures,
                dice,
            );
            (events, phase)
        }
        GameAction::Move { actor_id, path } => {
            let cost_ft = crate::pathfinder::PathValidator::cost_ft(path, grid);
            let phase = turn_phase.consume_movement(cost_ft).unwrap_or(*turn_phase);
            let events = movement::handle_move(
                session_id,
                timestamp,
                *actor_id,
                path.clone(),
                cost_ft,
                phase.movement_remaining_ft,
            );
            (events, phase)
        }
        GameAction::Dash { .. } => {
            let phase = turn_phase.consume_action().unwrap_or(*turn_phase);
            let doubled = TurnPhase {
                movement_remaining_ft: phase.movement_remaining_ft * 2,
                ..phase
            };
            (Vec::new(), doubled)
        }
        GameAction::Reaction { actor_id, trigger } => {
            let phase = turn_phase.consume_reaction().unwrap_or(*turn_phase);
            let events = vec![Event::ReactionUsed {
                session_id,
                timestamp,
                reactor_id: *actor_id,
                trigger: trigger.clone(),
            }];
            (events, phase)
        }
        GameAction::Dodge { .. } | GameAction::Disengage { .. } | GameAction::Help { .. } | GameAction::Ready { .. } => {
            let phase = turn_phase.consume_action().unwrap_or(*turn_phase);
            let events = special::handle_special(session_id, timestamp, action);
            (events, phase)
        }
    }
}
