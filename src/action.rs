//! The action data model (§4.8). `GameAction` and `SpellEffect` mirror the
//! reference simulator's `model/action.rs` `#[serde(tag = "type")]` sum
//! type, narrowed to the closed ten-member action set and the three-member
//! spell-effect set this engine needs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::turn_phase::TurnPhase;
use crate::values::{CreatureId, GridPos};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpellEffect {
    Attack {
        attack_bonus: i32,
        damage_dice_count: u32,
        damage_die_sides: u32,
        damage_modifier: i32,
    },
    Save {
        dc: i32,
        ability: Ability,
        half_on_save: bool,
        damage_dice_count: u32,
        damage_die_sides: u32,
        damage_modifier: i32,
    },
    Utility,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameAction {
    #[serde(rename = "move")]
    Move {
        actor_id: CreatureId,
        path: Vec<GridPos>,
    },
    #[serde(rename = "attack")]
    Attack {
        actor_id: CreatureId,
        target_id: CreatureId,
        attack_bonus: i32,
        damage_dice_count: u32,
        damage_die_sides: u32,
        damage_modifier: i32,
        range_ft: i32,
    },
    #[serde(rename = "cast_spell")]
    CastSpell {
        actor_id: CreatureId,
        spell_id: String,
        spell_level: u8,
        range_ft: i32,
        is_touch: bool,
        uses_bonus_action: bool,
        targets: Vec<CreatureId>,
        effect: SpellEffect,
    },
    #[serde(rename = "reaction")]
    Reaction {
        actor_id: CreatureId,
        trigger: String,
    },
    #[serde(rename = "opportunity_attack")]
    OpportunityAttack {
        actor_id: CreatureId,
        target_id: CreatureId,
        attack_bonus: i32,
        damage_dice_count: u32,
        damage_die_sides: u32,
        damage_modifier: i32,
    },
    #[serde(rename = "dash")]
    Dash { actor_id: CreatureId },
    #[serde(rename = "dodge")]
    Dodge { actor_id: CreatureId },
    #[serde(rename = "disengage")]
    Disengage { actor_id: CreatureId },
    #[serde(rename = "help")]
    Help {
        actor_id: CreatureId,
        target_id: CreatureId,
        help_type: String,
    },
    #[serde(rename = "ready")]
    Ready {
        actor_id: CreatureId,
        trigger: String,
        prepared_action_description: String,
    },
}

impl GameAction {
    pub fn actor_id(&self) -> CreatureId {
        match self {
            GameAction::Move { actor_id, .. }
            | GameAction::Attack { actor_id, .. }
            | GameAction::CastSpell { actor_id, .. }
            | GameAction::Reaction { actor_id, .. }
            | GameAction::OpportunityAttack { actor_id, .. }
            | GameAction::Dash { actor_id }
            | GameAction::Dodge { actor_id }
            | GameAction::Disengage { actor_id }
            | GameAction::Help { actor_id, .. }
            | GameAction::Ready { actor_id, .. } => *actor_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadiedAction {
    pub creature_id: CreatureId,
    pub trigger: String,
    pub prepared_action_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReactionTrigger {
    CreatureMoved { mover_id: CreatureId, from: GridPos, to: GridPos },
    AttackMade { attacker_id: CreatureId, target_id: CreatureId },
    SpellCast { caster_id: CreatureId },
    TriggerConditionMet { description: String },
}

/// The full external context a validator/handler call needs: the session,
/// round, the actor's turn phase, every creature in the encounter, the
/// battlefield, each creature's active conditions, and any readied actions
/// awaiting a trigger. Handlers and the validator only ever read this — they
/// never mutate it, matching the event-sourced design where state changes
/// flow out as events, not as in-place writes.
#[derive(Debug, Clone)]
pub struct ActionContext<'a> {
    pub session_id: i64,
    pub round_number: u32,
    pub turn_phase: &'a TurnPhase,
    pub creatures: &'a HashMap<CreatureId, crate::creature::Creature>,
    pub grid: &'a crate::grid::MapGrid,
    pub readied_actions: &'a HashMap<CreatureId, ReadiedAction>,
    pub bonus_action_spell_cast_this_turn: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOption {
    pub description: String,
    pub action: GameAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationResult {
    Valid,
    Invalid { reason: String },
    RequiresChoice { options: Vec<ActionOption> },
}
