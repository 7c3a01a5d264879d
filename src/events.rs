//! The closed event family (§3.5). Grounded in the reference simulator's
//! `events.rs`, which pairs a large `Event` enum with helper accessors and
//! an `EventBus`; here the variant set is the spec's closed 22-member list
//! rather than the reference simulator's open-ended combat log, and the
//! accessors are narrowed to what the state builder (§4.10) and reaction
//! handler (§4.9) actually need.

use serde::{Deserialize, Serialize};

use crate::initiative::InitiativeEntry;
use crate::values::{Condition, CreatureId, GridPos};

pub type SessionId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "encounter_started")]
    EncounterStarted {
        session_id: SessionId,
        timestamp: i64,
        initiative_order: Vec<InitiativeEntry>,
        surprised_creatures: Vec<CreatureId>,
    },
    #[serde(rename = "round_started")]
    RoundStarted {
        session_id: SessionId,
        timestamp: i64,
        round_number: u32,
    },
    #[serde(rename = "turn_started")]
    TurnStarted {
        session_id: SessionId,
        timestamp: i64,
        creature_id: CreatureId,
        turn_index: usize,
        speed_ft: u32,
    },
    #[serde(rename = "turn_ended")]
    TurnEnded {
        session_id: SessionId,
        timestamp: i64,
        creature_id: CreatureId,
    },
    #[serde(rename = "encounter_ended")]
    EncounterEnded {
        session_id: SessionId,
        timestamp: i64,
        reason: String,
    },
    #[serde(rename = "attack_resolved")]
    AttackResolved {
        session_id: SessionId,
        timestamp: i64,
        attacker_id: CreatureId,
        target_id: CreatureId,
        attack_roll: i32,
        target_ac: i32,
        hit: bool,
        critical: bool,
    },
    #[serde(rename = "damage_applied")]
    DamageApplied {
        session_id: SessionId,
        timestamp: i64,
        target_id: CreatureId,
        amount: i32,
        hp_before: i32,
        hp_after: i32,
    },
    #[serde(rename = "condition_applied")]
    ConditionApplied {
        session_id: SessionId,
        timestamp: i64,
        target_id: CreatureId,
        condition: Condition,
    },
    #[serde(rename = "condition_removed")]
    ConditionRemoved {
        session_id: SessionId,
        timestamp: i64,
        target_id: CreatureId,
        condition: Condition,
    },
    #[serde(rename = "move_committed")]
    MoveCommitted {
        session_id: SessionId,
        timestamp: i64,
        creature_id: CreatureId,
        path: Vec<GridPos>,
        movement_used: u32,
        movement_remaining: u32,
    },
    #[serde(rename = "reaction_used")]
    ReactionUsed {
        session_id: SessionId,
        timestamp: i64,
        reactor_id: CreatureId,
        trigger: String,
    },
    #[serde(rename = "turn_delayed")]
    TurnDelayed {
        session_id: SessionId,
        timestamp: i64,
        creature_id: CreatureId,
    },
    #[serde(rename = "delayed_turn_resumed")]
    DelayedTurnResumed {
        session_id: SessionId,
        timestamp: i64,
        creature_id: CreatureId,
        new_initiative: i32,
    },
    #[serde(rename = "creature_added_to_combat")]
    CreatureAddedToCombat {
        session_id: SessionId,
        timestamp: i64,
        entry: InitiativeEntry,
    },
    #[serde(rename = "creature_removed_from_combat")]
    CreatureRemovedFromCombat {
        session_id: SessionId,
        timestamp: i64,
        creature_id: CreatureId,
    },
    #[serde(rename = "spell_cast")]
    SpellCast {
        session_id: SessionId,
        timestamp: i64,
        caster_id: CreatureId,
        spell_id: String,
        spell_level: u8,
        slot_consumed: u8,
        targets: Vec<CreatureId>,
        used_bonus_action: bool,
    },
    #[serde(rename = "bonus_action_taken")]
    BonusActionTaken {
        session_id: SessionId,
        timestamp: i64,
        creature_id: CreatureId,
        description: String,
    },
    #[serde(rename = "disengage_action")]
    DisengageAction {
        session_id: SessionId,
        timestamp: i64,
        creature_id: CreatureId,
    },
    #[serde(rename = "dodge_action")]
    DodgeAction {
        session_id: SessionId,
        timestamp: i64,
        creature_id: CreatureId,
    },
    #[serde(rename = "help_action")]
    HelpAction {
        session_id: SessionId,
        timestamp: i64,
        creature_id: CreatureId,
        help_type: String,
        target_id: CreatureId,
    },
    #[serde(rename = "ready_action")]
    ReadyAction {
        session_id: SessionId,
        timestamp: i64,
        creature_id: CreatureId,
        trigger: String,
        prepared_action_description: String,
    },
    #[serde(rename = "creature_defeated")]
    CreatureDefeated {
        session_id: SessionId,
        timestamp: i64,
        creature_id: CreatureId,
    },
}

impl Event {
    pub fn session_id(&self) -> SessionId {
        match self {
            Event::EncounterStarted { session_id, .. }
            | Event::RoundStarted { session_id, .. }
            | Event::TurnStarted { session_id, .. }
            | Event::TurnEnded { session_id, .. }
            | Event::EncounterEnded { session_id, .. }
            | Event::AttackResolved { session_id, .. }
            | Event::DamageApplied { session_id, .. }
            | Event::ConditionApplied { session_id, .. }
            | Event::ConditionRemoved { session_id, .. }
            | Event::MoveCommitted { session_id, .. }
            | Event::ReactionUsed { session_id, .. }
            | Event::TurnDelayed { session_id, .. }
            | Event::DelayedTurnResumed { session_id, .. }
            | Event::CreatureAddedToCombat { session_id, .. }
            | Event::CreatureRemovedFromCombat { session_id, .. }
            | Event::SpellCast { session_id, .. }
            | Event::BonusActionTaken { session_id, .. }
            | Event::DisengageAction { session_id, .. }
            | Event::DodgeAction { session_id, .. }
            | Event::HelpAction { session_id, .. }
            | Event::ReadyAction { session_id, .. }
            | Event::CreatureDefeated { session_id, .. } => *session_id,
        }
    }

    pub fn timestamp(&self) -> i64 {
        match self {
            Event::EncounterStarted { timestamp, .. }
            | Event::RoundStarted { timestamp, .. }
            | Event::TurnStarted { timestamp, .. }
            | Event::TurnEnded { timestamp, .. }
            | Event::EncounterEnded { timestamp, .. }
            | Event::AttackResolved { timestamp, .. }
            | Event::DamageApplied { timestamp, .. }
            | Event::ConditionApplied { timestamp, .. }
            | Event::ConditionRemoved { timestamp, .. }
            | Event::MoveCommitted { timestamp, .. }
            | Event::ReactionUsed { timestamp, .. }
            | Event::TurnDelayed { timestamp, .. }
            | Event::DelayedTurnResumed { timestamp, .. }
            | Event::CreatureAddedToCombat { timestamp, .. }
            | Event::CreatureRemovedFromCombat { timestamp, .. }
            | Event::SpellCast { timestamp, .. }
            | Event::BonusActionTaken { timestamp, .. }
            | Event::DisengageAction { timestamp, .. }
            | Event::DodgeAction { timestamp, .. }
            | Event::HelpAction { timestamp, .. }
            | Event::ReadyAction { timestamp, .. }
            | Event::CreatureDefeated { timestamp, .. } => *timestamp,
        }
    }
}
