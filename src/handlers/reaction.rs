//! The reaction handler (§4.9 ReactionHandler): given a trigger, finds
//! candidate reactors (opportunity-attack threats, owners of matching
//! readied actions), resolves each in initiative order, and always emits
//! `ReactionUsed`.

use std::collections::HashMap;

use crate::action::{ActionContext, ReactionTrigger, ReadiedAction};
use crate::creature::Creature;
use crate::dice::DiceEngine;
use crate::events::{Event, SessionId};
use crate::values::CreatureId;

use super::attack::resolve_attack;
use super::movement::opportunity_attack_triggers;

/// Candidate reactors for `trigger`, already filtered by reaction
/// availability, in ascending `CreatureId` order (a stand-in for initiative
/// order until the caller supplies the live `RoundState`).
pub fn candidate_reactors(
    trigger: &ReactionTrigger,
    ctx: &ActionContext,
    reaction_available: &HashMap<CreatureId, bool>,
) -> Vec<CreatureId> {
    let mut candidates = match trigger {
        ReactionTrigger::CreatureMoved { mover_id, .. } => {
            let path_positions: Vec<_> = ctx
                .creatures
                .get(mover_id)
                .map(|m| vec![m.position])
                .unwrap_or_default();
            opportunity_attack_triggers(*mover_id, &path_positions, ctx.creatures, false)
        }
        ReactionTrigger::AttackMade { .. } | ReactionTrigger::SpellCast { .. } => Vec::new(),
        ReactionTrigger::TriggerConditionMet { description } => ctx
            .readied_actions
            .values()
            .filter(|r: &&ReadiedAction| &r.trigger == description)
            .map(|r| r.creature_id)
            .collect(),
    };
    candidates.retain(|id| *reaction_available.get(id).unwrap_or(&false));
    candidates.sort();
    candidates
}

/// Resolves one opportunity attack for `reactor_id` against `target_id`,
/// always emitting `ReactionUsed` alongside whatever the attack produced.
#[allow(clippy::too_many_arguments)]
pub fn resolve_opportunity_attack(
    session_id: SessionId,
    timestamp: i64,
    reactor_id: CreatureId,
    target_id: CreatureId,
    attack_bonus: i32,
    damage_dice_count: u32,
    damage_die_sides: u32,
    damage_modifier: i32,
    creatures: &mut HashMap<CreatureId, Creature>,
    dice: &mut DiceEngine,
) -> Vec<Event> {
    let mut events = vec![Event::ReactionUsed {
        session_id,
        timestamp,
        reactor_id,
        trigger: "opportunity_attack".to_string(),
    }];

    let Some(target) = creatures.get(&target_id) else {
        return events;
    };
    let (target_ac, hp_current) = (target.armor_class, target.hp_current);

    let (attack_events, hp_after) = resolve_attack(
        session_id,
        timestamp,
        reactor_id,
        target_id,
        attack_bonus,
        damage_dice_count,
        damage_die_sides,
        damage_modifier,
        target_ac,
        hp_current,
        dice,
    );
    if let Some(target) = creatures.get_mut(&target_id) {
        target.hp_current = hp_after;
    }
    events.extend(attack_events);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::MapGrid;
    use crate::turn_phase::TurnPhase;
    use crate::values::{Abilities, GridPos};

    fn creature(id: CreatureId, pos: GridPos) -> Creature {
        Creature::new(
            id,
            format!("C{id}"),
            13,
            10,
            10,
            30,
            2,
            Abilities::new(10, 10, 10, 10, 10, 10).unwrap(),
            pos,
        )
        .unwrap()
    }

    #[test]
    fn readied_action_candidate_matches_trigger_string() {
        let mut creatures = HashMap::new();
        creatures.insert(1, creature(1, GridPos::new(0, 0)));
        creatures.insert(2, creature(2, GridPos::new(5, 5)));
        let grid = MapGrid::new(20, 20).unwrap();
        let phase = TurnPhase::start_turn(1, 30);
        let mut readied = HashMap::new();
        readied.insert(
            2,
            ReadiedAction {
                creature_id: 2,
                trigger: "enemy casts a spell".to_string(),
                prepared_action_description: "counterspell".to_string(),
            },
        );
        let ctx = ActionContext {
            session_id: 1,
            round_number: 1,
            turn_phase: &phase,
            creatures: &creatures,
            grid: &grid,
            readied_actions: &readied,
            bonus_action_spell_cast_this_turn: false,
        };
        let mut available = HashMap::new();
        available.insert(2, true);

        let trigger = ReactionTrigger::TriggerConditionMet {
            description: "enemy casts a spell".to_string(),
        };
        let candidates = candidate_reactors(&trigger, &ctx, &available);
        assert_eq!(candidates, vec![2]);
    }

    #[test]
    fn reaction_unavailable_creature_is_never_a_candidate() {
        let mut creatures = HashMap::new();
        creatures.insert(1, creature(1, GridPos::new(0, 0)));
        let grid = MapGrid::new(20, 20).unwrap();
        let phase = TurnPhase::start_turn(1, 30);
        let readied = HashMap::new();
        let ctx = ActionContext {
            session_id: 1,
            round_number: 1,
            turn_phase: &phase,
            creatures: &creatures,
            grid: &grid,
            readied_actions: &readied,
            bonus_action_spell_cast_this_turn: false,
        };
        let available = HashMap::new();
        let trigger = ReactionTrigger::TriggerConditionMet {
            description: "anything".to_string(),
        };
        assert!(candidate_reactors(&trigger, &ctx, &available).is_empty());
    }

    #[test]
    fn opportunity_attack_always_emits_reaction_used() {
        let mut creatures = HashMap::new();
        creatures.insert(2, creature(2, GridPos::new(0, 0)));
        let mut dice = DiceEngine::new(5);
        let events =
            resolve_opportunity_attack(1, 0, 1, 2, 5, 1, 8, 3, &mut creatures, &mut dice);
        assert!(matches!(events[0], Event::ReactionUsed { .. }));
    }
}
