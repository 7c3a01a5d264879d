//! The seed scenarios from §8, driven end to end through the public API:
//! validate, dispatch, and inspect the emitted events — the same path the
//! CLI binary takes.

use std::collections::HashMap;

use combat_core::action::{ActionContext, GameAction, ReadiedAction, ValidationResult};
use combat_core::creature::Creature;
use combat_core::dice::DiceEngine;
use combat_core::events::Event;
use combat_core::grid::MapGrid;
use combat_core::handlers;
use combat_core::turn_phase::TurnPhase;
use combat_core::validation::validate_action;
use combat_core::values::{Abilities, CreatureId, GridPos};

fn creature(id: CreatureId, ac: i32, hp: i32, pos: GridPos) -> Creature {
    Creature::new(
        id,
        format!("Creature {id}"),
        ac,
        hp,
        hp,
        30,
        2,
        Abilities::new(10, 10, 10, 10, 10, 10).unwrap(),
        pos,
    )
    .unwrap()
}

#[test]
fn straight_line_attack_matches_seed_scenario_one() {
    let mut creatures = HashMap::new();
    creatures.insert(1, creature(1, 15, 20, GridPos::new(0, 0)));
    creatures.insert(2, creature(2, 15, 7, GridPos::new(1, 0)));
    let grid = MapGrid::new(20, 20).unwrap();
    let phase = TurnPhase::start_turn(1, 30);
    let readied: HashMap<CreatureId, ReadiedAction> = HashMap::new();
    let mut dice = DiceEngine::new(42);

    let ctx = ActionContext {
        session_id: 1,
        round_number: 1,
        turn_phase: &phase,
        creatures: &creatures,
        grid: &grid,
        readied_actions: &readied,
        bonus_action_spell_cast_this_turn: false,
    };

    let action = GameAction::Attack {
        actor_id: 1,
        target_id: 2,
        attack_bonus: 5,
        damage_dice_count: 1,
        damage_die_sides: 8,
        damage_modifier: 3,
        range_ft: 5,
    };

    assert!(matches!(validate_action(&action, &ctx), ValidationResult::Valid));
    let (events, _phase) = handlers::dispatch(1, 0, &action, &phase, &grid, &mut creatures.clone(), &mut dice);

    let resolved = events
        .iter()
        .find_map(|e| match e {
            Event::AttackResolved { hit, .. } => Some(*hit),
            _ => None,
        })
        .expect("attack emits AttackResolved");
    assert!(resolved);

    let damage = events.iter().find_map(|e| match e {
        Event::DamageApplied {
            hp_before,
            hp_after,
            ..
        } => Some((*hp_before, *hp_after)),
        _ => None,
    });
    assert!(damage.is_some());
    let (hp_before, hp_after) = damage.unwrap();
    assert!(hp_after < hp_before);
}

#[test]
fn dodge_then_disengage_then_move_matches_seed_scenario_five() {
    let mut creatures = HashMap::new();
    creatures.insert(1, creature(1, 15, 20, GridPos::new(0, 0)));
    let grid = MapGrid::new(20, 20).unwrap();
    let readied: HashMap<CreatureId, ReadiedAction> = HashMap::new();
    let mut dice = DiceEngine::new(1);

    let mut phase = TurnPhase::start_turn(1, 30);

    let dodge = GameAction::Dodge { actor_id: 1 };
    {
        let ctx = ActionContext {
            session_id: 1,
            round_number: 1,
            turn_phase: &phase,
            creatures: &creatures,
            grid: &grid,
            readied_actions: &readied,
            bonus_action_spell_cast_this_turn: false,
        };
        assert!(matches!(validate_action(&dodge, &ctx), ValidationResult::Valid));
        let (events, new_phase) = handlers::dispatch(1, 0, &dodge, &phase, &grid, &mut creatures, &mut dice);
        assert!(events.iter().any(|e| matches!(e, Event::DodgeAction { .. })));
        phase = new_phase;
    }

    let disengage = GameAction::Disengage { actor_id: 1 };
    {
        let ctx = ActionContext {
            session_id: 1,
            round_number: 1,
            turn_phase: &phase,
            creatures: &creatures,
            grid: &grid,
            readied_actions: &readied,
            bonus_action_spell_cast_this_turn: false,
        };
        // the action phase is already spent on Dodge, so Disengage is rejected.
        assert!(matches!(
            validate_action(&disengage, &ctx),
            ValidationResult::Invalid { .. }
        ));
    }

    let path = vec![GridPos::new(0, 0), GridPos::new(1, 0), GridPos::new(2, 0)];
    let move_action = GameAction::Move {
        actor_id: 1,
        path: path.clone(),
    };
    {
        let ctx = ActionContext {
            session_id: 1,
            round_number: 1,
            turn_phase: &phase,
            creatures: &creatures,
            grid: &grid,
            readied_actions: &readied,
            bonus_action_spell_cast_this_turn: false,
        };
        assert!(matches!(validate_action(&move_action, &ctx), ValidationResult::Valid));
        let (events, _phase) = handlers::dispatch(1, 0, &move_action, &phase, &grid, &mut creatures, &mut dice);
        assert!(events.iter().any(|e| matches!(e, Event::MoveCommitted { .. })));
    }
}
