//! The action validator (§4.8): a seven-step pipeline that short-circuits
//! on the first failure. Grounded in the reference simulator's
//! `check_action_requirements`/`check_single_requirement`, which walked a
//! requirement list against a `TurnContext` and an always-false
//! `EnemyInRange` stub; here the requirement list is replaced by a fixed
//! ordered pipeline and `EnemyInRange` becomes a real grid range/
//! line-of-effect check against the context's `MapGrid`.

use crate::action::{ActionContext, GameAction, ValidationResult};
use crate::line_of_effect::has_line_of_effect;
use crate::pathfinder::PathValidator;
use crate::values::{Condition, CreatureId};

const TOUCH_RANGE_FT: i32 = 5;

fn invalid(reason: impl Into<String>) -> ValidationResult {
    ValidationResult::Invalid {
        reason: reason.into(),
    }
}

fn creature_exists(ctx: &ActionContext, id: CreatureId) -> bool {
    ctx.creatures.get(&id).is_some_and(|c| c.is_alive())
}

/// Step 2: categorical condition gates. Prone/Grappled restrict movement or
/// impose rolls elsewhere in the handler layer but never block an action
/// outright.
fn condition_gate_blocks(ctx: &ActionContext, actor_id: CreatureId) -> Option<Condition> {
    ctx.creatures
        .get(&actor_id)
        .and_then(|c| c.conditions.iter().find(|c| c.categorically_blocks_actions()))
        .copied()
}

fn action_economy_ok(ctx: &ActionContext, action: &GameAction) -> Result<(), String> {
    let phase = ctx.turn_phase;
    match action {
        GameAction::Move { .. } => {
            if phase.movement_remaining_ft == 0 {
                return Err("no movement remaining".to_string());
            }
        }
        GameAction::Attack { .. } | GameAction::Dash { .. } | GameAction::Dodge { .. } | GameAction::Disengage { .. } | GameAction::Help { .. } | GameAction::Ready { .. } => {
            if !phase.action_available {
                return Err("action already used this turn".to_string());
            }
        }
        GameAction::CastSpell {
            uses_bonus_action, ..
        } => {
            if *uses_bonus_action {
                if !phase.bonus_action_available {
                    return Err("bonus action already used this turn".to_string());
                }
            } else if !phase.action_available {
                return Err("action already used this turn".to_string());
            }
        }
        GameAction::Reaction { .. } | GameAction::OpportunityAttack { .. } => {
            if !phase.reaction_available {
                return Err("reaction already used this turn".to_string());
            }
        }
    }
    Ok(())
}

/// Step 5: the bonus-action-spell restriction. A leveled spell cast with the
/// action fails if a bonus-action spell already went off this turn; a
/// cantrip is always exempt.
fn bonus_action_spell_restriction_ok(ctx: &ActionContext, action: &GameAction) -> bool {
    match action {
        GameAction::CastSpell {
            uses_bonus_action: false,
            spell_level,
            ..
        } => !ctx.bonus_action_spell_cast_this_turn || *spell_level == 0,
        _ => true,
    }
}

fn range_and_los_ok(ctx: &ActionContext, actor_id: CreatureId, target_id: CreatureId, range_ft: i32, requires_los: bool) -> Result<(), String> {
    if actor_id == target_id {
        return Ok(());
    }
    let actor_pos = ctx.creatures.get(&actor_id).map(|c| c.position);
    let target_pos = ctx.creatures.get(&target_id).map(|c| c.position);
    let (Some(actor_pos), Some(target_pos)) = (actor_pos, target_pos) else {
        return Err("target does not exist".to_string());
    };
    if crate::grid::distance_feet(actor_pos, target_pos) > range_ft {
        return Err("target is out of range".to_string());
    }
    if requires_los && !has_line_of_effect(actor_pos, target_pos, ctx.grid) {
        return Err("line of effect is blocked".to_string());
    }
    Ok(())
}

/// Runs the full seven-step pipeline from §4.8 against `action` and `ctx`,
/// short-circuiting on the first failure.
pub fn validate_action(action: &GameAction, ctx: &ActionContext) -> ValidationResult {
    let actor_id = action.actor_id();

    // 1. Actor/target existence.
    if !creature_exists(ctx, actor_id) {
        return invalid("actor does not exist or is not alive");
    }
    let target_ids: Vec<CreatureId> = match action {
        GameAction::Attack { target_id, .. }
        | GameAction::OpportunityAttack { target_id, .. }
        | GameAction::Help { target_id, .. } => vec![*target_id],
        GameAction::CastSpell { targets, .. } => targets.clone(),
        _ => vec![],
    };
    for target_id in &target_ids {
        if !creature_exists(ctx, *target_id) {
            return invalid("target does not exist or is not alive");
        }
    }

    // 2. Condition gates.
    if let Some(blocking) = condition_gate_blocks(ctx, actor_id) {
        return invalid(format!("actor is {blocking:?} and cannot act"));
    }

    // 3. Action economy.
    if let Err(reason) = action_economy_ok(ctx, action) {
        return invalid(reason);
    }

    // 4. Resources: spell slots / ammo are an external capability this
    // engine does not own; the validator trusts the caller supplied a
    // `CastSpell.spell_level` the actor can still cast, recording the
    // contract here rather than re-deriving it from a resource pool.
    if let GameAction::CastSpell { spell_level, .. } = action {
        if *spell_level > 9 {
            return invalid("spell level exceeds maximum of 9");
        }
    }

    // 5. Bonus-action-spell restriction.
    if !bonus_action_spell_restriction_ok(ctx, action) {
        return invalid("bonus_action_spell_restriction");
    }

    // 6. Range & line-of-effect.
    match action {
        GameAction::Attack {
            target_id, range_ft, ..
        } => {
            if let Err(reason) = range_and_los_ok(ctx, actor_id, *target_id, *range_ft, *range_ft > TOUCH_RANGE_FT) {
                return invalid(reason);
            }
        }
        GameAction::OpportunityAttack { target_id, .. } => {
            if let Err(reason) = range_and_los_ok(ctx, actor_id, *target_id, TOUCH_RANGE_FT, false) {
                return invalid(reason);
            }
        }
        GameAction::CastSpell {
            targets,
            range_ft,
            is_touch,
            ..
        } => {
            let requires_los = !is_touch;
            for target_id in targets {
                if let Err(reason) = range_and_los_ok(ctx, actor_id, *target_id, *range_ft, requires_los) {
                    return invalid(reason);
                }
            }
        }
        GameAction::Help { target_id, .. } => {
            if let Err(reason) = range_and_los_ok(ctx, actor_id, *target_id, TOUCH_RANGE_FT, false) {
                return invalid(reason);
            }
        }
        _ => {}
    }

    // 7. Movement path.
    if let GameAction::Move { path, .. } = action {
        if !PathValidator::within_budget_ft(path, ctx.turn_phase.movement_remaining_ft, ctx.grid) {
            return invalid("path is invalid or exceeds remaining movement");
        }
    }

    ValidationResult::Valid
}
