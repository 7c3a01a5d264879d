//! Attack resolution (§4.9 AttackActionHandler), shared by weapon attacks,
//! opportunity attacks, and spell `Attack` effects. Grounded in the
//! reference simulator's deleted `action_resolver.rs`, which rolled a d20
//! against AC and doubled damage dice on a natural 20.

use crate::dice::DiceEngine;
use crate::events::{Event, SessionId};
use crate::values::{CreatureId, DieType};

fn die_type_from_sides(sides: u32) -> DieType {
    match sides {
        4 => DieType::D4,
        6 => DieType::D6,
        8 => DieType::D8,
        10 => DieType::D10,
        12 => DieType::D12,
        20 => DieType::D20,
        100 => DieType::D100,
        _ => DieType::D6,
    }
}

/// Rolls the attack, and on a hit rolls damage (doubling dice, not the flat
/// modifier, on a natural 20), applies it to `target_hp_current`, and
/// returns the resulting events plus the target's new HP.
#[allow(clippy::too_many_arguments)]
pub fn resolve_attack(
    session_id: SessionId,
    timestamp: i64,
    attacker_id: CreatureId,
    target_id: CreatureId,
    attack_bonus: i32,
    damage_dice_count: u32,
    damage_die_sides: u32,
    damage_modifier: i32,
    target_ac: i32,
    target_hp_current: i32,
    dice: &mut DiceEngine,
) -> (Vec<Event>, i32) {
    let mut events = Vec::new();
    let attack_roll_result = dice.d20(attack_bonus);
    let natural = attack_roll_result.natural_total();
    let attack_roll = attack_roll_result.total();
    let critical = natural == 20;
    let hit = critical || attack_roll >= target_ac;

    events.push(Event::AttackResolved {
        session_id,
        timestamp,
        attacker_id,
        target_id,
        attack_roll,
        target_ac,
        hit,
        critical,
    });

    if !hit {
        return (events, target_hp_current);
    }

    let die = die_type_from_sides(damage_die_sides);
    let dice_count = if critical {
        damage_dice_count * 2
    } else {
        damage_dice_count
    };
    let damage_roll = dice
        .roll(dice_count as i32, die, damage_modifier)
        .expect("dice_count is always >= 1 for a configured attack");
    let amount = damage_roll.total().max(0);

    let hp_before = target_hp_current;
    let hp_after = (hp_before - amount).max(0);

    events.push(Event::DamageApplied {
        session_id,
        timestamp,
        target_id,
        amount,
        hp_before,
        hp_after,
    });

    if hp_after == 0 && hp_before > 0 {
        events.push(Event::CreatureDefeated {
            session_id,
            timestamp,
            creature_id: target_id,
        });
    }

    (events, hp_after)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_non_critical_miss_emits_only_attack_resolved() {
        let mut dice = DiceEngine::new(1);
        // AC 100 cannot be met except by a natural 20, which always hits.
        let (events, hp_after) = resolve_attack(1, 0, 1, 2, 5, 1, 8, 3, 100, 10, &mut dice);
        let resolved = events
            .iter()
            .find_map(|e| match e {
                Event::AttackResolved { critical, hit, .. } => Some((*critical, *hit)),
                _ => None,
            })
            .unwrap();
        if !resolved.0 {
            assert!(!resolved.1);
            assert_eq!(hp_after, 10);
        }
    }

    #[test]
    fn defeating_a_creature_emits_creature_defeated() {
        let mut dice = DiceEngine::new(2);
        let (events, hp_after) = resolve_attack(1, 0, 1, 2, 100, 4, 6, 10, 5, 1, &mut dice);
        if hp_after == 0 {
            assert!(events.iter().any(|e| matches!(e, Event::CreatureDefeated { .. })));
        }
    }

    #[test]
    fn damage_never_drives_hp_below_zero() {
        let mut dice = DiceEngine::new(3);
        let (_events, hp_after) = resolve_attack(1, 0, 1, 2, 100, 10, 8, 50, 5, 3, &mut dice);
        assert!(hp_after >= 0);
    }
}
