//! Spell resolution (§4.9 SpellActionHandler). `Attack` effects reuse
//! [`super::attack::resolve_attack`]; `Save` effects roll an ability save
//! per target; `Utility` effects carry no outcome of their own — their
//! side effects arrive as separate events emitted by the caller.

use std::collections::HashMap;

use crate::action::{Ability, SpellEffect};
use crate::creature::Creature;
use crate::dice::DiceEngine;
use crate::events::{Event, SessionId};
use crate::values::{CreatureId, DieType};

use super::attack::resolve_attack;

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

fn ability_modifier(creature: &Creature, ability: &Ability) -> i32 {
    let abilities = creature.abilities;
    let score = match ability {
        Ability::Strength => abilities.strength,
        Ability::Dexterity => abilities.dexterity,
        Ability::Constitution => abilities.constitution,
        Ability::Intelligence => abilities.intelligence,
        Ability::Wisdom => abilities.wisdom,
        Ability::Charisma => abilities.charisma,
    };
    crate::values::Abilities::modifier(score)
}

#[allow(clippy::too_many_arguments)]
pub fn handle_spell_cast(
    session_id: SessionId,
    timestamp: i64,
    caster_id: CreatureId,
    spell_id: &str,
    spell_level: u8,
    targets: &[CreatureId],
    effect: &SpellEffect,
    uses_bonus_action: bool,
    creatures: &mut HashMap<CreatureId, Creature>,
    dice: &mut DiceEngine,
) -> Vec<Event> {
    let mut events = vec![Event::SpellCast {
        session_id,
        timestamp,
        caster_id,
        spell_id: spell_id.to_string(),
        spell_level,
        slot_consumed: spell_level,
        targets: targets.to_vec(),
        used_bonus_action: uses_bonus_action,
    }];

    if uses_bonus_action {
        events.push(Event::BonusActionTaken {
            session_id,
            timestamp,
            creature_id: caster_id,
            description: format!("cast {spell_id}"),
        });
    }

    match effect {
        SpellEffect::Attack {
            attack_bonus,
            damage_dice_count,
            damage_die_sides,
            damage_modifier,
        } => {
            for &target_id in targets {
                let (target_ac, hp_current) = match creatures.get(&target_id) {
                    Some(c) => (c.armor_class, c.hp_current),
                    None => continue,
                };
                let (attack_events, hp_after) = resolve_attack(
                    session_id,
                    timestamp,
                    caster_id,
                    target_id,
                    *attack_bonus,
                    *damage_dice_count,
                    *damage_die_sides,
                    *damage_modifier,
                    target_ac,
                    hp_current,
                    dice,
                );
                if let Some(target) = creatures.get_mut(&target_id) {
                    target.hp_current = hp_after;
                }
                events.extend(attack_events);
            }
        }
        SpellEffect::Save {
            dc,
            ability,
            half_on_save,
            damage_dice_count,
            damage_die_sides,
            damage_modifier,
        } => {
            for &target_id in targets {
                let Some(target) = creatures.get(&target_id) else {
                    continue;
                };
                let save_modifier = ability_modifier(target, ability);
                let save_roll = dice.d20(save_modifier).total();
                let saved = save_roll >= *dc;

                let die = die_type_from_sides(*damage_die_sides);
                let damage_roll = dice
                    .roll(*damage_dice_count as i32, die, *damage_modifier)
                    .expect("damage_dice_count is always >= 1 for a configured spell");
                let full_damage = damage_roll.total().max(0);
                let amount = if saved {
                    if *half_on_save {
                        full_damage / 2
                    } else {
                        0
                    }
                } else {
                    full_damage
                };

                if amount > 0 {
                    let hp_before = target.hp_current;
                    let hp_after = (hp_before - amount).max(0);
                    if let Some(target) = creatures.get_mut(&target_id) {
                        target.hp_current = hp_after;
                    }
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
                }
            }
        }
        SpellEffect::Utility => {}
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::values::{Abilities, GridPos};

    fn creature(id: CreatureId, hp: i32) -> Creature {
        Creature::new(
            id,
            format!("Target {id}"),
            13,
            hp,
            hp,
            30,
            2,
            Abilities::new(10, 10, 10, 10, 10, 10).unwrap(),
            GridPos::new(0, 0),
        )
        .unwrap()
    }

    #[test]
    fn save_spell_halves_damage_on_a_success() {
        let mut creatures = HashMap::new();
        creatures.insert(2, creature(2, 20));
        let mut dice = DiceEngine::new(42);

        let effect = SpellEffect::Save {
            dc: 1, // guarantees a save success regardless of the roll
            ability: Ability::Dexterity,
            half_on_save: true,
            damage_dice_count: 8,
            damage_die_sides: 6,
            damage_modifier: 0,
        };
        let events = handle_spell_cast(
            1, 0, 1, "fireball", 3, &[2], &effect, false, &mut creatures, &mut dice,
        );
        assert!(events.iter().any(|e| matches!(e, Event::SpellCast { .. })));
        if let Some(Event::DamageApplied { amount, .. }) =
            events.iter().find(|e| matches!(e, Event::DamageApplied { .. }))
        {
            assert!(*amount < 48);
        }
    }

    #[test]
    fn bonus_action_spell_emits_bonus_action_taken() {
        let mut creatures = HashMap::new();
        let mut dice = DiceEngine::new(7);
        let events = handle_spell_cast(
            1,
            0,
            1,
            "healing_word",
            1,
            &[],
            &SpellEffect::Utility,
            true,
            &mut creatures,
            &mut dice,
        );
        assert!(events.iter().any(|e| matches!(e, Event::BonusActionTaken { .. })));
    }

    #[test]
    fn utility_spell_has_no_damage_outcome() {
        let mut creatures = HashMap::new();
        let mut dice = DiceEngine::new(9);
        let events = handle_spell_cast(
            1,
            0,
            1,
            "detect_magic",
            1,
            &[],
            &SpellEffect::Utility,
            false,
            &mut creatures,
            &mut dice,
        );
        assert!(!events.iter().any(|e| matches!(e, Event::DamageApplied { .. })));
    }
}
