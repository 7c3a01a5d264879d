//! Creature (§3.3). Narrowed from the reference simulator's
//! `model/creature.rs`, which carries a string id, save-bonus floats, and a
//! free-form buff/resource map sized for batch DPR simulation. The spec's
//! creature is a plain combat participant: integer id, the six ability
//! scores, and the closed `Condition` set.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::InvalidArgument;
use crate::values::{Abilities, Condition, CreatureId, GridPos};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub name: String,
    pub armor_class: i32,
    pub hp_current: i32,
    pub hp_max: i32,
    pub speed: u32,
    pub proficiency_bonus: u32,
    pub abilities: Abilities,
    #[serde(default)]
    pub conditions: HashSet<Condition>,
    pub position: GridPos,
}

impl Creature {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: CreatureId,
        name: impl Into<String>,
        armor_class: i32,
        hp_current: i32,
        hp_max: i32,
        speed: u32,
        proficiency_bonus: u32,
        abilities: Abilities,
        position: GridPos,
    ) -> Result<Self, InvalidArgument> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidArgument::Empty {
                what: "Creature.name".to_string(),
            });
        }
        if armor_class < 1 {
            return Err(InvalidArgument::OutOfBounds {
                what: "Creature.armor_class".to_string(),
                value: armor_class,
                min: 1,
                max: i32::MAX,
            });
        }
        if hp_max < 1 {
            return Err(InvalidArgument::OutOfBounds {
                what: "Creature.hp_max".to_string(),
                value: hp_max,
                min: 1,
                max: i32::MAX,
            });
        }
        if hp_current < 0 || hp_current > hp_max {
            return Err(InvalidArgument::HpExceedsMax { hp_current, hp_max });
        }
        Ok(Self {
            id,
            name,
            armor_class,
            hp_current,
            hp_max,
            speed,
            proficiency_bonus,
            abilities,
            conditions: HashSet::new(),
            position,
        })
    }

    pub fn is_alive(&self) -> bool {
        self.hp_current > 0
    }

    pub fn is_bloodied(&self) -> bool {
        self.hp_current <= self.hp_max / 2
    }

    pub fn has_condition(&self, condition: Condition) -> bool {
        self.conditions.contains(&condition)
    }

    pub fn is_categorically_blocked(&self) -> bool {
        self.conditions
            .iter()
            .any(|c| c.categorically_blocks_actions())
    }
}
