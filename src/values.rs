//! Plain value types shared by every other module: grid positions, ability
//! scores, status conditions, and dice records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::InvalidArgument;

pub type CreatureId = i64;

/// A single cell on a `MapGrid`. `(0,0)` is the top-left cell; `x` grows
/// east, `y` grows south. Positions are representable outside any grid's
/// bounds — boundedness is a property of a `MapGrid`, not of `GridPos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The six D&D 5e ability scores, each in `[1, 30]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl Abilities {
    pub fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Result<Self, InvalidArgument> {
        for (name, score) in [
            ("strength", strength),
            ("dexterity", dexterity),
            ("constitution", constitution),
            ("intelligence", intelligence),
            ("wisdom", wisdom),
            ("charisma", charisma),
        ] {
            if !(1..=30).contains(&score) {
                return Err(InvalidArgument::OutOfBounds {
                    what: format!("ability score '{name}'"),
                    value: score,
                    min: 1,
                    max: 30,
                });
            }
        }
        Ok(Self {
            strength,
            dexterity,
            constitution,
            intelligence,
            wisdom,
            charisma,
        })
    }

    /// `floor((score - 10) / 2)`. Floor division, not truncation: a score of
    /// 1 yields a modifier of -5, not -4.
    pub fn modifier(score: i32) -> i32 {
        (score - 10).div_euclid(2)
    }

    pub fn dexterity_modifier(&self) -> i32 {
        Self::modifier(self.dexterity)
    }
}

/// Closed enumeration of SRD status effects. Conditions are tracked per
/// creature as a `HashSet<Condition>`; the validator and handlers consult
/// them directly rather than through a free-form buff/tag system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Condition {
    Blinded,
    Charmed,
    Deafened,
    Frightened,
    Grappled,
    Incapacitated,
    Invisible,
    Paralyzed,
    Petrified,
    Poisoned,
    Prone,
    Restrained,
    Stunned,
    Unconscious,
}

impl Condition {
    /// Conditions under which a creature may take no action, bonus action,
    /// or reaction at all (§4.8 step 2).
    pub fn categorically_blocks_actions(self) -> bool {
        matches!(
            self,
            Condition::Incapacitated
                | Condition::Stunned
                | Condition::Paralyzed
                | Condition::Petrified
                | Condition::Unconscious
        )
    }
}

/// The only dice sizes the engine rolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DieType {
    D4 = 4,
    D6 = 6,
    D8 = 8,
    D10 = 10,
    D12 = 12,
    D20 = 20,
    D100 = 100,
}

impl DieType {
    pub fn sides(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RollType {
    Normal,
    Advantage,
    Disadvantage,
}

/// The outcome of a single `DiceEngine::roll` call.
///
/// Invariants: `rolls` is non-empty; every value lies in `[1, die_type]`;
/// `Advantage`/`Disadvantage` imply `die_type == D20` and exactly two rolls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    pub die_type: DieType,
    pub rolls: Vec<i32>,
    pub modifier: i32,
    pub roll_type: RollType,
}

impl DiceRoll {
    /// Sum of the raw dice values, before `modifier` and before
    /// advantage/disadvantage selection.
    pub fn natural_total(&self) -> i32 {
        self.rolls.iter().sum()
    }

    /// For `Advantage`/`Disadvantage` d20 rolls: the chosen single die
    /// (max for advantage, min for disadvantage). Panics if called on a
    /// roll that isn't exactly two d20s — callers only do this for d20
    /// roll-type rolls, which the engine guarantees.
    pub fn selected_value(&self) -> i32 {
        match self.roll_type {
            RollType::Advantage => *self.rolls.iter().max().expect("rolls is non-empty"),
            RollType::Disadvantage => *self.rolls.iter().min().expect("rolls is non-empty"),
            RollType::Normal => self.natural_total(),
        }
    }

    /// `selected_value + modifier` for d20 roll types; `natural_total +
    /// modifier` for normal multi-dice rolls. These coincide for
    /// single-die Normal rolls.
    pub fn total(&self) -> i32 {
        self.selected_value() + self.modifier
    }
}

/// Terrain classification of a grid cell, used by the pathfinder's
/// movement-cost function (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerrainType {
    #[default]
    Normal,
    Difficult,
    Impassable,
    Occupied,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ability_modifier_floor_division() {
        assert_eq!(Abilities::modifier(1), -5);
        assert_eq!(Abilities::modifier(10), 0);
        assert_eq!(Abilities::modifier(11), 0);
        assert_eq!(Abilities::modifier(20), 5);
        assert_eq!(Abilities::modifier(30), 10);
    }

    #[test]
    fn abilities_reject_out_of_range_scores() {
        assert!(Abilities::new(0, 10, 10, 10, 10, 10).is_err());
        assert!(Abilities::new(31, 10, 10, 10, 10, 10).is_err());
        assert!(Abilities::new(10, 10, 10, 10, 10, 10).is_ok());
    }

    #[test]
    fn condition_categorical_block_matches_srd_list() {
        assert!(Condition::Paralyzed.categorically_blocks_actions());
        assert!(!Condition::Prone.categorically_blocks_actions());
        assert!(!Condition::Grappled.categorically_blocks_actions());
    }

    #[test]
    fn advantage_selects_max_of_two_rolls() {
        let roll = DiceRoll {
            die_type: DieType::D20,
            rolls: vec![5, 17],
            modifier: 3,
            roll_type: RollType::Advantage,
        };
        assert_eq!(roll.selected_value(), 17);
        assert_eq!(roll.total(), 20);
    }

    #[test]
    fn disadvantage_selects_min_of_two_rolls() {
        let roll = DiceRoll {
            die_type: DieType::D20,
            rolls: vec![5, 17],
            modifier: 3,
            roll_type: RollType::Disadvantage,
        };
        assert_eq!(roll.selected_value(), 5);
        assert_eq!(roll.total(), 8);
    }
}
