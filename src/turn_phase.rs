//! Per-turn resource ledger (§4.7). Grounded in the reference simulator's
//! deleted `resources.rs`, which modeled a turn's consumable resources as a
//! `ResourceLedger` with `consume`/`restore` methods over a string-keyed
//! map; here the resource set is closed and small enough to be plain
//! struct fields instead of a map, which also lets the compiler catch typos
//! a string key would hide.

use serde::{Deserialize, Serialize};

use crate::error::ValidationFailure;
use crate::values::CreatureId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPhase {
    pub creature_id: CreatureId,
    pub movement_remaining_ft: u32,
    pub action_available: bool,
    pub bonus_action_available: bool,
    pub reaction_available: bool,
    pub bonus_action_spell_cast: bool,
}

impl TurnPhase {
    pub fn start_turn(creature_id: CreatureId, speed_ft: u32) -> Self {
        Self {
            creature_id,
            movement_remaining_ft: speed_ft,
            action_available: true,
            bonus_action_available: true,
            // Reaction availability persists across turns in the full rules
            // (restored only at the start of the creature's own turn); the
            // engine restores it here since state_builder folds one
            // `TurnStarted` per creature per round.
            reaction_available: true,
            bonus_action_spell_cast: false,
        }
    }

    pub fn consume_movement(&self, feet: u32) -> Result<Self, ValidationFailure> {
        if feet > self.movement_remaining_ft {
            return Err(ValidationFailure::InsufficientResource {
                kind: "movement".to_string(),
            });
        }
        Ok(Self {
            movement_remaining_ft: self.movement_remaining_ft - feet,
            ..*self
        })
    }

    pub fn consume_action(&self) -> Result<Self, ValidationFailure> {
        if !self.action_available {
            return Err(ValidationFailure::ActionEconomyExhausted {
                required: "action".to_string(),
            });
        }
        Ok(Self {
            action_available: false,
            ..*self
        })
    }

    pub fn consume_bonus_action(&self, is_spell: bool) -> Result<Self, ValidationFailure> {
        if !self.bonus_action_available {
            return Err(ValidationFailure::ActionEconomyExhausted {
                required: "bonus_action".to_string(),
            });
        }
        Ok(Self {
            bonus_action_available: false,
            bonus_action_spell_cast: self.bonus_action_spell_cast || is_spell,
            ..*self
        })
    }

    pub fn consume_reaction(&self) -> Result<Self, ValidationFailure> {
        if !self.reaction_available {
            return Err(ValidationFailure::ActionEconomyExhausted {
                required: "reaction".to_string(),
            });
        }
        Ok(Self {
            reaction_available: false,
            ..*self
        })
    }

    pub fn restore_reaction(&self) -> Self {
        Self {
            reaction_available: true,
            ..*self
        }
    }

    pub fn is_action_available(&self) -> bool {
        self.action_available
    }

    /// §4.8 step 5: a spell cast with the action is always legal (subject to
    /// the other gates); a spell cast with the bonus action blocks any
    /// further action-cost spellcasting this turn unless it is a cantrip.
    pub fn can_cast_spell(&self, used_bonus_action: bool, spell_level: u8) -> bool {
        if used_bonus_action {
            self.bonus_action_available
        } else {
            self.action_available && (!self.bonus_action_spell_cast || spell_level == 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_turn_resets_all_resources() {
        let phase = TurnPhase::start_turn(1, 30);
        assert_eq!(phase.movement_remaining_ft, 30);
        assert!(phase.action_available);
        assert!(phase.bonus_action_available);
        assert!(phase.reaction_available);
        assert!(!phase.bonus_action_spell_cast);
    }

    #[test]
    fn consume_movement_beyond_remaining_fails() {
        let phase = TurnPhase::start_turn(1, 30);
        assert!(phase.consume_movement(40).is_err());
        let phase = phase.consume_movement(30).unwrap();
        assert_eq!(phase.movement_remaining_ft, 0);
    }

    #[test]
    fn consume_action_twice_fails_the_second_time() {
        let phase = TurnPhase::start_turn(1, 30);
        let phase = phase.consume_action().unwrap();
        assert!(phase.consume_action().is_err());
    }

    #[test]
    fn bonus_action_spell_blocks_further_leveled_spells_but_not_cantrips() {
        let phase = TurnPhase::start_turn(1, 30);
        let phase = phase.consume_bonus_action(true).unwrap();
        assert!(!phase.can_cast_spell(false, 1));
        assert!(phase.can_cast_spell(false, 0));
    }

    #[test]
    fn reaction_restores_independently_of_other_resources() {
        let phase = TurnPhase::start_turn(1, 30);
        let phase = phase.consume_reaction().unwrap();
        assert!(!phase.reaction_available);
        let phase = phase.restore_reaction();
        assert!(phase.reaction_available);
    }
}
