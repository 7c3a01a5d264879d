//! Seeded deterministic dice engine (§4.1).
//!
//! Unlike the reference simulator's `rng.rs`, which keeps its `StdRng`
//! behind a `thread_local!` so any code on the thread can reach it, this
//! engine is a plain owned value: callers construct one per encounter or
//! session and thread it explicitly through every roll. That is what §5's
//! no-shared-mutable-state rule and §9's "PRNG owned by the engine"
//! guidance require.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::InvalidArgument;
use crate::values::{DiceRoll, DieType, RollType};

pub struct DiceEngine {
    rng: StdRng,
}

impl DiceEngine {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Roll `count` dice of `die`, summed with `modifier`. `count` must be
    /// at least 1.
    pub fn roll(&mut self, count: i32, die: DieType, modifier: i32) -> Result<DiceRoll, InvalidArgument> {
        if count < 1 {
            return Err(InvalidArgument::DiceCountTooLow { count });
        }
        let sides = die.sides();
        let rolls = (0..count).map(|_| self.rng.gen_range(1..=sides)).collect();
        Ok(DiceRoll {
            die_type: die,
            rolls,
            modifier,
            roll_type: RollType::Normal,
        })
    }

    fn convenience(&mut self, die: DieType, modifier: i32) -> DiceRoll {
        self.roll(1, die, modifier)
            .expect("count=1 always satisfies count>=1")
    }

    pub fn d4(&mut self, modifier: i32) -> DiceRoll {
        self.convenience(DieType::D4, modifier)
    }
    pub fn d6(&mut self, modifier: i32) -> DiceRoll {
        self.convenience(DieType::D6, modifier)
    }
    pub fn d8(&mut self, modifier: i32) -> DiceRoll {
        self.convenience(DieType::D8, modifier)
    }
    pub fn d10(&mut self, modifier: i32) -> DiceRoll {
        self.convenience(DieType::D10, modifier)
    }
    pub fn d12(&mut self, modifier: i32) -> DiceRoll {
        self.convenience(DieType::D12, modifier)
    }
    pub fn d20(&mut self, modifier: i32) -> DiceRoll {
        self.convenience(DieType::D20, modifier)
    }
    pub fn d100(&mut self, modifier: i32) -> DiceRoll {
        self.convenience(DieType::D100, modifier)
    }

    /// Two d20 rolls, keeping the higher.
    pub fn advantage(&mut self, modifier: i32) -> DiceRoll {
        let rolls = vec![self.rng.gen_range(1..=20), self.rng.gen_range(1..=20)];
        DiceRoll {
            die_type: DieType::D20,
            rolls,
            modifier,
            roll_type: RollType::Advantage,
        }
    }

    /// Two d20 rolls, keeping the lower.
    pub fn disadvantage(&mut self, modifier: i32) -> DiceRoll {
        let rolls = vec![self.rng.gen_range(1..=20), self.rng.gen_range(1..=20)];
        DiceRoll {
            die_type: DieType::D20,
            rolls,
            modifier,
            roll_type: RollType::Disadvantage,
        }
    }
}
