//! A deterministic, event-sourced tactical combat engine covering the
//! 5 ft-grid geometry, dice, line-of-effect, area templates, pathfinding,
//! initiative, turn-phase, and action-validation layers of a D&D SRD-style
//! encounter. Every layer is a pure function or a small owned value type;
//! hosts drive the engine by appending `Event`s to an `EventRepository` and
//! folding them with [`state_builder::build_state`].

pub mod action;
pub mod aoe;
pub mod creature;
pub mod dice;
pub mod error;
pub mod events;
pub mod grid;
pub mod handlers;
pub mod initiative;
pub mod line_of_effect;
pub mod pathfinder;
pub mod repository;
pub mod state_builder;
pub mod turn_phase;
pub mod validation;
pub mod values;

pub use action::{ActionContext, GameAction, ValidationResult};
pub use creature::Creature;
pub use dice::DiceEngine;
pub use error::{InvalidArgument, InvalidState, ValidationFailure};
pub use events::{Event, SessionId};
pub use grid::MapGrid;
pub use initiative::{InitiativeEntry, RoundState};
pub use repository::{EventRepository, InMemoryEventRepository};
pub use turn_phase::TurnPhase;
