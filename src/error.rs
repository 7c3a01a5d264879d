//! The three error families of §7, plus the contextual logging scaffolding
//! carried over from the reference simulator's `error_handling` module.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::values::{Condition, GridPos};

/// Recoverable, user-facing failures raised by the action validator.
/// Handlers never see these: by the time a handler runs, the action has
/// already passed validation.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum ValidationFailure {
    #[error("target is out of range")]
    OutOfRange,
    #[error("line of effect is blocked by {blocking_obstacle}")]
    LineOfEffectBlocked { blocking_obstacle: GridPos },
    #[error("action economy exhausted: {required} is not available")]
    ActionEconomyExhausted { required: String },
    #[error("insufficient resource: {kind}")]
    InsufficientResource { kind: String },
    #[error("condition prevents action: {condition}")]
    ConditionPrevents { condition: String },
    #[error("invalid target")]
    InvalidTarget,
    #[error("path is blocked at {position}")]
    PathBlocked { position: GridPos },
}

impl ValidationFailure {
    pub fn condition_prevents(condition: Condition) -> Self {
        ValidationFailure::ConditionPrevents {
            condition: format!("{condition:?}"),
        }
    }
}

/// Programmer-facing errors: the caller asked the initiative tracker to do
/// something the current `RoundState` cannot support. These should be
/// logged, not retried — retrying with the same inputs produces the same
/// error.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum InvalidState {
    #[error("initiative order is empty")]
    EmptyInitiativeOrder,
    #[error("turn index {index} is out of bounds for order of length {len}")]
    TurnIndexOutOfBounds { index: usize, len: usize },
    #[error("unknown creature id {creature_id}")]
    UnknownCreature { creature_id: i64 },
    #[error("no active turn")]
    NoActiveTurn,
    #[error("{reason}")]
    Other { reason: String },
}

/// Contract violations: a constructor's preconditions were not met. No
/// partially constructed value ever escapes a failing constructor.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum InvalidArgument {
    #[error("dice roller requires count >= 1, got {count}")]
    DiceCountTooLow { count: i32 },
    #[error("{what} must be in [{min}, {max}], got {value}")]
    OutOfBounds {
        what: String,
        value: i32,
        min: i32,
        max: i32,
    },
    #[error("hp_current ({hp_current}) exceeds hp_max ({hp_max})")]
    HpExceedsMax { hp_current: i32, hp_max: i32 },
    #[error("{what} must not be empty")]
    Empty { what: String },
}

/// Free-form key/value context attached to a logged error, mirroring the
/// reference simulator's `ErrorContext` builder but keyed to a single
/// session rather than a batch simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    pub session_id: i64,
    pub round: Option<u32>,
    pub creature_id: Option<i64>,
    pub action: Option<String>,
}

impl ErrorContext {
    pub fn new(session_id: i64) -> Self {
        Self {
            session_id,
            round: None,
            creature_id: None,
            action: None,
        }
    }

    pub fn with_round(mut self, round: u32) -> Self {
        self.round = Some(round);
        self
    }

    pub fn with_creature(mut self, creature_id: i64) -> Self {
        self.creature_id = Some(creature_id);
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggedError {
    pub message: String,
    pub context: ErrorContext,
}

/// Fixed-capacity rotating log of engine errors, for hosts that want
/// post-mortem diagnostics without growing memory unbounded across a long
/// simulation run.
pub struct ErrorLog {
    entries: Vec<LoggedError>,
    capacity: usize,
}

impl ErrorLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, message: impl Into<String>, context: ErrorContext) {
        let entry = LoggedError {
            message: message.into(),
            context,
        };
        log::warn!("{}", entry.message);
        if self.entries.len() >= self.capacity {
            self.entries.remove(0);
        }
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LoggedError] {
        &self.entries
    }

    pub fn summary(&self) -> HashMap<String, usize> {
        let mut summary = HashMap::new();
        for entry in &self.entries {
            *summary.entry(entry.message.clone()).or_insert(0) += 1;
        }
        summary
    }
}

static GLOBAL_ERROR_LOG: OnceLock<Mutex<ErrorLog>> = OnceLock::new();

pub fn global_error_log() -> &'static Mutex<ErrorLog> {
    GLOBAL_ERROR_LOG.get_or_init(|| Mutex::new(ErrorLog::new(1000)))
}

pub fn log_validation_failure(error: &ValidationFailure, context: ErrorContext) {
    if let Ok(mut log) = global_error_log().lock() {
        log.record(error.to_string(), context);
    }
}

pub fn log_invalid_state(error: &InvalidState, context: ErrorContext) {
    if let Ok(mut log) = global_error_log().lock() {
        log.record(error.to_string(), context);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_log_rotates_at_capacity() {
        let mut log = ErrorLog::new(2);
        log.record("a", ErrorContext::new(1));
        log.record("b", ErrorContext::new(1));
        log.record("c", ErrorContext::new(1));
        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries()[0].message, "b");
    }

    #[test]
    fn error_context_builder_sets_fields() {
        let ctx = ErrorContext::new(7)
            .with_round(3)
            .with_creature(12)
            .with_action("attack");
        assert_eq!(ctx.session_id, 7);
        assert_eq!(ctx.round, Some(3));
        assert_eq!(ctx.creature_id, Some(12));
        assert_eq!(ctx.action.as_deref(), Some("attack"));
    }
}
