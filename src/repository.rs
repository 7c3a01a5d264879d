//! Boundary contracts (§6.1): plain synchronous traits a host embeds the
//! engine behind, plus an in-memory reference implementation used by tests
//! and the CLI. Grounded in the reference simulator's storage traits
//! (deleted along with its persistence layer, which targeted a different
//! storage backend than this spec calls for).

use std::collections::HashMap;
use std::sync::Mutex;

use crate::events::{Event, SessionId};

/// Append-only event log per session. Implementors must preserve insertion
/// order within a session — `build_state` assumes `load` returns events in
/// the order they were appended.
pub trait EventRepository {
    type Error: std::error::Error;

    fn append(&self, session_id: SessionId, event: Event) -> Result<(), Self::Error>;
    fn load(&self, session_id: SessionId) -> Result<Vec<Event>, Self::Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum InMemoryRepositoryError {
    #[error("poisoned lock in in-memory event repository")]
    PoisonedLock,
}

/// Reference `EventRepository` backed by a `Mutex<HashMap<..>>`. Suitable
/// for tests and the CLI; a host embedding the engine for real persistence
/// supplies its own implementation over whatever store it already runs.
#[derive(Default)]
pub struct InMemoryEventRepository {
    sessions: Mutex<HashMap<SessionId, Vec<Event>>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventRepository for InMemoryEventRepository {
    type Error = InMemoryRepositoryError;

    fn append(&self, session_id: SessionId, event: Event) -> Result<(), Self::Error> {
        let mut sessions = self
            .sessions
            .lock()
            .map_err(|_| InMemoryRepositoryError::PoisonedLock)?;
        sessions.entry(session_id).or_default().push(event);
        Ok(())
    }

    fn load(&self, session_id: SessionId) -> Result<Vec<Event>, Self::Error> {
        let sessions = self
            .sessions
            .lock()
            .map_err(|_| InMemoryRepositoryError::PoisonedLock)?;
        Ok(sessions.get(&session_id).cloned().unwrap_or_default())
    }
}
