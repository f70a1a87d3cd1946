//! Storage boundary: collaborator traits plus the in-memory backend.

mod memory;

pub use memory::MemoryStore;

use crate::models::{Bracket, EventId, EventStatus, MatchDetail, MatchId, Participant};
use std::collections::HashMap;

/// A storage backend failed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoreError(pub String);

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "store error: {}", self.0)
    }
}

/// Where registrations come from: one entry per registration (solo, duo, or
/// team), display names already resolved.
pub trait ParticipantSource {
    fn list_registered(&self, event_id: EventId) -> Result<Vec<Participant>, StoreError>;
}

/// Bracket persistence with whole-document semantics: every mutation is
/// load, mutate, save. The store does no locking; callers must serialize
/// mutating calls per event, or a later save silently overwrites an earlier
/// one. The bundled binary holds a process-wide write lock around every
/// mutating request.
pub trait BracketStore {
    fn load(&self, event_id: EventId) -> Result<Option<Bracket>, StoreError>;
    fn save(&mut self, event_id: EventId, bracket: &Bracket) -> Result<(), StoreError>;
    fn delete(&mut self, event_id: EventId) -> Result<(), StoreError>;
}

/// Schedule/location/notes overlays, keyed by match id within an event.
/// Independent lifecycle from the bracket document; never touches winners.
pub trait MatchDetailStore {
    fn details(&self, event_id: EventId) -> Result<HashMap<MatchId, MatchDetail>, StoreError>;
    fn upsert(
        &mut self,
        event_id: EventId,
        match_id: MatchId,
        detail: MatchDetail,
    ) -> Result<(), StoreError>;
    fn clear_all(&mut self, event_id: EventId) -> Result<(), StoreError>;
}

/// Where event lifecycle flips go when a bracket is generated, completed,
/// or reopened.
pub trait EventStatusSink {
    fn mark_status(&mut self, event_id: EventId, status: EventStatus) -> Result<(), StoreError>;
    fn status(&self, event_id: EventId) -> Result<Option<EventStatus>, StoreError>;
}
