//! In-memory backend for all four storage traits (demo binary and tests).

use crate::models::{Bracket, EventId, EventStatus, MatchDetail, MatchId, Participant};
use crate::store::{BracketStore, EventStatusSink, MatchDetailStore, ParticipantSource, StoreError};
use std::collections::HashMap;
use uuid::Uuid;

/// Plain-HashMap storage. Holds no locks of its own: the owner wraps the
/// whole store (the web binary keeps it behind one RwLock), which also
/// covers the per-event write serialization the bracket store requires.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    participants: HashMap<EventId, Vec<Participant>>,
    brackets: HashMap<EventId, Bracket>,
    details: HashMap<EventId, HashMap<MatchId, MatchDetail>>,
    statuses: HashMap<EventId, EventStatus>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a participant, minting a fresh registration id.
    pub fn register_participant(
        &mut self,
        event_id: EventId,
        display_name: impl Into<String>,
        team_member_ids: Vec<Uuid>,
    ) -> Participant {
        let p = Participant::with_team(Uuid::new_v4().to_string(), display_name, team_member_ids);
        self.participants.entry(event_id).or_default().push(p.clone());
        p
    }

    /// Withdraw a registration. Returns whether it existed.
    pub fn withdraw_participant(&mut self, event_id: EventId, participant_id: &str) -> bool {
        match self.participants.get_mut(&event_id) {
            Some(list) => {
                let before = list.len();
                list.retain(|p| p.id != participant_id);
                list.len() != before
            }
            None => false,
        }
    }
}

impl ParticipantSource for MemoryStore {
    fn list_registered(&self, event_id: EventId) -> Result<Vec<Participant>, StoreError> {
        Ok(self.participants.get(&event_id).cloned().unwrap_or_default())
    }
}

impl BracketStore for MemoryStore {
    fn load(&self, event_id: EventId) -> Result<Option<Bracket>, StoreError> {
        Ok(self.brackets.get(&event_id).cloned())
    }

    fn save(&mut self, event_id: EventId, bracket: &Bracket) -> Result<(), StoreError> {
        self.brackets.insert(event_id, bracket.clone());
        Ok(())
    }

    fn delete(&mut self, event_id: EventId) -> Result<(), StoreError> {
        self.brackets.remove(&event_id);
        Ok(())
    }
}

impl MatchDetailStore for MemoryStore {
    fn details(&self, event_id: EventId) -> Result<HashMap<MatchId, MatchDetail>, StoreError> {
        Ok(self.details.get(&event_id).cloned().unwrap_or_default())
    }

    fn upsert(
        &mut self,
        event_id: EventId,
        match_id: MatchId,
        detail: MatchDetail,
    ) -> Result<(), StoreError> {
        self.details.entry(event_id).or_default().insert(match_id, detail);
        Ok(())
    }

    fn clear_all(&mut self, event_id: EventId) -> Result<(), StoreError> {
        self.details.remove(&event_id);
        Ok(())
    }
}

impl EventStatusSink for MemoryStore {
    fn mark_status(&mut self, event_id: EventId, status: EventStatus) -> Result<(), StoreError> {
        self.statuses.insert(event_id, status);
        Ok(())
    }

    fn status(&self, event_id: EventId) -> Result<Option<EventStatus>, StoreError> {
        Ok(self.statuses.get(&event_id).copied())
    }
}
