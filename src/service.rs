//! Orchestration of bracket operations against the storage boundary.

use crate::logic;
use crate::models::{
    Bracket, BracketError, BracketView, Champion, EventId, EventStatus, MatchDetail, MatchId,
    Participant, UpcomingMatch, WinnerUpdate,
};
use crate::store::{BracketStore, EventStatusSink, MatchDetailStore, ParticipantSource, StoreError};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Errors surfaced by the service: a domain rule or a storage failure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ServiceError {
    Bracket(BracketError),
    Store(StoreError),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServiceError::Bracket(e) => write!(f, "{}", e),
            ServiceError::Store(e) => write!(f, "{}", e),
        }
    }
}

impl From<BracketError> for ServiceError {
    fn from(e: BracketError) -> Self {
        ServiceError::Bracket(e)
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Store(e)
    }
}

/// Ties the pure bracket logic to a storage backend and keeps the owning
/// event's lifecycle status in step.
///
/// Mutating methods take `&mut self`, so sharing a service across threads
/// forces a lock around it; that lock is the per-event write serialization
/// the bracket store contract asks for.
pub struct BracketService<S> {
    store: S,
}

impl<S> BracketService<S>
where
    S: ParticipantSource + BracketStore + MatchDetailStore + EventStatusSink,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The backing store (read-side access for callers).
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the backing store (registration management).
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Build and persist a fresh bracket for the event, replacing any
    /// existing one wholesale. Detail overlays are cleared first: match ids
    /// are not stable across regeneration. The event is marked in progress,
    /// or completed right away when the draw resolves itself.
    pub fn generate(&mut self, event_id: EventId, capacity: usize) -> Result<Bracket, ServiceError> {
        let participants = self.store.list_registered(event_id)?;
        let bracket = logic::generate_bracket(&participants, capacity)?;
        self.store.clear_all(event_id)?;
        self.store.save(event_id, &bracket)?;
        self.store.mark_status(event_id, EventStatus::InProgress)?;
        if bracket.is_complete() {
            self.store.mark_status(event_id, EventStatus::Completed)?;
        }
        log::info!(
            "event {}: generated bracket with {} matches over {} rounds",
            event_id,
            bracket.total_matches(),
            bracket.num_rounds()
        );
        Ok(bracket)
    }

    /// The stored bracket merged with its detail overlays.
    pub fn bracket_view(&self, event_id: EventId) -> Result<BracketView, ServiceError> {
        let bracket = self.load_bracket(event_id)?;
        let details = self.store.details(event_id)?;
        Ok(BracketView::assemble(&bracket, &details))
    }

    /// Record a match winner, cascade the advancement, and persist. Marks
    /// the event completed when the final is decided (directly or by the
    /// cascade).
    pub fn report_winner(
        &mut self,
        event_id: EventId,
        match_id: MatchId,
        winner_id: &str,
    ) -> Result<WinnerUpdate, ServiceError> {
        let mut bracket = self.load_bracket(event_id)?;
        let index = bracket.index();
        let prop = logic::apply_match_result(&mut bracket, &index, match_id, winner_id)?;
        self.store.save(event_id, &bracket)?;
        if prop.tournament_complete {
            self.store.mark_status(event_id, EventStatus::Completed)?;
            log::info!("event {}: tournament complete", event_id);
        }
        Ok(WinnerUpdate {
            bracket,
            tournament_complete: prop.tournament_complete,
            auto_resolved: prop.auto_resolved,
            conflicts: prop.conflicts,
        })
    }

    /// Void a recorded result and everything downstream of it. Reopens the
    /// event when this takes back the final's result.
    pub fn clear_winner(
        &mut self,
        event_id: EventId,
        match_id: MatchId,
    ) -> Result<Vec<MatchId>, ServiceError> {
        let mut bracket = self.load_bracket(event_id)?;
        let was_complete = bracket.is_complete();
        let index = bracket.index();
        let voided = logic::clear_match_result(&mut bracket, &index, match_id)?;
        self.store.save(event_id, &bracket)?;
        if was_complete && !bracket.is_complete() {
            self.store.mark_status(event_id, EventStatus::InProgress)?;
        }
        Ok(voided)
    }

    /// Swap the two slots of an undecided match (seeding fix-up).
    pub fn swap_participants(
        &mut self,
        event_id: EventId,
        match_id: MatchId,
    ) -> Result<Bracket, ServiceError> {
        let mut bracket = self.load_bracket(event_id)?;
        let index = bracket.index();
        logic::swap_participants(&mut bracket, &index, match_id)?;
        self.store.save(event_id, &bracket)?;
        Ok(bracket)
    }

    /// Tear the bracket down. Idempotent. Detail overlays keep their own
    /// lifecycle; the next generation clears them.
    pub fn delete_bracket(&mut self, event_id: EventId) -> Result<(), ServiceError> {
        self.store.delete(event_id)?;
        Ok(())
    }

    /// All stored detail overlays for the event.
    pub fn match_details(&self, event_id: EventId) -> Result<HashMap<MatchId, MatchDetail>, ServiceError> {
        Ok(self.store.details(event_id)?)
    }

    /// Store details for a match, replacing any previous record. The match
    /// id is not checked against the bracket; details live independently.
    pub fn upsert_detail(
        &mut self,
        event_id: EventId,
        match_id: MatchId,
        detail: MatchDetail,
    ) -> Result<(), ServiceError> {
        self.store.upsert(event_id, match_id, detail)?;
        Ok(())
    }

    /// Null every stored scheduled time for the event, keeping locations and
    /// notes. Returns how many records changed.
    pub fn reset_match_times(&mut self, event_id: EventId) -> Result<usize, ServiceError> {
        let details = self.store.details(event_id)?;
        let mut reset = 0;
        for (match_id, mut d) in details {
            if d.scheduled_time.is_some() {
                d.scheduled_time = None;
                self.store.upsert(event_id, match_id, d)?;
                reset += 1;
            }
        }
        Ok(reset)
    }

    /// Drop every detail overlay for the event.
    pub fn clear_details(&mut self, event_id: EventId) -> Result<(), ServiceError> {
        self.store.clear_all(event_id)?;
        Ok(())
    }

    /// A participant's undecided matches with details merged, soonest
    /// scheduled first, unscheduled last. An event without a bracket has
    /// none.
    pub fn upcoming_matches(
        &self,
        event_id: EventId,
        participant_id: &str,
    ) -> Result<Vec<UpcomingMatch>, ServiceError> {
        let bracket = match self.store.load(event_id)? {
            Some(b) => b,
            None => return Ok(Vec::new()),
        };
        let details = self.store.details(event_id)?;
        let mut upcoming = Vec::new();
        for m in bracket.matches() {
            if m.is_decided() {
                continue;
            }
            let opponent = if m.slot1.holds(participant_id) {
                &m.slot2
            } else if m.slot2.holds(participant_id) {
                &m.slot1
            } else {
                continue;
            };
            let d = details.get(&m.id).cloned().unwrap_or_default();
            upcoming.push(UpcomingMatch {
                match_id: m.id,
                round: m.round,
                round_name: bracket.round_name(m.round),
                opponent_name: opponent.display_name().to_string(),
                ready: m.slot1.participant_id().is_some() && m.slot2.participant_id().is_some(),
                scheduled_time: d.scheduled_time,
                location: d.location,
                notes: d.notes,
            });
        }
        upcoming.sort_by(|a, b| {
            match (&a.scheduled_time, &b.scheduled_time) {
                (Some(x), Some(y)) => x.cmp(y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
            .then(a.round.cmp(&b.round))
        });
        Ok(upcoming)
    }

    /// The event's winner, if decided. A zero-round bracket records no
    /// matches, so its champion is the sole registrant.
    pub fn champion(&self, event_id: EventId) -> Result<Option<Champion>, ServiceError> {
        let bracket = self.load_bracket(event_id)?;
        match bracket.final_match() {
            Some(m) => match m.winner_id.clone() {
                Some(id) => {
                    let name = m.winner_name().unwrap_or_default().to_string();
                    Ok(Some(Champion {
                        participant_id: id,
                        display_name: name,
                    }))
                }
                None => Ok(None),
            },
            None => {
                let registered = self.store.list_registered(event_id)?;
                Ok(registered.into_iter().next().map(|p| Champion {
                    participant_id: p.id,
                    display_name: p.display_name,
                }))
            }
        }
    }

    /// Registered participants for the event.
    pub fn participants(&self, event_id: EventId) -> Result<Vec<Participant>, ServiceError> {
        Ok(self.store.list_registered(event_id)?)
    }

    /// Last recorded lifecycle status for the event.
    pub fn event_status(&self, event_id: EventId) -> Result<Option<EventStatus>, ServiceError> {
        Ok(self.store.status(event_id)?)
    }

    fn load_bracket(&self, event_id: EventId) -> Result<Bracket, ServiceError> {
        self.store
            .load(event_id)?
            .ok_or(ServiceError::Bracket(BracketError::BracketNotFound))
    }
}
