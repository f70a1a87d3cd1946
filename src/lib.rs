//! Event bracket web app: library with models, bracket logic, storage, and
//! the orchestrating service.

pub mod logic;
pub mod models;
pub mod service;
pub mod store;

pub use logic::{
    apply_match_result, clear_match_result, generate_bracket, swap_participants, Propagation,
};
pub use models::{
    Bracket, BracketError, BracketIndex, BracketMatch, BracketView, Champion, EventId, EventStatus,
    MatchDetail, MatchId, MatchStatus, MatchView, Participant, ParticipantId, RoundView, Slot,
    UpcomingMatch, WinnerUpdate,
};
pub use service::{BracketService, ServiceError};
pub use store::{
    BracketStore, EventStatusSink, MatchDetailStore, MemoryStore, ParticipantSource, StoreError,
};
