//! Data structures for event brackets: participants, matches, rounds, details.

mod bracket;
mod detail;
mod event;
mod participant;
mod view;

pub use bracket::{Bracket, BracketError, BracketIndex, BracketMatch, MatchId, MatchStatus, Slot};
pub use detail::MatchDetail;
pub use event::{EventId, EventStatus};
pub use participant::{Participant, ParticipantId};
pub use view::{BracketView, Champion, MatchView, RoundView, UpcomingMatch, WinnerUpdate};
