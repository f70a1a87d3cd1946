//! Read-path shapes: matches merged with details, upcoming matches, champion.

use crate::models::bracket::{Bracket, BracketMatch, MatchId, MatchStatus};
use crate::models::detail::MatchDetail;
use crate::models::participant::ParticipantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A match as returned by the API: bracket fields flattened together with
/// display names and any stored details.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchView {
    pub id: MatchId,
    pub round: u32,
    pub participant1_id: Option<ParticipantId>,
    pub participant1_name: String,
    pub participant2_id: Option<ParticipantId>,
    pub participant2_name: String,
    pub winner_id: Option<ParticipantId>,
    pub status: MatchStatus,
    pub next_match_id: Option<MatchId>,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl MatchView {
    /// Flatten a match and its (optional) details into the API shape.
    pub fn from_match(m: &BracketMatch, detail: Option<&MatchDetail>) -> Self {
        let d = detail.cloned().unwrap_or_default();
        Self {
            id: m.id,
            round: m.round,
            participant1_id: m.slot1.participant_id().map(ToOwned::to_owned),
            participant1_name: m.slot1.display_name().to_string(),
            participant2_id: m.slot2.participant_id().map(ToOwned::to_owned),
            participant2_name: m.slot2.display_name().to_string(),
            winner_id: m.winner_id.clone(),
            status: m.status,
            next_match_id: m.next_match_id,
            scheduled_time: d.scheduled_time,
            location: d.location,
            notes: d.notes,
        }
    }
}

/// One round of merged match views.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundView {
    pub round: u32,
    pub name: String,
    pub matches: Vec<MatchView>,
}

/// Full bracket as returned by the API.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketView {
    pub rounds: Vec<RoundView>,
    pub complete: bool,
}

impl BracketView {
    /// Merge a bracket with stored details into the API shape.
    pub fn assemble(bracket: &Bracket, details: &HashMap<MatchId, MatchDetail>) -> Self {
        let rounds = bracket
            .rounds
            .iter()
            .enumerate()
            .map(|(r, matches)| {
                let round = r as u32 + 1;
                RoundView {
                    round,
                    name: bracket.round_name(round),
                    matches: matches
                        .iter()
                        .map(|m| MatchView::from_match(m, details.get(&m.id)))
                        .collect(),
                }
            })
            .collect();
        Self {
            rounds,
            complete: bracket.is_complete(),
        }
    }
}

/// One undecided match from a participant's point of view.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct UpcomingMatch {
    pub match_id: MatchId,
    pub round: u32,
    pub round_name: String,
    /// Opponent display name; "TBD" until the other slot is seated.
    pub opponent_name: String,
    /// Both slots seated: the match can actually be played.
    pub ready: bool,
    pub scheduled_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

/// The tournament winner.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Champion {
    pub participant_id: ParticipantId,
    pub display_name: String,
}

/// Outcome of reporting a winner: the updated bracket plus what the cascade did.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WinnerUpdate {
    pub bracket: Bracket,
    pub tournament_complete: bool,
    /// Matches resolved automatically by the bye cascade.
    pub auto_resolved: Vec<MatchId>,
    /// Matches whose advancement write was dropped as inconsistent.
    pub conflicts: Vec<MatchId>,
}
