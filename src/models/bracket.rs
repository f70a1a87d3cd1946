//! Bracket, match, and slot data structures for single-elimination play.

use crate::models::participant::ParticipantId;
use serde::{Deserialize, Serialize};

/// Errors that can occur during bracket operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BracketError {
    /// Generation was requested with no registered participants.
    NoParticipants,
    /// No match with this id exists in the bracket.
    MatchNotFound(MatchId),
    /// The reported winner is seated in neither slot of the match.
    InvalidWinner,
    /// No bracket has been generated for this event.
    BracketNotFound,
    /// The match already has a recorded winner.
    MatchAlreadyDecided(MatchId),
}

impl std::fmt::Display for BracketError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BracketError::NoParticipants => write!(f, "No registered participants to seed a bracket"),
            BracketError::MatchNotFound(id) => write!(f, "Match {} not found in bracket", id),
            BracketError::InvalidWinner => write!(f, "Winner is not a participant in this match"),
            BracketError::BracketNotFound => write!(f, "No bracket generated for this event"),
            BracketError::MatchAlreadyDecided(id) => {
                write!(f, "Match {} already has a recorded winner", id)
            }
        }
    }
}

/// Unique identifier for a match within one bracket. Assigned in round-major,
/// left-to-right order starting at 1, with no gaps.
pub type MatchId = u32;

/// State of one participant position within a match.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// Not yet seated: waiting on an earlier match, or a capacity placeholder.
    #[default]
    Empty,
    /// No opponent exists; the other slot advances automatically.
    Bye,
    /// Seated participant.
    Assigned { id: ParticipantId, name: String },
}

impl Slot {
    /// Seat a participant.
    pub fn assigned(id: impl Into<ParticipantId>, name: impl Into<String>) -> Self {
        Slot::Assigned {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Participant id, if seated.
    pub fn participant_id(&self) -> Option<&str> {
        match self {
            Slot::Assigned { id, .. } => Some(id),
            _ => None,
        }
    }

    /// Display string: the participant's name, "Bye", or "TBD".
    pub fn display_name(&self) -> &str {
        match self {
            Slot::Empty => "TBD",
            Slot::Bye => "Bye",
            Slot::Assigned { name, .. } => name,
        }
    }

    /// Whether this slot holds exactly the given participant.
    pub fn holds(&self, participant_id: &str) -> bool {
        self.participant_id() == Some(participant_id)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn is_bye(&self) -> bool {
        matches!(self, Slot::Bye)
    }
}

/// Whether a match has a recorded result.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// A single bracket match: two slots, an optional recorded winner, and the id
/// of the match the winner advances to.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatch {
    pub id: MatchId,
    /// 1-indexed round number.
    pub round: u32,
    pub slot1: Slot,
    pub slot2: Slot,
    /// None until a result is recorded; always the id of one Assigned slot.
    pub winner_id: Option<ParticipantId>,
    pub status: MatchStatus,
    /// Match in the next round that receives this match's winner; None for the final.
    pub next_match_id: Option<MatchId>,
}

impl BracketMatch {
    /// Create a pending match with no winner.
    pub fn new(id: MatchId, round: u32, slot1: Slot, slot2: Slot, next_match_id: Option<MatchId>) -> Self {
        Self {
            id,
            round,
            slot1,
            slot2,
            winner_id: None,
            status: MatchStatus::Pending,
            next_match_id,
        }
    }

    /// Whether a winner has been recorded.
    pub fn is_decided(&self) -> bool {
        self.winner_id.is_some()
    }

    /// Display name of the recorded winner, if any.
    pub fn winner_name(&self) -> Option<&str> {
        let id = self.winner_id.as_deref()?;
        if self.slot1.holds(id) {
            Some(self.slot1.display_name())
        } else if self.slot2.holds(id) {
            Some(self.slot2.display_name())
        } else {
            None
        }
    }
}

/// Full single-elimination bracket for one event.
///
/// Structure is fixed at generation time; afterwards only winners, statuses,
/// and slot occupants change. Round *r* (1-indexed) lives at `rounds[r - 1]`
/// with its matches in id order.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub rounds: Vec<Vec<BracketMatch>>,
}

impl Bracket {
    pub fn num_rounds(&self) -> usize {
        self.rounds.len()
    }

    pub fn total_matches(&self) -> usize {
        self.rounds.iter().map(|r| r.len()).sum()
    }

    /// Iterate over every match in id order.
    pub fn matches(&self) -> impl Iterator<Item = &BracketMatch> {
        self.rounds.iter().flatten()
    }

    /// The championship match, unless the bracket is the trivial zero-round one.
    pub fn final_match(&self) -> Option<&BracketMatch> {
        self.rounds.last()?.first()
    }

    /// Whether play is finished: the final has a winner, or there was nothing
    /// to play (a single-entry bracket has no rounds at all).
    pub fn is_complete(&self) -> bool {
        match self.final_match() {
            Some(m) => m.is_decided(),
            None => true,
        }
    }

    /// Human-readable round name: "Final", "Semi-Final", "Quarter-Final",
    /// or "Round {n}".
    pub fn round_name(&self, round: u32) -> String {
        let total = self.rounds.len() as u32;
        if round == total {
            "Final".to_string()
        } else if total >= 2 && round == total - 1 {
            "Semi-Final".to_string()
        } else if total >= 3 && round == total - 2 {
            "Quarter-Final".to_string()
        } else {
            format!("Round {}", round)
        }
    }

    /// Build the id lookup table for this bracket.
    pub fn index(&self) -> BracketIndex {
        BracketIndex::build(self)
    }

    /// Look up a match by id through the index.
    pub fn match_by_id(&self, index: &BracketIndex, id: MatchId) -> Option<&BracketMatch> {
        let (r, i) = index.position(id)?;
        self.rounds.get(r)?.get(i)
    }

    /// Mutable match lookup by id through the index.
    pub fn match_by_id_mut(&mut self, index: &BracketIndex, id: MatchId) -> Option<&mut BracketMatch> {
        let (r, i) = index.position(id)?;
        self.rounds.get_mut(r)?.get_mut(i)
    }

    /// Check the structural invariants: dense round-major ids, round sizes
    /// halving down to a single final, next-match links following the
    /// round-offset arithmetic, and winner/status coupling. Returns a
    /// description of the first violation found.
    pub fn validate(&self) -> Result<(), String> {
        if self.rounds.is_empty() {
            return Ok(());
        }
        let num_rounds = self.rounds.len();
        let first = self.rounds[0].len();
        if first != 1usize << (num_rounds - 1) {
            return Err(format!(
                "round 1 has {} matches for {} rounds, expected {}",
                first,
                num_rounds,
                1usize << (num_rounds - 1)
            ));
        }
        let mut start: MatchId = 1;
        for (r, round) in self.rounds.iter().enumerate() {
            let expected_len = first >> r;
            if round.len() != expected_len {
                return Err(format!(
                    "round {} has {} matches, expected {}",
                    r + 1,
                    round.len(),
                    expected_len
                ));
            }
            let next_start = start + round.len() as MatchId;
            let last_round = r + 1 == num_rounds;
            for (i, m) in round.iter().enumerate() {
                let expected_id = start + i as MatchId;
                if m.id != expected_id {
                    return Err(format!(
                        "match at round {} index {} has id {}, expected {}",
                        r + 1,
                        i,
                        m.id,
                        expected_id
                    ));
                }
                if m.round as usize != r + 1 {
                    return Err(format!("match {} carries round {}, expected {}", m.id, m.round, r + 1));
                }
                let expected_next = if last_round {
                    None
                } else {
                    Some(next_start + (i / 2) as MatchId)
                };
                if m.next_match_id != expected_next {
                    return Err(format!(
                        "match {} links to {:?}, expected {:?}",
                        m.id, m.next_match_id, expected_next
                    ));
                }
                if m.is_decided() != (m.status == MatchStatus::Completed) {
                    return Err(format!("match {} status does not match its winner", m.id));
                }
                if let Some(winner) = m.winner_id.as_deref() {
                    if !m.slot1.holds(winner) && !m.slot2.holds(winner) {
                        return Err(format!("match {} winner {} is in neither slot", m.id, winner));
                    }
                }
            }
            start = next_start;
        }
        Ok(())
    }
}

/// Flat match-id lookup table: `id → (round index, match index)`, built once
/// per bracket. Stays valid because the bracket's structure never changes
/// after generation.
#[derive(Clone, Debug)]
pub struct BracketIndex {
    positions: Vec<(usize, usize)>,
}

impl BracketIndex {
    /// Walk the bracket once and record each match id's position.
    pub fn build(bracket: &Bracket) -> Self {
        let mut positions = vec![(usize::MAX, usize::MAX); bracket.total_matches()];
        for (r, round) in bracket.rounds.iter().enumerate() {
            for (i, m) in round.iter().enumerate() {
                if m.id >= 1 {
                    if let Some(p) = positions.get_mut(m.id as usize - 1) {
                        *p = (r, i);
                    }
                }
            }
        }
        Self { positions }
    }

    /// Position of a match id, if present.
    pub fn position(&self, id: MatchId) -> Option<(usize, usize)> {
        if id == 0 {
            return None;
        }
        self.positions
            .get(id as usize - 1)
            .copied()
            .filter(|&(r, _)| r != usize::MAX)
    }
}
