//! Participant (one registration: solo player, duo, or named team).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a participant. This is a registration id, not a user
/// id: team entries are addressed as one unit for the tournament's lifetime.
pub type ParticipantId = String;

/// One bracket entry.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    /// Resolved display name (team name, composed "A & B", or solo username).
    pub display_name: String,
    /// Platform user ids behind this entry (informational only).
    #[serde(default)]
    pub team_member_ids: Vec<Uuid>,
}

impl Participant {
    /// Create a participant with the given id and display name, no team members.
    pub fn new(id: impl Into<ParticipantId>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            team_member_ids: Vec::new(),
        }
    }

    /// Create a team participant with its member user ids.
    pub fn with_team(
        id: impl Into<ParticipantId>,
        display_name: impl Into<String>,
        team_member_ids: Vec<Uuid>,
    ) -> Self {
        Self {
            team_member_ids,
            ..Self::new(id, display_name)
        }
    }
}
