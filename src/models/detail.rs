//! Organizer-entered match details (schedule, location, notes).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Details for one match. Stored separately from the bracket document and
/// merged into matches on read paths; never touches winners or statuses.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchDetail {
    pub scheduled_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub notes: Option<String>,
}
