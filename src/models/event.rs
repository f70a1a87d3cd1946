//! Event identifier and lifecycle status.

use serde::{Deserialize, Serialize};

/// Unique identifier for an event (assigned by the platform).
pub type EventId = u64;

/// Lifecycle status of an event, as far as the bracket is concerned.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// A bracket exists and results are still coming in.
    InProgress,
    /// The final match has been decided.
    Completed,
}
