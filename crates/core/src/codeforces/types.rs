//! Codeforces API data types

use serde::{Deserialize, Serialize};

pub const PHASE_BEFORE: &str = "BEFORE";
pub const PHASE_CODING: &str = "CODING";
pub const PHASE_PENDING_SYSTEM_TEST: &str = "PENDING_SYSTEM_TEST";
pub const PHASE_SYSTEM_TEST: &str = "SYSTEM_TEST";
pub const PHASE_FINISHED: &str = "FINISHED";

/// Phases offered by the phase filter, in lifecycle order.
pub const KNOWN_PHASES: [&str; 5] = [
    PHASE_BEFORE,
    PHASE_CODING,
    PHASE_PENDING_SYSTEM_TEST,
    PHASE_SYSTEM_TEST,
    PHASE_FINISHED,
];

/// Contest types offered by the type filter.
pub const KNOWN_TYPES: [&str; 2] = ["CF", "ICPC"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub phase: String,
    #[serde(default)]
    pub frozen: bool,
    pub duration_seconds: u64,
    #[serde(default)]
    pub start_time_seconds: i64,
    #[serde(default)]
    pub relative_time_seconds: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub participant_count: Option<u64>,
}

impl Contest {
    /// Whole hours, rounded down.
    pub fn duration_hours(&self) -> u64 {
        self.duration_seconds / 3600
    }

    pub fn is_finished(&self) -> bool {
        self.phase == PHASE_FINISHED
    }

    pub fn is_upcoming(&self) -> bool {
        self.phase == PHASE_BEFORE
    }

    pub fn start_time(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        chrono::DateTime::from_timestamp(self.start_time_seconds, 0)
    }
}

/// Envelope every Codeforces API method answers with.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub status: String,
    #[serde(default)]
    pub comment: Option<String>,
    pub result: Option<T>,
}
