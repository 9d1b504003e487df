//! Headline numbers shown above the contest list

use serde::Serialize;

use crate::codeforces::Contest;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContestStats {
    pub total: usize,
    /// Mean duration in hours, rounded to the nearest hour.
    pub average_duration_hours: u64,
    pub upcoming: usize,
    /// The contest list carries no difficulty data, so this is always `None`.
    pub average_difficulty: Option<f64>,
}

impl ContestStats {
    pub fn from_contests(contests: &[Contest]) -> Self {
        let total = contests.len();
        let average_duration_hours = if total == 0 {
            0
        } else {
            let seconds: u64 = contests.iter().map(|c| c.duration_seconds).sum();
            (seconds as f64 / total as f64 / 3600.0).round() as u64
        };

        Self {
            total,
            average_duration_hours,
            upcoming: contests.iter().filter(|c| c.is_upcoming()).count(),
            average_difficulty: None,
        }
    }

    pub fn difficulty_label(&self) -> String {
        match self.average_difficulty {
            Some(d) => format!("{:.1}/10", d),
            None => "n/a".to_string(),
        }
    }
}
