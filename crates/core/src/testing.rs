//! Test helpers shared by the pipeline modules

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::codeforces::{Contest, ContestSource};
use crate::error::{Error, Result};

pub fn contest(id: u64, name: &str, kind: &str, phase: &str) -> Contest {
    Contest {
        id,
        name: name.to_string(),
        kind: kind.to_string(),
        phase: phase.to_string(),
        frozen: false,
        duration_seconds: 7200,
        start_time_seconds: 1_700_000_000,
        relative_time_seconds: 0,
        participant_count: None,
    }
}

pub struct FakeSource {
    contests: Vec<Contest>,
    error: Option<fn() -> Error>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn ok(contests: Vec<Contest>) -> Self {
        Self {
            contests,
            error: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(error: fn() -> Error) -> Self {
        Self {
            contests: Vec::new(),
            error: Some(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContestSource for FakeSource {
    async fn fetch_contest_list(&self) -> Result<Vec<Contest>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.error {
            Some(make) => Err(make()),
            None => Ok(self.contests.clone()),
        }
    }
}
