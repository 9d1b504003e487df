//! Single-contest lookups: cache first, full list fetch on a miss

use chrono::Utc;
use serde::Serialize;
use std::sync::Mutex;
use tracing::{debug, info, warn};

use crate::cache::ContestCache;
use crate::codeforces::{Contest, ContestSource, PHASE_FINISHED};
use crate::error::{Error, Result};

pub const FALLBACK_CONTEST_ID: u64 = 12345;

/// Placeholder shown when a detail lookup fails.
pub fn fallback_contest() -> Contest {
    Contest {
        id: FALLBACK_CONTEST_ID,
        name: "Dummy Contest".to_string(),
        kind: "ICPC".to_string(),
        phase: PHASE_FINISHED.to_string(),
        frozen: false,
        duration_seconds: 7200,
        start_time_seconds: Utc::now().timestamp() - 86400,
        relative_time_seconds: -86400,
        participant_count: Some(100),
    }
}

/// What the detail view displays.
#[derive(Debug, Clone, Serialize)]
pub struct DetailOutcome {
    pub contest: Contest,
    pub error: Option<String>,
}

impl DetailOutcome {
    pub fn is_fallback(&self) -> bool {
        self.error.is_some()
    }
}

pub struct ContestDetails<'a> {
    source: &'a dyn ContestSource,
    cache: &'a Mutex<ContestCache>,
}

impl<'a> ContestDetails<'a> {
    pub fn new(source: &'a dyn ContestSource, cache: &'a Mutex<ContestCache>) -> Self {
        Self { source, cache }
    }

    pub async fn lookup(&self, id: &str) -> Result<Contest> {
        if let Some(contest) = self.cached(id) {
            debug!(id, "contest cache hit");
            return Ok(contest);
        }

        debug!(id, "contest cache miss");
        let contests = self.source.fetch_contest_list().await?;
        let found = contests
            .into_iter()
            .find(|c| c.id.to_string() == id)
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        if let Ok(mut cache) = self.cache.lock() {
            cache.put(id, found.clone());
        }
        info!(id, name = %found.name, "contest cached");
        Ok(found)
    }

    /// Like `lookup`, but never fails: errors degrade to the placeholder.
    pub async fn load(&self, id: &str) -> DetailOutcome {
        match self.lookup(id).await {
            Ok(contest) => DetailOutcome { contest, error: None },
            Err(e) => {
                warn!(id, error = %e, "contest lookup failed, using placeholder");
                DetailOutcome {
                    contest: fallback_contest(),
                    error: Some(e.detail_message()),
                }
            }
        }
    }

    fn cached(&self, id: &str) -> Option<Contest> {
        self.cache.lock().ok().and_then(|cache| cache.get(id).cloned())
    }
}
