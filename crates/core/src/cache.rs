//! In-memory contest cache for detail lookups

use std::collections::HashMap;

use crate::codeforces::Contest;

/// Contests keyed by the string form of their id. Entries live until the
/// cache is dropped.
#[derive(Debug, Default)]
pub struct ContestCache {
    entries: HashMap<String, Contest>,
}

impl ContestCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Contest> {
        self.entries.get(id)
    }

    pub fn put(&mut self, id: &str, contest: Contest) {
        self.entries.insert(id.to_string(), contest);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
