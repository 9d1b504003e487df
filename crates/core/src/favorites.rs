//! Favorite contests, persisted as a JSON array of ids

use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::error::Result;
use crate::storage::KeyValueStore;

pub const FAVORITES_KEY: &str = "favorites";

pub struct FavoritesStore<S: KeyValueStore> {
    storage: S,
    ids: BTreeSet<u64>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    /// Opens the store and loads whatever was persisted before.
    pub fn open(storage: S) -> Result<Self> {
        let mut store = Self {
            storage,
            ids: BTreeSet::new(),
        };
        store.ids = store.load()?;
        info!(count = store.ids.len(), "favorites loaded");
        Ok(store)
    }

    /// Reads the persisted set. A missing value is an empty set.
    pub fn load(&self) -> Result<BTreeSet<u64>> {
        match self.storage.get(FAVORITES_KEY)? {
            Some(raw) => {
                let ids: Vec<u64> = serde_json::from_str(&raw)?;
                Ok(ids.into_iter().collect())
            }
            None => Ok(BTreeSet::new()),
        }
    }

    /// Overwrites the persisted value with `ids`.
    pub fn persist(&mut self, ids: &BTreeSet<u64>) -> Result<()> {
        let raw = serde_json::to_string(&ids.iter().collect::<Vec<_>>())?;
        self.storage.set(FAVORITES_KEY, &raw)
    }

    /// Adds or removes `id`, then writes the whole set back.
    /// On a failed write the in-memory set is left as it was.
    pub fn toggle(&mut self, id: u64) -> Result<&BTreeSet<u64>> {
        let mut updated = self.ids.clone();
        if !updated.remove(&id) {
            updated.insert(id);
        }

        self.persist(&updated)?;
        debug!(id, favorite = updated.contains(&id), "favorite toggled");
        self.ids = updated;
        Ok(&self.ids)
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &BTreeSet<u64> {
        &self.ids
    }
}
