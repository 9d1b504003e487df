//! Durable key-value storage for dashboard preferences

mod db;
mod memory;

pub use db::Database;
pub use memory::MemoryStore;

use crate::error::Result;

/// A string key-value store; each `set` replaces the whole value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
