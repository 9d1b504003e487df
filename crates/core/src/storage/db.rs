//! SQLite-backed key-value storage

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use super::KeyValueStore;
use crate::error::Result;

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            );
            "#,
        )?;
        Ok(())
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    pub fn count_keys(&self) -> Result<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM kv",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO kv (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3
            "#,
            params![key, value, Self::now()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.get("favorites").unwrap(), None);
    }

    #[test]
    fn test_set_overwrites() {
        let mut db = Database::open_in_memory().unwrap();
        db.set("favorites", "[1]").unwrap();
        db.set("favorites", "[1,2]").unwrap();

        assert_eq!(db.get("favorites").unwrap().as_deref(), Some("[1,2]"));
        assert_eq!(db.count_keys().unwrap(), 1);
    }

    #[test]
    fn test_survives_reopen() {
        let path = std::env::temp_dir().join(format!("cf-dashboard-kv-{}.db", std::process::id()));
        {
            let mut db = Database::open(&path).unwrap();
            db.set("favorites", "[7]").unwrap();
        }
        let db = Database::open(&path).unwrap();
        assert_eq!(db.get("favorites").unwrap().as_deref(), Some("[7]"));
        drop(db);
        let _ = std::fs::remove_file(&path);
    }
}
