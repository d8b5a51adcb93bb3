//! Profile repository — key-value access to the persisted progress blob.
//!
//! The whole player profile is stored as one JSON value under a fixed key,
//! so the table doubles as generic key-value storage for future blobs.

use chrono::Utc;
use rusqlite::params;

use super::{Database, DatabaseError};

/// Returns the JSON value stored under `key`, if any.
pub fn get(db: &Database, key: &str) -> Result<Option<String>, DatabaseError> {
    db.with_conn(|conn| {
        let mut stmt = conn.prepare("SELECT value FROM profile WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    })
}

/// Stores `value` under `key`, replacing any previous value.
pub fn set(db: &Database, key: &str, value: &str) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO profile (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    })
}

/// Deletes the value stored under `key`.
pub fn delete(db: &Database, key: &str) -> Result<(), DatabaseError> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM profile WHERE key = ?1", params![key])?;
        Ok(())
    })
}
