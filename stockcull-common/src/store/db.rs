//! SQLite decision store
//!
//! Each save is a single upsert keyed by handle, so concurrent saves of
//! different handles cannot corrupt the mapping and same-handle races
//! resolve to whichever write commits last. The pool is built once at
//! startup and passed by handle into every consumer; a store value always
//! owns a live connection, so there is no "not yet connected" state to
//! check at call sites.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::{Decision, DecisionMap, DecisionStore};
use crate::Result;

/// Decision store backed by a SQLite database.
pub struct DbStore {
    pool: SqlitePool,
}

impl DbStore {
    /// Connect to `url` and ensure the schema exists.
    ///
    /// Safe to call against a fresh database (`mode=rwc` URLs create the
    /// file) or an existing one; schema creation is idempotent.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS decisions (
                handle TEXT PRIMARY KEY,
                decision TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        info!("Connected to decision database");
        Ok(Self { pool })
    }
}

#[async_trait]
impl DecisionStore for DbStore {
    async fn load_all(&self) -> Result<DecisionMap> {
        let rows = sqlx::query_as::<_, (String, String)>(
            "SELECT handle, decision FROM decisions",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut map = DecisionMap::new();
        for (handle, decision) in rows {
            map.insert(handle, decision.parse()?);
        }
        Ok(map)
    }

    async fn save(&self, handle: &str, decision: Decision) -> Result<()> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO decisions (handle, decision, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(handle) DO UPDATE SET
                 decision = excluded.decision,
                 updated_at = excluded.updated_at",
        )
        .bind(handle)
        .bind(decision.as_str())
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        debug!("Saved decision {} for {}", decision, handle);
        Ok(())
    }

    async fn get(&self, handle: &str) -> Result<Option<Decision>> {
        let row = sqlx::query_as::<_, (String,)>(
            "SELECT decision FROM decisions WHERE handle = ?",
        )
        .bind(handle)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some((decision,)) => Ok(Some(decision.parse()?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, handle: &str) -> Result<()> {
        sqlx::query("DELETE FROM decisions WHERE handle = ?")
            .bind(handle)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
