//! SQLite-backed cache

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use super::{CacheEntry, SyncCache};
use crate::error::SyncError;

pub struct SqliteCache {
    pool: SqlitePool,
    table: String,
}

impl SqliteCache {
    /// Open (creating if missing) the cache file and ensure the table exists.
    pub async fn open(path: &Path, table: &str) -> Result<Self, SyncError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        Self::connect(options, table).await
    }

    /// In-memory cache, used by tests.
    pub async fn open_in_memory(table: &str) -> Result<Self, SyncError> {
        Self::connect(SqliteConnectOptions::new().in_memory(true), table).await
    }

    async fn connect(options: SqliteConnectOptions, table: &str) -> Result<Self, SyncError> {
        // Single connection: the tool is single-instance and sequential, and
        // an in-memory database exists per connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        // The table name comes from validated configuration; sqlite cannot
        // bind identifiers, so it is interpolated.
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                entry_key  TEXT PRIMARY KEY,
                summary    TEXT NOT NULL,
                created_at TEXT NOT NULL
            )"
        ))
        .execute(&pool)
        .await?;

        info!("cache table '{table}' ready");
        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }
}

#[async_trait]
impl SyncCache for SqliteCache {
    async fn exists(&self, key: &str) -> Result<bool, SyncError> {
        let row = sqlx::query(&format!(
            "SELECT 1 FROM {} WHERE entry_key = ?",
            self.table
        ))
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.is_some())
    }

    async fn record(&self, key: &str, summary: &str) -> Result<(), SyncError> {
        let result = sqlx::query(&format!(
            "INSERT INTO {} (entry_key, summary, created_at) VALUES (?, ?, ?)",
            self.table
        ))
        .bind(key)
        .bind(summary)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                debug!("cache entry recorded: {key}");
                Ok(())
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(SyncError::Constraint(key.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn clear_all(&self) -> Result<u64, SyncError> {
        let result = sqlx::query(&format!("DELETE FROM {}", self.table))
            .execute(&self.pool)
            .await?;
        info!(
            "cache table '{}' cleared ({} entries removed)",
            self.table,
            result.rows_affected()
        );
        Ok(result.rows_affected())
    }

    async fn list_all(&self) -> Result<Vec<CacheEntry>, SyncError> {
        let rows = sqlx::query(&format!(
            "SELECT entry_key, summary, created_at FROM {} ORDER BY rowid",
            self.table
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CacheEntry {
                entry_key: row.get("entry_key"),
                summary: row.get("summary"),
                created_at: row.get::<DateTime<Utc>, _>("created_at"),
            })
            .collect())
    }
}
