//! Local deduplication cache
//!
//! Tracks which source records have already been uploaded. An entry exists
//! iff the record was accepted by DocuWare; entries are never mutated and are
//! destroyed only in bulk when the cabinet is purged.

mod sqlite;

pub use sqlite::SqliteCache;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::SyncError;

/// One cached confirmation: the record with `entry_key` has been uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub entry_key: String,
    /// The uploaded index data, kept for display.
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// Storage contract for the dedup cache, kept behind a trait so the backing
/// engine is swappable and pipelines can be tested against it directly.
#[async_trait]
pub trait SyncCache: Send + Sync {
    /// True iff an entry with this key is present. No side effects.
    async fn exists(&self, key: &str) -> Result<bool, SyncError>;

    /// Insert one entry. An already-present key is a [`SyncError::Constraint`].
    async fn record(&self, key: &str, summary: &str) -> Result<(), SyncError>;

    /// Delete every entry; returns how many were removed. Idempotent.
    async fn clear_all(&self) -> Result<u64, SyncError>;

    /// All entries in insertion order.
    async fn list_all(&self) -> Result<Vec<CacheEntry>, SyncError>;
}
