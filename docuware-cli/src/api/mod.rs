//! DocuWare Platform API client
//!
//! Cookie-session authentication plus the three selection-list operations the
//! migration needs: create, list (capped at [`PAGE_LIMIT`] per request) and
//! batch delete.

mod auth;
mod client;
pub mod models;

pub use client::DocuwareClient;

use async_trait::async_trait;

use crate::error::SyncError;
use models::IndexField;

/// Remote cap on entries per list or delete request.
pub const PAGE_LIMIT: usize = 10_000;

/// The remote operations consumed by the import and purge pipelines.
///
/// Implemented by [`DocuwareClient`]; mocked in pipeline tests.
#[async_trait]
pub trait SelectionListApi: Send + Sync {
    /// Submit one selection-list entry for creation.
    async fn create_entry(&self, fields: &[IndexField]) -> Result<(), SyncError>;

    /// Fetch up to `limit` existing entry identifiers.
    async fn list_entries(&self, limit: usize) -> Result<Vec<String>, SyncError>;

    /// Delete exactly the given batch of entries.
    async fn delete_entries(&self, ids: &[String]) -> Result<(), SyncError>;
}
