//! Error taxonomy shared by every component

use thiserror::Error;

/// Errors raised by the migration workflows.
///
/// `Config`, `Connection`, `Auth` and `Cache` are fatal and abort the tool.
/// `Upload` is a per-record failure: the import loop logs it and moves on.
/// `Delete` aborts the purge loop without clearing the cache.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("source database connection failed: {0}")]
    Connection(#[source] odbc_api::Error),

    #[error("source query failed: {0}")]
    Query(String),

    #[error("DocuWare authentication failed: {0}")]
    Auth(String),

    #[error("upload rejected with status {status}: {body}")]
    Upload { status: u16, body: String },

    #[error("delete request failed with status {status}: {body}")]
    Delete { status: u16, body: String },

    #[error("cache error: {0}")]
    Cache(#[from] sqlx::Error),

    /// A cache entry for this key already exists. Should not happen in
    /// single-instance operation, where the exists-check precedes every record.
    #[error("duplicate cache entry for key '{0}'")]
    Constraint(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}
