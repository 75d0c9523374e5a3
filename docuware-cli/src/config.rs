//! Environment-backed configuration
//!
//! All settings are read once at startup into an explicit `Config` that is
//! passed to each component; nothing reads the environment afterwards.

use std::path::PathBuf;

use crate::error::SyncError;

#[derive(Debug, Clone)]
pub struct Config {
    /// DocuWare base URL, without a trailing slash.
    pub dw_url: String,
    pub dw_user: String,
    pub dw_password: String,
    pub dw_organization: String,
    /// GUID of the target file cabinet.
    pub file_cabinet_id: String,
    /// Path to the Access `.mdb`/`.accdb` source file.
    pub access_database: PathBuf,
    /// Path of the local SQLite cache file.
    pub cache_database: PathBuf,
    /// Name of the cache table.
    pub cache_table: String,
}

impl Config {
    pub fn from_env() -> Result<Self, SyncError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SyncError> {
        let require = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| SyncError::Config(format!("missing environment variable {key}")))
        };

        let dw_url = require("DW_URL")?.trim_end_matches('/').to_string();
        // SQLITE is the legacy name for the cache file path.
        let cache_database = match lookup("SQLITE_DATABASE").filter(|v| !v.trim().is_empty()) {
            Some(path) => path,
            None => require("SQLITE")?,
        };
        let cache_table = require("SQLITE_TABLE")?;
        validate_table_name(&cache_table)?;

        Ok(Self {
            dw_url,
            dw_user: require("DW_USER")?,
            dw_password: require("DW_PW")?,
            dw_organization: require("DW_ORG")?,
            file_cabinet_id: require("DW_GUID")?,
            access_database: PathBuf::from(require("ACCESS")?),
            cache_database: PathBuf::from(cache_database),
            cache_table,
        })
    }
}

/// The table name is interpolated into SQL, so it is restricted to
/// identifier characters.
fn validate_table_name(name: &str) -> Result<(), SyncError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(SyncError::Config(format!(
            "SQLITE_TABLE '{name}' is not a valid table name"
        )))
    }
}
