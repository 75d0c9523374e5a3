//! `delete` workflow: empty the file cabinet, then clear the local cache

use anyhow::{Context, Result};
use log::info;

use crate::api::DocuwareClient;
use crate::cache::SqliteCache;
use crate::config::Config;
use crate::sync;

pub async fn run(config: &Config) -> Result<()> {
    let cache = SqliteCache::open(&config.cache_database, &config.cache_table)
        .await
        .context("Failed to open the sync cache")?;

    let client = DocuwareClient::logon(config).await?;
    // Log off even when the purge aborted mid-loop.
    let result = sync::purge_remote(&client, &cache).await;
    client.logoff().await;

    let outcome = result.context("Failed to purge the file cabinet")?;
    info!(
        "delete workflow finished: {} entries deleted, {} cache entries cleared",
        outcome.deleted, outcome.cleared
    );
    Ok(())
}
