//! `insert` workflow: source database -> cache check -> upload -> cache write

use anyhow::{Context, Result};
use log::{info, warn};

use crate::api::DocuwareClient;
use crate::cache::SqliteCache;
use crate::config::Config;
use crate::source::AccessReader;
use crate::sync::{self, ImportOutcome};

pub async fn run(config: &Config) -> Result<()> {
    let cache = SqliteCache::open(&config.cache_database, &config.cache_table)
        .await
        .context("Failed to open the sync cache")?;
    let reader = AccessReader::new(config.access_database.clone());

    let client = DocuwareClient::logon(config).await?;
    // Log off even when an import set failed.
    let result = run_import_sets(&reader, &client, &cache).await;
    client.logoff().await;

    let totals = result?;
    info!(
        "insert workflow finished: {} uploaded, {} skipped, {} failed",
        totals.uploaded, totals.skipped, totals.failed
    );
    Ok(())
}

async fn run_import_sets(
    reader: &AccessReader,
    client: &DocuwareClient,
    cache: &SqliteCache,
) -> Result<ImportOutcome> {
    let mut totals = ImportOutcome::default();

    for set in sync::import_sets() {
        // ODBC is blocking; keep it off the async runtime.
        let set_reader = reader.clone();
        let batch = tokio::task::spawn_blocking(move || set_reader.fetch(set.query))
            .await
            .context("source fetch task panicked")?
            .with_context(|| format!("Failed to fetch records for import set '{}'", set.name))?;

        if batch.records.is_empty() {
            warn!("no data found for import set '{}', skipped", set.name);
            continue;
        }

        let outcome = sync::import_records(set, &batch, client, cache)
            .await
            .with_context(|| format!("Import set '{}' aborted", set.name))?;
        totals.uploaded += outcome.uploaded;
        totals.skipped += outcome.skipped;
        totals.failed += outcome.failed;
    }

    Ok(totals)
}
