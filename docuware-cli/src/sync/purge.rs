//! Purge pipeline: paginated remote delete, then cache clear
//!
//! The remote caps list and delete requests at `PAGE_LIMIT` entries, so the
//! cabinet is emptied in fetch/delete cycles until a fetch comes back empty.
//! Each successful cycle strictly shrinks the remote set, which guarantees
//! termination as long as nothing repopulates the cabinet concurrently.

use log::info;

use crate::api::{SelectionListApi, PAGE_LIMIT};
use crate::cache::SyncCache;
use crate::error::SyncError;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct PurgeOutcome {
    /// Fetch/delete cycles executed.
    pub batches: usize,
    /// Remote entries deleted.
    pub deleted: usize,
    /// Cache entries removed afterwards.
    pub cleared: u64,
}

/// Empty the cabinet, then clear the cache.
///
/// A failed fetch or delete aborts the run without touching the cache: the
/// remaining cache entries still describe entries that exist remotely.
pub async fn purge_remote<A, C>(api: &A, cache: &C) -> Result<PurgeOutcome, SyncError>
where
    A: SelectionListApi + ?Sized,
    C: SyncCache + ?Sized,
{
    let mut outcome = PurgeOutcome::default();

    loop {
        let ids = api.list_entries(PAGE_LIMIT).await?;
        if ids.is_empty() {
            info!("no more entries in the cabinet");
            break;
        }

        info!("found {} entries to delete", ids.len());
        api.delete_entries(&ids).await?;
        outcome.batches += 1;
        outcome.deleted += ids.len();
    }

    outcome.cleared = cache.clear_all().await?;
    info!(
        "purge done: {} entries deleted in {} batches, {} cache entries cleared",
        outcome.deleted, outcome.batches, outcome.cleared
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SqliteCache;
    use crate::sync::testutil::MockApi;

    async fn cache_with_entry() -> SqliteCache {
        let cache = SqliteCache::open_in_memory("synced_entries").await.unwrap();
        cache.record("1001|Acme", "VENDOR_NUMBER=1001").await.unwrap();
        cache
    }

    #[tokio::test]
    async fn purges_in_page_limit_batches() {
        let api = MockApi::with_remote(25_000);
        let cache = cache_with_entry().await;

        let outcome = purge_remote(&api, &cache).await.unwrap();

        assert_eq!(outcome, PurgeOutcome { batches: 3, deleted: 25_000, cleared: 1 });
        assert_eq!(*api.delete_calls.lock().unwrap(), 3);
        // Three full pages plus the empty fetch that terminates the loop.
        assert_eq!(*api.list_calls.lock().unwrap(), 4);
        assert!(api.remote.lock().unwrap().is_empty());
        assert!(cache.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_cabinet_still_clears_the_cache() {
        let api = MockApi::new();
        let cache = cache_with_entry().await;

        let outcome = purge_remote(&api, &cache).await.unwrap();

        assert_eq!(outcome, PurgeOutcome { batches: 0, deleted: 0, cleared: 1 });
    }

    #[tokio::test]
    async fn failed_delete_aborts_and_keeps_the_cache() {
        let mut api = MockApi::with_remote(5);
        api.fail_deletes = true;
        let cache = cache_with_entry().await;

        let err = purge_remote(&api, &cache).await.unwrap_err();

        assert!(matches!(err, SyncError::Delete { status: 500, .. }));
        assert_eq!(api.remote.lock().unwrap().len(), 5);
        assert_eq!(cache.list_all().await.unwrap().len(), 1);
    }
}
