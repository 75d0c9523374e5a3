//! Sync pipelines
//!
//! `import` pushes source records into the cabinet with dedup against the
//! local cache; `purge` empties the cabinet page by page and then clears the
//! cache. Both run strictly sequentially over a single session.

pub mod import;
pub mod purge;
pub mod sets;

pub use import::{import_records, ImportOutcome};
pub use purge::{purge_remote, PurgeOutcome};
pub use sets::{import_sets, ImportSet};

#[cfg(test)]
pub(crate) mod testutil {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::api::models::IndexField;
    use crate::api::SelectionListApi;
    use crate::error::SyncError;

    /// In-memory stand-in for the cabinet. Rejects creates whose index data
    /// contains a value from `reject`; optionally fails every delete.
    pub struct MockApi {
        pub remote: Mutex<Vec<String>>,
        pub created: Mutex<Vec<Vec<IndexField>>>,
        pub reject: Vec<String>,
        pub list_calls: Mutex<usize>,
        pub delete_calls: Mutex<usize>,
        pub fail_deletes: bool,
    }

    impl MockApi {
        pub fn new() -> Self {
            Self::with_remote(0)
        }

        pub fn with_remote(entries: usize) -> Self {
            Self {
                remote: Mutex::new((0..entries).map(|i| i.to_string()).collect()),
                created: Mutex::new(Vec::new()),
                reject: Vec::new(),
                list_calls: Mutex::new(0),
                delete_calls: Mutex::new(0),
                fail_deletes: false,
            }
        }
    }

    #[async_trait]
    impl SelectionListApi for MockApi {
        async fn create_entry(&self, fields: &[IndexField]) -> Result<(), SyncError> {
            if fields.iter().any(|f| self.reject.contains(&f.item)) {
                return Err(SyncError::Upload {
                    status: 400,
                    body: "rejected by mock".to_string(),
                });
            }
            let mut remote = self.remote.lock().unwrap();
            let next = remote.len();
            remote.push(format!("created-{next}"));
            self.created.lock().unwrap().push(fields.to_vec());
            Ok(())
        }

        async fn list_entries(&self, limit: usize) -> Result<Vec<String>, SyncError> {
            *self.list_calls.lock().unwrap() += 1;
            let remote = self.remote.lock().unwrap();
            Ok(remote.iter().take(limit).cloned().collect())
        }

        async fn delete_entries(&self, ids: &[String]) -> Result<(), SyncError> {
            *self.delete_calls.lock().unwrap() += 1;
            if self.fail_deletes {
                return Err(SyncError::Delete {
                    status: 500,
                    body: "mock delete failure".to_string(),
                });
            }
            let mut remote = self.remote.lock().unwrap();
            remote.retain(|id| !ids.contains(id));
            Ok(())
        }
    }
}
