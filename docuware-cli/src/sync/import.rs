//! Import pipeline: source records -> dedup cache -> upload -> cache write
//!
//! A record's cache entry is written only after DocuWare accepted the upload,
//! so a failed record stays eligible for retry on the next run. A single
//! failure never aborts the batch.

use log::{debug, error, info};

use super::sets::ImportSet;
use crate::api::models::IndexField;
use crate::api::SelectionListApi;
use crate::cache::SyncCache;
use crate::error::SyncError;
use crate::source::{SourceBatch, SourceRecord};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ImportOutcome {
    pub uploaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

/// Cache key of a record: its key-column values, joined.
pub fn record_key(record: &SourceRecord, key_columns: &[&str]) -> String {
    key_columns
        .iter()
        .map(|&column| record.get(column).unwrap_or_default())
        .collect::<Vec<_>>()
        .join("|")
}

/// Build the index fields for one record. Mapping sources that are not
/// columns pass through as constants; NULL columns become empty strings.
pub fn build_index_fields(
    record: &SourceRecord,
    field_mapping: &[(&str, &str)],
) -> Vec<IndexField> {
    field_mapping
        .iter()
        .map(|&(field_name, source)| {
            let value = record.get(source).unwrap_or(source);
            IndexField::new(field_name, value)
        })
        .collect()
}

fn summarize(fields: &[IndexField]) -> String {
    fields
        .iter()
        .map(|f| format!("{}={}", f.field_name, f.item))
        .collect::<Vec<_>>()
        .join(", ")
}

fn ensure_key_columns(columns: &[String], key_columns: &[&str]) -> Result<(), SyncError> {
    for key_column in key_columns {
        if !columns.iter().any(|c| c == key_column) {
            return Err(SyncError::Query(format!(
                "expected key column '{key_column}' is absent from the result set"
            )));
        }
    }
    Ok(())
}

/// Run one import set over a fetched batch.
pub async fn import_records<A, C>(
    set: &ImportSet,
    batch: &SourceBatch,
    api: &A,
    cache: &C,
) -> Result<ImportOutcome, SyncError>
where
    A: SelectionListApi + ?Sized,
    C: SyncCache + ?Sized,
{
    ensure_key_columns(&batch.columns, set.key_columns)?;

    let mut outcome = ImportOutcome::default();
    for record in &batch.records {
        let key = record_key(record, set.key_columns);

        if cache.exists(&key).await? {
            debug!("entry already imported, skipped: {key}");
            outcome.skipped += 1;
            continue;
        }

        let fields = build_index_fields(record, set.field_mapping);
        match api.create_entry(&fields).await {
            Ok(()) => {
                cache.record(&key, &summarize(&fields)).await?;
                info!("entry imported: {key}");
                outcome.uploaded += 1;
            }
            Err(e) => {
                error!("import failed for {key}: {e}");
                outcome.failed += 1;
            }
        }
    }

    info!(
        "import set '{}' done: {} uploaded, {} skipped, {} failed",
        set.name, outcome.uploaded, outcome.skipped, outcome.failed
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::SqliteCache;
    use crate::sync::sets::import_sets;
    use crate::sync::testutil::MockApi;

    fn vendor_batch(rows: &[(&str, &str)]) -> SourceBatch {
        SourceBatch {
            columns: vec!["VendorNo".to_string(), "VendorName".to_string()],
            records: rows
                .iter()
                .map(|(no, name)| {
                    SourceRecord::new(vec![
                        ("VendorNo".to_string(), no.to_string()),
                        ("VendorName".to_string(), name.to_string()),
                    ])
                })
                .collect(),
        }
    }

    fn vendors() -> &'static ImportSet {
        &import_sets()[0]
    }

    async fn cache() -> SqliteCache {
        SqliteCache::open_in_memory("synced_entries").await.unwrap()
    }

    #[tokio::test]
    async fn uploads_fresh_records_and_caches_them() {
        let api = MockApi::new();
        let cache = cache().await;
        let batch = vendor_batch(&[("1001", "Acme"), ("1002", "Globex")]);

        let outcome = import_records(vendors(), &batch, &api, &cache).await.unwrap();

        assert_eq!(outcome, ImportOutcome { uploaded: 2, skipped: 0, failed: 0 });
        assert_eq!(api.created.lock().unwrap().len(), 2);
        assert!(cache.exists("1001|Acme").await.unwrap());
        assert!(cache.exists("1002|Globex").await.unwrap());
    }

    #[tokio::test]
    async fn second_run_uploads_nothing() {
        let api = MockApi::new();
        let cache = cache().await;
        let batch = vendor_batch(&[("1001", "Acme"), ("1002", "Globex")]);

        import_records(vendors(), &batch, &api, &cache).await.unwrap();
        let second = import_records(vendors(), &batch, &api, &cache).await.unwrap();

        assert_eq!(second, ImportOutcome { uploaded: 0, skipped: 2, failed: 0 });
        assert_eq!(api.created.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failed_record_is_skipped_and_retried_next_run() {
        let mut api = MockApi::new();
        api.reject = vec!["Globex".to_string()];
        let cache = cache().await;
        let batch = vendor_batch(&[("1001", "Acme"), ("1002", "Globex"), ("1003", "Initech")]);

        let first = import_records(vendors(), &batch, &api, &cache).await.unwrap();
        assert_eq!(first, ImportOutcome { uploaded: 2, skipped: 0, failed: 1 });
        assert!(cache.exists("1001|Acme").await.unwrap());
        assert!(!cache.exists("1002|Globex").await.unwrap());
        assert!(cache.exists("1003|Initech").await.unwrap());

        // The remote accepts the record on the next run; only it is retried.
        let api = MockApi::new();
        let second = import_records(vendors(), &batch, &api, &cache).await.unwrap();
        assert_eq!(second, ImportOutcome { uploaded: 1, skipped: 2, failed: 0 });
        assert_eq!(api.created.lock().unwrap().len(), 1);
        assert_eq!(api.created.lock().unwrap()[0][1].item, "Globex");
    }

    #[tokio::test]
    async fn missing_key_column_is_a_query_error() {
        let api = MockApi::new();
        let cache = cache().await;
        let batch = SourceBatch {
            columns: vec!["VendorNo".to_string()],
            records: Vec::new(),
        };

        let err = import_records(vendors(), &batch, &api, &cache).await.unwrap_err();
        assert!(matches!(&err, SyncError::Query(msg) if msg.contains("VendorName")));
    }

    #[test]
    fn literal_mapping_sources_pass_through() {
        let record = SourceRecord::new(vec![("VendorNo".to_string(), "1001".to_string())]);
        let fields = build_index_fields(
            &record,
            &[("VENDOR_NUMBER", "VendorNo"), ("SOURCE_SYSTEM", "ACCESS")],
        );
        assert_eq!(fields[0], IndexField::new("VENDOR_NUMBER", "1001"));
        assert_eq!(fields[1], IndexField::new("SOURCE_SYSTEM", "ACCESS"));
    }
}
