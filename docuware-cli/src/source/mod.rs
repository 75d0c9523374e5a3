//! Source database reader (Microsoft Access via ODBC)
//!
//! Each fetch opens a fresh connection and runs the import set's query, so a
//! rerun always sees a fresh snapshot. All values are read as text; NULL
//! becomes the empty string.

use std::path::PathBuf;

use log::info;
use odbc_api::{buffers::TextRowSet, ConnectionOptions, Cursor, Environment, ResultSetMetadata};

use crate::error::SyncError;

/// Rows fetched per ODBC round trip.
const FETCH_BATCH_SIZE: usize = 500;
/// Upper bound on a single text cell.
const MAX_CELL_BYTES: usize = 4096;

/// A snapshot of one source query: the column names and every row.
#[derive(Debug, Clone)]
pub struct SourceBatch {
    pub columns: Vec<String>,
    pub records: Vec<SourceRecord>,
}

/// One row, as column-name/value pairs.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    values: Vec<(String, String)>,
}

impl SourceRecord {
    pub fn new(values: Vec<(String, String)>) -> Self {
        Self { values }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct AccessReader {
    database: PathBuf,
}

impl AccessReader {
    pub fn new(database: PathBuf) -> Self {
        Self { database }
    }

    fn connection_string(&self) -> String {
        format!(
            "DRIVER={{Microsoft Access Driver (*.mdb, *.accdb)}};DBQ={};",
            self.database.display()
        )
    }

    /// Run `query` and materialize the full result set. Blocking; callers on
    /// the async runtime wrap this in `spawn_blocking`.
    pub fn fetch(&self, query: &str) -> Result<SourceBatch, SyncError> {
        let environment = Environment::new().map_err(SyncError::Connection)?;
        let connection = environment
            .connect_with_connection_string(&self.connection_string(), ConnectionOptions::default())
            .map_err(SyncError::Connection)?;

        let mut cursor = connection
            .execute(query, (), None)
            .map_err(|e| SyncError::Query(e.to_string()))?
            .ok_or_else(|| SyncError::Query("query produced no result set".to_string()))?;

        let columns: Vec<String> = cursor
            .column_names()
            .map_err(|e| SyncError::Query(e.to_string()))?
            .collect::<Result<_, _>>()
            .map_err(|e| SyncError::Query(e.to_string()))?;

        let mut buffers = TextRowSet::for_cursor(FETCH_BATCH_SIZE, &mut cursor, Some(MAX_CELL_BYTES))
            .map_err(|e| SyncError::Query(e.to_string()))?;
        let mut row_set_cursor = cursor
            .bind_buffer(&mut buffers)
            .map_err(|e| SyncError::Query(e.to_string()))?;

        let mut records = Vec::new();
        while let Some(batch) = row_set_cursor
            .fetch()
            .map_err(|e| SyncError::Query(e.to_string()))?
        {
            for row_index in 0..batch.num_rows() {
                let values = columns
                    .iter()
                    .enumerate()
                    .map(|(col_index, name)| {
                        let text = batch
                            .at(col_index, row_index)
                            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                            .unwrap_or_default();
                        (name.clone(), text)
                    })
                    .collect();
                records.push(SourceRecord::new(values));
            }
        }

        info!(
            "fetched {} records from {}",
            records.len(),
            self.database.display()
        );
        Ok(SourceBatch { columns, records })
    }
}
