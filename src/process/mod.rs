// src/process/mod.rs
use crate::error::{CleanError, Result};
use arrow::record_batch::RecordBatch;
use csv::ReaderBuilder;
use std::{fs::File, io::Read, path::Path};
use tracing::debug;

pub mod columns;
pub mod convert;
pub mod missing;
pub mod raw_table;
pub mod schema;
pub mod trimming;
pub mod utils;

pub use columns::normalize_column_names;
pub use convert::validate_numeric;
pub use missing::drop_missing;
pub use raw_table::RawTable;
pub use schema::{resolve_sales_columns, SalesColumns, PRICE_ALIASES, QUANTITY_ALIASES};
pub use trimming::apply_trimming;

/// Open `path` and load it as a comma-separated table with a header row.
///
/// Every column comes back as nullable `Utf8`; empty fields are null.
/// Fails with [`CleanError::NotFound`] before touching the parser when
/// `path` is not an existing file.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_sales_csv<P: AsRef<Path>>(path: P) -> Result<RecordBatch> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(CleanError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let batch = read_sales_csv(file)?;
    debug!(
        rows = batch.num_rows(),
        columns = batch.num_columns(),
        "loaded raw table"
    );
    Ok(batch)
}

/// Parse comma-separated text from any reader into a raw-text table.
///
/// Short rows are padded with nulls; rows with more fields than the header
/// are rejected with [`CleanError::RaggedRow`].
pub fn read_sales_csv<R: Read>(reader: R) -> Result<RecordBatch> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
    let expected = headers.len();
    let mut raw = RawTable::new(headers);

    for result in rdr.records() {
        let record = result?;
        if record.len() > expected {
            return Err(CleanError::RaggedRow {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                expected,
                found: record.len(),
            });
        }
        if record.len() < expected {
            debug!(
                line = record.position().map(|p| p.line()),
                found = record.len(),
                expected,
                "padding short row with nulls"
            );
        }
        raw.push_row(record.iter());
    }

    raw.into_batch()
}
