use crate::error::Result;
use crate::process::utils::clean_str;
use arrow::{
    array::{ArrayRef, StringArray},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::sync::Arc;

/// Trim leading/trailing whitespace from every text column.
///
/// Nulls stay null; non-text columns pass through untouched.
pub fn apply_trimming(batch: &RecordBatch) -> Result<RecordBatch> {
    let mut cols = Vec::with_capacity(batch.num_columns());
    for arr in batch.columns() {
        if let Some(sarr) = arr.as_any().downcast_ref::<StringArray>() {
            let trimmed: StringArray = sarr.iter().map(|opt| opt.map(clean_str)).collect();
            cols.push(Arc::new(trimmed) as ArrayRef);
            continue;
        }
        cols.push(arr.clone());
    }

    let options = RecordBatchOptions::new().with_row_count(Some(batch.num_rows()));
    RecordBatch::try_new_with_options(batch.schema(), cols, &options).map_err(Into::into)
}
