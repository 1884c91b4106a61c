use crate::error::{CleanError, Result};
use crate::process::utils::normalize_column_name;
use arrow::{
    datatypes::Schema,
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::{collections::HashMap, sync::Arc};
use tracing::debug;

/// Rename every column to its normalized form, keeping data and order.
///
/// Two headers that collapse onto the same name are rejected rather than
/// letting one silently shadow the other.
pub fn normalize_column_names(batch: &RecordBatch) -> Result<RecordBatch> {
    let schema = batch.schema();
    let mut seen: HashMap<String, &str> = HashMap::with_capacity(schema.fields().len());
    let mut fields = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        let name = normalize_column_name(field.name());
        if let Some(first) = seen.insert(name.clone(), field.name()) {
            return Err(CleanError::ColumnCollision {
                name,
                first: first.to_string(),
                second: field.name().to_string(),
            });
        }
        if &name != field.name() {
            debug!(from = %field.name(), to = %name, "renamed column");
        }
        fields.push(field.as_ref().clone().with_name(name));
    }

    let renamed = Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone()));
    let options = RecordBatchOptions::new().with_row_count(Some(batch.num_rows()));
    RecordBatch::try_new_with_options(renamed, batch.columns().to_vec(), &options)
        .map_err(Into::into)
}
