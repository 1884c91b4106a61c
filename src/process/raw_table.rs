use crate::error::Result;
use arrow::{
    array::{ArrayRef, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::sync::Arc;

/// Rows of a delimited file exactly as read, before any typing.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawTable {
    /// Column names from the header row, verbatim.
    pub headers: Vec<String>,
    /// One entry per data row; `None` where the field was empty.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    pub fn push_row<I, S>(&mut self, fields: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let row = fields
            .into_iter()
            .map(|f| {
                let f = f.as_ref();
                if f.is_empty() {
                    None
                } else {
                    Some(f.to_string())
                }
            })
            .collect();
        self.rows.push(row);
    }

    /// Build an all-`Utf8` batch, one nullable column per header.
    pub fn into_batch(self) -> Result<RecordBatch> {
        let num_rows = self.rows.len();
        let fields: Vec<Field> = self
            .headers
            .iter()
            .map(|name| Field::new(name, DataType::Utf8, true))
            .collect();

        let columns: Vec<ArrayRef> = (0..self.headers.len())
            .map(|i| {
                let arr: StringArray = self
                    .rows
                    .iter()
                    .map(|row| row.get(i).and_then(|v| v.as_deref()))
                    .collect();
                Arc::new(arr) as ArrayRef
            })
            .collect();

        let options = RecordBatchOptions::new().with_row_count(Some(num_rows));
        let batch =
            RecordBatch::try_new_with_options(Arc::new(Schema::new(fields)), columns, &options)?;
        Ok(batch)
    }
}
