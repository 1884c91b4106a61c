use crate::error::Result;
use crate::process::{schema::SalesColumns, utils};
use arrow::{
    array::{Array, ArrayRef, BooleanArray, Float64Array, Float64Builder, StringArray},
    compute::{cast, filter_record_batch},
    datatypes::{DataType, Field, Schema},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use std::sync::Arc;
use tracing::debug;

/// Cast one column to `f64`; values that don't parse become null.
fn to_float64(arr: &ArrayRef) -> Result<Float64Array> {
    if let Some(sarr) = arr.as_any().downcast_ref::<StringArray>() {
        let mut b = Float64Builder::with_capacity(sarr.len());
        for opt in sarr.iter() {
            b.append_option(opt.and_then(utils::parse_number));
        }
        return Ok(b.finish());
    }

    let casted = cast(arr.as_ref(), &DataType::Float64)?;
    let floats = casted
        .as_any()
        .downcast_ref::<Float64Array>()
        .map(|a| a.iter().map(|v| v.filter(|f| f.is_finite())).collect())
        .unwrap_or_else(|| Float64Array::new_null(arr.len()));
    Ok(floats)
}

/// Parse the resolved price and quantity columns as numbers, then drop rows
/// where either is unparseable and rows where either is negative.
///
/// Both columns come out as non-null `Float64`.
pub fn validate_numeric(batch: &RecordBatch, cols: &SalesColumns) -> Result<RecordBatch> {
    let (price_idx, quantity_idx) = cols.indices(&batch.schema())?;
    let price = to_float64(batch.column(price_idx))?;
    let quantity = to_float64(batch.column(quantity_idx))?;

    let mut unparseable = 0usize;
    let mut negative = 0usize;
    let keep: BooleanArray = (0..batch.num_rows())
        .map(|i| {
            if price.is_null(i) || quantity.is_null(i) {
                unparseable += 1;
                Some(false)
            } else if price.value(i) < 0.0 || quantity.value(i) < 0.0 {
                // negative prices or quantities make no sense for a sale
                negative += 1;
                Some(false)
            } else {
                Some(true)
            }
        })
        .collect();

    let schema = batch.schema();
    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(i, f)| {
            if i == price_idx || i == quantity_idx {
                Field::new(f.name(), DataType::Float64, true)
            } else {
                f.as_ref().clone()
            }
        })
        .collect();

    let mut columns = batch.columns().to_vec();
    columns[price_idx] = Arc::new(price);
    columns[quantity_idx] = Arc::new(quantity);

    let options = RecordBatchOptions::new().with_row_count(Some(batch.num_rows()));
    let typed = RecordBatch::try_new_with_options(
        Arc::new(Schema::new_with_metadata(fields, schema.metadata().clone())),
        columns,
        &options,
    )?;
    let out = filter_record_batch(&typed, &keep)?;

    debug!(
        before = batch.num_rows(),
        unparseable,
        negative,
        after = out.num_rows(),
        "validated numeric columns"
    );
    Ok(out)
}
