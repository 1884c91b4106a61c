use crate::error::Result;
use crate::process::schema::SalesColumns;
use arrow::{
    array::{Array, BooleanArray},
    compute::filter_record_batch,
    record_batch::RecordBatch,
};
use tracing::debug;

/// Drop every row whose resolved price or quantity is null.
pub fn drop_missing(batch: &RecordBatch, cols: &SalesColumns) -> Result<RecordBatch> {
    let (price_idx, quantity_idx) = cols.indices(&batch.schema())?;
    let price = batch.column(price_idx);
    let quantity = batch.column(quantity_idx);

    let keep: BooleanArray = (0..batch.num_rows())
        .map(|i| Some(price.is_valid(i) && quantity.is_valid(i)))
        .collect();

    let out = filter_record_batch(batch, &keep)?;
    debug!(
        before = batch.num_rows(),
        after = out.num_rows(),
        price = %cols.price,
        quantity = %cols.quantity,
        "dropped rows with missing values"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleanError;
    use crate::process::{read_sales_csv, resolve_sales_columns};
    use arrow::array::StringArray;

    #[test]
    fn test_drops_rows_missing_either_value() -> anyhow::Result<()> {
        let data = "product,price,qty\na,1,2\nb,,2\nc,1,\nd,,\ne,abc,5\n";
        let batch = read_sales_csv(data.as_bytes())?;
        let cols = resolve_sales_columns(&batch.schema())?;

        let out = drop_missing(&batch, &cols)?;
        assert_eq!(out.num_rows(), 2);
        let product = out
            .column(0)
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        // unparseable text is not "missing" yet
        assert_eq!(product.value(0), "a");
        assert_eq!(product.value(1), "e");
        assert!(out.num_rows() <= batch.num_rows());
        Ok(())
    }

    #[test]
    fn test_other_nulls_are_kept() -> anyhow::Result<()> {
        let data = "note,unit_price,units_sold\n,1,2\n";
        let batch = read_sales_csv(data.as_bytes())?;
        let cols = resolve_sales_columns(&batch.schema())?;
        let out = drop_missing(&batch, &cols)?;
        assert_eq!(out.num_rows(), 1);
        assert!(out.column(0).is_null(0));
        Ok(())
    }

    #[test]
    fn test_stale_handle_is_a_schema_error() -> anyhow::Result<()> {
        let batch = read_sales_csv("sale_price,qty\n1,2\n".as_bytes())?;
        let cols = SalesColumns {
            price: "price".into(),
            quantity: "qty".into(),
        };
        let err = drop_missing(&batch, &cols).unwrap_err();
        assert!(matches!(err, CleanError::Schema { field: "price", .. }));
        Ok(())
    }
}
