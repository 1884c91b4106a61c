use crate::config::CleanConfig;
use crate::error::Result;
use crate::process::{
    apply_trimming, drop_missing, load_sales_csv, normalize_column_names, resolve_sales_columns,
    validate_numeric,
};
use crate::report::{write_report, CleaningReport};
use crate::write::write_table;
use arrow::record_batch::RecordBatch;
use std::path::Path;
use tracing::info;

/// The cleaned table plus the account of how it got that way.
#[derive(Debug)]
pub struct CleanedTable {
    pub batch: RecordBatch,
    pub report: CleaningReport,
}

/// Run every transform, in order, over an already loaded raw table.
///
/// Each stage gets the previous stage's output; the input is never touched.
pub fn clean_batch(raw: &RecordBatch, report: &mut CleaningReport) -> Result<RecordBatch> {
    let normalized = normalize_column_names(raw)?;
    report.columns = normalized
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().to_string())
        .collect();

    let trimmed = apply_trimming(&normalized)?;
    report.record("trim_text", trimmed.num_rows());

    let cols = resolve_sales_columns(&trimmed.schema())?;
    info!(price = %cols.price, quantity = %cols.quantity, "resolved sales columns");

    let present = drop_missing(&trimmed, &cols)?;
    report.record("drop_missing", present.num_rows());

    let valid = validate_numeric(&present, &cols)?;
    report.record("validate_numeric", valid.num_rows());

    report.resolved = Some(cols);
    Ok(valid)
}

/// Load `input` and clean it, without writing anything.
pub fn clean_file<P: AsRef<Path>>(input: P) -> Result<CleanedTable> {
    let input = input.as_ref();
    let mut report = CleaningReport::new(input);

    let raw = load_sales_csv(input)?;
    report.record("load", raw.num_rows());

    let batch = clean_batch(&raw, &mut report)?;
    info!(
        rows_in = report.rows_in(),
        rows_out = report.rows_out(),
        dropped = report.rows_dropped(),
        "cleaning complete"
    );
    Ok(CleanedTable { batch, report })
}

/// Full run: load, clean, write the table and optionally the report.
///
/// Nothing is written unless every stage succeeded.
pub fn run(config: &CleanConfig) -> Result<CleanedTable> {
    let mut cleaned = clean_file(&config.input)?;

    write_table(&cleaned.batch, &config.output)?;
    cleaned.report.output = Some(config.output.clone());
    cleaned.report.finish();

    if let Some(report_path) = &config.report {
        write_report(&cleaned.report, report_path)?;
        info!(path = %report_path.display(), "wrote run report");
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleanError;
    use crate::process::read_sales_csv;

    #[test]
    fn test_clean_batch_records_every_stage() -> anyhow::Result<()> {
        let data = "\
Product Name, Unit Price ,QTY,Region
  Widget ,9.99,3, North
Gadget,,2,South
Gizmo,-5,3,East
Doohickey,abc,1,West
Thing,4,1.5,
";
        let raw = read_sales_csv(data.as_bytes())?;
        let mut report = CleaningReport::new("mem");
        report.record("load", raw.num_rows());
        let out = clean_batch(&raw, &mut report)?;

        assert_eq!(out.num_rows(), 2);
        assert_eq!(report.columns, vec!["product_name", "unit_price", "qty", "region"]);
        let counts: Vec<_> = report.stages.iter().map(|s| (s.stage, s.rows)).collect();
        assert_eq!(
            counts,
            vec![
                ("load", 5),
                ("trim_text", 5),
                ("drop_missing", 4),
                ("validate_numeric", 2)
            ]
        );
        let resolved = report.resolved.unwrap();
        assert_eq!(resolved.price, "unit_price");
        assert_eq!(resolved.quantity, "qty");
        Ok(())
    }

    #[test]
    fn test_row_count_never_grows() -> anyhow::Result<()> {
        let data = "price,quantity\n1,1\n,1\n-1,1\nx,2\n3,3\n";
        let raw = read_sales_csv(data.as_bytes())?;
        let mut report = CleaningReport::new("mem");
        report.record("load", raw.num_rows());
        clean_batch(&raw, &mut report)?;

        let rows: Vec<usize> = report.stages.iter().map(|s| s.rows).collect();
        assert!(rows.windows(2).all(|w| w[1] <= w[0]), "{rows:?}");
        Ok(())
    }

    #[test]
    fn test_missing_price_column_fails() -> anyhow::Result<()> {
        let raw = read_sales_csv("product,quantity\na,1\n".as_bytes())?;
        let mut report = CleaningReport::new("mem");
        let err = clean_batch(&raw, &mut report).unwrap_err();
        assert!(matches!(err, CleanError::Schema { field: "price", .. }));
        Ok(())
    }
}
