use crate::error::Result;
use crate::process::SalesColumns;
use crate::write::write_atomic;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Row count after one pipeline stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageCount {
    pub stage: &'static str,
    pub rows: usize,
}

/// What a single cleaning run did.
#[derive(Debug, Clone, Serialize)]
pub struct CleaningReport {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub columns: Vec<String>,
    pub resolved: Option<SalesColumns>,
    pub stages: Vec<StageCount>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CleaningReport {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            columns: Vec::new(),
            resolved: None,
            stages: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    pub fn record(&mut self, stage: &'static str, rows: usize) {
        self.stages.push(StageCount { stage, rows });
    }

    pub fn rows_in(&self) -> usize {
        self.stages.first().map(|s| s.rows).unwrap_or(0)
    }

    pub fn rows_out(&self) -> usize {
        self.stages.last().map(|s| s.rows).unwrap_or(0)
    }

    pub fn rows_dropped(&self) -> usize {
        self.rows_in().saturating_sub(self.rows_out())
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }
}

/// Write `report` as pretty JSON, atomically: tmp file in the same
/// directory, then rename over `path`.
pub fn write_report<P: AsRef<Path>>(report: &CleaningReport, path: P) -> Result<()> {
    write_atomic(path.as_ref(), |file| {
        let mut out = file;
        serde_json::to_writer_pretty(&mut out, report)?;
        out.write_all(b"\n")?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_row_accounting() {
        let mut report = CleaningReport::new("in.csv");
        report.record("load", 10);
        report.record("drop_missing", 8);
        report.record("validate_numeric", 5);
        assert_eq!(report.rows_in(), 10);
        assert_eq!(report.rows_out(), 5);
        assert_eq!(report.rows_dropped(), 5);
    }

    #[test]
    fn test_write_report_creates_parent() -> anyhow::Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("reports").join("run.json");

        let mut report = CleaningReport::new("in.csv");
        report.record("load", 3);
        report.resolved = Some(SalesColumns {
            price: "unit_price".into(),
            quantity: "qty".into(),
        });
        report.finish();
        write_report(&report, &path)?;

        let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path)?)?;
        assert_eq!(v["stages"][0]["stage"], "load");
        assert_eq!(v["stages"][0]["rows"], 3);
        assert_eq!(v["resolved"]["price"], "unit_price");
        assert!(v["finished_at"].is_string());
        Ok(())
    }
}
