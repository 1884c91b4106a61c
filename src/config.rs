use crate::error::{CleanError, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

/// Where to read from, where to write to, and how much to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: Option<PathBuf>,
    pub preview_rows: usize,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/raw/sales_data_raw.csv"),
            output: PathBuf::from("data/processed/sales_data_clean.csv"),
            report: None,
            preview_rows: 5,
        }
    }
}

impl CleanConfig {
    /// Load a YAML config; keys left out keep their defaults.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(CleanError::Config(format!(
                "config file {} does not exist",
                path.display()
            )));
        }
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Parse YAML without validating; callers validate once any overrides
    /// have been applied.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.input.as_os_str().is_empty() {
            return Err(CleanError::Config("input path is empty".into()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(CleanError::Config("output path is empty".into()));
        }
        if self.input == self.output {
            return Err(CleanError::Config(format!(
                "output {} would overwrite the input",
                self.output.display()
            )));
        }
        Ok(())
    }
}
