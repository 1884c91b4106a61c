use crate::error::Result;
use arrow::{csv::WriterBuilder, record_batch::RecordBatch, util::pretty::pretty_format_batches};
use parquet::{
    arrow::ArrowWriter,
    basic::{BrotliLevel, Compression},
    file::properties::WriterProperties,
};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};
use tracing::{info, warn};

/// Output encodings, picked from the destination's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Parquet,
}

impl OutputFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("parquet") => OutputFormat::Parquet,
            _ => OutputFormat::Csv,
        }
    }
}

/// Directory a file at `path` lives in; `.` for bare file names.
pub(crate) fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Hidden sibling `.<name>.tmp` that `path` is staged in.
fn tmp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".into());
    parent_dir(path).join(format!(".{}.tmp", name))
}

/// Create the parent directory, let `write` fill a tmp file, then rename it
/// over `path`. On failure the tmp file is removed and `path` is untouched.
pub(crate) fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&File) -> Result<()>,
{
    fs::create_dir_all(parent_dir(path))?;

    let tmp_path = tmp_path_for(path);
    let file = File::create(&tmp_path)?;
    let written = write(&file).and_then(|_| file.sync_all().map_err(Into::into));
    drop(file);

    if let Err(e) = written {
        if let Err(rm) = fs::remove_file(&tmp_path) {
            warn!(tmp = %tmp_path.display(), "failed to remove tmp file: {}", rm);
        }
        return Err(e);
    }

    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Write the cleaned table to `path`, creating the parent directory.
///
/// The table goes to a tmp file next to `path` first and is renamed into
/// place only once fully written, so a failure never leaves a partial file.
#[tracing::instrument(
    level = "info",
    skip(batch, path),
    fields(path = %path.as_ref().display(), rows = batch.num_rows())
)]
pub fn write_table<P: AsRef<Path>>(batch: &RecordBatch, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = OutputFormat::from_path(path);

    write_atomic(path, |file| {
        match format {
            OutputFormat::Csv => {
                let mut writer = WriterBuilder::new().with_header(true).build(file);
                writer.write(batch)?;
            }
            OutputFormat::Parquet => {
                let props = WriterProperties::builder()
                    .set_compression(Compression::BROTLI(BrotliLevel::try_new(5)?))
                    .set_dictionary_enabled(true)
                    .build();
                let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
                writer.write(batch)?;
                writer.close()?;
            }
        }
        Ok(())
    })?;

    info!(?format, "wrote cleaned table");
    Ok(())
}

/// Render the first `n` rows as a text grid.
pub fn preview(batch: &RecordBatch, n: usize) -> Result<String> {
    let head = batch.slice(0, n.min(batch.num_rows()));
    Ok(pretty_format_batches(&[head])?.to_string())
}
