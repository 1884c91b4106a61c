use anyhow::{Context, Result};
use clap::Parser;
use salesclean::{pipeline, write::preview, CleanConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Clean a raw sales CSV: normalize headers, trim text, drop rows with
/// missing, unparseable or negative price/quantity values.
#[derive(Parser, Debug)]
#[command(name = "salesclean", version, about, long_about = None)]
struct Cli {
    /// YAML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Raw input CSV
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Cleaned output (.csv or .parquet)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a JSON run report here
    #[arg(long)]
    report: Option<PathBuf>,

    /// Rows to show in the preview
    #[arg(long)]
    preview_rows: Option<usize>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<CleanConfig> {
        let mut config = match &self.config {
            Some(path) => CleanConfig::from_yaml_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => CleanConfig::default(),
        };
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(report) = self.report {
            config.report = Some(report);
        }
        if let Some(n) = self.preview_rows {
            config.preview_rows = n;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ─── 1) init logging ─────────────────────────────────────────────
    let default_filter = if cli.verbose {
        "info,salesclean=debug"
    } else {
        "info,salesclean=info"
    };
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // ─── 2) resolve config ───────────────────────────────────────────
    let config = cli.into_config()?;
    info!(
        input = %config.input.display(),
        output = %config.output.display(),
        "startup"
    );

    // ─── 3) load, clean, write ───────────────────────────────────────
    let cleaned = pipeline::run(&config)
        .with_context(|| format!("cleaning {}", config.input.display()))?;

    // ─── 4) confirmation + preview ───────────────────────────────────
    println!(
        "Cleaning complete: {} of {} rows kept, written to {}. First few rows:",
        cleaned.report.rows_out(),
        cleaned.report.rows_in(),
        config.output.display()
    );
    println!("{}", preview(&cleaned.batch, config.preview_rows)?);
    Ok(())
}
