pub mod config;
pub mod error;
pub mod pipeline;
pub mod process;
pub mod report;
pub mod write;

pub use config::CleanConfig;
pub use error::{CleanError, Result};
pub use pipeline::{clean_batch, clean_file, run, CleanedTable};
