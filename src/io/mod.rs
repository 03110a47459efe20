//! File input/output: dataset loading and report writing.

pub mod loader;
pub mod report;

pub use loader::load_dataset;
pub use report::{JsonWriter, ReportWriter, SummaryWriter};

use crate::core::Result;
use std::fs;
use std::path::Path;

pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}
