//! The `init` command: write a default configuration file.

use crate::config::{AnalysisConfig, DEFAULT_CONFIG_FILE};
use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

pub fn init_config(force: bool) -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    fs::write(path, AnalysisConfig::default().to_toml()?)?;
    println!("wrote default configuration to {}", path.display());
    Ok(())
}
