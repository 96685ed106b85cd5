//! Init command - write a config template

use crate::config::{CONFIG_FILE_NAME, DEFAULT_CONFIG_TOML};
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Write `jenkins-score.toml` into `dir`, refusing to overwrite
pub fn run(dir: &Path) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        println!(
            "{} Already exists: {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, DEFAULT_CONFIG_TOML)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    Ok(())
}
