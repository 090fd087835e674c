//! Init command - write an example layoutscore.toml

use crate::config::EXAMPLE_CONFIG;
use anyhow::{Context, Result};
use console::style;
use std::path::{Path, PathBuf};

/// Write the example config into `path`, returning the written file
pub(super) fn write_config(path: &Path, force: bool) -> Result<PathBuf> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join("layoutscore.toml");
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    std::fs::write(&config_path, EXAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

/// Run the init command
pub(super) fn run(path: &Path, force: bool) -> Result<()> {
    let config_path = write_config(path, force)?;

    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    println!("\nNext steps:");
    println!("  {} Validate the config", style("layoutscore check").cyan());
    println!("  {} Rate a layout", style("layoutscore rate screen.json").cyan());
    Ok(())
}
