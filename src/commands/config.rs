use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::TrackerConfig;

pub fn run(path: &Path, init: bool) -> Result<()> {
    if init {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        TrackerConfig::create_default_config(path)?;
        println!("{}", format!("Created {}", path.display()).green());
        return Ok(());
    }

    let status = if path.exists() {
        "found"
    } else {
        "not found, using defaults"
    };
    println!("Config file: {} {}", path.display(), format!("({})", status).dimmed());
    println!();

    let config = TrackerConfig::load(path)?;
    print!("{}", config.to_toml()?);

    Ok(())
}
