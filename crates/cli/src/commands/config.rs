//! Config command - configuration management

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::args::{ConfigArgs, ConfigCommands};
use crate::config::AppConfig;

pub async fn execute(args: ConfigArgs, config_path: Option<PathBuf>) -> Result<()> {
    match args.command {
        ConfigCommands::Init { path, force } => init_config(path, force),
        ConfigCommands::Show => show_config(config_path),
    }
}

fn init_config(path: PathBuf, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
    }

    fs::write(&path, AppConfig::example_toml())
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("Created config file: {}", path.display());
    println!();
    println!("Next steps:");
    println!("  1. Point [content] dir at your Markdown posts, or set [cms] url");
    println!("  2. Export the CMS content key if you use one");
    println!("  3. Run 'folio doctor' to validate your setup");
    println!("  4. Run 'folio list' to preview the listing");

    Ok(())
}

fn show_config(config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let rendered = toml::to_string_pretty(&config).context("Failed to render configuration")?;
    print!("{}", rendered);
    Ok(())
}
