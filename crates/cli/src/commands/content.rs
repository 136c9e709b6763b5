//! Content command - validate local content files

use anyhow::{Context, Result};
use folio_adapters::sources::FsContentSource;
use std::collections::HashSet;
use std::path::PathBuf;

use crate::args::{ContentArgs, ContentCommands};
use crate::config::AppConfig;

pub async fn execute(args: ContentArgs, config_path: Option<PathBuf>) -> Result<()> {
    match args.command {
        ContentCommands::Validate { content_dir, json } => {
            validate_content(content_dir, json, config_path).await
        }
    }
}

async fn validate_content(
    content_dir: Option<PathBuf>,
    json: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let dir = content_dir.as_ref().unwrap_or(&config.content.dir);

    let source = FsContentSource::new(dir).context("Failed to open content directory")?;
    let report = source.scan().await.context("Failed to scan content")?;

    let mut seen = HashSet::new();
    let duplicates: Vec<&str> = report
        .posts
        .iter()
        .filter(|post| !seen.insert(post.slug.as_str()))
        .map(|post| post.slug.as_str())
        .collect();

    let errors: Vec<String> = report.rejected.iter().map(|e| e.to_string()).collect();

    if json {
        let output = serde_json::json!({
            "dir": dir,
            "valid": report.posts.len(),
            "rejected": errors,
            "duplicate_slugs": duplicates,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Validating content in: {}", dir.display());
        for error in &errors {
            println!("✗ {}", error);
        }
        for slug in &duplicates {
            println!("⚠ Duplicate slug '{}' (only the newest is served)", slug);
        }
        if errors.is_empty() {
            println!("✓ Validation passed ({} posts)", report.posts.len());
        }
    }

    if !errors.is_empty() {
        eprintln!(
            "✗ Validation failed: {} invalid, {} valid",
            errors.len(),
            report.posts.len()
        );
        std::process::exit(1);
    }

    Ok(())
}
