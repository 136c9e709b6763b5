//! Facets command - domain and tag counts over all posts

use anyhow::Result;
use std::path::PathBuf;

use super::build_listing;
use crate::args::SourceArgs;
use crate::config::AppConfig;

pub async fn execute(args: SourceArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let listing = build_listing(&config, args.content_dir.as_deref(), None);
    let facets = listing.facets().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&facets)?);
        return Ok(());
    }

    println!("Domains:");
    for facet in &facets.domain_counts {
        println!("  {:<12} {}", facet.key, facet.count);
    }

    println!();
    println!("Tags:");
    if facets.tag_counts.is_empty() {
        println!("  (none)");
    }
    for facet in &facets.tag_counts {
        println!("  {:<24} {}", facet.key, facet.count);
    }

    Ok(())
}
