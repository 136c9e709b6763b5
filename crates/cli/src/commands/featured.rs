//! Featured command

use anyhow::Result;
use std::path::PathBuf;

use super::build_listing;
use crate::args::SourceArgs;
use crate::config::AppConfig;

pub async fn execute(args: SourceArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let listing = build_listing(&config, args.content_dir.as_deref(), None);
    let banner = listing.featured().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&banner)?);
        return Ok(());
    }

    match banner {
        Some(banner) => {
            println!("{}", banner.title);
            println!(
                "[{}] {} · {}",
                banner.label, banner.published_label, banner.read_time_label
            );
            if !banner.excerpt.is_empty() {
                println!("{}", banner.excerpt);
            }
            if !banner.tags.is_empty() {
                println!("Tags: {}", banner.tags.join(", "));
            }
            println!("{}", banner.href);
        }
        None => println!("No posts yet. Check back soon!"),
    }

    Ok(())
}
