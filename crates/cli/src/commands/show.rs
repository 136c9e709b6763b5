//! Show command - render a single post

use anyhow::{Context, Result, bail};
use folio_domain::usecases::PostPage;
use std::path::PathBuf;

use super::build_listing;
use crate::args::ShowArgs;
use crate::config::AppConfig;

pub async fn execute(args: ShowArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let listing = build_listing(&config, args.source.content_dir.as_deref(), None);

    let Some(page) = listing.post(&args.slug).await else {
        bail!("Post not found: {}", args.slug);
    };

    if args.source.json {
        let json = serde_json::to_string_pretty(&page).context("Failed to serialize post")?;
        println!("{}", json);
    } else {
        print_post(&page);
    }

    Ok(())
}

fn print_post(page: &PostPage) {
    let trail: Vec<&str> = page.breadcrumbs.iter().map(|b| b.label.as_str()).collect();
    println!("{}", trail.join(" / "));
    println!();
    println!("{}", page.post.title);
    println!(
        "{} · {} · {} · {}",
        page.banner.label, page.post.author, page.banner.published_label, page.banner.read_time_label
    );
    if !page.post.tags.is_empty() {
        println!("Tags: {}", page.post.tags.join(", "));
    }
    println!();
    if !page.post.excerpt.is_empty() {
        println!("{}", page.post.excerpt);
        println!();
    }
    println!("{}", page.post.content);
}
