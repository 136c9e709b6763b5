//! List command - one page of the blog listing

use anyhow::{Context, Result};
use folio_domain::FilterState;
use folio_domain::usecases::BlogPage;
use std::path::PathBuf;

use super::build_listing;
use crate::args::ListArgs;
use crate::config::AppConfig;

pub async fn execute(args: ListArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    if let Some(domain) = args.domain.as_deref() {
        if folio_domain::Domain::parse_lenient(domain).is_none() {
            tracing::warn!(domain = %domain, "Unknown domain, showing all posts");
        }
    }

    let state = FilterState::from_query(
        args.domain.as_deref(),
        args.tag.as_deref(),
        args.page.as_deref(),
    );

    let listing = build_listing(&config, args.source.content_dir.as_deref(), args.page_size);
    let page = listing.page(&state).await;

    if args.source.json {
        let json = serde_json::to_string_pretty(&page).context("Failed to serialize listing")?;
        println!("{}", json);
    } else {
        print_page(&page);
    }

    Ok(())
}

fn print_page(page: &BlogPage) {
    if page.empty {
        println!("No posts yet. Check back soon!");
        return;
    }

    if let Some(banner) = &page.featured {
        println!("Featured: {} [{}]", banner.title, banner.label);
        println!("  {} · {}", banner.published_label, banner.read_time_label);
        println!("  {}", banner.href);
        println!();
    }

    let active: Vec<String> = page
        .domain_chips
        .iter()
        .chain(page.tag_chips.iter())
        .filter(|chip| chip.active)
        .map(|chip| chip.label.clone())
        .collect();
    if !active.is_empty() {
        println!("Filters: {}", active.join(", "));
        println!();
    }

    if page.grid.cards.is_empty() {
        println!("No posts match these filters.");
    }

    for card in &page.grid.cards {
        println!("[{}] {}", card.label, card.title);
        if !card.description.is_empty() {
            println!("    {}", card.description);
        }
        println!("    {}", card.href);
    }

    println!();
    println!(
        "Page {} of {} ({} posts)",
        page.grid.current_page, page.grid.total_pages, page.grid.total_items
    );
    if let Some(prev) = &page.grid.prev_href {
        println!("  prev: {}", prev);
    }
    if let Some(next) = &page.grid.next_href {
        println!("  next: {}", next);
    }
}
