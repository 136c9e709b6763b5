//! Presentation use case - maps posts into view models for display components

use serde::Serialize;
use time::macros::format_description;

use crate::model::{Domain, Facets, FilterState, Page, Post};

/// Configuration for the presenter
#[derive(Debug, Clone)]
pub struct PresentConfig {
    /// Site origin, without trailing slash (e.g., "https://example.dev")
    pub base_url: String,
    /// Path of the blog listing under the site origin
    pub blog_path: String,
}

impl Default for PresentConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            blog_path: "/blog".to_string(),
        }
    }
}

/// Content card shown in grids
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub href: String,
    pub label: String,
    pub color: String,
    pub title: String,
    pub description: String,
}

/// Large banner for the featured post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeaturedBannerView {
    pub href: String,
    pub title: String,
    pub excerpt: String,
    pub image_url: Option<String>,
    pub label: String,
    pub color: String,
    pub read_time_label: String,
    pub published_label: String,
    pub tags: Vec<String>,
}

/// A paginated grid of cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardGridView {
    pub cards: Vec<CardView>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub prev_href: Option<String>,
    pub next_href: Option<String>,
}

/// One breadcrumb link; the last crumb has no href
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub href: Option<String>,
}

/// Filter chip with its facet count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterChip {
    pub key: String,
    pub label: String,
    pub count: usize,
    pub active: bool,
    /// Toggles this filter, keeping the other one
    pub href: String,
}

/// Presenter for transforming posts into view models
pub struct Presenter {
    config: PresentConfig,
}

impl Presenter {
    pub fn new(config: PresentConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            config: PresentConfig { base_url, ..config },
        }
    }

    /// Absolute link to a post
    pub fn post_href(&self, post: &Post) -> String {
        format!("{}/{}", self.blog_href(), post.slug)
    }

    /// Absolute link to the listing
    pub fn blog_href(&self) -> String {
        format!("{}{}", self.config.base_url, self.config.blog_path)
    }

    /// Card for a grid
    pub fn to_card(&self, post: &Post) -> CardView {
        CardView {
            href: self.post_href(post),
            label: post.domain.label().to_string(),
            color: post.domain.color().to_string(),
            title: post.title.clone(),
            description: post.excerpt.clone(),
        }
    }

    /// Banner for the featured post
    pub fn to_featured_banner(&self, post: &Post) -> FeaturedBannerView {
        FeaturedBannerView {
            href: self.post_href(post),
            title: post.title.clone(),
            excerpt: post.excerpt.clone(),
            image_url: post.image_url.clone(),
            label: post.domain.label().to_string(),
            color: post.domain.color().to_string(),
            read_time_label: format!("{} min read", post.read_time_minutes),
            published_label: format_published(post),
            tags: post.tags.clone(),
        }
    }

    /// Grid for one page, with pagination links that keep the active filters
    pub fn to_card_grid(&self, page: &Page<&Post>, state: &FilterState) -> CardGridView {
        let prev_href = page
            .has_previous()
            .then(|| self.listing_href(&state.with_page(page.current_page - 1)));
        let next_href = page
            .has_next()
            .then(|| self.listing_href(&state.with_page(page.current_page + 1)));

        CardGridView {
            cards: page.items.iter().map(|post| self.to_card(post)).collect(),
            current_page: page.current_page,
            total_pages: page.total_pages,
            total_items: page.total_items,
            prev_href,
            next_href,
        }
    }

    /// Home > Blog > post title
    pub fn to_breadcrumbs(&self, post: &Post) -> Vec<Breadcrumb> {
        let home = if self.config.base_url.is_empty() {
            "/".to_string()
        } else {
            self.config.base_url.clone()
        };

        vec![
            Breadcrumb {
                label: "Home".to_string(),
                href: Some(home),
            },
            Breadcrumb {
                label: "Blog".to_string(),
                href: Some(self.blog_href()),
            },
            Breadcrumb {
                label: post.title.clone(),
                href: None,
            },
        ]
    }

    /// One chip per domain; selecting the active one clears it
    pub fn to_domain_chips(&self, facets: &Facets, state: &FilterState) -> Vec<FilterChip> {
        Domain::ALL
            .iter()
            .map(|&domain| {
                let active = state.selected_domain == Some(domain);
                let target = FilterState {
                    selected_domain: (!active).then_some(domain),
                    selected_tag: state.selected_tag.clone(),
                    page: 1,
                };
                FilterChip {
                    key: domain.slug().to_string(),
                    label: domain.label().to_string(),
                    count: facets.domain_count(domain),
                    active,
                    href: self.listing_href(&target),
                }
            })
            .collect()
    }

    /// One chip per tag facet; selecting the active one clears it
    pub fn to_tag_chips(&self, facets: &Facets, state: &FilterState) -> Vec<FilterChip> {
        facets
            .tag_counts
            .iter()
            .map(|facet| {
                let active = state
                    .selected_tag
                    .as_deref()
                    .is_some_and(|t| t.eq_ignore_ascii_case(&facet.key));
                let target = FilterState {
                    selected_domain: state.selected_domain,
                    selected_tag: (!active).then(|| facet.key.clone()),
                    page: 1,
                };
                FilterChip {
                    key: facet.key.clone(),
                    label: facet.key.clone(),
                    count: facet.count,
                    active,
                    href: self.listing_href(&target),
                }
            })
            .collect()
    }

    /// Listing URL for a filter state; page 1 and unset filters are omitted
    pub fn listing_href(&self, state: &FilterState) -> String {
        let mut params: Vec<String> = Vec::new();
        if let Some(domain) = state.selected_domain {
            params.push(format!("domain={}", domain.slug()));
        }
        if let Some(tag) = &state.selected_tag {
            params.push(format!("tag={}", encode_query_value(tag)));
        }
        if state.page > 1 {
            params.push(format!("page={}", state.page));
        }

        if params.is_empty() {
            self.blog_href()
        } else {
            format!("{}?{}", self.blog_href(), params.join("&"))
        }
    }
}

/// "Jan 15, 2024"
fn format_published(post: &Post) -> String {
    let format = format_description!("[month repr:short] [day padding:none], [year]");
    post.published_at
        .format(&format)
        .unwrap_or_else(|_| post.published_at.date().to_string())
}

/// Percent-encode everything outside the unreserved set
fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{byte:02X}")),
        }
    }
    encoded
}
