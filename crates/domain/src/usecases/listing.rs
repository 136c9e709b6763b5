//! Blog listing use case - one request's worth of load, filter, page and map

use serde::Serialize;
use std::sync::Arc;

use crate::model::{Facets, FilterState, Post};
use crate::ports::ContentSource;
use crate::repository::PostRepository;
use crate::usecases::filter::{DEFAULT_PAGE_SIZE, apply_filters, compute_facets, paginate};
use crate::usecases::present::{
    Breadcrumb, CardGridView, FeaturedBannerView, FilterChip, PresentConfig, Presenter,
};

/// Configuration for the listing use case
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Site origin used for absolute links
    pub base_url: String,
    /// Cards per page
    pub page_size: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Everything the listing page renders
#[derive(Debug, Clone, Serialize)]
pub struct BlogPage {
    /// Effective filters, with the page clamped
    pub filters: FilterState,
    pub featured: Option<FeaturedBannerView>,
    pub grid: CardGridView,
    pub domain_chips: Vec<FilterChip>,
    pub tag_chips: Vec<FilterChip>,
    /// No content at all; render the "check back soon" state
    pub empty: bool,
}

/// Everything a single post page renders
#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub post: Post,
    pub banner: FeaturedBannerView,
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// Use case wiring a content source to view models
pub struct BlogListing {
    source: Arc<dyn ContentSource>,
    presenter: Presenter,
    page_size: usize,
}

impl BlogListing {
    pub fn new(source: Arc<dyn ContentSource>, config: ListingConfig) -> Self {
        let presenter = Presenter::new(PresentConfig {
            base_url: config.base_url,
            ..Default::default()
        });

        Self {
            source,
            presenter,
            page_size: config.page_size,
        }
    }

    /// Load the request's working set.
    ///
    /// Source failures are logged and treated as zero posts.
    pub async fn repository(&self) -> PostRepository {
        match self.source.load_all().await {
            Ok(posts) => {
                tracing::info!(source = self.source.kind(), count = posts.len(), "Loaded posts");
                PostRepository::new(posts)
            }
            Err(e) => {
                tracing::warn!(source = self.source.kind(), error = %e, "Content load failed, rendering empty listing");
                PostRepository::default()
            }
        }
    }

    /// Build the listing page for a filter state
    pub async fn page(&self, state: &FilterState) -> BlogPage {
        let repo = self.repository().await;
        self.page_from(&repo, state)
    }

    /// Build the listing page from an already loaded repository
    pub fn page_from(&self, repo: &PostRepository, state: &FilterState) -> BlogPage {
        let facets = compute_facets(repo.all());
        let filtered = apply_filters(repo.all(), state);
        let page = paginate(&filtered, state.page, self.page_size);

        tracing::debug!(
            matched = filtered.len(),
            page = page.current_page,
            total_pages = page.total_pages,
            "Filtered listing"
        );

        let filters = state.with_page(page.current_page);

        BlogPage {
            featured: repo
                .featured()
                .map(|post| self.presenter.to_featured_banner(post)),
            grid: self.presenter.to_card_grid(&page, &filters),
            domain_chips: self.presenter.to_domain_chips(&facets, &filters),
            tag_chips: self.presenter.to_tag_chips(&facets, &filters),
            empty: repo.is_empty(),
            filters,
        }
    }

    /// Single post page; `None` when the slug is unknown or the source fails
    pub async fn post(&self, slug: &str) -> Option<PostPage> {
        let post = match self.source.by_one(slug).await {
            Ok(found) => found?,
            Err(e) => {
                tracing::warn!(source = self.source.kind(), slug = %slug, error = %e, "Post lookup failed");
                return None;
            }
        };

        Some(PostPage {
            banner: self.presenter.to_featured_banner(&post),
            breadcrumbs: self.presenter.to_breadcrumbs(&post),
            post,
        })
    }

    /// Facet counts over everything the source offers
    pub async fn facets(&self) -> Facets {
        let repo = self.repository().await;
        compute_facets(repo.all())
    }

    /// Banner for the featured post, if there is any post at all
    pub async fn featured(&self) -> Option<FeaturedBannerView> {
        let repo = self.repository().await;
        repo.featured()
            .map(|post| self.presenter.to_featured_banner(post))
    }
}
