//! Application use cases / business logic

pub mod filter;
pub mod listing;
pub mod present;

pub use filter::{DEFAULT_PAGE_SIZE, apply_filters, compute_facets, paginate};
pub use listing::{BlogListing, BlogPage, ListingConfig, PostPage};
pub use present::{
    Breadcrumb, CardGridView, CardView, FeaturedBannerView, FilterChip, PresentConfig, Presenter,
};
