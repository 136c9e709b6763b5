//! In-memory content source

use async_trait::async_trait;
use folio_domain::normalize::{normalize_batch, normalize_slug};
use folio_domain::{
    Clock, ContentError, ContentSource, Post, PostRepository, RawPost, SystemClock,
};
use std::sync::Arc;

/// Content source over a fixed list of raw records.
///
/// Used when no content backend is configured, and in tests.
pub struct StaticContentSource {
    records: Vec<RawPost>,
    clock: Arc<dyn Clock>,
}

impl StaticContentSource {
    /// Source with no posts
    pub fn empty() -> Self {
        Self::with_records(vec![])
    }

    /// Source with predefined raw records
    pub fn with_records(records: Vec<RawPost>) -> Self {
        Self {
            records,
            clock: Arc::new(SystemClock),
        }
    }

    /// Clock used for records without a usable date
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

impl Default for StaticContentSource {
    fn default() -> Self {
        Self::empty()
    }
}

#[async_trait]
impl ContentSource for StaticContentSource {
    async fn load_all(&self) -> Result<Vec<Post>, ContentError> {
        normalize_batch(self.records.iter().cloned(), self.clock.now()).into_posts(false, self.kind())
    }

    async fn by_one(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        let Some(wanted) = normalize_slug(slug) else {
            return Ok(None);
        };
        let repo = PostRepository::new(self.load_all().await?);
        Ok(repo.by_slug(&wanted).cloned())
    }

    fn kind(&self) -> &'static str {
        "static"
    }
}
