//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and content
//! backends. Adapters implement them to read from real infrastructure.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::model::Post;

/// Error type for content source operations
#[derive(Debug, Error)]
pub enum ContentError {
    /// A required field is missing; fatal for that record only
    #[error("Invalid record {record}: missing required field '{field}'")]
    Validation { record: String, field: &'static str },
    /// Content directory missing, CMS unreachable or refusing the request
    #[error("Content source unavailable: {0}")]
    Unavailable(String),
    /// CMS answered with a body that does not decode
    #[error("Invalid response format: {0}")]
    InvalidFormat(String),
}

impl ContentError {
    /// Whether this error concerns a single record rather than the source
    pub fn is_record_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Port for reading blog posts from a content backend
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Load every valid post.
    ///
    /// Records failing validation are skipped (and logged) unless the source
    /// runs in strict mode, in which case the first failure is returned.
    async fn load_all(&self) -> Result<Vec<Post>, ContentError>;

    /// Load a single post by slug; `Ok(None)` when no post has that slug
    async fn by_one(&self, slug: &str) -> Result<Option<Post>, ContentError>;

    /// Short backend name for logs and diagnostics (e.g., "fs", "ghost")
    fn kind(&self) -> &'static str;
}

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}
