//! Request-scoped, read-only post collection

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::model::{Domain, Post};

/// In-memory collection of normalized posts for one request.
///
/// Posts are kept in the default order: `published_at` descending, ties
/// broken by `id` ascending. Slugs are unique.
#[derive(Debug, Clone, Default)]
pub struct PostRepository {
    posts: Vec<Post>,
}

impl PostRepository {
    /// Build a repository, sorting posts and dropping duplicate slugs.
    ///
    /// When two posts share a slug the one that sorts first is kept.
    pub fn new(mut posts: Vec<Post>) -> Self {
        posts.sort_by(default_order);

        let mut seen: HashSet<String> = HashSet::with_capacity(posts.len());
        posts.retain(|post| {
            if seen.insert(post.slug.clone()) {
                true
            } else {
                tracing::warn!(slug = %post.slug, id = %post.id, "Dropping post with duplicate slug");
                false
            }
        });

        Self { posts }
    }

    /// All posts in default order
    pub fn all(&self) -> &[Post] {
        &self.posts
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// The post with this exact slug, if any
    pub fn by_slug(&self, slug: &str) -> Option<&Post> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// First post flagged as featured, else the most recent one
    pub fn featured(&self) -> Option<&Post> {
        self.posts
            .iter()
            .find(|p| p.featured)
            .or_else(|| self.posts.first())
    }

    /// Posts in a domain, default order
    pub fn by_domain(&self, domain: Domain) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.domain == domain).collect()
    }

    /// Posts carrying a tag (case-insensitive), default order
    pub fn by_tag(&self, tag: &str) -> Vec<&Post> {
        self.posts.iter().filter(|p| p.has_tag(tag)).collect()
    }
}

impl From<Vec<Post>> for PostRepository {
    fn from(posts: Vec<Post>) -> Self {
        Self::new(posts)
    }
}

/// `published_at` descending, then `id` ascending
pub fn default_order(a: &Post, b: &Post) -> Ordering {
    b.published_at
        .cmp(&a.published_at)
        .then_with(|| a.id.cmp(&b.id))
}
