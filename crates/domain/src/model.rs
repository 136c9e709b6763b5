//! Domain models and value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Technical category a post belongs to
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Domain {
    Firmware,
    DevOps,
    Security,
    #[default]
    #[serde(rename = "Full-Stack")]
    FullStack,
    Projects,
}

impl Domain {
    /// All domains in display order
    pub const ALL: [Domain; 5] = [
        Domain::Firmware,
        Domain::DevOps,
        Domain::Security,
        Domain::FullStack,
        Domain::Projects,
    ];

    /// Human-readable name, also used as the serialized form
    pub const fn label(self) -> &'static str {
        match self {
            Self::Firmware => "Firmware",
            Self::DevOps => "DevOps",
            Self::Security => "Security",
            Self::FullStack => "Full-Stack",
            Self::Projects => "Projects",
        }
    }

    /// URL form used in query strings
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Firmware => "firmware",
            Self::DevOps => "devops",
            Self::Security => "security",
            Self::FullStack => "full-stack",
            Self::Projects => "projects",
        }
    }

    /// Accent colour token for badges and cards
    pub const fn color(self) -> &'static str {
        match self {
            Self::Firmware => "amber",
            Self::DevOps => "sky",
            Self::Security => "rose",
            Self::FullStack => "emerald",
            Self::Projects => "violet",
        }
    }

    /// Lenient parse: case-insensitive, ignores `-`, `_` and whitespace
    pub fn parse_lenient(value: &str) -> Option<Self> {
        let folded: String = value
            .chars()
            .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        match folded.as_str() {
            "firmware" => Some(Self::Firmware),
            "devops" => Some(Self::DevOps),
            "security" => Some(Self::Security),
            "fullstack" => Some(Self::FullStack),
            "projects" => Some(Self::Projects),
            _ => None,
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string names no known domain
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown domain: {0}")]
pub struct UnknownDomain(pub String);

impl FromStr for Domain {
    type Err = UnknownDomain;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| UnknownDomain(s.to_string()))
    }
}

/// A normalized blog post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Source-assigned identifier
    pub id: String,
    /// URL-safe slug, unique within a repository
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    /// Rich text or markup body
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub published_at: OffsetDateTime,
    pub author: String,
    /// Ordered, de-duplicated tag names
    pub tags: Vec<String>,
    pub domain: Domain,
    /// Always at least 1
    pub read_time_minutes: u32,
    pub featured: bool,
    pub image_url: Option<String>,
}

impl Post {
    /// Tag membership, ignoring ASCII case
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }
}

/// Tags as they appear in source data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawTags {
    /// Native list
    List(Vec<String>),
    /// Comma-separated string
    Text(String),
}

/// Publication date as it appears in source data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawDate {
    /// Already a timestamp
    Timestamp(OffsetDateTime),
    /// ISO-8601 text, possibly malformed
    Text(String),
}

/// An un-normalized record produced by a content source adapter
///
/// Every field is optional; [`crate::normalize::normalize_post`] applies the
/// required-field checks and the default table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawPost {
    /// Where the record came from (file path, CMS id), used in diagnostics
    pub origin: String,
    pub id: Option<String>,
    pub slug: Option<String>,
    pub title: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub date: Option<RawDate>,
    pub author: Option<String>,
    pub tags: Option<RawTags>,
    pub domain: Option<String>,
    pub read_time: Option<String>,
    pub featured: Option<bool>,
    pub image_url: Option<String>,
}

/// Number of posts sharing a facet value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub key: String,
    pub count: usize,
}

/// Domain and tag counts over an unfiltered post set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facets {
    /// One entry per domain, in [`Domain::ALL`] order
    pub domain_counts: Vec<FacetCount>,
    /// Sorted by count descending, then key ascending ignoring ASCII case
    pub tag_counts: Vec<FacetCount>,
}

impl Facets {
    /// Count for a single domain
    pub fn domain_count(&self, domain: Domain) -> usize {
        self.domain_counts
            .iter()
            .find(|f| f.key == domain.label())
            .map(|f| f.count)
            .unwrap_or(0)
    }

    /// Count for a single tag (case-insensitive)
    pub fn tag_count(&self, tag: &str) -> usize {
        self.tag_counts
            .iter()
            .find(|f| f.key.eq_ignore_ascii_case(tag))
            .map(|f| f.count)
            .unwrap_or(0)
    }
}

/// Caller-owned filter selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub selected_domain: Option<Domain>,
    pub selected_tag: Option<String>,
    /// 1-indexed
    pub page: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_domain: None,
            selected_tag: None,
            page: 1,
        }
    }
}

impl FilterState {
    /// Build a filter state from untrusted query values.
    ///
    /// Unknown domains, blank tags and unparseable or zero pages fall back to
    /// "no filter" and page 1.
    pub fn from_query(domain: Option<&str>, tag: Option<&str>, page: Option<&str>) -> Self {
        let selected_domain = domain.and_then(Domain::parse_lenient);
        let selected_tag = tag
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);
        let page = page
            .and_then(|p| p.trim().parse::<usize>().ok())
            .filter(|p| *p > 0)
            .unwrap_or(1);

        Self {
            selected_domain,
            selected_tag,
            page,
        }
    }

    /// Same filters, different page
    pub fn with_page(&self, page: usize) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Whether any filter is active
    pub fn is_filtered(&self) -> bool {
        self.selected_domain.is_some() || self.selected_tag.is_some()
    }
}

/// One window of a paginated sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed, always within `1..=total_pages`
    pub current_page: usize,
    /// At least 1, even for an empty sequence
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_parse_lenient() {
        assert_eq!(Domain::parse_lenient("DevOps"), Some(Domain::DevOps));
        assert_eq!(Domain::parse_lenient("devops"), Some(Domain::DevOps));
        assert_eq!(Domain::parse_lenient("Full-Stack"), Some(Domain::FullStack));
        assert_eq!(Domain::parse_lenient("full stack"), Some(Domain::FullStack));
        assert_eq!(Domain::parse_lenient("FULL_STACK"), Some(Domain::FullStack));
        assert_eq!(Domain::parse_lenient("gardening"), None);
        assert_eq!(Domain::parse_lenient(""), None);
    }

    #[test]
    fn test_domain_serializes_with_label() {
        let json = serde_json::to_string(&Domain::FullStack).unwrap();
        assert_eq!(json, "\"Full-Stack\"");

        let parsed: Domain = serde_json::from_str("\"DevOps\"").unwrap();
        assert_eq!(parsed, Domain::DevOps);
    }

    #[test]
    fn test_domain_from_str_error() {
        let err = "cooking".parse::<Domain>().unwrap_err();
        assert_eq!(err, UnknownDomain("cooking".to_string()));
    }

    #[test]
    fn test_filter_state_from_query() {
        let state = FilterState::from_query(Some("security"), Some("  rust "), Some("3"));
        assert_eq!(state.selected_domain, Some(Domain::Security));
        assert_eq!(state.selected_tag.as_deref(), Some("rust"));
        assert_eq!(state.page, 3);
    }

    #[test]
    fn test_filter_state_invalid_query_falls_back() {
        let state = FilterState::from_query(Some("cooking"), Some("   "), Some("zero"));
        assert_eq!(state, FilterState::default());

        let state = FilterState::from_query(None, None, Some("0"));
        assert_eq!(state.page, 1);
        assert!(!state.is_filtered());
    }
}
