//! Field normalization from raw source records into [`Post`]
//!
//! Each field has one normalization function and one documented default:
//!
//! | Field       | Required | Default if absent or malformed                    |
//! |-------------|----------|---------------------------------------------------|
//! | `id`        | yes      | validation error                                  |
//! | `slug`      | yes      | validation error (slugified when present)         |
//! | `title`     | yes      | validation error                                  |
//! | `excerpt`   | no       | empty string                                      |
//! | `content`   | no       | empty string                                      |
//! | `date`      | no       | current time                                      |
//! | `author`    | no       | [`DEFAULT_AUTHOR`]                                |
//! | `tags`      | no       | empty list                                        |
//! | `domain`    | no       | [`Domain::FullStack`]                             |
//! | `readTime`  | no       | estimate at [`WORDS_PER_MINUTE`], at least 1      |
//! | `featured`  | no       | `false`                                           |
//! | `imageUrl`  | no       | none                                              |

use regex::Regex;
use std::sync::LazyLock;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::model::{Domain, Post, RawDate, RawPost, RawTags};
use crate::ports::ContentError;

/// Author used when a record names none
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// Reading speed used to estimate read time
pub const WORDS_PER_MINUTE: usize = 200;

static NON_SLUG_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("Valid regex"));

static MARKUP_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Valid regex"));

/// Normalize a raw record into a [`Post`].
///
/// Fails only when `id`, `slug` or `title` is missing; everything else falls
/// back to the default table above.
pub fn normalize_post(raw: RawPost, now: OffsetDateTime) -> Result<Post, ContentError> {
    let origin = raw.origin;

    let id = require(raw.id, "id", &origin)?;
    let slug = raw
        .slug
        .as_deref()
        .and_then(normalize_slug)
        .ok_or_else(|| ContentError::Validation {
            record: origin.clone(),
            field: "slug",
        })?;
    let title = require(raw.title, "title", &origin)?;

    let content = non_blank(raw.content).unwrap_or_default();
    let read_time_minutes = normalize_read_time(raw.read_time.as_deref(), &content);

    Ok(Post {
        id,
        slug,
        title,
        excerpt: non_blank(raw.excerpt).unwrap_or_default(),
        published_at: normalize_date(raw.date, now),
        author: non_blank(raw.author).unwrap_or_else(|| DEFAULT_AUTHOR.to_string()),
        tags: normalize_tags(raw.tags),
        domain: normalize_domain(raw.domain.as_deref()),
        read_time_minutes,
        featured: raw.featured.unwrap_or(false),
        image_url: non_blank(raw.image_url),
        content,
    })
}

/// Outcome of normalizing a batch of raw records
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Records that normalized cleanly, in input order
    pub posts: Vec<Post>,
    /// One error per rejected record
    pub rejected: Vec<ContentError>,
}

impl LoadReport {
    /// Apply the load policy.
    ///
    /// Strict mode turns the first rejected record into an error for the
    /// whole load; otherwise rejected records are logged and skipped.
    pub fn into_posts(self, strict: bool, source: &str) -> Result<Vec<Post>, ContentError> {
        if strict {
            if let Some(first) = self.rejected.into_iter().next() {
                return Err(first);
            }
            return Ok(self.posts);
        }

        for error in &self.rejected {
            tracing::warn!(source = %source, error = %error, "Skipping invalid record");
        }
        Ok(self.posts)
    }
}

/// Normalize every record, isolating failures per record
pub fn normalize_batch<I>(records: I, now: OffsetDateTime) -> LoadReport
where
    I: IntoIterator<Item = RawPost>,
{
    let mut report = LoadReport::default();
    for raw in records {
        match normalize_post(raw, now) {
            Ok(post) => report.posts.push(post),
            Err(e) => report.rejected.push(e),
        }
    }
    report
}

fn require(
    value: Option<String>,
    field: &'static str,
    origin: &str,
) -> Result<String, ContentError> {
    non_blank(value).ok_or_else(|| ContentError::Validation {
        record: origin.to_string(),
        field,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Lowercase and collapse everything outside `[a-z0-9]` into single dashes.
///
/// Returns `None` when nothing URL-safe is left.
pub fn normalize_slug(value: &str) -> Option<String> {
    let lowered = value.trim().to_lowercase();
    let slug = NON_SLUG_CHARS.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');

    if slug.is_empty() {
        None
    } else {
        Some(slug.to_string())
    }
}

/// Accept a list or a comma-separated string; trim, drop empties and
/// case-insensitive duplicates. Never fails.
pub fn normalize_tags(value: Option<RawTags>) -> Vec<String> {
    let candidates: Vec<String> = match value {
        None => return Vec::new(),
        Some(RawTags::List(items)) => items,
        Some(RawTags::Text(text)) => text.split(',').map(str::to_string).collect(),
    };

    let mut tags: Vec<String> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let tag = candidate.trim().trim_matches('"').trim_matches('\'').trim();
        if tag.is_empty() || tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            continue;
        }
        tags.push(tag.to_string());
    }
    tags
}

/// Accept a timestamp or ISO-8601 text; anything else becomes `now`.
pub fn normalize_date(value: Option<RawDate>, now: OffsetDateTime) -> OffsetDateTime {
    match value {
        Some(RawDate::Timestamp(ts)) => ts.to_offset(UtcOffset::UTC),
        Some(RawDate::Text(text)) => parse_date_text(&text).unwrap_or_else(|| {
            tracing::debug!(value = %text, "Unparseable date, using current time");
            now
        }),
        None => now,
    }
}

/// Parse one of the accepted date forms, in UTC
pub fn parse_date_text(text: &str) -> Option<OffsetDateTime> {
    let text = text.trim().trim_matches('"').trim_matches('\'');

    if let Ok(ts) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(ts.to_offset(UtcOffset::UTC));
    }

    let spaced = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    if let Ok(dt) = PrimitiveDateTime::parse(text, &spaced) {
        return Some(dt.assume_utc());
    }

    let t_separated = format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
    if let Ok(dt) = PrimitiveDateTime::parse(text, &t_separated) {
        return Some(dt.assume_utc());
    }

    let date_only = format_description!("[year]-[month]-[day]");
    Date::parse(text, &date_only)
        .ok()
        .map(|d| d.midnight().assume_utc())
}

/// Closed-set domain; malformed or missing values become `Full-Stack`.
pub fn normalize_domain(value: Option<&str>) -> Domain {
    match value {
        Some(raw) => Domain::parse_lenient(raw).unwrap_or_else(|| {
            tracing::debug!(value = %raw, "Unknown domain, using default");
            Domain::default()
        }),
        None => Domain::default(),
    }
}

/// Leading integer of the raw value ("5", "5 min"), else an estimate from
/// the content. Always at least 1.
pub fn normalize_read_time(value: Option<&str>, content: &str) -> u32 {
    let explicit = value.and_then(|raw| {
        let digits: String = raw
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse::<u32>().ok()
    });

    explicit
        .unwrap_or_else(|| estimate_read_time(content))
        .max(1)
}

/// Minutes to read `content` at [`WORDS_PER_MINUTE`], rounded up, markup
/// tags excluded.
pub fn estimate_read_time(content: &str) -> u32 {
    let text = MARKUP_TAG.replace_all(content, " ");
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}
