//! Filesystem-based content source (Markdown/MDX with front-matter)

use async_trait::async_trait;
use folio_domain::normalize::{LoadReport, normalize_batch, normalize_slug};
use folio_domain::{
    Clock, ContentError, ContentSource, Post, PostRepository, RawDate, RawPost, RawTags, SystemClock,
};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const CONTENT_EXTENSIONS: &[&str] = &["md", "mdx"];

/// Filesystem content source
pub struct FsContentSource {
    content_dir: PathBuf,
    strict: bool,
    clock: Arc<dyn Clock>,
    key_pattern: Regex,
}

impl FsContentSource {
    /// Create a new filesystem content source
    pub fn new(content_dir: impl AsRef<Path>) -> Result<Self, ContentError> {
        let content_dir = content_dir.as_ref().to_path_buf();

        if !content_dir.is_dir() {
            return Err(ContentError::Unavailable(format!(
                "Content directory not found: {}",
                content_dir.display()
            )));
        }

        let key_pattern =
            Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*)\s*:\s*(.*)$").expect("Valid regex");

        Ok(Self {
            content_dir,
            strict: false,
            clock: Arc::new(SystemClock),
            key_pattern,
        })
    }

    /// Fail the whole load on the first invalid record
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Clock used for records without a usable date
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// Read and normalize every content file, keeping rejected records
    pub async fn scan(&self) -> Result<LoadReport, ContentError> {
        let files = self.content_files().await?;
        let mut records = Vec::with_capacity(files.len());
        let mut unreadable = Vec::new();

        for path in files {
            match tokio::fs::read_to_string(&path).await {
                Ok(text) => records.push(self.parse_record(&path, &text)),
                Err(e) => unreadable.push(ContentError::Unavailable(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                ))),
            }
        }

        let mut report = normalize_batch(records, self.clock.now());
        report.rejected.extend(unreadable);

        tracing::debug!(
            dir = %self.content_dir.display(),
            loaded = report.posts.len(),
            rejected = report.rejected.len(),
            "Scanned content directory"
        );

        Ok(report)
    }

    /// Content files sorted by file name
    async fn content_files(&self) -> Result<Vec<PathBuf>, ContentError> {
        let unavailable = |e: std::io::Error| {
            ContentError::Unavailable(format!(
                "Failed to read content directory {}: {}",
                self.content_dir.display(),
                e
            ))
        };

        let mut entries = tokio::fs::read_dir(&self.content_dir)
            .await
            .map_err(unavailable)?;
        let mut files = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(unavailable)? {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let extension = path.extension().and_then(|e| e.to_str());
            if !extension.is_some_and(|ext| CONTENT_EXTENSIONS.contains(&ext)) {
                continue;
            }

            files.push(path);
        }

        files.sort();
        Ok(files)
    }

    /// Turn one file into a raw record
    fn parse_record(&self, path: &Path, text: &str) -> RawPost {
        let (fields, body) = self.parse_frontmatter(text);
        let mut raw = RawPost {
            origin: path.display().to_string(),
            ..Default::default()
        };

        for (key, value) in fields {
            match key.as_str() {
                "id" => raw.id = Some(value.into_scalar()),
                "slug" => raw.slug = Some(value.into_scalar()),
                "title" => raw.title = Some(value.into_scalar()),
                "excerpt" | "description" | "summary" => raw.excerpt = Some(value.into_scalar()),
                "content" => raw.content = Some(value.into_scalar()),
                "date" | "publishedAt" | "published_at" => {
                    raw.date = Some(RawDate::Text(value.into_scalar()))
                }
                "author" => raw.author = Some(value.into_scalar()),
                "tags" => {
                    raw.tags = Some(match value {
                        FrontValue::List(items) => RawTags::List(items),
                        FrontValue::Scalar(text) => RawTags::Text(text),
                    })
                }
                "domain" | "category" => raw.domain = Some(value.into_scalar()),
                "readTime" | "read_time" | "readingTime" => {
                    raw.read_time = Some(value.into_scalar())
                }
                "featured" => raw.featured = parse_bool(&value.into_scalar()),
                "imageUrl" | "image_url" | "image" => raw.image_url = Some(value.into_scalar()),
                other => tracing::trace!(key = %other, file = %path.display(), "Ignoring front-matter key"),
            }
        }

        if raw.content.is_none() {
            raw.content = Some(body);
        }

        raw
    }

    /// Split front-matter from body.
    ///
    /// The block opens with a `---` first line and closes at the next line
    /// that is exactly `---`. Without both markers the whole text is body.
    fn parse_frontmatter(&self, content: &str) -> (Vec<(String, FrontValue)>, String) {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut lines = content.lines();

        if lines.next().map(str::trim_end) != Some("---") {
            return (Vec::new(), content.trim().to_string());
        }

        let mut block = Vec::new();
        let mut closed = false;
        for line in lines.by_ref() {
            if line.trim_end() == "---" {
                closed = true;
                break;
            }
            block.push(line);
        }

        if !closed {
            return (Vec::new(), content.trim().to_string());
        }

        let body = lines.collect::<Vec<_>>().join("\n").trim().to_string();
        (self.parse_simple_yaml(&block), body)
    }

    /// Simple YAML-like front-matter parser (not full YAML).
    ///
    /// Handles `key: value`, inline lists `[a, b]`, block lists of `- item`
    /// lines, and `|` / `>` multi-line scalars.
    fn parse_simple_yaml(&self, lines: &[&str]) -> Vec<(String, FrontValue)> {
        let mut fields = Vec::new();
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i];
            i += 1;

            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let Some(caps) = self.key_pattern.captures(trimmed) else {
                continue;
            };
            let key = caps[1].to_string();
            let value = caps[2].trim();

            let parsed = if value.is_empty() {
                let mut items = Vec::new();
                while i < lines.len() {
                    let next = lines[i].trim();
                    if let Some(item) = next.strip_prefix("- ") {
                        items.push(unquote(item.trim()).to_string());
                        i += 1;
                    } else if next == "-" || next.is_empty() {
                        i += 1;
                    } else {
                        break;
                    }
                }
                if items.is_empty() {
                    continue;
                }
                FrontValue::List(items)
            } else if value == "|" || value == ">" {
                let mut parts = Vec::new();
                while i < lines.len() && (lines[i].starts_with([' ', '\t']) || lines[i].trim().is_empty()) {
                    parts.push(lines[i].trim());
                    i += 1;
                }
                let separator = if value == "|" { "\n" } else { " " };
                FrontValue::Scalar(parts.join(separator).trim().to_string())
            } else if value.starts_with('[') && value.ends_with(']') {
                FrontValue::List(
                    value[1..value.len() - 1]
                        .split(',')
                        .map(|s| unquote(s.trim()).to_string())
                        .filter(|s| !s.is_empty())
                        .collect(),
                )
            } else {
                FrontValue::Scalar(unquote(value).to_string())
            };

            fields.push((key, parsed));
        }

        fields
    }
}

/// A front-matter value before normalization
#[derive(Debug, Clone, PartialEq, Eq)]
enum FrontValue {
    Scalar(String),
    List(Vec<String>),
}

impl FrontValue {
    fn into_scalar(self) -> String {
        match self {
            Self::Scalar(s) => s,
            Self::List(items) => items.join(", "),
        }
    }
}

/// Strip one pair of matching surrounding quotes
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[async_trait]
impl ContentSource for FsContentSource {
    async fn load_all(&self) -> Result<Vec<Post>, ContentError> {
        let report = self.scan().await?;
        report.into_posts(self.strict, self.kind())
    }

    async fn by_one(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        let Some(wanted) = normalize_slug(slug) else {
            return Ok(None);
        };

        // Same duplicate-slug resolution as the listing
        let repo = PostRepository::new(self.load_all().await?);
        Ok(repo.by_slug(&wanted).cloned())
    }

    fn kind(&self) -> &'static str {
        "fs"
    }
}
