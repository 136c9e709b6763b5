//! Ghost Content API adapter for fetching posts

use async_trait::async_trait;
use folio_domain::normalize::{normalize_batch, normalize_post, normalize_slug, parse_date_text};
use folio_domain::{
    Clock, ContentError, ContentSource, Domain, Post, RawDate, RawPost, RawTags, SystemClock,
};
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

const POSTS_PATH: &str = "/ghost/api/content/posts/";
const INCLUDE: &str = "tags,authors";

/// Ghost CMS content source
pub struct GhostContentSource {
    client: Client,
    base_url: String,
    api_key: SecretString,
    strict: bool,
    clock: Arc<dyn Clock>,
}

impl GhostContentSource {
    /// Create a client for the Ghost site at `base_url`
    pub fn new(
        base_url: impl Into<String>,
        api_key: SecretString,
        timeout: Duration,
    ) -> Result<Self, ContentError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ContentError::Unavailable(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            strict: false,
            clock: Arc::new(SystemClock),
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

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, url: &str, extra: &[(&str, &str)]) -> Result<Response, ContentError> {
        let mut query: Vec<(&str, &str)> =
            vec![("key", self.api_key.expose_secret()), ("include", INCLUDE)];
        query.extend_from_slice(extra);

        self.client
            .get(url)
            .header("Accept-Version", "v5.0")
            .query(&query)
            .send()
            .await
            .map_err(|e| ContentError::Unavailable(format!("CMS request failed: {e}")))
    }

    async fn decode(response: Response) -> Result<Vec<GhostPost>, ContentError> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ContentError::Unavailable(
                "CMS rejected the content API key".to_string(),
            ));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ContentError::Unavailable(format!(
                "CMS returned {}: {}",
                status, body
            )));
        }

        let posts: PostsResponse = response
            .json()
            .await
            .map_err(|e| ContentError::InvalidFormat(e.to_string()))?;

        Ok(posts.posts)
    }
}

#[derive(Deserialize)]
struct PostsResponse {
    #[serde(default)]
    posts: Vec<GhostPost>,
}

#[derive(Deserialize)]
struct GhostPost {
    id: Option<String>,
    slug: Option<String>,
    title: Option<String>,
    html: Option<String>,
    excerpt: Option<String>,
    custom_excerpt: Option<String>,
    feature_image: Option<String>,
    featured: Option<bool>,
    published_at: Option<String>,
    updated_at: Option<String>,
    #[serde(default)]
    tags: Vec<GhostTag>,
    #[serde(default)]
    authors: Vec<GhostAuthor>,
    reading_time: Option<u32>,
}

#[derive(Deserialize)]
struct GhostTag {
    name: Option<String>,
}

#[derive(Deserialize)]
struct GhostAuthor {
    name: Option<String>,
}

impl GhostPost {
    /// Map the CMS shape onto the shared raw record
    fn into_raw(self) -> RawPost {
        let origin = format!("ghost:{}", self.id.as_deref().unwrap_or("<no id>"));

        // Internal tags (#name) drive Ghost theming, not content
        let tags: Vec<String> = self
            .tags
            .into_iter()
            .filter_map(|t| t.name)
            .filter(|name| !name.starts_with('#'))
            .collect();

        let domain = tags
            .iter()
            .find(|name| Domain::parse_lenient(name).is_some())
            .cloned();

        // An unparseable published_at still leaves updated_at to try
        let date = [self.published_at, self.updated_at]
            .into_iter()
            .flatten()
            .find_map(|text| parse_date_text(&text))
            .map(RawDate::Timestamp);

        let excerpt = self
            .custom_excerpt
            .filter(|e| !e.trim().is_empty())
            .or(self.excerpt);

        RawPost {
            origin,
            id: self.id,
            slug: self.slug,
            title: self.title,
            excerpt,
            content: self.html,
            date,
            author: self.authors.into_iter().find_map(|a| a.name),
            tags: Some(RawTags::List(tags)),
            domain,
            read_time: self
                .reading_time
                .filter(|minutes| *minutes > 0)
                .map(|minutes| minutes.to_string()),
            featured: self.featured,
            image_url: self.feature_image,
        }
    }
}

#[async_trait]
impl ContentSource for GhostContentSource {
    async fn load_all(&self) -> Result<Vec<Post>, ContentError> {
        tracing::info!(base_url = %self.base_url, "Fetching posts from CMS");

        let url = format!("{}{}", self.base_url, POSTS_PATH);
        let response = self.get(&url, &[("limit", "all")]).await?;
        let posts = Self::decode(response).await?;

        let report = normalize_batch(posts.into_iter().map(GhostPost::into_raw), self.clock.now());

        tracing::info!(
            count = report.posts.len(),
            rejected = report.rejected.len(),
            "Fetched posts"
        );

        report.into_posts(self.strict, self.kind())
    }

    async fn by_one(&self, slug: &str) -> Result<Option<Post>, ContentError> {
        let Some(slug) = normalize_slug(slug) else {
            return Ok(None);
        };

        let url = format!("{}{}slug/{}/", self.base_url, POSTS_PATH, slug);
        let response = self.get(&url, &[]).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let Some(post) = Self::decode(response).await?.into_iter().next() else {
            return Ok(None);
        };

        match normalize_post(post.into_raw(), self.clock.now()) {
            Ok(post) => Ok(Some(post)),
            Err(e) if !self.strict => {
                tracing::warn!(slug = %slug, error = %e, "Skipping invalid record");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    fn kind(&self) -> &'static str {
        "ghost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_domain::FixedClock;
    use time::macros::datetime;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer) -> GhostContentSource {
        GhostContentSource::new(
            server.uri(),
            SecretString::new("test-key".into()),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_clock(Arc::new(FixedClock(datetime!(2025-01-01 0:00 UTC))))
    }

    fn sample_posts() -> serde_json::Value {
        serde_json::json!({
            "posts": [
                {
                    "id": "64a1",
                    "slug": "rust-on-esp32",
                    "title": "Rust on the ESP32",
                    "html": "<p>Blinky first.</p>",
                    "excerpt": "Auto excerpt",
                    "custom_excerpt": "Hand-written excerpt",
                    "feature_image": "https://cdn.example/esp32.jpg",
                    "featured": true,
                    "published_at": "2024-04-02T08:00:00.000+00:00",
                    "updated_at": "2024-04-03T08:00:00.000+00:00",
                    "reading_time": 4,
                    "tags": [
                        {"name": "#wide-layout"},
                        {"name": "Firmware"},
                        {"name": "esp32"}
                    ],
                    "authors": [{"name": "Robin"}]
                },
                {
                    "id": "64a2",
                    "slug": "draft-notes",
                    "title": "Draft notes",
                    "html": null,
                    "excerpt": "Fallback excerpt",
                    "custom_excerpt": null,
                    "published_at": null,
                    "updated_at": "2024-03-01T10:00:00.000Z",
                    "reading_time": 0,
                    "tags": [],
                    "authors": []
                },
                {
                    "id": "64a3",
                    "slug": "untitled"
                }
            ]
        })
    }

    #[tokio::test]
    async fn test_load_all_maps_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ghost/api/content/posts/"))
            .and(query_param("key", "test-key"))
            .and(query_param("include", "tags,authors"))
            .and(query_param("limit", "all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_posts()))
            .mount(&mock_server)
            .await;

        let posts = source(&mock_server).load_all().await.unwrap();

        // The untitled record is skipped, the rest load
        assert_eq!(posts.len(), 2);

        let esp = &posts[0];
        assert_eq!(esp.id, "64a1");
        assert_eq!(esp.excerpt, "Hand-written excerpt");
        assert_eq!(esp.content, "<p>Blinky first.</p>");
        assert_eq!(esp.image_url.as_deref(), Some("https://cdn.example/esp32.jpg"));
        assert_eq!(esp.published_at, datetime!(2024-04-02 8:00 UTC));
        assert_eq!(esp.tags, vec!["Firmware", "esp32"]);
        assert_eq!(esp.domain, Domain::Firmware);
        assert_eq!(esp.author, "Robin");
        assert_eq!(esp.read_time_minutes, 4);
        assert!(esp.featured);

        let draft = &posts[1];
        assert_eq!(draft.excerpt, "Fallback excerpt");
        assert_eq!(draft.published_at, datetime!(2024-03-01 10:00 UTC));
        assert_eq!(draft.domain, Domain::FullStack);
        assert_eq!(draft.author, "Anonymous");
        assert_eq!(draft.read_time_minutes, 1);
        assert!(draft.tags.is_empty());
        assert!(!draft.featured);
    }

    #[test]
    fn test_bad_published_at_falls_back_to_updated_at() {
        let post: GhostPost = serde_json::from_value(serde_json::json!({
            "id": "64b1",
            "slug": "migrated",
            "title": "Migrated post",
            "published_at": "sometime last spring",
            "updated_at": "2024-05-06T07:08:09.000Z"
        }))
        .unwrap();

        let raw = post.into_raw();

        assert_eq!(
            raw.date,
            Some(RawDate::Timestamp(datetime!(2024-05-06 7:08:09 UTC)))
        );
    }

    #[tokio::test]
    async fn test_strict_load_fails_on_invalid_record() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ghost/api/content/posts/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_posts()))
            .mount(&mock_server)
            .await;

        let result = source(&mock_server).with_strict(true).load_all().await;

        assert!(matches!(
            result,
            Err(ContentError::Validation { field: "title", .. })
        ));
    }

    #[tokio::test]
    async fn test_by_one_found_and_missing() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ghost/api/content/posts/slug/rust-on-esp32/"))
            .and(query_param("key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "posts": [{
                    "id": "64a1",
                    "slug": "rust-on-esp32",
                    "title": "Rust on the ESP32",
                    "published_at": "2024-04-02T08:00:00.000Z"
                }]
            })))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/ghost/api/content/posts/slug/missing/"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "errors": [{"message": "Resource not found", "type": "NotFoundError"}]
            })))
            .mount(&mock_server)
            .await;

        let source = source(&mock_server);

        let found = source.by_one("rust-on-esp32").await.unwrap();
        assert_eq!(found.map(|p| p.title), Some("Rust on the ESP32".to_string()));

        assert!(source.by_one("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejected_key_is_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ghost/api/content/posts/"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let result = source(&mock_server).load_all().await;

        assert!(matches!(result, Err(ContentError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_server_error_is_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ghost/api/content/posts/"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&mock_server)
            .await;

        let result = source(&mock_server).load_all().await;

        match result {
            Err(ContentError::Unavailable(message)) => assert!(message.contains("maintenance")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_format() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/ghost/api/content/posts/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&mock_server)
            .await;

        let result = source(&mock_server).load_all().await;

        assert!(matches!(result, Err(ContentError::InvalidFormat(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_unavailable() {
        let source = GhostContentSource::new(
            "http://127.0.0.1:9",
            SecretString::new("test-key".into()),
            Duration::from_secs(2),
        )
        .unwrap();

        let result = source.load_all().await;

        assert!(matches!(result, Err(ContentError::Unavailable(_))));
    }
}
