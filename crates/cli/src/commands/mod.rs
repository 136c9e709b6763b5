//! Subcommand implementations

pub mod config;
pub mod content;
pub mod doctor;
pub mod facets;
pub mod featured;
pub mod list;
pub mod show;

use folio_adapters::sources::{FsContentSource, GhostContentSource, StaticContentSource};
use folio_domain::ContentSource;
use folio_domain::usecases::{BlogListing, ListingConfig};
use secrecy::SecretString;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;

/// Pick the content source once, by configuration presence.
///
/// An explicit `--content-dir` wins. Otherwise a CMS URL with a usable key
/// selects Ghost, then the configured content directory, then an empty
/// source. Missing configuration never fails.
pub(crate) fn build_source(
    config: &AppConfig,
    content_dir: Option<&Path>,
) -> Arc<dyn ContentSource> {
    if let Some(dir) = content_dir {
        return fs_or_empty(config, dir);
    }

    if config.cms_configured() {
        match load_cms_key(&config.cms.key_env) {
            Some(key) => {
                let timeout = Duration::from_secs(config.cms.timeout_secs);
                match GhostContentSource::new(config.cms.url.trim(), key, timeout) {
                    Ok(source) => {
                        tracing::debug!(url = %config.cms.url, "Using CMS content source");
                        return Arc::new(source.with_strict(config.content.strict));
                    }
                    Err(e) => tracing::warn!(error = %e, "CMS client unavailable"),
                }
            }
            None => tracing::warn!(
                key_env = %config.cms.key_env,
                "CMS URL set but no content API key found, falling back to local content"
            ),
        }
    }

    fs_or_empty(config, &config.content.dir)
}

fn fs_or_empty(config: &AppConfig, dir: &Path) -> Arc<dyn ContentSource> {
    match FsContentSource::new(dir) {
        Ok(source) => {
            tracing::debug!(dir = %dir.display(), "Using filesystem content source");
            Arc::new(source.with_strict(config.content.strict))
        }
        Err(e) => {
            tracing::warn!(error = %e, "No content source available, serving no posts");
            Arc::new(StaticContentSource::empty())
        }
    }
}

/// Read the CMS key from the named env var; blank counts as absent
pub(crate) fn load_cms_key(env_var: &str) -> Option<SecretString> {
    if env_var.trim().is_empty() {
        return None;
    }

    std::env::var(env_var)
        .ok()
        .filter(|key| !key.trim().is_empty())
        .map(|key| SecretString::new(key.into()))
}

/// Listing use case over the selected source
pub(crate) fn build_listing(
    config: &AppConfig,
    content_dir: Option<&Path>,
    page_size: Option<usize>,
) -> BlogListing {
    BlogListing::new(
        build_source(config, content_dir),
        ListingConfig {
            base_url: config.site.base_url.clone(),
            page_size: page_size.unwrap_or(config.site.page_size),
        },
    )
}
