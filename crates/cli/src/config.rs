//! Configuration loading and management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub cms: CmsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,

    /// Abort the whole load on the first invalid record
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CmsConfig {
    /// Ghost site URL; empty disables the CMS
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_cms_key_env")]
    pub key_env: String,

    #[serde(default = "default_cms_timeout")]
    pub timeout_secs: u64,
}

// Default value functions
fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_page_size() -> usize {
    folio_domain::usecases::DEFAULT_PAGE_SIZE
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("./content/blog")
}

fn default_cms_key_env() -> String {
    "GHOST_CONTENT_API_KEY".to_string()
}

fn default_cms_timeout() -> u64 {
    10
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
            strict: false,
        }
    }
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            key_env: default_cms_key_env(),
            timeout_secs: default_cms_timeout(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./folio.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("FOLIO")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Whether a CMS endpoint is configured (the key may still be missing)
    pub fn cms_configured(&self) -> bool {
        !self.cms.url.trim().is_empty()
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# folio configuration

[site]
base_url = "http://localhost:3000"
page_size = 10

[content]
dir = "./content/blog"
# Abort the whole load when any file is missing id, slug or title
strict = false

[cms]
# Ghost site URL; leave empty to read local content files
url = ""
key_env = "GHOST_CONTENT_API_KEY"
timeout_secs = 10
"#
        .to_string()
    }
}
