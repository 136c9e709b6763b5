//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// folio: load, filter and present portfolio blog posts
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render one page of the blog listing
    List(ListArgs),

    /// Render a single post by slug
    Show(ShowArgs),

    /// Show the featured post
    Featured(SourceArgs),

    /// Show domain and tag counts
    Facets(SourceArgs),

    /// Inspect local content files
    Content(ContentArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Validate configuration and show status
    Doctor(DoctorArgs),
}

/// Options shared by commands that read content
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Read posts from this directory instead of the configured source
    #[arg(long)]
    pub content_dir: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Domain filter (firmware, devops, security, full-stack, projects); unknown values are ignored
    #[arg(long)]
    pub domain: Option<String>,

    /// Tag filter
    #[arg(long)]
    pub tag: Option<String>,

    /// Page number, 1-indexed; invalid values mean the first page
    #[arg(long)]
    pub page: Option<String>,

    /// Override the configured page size
    #[arg(long)]
    pub page_size: Option<usize>,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Post slug
    pub slug: String,

    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug)]
pub struct ContentArgs {
    #[command(subcommand)]
    pub command: ContentCommands,
}

#[derive(Subcommand, Debug)]
pub enum ContentCommands {
    /// Check every content file and report invalid records
    Validate {
        /// Override content directory
        #[arg(long)]
        content_dir: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./folio.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration
    Show,
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
