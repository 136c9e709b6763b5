//! folio adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `content_fs`: Markdown/MDX files with front-matter
//! - `ghost`: Ghost Content API
//! - `content_static`: Fixed in-memory records

mod content_fs;
mod content_static;

pub mod ghost;

/// Re-exports for content source adapters
pub mod sources {
    pub use crate::content_fs::FsContentSource;
    pub use crate::content_static::StaticContentSource;
    pub use crate::ghost::GhostContentSource;
}
