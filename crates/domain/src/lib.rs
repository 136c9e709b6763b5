//! folio domain crate
//!
//! This crate contains the core content pipeline following hexagonal architecture:
//! - `model`: Posts, domains, facets and filter state
//! - `ports`: Trait definitions for content backends and clocks
//! - `normalize`: Raw record to `Post` normalization with a default table
//! - `repository`: Request-scoped post collection
//! - `usecases`: Filtering, presentation and the blog listing flow

pub mod model;
pub mod normalize;
pub mod ports;
pub mod repository;
pub mod usecases;

pub use model::*;
pub use ports::*;
pub use repository::PostRepository;
