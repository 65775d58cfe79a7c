//! Mirror Catalog Server Library
//!
//! An in-memory Artist -> Album -> Track catalog mirroring a personal
//! collection from an upstream music-metadata provider, served over HTTP.

pub mod catalog;
pub mod config;
pub mod provider;
pub mod server;

// Re-export commonly used types for convenience
pub use catalog::{CatalogError, CatalogManager};
pub use provider::{DeezerClient, MetadataProvider};
pub use server::{run_server, RequestsLoggingLevel};
