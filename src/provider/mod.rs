//! Upstream music-metadata provider.

mod client;
mod error;
pub mod models;
mod timed;

pub use client::{DeezerClient, MetadataProvider, DEFAULT_PROVIDER_URL};
pub use error::{ProviderError, ProviderResult};
pub use models::{AlbumSummary, ArtistSummary, TrackSearchResult};
pub use timed::timed;
