//! HTTP client for the upstream metadata provider.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use super::error::{ProviderError, ProviderResult};
use super::models::{
    DeezerAlbum, DeezerArtist, DeezerCollection, DeezerErrorEnvelope, DeezerTrack,
    TrackSearchResult, NO_DATA_ERROR_CODE,
};
use super::timed::timed;
use crate::catalog::{Album, Artist, Track};

pub const DEFAULT_PROVIDER_URL: &str = "https://api.deezer.com";

/// Read-only access to the upstream catalog.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Artist metadata, without albums.
    async fn fetch_artist(&self, id: u64) -> ProviderResult<Artist>;

    async fn fetch_artist_albums(&self, id: u64, limit: usize) -> ProviderResult<Vec<Album>>;

    async fn fetch_album_tracks(&self, album_id: u64) -> ProviderResult<Vec<Track>>;

    async fn fetch_artist_top_tracks(&self, id: u64, limit: usize) -> ProviderResult<Vec<Track>>;

    /// Track search. A blank query yields no results.
    async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<TrackSearchResult>>;
}

/// [`MetadataProvider`] backed by the Deezer public API.
pub struct DeezerClient {
    client: reqwest::Client,
    base_url: String,
}

impl DeezerClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the API (e.g., "https://api.deezer.com")
    /// * `timeout_sec` - Request timeout in seconds
    pub fn new(base_url: String, timeout_sec: u64) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()?;

        // Ensure base_url doesn't have trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn artist_url(&self, id: u64) -> String {
        format!("{}/artist/{}", self.base_url, id)
    }

    fn search_url(&self, query: &str, limit: usize) -> String {
        format!(
            "{}/search?q={}&limit={}",
            self.base_url,
            urlencoding::encode(query),
            limit
        )
    }

    /// GETs `url` and decodes the body, turning the provider's in-band error
    /// envelope into a [`ProviderError`]. `what` names the requested entity.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> ProviderResult<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ProviderError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            return Err(ProviderError::Status(status));
        }

        let body: serde_json::Value = response.json().await?;
        decode_body(body, what)
    }

    async fn get_tracks(&self, url: &str, what: &str) -> ProviderResult<Vec<DeezerTrack>> {
        let collection: DeezerCollection<DeezerTrack> = self.get_json(url, what).await?;
        Ok(collection.data)
    }
}

fn decode_body<T: DeserializeOwned>(body: serde_json::Value, what: &str) -> ProviderResult<T> {
    if body.get("error").is_some() {
        let envelope: DeezerErrorEnvelope = serde_json::from_value(body)?;
        return Err(if envelope.error.code == NO_DATA_ERROR_CODE {
            ProviderError::NotFound(what.to_string())
        } else {
            ProviderError::Upstream(format!(
                "{} ({}): {}",
                envelope.error.kind, envelope.error.code, envelope.error.message
            ))
        });
    }
    Ok(serde_json::from_value(body)?)
}

impl DeezerClient {
    async fn get_artist(&self, id: u64) -> ProviderResult<Artist> {
        let what = format!("Artist {}", id);
        let artist: DeezerArtist = self.get_json(&self.artist_url(id), &what).await?;
        Ok(artist.to_catalog_artist())
    }

    async fn get_artist_albums(&self, id: u64, limit: usize) -> ProviderResult<Vec<Album>> {
        let url = format!("{}/albums?limit={}", self.artist_url(id), limit);
        let what = format!("Albums of artist {}", id);
        let collection: DeezerCollection<DeezerAlbum> = self.get_json(&url, &what).await?;
        let albums: Vec<Album> = collection
            .data
            .iter()
            .map(DeezerAlbum::to_catalog_album)
            .collect();
        debug!("Fetched {} albums of artist {}", albums.len(), id);
        Ok(albums)
    }

    async fn get_album_tracks(&self, album_id: u64) -> ProviderResult<Vec<Track>> {
        let url = format!("{}/album/{}/tracks", self.base_url, album_id);
        let what = format!("Tracks of album {}", album_id);
        let tracks = self.get_tracks(&url, &what).await?;
        Ok(tracks.iter().map(DeezerTrack::to_catalog_track).collect())
    }

    async fn get_artist_top_tracks(&self, id: u64, limit: usize) -> ProviderResult<Vec<Track>> {
        let url = format!("{}/top?limit={}", self.artist_url(id), limit);
        let what = format!("Top tracks of artist {}", id);
        let tracks = self.get_tracks(&url, &what).await?;
        Ok(tracks.iter().map(DeezerTrack::to_catalog_track).collect())
    }

    async fn get_search(&self, query: &str, limit: usize) -> ProviderResult<Vec<TrackSearchResult>> {
        let url = self.search_url(query, limit);
        let tracks = self.get_tracks(&url, "Search results").await?;
        let results: Vec<TrackSearchResult> = tracks
            .iter()
            .take(limit)
            .map(DeezerTrack::to_search_result)
            .collect();
        debug!("Found {} tracks for \"{}\"", results.len(), query);
        Ok(results)
    }
}

#[async_trait]
impl MetadataProvider for DeezerClient {
    async fn fetch_artist(&self, id: u64) -> ProviderResult<Artist> {
        timed("fetch_artist", self.get_artist(id)).await
    }

    async fn fetch_artist_albums(&self, id: u64, limit: usize) -> ProviderResult<Vec<Album>> {
        timed("fetch_artist_albums", self.get_artist_albums(id, limit)).await
    }

    async fn fetch_album_tracks(&self, album_id: u64) -> ProviderResult<Vec<Track>> {
        timed("fetch_album_tracks", self.get_album_tracks(album_id)).await
    }

    async fn fetch_artist_top_tracks(&self, id: u64, limit: usize) -> ProviderResult<Vec<Track>> {
        timed("fetch_artist_top_tracks", self.get_artist_top_tracks(id, limit)).await
    }

    async fn search(&self, query: &str, limit: usize) -> ProviderResult<Vec<TrackSearchResult>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        timed("search", self.get_search(query, limit)).await
    }
}
