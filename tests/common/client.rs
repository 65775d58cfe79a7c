//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all mirror-catalog-server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .expect("POST request failed")
    }

    async fn delete(&self, path: &str) -> Response {
        self.client
            .delete(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("DELETE request failed")
    }

    // ========================================================================
    // Home
    // ========================================================================

    pub async fn get_home(&self) -> Response {
        self.get("/").await
    }

    // ========================================================================
    // Artists
    // ========================================================================

    pub async fn list_artists(&self) -> Response {
        self.get("/v1/artist").await
    }

    pub async fn add_artist(&self, artist: &Value) -> Response {
        self.post_json("/v1/artist", artist).await
    }

    pub async fn update_artist(&self, artist: &Value) -> Response {
        self.client
            .put(format!("{}/v1/artist", self.base_url))
            .json(artist)
            .send()
            .await
            .expect("PUT request failed")
    }

    pub async fn get_artist(&self, id: u64) -> Response {
        self.get(&format!("/v1/artist/{}", id)).await
    }

    pub async fn import_artist(&self, id: u64) -> Response {
        self.client
            .post(format!("{}/v1/artist/{}", self.base_url, id))
            .send()
            .await
            .expect("POST request failed")
    }

    pub async fn delete_artist(&self, id: u64) -> Response {
        self.delete(&format!("/v1/artist/{}", id)).await
    }

    pub async fn add_album(&self, artist_id: u64, album: &Value) -> Response {
        self.post_json(&format!("/v1/artist/{}/album", artist_id), album)
            .await
    }

    pub async fn add_track(&self, artist_id: u64, album_id: u64, track: &Value) -> Response {
        self.post_json(
            &format!("/v1/artist/{}/album/{}/track", artist_id, album_id),
            track,
        )
        .await
    }

    pub async fn remove_track(&self, artist_id: u64, album_id: u64, track_id: u64) -> Response {
        self.delete(&format!(
            "/v1/artist/{}/album/{}/track/{}",
            artist_id, album_id, track_id
        ))
        .await
    }

    // ========================================================================
    // Albums and tracks
    // ========================================================================

    pub async fn list_albums(&self) -> Response {
        self.get("/v1/album").await
    }

    pub async fn get_album(&self, id: u64) -> Response {
        self.get(&format!("/v1/album/{}", id)).await
    }

    pub async fn delete_album(&self, id: u64) -> Response {
        self.delete(&format!("/v1/album/{}", id)).await
    }

    pub async fn list_tracks(&self) -> Response {
        self.get("/v1/track").await
    }

    pub async fn get_track(&self, id: u64) -> Response {
        self.get(&format!("/v1/track/{}", id)).await
    }

    // ========================================================================
    // Search
    // ========================================================================

    pub async fn search(&self, query: &str, limit: Option<usize>) -> Response {
        let mut params = vec![("query", query.to_string())];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        self.client
            .get(format!("{}/v1/search", self.base_url))
            .query(&params)
            .send()
            .await
            .expect("Search request failed")
    }

    pub async fn search_albums(&self, artist_id: u64) -> Response {
        self.get(&format!("/v1/search/album?artist_id={}", artist_id))
            .await
    }

    pub async fn search_tracks(&self, artist_id: u64, limit: Option<usize>) -> Response {
        match limit {
            Some(limit) => {
                self.get(&format!(
                    "/v1/search/track?artist_id={}&limit={}",
                    artist_id, limit
                ))
                .await
            }
            None => {
                self.get(&format!("/v1/search/track?artist_id={}", artist_id))
                    .await
            }
        }
    }
}
