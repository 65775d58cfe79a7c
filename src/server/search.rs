//! Search API routes, answered by the metadata provider.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

use super::api_error::ApiError;
use super::state::ServerState;
use crate::catalog::{Album, Track};
use crate::config::MAX_TOP_TRACKS_LIMIT;
use crate::provider::{MetadataProvider, TrackSearchResult};

const DEFAULT_SEARCH_LIMIT: usize = 5;
const MAX_SEARCH_LIMIT: usize = 50;

fn check_artist_id(artist_id: u64) -> Result<(), ApiError> {
    if artist_id == 0 {
        return Err(ApiError::BadRequest("Artist id must be positive"));
    }
    Ok(())
}

#[derive(Deserialize)]
struct SearchParams {
    #[serde(default)]
    query: String,
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct ArtistAlbumsParams {
    artist_id: u64,
}

#[derive(Deserialize)]
struct ArtistTracksParams {
    artist_id: u64,
    limit: Option<usize>,
}

async fn search(
    State(state): State<ServerState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<TrackSearchResult>>, ApiError> {
    let query = params.query.trim();
    if query.is_empty() {
        return Err(ApiError::BadRequest("Query must not be blank"));
    }
    let limit = params.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
        return Err(ApiError::BadRequest("Limit must be between 1 and 50"));
    }

    let results = state.provider.search(query, limit).await?;
    debug!("Search \"{}\" returned {} tracks", query, results.len());
    if results.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(results))
}

async fn search_artist_albums(
    State(state): State<ServerState>,
    Query(params): Query<ArtistAlbumsParams>,
) -> Result<Json<Vec<Album>>, ApiError> {
    check_artist_id(params.artist_id)?;
    let albums = state
        .provider
        .fetch_artist_albums(params.artist_id, state.config.album_limit)
        .await?;
    Ok(Json(albums))
}

async fn search_artist_tracks(
    State(state): State<ServerState>,
    Query(params): Query<ArtistTracksParams>,
) -> Result<Json<Vec<Track>>, ApiError> {
    check_artist_id(params.artist_id)?;
    let limit = params.limit.unwrap_or(state.config.top_tracks_limit);
    if !(1..=MAX_TOP_TRACKS_LIMIT).contains(&limit) {
        return Err(ApiError::BadRequest("Limit must be between 1 and 200"));
    }

    let tracks = state
        .provider
        .fetch_artist_top_tracks(params.artist_id, limit)
        .await?;
    if tracks.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Json(tracks))
}

pub fn make_search_routes(state: ServerState) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/search/album", get(search_artist_albums))
        .route("/search/track", get(search_artist_tracks))
        .with_state(state)
}
