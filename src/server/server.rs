use anyhow::{Context, Result};
use std::time::Duration;

use tower_http::services::ServeDir;
use tracing::{info, warn};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;

use super::api_error::ApiError;
use super::{http_cache, log_requests, make_search_routes, state::*};
use crate::catalog::{Album, Artist, Track};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: String,
    pub artists: usize,
    pub albums: usize,
    pub tracks: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> Result<Json<ServerStats>, ApiError> {
    let catalog = lock_catalog(&state.catalog)?;
    Ok(Json(ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION").to_string(),
        artists: catalog.artists_count(),
        albums: catalog.albums_count(),
        tracks: catalog.tracks_count(),
    }))
}

async fn list_artists(State(catalog): State<GuardedCatalog>) -> Result<Json<Vec<Artist>>, ApiError> {
    Ok(Json(lock_catalog(&catalog)?.artists().to_vec()))
}

async fn post_artist(
    State(catalog): State<GuardedCatalog>,
    Json(artist): Json<Option<Artist>>,
) -> Result<Response, ApiError> {
    let external_id = artist.as_ref().map(|a| a.external_id);
    let mut catalog = lock_catalog(&catalog)?;
    catalog.add_artist(artist)?;

    let stored = external_id
        .and_then(|id| catalog.find_artist(id))
        .cloned()
        .ok_or(ApiError::Internal)?;
    Ok((StatusCode::CREATED, Json(stored)).into_response())
}

async fn put_artist(
    State(catalog): State<GuardedCatalog>,
    Json(artist): Json<Option<Artist>>,
) -> Result<StatusCode, ApiError> {
    lock_catalog(&catalog)?.update_artist(artist)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_artist(
    State(proxy): State<GuardedProxy>,
    Path(id): Path<u64>,
) -> Result<Json<Artist>, ApiError> {
    Ok(Json(proxy.resolve_artist(id).await?))
}

async fn import_artist(
    State(proxy): State<GuardedProxy>,
    Path(id): Path<u64>,
) -> Result<Response, ApiError> {
    let artist = proxy.import_artist(id).await?;
    Ok((StatusCode::CREATED, Json(artist)).into_response())
}

async fn delete_artist(
    State(catalog): State<GuardedCatalog>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    lock_catalog(&catalog)?.remove_artist_by_external_id(id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn post_album(
    State(catalog): State<GuardedCatalog>,
    Path(artist_id): Path<u64>,
    Json(album): Json<Option<Album>>,
) -> Result<Response, ApiError> {
    let mut catalog = lock_catalog(&catalog)?;
    catalog.add_album(artist_id, album)?;

    let stored = catalog
        .find_artist(artist_id)
        .and_then(|artist| artist.albums.last())
        .cloned()
        .ok_or(ApiError::Internal)?;
    Ok((StatusCode::CREATED, Json(stored)).into_response())
}

async fn post_track(
    State(catalog): State<GuardedCatalog>,
    Path((artist_id, album_id)): Path<(u64, u64)>,
    Json(track): Json<Option<Track>>,
) -> Result<Response, ApiError> {
    let mut catalog = lock_catalog(&catalog)?;
    catalog.add_track(artist_id, album_id, track)?;

    let stored = catalog
        .find_artist(artist_id)
        .and_then(|artist| artist.albums.iter().find(|album| album.id == album_id))
        .and_then(|album| album.tracks.last())
        .cloned()
        .ok_or(ApiError::Internal)?;
    Ok((StatusCode::CREATED, Json(stored)).into_response())
}

async fn delete_track(
    State(catalog): State<GuardedCatalog>,
    Path((artist_id, album_id, track_id)): Path<(u64, u64, u64)>,
) -> Result<Json<Track>, ApiError> {
    let probe = Track {
        id: track_id,
        ..Default::default()
    };
    let removed = lock_catalog(&catalog)?.remove_track(artist_id, album_id, Some(&probe))?;
    Ok(Json(removed))
}

async fn list_albums(State(catalog): State<GuardedCatalog>) -> Result<Json<Vec<Album>>, ApiError> {
    Ok(Json(lock_catalog(&catalog)?.albums().cloned().collect()))
}

async fn get_album(
    State(catalog): State<GuardedCatalog>,
    Path(id): Path<u64>,
) -> Result<Json<Album>, ApiError> {
    match lock_catalog(&catalog)?.find_album(id) {
        Some(album) => Ok(Json(album.clone())),
        None => Err(ApiError::NotFound),
    }
}

async fn delete_album(
    State(catalog): State<GuardedCatalog>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    match lock_catalog(&catalog)?.remove_album_by_id(id) {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(ApiError::NotFound),
    }
}

async fn list_tracks(State(catalog): State<GuardedCatalog>) -> Result<Json<Vec<Track>>, ApiError> {
    Ok(Json(lock_catalog(&catalog)?.tracks().cloned().collect()))
}

async fn get_track(
    State(catalog): State<GuardedCatalog>,
    Path(id): Path<u64>,
) -> Result<Json<Track>, ApiError> {
    match lock_catalog(&catalog)?.find_track(id) {
        Some(track) => Ok(Json(track.clone())),
        None => Err(ApiError::NotFound),
    }
}

pub fn make_app(state: ServerState) -> Router {
    let catalog_routes: Router = Router::new()
        .route(
            "/artist",
            get(list_artists).post(post_artist).put(put_artist),
        )
        .route(
            "/artist/{id}",
            get(get_artist).post(import_artist).delete(delete_artist),
        )
        .route("/artist/{id}/album", post(post_album))
        .route("/artist/{id}/album/{album_id}/track", post(post_track))
        .route(
            "/artist/{id}/album/{album_id}/track/{track_id}",
            delete(delete_track),
        )
        .route("/album", get(list_albums))
        .route("/album/{id}", get(get_album).delete(delete_album))
        .route("/track", get(list_tracks))
        .route("/track/{id}", get(get_track))
        .with_state(state.clone());

    let search_routes = make_search_routes(state.clone()).layer(middleware::from_fn_with_state(
        state.config.content_cache_age_sec,
        http_cache,
    ));

    let home_router: Router = match state.config.frontend_dir_path.clone() {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    home_router
        .nest("/v1", catalog_routes.merge(search_routes))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, stopping server...");
}

pub async fn run_server(state: ServerState) -> Result<()> {
    let port = state.config.port;
    let app = make_app(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
