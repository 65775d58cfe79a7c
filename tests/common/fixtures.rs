//! Fake metadata provider
//!
//! A small axum app answering the provider routes with canned JSON, so the
//! real HTTP client is exercised end to end.

use super::constants::*;
use axum::{
    extract::{Path, Query},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::net::TcpListener;

fn no_data() -> Value {
    json!({"error": {"type": "DataException", "message": "no data", "code": 800}})
}

fn artist_json() -> Value {
    json!({
        "id": ARTIST_ID,
        "name": ARTIST_NAME,
        "picture_small": "https://cdn.test/artist/56x56.jpg",
        "picture_medium": "https://cdn.test/artist/250x250.jpg",
        "picture_big": "https://cdn.test/artist/500x500.jpg",
        "picture_xl": "https://cdn.test/artist/1000x1000.jpg",
        "type": "artist"
    })
}

fn albums_json() -> Vec<Value> {
    vec![
        json!({
            "id": ALBUM_1_ID,
            "title": "Human After All",
            "cover_small": "https://cdn.test/album1/56x56.jpg",
            "cover_medium": "https://cdn.test/album1/250x250.jpg"
        }),
        json!({
            "id": ALBUM_2_ID,
            "title": "Discovery",
            "cover_small": "https://cdn.test/album2/56x56.jpg",
            "cover_medium": "https://cdn.test/album2/250x250.jpg"
        }),
    ]
}

fn album_tracks_json() -> HashMap<u64, Vec<Value>> {
    let mut tracks = HashMap::new();
    tracks.insert(
        ALBUM_1_ID,
        vec![
            json!({"id": TRACK_1_ID, "title": "Human After All", "duration": 319, "track_position": 1, "preview": "https://cdn.test/preview/1.mp3"}),
            json!({"id": TRACK_2_ID, "title": "The Prime Time of Your Life", "duration": 263, "track_position": 2}),
        ],
    );
    tracks.insert(
        ALBUM_2_ID,
        vec![json!({"id": TRACK_3_ID, "title": "One More Time", "duration": 320, "track_position": 1})],
    );
    tracks
}

#[derive(Deserialize)]
struct LimitParams {
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct SearchParams {
    q: String,
    limit: Option<usize>,
}

fn collection(items: Vec<Value>, limit: Option<usize>) -> Json<Value> {
    let items: Vec<Value> = items.into_iter().take(limit.unwrap_or(usize::MAX)).collect();
    let total = items.len();
    Json(json!({"data": items, "total": total}))
}

async fn artist(Path(id): Path<u64>) -> Json<Value> {
    if id == ARTIST_ID {
        Json(artist_json())
    } else {
        Json(no_data())
    }
}

async fn artist_albums(Path(id): Path<u64>, Query(params): Query<LimitParams>) -> Json<Value> {
    if id == ARTIST_ID {
        collection(albums_json(), params.limit)
    } else {
        Json(no_data())
    }
}

async fn artist_top(Path(id): Path<u64>, Query(params): Query<LimitParams>) -> Json<Value> {
    if id != ARTIST_ID {
        return collection(Vec::new(), None);
    }
    let tracks = album_tracks_json();
    let top = [ALBUM_2_ID, ALBUM_1_ID]
        .iter()
        .filter_map(|album_id| tracks.get(album_id))
        .flatten()
        .cloned()
        .collect();
    collection(top, params.limit)
}

async fn album_tracks(Path(id): Path<u64>) -> Json<Value> {
    match album_tracks_json().remove(&id) {
        Some(tracks) => collection(tracks, None),
        None => Json(no_data()),
    }
}

async fn search(Query(params): Query<SearchParams>) -> Json<Value> {
    if params.q == FAILING_QUERY {
        return Json(json!({"error": {"type": "Exception", "message": "Quota limit exceeded", "code": 4}}));
    }
    if params.q != MATCHING_QUERY {
        return collection(Vec::new(), None);
    }
    let album = albums_json()[1].clone();
    let hits = album_tracks_json()
        .remove(&ALBUM_2_ID)
        .unwrap_or_default()
        .into_iter()
        .chain(album_tracks_json().remove(&ALBUM_1_ID).unwrap_or_default())
        .map(|mut track| {
            track["album"] = album.clone();
            track["artist"] = artist_json();
            track
        })
        .collect();
    collection(hits, params.limit)
}

/// Spawns the fake provider on a random port and returns its base URL and
/// the sender that stops it.
pub async fn spawn_fake_provider() -> (String, tokio::sync::oneshot::Sender<()>) {
    let app = Router::new()
        .route("/artist/{id}", get(artist))
        .route("/artist/{id}/albums", get(artist_albums))
        .route("/artist/{id}/top", get(artist_top))
        .route("/album/{id}/tracks", get(album_tracks))
        .route("/search", get(search));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake provider");
    let port = listener
        .local_addr()
        .expect("Failed to get fake provider address")
        .port();

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .expect("Fake provider failed");
    });

    (format!("http://127.0.0.1:{}", port), shutdown_tx)
}
