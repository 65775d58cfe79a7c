//! Wire models of the upstream metadata API.
//!
//! These types match the JSON returned by the provider and convert into
//! catalog entities. Missing fields fall back to placeholder names and
//! empty URLs.

use serde::{Deserialize, Serialize};

use crate::catalog::{Album, Artist, Track};

const UNKNOWN_ARTIST: &str = "Unknown Artist";
const UNKNOWN_ALBUM: &str = "Unknown Album";
const UNKNOWN_TRACK: &str = "Unknown Track";

/// Error code the provider uses for "no data" on an existing route.
pub const NO_DATA_ERROR_CODE: i64 = 800;

// =============================================================================
// Provider API Response Types
// =============================================================================

/// Paginated list envelope.
#[derive(Clone, Debug, Deserialize)]
pub struct DeezerCollection<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub next: Option<String>,
}

/// Error payload, served with a 200 status.
#[derive(Clone, Debug, Deserialize)]
pub struct DeezerError {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub code: i64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DeezerErrorEnvelope {
    pub error: DeezerError,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DeezerArtist {
    pub id: u64,
    pub name: Option<String>,
    pub picture_small: Option<String>,
    pub picture_medium: Option<String>,
    pub picture_big: Option<String>,
    pub picture_xl: Option<String>,
}

impl DeezerArtist {
    /// Convert to catalog Artist model, without albums.
    pub fn to_catalog_artist(&self) -> Artist {
        Artist::new(
            self.id,
            self.name.clone().unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        )
        .with_pictures(
            self.picture_small.clone().unwrap_or_default(),
            self.picture_medium.clone().unwrap_or_default(),
            self.picture_big.clone().unwrap_or_default(),
            self.picture_xl.clone().unwrap_or_default(),
        )
    }

    pub fn to_summary(&self) -> ArtistSummary {
        ArtistSummary {
            external_id: self.id,
            name: self.name.clone().unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
            picture_small: self.picture_small.clone().unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct DeezerAlbum {
    pub id: u64,
    pub title: Option<String>,
    pub cover: Option<String>,
    pub cover_small: Option<String>,
    pub cover_medium: Option<String>,
    pub cover_big: Option<String>,
    pub cover_xl: Option<String>,
}

impl DeezerAlbum {
    /// Convert to catalog Album model. The medium cover is used.
    pub fn to_catalog_album(&self) -> Album {
        Album::new(
            self.id,
            self.title.clone().unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
            self.cover_medium.clone().unwrap_or_default(),
        )
    }

    pub fn to_summary(&self) -> AlbumSummary {
        AlbumSummary {
            id: self.id,
            title: self.title.clone().unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
            cover: self.cover_small.clone().unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct DeezerTrack {
    pub id: u64,
    pub title: Option<String>,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub track_position: u32,
    pub preview: Option<String>,
    pub album: Option<DeezerAlbum>,
    pub artist: Option<DeezerArtist>,
}

impl DeezerTrack {
    /// Convert to catalog Track model. The album link is left unset, it is
    /// filled in when the track gets attached to an album.
    pub fn to_catalog_track(&self) -> Track {
        Track::new(
            self.id,
            self.title.clone().unwrap_or_else(|| UNKNOWN_TRACK.to_string()),
            self.duration,
            self.track_position,
        )
        .with_preview(self.preview.clone().unwrap_or_default())
    }

    pub fn to_search_result(&self) -> TrackSearchResult {
        TrackSearchResult {
            id: self.id,
            title: self.title.clone().unwrap_or_else(|| UNKNOWN_TRACK.to_string()),
            duration: self.duration,
            preview: self.preview.clone().unwrap_or_default(),
            album: self
                .album
                .as_ref()
                .map(DeezerAlbum::to_summary)
                .unwrap_or_default(),
            artist: self
                .artist
                .as_ref()
                .map(DeezerArtist::to_summary)
                .unwrap_or_default(),
        }
    }
}

// =============================================================================
// Search results
// =============================================================================

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AlbumSummary {
    pub id: u64,
    pub title: String,
    pub cover: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ArtistSummary {
    pub external_id: u64,
    pub name: String,
    pub picture_small: String,
}

/// A search hit, with denormalized album and artist summaries.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackSearchResult {
    pub id: u64,
    pub title: String,
    pub duration: u32,
    pub preview: String,
    pub album: AlbumSummary,
    pub artist: ArtistSummary,
}
