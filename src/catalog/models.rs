//! Catalog entities.
//!
//! Containment is owned top-down (artist -> albums -> tracks). The upward
//! links (`Album::artist_id`, `Track::album_id`) are plain keys into the
//! parent collection, they never own anything.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Artist {
    /// Local identity, assigned when the artist is created.
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,

    /// Identifier assigned by the upstream metadata provider. Unique in the catalog.
    pub external_id: u64,

    pub name: String,
    #[serde(default)]
    pub picture_small: String,
    #[serde(default)]
    pub picture_medium: String,
    #[serde(default)]
    pub picture_big: String,
    #[serde(default)]
    pub picture_xl: String,

    #[serde(default)]
    pub albums: Vec<Album>,
}

impl Artist {
    pub fn new(external_id: u64, name: impl Into<String>) -> Artist {
        Artist {
            id: Uuid::new_v4(),
            external_id,
            name: name.into(),
            picture_small: String::new(),
            picture_medium: String::new(),
            picture_big: String::new(),
            picture_xl: String::new(),
            albums: Vec::new(),
        }
    }

    pub fn with_pictures(
        mut self,
        small: impl Into<String>,
        medium: impl Into<String>,
        big: impl Into<String>,
        xl: impl Into<String>,
    ) -> Artist {
        self.picture_small = small.into();
        self.picture_medium = medium.into();
        self.picture_big = big.into();
        self.picture_xl = xl.into();
        self
    }

    /// Copies the mutable display attributes of `other` into `self`.
    /// Identity and albums are left alone.
    pub(crate) fn overwrite_display(&mut self, other: Artist) {
        self.name = other.name;
        self.picture_small = other.picture_small;
        self.picture_medium = other.picture_medium;
        self.picture_big = other.picture_big;
        self.picture_xl = other.picture_xl;
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct Album {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub cover: String,

    /// External id of the owning artist, set when the album is attached.
    #[serde(default)]
    pub artist_id: Option<u64>,

    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Album {
    pub fn new(id: u64, title: impl Into<String>, cover: impl Into<String>) -> Album {
        Album {
            id,
            title: title.into(),
            cover: cover.into(),
            artist_id: None,
            tracks: Vec::new(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
pub struct Track {
    pub id: u64,
    pub title: String,

    /// Seconds.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub track_position: u32,
    #[serde(default)]
    pub preview: String,

    /// Id of the owning album, set when the track is attached.
    #[serde(default)]
    pub album_id: Option<u64>,
}

impl Track {
    pub fn new(id: u64, title: impl Into<String>, duration: u32, track_position: u32) -> Track {
        Track {
            id,
            title: title.into(),
            duration,
            track_position,
            preview: String::new(),
            album_id: None,
        }
    }

    pub fn with_preview(mut self, preview: impl Into<String>) -> Track {
        self.preview = preview.into();
        self
    }
}
