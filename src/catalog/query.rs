//! Read-only traversal of the catalog, plus the delete-by-id helpers used
//! by the HTTP surface.

use tracing::debug;

use super::error::CatalogResult;
use super::manager::CatalogManager;
use super::models::{Album, Artist, Track};

impl CatalogManager {
    /// Artists in insertion order.
    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    pub fn find_artist(&self, external_id: u64) -> Option<&Artist> {
        self.artists.iter().find(|a| a.external_id == external_id)
    }

    /// All albums, artist by artist, each in insertion order.
    pub fn albums(&self) -> impl Iterator<Item = &Album> {
        self.artists.iter().flat_map(|a| a.albums.iter())
    }

    /// All tracks, flattened through artists and albums.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.albums().flat_map(|a| a.tracks.iter())
    }

    /// First album with `id`. The same id may live under several artists,
    /// the earliest inserted artist wins.
    pub fn find_album(&self, id: u64) -> Option<&Album> {
        self.albums().find(|a| a.id == id)
    }

    pub fn find_track(&self, id: u64) -> Option<&Track> {
        self.tracks().find(|t| t.id == id)
    }

    pub fn artists_count(&self) -> usize {
        self.artists.len()
    }

    pub fn albums_count(&self) -> usize {
        self.artists.iter().map(|a| a.albums.len()).sum()
    }

    pub fn tracks_count(&self) -> usize {
        self.albums().map(|a| a.tracks.len()).sum()
    }

    /// Removes the artist with `external_id`.
    pub fn remove_artist_by_external_id(&mut self, external_id: u64) -> CatalogResult<Artist> {
        let probe = Artist::new(external_id, "");
        self.remove_artist(Some(&probe))
    }

    /// Detaches the first album with `id` from its owning artist.
    pub fn remove_album_by_id(&mut self, id: u64) -> Option<Album> {
        let (artist_index, album_index) = self.artists.iter().enumerate().find_map(|(i, artist)| {
            artist
                .albums
                .iter()
                .position(|album| album.id == id)
                .map(|j| (i, j))
        })?;

        let owner = &mut self.artists[artist_index];
        debug!("Removing album {} from artist {}", id, owner.external_id);
        Some(owner.albums.remove(album_index))
    }
}
