//! The in-memory Artist -> Album -> Track hierarchy.
//!
//! All lookups are linear scans over business keys. The catalog mirrors a
//! personal collection, so it stays small enough for that to be fine.

use std::collections::HashSet;

use tracing::debug;

use super::error::{CatalogError, CatalogResult, MissingEntity};
use super::models::{Album, Artist, Track};

const ARTIST_NULL: &str = "Artist is null";
const ALBUM_NULL: &str = "Album is null";
const TRACK_NULL: &str = "Track is null";
const ARTIST_ALREADY_LISTED: &str = "Artist is already in the list";
const ARTIST_NOT_LISTED: &str = "Artist is not in the list";
const ARTIST_DOES_NOT_EXIST: &str = "Artist does not exist";
const ALBUM_DOES_NOT_EXIST: &str = "Album does not exist";
const TRACK_ALREADY_LISTED: &str = "Track is already in the album";
const TRACK_NOT_IN_ALBUM: &str = "Track does not exist in the album";

/// Owner of the catalog. The collections are only reachable through the
/// methods below so that the uniqueness and back-reference rules hold.
#[derive(Debug, Default)]
pub struct CatalogManager {
    pub(super) artists: Vec<Artist>,
}

impl CatalogManager {
    pub fn new() -> CatalogManager {
        CatalogManager::default()
    }

    pub(super) fn artist_position(&self, external_id: u64) -> Option<usize> {
        self.artists
            .iter()
            .position(|a| a.external_id == external_id)
    }

    fn artist_mut(&mut self, external_id: u64) -> Option<&mut Artist> {
        self.artists
            .iter_mut()
            .find(|a| a.external_id == external_id)
    }

    /// Tracks carried inside a new album must already be unique within it.
    fn check_carried_tracks(album: &Album) -> CatalogResult<()> {
        let mut seen = HashSet::with_capacity(album.tracks.len());
        if album.tracks.iter().all(|t| seen.insert(t.id)) {
            Ok(())
        } else {
            Err(CatalogError::conflict(TRACK_ALREADY_LISTED))
        }
    }

    /// Appends `artist` at the end of the catalog.
    pub fn add_artist(&mut self, artist: Option<Artist>) -> CatalogResult<()> {
        let mut artist = artist.ok_or(CatalogError::invalid(ARTIST_NULL))?;
        if self.artist_position(artist.external_id).is_some() {
            return Err(CatalogError::conflict(ARTIST_ALREADY_LISTED));
        }
        for album in artist.albums.iter() {
            Self::check_carried_tracks(album)?;
        }

        // Albums carried in by the caller belong to this artist from now on.
        let external_id = artist.external_id;
        for album in artist.albums.iter_mut() {
            album.artist_id = Some(external_id);
            for track in album.tracks.iter_mut() {
                track.album_id = Some(album.id);
            }
        }

        debug!("Adding artist {} ({})", artist.external_id, artist.name);
        self.artists.push(artist);
        Ok(())
    }

    /// Removes the artist sharing `artist`'s external id, returning it along
    /// with everything it contained.
    pub fn remove_artist(&mut self, artist: Option<&Artist>) -> CatalogResult<Artist> {
        let artist = artist.ok_or(CatalogError::invalid(ARTIST_NULL))?;
        let position = self
            .artist_position(artist.external_id)
            .ok_or(CatalogError::not_found(MissingEntity::Artist, ARTIST_NOT_LISTED))?;

        debug!("Removing artist {}", artist.external_id);
        Ok(self.artists.remove(position))
    }

    /// Overwrites name and pictures of the stored artist with the same
    /// external id. Identity, position and albums are untouched.
    pub fn update_artist(&mut self, artist: Option<Artist>) -> CatalogResult<()> {
        let artist = artist.ok_or(CatalogError::invalid(ARTIST_NULL))?;
        let existing = self
            .artist_mut(artist.external_id)
            .ok_or(CatalogError::not_found(MissingEntity::Artist, ARTIST_NOT_LISTED))?;

        debug!("Updating artist {}", existing.external_id);
        existing.overwrite_display(artist);
        Ok(())
    }

    /// Appends `album` to the artist with `external_artist_id`.
    ///
    /// Album ids are not checked for uniqueness. Lookups by album id act on
    /// the earliest inserted match.
    pub fn add_album(&mut self, external_artist_id: u64, album: Option<Album>) -> CatalogResult<()> {
        let mut album = album.ok_or(CatalogError::invalid(ALBUM_NULL))?;
        let artist = self
            .artist_mut(external_artist_id)
            .ok_or(CatalogError::not_found(MissingEntity::Artist, ARTIST_NOT_LISTED))?;
        Self::check_carried_tracks(&album)?;

        album.artist_id = Some(external_artist_id);
        for track in album.tracks.iter_mut() {
            track.album_id = Some(album.id);
        }

        debug!("Adding album {} to artist {}", album.id, external_artist_id);
        artist.albums.push(album);
        Ok(())
    }

    /// Attaches `track` to album `album_id` of the artist with `external_artist_id`.
    pub fn add_track(
        &mut self,
        external_artist_id: u64,
        album_id: u64,
        track: Option<Track>,
    ) -> CatalogResult<()> {
        let mut track = track.ok_or(CatalogError::invalid(TRACK_NULL))?;
        let artist = self.artist_mut(external_artist_id).ok_or(CatalogError::not_found(
            MissingEntity::Artist,
            ARTIST_DOES_NOT_EXIST,
        ))?;
        let album = artist
            .albums
            .iter_mut()
            .find(|a| a.id == album_id)
            .ok_or(CatalogError::not_found(
                MissingEntity::Album,
                ALBUM_DOES_NOT_EXIST,
            ))?;
        if album.tracks.iter().any(|t| t.id == track.id) {
            return Err(CatalogError::conflict(TRACK_ALREADY_LISTED));
        }

        track.album_id = Some(album_id);
        debug!(
            "Adding track {} to album {} of artist {}",
            track.id, album_id, external_artist_id
        );
        album.tracks.push(track);
        Ok(())
    }

    /// Detaches the track with `track`'s id from the given album and returns it.
    ///
    /// A missing artist or album is reported as `InvalidArgument`, the same
    /// kind used for a missing track argument. Only a track absent from the
    /// located album yields `NotFound`.
    pub fn remove_track(
        &mut self,
        external_artist_id: u64,
        album_id: u64,
        track: Option<&Track>,
    ) -> CatalogResult<Track> {
        let track = track.ok_or(CatalogError::invalid(TRACK_NULL))?;
        let artist = self
            .artist_mut(external_artist_id)
            .ok_or(CatalogError::invalid(ARTIST_DOES_NOT_EXIST))?;
        let album = artist
            .albums
            .iter_mut()
            .find(|a| a.id == album_id)
            .ok_or(CatalogError::invalid(ALBUM_DOES_NOT_EXIST))?;
        let position = album
            .tracks
            .iter()
            .position(|t| t.id == track.id)
            .ok_or(CatalogError::not_found(
                MissingEntity::Track,
                TRACK_NOT_IN_ALBUM,
            ))?;

        debug!(
            "Removing track {} from album {} of artist {}",
            track.id, album_id, external_artist_id
        );
        Ok(album.tracks.remove(position))
    }
}
