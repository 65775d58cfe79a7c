//! Catalog proxy for content that is not mirrored locally.
//!
//! Lookups hit the local catalog first and fall back to the upstream
//! provider. Imports pull an artist with its albums and tracks from the
//! provider and attach them through the catalog manager.

use futures::future::join_all;
use tracing::{debug, info, warn};

use super::api_error::ApiError;
use super::state::{lock_catalog, GuardedCatalog, GuardedProvider};
use crate::catalog::{Album, Artist, CatalogError};
use crate::provider::MetadataProvider;

pub struct CatalogProxy {
    catalog: GuardedCatalog,
    provider: GuardedProvider,
    album_limit: usize,
}

impl CatalogProxy {
    pub fn new(
        catalog: GuardedCatalog,
        provider: GuardedProvider,
        album_limit: usize,
    ) -> Self {
        Self {
            catalog,
            provider,
            album_limit,
        }
    }

    fn local_artist(&self, id: u64) -> Result<Option<Artist>, ApiError> {
        Ok(lock_catalog(&self.catalog)?.find_artist(id).cloned())
    }

    /// The local artist with `id`, or the provider's version of it with its
    /// albums (without tracks). The provider's copy is not stored.
    pub async fn resolve_artist(&self, id: u64) -> Result<Artist, ApiError> {
        if let Some(artist) = self.local_artist(id)? {
            debug!("Artist {} served from local catalog", id);
            return Ok(artist);
        }

        info!("Artist {} not found locally, fetching from provider", id);
        let mut artist = self.provider.fetch_artist(id).await?;
        artist.albums = self.provider.fetch_artist_albums(id, self.album_limit).await?;
        for album in artist.albums.iter_mut() {
            album.artist_id = Some(id);
        }
        Ok(artist)
    }

    /// Mirrors artist `id` into the local catalog and returns the stored copy.
    ///
    /// Fails with `Conflict` if the artist is already mirrored. A failing
    /// track listing leaves that album empty instead of aborting the import.
    pub async fn import_artist(&self, id: u64) -> Result<Artist, ApiError> {
        if self.local_artist(id)?.is_some() {
            return Err(CatalogError::conflict("Artist is already in the list").into());
        }

        info!("Importing artist {} from provider...", id);
        let artist = self.provider.fetch_artist(id).await?;
        let albums = self.provider.fetch_artist_albums(id, self.album_limit).await?;

        let track_listings = join_all(
            albums
                .iter()
                .map(|album| self.provider.fetch_album_tracks(album.id)),
        )
        .await;

        let mut catalog = lock_catalog(&self.catalog)?;
        catalog.add_artist(Some(artist))?;

        let mut albums_count = 0;
        let mut tracks_count = 0;
        for (album, tracks) in albums.into_iter().zip(track_listings) {
            let album_id = album.id;
            if let Err(err) = catalog.add_album(id, Some(Album { tracks: Vec::new(), ..album })) {
                warn!("Skipping album {} of artist {}: {}", album_id, id, err);
                continue;
            }
            albums_count += 1;

            let tracks = match tracks {
                Ok(tracks) => tracks,
                Err(err) => {
                    warn!("Failed to fetch tracks of album {}: {}", album_id, err);
                    continue;
                }
            };
            for track in tracks {
                let track_id = track.id;
                match catalog.add_track(id, album_id, Some(track)) {
                    Ok(()) => tracks_count += 1,
                    Err(err) => warn!("Skipping track {} of album {}: {}", track_id, album_id, err),
                }
            }
        }

        info!(
            "Imported artist {} with {} albums and {} tracks",
            id, albums_count, tracks_count
        );
        catalog.find_artist(id).cloned().ok_or(ApiError::Internal)
    }

    /// Imports each of `ids` in order, returning how many made it into the
    /// catalog. Failures are logged and skipped.
    pub async fn seed(&self, ids: &[u64]) -> usize {
        let mut imported = 0;
        for id in ids {
            match self.import_artist(*id).await {
                Ok(_) => imported += 1,
                Err(err) => warn!("Could not seed artist {}: {:?}", id, err),
            }
        }
        imported
    }
}
