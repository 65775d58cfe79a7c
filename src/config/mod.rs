mod file_config;

pub use file_config::{CatalogLimitsConfig, FileConfig};

use crate::provider::DEFAULT_PROVIDER_URL;
use crate::server::{RequestsLoggingLevel, ServerConfig};
use anyhow::{bail, Result};

pub const DEFAULT_ALBUM_LIMIT: usize = 100;
pub const DEFAULT_TOP_TRACKS_LIMIT: usize = 100;
pub const MAX_TOP_TRACKS_LIMIT: usize = 200;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
    pub provider_url: Option<String>,
    pub provider_timeout_sec: u64,
    pub seed_artists: Vec<u64>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub content_cache_age_sec: usize,
    pub frontend_dir_path: Option<String>,
    pub provider_url: String,
    pub provider_timeout_sec: u64,

    /// Provider ids of the artists imported at startup.
    pub seed_artists: Vec<u64>,

    pub album_limit: usize,
    pub top_tracks_limit: usize,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);

        let logging_level = file
            .logging_level
            .and_then(|s| RequestsLoggingLevel::parse(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let content_cache_age_sec = file
            .content_cache_age_sec
            .unwrap_or(cli.content_cache_age_sec);
        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let provider_url = file
            .provider_url
            .or_else(|| cli.provider_url.clone())
            .unwrap_or_else(|| DEFAULT_PROVIDER_URL.to_string());
        if provider_url.trim().is_empty() {
            bail!("provider_url must not be empty");
        }

        let provider_timeout_sec = file
            .provider_timeout_sec
            .unwrap_or(cli.provider_timeout_sec);
        if provider_timeout_sec == 0 {
            bail!("provider_timeout_sec must be greater than zero");
        }

        let seed_artists = file
            .seed_artists
            .unwrap_or_else(|| cli.seed_artists.clone());

        let limits = file.catalog.unwrap_or_default();
        let album_limit = limits.album_limit.unwrap_or(DEFAULT_ALBUM_LIMIT);
        if album_limit == 0 {
            bail!("album_limit must be greater than zero");
        }
        let top_tracks_limit = limits.top_tracks_limit.unwrap_or(DEFAULT_TOP_TRACKS_LIMIT);
        if !(1..=MAX_TOP_TRACKS_LIMIT).contains(&top_tracks_limit) {
            bail!(
                "top_tracks_limit must be between 1 and {}, got {}",
                MAX_TOP_TRACKS_LIMIT,
                top_tracks_limit
            );
        }

        Ok(Self {
            port,
            logging_level,
            content_cache_age_sec,
            frontend_dir_path,
            provider_url,
            provider_timeout_sec,
            seed_artists,
            album_limit,
            top_tracks_limit,
        })
    }

    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            requests_logging_level: self.logging_level.clone(),
            port: self.port,
            content_cache_age_sec: self.content_cache_age_sec,
            frontend_dir_path: self.frontend_dir_path.clone(),
            album_limit: self.album_limit,
            top_tracks_limit: self.top_tracks_limit,
        }
    }
}
