use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mirror_catalog_server::catalog::CatalogManager;
use mirror_catalog_server::config::{AppConfig, CliConfig, FileConfig};
use mirror_catalog_server::provider::{DeezerClient, MetadataProvider, DEFAULT_PROVIDER_URL};
use mirror_catalog_server::server::{run_server, RequestsLoggingLevel, ServerState};

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override the command line.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// The maximum age of search results in the HTTP cache in seconds.
    #[clap(long, default_value_t = 3600)]
    pub content_cache_age_sec: usize,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Base URL of the music-metadata provider.
    #[clap(long, default_value = DEFAULT_PROVIDER_URL)]
    pub provider_url: String,

    /// Timeout in seconds for provider requests.
    #[clap(long, default_value_t = 10)]
    pub provider_timeout_sec: u64,

    /// Provider id of an artist to import at startup. Can be repeated.
    #[clap(long = "seed-artist")]
    pub seed_artists: Vec<u64>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            port: self.port,
            logging_level: self.logging_level.clone(),
            content_cache_age_sec: self.content_cache_age_sec,
            frontend_dir_path: self.frontend_dir_path.clone(),
            provider_url: Some(self.provider_url.clone()),
            provider_timeout_sec: self.provider_timeout_sec,
            seed_artists: self.seed_artists.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config file {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Using metadata provider at {}", config.provider_url);
    let provider: Arc<dyn MetadataProvider> = Arc::new(
        DeezerClient::new(config.provider_url.clone(), config.provider_timeout_sec)
            .context("Failed to create provider client")?,
    );

    let state = ServerState::new(config.server_config(), CatalogManager::new(), provider);

    if !config.seed_artists.is_empty() {
        info!("Seeding {} artists...", config.seed_artists.len());
        let imported = state.proxy.seed(&config.seed_artists).await;
        info!(
            "Seeded {} of {} artists",
            imported,
            config.seed_artists.len()
        );
    }

    info!("Ready to serve at port {}!", config.port);
    run_server(state).await
}
