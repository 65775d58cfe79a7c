use axum::extract::FromRef;

use crate::catalog::CatalogManager;
use crate::provider::MetadataProvider;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use super::api_error::ApiError;
use super::proxy::CatalogProxy;
use super::ServerConfig;

pub type GuardedCatalog = Arc<Mutex<CatalogManager>>;
pub type GuardedProvider = Arc<dyn MetadataProvider>;
pub type GuardedProxy = Arc<CatalogProxy>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub catalog: GuardedCatalog,
    pub provider: GuardedProvider,
    pub proxy: GuardedProxy,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        catalog: CatalogManager,
        provider: GuardedProvider,
    ) -> ServerState {
        let catalog = Arc::new(Mutex::new(catalog));
        let proxy = Arc::new(CatalogProxy::new(
            catalog.clone(),
            provider.clone(),
            config.album_limit,
        ));
        ServerState {
            config,
            start_time: Instant::now(),
            catalog,
            provider,
            proxy,
        }
    }
}

/// Locks the catalog, reporting a poisoned lock as an internal error.
pub fn lock_catalog(catalog: &GuardedCatalog) -> Result<MutexGuard<'_, CatalogManager>, ApiError> {
    catalog.lock().map_err(|_| ApiError::Internal)
}

impl FromRef<ServerState> for GuardedCatalog {
    fn from_ref(input: &ServerState) -> Self {
        input.catalog.clone()
    }
}

impl FromRef<ServerState> for GuardedProvider {
    fn from_ref(input: &ServerState) -> Self {
        input.provider.clone()
    }
}

impl FromRef<ServerState> for GuardedProxy {
    fn from_ref(input: &ServerState) -> Self {
        input.proxy.clone()
    }
}

impl FromRef<ServerState> for ServerConfig {
    fn from_ref(input: &ServerState) -> Self {
        input.config.clone()
    }
}
