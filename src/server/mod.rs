mod api_error;
pub mod config;
mod http_layers;
pub mod proxy;
mod search;
pub mod server;
pub mod state;

pub use api_error::ApiError;
pub use config::ServerConfig;
pub use http_layers::*;
pub use proxy::CatalogProxy;
pub(self) use search::make_search_routes;
pub use server::{make_app, run_server};
pub use state::ServerState;
