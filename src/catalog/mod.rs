mod error;
mod manager;
mod models;
mod query;

pub use error::{CatalogError, CatalogResult, MissingEntity};
pub use manager::CatalogManager;
pub use models::{Album, Artist, Track};
