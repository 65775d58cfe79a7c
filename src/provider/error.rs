use reqwest::StatusCode;
use thiserror::Error;

/// Errors from the upstream metadata provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(StatusCode),

    #[error("Provider error: {0}")]
    Upstream(String),

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ProviderError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ProviderError::NotFound(_))
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
