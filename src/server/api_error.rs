use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::catalog::CatalogError;
use crate::provider::ProviderError;

/// Failure of an HTTP handler, rendered as `{"error": message}`.
#[derive(Debug)]
pub enum ApiError {
    Catalog(CatalogError),
    Provider(ProviderError),
    BadRequest(&'static str),
    NotFound,
    Internal,
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        ApiError::Provider(err)
    }
}

fn error_body(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Catalog(err) => {
                let status = match err {
                    CatalogError::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
                    CatalogError::Conflict { .. } => StatusCode::CONFLICT,
                    CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
                };
                error_body(status, err.message())
            }
            ApiError::Provider(err) if err.is_not_found() => {
                error_body(StatusCode::NOT_FOUND, err.to_string())
            }
            ApiError::Provider(err) => {
                error!("Provider call failed: {}", err);
                error_body(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            ApiError::BadRequest(message) => error_body(StatusCode::BAD_REQUEST, message),
            ApiError::NotFound => StatusCode::NOT_FOUND.into_response(),
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        }
    }
}
