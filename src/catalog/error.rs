use thiserror::Error;

/// Which level of the hierarchy a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingEntity {
    Artist,
    Album,
    Track,
}

/// Errors raised by [`CatalogManager`](super::CatalogManager).
///
/// A failed operation never leaves a partial mutation behind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// A required entity was not provided.
    #[error("{message}")]
    InvalidArgument { message: &'static str },

    /// An insert would break a uniqueness rule.
    #[error("{message}")]
    Conflict { message: &'static str },

    /// A business-key lookup failed.
    #[error("{message}")]
    NotFound {
        entity: MissingEntity,
        message: &'static str,
    },
}

impl CatalogError {
    pub(crate) fn invalid(message: &'static str) -> Self {
        CatalogError::InvalidArgument { message }
    }

    pub(crate) fn conflict(message: &'static str) -> Self {
        CatalogError::Conflict { message }
    }

    pub(crate) fn not_found(entity: MissingEntity, message: &'static str) -> Self {
        CatalogError::NotFound { entity, message }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CatalogError::InvalidArgument { message }
            | CatalogError::Conflict { message }
            | CatalogError::NotFound { message, .. } => message,
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;
