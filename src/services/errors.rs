use thiserror::Error;

use crate::repository::errors::RepositoryError;

/// Errors surfaced by the service layer to route handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    /// Submitted form data failed validation.
    #[error("{0}")]
    Form(String),
    /// Catalog listing parameters were rejected before querying.
    #[error("{0}")]
    InvalidQuery(String),
    #[error(transparent)]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict(_) => ServiceError::Conflict,
            RepositoryError::ConstraintViolation(message) => ServiceError::Form(message),
            other => ServiceError::Repository(other),
        }
    }
}
