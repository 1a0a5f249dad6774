pub mod advisor;
pub mod flight;
pub mod hotel;
pub mod notify;
pub mod repository;
pub mod search;
pub mod session;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Selection {0} not found in current results")]
    SelectionNotFound(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
