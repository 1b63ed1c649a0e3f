use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::validation::ValidationError;

/// Errors that can occur during film operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FilmError {
    /// Carries the store's message, which names the missing kind and id
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Film validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for FilmError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound { .. } => FilmError::NotFound(err.to_string()),
            FrameworkError::InvalidArgument(msg) => FilmError::InvalidArgument(msg),
            FrameworkError::AlreadyExists { .. } => FilmError::AlreadyExists(err.to_string()),
            FrameworkError::ActorClosed
            | FrameworkError::ActorDropped => FilmError::ActorCommunicationError(err.to_string()),
        }
    }
}

impl From<ValidationError> for FilmError {
    fn from(err: ValidationError) -> Self {
        FilmError::ValidationError(err.to_string())
    }
}
