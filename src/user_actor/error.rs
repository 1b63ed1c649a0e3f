use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::validation::ValidationError;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    /// Carries the store's message, which names the missing kind and id
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    AlreadyExists(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("User validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for UserError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound { .. } => UserError::NotFound(err.to_string()),
            FrameworkError::InvalidArgument(msg) => UserError::InvalidArgument(msg),
            FrameworkError::AlreadyExists { .. } => UserError::AlreadyExists(err.to_string()),
            FrameworkError::ActorClosed
            | FrameworkError::ActorDropped => UserError::ActorCommunicationError(err.to_string()),
        }
    }
}

impl From<ValidationError> for UserError {
    fn from(err: ValidationError) -> Self {
        UserError::ValidationError(err.to_string())
    }
}
