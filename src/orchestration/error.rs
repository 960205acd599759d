//! Error types for restaurant orchestration.

use thiserror::Error;

use crate::restaurants::RepositoryError;

/// Errors that can occur while orchestrating restaurant operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrchestrationError {
    /// The restaurant targeted by an update does not exist.
    #[error("Restaurant not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
