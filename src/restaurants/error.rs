//! Error types for the restaurant repository.

use thiserror::Error;

use crate::domain::MapError;
use crate::store::StoreError;

/// Errors that can occur during repository operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RepositoryError {
    /// The underlying store call failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A stored document could not be turned into a business object.
    #[error(transparent)]
    Mapping(#[from] MapError),
}
