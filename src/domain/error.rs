//! Error types for domain value conversions.

use thiserror::Error;

/// Errors raised while converting between entity representations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MapError {
    /// A stored or submitted value does not have the required format.
    #[error("Invalid {field} format '{value}': {reason}")]
    InvalidFormat {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl MapError {
    pub fn invalid_format(field: &'static str, value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field,
            value: value.into(),
            reason: reason.into(),
        }
    }
}
