//! Error types for the form core

use thiserror::Error;

/// Result type alias using the core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by schema construction and field lookup.
///
/// These are programming errors on the part of the embedding page, not
/// user-input errors: a value the user typed that fails validation is
/// reported as a plain message string in a
/// [`ValidationErrors`](crate::validate::ValidationErrors) map instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown field: {name}")]
    UnknownField { name: String },

    #[error("duplicate field: {name}")]
    DuplicateField { name: String },

    #[error("invalid schema: {0}")]
    InvalidSchema(String),
}
