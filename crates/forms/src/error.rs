//! Submission error types

use thiserror::Error;

/// Why a gateway rejected an otherwise valid submission.
///
/// These are form-level failures: the session shows them as a banner and
/// returns to an editable state. They never imply field-level errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("server error: {0}")]
    Server(String),
}
