//! Error types for squadcal.

use thiserror::Error;

/// Errors that can occur in squadcal operations.
///
/// Composition, filter mutation, search and visibility never produce
/// these; they only come from configuration, input files and the strict
/// composition entry point.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Events of kind '{0}' cannot be created here")]
    NotComposable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CalendarError {
    fn from(err: serde_json::Error) -> Self {
        CalendarError::Serialization(err.to_string())
    }
}

/// Result type alias for squadcal operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
