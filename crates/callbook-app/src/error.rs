//! Application error types.

use thiserror::Error;

/// Startup errors. Any of these aborts the application.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid entity declaration or failed reconciliation.
    #[error(transparent)]
    Core(#[from] callbook_core::Error),

    /// Database error outside of reconciliation.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<callbook_core::SchemaError> for Error {
    fn from(err: callbook_core::SchemaError) -> Self {
        Error::Core(err.into())
    }
}

impl From<callbook_core::MigrationError> for Error {
    fn from(err: callbook_core::MigrationError) -> Self {
        Error::Core(err.into())
    }
}
