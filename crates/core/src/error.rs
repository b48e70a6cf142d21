//! Error types for stowage.

use thiserror::Error;

/// Result type alias for stowage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while allocating, planning or exporting.
///
/// Running out of space is not an error: infeasible orientations and
/// no-fit faces are reported as `None`, unplaceable items as part of the
/// allocation result.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid item descriptor provided.
    #[error("Invalid item: {0}")]
    InvalidItem(String),

    /// Invalid container descriptor provided.
    #[error("Invalid container: {0}")]
    InvalidContainer(String),

    /// Placement record with inconsistent coordinates.
    #[error("Malformed placement: {0}")]
    MalformedPlacement(String),

    /// No placement exists for the requested item.
    #[error("No placement found for item: {0}")]
    PlacementNotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Timestamp that could not be parsed.
    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    /// Arrangement export failed.
    #[error("Export failed: {0}")]
    Export(String),

    /// I/O failure while reading or writing documents.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[cfg(feature = "serde")]
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl Error {
    /// Creates an invalid item error.
    pub fn invalid_item(details: impl Into<String>) -> Self {
        Self::InvalidItem(details.into())
    }

    /// Creates an invalid container error.
    pub fn invalid_container(details: impl Into<String>) -> Self {
        Self::InvalidContainer(details.into())
    }

    /// Creates a malformed placement error.
    pub fn malformed_placement(details: impl Into<String>) -> Self {
        Self::MalformedPlacement(details.into())
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
