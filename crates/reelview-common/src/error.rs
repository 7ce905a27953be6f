//! Common error types used throughout reelview.
//!
//! Collaborator calls (HTTP, stores) report `anyhow` errors at their own
//! boundary; everything the catalog and view manager surface to callers is
//! folded into this enum.

/// Common error type for reelview.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input was provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The request collides with existing state (e.g. a duplicate view name).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Another operation is still in flight.
    #[error("Busy: another operation is in progress")]
    Busy,

    /// A call to the backing service failed.
    #[error("{0}")]
    Remote(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new NotFound error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new InvalidInput error.
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a new Conflict error.
    pub fn conflict<S: Into<String>>(msg: S) -> Self {
        Self::Conflict(msg.into())
    }

    /// Create a new Remote error.
    pub fn remote<S: Into<String>>(msg: S) -> Self {
        Self::Remote(msg.into())
    }

    /// Create a new Internal error.
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }

    /// Alias for invalid_input (for consistency).
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
