//! Error types for the Weft kernel.
//!
//! All crates return `WeftResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Weft kernel.
#[derive(Debug, Error)]
pub enum WeftError {
    /// Configuration value is invalid. Raised before any state is touched.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A spring's endpoints coincide, so it has no direction.
    #[error("Degenerate spring between vertices {a} and {b}")]
    DegenerateSpring {
        a: u32,
        b: u32,
    },

    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl WeftError {
    /// Shorthand for an [`WeftError::InvalidConfiguration`] with a formatted message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

/// Convenience alias for `Result<T, WeftError>`.
pub type WeftResult<T> = Result<T, WeftError>;
