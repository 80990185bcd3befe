//! Error types for the spawn picker.

use thiserror::Error;

/// Top-level error type for spawn picker operations.
#[derive(Debug, Error)]
pub enum AresError {
    /// Spawn selection errors
    #[error("Spawn error: {0}")]
    Spawn(#[from] SpawnError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding or decoding errors
    #[error("Image error: {0}")]
    Image(String),
}

/// Errors raised by the spawn selection subsystem.
///
/// Geometric rejections are not errors; they are reported as a `Validity`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpawnError {
    /// World geometry collaborator returned unusable values
    #[error("Invalid world geometry: outer radius {outer_radius}, rim radius {rim_radius}")]
    InvalidGeometry {
        /// Outer world radius reported by the provider
        outer_radius: f64,
        /// Rim radius derived from the provider's rim area
        rim_radius: f64,
    },

    /// Ordinal outside the known space types
    #[error("Unknown space type ordinal: {0}")]
    UnknownSpaceType(u8),

    /// The selection was cancelled or its host went away before a commit
    #[error("Spawn selection abandoned before a point was committed")]
    SelectionAbandoned,

    /// Operation needs a mounted minimap
    #[error("Minimap is not mounted")]
    NotMounted,

    /// Mount was called twice without a teardown in between
    #[error("Minimap is already mounted")]
    AlreadyMounted,
}

/// Result type alias for spawn picker operations.
pub type AresResult<T> = Result<T, AresError>;
