//! Error types for ppmtools-color

use thiserror::Error;

/// Errors that can occur during color processing operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] ppmtools_core::Error),

    /// Resampling error from the demosaic smoothing pass
    #[error("transform error: {0}")]
    Transform(#[from] ppmtools_transform::TransformError),

    /// The buffer has the wrong number of planes for this operation
    #[error("unsupported plane count: expected {expected}, got {actual}")]
    UnsupportedPlanes { expected: usize, actual: usize },
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
