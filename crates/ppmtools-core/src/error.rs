//! Error types for ppmtools-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Each variant captures enough context for diagnostics without exposing
//! internal implementation details.

use thiserror::Error;

/// ppmtools core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Width or height outside `[1, MAX_DIMENSION]`
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Maximum sample value outside `[1, 65535]`
    #[error("invalid maximum sample value: {0}")]
    InvalidMaxValue(u32),

    /// Sample larger than the buffer's maximum sample value
    #[error("sample value {value} exceeds maximum {max}")]
    SampleOutOfRange { value: u32, max: u16 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Two buffers that must share a size do not
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Two buffers that must share a plane count do not
    #[error("plane count mismatch: expected {expected}, got {actual}")]
    PlaneCountMismatch { expected: usize, actual: usize },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Memory allocation failed
    #[error("memory allocation failed ({bytes} bytes requested)")]
    AllocationFailed { bytes: usize },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for ppmtools core operations
pub type Result<T> = std::result::Result<T, Error>;
