//! I/O error types
//!
//! Provides a unified error type for raster decoding and encoding.
//! Malformed files surface as one of the format variants; buffer
//! construction failures (bad dimensions, allocation) are wrapped from
//! the core crate so that callers only need to handle one error type.

use thiserror::Error;

/// Error type for raster I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, short write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The magic token names a variant this codec does not handle, or not
    /// the variant the caller asked for
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The header is structurally invalid
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The payload is shorter or longer than the header promises
    #[error("payload size mismatch: expected {expected} bytes, got {actual}")]
    PayloadSize { expected: usize, actual: usize },

    /// A payload sample is larger than the header's maxval
    #[error("payload sample {value} exceeds maxval {max_value}")]
    SampleOutOfRange { value: u16, max_value: u16 },

    /// An error from the core library (dimensions, allocation)
    #[error("core error: {0}")]
    Core(#[from] ppmtools_core::Error),
}

impl IoError {
    /// Check if the error describes a malformed file rather than an
    /// environment or resource failure.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            IoError::UnsupportedFormat(_)
                | IoError::InvalidHeader(_)
                | IoError::PayloadSize { .. }
                | IoError::SampleOutOfRange { .. }
        )
    }
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
