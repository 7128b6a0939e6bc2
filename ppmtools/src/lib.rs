//! ppmtools - Raster conversion for binary PGM/PPM images
//!
//! Converts images between sample bit depths, RGB and YCbCr, spatial
//! resolutions, and single-plane RGGB Bayer mosaics.
//!
//! # Overview
//!
//! - Binary PGM/PPM I/O with 8- or 16-bit samples ([`io`])
//! - Bicubic and bilinear resampling ([`transform`])
//! - Fixed-point RGB <-> YCbCr, Bayer mosaic and demosaic ([`color`])
//! - Normalized difference and bit-depth requantization (core)
//!
//! # Example
//!
//! ```
//! use ppmtools::{PixelBuffer, PlaneCount};
//!
//! // A 640x480 16-bit RGB buffer
//! let buf = PixelBuffer::new(640, 480, PlaneCount::Triple, 65535).unwrap();
//! assert_eq!(buf.width(), 640);
//! assert_eq!(buf.sample_bytes(), 2);
//! ```

pub mod cli;

// Re-export core types (primary data structures used everywhere)
pub use ppmtools_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use ppmtools_color as color;
pub use ppmtools_io as io;
pub use ppmtools_transform as transform;
