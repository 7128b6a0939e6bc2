//! ppmtools core - Basic data structures for raster conversion
//!
//! This crate provides the in-memory raster used throughout ppmtools and
//! the operations that work directly on it:
//!
//! - [`PixelBuffer`] / [`PixelBufferMut`] - One- or three-plane sample
//!   container (immutable / mutable)
//! - [`PixelBuffer::diff`] - Normalized absolute difference image
//! - [`PixelBuffer::rescale_bit_depth`] - Linear bit-depth requantization
//! - [`interleave`] / [`deinterleave`] - Planar and channel-interleaved
//!   sample layouts

pub mod buffer;
pub mod error;

pub use buffer::compare::diff_image;
pub use buffer::convert::{MAX_BIT_DEPTH, MIN_BIT_DEPTH, rescale_bit_depth};
pub use buffer::{
    MAX_DIMENSION, MAX_SAMPLE_VALUE, PixelBuffer, PixelBufferMut, PlaneCount, check_dimensions,
    check_max_value, deinterleave, interleave, sample_bytes_for,
};
pub use error::{Error, Result};

/// Clamp an integer into the 8-bit sample range `[0, 255]`.
#[inline]
pub fn clip8(value: i64) -> u16 {
    value.clamp(0, 255) as u16
}
