//! Image comparison operations
//!
//! - Exact equality of two buffers
//! - Normalized per-sample absolute difference image
//!
//! Differences are taken between samples normalized by each buffer's own
//! maximum value, so an 8-bit and a 16-bit rendition of the same picture
//! compare as (nearly) equal.

use super::PixelBuffer;
use crate::error::{Error, Result};

impl PixelBuffer {
    /// Check if two buffers are exactly equal: same size, plane count,
    /// maximum value and samples.
    pub fn equals(&self, other: &PixelBuffer) -> bool {
        self == other
    }

    /// Create a normalized absolute difference image.
    ///
    /// For every plane and pixel the output sample is
    /// `trunc(|a / a.max - b / b.max| * a.max)`, computed exactly. The
    /// output inherits size, plane count and maximum value from `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] if the sizes differ, or
    /// [`Error::PlaneCountMismatch`] if the plane counts differ.
    pub fn diff(&self, other: &PixelBuffer) -> Result<PixelBuffer> {
        if self.width() != other.width() || self.height() != other.height() {
            return Err(Error::DimensionMismatch {
                expected: (self.width(), self.height()),
                actual: (other.width(), other.height()),
            });
        }
        if self.plane_count() != other.plane_count() {
            return Err(Error::PlaneCountMismatch {
                expected: self.plane_count().count(),
                actual: other.plane_count().count(),
            });
        }

        let a_max = self.max_value() as u64;
        let b_max = other.max_value() as u64;
        let d_max = a_max;
        let denom = a_max * b_max;

        let mut out = self.create_template(None)?.into_mut();
        for c in 0..self.plane_count().count() {
            let (pa, pb) = (self.plane(c), other.plane(c));
            let dst = out.plane_mut(c);
            for ((d, &a), &b) in dst.iter_mut().zip(pa).zip(pb) {
                let lhs = a as u64 * b_max;
                let rhs = b as u64 * a_max;
                *d = (lhs.abs_diff(rhs) * d_max / denom) as u16;
            }
        }

        log::debug!(
            "diff {}x{} ({} planes), max value {}",
            self.width(),
            self.height(),
            self.plane_count().count(),
            d_max
        );
        Ok(out.into())
    }
}

/// Normalized absolute difference of two buffers.
///
/// See [`PixelBuffer::diff`].
pub fn diff_image(a: &PixelBuffer, b: &PixelBuffer) -> Result<PixelBuffer> {
    a.diff(b)
}
