//! Planar / interleaved sample layout conversion
//!
//! Buffers keep one sequence per plane; the on-disk raster stores samples
//! channel-interleaved (`c0 c1 c2 c0 c1 c2 ...`). These helpers convert
//! between the two.

use super::PixelBuffer;
use crate::error::{Error, Result};

/// Interleave planes into one channel-interleaved sequence.
///
/// - `planes`: `[P0[0..n], P1[0..n], ...]`
/// - result: `[P0[0], P1[0], ..., P0[1], P1[1], ...]`
///
/// # Panics
///
/// Panics if the planes have different lengths.
pub fn interleave(planes: &[&[u16]]) -> Vec<u16> {
    let channels = planes.len();
    let Some(first) = planes.first() else {
        return Vec::new();
    };
    let npix = first.len();
    assert!(planes.iter().all(|p| p.len() == npix));

    let mut out = vec![0u16; npix * channels];
    for (c, plane) in planes.iter().enumerate() {
        for (i, &s) in plane.iter().enumerate() {
            out[i * channels + c] = s;
        }
    }
    out
}

/// Split a channel-interleaved sequence into `channels` planes.
///
/// # Panics
///
/// Panics if `channels` is zero or does not divide `samples.len()`.
pub fn deinterleave(samples: &[u16], channels: usize) -> Vec<Vec<u16>> {
    assert!(channels > 0);
    assert_eq!(samples.len() % channels, 0);
    let npix = samples.len() / channels;

    let mut planes = vec![vec![0u16; npix]; channels];
    for (i, pixel) in samples.chunks_exact(channels).enumerate() {
        for (c, &s) in pixel.iter().enumerate() {
            planes[c][i] = s;
        }
    }
    planes
}

impl PixelBuffer {
    /// Get all samples in channel-interleaved, row-major order.
    pub fn to_interleaved(&self) -> Vec<u16> {
        let planes: Vec<&[u16]> = self.planes().collect();
        interleave(&planes)
    }

    /// Build a buffer from channel-interleaved, row-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `samples` does not hold
    /// exactly `width * height * channels` values, plus any error from
    /// [`PixelBuffer::from_planes`].
    pub fn from_interleaved(
        width: u32,
        height: u32,
        channels: usize,
        max_value: u32,
        samples: &[u16],
    ) -> Result<Self> {
        let expected = (width as usize) * (height as usize) * channels;
        if channels == 0 || samples.len() != expected {
            return Err(Error::InvalidParameter(format!(
                "interleaved data holds {} samples, expected {expected}",
                samples.len()
            )));
        }
        Self::from_planes(width, height, max_value, deinterleave(samples, channels))
    }
}
