//! Bit-depth requantization
//!
//! Linear rescaling of every sample to a new maximum value `2^bits - 1`.

use super::PixelBuffer;
use crate::error::{Error, Result};

/// Smallest accepted target bit depth.
pub const MIN_BIT_DEPTH: u32 = 1;

/// Largest accepted target bit depth.
pub const MAX_BIT_DEPTH: u32 = 16;

impl PixelBuffer {
    /// Rescale every sample to a new bit depth.
    ///
    /// The output maximum value is `2^target_bits - 1`, and each sample
    /// becomes `trunc(s / src.max * dst.max)`, computed exactly so that
    /// rescaling to the current depth returns the same samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `target_bits` is outside
    /// `[1, 16]`.
    pub fn rescale_bit_depth(&self, target_bits: u32) -> Result<PixelBuffer> {
        if !(MIN_BIT_DEPTH..=MAX_BIT_DEPTH).contains(&target_bits) {
            return Err(Error::InvalidParameter(format!(
                "bit depth must be in {MIN_BIT_DEPTH}..={MAX_BIT_DEPTH}, got {target_bits}"
            )));
        }
        let src_max = self.max_value() as u64;
        let dst_max = (1u64 << target_bits) - 1;

        let mut out = self.create_template(Some(dst_max as u32))?.into_mut();
        for c in 0..self.plane_count().count() {
            let src = self.plane(c);
            for (d, &s) in out.plane_mut(c).iter_mut().zip(src) {
                *d = (s as u64 * dst_max / src_max) as u16;
            }
        }

        log::debug!(
            "rescale {}x{}: max value {} -> {}",
            self.width(),
            self.height(),
            src_max,
            dst_max
        );
        Ok(out.into())
    }

    /// Bit depth implied by the maximum value, if it is of the form `2^k - 1`.
    pub fn bit_depth(&self) -> Option<u32> {
        let next = self.max_value() as u32 + 1;
        next.is_power_of_two().then(|| next.trailing_zeros())
    }
}

/// Rescale every sample of `src` to `target_bits` bits.
///
/// See [`PixelBuffer::rescale_bit_depth`].
pub fn rescale_bit_depth(src: &PixelBuffer, target_bits: u32) -> Result<PixelBuffer> {
    src.rescale_bit_depth(target_bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_8_to_16_bits() {
        let src = PixelBuffer::from_planes(3, 1, 255, vec![vec![0, 128, 255]]).unwrap();
        let dst = src.rescale_bit_depth(16).unwrap();
        assert_eq!(dst.max_value(), 65535);
        // 128 * 65535 / 255 = 32896
        assert_eq!(dst.plane(0), &[0, 32896, 65535]);
    }

    #[test]
    fn test_16_to_8_bits_truncates() {
        let src = PixelBuffer::from_planes(3, 1, 65535, vec![vec![0, 257, 65534]]).unwrap();
        let dst = src.rescale_bit_depth(8).unwrap();
        assert_eq!(dst.max_value(), 255);
        // 65534 * 255 / 65535 = 254.996 -> 254
        assert_eq!(dst.plane(0), &[0, 1, 254]);
    }

    #[test]
    fn test_same_depth_is_identity() {
        let samples: Vec<u16> = (0..1024).collect();
        let src = PixelBuffer::from_planes(32, 32, 1023, vec![samples]).unwrap();
        assert_eq!(src.bit_depth(), Some(10));
        let dst = rescale_bit_depth(&src, 10).unwrap();
        assert!(dst.equals(&src));
    }

    #[test]
    fn test_invalid_bit_depth() {
        let src = PixelBuffer::from_planes(1, 1, 255, vec![vec![0]]).unwrap();
        assert!(src.rescale_bit_depth(0).is_err());
        assert!(src.rescale_bit_depth(17).is_err());
    }

    #[test]
    fn test_bit_depth() {
        let b = |m: u32| PixelBuffer::from_planes(1, 1, m, vec![vec![0]]).unwrap();
        assert_eq!(b(255).bit_depth(), Some(8));
        assert_eq!(b(65535).bit_depth(), Some(16));
        assert_eq!(b(1).bit_depth(), Some(1));
        assert_eq!(b(1000).bit_depth(), None);
    }
}
