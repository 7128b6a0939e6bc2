//! Color space conversion
//!
//! Fixed-point RGB <-> YCbCr conversion with 16-bit fractional
//! coefficients. The formulas assume 8-bit component ranges regardless of
//! the buffer's declared maximum; every result is clipped to `[0, 255]`.
//!
//! A round trip through both directions stays within 2 of the original
//! value per channel for every 8-bit RGB triple.

use crate::{ColorError, ColorResult};
use ppmtools_core::{PixelBuffer, PlaneCount, clip8};

/// Convert one RGB pixel to YCbCr
///
/// - `Y  = (19595 R + 38470 G + 7471 B) >> 16`
/// - `Cb = (36962 (B - Y) >> 16) + 128`
/// - `Cr = (46727 (R - Y) >> 16) + 128`
///
/// The shifts are arithmetic, so negative differences round toward
/// negative infinity.
pub fn rgb_to_ycbcr(r: u16, g: u16, b: u16) -> (u16, u16, u16) {
    let (r, g, b) = (r as i64, g as i64, b as i64);
    let y = clip8((19595 * r + 38470 * g + 7471 * b) >> 16) as i64;
    let cb = clip8(((36962 * (b - y)) >> 16) + 128);
    let cr = clip8(((46727 * (r - y)) >> 16) + 128);
    (y as u16, cb, cr)
}

/// Convert one YCbCr pixel to RGB
///
/// - `R = Y + (91881 Cr >> 16) - 179`
/// - `G = Y - ((22544 Cb + 46793 Cr) >> 16) + 135`
/// - `B = Y + (116129 Cb >> 16) - 226`
pub fn ycbcr_to_rgb(y: u16, cb: u16, cr: u16) -> (u16, u16, u16) {
    let (y, cb, cr) = (y as i64, cb as i64, cr as i64);
    let r = clip8(y + ((91881 * cr) >> 16) - 179);
    let g = clip8(y - ((22544 * cb + 46793 * cr) >> 16) + 135);
    let b = clip8(y + ((116129 * cb) >> 16) - 226);
    (r, g, b)
}

/// Convert an RGB buffer to YCbCr
///
/// The output keeps the source's size and maximum value; samples are
/// additionally capped at that maximum when it is below 255.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedPlanes`] unless the source has three
/// planes.
pub fn rgb_to_yuv(src: &PixelBuffer) -> ColorResult<PixelBuffer> {
    convert_pixels(src, rgb_to_ycbcr)
}

/// Convert a YCbCr buffer to RGB
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedPlanes`] unless the source has three
/// planes.
pub fn yuv_to_rgb(src: &PixelBuffer) -> ColorResult<PixelBuffer> {
    convert_pixels(src, ycbcr_to_rgb)
}

fn convert_pixels(
    src: &PixelBuffer,
    convert: fn(u16, u16, u16) -> (u16, u16, u16),
) -> ColorResult<PixelBuffer> {
    require_triple(src)?;
    let max_value = src.max_value();
    let mut dst = src.create_template(None)?.into_mut();

    let (p0, p1, p2) = (src.plane(0), src.plane(1), src.plane(2));
    for i in 0..src.pixel_count() {
        let (a, b, c) = convert(p0[i], p1[i], p2[i]);
        dst.plane_mut(0)[i] = a.min(max_value);
        dst.plane_mut(1)[i] = b.min(max_value);
        dst.plane_mut(2)[i] = c.min(max_value);
    }

    log::debug!(
        "color conversion {}x{} maxval {}",
        src.width(),
        src.height(),
        max_value
    );
    Ok(dst.into())
}

pub(crate) fn require_triple(src: &PixelBuffer) -> ColorResult<()> {
    if src.plane_count() != PlaneCount::Triple {
        return Err(ColorError::UnsupportedPlanes {
            expected: 3,
            actual: src.plane_count().count(),
        });
    }
    Ok(())
}
