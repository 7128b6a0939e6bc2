//! Bayer mosaic and demosaic
//!
//! The mosaic is a single plane laid out in RGGB 2x2 tiles:
//!
//! ```text
//! R  G
//! G  B
//! ```
//!
//! [`mosaic`] folds an RGB buffer into that layout by averaging each
//! channel over the tile. [`demosaic`] reverses it in two phases: block
//! replication of each tile's sensels into full-resolution planes,
//! followed by a same-size resample on the corner grid that smooths the
//! blocks.
//!
//! Width and height are expected to be even; a trailing odd row or
//! column is not visited and stays zero.

use crate::colorspace::require_triple;
use crate::{ColorError, ColorResult};
use ppmtools_core::{PixelBuffer, PlaneCount};
use ppmtools_transform::{ResizeMethod, ResizeOptions, SampleGrid, resize_with_options};

/// Maximum sample value of every mosaic produced by [`mosaic`].
pub const MOSAIC_MAX_VALUE: u16 = u16::MAX;

/// Channel index (0 = red, 1 = green, 2 = blue) of an RGGB sensel.
#[inline]
pub fn rggb_channel(x: u32, y: u32) -> usize {
    [0, 1, 1, 2][(((y & 1) << 1) | (x & 1)) as usize]
}

/// Options for demosaicing
#[derive(Debug, Clone, Default)]
pub struct DemosaicOptions {
    /// Filter used by the smoothing pass
    pub method: ResizeMethod,
}

impl DemosaicOptions {
    /// Create options with a specific smoothing filter
    pub fn with_method(method: ResizeMethod) -> Self {
        Self { method }
    }
}

/// Mean of `sum / count` rescaled from `[0, src_max]` to `[0, 65535]`,
/// rounded to nearest.
#[inline]
fn scaled_mean(sum: u64, count: u64, src_max: u64) -> u16 {
    let target = MOSAIC_MAX_VALUE as u64;
    let denom = count * src_max;
    ((2 * sum * target + denom) / (2 * denom)) as u16
}

/// Fold an RGB buffer into an RGGB mosaic
///
/// For every 2x2 tile, the top-left sensel is the mean of the four red
/// samples, the top-right the mean of the two top green samples, the
/// bottom-left the mean of the two bottom green samples, and the
/// bottom-right the mean of the four blue samples. Means are rescaled to
/// the fixed maximum of 65535.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedPlanes`] unless the source has three
/// planes.
pub fn mosaic(src: &PixelBuffer) -> ColorResult<PixelBuffer> {
    require_triple(src)?;
    let (w, h) = (src.width(), src.height());
    let src_max = src.max_value() as u64;
    let mut dst =
        PixelBuffer::new(w, h, PlaneCount::Single, MOSAIC_MAX_VALUE as u32)?.into_mut();

    let stride = w as usize;
    let out = dst.plane_mut(0);
    for y in (0..h / 2 * 2).step_by(2) {
        for x in (0..w / 2 * 2).step_by(2) {
            let top = y as usize * stride + x as usize;
            let bottom = top + stride;
            for (dx, dy) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                let channel = rggb_channel(x + dx, y + dy);
                let plane = src.plane(channel);
                let row = if dy == 0 { top } else { bottom };
                out[row + dx as usize] = if channel == 1 {
                    // green averages the pair on its own row
                    scaled_mean(plane[row] as u64 + plane[row + 1] as u64, 2, src_max)
                } else {
                    let sum = plane[top] as u64
                        + plane[top + 1] as u64
                        + plane[bottom] as u64
                        + plane[bottom + 1] as u64;
                    scaled_mean(sum, 4, src_max)
                };
            }
        }
    }

    log::debug!("mosaic {w}x{h} maxval {src_max} -> {MOSAIC_MAX_VALUE}");
    Ok(dst.into())
}

/// Reconstruct an RGB buffer from an RGGB mosaic with bicubic smoothing
///
/// See [`demosaic_with_options`].
pub fn demosaic(src: &PixelBuffer) -> ColorResult<PixelBuffer> {
    demosaic_with_options(src, &DemosaicOptions::default())
}

/// Reconstruct an RGB buffer from an RGGB mosaic
///
/// Block-replicates each tile with [`demosaic_blocky`], then resamples
/// the result at the same size on the corner grid with the configured
/// filter. The output keeps the mosaic's size and maximum value.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedPlanes`] unless the source has one
/// plane.
pub fn demosaic_with_options(
    src: &PixelBuffer,
    options: &DemosaicOptions,
) -> ColorResult<PixelBuffer> {
    let blocky = demosaic_blocky(src)?;
    log::trace!("demosaic: smoothing with {:?}", options.method);
    let resize = ResizeOptions::with_method(options.method).grid(SampleGrid::Corner);
    let smooth = resize_with_options(&blocky, blocky.width(), blocky.height(), &resize)?;
    Ok(smooth)
}

/// Replicate each RGGB tile into full-resolution RGB planes
///
/// Within a tile, all four red samples take the red sensel and all four
/// blue samples take the blue sensel. Green is replicated diagonally: the
/// top-left and bottom-right positions take the top-row green sensel, the
/// top-right and bottom-left positions take the bottom-row one.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedPlanes`] unless the source has one
/// plane.
pub fn demosaic_blocky(src: &PixelBuffer) -> ColorResult<PixelBuffer> {
    if src.plane_count() != PlaneCount::Single {
        return Err(ColorError::UnsupportedPlanes {
            expected: 1,
            actual: src.plane_count().count(),
        });
    }
    let (w, h) = (src.width(), src.height());
    let mut dst = PixelBuffer::new(w, h, PlaneCount::Triple, src.max_value() as u32)?.into_mut();

    let cfa = src.plane(0);
    let stride = w as usize;
    for y in (0..h / 2 * 2).step_by(2) {
        let top = y as usize * stride;
        let bottom = top + stride;
        for x in (0..w / 2 * 2).step_by(2) {
            let (l, r) = (x as usize, x as usize + 1);
            let red = cfa[top + l];
            let green_top = cfa[top + r];
            let green_bottom = cfa[bottom + l];
            let blue = cfa[bottom + r];

            let tile = [top + l, top + r, bottom + l, bottom + r];
            for (plane, values) in [
                (0, [red; 4]),
                (1, [green_top, green_bottom, green_bottom, green_top]),
                (2, [blue; 4]),
            ] {
                let out = dst.plane_mut(plane);
                for (&idx, v) in tile.iter().zip(values) {
                    out[idx] = v;
                }
            }
        }
    }

    log::trace!("demosaic: replicated {w}x{h} mosaic into RGB planes");
    Ok(dst.into())
}
