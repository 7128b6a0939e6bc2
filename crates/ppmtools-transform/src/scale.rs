//! Image resizing
//!
//! Resamples every plane of a buffer onto a new grid with bicubic
//! (default) or bilinear reconstruction.
//!
//! - [`resize_image`] - Resize to explicit target dimensions
//! - [`resize_with_options`] - Same, with an explicit sampling grid
//! - [`scale`] - Resize by per-axis factors

use crate::interp::{sample_bicubic, sample_bilinear_at};
use crate::{TransformError, TransformResult};
use ppmtools_core::{Error as CoreError, PixelBuffer};

/// Reconstruction filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeMethod {
    /// 4x4 cubic convolution
    #[default]
    Bicubic,
    /// 2x2 linear blend
    Bilinear,
}

/// How destination pixels map back into the source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleGrid {
    /// Destination pixel centres map to source pixel centres:
    /// `u = (x + 0.5) / scale`. Resizing to the same size is exact.
    #[default]
    PixelCenter,
    /// Destination pixel corners map to source coordinates: `u = x / scale`.
    /// At the same size this samples halfway between source pixels,
    /// which smooths block-replicated input.
    Corner,
}

/// Options for resize operations
#[derive(Debug, Clone, Default)]
pub struct ResizeOptions {
    /// Reconstruction filter
    pub method: ResizeMethod,
    /// Destination-to-source mapping
    pub grid: SampleGrid,
}

impl ResizeOptions {
    /// Create options with a specific method
    pub fn with_method(method: ResizeMethod) -> Self {
        Self {
            method,
            ..Default::default()
        }
    }

    /// Set the sampling grid
    pub fn grid(mut self, grid: SampleGrid) -> Self {
        self.grid = grid;
        self
    }
}

/// Resize an image to explicit dimensions
///
/// Each plane is resampled independently; the output keeps the source's
/// plane count and maximum value.
///
/// # Arguments
///
/// * `src` - Input buffer
/// * `width`, `height` - Target dimensions, in `[1, MAX_DIMENSION]`
/// * `method` - Reconstruction filter
///
/// # Errors
///
/// Returns [`TransformError::Core`] wrapping `InvalidDimension` if the
/// target size is out of range.
pub fn resize_image(
    src: &PixelBuffer,
    width: u32,
    height: u32,
    method: ResizeMethod,
) -> TransformResult<PixelBuffer> {
    resize_with_options(src, width, height, &ResizeOptions::with_method(method))
}

/// Resize an image to explicit dimensions with full options
pub fn resize_with_options(
    src: &PixelBuffer,
    width: u32,
    height: u32,
    options: &ResizeOptions,
) -> TransformResult<PixelBuffer> {
    let scale_x = width as f32 / src.width() as f32;
    let scale_y = height as f32 / src.height() as f32;
    resample(src, width, height, scale_x, scale_y, options)
}

/// Scale an image by the given factors
///
/// The destination size is `trunc(src_dim * factor)` per axis, and source
/// coordinates are the destination coordinates divided by the factor.
///
/// # Arguments
///
/// * `src` - Input buffer
/// * `scale_x` - Horizontal scale factor (e.g., 2.0 = double width)
/// * `scale_y` - Vertical scale factor
/// * `method` - Reconstruction filter
///
/// # Errors
///
/// Returns [`TransformError::InvalidScaleFactor`] if a factor is not a
/// positive finite number, or [`TransformError::Core`] wrapping
/// `InvalidDimension` if a scaled dimension truncates to zero or exceeds
/// the maximum.
pub fn scale(
    src: &PixelBuffer,
    scale_x: f32,
    scale_y: f32,
    method: ResizeMethod,
) -> TransformResult<PixelBuffer> {
    for (axis, factor) in [("x", scale_x), ("y", scale_y)] {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(TransformError::InvalidScaleFactor(format!(
                "{axis} factor must be positive and finite, got {factor}"
            )));
        }
    }
    let width = (src.width() as f32 * scale_x) as u32;
    let height = (src.height() as f32 * scale_y) as u32;
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimension { width, height }.into());
    }
    resample(
        src,
        width,
        height,
        scale_x,
        scale_y,
        &ResizeOptions::with_method(method),
    )
}

fn resample(
    src: &PixelBuffer,
    width: u32,
    height: u32,
    scale_x: f32,
    scale_y: f32,
    options: &ResizeOptions,
) -> TransformResult<PixelBuffer> {
    let mut dst = PixelBuffer::new(width, height, src.plane_count(), src.max_value() as u32)?
        .into_mut();

    let offset = match options.grid {
        SampleGrid::PixelCenter => 0.5,
        SampleGrid::Corner => 0.0,
    };
    let sampler: fn(&[u16], f32, f32, u32, u32, u16) -> u16 = match options.method {
        ResizeMethod::Bicubic => sample_bicubic,
        ResizeMethod::Bilinear => sample_bilinear_at,
    };
    let (sw, sh, max_value) = (src.width(), src.height(), src.max_value());

    for c in 0..src.plane_count().count() {
        let plane = src.plane(c);
        let out = dst.plane_mut(c);
        for y in 0..height {
            let v = (y as f32 + offset) / scale_y;
            let row = &mut out[(y * width) as usize..((y + 1) * width) as usize];
            for (x, d) in row.iter_mut().enumerate() {
                let u = (x as f32 + offset) / scale_x;
                *d = sampler(plane, u, v, sw, sh, max_value);
            }
        }
    }

    log::debug!(
        "resize {}x{} -> {}x{} ({:?}, {:?} grid)",
        sw,
        sh,
        width,
        height,
        options.method,
        options.grid
    );
    Ok(dst.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppmtools_core::PlaneCount;

    fn pattern(width: u32, height: u32) -> PixelBuffer {
        let mut buf = PixelBuffer::new(width, height, PlaneCount::Triple, 255)
            .unwrap()
            .into_mut();
        for c in 0..3 {
            for (i, s) in buf.plane_mut(c).iter_mut().enumerate() {
                *s = ((i * 37 + c * 91) % 256) as u16;
            }
        }
        buf.into()
    }

    #[test]
    fn test_identity_resize_is_exact() {
        let src = pattern(13, 9);
        for method in [ResizeMethod::Bicubic, ResizeMethod::Bilinear] {
            let dst = resize_image(&src, 13, 9, method).unwrap();
            assert_eq!(dst, src, "{method:?}");
        }
    }

    #[test]
    fn test_resize_dimensions_and_maxval() {
        let src = PixelBuffer::new(8, 6, PlaneCount::Single, 65535).unwrap();
        let dst = resize_image(&src, 20, 3, ResizeMethod::Bicubic).unwrap();
        assert_eq!((dst.width(), dst.height()), (20, 3));
        assert_eq!(dst.max_value(), 65535);
        assert_eq!(dst.plane_count(), PlaneCount::Single);
    }

    #[test]
    fn test_resize_constant_image_stays_constant() {
        let mut buf = PixelBuffer::new(5, 5, PlaneCount::Triple, 1023)
            .unwrap()
            .into_mut();
        buf.fill(&[0, 512, 1023]).unwrap();
        let src: PixelBuffer = buf.into();
        for method in [ResizeMethod::Bicubic, ResizeMethod::Bilinear] {
            let dst = resize_image(&src, 17, 11, method).unwrap();
            assert!(dst.plane(0).iter().all(|&s| s == 0));
            assert!(dst.plane(1).iter().all(|&s| s == 512));
            assert!(dst.plane(2).iter().all(|&s| s == 1023));
        }
    }

    #[test]
    fn test_resize_invalid_target() {
        let src = pattern(4, 4);
        assert!(matches!(
            resize_image(&src, 0, 4, ResizeMethod::Bicubic),
            Err(TransformError::Core(CoreError::InvalidDimension { .. }))
        ));
    }

    #[test]
    fn test_corner_grid_shifts_half_pixel() {
        // Horizontal ramp: on the corner grid each output lands halfway
        // between two source pixels
        let ramp: Vec<u16> = (0..8).map(|x| x * 10).collect();
        let plane: Vec<u16> = ramp.iter().cycle().take(8 * 4).copied().collect();
        let src = PixelBuffer::from_planes(8, 4, 255, vec![plane]).unwrap();
        let opts = ResizeOptions::default().grid(SampleGrid::Corner);
        let dst = resize_with_options(&src, 8, 4, &opts).unwrap();
        for x in 2..7u32 {
            assert_eq!(dst.get_sample(0, x, 1), Some((x * 10 - 5) as u16));
        }
    }

    #[test]
    fn test_scale_factor_dimensions() {
        let src = pattern(10, 7);
        let up = scale(&src, 2.0, 2.0, ResizeMethod::Bicubic).unwrap();
        assert_eq!((up.width(), up.height()), (20, 14));
        let down = scale(&src, 0.5, 0.5, ResizeMethod::Bilinear).unwrap();
        assert_eq!((down.width(), down.height()), (5, 3));
        let aniso = scale(&src, 1.5, 1.0, ResizeMethod::Bicubic).unwrap();
        assert_eq!((aniso.width(), aniso.height()), (15, 7));
    }

    #[test]
    fn test_scale_to_zero_is_dimension_error() {
        let src = pattern(4, 4);
        assert!(matches!(
            scale(&src, 0.1, 0.1, ResizeMethod::Bicubic),
            Err(TransformError::Core(CoreError::InvalidDimension {
                width: 0,
                height: 0
            }))
        ));
    }

    #[test]
    fn test_scale_invalid_factor() {
        let src = pattern(4, 4);
        for f in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                scale(&src, f, 1.0, ResizeMethod::Bicubic),
                Err(TransformError::InvalidScaleFactor(_))
            ));
        }
    }

    #[test]
    fn test_upscale_2x_preserves_order() {
        let ramp: Vec<u16> = (0..6).map(|x| x * 40).collect();
        let src = PixelBuffer::from_planes(6, 1, 255, vec![ramp]).unwrap();
        let dst = scale(&src, 2.0, 1.0, ResizeMethod::Bilinear).unwrap();
        let row = dst.plane(0);
        assert!(row.windows(2).all(|w| w[0] <= w[1]), "{row:?}");
        assert_eq!(row[0], 0);
        assert_eq!(row[11], 200);
    }
}
