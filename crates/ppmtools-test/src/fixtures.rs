//! Synthetic test images
//!
//! Deterministic buffers built in memory so the regression suite needs no
//! binary test data.

use ppmtools_core::PixelBuffer;

fn ramp(pos: u32, len: u32, max_value: u32) -> u16 {
    if len <= 1 {
        return 0;
    }
    (pos as u64 * max_value as u64 / (len as u64 - 1)) as u16
}

/// Three-plane gradient: red ramps left to right, green top to bottom,
/// blue along the diagonal.
///
/// # Panics
///
/// Panics if the dimensions or maximum value are out of range.
pub fn gradient_rgb(width: u32, height: u32, max_value: u32) -> PixelBuffer {
    let mut samples = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            samples.push(ramp(x, width, max_value));
            samples.push(ramp(y, height, max_value));
            samples.push(ramp(x + y, width + height - 1, max_value));
        }
    }
    PixelBuffer::from_interleaved(width, height, 3, max_value, &samples)
        .expect("gradient fixture dimensions")
}

/// Single-plane diagonal gradient.
///
/// # Panics
///
/// Panics if the dimensions or maximum value are out of range.
pub fn gradient_gray(width: u32, height: u32, max_value: u32) -> PixelBuffer {
    let mut samples = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            samples.push(ramp(x + y, width + height - 1, max_value));
        }
    }
    PixelBuffer::from_planes(width, height, max_value, vec![samples])
        .expect("gradient fixture dimensions")
}

/// Three-plane checkerboard of `cell`-pixel squares alternating between
/// a warm and a cool color.
///
/// # Panics
///
/// Panics if the dimensions or maximum value are out of range, or if
/// `cell` is zero.
pub fn checkerboard_rgb(width: u32, height: u32, cell: u32, max_value: u32) -> PixelBuffer {
    assert!(cell > 0, "checkerboard cell size must be positive");
    let m = max_value as u64;
    let warm = [m, m * 3 / 4, m / 4].map(|v| v as u16);
    let cool = [m / 8, m / 2, m].map(|v| v as u16);

    let mut samples = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let color = if (x / cell + y / cell) % 2 == 0 {
                warm
            } else {
                cool
            };
            samples.extend(color);
        }
    }
    PixelBuffer::from_interleaved(width, height, 3, max_value, &samples)
        .expect("checkerboard fixture dimensions")
}
