//! Reconstruction kernels
//!
//! Point samplers that evaluate one plane at a continuous coordinate.
//! Coordinates follow the pixel-centre convention: sample `i` sits at
//! `i + 0.5`, so the integer neighbourhood of `u` starts at
//! `floor(u - 0.5)` and the fractional weight is the remainder.
//!
//! All neighbour reads clamp each axis into the image (edge replication).

/// Clamp a possibly negative coordinate into `[0, len - 1]`.
#[inline]
fn clamp_index(i: i64, len: u32) -> usize {
    i.clamp(0, len as i64 - 1) as usize
}

/// Integer origin and fractional offset of a continuous coordinate.
#[inline]
fn split_coord(u: f32) -> (i64, f32) {
    let shifted = u - 0.5;
    let origin = shifted.floor();
    (origin as i64, shifted - origin)
}

/// Round to nearest and clamp into `[0, max_value]`.
#[inline]
fn quantize(value: f32, max_value: u16) -> u16 {
    value.round().clamp(0.0, max_value as f32) as u16
}

/// Cubic convolution through four equally spaced samples.
///
/// Returns `B` at `t = 0` and `C` at `t = 1`.
#[inline]
pub fn cubic_kernel(a: f32, b: f32, c: f32, d: f32, t: f32) -> f32 {
    let ca = -a / 2.0 + 3.0 * b / 2.0 - 3.0 * c / 2.0 + d / 2.0;
    let cb = a - 5.0 * b / 2.0 + 2.0 * c - d / 2.0;
    let cc = -a / 2.0 + c / 2.0;
    let cd = b;
    ((ca * t + cb) * t + cc) * t + cd
}

/// Sample a plane at `(u, v)` with bicubic reconstruction.
///
/// The 4x4 neighbourhood runs from `floor(u - 0.5) - 1` to
/// `floor(u - 0.5) + 2` on each axis. Rows are filtered horizontally
/// first, then the four row results vertically.
///
/// # Arguments
///
/// * `plane` - Row-major samples, `width * height` long
/// * `u`, `v` - Continuous source coordinates
/// * `max_value` - Upper clamp for the result
pub fn sample_bicubic(
    plane: &[u16],
    u: f32,
    v: f32,
    width: u32,
    height: u32,
    max_value: u16,
) -> u16 {
    let (x0, fx) = split_coord(u);
    let (y0, fy) = split_coord(v);
    let w = width as usize;

    let xs = [-1i64, 0, 1, 2].map(|d| clamp_index(x0 + d, width));
    let rows = [-1i64, 0, 1, 2].map(|d| {
        let row = clamp_index(y0 + d, height) * w;
        let p = |i: usize| plane[row + xs[i]] as f32;
        cubic_kernel(p(0), p(1), p(2), p(3), fx)
    });
    let value = cubic_kernel(rows[0], rows[1], rows[2], rows[3], fy);
    quantize(value, max_value)
}

/// Blend four corner samples at continuous position `(x, y)`.
///
/// `p11`/`p12` are the top-left/top-right corners, `p21`/`p22` the
/// bottom-left/bottom-right ones; the weights are the fractional parts of
/// `(x - 0.5, y - 0.5)`. The result is rounded to nearest.
pub fn sample_bilinear(p11: f32, p12: f32, p21: f32, p22: f32, x: f32, y: f32) -> u16 {
    let (_, fx) = split_coord(x);
    let (_, fy) = split_coord(y);
    let top = p11 * (1.0 - fx) + p12 * fx;
    let bottom = p21 * (1.0 - fx) + p22 * fx;
    let value = top * (1.0 - fy) + bottom * fy;
    value.round().max(0.0) as u16
}

/// Sample a plane at `(u, v)` with bilinear reconstruction.
///
/// Fetches the four clamped corners around `(u, v)` and blends them
/// with [`sample_bilinear`].
pub fn sample_bilinear_at(
    plane: &[u16],
    u: f32,
    v: f32,
    width: u32,
    height: u32,
    max_value: u16,
) -> u16 {
    let (x0, _) = split_coord(u);
    let (y0, _) = split_coord(v);
    let w = width as usize;

    let (xa, xb) = (clamp_index(x0, width), clamp_index(x0 + 1, width));
    let (ya, yb) = (clamp_index(y0, height) * w, clamp_index(y0 + 1, height) * w);
    let value = sample_bilinear(
        plane[ya + xa] as f32,
        plane[ya + xb] as f32,
        plane[yb + xa] as f32,
        plane[yb + xb] as f32,
        u,
        v,
    );
    value.min(max_value)
}
