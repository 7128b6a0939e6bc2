//! Bayer mosaic regression test
//!
//! Mosaics synthetic RGB images, reconstructs them with both smoothing
//! filters, and checks sizes, depths and reconstruction quality on
//! smooth content. Also runs the pair through the codec as the
//! command-line tool does.

use ppmtools_color::{
    ColorError, DemosaicOptions, MOSAIC_MAX_VALUE, demosaic, demosaic_with_options, mosaic,
};
use ppmtools_core::PixelBuffer;
use ppmtools_test::{RegParams, checkerboard_rgb, gradient_gray, gradient_rgb};
use ppmtools_transform::ResizeMethod;

/// Largest per-sample difference, after normalizing both to [0, 1].
fn max_normalized_error(a: &PixelBuffer, b: &PixelBuffer) -> f64 {
    let (am, bm) = (a.max_value() as f64, b.max_value() as f64);
    a.planes()
        .zip(b.planes())
        .flat_map(|(p, q)| p.iter().zip(q))
        .map(|(&x, &y)| (x as f64 / am - y as f64 / bm).abs())
        .fold(0.0, f64::max)
}

#[test]
fn mosaic_reg() {
    let mut rp = RegParams::new("mosaic");

    let src = gradient_rgb(64, 48, 255);

    // --- Test 1: mosaic is one plane at 16 bits ---
    let cfa = mosaic(&src).expect("mosaic");
    rp.compare_values(1.0, cfa.plane_count().count() as f64, 0.0);
    rp.compare_values(MOSAIC_MAX_VALUE as f64, cfa.max_value() as f64, 0.0);
    rp.compare_values(64.0, cfa.width() as f64, 0.0);
    rp.compare_values(48.0, cfa.height() as f64, 0.0);

    // --- Test 1b: known tile means ---
    // Red 10..40, green rows (100, 200) and (50, 150), one blue sample at 255
    let tile = PixelBuffer::from_interleaved(
        2,
        2,
        3,
        255,
        &[10, 100, 0, 20, 200, 0, 30, 50, 0, 40, 150, 255],
    )
    .expect("tile");
    let cfa_tile = mosaic(&tile).expect("mosaic tile");
    rp.compare_plane(&cfa_tile, 0, &[6425, 38550, 25700, 16384]);

    // --- Test 2: demosaic preserves resolution with either filter ---
    for method in [ResizeMethod::Bicubic, ResizeMethod::Bilinear] {
        let rgb = demosaic_with_options(&cfa, &DemosaicOptions::with_method(method))
            .expect("demosaic");
        rp.compare_values(64.0, rgb.width() as f64, 0.0);
        rp.compare_values(48.0, rgb.height() as f64, 0.0);
        rp.compare_values(3.0, rgb.plane_count().count() as f64, 0.0);
        rp.compare_values(65535.0, rgb.max_value() as f64, 0.0);

        // Smooth gradients survive the round trip closely
        let err = max_normalized_error(&src, &rgb);
        eprintln!("  {:?}: max normalized error {:.4}", method, err);
        rp.compare_values(0.0, err, 0.1);
    }

    // --- Test 3: hard edges still reconstruct to full size ---
    let board = checkerboard_rgb(40, 40, 8, 255);
    let rgb = demosaic(&mosaic(&board).expect("mosaic board")).expect("demosaic board");
    rp.compare_values(40.0, rgb.width() as f64, 0.0);

    // --- Test 3b: known reconstruction of a non-flat 4x2 mosaic ---
    let sensels = vec![60000, 30000, 10000, 40000, 20000, 50000, 0, 65535];
    let cfa_known = PixelBuffer::from_planes(4, 2, 65535, vec![sensels]).expect("4x2 mosaic");
    let linear = demosaic_with_options(
        &cfa_known,
        &DemosaicOptions::with_method(ResizeMethod::Bilinear),
    )
    .expect("bilinear demosaic");
    rp.compare_plane(&linear, 0, &[60000, 60000, 35000, 10000, 60000, 60000, 35000, 10000]);
    rp.compare_plane(&linear, 1, &[30000, 25000, 30000, 20000, 25000, 25000, 22500, 20000]);
    rp.compare_plane(&linear, 2, &[50000, 50000, 57768, 65535, 50000, 50000, 57768, 65535]);
    let cubic = demosaic(&cfa_known).expect("bicubic demosaic");
    rp.compare_plane(&cubic, 0, &[60000, 63125, 35000, 6875, 60000, 63125, 35000, 6875]);
    rp.compare_plane(&cubic, 1, &[31328, 23555, 33047, 21445, 25000, 25313, 22500, 19688]);
    rp.compare_plane(&cubic, 2, &[50000, 49029, 57768, 65535, 50000, 49029, 57768, 65535]);

    // --- Test 4: codec round trip of the mosaic ---
    let bytes = ppmtools_io::write_image_mem(&cfa).expect("encode mosaic");
    let header = b"P5\n64 48\n65535\n";
    rp.compare_strings(header, &bytes[..header.len()]);
    let back = ppmtools_io::read_image_mem(&bytes).expect("decode mosaic");
    rp.compare_buffers(&cfa, &back);

    // --- Test 5: plane-count preconditions ---
    let grey = gradient_gray(8, 8, 255);
    let rejected = matches!(mosaic(&grey), Err(ColorError::UnsupportedPlanes { .. }));
    rp.compare_values(1.0, rejected as u8 as f64, 0.0);
    let rejected = matches!(demosaic(&src), Err(ColorError::UnsupportedPlanes { .. }));
    rp.compare_values(1.0, rejected as u8 as f64, 0.0);

    assert!(rp.cleanup(), "mosaic regression test failed");
}
