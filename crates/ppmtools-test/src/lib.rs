//! ppmtools-test - Regression test framework for ppmtools
//!
//! Suites run numbered checks against known answers and report every
//! failure at the end, instead of stopping at the first one.
//!
//! # Usage
//!
//! ```ignore
//! use ppmtools_test::{RegParams, gradient_rgb};
//!
//! let mut rp = RegParams::new("scale");
//! let src = gradient_rgb(32, 24, 255);
//! rp.compare_values(32.0, src.width() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```

mod error;
mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use fixtures::{checkerboard_rgb, gradient_gray, gradient_rgb};
pub use params::RegParams;

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // ppmtools-test is at crates/ppmtools-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
