//! ppmtools-transform - Resampling for ppmtools
//!
//! This crate provides:
//!
//! - Point samplers evaluating a plane at a continuous coordinate
//!   (bicubic convolution, bilinear blend) with edge-replicating reads
//! - Whole-buffer resizing to explicit dimensions or by scale factors

mod error;
pub mod interp;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use interp::{cubic_kernel, sample_bicubic, sample_bilinear, sample_bilinear_at};
pub use scale::{
    ResizeMethod, ResizeOptions, SampleGrid, resize_image, resize_with_options, scale,
};
