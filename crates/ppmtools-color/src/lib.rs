//! ppmtools-color - Color processing for ppmtools
//!
//! This crate provides:
//!
//! - **Color space conversion**: fixed-point RGB <-> YCbCr per pixel and
//!   per buffer
//! - **Bayer mosaic**: folding RGB into a single-plane RGGB mosaic and
//!   reconstructing RGB from it (block replication plus resample smoothing)

pub mod colorspace;
mod error;
pub mod mosaic;

pub use colorspace::{rgb_to_ycbcr, rgb_to_yuv, ycbcr_to_rgb, yuv_to_rgb};
pub use error::{ColorError, ColorResult};
pub use mosaic::{
    DemosaicOptions, MOSAIC_MAX_VALUE, demosaic, demosaic_blocky, demosaic_with_options, mosaic,
    rggb_channel,
};
