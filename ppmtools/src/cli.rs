//! Command-line interface
//!
//! Argument definitions (clap derive) and the dispatcher that runs one
//! conversion per invocation: decode the input, apply the operation,
//! encode the output.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use ppmtools_color::DemosaicOptions;
use ppmtools_core::PixelBuffer;
use ppmtools_transform::ResizeMethod;

/// Smallest accepted zoom factor
pub const MIN_ZOOM: f32 = 0.1;

/// Largest accepted zoom factor
pub const MAX_ZOOM: f32 = 8.0;

/// Convert binary PGM/PPM images between bit depths, color spaces,
/// sizes and Bayer mosaics
#[derive(Debug, Parser)]
#[command(name = "ppmtools", version, about)]
pub struct Cli {
    /// Reconstruction filter for zoom and demosaic
    #[arg(long, global = true, value_enum, default_value_t = Filter::Bicubic)]
    pub filter: Filter,

    #[command(subcommand)]
    pub command: Command,
}

/// Reconstruction filter selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Filter {
    /// 4x4 cubic convolution
    Bicubic,
    /// 2x2 linear blend
    Bilinear,
}

impl From<Filter> for ResizeMethod {
    fn from(filter: Filter) -> Self {
        match filter {
            Filter::Bicubic => ResizeMethod::Bicubic,
            Filter::Bilinear => ResizeMethod::Bilinear,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the normalized absolute difference of two images
    Diff {
        /// First image; the output takes its maximum value
        first: PathBuf,
        /// Second image
        second: PathBuf,
        /// Output image
        output: PathBuf,
    },

    /// Requantize every sample to a new bit depth
    Depth {
        input: PathBuf,
        output: PathBuf,
        /// Target bits per sample
        #[arg(value_parser = clap::value_parser!(u32).range(8..=16))]
        bits: u32,
    },

    /// Resize by a uniform scale factor
    Zoom {
        input: PathBuf,
        output: PathBuf,
        /// Scale factor
        #[arg(value_parser = parse_zoom)]
        factor: f32,
    },

    /// Convert between RGB and YCbCr (0 = RGB to YCbCr, 1 = YCbCr to RGB)
    Color {
        input: PathBuf,
        output: PathBuf,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
        direction: u8,
    },

    /// Convert between RGB and an RGGB Bayer mosaic
    /// (0 = RGB to mosaic, 1 = mosaic to RGB)
    Bayer {
        input: PathBuf,
        output: PathBuf,
        #[arg(value_parser = clap::value_parser!(u8).range(0..=1))]
        direction: u8,
    },
}

fn parse_zoom(s: &str) -> Result<f32, String> {
    let factor: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a number"))?;
    if (MIN_ZOOM..=MAX_ZOOM).contains(&factor) {
        Ok(factor)
    } else {
        Err(format!("zoom factor must be in {MIN_ZOOM}..={MAX_ZOOM}"))
    }
}

fn read(path: &Path) -> anyhow::Result<PixelBuffer> {
    ppmtools_io::read_image(path).with_context(|| format!("reading '{}'", path.display()))
}

fn write(buffer: &PixelBuffer, path: &Path, what: &str) -> anyhow::Result<()> {
    ppmtools_io::write_image(buffer, path)
        .with_context(|| format!("writing '{}'", path.display()))?;
    log::info!(
        "{what} image '{}' ({}x{}, maxval {})",
        path.display(),
        buffer.width(),
        buffer.height(),
        buffer.max_value()
    );
    Ok(())
}

/// Run the conversion selected by `cli`
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let method = ResizeMethod::from(cli.filter);
    match &cli.command {
        Command::Diff {
            first,
            second,
            output,
        } => {
            let a = read(first)?;
            let b = read(second)?;
            let d = a.diff(&b).with_context(|| {
                format!("comparing '{}' with '{}'", first.display(), second.display())
            })?;
            write(&d, output, "diff")
        }
        Command::Depth {
            input,
            output,
            bits,
        } => {
            let src = read(input)?;
            let dst = src.rescale_bit_depth(*bits)?;
            write(&dst, output, "bit depth")
        }
        Command::Zoom {
            input,
            output,
            factor,
        } => {
            let src = read(input)?;
            let dst = ppmtools_transform::scale(&src, *factor, *factor, method)?;
            write(&dst, output, "zoom")
        }
        Command::Color {
            input,
            output,
            direction,
        } => {
            let src = read(input)?;
            if *direction == 0 {
                write(&ppmtools_color::rgb_to_yuv(&src)?, output, "YCbCr")
            } else {
                write(&ppmtools_color::yuv_to_rgb(&src)?, output, "RGB")
            }
        }
        Command::Bayer {
            input,
            output,
            direction,
        } => {
            let src = read(input)?;
            if *direction == 0 {
                write(&ppmtools_color::mosaic(&src)?, output, "bayer")
            } else {
                let options = DemosaicOptions::with_method(method);
                let dst = ppmtools_color::demosaic_with_options(&src, &options)?;
                write(&dst, output, "demosaic")
            }
        }
    }
}
