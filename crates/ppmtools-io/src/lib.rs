//! ppmtools-io - Binary PGM/PPM raster codec
//!
//! Reads and writes [`PixelBuffer`]s in the binary graymap (`P5`) and
//! pixmap (`P6`) formats with 8- or 16-bit samples.
//!
//! # Examples
//!
//! ```no_run
//! use ppmtools_io::{read_image, write_image};
//!
//! let buf = read_image("input.ppm").unwrap();
//! write_image(&buf, "copy.ppm").unwrap();
//! ```

mod error;
pub mod format;
pub mod header;
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{PnmKind, detect_format, detect_format_from_bytes};
pub use header::{PnmHeader, read_header, read_header_from, read_header_mem};
pub use pnm::{read_pnm, write_pnm};

use ppmtools_core::PixelBuffer;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read an image from a file, detecting `P5` or `P6` from its magic token
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    let path = path.as_ref();
    log::debug!("reading {}", path.display());
    let file = File::open(path).map_err(IoError::Io)?;
    read_pnm(BufReader::new(file))
}

/// Read a three-plane binary pixmap (`P6`)
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] if the file is any other variant.
pub fn read_ppm<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    read_expecting(path.as_ref(), PnmKind::Pixmap)
}

/// Read a single-plane binary graymap (`P5`)
///
/// # Errors
///
/// Returns [`IoError::UnsupportedFormat`] if the file is any other variant.
pub fn read_pgm<P: AsRef<Path>>(path: P) -> IoResult<PixelBuffer> {
    read_expecting(path.as_ref(), PnmKind::Graymap)
}

fn read_expecting(path: &Path, kind: PnmKind) -> IoResult<PixelBuffer> {
    let found = detect_format(path)?;
    if found != kind {
        return Err(IoError::UnsupportedFormat(format!(
            "{}: expected {} data, found {}",
            path.display(),
            String::from_utf8_lossy(kind.magic()),
            String::from_utf8_lossy(found.magic())
        )));
    }
    read_image(path)
}

/// Read an image from bytes
pub fn read_image_mem(data: &[u8]) -> IoResult<PixelBuffer> {
    pnm::decode(data)
}

/// Write an image to a file
///
/// One-plane buffers are written as `P5`, three-plane buffers as `P6`.
pub fn write_image<P: AsRef<Path>>(buffer: &PixelBuffer, path: P) -> IoResult<()> {
    let path = path.as_ref();
    log::debug!("writing {}", path.display());
    let file = File::create(path).map_err(IoError::Io)?;
    write_pnm(buffer, BufWriter::new(file))
}

/// Write an image to bytes
pub fn write_image_mem(buffer: &PixelBuffer) -> IoResult<Vec<u8>> {
    let mut out = Vec::new();
    write_pnm(buffer, &mut out)?;
    Ok(out)
}
