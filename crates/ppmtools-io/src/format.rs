//! Raster format detection
//!
//! Detects the PNM variant from the two-byte magic token at the start of
//! a file. Only the binary graymap (`P5`) and binary pixmap (`P6`)
//! variants are decoded; the others are recognised so the error can name
//! them.

use crate::{IoError, IoResult};
use ppmtools_core::PlaneCount;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Magic tokens of the PNM family
mod magic {
    pub const PBM_ASCII: &[u8] = b"P1";
    pub const PGM_ASCII: &[u8] = b"P2";
    pub const PPM_ASCII: &[u8] = b"P3";
    pub const PBM_BINARY: &[u8] = b"P4";
    pub const PGM_BINARY: &[u8] = b"P5";
    pub const PPM_BINARY: &[u8] = b"P6";
    pub const PAM: &[u8] = b"P7";
}

/// Binary raster variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PnmKind {
    /// Single-plane binary graymap (`P5`), used for grey and mosaic data
    Graymap,
    /// Three-plane binary pixmap (`P6`)
    Pixmap,
}

impl PnmKind {
    /// Two-byte magic token written at the start of the file.
    pub fn magic(self) -> &'static [u8] {
        match self {
            PnmKind::Graymap => magic::PGM_BINARY,
            PnmKind::Pixmap => magic::PPM_BINARY,
        }
    }

    /// Number of channels stored per pixel.
    pub fn channels(self) -> usize {
        self.plane_count().count()
    }

    /// Plane count of buffers in this variant.
    pub fn plane_count(self) -> PlaneCount {
        match self {
            PnmKind::Graymap => PlaneCount::Single,
            PnmKind::Pixmap => PlaneCount::Triple,
        }
    }

    /// Variant used to store a buffer with the given plane count.
    pub fn for_planes(planes: PlaneCount) -> Self {
        match planes {
            PlaneCount::Single => PnmKind::Graymap,
            PlaneCount::Triple => PnmKind::Pixmap,
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            PnmKind::Graymap => "pgm",
            PnmKind::Pixmap => "ppm",
        }
    }
}

/// Detect the raster variant of a file from its magic token
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<PnmKind> {
    let file = File::open(path).map_err(IoError::Io)?;
    read_magic(file)
}

/// Read and classify the two-byte magic token at the start of a stream
///
/// A stream that ends before two bytes is a malformed header.
pub(crate) fn read_magic<R: Read>(mut reader: R) -> IoResult<PnmKind> {
    let mut token = [0u8; 2];
    reader.read_exact(&mut token).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => {
            IoError::InvalidHeader("not enough data to read magic token".to_string())
        }
        _ => IoError::Io(e),
    })?;
    detect_format_from_bytes(&token)
}

/// Detect the raster variant from the leading bytes of a file
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<PnmKind> {
    if data.len() < 2 {
        return Err(IoError::InvalidHeader(
            "not enough data to read magic token".to_string(),
        ));
    }

    let token = &data[..2];
    if token == magic::PGM_BINARY {
        return Ok(PnmKind::Graymap);
    }
    if token == magic::PPM_BINARY {
        return Ok(PnmKind::Pixmap);
    }

    let name = if token == magic::PBM_ASCII || token == magic::PGM_ASCII || token == magic::PPM_ASCII
    {
        "ASCII PNM"
    } else if token == magic::PBM_BINARY {
        "binary bitmap"
    } else if token == magic::PAM {
        "PAM"
    } else {
        return Err(IoError::UnsupportedFormat(format!(
            "unknown magic token {:02x} {:02x}",
            token[0], token[1]
        )));
    };
    Err(IoError::UnsupportedFormat(format!(
        "{name} ({}) is not supported",
        String::from_utf8_lossy(token)
    )))
}
