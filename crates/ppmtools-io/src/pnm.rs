//! Binary PGM/PPM support
//!
//! Reads and writes the binary graymap (`P5`, one plane) and pixmap
//! (`P6`, three planes) variants. Samples are one byte when the maximum
//! value is at most 255 and two big-endian bytes otherwise; pixmap
//! samples are stored channel-interleaved, row-major.

use crate::format::PnmKind;
use crate::header::{PnmHeader, read_header_mem};
use crate::{IoError, IoResult};
use ppmtools_core::{PixelBuffer, interleave};
use std::io::{Read, Write};

/// Read a binary PGM or PPM image from a reader
///
/// The whole stream is consumed; bytes past the payload are an error.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<PixelBuffer> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data).map_err(IoError::Io)?;
    decode(&data)
}

/// Write a buffer as binary PGM (one plane) or PPM (three planes)
pub fn write_pnm<W: Write>(buffer: &PixelBuffer, mut writer: W) -> IoResult<()> {
    let header = PnmHeader {
        kind: PnmKind::for_planes(buffer.plane_count()),
        width: buffer.width(),
        height: buffer.height(),
        max_value: buffer.max_value(),
        header_len: 0,
    };
    let head = header.to_bytes();
    writer.write_all(&head).map_err(IoError::Io)?;

    let planes: Vec<&[u16]> = buffer.planes().collect();
    let samples = interleave(&planes);
    let payload = samples_to_bytes(&samples, buffer.sample_bytes());
    writer.write_all(&payload).map_err(IoError::Io)?;
    writer.flush().map_err(IoError::Io)?;

    log::debug!(
        "encoded {} {}x{} maxval {} ({} byte samples)",
        String::from_utf8_lossy(header.kind.magic()),
        header.width,
        header.height,
        header.max_value,
        buffer.sample_bytes()
    );
    Ok(())
}

/// Decode a complete in-memory file
pub(crate) fn decode(data: &[u8]) -> IoResult<PixelBuffer> {
    let header = read_header_mem(data)?;
    let payload = &data[header.header_len..];
    let expected = header.payload_len();
    if payload.len() != expected {
        return Err(IoError::PayloadSize {
            expected,
            actual: payload.len(),
        });
    }

    let samples = bytes_to_samples(payload, header.sample_bytes());
    if let Some(&value) = samples.iter().find(|&&s| s > header.max_value) {
        return Err(IoError::SampleOutOfRange {
            value,
            max_value: header.max_value,
        });
    }

    let buffer = PixelBuffer::from_interleaved(
        header.width,
        header.height,
        header.kind.channels(),
        header.max_value as u32,
        &samples,
    )?;

    log::debug!(
        "decoded {} {}x{} maxval {} ({} byte samples)",
        String::from_utf8_lossy(header.kind.magic()),
        header.width,
        header.height,
        header.max_value,
        header.sample_bytes()
    );
    Ok(buffer)
}

/// Unpack stored samples into host-order values.
///
/// Two-byte samples are big-endian on disk.
pub fn bytes_to_samples(bytes: &[u8], sample_bytes: usize) -> Vec<u16> {
    if sample_bytes == 2 {
        bytes
            .chunks_exact(2)
            .map(|b| u16::from_be_bytes([b[0], b[1]]))
            .collect()
    } else {
        bytes.iter().map(|&b| b as u16).collect()
    }
}

/// Pack host-order samples for storage, big-endian when two bytes wide.
pub fn samples_to_bytes(samples: &[u16], sample_bytes: usize) -> Vec<u8> {
    if sample_bytes == 2 {
        samples.iter().flat_map(|s| s.to_be_bytes()).collect()
    } else {
        samples.iter().map(|&s| s as u8).collect()
    }
}
