//! Raster header parsing
//!
//! Extracts the variant, dimensions and maximum sample value from a
//! binary PNM header without decoding the payload.
//!
//! Header grammar:
//!
//! ```text
//! <magic> <ws> [# comment <newline>]* <width> <ws> <height> <ws> <maxval> <one ws byte>
//! ```
//!
//! Comments may appear wherever whitespace may; each one runs to the end
//! of its line.

use crate::format::{PnmKind, read_magic};
use crate::{IoError, IoResult};
use ppmtools_core::{check_dimensions, check_max_value, sample_bytes_for};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Raster metadata read without decoding the payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PnmHeader {
    /// Detected variant
    pub kind: PnmKind,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Maximum sample value
    pub max_value: u16,
    /// Offset of the first payload byte
    pub header_len: usize,
}

impl PnmHeader {
    /// Bytes per stored sample.
    pub fn sample_bytes(&self) -> usize {
        sample_bytes_for(self.max_value)
    }

    /// Exact payload length in bytes promised by this header.
    pub fn payload_len(&self) -> usize {
        (self.width as usize)
            * (self.height as usize)
            * self.kind.channels()
            * self.sample_bytes()
    }

    /// Serialize the header in the canonical layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(24);
        out.extend_from_slice(self.kind.magic());
        out.extend_from_slice(
            format!("\n{} {}\n{}\n", self.width, self.height, self.max_value).as_bytes(),
        );
        out
    }
}

/// Read raster metadata from a file path without decoding the payload
///
/// Only the header bytes are read from the file.
pub fn read_header<P: AsRef<Path>>(path: P) -> IoResult<PnmHeader> {
    let file = File::open(path.as_ref()).map_err(IoError::Io)?;
    read_header_from(BufReader::new(file))
}

/// Read raster metadata from bytes without decoding the payload
///
/// # Errors
///
/// - [`IoError::UnsupportedFormat`] for any magic token other than `P5`/`P6`
/// - [`IoError::InvalidHeader`] if a numeric field is missing, is not a
///   number, is not separated from the previous token, or maxval is not
///   followed by a whitespace byte
/// - [`IoError::Core`] wrapping `InvalidDimension` or `InvalidMaxValue`
pub fn read_header_mem(data: &[u8]) -> IoResult<PnmHeader> {
    read_header_from(data)
}

/// Read raster metadata from a buffered stream
///
/// Consumes exactly the header, leaving the stream at the first payload
/// byte. Errors are those of [`read_header_mem`], plus [`IoError::Io`].
pub fn read_header_from<R: BufRead>(reader: R) -> IoResult<PnmHeader> {
    let mut cursor = HeaderCursor { reader, pos: 0 };
    let kind = read_magic(&mut cursor.reader)?;
    cursor.pos = 2;

    let width = cursor.read_number("width")?;
    let height = cursor.read_number("height")?;
    let max_value = cursor.read_number("maxval")?;
    cursor.expect_single_whitespace()?;

    check_dimensions(width, height)?;
    let max_value = check_max_value(max_value)?;

    Ok(PnmHeader {
        kind,
        width,
        height,
        max_value,
        header_len: cursor.pos,
    })
}

/// Byte cursor over the header region of a stream
struct HeaderCursor<R> {
    reader: R,
    pos: usize,
}

impl<R: BufRead> HeaderCursor<R> {
    fn peek(&mut self) -> IoResult<Option<u8>> {
        let buf = self.reader.fill_buf().map_err(IoError::Io)?;
        Ok(buf.first().copied())
    }

    fn advance(&mut self) {
        self.reader.consume(1);
        self.pos += 1;
    }

    /// Skip whitespace and `#` comment lines; true if anything was skipped.
    fn skip_separators(&mut self) -> IoResult<bool> {
        let start = self.pos;
        while let Some(b) = self.peek()? {
            if b.is_ascii_whitespace() {
                self.advance();
            } else if b == b'#' {
                let mut comment = Vec::new();
                while let Some(c) = self.peek()? {
                    self.advance();
                    if c == b'\n' {
                        break;
                    }
                    comment.push(c);
                }
                log::trace!(
                    "skipped header comment {:?}",
                    String::from_utf8_lossy(&comment).trim_end()
                );
            } else {
                break;
            }
        }
        Ok(self.pos > start)
    }

    fn read_number(&mut self, field: &str) -> IoResult<u32> {
        let separated = self.skip_separators()?;
        match self.peek()? {
            None => {
                return Err(IoError::InvalidHeader(format!(
                    "unexpected end of header while reading {field}"
                )));
            }
            Some(b) if !b.is_ascii_digit() => {
                return Err(IoError::InvalidHeader(format!(
                    "expected digit for {field}, found byte 0x{b:02x}"
                )));
            }
            Some(_) if !separated => {
                return Err(IoError::InvalidHeader(format!(
                    "{field} must be preceded by whitespace"
                )));
            }
            Some(_) => {}
        }

        let mut value: u32 = 0;
        while let Some(b) = self.peek()?.filter(u8::is_ascii_digit) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add((b - b'0') as u32))
                .ok_or_else(|| IoError::InvalidHeader(format!("{field} does not fit in 32 bits")))?;
            self.advance();
        }
        Ok(value)
    }

    fn expect_single_whitespace(&mut self) -> IoResult<()> {
        match self.peek()? {
            Some(b) if b.is_ascii_whitespace() => {
                self.advance();
                Ok(())
            }
            Some(b) => Err(IoError::InvalidHeader(format!(
                "expected whitespace after maxval, found byte 0x{b:02x}"
            ))),
            None => Err(IoError::InvalidHeader(
                "header ends without whitespace after maxval".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ppmtools_core::Error as CoreError;

    #[test]
    fn test_read_header_basic() {
        let h = read_header_mem(b"P6\n4 3\n255\nxxxx").unwrap();
        assert_eq!(h.kind, PnmKind::Pixmap);
        assert_eq!((h.width, h.height, h.max_value), (4, 3, 255));
        assert_eq!(h.header_len, 11);
        assert_eq!(h.sample_bytes(), 1);
        assert_eq!(h.payload_len(), 36);
    }

    #[test]
    fn test_read_header_with_comments() {
        let data = b"P5\n# created by a scanner\n# second line\n640 480\n65535\n";
        let h = read_header_mem(data).unwrap();
        assert_eq!(h.kind, PnmKind::Graymap);
        assert_eq!((h.width, h.height, h.max_value), (640, 480, 65535));
        assert_eq!(h.header_len, data.len());
        assert_eq!(h.sample_bytes(), 2);
        assert_eq!(h.payload_len(), 640 * 480 * 2);
    }

    #[test]
    fn test_comment_between_fields() {
        let h = read_header_mem(b"P6 2\n# mid\n2 255\n").unwrap();
        assert_eq!((h.width, h.height), (2, 2));
    }

    #[test]
    fn test_non_digit_after_comments() {
        let err = read_header_mem(b"P6\n# comment\nx4 4\n255\n").unwrap_err();
        assert!(matches!(err, IoError::InvalidHeader(_)));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_truncated_header() {
        assert!(matches!(
            read_header_mem(b"P6\n4 4"),
            Err(IoError::InvalidHeader(_))
        ));
        assert!(matches!(
            read_header_mem(b"P6\n4 4\n255"),
            Err(IoError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_dimension_errors() {
        assert!(matches!(
            read_header_mem(b"P6\n0 4\n255\n"),
            Err(IoError::Core(CoreError::InvalidDimension { width: 0, height: 4 }))
        ));
        assert!(matches!(
            read_header_mem(b"P5\n4 32768\n255\n"),
            Err(IoError::Core(CoreError::InvalidDimension { .. }))
        ));
        assert!(read_header_mem(b"P5\n32767 1\n255\n").is_ok());
    }

    #[test]
    fn test_maxval_errors() {
        assert!(matches!(
            read_header_mem(b"P5\n1 1\n0\n"),
            Err(IoError::Core(CoreError::InvalidMaxValue(0)))
        ));
        assert!(read_header_mem(b"P5\n1 1\n65536\n").is_err());
        assert!(read_header_mem(b"P5\n1 1\n99999999999\n").is_err());
    }

    #[test]
    fn test_magic_must_be_separated() {
        assert!(matches!(
            read_header_mem(b"P62 2\n255\n"),
            Err(IoError::InvalidHeader(_))
        ));
        assert!(matches!(
            read_header_mem(b"P5#c\n2 2\n255\n"),
            Ok(PnmHeader { width: 2, .. })
        ));
        assert!(read_header_mem(b"P6 2 2 255 ").is_ok());
    }

    /// Serves the header once, then fails every later read
    struct HeaderThenFail {
        header: Option<&'static [u8]>,
    }

    impl std::io::Read for HeaderThenFail {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            match self.header.take() {
                Some(h) => {
                    buf[..h.len()].copy_from_slice(h);
                    Ok(h.len())
                }
                None => Err(std::io::Error::other("payload must not be read")),
            }
        }
    }

    #[test]
    fn test_stream_header_reads_no_payload() {
        let reader = BufReader::new(HeaderThenFail {
            header: Some(b"P5\n# scan\n3000 2000\n65535\n"),
        });
        let h = read_header_from(reader).unwrap();
        assert_eq!((h.width, h.height, h.max_value), (3000, 2000, 65535));
        assert_eq!(h.header_len, 26);
    }

    #[test]
    fn test_stream_left_at_payload() {
        let data = b"P6\n1 1\n255\n\x01\x02\x03";
        let mut rest = &data[..];
        let h = read_header_from(&mut rest).unwrap();
        assert_eq!(h.header_len, 11);
        assert_eq!(rest, &[1, 2, 3]);
    }

    #[test]
    fn test_header_to_bytes() {
        let h = PnmHeader {
            kind: PnmKind::Pixmap,
            width: 4,
            height: 4,
            max_value: 255,
            header_len: 11,
        };
        assert_eq!(h.to_bytes(), b"P6\n4 4\n255\n".to_vec());
        assert_eq!(read_header_mem(&h.to_bytes()).unwrap(), h);
    }
}
