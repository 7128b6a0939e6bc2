//! PixelBuffer - The in-memory raster container
//!
//! A `PixelBuffer` holds one plane (grey or Bayer mosaic) or three planes
//! (RGB or YCbCr, depending on context) of unsigned 16-bit samples.
//!
//! # Sample layout
//!
//! - Each plane is a row-major sequence of `width * height` samples
//! - Every sample lies in `[0, max_value]`
//! - All planes share the same width, height and `max_value`
//! - `max_value` also fixes the on-disk sample width: 1 byte if it is at
//!   most 255, 2 bytes otherwise
//!
//! # Ownership model
//!
//! A `PixelBuffer` is read-only and owned by exactly one caller; `Clone`
//! makes an independent deep copy. To write samples, convert it to a
//! [`PixelBufferMut`] with [`PixelBuffer::into_mut`] (no copy) or
//! [`PixelBuffer::to_mut`] (copy), then convert back with `Into<PixelBuffer>`.
//! Every whole-image operation returns a fresh buffer and leaves its
//! inputs untouched.

mod access;
pub mod compare;
pub mod convert;
mod layout;

pub use layout::{deinterleave, interleave};

use crate::error::{Error, Result};

/// Largest accepted width or height (the platform `short` maximum).
pub const MAX_DIMENSION: u32 = i16::MAX as u32;

/// Largest accepted maximum sample value.
pub const MAX_SAMPLE_VALUE: u32 = u16::MAX as u32;

/// Number of planes in a buffer.
///
/// Single-plane buffers hold grey or Bayer-mosaic data; three-plane
/// buffers hold RGB or YCbCr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PlaneCount {
    /// One plane (grey / mosaic)
    Single = 1,
    /// Three planes (channel 1/2/3)
    Triple = 3,
}

impl PlaneCount {
    /// Create `PlaneCount` from a raw plane count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `count` is not 1 or 3.
    pub fn from_count(count: usize) -> Result<Self> {
        match count {
            1 => Ok(PlaneCount::Single),
            3 => Ok(PlaneCount::Triple),
            _ => Err(Error::InvalidParameter(format!(
                "plane count must be 1 or 3, got {count}"
            ))),
        }
    }

    /// Get the number of planes.
    #[inline]
    pub fn count(self) -> usize {
        self as usize
    }
}

/// Bytes used to store one sample on disk for a given maximum value.
#[inline]
pub fn sample_bytes_for(max_value: u16) -> usize {
    if max_value > 255 { 2 } else { 1 }
}

/// Reject dimensions outside `[1, MAX_DIMENSION]`.
///
/// # Errors
///
/// Returns [`Error::InvalidDimension`] naming both dimensions.
pub fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(Error::InvalidDimension { width, height });
    }
    Ok(())
}

/// Reject maximum sample values outside `[1, 65535]`.
///
/// # Errors
///
/// Returns [`Error::InvalidMaxValue`].
pub fn check_max_value(max_value: u32) -> Result<u16> {
    if max_value == 0 || max_value > MAX_SAMPLE_VALUE {
        return Err(Error::InvalidMaxValue(max_value));
    }
    Ok(max_value as u16)
}

/// Allocate a zeroed plane, reporting allocation failure as an error.
fn alloc_plane(len: usize) -> Result<Vec<u16>> {
    let mut plane = Vec::new();
    plane
        .try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed {
            bytes: len.saturating_mul(std::mem::size_of::<u16>()),
        })?;
    plane.resize(len, 0);
    Ok(plane)
}

/// Internal buffer data
#[derive(Debug, Clone, PartialEq, Eq)]
struct BufferData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Inclusive upper bound of every sample
    max_value: u16,
    /// One or three planes of `width * height` samples
    planes: Vec<Vec<u16>>,
}

/// PixelBuffer - Main raster container
///
/// # Examples
///
/// ```
/// use ppmtools_core::{PixelBuffer, PlaneCount};
///
/// // A 640x480 8-bit RGB buffer
/// let buf = PixelBuffer::new(640, 480, PlaneCount::Triple, 255).unwrap();
/// assert_eq!(buf.width(), 640);
/// assert_eq!(buf.sample_bytes(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    inner: BufferData,
}

impl PixelBuffer {
    /// Create a new buffer with every sample set to zero.
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels, in `[1, MAX_DIMENSION]`
    /// * `height` - Height in pixels, in `[1, MAX_DIMENSION]`
    /// * `planes` - One or three planes
    /// * `max_value` - Maximum sample value, in `[1, 65535]`
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`], [`Error::InvalidMaxValue`], or
    /// [`Error::AllocationFailed`] if the planes cannot be allocated.
    pub fn new(width: u32, height: u32, planes: PlaneCount, max_value: u32) -> Result<Self> {
        check_dimensions(width, height)?;
        let max_value = check_max_value(max_value)?;

        let len = (width as usize) * (height as usize);
        let planes = (0..planes.count())
            .map(|_| alloc_plane(len))
            .collect::<Result<Vec<_>>>()?;

        Ok(PixelBuffer {
            inner: BufferData {
                width,
                height,
                max_value,
                planes,
            },
        })
    }

    /// Build a buffer from already populated planes.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions or maximum value are out of range,
    /// the plane count is not 1 or 3, a plane has the wrong length, or any
    /// sample exceeds `max_value`.
    pub fn from_planes(
        width: u32,
        height: u32,
        max_value: u32,
        planes: Vec<Vec<u16>>,
    ) -> Result<Self> {
        check_dimensions(width, height)?;
        let max_value = check_max_value(max_value)?;
        PlaneCount::from_count(planes.len())?;

        let len = (width as usize) * (height as usize);
        for plane in &planes {
            if plane.len() != len {
                return Err(Error::InvalidParameter(format!(
                    "plane holds {} samples, expected {len}",
                    plane.len()
                )));
            }
            if let Some(&value) = plane.iter().find(|&&s| s > max_value) {
                return Err(Error::SampleOutOfRange {
                    value: value as u32,
                    max: max_value,
                });
            }
        }

        Ok(PixelBuffer {
            inner: BufferData {
                width,
                height,
                max_value,
                planes,
            },
        })
    }

    /// Create a zeroed buffer with the same size and plane count.
    ///
    /// The maximum value is `max_value` if given, otherwise the source's.
    pub fn create_template(&self, max_value: Option<u32>) -> Result<Self> {
        Self::new(
            self.width(),
            self.height(),
            self.plane_count(),
            max_value.unwrap_or(self.max_value() as u32),
        )
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the maximum sample value.
    #[inline]
    pub fn max_value(&self) -> u16 {
        self.inner.max_value
    }

    /// Get the number of planes.
    #[inline]
    pub fn plane_count(&self) -> PlaneCount {
        match self.inner.planes.len() {
            1 => PlaneCount::Single,
            _ => PlaneCount::Triple,
        }
    }

    /// Get the bytes per sample used by the on-disk encoding.
    #[inline]
    pub fn sample_bytes(&self) -> usize {
        sample_bytes_for(self.inner.max_value)
    }

    /// Get the number of pixels per plane.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.inner.width as usize) * (self.inner.height as usize)
    }

    /// Get the samples of one plane.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid plane index.
    #[inline]
    pub fn plane(&self, index: usize) -> &[u16] {
        &self.inner.planes[index]
    }

    /// Iterate over all planes in channel order.
    pub fn planes(&self) -> impl Iterator<Item = &[u16]> {
        self.inner.planes.iter().map(Vec::as_slice)
    }

    /// Check if two buffers have the same width, height and plane count.
    pub fn sizes_equal(&self, other: &PixelBuffer) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.planes.len() == other.inner.planes.len()
    }

    /// Write buffer metadata to a writer (for debugging).
    pub fn print_info(&self, writer: &mut impl std::io::Write, label: Option<&str>) -> Result<()> {
        if let Some(text) = label {
            writeln!(writer, "  PixelBuffer info for {text}:")?;
        }
        writeln!(
            writer,
            "    width = {}, height = {}, planes = {}",
            self.inner.width,
            self.inner.height,
            self.inner.planes.len()
        )?;
        writeln!(
            writer,
            "    max value = {}, bytes per sample = {}",
            self.inner.max_value,
            self.sample_bytes()
        )?;
        Ok(())
    }

    /// Take mutable ownership of the samples without copying.
    pub fn into_mut(self) -> PixelBufferMut {
        PixelBufferMut { inner: self.inner }
    }

    /// Create a mutable copy of this buffer.
    pub fn to_mut(&self) -> PixelBufferMut {
        PixelBufferMut {
            inner: self.inner.clone(),
        }
    }
}

/// Mutable PixelBuffer
///
/// Allows modification of sample data. Convert back to an immutable
/// [`PixelBuffer`] using `Into<PixelBuffer>`.
///
/// Writes through [`PixelBufferMut::set_sample`] are range-checked against
/// the maximum value; slices from [`PixelBufferMut::plane_mut`] are not, so
/// producers writing through them must clamp themselves.
#[derive(Debug)]
pub struct PixelBufferMut {
    inner: BufferData,
}

impl PixelBufferMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the maximum sample value.
    #[inline]
    pub fn max_value(&self) -> u16 {
        self.inner.max_value
    }

    /// Get the number of planes.
    #[inline]
    pub fn plane_count(&self) -> PlaneCount {
        match self.inner.planes.len() {
            1 => PlaneCount::Single,
            _ => PlaneCount::Triple,
        }
    }

    /// Get the samples of one plane.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid plane index.
    #[inline]
    pub fn plane(&self, index: usize) -> &[u16] {
        &self.inner.planes[index]
    }

    /// Get mutable access to the samples of one plane.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a valid plane index.
    #[inline]
    pub fn plane_mut(&mut self, index: usize) -> &mut [u16] {
        &mut self.inner.planes[index]
    }

    /// Set every plane to a constant, one value per plane.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaneCountMismatch`] if `values` does not hold one
    /// value per plane, or [`Error::SampleOutOfRange`] if a value exceeds
    /// the maximum.
    pub fn fill(&mut self, values: &[u16]) -> Result<()> {
        if values.len() != self.inner.planes.len() {
            return Err(Error::PlaneCountMismatch {
                expected: self.inner.planes.len(),
                actual: values.len(),
            });
        }
        if let Some(&value) = values.iter().find(|&&v| v > self.inner.max_value) {
            return Err(Error::SampleOutOfRange {
                value: value as u32,
                max: self.inner.max_value,
            });
        }
        for (plane, &value) in self.inner.planes.iter_mut().zip(values) {
            plane.fill(value);
        }
        Ok(())
    }

    /// Set every sample of every plane to zero.
    pub fn clear(&mut self) {
        for plane in &mut self.inner.planes {
            plane.fill(0);
        }
    }
}

impl From<PixelBufferMut> for PixelBuffer {
    fn from(buf_mut: PixelBufferMut) -> Self {
        PixelBuffer {
            inner: buf_mut.inner,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plane_count() {
        assert_eq!(PlaneCount::from_count(1).unwrap(), PlaneCount::Single);
        assert_eq!(PlaneCount::from_count(3).unwrap(), PlaneCount::Triple);
        assert!(PlaneCount::from_count(2).is_err());
        assert!(PlaneCount::from_count(4).is_err());
        assert_eq!(PlaneCount::Triple.count(), 3);
    }

    #[test]
    fn test_buffer_creation() {
        let buf = PixelBuffer::new(100, 200, PlaneCount::Triple, 255).unwrap();
        assert_eq!(buf.width(), 100);
        assert_eq!(buf.height(), 200);
        assert_eq!(buf.max_value(), 255);
        assert_eq!(buf.plane_count(), PlaneCount::Triple);
        assert_eq!(buf.pixel_count(), 20_000);
        for plane in buf.planes() {
            assert_eq!(plane.len(), 20_000);
            assert!(plane.iter().all(|&s| s == 0));
        }
    }

    #[test]
    fn test_buffer_creation_invalid_dimensions() {
        assert!(matches!(
            PixelBuffer::new(0, 10, PlaneCount::Single, 255),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(PixelBuffer::new(10, 0, PlaneCount::Single, 255).is_err());
        assert!(PixelBuffer::new(32768, 1, PlaneCount::Single, 255).is_err());
        assert!(PixelBuffer::new(1, 32767, PlaneCount::Single, 255).is_ok());
    }

    #[test]
    fn test_buffer_creation_invalid_max_value() {
        assert!(matches!(
            PixelBuffer::new(4, 4, PlaneCount::Single, 0),
            Err(Error::InvalidMaxValue(0))
        ));
        assert!(PixelBuffer::new(4, 4, PlaneCount::Single, 65536).is_err());
        assert!(PixelBuffer::new(4, 4, PlaneCount::Single, 65535).is_ok());
    }

    #[test]
    fn test_sample_bytes() {
        assert_eq!(sample_bytes_for(1), 1);
        assert_eq!(sample_bytes_for(255), 1);
        assert_eq!(sample_bytes_for(256), 2);
        assert_eq!(sample_bytes_for(65535), 2);
    }

    #[test]
    fn test_from_planes_validation() {
        let ok = PixelBuffer::from_planes(2, 1, 255, vec![vec![1, 2]]).unwrap();
        assert_eq!(ok.plane(0), &[1, 2]);

        let wrong_len = PixelBuffer::from_planes(2, 2, 255, vec![vec![1, 2]]);
        assert!(matches!(wrong_len, Err(Error::InvalidParameter(_))));

        let too_big = PixelBuffer::from_planes(2, 1, 100, vec![vec![1, 101]]);
        assert!(matches!(
            too_big,
            Err(Error::SampleOutOfRange { value: 101, max: 100 })
        ));

        let two_planes = PixelBuffer::from_planes(1, 1, 255, vec![vec![0], vec![0]]);
        assert!(two_planes.is_err());
    }

    #[test]
    fn test_mut_roundtrip() {
        let buf = PixelBuffer::new(3, 2, PlaneCount::Triple, 1023).unwrap();
        let mut buf_mut = buf.into_mut();
        buf_mut.fill(&[1, 2, 1023]).unwrap();
        let buf: PixelBuffer = buf_mut.into();
        assert!(buf.plane(0).iter().all(|&s| s == 1));
        assert!(buf.plane(1).iter().all(|&s| s == 2));
        assert!(buf.plane(2).iter().all(|&s| s == 1023));
    }

    #[test]
    fn test_fill_rejects_bad_input() {
        let mut buf_mut = PixelBuffer::new(2, 2, PlaneCount::Triple, 255)
            .unwrap()
            .into_mut();
        assert!(matches!(
            buf_mut.fill(&[0, 0]),
            Err(Error::PlaneCountMismatch { expected: 3, actual: 2 })
        ));
        assert!(buf_mut.fill(&[0, 256, 0]).is_err());
    }

    #[test]
    fn test_to_mut_copies() {
        let buf = PixelBuffer::new(2, 2, PlaneCount::Single, 255).unwrap();
        let mut copy = buf.to_mut();
        copy.plane_mut(0)[0] = 7;
        assert_eq!(buf.plane(0)[0], 0);
        let copy: PixelBuffer = copy.into();
        assert_eq!(copy.plane(0)[0], 7);
    }

    #[test]
    fn test_create_template() {
        let buf = PixelBuffer::new(5, 4, PlaneCount::Triple, 255).unwrap();
        let same = buf.create_template(None).unwrap();
        assert!(same.sizes_equal(&buf));
        assert_eq!(same.max_value(), 255);
        let deep = buf.create_template(Some(65535)).unwrap();
        assert_eq!(deep.max_value(), 65535);
        assert_eq!(deep.sample_bytes(), 2);
    }

    #[test]
    fn test_sizes_equal() {
        let a = PixelBuffer::new(4, 4, PlaneCount::Triple, 255).unwrap();
        let b = PixelBuffer::new(4, 4, PlaneCount::Triple, 65535).unwrap();
        let c = PixelBuffer::new(4, 4, PlaneCount::Single, 255).unwrap();
        let d = PixelBuffer::new(4, 5, PlaneCount::Triple, 255).unwrap();
        assert!(a.sizes_equal(&b));
        assert!(!a.sizes_equal(&c));
        assert!(!a.sizes_equal(&d));
    }

    #[test]
    fn test_print_info() {
        let buf = PixelBuffer::new(8, 6, PlaneCount::Single, 4095).unwrap();
        let mut out = Vec::new();
        buf.print_info(&mut out, Some("mosaic")).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("mosaic"));
        assert!(text.contains("width = 8, height = 6, planes = 1"));
        assert!(text.contains("max value = 4095, bytes per sample = 2"));
    }
}
