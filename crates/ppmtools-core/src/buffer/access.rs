//! Sample access functions
//!
//! Getting and setting individual samples by plane and position.
//! Samples are addressed as `plane[y * width + x]`.

use super::{PixelBuffer, PixelBufferMut};
use crate::error::{Error, Result};

impl PixelBuffer {
    /// Get one sample at (x, y) of a plane.
    ///
    /// Returns `None` if the plane index or coordinates are out of bounds.
    pub fn get_sample(&self, plane: usize, x: u32, y: u32) -> Option<u16> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = (y as usize) * (self.width() as usize) + x as usize;
        self.inner.planes.get(plane).map(|p| p[idx])
    }

    /// Get one sample without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if the plane index is invalid or the position lies outside
    /// the plane.
    #[inline]
    pub fn get_sample_unchecked(&self, plane: usize, x: u32, y: u32) -> u16 {
        self.inner.planes[plane][(y as usize) * (self.width() as usize) + x as usize]
    }

    /// Get the samples of every plane at (x, y), in channel order.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Vec<u16>> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = (y as usize) * (self.width() as usize) + x as usize;
        Some(self.inner.planes.iter().map(|p| p[idx]).collect())
    }
}

impl PixelBufferMut {
    /// Get one sample at (x, y) of a plane.
    pub fn get_sample(&self, plane: usize, x: u32, y: u32) -> Option<u16> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let idx = (y as usize) * (self.width() as usize) + x as usize;
        self.inner.planes.get(plane).map(|p| p[idx])
    }

    /// Set one sample at (x, y) of a plane.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the plane or position is out of
    /// bounds, or [`Error::SampleOutOfRange`] if `val` exceeds the maximum.
    pub fn set_sample(&mut self, plane: usize, x: u32, y: u32, val: u16) -> Result<()> {
        let planes = self.inner.planes.len();
        if plane >= planes {
            return Err(Error::IndexOutOfBounds {
                index: plane,
                len: planes,
            });
        }
        let len = (self.width() as usize) * (self.height() as usize);
        if x >= self.width() || y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: (y as usize) * (self.width() as usize) + x as usize,
                len,
            });
        }
        if val > self.inner.max_value {
            return Err(Error::SampleOutOfRange {
                value: val as u32,
                max: self.inner.max_value,
            });
        }
        self.set_sample_unchecked(plane, x, y, val);
        Ok(())
    }

    /// Set one sample without bounds or range checking.
    ///
    /// # Panics
    ///
    /// Panics if the plane index is invalid or the position lies outside
    /// the plane.
    #[inline]
    pub fn set_sample_unchecked(&mut self, plane: usize, x: u32, y: u32, val: u16) {
        let idx = (y as usize) * (self.width() as usize) + x as usize;
        self.inner.planes[plane][idx] = val;
    }
}
