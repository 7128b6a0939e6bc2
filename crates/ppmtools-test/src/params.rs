//! Check bookkeeping for regression suites
//!
//! A [`RegParams`] numbers every check it runs, records the failures, and
//! reports them in [`RegParams::cleanup`]. Checks compare computed values
//! against known answers; files written with [`RegParams::write_output`]
//! land in `tests/regout` for inspection only.

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use ppmtools_core::PixelBuffer;
use std::fs;
use std::path::Path;

/// State of one regression suite
pub struct RegParams {
    name: String,
    index: usize,
    failures: Vec<String>,
}

impl RegParams {
    /// Start a suite called `name`
    pub fn new(name: &str) -> Self {
        eprintln!("\n==== {name}_reg ====");
        Self {
            name: name.to_owned(),
            index: 0,
            failures: Vec::new(),
        }
    }

    /// Number of checks run so far
    pub fn index(&self) -> usize {
        self.index
    }

    /// Record the outcome of the next check
    fn record(&mut self, ok: bool, detail: impl FnOnce() -> String) -> bool {
        self.index += 1;
        if !ok {
            let msg = format!("{}_reg check {}: {}", self.name, self.index, detail());
            eprintln!("{msg}");
            self.failures.push(msg);
        }
        ok
    }

    /// Check that `actual` is within `delta` of `expected`
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        let off = (expected - actual).abs();
        self.record(off <= delta, || {
            format!("expected {expected}, got {actual} (off by {off}, allowed {delta})")
        })
    }

    /// Check that two buffers are identical
    ///
    /// Size, plane count, maximum value and every sample must match.
    pub fn compare_buffers(&mut self, buf1: &PixelBuffer, buf2: &PixelBuffer) -> bool {
        self.compare_similar_buffers(buf1, buf2, 0)
    }

    /// Check that two buffers match in shape and differ by at most
    /// `max_diff` per sample
    pub fn compare_similar_buffers(
        &mut self,
        buf1: &PixelBuffer,
        buf2: &PixelBuffer,
        max_diff: u16,
    ) -> bool {
        let shape = |b: &PixelBuffer| {
            (b.width(), b.height(), b.plane_count().count(), b.max_value())
        };
        if !buf1.sizes_equal(buf2) || buf1.max_value() != buf2.max_value() {
            let (s1, s2) = (shape(buf1), shape(buf2));
            return self.record(false, || {
                format!("shape (w, h, planes, maxval) {s1:?} vs {s2:?}")
            });
        }

        let width = buf1.width() as usize;
        let mismatch = buf1
            .planes()
            .zip(buf2.planes())
            .enumerate()
            .find_map(|(c, (p1, p2))| {
                p1.iter()
                    .zip(p2)
                    .position(|(&a, &b)| a.abs_diff(b) > max_diff)
                    .map(|i| (c, i, p1[i], p2[i]))
            });
        self.record(mismatch.is_none(), || {
            let (c, i, a, b) = mismatch.unwrap_or_default();
            format!(
                "plane {c} at ({}, {}): {a} vs {b}, allowed difference {max_diff}",
                i % width,
                i / width
            )
        })
    }

    /// Check that one plane of `buf` holds exactly `expected`, row-major
    pub fn compare_plane(&mut self, buf: &PixelBuffer, plane: usize, expected: &[u16]) -> bool {
        let actual = buf.plane(plane);
        self.record(actual == expected, || {
            format!("plane {plane}: expected {expected:?}, got {actual:?}")
        })
    }

    /// Check two byte strings for equality
    pub fn compare_strings(&mut self, data1: &[u8], data2: &[u8]) -> bool {
        let first = data1.iter().zip(data2).position(|(a, b)| a != b);
        self.record(data1 == data2, || {
            format!(
                "byte strings differ (lengths {} and {}, first difference at {first:?})",
                data1.len(),
                data2.len()
            )
        })
    }

    /// Encode `buf` into the output directory as `<suite>_<file_name>`
    /// and return the path written
    ///
    /// The extension of `file_name` does not select the variant: one-plane
    /// buffers are always graymaps and three-plane ones pixmaps.
    pub fn write_output(&self, buf: &PixelBuffer, file_name: &str) -> TestResult<String> {
        let dir = regout_dir();
        fs::create_dir_all(&dir)?;
        let path = Path::new(&dir)
            .join(format!("{}_{file_name}", self.name))
            .display()
            .to_string();
        ppmtools_io::write_image(buf, &path).map_err(|e| TestError::ImageWrite {
            path: path.clone(),
            message: e.to_string(),
        })?;
        Ok(path)
    }

    /// Path in the output directory for a file this suite writes itself
    pub fn output_path(&self, file_name: &str) -> String {
        format!("{}/{}_{file_name}", regout_dir(), self.name)
    }

    /// Print a summary and return whether every check passed
    pub fn cleanup(self) -> bool {
        let ok = self.failures.is_empty();
        if ok {
            eprintln!("{}_reg: all {} checks passed\n", self.name, self.index);
        } else {
            eprintln!(
                "{}_reg: {} of {} checks failed",
                self.name,
                self.failures.len(),
                self.index
            );
            for failure in &self.failures {
                eprintln!("  {failure}");
            }
            eprintln!();
        }
        ok
    }

    /// Whether every check so far has passed
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Messages for the failed checks
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
