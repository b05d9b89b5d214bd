//! Source and destination buffer views.
//!
//! Sources are packed row-major: row pitch is `width * kind.size()`, with no
//! independent stride. The destination carries its own pixel and row stride
//! in bytes, so a call can write into a sub-window, a padded layout, or one
//! channel of an interleaved buffer.

use crate::core::accessor;
use crate::core::error::{FunctionResult, PixelFunctionError};
use crate::core::kind::NumericKind;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Width and height of the processed window, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RasterSize {
    /// Pixels per row.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl RasterSize {
    /// Create a new size.
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Total number of pixels, saturating at `usize::MAX`.
    pub const fn pixel_count(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Whether the window contains no pixels.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Read-only source bands sharing one numeric kind.
#[derive(Debug, Clone, Copy)]
pub struct SourceBands<'a> {
    bands: &'a [&'a [u8]],
    kind: NumericKind,
}

impl<'a> SourceBands<'a> {
    /// Wrap caller-owned band buffers.
    pub fn new(bands: &'a [&'a [u8]], kind: NumericKind) -> Self {
        Self { bands, kind }
    }

    /// Number of source bands.
    #[inline]
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Whether there are no source bands.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// Numeric kind shared by every band.
    #[inline]
    pub fn kind(&self) -> NumericKind {
        self.kind
    }

    /// Real component of pixel `index` in band `band`.
    #[inline]
    pub fn real(&self, band: usize, index: usize) -> f64 {
        accessor::read_real(self.bands[band], self.kind, index)
    }

    /// Imaginary component of pixel `index` in band `band` (zero when real).
    #[inline]
    pub fn imag(&self, band: usize, index: usize) -> f64 {
        accessor::read_imag(self.bands[band], self.kind, index)
    }

    /// Pixel `index` of band `band` as a complex value.
    #[inline]
    pub fn complex(&self, band: usize, index: usize) -> Complex64 {
        accessor::read_complex(self.bands[band], self.kind, index)
    }

    /// Bytes each band must hold for `size`, saturating at `usize::MAX`.
    pub fn required_len(&self, size: RasterSize) -> usize {
        size.pixel_count().saturating_mul(self.kind.size())
    }

    /// Check every band is large enough for `size`.
    pub fn check_extent(&self, size: RasterSize) -> FunctionResult<()> {
        let required = self.required_len(size);
        for (band, bytes) in self.bands.iter().enumerate() {
            if bytes.len() < required {
                return Err(PixelFunctionError::SourceTooSmall {
                    band,
                    required,
                    actual: bytes.len(),
                });
            }
        }
        Ok(())
    }
}

/// Writable destination with explicit pixel and row strides.
#[derive(Debug)]
pub struct DestinationBuffer<'a> {
    data: &'a mut [u8],
    kind: NumericKind,
    pixel_stride: usize,
    row_stride: usize,
}

impl<'a> DestinationBuffer<'a> {
    /// Wrap a caller-owned buffer.
    ///
    /// `pixel_stride` and `row_stride` are byte distances between
    /// consecutive pixels in a row and between consecutive rows.
    /// Overlapping strides are accepted; later pixels overwrite earlier ones.
    pub fn new(data: &'a mut [u8], kind: NumericKind, pixel_stride: usize, row_stride: usize) -> Self {
        Self {
            data,
            kind,
            pixel_stride,
            row_stride,
        }
    }

    /// Wrap a packed row-major buffer `width` pixels wide.
    pub fn packed(data: &'a mut [u8], kind: NumericKind, width: usize) -> Self {
        Self::new(data, kind, kind.size(), width * kind.size())
    }

    /// Numeric kind written into the buffer.
    #[inline]
    pub fn kind(&self) -> NumericKind {
        self.kind
    }

    /// Bytes between consecutive pixels of a row.
    #[inline]
    pub fn pixel_stride(&self) -> usize {
        self.pixel_stride
    }

    /// Bytes between consecutive rows.
    #[inline]
    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Byte offset of pixel `(row, col)`.
    #[inline]
    pub fn offset(&self, row: usize, col: usize) -> usize {
        row * self.row_stride + col * self.pixel_stride
    }

    /// Write a real value at `(row, col)`.
    #[inline]
    pub fn put_real(&mut self, row: usize, col: usize, value: f64) {
        let offset = self.offset(row, col);
        accessor::write_real(value, self.data, self.kind, offset, self.pixel_stride, 1);
    }

    /// Write a complex value at `(row, col)`.
    #[inline]
    pub fn put_complex(&mut self, row: usize, col: usize, value: Complex64) {
        let offset = self.offset(row, col);
        accessor::write_complex(value.re, value.im, self.data, self.kind, offset, self.pixel_stride, 1);
    }

    /// Broadcast `value` into the first `count` pixels of `row`.
    #[inline]
    pub fn fill_row(&mut self, row: usize, count: usize, value: f64) {
        let offset = self.offset(row, 0);
        accessor::write_real(value, self.data, self.kind, offset, self.pixel_stride, count);
    }

    /// Bytes the buffer must hold to receive `size` pixels.
    ///
    /// Saturates at `usize::MAX` when strides push the last pixel past the
    /// address space, so the extent check fails instead of overflowing.
    pub fn required_len(&self, size: RasterSize) -> usize {
        if size.is_empty() {
            return 0;
        }
        let last_row = (size.height - 1).checked_mul(self.row_stride);
        let last_col = (size.width - 1).checked_mul(self.pixel_stride);
        last_row
            .zip(last_col)
            .and_then(|(row, col)| row.checked_add(col))
            .and_then(|offset| offset.checked_add(self.kind.size()))
            .unwrap_or(usize::MAX)
    }

    /// Check the buffer is large enough for `size`.
    pub fn check_extent(&self, size: RasterSize) -> FunctionResult<()> {
        let required = self.required_len(size);
        if self.data.len() < required {
            return Err(PixelFunctionError::DestinationTooSmall {
                required,
                actual: self.data.len(),
            });
        }
        Ok(())
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.data
    }
}
