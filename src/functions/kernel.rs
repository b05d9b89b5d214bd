//! Shared row-major iteration for pixel functions.
//!
//! Every built-in walks the window the same way: rows top to bottom, columns
//! left to right, with `ii = row * width + col` addressing the packed sources.
//! Only the per-pixel closure differs.

use crate::core::buffer::{DestinationBuffer, RasterSize};
use num_complex::Complex64;

/// Evaluate `pixel(ii)` for every pixel and store the real result.
#[inline]
pub fn map_real<F>(size: RasterSize, dest: &mut DestinationBuffer<'_>, mut pixel: F)
where
    F: FnMut(usize) -> f64,
{
    for row in 0..size.height {
        let base = row * size.width;
        for col in 0..size.width {
            dest.put_real(row, col, pixel(base + col));
        }
    }
}

/// Evaluate `pixel(ii)` for every pixel and store the complex result.
///
/// Real destinations keep only the real part.
#[inline]
pub fn map_complex<F>(size: RasterSize, dest: &mut DestinationBuffer<'_>, mut pixel: F)
where
    F: FnMut(usize) -> Complex64,
{
    for row in 0..size.height {
        let base = row * size.width;
        for col in 0..size.width {
            dest.put_complex(row, col, pixel(base + col));
        }
    }
}

/// Broadcast one value into every pixel, a row at a time.
#[inline]
pub fn fill(size: RasterSize, dest: &mut DestinationBuffer<'_>, value: f64) {
    if size.width == 0 {
        return;
    }
    for row in 0..size.height {
        dest.fill_row(row, size.width, value);
    }
}
