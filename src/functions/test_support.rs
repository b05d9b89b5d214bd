//! Helpers for exercising pixel functions on small in-memory bands.

use crate::core::accessor;
use crate::core::buffer::{DestinationBuffer, RasterSize, SourceBands};
use crate::core::error::FunctionResult;
use crate::core::function::PixelFunction;
use crate::core::kind::NumericKind;
use num_complex::Complex64;

/// Encode real values as a packed band of `kind`.
pub fn real_band(kind: NumericKind, values: &[f64]) -> Vec<u8> {
    let mut bytes = vec![0u8; values.len() * kind.size()];
    for (i, &v) in values.iter().enumerate() {
        accessor::write_real(v, &mut bytes, kind, i * kind.size(), kind.size(), 1);
    }
    bytes
}

/// Encode `(re, im)` pairs as a packed band of `kind`.
pub fn complex_band(kind: NumericKind, values: &[(f64, f64)]) -> Vec<u8> {
    let mut bytes = vec![0u8; values.len() * kind.size()];
    for (i, &(re, im)) in values.iter().enumerate() {
        accessor::write_complex(re, im, &mut bytes, kind, i * kind.size(), kind.size(), 1);
    }
    bytes
}

/// Apply `function` over a `width x 1` window and decode the packed output.
pub fn run(
    function: &dyn PixelFunction,
    kind: NumericKind,
    bands: &[Vec<u8>],
    out_kind: NumericKind,
) -> FunctionResult<Vec<Complex64>> {
    let width = bands.first().map(|b| b.len() / kind.size()).unwrap_or(1);
    let refs: Vec<&[u8]> = bands.iter().map(|b| b.as_slice()).collect();
    let sources = SourceBands::new(&refs, kind);

    let mut out = vec![0u8; width * out_kind.size()];
    let mut dest = DestinationBuffer::packed(&mut out, out_kind, width);
    function.apply(&sources, &mut dest, RasterSize::new(width, 1))?;

    Ok((0..width)
        .map(|i| accessor::read_complex(&out, out_kind, i))
        .collect())
}

/// Real parts of [`run`] into a `Float64` destination.
pub fn run_real(
    function: &dyn PixelFunction,
    kind: NumericKind,
    bands: &[Vec<u8>],
) -> FunctionResult<Vec<f64>> {
    Ok(run(function, kind, bands, NumericKind::FLOAT64)?
        .into_iter()
        .map(|c| c.re)
        .collect())
}
