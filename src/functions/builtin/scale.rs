//! Power and logarithmic scale conversions: intensity, sqrt, log10, dB2amp,
//! dB2pow.

use crate::core::buffer::{DestinationBuffer, RasterSize, SourceBands};
use crate::core::function::{Category, FunctionMetadata, PixelFunction};
use crate::functions::kernel;
use crate::functions::registry::FunctionRegistry;

/// Register scale conversion functions.
pub fn register(registry: &mut FunctionRegistry) {
    registry.register(Intensity);
    registry.register(Sqrt);
    registry.register(Log10);
    registry.register(DbToAmplitude);
    registry.register(DbToPower);
}

/// Intensity `Re(x * conj(x))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Intensity;

impl PixelFunction for Intensity {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata::new("intensity", Category::Scale)
            .description("Intensity Re(x * conj(x)) of a real or complex band")
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        if sources.kind().is_complex() {
            kernel::map_real(size, dest, |ii| sources.complex(0, ii).norm_sqr());
        } else {
            kernel::map_real(size, dest, |ii| {
                let x = sources.real(0, ii);
                x * x
            });
        }
    }
}

/// Square root of a real band; negative input yields NaN.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sqrt;

impl PixelFunction for Sqrt {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata::new("sqrt", Category::Scale)
            .description("Square root of a real band")
            .real_only()
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        kernel::map_real(size, dest, |ii| sources.real(0, ii).sqrt());
    }
}

/// Base-10 logarithm of the magnitude.
///
/// Real input uses `log10(|x|)`. Complex input uses `log10(re² + im²)`, the
/// logarithm of the intensity rather than of the modulus.
#[derive(Debug, Clone, Copy, Default)]
pub struct Log10;

impl PixelFunction for Log10 {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata::new("log10", Category::Scale)
            .description("Base-10 logarithm of abs(x) (of the intensity for complex input)")
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        if sources.kind().is_complex() {
            kernel::map_real(size, dest, |ii| sources.complex(0, ii).norm_sqr().log10());
        } else {
            kernel::map_real(size, dest, |ii| sources.real(0, ii).abs().log10());
        }
    }
}

/// `base ^ (x / factor)` over one real band.
fn compute_power(
    sources: &SourceBands<'_>,
    dest: &mut DestinationBuffer<'_>,
    size: RasterSize,
    base: f64,
    factor: f64,
) {
    kernel::map_real(size, dest, |ii| base.powf(sources.real(0, ii) / factor));
}

/// Decibels to linear amplitude, `10 ^ (x / 20)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DbToAmplitude;

impl PixelFunction for DbToAmplitude {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata::new("dB2amp", Category::Scale)
            .description("Decibels to linear amplitude: 10 ^ (x / 20)")
            .real_only()
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        compute_power(sources, dest, size, 10.0, 20.0);
    }
}

/// Decibels to linear power, `10 ^ (x / 10)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DbToPower;

impl PixelFunction for DbToPower {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata::new("dB2pow", Category::Scale)
            .description("Decibels to linear power: 10 ^ (x / 10)")
            .real_only()
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        compute_power(sources, dest, size, 10.0, 10.0);
    }
}
