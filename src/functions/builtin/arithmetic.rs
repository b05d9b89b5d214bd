//! Arithmetic across bands: sum, diff, mul, cmul, inv.

use crate::core::buffer::{DestinationBuffer, RasterSize, SourceBands};
use crate::core::function::{Arity, Category, FunctionMetadata, PixelFunction};
use crate::functions::kernel;
use crate::functions::registry::FunctionRegistry;
use num_complex::Complex64;

/// Register arithmetic functions.
pub fn register(registry: &mut FunctionRegistry) {
    registry.register(Sum);
    registry.register(Diff);
    registry.register(Mul);
    registry.register(CMul);
    registry.register(Inv);
}

/// Sum of two or more bands.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sum;

impl PixelFunction for Sum {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata::new("sum", Category::Arithmetic)
            .description("Sum 2 or more bands")
            .arity(Arity::AtLeast(2))
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        if sources.kind().is_complex() {
            kernel::map_complex(size, dest, |ii| {
                (0..sources.len()).fold(Complex64::new(0.0, 0.0), |acc, band| acc + sources.complex(band, ii))
            });
        } else {
            kernel::map_real(size, dest, |ii| {
                (0..sources.len()).fold(0.0, |acc, band| acc + sources.real(band, ii))
            });
        }
    }
}

/// Difference of two bands (`b0 - b1`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Diff;

impl PixelFunction for Diff {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata::new("diff", Category::Arithmetic)
            .description("Difference between 2 bands (b1 - b2)")
            .arity(Arity::Exactly(2))
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        if sources.kind().is_complex() {
            kernel::map_complex(size, dest, |ii| sources.complex(0, ii) - sources.complex(1, ii));
        } else {
            kernel::map_real(size, dest, |ii| sources.real(0, ii) - sources.real(1, ii));
        }
    }
}

/// Product of two or more bands, folded left to right from `1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mul;

impl PixelFunction for Mul {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata::new("mul", Category::Arithmetic)
            .description("Multiply 2 or more bands")
            .arity(Arity::AtLeast(2))
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        if sources.kind().is_complex() {
            kernel::map_complex(size, dest, |ii| {
                (0..sources.len()).fold(Complex64::new(1.0, 0.0), |acc, band| acc * sources.complex(band, ii))
            });
        } else {
            kernel::map_real(size, dest, |ii| {
                (0..sources.len()).fold(1.0, |acc, band| acc * sources.real(band, ii))
            });
        }
    }
}

/// First band times the conjugate of the second.
#[derive(Debug, Clone, Copy, Default)]
pub struct CMul;

impl PixelFunction for CMul {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata::new("cmul", Category::Arithmetic)
            .description("Multiply the first band by the complex conjugate of the second")
            .arity(Arity::Exactly(2))
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        if sources.kind().is_complex() {
            kernel::map_complex(size, dest, |ii| sources.complex(0, ii) * sources.complex(1, ii).conj());
        } else {
            kernel::map_real(size, dest, |ii| sources.real(0, ii) * sources.real(1, ii));
        }
    }
}

/// Inverse `1 / x`, with no guard against zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inv;

impl PixelFunction for Inv {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata::new("inv", Category::Arithmetic)
            .description("Inverse (1 / x); zero yields infinity")
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        if sources.kind().is_complex() {
            kernel::map_complex(size, dest, |ii| {
                let x = sources.complex(0, ii);
                let norm = x.norm_sqr();
                Complex64::new(x.re / norm, -x.im / norm)
            });
        } else {
            kernel::map_real(size, dest, |ii| 1.0 / sources.real(0, ii));
        }
    }
}
