//! Complex part extraction: real, imag, mod, phase, conj.
//!
//! Each accepts one band of any kind. Real input is treated as a complex
//! number with zero imaginary part.

use crate::core::buffer::{DestinationBuffer, RasterSize, SourceBands};
use crate::core::function::{Category, FunctionMetadata, PixelFunction};
use crate::functions::kernel;
use crate::functions::registry::FunctionRegistry;
use std::f64::consts::PI;

/// Register complex part functions.
pub fn register(registry: &mut FunctionRegistry) {
    registry.register(Real);
    registry.register(Imag);
    registry.register(Modulus);
    registry.register(Phase);
    registry.register(Conjugate);
}

/// Real part of a band; a plain copy for real input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Real;

impl PixelFunction for Real {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata::new("real", Category::Complex)
            .description("Extract the real part (copy for non-complex input)")
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        kernel::map_real(size, dest, |ii| sources.real(0, ii));
    }
}

/// Imaginary part of a band; zero for real input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Imag;

impl PixelFunction for Imag {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata::new("imag", Category::Complex)
            .description("Extract the imaginary part (0 for non-complex input)")
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        if sources.kind().is_complex() {
            kernel::map_real(size, dest, |ii| sources.imag(0, ii));
        } else {
            kernel::fill(size, dest, 0.0);
        }
    }
}

/// Modulus: `|x|` for real input, `sqrt(re² + im²)` for complex.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modulus;

impl PixelFunction for Modulus {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata::new("mod", Category::Complex)
            .description("Modulus of a real or complex band")
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        if sources.kind().is_complex() {
            kernel::map_real(size, dest, |ii| sources.complex(0, ii).norm_sqr().sqrt());
        } else {
            kernel::map_real(size, dest, |ii| sources.real(0, ii).abs());
        }
    }
}

/// Phase: `atan2(im, re)` for complex input; `0` or `π` for real input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Phase;

impl PixelFunction for Phase {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata::new("phase", Category::Complex)
            .description("Phase of a band (0 or pi for non-complex input)")
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        if sources.kind().is_complex() {
            kernel::map_real(size, dest, |ii| sources.imag(0, ii).atan2(sources.real(0, ii)));
        } else {
            // zero and NaN both map to 0
            kernel::map_real(size, dest, |ii| if sources.real(0, ii) < 0.0 { PI } else { 0.0 });
        }
    }
}

/// Complex conjugate.
///
/// Conjugates only when both source and destination are complex; otherwise
/// behaves exactly like [`Real`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Conjugate;

impl PixelFunction for Conjugate {
    fn metadata(&self) -> FunctionMetadata {
        FunctionMetadata::new("conj", Category::Complex)
            .description("Complex conjugate (copy for non-complex input)")
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        if sources.kind().is_complex() && dest.kind().is_complex() {
            kernel::map_complex(size, dest, |ii| sources.complex(0, ii).conj());
        } else {
            Real.compute(sources, dest, size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kind::NumericKind;
    use crate::functions::test_support::{complex_band, real_band, run, run_real};
    use approx::assert_relative_eq;
    use num_complex::Complex64;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_real_of_complex() {
        let band = complex_band(NumericKind::CINT16, &[(3.0, 4.0), (-1.0, 2.0)]);
        let out = run_real(&Real, NumericKind::CINT16, &[band]).unwrap();
        assert_eq!(out, vec![3.0, -1.0]);
    }

    #[test]
    fn test_real_into_complex_destination_has_zero_imag() {
        let band = complex_band(NumericKind::CFLOAT32, &[(3.0, 4.0)]);
        let out = run(&Real, NumericKind::CFLOAT32, &[band], NumericKind::CFLOAT64).unwrap();
        assert_eq!(out, vec![Complex64::new(3.0, 0.0)]);
    }

    #[test]
    fn test_imag() {
        let band = complex_band(NumericKind::CFLOAT64, &[(3.0, 4.0), (1.0, -2.5)]);
        assert_eq!(run_real(&Imag, NumericKind::CFLOAT64, &[band]).unwrap(), vec![4.0, -2.5]);

        let band = real_band(NumericKind::INT16, &[7.0, -7.0, 1.0]);
        assert_eq!(run_real(&Imag, NumericKind::INT16, &[band]).unwrap(), vec![0.0; 3]);
    }

    #[test]
    fn test_modulus() {
        let band = complex_band(NumericKind::CFLOAT32, &[(3.0, 4.0)]);
        assert_eq!(run_real(&Modulus, NumericKind::CFLOAT32, &[band]).unwrap(), vec![5.0]);

        let band = real_band(NumericKind::FLOAT64, &[-5.0, 2.5]);
        assert_eq!(run_real(&Modulus, NumericKind::FLOAT64, &[band]).unwrap(), vec![5.0, 2.5]);
    }

    #[test]
    fn test_phase_complex() {
        let band = complex_band(NumericKind::CFLOAT64, &[(1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)]);
        let out = run_real(&Phase, NumericKind::CFLOAT64, &[band]).unwrap();
        assert_eq!(out[0], 0.0);
        assert_relative_eq!(out[1], FRAC_PI_2);
        assert_relative_eq!(out[2], PI);
    }

    #[test]
    fn test_phase_real_ties_at_zero() {
        let band = real_band(NumericKind::FLOAT64, &[-2.0, 3.0, 0.0, -0.0]);
        let out = run_real(&Phase, NumericKind::FLOAT64, &[band]).unwrap();
        assert_eq!(out, vec![PI, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_conj_twice_is_identity() {
        let values = [(1.0, 2.0), (-3.0, -4.0), (0.0, 5.0)];
        let band = complex_band(NumericKind::CINT32, &values);

        let once = run(&Conjugate, NumericKind::CINT32, &[band.clone()], NumericKind::CINT32).unwrap();
        assert_eq!(once[1], Complex64::new(-3.0, 4.0));

        let pairs: Vec<(f64, f64)> = once.iter().map(|c| (c.re, c.im)).collect();
        let twice = run(
            &Conjugate,
            NumericKind::CINT32,
            &[complex_band(NumericKind::CINT32, &pairs)],
            NumericKind::CINT32,
        )
        .unwrap();

        let original: Vec<Complex64> = values.iter().map(|&(re, im)| Complex64::new(re, im)).collect();
        assert_eq!(twice, original);
    }

    #[test]
    fn test_conj_into_real_destination_copies_real_part() {
        let band = complex_band(NumericKind::CFLOAT32, &[(1.5, 2.0)]);
        assert_eq!(run_real(&Conjugate, NumericKind::CFLOAT32, &[band]).unwrap(), vec![1.5]);
    }

    #[test]
    fn test_wrong_arity() {
        let band = real_band(NumericKind::BYTE, &[1.0]);
        assert!(run_real(&Modulus, NumericKind::BYTE, &[band.clone(), band]).is_err());
    }
}
