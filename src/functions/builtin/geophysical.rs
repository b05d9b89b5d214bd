//! Geophysical conversions over pairs of real bands.
//!
//! SAR calibration (incidence angle from beta0/sigma0, HH to VV polarisation
//! ratio) and wind vectors (speed and direction from u/v components). Angles
//! are in degrees on both input and output.

use crate::core::buffer::{DestinationBuffer, RasterSize, SourceBands};
use crate::core::function::{Arity, Category, FunctionMetadata, PixelFunction};
use crate::functions::kernel;
use crate::functions::registry::FunctionRegistry;

/// Register geophysical functions.
pub fn register(registry: &mut FunctionRegistry) {
    registry.register(BetaSigmaToIncidence);
    registry.register(UvToMagnitude);
    registry.register(UvToDirectionTo);
    registry.register(UvToDirectionFrom);
    registry.register(Sigma0HhToSigma0Vv);
}

fn pair(name: &'static str, description: &'static str) -> FunctionMetadata {
    FunctionMetadata::new(name, Category::Geophysical)
        .description(description)
        .arity(Arity::Exactly(2))
        .real_only()
}

/// Wind direction in `[0, 360)` from an `atan2` result in radians.
#[inline]
fn compass_degrees(radians: f64) -> f64 {
    let degrees = (radians.to_degrees() + 180.0).rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if degrees >= 360.0 {
        0.0
    } else {
        degrees
    }
}

/// Incidence angle `asin(sigma0 / beta0)` in degrees, from bands
/// `[beta0, sigma0]`. Pixels with `beta0 == 0` are 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct BetaSigmaToIncidence;

impl PixelFunction for BetaSigmaToIncidence {
    fn metadata(&self) -> FunctionMetadata {
        pair(
            "BetaSigmaToIncidence",
            "Incidence angle in degrees from beta0 and sigma0 bands",
        )
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        kernel::map_real(size, dest, |ii| {
            let beta0 = sources.real(0, ii);
            let sigma0 = sources.real(1, ii);
            if beta0 != 0.0 {
                (sigma0 / beta0).asin().to_degrees()
            } else {
                0.0
            }
        });
    }
}

/// Wind speed `sqrt(u² + v²)` from bands `[u, v]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct UvToMagnitude;

impl PixelFunction for UvToMagnitude {
    fn metadata(&self) -> FunctionMetadata {
        pair("UVToMagnitude", "Vector magnitude from u and v component bands")
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        kernel::map_real(size, dest, |ii| {
            let u = sources.real(0, ii);
            let v = sources.real(1, ii);
            (u * u + v * v).sqrt()
        });
    }
}

/// Direction the wind blows toward, `atan2(-u, -v)` in degrees plus 180.
#[derive(Debug, Clone, Copy, Default)]
pub struct UvToDirectionTo;

impl PixelFunction for UvToDirectionTo {
    fn metadata(&self) -> FunctionMetadata {
        pair(
            "UVToDirectionTo",
            "Direction (degrees, 0-360) the vector points to, from u and v bands",
        )
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        kernel::map_real(size, dest, |ii| {
            let u = sources.real(0, ii);
            let v = sources.real(1, ii);
            compass_degrees((-u).atan2(-v))
        });
    }
}

/// Direction the wind blows from, `atan2(u, v)` in degrees plus 180.
#[derive(Debug, Clone, Copy, Default)]
pub struct UvToDirectionFrom;

impl PixelFunction for UvToDirectionFrom {
    fn metadata(&self) -> FunctionMetadata {
        pair(
            "UVToDirectionFrom",
            "Direction (degrees, 0-360) the vector comes from, from u and v bands",
        )
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        kernel::map_real(size, dest, |ii| {
            let u = sources.real(0, ii);
            let v = sources.real(1, ii);
            compass_degrees(u.atan2(v))
        });
    }
}

/// VV backscatter from bands `[sigma0_hh, incidence_degrees]`.
///
/// Polarisation ratio of Thompson et al. with `alpha = 0.6`:
/// `sigma0_vv = sigma0_hh * ((1 + 2 tan²θ) / (1 + 0.6 tan²θ))²`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigma0HhToSigma0Vv;

impl PixelFunction for Sigma0HhToSigma0Vv {
    fn metadata(&self) -> FunctionMetadata {
        pair(
            "Sigma0HHIncidenceToSigma0VV",
            "VV backscatter from HH backscatter and incidence angle (degrees)",
        )
    }

    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
        kernel::map_real(size, dest, |ii| {
            let sigma0_hh = sources.real(0, ii);
            let tan2 = sources.real(1, ii).to_radians().tan().powi(2);
            let factor = ((1.0 + 2.0 * tan2) / (1.0 + 0.6 * tan2)).powi(2);
            sigma0_hh * factor
        });
    }
}
