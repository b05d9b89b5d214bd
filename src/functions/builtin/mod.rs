//! Built-in pixel functions.
//!
//! The standard set of band transforms, registered in a fixed order so that
//! listings are stable.

mod complex;
mod arithmetic;
mod scale;
mod geophysical;

use crate::functions::registry::FunctionRegistry;

/// Register all built-in pixel functions.
pub fn register_all(registry: &mut FunctionRegistry) {
    complex::register(registry);
    arithmetic::register(registry);
    scale::register(registry);
    geophysical::register(registry);
}

// Re-export for direct access
pub use complex::{Conjugate, Imag, Modulus, Phase, Real};
pub use arithmetic::{CMul, Diff, Inv, Mul, Sum};
pub use scale::{DbToAmplitude, DbToPower, Intensity, Log10, Sqrt};
pub use geophysical::{
    BetaSigmaToIncidence, Sigma0HhToSigma0Vv, UvToDirectionFrom, UvToDirectionTo, UvToMagnitude,
};
