//! # Bandmath - Elementwise Raster Band Transforms
//!
//! Bandmath applies named pixel functions to raster bands of any numeric
//! kind. Every source pixel is read through one typed accessor, computed in
//! double precision, and written back into the destination's own kind with
//! the destination's own pixel and row strides.
//!
//! ## Features
//!
//! - **Type-generic**: signed and unsigned integers of every width, `f32` and
//!   `f64`, and complex variants of each, for both sources and destinations
//! - **Named functions**: a registry of built-ins (complex parts, arithmetic,
//!   dB scales, wind and SAR conversions), extensible through the
//!   [`PixelFunction`](core::function::PixelFunction) trait
//! - **Eager validation**: arity, source kind and buffer extents are checked
//!   before any destination byte is written
//! - **Derived-band pipelines**: JSON-serializable chains of functions,
//!   evaluated in horizontal strips with rayon
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bandmath::prelude::*;
//!
//! let registry = FunctionRegistry::with_builtins();
//!
//! let u = Band::from_values(NumericKind::FLOAT32, &[3.0, 0.0]);
//! let v = Band::from_values(NumericKind::FLOAT32, &[4.0, 2.0]);
//! let bands: [&[u8]; 2] = [u.as_bytes(), v.as_bytes()];
//!
//! let mut out = vec![0u8; 2 * NumericKind::FLOAT64.size()];
//! let mut dest = DestinationBuffer::packed(&mut out, NumericKind::FLOAT64, 2);
//! registry.apply(
//!     "UVToMagnitude",
//!     &SourceBands::new(&bands, NumericKind::FLOAT32),
//!     &mut dest,
//!     RasterSize::new(2, 1),
//! )?;
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: numeric kinds, the typed accessor, buffer views, the
//!   `PixelFunction` trait and error types
//! - [`functions`]: function registry and built-in pixel functions
//! - [`pipeline`]: derived-band definitions and the pipeline engine
//!
//! ## Creating Custom Functions
//!
//! ```rust,ignore
//! use bandmath::prelude::*;
//! use bandmath::functions::kernel;
//!
//! struct Halve;
//!
//! impl PixelFunction for Halve {
//!     fn metadata(&self) -> FunctionMetadata {
//!         FunctionMetadata::new("halve", Category::Custom)
//!             .description("x / 2")
//!             .real_only()
//!     }
//!
//!     fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
//!         kernel::map_real(size, dest, |ii| sources.real(0, ii) / 2.0);
//!     }
//! }
//!
//! let registry = RegistryBuilder::new().register(Halve).build();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod functions;
pub mod pipeline;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use bandmath::prelude::*;
/// ```
pub mod prelude {
    // Kinds and buffers
    pub use crate::core::buffer::{DestinationBuffer, RasterSize, SourceBands};
    pub use crate::core::kind::{ElementType, NumericKind};

    // Function trait and metadata
    pub use crate::core::function::{Arity, Category, FunctionMetadata, PixelFunction};

    // Errors
    pub use crate::core::error::{Error, PipelineError, PixelFunctionError};

    // Registry
    pub use crate::functions::registry::{FunctionRegistry, RegistryBuilder, RegistryEntry};

    // Pipeline
    pub use crate::pipeline::band::{Band, Raster};
    pub use crate::pipeline::definition::{BandRef, DerivedBand, PipelineDefinition};
    pub use crate::pipeline::engine::{PipelineEngine, PipelineOptions, PipelineOutput, PipelineStats};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
