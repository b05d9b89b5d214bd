//! Derived-band pipelines.
//!
//! A pipeline is an ordered list of derived bands, each naming a pixel
//! function and the bands it reads. Derived bands can read raster inputs or
//! any band defined before them.

pub mod band;
pub mod definition;
pub mod engine;

pub use band::{Band, Raster};
pub use definition::{BandRef, DerivedBand, PipelineDefinition};
pub use engine::{PipelineEngine, PipelineOptions, PipelineOutput, PipelineStats, PIXEL_FUNCTION_KEY};
