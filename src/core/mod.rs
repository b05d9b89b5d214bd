//! Core types and traits for bandmath.
//!
//! This module contains the foundational layer every pixel function is
//! built on:
//! - Numeric kinds and their byte layout
//! - The typed pixel accessor
//! - Source and destination buffer views
//! - The PixelFunction trait and metadata
//! - Error types

pub mod kind;
pub mod sample;
pub mod accessor;
pub mod buffer;
pub mod error;
pub mod function;

// Re-export commonly used types
pub use kind::{ElementType, NumericKind, ParseKindError};
pub use buffer::{DestinationBuffer, RasterSize, SourceBands};
pub use error::{Error, PipelineError, PixelFunctionError};
pub use function::{Arity, Category, FunctionMetadata, PixelFunction};
