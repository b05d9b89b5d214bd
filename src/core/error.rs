//! Error types for bandmath.
//!
//! Uses thiserror for structured errors. Errors are designed to:
//! - Be detected before any destination byte is written
//! - Name the pixel function or derived band at fault
//! - Convert into the top-level [`Error`] with `?`
//!
//! Numerically degenerate input (zero division, logarithm of zero, `asin`
//! outside `[-1, 1]`) is never an error: it shows up as NaN or infinity in
//! the destination buffer.

use crate::core::function::Arity;
use crate::core::kind::{NumericKind, ParseKindError};
use thiserror::Error;

/// Top-level error type for bandmath.
///
/// This enum encompasses all error categories and enables automatic
/// conversion between specific error types.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Pixel function error: {0}")]
    Function(#[from] PixelFunctionError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] PipelineError),

    #[error("Invalid numeric kind: {0}")]
    Kind(#[from] ParseKindError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while invoking a single pixel function.
///
/// All variants are detected before the first pixel is processed, so a
/// failed call leaves the destination untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PixelFunctionError {
    #[error("'{function}' expects {expected} source band(s), got {got}")]
    WrongArity {
        function: &'static str,
        expected: Arity,
        got: usize,
    },

    #[error("'{function}' does not accept {kind} sources")]
    UnsupportedKind {
        function: &'static str,
        kind: NumericKind,
    },

    #[error("Pixel function '{0}' not found")]
    NotFound(String),

    #[error("Source band {band} holds {actual} bytes, {required} required")]
    SourceTooSmall {
        band: usize,
        required: usize,
        actual: usize,
    },

    #[error("Destination holds {actual} bytes, {required} required")]
    DestinationTooSmall { required: usize, actual: usize },
}

/// Errors from validating or evaluating a derived-band pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Derived band '{band}': {error}")]
    Function {
        band: String,
        error: PixelFunctionError,
    },

    #[error("Derived band '{0}' is defined more than once")]
    DuplicateBand(String),

    #[error("Derived band '{band}' references unknown band '{reference}'")]
    UnknownBand { band: String, reference: String },

    #[error("Derived band '{band}' references source band {index}, raster has {available}")]
    SourceOutOfRange {
        band: String,
        index: usize,
        available: usize,
    },

    #[error("Derived band '{band}' mixes source kinds {first} and {other}")]
    MixedSourceKinds {
        band: String,
        first: NumericKind,
        other: NumericKind,
    },

    #[error("Band data holds {actual} bytes, {expected} expected for {kind}")]
    BandLength {
        kind: NumericKind,
        expected: usize,
        actual: usize,
    },

    #[error("Unsupported pipeline version '{0}'")]
    UnsupportedVersion(String),
}

impl PixelFunctionError {
    /// Whether the failure comes from the call's shape (arity or kind) rather
    /// than from buffer sizes or lookup.
    pub fn is_signature_mismatch(&self) -> bool {
        matches!(
            self,
            PixelFunctionError::WrongArity { .. } | PixelFunctionError::UnsupportedKind { .. }
        )
    }
}

impl PipelineError {
    /// Name of the derived band at fault, if any.
    pub fn band(&self) -> Option<&str> {
        match self {
            PipelineError::Function { band, .. }
            | PipelineError::UnknownBand { band, .. }
            | PipelineError::SourceOutOfRange { band, .. }
            | PipelineError::MixedSourceKinds { band, .. } => Some(band),
            PipelineError::DuplicateBand(band) => Some(band),
            _ => None,
        }
    }
}

/// Result type alias for bandmath operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for pixel function invocations.
pub type FunctionResult<T> = std::result::Result<T, PixelFunctionError>;

/// Result type alias for pipeline operations.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
