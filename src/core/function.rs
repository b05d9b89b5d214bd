//! PixelFunction trait and function metadata.
//!
//! The PixelFunction trait is the core abstraction for every band transform.
//! It uses a two-phase design: validation (source count and kind, buffer
//! extents) and computation (the per-pixel loop). Only `compute` touches the
//! destination, and it runs only once validation has passed.

use crate::core::buffer::{DestinationBuffer, RasterSize, SourceBands};
use crate::core::error::{FunctionResult, PixelFunctionError};
use crate::core::kind::NumericKind;
use serde::Serialize;
use std::fmt;

/// Category for organizing pixel functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Complex part extraction (real, imaginary, modulus, phase, conjugate)
    Complex,
    /// Arithmetic across bands
    Arithmetic,
    /// Power and logarithmic scale conversions
    Scale,
    /// Geophysical conversions (incidence angle, wind, polarisation)
    Geophysical,
    /// Custom/user-defined
    #[default]
    Custom,
}

impl Category {
    /// Get the display name for this category.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Complex => "Complex",
            Category::Arithmetic => "Arithmetic",
            Category::Scale => "Scale",
            Category::Geophysical => "Geophysical",
            Category::Custom => "Custom",
        }
    }

    /// Get all categories in display order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Complex,
            Category::Arithmetic,
            Category::Scale,
            Category::Geophysical,
            Category::Custom,
        ]
    }
}

/// Number of source bands a function accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Arity {
    /// Exactly this many bands.
    Exactly(usize),
    /// This many bands or more.
    AtLeast(usize),
}

impl Arity {
    /// Whether `count` source bands satisfy this arity.
    #[inline]
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "{}", n),
            Arity::AtLeast(n) => write!(f, "{} or more", n),
        }
    }
}

/// Metadata describing a pixel function.
///
/// Built from static strings so that validation can consult it on every
/// call without allocating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FunctionMetadata {
    /// Registered name (e.g., "mod", "UVToMagnitude")
    pub name: &'static str,
    /// Category for grouping
    pub category: Category,
    /// One-line description
    pub description: &'static str,
    /// Accepted number of source bands
    pub arity: Arity,
    /// Whether complex source kinds are accepted
    pub accepts_complex: bool,
}

impl FunctionMetadata {
    /// Start describing a single-source function that accepts any kind.
    pub fn new(name: &'static str, category: Category) -> Self {
        Self {
            name,
            category,
            description: "",
            arity: Arity::Exactly(1),
            accepts_complex: true,
        }
    }

    /// Set the description.
    pub fn description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    /// Set the accepted number of sources.
    pub fn arity(mut self, arity: Arity) -> Self {
        self.arity = arity;
        self
    }

    /// Reject complex source kinds.
    pub fn real_only(mut self) -> Self {
        self.accepts_complex = false;
        self
    }
}

/// The core trait for pixel functions.
///
/// # Design
///
/// 1. **Validation** (`validate`): arity first, then source kind. Checked
///    eagerly so a failing call writes nothing.
///
/// 2. **Computation** (`compute`): reads every pixel of the window through
///    the accessor layer and writes one value per destination pixel.
///
/// [`apply`](PixelFunction::apply) runs both, plus buffer extent checks.
///
/// # Thread Safety
///
/// Implementations are stateless; `Send + Sync` lets one instance serve
/// concurrent calls on disjoint destinations.
///
/// # Example Implementation
///
/// ```ignore
/// struct Halve;
///
/// impl PixelFunction for Halve {
///     fn metadata(&self) -> FunctionMetadata {
///         FunctionMetadata::new("halve", Category::Custom)
///             .description("x / 2")
///             .real_only()
///     }
///
///     fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
///         kernel::map_real(size, dest, |ii| sources.real(0, ii) / 2.0);
///     }
/// }
/// ```
pub trait PixelFunction: Send + Sync {
    /// Get the metadata for this function.
    fn metadata(&self) -> FunctionMetadata;

    /// Check the source count and kind.
    fn validate(&self, source_count: usize, source_kind: NumericKind) -> FunctionResult<()> {
        let metadata = self.metadata();
        if !metadata.arity.accepts(source_count) {
            return Err(PixelFunctionError::WrongArity {
                function: metadata.name,
                expected: metadata.arity,
                got: source_count,
            });
        }
        if source_kind.is_complex() && !metadata.accepts_complex {
            return Err(PixelFunctionError::UnsupportedKind {
                function: metadata.name,
                kind: source_kind,
            });
        }
        Ok(())
    }

    /// Compute every pixel of `size` into `dest`.
    ///
    /// Assumes [`validate`](PixelFunction::validate) and the extent checks
    /// have passed.
    fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize);

    /// Validate, then compute.
    fn apply(
        &self,
        sources: &SourceBands<'_>,
        dest: &mut DestinationBuffer<'_>,
        size: RasterSize,
    ) -> FunctionResult<()> {
        self.validate(sources.len(), sources.kind())?;
        sources.check_extent(size)?;
        dest.check_extent(size)?;
        self.compute(sources, dest, size);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::accessor;

    struct Negate;

    impl PixelFunction for Negate {
        fn metadata(&self) -> FunctionMetadata {
            FunctionMetadata::new("negate", Category::Custom)
                .description("-x")
                .real_only()
        }

        fn compute(&self, sources: &SourceBands<'_>, dest: &mut DestinationBuffer<'_>, size: RasterSize) {
            for row in 0..size.height {
                for col in 0..size.width {
                    let ii = row * size.width + col;
                    dest.put_real(row, col, -sources.real(0, ii));
                }
            }
        }
    }

    #[test]
    fn test_arity() {
        assert!(Arity::Exactly(2).accepts(2));
        assert!(!Arity::Exactly(2).accepts(3));
        assert!(Arity::AtLeast(2).accepts(5));
        assert!(!Arity::AtLeast(2).accepts(1));
        assert_eq!(Arity::AtLeast(2).to_string(), "2 or more");
    }

    #[test]
    fn test_metadata_builder() {
        let metadata = FunctionMetadata::new("test", Category::Arithmetic)
            .description("A test function")
            .arity(Arity::AtLeast(2))
            .real_only();

        assert_eq!(metadata.name, "test");
        assert_eq!(metadata.category, Category::Arithmetic);
        assert_eq!(metadata.arity, Arity::AtLeast(2));
        assert!(!metadata.accepts_complex);
    }

    #[test]
    fn test_apply_validates_before_writing() {
        let src = [1u8, 2];
        let bands: [&[u8]; 2] = [&src, &src];
        let mut out = [0xEEu8; 2];

        let sources = SourceBands::new(&bands, NumericKind::BYTE);
        let mut dest = DestinationBuffer::packed(&mut out, NumericKind::BYTE, 2);
        let error = Negate.apply(&sources, &mut dest, RasterSize::new(2, 1)).unwrap_err();
        assert!(matches!(error, PixelFunctionError::WrongArity { got: 2, .. }));
        assert_eq!(out, [0xEE, 0xEE]);
    }

    #[test]
    fn test_apply_rejects_complex() {
        let src = [0u8; 8];
        let bands: [&[u8]; 1] = [&src];
        let mut out = [0u8; 8];

        let sources = SourceBands::new(&bands, NumericKind::CFLOAT32);
        let mut dest = DestinationBuffer::packed(&mut out, NumericKind::FLOAT64, 1);
        let error = Negate.apply(&sources, &mut dest, RasterSize::new(1, 1)).unwrap_err();
        assert_eq!(
            error,
            PixelFunctionError::UnsupportedKind {
                function: "negate",
                kind: NumericKind::CFLOAT32
            }
        );
    }

    #[test]
    fn test_apply_reports_overflowing_extents() {
        let src = [0u8; 24];
        let bands: [&[u8]; 1] = [&src];
        let sources = SourceBands::new(&bands, NumericKind::FLOAT64);

        let mut out = [0u8; 64];
        let mut dest = DestinationBuffer::new(&mut out, NumericKind::FLOAT64, 8, usize::MAX / 2);
        let error = Negate.apply(&sources, &mut dest, RasterSize::new(1, 3)).unwrap_err();
        assert!(matches!(error, PixelFunctionError::DestinationTooSmall { required: usize::MAX, .. }));

        let mut dest = DestinationBuffer::packed(&mut out, NumericKind::FLOAT64, 1);
        let error = Negate
            .apply(&sources, &mut dest, RasterSize::new(1, usize::MAX / 4))
            .unwrap_err();
        assert!(matches!(error, PixelFunctionError::SourceTooSmall { required: usize::MAX, .. }));
        assert_eq!(out, [0u8; 64]);
    }

    #[test]
    fn test_apply_writes() {
        let src: Vec<u8> = [1.5f32, -2.0].iter().flat_map(|v| v.to_ne_bytes()).collect();
        let bands: [&[u8]; 1] = [&src];
        let mut out = [0u8; 16];

        let sources = SourceBands::new(&bands, NumericKind::FLOAT32);
        let mut dest = DestinationBuffer::packed(&mut out, NumericKind::FLOAT64, 2);
        Negate.apply(&sources, &mut dest, RasterSize::new(2, 1)).unwrap();

        assert_eq!(accessor::read_real(&out, NumericKind::FLOAT64, 0), -1.5);
        assert_eq!(accessor::read_real(&out, NumericKind::FLOAT64, 1), 2.0);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Geophysical.display_name(), "Geophysical");
        assert_eq!(Category::all().len(), 5);
    }
}
