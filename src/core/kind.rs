//! Numeric kinds of stored pixel values.
//!
//! A [`NumericKind`] tells the accessor layer how to interpret the bytes of a
//! band buffer: which primitive each component is stored as, and whether a
//! pixel is a single real component or an interleaved `(re, im)` pair.
//!
//! Kinds parse from and print as GDAL-style names (`Byte`, `Int16`, `CFloat32`),
//! which is also how they appear in serialized pipeline definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Storage format of a single component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    /// Signed 8-bit integer.
    Int8,
    /// Unsigned 8-bit integer.
    UInt8,
    /// Signed 16-bit integer.
    Int16,
    /// Unsigned 16-bit integer.
    UInt16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 32-bit integer.
    UInt32,
    /// Signed 64-bit integer.
    Int64,
    /// Unsigned 64-bit integer.
    UInt64,
    /// IEEE-754 single precision.
    Float32,
    /// IEEE-754 double precision.
    Float64,
}

impl ElementType {
    /// Size of one component in bytes.
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }

    /// GDAL-style name of the real kind built on this element.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int8 => "Int8",
            Self::UInt8 => "Byte",
            Self::Int16 => "Int16",
            Self::UInt16 => "UInt16",
            Self::Int32 => "Int32",
            Self::UInt32 => "UInt32",
            Self::Int64 => "Int64",
            Self::UInt64 => "UInt64",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
        }
    }

    /// All element types, narrowest first.
    pub fn all() -> &'static [ElementType] {
        &[
            ElementType::Int8,
            ElementType::UInt8,
            ElementType::Int16,
            ElementType::UInt16,
            ElementType::Int32,
            ElementType::UInt32,
            ElementType::Int64,
            ElementType::UInt64,
            ElementType::Float32,
            ElementType::Float64,
        ]
    }
}

/// Numeric kind of a band: a storage element, real or complex.
///
/// Complex pixels hold two components of the same element type, real part
/// first, so `size()` is twice the element size and the imaginary part starts
/// at byte offset `size() / 2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NumericKind {
    /// One component per pixel.
    Real(ElementType),
    /// Interleaved `(re, im)` pair per pixel.
    Complex(ElementType),
}

impl NumericKind {
    /// Unsigned 8-bit.
    pub const BYTE: NumericKind = NumericKind::Real(ElementType::UInt8);
    /// Signed 16-bit.
    pub const INT16: NumericKind = NumericKind::Real(ElementType::Int16);
    /// Unsigned 16-bit.
    pub const UINT16: NumericKind = NumericKind::Real(ElementType::UInt16);
    /// Signed 32-bit.
    pub const INT32: NumericKind = NumericKind::Real(ElementType::Int32);
    /// Single precision float.
    pub const FLOAT32: NumericKind = NumericKind::Real(ElementType::Float32);
    /// Double precision float.
    pub const FLOAT64: NumericKind = NumericKind::Real(ElementType::Float64);
    /// Complex pair of signed 16-bit integers.
    pub const CINT16: NumericKind = NumericKind::Complex(ElementType::Int16);
    /// Complex pair of signed 32-bit integers.
    pub const CINT32: NumericKind = NumericKind::Complex(ElementType::Int32);
    /// Complex pair of single precision floats.
    pub const CFLOAT32: NumericKind = NumericKind::Complex(ElementType::Float32);
    /// Complex pair of double precision floats.
    pub const CFLOAT64: NumericKind = NumericKind::Complex(ElementType::Float64);

    /// Storage type of each component.
    #[inline]
    pub const fn element(self) -> ElementType {
        match self {
            Self::Real(e) | Self::Complex(e) => e,
        }
    }

    /// Whether pixels carry an imaginary component.
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex(_))
    }

    /// Bytes per pixel.
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            Self::Real(e) => e.size(),
            Self::Complex(e) => 2 * e.size(),
        }
    }

    /// Byte offset of the imaginary component inside a pixel.
    ///
    /// Only meaningful for complex kinds; equals `size() / 2`.
    #[inline]
    pub const fn imag_offset(self) -> usize {
        self.element().size()
    }

    /// The real kind sharing this kind's element type.
    #[inline]
    pub const fn to_real(self) -> NumericKind {
        NumericKind::Real(self.element())
    }

    /// The complex kind sharing this kind's element type.
    #[inline]
    pub const fn to_complex(self) -> NumericKind {
        NumericKind::Complex(self.element())
    }

    /// Every real and complex kind.
    pub fn all() -> impl Iterator<Item = NumericKind> {
        ElementType::all()
            .iter()
            .flat_map(|&e| [NumericKind::Real(e), NumericKind::Complex(e)])
    }
}

impl Default for NumericKind {
    fn default() -> Self {
        NumericKind::FLOAT64
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericKind::Real(e) => f.write_str(e.name()),
            NumericKind::Complex(ElementType::UInt8) => f.write_str("CByte"),
            NumericKind::Complex(e) => write!(f, "C{}", e.name()),
        }
    }
}

/// Error returned when a kind name is not recognised.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown numeric kind '{0}'")]
pub struct ParseKindError(pub String);

impl FromStr for NumericKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let (complex, base) = match lower.strip_prefix('c') {
            Some(rest) => (true, rest),
            None => (false, lower.as_str()),
        };

        let element = match base {
            "int8" => ElementType::Int8,
            "byte" | "uint8" => ElementType::UInt8,
            "int16" => ElementType::Int16,
            "uint16" => ElementType::UInt16,
            "int32" => ElementType::Int32,
            "uint32" => ElementType::UInt32,
            "int64" => ElementType::Int64,
            "uint64" => ElementType::UInt64,
            "float32" => ElementType::Float32,
            "float64" => ElementType::Float64,
            _ => return Err(ParseKindError(s.to_string())),
        };

        Ok(if complex {
            NumericKind::Complex(element)
        } else {
            NumericKind::Real(element)
        })
    }
}

impl TryFrom<String> for NumericKind {
    type Error = ParseKindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NumericKind> for String {
    fn from(kind: NumericKind) -> Self {
        kind.to_string()
    }
}
