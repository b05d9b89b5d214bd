//! Owned bands and the raster that groups them.
//!
//! Band data is packed row-major in native byte order, `pixel_count *
//! kind.size()` bytes long. Raw band files use the same layout with no header.

use crate::core::accessor;
use crate::core::buffer::RasterSize;
use crate::core::error::{PipelineError, PipelineResult, Result};
use crate::core::kind::NumericKind;
use indexmap::IndexMap;
use num_complex::Complex64;
use std::fs;
use std::path::Path;

/// A single owned band of pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    kind: NumericKind,
    data: Vec<u8>,
    /// Free-form key/value metadata.
    pub metadata: IndexMap<String, String>,
}

impl Band {
    /// A band of `pixels` zero-valued pixels.
    pub fn zeroed(kind: NumericKind, pixels: usize) -> Self {
        Self {
            kind,
            data: vec![0u8; pixels * kind.size()],
            metadata: IndexMap::new(),
        }
    }

    /// Encode real values, converting each to `kind`.
    pub fn from_values(kind: NumericKind, values: &[f64]) -> Self {
        let mut band = Self::zeroed(kind, values.len());
        let size = kind.size();
        for (i, &value) in values.iter().enumerate() {
            accessor::write_real(value, &mut band.data, kind, i * size, size, 1);
        }
        band
    }

    /// Encode complex values, converting each to `kind`.
    ///
    /// Real kinds keep only the real part.
    pub fn from_complex_values(kind: NumericKind, values: &[Complex64]) -> Self {
        let mut band = Self::zeroed(kind, values.len());
        let size = kind.size();
        for (i, value) in values.iter().enumerate() {
            accessor::write_complex(value.re, value.im, &mut band.data, kind, i * size, size, 1);
        }
        band
    }

    /// Adopt packed bytes. The length must be a whole number of pixels.
    pub fn from_bytes(kind: NumericKind, data: Vec<u8>) -> PipelineResult<Self> {
        if data.len() % kind.size() != 0 {
            let expected = (data.len() / kind.size() + 1) * kind.size();
            return Err(PipelineError::BandLength {
                kind,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            kind,
            data,
            metadata: IndexMap::new(),
        })
    }

    /// Read a headerless raw band file.
    pub fn from_file(path: impl AsRef<Path>, kind: NumericKind) -> Result<Self> {
        let data = fs::read(path.as_ref())?;
        Ok(Self::from_bytes(kind, data)?)
    }

    /// Write the packed bytes to `path`.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), &self.data)?;
        Ok(())
    }

    /// Numeric kind of every pixel.
    pub fn kind(&self) -> NumericKind {
        self.kind
    }

    /// Number of pixels.
    pub fn len(&self) -> usize {
        self.data.len() / self.kind.size()
    }

    /// Whether the band has no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Packed bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable packed bytes.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Pixel `index` as a complex value.
    pub fn value(&self, index: usize) -> Complex64 {
        accessor::read_complex(&self.data, self.kind, index)
    }

    /// Real part of every pixel.
    pub fn real_values(&self) -> Vec<f64> {
        (0..self.len())
            .map(|i| accessor::read_real(&self.data, self.kind, i))
            .collect()
    }
}

/// Input bands sharing one raster size.
///
/// Bands may have different kinds; a derived band only requires its own
/// sources to agree.
#[derive(Debug, Clone, Default)]
pub struct Raster {
    size: RasterSize,
    bands: Vec<Band>,
}

impl Raster {
    /// Create an empty raster.
    pub fn new(size: RasterSize) -> Self {
        Self {
            size,
            bands: Vec::new(),
        }
    }

    /// Append a band and return its index.
    pub fn add_band(&mut self, band: Band) -> PipelineResult<usize> {
        let expected = self.size.pixel_count().saturating_mul(band.kind().size());
        if band.as_bytes().len() != expected {
            return Err(PipelineError::BandLength {
                kind: band.kind(),
                expected,
                actual: band.as_bytes().len(),
            });
        }
        self.bands.push(band);
        Ok(self.bands.len() - 1)
    }

    /// Append a band, builder style.
    pub fn with_band(mut self, band: Band) -> PipelineResult<Self> {
        self.add_band(band)?;
        Ok(self)
    }

    /// Raster size.
    pub fn size(&self) -> RasterSize {
        self.size
    }

    /// Band at `index`.
    pub fn band(&self, index: usize) -> Option<&Band> {
        self.bands.get(index)
    }

    /// All bands in insertion order.
    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    /// Number of bands.
    pub fn len(&self) -> usize {
        self.bands.len()
    }

    /// Whether the raster has no bands.
    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }
}
