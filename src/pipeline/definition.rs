//! Derived-band definitions and their JSON form.

use crate::core::error::{PipelineError, Result};
use crate::core::kind::NumericKind;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// Reference to a band a derived band reads from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandRef {
    /// Input band of the raster, by index.
    Source(usize),
    /// An earlier derived band, by name.
    Derived(String),
}

impl fmt::Display for BandRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandRef::Source(index) => write!(f, "#{}", index),
            BandRef::Derived(name) => f.write_str(name),
        }
    }
}

/// A band computed by applying a pixel function to other bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedBand {
    /// Unique name within the pipeline
    pub name: String,
    /// Registered pixel function name
    pub function: String,
    /// Bands passed to the function, in order
    pub sources: Vec<BandRef>,
    /// Output kind
    #[serde(default)]
    pub kind: NumericKind,
    /// Free-form metadata copied onto the output band
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub metadata: IndexMap<String, String>,
}

impl DerivedBand {
    /// Create a derived band with no sources yet.
    pub fn new(name: impl Into<String>, function: impl Into<String>, kind: NumericKind) -> Self {
        Self {
            name: name.into(),
            function: function.into(),
            sources: Vec::new(),
            kind,
            metadata: IndexMap::new(),
        }
    }

    /// Read from raster band `index`.
    pub fn source(mut self, index: usize) -> Self {
        self.sources.push(BandRef::Source(index));
        self
    }

    /// Read from an earlier derived band.
    pub fn derived(mut self, name: impl Into<String>) -> Self {
        self.sources.push(BandRef::Derived(name.into()));
        self
    }

    /// Add a metadata entry.
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Ordered list of derived bands, evaluated first to last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineDefinition {
    /// Format version
    pub version: String,
    /// Optional display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Derived bands
    pub bands: Vec<DerivedBand>,
}

impl PipelineDefinition {
    /// Current format version.
    pub const VERSION: &'static str = "1.0.0";

    /// Create an empty definition.
    pub fn new() -> Self {
        Self {
            version: Self::VERSION.to_string(),
            name: None,
            bands: Vec::new(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a derived band.
    pub fn with_band(mut self, band: DerivedBand) -> Self {
        self.bands.push(band);
        self
    }

    /// Look up a derived band by name.
    pub fn band(&self, name: &str) -> Option<&DerivedBand> {
        self.bands.iter().find(|b| b.name == name)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Serialize to compact JSON (no whitespace).
    pub fn to_json_compact(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string.
    ///
    /// Any `1.x` version is accepted.
    pub fn from_json(json: &str) -> Result<Self> {
        let definition: Self = serde_json::from_str(json)?;
        if definition.version.split('.').next() != Some("1") {
            return Err(PipelineError::UnsupportedVersion(definition.version).into());
        }
        Ok(definition)
    }

    /// Load from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Save as pretty JSON.
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path.as_ref(), self.to_json()?)?;
        Ok(())
    }
}

impl Default for PipelineDefinition {
    fn default() -> Self {
        Self::new()
    }
}
