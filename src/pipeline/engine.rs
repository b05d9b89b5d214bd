//! Pipeline engine implementation.
//!
//! The engine validates a whole definition up front, then evaluates derived
//! bands in order. Each band is computed into a fresh packed buffer,
//! optionally split into horizontal strips evaluated in parallel.

use crate::core::buffer::{DestinationBuffer, RasterSize, SourceBands};
use crate::core::error::{PipelineError, PipelineResult, PixelFunctionError};
use crate::core::kind::NumericKind;
use crate::functions::registry::{FunctionRegistry, SharedFunction};
use crate::pipeline::band::{Band, Raster};
use crate::pipeline::definition::{BandRef, DerivedBand, PipelineDefinition};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Metadata key recording which function produced a band.
pub const PIXEL_FUNCTION_KEY: &str = "pixelfunction";

/// Pipeline execution options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Whether to evaluate strips of each band in parallel.
    pub parallel: bool,
    /// Rows per strip when running in parallel (0 is treated as 1).
    pub rows_per_strip: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            rows_per_strip: 64,
        }
    }
}

impl PipelineOptions {
    /// Create default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable/disable parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set rows per strip.
    pub fn with_rows_per_strip(mut self, rows: usize) -> Self {
        self.rows_per_strip = rows;
        self
    }
}

/// Execution statistics.
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Total execution time.
    pub total_duration: Duration,
    /// Number of derived bands computed.
    pub bands_computed: usize,
    /// Number of function invocations (one per strip).
    pub strips_evaluated: usize,
}

/// Result of executing a pipeline.
#[derive(Debug)]
pub struct PipelineOutput {
    /// Derived bands by name, in definition order.
    pub bands: IndexMap<String, Band>,
    /// Execution statistics.
    pub stats: PipelineStats,
}

impl PipelineOutput {
    /// Look up a computed band.
    pub fn band(&self, name: &str) -> Option<&Band> {
        self.bands.get(name)
    }
}

/// A validated derived band, ready to evaluate.
struct BandPlan<'d> {
    band: &'d DerivedBand,
    function: SharedFunction,
    source_kind: NumericKind,
}

/// Evaluates derived-band pipelines against a registry.
pub struct PipelineEngine<'r> {
    registry: &'r FunctionRegistry,
    options: PipelineOptions,
}

impl<'r> PipelineEngine<'r> {
    /// Create an engine with default options.
    pub fn new(registry: &'r FunctionRegistry) -> Self {
        Self {
            registry,
            options: PipelineOptions::default(),
        }
    }

    /// Set options.
    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    /// Check a definition against a raster without computing anything.
    pub fn validate(&self, raster: &Raster, definition: &PipelineDefinition) -> PipelineResult<()> {
        self.plan(raster, definition).map(|_| ())
    }

    /// Validate, then evaluate every derived band in order.
    pub fn execute(&self, raster: &Raster, definition: &PipelineDefinition) -> PipelineResult<PipelineOutput> {
        let plans = self.plan(raster, definition)?;
        let start_time = Instant::now();
        let size = raster.size();

        let mut bands: IndexMap<String, Band> = IndexMap::with_capacity(plans.len());
        let mut stats = PipelineStats::default();

        for plan in &plans {
            let derived = plan.band;
            let (band, strips) = {
                let sources = derived
                    .sources
                    .iter()
                    .map(|reference| resolve(raster, &bands, derived, reference).map(Band::as_bytes))
                    .collect::<PipelineResult<Vec<&[u8]>>>()?;
                self.evaluate(plan, &sources, size)?
            };

            log::debug!(
                "computed '{}' = {}({}) in {} strip(s)",
                derived.name,
                derived.function,
                derived
                    .sources
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                strips
            );

            stats.bands_computed += 1;
            stats.strips_evaluated += strips;
            bands.insert(derived.name.clone(), band);
        }

        stats.total_duration = start_time.elapsed();
        log::info!(
            "evaluated {} derived band(s) over {}x{} in {:?}",
            stats.bands_computed,
            size.width,
            size.height,
            stats.total_duration
        );

        Ok(PipelineOutput { bands, stats })
    }

    /// Resolve functions, references and kinds for every band.
    fn plan<'d>(&self, raster: &Raster, definition: &'d PipelineDefinition) -> PipelineResult<Vec<BandPlan<'d>>> {
        if definition.version.split('.').next() != Some("1") {
            return Err(PipelineError::UnsupportedVersion(definition.version.clone()));
        }

        // output kind of every derived band seen so far
        let mut earlier: IndexMap<&str, NumericKind> = IndexMap::new();
        let mut plans = Vec::with_capacity(definition.bands.len());

        for band in &definition.bands {
            if earlier.contains_key(band.name.as_str()) {
                return Err(PipelineError::DuplicateBand(band.name.clone()));
            }

            let function = self.registry.get(&band.function).map_err(|error| PipelineError::Function {
                band: band.name.clone(),
                error,
            })?;

            let mut source_kind: Option<NumericKind> = None;
            for reference in &band.sources {
                let kind = match reference {
                    BandRef::Source(index) => match raster.band(*index) {
                        Some(source) => source.kind(),
                        None => {
                            return Err(PipelineError::SourceOutOfRange {
                                band: band.name.clone(),
                                index: *index,
                                available: raster.len(),
                            })
                        }
                    },
                    BandRef::Derived(name) => match earlier.get(name.as_str()) {
                        Some(kind) => *kind,
                        None => {
                            return Err(PipelineError::UnknownBand {
                                band: band.name.clone(),
                                reference: name.clone(),
                            })
                        }
                    },
                };

                match source_kind {
                    None => source_kind = Some(kind),
                    Some(first) if first != kind => {
                        return Err(PipelineError::MixedSourceKinds {
                            band: band.name.clone(),
                            first,
                            other: kind,
                        })
                    }
                    Some(_) => {}
                }
            }

            let source_kind = source_kind.unwrap_or(band.kind);
            function
                .validate(band.sources.len(), source_kind)
                .map_err(|error| PipelineError::Function {
                    band: band.name.clone(),
                    error,
                })?;

            earlier.insert(band.name.as_str(), band.kind);
            plans.push(BandPlan {
                band,
                function,
                source_kind,
            });
        }

        Ok(plans)
    }

    /// Compute one band, returning it and the number of strips used.
    fn evaluate(&self, plan: &BandPlan<'_>, sources: &[&[u8]], size: RasterSize) -> PipelineResult<(Band, usize)> {
        let derived = plan.band;
        let out_kind = derived.kind;
        let mut band = Band::zeroed(out_kind, size.pixel_count());
        for (key, value) in &derived.metadata {
            band.metadata.insert(key.clone(), value.clone());
        }
        band.metadata
            .insert(PIXEL_FUNCTION_KEY.to_string(), derived.function.clone());

        let wrap = |error: PixelFunctionError| PipelineError::Function {
            band: derived.name.clone(),
            error,
        };

        let rows_per_strip = self.options.rows_per_strip.max(1);
        if !self.options.parallel || size.is_empty() || size.height <= rows_per_strip {
            let bands = SourceBands::new(sources, plan.source_kind);
            let mut dest = DestinationBuffer::packed(band.as_bytes_mut(), out_kind, size.width);
            plan.function.apply(&bands, &mut dest, size).map_err(wrap)?;
            return Ok((band, 1));
        }

        let in_row = size.width * plan.source_kind.size();
        let out_row = size.width * out_kind.size();
        let strips = size.height.div_ceil(rows_per_strip);

        band.as_bytes_mut()
            .par_chunks_mut(rows_per_strip * out_row)
            .enumerate()
            .try_for_each(|(strip, chunk)| {
                let first_row = strip * rows_per_strip;
                let rows = chunk.len() / out_row;
                let window: Vec<&[u8]> = sources
                    .iter()
                    .map(|s| s.get(first_row * in_row..(first_row + rows) * in_row).unwrap_or(&[]))
                    .collect();

                let bands = SourceBands::new(&window, plan.source_kind);
                let mut dest = DestinationBuffer::packed(chunk, out_kind, size.width);
                plan.function.apply(&bands, &mut dest, RasterSize::new(size.width, rows))
            })
            .map_err(wrap)?;

        Ok((band, strips))
    }
}

/// Borrow the band a reference points at.
fn resolve<'a>(
    raster: &'a Raster,
    computed: &'a IndexMap<String, Band>,
    derived: &DerivedBand,
    reference: &BandRef,
) -> PipelineResult<&'a Band> {
    match reference {
        BandRef::Source(index) => raster.band(*index).ok_or_else(|| PipelineError::SourceOutOfRange {
            band: derived.name.clone(),
            index: *index,
            available: raster.len(),
        }),
        BandRef::Derived(name) => computed.get(name).ok_or_else(|| PipelineError::UnknownBand {
            band: derived.name.clone(),
            reference: name.clone(),
        }),
    }
}
