//! Bandmath CLI - apply pixel functions to raw raster bands.
//!
//! Bands are headerless files of packed native-endian pixels.

use anyhow::{anyhow, bail, Context};
use bandmath::prelude::*;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("bandmath");

    if args.len() < 2 {
        print_usage(program);
        return Ok(());
    }

    match args[1].as_str() {
        "list" => list_functions(),
        "info" => {
            let name = args.get(2).ok_or_else(|| anyhow!("please specify a function name"))?;
            function_info(name)
        }
        "apply" => apply_function(&args[2..]),
        "run" => run_pipeline(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage(program);
            Ok(())
        }
        other => {
            print_usage(program);
            bail!("unknown command: {}", other)
        }
    }
}

fn print_usage(program: &str) {
    println!("Bandmath v{}", bandmath::VERSION);
    println!();
    println!("Usage: {} <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  list                 List all pixel functions");
    println!("  info <function>      Show details about a function");
    println!("  apply <function> --type <kind> --size <W>x<H> [--out-type <kind>] -o <out> <inputs...>");
    println!("                       Apply one function to raw band files");
    println!("  run <pipeline.json> --type <kind> --size <W>x<H> --out-dir <dir> [--sequential] <inputs...>");
    println!("                       Evaluate every derived band of a pipeline");
    println!("  help                 Show this help message");
    println!();
    println!("Kinds: Byte, Int8, UInt16, Int16, UInt32, Int32, UInt64, Int64, Float32, Float64");
    println!("       and complex variants CInt16, CFloat32, ... (case-insensitive)");
    println!();
    println!("Set RUST_LOG=info (or debug, trace) for progress output.");
}

fn list_functions() -> anyhow::Result<()> {
    let registry = FunctionRegistry::with_builtins();

    println!("Available pixel functions ({} total):", registry.len());
    println!();

    for (category, functions) in registry.grouped_by_category() {
        println!("  {}", category.display_name());
        for metadata in functions {
            println!("      {:<28} {}", metadata.name, metadata.description);
        }
        println!();
    }
    Ok(())
}

fn function_info(name: &str) -> anyhow::Result<()> {
    let registry = FunctionRegistry::with_builtins();
    let metadata = registry
        .get_metadata(name)
        .ok_or_else(|| anyhow!("pixel function not found: {} (use 'list' to see available functions)", name))?;

    println!("Function: {}", metadata.name);
    println!("Category: {}", metadata.category.display_name());
    println!("Sources:  {}", metadata.arity);
    println!(
        "Input:    {}",
        if metadata.accepts_complex { "real or complex" } else { "real only" }
    );
    println!();
    println!("Description:");
    println!("  {}", metadata.description);
    Ok(())
}

/// Options shared by `apply` and `run`.
#[derive(Debug, Default)]
struct BandArgs {
    kind: Option<NumericKind>,
    out_kind: Option<NumericKind>,
    size: Option<RasterSize>,
    output: Option<PathBuf>,
    out_dir: Option<PathBuf>,
    sequential: bool,
    inputs: Vec<PathBuf>,
}

impl BandArgs {
    fn parse(args: &[String]) -> anyhow::Result<Self> {
        let mut parsed = Self::default();
        let mut i = 0;
        while i < args.len() {
            let value = || {
                args.get(i + 1)
                    .ok_or_else(|| anyhow!("missing value for {}", args[i]))
            };
            match args[i].as_str() {
                "--type" => {
                    parsed.kind = Some(value()?.parse()?);
                    i += 2;
                }
                "--out-type" => {
                    parsed.out_kind = Some(value()?.parse()?);
                    i += 2;
                }
                "--size" => {
                    let text = value()?;
                    parsed.size =
                        Some(parse_dimensions(text).ok_or_else(|| anyhow!("invalid size '{}', expected WxH", text))?);
                    i += 2;
                }
                "-o" | "--output" => {
                    parsed.output = Some(PathBuf::from(value()?));
                    i += 2;
                }
                "--out-dir" => {
                    parsed.out_dir = Some(PathBuf::from(value()?));
                    i += 2;
                }
                "--sequential" => {
                    parsed.sequential = true;
                    i += 1;
                }
                flag if flag.starts_with("--") => bail!("unknown option: {}", flag),
                path => {
                    parsed.inputs.push(PathBuf::from(path));
                    i += 1;
                }
            }
        }
        Ok(parsed)
    }

    fn kind(&self) -> anyhow::Result<NumericKind> {
        self.kind.ok_or_else(|| anyhow!("--type is required"))
    }

    fn size(&self) -> anyhow::Result<RasterSize> {
        self.size.ok_or_else(|| anyhow!("--size is required"))
    }

    fn load_raster(&self) -> anyhow::Result<Raster> {
        let kind = self.kind()?;
        let mut raster = Raster::new(self.size()?);
        for path in &self.inputs {
            let band = Band::from_file(path, kind).with_context(|| format!("failed to read {}", path.display()))?;
            raster
                .add_band(band)
                .with_context(|| format!("{} does not match the raster size", path.display()))?;
        }
        Ok(raster)
    }
}

fn apply_function(args: &[String]) -> anyhow::Result<()> {
    let (name, rest) = args
        .split_first()
        .ok_or_else(|| anyhow!("please specify a function name"))?;
    let options = BandArgs::parse(rest)?;
    let output = options.output.as_deref().ok_or_else(|| anyhow!("-o <output> is required"))?;
    let raster = options.load_raster()?;
    let kind = options.kind()?;
    let out_kind = options.out_kind.unwrap_or(kind);
    let size = raster.size();

    let registry = FunctionRegistry::with_builtins();
    let sources: Vec<&[u8]> = raster.bands().iter().map(Band::as_bytes).collect();
    let mut out = Band::zeroed(out_kind, size.pixel_count());
    let mut dest = DestinationBuffer::packed(out.as_bytes_mut(), out_kind, size.width);

    registry
        .apply(name, &SourceBands::new(&sources, kind), &mut dest, size)
        .with_context(|| format!("failed to apply '{}'", name))?;

    out.to_file(output)
        .with_context(|| format!("failed to write {}", output.display()))?;
    info!("wrote {} ({}x{} {})", output.display(), size.width, size.height, out_kind);
    Ok(())
}

fn run_pipeline(args: &[String]) -> anyhow::Result<()> {
    let (path, rest) = args
        .split_first()
        .ok_or_else(|| anyhow!("please specify a pipeline file"))?;
    let options = BandArgs::parse(rest)?;
    let out_dir = options.out_dir.as_deref().ok_or_else(|| anyhow!("--out-dir is required"))?;

    let definition =
        PipelineDefinition::from_file(path).with_context(|| format!("failed to load pipeline {}", path))?;
    let raster = options.load_raster()?;

    let registry = FunctionRegistry::with_builtins();
    let engine = PipelineEngine::new(&registry)
        .with_options(PipelineOptions::new().with_parallel(!options.sequential));
    let output = engine.execute(&raster, &definition)?;

    fs::create_dir_all(out_dir).with_context(|| format!("failed to create {}", out_dir.display()))?;
    for (name, band) in &output.bands {
        let target = band_path(out_dir, name);
        band.to_file(&target)
            .with_context(|| format!("failed to write {}", target.display()))?;
        println!("{} -> {} ({})", name, target.display(), band.kind());
    }
    println!(
        "{} band(s) in {:.1}ms",
        output.stats.bands_computed,
        output.stats.total_duration.as_secs_f64() * 1000.0
    );
    Ok(())
}

fn band_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.raw", name))
}

fn parse_dimensions(s: &str) -> Option<RasterSize> {
    let (w, h) = s.split_once('x')?;
    Some(RasterSize::new(w.parse().ok()?, h.parse().ok()?))
}
