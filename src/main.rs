//! cutplan - CLI tool to quote and lay out cut lists.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use cutplan::units::{format_area, format_percent};
use cutplan::{
    build_line_items, format_currency, load_configuration_file, load_engine_config, validate_parts,
    CuttingEngine, EngineConfig, LayoutStrategy, TracingHook,
};

/// Quote a cut list and compute its sheet layout.
#[derive(Parser, Debug)]
#[command(name = "cutplan")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input JSON file (parts array or configuration object)
    #[arg(short, long)]
    input: PathBuf,

    /// Output JSON file (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Engine configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Sheet width in mm
    #[arg(long)]
    sheet_width: Option<f64>,

    /// Sheet height in mm
    #[arg(long)]
    sheet_height: Option<f64>,

    /// Layout fit test: area or shelf
    #[arg(short, long)]
    strategy: Option<LayoutStrategy>,

    /// Validate only, don't quote
    #[arg(long)]
    validate: bool,

    /// Print the expanded pieces as JSON and exit
    #[arg(long)]
    debug: bool,

    /// Log timing of each engine stage
    #[arg(long)]
    timing: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn engine_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => load_engine_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if let Some(width) = args.sheet_width {
        config.sheet_width = width;
    }
    if let Some(height) = args.sheet_height {
        config.sheet_height = height;
    }
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose || args.timing {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = engine_config(&args)?;

    info!("Processing: {}", args.input.display());

    let mut configuration = load_configuration_file(&args.input)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;

    info!("Loaded {} part(s)", configuration.parts.len());

    // Validate
    let validation = validate_parts(&configuration.parts, config.frame_bar_width);

    for warning in validation.warnings() {
        warn!("{}", warning);
    }

    for err in validation.errors() {
        error!("{}", err);
    }

    if !validation.passed() {
        anyhow::bail!("Validation failed");
    }

    if args.validate {
        info!("Validation passed");
        return Ok(());
    }

    let mut engine = CuttingEngine::new(config)?;
    if args.timing {
        engine = engine.with_hook(TracingHook);
    }

    // Debug output
    if args.debug {
        let pieces = engine.expand(&configuration.parts)?;
        println!("{}", serde_json::to_string_pretty(&pieces)?);
        return Ok(());
    }

    let quote = engine.quote_configuration(&mut configuration)?;

    info!(
        "Material {}, edges {}, labor {}, total {}",
        format_currency(quote.price.material_cost),
        format_currency(quote.price.edge_processing_cost),
        format_currency(quote.price.labor_cost),
        format_currency(quote.price.total_cost)
    );
    info!(
        "{} sheet(s), {} placed, estimated waste {}, layout efficiency {}",
        quote.layout.sheet_count(),
        format_area(quote.layout.used_area_m2),
        format_percent(quote.price.material_waste),
        format_percent(quote.layout.efficiency)
    );

    let report = serde_json::json!({
        "quote": quote,
        "configuration": configuration,
        "lineItems": build_line_items(&configuration),
    });
    let json = serde_json::to_string_pretty(&report)?;

    match args.output {
        Some(output_path) => {
            std::fs::write(&output_path, &json)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            info!("Generated: {}", output_path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
