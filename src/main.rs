//! geopressure - divergence-method geopressure profiling
//!
//! # Usage
//!
//! ```bash
//! # Profile a log with the default parameters, CSV to stdout
//! geopressure analyze --input well.csv
//!
//! # JSON report with a terminal summary
//! geopressure analyze --input well.csv --config geopressure.toml \
//!     --format json --output profile.json --summary
//!
//! # Write a starter config / check an edited one
//! geopressure init-config --output geopressure.toml
//! geopressure check-config geopressure.toml
//! ```
//!
//! # Environment Variables
//!
//! - `GEOPRESSURE_CONFIG`: Path to the analysis config (used when `--config` is absent)
//! - `RUST_LOG`: Logging level (default: info)

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use geopressure::acquisition::read_well_log;
use geopressure::config::validation::validate_unknown_keys;
use geopressure::report::{render_summary, write_profile_csv, write_profile_json, ProfileReport};
use geopressure::{summarize, AnalysisConfig, Pipeline};

#[derive(Parser, Debug)]
#[command(name = "geopressure")]
#[command(about = "Divergence-method pore and fracture pressure profiling from sonic logs")]
#[command(version)]
struct CliArgs {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the geopressure profile of a well log
    Analyze {
        /// CSV with columns Depth, DTC, MW (header optional)
        #[arg(short, long, value_name = "CSV")]
        input: PathBuf,

        /// Analysis config (TOML); falls back to $GEOPRESSURE_CONFIG, ./geopressure.toml, defaults
        #[arg(short, long, value_name = "TOML")]
        config: Option<PathBuf>,

        /// Output file (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Print the operating window summary to stderr
        #[arg(long)]
        summary: bool,

        /// Exit with an error if any row hit a numeric singularity
        #[arg(long)]
        strict: bool,
    },

    /// Write a config file holding the default parameters
    InitConfig {
        #[arg(short, long, default_value = "geopressure.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Validate a config file and report warnings
    CheckConfig {
        path: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Csv,
    Json,
}

// ============================================================================
// Subcommands
// ============================================================================

fn analyze(
    input: &Path,
    config_path: Option<&Path>,
    output: Option<&Path>,
    format: OutputFormat,
    print_summary: bool,
    strict: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => AnalysisConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AnalysisConfig::load(),
    };

    let pipeline = Pipeline::new(&config).context("Invalid analysis parameters")?;
    let log = read_well_log(input)
        .with_context(|| format!("Failed to read well log {}", input.display()))?;
    let profile = pipeline.run(&log);

    for diagnostic in profile.diagnostics() {
        debug!(%diagnostic, "Row singularity");
    }

    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    match format {
        OutputFormat::Csv => write_profile_csv(&profile, sink)?,
        OutputFormat::Json => {
            let report = ProfileReport::new(&profile, pipeline.parameters(), &config.well);
            write_profile_json(&report, sink)?;
        }
    }

    if let Some(path) = output {
        info!(path = %path.display(), rows = profile.len(), ?format, "Profile written");
    }

    if print_summary {
        eprint!("{}", render_summary(&config.well.name, &summarize(&profile)));
    }

    if strict && profile.has_singularities() {
        bail!(
            "{} row singularities found (first: {})",
            profile.diagnostics().len(),
            profile.diagnostics()[0]
        );
    }

    Ok(())
}

fn init_config(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", output.display());
    }
    AnalysisConfig::default()
        .save_to_file(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(path = %output.display(), "Default config written");
    Ok(())
}

fn check_config(path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let warnings = validate_unknown_keys(&raw);

    let config = AnalysisConfig::from_toml_str(&raw)
        .with_context(|| format!("Config {} is invalid", path.display()))?;

    println!("Config OK: {}", path.display());
    println!("  Well:      {} ({})", config.well.name, config.well.field);
    println!("  Mudline:   {:.1} m", config.geometry.mudline_depth_m());
    println!("  prf:       {:.1} m", config.divergence.reference_depth_m);
    println!("  ms:        {:.1} m", config.calibration.switch_depth_m);
    for warning in &warnings {
        println!("  warning:   {warning}");
    }
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    // stderr, so CSV on stdout stays clean
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.log_json);

    match args.command {
        Command::Analyze {
            input,
            config,
            output,
            format,
            summary,
            strict,
        } => analyze(
            &input,
            config.as_deref(),
            output.as_deref(),
            format,
            summary,
            strict,
        ),
        Command::InitConfig { output, force } => init_config(&output, force),
        Command::CheckConfig { path } => check_config(&path),
    }
}
