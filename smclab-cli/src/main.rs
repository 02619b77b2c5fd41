//! smclab CLI: run the detector over candle files.
//!
//! Commands:
//! - `analyze`: load candles (CSV or JSON), run the engine, print a summary or JSON
//! - `config`: print the default detector config as TOML
//! - `fingerprint`: print the BLAKE3 fingerprint of candles + config

mod loader;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use smclab_core::{
    analyze, AnalysisResult, AnalysisStatus, DetectorConfig, InputFingerprint, StructureKind,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use loader::{load_candles, load_config};

#[derive(Parser)]
#[command(
    name = "smclab",
    about = "smclab: market structure and order block detection"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a candle file and report order blocks, structure, gaps and equal levels.
    Analyze {
        /// Candle file (.csv with a time,open,high,low,close header, or .json).
        #[arg(long)]
        input: PathBuf,

        /// Detector config TOML. Defaults apply to any field it omits.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the full result as JSON instead of a summary.
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also write the JSON result to this file.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the default detector config as TOML.
    Config,
    /// Print the input fingerprint of a candle file and config.
    Fingerprint {
        /// Candle file (.csv or .json).
        #[arg(long)]
        input: PathBuf,

        /// Detector config TOML.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so `--json` output stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("smclab=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            config,
            json,
            output,
        } => run_analyze(&input, config.as_deref(), json, output.as_deref()),
        Commands::Config => run_config(),
        Commands::Fingerprint { input, config } => run_fingerprint(&input, config.as_deref()),
    }
}

fn run_analyze(
    input: &Path,
    config_path: Option<&Path>,
    json: bool,
    output: Option<&Path>,
) -> Result<()> {
    let config = load_config(config_path)?;
    let candles = load_candles(input)?;

    let result = analyze(&candles, &config)
        .with_context(|| format!("Analysis of {} failed", input.display()))?;

    if let Some(path) = output {
        let body = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        std::fs::write(path, body)
            .with_context(|| format!("Failed to write result {}", path.display()))?;
        tracing::info!(path = %path.display(), "result written");
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialize result")?
        );
    } else {
        let fingerprint = InputFingerprint::compute(&candles, &config)
            .context("Failed to fingerprint input")?;
        print_summary(input, candles.len(), &fingerprint, &result);
    }
    Ok(())
}

fn run_config() -> Result<()> {
    print!("{}", DetectorConfig::default().to_toml()?);
    Ok(())
}

fn run_fingerprint(input: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let candles = load_candles(input)?;
    let fingerprint = InputFingerprint::compute(&candles, &config)
        .with_context(|| format!("Failed to fingerprint {}", input.display()))?;
    println!("{fingerprint}");
    Ok(())
}

fn print_summary(
    input: &Path,
    candle_count: usize,
    fingerprint: &InputFingerprint,
    result: &AnalysisResult,
) {
    println!();
    println!("=== Analysis Result ===");
    println!("Input:          {}", input.display());
    println!("Candles:        {candle_count}");
    println!("Fingerprint:    {}", fingerprint.short());

    if let AnalysisStatus::InsufficientData { required, got } = result.status {
        println!();
        println!("WARNING: insufficient data ({got} candles, {required} required)");
        println!();
        return;
    }

    let count = |events: &[smclab_core::StructureEvent], kind: StructureKind| {
        events.iter().filter(|e| e.kind == kind).count()
    };
    println!();
    println!("--- Structure ---");
    println!(
        "Swing:          {} BOS, {} CHOCH",
        count(&result.structures.swing, StructureKind::Bos),
        count(&result.structures.swing, StructureKind::Choch)
    );
    println!(
        "Internal:       {} BOS, {} CHOCH",
        count(&result.structures.internal, StructureKind::Bos),
        count(&result.structures.internal, StructureKind::Choch)
    );

    println!();
    println!("--- Order Blocks ---");
    for (label, blocks) in [
        ("Bullish", &result.order_blocks.bullish),
        ("Bearish", &result.order_blocks.bearish),
    ] {
        let fresh = blocks.iter().filter(|b| b.fresh).count();
        println!("{label}:        {} ({fresh} fresh)", blocks.len());
        for ob in blocks {
            let state = match ob.mitigation_index {
                Some(m) => format!("mitigated @ {m}"),
                None => "fresh".to_string(),
            };
            println!(
                "  #{:<6} {:>12.4} .. {:<12.4} strength {:.2}  {state}",
                ob.index, ob.low, ob.high, ob.strength
            );
        }
    }

    println!();
    println!("--- Other Zones ---");
    let filled = result.fair_value_gaps.iter().filter(|g| g.filled).count();
    println!("Fair value gaps: {} ({filled} filled)", result.fair_value_gaps.len());
    println!("Equal highs:     {}", result.equal_levels.highs.len());
    println!("Equal lows:      {}", result.equal_levels.lows.len());
    println!();
}
