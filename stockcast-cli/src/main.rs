//! Stockcast CLI — sample exchange price files and write three-day forecasts.
//!
//! Reads `<input>/<exchange>/*.csv`, picks `--n` files per exchange at random,
//! and writes each one to `<output>/<exchange>/<file>` with three predicted
//! rows appended.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use stockcast_core::forecast::DEFAULT_MAX_CHANGE_PCT;
use stockcast_core::rng::run_rng;
use stockcast_core::ForecastMethod;
use stockcast_runner::{run_pipeline, write_report, LogProgress, PipelineConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "stockcast",
    about = "Predict the next stock prices for a random sample of files per exchange"
)]
struct Cli {
    /// Number of files to sample per exchange (1 or 2).
    #[arg(long, visible_alias = "sample-count")]
    n: usize,

    /// Input directory containing one subdirectory per exchange.
    #[arg(long)]
    input: PathBuf,

    /// Output directory; exchange subdirectories are created as needed.
    #[arg(long)]
    output: PathBuf,

    /// Seed for reproducible sampling and predictions.
    #[arg(long)]
    seed: Option<u64>,

    /// Keep a random run of this many rows per file instead of the full history.
    #[arg(long, value_name = "ROWS")]
    window: Option<usize>,

    /// Prediction heuristic.
    #[arg(long, value_enum, default_value_t = Method::RandomWalk)]
    method: Method,

    /// Largest step of the random walk, in percent of the previous value.
    #[arg(long, default_value_t = DEFAULT_MAX_CHANGE_PCT)]
    max_change_pct: f64,

    /// Write a JSON run report to this path.
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    RandomWalk,
    Pullback,
}

impl Cli {
    fn forecast_method(&self) -> ForecastMethod {
        match self.method {
            Method::RandomWalk => ForecastMethod::RandomWalk {
                max_change_pct: self.max_change_pct,
            },
            Method::Pullback => ForecastMethod::Pullback,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let method = cli.forecast_method();

    let config = PipelineConfig::new(cli.n, cli.input, cli.output)?
        .with_seed(cli.seed)
        .with_window(cli.window)?
        .with_method(method)?
        .with_report(cli.report);

    info!(
        input = %config.input_dir.display(),
        output = %config.output_dir.display(),
        n = config.sample_count,
        "starting run"
    );

    let mut rng = run_rng(config.seed);
    let summary = run_pipeline(&config, &mut rng, &LogProgress)?;

    if let Some(path) = &config.report_path {
        write_report(path, &summary)?;
        info!(path = %path.display(), "report written");
    }

    if !summary.is_success() {
        error!(
            "none of the {} sampled file(s) could be processed",
            summary.sampled
        );
        std::process::exit(1);
    }

    Ok(())
}
