//! Stockcast Runner — configuration and orchestration of a forecasting run.
//!
//! This crate builds on `stockcast-core` to provide:
//! - Validated run configuration
//! - The walk → sample → forecast → write loop with per-file recovery
//! - Progress reporting through `tracing`
//! - Run summaries and JSON reports

pub mod config;
pub mod pipeline;
pub mod progress;
pub mod report;

pub use config::{ConfigError, PipelineConfig, SAMPLE_COUNT_RANGE};
pub use pipeline::{process_file, run_pipeline, FileOutcome, FileReport, RunError, RunSummary};
pub use progress::{LogProgress, ProgressReporter};
pub use report::{export_json, write_report};
