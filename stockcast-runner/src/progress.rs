//! Progress callbacks for a run.

use crate::pipeline::{FileOutcome, FileReport, RunSummary};
use stockcast_core::Exchange;
use tracing::{info, warn};

/// Progress callback for the exchange/file loop.
pub trait ProgressReporter {
    /// Called once per exchange after sampling.
    fn on_exchange(&self, exchange: &Exchange, sampled: usize);

    /// Called after each sampled file is written or skipped.
    fn on_file(&self, report: &FileReport);

    /// Called when every exchange has been handled.
    fn on_complete(&self, summary: &RunSummary);
}

/// Reporter that emits `tracing` events.
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn on_exchange(&self, exchange: &Exchange, sampled: usize) {
        if exchange.is_empty() {
            info!(exchange = %exchange.name, "no CSV files, skipping exchange");
        } else {
            info!(
                exchange = %exchange.name,
                available = exchange.files.len(),
                sampled,
                "sampled exchange"
            );
        }
    }

    fn on_file(&self, report: &FileReport) {
        match &report.outcome {
            FileOutcome::Written {
                output,
                historical_rows,
                ..
            } => info!(
                input = %report.input.display(),
                output = %output.display(),
                rows = historical_rows,
                "forecast written"
            ),
            FileOutcome::Skipped { reason } => warn!(
                input = %report.input.display(),
                "skipped: {reason}"
            ),
        }
    }

    fn on_complete(&self, summary: &RunSummary) {
        info!(
            "run complete: {} exchange(s), {} file(s) sampled, {} written, {} skipped",
            summary.exchanges, summary.sampled, summary.written, summary.skipped
        );
    }
}
