//! Run orchestration: walk → sample → forecast → write.
//!
//! Exchanges and files are processed one at a time. A file that fails to
//! parse or write is skipped and recorded; only an unreadable input root or a
//! permission failure on the output tree stops the run.

use crate::config::PipelineConfig;
use crate::progress::ProgressReporter;
use rand::Rng;
use serde::Serialize;
use std::path::{Path, PathBuf};
use stockcast_core::{
    read_price_table, sample_files, walk_exchanges, write_forecast, DataError, Exchange,
    ForecastMethod, Forecaster, HistoryWindow,
};
use thiserror::Error;
use tracing::warn;

/// Errors that abort a run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot read input directory: {0}")]
    Input(#[source] DataError),
    #[error("aborting run: {0}")]
    Fatal(#[source] DataError),
}

/// What happened to one sampled file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Written {
        output: PathBuf,
        historical_rows: usize,
        predicted_rows: usize,
    },
    Skipped {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub exchange: String,
    pub input: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Aggregate result of a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub exchanges: usize,
    /// Exchange directories that could not be listed.
    pub unreadable_exchanges: usize,
    pub sampled: usize,
    pub written: usize,
    pub skipped: usize,
    pub sample_count: usize,
    pub seed: Option<u64>,
    pub window: HistoryWindow,
    pub method: ForecastMethod,
    pub files: Vec<FileReport>,
}

impl RunSummary {
    fn new(config: &PipelineConfig) -> Self {
        Self {
            exchanges: 0,
            unreadable_exchanges: 0,
            sampled: 0,
            written: 0,
            skipped: 0,
            sample_count: config.sample_count,
            seed: config.seed,
            window: config.window,
            method: config.method,
            files: Vec::new(),
        }
    }

    fn record(&mut self, report: FileReport) {
        self.sampled += 1;
        match report.outcome {
            FileOutcome::Written { .. } => self.written += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
        }
        self.files.push(report);
    }

    /// A run fails only when files were sampled and none could be written.
    pub fn is_success(&self) -> bool {
        self.sampled == 0 || self.written > 0
    }

    pub fn written_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Written { .. }))
    }
}

/// Run the whole pipeline described by `config`.
pub fn run_pipeline<R: Rng>(
    config: &PipelineConfig,
    rng: &mut R,
    progress: &dyn ProgressReporter,
) -> Result<RunSummary, RunError> {
    let walker = walk_exchanges(&config.input_dir).map_err(RunError::Input)?;
    let forecaster = config.method.create();
    let mut summary = RunSummary::new(config);

    for exchange in walker {
        let exchange = match exchange {
            Ok(exchange) => exchange,
            Err(e) => {
                warn!("skipping exchange: {e}");
                summary.unreadable_exchanges += 1;
                continue;
            }
        };
        summary.exchanges += 1;

        let picked = sample_files(&exchange.files, config.sample_count, rng);
        progress.on_exchange(&exchange, picked.len());

        for file in picked {
            let outcome = match process_file(config, &exchange, &file, forecaster.as_ref(), rng) {
                Ok(outcome) => outcome,
                Err(e) if e.is_fatal() => return Err(RunError::Fatal(e)),
                Err(e) => FileOutcome::Skipped {
                    reason: e.to_string(),
                },
            };
            let report = FileReport {
                exchange: exchange.name.clone(),
                input: file,
                outcome,
            };
            progress.on_file(&report);
            summary.record(report);
        }
    }

    progress.on_complete(&summary);
    Ok(summary)
}

/// Read one file, forecast, and write its mirrored output.
pub fn process_file<R: Rng>(
    config: &PipelineConfig,
    exchange: &Exchange,
    file: &Path,
    forecaster: &dyn Forecaster,
    rng: &mut R,
) -> Result<FileOutcome, DataError> {
    let file_name = file
        .file_name()
        .ok_or_else(|| DataError::parse(file, 0, "path has no file name"))?;

    let mut table = read_price_table(file)?;
    let keep = config.window.select(table.len(), rng);
    table.retain_rows(keep);

    let values = forecaster.forecast(&table.closes(), table.close_precision(), rng);
    let predicted = table.predicted_rows(&values);
    let output = write_forecast(&config.output_dir, exchange, file_name, &table, &predicted)?;

    Ok(FileOutcome::Written {
        output,
        historical_rows: table.len(),
        predicted_rows: predicted.len(),
    })
}
