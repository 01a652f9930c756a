//! Validated run configuration.

use serde::Serialize;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use stockcast_core::{ForecastMethod, HistoryWindow};
use thiserror::Error;

/// Files sampled per exchange must fall in this range.
pub const SAMPLE_COUNT_RANGE: RangeInclusive<usize> = 1..=2;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Everything a run needs, checked once up front and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineConfig {
    pub sample_count: usize,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Fixed RNG seed; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub window: HistoryWindow,
    pub method: ForecastMethod,
    pub report_path: Option<PathBuf>,
}

impl PipelineConfig {
    /// Validate the three required settings.
    ///
    /// `input_dir` must be an existing directory and must not be the output
    /// directory, since outputs reuse input file names.
    pub fn new(
        sample_count: usize,
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let input_dir = input_dir.into();
        let output_dir = output_dir.into();

        if !SAMPLE_COUNT_RANGE.contains(&sample_count) {
            return Err(ConfigError::InvalidArgument(format!(
                "sample count must be {} or {}, got {sample_count}",
                SAMPLE_COUNT_RANGE.start(),
                SAMPLE_COUNT_RANGE.end()
            )));
        }
        if !input_dir.exists() {
            return Err(ConfigError::InvalidArgument(format!(
                "input directory {} does not exist",
                input_dir.display()
            )));
        }
        if !input_dir.is_dir() {
            return Err(ConfigError::InvalidArgument(format!(
                "input path {} is not a directory",
                input_dir.display()
            )));
        }
        if same_dir(&input_dir, &output_dir) {
            return Err(ConfigError::InvalidArgument(format!(
                "output directory {} must differ from the input directory",
                output_dir.display()
            )));
        }

        Ok(Self {
            sample_count,
            input_dir,
            output_dir,
            seed: None,
            window: HistoryWindow::Full,
            method: ForecastMethod::default(),
            report_path: None,
        })
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Keep a random run of `rows` rows per file instead of the whole history.
    pub fn with_window(mut self, rows: Option<usize>) -> Result<Self, ConfigError> {
        self.window = match rows {
            None => HistoryWindow::Full,
            Some(0) => {
                return Err(ConfigError::InvalidArgument(
                    "history window must keep at least one row".into(),
                ))
            }
            Some(rows) => HistoryWindow::Random { rows },
        };
        Ok(self)
    }

    pub fn with_method(mut self, method: ForecastMethod) -> Result<Self, ConfigError> {
        method.validate().map_err(ConfigError::InvalidArgument)?;
        self.method = method;
        Ok(self)
    }

    pub fn with_report(mut self, path: Option<PathBuf>) -> Self {
        self.report_path = path;
        self
    }
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
