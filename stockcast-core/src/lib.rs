//! Stockcast Core — domain types, exchange walking, sampling, CSV I/O, forecasting.
//!
//! This crate contains the per-file machinery of the forecasting tool:
//! - Domain types (exchanges, price tables, predicted rows)
//! - Lazy walker over `<input>/<exchange>/*.csv`
//! - Uniform sampling without replacement and history windows
//! - CSV reader with column-role and date-format detection
//! - Chained forecasters (random walk, pullback)
//! - Atomic writer for the mirrored output layout

pub mod data;
pub mod domain;
pub mod forecast;
pub mod rng;
pub mod sample;

pub use data::{read_price_table, walk_exchanges, write_forecast, DataError, ExchangeWalker};
pub use domain::{Exchange, PredictedRow, PriceTable};
pub use forecast::{ForecastMethod, Forecaster, PREDICTION_HORIZON};
pub use sample::{sample_files, HistoryWindow};
