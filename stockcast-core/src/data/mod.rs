//! Filesystem side of the pipeline: walking exchanges, reading price files,
//! writing forecasts.

pub mod error;
pub mod reader;
pub mod walker;
pub mod writer;

pub use error::DataError;
pub use reader::{parse_price_table, read_price_table};
pub use walker::{walk_exchanges, ExchangeWalker};
pub use writer::write_forecast;
