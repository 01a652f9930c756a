//! Domain types shared by the walker, reader, forecasters and writer.

pub mod exchange;
pub mod table;

pub use exchange::Exchange;
pub use table::{
    ColumnRoles, DateFormat, HistoricalRow, LineEnding, PredictedRow, PriceField, PriceTable,
};
