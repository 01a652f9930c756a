//! PriceTable — a parsed historical price file.
//!
//! The table keeps the verbatim text of the header and of every row so the
//! writer can reproduce them byte for byte. Parsed values (date, close) live
//! alongside the raw text and drive the forecasters.

use chrono::{Duration, NaiveDate};
use std::ops::Range;

/// Date layouts accepted in the date column, tried in order.
///
/// `%d-%m-%Y` is the layout produced by the exchange dumps this tool was first
/// written for; the others cover common exports.
pub const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d", "%m/%d/%Y"];

const DATE_HEADERS: [&str; 5] = ["date", "timestamp", "datetime", "time", "day"];

/// Close-like headers in priority order.
const CLOSE_HEADERS: [&str; 7] = [
    "close",
    "adj close",
    "adjusted close",
    "price",
    "stock price value",
    "value",
    "last",
];

const VOLUME_HEADER: &str = "volume";

/// Role of a recognized price column in a predicted row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceField {
    Open,
    High,
    Low,
    /// Any close-like column: close, adj close, price, value, last.
    Close,
}

impl PriceField {
    fn from_header(normalized: &str) -> Option<Self> {
        match normalized {
            "open" => Some(Self::Open),
            "high" => Some(Self::High),
            "low" => Some(Self::Low),
            h if CLOSE_HEADERS.contains(&h) => Some(Self::Close),
            _ => None,
        }
    }
}

/// Column indices resolved from the header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRoles {
    pub date: usize,
    /// The column forecasts extrapolate from.
    pub close: usize,
    /// Every recognized price column, including `close`.
    pub prices: Vec<(usize, PriceField)>,
    pub volume: Option<usize>,
}

impl ColumnRoles {
    /// Resolve roles from header names. Matching ignores case, surrounding
    /// whitespace, and treats `_` and `-` as spaces.
    pub fn detect<'a, I>(headers: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let normalized: Vec<String> = headers.into_iter().map(normalize_header).collect();

        let date = normalized
            .iter()
            .position(|h| DATE_HEADERS.contains(&h.as_str()))
            .ok_or_else(|| {
                format!("no date column (expected one of: {})", DATE_HEADERS.join(", "))
            })?;

        let close = CLOSE_HEADERS
            .iter()
            .find_map(|wanted| normalized.iter().position(|h| h == wanted))
            .ok_or_else(|| {
                format!(
                    "no close-like column (expected one of: {})",
                    CLOSE_HEADERS.join(", ")
                )
            })?;

        let prices = normalized
            .iter()
            .enumerate()
            .filter_map(|(i, h)| PriceField::from_header(h).map(|f| (i, f)))
            .collect();

        let volume = normalized.iter().position(|h| h == VOLUME_HEADER);

        Ok(Self {
            date,
            close,
            prices,
            volume,
        })
    }

    pub fn price_field(&self, column: usize) -> Option<PriceField> {
        self.prices
            .iter()
            .find(|(i, _)| *i == column)
            .map(|(_, f)| *f)
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_start_matches('\u{feff}')
        .to_ascii_lowercase()
        .replace(['_', '-'], " ")
}

/// A date layout detected from the first data row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFormat(&'static str);

impl DateFormat {
    /// First layout in [`DATE_FORMATS`] that parses `sample`.
    pub fn detect(sample: &str) -> Option<Self> {
        DATE_FORMATS
            .iter()
            .copied()
            .find(|fmt| NaiveDate::parse_from_str(sample.trim(), fmt).is_ok())
            .map(Self)
    }

    pub fn parse(&self, value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), self.0).ok()
    }

    pub fn format(&self, date: NaiveDate) -> String {
        date.format(self.0).to_string()
    }

    pub fn pattern(&self) -> &'static str {
        self.0
    }
}

/// Record terminator used by the source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
        }
    }
}

/// One historical observation.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalRow {
    /// Row text exactly as it appeared in the file, without its terminator.
    pub raw: String,
    pub fields: Vec<String>,
    /// 1-based line number in the source file.
    pub line: u64,
    pub date: NaiveDate,
    pub close: f64,
}

/// A generated row appended after the history.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictedRow {
    pub date: NaiveDate,
    pub fields: Vec<String>,
}

/// Parsed contents of one input CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTable {
    /// Header line exactly as it appeared, without its terminator.
    pub header_raw: String,
    pub roles: ColumnRoles,
    pub date_format: DateFormat,
    pub line_ending: LineEnding,
    /// Never empty once built by the reader.
    pub rows: Vec<HistoricalRow>,
}

impl PriceTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn last_row(&self) -> Option<&HistoricalRow> {
        self.rows.last()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.close).collect()
    }

    /// Keep only `range` of the historical rows. Out-of-bounds ends are clamped.
    pub fn retain_rows(&mut self, range: Range<usize>) {
        let end = range.end.min(self.rows.len());
        let start = range.start.min(end);
        self.rows.truncate(end);
        self.rows.drain(..start);
    }

    /// Decimal places shown in the last close value, at least two.
    pub fn close_precision(&self) -> usize {
        self.last_row()
            .and_then(|row| row.fields.get(self.roles.close))
            .and_then(|raw| raw.trim().split_once('.').map(|(_, frac)| frac.len()))
            .unwrap_or(0)
            .max(2)
    }

    /// Build the rows for `values`, dated one day apart after the last
    /// historical date.
    ///
    /// Close-like columns take the predicted value, `open` takes the previous
    /// close in the chain, `high`/`low` bracket open and close. Every other
    /// column is copied from the last historical row.
    pub fn predicted_rows(&self, values: &[f64]) -> Vec<PredictedRow> {
        let Some(last) = self.last_row() else {
            return Vec::new();
        };
        let precision = self.close_precision();
        let fmt = |v: f64| format!("{v:.precision$}");

        let mut previous = last.close;
        let mut out = Vec::with_capacity(values.len());
        for (step, &close) in values.iter().enumerate() {
            let date = last.date + Duration::days(step as i64 + 1);
            let open = previous;
            let fields = last
                .fields
                .iter()
                .enumerate()
                .map(|(col, carried)| {
                    if col == self.roles.date {
                        return self.date_format.format(date);
                    }
                    match self.roles.price_field(col) {
                        Some(PriceField::Open) => fmt(open),
                        Some(PriceField::High) => fmt(open.max(close)),
                        Some(PriceField::Low) => fmt(open.min(close)),
                        Some(PriceField::Close) => fmt(close),
                        None => carried.clone(),
                    }
                })
                .collect();
            out.push(PredictedRow { date, fields });
            previous = close;
        }
        out
    }
}
