//! CSV reader — parses a historical price file into a [`PriceTable`].
//!
//! Every row must parse: one malformed date, price or volume rejects the
//! whole file. Row text is sliced out of the source by record offsets so the
//! writer can reproduce it unchanged.

use super::error::DataError;
use crate::domain::{ColumnRoles, DateFormat, HistoricalRow, LineEnding, PriceTable};
use csv::StringRecord;
use std::fs;
use std::io;
use std::path::Path;

/// Read and parse the CSV file at `path`.
pub fn read_price_table(path: &Path) -> Result<PriceTable, DataError> {
    let text = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => DataError::parse(path, 0, "file is not valid UTF-8"),
        _ => DataError::io(path, e),
    })?;
    parse_price_table(path, &text)
}

/// Parse CSV `text`; `path` is only used for error reporting.
pub fn parse_price_table(path: &Path, text: &str) -> Result<PriceTable, DataError> {
    if text.trim().is_empty() {
        return Err(DataError::parse(path, 1, "empty file"));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(|e| csv_error(path, e))?;
    let roles =
        ColumnRoles::detect(headers.iter()).map_err(|reason| DataError::parse(path, 1, reason))?;

    // (start byte, line, record)
    let mut records: Vec<(usize, u64, StringRecord)> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(path, e))?;
        let Some(pos) = record.position() else {
            return Err(DataError::parse(path, 0, "record without position"));
        };
        let start = usize::try_from(pos.byte())
            .map_err(|_| DataError::parse(path, pos.line(), "file too large"))?;
        records.push((start, pos.line(), record));
    }

    let Some(&(first_start, first_line, ref first)) = records.first() else {
        return Err(DataError::parse(path, 2, "no historical rows"));
    };

    let header_region = &text[..first_start];
    let line_ending = if header_region.contains("\r\n") {
        LineEnding::CrLf
    } else {
        LineEnding::Lf
    };
    let header_raw = trim_terminators(header_region)
        .trim_start_matches(['\r', '\n'])
        .to_string();

    let first_date = first.get(roles.date).unwrap_or_default();
    let date_format = DateFormat::detect(first_date).ok_or_else(|| {
        DataError::parse(path, first_line, format!("malformed date '{first_date}'"))
    })?;

    let mut rows = Vec::with_capacity(records.len());
    for (i, (start, line, record)) in records.iter().enumerate() {
        let end = records.get(i + 1).map_or(text.len(), |next| next.0);
        let raw = trim_terminators(&text[*start..end]).to_string();
        rows.push(parse_row(path, *line, raw, record, &roles, date_format)?);
    }

    Ok(PriceTable {
        header_raw,
        roles,
        date_format,
        line_ending,
        rows,
    })
}

fn parse_row(
    path: &Path,
    line: u64,
    raw: String,
    record: &StringRecord,
    roles: &ColumnRoles,
    date_format: DateFormat,
) -> Result<HistoricalRow, DataError> {
    let date_raw = record.get(roles.date).unwrap_or_default();
    let date = date_format.parse(date_raw).ok_or_else(|| {
        DataError::parse(
            path,
            line,
            format!(
                "malformed date '{date_raw}' (expected {})",
                date_format.pattern()
            ),
        )
    })?;

    let mut close = f64::NAN;
    for &(col, _) in &roles.prices {
        let value = parse_number(record.get(col)).ok_or_else(|| {
            DataError::parse(
                path,
                line,
                format!("non-numeric price '{}'", record.get(col).unwrap_or_default()),
            )
        })?;
        if col == roles.close {
            close = value;
        }
    }

    if let Some(col) = roles.volume {
        match parse_number(record.get(col)) {
            Some(v) if v >= 0.0 => {}
            _ => {
                return Err(DataError::parse(
                    path,
                    line,
                    format!("invalid volume '{}'", record.get(col).unwrap_or_default()),
                ))
            }
        }
    }

    Ok(HistoricalRow {
        raw,
        fields: record.iter().map(str::to_string).collect(),
        line,
        date,
        close,
    })
}

fn parse_number(field: Option<&str>) -> Option<f64> {
    field?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn trim_terminators(s: &str) -> &str {
    s.trim_end_matches(['\r', '\n'])
}

fn csv_error(path: &Path, err: csv::Error) -> DataError {
    let line = err.position().map_or(0, |p| p.line());
    let reason = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("expected {expected_len} fields, found {len}"),
        _ => err.to_string(),
    };
    DataError::parse(path, line, reason)
}
