//! Forecast writer — `output/<exchange>/<file>` with history plus predictions.

use super::error::DataError;
use crate::domain::{Exchange, LineEnding, PredictedRow, PriceTable};
use std::ffi::OsStr;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write `table`'s header and rows followed by `predicted` to
/// `output_dir/<exchange>/<file_name>`, replacing any existing file.
///
/// Output goes to a temporary file in the target directory and is renamed
/// into place once complete. On unix the file is created with mode 0666
/// minus the umask, like a plain `fs::write`. Returns the final path.
pub fn write_forecast(
    output_dir: &Path,
    exchange: &Exchange,
    file_name: &OsStr,
    table: &PriceTable,
    predicted: &[PredictedRow],
) -> Result<PathBuf, DataError> {
    let dir = exchange.mirrored_dir(output_dir);
    fs::create_dir_all(&dir).map_err(|e| create_dir_error(&dir, e))?;

    let target = dir.join(file_name);
    let mut builder = tempfile::Builder::new();
    builder.prefix(".stockcast-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder
        .tempfile_in(&dir)
        .map_err(|e| DataError::io(&dir, e))?;
    {
        let mut out = BufWriter::new(tmp.as_file_mut());
        write_contents(&mut out, table, predicted).map_err(|e| DataError::io(&target, e))?;
        out.flush().map_err(|e| DataError::io(&target, e))?;
    }
    tmp.persist(&target)
        .map_err(|e| DataError::io(&target, e.error))?;

    tracing::debug!(path = %target.display(), rows = table.len() + predicted.len(), "wrote forecast");
    Ok(target)
}

/// Permission problems on the output tree abort the run; anything else only
/// costs the current file.
fn create_dir_error(dir: &Path, e: io::Error) -> DataError {
    match e.kind() {
        io::ErrorKind::PermissionDenied => DataError::Permission {
            path: dir.to_path_buf(),
            source: e,
        },
        _ => DataError::io(dir, e),
    }
}

fn write_contents<W: Write>(
    out: &mut W,
    table: &PriceTable,
    predicted: &[PredictedRow],
) -> io::Result<()> {
    let eol = table.line_ending.as_str();
    write!(out, "{}{eol}", table.header_raw)?;
    for row in &table.rows {
        write!(out, "{}{eol}", row.raw)?;
    }

    let terminator = match table.line_ending {
        LineEnding::Lf => csv::Terminator::Any(b'\n'),
        LineEnding::CrLf => csv::Terminator::CRLF,
    };
    let mut csv_out = csv::WriterBuilder::new()
        .terminator(terminator)
        .from_writer(out);
    for row in predicted {
        csv_out.write_record(&row.fields)?;
    }
    csv_out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::reader::parse_price_table;

    const INPUT: &str = "date,open,high,low,close,volume\n\
                         2024-01-02,10.0,11.0,9.5,10.50,1000\n\
                         2024-01-03,10.5,12.0,10.1,11.75,1200\n";

    fn table() -> PriceTable {
        parse_price_table(Path::new("NYSE/ACME.csv"), INPUT).unwrap()
    }

    fn exchange(name: &str) -> Exchange {
        Exchange::new(name.into(), Path::new("in").join(name), vec![])
    }

    #[test]
    fn writes_history_then_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let table = table();
        let predicted = table.predicted_rows(&[12.0, 12.5, 12.25]);

        let path = write_forecast(
            dir.path(),
            &exchange("NYSE"),
            OsStr::new("ACME.csv"),
            &table,
            &predicted,
        )
        .unwrap();
        assert_eq!(path, dir.path().join("NYSE").join("ACME.csv"));

        let written = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 1 + 2 + 3);
        assert!(written.starts_with(INPUT));
        assert_eq!(lines[3], "2024-01-04,11.75,12.00,11.75,12.00,1200");
        assert_eq!(lines[5], "2024-01-06,12.50,12.50,12.25,12.25,1200");
    }

    #[test]
    fn overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let exchange_dir = dir.path().join("NYSE");
        fs::create_dir_all(&exchange_dir).unwrap();
        fs::write(exchange_dir.join("ACME.csv"), "stale").unwrap();

        let table = table();
        let predicted = table.predicted_rows(&[1.0, 2.0, 3.0]);
        write_forecast(
            dir.path(),
            &exchange("NYSE"),
            OsStr::new("ACME.csv"),
            &table,
            &predicted,
        )
        .unwrap();

        let written = fs::read_to_string(exchange_dir.join("ACME.csv")).unwrap();
        assert!(!written.contains("stale"));
        // No temporary files left behind.
        assert_eq!(fs::read_dir(&exchange_dir).unwrap().count(), 1);
    }

    #[test]
    fn preserves_crlf_line_endings() {
        let dir = tempfile::tempdir().unwrap();
        let table =
            parse_price_table(Path::new("x.csv"), "date,close\r\n2024-01-02,5.00\r\n").unwrap();
        let predicted = table.predicted_rows(&[5.1, 5.2, 5.3]);
        let path = write_forecast(
            dir.path(),
            &exchange("LSE"),
            OsStr::new("x.csv"),
            &table,
            &predicted,
        )
        .unwrap();

        let written = fs::read_to_string(path).unwrap();
        assert_eq!(
            written,
            "date,close\r\n2024-01-02,5.00\r\n2024-01-03,5.10\r\n2024-01-04,5.20\r\n2024-01-05,5.30\r\n"
        );
    }

    #[test]
    fn output_dir_blocked_by_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("NYSE"), "not a directory").unwrap();
        let table = table();
        let err = write_forecast(
            dir.path(),
            &exchange("NYSE"),
            OsStr::new("ACME.csv"),
            &table,
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, DataError::Io { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn permission_denied_on_output_dir_is_fatal() {
        let dir = Path::new("out/NYSE");
        let err = create_dir_error(dir, io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, DataError::Permission { ref path, .. } if path == dir));
        assert!(err.is_fatal());

        let err = create_dir_error(dir, io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, DataError::Io { .. }));
        assert!(!err.is_fatal());
    }

    #[cfg(unix)]
    #[test]
    fn output_mode_matches_a_plain_write() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let table = table();
        let predicted = table.predicted_rows(&[1.0, 2.0, 3.0]);
        let path = write_forecast(
            dir.path(),
            &exchange("NYSE"),
            OsStr::new("ACME.csv"),
            &table,
            &predicted,
        )
        .unwrap();

        let plain = dir.path().join("NYSE").join("plain.csv");
        fs::write(&plain, INPUT).unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&path), mode(&plain));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_mirrored_exactly() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let exchange_name = OsStr::from_bytes(b"EX\xff");
        let file_name = OsStr::from_bytes(b"AC\xfeME.csv");
        let exchange = Exchange::new(
            exchange_name.to_os_string(),
            Path::new("in").join(exchange_name),
            vec![],
        );
        let table = table();

        let path = write_forecast(dir.path(), &exchange, file_name, &table, &[]).unwrap();
        assert_eq!(path, dir.path().join(exchange_name).join(file_name));
        assert!(path.is_file());
    }
}
