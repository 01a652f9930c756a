//! Exchange walker — lazily enumerates `<input>/<exchange>/*.csv`.

use super::error::DataError;
use crate::domain::Exchange;
use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};

/// Open `input_dir` and return a lazy iterator over its exchanges.
///
/// Fails only if the input directory itself cannot be read. Per-exchange
/// failures surface as `Err` items from the iterator.
pub fn walk_exchanges(input_dir: &Path) -> Result<ExchangeWalker, DataError> {
    let entries = fs::read_dir(input_dir).map_err(|e| DataError::io(input_dir, e))?;
    Ok(ExchangeWalker {
        root: input_dir.to_path_buf(),
        entries,
    })
}

/// Iterator over the immediate subdirectories of the input root.
///
/// Enumeration order follows the filesystem and is not meaningful.
#[derive(Debug)]
pub struct ExchangeWalker {
    root: PathBuf,
    entries: ReadDir,
}

impl Iterator for ExchangeWalker {
    type Item = Result<Exchange, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(DataError::io(&self.root, e))),
            };
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let dir_name = entry.file_name();
            return Some(list_csv_files(&path).map(|files| Exchange::new(dir_name, path, files)));
        }
    }
}

/// CSV files directly inside `dir`, sorted by file name. No recursion.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>, DataError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| DataError::io(dir, e))? {
        let path = entry.map_err(|e| DataError::io(dir, e))?.path();
        if path.is_file() && has_csv_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_csv_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
