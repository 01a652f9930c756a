//! Exchange — one top-level directory of the input tree.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// A stock exchange directory and the CSV files found directly inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// Display name, lossily decoded from `dir_name`.
    pub name: String,
    /// Directory name exactly as found on disk.
    pub dir_name: OsString,
    pub path: PathBuf,
    /// CSV files sorted by file name. May be empty.
    pub files: Vec<PathBuf>,
}

impl Exchange {
    pub fn new(dir_name: OsString, path: PathBuf, files: Vec<PathBuf>) -> Self {
        Self {
            name: dir_name.to_string_lossy().into_owned(),
            dir_name,
            path,
            files,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Output directory for this exchange under `output_root`.
    pub fn mirrored_dir(&self, output_root: &Path) -> PathBuf {
        output_root.join(&self.dir_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirrored_dir_reuses_exchange_name() {
        let exchange = Exchange::new("NYSE".into(), PathBuf::from("/data/in/NYSE"), vec![]);
        assert!(exchange.is_empty());
        assert_eq!(exchange.name, "NYSE");
        assert_eq!(
            exchange.mirrored_dir(Path::new("/data/out")),
            PathBuf::from("/data/out/NYSE")
        );
    }

    #[cfg(unix)]
    #[test]
    fn mirrored_dir_keeps_non_utf8_names_intact() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"EX\xff");
        let exchange = Exchange::new(raw.to_os_string(), Path::new("/in").join(raw), vec![]);
        assert_eq!(exchange.name, "EX\u{fffd}");
        assert_eq!(
            exchange.mirrored_dir(Path::new("/out")).file_name(),
            Some(raw)
        );
    }
}
