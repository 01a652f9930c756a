//! Structured error types for data operations.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse error in {} at line {line}: {reason}", path.display())]
    Parse {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("permission denied creating {}: {source}", path.display())]
    Permission {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DataError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse(path: &Path, line: u64, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }

    /// Errors that make every later file fail the same way.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Permission { .. })
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } | Self::Permission { path, .. } => {
                path
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_permission_errors_are_fatal() {
        let p = Path::new("out/NYSE");
        assert!(!DataError::io(p, io::Error::from(io::ErrorKind::NotFound)).is_fatal());
        assert!(!DataError::parse(p, 3, "bad close").is_fatal());
        assert!(DataError::Permission {
            path: p.to_path_buf(),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        }
        .is_fatal());
    }

    #[test]
    fn parse_error_message_names_file_and_line() {
        let err = DataError::parse(Path::new("in/NYSE/AAPL.csv"), 7, "non-numeric close 'abc'");
        assert_eq!(
            err.to_string(),
            "parse error in in/NYSE/AAPL.csv at line 7: non-numeric close 'abc'"
        );
        assert_eq!(err.path(), Path::new("in/NYSE/AAPL.csv"));
    }
}
