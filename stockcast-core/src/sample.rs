//! Uniform sampling of files per exchange and of history windows.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::PathBuf;

/// Pick `min(n, files.len())` distinct files uniformly at random, without
/// replacement. The order of the returned files is unspecified.
pub fn sample_files<R: Rng + ?Sized>(files: &[PathBuf], n: usize, rng: &mut R) -> Vec<PathBuf> {
    files.choose_multiple(rng, n).cloned().collect()
}

/// Which historical rows of a file are kept in its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryWindow {
    /// Every row.
    #[default]
    Full,
    /// A contiguous run of `rows` rows starting at a uniformly random offset.
    /// Files shorter than `rows` are kept whole.
    Random { rows: usize },
}

impl HistoryWindow {
    /// Row range to keep out of `total` rows.
    pub fn select<R: Rng + ?Sized>(&self, total: usize, rng: &mut R) -> Range<usize> {
        match *self {
            Self::Full => 0..total,
            Self::Random { rows } if rows == 0 || total <= rows => 0..total,
            Self::Random { rows } => {
                let start = rng.gen_range(0..=total - rows);
                start..start + rows
            }
        }
    }
}
