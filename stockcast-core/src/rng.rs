//! Random source for a run.
//!
//! Production runs draw their seed from OS entropy, so repeated runs may pick
//! different files and predictions. Passing a seed makes a run reproducible.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Seeded `StdRng` when `seed` is given, entropy-seeded otherwise.
pub fn run_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
