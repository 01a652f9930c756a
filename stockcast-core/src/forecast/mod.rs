//! Forecasters — extrapolate a short chain of future closes from history.
//!
//! Every forecaster returns exactly [`PREDICTION_HORIZON`] values, each derived
//! from the one before it. Values are rounded to the requested precision
//! before the next step is computed, so the chain is exactly what gets written.

pub mod pullback;
pub mod random_walk;

pub use pullback::Pullback;
pub use random_walk::RandomWalk;

use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Number of predicted rows appended to every output file.
pub const PREDICTION_HORIZON: usize = 3;

/// Default bound for one random-walk step, in percent.
pub const DEFAULT_MAX_CHANGE_PCT: f64 = 2.0;

/// Upper bound accepted for `max_change_pct`.
pub const MAX_CHANGE_PCT_LIMIT: f64 = 50.0;

/// Trait for forecasters.
pub trait Forecaster: Send + Sync {
    /// Human-readable name (e.g., "random_walk").
    fn name(&self) -> &str;

    /// Predict the next closes from `closes` (oldest first, never empty),
    /// rounding every step to `precision` decimal places.
    fn forecast(
        &self,
        closes: &[f64],
        precision: usize,
        rng: &mut dyn RngCore,
    ) -> [f64; PREDICTION_HORIZON];
}

/// Serializable forecaster selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ForecastMethod {
    /// Bounded random walk from the last close.
    RandomWalk { max_change_pct: f64 },
    /// Retrace toward the window's second-highest close.
    Pullback,
}

impl Default for ForecastMethod {
    fn default() -> Self {
        Self::RandomWalk {
            max_change_pct: DEFAULT_MAX_CHANGE_PCT,
        }
    }
}

impl ForecastMethod {
    /// Check parameters; returns a human-readable reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        match *self {
            Self::RandomWalk { max_change_pct }
                if !(max_change_pct.is_finite()
                    && max_change_pct > 0.0
                    && max_change_pct <= MAX_CHANGE_PCT_LIMIT) =>
            {
                Err(format!(
                    "max change must be in (0, {MAX_CHANGE_PCT_LIMIT}] percent, got {max_change_pct}"
                ))
            }
            _ => Ok(()),
        }
    }

    pub fn create(&self) -> Box<dyn Forecaster> {
        match *self {
            Self::RandomWalk { max_change_pct } => Box::new(RandomWalk::new(max_change_pct)),
            Self::Pullback => Box::new(Pullback),
        }
    }
}

/// Round half away from zero to `precision` decimal places.
pub fn round_to(value: f64, precision: usize) -> f64 {
    let scale = 10f64.powi(precision.min(12) as i32);
    (value * scale).round() / scale
}
