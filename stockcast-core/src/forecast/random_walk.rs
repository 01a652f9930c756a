//! Bounded random walk — each step moves at most `max_change_pct` percent.

use super::{round_to, Forecaster, PREDICTION_HORIZON};
use rand::{Rng, RngCore};

/// `p_k = p_{k-1} * (1 + u_k)`, `u_k ~ U[-b, b]`, `b = max_change_pct / 100`,
/// starting from the last historical close.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    pub max_change_pct: f64,
}

impl RandomWalk {
    pub fn new(max_change_pct: f64) -> Self {
        Self { max_change_pct }
    }
}

impl Forecaster for RandomWalk {
    fn name(&self) -> &str {
        "random_walk"
    }

    fn forecast(
        &self,
        closes: &[f64],
        precision: usize,
        rng: &mut dyn RngCore,
    ) -> [f64; PREDICTION_HORIZON] {
        let bound = self.max_change_pct.abs() / 100.0;
        let mut previous = closes.last().copied().unwrap_or_default();
        let mut out = [0.0; PREDICTION_HORIZON];
        for slot in &mut out {
            let change = if bound > 0.0 {
                rng.gen_range(-bound..=bound)
            } else {
                0.0
            };
            previous = round_to(previous * (1.0 + change), precision);
            *slot = previous;
        }
        out
    }
}
