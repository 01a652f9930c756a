//! Pullback — retrace from the window's second-highest close toward the last one.
//!
//! `p1` is the second-highest distinct close (the only close when all are
//! equal), `p2` closes half the gap back to the last close, and `p3` moves a
//! quarter of the way back toward `p1`. Every value stays inside the range of
//! the history window.

use super::{round_to, Forecaster, PREDICTION_HORIZON};
use rand::RngCore;

#[derive(Debug, Clone, Copy, Default)]
pub struct Pullback;

impl Forecaster for Pullback {
    fn name(&self) -> &str {
        "pullback"
    }

    fn forecast(
        &self,
        closes: &[f64],
        precision: usize,
        _rng: &mut dyn RngCore,
    ) -> [f64; PREDICTION_HORIZON] {
        let last = closes.last().copied().unwrap_or_default();

        let mut distinct: Vec<f64> = closes.to_vec();
        distinct.sort_by(|a, b| b.total_cmp(a));
        distinct.dedup();
        let anchor = distinct.get(1).or(distinct.first()).copied().unwrap_or(last);

        let p1 = round_to(anchor, precision);
        let p2 = round_to(p1 + (last - p1) / 2.0, precision);
        let p3 = round_to(p2 + (p1 - p2) / 4.0, precision);
        [p1, p2, p3]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn forecast(closes: &[f64]) -> [f64; PREDICTION_HORIZON] {
        Pullback.forecast(closes, 2, &mut StdRng::seed_from_u64(0))
    }

    #[test]
    fn retraces_from_second_highest() {
        assert_eq!(forecast(&[10.0, 20.0, 15.0, 12.0]), [15.0, 13.5, 13.88]);
    }

    #[test]
    fn duplicates_do_not_count_twice() {
        // Distinct closes: 20, 18, 10. Second highest is 18.
        assert_eq!(forecast(&[20.0, 20.0, 18.0, 10.0]), [18.0, 14.0, 15.0]);
    }

    #[test]
    fn flat_history_stays_flat() {
        assert_eq!(forecast(&[7.25, 7.25, 7.25]), [7.25, 7.25, 7.25]);
        assert_eq!(forecast(&[3.0]), [3.0, 3.0, 3.0]);
    }

    #[test]
    fn stays_within_window_range() {
        let closes = [101.3, 99.8, 104.1, 102.7, 100.2, 98.9, 103.5];
        let lo = closes.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for v in forecast(&closes) {
            assert!((lo..=hi).contains(&v), "{v} outside [{lo}, {hi}]");
        }
    }
}
