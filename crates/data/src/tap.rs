//! Deterministic synthetic price-walk generator.

use ledgerflow_core::{Duration, Instant, TimeRange};
use ledgerflow_model::types::Price;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::scan::PriceTick;

/// Construction parameters for a [`PriceTap`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PriceTapConfig {
    pub range: TimeRange,
    pub step: Duration,
    pub p0: f64,
    pub drift: f64,
    pub volatility: f64,
    pub seed: u64,
    pub precision: u8,
}

/// A deterministic generator of `(Instant, Price)` pairs over a `TimeRange`
/// aligned to `step`. Carries its own seeded RNG state rather than touching
/// a thread-local or global RNG, so two taps built from the same config
/// produce byte-identical output.
pub struct PriceTap {
    rng: StdRng,
    next_instant: Instant,
    end: Instant,
    step: Duration,
    last_price: f64,
    drift: f64,
    volatility: f64,
    precision: u8,
    emitted: u64,
    total: u64,
}

impl PriceTap {
    pub fn new(config: PriceTapConfig) -> Self {
        let start_aligned = config.range.start.floor(config.step);
        let total = if config.step.is_zero() {
            0
        } else {
            config.range.end.checked_sub(start_aligned).map_or(0, |d| d.as_micros() / config.step.as_micros())
        };
        PriceTap {
            rng: StdRng::seed_from_u64(config.seed),
            next_instant: start_aligned,
            end: config.range.end,
            step: config.step,
            last_price: config.p0,
            drift: config.drift,
            volatility: config.volatility,
            precision: config.precision,
            emitted: 0,
            total,
        }
    }

    /// Exactly `floor((range.end - floor(range.start, step)) / step)` per P2.
    pub fn expected_len(&self) -> u64 {
        self.total
    }
}

impl Iterator for PriceTap {
    type Item = PriceTick;

    fn next(&mut self) -> Option<PriceTick> {
        if self.emitted >= self.total || self.next_instant >= self.end {
            return None;
        }
        let step_fraction = self.step.as_micros() as f64 / Duration::from_secs(1).as_micros() as f64;
        let epsilon: f64 = self.rng.random_range(-1.0..=1.0);
        let price = if self.emitted == 0 {
            self.last_price
        } else {
            self.last_price * (1.0 + self.drift * step_fraction + self.volatility * epsilon)
        };
        let price = price.max(0.0);
        self.last_price = price;

        let instant = self.next_instant;
        self.next_instant = instant + self.step;
        self.emitted += 1;

        Some(PriceTick {
            instant,
            price: Price::new(price, self.precision).unwrap_or(Price::zero(self.precision)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> PriceTapConfig {
        PriceTapConfig {
            range: TimeRange::new(Instant::EPOCH, Instant::EPOCH + Duration::from_mins(10)).unwrap(),
            step: Duration::from_mins(5),
            p0: 100.0,
            drift: 0.0,
            volatility: 0.01,
            seed,
            precision: 4,
        }
    }

    // Strictly increasing instants, each adjacent pair differs by exactly `step`.
    #[test]
    fn instants_are_strictly_monotonic_by_step() {
        let tap = PriceTap::new(config(1));
        let instants: Vec<Instant> = tap.map(|t| t.instant).collect();
        for window in instants.windows(2) {
            assert_eq!(window[1].checked_sub(window[0]), Some(Duration::from_mins(5)));
        }
    }

    // Exactly floor((end - floor(start, step)) / step) samples.
    #[test]
    fn cardinality_matches_formula() {
        let tap = PriceTap::new(config(1));
        let count = tap.count();
        assert_eq!(count, 2);
    }

    #[test]
    fn two_day_five_minute_range_emits_576_samples() {
        let cfg = PriceTapConfig {
            range: TimeRange::new(Instant::EPOCH, Instant::EPOCH + Duration::from_secs(2 * 24 * 3600)).unwrap(),
            step: Duration::from_mins(5),
            ..config(1)
        };
        let tap = PriceTap::new(cfg);
        assert_eq!(tap.expected_len(), 576);
        assert_eq!(tap.count(), 576);
    }

    #[test]
    fn same_seed_is_reproducible() {
        let a: Vec<f64> = PriceTap::new(config(7)).map(|t| t.price.as_f64()).collect();
        let b: Vec<f64> = PriceTap::new(config(7)).map(|t| t.price.as_f64()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a: Vec<f64> = PriceTap::new(config(1)).map(|t| t.price.as_f64()).collect();
        let b: Vec<f64> = PriceTap::new(config(2)).map(|t| t.price.as_f64()).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn first_sample_starts_at_floored_range_start() {
        let cfg = PriceTapConfig {
            range: TimeRange::new(Instant::from_micros(1), Instant::EPOCH + Duration::from_mins(20)).unwrap(),
            ..config(1)
        };
        let tap = PriceTap::new(cfg);
        let first = tap.into_iter().next().unwrap();
        assert_eq!(first.instant, Instant::EPOCH);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Monotonicity and cardinality against arbitrary (start, step, sample count, seed).
        #[test]
        fn tap_is_monotonic_and_matches_cardinality_formula(
            start_secs in 0i64..1_000_000,
            step_mins in 1u64..120,
            n_steps in 1u64..500,
            seed in any::<u64>(),
        ) {
            let step = Duration::from_mins(step_mins);
            let start = Instant::EPOCH + Duration::from_secs(start_secs.unsigned_abs());
            let end = start + step * n_steps;
            let cfg = PriceTapConfig {
                range: TimeRange::new(start, end).unwrap(),
                step,
                p0: 100.0,
                drift: 0.0,
                volatility: 0.02,
                seed,
                precision: 4,
            };

            let start_floor = start.floor(step);
            let expected_len = (end.as_micros() - start_floor.as_micros()) as u64 / step.as_micros();

            let instants: Vec<Instant> = PriceTap::new(cfg).map(|t| t.instant).collect();
            prop_assert_eq!(instants.len() as u64, expected_len);
            for window in instants.windows(2) {
                prop_assert_eq!(window[1].checked_sub(window[0]), Some(step));
            }
        }
    }
}
