use ledgerflow_core::{Duration, Instant};

use super::candle::Candle;

/// A [`Candle`] paired with an explicit end time, suitable for indicator
/// libraries that expect `begin`/`end` framing rather than a bare start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub candle: Candle,
    pub end: Instant,
}

impl Bar {
    /// For a candle with step `d`: `end = candle.instant + d`.
    pub fn from_candle(candle: Candle, step: Duration) -> Self {
        Bar { end: candle.instant + step, candle }
    }

    pub fn begin(&self) -> Instant {
        self.candle.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Price, Quantity};

    #[test]
    fn end_is_instant_plus_step() {
        let candle = Candle::new_checked(
            Instant::from_micros(0),
            Price::new(1.0, 2).unwrap(),
            Price::new(1.0, 2).unwrap(),
            Price::new(1.0, 2).unwrap(),
            Price::new(1.0, 2).unwrap(),
            Quantity::zero(4),
        )
        .unwrap();
        let step = Duration::from_mins(30);
        let bar = Bar::from_candle(candle, step);
        assert_eq!(bar.begin(), Instant::from_micros(0));
        assert_eq!(bar.end, Instant::from_micros(0) + step);
    }
}
