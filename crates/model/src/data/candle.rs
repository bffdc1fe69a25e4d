use ledgerflow_core::Instant;
use thiserror::Error;

use crate::types::{Price, Quantity};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CandleError {
    #[error("high ({high}) must be >= open ({open}), close ({close}) and low ({low})")]
    HighTooLow { high: Price, open: Price, close: Price, low: Price },
    #[error("low ({low}) must be <= open ({open}), close ({close}) and high ({high})")]
    LowTooHigh { low: Price, open: Price, close: Price, high: Price },
}

/// An OHLCV bucket over a fixed interval aligned to the interval size.
///
/// Carries only the bucket's start instant; pair with an explicit step to
/// get an end time, which is what [`super::bar::Bar`] does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub instant: Instant,
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    pub volume: Quantity,
}

impl Candle {
    pub fn new_checked(
        instant: Instant,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: Quantity,
    ) -> Result<Self, CandleError> {
        if high < open || high < close || high < low {
            return Err(CandleError::HighTooLow { high, open, close, low });
        }
        if low > open || low > close {
            return Err(CandleError::LowTooHigh { low, open, close, high });
        }
        Ok(Candle { instant, open, high, low, close, volume })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(v: f64) -> Price {
        Price::new(v, 2).unwrap()
    }

    #[test]
    fn rejects_high_below_close() {
        let err = Candle::new_checked(
            Instant::EPOCH,
            price(10.0),
            price(10.0),
            price(5.0),
            price(15.0),
            Quantity::zero(4),
        )
        .unwrap_err();
        assert!(matches!(err, CandleError::HighTooLow { .. }));
    }

    #[test]
    fn rejects_low_above_open() {
        let err = Candle::new_checked(
            Instant::EPOCH,
            price(5.0),
            price(20.0),
            price(10.0),
            price(15.0),
            Quantity::zero(4),
        )
        .unwrap_err();
        assert!(matches!(err, CandleError::LowTooHigh { .. }));
    }

    #[test]
    fn accepts_consistent_ohlc() {
        assert!(Candle::new_checked(
            Instant::EPOCH,
            price(10.0),
            price(20.0),
            price(5.0),
            price(15.0),
            Quantity::zero(4),
        )
        .is_ok());
    }
}
