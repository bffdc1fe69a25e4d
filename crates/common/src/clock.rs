//! Explicit, non-global clocks.
//!
//! A `Clock` is passed in at construction time rather than reached for as
//! a global singleton. The tick loop only ever needs "what time is it
//! now" and, for backtests, "advance to this instant" — no named timer or
//! alert registry.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use ledgerflow_core::Instant;

/// A source of "now" for a session. Implementations are owned values passed
/// explicitly at construction time; there is no global default.
pub trait Clock: std::fmt::Debug + Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock time, for live trading.
#[derive(Debug, Default, Clone, Copy)]
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> Instant {
        let micros = Utc::now().timestamp_micros();
        Instant::from_micros(micros)
    }
}

/// A manually-advanced clock for backtests and tests.
///
/// Its current value is the timestamp of the last market-data item fed
/// into the simulator, or the last tick instant if later (`advance_to`
/// takes the max of the two, so callers can feed both sources without
/// tracking the monotonicity invariant themselves).
#[derive(Debug)]
pub struct TestClock {
    micros: AtomicI64,
}

impl TestClock {
    pub fn new(start: Instant) -> Self {
        TestClock { micros: AtomicI64::new(start.as_micros()) }
    }

    /// Advances the clock to `instant` if it is later than the current
    /// value; otherwise leaves it unchanged, so session time is strictly
    /// non-decreasing.
    pub fn advance_to(&self, instant: Instant) {
        self.micros.fetch_max(instant.as_micros(), Ordering::SeqCst);
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        Instant::from_micros(self.micros.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_clock_starts_at_given_instant() {
        let clock = TestClock::new(Instant::from_micros(42));
        assert_eq!(clock.now(), Instant::from_micros(42));
    }

    #[test]
    fn advance_to_only_moves_forward() {
        let clock = TestClock::new(Instant::from_micros(10));
        clock.advance_to(Instant::from_micros(5));
        assert_eq!(clock.now(), Instant::from_micros(10));
        clock.advance_to(Instant::from_micros(20));
        assert_eq!(clock.now(), Instant::from_micros(20));
    }

    #[test]
    fn live_clock_is_plausible() {
        let clock = LiveClock;
        let before = Utc::now().timestamp_micros();
        let now = clock.now().as_micros();
        assert!(now >= before);
    }
}
