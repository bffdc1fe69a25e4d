use std::fmt;
use std::ops::{Add, Sub};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::duration::Duration;

/// Absolute time as signed microseconds since the Unix epoch.
///
/// All ordering and arithmetic internal to the core happens in microseconds;
/// sub-microsecond sources are truncated before reaching this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Instant(i64);

impl Instant {
    pub const EPOCH: Instant = Instant(0);
    pub const MAX: Instant = Instant(i64::MAX);
    pub const MIN: Instant = Instant(i64::MIN);

    pub const fn from_micros(micros: i64) -> Self {
        Instant(micros)
    }

    pub const fn as_micros(self) -> i64 {
        self.0
    }

    /// `floor(t, step)`: the latest instant `<= self` that `step` divides.
    ///
    /// `step` of zero is a no-op (avoids a division by zero).
    pub fn floor(self, step: Duration) -> Instant {
        let step = step.as_micros() as i64;
        if step == 0 {
            return self;
        }
        let rem = self.0.rem_euclid(step);
        Instant(self.0 - rem)
    }

    /// Whether `step` divides `self`, i.e. `self mod step == 0`.
    pub fn is_aligned_to(self, step: Duration) -> bool {
        self.floor(step) == self
    }

    pub fn checked_sub(self, rhs: Instant) -> Option<Duration> {
        if self.0 < rhs.0 {
            None
        } else {
            Some(Duration::from_micros((self.0 - rhs.0) as u64))
        }
    }

    /// Converts to a UTC `chrono` timestamp, for display and host-binary logging.
    pub fn to_datetime_utc(self) -> DateTime<Utc> {
        DateTime::from_timestamp_micros(self.0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}us", self.0)
    }
}

impl Add<Duration> for Instant {
    type Output = Instant;
    fn add(self, rhs: Duration) -> Instant {
        Instant(self.0 + rhs.as_micros() as i64)
    }
}

impl Sub<Duration> for Instant {
    type Output = Instant;
    fn sub(self, rhs: Duration) -> Instant {
        Instant(self.0 - rhs.as_micros() as i64)
    }
}

/// Panics if `rhs > self`; use [`Instant::checked_sub`] when that is possible.
impl Sub for Instant {
    type Output = Duration;
    fn sub(self, rhs: Instant) -> Duration {
        self.checked_sub(rhs)
            .expect("Instant subtraction produced a negative duration")
    }
}

impl From<i64> for Instant {
    fn from(value: i64) -> Self {
        Instant(value)
    }
}

impl From<Instant> for i64 {
    fn from(value: Instant) -> Self {
        value.0
    }
}
