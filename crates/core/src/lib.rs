//! Time primitives and correctness-check helpers shared by every Ledgerflow crate.

pub mod correctness;
pub mod time;

pub use time::{Duration, Instant, TimeRange};
