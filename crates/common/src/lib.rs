//! Explicit clocks, id generation and logging setup for the Ledgerflow
//! trading engine.

pub mod clock;
pub mod ids;
pub mod logging;

pub use clock::{Clock, LiveClock, TestClock};
pub use ids::{ClientOidGenerator, DeterministicClientOidGenerator, RandomClientOidGenerator};
