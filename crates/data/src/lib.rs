//! Time-series aggregation and synthetic market data generation.

pub mod scan;
pub mod tap;

pub use scan::{scan, PriceTick, Scan, ScanInput, ScanOptions, ScanOutput, TradeTick};
pub use tap::{PriceTap, PriceTapConfig};
