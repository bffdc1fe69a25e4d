//! Domain model for the Ledgerflow trading engine: fixed-point price/quantity
//! types, the incremental order book, ladder projection, and candle/bar
//! value types.

pub mod data;
pub mod enums;
pub mod identifiers;
pub mod orderbook;
pub mod types;

#[cfg(feature = "stubs")]
pub mod stubs;

pub use data::{Bar, Candle, Delta};
pub use enums::{ChangePolicy, OrderSide, RoundingMode};
pub use identifiers::{InstrumentId, OrderId};
pub use orderbook::{Ladder, LadderLevel, OrderBook, OrderBookError};
pub use types::{Price, Quantity};
