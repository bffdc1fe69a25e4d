//! Test fixture constructors shared across crates, gated behind the
//! `stubs` feature. Downstream crates depend on `ledgerflow-model` with
//! `features = ["stubs"]` in `[dev-dependencies]`-equivalent position so
//! these never leak into a release build of a consumer that forgets to
//! disable them.

use ledgerflow_core::Instant;

use crate::data::order::BookOrder;
use crate::enums::{ChangePolicy, OrderSide};
use crate::identifiers::{InstrumentId, OrderId};
use crate::orderbook::OrderBook;
use crate::types::{Price, Quantity};

pub fn instrument_id() -> InstrumentId {
    InstrumentId::new("BTC-USD")
}

pub fn book_order(id: &str, side: OrderSide, price: f64, size: f64) -> BookOrder {
    BookOrder::new(
        side,
        Price::new(price, 2).expect("stub price"),
        Quantity::new(size, 4).expect("stub quantity"),
        OrderId::new(id),
    )
}

/// An empty book, ready for `open`/`update` calls in a test.
pub fn empty_book() -> OrderBook {
    OrderBook::new(instrument_id(), ChangePolicy::AlwaysReinsert)
}

/// A book with a two-level ask ladder and a single bid, reused across
/// several crates' tests.
pub fn book_with_two_asks_and_a_bid() -> OrderBook {
    let mut book = empty_book();
    book.open(OrderId::new("ask1"), Price::new(100.0, 2).unwrap(), Quantity::new(1.0, 4).unwrap(), OrderSide::Sell)
        .expect("stub open");
    book.open(OrderId::new("ask2"), Price::new(101.0, 2).unwrap(), Quantity::new(2.0, 4).unwrap(), OrderSide::Sell)
        .expect("stub open");
    book.open(OrderId::new("bid1"), Price::new(99.0, 2).unwrap(), Quantity::new(1.5, 4).unwrap(), OrderSide::Buy)
        .expect("stub open");
    book
}

pub fn epoch() -> Instant {
    Instant::EPOCH
}
