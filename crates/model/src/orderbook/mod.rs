mod error;
mod ladder;
mod level;

use std::collections::BTreeMap;

use ahash::AHashMap;

pub use error::OrderBookError;
pub use ladder::{Ladder, LadderLevel};
pub use level::BookLevel;

use crate::data::delta::Delta;
use crate::data::order::BookOrder;
use crate::enums::{ChangePolicy, OrderSide};
use crate::identifiers::{InstrumentId, OrderId};
use crate::types::{Price, Quantity};

/// An incremental, delta-driven limit order book.
///
/// `asks`/`bids` are `BTreeMap<Price, BookLevel>`: ascending iteration gives
/// asks best-first directly, and `.next_back()` gives the best (highest)
/// bid without a second reversed map.
#[derive(Debug, Clone)]
pub struct OrderBook {
    pub instrument_id: InstrumentId,
    pub change_policy: ChangePolicy,
    bids: BTreeMap<Price, BookLevel>,
    asks: BTreeMap<Price, BookLevel>,
    by_id: AHashMap<OrderId, BookOrder>,
    sequence: u64,
    last_update: Option<Delta>,
}

impl OrderBook {
    pub fn new(instrument_id: InstrumentId, change_policy: ChangePolicy) -> Self {
        OrderBook {
            instrument_id,
            change_policy,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            by_id: AHashMap::new(),
            sequence: 0,
            last_update: None,
        }
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn last_update(&self) -> Option<&Delta> {
        self.last_update.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn contains(&self, id: OrderId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    fn side_map(&mut self, side: OrderSide) -> &mut BTreeMap<Price, BookLevel> {
        match side {
            OrderSide::Buy => &mut self.bids,
            OrderSide::Sell => &mut self.asks,
        }
    }

    /// Inserts a new resting order at the tail of its price bucket.
    ///
    /// Replaying an `Open` for an id already present is a caller contract
    /// violation; this surfaces it as `DuplicateOrderId` rather than
    /// silently corrupting state.
    pub fn open(
        &mut self,
        id: OrderId,
        price: Price,
        size: Quantity,
        side: OrderSide,
    ) -> Result<(), OrderBookError> {
        if self.by_id.contains_key(&id) {
            return Err(OrderBookError::DuplicateOrderId(id));
        }
        let order = BookOrder::new(side, price, size, id);
        self.by_id.insert(id, order);
        self.side_map(side)
            .entry(price)
            .or_insert_with(|| BookLevel::new(price))
            .push_back(order);
        self.sequence += 1;
        Ok(())
    }

    /// Removes an order entirely. Unknown ids are silently ignored.
    pub fn done(&mut self, id: OrderId) {
        let Some(order) = self.by_id.remove(&id) else {
            return;
        };
        let levels = self.side_map(order.side);
        if let Some(level) = levels.get_mut(&order.price) {
            level.remove(id);
            if level.is_empty() {
                levels.remove(&order.price);
            }
        }
        self.sequence += 1;
    }

    /// Mutates an order's size in place. `id` must already exist.
    ///
    /// Per `change_policy`: `AlwaysReinsert` always moves the order to the
    /// tail of its bucket (reproducing the source's observable behavior
    /// byte-for-byte); `PreserveOnDecrease` only re-appends on a size
    /// *increase*, preserving time priority on a decrease as most venues do.
    pub fn change(&mut self, id: OrderId, new_size: Quantity) -> Result<(), OrderBookError> {
        let order = *self.by_id.get(&id).ok_or(OrderBookError::UnknownOrderId(id))?;
        let reinsert = match self.change_policy {
            ChangePolicy::AlwaysReinsert => true,
            ChangePolicy::PreserveOnDecrease => new_size > order.size,
        };
        let updated = order.with_size(new_size);
        self.by_id.insert(id, updated);
        let level = self
            .side_map(order.side)
            .get_mut(&order.price)
            .expect("price bucket must exist for a known order id");
        if reinsert {
            level.remove(id);
            level.push_back(updated);
        } else {
            level.replace_in_place(updated);
        }
        self.sequence += 1;
        Ok(())
    }

    /// Applies a `Delta`, recording it as `last_update`.
    pub fn update(&mut self, delta: Delta) -> Result<(), OrderBookError> {
        match delta {
            Delta::Open { id, price, size, side } => self.open(id, price, size, side)?,
            Delta::Done { id } => self.done(id),
            Delta::Change { id, new_size } => self.change(id, new_size)?,
        }
        self.last_update = Some(delta);
        Ok(())
    }

    pub fn best_bid_price(&self) -> Option<Price> {
        self.bids.keys().next_back().copied()
    }

    pub fn best_ask_price(&self) -> Option<Price> {
        self.asks.keys().next().copied()
    }

    /// Runtime assertion that order counts agree with the by-id index, no
    /// price bucket is left empty, and the book isn't crossed; a violation
    /// means a delta stream has corrupted the book.
    pub fn check_integrity(&self) -> Result<(), OrderBookError> {
        let total_in_levels: usize =
            self.bids.values().map(BookLevel::len).sum::<usize>() + self.asks.values().map(BookLevel::len).sum::<usize>();
        if total_in_levels != self.by_id.len() {
            return Err(OrderBookError::InvariantViolation(format!(
                "order count mismatch: {total_in_levels} in levels vs {} in by_id",
                self.by_id.len()
            )));
        }
        if self.bids.values().any(BookLevel::is_empty) || self.asks.values().any(BookLevel::is_empty) {
            return Err(OrderBookError::InvariantViolation("empty price bucket retained".into()));
        }
        if let (Some(bid), Some(ask)) = (self.best_bid_price(), self.best_ask_price()) {
            if bid >= ask {
                return Err(OrderBookError::InvariantViolation(format!(
                    "crossed book: best_bid {bid} >= best_ask {ask}"
                )));
            }
        }
        Ok(())
    }

    /// `best_ask - best_bid`, or `None` if either side is empty.
    pub fn spread(&self) -> Result<Option<Price>, OrderBookError> {
        self.check_integrity()?;
        match (self.best_bid_price(), self.best_ask_price()) {
            (Some(bid), Some(ask)) => Ok(Some(ask - bid)),
            _ => Ok(None),
        }
    }

    /// Projects the book onto a fixed depth: the top `depth` price levels
    /// on each side, best price first, with each level's resting orders
    /// summed into a single size.
    pub fn ladder(&self, depth: usize) -> Ladder {
        let bids = self
            .bids
            .iter()
            .rev()
            .take(depth)
            .map(|(price, level)| LadderLevel { price: *price, size: level.total_size() })
            .collect();
        let asks = self
            .asks
            .iter()
            .take(depth)
            .map(|(price, level)| LadderLevel { price: *price, size: level.total_size() })
            .collect();
        Ladder::new(bids, asks)
    }

    /// All resting orders, bids then asks, each side in ascending price,
    /// each level in FIFO order. Used by `fold`/`unfold`.
    pub fn iter_orders(&self) -> impl Iterator<Item = BookOrder> + '_ {
        self.bids
            .values()
            .chain(self.asks.values())
            .flat_map(BookLevel::iter)
            .copied()
    }

    /// Matches `quantity` against the opposite side's ladder, best price
    /// first and FIFO within a level, mutating the book in place.
    ///
    /// Returns the sequence of `(price, size)` fills in match order. If the
    /// opposite side empties before `quantity` is filled, the partial fills
    /// are returned with no error.
    pub fn fill(
        &mut self,
        side: OrderSide,
        quantity: Quantity,
        limit: Option<Price>,
    ) -> Vec<(Price, Quantity)> {
        let resting_side = side.opposite();
        let mut remaining = quantity;
        let mut fills = Vec::new();

        loop {
            if remaining.is_zero() {
                break;
            }
            let best_price = match resting_side {
                OrderSide::Sell => self.best_ask_price(),
                OrderSide::Buy => self.best_bid_price(),
            };
            let Some(price) = best_price else {
                break;
            };
            if let Some(limit) = limit {
                let violates_limit = match side {
                    OrderSide::Buy => limit < price,
                    OrderSide::Sell => limit > price,
                };
                if violates_limit {
                    break;
                }
            }

            let ids: Vec<OrderId> = self
                .side_map(resting_side)
                .get(&price)
                .expect("best price must have a non-empty level")
                .iter()
                .map(|o| o.order_id)
                .collect();

            for id in ids {
                if remaining.is_zero() {
                    break;
                }
                let order = *self.by_id.get(&id).expect("level and by_id must agree");
                let consumed = remaining.min(order.size);
                fills.push((order.price, consumed));
                remaining = remaining.saturating_sub(consumed);
                if consumed == order.size {
                    self.done(id);
                } else {
                    let new_size = order.size.saturating_sub(consumed);
                    self.change(id, new_size)
                        .expect("id was just read from by_id, must still exist");
                }
            }
        }

        fills
    }
}

/// Replays each order of `b` as an `Open` against `a`. Used to rebuild a
/// book from a snapshot layered on top of a base state.
pub fn fold(a: &OrderBook, b: &OrderBook) -> Result<OrderBook, OrderBookError> {
    let mut result = a.clone();
    for order in b.iter_orders() {
        result.open(order.order_id, order.price, order.size, order.side)?;
    }
    Ok(result)
}

/// Pops one order from `book`, returning `(book_without_it,
/// Some(singleton_book))` until at most one order remains, then
/// `(book, None)`. Gives snapshot streaming a bounded chunk size.
pub fn unfold(mut book: OrderBook) -> (OrderBook, Option<OrderBook>) {
    if book.len() <= 1 {
        return (book, None);
    }
    let popped = book
        .iter_orders()
        .next()
        .expect("len() > 1 implies at least one order");
    book.done(popped.order_id);
    let mut singleton = OrderBook::new(book.instrument_id, book.change_policy);
    singleton
        .open(popped.order_id, popped.price, popped.size, popped.side)
        .expect("singleton book starts empty");
    (book, Some(singleton))
}
