use indexmap::IndexMap;

use crate::data::order::BookOrder;
use crate::identifiers::OrderId;
use crate::types::{Price, Quantity};

/// All resting orders at a single price, in price-time priority.
///
/// `orders` is an `IndexMap` so insertion order is preserved while still
/// allowing O(1) lookup/removal by id for `done`/`change`.
#[derive(Debug, Clone)]
pub struct BookLevel {
    pub price: Price,
    orders: IndexMap<OrderId, BookOrder>,
}

impl BookLevel {
    pub fn new(price: Price) -> Self {
        BookLevel {
            price,
            orders: IndexMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Appends at the tail, preserving price-time priority (I4).
    pub fn push_back(&mut self, order: BookOrder) {
        self.orders.insert(order.order_id, order);
    }

    pub fn remove(&mut self, id: OrderId) -> Option<BookOrder> {
        self.orders.shift_remove(&id)
    }

    /// Overwrites an existing order's value without moving its position.
    /// Relies on `IndexMap::insert` only appending for a key that is new;
    /// an existing key keeps its index.
    pub fn replace_in_place(&mut self, order: BookOrder) {
        self.orders.insert(order.order_id, order);
    }

    pub fn get(&self, id: OrderId) -> Option<&BookOrder> {
        self.orders.get(&id)
    }

    /// Orders in FIFO (price-time priority) order.
    pub fn iter(&self) -> impl Iterator<Item = &BookOrder> {
        self.orders.values()
    }

    pub fn total_size(&self) -> Quantity {
        let precision = self.orders.values().next().map_or(0, |o| o.size.precision());
        self.orders
            .values()
            .fold(Quantity::zero(precision), |acc, o| acc + o.size)
    }
}
