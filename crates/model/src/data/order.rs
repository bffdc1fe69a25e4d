use std::fmt;

use crate::enums::OrderSide;
use crate::identifiers::OrderId;
use crate::types::{Price, Quantity};

/// A single resting order on one side of the book.
///
/// Equality and hashing are keyed on `order_id` alone: two orders at the
/// same price/size but different ids are distinct resting orders.
#[derive(Debug, Clone, Copy)]
pub struct BookOrder {
    pub side: OrderSide,
    pub price: Price,
    pub size: Quantity,
    pub order_id: OrderId,
}

impl BookOrder {
    pub fn new(side: OrderSide, price: Price, size: Quantity, order_id: OrderId) -> Self {
        BookOrder {
            side,
            price,
            size,
            order_id,
        }
    }

    /// Notional exposure of this order: `price * size`.
    pub fn exposure(&self) -> rust_decimal::Decimal {
        self.price.as_decimal() * self.size.as_decimal()
    }

    /// Signed size: positive for a resting buy, negative for a resting sell.
    /// Useful for netting exposure across both sides of a book.
    pub fn signed_size(&self) -> rust_decimal::Decimal {
        match self.side {
            OrderSide::Buy => self.size.as_decimal(),
            OrderSide::Sell => -self.size.as_decimal(),
        }
    }

    pub fn with_size(&self, size: Quantity) -> Self {
        BookOrder { size, ..*self }
    }
}

impl PartialEq for BookOrder {
    fn eq(&self, other: &Self) -> bool {
        self.order_id == other.order_id
    }
}

impl Eq for BookOrder {}

impl std::hash::Hash for BookOrder {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.order_id.hash(state);
    }
}

impl fmt::Display for BookOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BookOrder(side={}, price={}, size={}, order_id={})",
            self.side, self.price, self.size, self.order_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn order(id: &str, side: OrderSide, price: f64, size: f64) -> BookOrder {
        BookOrder::new(
            side,
            Price::new(price, 2).unwrap(),
            Quantity::new(size, 4).unwrap(),
            OrderId::new(id),
        )
    }

    #[rstest]
    fn exposure_is_price_times_size() {
        let o = order("1", OrderSide::Buy, 100.0, 2.0);
        assert_eq!(o.exposure(), rust_decimal::Decimal::new(20000, 2));
    }

    #[rstest]
    #[case(OrderSide::Buy, 1)]
    #[case(OrderSide::Sell, -1)]
    fn signed_size_matches_side(#[case] side: OrderSide, #[case] sign: i64) {
        let o = order("1", side, 100.0, 2.0);
        let expected = rust_decimal::Decimal::new(sign * 2, 0);
        assert_eq!(o.signed_size(), expected);
    }

    #[test]
    fn equality_ignores_price_and_size() {
        let a = order("same", OrderSide::Buy, 100.0, 1.0);
        let b = order("same", OrderSide::Sell, 200.0, 2.0);
        assert_eq!(a, b);
    }

    #[test]
    fn with_size_preserves_identity() {
        let a = order("1", OrderSide::Buy, 100.0, 1.0);
        let b = a.with_size(Quantity::new(5.0, 4).unwrap());
        assert_eq!(a.order_id, b.order_id);
        assert_eq!(b.size.as_f64(), 5.0);
    }

    #[test]
    fn display_contains_fields() {
        let o = order("42", OrderSide::Buy, 100.0, 1.0);
        let s = o.to_string();
        assert!(s.contains("42"));
        assert!(s.contains("Buy"));
    }
}
