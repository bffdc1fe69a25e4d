use std::fmt;

use serde::{Deserialize, Serialize};
use ustr::Ustr;

/// A resting order's identity within a book. Interned via `Ustr` since the
/// same id is compared and hashed repeatedly across deltas and fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(Ustr);

impl OrderId {
    pub fn new(value: &str) -> Self {
        OrderId(Ustr::from(value))
    }

    pub fn as_str(self) -> &'static str {
        self.0.as_str()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OrderId {
    fn from(value: &str) -> Self {
        OrderId::new(value)
    }
}

impl From<String> for OrderId {
    fn from(value: String) -> Self {
        OrderId::new(&value)
    }
}

/// A tradeable instrument, e.g. `BTC-USD` on a given venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstrumentId(Ustr);

impl InstrumentId {
    pub fn new(value: &str) -> Self {
        InstrumentId(Ustr::from(value))
    }

    pub fn as_str(self) -> &'static str {
        self.0.as_str()
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for InstrumentId {
    fn from(value: &str) -> Self {
        InstrumentId::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_id_display() {
        let id = OrderId::new("abc-123");
        assert_eq!(id.to_string(), "abc-123");
    }

    #[test]
    fn order_id_equality_by_value() {
        assert_eq!(OrderId::new("x"), OrderId::new("x"));
        assert_ne!(OrderId::new("x"), OrderId::new("y"));
    }

    #[test]
    fn instrument_id_from_str() {
        let id: InstrumentId = "BTC-USD".into();
        assert_eq!(id.as_str(), "BTC-USD");
    }
}
