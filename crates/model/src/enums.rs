use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which side of the book an order rests on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub const fn opposite(self) -> OrderSide {
        match self {
            OrderSide::Buy => OrderSide::Sell,
            OrderSide::Sell => OrderSide::Buy,
        }
    }
}

/// §9: source re-appends changed orders to the tail of their price queue
/// rather than preserving queue position. `AlwaysReinsert` reproduces that
/// for byte-for-byte replay equivalence; `PreserveOnDecrease` is the more
/// conventional venue behavior.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Default,
)]
pub enum ChangePolicy {
    #[default]
    AlwaysReinsert,
    PreserveOnDecrease,
}

/// Rounding strategy applied when quantizing a value to an asset's precision.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Default,
)]
pub enum RoundingMode {
    HalfUp,
    #[default]
    HalfDown,
    HalfEven,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_side_opposite() {
        assert_eq!(OrderSide::Buy.opposite(), OrderSide::Sell);
        assert_eq!(OrderSide::Sell.opposite(), OrderSide::Buy);
    }

    #[test]
    fn change_policy_default() {
        assert_eq!(ChangePolicy::default(), ChangePolicy::AlwaysReinsert);
    }

    #[test]
    fn rounding_mode_default() {
        assert_eq!(RoundingMode::default(), RoundingMode::HalfDown);
    }
}
