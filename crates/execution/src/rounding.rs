use ledgerflow_model::RoundingMode;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds `value` to `precision` decimal places under `mode`, mapping each
/// `RoundingMode` variant onto `rust_decimal`'s own `RoundingStrategy`.
pub fn round(value: Decimal, precision: u8, mode: RoundingMode) -> Decimal {
    let strategy = match mode {
        RoundingMode::HalfUp => RoundingStrategy::MidpointAwayFromZero,
        RoundingMode::HalfDown => RoundingStrategy::MidpointTowardZero,
        RoundingMode::HalfEven => RoundingStrategy::MidpointNearestEven,
    };
    value.round_dp_with_strategy(precision as u32, strategy)
}
