use ledgerflow_model::types::{Price, Quantity};
use rust_decimal::Decimal;

/// Computes the fee owed on a single fill.
pub trait FeeModel: std::fmt::Debug {
    fn maker_fee(&self) -> Decimal;
    fn taker_fee(&self) -> Decimal;

    /// `fill.size * fill.price * rate`, where `rate` is `maker_fee` or
    /// `taker_fee` depending on `is_maker`.
    fn commission(&self, price: Price, size: Quantity, is_maker: bool) -> Decimal {
        let rate = if is_maker { self.maker_fee() } else { self.taker_fee() };
        price.as_decimal() * size.as_decimal() * rate
    }
}

/// A constant maker/taker rate schedule; rebates are permitted via
/// negative rates.
#[derive(Debug, Clone, Copy)]
pub struct MakerTakerFeeModel {
    maker_fee: Decimal,
    taker_fee: Decimal,
}

impl MakerTakerFeeModel {
    pub fn new(maker_fee: Decimal, taker_fee: Decimal) -> Self {
        MakerTakerFeeModel { maker_fee, taker_fee }
    }
}

impl FeeModel for MakerTakerFeeModel {
    fn maker_fee(&self) -> Decimal {
        self.maker_fee
    }

    fn taker_fee(&self) -> Decimal {
        self.taker_fee
    }
}
