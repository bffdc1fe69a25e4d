use ledgerflow_model::{ChangePolicy, InstrumentId, Quantity, RoundingMode};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Construction-time parameters for a `SimulatedExchange`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedExchangeConfig {
    pub instrument: InstrumentId,
    pub maker_fee: Decimal,
    pub taker_fee: Decimal,
    pub base_asset_precision: u8,
    pub quote_asset_precision: u8,
    pub lot_size: Option<Quantity>,
    #[serde(default)]
    pub rounding_mode: RoundingMode,
    #[serde(default)]
    pub change_policy: ChangePolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_half_down_rounding_and_always_reinsert() {
        let json = serde_json::json!({
            "instrument": "BTC-USD",
            "maker_fee": "0.001",
            "taker_fee": "0.002",
            "base_asset_precision": 8,
            "quote_asset_precision": 2,
            "lot_size": null,
        });
        let config: SimulatedExchangeConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.rounding_mode, RoundingMode::HalfDown);
        assert_eq!(config.change_policy, ChangePolicy::AlwaysReinsert);
    }
}
