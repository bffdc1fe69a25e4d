//! End-to-end: a market order placed on a `SimulatedExchange` and observed
//! through `Session`'s tick loop, covering the S3 fill scenario end to end
//! rather than only at the exchange's own API boundary.

use std::sync::Arc;

use ledgerflow_backtest::{Dispatched, MarketDataItem, Session, SimulatedExchangeConfig, SimulatedExchange};
use ledgerflow_core::Instant;
use ledgerflow_execution::{Exchange, Fill, OrderCommand, OrderEvent};
use ledgerflow_model::{ChangePolicy, InstrumentId, OrderSide, Price, Quantity, RoundingMode};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use uuid::Uuid;

#[derive(Debug, Clone, Copy)]
struct Tick(Instant);

impl MarketDataItem for Tick {
    fn instant(&self) -> Instant {
        self.0
    }
}

fn config() -> SimulatedExchangeConfig {
    SimulatedExchangeConfig {
        instrument: InstrumentId::new("BTC-USD"),
        maker_fee: dec!(0.001),
        taker_fee: dec!(0.002),
        base_asset_precision: 8,
        quote_asset_precision: 2,
        lot_size: None,
        rounding_mode: RoundingMode::HalfDown,
        change_policy: ChangePolicy::AlwaysReinsert,
    }
}

#[tokio::test]
async fn market_buy_against_two_resting_asks_surfaces_as_fills_through_the_session() {
    let instrument = InstrumentId::new("BTC-USD");
    let exchange = Arc::new(SimulatedExchange::new(config(), Instant::EPOCH));

    exchange
        .order(OrderCommand::Limit {
            client_oid: Uuid::new_v4(),
            side: OrderSide::Sell,
            instrument,
            size: Quantity::new(1.0, 4).unwrap(),
            price: Price::new(100.0, 2).unwrap(),
            post_only: true,
        })
        .await;
    exchange
        .order(OrderCommand::Limit {
            client_oid: Uuid::new_v4(),
            side: OrderSide::Sell,
            instrument,
            size: Quantity::new(2.0, 4).unwrap(),
            price: Price::new(101.0, 2).unwrap(),
            post_only: true,
        })
        .await;

    let ticks = vec![Tick(Instant::from_micros(1_000))];
    let mut session = Session::new(ticks.into_iter(), exchange.clone());

    exchange
        .order(OrderCommand::Market {
            client_oid: Uuid::new_v4(),
            side: OrderSide::Buy,
            instrument,
            size: Quantity::new(2.5, 4).unwrap(),
        })
        .await;

    let mut fills = Vec::new();
    let mut events = Vec::new();
    session.run(|item| match item {
        Dispatched::Fill(f) => fills.push(f),
        Dispatched::Event(e) => events.push(e),
        _ => {}
    });

    assert_eq!(fills.len(), 2);
    let sizes: Vec<Quantity> = fills.iter().map(|f: &Fill| f.size).collect();
    assert_eq!(sizes, vec![Quantity::new(1.0, 4).unwrap(), Quantity::new(1.5, 4).unwrap()]);

    let accepted: Vec<&OrderEvent> = events.iter().filter(|e| matches!(e.kind, ledgerflow_execution::OrderEventKind::Accepted)).collect();
    assert_eq!(accepted.len(), 3);
}
