use std::collections::HashSet;

use async_trait::async_trait;
use ledgerflow_model::{InstrumentId, OrderId, Quantity};

use crate::fees::FeeModel;
use crate::queue::Queue;
use crate::types::{ExchangeErrorEvent, Fill, OrderCommand, OrderEvent, Portfolio, Response};

/// The capability surface a session needs from a venue. A session drives
/// an `Exchange` purely through `order`/`cancel` and drains its three
/// queues; it never reaches into the venue's internal book.
#[async_trait]
pub trait Exchange: FeeModel + Send + Sync {
    /// Submits an order. The returned `Response` is a synchronous
    /// acknowledgement; fills and rejections still arrive via the queues.
    async fn order(&self, cmd: OrderCommand) -> Response;

    async fn cancel(&self, id: OrderId, instrument: InstrumentId) -> Response;

    async fn fetch_portfolio(&self) -> Portfolio;

    fn base_asset_precision(&self, instrument: InstrumentId) -> Option<u8>;

    fn quote_asset_precision(&self, instrument: InstrumentId) -> Option<u8>;

    fn lot_size(&self, instrument: InstrumentId) -> Option<Quantity>;

    async fn instruments(&self) -> HashSet<InstrumentId>;

    fn fills(&self) -> &Queue<Fill>;

    fn events(&self) -> &Queue<OrderEvent>;

    fn errors(&self) -> &Queue<ExchangeErrorEvent>;
}

/// Everything an exchange produced since the last drain, in the shape a
/// session's tick loop consumes it.
#[derive(Debug, Default)]
pub struct Collected {
    pub fills: Vec<Fill>,
    pub events: Vec<OrderEvent>,
    pub errors: Vec<ExchangeErrorEvent>,
}

impl Collected {
    pub fn is_empty(&self) -> bool {
        self.fills.is_empty() && self.events.is_empty() && self.errors.is_empty()
    }
}

/// Drains all three of an exchange's queues in one atomic-per-queue pass.
pub fn collect(exchange: &dyn Exchange) -> Collected {
    Collected {
        fills: exchange.fills().drain_all(),
        events: exchange.events().drain_all(),
        errors: exchange.errors().drain_all(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ExchangeErrorEvent, OrderEventKind};
    use ledgerflow_core::Instant;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[derive(Debug, Default)]
    struct StubExchange {
        fills: Queue<Fill>,
        events: Queue<OrderEvent>,
        errors: Queue<ExchangeErrorEvent>,
    }

    impl FeeModel for StubExchange {
        fn maker_fee(&self) -> Decimal {
            Decimal::ZERO
        }
        fn taker_fee(&self) -> Decimal {
            Decimal::ZERO
        }
    }

    #[async_trait]
    impl Exchange for StubExchange {
        async fn order(&self, _cmd: OrderCommand) -> Response {
            Response::Accepted
        }
        async fn cancel(&self, _id: OrderId, _instrument: InstrumentId) -> Response {
            Response::Accepted
        }
        async fn fetch_portfolio(&self) -> Portfolio {
            Portfolio::default()
        }
        fn base_asset_precision(&self, _instrument: InstrumentId) -> Option<u8> {
            None
        }
        fn quote_asset_precision(&self, _instrument: InstrumentId) -> Option<u8> {
            None
        }
        fn lot_size(&self, _instrument: InstrumentId) -> Option<Quantity> {
            None
        }
        async fn instruments(&self) -> HashSet<InstrumentId> {
            HashSet::new()
        }
        fn fills(&self) -> &Queue<Fill> {
            &self.fills
        }
        fn events(&self) -> &Queue<OrderEvent> {
            &self.events
        }
        fn errors(&self) -> &Queue<ExchangeErrorEvent> {
            &self.errors
        }
    }

    #[tokio::test]
    async fn collect_drains_all_three_queues() {
        let exchange = StubExchange::default();
        exchange.events.push(OrderEvent {
            instant: Instant::EPOCH,
            client_oid: Uuid::nil(),
            kind: OrderEventKind::Accepted,
        });
        exchange.errors.push(ExchangeErrorEvent {
            instant: Instant::EPOCH,
            message: "boom".into(),
        });

        let collected = collect(&exchange);
        assert_eq!(collected.events.len(), 1);
        assert_eq!(collected.errors.len(), 1);
        assert!(collected.fills.is_empty());
        assert!(!collected.is_empty());
        assert!(collect(&exchange).is_empty());
    }
}
