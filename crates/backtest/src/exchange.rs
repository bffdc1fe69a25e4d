use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use ledgerflow_core::Instant;
use ledgerflow_execution::{
    collect, Collected, Exchange, ExchangeErrorEvent, FeeModel, Fill, Liquidity, OrderCommand,
    OrderEvent, OrderEventKind, Portfolio, Queue, Response,
};
use ledgerflow_model::orderbook::OrderBook;
use ledgerflow_model::{InstrumentId, OrderId, OrderSide, Price, Quantity};
use log::{debug, warn};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::SimulatedExchangeConfig;

/// Drives an internal order book from the historical market-data stream
/// fed to it via `on_market_data`. Matches market and limit orders against
/// the book synchronously, one instrument per `SimulatedExchange`, and
/// pushes the resulting fills/events/errors onto queues a session drains.
#[derive(Debug)]
pub struct SimulatedExchange {
    config: SimulatedExchangeConfig,
    book: Mutex<OrderBook>,
    /// `synthetic_current_micros`: the timestamp of the last market-data
    /// item fed in, or the last tick instant if later.
    clock: Mutex<Instant>,
    fills: Queue<Fill>,
    events: Queue<OrderEvent>,
    errors: Queue<ExchangeErrorEvent>,
}

impl SimulatedExchange {
    pub fn new(config: SimulatedExchangeConfig, start: Instant) -> Self {
        let book = OrderBook::new(config.instrument, config.change_policy);
        SimulatedExchange {
            config,
            book: Mutex::new(book),
            clock: Mutex::new(start),
            fills: Queue::new(),
            events: Queue::new(),
            errors: Queue::new(),
        }
    }

    /// Advances the synthetic clock; a no-op if `instant` is not later than
    /// the current value, since the clock never goes backwards.
    pub fn on_market_data(&self, instant: Instant) {
        let mut clock = self.clock.lock().expect("clock mutex poisoned");
        if instant > *clock {
            *clock = instant;
        }
    }

    pub fn synthetic_current(&self) -> Instant {
        *self.clock.lock().expect("clock mutex poisoned")
    }

    /// Drains this exchange's three queues. A thin wrapper around the free
    /// `collect` function so callers don't need the `Exchange` trait in
    /// scope just to drain a concrete `SimulatedExchange`.
    pub fn collect(&self) -> Collected {
        collect(self)
    }

    fn order_id_for(client_oid: Uuid) -> OrderId {
        OrderId::new(&client_oid.to_string())
    }

    fn accept(&self, client_oid: Uuid, instant: Instant) {
        self.events.push(OrderEvent { instant, client_oid, kind: OrderEventKind::Accepted });
        debug!("order {client_oid} accepted at {instant}");
    }

    fn reject(&self, client_oid: Uuid, instant: Instant, reason: String) -> Response {
        self.events.push(OrderEvent {
            instant,
            client_oid,
            kind: OrderEventKind::Rejected(reason.clone()),
        });
        warn!("order {client_oid} rejected at {instant}: {reason}");
        Response::Rejected(reason)
    }

    fn record_fills(
        &self,
        client_oid: Uuid,
        instant: Instant,
        side: OrderSide,
        matches: Vec<(Price, Quantity)>,
        liquidity: Liquidity,
        fee_rate: Decimal,
    ) {
        for (price, size) in matches {
            let fee = price.as_decimal() * size.as_decimal() * fee_rate;
            debug!("fill {client_oid} {price}x{size} fee={fee}");
            self.fills.push(Fill {
                instant,
                client_oid,
                instrument: self.config.instrument,
                side,
                price,
                size,
                fee,
                liquidity,
            });
        }
    }

    /// Whether a post-only order at `price` would immediately match
    /// against the resting book: a buy at or above the best ask, or a
    /// sell at or below the best bid (S6).
    fn would_cross_as_post_only(side: OrderSide, price: Price, book: &OrderBook) -> bool {
        match side {
            OrderSide::Buy => book.best_ask_price().is_some_and(|ask| price >= ask),
            OrderSide::Sell => book.best_bid_price().is_some_and(|bid| price <= bid),
        }
    }
}

impl FeeModel for SimulatedExchange {
    fn maker_fee(&self) -> Decimal {
        self.config.maker_fee
    }

    fn taker_fee(&self) -> Decimal {
        self.config.taker_fee
    }
}

#[async_trait]
impl Exchange for SimulatedExchange {
    async fn order(&self, cmd: OrderCommand) -> Response {
        let instant = self.synthetic_current();
        match cmd {
            OrderCommand::Market { client_oid, side, size, .. } => {
                let matches = {
                    let mut book = self.book.lock().expect("book mutex poisoned");
                    book.fill(side, size, None)
                };
                self.accept(client_oid, instant);
                self.record_fills(client_oid, instant, side, matches, Liquidity::Taker, self.taker_fee());
                Response::Accepted
            }
            OrderCommand::Limit { client_oid, side, size, price, post_only, .. } => {
                if post_only {
                    let mut book = self.book.lock().expect("book mutex poisoned");
                    if Self::would_cross_as_post_only(side, price, &book) {
                        drop(book);
                        return self.reject(
                            client_oid,
                            instant,
                            format!("post-only order on {} would cross the book", self.config.instrument),
                        );
                    }
                    let id = Self::order_id_for(client_oid);
                    book.open(id, price, size, side).expect("client_oid collision on resting book");
                    drop(book);
                    self.accept(client_oid, instant);
                    Response::Accepted
                } else {
                    let (matches, remainder) = {
                        let mut book = self.book.lock().expect("book mutex poisoned");
                        let matches = book.fill(side, size, Some(price));
                        let matched = matches
                            .iter()
                            .fold(Quantity::zero(size.precision()), |acc, (_, filled)| acc + *filled);
                        let remainder = size.saturating_sub(matched);
                        if !remainder.is_zero() {
                            let id = Self::order_id_for(client_oid);
                            book.open(id, price, remainder, side).expect("client_oid collision on resting book");
                        }
                        (matches, remainder)
                    };
                    self.accept(client_oid, instant);
                    self.record_fills(client_oid, instant, side, matches, Liquidity::Taker, self.taker_fee());
                    if !remainder.is_zero() {
                        debug!("order {client_oid} rests {remainder} at {price}");
                    }
                    Response::Accepted
                }
            }
        }
    }

    async fn cancel(&self, id: OrderId, _instrument: InstrumentId) -> Response {
        let instant = self.synthetic_current();
        let mut book = self.book.lock().expect("book mutex poisoned");
        if !book.contains(id) {
            drop(book);
            self.errors.push(ExchangeErrorEvent {
                instant,
                message: format!("order {id} not found"),
            });
            return Response::Rejected(format!("order {id} not found"));
        }
        book.done(id);
        Response::Accepted
    }

    async fn fetch_portfolio(&self) -> Portfolio {
        Portfolio::default()
    }

    fn base_asset_precision(&self, instrument: InstrumentId) -> Option<u8> {
        (instrument == self.config.instrument).then_some(self.config.base_asset_precision)
    }

    fn quote_asset_precision(&self, instrument: InstrumentId) -> Option<u8> {
        (instrument == self.config.instrument).then_some(self.config.quote_asset_precision)
    }

    fn lot_size(&self, instrument: InstrumentId) -> Option<Quantity> {
        if instrument != self.config.instrument {
            return None;
        }
        self.config.lot_size
    }

    async fn instruments(&self) -> HashSet<InstrumentId> {
        HashSet::from([self.config.instrument])
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
