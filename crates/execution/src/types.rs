use ledgerflow_core::Instant;
use ledgerflow_model::{InstrumentId, OrderId, OrderSide, Price, Quantity};
use rust_decimal::Decimal;
use uuid::Uuid;

/// An order submission, opaque to everything except the exchange that
/// executes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderCommand {
    Limit {
        client_oid: Uuid,
        side: OrderSide,
        instrument: InstrumentId,
        size: Quantity,
        price: Price,
        post_only: bool,
    },
    Market {
        client_oid: Uuid,
        side: OrderSide,
        instrument: InstrumentId,
        size: Quantity,
    },
}

impl OrderCommand {
    pub fn client_oid(&self) -> Uuid {
        match self {
            OrderCommand::Limit { client_oid, .. } => *client_oid,
            OrderCommand::Market { client_oid, .. } => *client_oid,
        }
    }

    pub fn instrument(&self) -> InstrumentId {
        match self {
            OrderCommand::Limit { instrument, .. } => *instrument,
            OrderCommand::Market { instrument, .. } => *instrument,
        }
    }
}

/// Whether a fill removed resting liquidity (taker) or added it (maker).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liquidity {
    Maker,
    Taker,
}

/// A single match between an incoming order and the book, carrying enough
/// to compute PnL and fees downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    pub instant: Instant,
    pub client_oid: Uuid,
    pub instrument: InstrumentId,
    pub side: OrderSide,
    pub price: Price,
    pub size: Quantity,
    pub fee: Decimal,
    pub liquidity: Liquidity,
}

/// Lifecycle notifications for a submitted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderEventKind {
    Accepted,
    Rejected(String),
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderEvent {
    pub instant: Instant,
    pub client_oid: Uuid,
    pub kind: OrderEventKind,
}

/// An exchange-side failure that doesn't map to an order lifecycle event,
/// carried as an opaque message rather than the full `ExecutionError` so
/// the queue stays `Send + 'static` without requiring every error variant
/// to be cloneable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeErrorEvent {
    pub instant: Instant,
    pub message: String,
}

/// Acknowledgement returned synchronously from `Exchange::order`/`cancel`;
/// the authoritative outcome still arrives later via the event queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Accepted,
    Rejected(String),
}

/// A minimal account snapshot: balances and positions per instrument.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    pub balances: Vec<(InstrumentId, Decimal)>,
    pub positions: Vec<(InstrumentId, Decimal)>,
}
