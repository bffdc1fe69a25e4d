use ledgerflow_model::orderbook::OrderBookError;
use ledgerflow_model::OrderId;
use thiserror::Error;

/// The full error taxonomy, in one place so every fallible boundary
/// returns a typed `Result` rather than a stringly-typed error.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// Requested path/range has no data; the client recovers by falling
    /// back (e.g. derive a ladder from a raw book).
    #[error("no data found for path `{path}`")]
    DataNotFound { path: String },

    /// A `Change` for an unknown id is an error (a `Done` for an unknown id
    /// is silently ignored — see `OrderBook::done`).
    #[error("invalid delta: {0}")]
    InvalidDelta(#[from] OrderBookError),

    /// Assertion failure on ordered ladder; fatal to the session.
    #[error("book invariant violated: {0}")]
    BookInvariantViolation(String),

    /// Recoverable; surfaced as an order rejection.
    #[error("post-only order on {instrument} would cross the book")]
    PostOnlyWouldCross { instrument: String },

    /// Recoverable; surfaced on cancel.
    #[error("order {0} not found")]
    OrderNotFound(OrderId),

    /// Carrier for adapter-specific failures.
    #[error("exchange error: {0}")]
    ExchangeError(String),

    /// Wrapped unexpected failure from an awaited future.
    #[error("internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl ExecutionError {
    /// Whether the session should forward this to the strategy callback and
    /// keep running, as opposed to aborting the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            ExecutionError::DataNotFound { .. }
                | ExecutionError::PostOnlyWouldCross { .. }
                | ExecutionError::OrderNotFound(_)
                | ExecutionError::ExchangeError(_)
        )
    }
}
