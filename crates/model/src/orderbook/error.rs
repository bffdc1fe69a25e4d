use thiserror::Error;

use crate::identifiers::OrderId;

/// Errors raised directly by order book mutation and query operations.
///
/// Lower-level than the execution-layer error taxonomy:
/// `ledgerflow-execution::ExecutionError` wraps `InvalidDelta` and
/// `BookInvariantViolation` around these.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderBookError {
    #[error("order id {0} already exists in the book")]
    DuplicateOrderId(OrderId),

    #[error("order id {0} not found for change()")]
    UnknownOrderId(OrderId),

    #[error("book invariant violated: {0}")]
    InvariantViolation(String),
}
