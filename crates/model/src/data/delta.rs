use serde::{Deserialize, Serialize};

use crate::enums::OrderSide;
use crate::identifiers::OrderId;
use crate::types::{Price, Quantity};

/// A minimal incremental change to an order book: a tagged union of
/// `Open`/`Done`/`Change`. Full-book snapshots are modelled via
/// `fold`/`unfold` (see `orderbook::fold`), not a delta variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag")]
pub enum Delta {
    Open {
        id: OrderId,
        price: Price,
        size: Quantity,
        side: OrderSide,
    },
    Done {
        id: OrderId,
    },
    Change {
        id: OrderId,
        new_size: Quantity,
    },
}

impl Delta {
    pub fn id(&self) -> OrderId {
        match self {
            Delta::Open { id, .. } | Delta::Done { id } | Delta::Change { id, .. } => *id,
        }
    }
}
