use crate::types::{Price, Quantity};

/// A single aggregated price level in a `Ladder`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LadderLevel {
    pub price: Price,
    pub size: Quantity,
}

/// A fixed-depth projection of a book: the top `depth` price levels on each
/// side, with per-level queue amounts summed.
#[derive(Debug, Clone, PartialEq)]
pub struct Ladder {
    pub bids: Vec<LadderLevel>,
    pub asks: Vec<LadderLevel>,
}

impl Ladder {
    pub fn new(bids: Vec<LadderLevel>, asks: Vec<LadderLevel>) -> Self {
        Ladder { bids, asks }
    }

    pub fn depth(&self) -> usize {
        self.bids.len().max(self.asks.len())
    }
}
