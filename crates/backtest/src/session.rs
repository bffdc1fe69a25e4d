use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::iter::Peekable;
use std::sync::Arc;

use ledgerflow_core::Instant;
use ledgerflow_execution::{ExchangeErrorEvent, Fill, OrderEvent};
use log::{info, warn};

use crate::exchange::SimulatedExchange;

/// Anything fed to a session as a historical market-data item must carry
/// its own timestamp, since the tick loop sequences by instant rather
/// than by arrival order.
pub trait MarketDataItem {
    fn instant(&self) -> Instant;
}

/// A strategy-scheduled wakeup, dispatched once its instant is reached.
#[derive(Debug, Clone)]
pub struct Timer {
    pub instant: Instant,
    pub label: String,
}

/// One unit of work handed to the strategy callback, tagged by source so
/// the caller can match on it without downcasting.
#[derive(Debug, Clone)]
pub enum Dispatched<D> {
    MarketData(D),
    Fill(Fill),
    Event(OrderEvent),
    Error(ExchangeErrorEvent),
    Timer(Timer),
}

/// The single-threaded cooperative tick loop, merging a historical
/// market-data stream with one simulated exchange's fill/event/error
/// queues and a strategy's timers, smallest timestamp first with ties
/// broken `(market-data, fills, events, errors, timers)`.
///
/// A single data cursor plus one exchange reference, advanced one
/// dispatch at a time; each session owns exactly one exchange and its
/// book.
///
/// Assumes `data` yields items in non-decreasing timestamp order, the
/// normal shape of a historical stream; the loop only orders *across*
/// sources, it does not re-sort an individual one.
pub struct Session<D, I: Iterator<Item = D>> {
    data: Peekable<I>,
    exchange: Arc<SimulatedExchange>,
    timers: BinaryHeap<Reverse<(Instant, u64, String)>>,
    next_timer_seq: u64,
    pending_fills: VecDeque<Fill>,
    pending_events: VecDeque<OrderEvent>,
    pending_errors: VecDeque<ExchangeErrorEvent>,
}

impl<D, I: Iterator<Item = D>> Session<D, I> {
    pub fn new(data: I, exchange: Arc<SimulatedExchange>) -> Self {
        Session {
            data: data.peekable(),
            exchange,
            timers: BinaryHeap::new(),
            next_timer_seq: 0,
            pending_fills: VecDeque::new(),
            pending_events: VecDeque::new(),
            pending_errors: VecDeque::new(),
        }
    }

    /// Schedules a strategy-side timer; it competes for dispatch order
    /// like any other source once its instant arrives.
    pub fn schedule_timer(&mut self, instant: Instant, label: impl Into<String>) {
        let seq = self.next_timer_seq;
        self.next_timer_seq += 1;
        self.timers.push(Reverse((instant, seq, label.into())));
    }

    fn drain_exchange(&mut self) {
        let collected = self.exchange.collect();
        self.pending_fills.extend(collected.fills);
        self.pending_events.extend(collected.events);
        self.pending_errors.extend(collected.errors);
    }

    fn is_exhausted(&mut self) -> bool {
        self.data.peek().is_none()
            && self.pending_fills.is_empty()
            && self.pending_events.is_empty()
            && self.pending_errors.is_empty()
    }
}

impl<D, I: Iterator<Item = D>> Session<D, I>
where
    D: MarketDataItem,
{
    /// Runs the loop to completion, invoking `on_item` once per dispatched
    /// unit of work. Terminates when the market-data source is exhausted
    /// and all three exchange queues are empty; any timer still pending at
    /// that point is dropped with a warning rather than fired.
    pub fn run(&mut self, mut on_item: impl FnMut(Dispatched<D>)) {
        info!("session starting");
        self.drain_exchange();

        loop {
            if self.is_exhausted() {
                break;
            }

            let next_data_instant = self.data.peek().map(D::instant);
            let next_fill_instant = self.pending_fills.front().map(|f| f.instant);
            let next_event_instant = self.pending_events.front().map(|e| e.instant);
            let next_error_instant = self.pending_errors.front().map(|e| e.instant);
            let next_timer_instant = self.timers.peek().map(|Reverse((instant, _, _))| *instant);

            // (market-data, fills, events, errors, timers): earliest wins;
            // on an exact tie the first-listed source is preferred.
            let candidates = [
                (next_data_instant, 0u8),
                (next_fill_instant, 1),
                (next_event_instant, 2),
                (next_error_instant, 3),
                (next_timer_instant, 4),
            ];
            let winner = candidates
                .into_iter()
                .filter_map(|(instant, source)| instant.map(|i| (i, source)))
                .min_by_key(|(instant, source)| (*instant, *source));

            let Some((instant, source)) = winner else {
                break;
            };

            match source {
                0 => {
                    let item = self.data.next().expect("peeked Some above");
                    self.exchange.on_market_data(instant);
                    on_item(Dispatched::MarketData(item));
                }
                1 => {
                    let fill = self.pending_fills.pop_front().expect("peeked Some above");
                    on_item(Dispatched::Fill(fill));
                }
                2 => {
                    let event = self.pending_events.pop_front().expect("peeked Some above");
                    on_item(Dispatched::Event(event));
                }
                3 => {
                    let error = self.pending_errors.pop_front().expect("peeked Some above");
                    on_item(Dispatched::Error(error));
                }
                4 => {
                    let Reverse((instant, _, label)) = self.timers.pop().expect("peeked Some above");
                    on_item(Dispatched::Timer(Timer { instant, label }));
                }
                _ => unreachable!(),
            }

            self.drain_exchange();
        }

        if !self.timers.is_empty() {
            warn!("session ended with {} timer(s) never fired", self.timers.len());
        }
        info!("session ended");
    }
}
