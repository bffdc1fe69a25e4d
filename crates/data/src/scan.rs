//! Polymorphic time-series scan: bucketizes a stream of timestamped
//! primitives into aligned, fixed-interval outputs.
//!
//! OHLCV accumulation rules: the first update in a bucket sets
//! open/high/low, subsequent updates widen high/low and move close,
//! volume accumulates. Implemented as a pull-based [`Iterator`] adapter
//! with a one-item lookahead, since this folds a historical sequence
//! rather than reacting to live timer callbacks.

use ledgerflow_core::{Duration, Instant};
use ledgerflow_model::data::bar::Bar;
use ledgerflow_model::data::candle::Candle;
use ledgerflow_model::types::{Price, Quantity};
use serde::{Deserialize, Serialize};

/// A value that can contribute to a bucket's OHLCV aggregate.
pub trait ScanInput: Copy {
    fn instant(&self) -> Instant;
    fn open(&self) -> Price;
    fn high(&self) -> Price;
    fn low(&self) -> Price;
    fn close(&self) -> Price;
    fn volume(&self) -> Quantity;
}

/// A value reconstructible from a bucket's OHLCV aggregate.
pub trait ScanOutput: Sized {
    fn from_bucket(
        instant: Instant,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: Quantity,
        step: Duration,
    ) -> Self;
}

/// A single `(Instant, Price)` observation, e.g. from a price tap or a raw
/// trade print with no explicit size: volume is the occurrence count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceTick {
    pub instant: Instant,
    pub price: Price,
}

impl ScanInput for PriceTick {
    fn instant(&self) -> Instant {
        self.instant
    }
    fn open(&self) -> Price {
        self.price
    }
    fn high(&self) -> Price {
        self.price
    }
    fn low(&self) -> Price {
        self.price
    }
    fn close(&self) -> Price {
        self.price
    }
    fn volume(&self) -> Quantity {
        Quantity::new(1.0, 0).expect("literal 1.0 is always a valid quantity")
    }
}

/// A single `(Instant, Price, Quantity)` trade print; volume contributes its
/// own traded size rather than a unit count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradeTick {
    pub instant: Instant,
    pub price: Price,
    pub size: Quantity,
}

impl ScanInput for TradeTick {
    fn instant(&self) -> Instant {
        self.instant
    }
    fn open(&self) -> Price {
        self.price
    }
    fn high(&self) -> Price {
        self.price
    }
    fn low(&self) -> Price {
        self.price
    }
    fn close(&self) -> Price {
        self.price
    }
    fn volume(&self) -> Quantity {
        self.size
    }
}

impl ScanInput for Candle {
    fn instant(&self) -> Instant {
        self.instant
    }
    fn open(&self) -> Price {
        self.open
    }
    fn high(&self) -> Price {
        self.high
    }
    fn low(&self) -> Price {
        self.low
    }
    fn close(&self) -> Price {
        self.close
    }
    fn volume(&self) -> Quantity {
        self.volume
    }
}

impl ScanInput for Bar {
    fn instant(&self) -> Instant {
        self.candle.instant
    }
    fn open(&self) -> Price {
        self.candle.open
    }
    fn high(&self) -> Price {
        self.candle.high
    }
    fn low(&self) -> Price {
        self.candle.low
    }
    fn close(&self) -> Price {
        self.candle.close
    }
    fn volume(&self) -> Quantity {
        self.candle.volume
    }
}

impl ScanOutput for Candle {
    fn from_bucket(
        instant: Instant,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: Quantity,
        _step: Duration,
    ) -> Self {
        Candle::new_checked(instant, open, high, low, close, volume)
            .expect("bucket aggregation always yields a consistent OHLC ordering")
    }
}

impl ScanOutput for Bar {
    fn from_bucket(
        instant: Instant,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: Quantity,
        step: Duration,
    ) -> Self {
        let candle = Candle::from_bucket(instant, open, high, low, close, volume, step);
        Bar::from_candle(candle, step)
    }
}

/// `scan` options: whether to drop a leading/trailing possibly-partial
/// bucket.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScanOptions {
    pub drop_first: bool,
    pub drop_last: bool,
}

struct Accumulator<T: ScanInput> {
    bucket_start: Instant,
    open: Price,
    high: Price,
    low: Price,
    close: Price,
    volume: Quantity,
    _marker: std::marker::PhantomData<T>,
}

impl<T: ScanInput> Accumulator<T> {
    fn start(bucket_start: Instant, item: T) -> Self {
        Accumulator {
            bucket_start,
            open: item.open(),
            high: item.high(),
            low: item.low(),
            close: item.close(),
            volume: item.volume(),
            _marker: std::marker::PhantomData,
        }
    }

    fn push(&mut self, item: T) {
        if item.high() > self.high {
            self.high = item.high();
        }
        if item.low() < self.low {
            self.low = item.low();
        }
        self.close = item.close();
        self.volume = self.volume + item.volume();
    }

    fn emit<U: ScanOutput>(&self, step: Duration) -> U {
        U::from_bucket(self.bucket_start, self.open, self.high, self.low, self.close, self.volume, step)
    }
}

/// A pull-based iterator that bucketizes `source` into fixed-interval
/// outputs of type `U`, aligned to `step`.
///
/// Internal state is the current bucket accumulator plus a one-item
/// lookahead pulled from `source`, so a bucket can only be emitted once its
/// first following item proves it closed. Finite when `source` is finite;
/// not restartable.
pub struct Scan<I, T, U>
where
    I: Iterator<Item = T>,
    T: ScanInput,
{
    source: I,
    step: Duration,
    options: ScanOptions,
    lookahead: Option<T>,
    bucket_index: u64,
    finished: bool,
    _marker: std::marker::PhantomData<U>,
}

impl<I, T, U> Scan<I, T, U>
where
    I: Iterator<Item = T>,
    T: ScanInput,
    U: ScanOutput,
{
    pub fn new(mut source: I, step: Duration, options: ScanOptions) -> Self {
        let lookahead = source.next();
        Scan {
            source,
            step,
            options,
            lookahead,
            bucket_index: 0,
            finished: false,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<I, T, U> Iterator for Scan<I, T, U>
where
    I: Iterator<Item = T>,
    T: ScanInput,
    U: ScanOutput,
{
    type Item = U;

    fn next(&mut self) -> Option<U> {
        loop {
            if self.finished {
                return None;
            }
            let first = self.lookahead.take()?;
            let bucket_start = first.instant().floor(self.step);
            let mut acc = Accumulator::<T>::start(bucket_start, first);

            loop {
                match self.source.next() {
                    Some(item) if item.instant().floor(self.step) == bucket_start => {
                        acc.push(item);
                    }
                    next => {
                        self.lookahead = next;
                        break;
                    }
                }
            }

            let is_first = self.bucket_index == 0;
            let is_last = self.lookahead.is_none();
            self.bucket_index += 1;
            if is_last {
                self.finished = true;
            }

            if is_first && self.options.drop_first {
                continue;
            }
            // The only way a pull-based scan can confirm a bucket's window
            // fully elapsed is to have seen a later item outside it (which
            // is exactly how every non-final bucket above got emitted). The
            // truly final bucket, reached only because the source ran dry,
            // has no such confirmation and is dropped when `drop_last` asks
            // to guard against a partial trailing window.
            if is_last && self.options.drop_last {
                continue;
            }
            return Some(acc.emit(self.step));
        }
    }
}

/// Convenience entry point mirroring the spec's `scan(source, d, options)`.
pub fn scan<I, T, U>(source: I, step: Duration, options: ScanOptions) -> Scan<I::IntoIter, T, U>
where
    I: IntoIterator<Item = T>,
    T: ScanInput,
    U: ScanOutput,
{
    Scan::new(source.into_iter(), step, options)
}
