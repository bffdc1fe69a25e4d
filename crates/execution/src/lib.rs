pub mod error;
pub mod exchange;
pub mod fees;
pub mod queue;
pub mod rounding;
pub mod types;

pub use error::ExecutionError;
pub use exchange::{collect, Collected, Exchange};
pub use fees::{FeeModel, MakerTakerFeeModel};
pub use queue::Queue;
pub use rounding::round;
pub use types::{ExchangeErrorEvent, Fill, Liquidity, OrderCommand, OrderEvent, OrderEventKind, Portfolio, Response};
