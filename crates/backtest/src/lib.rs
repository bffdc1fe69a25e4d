pub mod config;
pub mod exchange;
pub mod session;

pub use config::SimulatedExchangeConfig;
pub use exchange::SimulatedExchange;
pub use session::{Dispatched, MarketDataItem, Session, Timer};
