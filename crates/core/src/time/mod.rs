mod duration;
mod instant;
mod range;

pub use duration::Duration;
pub use instant::Instant;
pub use range::TimeRange;
