//! Logging setup.
//!
//! Every crate logs through the `log` facade; this module is the one place
//! that installs a concrete subscriber, leaving subscriber choice to the
//! final binary or test harness rather than baking one into leaf crates.

use log::LevelFilter;

/// Installs a simple env-filtered logger for example/test binaries.
/// Idempotent: a second call after the first succeeded is a no-op.
pub fn init_env_logger(default_level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(default_level)
        .is_test(false)
        .try_init();
}

/// Installs a `tracing-subscriber` fmt layer, bridging `log` records into
/// `tracing` spans for hosts that prefer structured/span-aware logging.
/// Only available behind the `tracing-bridge` feature so crates that do not
/// need it avoid the extra dependency weight.
#[cfg(feature = "tracing-bridge")]
pub fn init_tracing(default_level: tracing::Level) {
    use tracing_subscriber::FmtSubscriber;

    let subscriber = FmtSubscriber::builder().with_max_level(default_level).finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
