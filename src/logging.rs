//! Logging setup for the CLI
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! binary's job.
//!
//! Configure via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - dispatch decisions, saves
//! - `RUST_LOG=modal_keys::core::dispatch=trace` - every matched shortcut
//! - `RUST_LOG=modal_keys::config=info` - migrations and backups

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize a stderr subscriber filtered by RUST_LOG
///
/// Defaults to `warn` when RUST_LOG is unset or invalid. `verbose` raises
/// the default to `debug`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    // Ignore a second init (tests, embedding)
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
