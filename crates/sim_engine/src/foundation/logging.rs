//! Logging utilities and structured logging support

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system.
///
/// Defaults to `info` when `RUST_LOG` is unset. Safe to call more than once
/// (later calls are no-ops), so tests and binaries can both use it.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
