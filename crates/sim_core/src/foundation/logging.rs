//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialize the logging system with an `info` default filter.
///
/// `RUST_LOG` overrides the default. Calling this more than once is harmless.
pub fn init() {
    init_with_level(LevelFilter::Info);
}

/// Initialize the logging system with the given default level
pub fn init_with_level(level: LevelFilter) {
    let env = Env::default().default_filter_or(level.to_string());
    // A logger may already be installed (tests, embedding hosts).
    let _ = Builder::from_env(env).format_timestamp_millis().try_init();
}
