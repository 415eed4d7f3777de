//! Tracing subscriber setup.
//!
//! Every binary in the suite calls one of these once at startup; library
//! crates only emit through the `tracing` macros and never install a
//! subscriber themselves.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber with the `info` default level.
///
/// `RUST_LOG` overrides the default when set. Calling this more than once
/// is harmless; later calls are ignored.
pub fn init_tracing() {
    init_tracing_with("info");
}

/// Install the global subscriber with an explicit default filter
/// (e.g. `"crestline_errors=debug,info"`).
pub fn init_tracing_with(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing();
        init_tracing_with("debug");
        tracing::info!("subscriber installed");
    }
}
