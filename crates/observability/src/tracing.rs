//! Subscriber installation.
//!
//! Scope and policy decisions are emitted at `debug`, permissive fallbacks
//! at `warn`. `RUST_LOG=edupath_scoping=debug,edupath_policy=debug` traces
//! every decision.

use tracing_subscriber::EnvFilter;

pub const DEFAULT_DIRECTIVE: &str = "info";

fn filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// JSON logs with timestamps; `default_directive` applies when `RUST_LOG` is unset or invalid.
pub fn init_with_default(default_directive: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(default_directive))
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .try_init();
}

/// Human-readable logs captured by the test harness.
pub fn init_test_writer() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter("debug"))
        .with_test_writer()
        .try_init();
}
