//! Process-wide tracing setup.

pub mod tracing;

pub use crate::tracing::{DEFAULT_DIRECTIVE, init_test_writer, init_with_default};

/// Initialize JSON logging filtered by `RUST_LOG` (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    init_with_default(DEFAULT_DIRECTIVE);
}
