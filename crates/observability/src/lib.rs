//! Process-wide logging setup for binaries and test harnesses that embed the
//! ledger crates. The domain crates only emit `tracing` events; installing a
//! subscriber is left to whoever owns the process.

/// Initialize process-wide tracing from `RUST_LOG`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (filters, formatting).
pub mod tracing;

pub use self::tracing::{DEFAULT_FILTER, env_filter, filter_from, init_with};
