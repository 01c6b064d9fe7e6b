//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

/// Crates whose events are kept at `info` by default.
pub const LEDGER_TARGETS: &[&str] = &["bookkeeper_accounting", "bookkeeper_categorization"];

/// Filter used when `RUST_LOG` is unset or unparsable: ledger crates at
/// `info`, everything else at `warn`.
pub const DEFAULT_FILTER: &str = "warn,bookkeeper_accounting=info,bookkeeper_categorization=info";

/// Build the level filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
}

/// Parse `directives`, falling back to [`DEFAULT_FILTER`] when absent or invalid.
pub fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a JSON subscriber filtered by [`env_filter`].
///
/// Safe to call multiple times (subsequent calls are no-ops).
pub fn init() {
    init_with(env_filter());
}

/// Install a JSON subscriber with an explicit filter, for harnesses that want
/// ledger debug output without touching the environment.
pub fn init_with(filter: EnvFilter) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(true)
        .try_init();
}
