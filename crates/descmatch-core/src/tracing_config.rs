//! Tracing conventions for descmatch.
//!
//! Span and field name constants keep instrumentation consistent so that
//! consumers can match on them in subscribers, dashboards, and tests. The
//! crate emits events through `tracing` but never installs a subscriber;
//! consumers bring their own.

use tracing::Level;

/// Target prefix used by all descmatch tracing spans and events.
///
/// Consumers can use this to filter descmatch logs:
/// ```text
/// RUST_LOG=descmatch=debug
/// ```
pub const TARGET_PREFIX: &str = "descmatch";

/// Standard tracing span names used across the matching pipeline.
pub mod span_names {
    /// One best/second-best query against an index.
    pub const FIND: &str = "descmatch::find";
    /// A parallel batch of independent queries.
    pub const FIND_BATCH: &str = "descmatch::find_batch";
    /// Index construction and kernel selection.
    pub const INDEX_BUILD: &str = "descmatch::index_build";
}

/// Standard structured field names used in tracing events.
pub mod field_names {
    pub const NUM_DESCRIPTORS: &str = "num_descriptors";
    pub const DIMENSIONS: &str = "dimensions";
    pub const KERNEL: &str = "kernel";
    pub const LANE_WIDTH: &str = "lane_width";
    pub const QUERY_COUNT: &str = "query_count";
}

/// Parse a log level string (case-insensitive).
///
/// Recognized values: `trace`, `debug`, `info`, `warn`, `error`.
/// Returns `None` for unrecognized strings.
#[must_use]
pub fn parse_level(s: &str) -> Option<Level> {
    match s.to_lowercase().as_str() {
        "trace" => Some(Level::TRACE),
        "debug" => Some(Level::DEBUG),
        "info" => Some(Level::INFO),
        "warn" => Some(Level::WARN),
        "error" => Some(Level::ERROR),
        _ => None,
    }
}

/// Returns the recommended `tracing::Level` for the given environment.
///
/// Checks `DESCMATCH_LOG_LEVEL` first, then falls back to the provided
/// default.
#[must_use]
pub fn level_from_env(default: Level) -> Level {
    std::env::var("DESCMATCH_LOG_LEVEL")
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(default)
}
