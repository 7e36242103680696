//! Tracing conventions for frankenbisect.
//!
//! The core emits nothing by itself; progress flows through the observer
//! hooks in [`crate::observe`]. This module pins down the target prefix and
//! field names those hooks and the CLI use, plus level parsing helpers for
//! consumers who configure `tracing-subscriber` from the environment.

use tracing::Level;

/// Target prefix used by all frankenbisect tracing events.
///
/// Consumers can use this to filter frankenbisect logs:
/// ```text
/// RUST_LOG=frankenbisect=debug
/// ```
pub const TARGET_PREFIX: &str = "frankenbisect";

/// Standard structured field names used in tracing events.
///
/// Consistent field names enable structured log queries across the CLI and
/// any embedding application.
pub mod field_names {
    pub const DEPTH: &str = "depth";
    pub const FIXED_LEN: &str = "fixed_len";
    pub const CANDIDATE_LEN: &str = "candidate_len";
    pub const ITEM_COUNT: &str = "item_count";
    pub const REDUCED_COUNT: &str = "reduced_count";
    pub const ORACLE_CALLS: &str = "oracle_calls";
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
/// Checks `FBISECT_LOG_LEVEL` first, then falls back to the provided
/// default.
#[must_use]
pub fn level_from_env(default: Level) -> Level {
    std::env::var("FBISECT_LOG_LEVEL")
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_prefix_is_frankenbisect() {
        assert_eq!(TARGET_PREFIX, "frankenbisect");
    }

    #[test]
    fn parse_level_recognizes_valid_levels() {
        assert_eq!(parse_level("trace"), Some(Level::TRACE));
        assert_eq!(parse_level("debug"), Some(Level::DEBUG));
        assert_eq!(parse_level("info"), Some(Level::INFO));
        assert_eq!(parse_level("warn"), Some(Level::WARN));
        assert_eq!(parse_level("error"), Some(Level::ERROR));
    }

    #[test]
    fn parse_level_case_insensitive() {
        assert_eq!(parse_level("TRACE"), Some(Level::TRACE));
        assert_eq!(parse_level("Info"), Some(Level::INFO));
    }

    #[test]
    fn parse_level_returns_none_for_invalid() {
        assert_eq!(parse_level("nonsense"), None);
        assert_eq!(parse_level(""), None);
        assert_eq!(parse_level("verbose"), None);
    }
}
