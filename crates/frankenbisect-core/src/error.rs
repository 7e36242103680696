/// Unified error type covering all failure modes across the frankenbisect
/// reduction pipeline.
///
/// Every variant includes an actionable message guiding the consumer toward
/// resolution. The bisection engine itself has no internal failure modes: it
/// only surfaces precondition violations detected by the driver and errors
/// raised by the oracle. Oracle errors are terminal; no partial result is
/// ever returned alongside one.
#[derive(Debug, thiserror::Error)]
pub enum BisectError {
    // === Precondition violations ===
    /// The oracle reported success on the full, unreduced input.
    #[error(
        "oracle succeeded on the full input: there is no failure to reduce. Check that the command actually fails on the unreduced input, or disable precondition validation."
    )]
    FullInputSucceeded,

    /// The oracle reported failure on the empty input.
    #[error(
        "oracle failed on the empty input: reduction would trivially return nothing. Check that the command passes when given an empty input."
    )]
    EmptyInputFailed,

    /// The reduced result no longer reproduces the failure on re-verification.
    ///
    /// Only produced when `BisectConfig::reverify_result` is enabled; it
    /// indicates a non-deterministic oracle.
    #[error(
        "reduced result ({len} items) no longer reproduces the failure: the oracle is not deterministic. Re-run, or stabilize the command under test."
    )]
    UnstableResult {
        /// Length of the rejected result.
        len: usize,
    },

    // === Oracle invocation errors ===
    /// The oracle failed to produce a verdict.
    #[error("oracle invocation failed: {source}. The reduction was aborted; no partial result is available.")]
    OracleFailure {
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The oracle command could not be started.
    #[error("failed to launch oracle command {command:?}: {source}. Check that the program exists and is executable.")]
    OracleSpawn {
        /// The configured command string.
        command: String,
        /// The spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The oracle command exceeded its wall-clock budget and was killed.
    ///
    /// A killed invocation is a terminal error, never a failure verdict.
    #[error("oracle command timed out after {elapsed_ms}ms (budget: {budget_ms}ms) and was killed. Raise --timeout-secs or speed up the command.")]
    OracleTimeout {
        /// How long the command ran before the kill.
        elapsed_ms: u64,
        /// The configured budget.
        budget_ms: u64,
    },

    // === I/O errors ===
    /// Wraps `std::io::Error` for file operations.
    #[error("I/O error: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    // === Configuration errors ===
    /// A configuration value is invalid.
    #[error("invalid config: {field} = \"{value}\": {reason}")]
    InvalidConfig {
        /// Which config field.
        field: String,
        /// The invalid value.
        value: String,
        /// Why it is invalid.
        reason: String,
    },

    // === Command-line errors ===
    /// The command line could not be parsed.
    #[error("usage error: {0}")]
    Usage(String),
}

/// Convenience alias used throughout the frankenbisect crate hierarchy.
pub type BisectResult<T> = Result<T, BisectError>;
