//! Oracle contract for the bisection engine.
//!
//! An [`Oracle`] evaluates a candidate item sequence and reports whether the
//! target failure still reproduces. The engine treats it as an opaque,
//! blocking, boolean-valued capability; determinism is assumed but not
//! enforced (a non-deterministic oracle makes the outcome non-reproducible
//! without crashing the algorithm).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BisectResult;

// ─── Verdict ────────────────────────────────────────────────────────────────

/// Outcome of a single oracle evaluation.
///
/// The polarity is fixed and deliberately spelled out as a two-variant type
/// rather than a raw bool: `Success` means the failure did *not* reproduce,
/// `FailureReproduced` means it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The candidate did not trigger the target failure.
    Success,
    /// The candidate still triggers the target failure.
    FailureReproduced,
}

impl Verdict {
    /// Map a success flag (e.g. a process exit status) to a verdict.
    #[must_use]
    pub const fn from_success(success: bool) -> Self {
        if success {
            Self::Success
        } else {
            Self::FailureReproduced
        }
    }

    /// Whether the failure reproduced.
    #[must_use]
    pub const fn reproduced(self) -> bool {
        matches!(self, Self::FailureReproduced)
    }

    /// Whether the candidate ran without the failure.
    #[must_use]
    pub const fn succeeded(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::FailureReproduced => write!(f, "failure_reproduced"),
        }
    }
}

// ─── Oracle Trait ───────────────────────────────────────────────────────────

/// A caller-supplied capability reporting whether a candidate sequence still
/// reproduces the target failure.
///
/// Items are opaque to the engine: they are never inspected, compared, or
/// reordered, only sliced and concatenated. Every evaluation receives the
/// current fixed prefix followed by the candidate under test, in original
/// relative order.
///
/// # Contract
///
/// - `evaluate` is synchronous and may block (e.g. on an external process).
///   The engine issues calls strictly one at a time.
/// - The oracle should be deterministic and side-effect-idempotent; the
///   engine assumes this but does not verify it (see
///   `BisectConfig::reverify_result` for optional hardening).
/// - Errors are terminal: the engine propagates them unchanged and aborts
///   the reduction without retrying.
pub trait Oracle<T> {
    /// Evaluate one candidate sequence.
    fn evaluate(&self, candidate: &[T]) -> BisectResult<Verdict>;
}

/// Closures are oracles. This keeps tests and embedded callers free of
/// adapter boilerplate:
///
/// ```
/// use frankenbisect_core::{Oracle, Verdict};
///
/// let oracle = |candidate: &[i32]| Ok(Verdict::from_success(!candidate.contains(&2)));
/// assert_eq!(oracle.evaluate(&[1, 3]).unwrap(), Verdict::Success);
/// assert_eq!(oracle.evaluate(&[1, 2]).unwrap(), Verdict::FailureReproduced);
/// ```
impl<T, F> Oracle<T> for F
where
    F: Fn(&[T]) -> BisectResult<Verdict>,
{
    fn evaluate(&self, candidate: &[T]) -> BisectResult<Verdict> {
        self(candidate)
    }
}
