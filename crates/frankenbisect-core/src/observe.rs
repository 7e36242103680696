//! Observer hooks for reduction progress.
//!
//! The engine has no process-wide logging state; progress is reported
//! through an injected [`StepObserver`] invoked synchronously at
//! well-defined points. Observers are informational only and must not
//! influence the algorithm outcome.

use serde::Serialize;

use crate::tracing_config::TARGET_PREFIX;

/// A single progress record emitted by the bisector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReductionStep {
    /// Recursion depth of the call emitting this step (0 = top level).
    pub depth: usize,
    /// Size of the fixed prefix at this point.
    pub fixed_len: usize,
    /// Size of the candidate set still under consideration.
    pub candidate_len: usize,
}

/// Synchronous progress callbacks from the bisection engine.
///
/// Both methods default to no-ops so implementors can pick the granularity
/// they care about.
pub trait StepObserver {
    /// Called once when a reduction call begins on a `(fixed, candidate)`
    /// pair, including recursive calls.
    fn on_enter(&mut self, _depth: usize, _fixed_len: usize, _candidate_len: usize) {}

    /// Called at the top of each halving iteration, before any oracle call
    /// for that iteration.
    fn on_step(&mut self, _depth: usize, _fixed_len: usize, _candidate_len: usize) {}
}

/// The default observer: discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {}

/// Observer that forwards progress as structured `tracing` events under the
/// `frankenbisect` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl StepObserver for TracingObserver {
    fn on_enter(&mut self, depth: usize, fixed_len: usize, candidate_len: usize) {
        tracing::debug!(
            target: TARGET_PREFIX,
            depth,
            fixed_len,
            candidate_len,
            "entering reduction call"
        );
    }

    fn on_step(&mut self, depth: usize, fixed_len: usize, candidate_len: usize) {
        tracing::debug!(
            target: TARGET_PREFIX,
            depth,
            fixed_len,
            candidate_len,
            candidates = fixed_len + candidate_len,
            "halving iteration"
        );
    }
}

/// Observer that records every step for post-hoc inspection.
///
/// Useful for audit trails and determinism tests: two runs against the same
/// deterministic oracle must record identical step sequences.
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    /// All recorded halving iterations, in emission order.
    pub steps: Vec<ReductionStep>,
}

impl RecordingObserver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize the recorded steps as JSONL (one JSON object per line).
    #[must_use]
    pub fn steps_to_jsonl(&self) -> String {
        self.steps
            .iter()
            .filter_map(|step| serde_json::to_string(step).ok())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl StepObserver for RecordingObserver {
    fn on_step(&mut self, depth: usize, fixed_len: usize, candidate_len: usize) {
        self.steps.push(ReductionStep {
            depth,
            fixed_len,
            candidate_len,
        });
    }
}
