//! Recursive bisection reduction of a failure-inducing input.
//!
//! [`reduce`] shrinks a candidate sequence as far as halving allows while
//! the oracle keeps reproducing the target failure; [`Bisector`] wraps it
//! with the driver-level precondition checks.
//!
//! # Algorithm
//!
//! Each iteration splits the candidate in two ([`split_halves`]) and keeps
//! whichever half still reproduces the failure on its own. When neither
//! half suffices, the failure is a joint property of both halves and the
//! engine falls back to a two-way recursion: shrink the right half with the
//! left held fixed, then shrink the left half with the already-shrunk right
//! held fixed. The recursion is sequential by construction; the second
//! call's fixed prefix depends on the first call's result.
//!
//! Recursion depth is `O(log n)` when single halves keep sufficing and can
//! degrade toward `O(n)` stack frames when every level needs the two-way
//! split. That stack cost is accepted rather than capped.

use crate::error::{BisectError, BisectResult};
use crate::observe::{NoopObserver, StepObserver};
use crate::oracle::Oracle;
use crate::split::split_halves;

/// Driver configuration for [`Bisector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BisectConfig {
    /// Verify, before reducing, that the full input reproduces the failure
    /// and the empty input does not. On by default: reduction is
    /// meaningless without the first and trivially empty without the
    /// second. Disable only for oracles whose boundary behavior is already
    /// established by the caller.
    pub validate_preconditions: bool,

    /// Re-run the oracle on the final result and fail with
    /// [`BisectError::UnstableResult`] if it no longer reproduces. Off by
    /// default; a deterministic oracle never trips it.
    pub reverify_result: bool,
}

impl Default for BisectConfig {
    fn default() -> Self {
        Self {
            validate_preconditions: true,
            reverify_result: false,
        }
    }
}

/// The reduction driver: precondition checks plus the bisection engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bisector {
    config: BisectConfig,
}

impl Bisector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_config(config: BisectConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &BisectConfig {
        &self.config
    }

    /// Reduce `items` to a small subsequence that still reproduces the
    /// failure, validating the oracle's boundary behavior first when
    /// configured.
    ///
    /// # Errors
    ///
    /// - [`BisectError::FullInputSucceeded`] if validation is on and the
    ///   full input does not reproduce the failure.
    /// - [`BisectError::EmptyInputFailed`] if validation is on and the
    ///   empty input already reproduces it.
    /// - [`BisectError::UnstableResult`] if re-verification is on and the
    ///   result stopped reproducing.
    /// - Any error raised by the oracle, propagated unchanged.
    pub fn run<T, O>(&self, oracle: &O, items: &[T]) -> BisectResult<Vec<T>>
    where
        T: Clone,
        O: Oracle<T> + ?Sized,
    {
        self.run_observed(oracle, items, &mut NoopObserver)
    }

    /// Like [`Bisector::run`], reporting progress to `observer`.
    ///
    /// # Errors
    ///
    /// Same as [`Bisector::run`].
    pub fn run_observed<T, O>(
        &self,
        oracle: &O,
        items: &[T],
        observer: &mut dyn StepObserver,
    ) -> BisectResult<Vec<T>>
    where
        T: Clone,
        O: Oracle<T> + ?Sized,
    {
        if self.config.validate_preconditions {
            if oracle.evaluate(items)?.succeeded() {
                return Err(BisectError::FullInputSucceeded);
            }
            if oracle.evaluate(&[])?.reproduced() {
                return Err(BisectError::EmptyInputFailed);
            }
        }

        let reduced = reduce_impl(oracle, &[], items, 0, observer)?;

        if self.config.reverify_result && oracle.evaluate(&reduced)?.succeeded() {
            return Err(BisectError::UnstableResult {
                len: reduced.len(),
            });
        }

        Ok(reduced)
    }
}

/// Reduce `items` as far as halving allows, with every oracle evaluation
/// performed against `fixed ++ candidate`.
///
/// Callers must establish the entry invariant that `fixed ++ items`
/// reproduces the failure; the engine maintains it through every split and
/// recursion but does not re-verify it. The result is always a subsequence
/// of `items` in original relative order (empty only if `items` was empty).
///
/// # Errors
///
/// Propagates oracle errors unchanged; the engine adds no failure modes of
/// its own.
pub fn reduce<T, O>(oracle: &O, fixed: &[T], items: &[T]) -> BisectResult<Vec<T>>
where
    T: Clone,
    O: Oracle<T> + ?Sized,
{
    reduce_impl(oracle, fixed, items, 0, &mut NoopObserver)
}

/// Like [`reduce`], reporting progress to `observer`.
///
/// # Errors
///
/// Propagates oracle errors unchanged.
pub fn reduce_observed<T, O>(
    oracle: &O,
    fixed: &[T],
    items: &[T],
    observer: &mut dyn StepObserver,
) -> BisectResult<Vec<T>>
where
    T: Clone,
    O: Oracle<T> + ?Sized,
{
    reduce_impl(oracle, fixed, items, 0, observer)
}

fn reduce_impl<T, O>(
    oracle: &O,
    fixed: &[T],
    items: &[T],
    depth: usize,
    observer: &mut dyn StepObserver,
) -> BisectResult<Vec<T>>
where
    T: Clone,
    O: Oracle<T> + ?Sized,
{
    observer.on_enter(depth, fixed.len(), items.len());

    let mut items = items.to_vec();
    while items.len() > 1 {
        observer.on_step(depth, fixed.len(), items.len());

        let (left, right) = split_halves(&items);

        let with_left = join(fixed, left);
        if oracle.evaluate(&with_left)?.reproduced() {
            let kept = left.to_vec();
            items = kept;
            continue;
        }

        let with_right = join(fixed, right);
        if oracle.evaluate(&with_right)?.reproduced() {
            let kept = right.to_vec();
            items = kept;
            continue;
        }

        // Neither half alone reproduces: the failure needs elements from
        // both. Shrink the right half holding the left fixed, then the left
        // half holding the shrunk right fixed. `with_left` is exactly
        // `fixed ++ left`, so it doubles as the first recursion's prefix.
        let new_right = reduce_impl(oracle, &with_left, right, depth + 1, observer)?;
        let with_new_right = join(fixed, &new_right);
        let mut reduced = reduce_impl(oracle, &with_new_right, left, depth + 1, observer)?;
        reduced.extend(new_right);
        return Ok(reduced);
    }

    Ok(items)
}

fn join<T: Clone>(fixed: &[T], tail: &[T]) -> Vec<T> {
    let mut joined = Vec::with_capacity(fixed.len() + tail.len());
    joined.extend_from_slice(fixed);
    joined.extend_from_slice(tail);
    joined
}
