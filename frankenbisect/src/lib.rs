//! frankenbisect: delta-debugging input minimization for Rust.
//!
//! Given an ordered collection of opaque items and an oracle reporting
//! whether a candidate subset still reproduces a target failure,
//! frankenbisect computes a small order-preserving subsequence that still
//! fails. Typical inputs: crash logs, compiler flag lists, JIT inclusion
//! lists.
//!
//! The core is the recursive bisection engine in [`frankenbisect_core`];
//! [`frankenbisect_cli`] adds the `fbisect` binary and the shell-command
//! oracle adapter for reducing files against an external command.
//!
//! ```
//! use frankenbisect::{Bisector, Verdict};
//!
//! // Failure reproduces exactly when both 1 and 5 survive.
//! let oracle = |candidate: &[i32]| {
//!     let joint = candidate.contains(&1) && candidate.contains(&5);
//!     Ok(Verdict::from_success(!joint))
//! };
//!
//! let reduced = Bisector::new().run(&oracle, &[1, 2, 3, 4, 5]).unwrap();
//! assert_eq!(reduced, vec![1, 5]);
//! ```

#![forbid(unsafe_code)]

pub use frankenbisect_cli as cli;
pub use frankenbisect_core as core;

pub use frankenbisect_core::{
    BisectConfig, BisectError, BisectResult, Bisector, NoopObserver, Oracle, RecordingObserver,
    ReductionStep, StepObserver, TracingObserver, Verdict, reduce, reduce_observed, split_halves,
};

pub use frankenbisect_cli::ShellOracle;
