//! Core types and algorithm for the frankenbisect input reducer.
//!
//! This crate defines the oracle contract ([`Oracle`], [`Verdict`]), the
//! halving splitter ([`split_halves`]), the recursive bisection engine
//! ([`reduce`], [`Bisector`]), observer hooks ([`StepObserver`]), and the
//! unified error type ([`BisectError`]).
//!
//! It has minimal external dependencies and is intended to be depended on by
//! every other crate in the workspace. Concrete oracle adapters (external
//! processes, temp files) live in `frankenbisect-cli`.

#![forbid(unsafe_code)]

pub mod bisect;
pub mod error;
pub mod observe;
pub mod oracle;
pub mod split;
pub mod tracing_config;

pub use bisect::{BisectConfig, Bisector, reduce, reduce_observed};
pub use error::{BisectError, BisectResult};
pub use observe::{NoopObserver, RecordingObserver, ReductionStep, StepObserver, TracingObserver};
pub use oracle::{Oracle, Verdict};
pub use split::split_halves;
