//! regexsmith - deterministic pattern compilation and guarded evaluation
//!
//! This crate is the logic core behind a visual pattern builder: an ordered
//! list of [`Criterion`] descriptors plus a [`MatchFlags`] set compiles into
//! one delimited `/body/flags` pattern string, and that string (or a
//! hand-written one in the same format) evaluates against a subject string
//! under a wall-clock budget that contains catastrophic backtracking.
//!
//! The editing UI, preset persistence and everything else visual live outside
//! this crate and talk to it only through [`compile`] and [`evaluate`].

pub mod compiler;
pub mod criteria;
pub mod errors;
pub mod matcher;

pub use compiler::{compile, escape};
pub use criteria::{Criterion, CriterionKind, MatchFlags, Repetition};
pub use errors::{Error, Result};
pub use matcher::{
    evaluate, evaluate_with_options, EvalFailure, EvalOptions, MatchOutcome, DEFAULT_BUDGET,
};
