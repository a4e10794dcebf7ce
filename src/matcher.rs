//! Guarded evaluation of delimited pattern strings.
//!
//! The compiled pattern may come from [`crate::compiler::compile`] or be typed
//! by hand; either way it is untrusted input for a classical backtracking
//! engine, so every evaluation runs under a wall-clock budget. The budget is
//! enforced by racing the match attempt on a worker thread against
//! `recv_timeout` on the calling side: the engine itself is opaque and cannot
//! be interrupted mid-match, so a timed-out attempt is abandoned and its late
//! result discarded, not preempted. This is an approximation of cancellation,
//! not a hard real-time guarantee.

use std::{sync::mpsc, thread, time::Duration};

use tracing::{debug, warn};

use crate::criteria::MatchFlags;

/// Default wall-clock ceiling for one evaluation.
pub const DEFAULT_BUDGET: Duration = Duration::from_millis(100);

/// Tunables for one evaluation call.
#[derive(Debug, Clone, Copy)]
pub struct EvalOptions {
    /// Wall-clock ceiling covering both the boolean test and the collection
    /// pass of a single evaluation.
    pub budget: Duration,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            budget: DEFAULT_BUDGET,
        }
    }
}

/// Why an evaluation could not produce a match result.
///
/// Carried inside [`MatchOutcome`], never raised; every failure mode is
/// contained here and reported by value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalFailure {
    /// The input string does not have the `/pattern/flags` shape.
    #[error("pattern must use the /pattern/flags format")]
    MalformedPattern,

    /// The host engine refused the pattern body; the engine's own message is
    /// surfaced verbatim.
    #[error("{0}")]
    EngineRejected(String),

    /// The match attempt outlived its budget and was abandoned.
    #[error("execution exceeded time budget (possible catastrophic backtracking)")]
    BudgetExceeded,
}

/// Result of one evaluation. Created fresh per call and immutable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchOutcome {
    /// Whether the pattern matched the subject at all
    pub matched: bool,
    /// Every non-overlapping matched substring, in order. A zero-width match
    /// legitimately yields `matched == true` with empty-string parts.
    pub matched_parts: Vec<String>,
    /// Populated when the evaluation could not run to completion
    pub failure: Option<EvalFailure>,
}

impl MatchOutcome {
    /// The quiet "nothing to test yet" outcome: no match, no failure.
    #[must_use]
    pub const fn quiet() -> Self {
        Self {
            matched: false,
            matched_parts: Vec::new(),
            failure: None,
        }
    }

    /// An outcome carrying a failure descriptor and no match.
    #[must_use]
    pub const fn failed(failure: EvalFailure) -> Self {
        Self {
            matched: false,
            matched_parts: Vec::new(),
            failure: Some(failure),
        }
    }

    /// A completed run, matched or not.
    #[must_use]
    pub const fn completed(matched: bool, matched_parts: Vec<String>) -> Self {
        Self {
            matched,
            matched_parts,
            failure: None,
        }
    }
}

/// Evaluate `pattern` against `subject` under the default budget.
#[must_use]
pub fn evaluate(pattern: &str, subject: &str) -> MatchOutcome {
    evaluate_with_options(pattern, subject, &EvalOptions::default())
}

/// Evaluate `pattern` against `subject`.
///
/// Every exit path returns a [`MatchOutcome`]; compilation and execution
/// faults never escape. The empty pattern and the degenerate `//` form
/// short-circuit to [`MatchOutcome::quiet`].
#[must_use]
pub fn evaluate_with_options(pattern: &str, subject: &str, options: &EvalOptions) -> MatchOutcome {
    if pattern.is_empty() || pattern == "//" {
        return MatchOutcome::quiet();
    }

    let Some((body, letters)) = split_delimited(pattern) else {
        debug!(pattern, "input failed delimited-format validation");
        return MatchOutcome::failed(EvalFailure::MalformedPattern);
    };

    // The engine only understands i/m/s; g is ours and means "collect all",
    // which the collection pass does unconditionally anyway.
    let engine_flags: String = letters
        .chars()
        .filter(|c| matches!(c, 'i' | 'm' | 's'))
        .collect();
    let regex = match regress::Regex::with_flags(body, engine_flags.as_str()) {
        Ok(regex) => regex,
        Err(err) => {
            debug!(pattern, %err, "engine rejected pattern body");
            return MatchOutcome::failed(EvalFailure::EngineRejected(err.to_string()));
        }
    };

    // Race both passes against the budget. The worker owns its inputs so it
    // can safely outlive this call if abandoned.
    let (tx, rx) = mpsc::channel();
    let subject = subject.to_owned();
    thread::spawn(move || {
        let matched = regex.find(&subject).is_some();
        let matched_parts: Vec<String> = regex
            .find_iter(&subject)
            .map(|m| subject[m.range()].to_string())
            .collect();
        // The receiver is gone if the budget already expired.
        let _ = tx.send((matched, matched_parts));
    });

    match rx.recv_timeout(options.budget) {
        Ok((matched, matched_parts)) => MatchOutcome::completed(matched, matched_parts),
        Err(mpsc::RecvTimeoutError::Timeout) => {
            warn!(
                pattern,
                budget_ms = options.budget.as_millis() as u64,
                "match attempt abandoned after exceeding budget"
            );
            MatchOutcome::failed(EvalFailure::BudgetExceeded)
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => MatchOutcome::failed(
            EvalFailure::EngineRejected("matcher worker exited before producing a result".into()),
        ),
    }
}

/// Split a `/body/flags` string into body and flag letters.
///
/// The body may itself contain `/`; the split is on the last delimiter, and
/// everything after it must come from the flag-letter alphabet.
fn split_delimited(pattern: &str) -> Option<(&str, &str)> {
    let rest = pattern.strip_prefix('/')?;
    let close = rest.rfind('/')?;
    let (body, letters) = (&rest[..close], &rest[close + 1..]);
    if letters.chars().all(MatchFlags::is_flag_letter) {
        Some((body, letters))
    } else {
        None
    }
}
