//! Property tests: whatever the compiler emits, the matcher accepts.

use proptest::prelude::*;
use regexsmith::{compile, evaluate, Criterion, CriterionKind, EvalFailure, MatchFlags, Repetition};
use strum::IntoEnumIterator;

fn any_kind() -> impl Strategy<Value = CriterionKind> {
    proptest::sample::select(CriterionKind::iter().collect::<Vec<_>>())
}

fn any_repetition() -> impl Strategy<Value = Repetition> {
    proptest::sample::select(Repetition::iter().collect::<Vec<_>>())
}

fn any_criterion() -> impl Strategy<Value = Criterion> {
    (any_kind(), "[ -~]{0,8}", any_repetition()).prop_map(|(kind, value, repetition)| {
        Criterion::new("p", kind, value).with_repetition(repetition)
    })
}

fn any_flags() -> impl Strategy<Value = MatchFlags> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(global, case_insensitive, multiline, dot_all)| MatchFlags {
            global,
            case_insensitive,
            multiline,
            dot_all,
        },
    )
}

proptest! {
    /// Compiler output is always well-formed matcher input. Raw-content kinds
    /// may still be rejected by the engine, but never at the delimiter level.
    #[test]
    fn compiled_patterns_are_never_malformed(
        criteria in proptest::collection::vec(any_criterion(), 0..6),
        flags in any_flags(),
        subject in "[ -~]{0,16}",
    ) {
        let pattern = compile(&criteria, flags);
        let outcome = evaluate(&pattern, &subject);
        prop_assert_ne!(outcome.failure, Some(EvalFailure::MalformedPattern));
    }

    /// Repeated compilation of the same input is byte-identical.
    #[test]
    fn compilation_is_deterministic(
        criteria in proptest::collection::vec(any_criterion(), 0..6),
        flags in any_flags(),
    ) {
        prop_assert_eq!(compile(&criteria, flags), compile(&criteria, flags));
    }

    /// Escaped text used as a lone literal criterion matches itself.
    #[test]
    fn escaped_literal_matches_its_own_text(text in "[ -~]{1,10}") {
        let criteria = [Criterion::new("p", CriterionKind::Literal, text.clone())];
        let pattern = compile(&criteria, MatchFlags::default());
        let outcome = evaluate(&pattern, &text);
        prop_assert!(outcome.failure.is_none());
        prop_assert!(outcome.matched);
        prop_assert!(outcome.matched_parts.contains(&text));
    }
}
