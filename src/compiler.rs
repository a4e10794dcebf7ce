//! Deterministic compilation of criteria into a delimited pattern string.
//!
//! `compile` is a pure function: the same criteria and flags always produce a
//! byte-identical `/body/flags` string, and it never fails. Raw-content kinds
//! (`custom_class`, `not`, `group`, `or`) insert their value unescaped by
//! design; a malformed body is the evaluator's problem, not the compiler's.

use tracing::debug;

use crate::criteria::{Criterion, CriterionKind, MatchFlags};

/// Characters that are syntactically special to the host regex dialect.
const SPECIAL: &[char] = &[
    '.', '*', '+', '?', '^', '$', '{', '}', '(', ')', '|', '[', ']', '\\',
];

/// Escape every special character in `text` so it matches literally.
///
/// Per-character and reversible; text with no special characters comes back
/// unchanged.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if SPECIAL.contains(&ch) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

/// Compile an ordered criteria list plus flags into one `/body/flags` string.
///
/// Returns the empty string for an empty list. That sentinel means "no
/// pattern yet" and is distinct from the delimited empty body `//`.
#[must_use]
pub fn compile(criteria: &[Criterion], flags: MatchFlags) -> String {
    if criteria.is_empty() {
        return String::new();
    }

    let mut body = String::new();
    for (index, criterion) in criteria.iter().enumerate() {
        body.push_str(&emit_fragment(criterion, index, criteria.len()));
    }

    let pattern = format!("/{body}/{}", flags.letters());
    debug!(%pattern, criteria = criteria.len(), "compiled pattern");
    pattern
}

/// Emit the pattern fragment for one criterion.
///
/// Anchors are held outside the fragment so that grouping and quantifiers
/// never swallow them; the end anchor in particular must land after the
/// closing group delimiter.
fn emit_fragment(criterion: &Criterion, index: usize, total: usize) -> String {
    let value = criterion.value.as_str();
    let (mut fragment, start_anchor, end_anchor) = match criterion.kind {
        CriterionKind::StartsWith => (escape(value), "^", ""),
        CriterionKind::EndsWith => (escape(value), "", "$"),
        CriterionKind::Exact => (escape(value), "^", "$"),
        CriterionKind::Contains | CriterionKind::Literal | CriterionKind::Unknown => {
            (escape(value), "", "")
        }
        CriterionKind::Digit => ("\\d".to_string(), "", ""),
        CriterionKind::WordChar => ("\\w".to_string(), "", ""),
        CriterionKind::Whitespace => ("\\s".to_string(), "", ""),
        CriterionKind::AnyChar => (".".to_string(), "", ""),
        CriterionKind::LetterUpper => ("[A-Z]".to_string(), "", ""),
        CriterionKind::LetterLower => ("[a-z]".to_string(), "", ""),
        CriterionKind::CustomClass => (format!("[{value}]"), "", ""),
        CriterionKind::Not => (format!("[^{value}]"), "", ""),
        CriterionKind::Group => (format!("({value})"), "", ""),
        CriterionKind::Or => (alternation(value), "", ""),
    };

    if needs_grouping(criterion, index, total) {
        fragment = format!("(?:{fragment})");
    }
    if !criterion.kind.is_anchored() {
        fragment.push_str(criterion.repetition.operator());
    }

    format!("{start_anchor}{fragment}{end_anchor}")
}

/// Split on commas, trim and escape each alternative, join with `|` inside a
/// non-capturing group.
fn alternation(value: &str) -> String {
    let alternatives: Vec<String> = value.split(',').map(|part| escape(part.trim())).collect();
    format!("(?:{})", alternatives.join("|"))
}

/// Whether this fragment must be wrapped in a non-capturing group before a
/// quantifier is applied.
///
/// Only multi-character escaped-literal bodies concatenated after another
/// fragment are ambiguous: a trailing quantifier would otherwise bind to the
/// last character alone. Class tokens, bracket classes and group/or fragments
/// are already self-delimiting, and a single character needs no protection.
fn needs_grouping(criterion: &Criterion, index: usize, total: usize) -> bool {
    let groupable = matches!(
        criterion.kind,
        CriterionKind::Contains
            | CriterionKind::Literal
            | CriterionKind::Unknown
            | CriterionKind::EndsWith
    );
    groupable && total > 1 && index > 0 && criterion.value.chars().count() > 1
}
