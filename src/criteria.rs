//! The declarative data model for match intent.
//!
//! A pattern is described as an ordered list of [`Criterion`] values plus one
//! [`MatchFlags`] set. Order matters: fragments concatenate left to right.
//! These types are the shape the external preset store persists and reloads,
//! so they carry serde derives matching the stored field names.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

use crate::{Error, Result};

/// One fragment of intended match behavior.
///
/// `id` is an opaque correlation token for the editing UI. It must be unique
/// within the containing list but has no effect on compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    /// Unique identifier within the containing list
    pub id: String,
    /// Selects the fragment-emission rule
    pub kind: CriterionKind,
    /// Free-form text; meaning depends on `kind`. May be empty.
    #[serde(default)]
    pub value: String,
    /// Quantifier to append; ignored for anchored kinds
    #[serde(default)]
    pub repetition: Repetition,
}

impl Criterion {
    #[must_use]
    pub fn new(id: impl Into<String>, kind: CriterionKind, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            value: value.into(),
            repetition: Repetition::One,
        }
    }

    /// Same criterion with a different repetition.
    #[must_use]
    pub fn with_repetition(mut self, repetition: Repetition) -> Self {
        self.repetition = repetition;
        self
    }
}

/// The closed set of fragment kinds.
///
/// A kind name not in this set (e.g. from a stale stored preset) deserializes
/// to [`CriterionKind::Unknown`], which compiles as an escaped literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum CriterionKind {
    StartsWith,
    EndsWith,
    Contains,
    Exact,
    Digit,
    WordChar,
    Whitespace,
    AnyChar,
    LetterUpper,
    LetterLower,
    CustomClass,
    Group,
    Or,
    Not,
    Literal,
    Unknown,
}

impl<'de> Deserialize<'de> for CriterionKind {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        // Stored presets may carry kind names from newer or older versions;
        // those fall back to Unknown rather than failing the whole preset.
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_string(&name))
    }
}

impl std::fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::StartsWith => "starts_with",
            Self::EndsWith => "ends_with",
            Self::Contains => "contains",
            Self::Exact => "exact",
            Self::Digit => "digit",
            Self::WordChar => "word_char",
            Self::Whitespace => "whitespace",
            Self::AnyChar => "any_char",
            Self::LetterUpper => "letter_upper",
            Self::LetterLower => "letter_lower",
            Self::CustomClass => "custom_class",
            Self::Group => "group",
            Self::Or => "or",
            Self::Not => "not",
            Self::Literal => "literal",
            Self::Unknown => "unknown",
        };
        write!(f, "{s}")
    }
}

impl CriterionKind {
    /// Convert a kind name to the enum.
    ///
    /// Never fails: an unrecognized name maps to [`Self::Unknown`], which
    /// compiles as an escaped literal.
    #[must_use]
    pub fn from_string(str: &str) -> Self {
        match str {
            "starts_with" => Self::StartsWith,
            "ends_with" => Self::EndsWith,
            "contains" => Self::Contains,
            "exact" => Self::Exact,
            "digit" => Self::Digit,
            "word_char" => Self::WordChar,
            "whitespace" => Self::Whitespace,
            "any_char" => Self::AnyChar,
            "letter_upper" => Self::LetterUpper,
            "letter_lower" => Self::LetterLower,
            "custom_class" => Self::CustomClass,
            "group" => Self::Group,
            "or" => Self::Or,
            "not" => Self::Not,
            "literal" => Self::Literal,
            _ => Self::Unknown,
        }
    }

    /// Anchored kinds are complete assertions, never quantified.
    #[must_use]
    pub const fn is_anchored(self) -> bool {
        matches!(self, Self::StartsWith | Self::EndsWith | Self::Exact)
    }
}

/// How many times a fragment should match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "snake_case")]
pub enum Repetition {
    #[default]
    One,
    ZeroOrMore,
    OneOrMore,
    Optional,
    Lazy,
    /// No automatic operator; a free-form quantifier like `{2,5}` is expected
    /// to live inside the criterion `value` for raw-content kinds.
    Custom,
}

impl std::fmt::Display for Repetition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::One => "one",
            Self::ZeroOrMore => "zero_or_more",
            Self::OneOrMore => "one_or_more",
            Self::Optional => "optional",
            Self::Lazy => "lazy",
            Self::Custom => "custom",
        };
        write!(f, "{s}")
    }
}

impl Repetition {
    /// Convert a repetition name to the enum.
    ///
    /// # Errors
    /// when the given repetition name is not supported
    pub fn from_string(str: &str) -> Result<Self> {
        match str {
            "one" => Ok(Self::One),
            "zero_or_more" => Ok(Self::ZeroOrMore),
            "one_or_more" => Ok(Self::OneOrMore),
            "optional" => Ok(Self::Optional),
            "lazy" => Ok(Self::Lazy),
            "custom" => Ok(Self::Custom),
            _ => Err(Error::InvalidRepetitionName {
                name: str.to_string(),
            }),
        }
    }

    /// Quantifier operator appended to a fragment.
    #[must_use]
    pub const fn operator(self) -> &'static str {
        match self {
            Self::One | Self::Custom => "",
            Self::ZeroOrMore => "*",
            Self::OneOrMore => "+",
            Self::Optional => "?",
            Self::Lazy => "*?",
        }
    }
}

/// The four independent match flags. All combinations are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchFlags {
    /// Collect every occurrence, not just the first
    pub global: bool,
    /// Case-insensitive comparison
    pub case_insensitive: bool,
    /// Anchors match at line boundaries
    pub multiline: bool,
    /// Wildcard also matches newlines
    pub dot_all: bool,
}

impl MatchFlags {
    /// Serialize the enabled flags as letters, always in `g` `i` `m` `s` order.
    #[must_use]
    pub fn letters(&self) -> String {
        let mut letters = String::with_capacity(4);
        if self.global {
            letters.push('g');
        }
        if self.case_insensitive {
            letters.push('i');
        }
        if self.multiline {
            letters.push('m');
        }
        if self.dot_all {
            letters.push('s');
        }
        letters
    }

    /// Whether `c` belongs to the legal flag-letter alphabet.
    #[must_use]
    pub const fn is_flag_letter(c: char) -> bool {
        matches!(c, 'g' | 'i' | 'm' | 's')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    #[test]
    fn flag_letters_keep_fixed_order() {
        let flags = MatchFlags {
            dot_all: true,
            global: true,
            multiline: true,
            case_insensitive: true,
        };
        assert_eq!(flags.letters(), "gims");

        let flags = MatchFlags {
            dot_all: true,
            global: true,
            ..MatchFlags::default()
        };
        assert_eq!(flags.letters(), "gs");

        assert_eq!(MatchFlags::default().letters(), "");
    }

    #[test]
    fn kind_names_round_trip() {
        for kind in CriterionKind::iter() {
            if kind == CriterionKind::Unknown {
                continue;
            }
            assert_eq!(CriterionKind::from_string(&kind.to_string()), kind);
        }
        assert_eq!(
            CriterionKind::from_string("no_such_kind"),
            CriterionKind::Unknown
        );
    }

    #[rstest]
    #[case("one", Repetition::One)]
    #[case("zero_or_more", Repetition::ZeroOrMore)]
    #[case("one_or_more", Repetition::OneOrMore)]
    #[case("optional", Repetition::Optional)]
    #[case("lazy", Repetition::Lazy)]
    #[case("custom", Repetition::Custom)]
    fn repetition_names_round_trip(#[case] name: &str, #[case] expected: Repetition) {
        let repetition = Repetition::from_string(name).expect("known repetition name");
        assert_eq!(repetition, expected);
        assert_eq!(repetition.to_string(), name);
    }

    #[test]
    fn unknown_repetition_name_is_an_error() {
        assert!(Repetition::from_string("twice").is_err());
    }

    #[test]
    fn stored_criterion_shape_deserializes() {
        let criterion: Criterion = serde_json::from_str(
            r#"{"id":"c1","kind":"starts_with","value":"http","repetition":"one"}"#,
        )
        .expect("valid stored criterion");
        assert_eq!(criterion.kind, CriterionKind::StartsWith);
        assert_eq!(criterion.value, "http");
        assert_eq!(criterion.repetition, Repetition::One);
    }

    #[test]
    fn stored_criterion_with_stale_kind_falls_back_to_unknown() {
        let criterion: Criterion =
            serde_json::from_str(r#"{"id":"c1","kind":"lookbehind","value":"x"}"#)
                .expect("stale kind still deserializes");
        assert_eq!(criterion.kind, CriterionKind::Unknown);
        assert_eq!(criterion.repetition, Repetition::One);
    }

    #[test]
    fn stored_flags_shape_round_trips() {
        let flags = MatchFlags {
            global: true,
            case_insensitive: true,
            ..MatchFlags::default()
        };
        let json = serde_json::to_string(&flags).expect("flags serialize");
        assert_eq!(
            json,
            r#"{"global":true,"caseInsensitive":true,"multiline":false,"dotAll":false}"#
        );
        let back: MatchFlags = serde_json::from_str(&json).expect("flags deserialize");
        assert_eq!(back, flags);
    }
}
