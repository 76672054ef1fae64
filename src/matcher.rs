//! First-name pattern classification.
//!
//! Classifies a trimmed name fragment into one of three pattern
//! categories with strict precedence. The ordering is load-bearing:
//! a compound pattern like "J.-B." must never decompose into two
//! independent simple matches, and a full name like "Jean Charles" must
//! never be absorbed by the simple pattern that would otherwise eat any
//! leading capitalized token.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

// ── Regex patterns ─────────────────────────────────────────────────
//
// Real data examples:
//   Compound abbreviated:
//     J.-B. de Tocqueville
//     Ch.-Marie
//     L.-Ph., duc d'Orléans
//   Simple abbreviated:
//     Ch.
//     Guill. de Machaut
//   Full name:
//     Maximilien de Béthune
//     Jean Charles
//     Marie-Antoinette

// Pattern 1: compound abbreviated first name.
// Two or more parts joined by hyphen or space, first character uppercase,
// internals lowercase (accented letters included via Unicode classes).
// The "at least one part abbreviated" constraint is checked on the match,
// not in the pattern.
static RE_COMPOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<m>\p{Lu}\p{Ll}*\.?(?:[-\s]\p{Lu}\p{Ll}*\.?)+)").unwrap()
});

// Pattern 2: simple abbreviated first name.
// One capital, optional lowercase letters, terminating period.
static RE_SIMPLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<m>\p{Lu}\p{Ll}*\.)").unwrap());

// Pattern 3: fully spelled first name.
// One or two capitalized words, optionally hyphen-joined, no period.
static RE_FULL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?P<m>\p{Lu}\p{Ll}+(?:[-\s]\p{Lu}\p{Ll}+)?)").unwrap());

// ── Types ──────────────────────────────────────────────────────────

/// Which pattern category a fragment fell into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameCategory {
    /// "J.-B.", "Ch.-Marie" — multi-part, at least one part abbreviated
    CompoundAbbreviated,
    /// "Ch.", "Guill." — single abbreviated part
    SimpleAbbreviated,
    /// "Maximilien", "Jean Charles" — spelled out, trusted verbatim
    FullName,
    /// Nothing matched
    NoMatch,
}

/// Result of a single classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatch {
    pub matched: Option<String>,
    pub category: NameCategory,
}

impl NameMatch {
    fn none() -> Self {
        NameMatch {
            matched: None,
            category: NameCategory::NoMatch,
        }
    }
}

// ── Classification ─────────────────────────────────────────────────

/// Classify a trimmed name fragment. First matching category wins;
/// the attempt order is the contract.
pub fn classify(fragment: &str) -> NameMatch {
    let fragment = fragment.trim_start();

    // 1. Compound abbreviated. The regex also matches multi-word full
    // names, so require at least one abbreviating period in the match.
    if let Some(caps) = RE_COMPOUND.captures(fragment) {
        let m = caps.name("m").map(|m| m.as_str()).unwrap_or_default();
        if m.contains('.') {
            return NameMatch {
                matched: Some(m.to_string()),
                category: NameCategory::CompoundAbbreviated,
            };
        }
    }

    // 2. Simple abbreviated.
    if let Some(caps) = RE_SIMPLE.captures(fragment) {
        if let Some(m) = caps.name("m") {
            return NameMatch {
                matched: Some(m.as_str().to_string()),
                category: NameCategory::SimpleAbbreviated,
            };
        }
    }

    // 3. Full name.
    if let Some(caps) = RE_FULL.captures(fragment) {
        if let Some(m) = caps.name("m") {
            return NameMatch {
                matched: Some(m.as_str().to_string()),
                category: NameCategory::FullName,
            };
        }
    }

    NameMatch::none()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(fragment: &str) -> (Option<String>, NameCategory) {
        let m = classify(fragment);
        (m.matched, m.category)
    }

    #[test]
    fn compound_wins_over_simple() {
        // "J.-B." must never be split into two simple matches
        assert_eq!(
            matched("J.-B. de Tocqueville"),
            (
                Some("J.-B.".to_string()),
                NameCategory::CompoundAbbreviated
            )
        );
        assert_eq!(
            matched("Ch.-Marie"),
            (
                Some("Ch.-Marie".to_string()),
                NameCategory::CompoundAbbreviated
            )
        );
    }

    #[test]
    fn space_joined_compound() {
        assert_eq!(
            matched("M. Madeleine"),
            (
                Some("M. Madeleine".to_string()),
                NameCategory::CompoundAbbreviated
            )
        );
    }

    #[test]
    fn simple_abbreviated() {
        assert_eq!(
            matched("Ch."),
            (Some("Ch.".to_string()), NameCategory::SimpleAbbreviated)
        );
        assert_eq!(
            matched("Guill. de Machaut"),
            (Some("Guill.".to_string()), NameCategory::SimpleAbbreviated)
        );
    }

    #[test]
    fn full_name_not_absorbed_by_simple() {
        // No trailing period anywhere: the simple pattern must not fire
        assert_eq!(
            matched("Jean Charles"),
            (Some("Jean Charles".to_string()), NameCategory::FullName)
        );
        assert_eq!(
            matched("Maximilien de Béthune"),
            (Some("Maximilien".to_string()), NameCategory::FullName)
        );
    }

    #[test]
    fn accented_internals() {
        assert_eq!(
            matched("Ét."),
            (Some("Ét.".to_string()), NameCategory::SimpleAbbreviated)
        );
        assert_eq!(
            matched("Frédéric"),
            (Some("Frédéric".to_string()), NameCategory::FullName)
        );
    }

    #[test]
    fn abbreviation_followed_by_capitalized_word_is_compound() {
        // "Ét. Dumont" is two space-joined parts with one abbreviated:
        // the compound rule owns it, and the builder resolves it per part
        assert_eq!(
            matched("Ét. Dumont"),
            (
                Some("Ét. Dumont".to_string()),
                NameCategory::CompoundAbbreviated
            )
        );
    }

    #[test]
    fn no_match() {
        assert_eq!(matched("de la Tour"), (None, NameCategory::NoMatch));
        assert_eq!(matched(""), (None, NameCategory::NoMatch));
        assert_eq!(matched("1787"), (None, NameCategory::NoMatch));
    }
}
