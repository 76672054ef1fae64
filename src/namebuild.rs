//! First-name reconstruction from abbreviated fragments.
//!
//! Dispatches on the matcher's category and resolves against the
//! abbreviation tables. A missing table entry is an expected outcome
//! carried by the `reconstructed`/`residual` flags, never an error:
//! the compound table is queried first because a compound abbreviation
//! gives context to its parts, then each initial is resolved on its own.

use serde::Serialize;

use crate::matcher::{self, NameCategory};
use crate::tables::NameTables;

/// Outcome of one reconstruction attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RebuiltName {
    /// Normalized full first name; empty when nothing resolved.
    pub full_first_name: String,
    /// The exact substring the matcher classified.
    pub matched: String,
    /// At least one abbreviation was expanded via the tables.
    pub reconstructed: bool,
    /// Some abbreviated part stayed unresolved. `None` when there was
    /// nothing to resolve in the first place.
    pub residual: Option<bool>,
}

/// Rebuilds full first names from abbreviated fragments using injected
/// abbreviation tables.
#[derive(Debug, Clone)]
pub struct NameBuilder {
    tables: NameTables,
}

impl NameBuilder {
    pub fn new(tables: NameTables) -> Self {
        NameBuilder { tables }
    }

    /// Classify `fragment` and rebuild the full first name.
    pub fn rebuild(&self, fragment: &str) -> RebuiltName {
        let m = matcher::classify(fragment);
        let matched = m.matched.unwrap_or_default();

        match m.category {
            NameCategory::CompoundAbbreviated => self.rebuild_compound(&matched),
            NameCategory::SimpleAbbreviated => self.rebuild_simple(&matched),
            NameCategory::FullName => RebuiltName {
                // Already unabbreviated: trusted verbatim
                full_first_name: matched.to_lowercase(),
                matched,
                reconstructed: false,
                residual: Some(false),
            },
            NameCategory::NoMatch => RebuiltName {
                full_first_name: String::new(),
                matched,
                reconstructed: false,
                residual: None,
            },
        }
    }

    fn rebuild_compound(&self, matched: &str) -> RebuiltName {
        // "J.-B." → "j b": periods out, hyphens to spaces, lowercased
        let key = matched.replace('.', "").replace('-', " ").to_lowercase();

        if let Some(full) = self.tables.compound.get(key.trim()) {
            return RebuiltName {
                full_first_name: full.clone(),
                matched: matched.to_string(),
                reconstructed: true,
                residual: Some(false),
            };
        }

        // Fall back to resolving each part on its own, keeping
        // unresolved parts as-is.
        let mut parts = Vec::new();
        let mut any_resolved = false;
        let mut any_unresolved = false;
        for token in key.split_whitespace() {
            match self.tables.simple.get(token) {
                Some(full) => {
                    parts.push(full.as_str());
                    any_resolved = true;
                }
                None => {
                    parts.push(token);
                    any_unresolved = true;
                }
            }
        }

        RebuiltName {
            full_first_name: parts.join(" "),
            matched: matched.to_string(),
            reconstructed: any_resolved,
            residual: Some(any_unresolved),
        }
    }

    fn rebuild_simple(&self, matched: &str) -> RebuiltName {
        let key = matched.trim_end_matches('.').to_lowercase();

        match self.tables.simple.get(&key) {
            Some(full) => RebuiltName {
                full_first_name: full.clone(),
                matched: matched.to_string(),
                reconstructed: true,
                residual: Some(false),
            },
            None => RebuiltName {
                full_first_name: String::new(),
                matched: matched.to_string(),
                reconstructed: false,
                residual: Some(true),
            },
        }
    }
}

impl Default for NameBuilder {
    fn default() -> Self {
        NameBuilder::new(NameTables::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compound_round_trip() {
        let b = NameBuilder::default();
        let r = b.rebuild("J.-B.");
        assert_eq!(r.full_first_name, "jean baptiste");
        assert_eq!(r.matched, "J.-B.");
        assert!(r.reconstructed);
        assert_eq!(r.residual, Some(false));
    }

    #[test]
    fn compound_falls_back_to_initials() {
        // "V.-G." is not in the compound table; both initials resolve alone
        let b = NameBuilder::default();
        let r = b.rebuild("V.-G.");
        assert_eq!(r.full_first_name, "victor guillaume");
        assert!(r.reconstructed);
        assert_eq!(r.residual, Some(false));
    }

    #[test]
    fn compound_partial_resolution_keeps_residue() {
        let b = NameBuilder::default();
        let r = b.rebuild("Ch.-Zéphyrin");
        assert_eq!(r.full_first_name, "charles zéphyrin");
        assert!(r.reconstructed);
        assert_eq!(r.residual, Some(true));
    }

    #[test]
    fn simple_lookup() {
        let b = NameBuilder::default();
        let r = b.rebuild("Ch.");
        assert_eq!(r.full_first_name, "charles");
        assert!(r.reconstructed);
        assert_eq!(r.residual, Some(false));
    }

    #[test]
    fn simple_unknown_is_not_an_error() {
        let b = NameBuilder::default();
        let r = b.rebuild("Xyz.");
        assert_eq!(r.full_first_name, "");
        assert!(!r.reconstructed);
        assert_eq!(r.residual, Some(true));
    }

    #[test]
    fn full_name_trusted_verbatim() {
        let b = NameBuilder::default();
        let r = b.rebuild("Maximilien de Béthune");
        assert_eq!(r.full_first_name, "maximilien");
        assert!(!r.reconstructed);
        assert_eq!(r.residual, Some(false));
    }

    #[test]
    fn nothing_to_resolve() {
        let b = NameBuilder::default();
        let r = b.rebuild("du Barry");
        assert_eq!(r.full_first_name, "");
        assert!(!r.reconstructed);
        assert_eq!(r.residual, None);
    }

    #[test]
    fn substitute_tables() {
        let tables = NameTables::from_pairs(&[("z", "zénobie")], &[]);
        let b = NameBuilder::new(tables);
        let r = b.rebuild("Z.");
        assert_eq!(r.full_first_name, "zénobie");
        assert!(r.reconstructed);
    }
}
