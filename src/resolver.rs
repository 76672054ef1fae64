//! Entity classification for raw catalog name strings.
//!
//! A catalog entry name is one of four things: a filler entry for a bundle
//! of miscellaneous documents, a charter, a geographic or historical
//! reference, or a person. The rules are evaluated in a fixed order and the
//! first match wins, the same discipline the matcher applies to its
//! patterns.
//!
//! Real data examples:
//!   DOCUMENTS                                → document bundle
//!   Chartes (quatre)                         → charter
//!   Bretagne (documents sur la)              → geography
//!   Siège de Paris, 1870                     → geography (event)
//!   Barry (Ch.)                              → person
//!   Sully (Maximilien de Béthune, duc de)    → person, duke, land name Sully

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::namebuild::NameBuilder;
use crate::tables::Gazetteer;

// ── Generic patterns ───────────────────────────────────────────────

// Filler entries: the whole name is "document(s)"/"divers" noise.
static RE_BUNDLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:documents?|divers)(?:\s+(?:documents?|divers))*\s*\.?\s*$").unwrap()
});

// Charter entries open with "charte"/"chartes".
static RE_CHARTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*chartes?\b").unwrap());

// 4-digit years, for event references and biographical traits.
static RE_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b(\d{4})\b").unwrap());

// Parenthesized first-name/title fragment.
static RE_PAREN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([^)]*)\)").unwrap());

// Adjacent capitalized tokens glued together by an OCR/transcription slip:
// "ÉtienneFrançois" → "Étienne François".
static RE_GLUED_CAPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\p{Ll})(\p{Lu})").unwrap());

// ── Output types ───────────────────────────────────────────────────

/// What a raw catalog name turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    DocumentBundle,
    Charter,
    Geography,
    Person,
}

/// A geographic or historical reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeographicRef {
    pub name: String,
    /// Auxiliary qualifier: which gazetteer (or special rule) matched.
    pub category: String,
    /// Event year, when the reference carries one ("Siège de Paris, 1870").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

/// A person name normalized for knowledge-base matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedName {
    pub first_name: String,
    pub surname: String,
    pub nobility_titles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub land_name: Option<String>,
    pub reconstructed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residual: Option<bool>,
}

/// A fully classified catalog entry name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedEntity {
    pub kind: EntityKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<ResolvedName>,
    pub dates: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geographic: Option<GeographicRef>,
}

impl ResolvedEntity {
    /// Whether downstream code may build a search query from this entity.
    /// An empty person record means "unresolved, do not query".
    pub fn is_queryable(&self) -> bool {
        match self.kind {
            EntityKind::DocumentBundle | EntityKind::Charter => false,
            EntityKind::Geography => self.geographic.is_some(),
            EntityKind::Person => self
                .name
                .as_ref()
                .is_some_and(|n| !n.surname.is_empty() || !n.first_name.is_empty()),
        }
    }
}

// ── Title matching ─────────────────────────────────────────────────

/// One nobility/status title variant with its compiled patterns.
struct TitlePattern {
    canonical: String,
    /// Word-boundary detection pattern
    detect: Regex,
    /// Removal pattern: the title phrase with its leading article and
    /// trailing preposition ("le duc de", ", cte de")
    strip: Regex,
}

fn compile_titles(table: &[(String, Vec<String>)]) -> Vec<TitlePattern> {
    let mut patterns = Vec::new();
    for (canonical, variants) in table {
        for v in variants {
            let escaped = regex::escape(v);
            let detect = Regex::new(&format!(r"(?i)\b{escaped}\b")).expect("title detect regex");
            let strip = Regex::new(&format!(
                r"(?i),?\s*(?:\b(?:le|la)\s+)?\b{escaped}\b(?:\s+(?:de|du|des)\b|\s+d')?"
            ))
            .expect("title strip regex");
            patterns.push(TitlePattern {
                canonical: canonical.clone(),
                detect,
                strip,
            });
        }
    }
    patterns
}

// ── Resolver ───────────────────────────────────────────────────────

/// Classifies raw catalog name strings against the injected gazetteers.
pub struct EntityResolver {
    builder: NameBuilder,
    gazetteer: Gazetteer,
    titles: Vec<TitlePattern>,
    /// Occupation variants used as status markers only.
    status_markers: Vec<Regex>,
    /// Multi-word gazetteer entries, matched by substring since they never
    /// survive tokenization ("côte d'ivoire", "guyenne et gascogne").
    phrase_entries: Vec<(String, &'static str)>,
}

impl EntityResolver {
    pub fn new(builder: NameBuilder, gazetteer: Gazetteer) -> Self {
        let titles = compile_titles(&gazetteer.nobility);

        let status_markers = gazetteer
            .occupations
            .iter()
            .flat_map(|(_, variants)| variants.iter())
            .map(|v| {
                Regex::new(&format!(r"(?i)\b{}\b", regex::escape(v)))
                    .expect("status marker regex")
            })
            .collect();

        let mut phrase_entries = Vec::new();
        for (set, label) in [
            (&gazetteer.departments, "department"),
            (&gazetteer.provinces, "province"),
            (&gazetteer.colonies, "colony"),
            (&gazetteer.countries, "country"),
        ] {
            for entry in set {
                if entry.contains(' ') {
                    phrase_entries.push((entry.clone(), label));
                }
            }
        }

        EntityResolver {
            builder,
            gazetteer,
            titles,
            status_markers,
            phrase_entries,
        }
    }

    /// Classify a raw name string with its biographical trait text.
    /// Never fails: unclassifiable input degrades to an empty person
    /// record, which downstream treats as "do not query".
    pub fn resolve(&self, raw_name: &str, trait_text: &str) -> ResolvedEntity {
        let name = raw_name.trim();
        let dates = extract_years(trait_text);

        // 1. Filler entry for a bundle of miscellaneous documents.
        if name.is_empty() || RE_BUNDLE.is_match(name) {
            return ResolvedEntity {
                kind: EntityKind::DocumentBundle,
                name: None,
                dates: Vec::new(),
                geographic: None,
            };
        }

        // 2. Charter.
        if RE_CHARTER.is_match(name) {
            return ResolvedEntity {
                kind: EntityKind::Charter,
                name: None,
                dates,
                geographic: None,
            };
        }

        // 3. Geographic / historical reference.
        if let Some(geo) = self.try_geography(name) {
            return ResolvedEntity {
                kind: EntityKind::Geography,
                name: None,
                dates,
                geographic: Some(geo),
            };
        }

        // 4. Person.
        ResolvedEntity {
            kind: EntityKind::Person,
            name: Some(self.resolve_person(name)),
            dates,
            geographic: None,
        }
    }

    // ── Rule 3: geography ──────────────────────────────────────────

    /// A name is geographic when a token hits the gazetteers, no
    /// nobility/status marker is present, and the parenthesized fragment
    /// does not resolve to a person name. A name carrying both a place
    /// token and a status marker is a person.
    fn try_geography(&self, name: &str) -> Option<GeographicRef> {
        let fold = name.to_lowercase();

        let (token, category) = self.gazetteer_hit(&fold)?;

        if self.has_status_marker(name) {
            return None;
        }
        if self.fragment_resolves_to_name(name) {
            return None;
        }

        // Hard-coded person-name exceptions win over every geographic rule.
        let bare = fold
            .trim()
            .trim_end_matches(['.', ',', ';'])
            .trim()
            .to_string();
        if self.gazetteer.person_exceptions.contains(&bare) {
            return None;
        }

        // Religious building: department token + church marker.
        if category == "department"
            && self
                .gazetteer
                .church_markers
                .iter()
                .any(|m| fold.contains(m.as_str()))
        {
            return Some(GeographicRef {
                name: bare,
                category: "church".to_string(),
                year: None,
            });
        }

        // Specific named place.
        for place in &self.gazetteer.places {
            if fold.contains(place.as_str()) {
                return Some(GeographicRef {
                    name: place.clone(),
                    category: "place".to_string(),
                    year: None,
                });
            }
        }

        // Historical event: keyword + gazetteer token + optional year.
        if self
            .gazetteer
            .event_keywords
            .iter()
            .any(|k| fold.contains(k.as_str()))
        {
            let year = extract_years(name).into_iter().next();
            return Some(GeographicRef {
                name: bare,
                category: "event".to_string(),
                year,
            });
        }

        // Generic fallback: record the matched token and its gazetteer
        // category as the auxiliary qualifier.
        Some(GeographicRef {
            name: token,
            category: category.to_string(),
            year: None,
        })
    }

    /// First gazetteer hit in the case-folded name, single tokens first,
    /// then multi-word entries by substring.
    fn gazetteer_hit(&self, fold: &str) -> Option<(String, &'static str)> {
        for token in tokenize(fold) {
            if let Some(cat) = self.gazetteer.categorize(token) {
                return Some((token.to_string(), cat.as_str()));
            }
        }
        for (entry, label) in &self.phrase_entries {
            if fold.contains(entry.as_str()) {
                return Some((entry.clone(), label));
            }
        }
        None
    }

    fn has_status_marker(&self, name: &str) -> bool {
        self.titles.iter().any(|t| t.detect.is_match(name))
            || self.status_markers.iter().any(|r| r.is_match(name))
    }

    fn fragment_resolves_to_name(&self, name: &str) -> bool {
        match paren_fragment(name) {
            Some(fragment) => !self.builder.rebuild(&fragment).matched.is_empty(),
            None => false,
        }
    }

    // ── Rule 4: person ─────────────────────────────────────────────

    /// Split the name into the pre-parenthesis head and the fragment,
    /// rebuild the first name, collect titles, and carve the surname out
    /// of the fragment residue. With a title present the head is the land
    /// name and the residue is the family name; without one the head is
    /// the surname.
    fn resolve_person(&self, name: &str) -> ResolvedName {
        let head = name
            .split('(')
            .next()
            .unwrap_or("")
            .trim()
            .trim_end_matches([',', ';', '.'])
            .trim()
            .to_string();
        let fragment = paren_fragment(name).unwrap_or_default();

        let rebuilt = self.builder.rebuild(&fragment);

        // Titles in order of appearance in the fragment (fall back to the
        // whole name for entries without parentheses).
        let title_scope = if fragment.is_empty() { name } else { &fragment };
        let mut found: Vec<(usize, &TitlePattern)> = self
            .titles
            .iter()
            .filter_map(|t| t.detect.find(title_scope).map(|m| (m.start(), t)))
            .collect();
        found.sort_by_key(|(pos, _)| *pos);
        let mut nobility_titles = Vec::new();
        for (_, t) in &found {
            if !nobility_titles.contains(&t.canonical) {
                nobility_titles.push(t.canonical.clone());
            }
        }

        // With a title the pre-parenthesis head is the seigneurie, not the
        // family name: "Sully (Maximilien de Béthune, duc de)" puts the
        // surname in the fragment residue. Without parentheses there is no
        // separate head to keep as a land name.
        let (surname, land_name) = if nobility_titles.is_empty() {
            (head, None)
        } else {
            let residue = self.carve_surname(title_scope, &rebuilt.matched, &found);
            if fragment.is_empty() {
                (residue, None)
            } else {
                (residue, some_nonempty(head))
            }
        };

        ResolvedName {
            first_name: rebuilt.full_first_name,
            surname,
            nobility_titles,
            land_name,
            reconstructed: rebuilt.reconstructed,
            residual: rebuilt.residual,
        }
    }

    /// Fixed substitution sequence: drop the matched first-name substring,
    /// strip each matched title phrase with its articles/prepositions,
    /// split glued capitalized tokens, then drop noise words and
    /// punctuation from what is left.
    fn carve_surname(
        &self,
        fragment: &str,
        matched_name: &str,
        found_titles: &[(usize, &TitlePattern)],
    ) -> String {
        let mut residue = fragment.to_string();

        if !matched_name.is_empty() {
            residue = residue.replacen(matched_name, "", 1);
        }
        for (_, t) in found_titles {
            residue = t.strip.replace_all(&residue, "").into_owned();
        }
        residue = RE_GLUED_CAPS.replace_all(&residue, "$1 $2").into_owned();

        let mut kept = Vec::new();
        for token in residue.split([' ', ',', ';', '(', ')']) {
            let token = token.trim().trim_matches(['.', ',', ';']);
            if token.is_empty() {
                continue;
            }
            if self.gazetteer.noise_words.contains(&token.to_lowercase()) {
                continue;
            }
            kept.push(token);
        }
        kept.join(" ")
    }
}

impl Default for EntityResolver {
    fn default() -> Self {
        EntityResolver::new(NameBuilder::default(), Gazetteer::default())
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// All 4-digit years in a text, in order of appearance.
pub fn extract_years(text: &str) -> Vec<String> {
    RE_YEAR
        .captures_iter(text)
        .map(|c| c[1].to_string())
        .collect()
}

fn paren_fragment(name: &str) -> Option<String> {
    RE_PAREN
        .captures(name)
        .map(|c| c[1].trim().to_string())
        .filter(|f| !f.is_empty())
}

/// Tokens for gazetteer lookup: hyphens and apostrophes stay inside a
/// token ("pas-de-calais", "côte-d'or"), everything else separates.
fn tokenize(fold: &str) -> impl Iterator<Item = &str> {
    fold.split(|c: char| !(c.is_alphabetic() || c == '-' || c == '\''))
        .map(|t| t.trim_matches(['-', '\'']))
        .filter(|t| !t.is_empty())
}

fn some_nonempty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::NameTables;

    fn resolver() -> EntityResolver {
        EntityResolver::default()
    }

    #[test]
    fn filler_entries_are_bundles() {
        let r = resolver();
        assert_eq!(r.resolve("DOCUMENTS", "").kind, EntityKind::DocumentBundle);
        assert_eq!(
            r.resolve("Documents divers", "").kind,
            EntityKind::DocumentBundle
        );
        assert_eq!(r.resolve("   ", "").kind, EntityKind::DocumentBundle);
    }

    #[test]
    fn bundle_has_all_fields_empty() {
        let e = resolver().resolve("DOCUMENTS", "né en 1750");
        assert_eq!(e.kind, EntityKind::DocumentBundle);
        assert!(e.name.is_none());
        assert!(e.dates.is_empty());
        assert!(e.geographic.is_none());
    }

    #[test]
    fn charter() {
        let e = resolver().resolve("Chartes (quatre)", "");
        assert_eq!(e.kind, EntityKind::Charter);
    }

    #[test]
    fn plain_geography() {
        let e = resolver().resolve("Bretagne (documents sur la)", "");
        assert_eq!(e.kind, EntityKind::Geography);
        let geo = e.geographic.expect("geographic ref");
        assert_eq!(geo.name, "bretagne");
        assert_eq!(geo.category, "province");
    }

    #[test]
    fn historical_event_with_year() {
        let e = resolver().resolve("Siège de Paris, 1870", "");
        assert_eq!(e.kind, EntityKind::Geography);
        let geo = e.geographic.expect("geographic ref");
        assert_eq!(geo.category, "event");
        assert_eq!(geo.year.as_deref(), Some("1870"));
    }

    #[test]
    fn church_beats_generic_department() {
        let e = resolver().resolve("Église de la Manche", "");
        assert_eq!(e.kind, EntityKind::Geography);
        let geo = e.geographic.expect("geographic ref");
        assert_eq!(geo.category, "church");
    }

    #[test]
    fn specific_place() {
        let e = resolver().resolve("Versailles et la Seine", "");
        let geo = e.geographic.expect("geographic ref");
        assert_eq!(geo.category, "place");
        assert_eq!(geo.name, "versailles");
    }

    #[test]
    fn nobility_marker_forces_person_over_geography() {
        // "berry" is a province, but a title marker means person
        let e = resolver().resolve("Berry (Ch., duc de)", "");
        assert_eq!(e.kind, EntityKind::Person);
        let name = e.name.expect("name");
        assert_eq!(name.nobility_titles, vec!["duke".to_string()]);
        assert_eq!(name.land_name.as_deref(), Some("Berry"));
    }

    #[test]
    fn resolvable_fragment_forces_person() {
        // "paris" is a department token, but the fragment is a first name
        let e = resolver().resolve("Paris (Alexis)", "");
        assert_eq!(e.kind, EntityKind::Person);
        let name = e.name.expect("name");
        assert_eq!(name.first_name, "alexis");
        assert_eq!(name.surname, "Paris");
    }

    #[test]
    fn person_name_exception() {
        let e = resolver().resolve("Anne de Bretagne", "");
        assert_eq!(e.kind, EntityKind::Person);
    }

    #[test]
    fn plain_person_with_abbreviated_first_name() {
        let e = resolver().resolve("Barry (Ch.)", "célèbre architecte anglais, né en 1796, mort en 1860");
        assert_eq!(e.kind, EntityKind::Person);
        let name = e.name.expect("name");
        assert_eq!(name.first_name, "charles");
        assert_eq!(name.surname, "Barry");
        assert!(name.reconstructed);
        assert_eq!(name.residual, Some(false));
        assert_eq!(e.dates, vec!["1796".to_string(), "1860".to_string()]);
    }

    #[test]
    fn titled_person_land_name_and_residue_surname() {
        let e = resolver().resolve("Sully (Maximilien de Béthune, duc de)", "");
        assert_eq!(e.kind, EntityKind::Person);
        let name = e.name.expect("name");
        assert_eq!(name.first_name, "maximilien");
        assert_eq!(name.surname, "Béthune");
        assert_eq!(name.nobility_titles, vec!["duke".to_string()]);
        assert_eq!(name.land_name.as_deref(), Some("Sully"));
    }

    #[test]
    fn glued_capitals_are_split() {
        let e = resolver().resolve("Choiseul (ÉtienneFrançois, comte de)", "");
        let name = e.name.expect("name");
        assert_eq!(name.nobility_titles, vec!["count".to_string()]);
        // "Étienne" parses as the first name; "François" survives as residue
        assert_eq!(name.first_name, "étienne");
        assert_eq!(name.surname, "François");
    }

    #[test]
    fn malformed_input_degrades_to_unqueryable_person() {
        let e = resolver().resolve("...", "");
        assert_eq!(e.kind, EntityKind::Person);
        assert!(!e.is_queryable());
    }

    #[test]
    fn substitute_gazetteer() {
        let mut gaz = Gazetteer::default();
        gaz.provinces.insert("atlantide".to_string());
        let r = EntityResolver::new(NameBuilder::new(NameTables::default()), gaz);
        let e = r.resolve("Atlantide", "");
        assert_eq!(e.kind, EntityKind::Geography);
    }
}
