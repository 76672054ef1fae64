//! Knowledge-base query dispatch.
//!
//! A resolved entity becomes a full-text search string which is sent to
//! the Wikidata search endpoint; the first hit's title is the entity id.
//! Query construction is pure and separately testable; the network call
//! sits behind a trait so the pipeline can run with a stub.

use serde::Deserialize;

use crate::error::QueryError;
use crate::resolver::{EntityKind, ResolvedEntity};
use crate::tables::Gazetteer;

// ── Query construction ─────────────────────────────────────────────

/// Build the search string for an entity. `None` means "do not query":
/// filler entries, charters, and person records that resolved to nothing.
pub fn build_query(entity: &ResolvedEntity, occupation: Option<&str>) -> Option<String> {
    if !entity.is_queryable() {
        return None;
    }

    match entity.kind {
        EntityKind::Geography => {
            let geo = entity.geographic.as_ref()?;
            let mut text = geo.name.clone();
            if let Some(year) = &geo.year {
                // The reference often spells its own year already
                if !text.contains(year.as_str()) {
                    text.push(' ');
                    text.push_str(year);
                }
            }
            Some(text)
        }
        EntityKind::Person => {
            let name = entity.name.as_ref()?;
            let mut parts = Vec::new();
            if !name.first_name.is_empty() {
                parts.push(name.first_name.clone());
            }
            if !name.surname.is_empty() {
                parts.push(name.surname.to_lowercase());
            }
            if let Some(land) = &name.land_name {
                parts.push(land.to_lowercase());
            }
            if let Some(occ) = occupation {
                parts.push(occ.to_string());
            }
            Some(parts.join(" "))
        }
        EntityKind::DocumentBundle | EntityKind::Charter => None,
    }
}

/// First occupation whose French variant appears in the trait text.
/// Used to sharpen the query for common surnames.
pub fn occupation_hint(gazetteer: &Gazetteer, trait_text: &str) -> Option<String> {
    let fold = trait_text.to_lowercase();
    for (canonical, variants) in &gazetteer.occupations {
        if variants.iter().any(|v| fold.contains(v.as_str())) {
            return Some(canonical.clone());
        }
    }
    None
}

// ── Search endpoint ────────────────────────────────────────────────

/// A full-text search over some knowledge base, returning the id of the
/// best match if any.
pub trait KnowledgeBase {
    fn search(&self, query: &str) -> Result<Option<String>, QueryError>;
}

const WIKIDATA_ENDPOINT: &str = "https://www.wikidata.org/w/api.php";

/// Wikidata full-text search client.
pub struct WikidataClient {
    http: reqwest::blocking::Client,
    endpoint: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    query: Option<SearchBody>,
}

#[derive(Deserialize)]
struct SearchBody {
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct SearchHit {
    title: String,
}

impl WikidataClient {
    pub fn new() -> Self {
        Self::with_endpoint(WIKIDATA_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Self {
        WikidataClient {
            http: reqwest::blocking::Client::new(),
            endpoint: endpoint.to_string(),
        }
    }
}

impl Default for WikidataClient {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeBase for WikidataClient {
    fn search(&self, query: &str) -> Result<Option<String>, QueryError> {
        let response: SearchResponse = self
            .http
            .get(self.endpoint.as_str())
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query),
                ("format", "json"),
            ])
            .send()?
            .json()?;

        let body = response.query.ok_or(QueryError::BadResponse)?;
        Ok(body.search.into_iter().next().map(|hit| hit.title))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::EntityResolver;

    fn resolver() -> EntityResolver {
        EntityResolver::default()
    }

    #[test]
    fn person_query_joins_name_parts() {
        let e = resolver().resolve("Barry (Ch.)", "célèbre architecte anglais");
        let q = build_query(&e, None).expect("queryable");
        assert_eq!(q, "charles barry");
    }

    #[test]
    fn titled_person_query_carries_the_land_name() {
        let e = resolver().resolve("Sully (Maximilien de Béthune, duc de)", "");
        let q = build_query(&e, None).expect("queryable");
        assert_eq!(q, "maximilien béthune sully");
    }

    #[test]
    fn occupation_enriches_the_query() {
        let gaz = Gazetteer::default();
        let trait_text = "célèbre architecte anglais, né en 1796";
        let occ = occupation_hint(&gaz, trait_text);
        assert_eq!(occ.as_deref(), Some("architect"));

        let e = resolver().resolve("Barry (Ch.)", trait_text);
        let q = build_query(&e, occ.as_deref()).expect("queryable");
        assert_eq!(q, "charles barry architect");
    }

    #[test]
    fn unresolved_entities_are_not_queried() {
        let e = resolver().resolve("DOCUMENTS", "");
        assert!(build_query(&e, None).is_none());
        let e = resolver().resolve("...", "");
        assert!(build_query(&e, None).is_none());
    }

    #[test]
    fn geographic_query_uses_the_reference() {
        let e = resolver().resolve("Siège de Paris, 1870", "");
        let q = build_query(&e, None).expect("queryable");
        assert_eq!(q, "siège de paris, 1870");
    }
}
