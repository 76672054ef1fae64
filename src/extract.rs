//! Catalog extraction: flattened records → item exports + summaries.
//!
//! Mirrors the source fields one-to-one: the author keeps only the
//! surname, prices are validated, summed per entry and converted to
//! constant francs, and format/term references are reduced to their
//! numeric code. A conversion failure is reported as a fault on the
//! catalog and the item keeps its nominal price only — one bad item
//! never takes the catalog down.

use regex::Regex;
use std::sync::LazyLock;

use crate::price::PriceConverter;
use crate::stats::PriceStats;
use crate::types::{CatalogItem, CatalogSummary, RawCatalog, RawItem};

// ── Field patterns ─────────────────────────────────────────────────

// Author surname: everything before the first parenthesis, period,
// comma, semicolon or dash. "Barry (Ch.)" → "Barry ".
static RE_SURNAME_CUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^(.,;-]+)").unwrap());

// A price must be a plain decimal number.
static RE_PRICE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?").unwrap());

// First integer in a reference string: "#document_format_8" → 8.
static RE_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

// 4-digit year in a sale date like "1887-11".
static RE_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

/// Everything extracted from one catalog file.
#[derive(Debug)]
pub struct CatalogExtraction {
    pub catalog_id: String,
    pub items: Vec<CatalogItem>,
    pub summary: CatalogSummary,
    /// Per-item diagnostics (failed conversions, duplicate ids).
    pub faults: Vec<String>,
}

/// Turns flattened catalogs into output records using an injected
/// price converter.
pub struct Extractor<'a> {
    converter: &'a PriceConverter,
}

impl<'a> Extractor<'a> {
    pub fn new(converter: &'a PriceConverter) -> Self {
        Extractor { converter }
    }

    pub fn extract_catalog(&self, raw: &RawCatalog) -> CatalogExtraction {
        let sale_year = raw.sale_date.as_deref().and_then(extract_sale_year);
        let mut faults = Vec::new();

        let mut items = Vec::new();
        let mut seen_ids = std::collections::HashSet::new();
        // (id, constant price) pairs feeding the catalog statistics
        let mut priced = Vec::new();
        let mut catalog_currency: Option<String> = None;

        for raw_item in &raw.items {
            if !seen_ids.insert(raw_item.id.clone()) {
                faults.push(format!("duplicate item id {}", raw_item.id));
                continue;
            }

            let (price, currency) = sum_price_measures(raw_item);
            if catalog_currency.is_none() {
                catalog_currency = currency.clone();
            }

            let price_constant = match (price, sale_year, currency.as_deref()) {
                (Some(p), Some(year), Some(cur)) => {
                    match self.converter.to_constant(p, year, cur) {
                        Ok(v) => Some(v),
                        Err(e) => {
                            faults.push(format!("item {}: {e}", raw_item.id));
                            None
                        }
                    }
                }
                _ => None,
            };

            if let Some(v) = price_constant {
                priced.push((raw_item.id.clone(), v));
            }

            items.push(CatalogItem {
                id: raw_item.id.clone(),
                price,
                price_constant,
                currency,
                author: raw_item.author.as_deref().and_then(author_surname),
                sale_date: raw.sale_date.clone(),
                date: raw_item.date.clone(),
                page_count: raw_item.pages.as_deref().and_then(|p| p.trim().parse().ok()),
                format_code: raw_item.format.as_deref().and_then(reference_code),
                term_code: raw_item.term.as_deref().and_then(reference_code),
                desc: raw_item.desc.clone(),
            });
        }

        let summary = CatalogSummary {
            title: raw.title.clone(),
            sale_date: raw.sale_date.clone(),
            item_count: items.len(),
            currency: catalog_currency,
            prices: PriceStats::compute(&priced),
        };

        CatalogExtraction {
            catalog_id: raw.id.clone(),
            items,
            summary,
            faults,
        }
    }
}

// ── Field extraction helpers ───────────────────────────────────────

/// Surname-only author: cut at the first parenthesis/punctuation and trim.
fn author_surname(raw: &str) -> Option<String> {
    RE_SURNAME_CUT
        .captures(raw)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Sum every valid currency measure of an entry; the first measure's
/// unit is the entry's currency.
fn sum_price_measures(item: &RawItem) -> (Option<f64>, Option<String>) {
    let mut total: Option<f64> = None;
    let mut currency = None;

    for m in &item.measures {
        let text = m.quantity.as_deref().or(m.text.as_deref()).unwrap_or("");
        let text = text.trim();
        if !RE_PRICE.is_match(text) {
            continue;
        }
        let Ok(value) = text.parse::<f64>() else {
            continue;
        };
        total = Some(total.unwrap_or(0.0) + value);
        if currency.is_none() {
            currency = Some(m.unit.clone());
        }
    }

    (total, currency)
}

/// First integer of a format/term reference string.
fn reference_code(reference: &str) -> Option<u32> {
    RE_NUMBER
        .find(reference)
        .and_then(|m| m.as_str().parse().ok())
}

fn extract_sale_year(sale_date: &str) -> Option<u16> {
    RE_YEAR
        .find(sale_date)
        .and_then(|m| m.as_str().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::{ForeignIndex, PriceIndex};
    use crate::types::RawMeasure;

    fn converter() -> PriceConverter {
        let index = PriceIndex::build(&[(1889, 1.12), (1900, 1.25)]).expect("index");
        PriceConverter::new(index, ForeignIndex::default())
    }

    fn measure(unit: &str, quantity: &str) -> RawMeasure {
        RawMeasure {
            unit: unit.to_string(),
            quantity: Some(quantity.to_string()),
            text: None,
        }
    }

    fn one_item_catalog() -> RawCatalog {
        RawCatalog {
            id: "CAT_000112".to_string(),
            title: Some("REVUE DES CURIOSITÉS DE L'HISTOIRE".to_string()),
            sale_date: Some("1887-11".to_string()),
            items: vec![RawItem {
                id: "CAT_000112_e18_d1".to_string(),
                author: Some("Barry (Ch.)".to_string()),
                trait_text: Some("célèbre architecte anglais, né en 1796, mort en 1860".to_string()),
                desc: "L. a. s. au colonel Fox; 1846, 1 p. in-8.".to_string(),
                date: Some("1846".to_string()),
                pages: Some("1".to_string()),
                format: Some("#document_format_8".to_string()),
                term: Some("#document_type_7".to_string()),
                measures: vec![measure("FRF", "15")],
            }],
        }
    }

    #[test]
    fn end_to_end_single_item() {
        let converter = converter();
        let ex = Extractor::new(&converter).extract_catalog(&one_item_catalog());

        assert!(ex.faults.is_empty());
        assert_eq!(ex.items.len(), 1);
        let item = &ex.items[0];
        assert_eq!(item.author.as_deref(), Some("Barry"));
        assert_eq!(item.price, Some(15.0));
        assert_eq!(item.currency.as_deref(), Some("FRF"));
        assert_eq!(item.page_count, Some(1.0));
        assert_eq!(item.format_code, Some(8));
        assert_eq!(item.term_code, Some(7));

        // 1887 predates the earliest documented row: flat extrapolation
        let idx = converter.index().index_for(1887).unwrap();
        let expected = (15.0 * idx * 100.0).round() / 100.0;
        assert_eq!(item.price_constant, Some(expected));

        let prices = ex.summary.prices.expect("summary prices");
        assert_eq!(prices.total, expected);
        assert_eq!(ex.summary.item_count, 1);
        assert_eq!(ex.summary.currency.as_deref(), Some("FRF"));
    }

    #[test]
    fn multiple_measures_sum_before_conversion() {
        let mut raw = one_item_catalog();
        raw.items[0].measures = vec![measure("FRF", "15"), measure("FRF", "55")];
        let converter = converter();
        let ex = Extractor::new(&converter).extract_catalog(&raw);

        assert_eq!(ex.items[0].price, Some(70.0));
        let idx = converter.index().index_for(1887).unwrap();
        assert_eq!(
            ex.items[0].price_constant,
            Some((70.0 * idx * 100.0).round() / 100.0)
        );
    }

    #[test]
    fn unpriced_item_has_no_summary_block() {
        let mut raw = one_item_catalog();
        raw.items[0].measures.clear();
        let converter = converter();
        let ex = Extractor::new(&converter).extract_catalog(&raw);

        assert_eq!(ex.items[0].price, None);
        assert!(ex.summary.prices.is_none());
        assert!(ex.summary.currency.is_none());
    }

    #[test]
    fn unknown_currency_is_a_fault_not_an_abort() {
        let mut raw = one_item_catalog();
        raw.items[0].measures = vec![measure("GBP", "2")];
        let converter = converter();
        let ex = Extractor::new(&converter).extract_catalog(&raw);

        assert_eq!(ex.items.len(), 1);
        assert_eq!(ex.items[0].price, Some(2.0));
        assert_eq!(ex.items[0].price_constant, None);
        assert_eq!(ex.faults.len(), 1);
        assert!(ex.faults[0].contains("GBP"));
    }

    #[test]
    fn duplicate_item_id_is_dropped_with_a_fault() {
        let mut raw = one_item_catalog();
        let dup = raw.items[0].clone();
        raw.items.push(dup);
        let converter = converter();
        let ex = Extractor::new(&converter).extract_catalog(&raw);

        assert_eq!(ex.items.len(), 1);
        assert_eq!(ex.faults.len(), 1);
        assert!(ex.faults[0].contains("duplicate"));
    }

    #[test]
    fn author_cut_variants() {
        assert_eq!(author_surname("Barry (Ch.)").as_deref(), Some("Barry"));
        assert_eq!(author_surname("Hugo, Victor").as_deref(), Some("Hugo"));
        assert_eq!(author_surname("Saint;Simon").as_deref(), Some("Saint"));
        assert_eq!(author_surname("(anonyme)"), None);
    }
}
