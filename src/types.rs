//! Input and output record types.
//!
//! The XML layer is an external collaborator: it flattens each TEI
//! catalog into one JSON document of simple string/number fields, which
//! is what the raw types here deserialize. The output types are written
//! once per extraction run, keyed by item/catalog id, and never mutated.

use serde::{Deserialize, Serialize};

use crate::stats::PriceStats;

// ── Flattened catalog input ────────────────────────────────────────

/// One catalog file as produced by the upstream flattening step.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCatalog {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub sale_date: Option<String>,
    #[serde(default)]
    pub items: Vec<RawItem>,
}

/// One catalog entry, fields as they appear in the source.
#[derive(Debug, Clone, Deserialize)]
pub struct RawItem {
    pub id: String,
    /// Raw author string, e.g. "Barry (Ch.)"
    #[serde(default)]
    pub author: Option<String>,
    /// Biographical free text attached to the entry
    #[serde(default)]
    pub trait_text: Option<String>,
    #[serde(default)]
    pub desc: String,
    /// Document date (@when), distinct from the catalog sale date
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub pages: Option<String>,
    /// Format reference, e.g. "#document_format_8"
    #[serde(default)]
    pub format: Option<String>,
    /// Term reference, e.g. "#document_type_7"
    #[serde(default)]
    pub term: Option<String>,
    /// Currency measures; an entry may carry several prices that are
    /// summed before conversion
    #[serde(default)]
    pub measures: Vec<RawMeasure>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMeasure {
    /// Currency code, e.g. "FRF"
    pub unit: String,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

// ── Output records ─────────────────────────────────────────────────

/// One extracted item, written once to the item export keyed by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    /// Nominal price in the original currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Price in constant 1900 francs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_constant: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Author surname only, cut before any parenthesis or punctuation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_code: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_code: Option<u32>,
    pub desc: String,
}

/// Per-catalog summary. The price block exists only when at least one
/// item carried a currency-tagged price.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_date: Option<String>,
    pub item_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub prices: Option<PriceStats>,
}
