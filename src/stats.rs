//! Catalog-level price statistics.
//!
//! Computed over the constant-value prices of every priced item in a
//! catalog, in a single accumulation pass (running sum/min/max and a
//! frequency map) plus one sort for the median. Frequency ties on the
//! mode resolve to the smallest value so the result is deterministic.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

/// Aggregate price figures for one catalog. All values constant francs.
/// Serialized field names match the summary record of the export file.
#[derive(Debug, Clone, Serialize)]
pub struct PriceStats {
    #[serde(rename = "total_price")]
    pub total: f64,
    #[serde(rename = "low_price")]
    pub low: f64,
    #[serde(rename = "high_price")]
    pub high: f64,
    #[serde(rename = "mean_price")]
    pub mean: f64,
    #[serde(rename = "median_price")]
    pub median: f64,
    #[serde(rename = "mode_price")]
    pub mode: f64,
    /// Population variance (÷N).
    #[serde(rename = "variance_of_price")]
    pub variance: f64,
    /// Every item priced at the maximum — ties all included.
    #[serde(rename = "highest_priced_items")]
    pub high_price_items: BTreeMap<String, f64>,
}

/// Prices arrive rounded to 2 decimals; integer cents give exact
/// equality for the frequency map and the max-price set.
fn to_cents(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

impl PriceStats {
    /// Compute statistics over (item id, constant price) pairs.
    /// Returns `None` for an empty list: a catalog without priced items
    /// has no summary statistics at all.
    pub fn compute(items: &[(String, f64)]) -> Option<Self> {
        if items.is_empty() {
            return None;
        }

        let mut total = 0.0f64;
        let mut low = f64::INFINITY;
        let mut high = f64::NEG_INFINITY;
        let mut freq: HashMap<i64, usize> = HashMap::new();
        for (_, price) in items {
            total += price;
            low = low.min(*price);
            high = high.max(*price);
            *freq.entry(to_cents(*price)).or_insert(0) += 1;
        }

        let n = items.len() as f64;
        let mean = total / n;
        let variance = items
            .iter()
            .map(|(_, p)| (p - mean) * (p - mean))
            .sum::<f64>()
            / n;

        // Mode: highest count, smallest value on a tie.
        let mode_cents = freq
            .iter()
            .map(|(&cents, &count)| (count, std::cmp::Reverse(cents)))
            .max()
            .map(|(_, std::cmp::Reverse(cents))| cents)
            .unwrap_or(0);
        let mode = mode_cents as f64 / 100.0;

        let mut sorted: Vec<f64> = items.iter().map(|(_, p)| *p).collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite prices"));
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 1 {
            sorted[mid]
        } else {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        };

        let high_cents = to_cents(high);
        let high_price_items = items
            .iter()
            .filter(|(_, p)| to_cents(*p) == high_cents)
            .map(|(id, p)| (id.clone(), *p))
            .collect();

        Some(PriceStats {
            total,
            low,
            high,
            mean,
            median,
            mode,
            variance,
            high_price_items,
        })
    }
}
