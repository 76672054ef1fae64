//! Historical price normalization.
//!
//! Nominal catalog prices are expressed in constant 1900 francs. The franc
//! index is built from a baseline series of yearly price-index values: the
//! 1900 row defines the multiplier, and every year before the earliest
//! documented row is back-filled with the earliest documented value — the
//! franc is considered stable between 1815 and the start of the series.
//! Foreign-currency tables are hand-curated for specific (currency, year)
//! pairs and are never extrapolated: a missing entry surfaces as a lookup
//! error for the caller to handle.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, ConfigResult, LookupError, LookupResult};

/// All prices are normalized to this year's franc.
pub const BASELINE_YEAR: u16 = 1900;
/// Currency code of the baseline franc.
pub const BASELINE_CURRENCY: &str = "FRF";
/// How far back the flat extrapolation extends.
pub const FLOOR_YEAR: u16 = 1815;

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

// ── Franc index ────────────────────────────────────────────────────

/// Year → multiplier table converting nominal francs to 1900 francs.
/// Built once from the baseline rows; read-only afterwards.
#[derive(Debug, Clone)]
pub struct PriceIndex {
    table: BTreeMap<u16, f64>,
}

impl PriceIndex {
    /// Build the index from (year, raw index value) rows.
    ///
    /// The multiplier is `1 / raw[1900]`; a missing 1900 row is a fatal
    /// configuration error. Years in `[FLOOR_YEAR, earliest row)` reuse
    /// the earliest documented multiplier.
    pub fn build(rows: &[(u16, f64)]) -> ConfigResult<Self> {
        let baseline_raw = rows
            .iter()
            .find(|(year, _)| *year == BASELINE_YEAR)
            .map(|(_, raw)| *raw)
            .ok_or(ConfigError::BaselineYearMissing(BASELINE_YEAR))?;
        let multiplier = 1.0 / baseline_raw;

        let mut table = BTreeMap::new();
        for (year, raw) in rows {
            table.insert(*year, round2(raw * multiplier));
        }

        // Flat extrapolation back to the floor year.
        let earliest = table.iter().next().map(|(&year, &value)| (year, value));
        if let Some((earliest, value)) = earliest {
            for year in FLOOR_YEAR..earliest {
                table.insert(year, value);
            }
        }

        Ok(PriceIndex { table })
    }

    /// Load baseline rows from a two-column CSV (year, index value) with a
    /// header row, then build the index.
    pub fn from_csv_path(path: &Path) -> ConfigResult<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| ConfigError::TableParse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| ConfigError::TableParse {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
            let year: u16 = parse_field(&record, 0, path)?;
            let raw: f64 = parse_field(&record, 1, path)?;
            rows.push((year, raw));
        }
        Self::build(&rows)
    }

    /// Multiplier for a year. Errors outside the built range — the caller
    /// decides whether to skip the item or abort, never a silent default.
    pub fn index_for(&self, year: u16) -> LookupResult<f64> {
        self.table.get(&year).copied().ok_or(LookupError::Year(year))
    }

    /// The full year → multiplier table, for export.
    pub fn as_table(&self) -> &BTreeMap<u16, f64> {
        &self.table
    }
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    idx: usize,
    path: &Path,
) -> ConfigResult<T> {
    record
        .get(idx)
        .and_then(|f| f.trim().parse().ok())
        .ok_or_else(|| ConfigError::TableParse {
            path: path.display().to_string(),
            reason: format!("bad field {idx} in row {record:?}"),
        })
}

// ── Foreign currency index ─────────────────────────────────────────

/// Currency → year → multiplier, hand-curated. No interpolation and no
/// extrapolation: entries exist only for (currency, year) pairs that were
/// checked against historical conversion records.
#[derive(Debug, Clone, Default)]
pub struct ForeignIndex {
    table: HashMap<String, HashMap<u16, f64>>,
}

impl ForeignIndex {
    pub fn new(table: HashMap<String, HashMap<u16, f64>>) -> Self {
        ForeignIndex { table }
    }

    /// Load from a JSON document `{ "GBP": { "1887": 25.22, ... }, ... }`.
    pub fn from_json_path(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::TableRead {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json_str(&text).map_err(|reason| ConfigError::TableParse {
            path: path.display().to_string(),
            reason,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, String> {
        #[derive(Deserialize)]
        struct Raw(HashMap<String, HashMap<String, f64>>);

        let raw: Raw = serde_json::from_str(text).map_err(|e| e.to_string())?;
        let mut table = HashMap::new();
        for (currency, years) in raw.0 {
            let mut by_year = HashMap::new();
            for (year, value) in years {
                let year: u16 = year
                    .trim()
                    .parse()
                    .map_err(|_| format!("bad year key {year:?} for {currency}"))?;
                by_year.insert(year, value);
            }
            table.insert(currency, by_year);
        }
        Ok(ForeignIndex { table })
    }

    pub fn multiplier_for(&self, currency: &str, year: u16) -> LookupResult<f64> {
        let by_year = self
            .table
            .get(currency)
            .ok_or_else(|| LookupError::Currency(currency.to_string()))?;
        by_year
            .get(&year)
            .copied()
            .ok_or_else(|| LookupError::CurrencyYear {
                currency: currency.to_string(),
                year,
            })
    }
}

// ── Converter ──────────────────────────────────────────────────────

/// Converts a nominal price at a sale year into constant 1900 francs.
#[derive(Debug, Clone)]
pub struct PriceConverter {
    index: PriceIndex,
    foreign: ForeignIndex,
}

impl PriceConverter {
    pub fn new(index: PriceIndex, foreign: ForeignIndex) -> Self {
        PriceConverter { index, foreign }
    }

    /// Constant-value price, rounded to 2 decimals. Francs use the built
    /// index (with its backward extrapolation); any other currency must
    /// hit a documented entry in the hand-curated table.
    pub fn to_constant(&self, price: f64, year: u16, currency: &str) -> LookupResult<f64> {
        let multiplier = if currency == BASELINE_CURRENCY {
            self.index.index_for(year)?
        } else {
            self.foreign.multiplier_for(currency, year)?
        };
        Ok(round2(price * multiplier))
    }

    pub fn index(&self) -> &PriceIndex {
        &self.index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<(u16, f64)> {
        vec![
            (1889, 1.12),
            (1890, 1.10),
            (1900, 1.25),
            (1901, 1.30),
        ]
    }

    fn index() -> PriceIndex {
        PriceIndex::build(&rows()).expect("index builds")
    }

    fn converter() -> PriceConverter {
        let mut gbp = HashMap::new();
        gbp.insert(1887u16, 25.22);
        let mut table = HashMap::new();
        table.insert("GBP".to_string(), gbp);
        PriceConverter::new(index(), ForeignIndex::new(table))
    }

    #[test]
    fn baseline_year_normalizes_to_one() {
        assert_eq!(index().index_for(1900).unwrap(), 1.0);
    }

    #[test]
    fn documented_years_are_scaled_and_rounded() {
        // 1.12 / 1.25 = 0.896 → 0.90
        assert_eq!(index().index_for(1889).unwrap(), 0.90);
        // 1.30 / 1.25 = 1.04
        assert_eq!(index().index_for(1901).unwrap(), 1.04);
    }

    #[test]
    fn flat_extrapolation_before_earliest_row() {
        let idx = index();
        let earliest = idx.index_for(1889).unwrap();
        assert_eq!(idx.index_for(1815).unwrap(), earliest);
        assert_eq!(idx.index_for(1850).unwrap(), earliest);
        assert_eq!(idx.index_for(1888).unwrap(), earliest);
    }

    #[test]
    fn out_of_range_year_is_surfaced() {
        assert_eq!(index().index_for(1814), Err(LookupError::Year(1814)));
        assert_eq!(index().index_for(1950), Err(LookupError::Year(1950)));
    }

    #[test]
    fn missing_baseline_year_is_fatal() {
        let err = PriceIndex::build(&[(1889, 1.12)]).unwrap_err();
        assert!(matches!(err, ConfigError::BaselineYearMissing(1900)));
    }

    #[test]
    fn franc_conversion_matches_index() {
        let c = converter();
        let expected = (15.0f64 * c.index().index_for(1890).unwrap() * 100.0).round() / 100.0;
        assert_eq!(c.to_constant(15.0, 1890, "FRF").unwrap(), expected);
    }

    #[test]
    fn foreign_conversion_uses_documented_entry() {
        let c = converter();
        // 2 × 25.22 = 50.44
        assert_eq!(c.to_constant(2.0, 1887, "GBP").unwrap(), 50.44);
    }

    #[test]
    fn foreign_table_never_extrapolates() {
        let c = converter();
        assert_eq!(
            c.to_constant(2.0, 1888, "GBP"),
            Err(LookupError::CurrencyYear {
                currency: "GBP".to_string(),
                year: 1888
            })
        );
        assert_eq!(
            c.to_constant(2.0, 1887, "USD"),
            Err(LookupError::Currency("USD".to_string()))
        );
    }
}
