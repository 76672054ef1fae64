//! Error taxonomy for the extraction pipeline.
//!
//! Three tiers: configuration errors are fatal at startup, lookup errors
//! are surfaced to the caller who decides whether to skip the item or
//! abort the catalog, and unresolved names/prices are not errors at all —
//! they travel as empty fields in the output records.

/// Fatal configuration problems. No retry, no partial result.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("baseline year {0} missing from price-index rows")]
    BaselineYearMissing(u16),
    #[error("cannot read table file {path}: {source}")]
    TableRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse table file {path}: {reason}")]
    TableParse { path: String, reason: String },
}

/// A year or currency absent from a price table.
///
/// Recoverable at the call site, but never silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no price index for year {0}")]
    Year(u16),
    #[error("no price index for currency {0}")]
    Currency(String),
    #[error("no price index for currency {currency} in year {year}")]
    CurrencyYear { currency: String, year: u16 },
}

/// Knowledge-base search failures (network or malformed response).
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected search response shape")]
    BadResponse,
}

pub type ConfigResult<T> = Result<T, ConfigError>;
pub type LookupResult<T> = Result<T, LookupError>;
