//! Price source trait and structured error types.
//!
//! The PriceSource trait abstracts over data sources (CoinGecko, synthetic)
//! so the analysis layer can be driven offline and mocked in tests.

use crate::domain::PriceSeries;
use crate::error::WaveError;
use thiserror::Error;

/// Structured error types for price fetching.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("price API unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("price API rate limit hit, retry in {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected price API response: {0}")]
    ResponseFormatChanged(String),

    #[error("unable to fetch data for '{coin}', check the cryptocurrency name")]
    CoinNotFound { coin: String },

    #[error("price API requests suspended after repeated failures or a ban")]
    CircuitBreakerTripped,

    #[error("insufficient data points for '{coin}': got {got}")]
    InsufficientData { coin: String, got: usize },

    #[error(transparent)]
    Series(#[from] WaveError),

    #[error("price source error: {0}")]
    Other(String),
}

/// A collaborator that materializes a price series for a coin.
pub trait PriceSource: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch `days` of history for `coin_id`.
    fn fetch(&self, coin_id: &str, days: u32) -> Result<PriceSeries, DataError>;
}
