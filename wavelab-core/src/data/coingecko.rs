//! CoinGecko price source.
//!
//! Fetches `[timestamp_ms, price]` rows from the public `market_chart`
//! endpoint. Unknown ids fall back to the `search` endpoint and retry with the
//! first match. Requests retry with exponential backoff behind a shared
//! circuit breaker.

use super::canonicalize::canonicalize;
use super::circuit_breaker::CircuitBreaker;
use super::provider::{DataError, PriceSource};
use crate::config::SourceConfig;
use crate::domain::PriceSeries;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// `GET /coins/{id}/market_chart` response. Only `prices` is used.
#[derive(Debug, Deserialize)]
struct MarketChart {
    #[serde(default)]
    prices: Vec<(f64, Option<f64>)>,
}

/// `GET /search` response.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    coins: Vec<SearchCoin>,
}

#[derive(Debug, Deserialize)]
struct SearchCoin {
    id: String,
}

pub struct CoinGeckoSource {
    client: reqwest::blocking::Client,
    circuit_breaker: Arc<CircuitBreaker>,
    config: SourceConfig,
}

impl CoinGeckoSource {
    pub fn new(config: SourceConfig, circuit_breaker: Arc<CircuitBreaker>) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("wavelab/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            circuit_breaker,
            config,
        })
    }

    /// Map a user-typed name to a CoinGecko id via the alias table.
    pub fn resolve_alias(&self, coin: &str) -> String {
        let key = coin.trim().to_lowercase();
        self.config.aliases.get(&key).cloned().unwrap_or(key)
    }

    pub fn chart_url(&self, coin_id: &str, days: u32) -> String {
        format!(
            "{}/coins/{coin_id}/market_chart?vs_currency={}&days={days}",
            self.config.base_url.trim_end_matches('/'),
            self.config.base_currency
        )
    }

    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?query={query}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn parse_market_chart(body: &str) -> Result<Vec<(i64, Option<f64>)>, DataError> {
        let chart: MarketChart = serde_json::from_str(body).map_err(|e| {
            DataError::ResponseFormatChanged(format!("market_chart: {e}"))
        })?;
        Ok(chart
            .prices
            .into_iter()
            .map(|(ts, price)| (ts as i64, price))
            .collect())
    }

    fn parse_search(body: &str) -> Result<Option<String>, DataError> {
        let resp: SearchResponse = serde_json::from_str(body)
            .map_err(|e| DataError::ResponseFormatChanged(format!("search: {e}")))?;
        Ok(resp.coins.into_iter().next().map(|c| c.id))
    }

    fn market_chart(&self, coin_id: &str, days: u32) -> Result<Vec<(i64, Option<f64>)>, DataError> {
        let url = self.chart_url(coin_id, days);
        tracing::debug!(%url, "fetching market chart");
        let body = self.get_with_retry(&url, coin_id)?;
        let rows = Self::parse_market_chart(&body)?;
        tracing::debug!(coin = coin_id, rows = rows.len(), "market chart received");
        Ok(rows)
    }

    fn search(&self, query: &str) -> Result<Option<String>, DataError> {
        let url = self.search_url(query);
        tracing::debug!(%url, "searching coin id");
        let body = self.get_with_retry(&url, query)?;
        Self::parse_search(&body)
    }

    /// GET `url` and return the body.
    ///
    /// 403 trips the breaker and 404 maps to `CoinNotFound`, both without
    /// retry. 429, other non-success statuses, connect errors and timeouts
    /// count as breaker failures and retry with exponential backoff.
    fn get_with_retry(&self, url: &str, coin: &str) -> Result<String, DataError> {
        if !self.circuit_breaker.is_allowed() {
            return Err(DataError::CircuitBreakerTripped);
        }

        let base_delay = Duration::from_millis(self.config.retry_base_delay_ms);
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                let delay = base_delay * 2u32.pow(attempt - 1);
                tracing::info!(attempt, delay_ms = delay.as_millis() as u64, "retrying request");
                std::thread::sleep(delay);
            }

            if !self.circuit_breaker.is_allowed() {
                return Err(DataError::CircuitBreakerTripped);
            }

            let mut request = self.client.get(url);
            if let Some(key) = &self.config.api_key {
                request = request.header("x-cg-demo-api-key", key);
            }

            match request.send() {
                Ok(resp) => {
                    let status = resp.status();

                    if status == reqwest::StatusCode::FORBIDDEN {
                        self.circuit_breaker.trip();
                        return Err(DataError::CircuitBreakerTripped);
                    }

                    if status == reqwest::StatusCode::NOT_FOUND {
                        return Err(DataError::CoinNotFound {
                            coin: coin.to_string(),
                        });
                    }

                    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                        self.circuit_breaker.record_failure();
                        let retry_after = resp
                            .headers()
                            .get("retry-after")
                            .and_then(|v| v.to_str().ok())
                            .and_then(|v| v.parse::<u64>().ok())
                            .unwrap_or(60);
                        last_error = Some(DataError::RateLimited {
                            retry_after_secs: retry_after,
                        });
                        continue;
                    }

                    if !status.is_success() {
                        self.circuit_breaker.record_failure();
                        last_error = Some(DataError::Other(format!("HTTP {status} for {coin}")));
                        continue;
                    }

                    let body = resp.text().map_err(|e| {
                        DataError::ResponseFormatChanged(format!("unreadable body for {coin}: {e}"))
                    })?;
                    self.circuit_breaker.record_success();
                    return Ok(body);
                }
                Err(e) => {
                    if e.is_connect() || e.is_timeout() {
                        self.circuit_breaker.record_failure();
                        last_error = Some(DataError::NetworkUnreachable(e.to_string()));
                        continue;
                    }
                    return Err(DataError::NetworkUnreachable(e.to_string()));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| DataError::Other("max retries exceeded".into())))
    }
}

impl PriceSource for CoinGeckoSource {
    fn name(&self) -> &str {
        "coingecko"
    }

    fn fetch(&self, coin_id: &str, days: u32) -> Result<PriceSeries, DataError> {
        let original = coin_id.trim().to_lowercase();
        let mut resolved = self.resolve_alias(&original);

        let mut rows = match self.market_chart(&resolved, days) {
            Ok(rows) => rows,
            Err(DataError::CoinNotFound { .. }) => Vec::new(),
            Err(e) => return Err(e),
        };

        if rows.is_empty() {
            let not_found = || DataError::CoinNotFound {
                coin: original.clone(),
            };
            let found = self.search(&original)?.ok_or_else(not_found)?;
            tracing::info!(query = %original, id = %found, "resolved coin via search");
            if found != resolved {
                rows = match self.market_chart(&found, days) {
                    Ok(rows) => rows,
                    Err(DataError::CoinNotFound { .. }) => Vec::new(),
                    Err(e) => return Err(e),
                };
            }
            if rows.is_empty() {
                return Err(not_found());
            }
            resolved = found;
        }

        let series = canonicalize(&resolved, &rows)?;
        if series.len() < 2 {
            return Err(DataError::InsufficientData {
                coin: original,
                got: series.len(),
            });
        }
        Ok(series)
    }
}
