//! PricePoint and PriceSeries - the input side of every analysis.

use super::CoinId;
use crate::error::WaveError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single observation: the price of a coin at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Ordered, validated price history for one coin.
///
/// Invariants (checked on construction):
/// - timestamps strictly increase
/// - every price is finite and > 0
///
/// The series is immutable once built; analysis only ever borrows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    coin: CoinId,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(coin: impl Into<CoinId>, points: Vec<PricePoint>) -> Result<Self, WaveError> {
        for (i, p) in points.iter().enumerate() {
            if !p.price.is_finite() || p.price <= 0.0 {
                return Err(WaveError::malformed(
                    i,
                    format!("price must be positive and finite, got {}", p.price),
                ));
            }
            if i > 0 && p.timestamp <= points[i - 1].timestamp {
                return Err(WaveError::malformed(
                    i,
                    format!(
                        "timestamp {} does not follow {}",
                        p.timestamp,
                        points[i - 1].timestamp
                    ),
                ));
            }
        }
        Ok(Self {
            coin: coin.into(),
            points,
        })
    }

    /// Build a series from bare prices, spacing timestamps one day apart
    /// starting at `start`. Used for fixtures and synthetic data.
    pub fn from_prices(
        coin: impl Into<CoinId>,
        start: DateTime<Utc>,
        prices: &[f64],
    ) -> Result<Self, WaveError> {
        let points = prices
            .iter()
            .enumerate()
            .map(|(i, &price)| PricePoint::new(start + chrono::Duration::days(i as i64), price))
            .collect();
        Self::new(coin, points)
    }

    pub fn coin(&self) -> &str {
        &self.coin
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Prices only, in series order.
    pub fn prices(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.price)
    }
}
