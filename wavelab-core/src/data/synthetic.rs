//! Synthetic price source for offline runs and demos.
//!
//! A deterministic random walk seeded from the coin id, so the same coin
//! always yields the same series. Output is clearly fake and the CLI tags it
//! as such.

use super::provider::{DataError, PriceSource};
use crate::domain::{PricePoint, PriceSeries};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct SyntheticSource {
    end: DateTime<Utc>,
    start_price: f64,
    daily_volatility: f64,
}

impl SyntheticSource {
    /// Series end at `end` (one point per day, ending there).
    pub fn new(end: DateTime<Utc>) -> Self {
        Self {
            end,
            start_price: 100.0,
            daily_volatility: 0.04,
        }
    }

    /// Maximum daily move as a fraction of price, clamped to `0.0..=0.5`.
    /// Zero yields a flat series.
    pub fn with_volatility(mut self, daily_volatility: f64) -> Self {
        self.daily_volatility = daily_volatility.clamp(0.0, 0.5);
        self
    }

    fn rng_for(coin_id: &str) -> StdRng {
        let seed: [u8; 32] = *blake3::hash(coin_id.as_bytes()).as_bytes();
        StdRng::from_seed(seed)
    }
}

impl PriceSource for SyntheticSource {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(&self, coin_id: &str, days: u32) -> Result<PriceSeries, DataError> {
        let coin = coin_id.trim().to_lowercase();
        let mut rng = Self::rng_for(&coin);
        let n = days as i64 + 1;
        let start = self.end - Duration::days(days as i64);
        let vol = self.daily_volatility;

        let mut price = self.start_price;
        let mut points = Vec::with_capacity(n as usize);
        for i in 0..n {
            points.push(PricePoint::new(start + Duration::days(i), price));
            let daily_return: f64 = if vol > 0.0 {
                rng.gen_range(-vol..vol)
            } else {
                0.0
            };
            // Keep the walk strictly positive.
            price = (price * (1.0 + daily_return)).max(0.01);
        }

        tracing::debug!(coin = %coin, points = points.len(), "generated synthetic series");
        Ok(PriceSeries::new(coin, points)?)
    }
}
