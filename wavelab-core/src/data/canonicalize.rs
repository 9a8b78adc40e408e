//! Turn raw `[timestamp_ms, price]` rows into a valid PriceSeries.
//!
//! APIs return rows that can repeat a timestamp (the trailing "now" sample
//! often duplicates the last daily close), arrive out of order, or carry
//! nulls. Rows are sorted, duplicates collapse to the last one seen, and
//! unusable prices are dropped.

use crate::domain::{PricePoint, PriceSeries};
use crate::error::WaveError;
use chrono::DateTime;
use std::collections::BTreeMap;

pub fn canonicalize(coin: &str, rows: &[(i64, Option<f64>)]) -> Result<PriceSeries, WaveError> {
    let mut by_ts: BTreeMap<i64, f64> = BTreeMap::new();
    let mut dropped = 0usize;

    for &(ts_ms, price) in rows {
        match price {
            Some(p) if p.is_finite() && p > 0.0 => {
                by_ts.insert(ts_ms, p);
            }
            _ => dropped += 1,
        }
    }

    let mut points = Vec::with_capacity(by_ts.len());
    for (i, (ts_ms, price)) in by_ts.into_iter().enumerate() {
        let timestamp = DateTime::from_timestamp_millis(ts_ms)
            .ok_or_else(|| WaveError::malformed(i, format!("timestamp {ts_ms} out of range")))?;
        points.push(PricePoint::new(timestamp, price));
    }

    if dropped > 0 {
        tracing::debug!(coin, dropped, "dropped unusable price rows");
    }
    PriceSeries::new(coin, points)
}
