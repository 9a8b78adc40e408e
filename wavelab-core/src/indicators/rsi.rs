//! Relative Strength Index (RSI).
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! Lookback: period. The first `period` values are NaN.
//! Edge cases: no movement → 50; avg_loss == 0 → 100; avg_gain == 0 → 0.

use crate::domain::PriceSeries;
use crate::error::WaveError;
use serde::{Deserialize, Serialize};

/// How average gains and losses are carried forward after the seed window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiSmoothing {
    /// Wilder's recursive smoothing (alpha = 1/period).
    #[default]
    Wilder,
    /// Plain rolling mean over the last `period` changes.
    Simple,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiConfig {
    pub period: usize,
    pub smoothing: RsiSmoothing,
    pub overbought: f64,
    pub oversold: f64,
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self {
            period: 14,
            smoothing: RsiSmoothing::Wilder,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

/// Compute RSI over the series' prices. Output has the series' length.
pub fn rsi(
    series: &PriceSeries,
    period: usize,
    smoothing: RsiSmoothing,
) -> Result<Vec<f64>, WaveError> {
    if period == 0 {
        return Err(WaveError::InvalidRsiPeriod { period });
    }
    let closes: Vec<f64> = series.prices().collect();
    Ok(match smoothing {
        RsiSmoothing::Wilder => wilder(&closes, period),
        RsiSmoothing::Simple => simple(&closes, period),
    })
}

fn changes(closes: &[f64]) -> Vec<f64> {
    closes.windows(2).map(|w| w[1] - w[0]).collect()
}

fn split(change: f64) -> (f64, f64) {
    if change > 0.0 {
        (change, 0.0)
    } else {
        (0.0, -change)
    }
}

fn wilder(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut result = vec![f64::NAN; n];
    if n < period + 1 {
        return result;
    }
    let changes = changes(closes);

    // Seed: average gain and average loss over the first `period` changes
    let (mut avg_gain, mut avg_loss) = changes[..period]
        .iter()
        .map(|&c| split(c))
        .fold((0.0, 0.0), |(g, l), (cg, cl)| (g + cg, l + cl));
    avg_gain /= period as f64;
    avg_loss /= period as f64;
    result[period] = compute_rsi(avg_gain, avg_loss);

    let alpha = 1.0 / period as f64;
    for i in (period + 1)..n {
        let (gain, loss) = split(changes[i - 1]);
        avg_gain = alpha * gain + (1.0 - alpha) * avg_gain;
        avg_loss = alpha * loss + (1.0 - alpha) * avg_loss;
        result[i] = compute_rsi(avg_gain, avg_loss);
    }
    result
}

fn simple(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut result = vec![f64::NAN; n];
    if n < period + 1 {
        return result;
    }
    let changes = changes(closes);
    for i in period..n {
        // changes[i - 1] is the move into bar i
        let window = &changes[i - period..i];
        let (gain, loss) = window
            .iter()
            .map(|&c| split(c))
            .fold((0.0, 0.0), |(g, l), (cg, cl)| (g + cg, l + cl));
        result[i] = compute_rsi(gain / period as f64, loss / period as f64);
    }
    result
}

fn compute_rsi(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

/// Last non-NaN RSI value, if any.
pub fn latest(values: &[f64]) -> Option<f64> {
    values.iter().rev().copied().find(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::assert_approx;
    use chrono::{TimeZone, Utc};

    fn series(closes: &[f64]) -> PriceSeries {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        PriceSeries::from_prices("test", t0, closes).unwrap()
    }

    #[test]
    fn rsi_all_gains() {
        let s = series(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        let result = rsi(&s, 3, RsiSmoothing::Wilder).unwrap();
        assert_approx(result[3], 100.0, 1e-6);
        assert_approx(result[5], 100.0, 1e-6);
    }

    #[test]
    fn rsi_all_losses() {
        let s = series(&[105.0, 104.0, 103.0, 102.0, 101.0, 100.0]);
        let result = rsi(&s, 3, RsiSmoothing::Wilder).unwrap();
        assert_approx(result[3], 0.0, 1e-6);
    }

    #[test]
    fn rsi_mixed_seed_value() {
        // Changes: +0.34, -0.25, -0.48, +0.72
        // Seed over first 3: avg_gain = 0.34/3, avg_loss = 0.73/3
        // RSI[3] = 100 - 100/(1 + 0.34/0.73)
        let s = series(&[44.0, 44.34, 44.09, 43.61, 44.33]);
        let result = rsi(&s, 3, RsiSmoothing::Wilder).unwrap();
        assert!(result[..3].iter().all(|v| v.is_nan()));
        assert_approx(result[3], 100.0 - 100.0 / (1.0 + 0.34 / 0.73), 1e-9);
    }

    #[test]
    fn simple_uses_rolling_window() {
        // Window for bar 4 is changes [-0.25, -0.48, +0.72]
        let s = series(&[44.0, 44.34, 44.09, 43.61, 44.33]);
        let result = rsi(&s, 3, RsiSmoothing::Simple).unwrap();
        assert_approx(result[4], 100.0 - 100.0 / (1.0 + 0.72 / 0.73), 1e-9);
    }

    #[test]
    fn wilder_and_simple_agree_on_seed() {
        let s = series(&[10.0, 11.0, 10.5, 12.0, 11.0, 13.0, 12.5]);
        let w = rsi(&s, 4, RsiSmoothing::Wilder).unwrap();
        let r = rsi(&s, 4, RsiSmoothing::Simple).unwrap();
        assert_approx(w[4], r[4], 1e-12);
    }

    #[test]
    fn rsi_bounds() {
        let s = series(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        for smoothing in [RsiSmoothing::Wilder, RsiSmoothing::Simple] {
            let result = rsi(&s, 3, smoothing).unwrap();
            for (i, &v) in result.iter().enumerate().skip(3) {
                assert!((0.0..=100.0).contains(&v), "RSI out of bounds at {i}: {v}");
            }
        }
    }

    #[test]
    fn flat_prices_read_fifty() {
        let s = series(&[7.0; 6]);
        let result = rsi(&s, 2, RsiSmoothing::Wilder).unwrap();
        assert_approx(result[5], 50.0, 1e-12);
    }

    #[test]
    fn short_series_is_all_nan() {
        let s = series(&[1.0, 2.0, 3.0]);
        assert!(rsi(&s, 14, RsiSmoothing::Wilder)
            .unwrap()
            .iter()
            .all(|v| v.is_nan()));
    }

    #[test]
    fn zero_period_is_rejected() {
        let s = series(&[1.0, 2.0]);
        assert_eq!(
            rsi(&s, 0, RsiSmoothing::Wilder),
            Err(WaveError::InvalidRsiPeriod { period: 0 })
        );
    }

    #[test]
    fn latest_skips_warmup() {
        assert_eq!(latest(&[f64::NAN, 40.0, 55.0]), Some(55.0));
        assert_eq!(latest(&[f64::NAN, f64::NAN]), None);
    }
}
