//! One analysis pass: detection, RSI and interpretation over a price series.

pub mod recommendation;

use crate::config::AnalysisConfig;
use crate::detector::WaveDetector;
use crate::domain::{Direction, PriceSeries, SwingPoint, Wave};
use crate::error::WaveError;
use crate::indicators::rsi;
use serde::Serialize;
use std::fmt;

pub use recommendation::{recommend, Recommendation, Signal};

/// Direction of the most recent impulse cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Bullish,
    Bearish,
    Undetermined,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Bullish => write!(f, "Bullish"),
            Trend::Bearish => write!(f, "Bearish"),
            Trend::Undetermined => write!(f, "Undetermined"),
        }
    }
}

/// Counts over the detected waves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaveSummary {
    pub total_waves: usize,
    /// Waves 1, 3, 5.
    pub motive_waves: usize,
    /// Waves 2, 4, A, B, C.
    pub corrective_waves: usize,
    pub cycles: usize,
    pub trend: Trend,
}

impl WaveSummary {
    pub fn from_waves(waves: &[Wave]) -> Self {
        let motive_waves = waves.iter().filter(|w| w.label.is_motive()).count();
        let trend = waves
            .iter()
            .rev()
            .find(|w| w.label == crate::domain::WaveLabel::One)
            .map(|w| match w.direction {
                Direction::Up => Trend::Bullish,
                Direction::Down => Trend::Bearish,
            })
            .unwrap_or(Trend::Undetermined);

        Self {
            total_waves: waves.len(),
            motive_waves,
            corrective_waves: waves.len() - motive_waves,
            cycles: waves.last().map_or(0, |w| w.cycle + 1),
            trend,
        }
    }
}

/// Everything the report printer and chart renderer consume.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub coin: String,
    pub waves: Vec<Wave>,
    pub swings: Vec<SwingPoint>,
    pub rsi: Vec<f64>,
    pub summary: WaveSummary,
    pub last_price: f64,
    pub last_rsi: Option<f64>,
    pub recommendation: Recommendation,
}

pub fn analyze(series: &PriceSeries, config: &AnalysisConfig) -> Result<Analysis, WaveError> {
    let detection = WaveDetector::new(config.detector).run(series)?;
    let rsi_values = rsi::rsi(series, config.rsi.period, config.rsi.smoothing)?;
    let last_rsi = rsi::latest(&rsi_values);
    let summary = WaveSummary::from_waves(&detection.waves);
    let recommendation = recommend(&detection.waves, &summary, last_rsi, &config.rsi);

    // run() rejects short series, so a last point exists
    let last_price = series.last().map_or(f64::NAN, |p| p.price);

    tracing::info!(
        coin = series.coin(),
        waves = summary.total_waves,
        trend = %summary.trend,
        signal = %recommendation.signal,
        "analysis complete"
    );

    Ok(Analysis {
        coin: series.coin().to_string(),
        waves: detection.waves,
        swings: detection.swings,
        rsi: rsi_values,
        summary,
        last_price,
        last_rsi,
        recommendation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::DetectorConfig;
    use chrono::{TimeZone, Utc};

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            detector: DetectorConfig::with_sensitivity(0.1),
            ..AnalysisConfig::default()
        }
    }

    #[test]
    fn summary_counts() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let s = PriceSeries::from_prices(
            "btc",
            t0,
            &[100.0, 110.0, 105.0, 130.0, 120.0, 150.0, 135.0, 145.0, 125.0],
        )
        .unwrap();
        let a = analyze(&s, &config()).unwrap();
        assert_eq!(a.summary.total_waves, 8);
        assert_eq!(a.summary.motive_waves, 3);
        assert_eq!(a.summary.corrective_waves, 5);
        assert_eq!(a.summary.cycles, 1);
        assert_eq!(a.summary.trend, Trend::Bullish);
        assert_eq!(a.last_price, 125.0);
        assert_eq!(a.rsi.len(), s.len());
    }

    #[test]
    fn no_waves_is_undetermined() {
        let summary = WaveSummary::from_waves(&[]);
        assert_eq!(summary.trend, Trend::Undetermined);
        assert_eq!(summary.cycles, 0);
    }

    #[test]
    fn propagates_detector_errors() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let s = PriceSeries::from_prices("btc", t0, &[1.0, 2.0]).unwrap();
        assert!(matches!(
            analyze(&s, &config()),
            Err(WaveError::InsufficientData { .. })
        ));
    }
}
