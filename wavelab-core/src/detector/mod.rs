//! WavePatternDetector - zig-zag swing extraction plus Elliott labeling.
//!
//! Detection is a pure function of (series, config): no globals, no caches,
//! no I/O. Calling it twice with the same inputs yields identical waves.

pub mod elliott;
pub mod zigzag;

use crate::domain::{PriceSeries, SwingPoint, Wave};
use crate::error::{WaveError, MIN_SERIES_LEN};
use serde::{Deserialize, Serialize};

pub use elliott::label_waves;
pub use zigzag::swing_points;

/// How strictly wave 3 is compared against waves 1 and 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wave3Rule {
    /// Wave 3 is never the shortest of the three motive legs.
    #[default]
    NotShortest,
    /// Wave 3 is at least as long as both wave 1 and wave 5.
    Longest,
}

/// Detector parameters. Every rule switch lives here and is passed in
/// explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Fraction of the prior swing's amplitude a reversal must reach.
    pub sensitivity: f64,
    /// Absolute floor: reversals smaller than this fraction of the pivot price
    /// never qualify. Zero disables the floor.
    pub min_reversal_pct: f64,
    pub wave3_rule: Wave3Rule,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.3,
            min_reversal_pct: 0.03,
            wave3_rule: Wave3Rule::NotShortest,
        }
    }
}

impl DetectorConfig {
    /// Bare zig-zag settings: the given sensitivity and no absolute floor.
    pub fn with_sensitivity(sensitivity: f64) -> Self {
        Self {
            sensitivity,
            min_reversal_pct: 0.0,
            wave3_rule: Wave3Rule::NotShortest,
        }
    }

    pub fn validate(&self) -> Result<(), WaveError> {
        if !self.sensitivity.is_finite() || self.sensitivity <= 0.0 {
            return Err(WaveError::InvalidSensitivity {
                value: self.sensitivity,
            });
        }
        if !self.min_reversal_pct.is_finite() || self.min_reversal_pct < 0.0 {
            return Err(WaveError::InvalidSensitivity {
                value: self.min_reversal_pct,
            });
        }
        Ok(())
    }
}

/// Swing points and waves from one detection pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detection {
    pub swings: Vec<SwingPoint>,
    pub waves: Vec<Wave>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WaveDetector {
    config: DetectorConfig,
}

impl WaveDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Run detection and keep the intermediate swing points.
    pub fn run(&self, series: &PriceSeries) -> Result<Detection, WaveError> {
        if series.len() < MIN_SERIES_LEN {
            return Err(WaveError::InsufficientData {
                len: series.len(),
                required: MIN_SERIES_LEN,
            });
        }
        self.config.validate()?;

        let swings = swing_points(series, &self.config);
        let waves = label_waves(&swings, self.config.wave3_rule);
        tracing::debug!(
            coin = series.coin(),
            points = series.len(),
            swings = swings.len(),
            waves = waves.len(),
            "wave detection complete"
        );
        Ok(Detection { swings, waves })
    }

    pub fn detect(&self, series: &PriceSeries) -> Result<Vec<Wave>, WaveError> {
        self.run(series).map(|d| d.waves)
    }
}

/// Detect Elliott waves with the given zig-zag sensitivity.
///
/// Fails with `InsufficientData` below 5 points and `InvalidSensitivity`
/// when `sensitivity` is not a positive finite number. Returns an empty
/// vector when no impulse validates.
pub fn detect(series: &PriceSeries, sensitivity: f64) -> Result<Vec<Wave>, WaveError> {
    WaveDetector::new(DetectorConfig::with_sensitivity(sensitivity)).detect(series)
}
