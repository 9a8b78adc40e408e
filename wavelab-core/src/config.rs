//! Serializable analysis configuration.
//!
//! Loaded from a TOML file with `[detector]`, `[rsi]` and `[source]` tables.
//! Every field has a default, so an empty file is a valid config.

use crate::detector::DetectorConfig;
use crate::indicators::RsiConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub detector: DetectorConfig,
    pub rsi: RsiConfig,
    pub source: SourceConfig,
}

impl AnalysisConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.detector
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        if self.rsi.period == 0 {
            return Err(ConfigError::Invalid("rsi.period must be >= 1".into()));
        }
        if !(0.0..=100.0).contains(&self.rsi.oversold)
            || !(0.0..=100.0).contains(&self.rsi.overbought)
            || self.rsi.oversold >= self.rsi.overbought
        {
            return Err(ConfigError::Invalid(format!(
                "rsi thresholds must satisfy 0 <= oversold ({}) < overbought ({}) <= 100",
                self.rsi.oversold, self.rsi.overbought
            )));
        }
        if self.source.days == 0 {
            return Err(ConfigError::Invalid("source.days must be >= 1".into()));
        }
        Ok(())
    }
}

/// Settings for the CoinGecko source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub base_currency: String,
    pub days: u32,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_base_delay_ms: u64,
    pub breaker_cooldown_secs: u64,
    pub breaker_failure_threshold: u32,
    /// Shorthand names mapped to CoinGecko ids.
    pub aliases: BTreeMap<String, String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        let aliases = [
            ("velodrome", "velodrome-finance"),
            ("velo", "velodrome-finance"),
            ("velero", "velodrome-finance"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            base_url: "https://api.coingecko.com/api/v3".into(),
            base_currency: "usd".into(),
            days: 365,
            api_key: None,
            timeout_secs: 30,
            max_retries: 3,
            retry_base_delay_ms: 500,
            breaker_cooldown_secs: 600,
            breaker_failure_threshold: 3,
            aliases,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::Wave3Rule;
    use crate::indicators::RsiSmoothing;

    #[test]
    fn empty_file_is_default() {
        let c = AnalysisConfig::from_toml("").unwrap();
        assert_eq!(c, AnalysisConfig::default());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let c = AnalysisConfig::from_toml(
            r#"
[detector]
sensitivity = 0.5
wave3_rule = "longest"

[rsi]
period = 7
smoothing = "simple"

[source]
base_currency = "eur"
days = 90

[source.aliases]
btc = "bitcoin"
"#,
        )
        .unwrap();
        assert_eq!(c.detector.sensitivity, 0.5);
        assert_eq!(c.detector.wave3_rule, Wave3Rule::Longest);
        assert_eq!(c.rsi.period, 7);
        assert_eq!(c.rsi.smoothing, RsiSmoothing::Simple);
        assert_eq!(c.rsi.overbought, 70.0);
        assert_eq!(c.source.base_currency, "eur");
        assert_eq!(c.source.days, 90);
        assert_eq!(c.source.aliases.get("btc").map(String::as_str), Some("bitcoin"));
        assert!(!c.source.aliases.contains_key("velo"));
    }

    #[test]
    fn rejects_bad_sensitivity() {
        let err = AnalysisConfig::from_toml("[detector]\nsensitivity = 0.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_inverted_rsi_thresholds() {
        let err =
            AnalysisConfig::from_toml("[rsi]\noversold = 80.0\noverbought = 20.0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_unparseable() {
        assert!(matches!(
            AnalysisConfig::from_toml("[detector\n"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AnalysisConfig::from_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
