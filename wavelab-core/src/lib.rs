//! WaveLab Core - price series, Elliott Wave detection, RSI, price sources.
//!
//! This crate contains:
//! - Domain types (price points and series, swing points, labeled waves)
//! - The wave pattern detector (zig-zag swings + Elliott labeling)
//! - RSI with Wilder or simple smoothing
//! - Price sources (CoinGecko, synthetic) behind the `PriceSource` trait
//! - Analysis: summary, trend and recommendation
//! - TOML configuration and CSV/JSON export

pub mod analysis;
pub mod config;
pub mod data;
pub mod detector;
pub mod domain;
pub mod error;
pub mod export;
pub mod indicators;

pub use analysis::{analyze, Analysis, Recommendation, Signal, Trend, WaveSummary};
pub use config::{AnalysisConfig, ConfigError, SourceConfig};
pub use detector::{detect, DetectorConfig, Wave3Rule, WaveDetector};
pub use domain::{Direction, PricePoint, PriceSeries, SwingKind, SwingPoint, Wave, WaveLabel};
pub use error::WaveError;
