//! Domain types for WaveLab

pub mod price;
pub mod wave;

pub use price::{PricePoint, PriceSeries};
pub use wave::{Direction, SwingKind, SwingPoint, Wave, WaveLabel};

/// Coin identifier as used by the price source (e.g. "bitcoin").
pub type CoinId = String;
