//! Swing points and labeled waves - the detector's output.

use super::PricePoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a swing is a local high or a local low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwingKind {
    Peak,
    Trough,
}

impl SwingKind {
    pub fn opposite(self) -> Self {
        match self {
            SwingKind::Peak => SwingKind::Trough,
            SwingKind::Trough => SwingKind::Peak,
        }
    }
}

/// A price point the zig-zag filter accepted as a local extremum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SwingPoint {
    /// Index of the point within the source series.
    pub index: usize,
    pub point: PricePoint,
    pub kind: SwingKind,
    /// False only for the trailing extreme that no qualifying reversal has
    /// followed yet.
    pub confirmed: bool,
}

impl SwingPoint {
    pub fn price(&self) -> f64 {
        self.point.price
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn between(from: f64, to: f64) -> Self {
        if to >= from {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

/// Elliott position of a wave within its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WaveLabel {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
    #[serde(rename = "4")]
    Four,
    #[serde(rename = "5")]
    Five,
    A,
    B,
    C,
}

impl WaveLabel {
    pub const IMPULSE: [WaveLabel; 5] = [
        WaveLabel::One,
        WaveLabel::Two,
        WaveLabel::Three,
        WaveLabel::Four,
        WaveLabel::Five,
    ];

    pub const CORRECTION: [WaveLabel; 3] = [WaveLabel::A, WaveLabel::B, WaveLabel::C];

    pub fn is_impulse(self) -> bool {
        !self.is_correction()
    }

    pub fn is_correction(self) -> bool {
        matches!(self, WaveLabel::A | WaveLabel::B | WaveLabel::C)
    }

    /// Waves 1, 3 and 5 move with the trend.
    pub fn is_motive(self) -> bool {
        matches!(self, WaveLabel::One | WaveLabel::Three | WaveLabel::Five)
    }
}

impl fmt::Display for WaveLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WaveLabel::One => "1",
            WaveLabel::Two => "2",
            WaveLabel::Three => "3",
            WaveLabel::Four => "4",
            WaveLabel::Five => "5",
            WaveLabel::A => "A",
            WaveLabel::B => "B",
            WaveLabel::C => "C",
        };
        f.write_str(s)
    }
}

/// A labeled segment between two consecutive swing points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    pub start: SwingPoint,
    pub end: SwingPoint,
    pub label: WaveLabel,
    pub direction: Direction,
    /// Zero-based number of the impulse/correction cycle this wave belongs to.
    pub cycle: usize,
}

impl Wave {
    /// Absolute price distance covered by the wave.
    pub fn length(&self) -> f64 {
        (self.end.price() - self.start.price()).abs()
    }

    /// Signed relative move from start to end.
    pub fn pct_change(&self) -> f64 {
        (self.end.price() - self.start.price()) / self.start.price()
    }

    /// Price territory covered by the wave as (low, high).
    pub fn price_range(&self) -> (f64, f64) {
        let (a, b) = (self.start.price(), self.end.price());
        (a.min(b), a.max(b))
    }

    pub fn bar_span(&self) -> usize {
        self.end.index - self.start.index
    }
}
