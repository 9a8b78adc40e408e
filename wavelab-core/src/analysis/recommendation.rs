//! Investment signal derived from the wave phase, the trend and RSI.
//!
//! The detector emits whole impulses, so the last wave is always 5 or a
//! correction leg.
//!
//! | trend    | last wave | signal                                        |
//! |----------|-----------|-----------------------------------------------|
//! | none     |           | Neutral                                       |
//! | any      | A, B      | HoldCaution                                   |
//! | bullish  | C         | ModerateBuy, StrongBuy when RSI is oversold   |
//! | bullish  | 5         | HoldCaution                                   |
//! | bearish  | 5         | Neutral, ModerateBuy when RSI is oversold     |
//! | bearish  | C         | HoldCaution                                   |

use super::{Trend, WaveSummary};
use crate::domain::{Wave, WaveLabel};
use crate::indicators::RsiConfig;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Signal {
    StrongBuy,
    ModerateBuy,
    HoldCaution,
    Neutral,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Signal::StrongBuy => "STRONG BUY",
            Signal::ModerateBuy => "MODERATE BUY",
            Signal::HoldCaution => "HOLD/CAUTION",
            Signal::Neutral => "NEUTRAL",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub signal: Signal,
    pub reason: String,
}

impl Recommendation {
    fn new(signal: Signal, reason: impl Into<String>) -> Self {
        Self {
            signal,
            reason: reason.into(),
        }
    }
}

pub fn recommend(
    waves: &[Wave],
    summary: &WaveSummary,
    last_rsi: Option<f64>,
    rsi: &RsiConfig,
) -> Recommendation {
    let Some(last) = waves.last() else {
        return Recommendation::new(
            Signal::Neutral,
            "No complete Elliott impulse was found; the wave pattern is inconclusive.",
        );
    };
    let oversold = last_rsi.is_some_and(|v| v <= rsi.oversold);
    let overbought = last_rsi.is_some_and(|v| v >= rsi.overbought);

    match (summary.trend, last.label) {
        (Trend::Bullish | Trend::Bearish, WaveLabel::A | WaveLabel::B) => Recommendation::new(
            Signal::HoldCaution,
            "A correction is in progress; expect further volatility before the next trend leg.",
        ),
        (Trend::Bullish, WaveLabel::C) if oversold => Recommendation::new(
            Signal::StrongBuy,
            "The correction after a bullish impulse looks complete and RSI is oversold.",
        ),
        (Trend::Bullish, WaveLabel::C) => Recommendation::new(
            Signal::ModerateBuy,
            "The correction after a bullish impulse looks complete; a new upward cycle may begin.",
        ),
        (Trend::Bullish, WaveLabel::Five) if overbought => Recommendation::new(
            Signal::HoldCaution,
            "A bullish five-wave impulse has completed and RSI is overbought; a correction is due.",
        ),
        (Trend::Bullish, WaveLabel::Five) => Recommendation::new(
            Signal::HoldCaution,
            "A bullish five-wave impulse has completed; a corrective phase usually follows.",
        ),
        (Trend::Bearish, WaveLabel::Five) if oversold => Recommendation::new(
            Signal::ModerateBuy,
            "A bearish impulse has completed with RSI oversold; a relief rally is likely.",
        ),
        (Trend::Bearish, WaveLabel::Five) => Recommendation::new(
            Signal::Neutral,
            "A bearish impulse has completed; selling pressure may be exhausted.",
        ),
        (Trend::Bearish, WaveLabel::C) => Recommendation::new(
            Signal::HoldCaution,
            "The correction after a bearish impulse has ended; the downtrend may resume.",
        ),
        // No trend, or a wave 1-4 ending the sequence, which label_waves never yields.
        _ => Recommendation::new(
            Signal::Neutral,
            "The wave patterns are relatively balanced.",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{label_waves, Wave3Rule};
    use crate::domain::{PricePoint, SwingKind, SwingPoint};
    use chrono::{TimeZone, Utc};

    fn waves(prices: &[f64]) -> Vec<Wave> {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut kind = if prices[1] > prices[0] {
            SwingKind::Trough
        } else {
            SwingKind::Peak
        };
        let swings: Vec<SwingPoint> = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let s = SwingPoint {
                    index: i,
                    point: PricePoint::new(t0 + chrono::Duration::days(i as i64), p),
                    kind,
                    confirmed: true,
                };
                kind = kind.opposite();
                s
            })
            .collect();
        label_waves(&swings, Wave3Rule::NotShortest)
    }

    fn signal(prices: &[f64], rsi: Option<f64>) -> Signal {
        let w = waves(prices);
        let summary = WaveSummary::from_waves(&w);
        recommend(&w, &summary, rsi, &RsiConfig::default()).signal
    }

    const BULL_IMPULSE: [f64; 6] = [100.0, 110.0, 105.0, 130.0, 120.0, 150.0];
    const BEAR_IMPULSE: [f64; 6] = [150.0, 140.0, 145.0, 120.0, 130.0, 100.0];

    #[test]
    fn empty_is_neutral() {
        let summary = WaveSummary::from_waves(&[]);
        let r = recommend(&[], &summary, Some(50.0), &RsiConfig::default());
        assert_eq!(r.signal, Signal::Neutral);
    }

    #[test]
    fn completed_bull_impulse_is_caution() {
        assert_eq!(signal(&BULL_IMPULSE, Some(65.0)), Signal::HoldCaution);
    }

    #[test]
    fn bull_correction_in_progress_is_caution() {
        let mut p = BULL_IMPULSE.to_vec();
        p.push(135.0);
        assert_eq!(signal(&p, Some(45.0)), Signal::HoldCaution);
    }

    #[test]
    fn completed_bull_correction_is_buy() {
        let mut p = BULL_IMPULSE.to_vec();
        p.extend([135.0, 145.0, 125.0]);
        assert_eq!(signal(&p, Some(45.0)), Signal::ModerateBuy);
        assert_eq!(signal(&p, Some(25.0)), Signal::StrongBuy);
    }

    #[test]
    fn completed_bear_impulse() {
        assert_eq!(signal(&BEAR_IMPULSE, Some(40.0)), Signal::Neutral);
        assert_eq!(signal(&BEAR_IMPULSE, Some(20.0)), Signal::ModerateBuy);
    }

    #[test]
    fn bear_correction_complete_is_caution() {
        let mut p = BEAR_IMPULSE.to_vec();
        p.extend([115.0, 105.0, 125.0]);
        assert_eq!(signal(&p, Some(55.0)), Signal::HoldCaution);
    }

    #[test]
    fn missing_rsi_never_upgrades() {
        let mut p = BULL_IMPULSE.to_vec();
        p.extend([135.0, 145.0, 125.0]);
        assert_eq!(signal(&p, None), Signal::ModerateBuy);
    }

    #[test]
    fn every_detected_sequence_ends_on_five_or_a_correction() {
        for p in [
            BULL_IMPULSE.to_vec(),
            [BULL_IMPULSE.as_slice(), &[135.0]].concat(),
            [BULL_IMPULSE.as_slice(), &[135.0, 145.0]].concat(),
            [BEAR_IMPULSE.as_slice(), &[115.0, 105.0, 125.0]].concat(),
        ] {
            let last = waves(&p).last().map(|w| w.label);
            assert!(
                matches!(
                    last,
                    Some(WaveLabel::Five | WaveLabel::A | WaveLabel::B | WaveLabel::C)
                ),
                "{p:?} ended on {last:?}"
            );
        }
    }

    #[test]
    fn interior_impulse_label_is_neutral() {
        let mut w = waves(&BULL_IMPULSE);
        w.truncate(3);
        let summary = WaveSummary::from_waves(&w);
        let r = recommend(&w, &summary, Some(50.0), &RsiConfig::default());
        assert_eq!(r.signal, Signal::Neutral);
    }

    #[test]
    fn display_matches_report_wording() {
        assert_eq!(Signal::HoldCaution.to_string(), "HOLD/CAUTION");
    }
}
