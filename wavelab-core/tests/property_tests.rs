//! Property tests for detector invariants.
//!
//! Uses proptest to verify, over random positive price walks:
//! 1. Swing points strictly alternate peak/trough and move forward in time
//! 2. Every impulse respects the wave 2 and wave 4 rules
//! 3. Waves chain end-to-start and labels follow 1-5 then A-B-C
//! 4. Detection is deterministic
//! 5. RSI stays within [0, 100]

use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use wavelab_core::detector::swing_points;
use wavelab_core::indicators::{rsi, RsiSmoothing};
use wavelab_core::{detect, DetectorConfig, Direction, PriceSeries, WaveLabel};

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_walk() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-0.08..0.08_f64, 5..200).prop_map(|returns| {
        let mut price = 100.0;
        returns
            .into_iter()
            .map(|r| {
                price *= 1.0 + r;
                price
            })
            .collect()
    })
}

fn arb_sensitivity() -> impl Strategy<Value = f64> {
    0.05..1.0_f64
}

fn to_series(prices: &[f64]) -> PriceSeries {
    let t0 = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
    PriceSeries::from_prices("prop", t0, prices).unwrap()
}

fn signed(impulse: Direction, price: f64) -> f64 {
    match impulse {
        Direction::Up => price,
        Direction::Down => -price,
    }
}

// ── 1. Swing alternation ─────────────────────────────────────────────

proptest! {
    #[test]
    fn swings_alternate(prices in arb_walk(), sensitivity in arb_sensitivity()) {
        let series = to_series(&prices);
        let swings = swing_points(&series, &DetectorConfig::with_sensitivity(sensitivity));
        for pair in swings.windows(2) {
            prop_assert_eq!(pair[0].kind.opposite(), pair[1].kind);
            prop_assert!(pair[0].index < pair[1].index);
        }
        // Only the trailing swing may be unconfirmed.
        if let Some((last, rest)) = swings.split_last() {
            prop_assert!(!last.confirmed);
            prop_assert!(rest.iter().all(|s| s.confirmed));
        }
    }
}

// ── 2. Elliott rules hold on every detected impulse ──────────────────

proptest! {
    #[test]
    fn impulses_respect_rules(prices in arb_walk(), sensitivity in arb_sensitivity()) {
        let waves = detect(&to_series(&prices), sensitivity).unwrap();
        for (i, w1) in waves.iter().enumerate().filter(|(_, w)| w.label == WaveLabel::One) {
            let impulse = &waves[i..i + 5];
            let x = |p: f64| signed(w1.direction, p);

            // wave 2 stays above wave 1's origin
            prop_assert!(x(impulse[1].end.price()) >= x(impulse[0].start.price()));
            // wave 4 stays clear of wave 1's territory
            let (lo1, hi1) = impulse[0].price_range();
            let (lo4, hi4) = impulse[3].price_range();
            prop_assert!(hi1 < lo4 || hi4 < lo1);
            // wave 3 is not the shortest motive leg
            let (l1, l3, l5) = (impulse[0].length(), impulse[2].length(), impulse[4].length());
            prop_assert!(!(l3 < l1 && l3 < l5));
        }
    }
}

// ── 3. Structure of the wave sequence ────────────────────────────────

proptest! {
    #[test]
    fn waves_chain_and_label_in_order(prices in arb_walk(), sensitivity in arb_sensitivity()) {
        let waves = detect(&to_series(&prices), sensitivity).unwrap();
        for pair in waves.windows(2) {
            prop_assert!(pair[1].cycle == pair[0].cycle || pair[1].cycle == pair[0].cycle + 1);
            if pair[1].cycle == pair[0].cycle {
                prop_assert_eq!(pair[0].end, pair[1].start);
                prop_assert_ne!(pair[0].direction, pair[1].direction);
                prop_assert!(pair[0].label < pair[1].label);
            } else {
                // A new cycle may skip swings that fit no impulse.
                prop_assert!(pair[1].start.index >= pair[0].end.index);
                prop_assert_eq!(pair[1].label, WaveLabel::One);
            }
        }
        if let Some(first) = waves.first() {
            prop_assert_eq!(first.label, WaveLabel::One);
            prop_assert_eq!(first.cycle, 0);
        }
    }
}

// ── 4. Determinism ───────────────────────────────────────────────────

proptest! {
    #[test]
    fn detection_is_deterministic(prices in arb_walk(), sensitivity in arb_sensitivity()) {
        let series = to_series(&prices);
        prop_assert_eq!(detect(&series, sensitivity).unwrap(), detect(&series, sensitivity).unwrap());
    }

    #[test]
    fn monotonic_input_has_no_waves(start in 1.0..1000.0_f64, step in 0.001..0.1_f64, n in 5usize..100) {
        let prices: Vec<f64> = (0..n).map(|i| start * (1.0 + step).powi(i as i32)).collect();
        prop_assert!(detect(&to_series(&prices), 0.1).unwrap().is_empty());
    }
}

// ── 5. RSI bounds ────────────────────────────────────────────────────

proptest! {
    #[test]
    fn rsi_is_bounded(prices in arb_walk(), period in 1usize..30) {
        let series = to_series(&prices);
        for smoothing in [RsiSmoothing::Wilder, RsiSmoothing::Simple] {
            let values = rsi(&series, period, smoothing).unwrap();
            prop_assert_eq!(values.len(), prices.len());
            for v in values.into_iter().filter(|v| !v.is_nan()) {
                prop_assert!((0.0..=100.0).contains(&v));
            }
        }
    }
}
