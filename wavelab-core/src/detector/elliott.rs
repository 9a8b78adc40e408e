//! Elliott labeling of zig-zag swings.
//!
//! A window of six consecutive swings is an impulse when, measured in the
//! impulse direction:
//! - wave 2 does not retrace beyond the start of wave 1
//! - wave 3 satisfies the configured `Wave3Rule`
//! - wave 4 stays out of wave 1's price territory (no diagonals)
//!
//! The correction that follows is labeled A-B-C as far as swings exist; B may
//! not carry past the end of wave 5.

use super::Wave3Rule;
use crate::domain::{Direction, SwingPoint, Wave, WaveLabel};

/// Label impulse/correction cycles across the whole swing sequence.
pub fn label_waves(swings: &[SwingPoint], rule: Wave3Rule) -> Vec<Wave> {
    let mut waves = Vec::new();
    let mut cycle = 0;
    let mut i = 0;

    while i + 5 < swings.len() {
        let Some(direction) = impulse_direction(&swings[i..=i + 5], rule) else {
            i += 1;
            continue;
        };

        let mut end = i + 5;
        for (k, label) in WaveLabel::IMPULSE.into_iter().enumerate() {
            waves.push(make_wave(swings, i + k, label, cycle));
        }

        let legs = correction_legs(&swings[end..], direction);
        for (k, label) in WaveLabel::CORRECTION.into_iter().take(legs).enumerate() {
            waves.push(make_wave(swings, end + k, label, cycle));
        }
        end += legs;

        tracing::trace!(cycle, start = swings[i].index, %direction, correction_legs = legs, "impulse labeled");
        cycle += 1;
        i = end;
    }

    waves
}

/// Direction of the impulse if the six swings form a valid one.
fn impulse_direction(s: &[SwingPoint], rule: Wave3Rule) -> Option<Direction> {
    let direction = Direction::between(s[0].price(), s[1].price());
    // Flip bearish windows so every rule reads as the bullish case.
    let sign = match direction {
        Direction::Up => 1.0,
        Direction::Down => -1.0,
    };
    let x: Vec<f64> = s.iter().map(|p| sign * p.price()).collect();

    let wave1 = x[1] - x[0];
    let wave3 = x[3] - x[2];
    let wave5 = x[5] - x[4];
    if wave1 <= 0.0 || wave3 <= 0.0 || wave5 <= 0.0 {
        return None;
    }
    if x[2] < x[0] {
        return None;
    }
    if x[4] <= x[1] {
        return None;
    }
    let wave3_ok = match rule {
        Wave3Rule::NotShortest => !(wave3 < wave1 && wave3 < wave5),
        Wave3Rule::Longest => wave3 >= wave1 && wave3 >= wave5,
    };
    wave3_ok.then_some(direction)
}

/// Number of correction legs (0..=3) available after an impulse whose wave 5
/// ends at `tail[0]`.
fn correction_legs(tail: &[SwingPoint], impulse: Direction) -> usize {
    let available = tail.len().saturating_sub(1).min(3);
    if available < 2 {
        return available;
    }
    let wave5_end = tail[0].price();
    let b_end = tail[2].price();
    let b_overshoots = match impulse {
        Direction::Up => b_end > wave5_end,
        Direction::Down => b_end < wave5_end,
    };
    if b_overshoots {
        1
    } else {
        available
    }
}

fn make_wave(swings: &[SwingPoint], at: usize, label: WaveLabel, cycle: usize) -> Wave {
    let (start, end) = (swings[at], swings[at + 1]);
    Wave {
        start,
        end,
        label,
        direction: Direction::between(start.price(), end.price()),
        cycle,
    }
}
