//! Zig-zag swing extraction.
//!
//! A reversal from the running extreme of the current leg qualifies when it
//! reaches `sensitivity` of that leg's amplitude and `min_reversal_pct` of the
//! extreme's price. Until the first leg exists there is no amplitude to
//! measure against, so only the absolute floor applies (any strict move when
//! the floor is zero).

use super::DetectorConfig;
use crate::domain::{PricePoint, PriceSeries, SwingKind, SwingPoint};

/// Extract alternating peaks and troughs from `series`.
///
/// The trailing extreme is appended with `confirmed = false`.
pub fn swing_points(series: &PriceSeries, config: &DetectorConfig) -> Vec<SwingPoint> {
    let pts = series.points();
    let Some((first, mut leg)) = first_leg(pts, config.min_reversal_pct) else {
        return Vec::new();
    };

    let mut swings = vec![first];
    let mut last = first;

    for (i, p) in pts.iter().enumerate().skip(leg.extreme + 1) {
        let extreme = pts[leg.extreme].price;
        // Positive when price extends the leg, negative when it reverses.
        let progress = match leg.heading {
            SwingKind::Peak => p.price - extreme,
            SwingKind::Trough => extreme - p.price,
        };

        if progress > 0.0 {
            leg.extreme = i;
            continue;
        }

        let reversal = -progress;
        let amplitude = (extreme - last.price()).abs();
        if reversal > 0.0
            && reversal >= config.sensitivity * amplitude
            && reversal >= config.min_reversal_pct * extreme
        {
            let confirmed = swing(pts, leg.extreme, leg.heading, true);
            swings.push(confirmed);
            last = confirmed;
            leg = Leg {
                heading: leg.heading.opposite(),
                extreme: i,
            };
        }
    }

    swings.push(swing(pts, leg.extreme, leg.heading, false));
    swings
}

/// The leg currently being extended: the kind of swing it will end in and
/// the index of its running extreme.
#[derive(Debug, Clone, Copy)]
struct Leg {
    heading: SwingKind,
    extreme: usize,
}

/// Find the first swing and the leg leaving it by tracking the running high
/// and low from the first point.
fn first_leg(pts: &[PricePoint], floor: f64) -> Option<(SwingPoint, Leg)> {
    let (mut hi, mut lo) = (0usize, 0usize);

    for (i, p) in pts.iter().enumerate().skip(1) {
        let rise = p.price - pts[lo].price;
        if rise > 0.0 && rise >= floor * pts[lo].price {
            let leg = Leg {
                heading: SwingKind::Peak,
                extreme: i,
            };
            return Some((swing(pts, lo, SwingKind::Trough, true), leg));
        }

        let fall = pts[hi].price - p.price;
        if fall > 0.0 && fall >= floor * pts[hi].price {
            let leg = Leg {
                heading: SwingKind::Trough,
                extreme: i,
            };
            return Some((swing(pts, hi, SwingKind::Peak, true), leg));
        }

        if p.price > pts[hi].price {
            hi = i;
        }
        if p.price < pts[lo].price {
            lo = i;
        }
    }
    None
}

fn swing(pts: &[PricePoint], index: usize, kind: SwingKind, confirmed: bool) -> SwingPoint {
    SwingPoint {
        index,
        point: pts[index],
        kind,
        confirmed,
    }
}
