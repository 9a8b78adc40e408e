//! Plain-text analysis report.

use wavelab_core::Analysis;

/// Capitalize the first letter of a coin id for display ("bitcoin" → "Bitcoin").
pub fn display_name(coin: &str) -> String {
    let mut chars = coin.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_report(analysis: &Analysis, synthetic: bool) -> String {
    let name = display_name(&analysis.coin);
    let s = &analysis.summary;
    let mut out = String::new();

    out.push_str(&format!("=== Elliott Wave Analysis: {name} ===\n"));
    if synthetic {
        out.push_str("WARNING: Results based on SYNTHETIC data\n");
    }
    out.push('\n');
    out.push_str("--- Wave Pattern ---\n");
    out.push_str(&format!("Total Waves:      {}\n", s.total_waves));
    out.push_str(&format!("Motive Waves:     {}\n", s.motive_waves));
    out.push_str(&format!("Corrective Waves: {}\n", s.corrective_waves));
    out.push_str(&format!("Cycles:           {}\n", s.cycles));
    out.push_str(&format!("Trend:            {}\n", s.trend));
    if let Some(last) = analysis.waves.last() {
        let state = if last.end.confirmed {
            "complete"
        } else {
            "in progress"
        };
        out.push_str(&format!(
            "Current Wave:     {} ({}, {:+.2}%, {state})\n",
            last.label,
            last.direction,
            last.pct_change() * 100.0
        ));
    }
    out.push('\n');
    out.push_str(&format!("Current Price:    ${:.2}\n", analysis.last_price));
    match analysis.last_rsi {
        Some(rsi) => out.push_str(&format!("RSI:              {rsi:.1}\n")),
        None => out.push_str("RSI:              n/a (not enough data)\n"),
    }
    out.push('\n');
    out.push_str(&format!(
        "Recommendation:   {}\n",
        analysis.recommendation.signal
    ));
    out.push_str(&format!(
        "Reason:           {}\n",
        analysis.recommendation.reason
    ));
    out.push('\n');
    out.push_str(
        "Impulse waves (1, 3, 5) move with the main trend; corrective waves \
         (2, 4, A, B, C) move against it. A finished five-wave impulse is \
         usually followed by a three-wave correction.\n",
    );
    out
}

/// One line per coin for `scan`.
pub fn format_scan_line(analysis: &Analysis) -> String {
    let phase = analysis
        .waves
        .last()
        .map(|w| w.label.to_string())
        .unwrap_or_else(|| "-".into());
    let rsi = analysis
        .last_rsi
        .map(|v| format!("{v:.1}"))
        .unwrap_or_else(|| "n/a".into());
    format!(
        "{:<20} {:>14.4} {:>6} {:>6} {:<13} {}",
        display_name(&analysis.coin),
        analysis.last_price,
        phase,
        rsi,
        analysis.summary.trend.to_string(),
        analysis.recommendation.signal
    )
}

pub fn scan_header() -> String {
    format!(
        "{:<20} {:>14} {:>6} {:>6} {:<13} {}\n{}",
        "Coin",
        "Price",
        "Wave",
        "RSI",
        "Trend",
        "Signal",
        "-".repeat(78)
    )
}
