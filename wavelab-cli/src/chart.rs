//! Chart panel - price with wave overlay, RSI below
//!
//! Displays:
//! - Price line (primary)
//! - Wave segments between swing points (green motive, red corrective)
//! - Wave labels at each wave's end
//! - RSI with overbought/oversold guides

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Widget},
};
use wavelab_core::indicators::RsiConfig;
use wavelab_core::{Analysis, PriceSeries, SwingKind};

const PRICE_COLOR: Color = Color::Blue;
const MOTIVE_COLOR: Color = Color::Green;
const CORRECTIVE_COLOR: Color = Color::Red;
const RSI_COLOR: Color = Color::Magenta;

/// Price/wave chart with an RSI panel underneath.
pub struct WaveChart<'a> {
    series: &'a PriceSeries,
    analysis: &'a Analysis,
    rsi: &'a RsiConfig,
}

impl<'a> WaveChart<'a> {
    pub fn new(series: &'a PriceSeries, analysis: &'a Analysis, rsi: &'a RsiConfig) -> Self {
        Self {
            series,
            analysis,
            rsi,
        }
    }

    fn price_bounds(&self) -> [f64; 2] {
        let (lo, hi) = self
            .series
            .prices()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p), hi.max(p))
            });
        if !lo.is_finite() || !hi.is_finite() {
            return [0.0, 1.0];
        }
        let pad = if hi > lo { (hi - lo) * 0.08 } else { 1.0 };
        [lo - pad, hi + pad]
    }

    fn render_price(&self, area: Rect, buf: &mut Buffer) {
        let price_data: Vec<(f64, f64)> = self
            .series
            .prices()
            .enumerate()
            .map(|(i, p)| (i as f64, p))
            .collect();
        let x_max = price_data.len().saturating_sub(1).max(1) as f64;
        let [y_lower, y_upper] = self.price_bounds();
        let waves = &self.analysis.waves;

        let segments: Vec<([(f64, f64); 2], Color)> = waves
            .iter()
            .map(|w| {
                let color = if w.label.is_motive() {
                    MOTIVE_COLOR
                } else {
                    CORRECTIVE_COLOR
                };
                (
                    [
                        (w.start.index as f64, w.start.price()),
                        (w.end.index as f64, w.end.price()),
                    ],
                    color,
                )
            })
            .collect();

        let mut datasets = vec![Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(PRICE_COLOR))
            .data(&price_data)];
        for (points, color) in &segments {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(*color))
                    .data(points),
            );
        }

        let title = format!(
            " {} | {} waves | {} ",
            self.analysis.coin,
            waves.len(),
            self.analysis.recommendation.signal
        );
        let y_mid = (y_lower + y_upper) / 2.0;
        let y_labels = vec![
            Span::raw(format!("{y_lower:.2}")),
            Span::raw(format!("{y_mid:.2}")),
            Span::raw(format!("{y_upper:.2}")),
        ];

        Chart::new(datasets)
            .block(Block::default().borders(Borders::ALL).title(title))
            .x_axis(Axis::default().bounds([0.0, x_max]))
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([y_lower, y_upper])
                    .labels(y_labels),
            )
            .render(area, buf);

        // Wave labels go straight into the buffer; Chart has no annotations.
        // The plot starts after the y-axis labels plus the axis line.
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let label_width = format!("{y_upper:.2}").len().max(format!("{y_lower:.2}").len()) as u16 + 1;
        let plot_left = inner.x + label_width;
        let plot_width = inner.width.saturating_sub(label_width);
        let plot_height = inner.height;
        if plot_width < 2 || plot_height < 2 {
            return;
        }

        for w in waves {
            let x_frac = w.end.index as f64 / x_max;
            let y_frac = (w.end.price() - y_lower) / (y_upper - y_lower);
            let px = plot_left + (x_frac * (plot_width - 1) as f64).round() as u16;
            let row = ((1.0 - y_frac) * (plot_height - 1) as f64).round() as u16;
            // Peaks label one row above the line, troughs one row below.
            let row = match w.end.kind {
                SwingKind::Peak => row.saturating_sub(1),
                SwingKind::Trough => (row + 1).min(plot_height - 1),
            };
            let label = w.label.to_string();
            let px = px.min(inner.right().saturating_sub(label.len() as u16));
            let style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
            buf.set_string(px, inner.y + row, &label, style);
        }
    }

    fn render_rsi(&self, area: Rect, buf: &mut Buffer) {
        let values: Vec<(f64, f64)> = self
            .analysis
            .rsi
            .iter()
            .enumerate()
            .filter(|(_, v)| !v.is_nan())
            .map(|(i, &v)| (i as f64, v))
            .collect();
        let x_max = self.analysis.rsi.len().saturating_sub(1).max(1) as f64;
        let overbought = [(0.0, self.rsi.overbought), (x_max, self.rsi.overbought)];
        let oversold = [(0.0, self.rsi.oversold), (x_max, self.rsi.oversold)];

        let datasets = vec![
            Dataset::default()
                .name(format!("RSI {}", self.rsi.period))
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(RSI_COLOR))
                .data(&values),
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(CORRECTIVE_COLOR))
                .data(&overbought),
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(MOTIVE_COLOR))
                .data(&oversold),
        ];

        Chart::new(datasets)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Relative Strength Index (RSI) "),
            )
            .x_axis(Axis::default().bounds([0.0, x_max]))
            .y_axis(
                Axis::default()
                    .bounds([0.0, 100.0])
                    .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
            )
            .render(area, buf);
    }
}

impl Widget for WaveChart<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [price_area, rsi_area] =
            Layout::vertical([Constraint::Percentage(70), Constraint::Percentage(30)]).areas(area);
        self.render_price(price_area, buf);
        self.render_rsi(rsi_area, buf);
    }
}

/// Draw the chart once, inline below the cursor.
pub fn draw_inline(chart: WaveChart<'_>, height: u16) -> std::io::Result<()> {
    use ratatui::{backend::CrosstermBackend, Terminal, TerminalOptions, Viewport};

    let backend = CrosstermBackend::new(std::io::stdout());
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(height),
        },
    )?;
    terminal.draw(|frame| frame.render_widget(chart, frame.area()))?;
    println!();
    Ok(())
}
