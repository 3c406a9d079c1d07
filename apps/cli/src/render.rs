//! Plain-text rendering for the board and charts.

use std::fmt::Write;

use tickerboard_core::history::ChartSeries;
use tickerboard_core::quotes::QuoteSnapshot;
use tickerboard_market_data::QuoteTarget;

const PLACEHOLDER: &str = "-";

/// Renders the board in watch-list order. Codes missing from the snapshot
/// are shown as a bare row.
pub fn render_board(snapshot: &QuoteSnapshot, targets: &[QuoteTarget]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<6} {:<12} {:>10} {:>9} {:>8} {:>10} {:>9}",
        "Code", "Name", "Price", "Change", "Pct", "Prev", "Time"
    );

    for target in targets {
        match snapshot.get(&target.code) {
            Some(record) => {
                let arrow = if record.is_down() { "▼" } else { " " };
                let _ = writeln!(
                    out,
                    "{:<6} {:<12} {:>10} {:>8}{} {:>8} {:>10} {:>9}",
                    record.code,
                    truncate(&record.name, 12),
                    record.instant_price,
                    record.price_change,
                    arrow,
                    record.change_percentage,
                    record.yesterday_close,
                    record.trade_time.as_deref().unwrap_or(PLACEHOLDER),
                );
            }
            None => {
                let _ = writeln!(out, "{:<6} {:<12} {:>10}", target.code, PLACEHOLDER, PLACEHOLDER);
            }
        }
    }
    out
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

/// Renders a chart as one line per point plus the price range.
pub fn render_chart(code: &str, chart: &ChartSeries) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", code, chart.granularity);

    if chart.series.is_empty() {
        let _ = writeln!(out, "No data");
        return out;
    }

    for point in chart.series.iter() {
        let _ = writeln!(
            out,
            "{:<8} {:>10.2} {:>7.2}%",
            point.date_key, point.closing_price, point.percentage_change
        );
    }

    if let Some((low, high)) = chart.series.price_bounds() {
        let _ = writeln!(out, "Range: {:.2} - {:.2}", low, high);
    }
    if chart.incomplete == Some(true) {
        let _ = writeln!(out, "Note: this month's data may still be incomplete.");
    }
    out
}
