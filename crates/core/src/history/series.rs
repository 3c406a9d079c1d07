//! Daily record normalization for charting.
//!
//! Rows arrive unsorted, possibly from several monthly fetches and with
//! malformed values. Nothing here fails: a bad number becomes `NaN` for that
//! point and a bad date only disturbs the sort order.

use chrono::{Datelike, NaiveDate};
use log::debug;

use super::era_date::{month_day_key, normalize_date, year_month_key};
use super::model::{ChartSeries, DayRecord, Granularity, NormalizedSeries, SeriesPoint};

/// Stable sort by normalized calendar date.
pub fn sort_ascending(mut rows: Vec<DayRecord>) -> Vec<DayRecord> {
    rows.sort_by_cached_key(|row| normalize_date(&row.date));
    rows
}

fn parse_magnitude(cleaned: &str) -> f64 {
    if cleaned.is_empty() {
        return f64::NAN;
    }
    cleaned.parse::<f64>().unwrap_or(f64::NAN)
}

/// Parses a signed change such as `"+1.50"` or `"-2.30"`.
///
/// Any `-` in the string makes the value negative. Sign characters, thousands
/// separators and whitespace are stripped before parsing the magnitude;
/// anything left that is not a number yields `NaN`.
pub fn parse_price_change(value: &str) -> f64 {
    let negative = value.contains('-');
    let magnitude: String = value
        .chars()
        .filter(|c| !matches!(c, '+' | '-' | ',') && !c.is_whitespace())
        .collect();
    let magnitude = parse_magnitude(&magnitude);
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

/// Parses a closing price, ignoring thousands separators. Returns `NaN` when
/// the value is not a number.
pub fn parse_closing_price(value: &str) -> f64 {
    let cleaned: String = value
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    parse_magnitude(&cleaned)
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage change relative to the previous close implied by
/// `closing_price - signed_change`. Returns `0.0` when that close is zero.
pub fn derive_percentage(closing_price: f64, signed_change: f64) -> f64 {
    let yesterday_close = closing_price - signed_change;
    if yesterday_close == 0.0 {
        return 0.0;
    }
    round_2dp(100.0 * signed_change / yesterday_close)
}

fn to_point(date_key: &str, row: &DayRecord) -> SeriesPoint {
    let closing_price = parse_closing_price(&row.closing_price);
    let signed_change = parse_price_change(&row.price_change);
    SeriesPoint {
        date_key: date_key.to_string(),
        closing_price,
        percentage_change: derive_percentage(closing_price, signed_change),
    }
}

/// One point per trading day, keyed `"MM/DD"`, in ascending order.
pub fn build_monthly(rows: Vec<DayRecord>) -> NormalizedSeries {
    let points = sort_ascending(rows)
        .iter()
        .map(|row| {
            let normalized = normalize_date(&row.date);
            to_point(month_day_key(&normalized), row)
        })
        .collect();
    NormalizedSeries::new(points)
}

/// One point per month, keyed `"YYYY/MM"`, taken from the month's last
/// trading day.
pub fn build_yearly(rows: Vec<DayRecord>) -> NormalizedSeries {
    let sorted = sort_ascending(rows);
    let mut points: Vec<SeriesPoint> = Vec::new();

    // Input is ascending, so the last row seen for a month wins and months
    // arrive in order.
    for row in &sorted {
        let normalized = normalize_date(&row.date);
        let month = year_month_key(&normalized);
        let point = to_point(month, row);
        match points.last_mut() {
            Some(last) if last.date_key == month => *last = point,
            _ => points.push(point),
        }
    }

    debug!(
        "Collapsed {} daily rows into {} monthly points",
        sorted.len(),
        points.len()
    );
    NormalizedSeries::new(points)
}

/// Number of calendar days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> u32 {
    let (next_year, next_month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Heuristic liveness flag for a monthly chart.
///
/// Compares the row count against calendar days, not trading days, so a
/// complete month with weekends or holidays still reports `true`. This is
/// intentionally approximate.
pub fn is_monthly_incomplete(row_count: usize, as_of: NaiveDate) -> bool {
    row_count < days_in_month(as_of) as usize
}

/// Builds the series for `granularity`; `as_of` feeds the monthly
/// completeness flag.
pub fn build_chart(rows: Vec<DayRecord>, granularity: Granularity, as_of: NaiveDate) -> ChartSeries {
    match granularity {
        Granularity::Monthly => {
            let row_count = rows.len();
            ChartSeries {
                granularity,
                series: build_monthly(rows),
                incomplete: Some(is_monthly_incomplete(row_count, as_of)),
            }
        }
        Granularity::Yearly => ChartSeries {
            granularity,
            series: build_yearly(rows),
            incomplete: None,
        },
    }
}
