//! ROC era / Western date normalization.
//!
//! TWSE history endpoints report dates as `"YYY/MM/DD"` in the ROC era
//! calendar (year = Western year − 1911), while other sources already use
//! Western years. All conversion goes through [`normalize_date`] so the
//! boundary rule lives in one place: a raw year below [`ERA_YEAR_OFFSET`] is
//! an era year, anything else is Western.

use chrono::NaiveDate;

use crate::constants::ERA_YEAR_OFFSET;

/// Converts a raw year to a Western year.
pub fn to_western_year(raw_year: i32) -> i32 {
    if raw_year < ERA_YEAR_OFFSET {
        raw_year + ERA_YEAR_OFFSET
    } else {
        raw_year
    }
}

/// Normalizes an era or Western date to `"YYYY/MM/DD"`.
///
/// The result orders correctly under plain string comparison. Input that is
/// not exactly three slash-separated parts, or whose year is not numeric, is
/// returned unchanged.
///
/// ```
/// use tickerboard_core::history::normalize_date;
///
/// assert_eq!(normalize_date("113/05/12"), "2024/05/12");
/// assert_eq!(normalize_date("2024/5/2"), "2024/05/02");
/// assert_eq!(normalize_date("2024-05-12"), "2024-05-12");
/// ```
pub fn normalize_date(era_date: &str) -> String {
    let parts: Vec<&str> = era_date.split('/').collect();
    let [year, month, day] = parts.as_slice() else {
        return era_date.to_string();
    };

    let Ok(raw_year) = year.trim().parse::<i32>() else {
        return era_date.to_string();
    };

    format!(
        "{:04}/{:0>2}/{:0>2}",
        to_western_year(raw_year),
        month.trim(),
        day.trim()
    )
}

/// Parses a normalized `"YYYY/MM/DD"` string into a calendar date.
pub fn to_naive_date(normalized: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(normalized, "%Y/%m/%d").ok()
}

/// Returns the `"MM/DD"` part of a normalized date, or the whole string if it
/// has no year component.
pub fn month_day_key(normalized: &str) -> &str {
    normalized
        .split_once('/')
        .map(|(_, rest)| rest)
        .unwrap_or(normalized)
}

/// Returns the `"YYYY/MM"` part of a normalized date, or the whole string if it
/// has no day component.
pub fn year_month_key(normalized: &str) -> &str {
    normalized
        .rsplit_once('/')
        .map(|(head, _)| head)
        .unwrap_or(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_era_year_converted() {
        assert_eq!(normalize_date("113/05/12"), "2024/05/12");
        assert_eq!(normalize_date("89/01/04"), "2000/01/04");
    }

    #[test]
    fn test_western_year_kept() {
        assert_eq!(normalize_date("2024/05/12"), "2024/05/12");
        assert_eq!(normalize_date("1911/01/01"), "1911/01/01");
    }

    #[test]
    fn test_boundary_year() {
        assert_eq!(to_western_year(1910), 3821);
        assert_eq!(to_western_year(1911), 1911);
        assert_eq!(to_western_year(113), 2024);
    }

    #[test]
    fn test_pads_month_and_day() {
        assert_eq!(normalize_date("113/5/2"), "2024/05/02");
        assert_eq!(normalize_date("113/12/31"), "2024/12/31");
    }

    #[test]
    fn test_malformed_passthrough() {
        assert_eq!(normalize_date("113-05-12"), "113-05-12");
        assert_eq!(normalize_date("113/05"), "113/05");
        assert_eq!(normalize_date("113/05/12/01"), "113/05/12/01");
        assert_eq!(normalize_date("abc/05/12"), "abc/05/12");
        assert_eq!(normalize_date(""), "");
    }

    #[test]
    fn test_lexical_order_matches_calendar() {
        let mut dates = vec![
            normalize_date("113/05/12"),
            normalize_date("112/12/29"),
            normalize_date("113/5/1"),
            normalize_date("2024/04/30"),
        ];
        dates.sort();
        assert_eq!(
            dates,
            vec!["2023/12/29", "2024/04/30", "2024/05/01", "2024/05/12"]
        );
    }

    #[test]
    fn test_keys() {
        assert_eq!(month_day_key("2024/05/12"), "05/12");
        assert_eq!(year_month_key("2024/05/12"), "2024/05");
        assert_eq!(month_day_key("garbage"), "garbage");
        assert_eq!(year_month_key("garbage"), "garbage");
    }

    #[test]
    fn test_to_naive_date() {
        assert_eq!(
            to_naive_date("2024/05/12"),
            NaiveDate::from_ymd_opt(2024, 5, 12)
        );
        assert_eq!(to_naive_date("2024/02/30"), None);
    }
}
