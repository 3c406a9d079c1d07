//! Trading window detection.
//!
//! The reconciler only smooths "N/A" readings while the market is open. The
//! caller decides that from wall-clock time using a [`TradingWindow`].

use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Default session open for TWSE (09:00 local).
pub const DEFAULT_OPEN: &str = "09:00";

/// Default session close for TWSE (13:30 local, end of the closing auction).
pub const DEFAULT_CLOSE: &str = "13:30";

/// Default exchange timezone.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Taipei;

/// A daily session range in the exchange's local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradingWindow {
    pub open: NaiveTime,
    pub close: NaiveTime,
    pub timezone: Tz,
    pub weekdays_only: bool,
}

impl Default for TradingWindow {
    fn default() -> Self {
        Self {
            open: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            close: NaiveTime::from_hms_opt(13, 30, 0).unwrap_or(NaiveTime::MIN),
            timezone: DEFAULT_TIMEZONE,
            weekdays_only: true,
        }
    }
}

fn parse_time(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| Error::InvalidTime(value.to_string()))
}

impl TradingWindow {
    /// Creates a weekday-only window. `open` must not be after `close`.
    pub fn new(open: NaiveTime, close: NaiveTime, timezone: Tz) -> Result<Self> {
        if open > close {
            return Err(Error::InvertedWindow {
                open: open.format("%H:%M:%S").to_string(),
                close: close.format("%H:%M:%S").to_string(),
            });
        }
        Ok(Self {
            open,
            close,
            timezone,
            weekdays_only: true,
        })
    }

    /// Builds a window from `HH:MM[:SS]` strings and an IANA timezone name.
    pub fn parse(open: &str, close: &str, timezone: &str) -> Result<Self> {
        let tz: Tz = timezone
            .trim()
            .parse()
            .map_err(|_| Error::UnknownTimezone(timezone.to_string()))?;
        Self::new(parse_time(open)?, parse_time(close)?, tz)
    }

    /// Also treat weekends as trading days.
    pub fn with_weekends(mut self) -> Self {
        self.weekdays_only = false;
        self
    }

    /// Returns true if `instant` falls inside the window. Both bounds are
    /// inclusive so the closing auction print at exactly 13:30 still counts.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        let local = instant.with_timezone(&self.timezone);

        if self.weekdays_only && matches!(local.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }

        let time = local.time();
        time >= self.open && time <= self.close
    }

    /// Checks the current wall-clock time.
    pub fn is_open_now(&self) -> bool {
        self.contains(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn taipei(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        chrono_tz::Asia::Taipei
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_default_window() {
        let window = TradingWindow::default();
        assert_eq!(window.open, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(window.close, NaiveTime::from_hms_opt(13, 30, 0).unwrap());
        assert_eq!(window.timezone, chrono_tz::Asia::Taipei);
        assert!(window.weekdays_only);
    }

    #[test]
    fn test_contains_during_session() {
        let window = TradingWindow::default();
        // Wednesday 2024-05-15
        assert!(window.contains(taipei(2024, 5, 15, 9, 0)));
        assert!(window.contains(taipei(2024, 5, 15, 11, 45)));
        assert!(window.contains(taipei(2024, 5, 15, 13, 30)));
    }

    #[test]
    fn test_outside_session() {
        let window = TradingWindow::default();
        assert!(!window.contains(taipei(2024, 5, 15, 8, 59)));
        assert!(!window.contains(taipei(2024, 5, 15, 13, 31)));
        assert!(!window.contains(taipei(2024, 5, 15, 20, 0)));
    }

    #[test]
    fn test_weekend_closed_unless_enabled() {
        let window = TradingWindow::default();
        // Saturday 2024-05-18
        assert!(!window.contains(taipei(2024, 5, 18, 10, 0)));
        assert!(window.with_weekends().contains(taipei(2024, 5, 18, 10, 0)));
    }

    #[test]
    fn test_uses_exchange_timezone() {
        let window = TradingWindow::default();
        // 02:00 UTC is 10:00 in Taipei
        let instant = Utc.with_ymd_and_hms(2024, 5, 15, 2, 0, 0).unwrap();
        assert!(window.contains(instant));
    }

    #[test]
    fn test_parse() {
        let window = TradingWindow::parse("09:00", "13:30:00", "Asia/Taipei").unwrap();
        assert_eq!(window, TradingWindow::default());

        assert_eq!(
            TradingWindow::parse("9am", "13:30", "Asia/Taipei"),
            Err(Error::InvalidTime("9am".to_string()))
        );
        assert_eq!(
            TradingWindow::parse("09:00", "13:30", "Mars/Olympus"),
            Err(Error::UnknownTimezone("Mars/Olympus".to_string()))
        );
        assert!(matches!(
            TradingWindow::parse("13:30", "09:00", "Asia/Taipei"),
            Err(Error::InvertedWindow { .. })
        ));
    }
}
