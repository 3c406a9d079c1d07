//! Core error types for Tickerboard.
//!
//! Upstream data problems never surface here: missing fields become the
//! `"N/A"` sentinel and malformed numbers become `NaN`. These errors cover
//! caller-supplied settings only (trading window bounds, granularity names).

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the core crate.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Trading window closes before it opens: {open} > {close}")]
    InvertedWindow { open: String, close: String },

    #[error("Unknown granularity: {0}")]
    UnknownGranularity(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = Error::InvalidTime("25:00".to_string());
        assert_eq!(format!("{}", error), "Invalid time of day: 25:00");

        let error = Error::InvertedWindow {
            open: "13:30".to_string(),
            close: "09:00".to_string(),
        };
        assert_eq!(
            format!("{}", error),
            "Trading window closes before it opens: 13:30 > 09:00"
        );
    }
}
