//! Quote domain models.
//!
//! Every price field is kept in the display form the board renders: a decimal
//! string, or the [`NOT_AVAILABLE`] sentinel when the feed reported nothing.
//! Arithmetic goes through [`parse_decimal`] and never fails; anything that
//! does not parse is treated as unavailable.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::collections::hash_map;
use std::collections::HashMap;
use std::str::FromStr;

use crate::constants::{DERIVED_DECIMAL_PLACES, NOT_AVAILABLE};

// =============================================================================
// Sentinel helpers
// =============================================================================

/// Returns true if `value` is the "N/A" sentinel.
pub fn is_not_available(value: &str) -> bool {
    value.trim() == NOT_AVAILABLE
}

/// Parses a decimal string as the feed sends it.
///
/// Thousands separators and surrounding whitespace are ignored. Returns `None`
/// for the sentinel, empty strings and anything else that is not a number.
pub fn parse_decimal(value: &str) -> Option<Decimal> {
    let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() || cleaned == NOT_AVAILABLE {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

fn round_derived(value: Decimal) -> Decimal {
    let rounded =
        value.round_dp_with_strategy(DERIVED_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        // avoid rendering "-0.00"
        Decimal::ZERO
    } else {
        rounded
    }
}

/// Derived change figures for a pair of prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedChange {
    /// Both prices are numeric and the reference close is non-zero.
    Computed {
        price_change: String,
        change_percentage: String,
    },
    /// The reference close is zero or not numeric, or the result does not fit
    /// in a `Decimal`; both figures are "N/A".
    Unavailable,
    /// The instant price is not numeric; the figures cannot be computed.
    MissingPrice,
}

/// Computes `price_change` and `change_percentage` from an instant price and
/// the previous session's close.
///
/// ```
/// use tickerboard_core::quotes::{derive_change, DerivedChange};
///
/// let derived = derive_change("600", "590");
/// assert_eq!(
///     derived,
///     DerivedChange::Computed {
///         price_change: "10.00".to_string(),
///         change_percentage: "1.69%".to_string(),
///     }
/// );
/// assert_eq!(derive_change("600", "0"), DerivedChange::Unavailable);
/// ```
pub fn derive_change(instant_price: &str, yesterday_close: &str) -> DerivedChange {
    let reference = match parse_decimal(yesterday_close) {
        Some(value) if !value.is_zero() => value,
        _ => return DerivedChange::Unavailable,
    };
    let Some(price) = parse_decimal(instant_price) else {
        return DerivedChange::MissingPrice;
    };

    // Extreme magnitudes overflow the 96-bit mantissa.
    let Some((change, percentage)) = price.checked_sub(reference).and_then(|change| {
        change
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|scaled| scaled.checked_div(reference))
            .map(|percentage| (change, percentage))
    }) else {
        return DerivedChange::Unavailable;
    };

    DerivedChange::Computed {
        price_change: format!("{:.2}", round_derived(change)),
        change_percentage: format!("{:.2}%", round_derived(percentage)),
    }
}

// =============================================================================
// Raw Quote
// =============================================================================

/// A single reading as returned by the quote feed, before reconciliation.
///
/// Fields the feed left out hold the "N/A" sentinel (or `None` for the
/// optional trade time and volume).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuote {
    pub code: String,
    pub name: String,
    pub instant_price: String,
    pub price_change: String,
    pub change_percentage: String,
    pub yesterday_close: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_volume: Option<String>,
}

impl RawQuote {
    /// Creates a reading with every price field set to "N/A".
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            instant_price: NOT_AVAILABLE.to_string(),
            price_change: NOT_AVAILABLE.to_string(),
            change_percentage: NOT_AVAILABLE.to_string(),
            yesterday_close: NOT_AVAILABLE.to_string(),
            trade_time: None,
            trade_volume: None,
        }
    }

    /// Sets the instant price and yesterday's close, deriving the change
    /// figures the same way the reconciler does.
    pub fn with_prices(mut self, instant_price: &str, yesterday_close: &str) -> Self {
        self.instant_price = instant_price.to_string();
        self.yesterday_close = yesterday_close.to_string();
        match derive_change(instant_price, yesterday_close) {
            DerivedChange::Computed {
                price_change,
                change_percentage,
            } => {
                self.price_change = price_change;
                self.change_percentage = change_percentage;
            }
            DerivedChange::Unavailable | DerivedChange::MissingPrice => {
                self.price_change = NOT_AVAILABLE.to_string();
                self.change_percentage = NOT_AVAILABLE.to_string();
            }
        }
        self
    }

    /// Sets the last trade time and accumulated volume.
    pub fn with_trade(mut self, time: Option<String>, volume: Option<String>) -> Self {
        self.trade_time = time;
        self.trade_volume = volume;
        self
    }

    /// Returns true if none of the price fields hold the sentinel.
    pub fn is_complete(&self) -> bool {
        !is_not_available(&self.instant_price)
            && !is_not_available(&self.price_change)
            && !is_not_available(&self.change_percentage)
            && !is_not_available(&self.yesterday_close)
    }
}

// =============================================================================
// Quote Record
// =============================================================================

/// One row of the quote board as displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRecord {
    pub code: String,
    pub name: String,
    pub instant_price: String,
    pub price_change: String,
    pub change_percentage: String,
    pub yesterday_close: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_volume: Option<String>,
}

impl QuoteRecord {
    /// Returns true if the change figures point downwards.
    pub fn is_down(&self) -> bool {
        parse_decimal(&self.price_change).is_some_and(|change| change.is_sign_negative())
    }
}

impl From<RawQuote> for QuoteRecord {
    fn from(raw: RawQuote) -> Self {
        Self {
            code: raw.code,
            name: raw.name,
            instant_price: raw.instant_price,
            price_change: raw.price_change,
            change_percentage: raw.change_percentage,
            yesterday_close: raw.yesterday_close,
            trade_time: raw.trade_time,
            trade_volume: raw.trade_volume,
        }
    }
}

// =============================================================================
// Quote Snapshot
// =============================================================================

/// The board's last displayed values, keyed by stock code.
///
/// The snapshot is owned by the caller and threaded through every
/// reconciliation; the core keeps no state of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteSnapshot {
    records: HashMap<String, QuoteRecord>,
}

impl QuoteSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, code: &str) -> Option<&QuoteRecord> {
        self.records.get(code)
    }

    /// Inserts a record under `code`, returning the one it replaced.
    pub fn insert(&mut self, code: impl Into<String>, record: QuoteRecord) -> Option<QuoteRecord> {
        self.records.insert(code.into(), record)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.records.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, QuoteRecord> {
        self.records.iter()
    }

    /// Codes held by the snapshot, sorted for stable display.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.records.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}

impl FromIterator<(String, QuoteRecord)> for QuoteSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, QuoteRecord)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a QuoteSnapshot {
    type Item = (&'a String, &'a QuoteRecord);
    type IntoIter = hash_map::Iter<'a, String, QuoteRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal_handles_separators_and_sentinel() {
        assert_eq!(parse_decimal("1,234.50"), Some(dec!(1234.50)));
        assert_eq!(parse_decimal(" 600 "), Some(dec!(600)));
        assert_eq!(parse_decimal("N/A"), None);
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("-"), None);
    }

    #[test]
    fn test_derive_change_rounds_to_two_places() {
        assert_eq!(
            derive_change("600", "590"),
            DerivedChange::Computed {
                price_change: "10.00".to_string(),
                change_percentage: "1.69%".to_string(),
            }
        );
    }

    #[test]
    fn test_derive_change_keeps_negative_sign() {
        assert_eq!(
            derive_change("95.5", "100"),
            DerivedChange::Computed {
                price_change: "-4.50".to_string(),
                change_percentage: "-4.50%".to_string(),
            }
        );
    }

    #[test]
    fn test_derive_change_unchanged_price_is_zero() {
        assert_eq!(
            derive_change("100.00", "100.00"),
            DerivedChange::Computed {
                price_change: "0.00".to_string(),
                change_percentage: "0.00%".to_string(),
            }
        );
    }

    #[test]
    fn test_derive_change_zero_or_missing_reference() {
        assert_eq!(derive_change("600", "0"), DerivedChange::Unavailable);
        assert_eq!(derive_change("600", "0.00"), DerivedChange::Unavailable);
        assert_eq!(derive_change("600", "N/A"), DerivedChange::Unavailable);
        assert_eq!(derive_change("N/A", "N/A"), DerivedChange::Unavailable);
        assert_eq!(derive_change("N/A", "590"), DerivedChange::MissingPrice);
    }

    #[test]
    fn test_derive_change_overflow_is_unavailable() {
        // percentage division overflows
        assert_eq!(
            derive_change("600", "0.0000000000000000000000000001"),
            DerivedChange::Unavailable
        );
        // subtraction overflows
        assert_eq!(
            derive_change(
                "79228162514264337593543950335",
                "-79228162514264337593543950335"
            ),
            DerivedChange::Unavailable
        );
        // scaling the change by 100 overflows
        assert_eq!(
            derive_change("79228162514264337593543950335", "1"),
            DerivedChange::Unavailable
        );
    }

    #[test]
    fn test_raw_quote_with_prices() {
        let raw = RawQuote::new("2330", "TSMC").with_prices("600", "590");
        assert_eq!(raw.price_change, "10.00");
        assert_eq!(raw.change_percentage, "1.69%");
        assert!(raw.is_complete());

        let raw = RawQuote::new("2330", "TSMC").with_prices("N/A", "590");
        assert_eq!(raw.price_change, "N/A");
        assert!(!raw.is_complete());
    }

    #[test]
    fn test_quote_record_is_down() {
        let record = QuoteRecord::from(RawQuote::new("2317", "Hon Hai").with_prices("99", "100"));
        assert!(record.is_down());

        let record = QuoteRecord::from(RawQuote::new("2317", "Hon Hai"));
        assert!(!record.is_down());
    }

    #[test]
    fn test_snapshot_serializes_as_plain_map() {
        let mut snapshot = QuoteSnapshot::new();
        snapshot.insert(
            "2330",
            QuoteRecord::from(RawQuote::new("2330", "TSMC").with_prices("600", "590")),
        );

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["2330"]["instantPrice"], "600");
        assert_eq!(json["2330"]["changePercentage"], "1.69%");

        let back: QuoteSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_snapshot_codes_sorted() {
        let snapshot: QuoteSnapshot = ["2454", "2330", "t00"]
            .into_iter()
            .map(|code| (code.to_string(), QuoteRecord::from(RawQuote::new(code, ""))))
            .collect();
        assert_eq!(snapshot.codes(), vec!["2330", "2454", "t00"]);
    }
}
