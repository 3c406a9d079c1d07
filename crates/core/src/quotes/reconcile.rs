//! Quote refresh reconciliation.
//!
//! The real-time feed intermittently reports "N/A" for a few seconds around
//! gaps in the order book. While the market is open those transient gaps are
//! smoothed by keeping the previously displayed value; outside the trading
//! window the sentinel is shown as-is so a closed market stays visible.

use log::debug;
use std::collections::HashMap;

use super::model::{derive_change, is_not_available, DerivedChange, QuoteRecord, QuoteSnapshot, RawQuote};
use crate::constants::NOT_AVAILABLE;

/// Fields eligible for carry-forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CarryField {
    InstantPrice,
    PriceChange,
    ChangePercentage,
}

impl CarryField {
    fn read(self, record: &QuoteRecord) -> &str {
        match self {
            CarryField::InstantPrice => &record.instant_price,
            CarryField::PriceChange => &record.price_change,
            CarryField::ChangePercentage => &record.change_percentage,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            CarryField::InstantPrice => "instant_price",
            CarryField::PriceChange => "price_change",
            CarryField::ChangePercentage => "change_percentage",
        }
    }
}

/// Picks the value to display for one carry-eligible field.
fn resolve_field(
    code: &str,
    field: CarryField,
    fresh: &str,
    previous: Option<&QuoteRecord>,
    in_trading_window: bool,
) -> String {
    if in_trading_window && is_not_available(fresh) {
        if let Some(prior) = previous.map(|record| field.read(record)) {
            if !is_not_available(prior) {
                debug!("{}: carrying {} forward ({})", code, field.as_str(), prior);
                return prior.to_string();
            }
        }
    }
    fresh.to_string()
}

/// Builds the record for a single code from its fresh reading and the
/// previously displayed record.
fn reconcile_one(
    code: &str,
    raw: &RawQuote,
    previous: Option<&QuoteRecord>,
    in_trading_window: bool,
) -> QuoteRecord {
    let instant_price = resolve_field(
        code,
        CarryField::InstantPrice,
        &raw.instant_price,
        previous,
        in_trading_window,
    );
    let mut price_change = resolve_field(
        code,
        CarryField::PriceChange,
        &raw.price_change,
        previous,
        in_trading_window,
    );
    let mut change_percentage = resolve_field(
        code,
        CarryField::ChangePercentage,
        &raw.change_percentage,
        previous,
        in_trading_window,
    );

    match derive_change(&instant_price, &raw.yesterday_close) {
        DerivedChange::Computed {
            price_change: change,
            change_percentage: percentage,
        } => {
            price_change = change;
            change_percentage = percentage;
        }
        // No numeric pair to derive from.
        DerivedChange::Unavailable | DerivedChange::MissingPrice => {
            price_change = NOT_AVAILABLE.to_string();
            change_percentage = NOT_AVAILABLE.to_string();
        }
    }

    QuoteRecord {
        code: raw.code.clone(),
        name: raw.name.clone(),
        instant_price,
        price_change,
        change_percentage,
        yesterday_close: raw.yesterday_close.clone(),
        trade_time: raw.trade_time.clone(),
        trade_volume: raw.trade_volume.clone(),
    }
}

/// Merges a freshly fetched batch into the previously displayed snapshot.
///
/// Only codes in `active_codes` are considered, and a code missing from
/// `fetched` is dropped from the result. For each remaining code:
///
/// - `instant_price`, `price_change` and `change_percentage` keep their
///   previous value when `in_trading_window` is set, the fresh value is "N/A"
///   and the previous value is not.
/// - `yesterday_close`, `name`, `code`, trade time and volume always come
///   from the fresh reading.
/// - When the resolved instant price and yesterday's close are both numeric
///   the change figures are recomputed from them; otherwise (including a zero
///   close or a result too large for a `Decimal`) both are "N/A".
///
/// The function is total: malformed numbers degrade to "N/A" and empty inputs
/// produce an empty snapshot.
pub fn reconcile(
    previous: &QuoteSnapshot,
    fetched: &HashMap<String, RawQuote>,
    active_codes: &[String],
    in_trading_window: bool,
) -> QuoteSnapshot {
    let mut next = QuoteSnapshot::with_capacity(active_codes.len());

    for code in active_codes {
        let Some(raw) = fetched.get(code) else {
            debug!("{}: not in fetched batch, dropping", code);
            continue;
        };
        let record = reconcile_one(code, raw, previous.get(code), in_trading_window);
        next.insert(code.clone(), record);
    }

    next
}
