//! Quote feed trait definitions.
//!
//! This module defines the [`QuoteFeed`] trait the poller and the chart
//! command depend on, so tests can substitute a scripted feed.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Datelike, Months, NaiveDate};
use futures::future::join_all;
use tickerboard_core::history::DayRecord;
use tickerboard_core::quotes::RawQuote;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::QuoteTarget;

/// Number of monthly reports that make up a yearly series.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Source of real-time quotes and daily history.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use tickerboard_market_data::provider::QuoteFeed;
///
/// struct Scripted(HashMap<String, RawQuote>);
///
/// #[async_trait]
/// impl QuoteFeed for Scripted {
///     async fn fetch_quotes(&self, _: &[QuoteTarget]) -> Result<HashMap<String, RawQuote>, MarketDataError> {
///         Ok(self.0.clone())
///     }
///
///     async fn fetch_month(&self, _: &str, _: NaiveDate) -> Result<Vec<DayRecord>, MarketDataError> {
///         Ok(vec![])
///     }
/// }
/// ```
#[async_trait]
pub trait QuoteFeed: Send + Sync {
    /// Fetches the latest reading for each target, keyed by code.
    ///
    /// Codes the exchange does not return are absent from the map.
    async fn fetch_quotes(
        &self,
        targets: &[QuoteTarget],
    ) -> Result<HashMap<String, RawQuote>, MarketDataError>;

    /// Fetches the daily rows of the month containing `month`.
    ///
    /// A month without data yields an empty batch.
    async fn fetch_month(
        &self,
        code: &str,
        month: NaiveDate,
    ) -> Result<Vec<DayRecord>, MarketDataError>;

    /// Fetches the twelve months ending with the month of `as_of`.
    ///
    /// Months are requested concurrently. A failed month is logged and
    /// skipped; the rows of every successful month are returned in
    /// request order.
    async fn fetch_year(&self, code: &str, as_of: NaiveDate) -> Vec<DayRecord> {
        let months = trailing_months(as_of, MONTHS_PER_YEAR);
        let results = join_all(months.iter().map(|month| self.fetch_month(code, *month))).await;

        let mut rows = Vec::new();
        for (month, result) in months.iter().zip(results) {
            match result {
                Ok(batch) => {
                    debug!("Fetched {} rows for {} {}", batch.len(), code, month.format("%Y-%m"));
                    rows.extend(batch);
                }
                Err(e) => {
                    warn!("Skipping {} {}: {}", code, month.format("%Y-%m"), e);
                }
            }
        }
        rows
    }
}

/// First days of the `count` months ending with the month of `as_of`,
/// oldest first.
pub fn trailing_months(as_of: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let Some(first) = as_of.with_day(1) else {
        return Vec::new();
    };

    (0..count)
        .rev()
        .filter_map(|back| first.checked_sub_months(Months::new(back)))
        .collect()
}
