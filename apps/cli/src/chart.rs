//! History fetch for the `chart` command.

use chrono::NaiveDate;
use tickerboard_core::history::{build_chart, ChartSeries, Granularity};
use tickerboard_market_data::{MarketDataError, QuoteFeed};
use tracing::info;

/// Fetches the rows for `granularity` and normalizes them.
///
/// Monthly charts cover the month of `as_of`; yearly charts the twelve
/// months ending there, with failed months skipped.
pub async fn load_chart<F>(
    feed: &F,
    code: &str,
    granularity: Granularity,
    as_of: NaiveDate,
) -> Result<ChartSeries, MarketDataError>
where
    F: QuoteFeed + ?Sized,
{
    let rows = match granularity {
        Granularity::Monthly => feed.fetch_month(code, as_of).await?,
        Granularity::Yearly => feed.fetch_year(code, as_of).await,
    };

    info!("Loaded {} {} rows for {}", rows.len(), granularity, code);
    Ok(build_chart(rows, granularity, as_of))
}
