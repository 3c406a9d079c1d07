//! Foreground quote poller for the `watch` command.
//!
//! Every tick fetches the watch-list, reconciles the readings against the
//! cached snapshot and redraws the board.

use chrono::{DateTime, Utc};
use tickerboard_core::quotes::{reconcile, QuoteSnapshot, TradingWindow};
use tickerboard_market_data::{MarketDataError, QuoteFeed, QuoteTarget};
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::main_lib::SnapshotCache;
use crate::render::render_board;

/// A transient failure is retried after this fraction of the poll interval,
/// so the retry lands before the next tick.
const RETRY_DELAY_DIVISOR: u32 = 2;

/// Runs one fetch-and-reconcile cycle and stores the result in `cache`.
///
/// On a fetch failure the cache is left untouched so the board keeps its
/// last known values.
pub async fn run_poll_cycle<F>(
    feed: &F,
    cache: &SnapshotCache,
    targets: &[QuoteTarget],
    window: &TradingWindow,
    now: DateTime<Utc>,
) -> Result<QuoteSnapshot, MarketDataError>
where
    F: QuoteFeed + ?Sized,
{
    let fetched = feed.fetch_quotes(targets).await?;

    let active_codes: Vec<String> = targets.iter().map(|t| t.code.clone()).collect();
    let in_window = window.contains(now);

    // Single writer: holding the lock across reconcile keeps cycles ordered.
    let mut snapshot = cache.write().await;
    let next = reconcile(&snapshot, &fetched, &active_codes, in_window);
    debug!(
        "Reconciled {} of {} codes (in window: {})",
        next.len(),
        active_codes.len(),
        in_window
    );
    *snapshot = next.clone();
    Ok(next)
}

/// Runs a poll cycle, retrying once after `retry_delay` when the failure is
/// transient (network, throttling, 5xx).
///
/// Permanent failures are returned immediately; either way the cache still
/// holds the last good snapshot.
pub async fn run_poll_cycle_with_retry<F>(
    feed: &F,
    cache: &SnapshotCache,
    targets: &[QuoteTarget],
    window: &TradingWindow,
    retry_delay: Duration,
) -> Result<QuoteSnapshot, MarketDataError>
where
    F: QuoteFeed + ?Sized,
{
    match run_poll_cycle(feed, cache, targets, window, Utc::now()).await {
        Err(e) if e.is_transient() => {
            warn!("Transient quote fetch failure, retrying in {:?}: {}", retry_delay, e);
            tokio::time::sleep(retry_delay).await;
            run_poll_cycle(feed, cache, targets, window, Utc::now()).await
        }
        result => result,
    }
}

/// Polls until Ctrl-C, redrawing the board after every tick.
pub async fn run_quote_poller<F>(
    feed: &F,
    cache: SnapshotCache,
    targets: Vec<QuoteTarget>,
    window: TradingWindow,
    poll_interval: Duration,
) where
    F: QuoteFeed + ?Sized,
{
    info!(
        "Quote poller started ({} codes, every {:?})",
        targets.len(),
        poll_interval
    );

    let retry_delay = poll_interval / RETRY_DELAY_DIVISOR;
    let mut ticker = interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let result =
                    run_poll_cycle_with_retry(feed, &cache, &targets, &window, retry_delay).await;
                let snapshot = match result {
                    Ok(snapshot) => snapshot,
                    Err(e) if e.is_transient() => {
                        warn!("Quote fetch failed, keeping previous board: {}", e);
                        cache.read().await.clone()
                    }
                    Err(e) => {
                        error!("Quote fetch rejected, keeping previous board: {}", e);
                        cache.read().await.clone()
                    }
                };
                print!("\x1B[2J\x1B[H{}", render_board(&snapshot, &targets));
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Quote poller stopped");
                break;
            }
        }
    }
}
