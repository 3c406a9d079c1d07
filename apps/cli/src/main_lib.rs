use std::sync::Arc;

use tickerboard_core::quotes::QuoteSnapshot;
use tickerboard_market_data::TwseClient;
use tokio::sync::RwLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// The board's last displayed values, shared between the poller and readers.
pub type SnapshotCache = Arc<RwLock<QuoteSnapshot>>;

pub fn new_snapshot_cache() -> SnapshotCache {
    Arc::new(RwLock::new(QuoteSnapshot::new()))
}

pub fn init_tracing() {
    let log_format = std::env::var("TB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries the board; logs go to stderr.
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_feed(config: &Config) -> anyhow::Result<TwseClient> {
    let client = TwseClient::with_timeout(config.request_timeout)?;
    tracing::debug!("TWSE client ready (timeout {:?})", config.request_timeout);
    Ok(client)
}
