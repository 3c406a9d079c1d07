use std::time::Duration;

use tickerboard_core::quotes::trading_window::{DEFAULT_CLOSE, DEFAULT_OPEN};
use tickerboard_core::quotes::TradingWindow;
use tickerboard_market_data::QuoteTarget;
use tracing::warn;

const DEFAULT_WATCH_LIST: &str = "2330,2317,2454,t00";
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_TIMEZONE: &str = "Asia/Taipei";

pub struct Config {
    pub watch_list: Vec<QuoteTarget>,
    pub poll_interval: Duration,
    pub trading_window: TradingWindow,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unparsable values fall back
    /// to their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let watch_list = parse_watch_list(
            &lookup("TB_WATCH_LIST").unwrap_or_else(|| DEFAULT_WATCH_LIST.to_string()),
        );

        let poll_secs = parse_or_default(&lookup, "TB_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS);
        let poll_secs = if poll_secs == 0 {
            warn!("TB_POLL_INTERVAL_SECS must be positive, using {}", DEFAULT_POLL_INTERVAL_SECS);
            DEFAULT_POLL_INTERVAL_SECS
        } else {
            poll_secs
        };

        let timeout_ms = parse_or_default(&lookup, "TB_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS);

        let open = lookup("TB_MARKET_OPEN").unwrap_or_else(|| DEFAULT_OPEN.into());
        let close = lookup("TB_MARKET_CLOSE").unwrap_or_else(|| DEFAULT_CLOSE.into());
        let timezone = lookup("TB_MARKET_TZ").unwrap_or_else(|| DEFAULT_TIMEZONE.into());
        let trading_window = match TradingWindow::parse(&open, &close, &timezone) {
            Ok(window) => window,
            Err(e) => {
                warn!("Invalid trading window ({}), using 09:00-13:30 Asia/Taipei", e);
                TradingWindow::default()
            }
        };

        Self {
            watch_list,
            poll_interval: Duration::from_secs(poll_secs),
            trading_window,
            request_timeout: Duration::from_millis(timeout_ms),
        }
    }
}

fn parse_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> u64 {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid {}={:?}, using {}", key, raw, default);
            default
        }),
    }
}

/// Parses a comma-separated watch-list, dropping duplicates and invalid
/// entries while keeping the given order.
pub fn parse_watch_list(raw: &str) -> Vec<QuoteTarget> {
    let mut targets: Vec<QuoteTarget> = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        match entry.parse::<QuoteTarget>() {
            Ok(target) if !targets.iter().any(|t| t.code == target.code) => targets.push(target),
            Ok(_) => {}
            Err(e) => warn!("Ignoring watch-list entry: {}", e),
        }
    }
    targets
}
