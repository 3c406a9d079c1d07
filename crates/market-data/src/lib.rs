//! Tickerboard market data crate.
//!
//! Fetches real-time quotes and monthly daily-history reports from the
//! Taiwan Stock Exchange and converts them into the core's
//! [`RawQuote`](tickerboard_core::quotes::RawQuote) and
//! [`DayRecord`](tickerboard_core::history::DayRecord) types.
//!
//! # Modules
//!
//! - [`errors`]: Error types and retry classification
//! - [`models`]: Wire models for the exchange endpoints
//! - [`provider`]: The [`QuoteFeed`] trait and [`TwseClient`]

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::{MarketDataError, RetryClass};
pub use models::{Market, QuoteTarget};
pub use provider::{QuoteFeed, TwseClient};
