//! Tickerboard Core - quote reconciliation and history normalization.
//!
//! This crate holds the pure logic behind the quote board. It performs no I/O:
//! fetching lives in `tickerboard-market-data` and the previous snapshot is
//! owned by the caller.

pub mod constants;
pub mod errors;
pub mod history;
pub mod quotes;

// Re-export the types most callers need
pub use history::{ChartSeries, DayRecord, Granularity, NormalizedSeries, SeriesPoint};
pub use quotes::{QuoteRecord, QuoteSnapshot, RawQuote, TradingWindow};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
