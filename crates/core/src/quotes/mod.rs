//! Real-time quote board.
//!
//! - [`model`] - Display records, raw readings and the caller-owned snapshot
//! - [`reconcile`] - Merging a fresh batch into the previous snapshot
//! - [`trading_window`] - Deciding whether the market is open
//!
//! ```text
//! poller ──► fetch (market-data) ──► reconcile(previous, fetched, codes, open?)
//!                                          │
//!                                          ▼
//!                                   new QuoteSnapshot ──► caller cache / render
//! ```

pub mod model;
pub mod reconcile;
pub mod trading_window;

pub use model::{
    derive_change, is_not_available, parse_decimal, DerivedChange, QuoteRecord, QuoteSnapshot,
    RawQuote,
};
pub use reconcile::reconcile;
pub use trading_window::TradingWindow;
