//! Wire models for the exchange endpoints.
//!
//! - [`MisResponse`] / [`MisQuote`]: real-time quotes
//! - [`StockDayResponse`]: one month of daily history
//! - [`QuoteTarget`]: a code plus its listing market

mod history;
mod quote;

pub use history::StockDayResponse;
pub use quote::{Market, MisQuote, MisResponse, QuoteTarget};
