//! Error types and retry classification for the market data crate.
//!
//! - [`MarketDataError`]: The error enum for all fetch operations
//! - [`RetryClass`]: Classification for determining retry behavior

mod retry;

pub use retry::RetryClass;

use thiserror::Error;

/// Errors that can occur while fetching from the exchange.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The code is not something the exchange recognizes.
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// The exchange answered with a non-success HTTP status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Context for the failed request
        message: String,
    },

    /// The exchange is throttling this client.
    #[error("Rate limited by {0}")]
    RateLimited(String),

    /// The response body could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A network error occurred while talking to the exchange.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl MarketDataError {
    /// Returns the retry classification for this error.
    ///
    /// ```
    /// use tickerboard_market_data::errors::{MarketDataError, RetryClass};
    ///
    /// let error = MarketDataError::RateLimited("TWSE".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::WithBackoff);
    ///
    /// let error = MarketDataError::InvalidSymbol("".to_string());
    /// assert_eq!(error.retry_class(), RetryClass::Never);
    /// ```
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Self::InvalidSymbol(_) | Self::Parse(_) => RetryClass::Never,
            Self::RateLimited(_) | Self::Network(_) => RetryClass::WithBackoff,
            Self::Api { status, .. } if *status == 429 || *status >= 500 => {
                RetryClass::WithBackoff
            }
            Self::Api { .. } => RetryClass::Never,
        }
    }

    /// Returns true if retrying later is expected to help.
    pub fn is_transient(&self) -> bool {
        self.retry_class() == RetryClass::WithBackoff
    }
}

impl From<serde_json::Error> for MarketDataError {
    fn from(error: serde_json::Error) -> Self {
        MarketDataError::Parse(error.to_string())
    }
}
