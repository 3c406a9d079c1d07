//! Real-time quote models for the TWSE MIS `getStockInfo` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tickerboard_core::constants::{NOT_AVAILABLE, TAIEX_INDEX_CODE};
use tickerboard_core::quotes::{parse_decimal, RawQuote};

use crate::errors::MarketDataError;

/// Marker the feed uses when there has been no trade since the last print.
const NO_TRADE: &str = "-";

/// Listing market of a security.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Market {
    /// Main board (TWSE).
    Tse,
    /// Over-the-counter (TPEx).
    Otc,
}

impl Market {
    pub fn as_str(&self) -> &'static str {
        match self {
            Market::Tse => "tse",
            Market::Otc => "otc",
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A watch-list entry as the feed addresses it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuoteTarget {
    pub code: String,
    pub market: Market,
}

impl QuoteTarget {
    pub fn new(code: impl Into<String>, market: Market) -> Self {
        Self {
            code: code.into(),
            market,
        }
    }

    /// The TAIEX weighted index.
    pub fn taiex() -> Self {
        Self::new(TAIEX_INDEX_CODE, Market::Tse)
    }

    /// Channel identifier used in the `ex_ch` query parameter.
    pub fn channel(&self) -> String {
        format!("{}_{}.tw", self.market, self.code)
    }

    pub fn is_index(&self) -> bool {
        self.code == TAIEX_INDEX_CODE
    }
}

impl FromStr for QuoteTarget {
    type Err = MarketDataError;

    /// Parses `"2330"`, `"tse:2330"` or `"otc:6488"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (market, code) = match s.split_once(':') {
            Some((market, code)) => {
                let market = match market.trim().to_lowercase().as_str() {
                    "tse" => Market::Tse,
                    "otc" => Market::Otc,
                    _ => return Err(MarketDataError::InvalidSymbol(s.to_string())),
                };
                (market, code.trim())
            }
            None => (Market::Tse, s),
        };

        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(MarketDataError::InvalidSymbol(s.to_string()));
        }
        Ok(Self::new(code, market))
    }
}

/// Envelope returned by `getStockInfo.jsp`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MisResponse {
    #[serde(default)]
    pub msg_array: Vec<MisQuote>,
    #[serde(default)]
    pub rtcode: Option<String>,
    #[serde(default)]
    pub rtmessage: Option<String>,
}

impl MisResponse {
    /// `"0000"` means success; a missing code is treated the same way.
    pub fn is_ok(&self) -> bool {
        self.rtcode.as_deref().is_none_or(|code| code == "0000")
    }
}

/// One security in a `getStockInfo.jsp` response.
///
/// Field names follow the feed's single-letter keys.
#[derive(Debug, Clone, Deserialize)]
pub struct MisQuote {
    /// Security code
    pub c: String,
    /// Short name
    #[serde(default)]
    pub n: Option<String>,
    /// Latest trade price, `"-"` when there has been no trade
    #[serde(default)]
    pub z: Option<String>,
    /// Previous session's close
    #[serde(default)]
    pub y: Option<String>,
    /// Time of the latest trade
    #[serde(default)]
    pub t: Option<String>,
    /// Accumulated volume (lots)
    #[serde(default)]
    pub v: Option<String>,
}

/// Normalizes a feed price: strips trailing zeros and maps gaps to "N/A".
fn normalize_price(value: Option<&str>) -> String {
    match value.map(str::trim) {
        None | Some("") | Some(NO_TRADE) => NOT_AVAILABLE.to_string(),
        Some(raw) => parse_decimal(raw)
            .map(|price: Decimal| price.normalize().to_string())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && *s != NO_TRADE)
        .map(str::to_string)
}

impl From<&MisQuote> for RawQuote {
    fn from(quote: &MisQuote) -> Self {
        let instant_price = normalize_price(quote.z.as_deref());
        let yesterday_close = normalize_price(quote.y.as_deref());

        RawQuote::new(quote.c.trim(), quote.n.as_deref().unwrap_or_default().trim())
            .with_prices(&instant_price, &yesterday_close)
            .with_trade(non_empty(quote.t.as_ref()), non_empty(quote.v.as_ref()))
    }
}
