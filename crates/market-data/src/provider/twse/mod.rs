//! TWSE API client for real-time quotes and daily history

mod headers;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use tickerboard_core::history::DayRecord;
use tickerboard_core::quotes::RawQuote;
use tracing::{debug, warn};

use crate::errors::MarketDataError;
use crate::models::{MisResponse, QuoteTarget, StockDayResponse};
use crate::provider::QuoteFeed;

pub use headers::twse_headers;

const MIS_BASE_URL: &str = "https://mis.twse.com.tw/stock/api";
const REPORT_BASE_URL: &str = "https://www.twse.com.tw/exchangeReport";
const REQUEST_TIMEOUT_SECS: u64 = 10;

const PROVIDER_NAME: &str = "TWSE";

/// TWSE client for the MIS quote feed and the `STOCK_DAY` report
#[derive(Clone)]
pub struct TwseClient {
    client: Client,
    mis_base_url: String,
    report_base_url: String,
}

impl TwseClient {
    /// Create a new TWSE client with the default timeout
    pub fn new() -> Result<Self, MarketDataError> {
        Self::with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// Create a new TWSE client with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self, MarketDataError> {
        let client = Client::builder()
            .default_headers(twse_headers())
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            mis_base_url: MIS_BASE_URL.to_string(),
            report_base_url: REPORT_BASE_URL.to_string(),
        })
    }

    /// Point the client at other hosts, e.g. a local replay server
    pub fn with_base_urls(
        mut self,
        mis_base_url: impl Into<String>,
        report_base_url: impl Into<String>,
    ) -> Self {
        self.mis_base_url = mis_base_url.into();
        self.report_base_url = report_base_url.into();
        self
    }

    fn quotes_url(&self, targets: &[QuoteTarget]) -> String {
        let channels: Vec<String> = targets.iter().map(QuoteTarget::channel).collect();
        format!(
            "{}/getStockInfo.jsp?ex_ch={}&json=1&delay=0",
            self.mis_base_url,
            channels.join("|")
        )
    }

    fn month_url(&self, code: &str, month: NaiveDate) -> String {
        format!(
            "{}/STOCK_DAY?response=json&date={}&stockNo={}",
            self.report_base_url,
            month.format("%Y%m01"),
            code
        )
    }

    async fn get_text(&self, url: &str, context: &str) -> Result<String, MarketDataError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited(PROVIDER_NAME.to_string()));
        }
        if !status.is_success() {
            return Err(MarketDataError::Api {
                status: status.as_u16(),
                message: context.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Get the latest reading for each target, keyed by code
    pub async fn get_quotes(
        &self,
        targets: &[QuoteTarget],
    ) -> Result<HashMap<String, RawQuote>, MarketDataError> {
        if targets.is_empty() {
            return Ok(HashMap::new());
        }

        let url = self.quotes_url(targets);
        let body = self.get_text(&url, "getStockInfo").await?;
        let quotes = parse_quotes(&body)?;

        debug!("Fetched {} of {} quotes", quotes.len(), targets.len());
        Ok(quotes)
    }

    /// Get the daily rows of the month containing `month`
    pub async fn get_month(
        &self,
        code: &str,
        month: NaiveDate,
    ) -> Result<Vec<DayRecord>, MarketDataError> {
        if code.is_empty() {
            return Err(MarketDataError::InvalidSymbol(code.to_string()));
        }

        let url = self.month_url(code, month);
        let body = self.get_text(&url, &format!("STOCK_DAY {}", code)).await?;
        let response: StockDayResponse = serde_json::from_str(&body)?;

        if !response.is_ok() {
            debug!("No history for {} {}: {}", code, month.format("%Y-%m"), response.stat);
        }
        Ok(response.into_day_records())
    }

    /// Get the twelve months ending with the month of `as_of`
    pub async fn get_year(&self, code: &str, as_of: NaiveDate) -> Vec<DayRecord> {
        self.fetch_year(code, as_of).await
    }
}

/// Decodes a `getStockInfo.jsp` body into readings keyed by code.
pub fn parse_quotes(body: &str) -> Result<HashMap<String, RawQuote>, MarketDataError> {
    let response: MisResponse = serde_json::from_str(body)?;

    if !response.is_ok() {
        warn!(
            "Quote feed returned {}: {}",
            response.rtcode.as_deref().unwrap_or_default(),
            response.rtmessage.as_deref().unwrap_or_default()
        );
        return Err(MarketDataError::Parse(format!(
            "getStockInfo rtcode {}",
            response.rtcode.as_deref().unwrap_or_default()
        )));
    }

    Ok(response
        .msg_array
        .iter()
        .map(RawQuote::from)
        .map(|quote| (quote.code.clone(), quote))
        .collect())
}

#[async_trait]
impl QuoteFeed for TwseClient {
    async fn fetch_quotes(
        &self,
        targets: &[QuoteTarget],
    ) -> Result<HashMap<String, RawQuote>, MarketDataError> {
        self.get_quotes(targets).await
    }

    async fn fetch_month(
        &self,
        code: &str,
        month: NaiveDate,
    ) -> Result<Vec<DayRecord>, MarketDataError> {
        self.get_month(code, month).await
    }
}
