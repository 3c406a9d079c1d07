//! Daily history models for the TWSE `STOCK_DAY` report.

use serde::Deserialize;
use serde_json::Value;
use tickerboard_core::history::DayRecord;

/// Status value of a populated report.
const STAT_OK: &str = "OK";

const DATE_FIELD: &str = "日期";
const CLOSE_FIELD: &str = "收盤價";
const CHANGE_FIELD: &str = "漲跌價差";

/// Column positions used when `fields` is missing or renamed.
const DEFAULT_DATE_COLUMN: usize = 0;
const DEFAULT_CLOSE_COLUMN: usize = 6;
const DEFAULT_CHANGE_COLUMN: usize = 7;

/// Envelope returned by `exchangeReport/STOCK_DAY`.
///
/// When the month has no data the exchange answers with a human readable
/// `stat` and no `data`; that is not an error.
#[derive(Debug, Clone, Deserialize)]
pub struct StockDayResponse {
    pub stat: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub fields: Vec<String>,
    #[serde(default)]
    pub data: Vec<Vec<Value>>,
}

impl StockDayResponse {
    pub fn is_ok(&self) -> bool {
        self.stat == STAT_OK
    }

    fn column(&self, name: &str, fallback: usize) -> usize {
        self.fields
            .iter()
            .position(|field| field.trim() == name)
            .unwrap_or(fallback)
    }

    /// Converts the table into day records, skipping malformed rows.
    pub fn into_day_records(self) -> Vec<DayRecord> {
        if !self.is_ok() {
            return Vec::new();
        }

        let date_col = self.column(DATE_FIELD, DEFAULT_DATE_COLUMN);
        let close_col = self.column(CLOSE_FIELD, DEFAULT_CLOSE_COLUMN);
        let change_col = self.column(CHANGE_FIELD, DEFAULT_CHANGE_COLUMN);

        self.data
            .iter()
            .filter_map(|row| {
                let date = cell(row, date_col)?;
                let close = cell(row, close_col)?;
                let change = cell(row, change_col)?;
                Some(DayRecord::new(date, close, change))
            })
            .collect()
    }
}

/// Reads a cell as text; numbers are rendered as-is.
fn cell(row: &[Value], index: usize) -> Option<String> {
    match row.get(index)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
