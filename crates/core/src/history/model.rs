//! Daily history models.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::Error;

/// One trading day as reported by the history endpoint.
///
/// Values are kept verbatim: `date` may be an era or Western date,
/// `closing_price` may contain thousands separators and `price_change`
/// carries its sign as a leading token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub date: String,
    pub closing_price: String,
    pub price_change: String,
}

impl DayRecord {
    pub fn new(
        date: impl Into<String>,
        closing_price: impl Into<String>,
        price_change: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            closing_price: closing_price.into(),
            price_change: price_change.into(),
        }
    }
}

/// One chart point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub date_key: String,
    pub closing_price: f64,
    pub percentage_change: f64,
}

/// Chart points in ascending calendar order.
///
/// Entries may hold `NaN` where the source row was malformed; consumers are
/// expected to skip those (see [`NormalizedSeries::price_bounds`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedSeries {
    points: Vec<SeriesPoint>,
}

impl NormalizedSeries {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<SeriesPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SeriesPoint> {
        self.points.iter()
    }

    /// Lowest and highest closing price, ignoring `NaN` entries.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .map(|point| point.closing_price)
            .filter(|price| !price.is_nan())
            .fold(None, |bounds, price| match bounds {
                None => Some((price, price)),
                Some((low, high)) => Some((low.min(price), high.max(price))),
            })
    }
}

impl<'a> IntoIterator for &'a NormalizedSeries {
    type Item = &'a SeriesPoint;
    type IntoIter = std::slice::Iter<'a, SeriesPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// Chart resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One point per trading day of a single month.
    Monthly,
    /// One point per month, taken from the month's last trading day.
    Yearly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Monthly => "monthly",
            Granularity::Yearly => "yearly",
        }
    }
}

impl FromStr for Granularity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" | "m" => Ok(Granularity::Monthly),
            "yearly" | "year" | "y" => Ok(Granularity::Yearly),
            _ => Err(Error::UnknownGranularity(s.to_string())),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized series plus its completeness flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeries {
    pub granularity: Granularity,
    pub series: NormalizedSeries,
    /// Only set for monthly charts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incomplete: Option<bool>,
}
