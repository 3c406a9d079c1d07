//! Daily history normalization for the chart view.
//!
//! - [`era_date`] - ROC era / Western date conversion
//! - [`model`] - Day records, chart points and granularity
//! - [`series`] - Sorting, percentage derivation and monthly/yearly series

pub mod era_date;
pub mod model;
pub mod series;

pub use era_date::{normalize_date, to_naive_date, to_western_year};
pub use model::{ChartSeries, DayRecord, Granularity, NormalizedSeries, SeriesPoint};
pub use series::{
    build_chart, build_monthly, build_yearly, days_in_month, derive_percentage,
    is_monthly_incomplete, parse_closing_price, parse_price_change, sort_ascending,
};
