//! Shared constants.

/// Sentinel shown for any quote field the feed did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// Offset between the ROC era calendar and the Western calendar.
///
/// A raw year below this value is an era year (`western = era + 1911`);
/// anything at or above it is already Western.
pub const ERA_YEAR_OFFSET: i32 = 1911;

/// Decimal places used for derived price changes and percentages.
pub const DERIVED_DECIMAL_PLACES: u32 = 2;

/// Exchange code of the TAIEX weighted index on the real-time feed.
pub const TAIEX_INDEX_CODE: &str = "t00";
