//! Quote feed abstraction and the TWSE implementation.

mod traits;
pub mod twse;

pub use traits::{trailing_months, QuoteFeed, MONTHS_PER_YEAR};
pub use twse::TwseClient;
