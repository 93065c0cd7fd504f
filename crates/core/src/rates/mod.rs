//! Historical exchange-rate tables and derived-rate resolution.

pub mod query;
pub mod resolve;
pub mod table;

pub use query::RateQuery;
pub use resolve::{RatePhase, derive_rate};
pub use table::RateTable;
