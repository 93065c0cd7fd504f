//! Historical rate table.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

/// Currency code to rate relative to the reference currency, for one date.
///
/// Populated externally per selected date; cleared when the date is cleared.
pub type RateTable = BTreeMap<String, Decimal>;
