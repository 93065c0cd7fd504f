//! Derived-rate computation.

use rust_decimal::{Decimal, RoundingStrategy};

use super::table::RateTable;

/// State of the draft's rate field.
///
/// `Empty -> Computing` once both date and currency are set (a fetch or a
/// resolution is outstanding), `Computing -> Resolved` once a value lands in
/// the draft. Any change to date or currency returns to `Empty`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RatePhase {
    /// No rate; date or currency still missing.
    #[default]
    Empty,
    /// Date and currency set, waiting for a usable rate table.
    Computing,
    /// A rate is present in the draft.
    Resolved,
}

/// Derives the display rate for `currency` from a rate table anchored to
/// `reference`: `table[reference] / table[currency]`, rounded half away from
/// zero to 2 decimal places and formatted with exactly two decimals.
///
/// Returns `None` (the "not available" sentinel) when either currency is
/// missing from the table, the divisor is zero, or the ratio does not fit a
/// `Decimal`. Rate tables come from an external service, so no table may
/// panic here.
#[must_use]
pub fn derive_rate(table: &RateTable, currency: &str, reference: &str) -> Option<String> {
    let base = *table.get(reference)?;
    let quote = *table.get(currency)?;

    let ratio = base
        .checked_div(quote)?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    Some(format!("{ratio:.2}"))
}
