//! Purchase draft and finalized purchase types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use grosz_shared::types::PurchaseId;

/// Field name of the date input.
pub const FIELD_DATE: &str = "date";
/// Field name of the currency selector.
pub const FIELD_SELECT: &str = "select";
/// Field name of the amount input.
pub const FIELD_AMOUNT: &str = "amount";
/// Field name of the exchange-rate input.
pub const FIELD_RATE: &str = "rate";

/// The in-progress, not-yet-submitted purchase record.
///
/// Fields hold raw user input; parsing into typed values happens during
/// validation and finalization. The initial state is all-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseDraft {
    /// ISO calendar date (`YYYY-MM-DD`), must not exceed the current date.
    pub date: String,
    /// Selected currency code.
    pub select: String,
    /// Purchased amount, a positive number.
    pub amount: String,
    /// Exchange rate, auto-derived or manually overridden.
    pub rate: String,
}

impl PurchaseDraft {
    /// Returns the raw value of a field by name, `None` for unknown names.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            FIELD_DATE => Some(&self.date),
            FIELD_SELECT => Some(&self.select),
            FIELD_AMOUNT => Some(&self.amount),
            FIELD_RATE => Some(&self.rate),
            _ => None,
        }
    }

    /// Sets a field by name. Returns `false` for unknown names.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        let slot = match name {
            FIELD_DATE => &mut self.date,
            FIELD_SELECT => &mut self.select,
            FIELD_AMOUNT => &mut self.amount,
            FIELD_RATE => &mut self.rate,
            _ => return false,
        };
        value.clone_into(slot);
        true
    }
}

/// A validated purchase with a generated unique identifier, as handed to
/// the persisted purchase store. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizedPurchase {
    /// Unique identifier, generated at submission.
    pub id: PurchaseId,
    /// Purchase date.
    pub date: NaiveDate,
    /// Purchased currency code.
    pub currency: String,
    /// Purchased amount.
    pub amount: Decimal,
    /// Exchange rate relative to the reference currency.
    pub rate: Decimal,
}

impl FinalizedPurchase {
    /// Builds a finalized purchase from a draft, attaching a fresh id.
    ///
    /// Returns `None` when any field fails to parse; a draft that passed
    /// `validate_form` always finalizes.
    #[must_use]
    pub fn from_draft(draft: &PurchaseDraft) -> Option<Self> {
        let date = NaiveDate::parse_from_str(&draft.date, "%Y-%m-%d").ok()?;
        let amount = draft.amount.parse::<Decimal>().ok()?;
        let rate = draft.rate.parse::<Decimal>().ok()?;

        Some(Self {
            id: PurchaseId::new(),
            date,
            currency: draft.select.clone(),
            amount,
            rate,
        })
    }
}
