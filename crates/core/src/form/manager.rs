//! Form state manager for the purchase form.
//!
//! Holds the draft, the per-field error map, the cached historical rate
//! table, and the rate-field phase. All reactive behavior of the original
//! form is expressed as explicit methods: callers invoke `update_field` /
//! `apply_rate_table` and the manager performs the dependent recomputation
//! before returning.

use chrono::NaiveDate;

use grosz_shared::types::{FieldDescriptor, FieldKind};

use super::draft::{FIELD_SELECT, FinalizedPurchase, PurchaseDraft};
use super::validate::{ErrorMap, validate_field, validate_form};
use crate::rates::{RatePhase, RateQuery, RateTable, derive_rate};

/// Mediates all field updates on a purchase draft.
#[derive(Debug, Clone)]
pub struct FormManager {
    fields: Vec<FieldDescriptor>,
    reference_currency: String,
    draft: PurchaseDraft,
    errors: ErrorMap,
    rate_table: Option<RateTable>,
    phase: RatePhase,
}

impl FormManager {
    /// Creates a manager over the given field set and reference currency.
    ///
    /// Descriptors must name one of the draft's fields (`date`, `select`,
    /// `amount`, `rate`); any other descriptor would read as permanently
    /// empty and, if required, make the form unsubmittable, so it is
    /// discarded here.
    #[must_use]
    pub fn new(mut fields: Vec<FieldDescriptor>, reference_currency: impl Into<String>) -> Self {
        let draft = PurchaseDraft::default();
        fields.retain(|f| draft.field(&f.name).is_some());
        Self {
            fields,
            reference_currency: reference_currency.into(),
            draft,
            errors: ErrorMap::new(),
            rate_table: None,
            phase: RatePhase::Empty,
        }
    }

    /// Current draft.
    #[must_use]
    pub const fn draft(&self) -> &PurchaseDraft {
        &self.draft
    }

    /// Current per-field error messages.
    #[must_use]
    pub const fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    /// Current rate-field phase.
    #[must_use]
    pub const fn phase(&self) -> RatePhase {
        self.phase
    }

    /// The cached historical rate table, if one has been fetched.
    #[must_use]
    pub const fn rate_table(&self) -> Option<&RateTable> {
        self.rate_table.as_ref()
    }

    /// The fetch the owning controller performs once at construction.
    #[must_use]
    pub fn initial_query(&self) -> RateQuery {
        RateQuery::Latest
    }

    /// Applies a single field update.
    ///
    /// A date change clears the cached rate table and the draft rate and
    /// returns the historical-rates fetch to launch. A currency change
    /// clears the draft rate. Anything else (including a manual rate
    /// override) is stored directly. Unknown field names are ignored.
    pub fn update_field(&mut self, name: &str, value: &str) -> Option<RateQuery> {
        let query = if self.kind_of(name) == Some(FieldKind::Date) {
            self.rate_table = None;
            self.draft.rate.clear();
            self.draft.set_field(name, value);
            (!value.is_empty()).then(|| RateQuery::Historical(value.to_string()))
        } else if name == FIELD_SELECT {
            self.draft.rate.clear();
            self.draft.set_field(name, value);
            None
        } else {
            self.draft.set_field(name, value);
            None
        };

        self.try_resolve();
        query
    }

    /// Installs a fetched rate table and attempts rate resolution.
    ///
    /// Last write wins: no request bookkeeping is kept, so a stale response
    /// arriving after another date change overwrites the table. A table
    /// arriving while the date is empty is dropped.
    pub fn apply_rate_table(&mut self, table: RateTable) {
        if self.draft.date.is_empty() {
            self.rate_table = None;
        } else {
            self.rate_table = Some(table);
        }
        self.try_resolve();
    }

    /// Validates a single field on blur, recording or clearing its message.
    pub fn blur_field(&mut self, name: &str) {
        let Some(descriptor) = self.fields.iter().find(|f| f.name == name) else {
            return;
        };
        match validate_field(descriptor, &self.draft, Self::today()) {
            Some(message) => {
                self.errors.insert(name.to_string(), vec![message]);
            }
            None => {
                self.errors.remove(name);
            }
        }
    }

    /// Validates the whole draft without mutating manager state.
    #[must_use]
    pub fn validate(&self) -> ErrorMap {
        validate_form(&self.fields, &self.draft, Self::today())
    }

    /// Submits the draft.
    ///
    /// On success returns the finalized purchase (with a fresh id) for the
    /// caller to hand to the persisted store, and resets the manager to its
    /// initial state. On failure records and returns the error map; nothing
    /// is persisted and the draft is untouched.
    pub fn submit(&mut self) -> Result<FinalizedPurchase, ErrorMap> {
        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors.clone();
            return Err(errors);
        }

        let Some(purchase) = FinalizedPurchase::from_draft(&self.draft) else {
            // Unreachable for drafts that pass validation; reported as a
            // form-level message rather than a panic.
            let errors: ErrorMap = [(
                "form".to_string(),
                vec!["Purchase could not be finalized".to_string()],
            )]
            .into();
            self.errors = errors.clone();
            return Err(errors);
        };

        self.draft = PurchaseDraft::default();
        self.errors.clear();
        self.rate_table = None;
        self.phase = RatePhase::Empty;
        Ok(purchase)
    }

    fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.fields.iter().find(|f| f.name == name).map(|f| f.kind)
    }

    /// Recomputes the derived rate when the draft has an empty rate but a
    /// non-empty date and currency, and keeps the phase in step.
    fn try_resolve(&mut self) {
        if !self.draft.rate.is_empty() {
            self.phase = RatePhase::Resolved;
            return;
        }
        if self.draft.date.is_empty() || self.draft.select.is_empty() {
            self.phase = RatePhase::Empty;
            return;
        }

        self.phase = RatePhase::Computing;
        if let Some(table) = &self.rate_table
            && let Some(rate) = derive_rate(table, &self.draft.select, &self.reference_currency)
        {
            self.draft.rate = rate;
            self.phase = RatePhase::Resolved;
        }
    }

    fn today() -> NaiveDate {
        chrono::Utc::now().date_naive()
    }
}

impl Default for FormManager {
    /// Manager over the built-in field set, anchored to PLN.
    fn default() -> Self {
        Self::new(grosz_shared::types::field::default_fields(), "PLN")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn table(pairs: &[(&str, rust_decimal::Decimal)]) -> RateTable {
        pairs
            .iter()
            .map(|(code, rate)| ((*code).to_string(), *rate))
            .collect()
    }

    fn manager_with_resolved_rate() -> FormManager {
        let mut manager = FormManager::default();
        let query = manager.update_field("date", "2024-03-15");
        assert_eq!(
            query,
            Some(RateQuery::Historical("2024-03-15".to_string()))
        );
        manager.update_field("select", "USD");
        manager.apply_rate_table(table(&[("PLN", dec!(4.5)), ("USD", dec!(4.0))]));
        assert_eq!(manager.draft().rate, "1.13");
        assert_eq!(manager.phase(), RatePhase::Resolved);
        manager
    }

    #[test]
    fn test_initial_state_is_empty() {
        let manager = FormManager::default();
        assert_eq!(manager.draft(), &PurchaseDraft::default());
        assert!(manager.errors().is_empty());
        assert_eq!(manager.phase(), RatePhase::Empty);
        assert_eq!(manager.initial_query(), RateQuery::Latest);
    }

    #[test]
    fn test_date_change_requests_historical_rates() {
        let mut manager = FormManager::default();
        let query = manager.update_field("date", "2024-03-15");
        assert_eq!(
            query,
            Some(RateQuery::Historical("2024-03-15".to_string()))
        );
        // Currency not picked yet, so nothing to compute.
        assert_eq!(manager.phase(), RatePhase::Empty);
    }

    #[test]
    fn test_rate_resolves_once_table_and_selection_present() {
        let mut manager = FormManager::default();
        manager.update_field("date", "2024-03-15");
        manager.update_field("select", "USD");
        assert_eq!(manager.phase(), RatePhase::Computing);

        manager.apply_rate_table(table(&[("PLN", dec!(4.5)), ("USD", dec!(4.0))]));
        assert_eq!(manager.draft().rate, "1.13");
        assert_eq!(manager.phase(), RatePhase::Resolved);
    }

    #[test]
    fn test_currency_change_clears_resolved_rate() {
        let mut manager = manager_with_resolved_rate();
        manager.update_field("select", "EUR");
        // EUR is not in the cached table, so the rate stays pending.
        assert_eq!(manager.draft().rate, "");
        assert_eq!(manager.phase(), RatePhase::Computing);
    }

    #[test]
    fn test_currency_change_rederives_from_cached_table() {
        let mut manager = FormManager::default();
        manager.update_field("date", "2024-03-15");
        manager.update_field("select", "USD");
        manager.apply_rate_table(table(&[
            ("PLN", dec!(4.5)),
            ("USD", dec!(4.0)),
            ("EUR", dec!(4.5)),
        ]));
        assert_eq!(manager.draft().rate, "1.13");

        manager.update_field("select", "EUR");
        assert_eq!(manager.draft().rate, "1.00");
        assert_eq!(manager.phase(), RatePhase::Resolved);
    }

    #[test]
    fn test_date_change_clears_rate_and_table() {
        let mut manager = manager_with_resolved_rate();
        let query = manager.update_field("date", "2024-03-16");
        assert_eq!(
            query,
            Some(RateQuery::Historical("2024-03-16".to_string()))
        );
        assert_eq!(manager.draft().rate, "");
        assert_eq!(manager.rate_table(), None);
        assert_eq!(manager.phase(), RatePhase::Computing);
    }

    #[test]
    fn test_clearing_date_issues_no_fetch() {
        let mut manager = manager_with_resolved_rate();
        let query = manager.update_field("date", "");
        assert_eq!(query, None);
        assert_eq!(manager.rate_table(), None);
        assert_eq!(manager.phase(), RatePhase::Empty);
    }

    #[test]
    fn test_table_arriving_with_empty_date_is_dropped() {
        let mut manager = FormManager::default();
        manager.apply_rate_table(table(&[("PLN", dec!(4.5)), ("USD", dec!(4.0))]));
        assert_eq!(manager.rate_table(), None);
    }

    #[test]
    fn test_manual_rate_override() {
        let mut manager = FormManager::default();
        manager.update_field("rate", "4.20");
        assert_eq!(manager.draft().rate, "4.20");
        assert_eq!(manager.phase(), RatePhase::Resolved);
    }

    #[test]
    fn test_blur_records_and_clears_single_message() {
        let mut manager = FormManager::default();
        manager.blur_field("amount");
        assert_eq!(manager.errors()["amount"], vec!["Amount is required"]);

        manager.update_field("amount", "25");
        manager.blur_field("amount");
        assert!(!manager.errors().contains_key("amount"));
    }

    #[test]
    fn test_submit_valid_draft_resets_state() {
        let mut manager = manager_with_resolved_rate();
        manager.update_field("amount", "100");

        let purchase = manager.submit().unwrap();
        assert_eq!(purchase.currency, "USD");
        assert_eq!(purchase.amount, dec!(100));
        assert_eq!(purchase.rate, dec!(1.13));

        assert_eq!(manager.draft(), &PurchaseDraft::default());
        assert!(manager.errors().is_empty());
        assert_eq!(manager.rate_table(), None);
        assert_eq!(manager.phase(), RatePhase::Empty);
    }

    #[test]
    fn test_submitted_purchases_have_unique_ids() {
        let mut manager = manager_with_resolved_rate();
        manager.update_field("amount", "100");
        let first = manager.submit().unwrap();

        let mut manager = manager_with_resolved_rate();
        manager.update_field("amount", "100");
        let second = manager.submit().unwrap();

        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_unknown_descriptor_names_are_discarded() {
        let mut fields = grosz_shared::types::field::default_fields();
        fields.push(FieldDescriptor::new(
            "color",
            "Color",
            FieldKind::Select,
            true,
        ));

        let mut manager = FormManager::new(fields, "PLN");
        manager.update_field("date", "2024-03-15");
        manager.update_field("select", "USD");
        manager.update_field("amount", "100");
        manager.update_field("rate", "4.05");

        // A descriptor outside the draft's fields must not block submission.
        let purchase = manager.submit().unwrap();
        assert_eq!(purchase.currency, "USD");
        assert!(!manager.errors().contains_key("color"));
    }

    #[test]
    fn test_submit_invalid_draft_surfaces_errors() {
        let mut manager = manager_with_resolved_rate();
        // Amount never entered.
        let errors = manager.submit().unwrap_err();
        assert_eq!(errors["amount"], vec!["Amount is required"]);
        assert_eq!(manager.errors(), &errors);
        // Draft untouched, nothing reset.
        assert_eq!(manager.draft().date, "2024-03-15");
        assert_eq!(manager.draft().rate, "1.13");
    }
}
