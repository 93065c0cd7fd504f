//! Property-based tests for the purchase form validation rules.

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use grosz_shared::types::field::default_fields;

use super::draft::PurchaseDraft;
use super::validate::{validate_field, validate_form};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn valid_draft() -> PurchaseDraft {
    PurchaseDraft {
        date: "2024-05-20".to_string(),
        select: "USD".to_string(),
        amount: "35".to_string(),
        rate: "4.31".to_string(),
    }
}

/// Strategy to generate a positive amount (> 0).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate a zero or negative amount.
fn non_positive_amount() -> impl Strategy<Value = Decimal> {
    (0i64..100_000_000i64).prop_map(|cents| Decimal::new(-cents, 2))
}

/// Strategy to generate a date strictly after `today`.
fn future_date() -> impl Strategy<Value = NaiveDate> {
    (1u64..3650u64).prop_map(|days| today().checked_add_days(Days::new(days)).unwrap())
}

/// Strategy to generate a date on or before `today`.
fn past_or_present_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..3650u64).prop_map(|days| today().checked_sub_days(Days::new(days)).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any date strictly after today is rejected.
    #[test]
    fn prop_future_dates_rejected(date in future_date()) {
        let mut draft = valid_draft();
        draft.date = date.format("%Y-%m-%d").to_string();

        let descriptor = &default_fields()[0];
        let message = validate_field(descriptor, &draft, today());
        prop_assert_eq!(message.as_deref(), Some("Date cannot be in the future"));
    }

    /// Any date on or before today passes.
    #[test]
    fn prop_past_dates_accepted(date in past_or_present_date()) {
        let mut draft = valid_draft();
        draft.date = date.format("%Y-%m-%d").to_string();

        let descriptor = &default_fields()[0];
        prop_assert_eq!(validate_field(descriptor, &draft, today()), None);
    }

    /// Any positive amount passes; the whole form validates.
    #[test]
    fn prop_positive_amounts_accepted(amount in positive_amount()) {
        let mut draft = valid_draft();
        draft.amount = amount.to_string();

        let errors = validate_form(&default_fields(), &draft, today());
        prop_assert!(errors.is_empty());
    }

    /// Any zero or negative amount is rejected.
    #[test]
    fn prop_non_positive_amounts_rejected(amount in non_positive_amount()) {
        let mut draft = valid_draft();
        draft.amount = amount.to_string();

        let errors = validate_form(&default_fields(), &draft, today());
        prop_assert!(errors.contains_key("amount"));
    }

    /// Emptying any required field makes the error map name that field.
    #[test]
    fn prop_missing_required_field_named(index in 0usize..4) {
        let fields = default_fields();
        let mut draft = valid_draft();
        draft.set_field(&fields[index].name, "");

        let errors = validate_form(&fields, &draft, today());
        prop_assert!(errors.contains_key(&fields[index].name));
    }
}
