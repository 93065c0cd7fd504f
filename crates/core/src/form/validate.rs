//! Field validation rules for the purchase form.
//!
//! Each field reports at most one message; the first failing rule wins.
//! An absent key in the error map means the field is valid.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use grosz_shared::types::{FieldDescriptor, FieldKind};

use super::draft::PurchaseDraft;

/// Field name to at most one error message; empty map means a valid form.
pub type ErrorMap = BTreeMap<String, Vec<String>>;

/// Date format accepted by the form.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validates a single field of the draft against its descriptor.
///
/// Rules, in order: required-ness, parseability, range (numbers must exceed
/// the configured minimum, dates must not be after `today`).
#[must_use]
pub fn validate_field(
    descriptor: &FieldDescriptor,
    draft: &PurchaseDraft,
    today: NaiveDate,
) -> Option<String> {
    let value = draft.field(&descriptor.name).unwrap_or_default();
    let label = &descriptor.label;

    if value.is_empty() {
        return descriptor
            .required
            .then(|| format!("{label} is required"));
    }

    match descriptor.kind {
        FieldKind::Date => {
            let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) else {
                return Some(format!("{label} must be a valid date (YYYY-MM-DD)"));
            };
            if date > today {
                return Some(format!("{label} cannot be in the future"));
            }
        }
        FieldKind::Number => {
            let Ok(number) = value.parse::<Decimal>() else {
                return Some(format!("{label} must be a number"));
            };
            if let Some(min) = descriptor.min
                && number <= min
            {
                return Some(format!("{label} must be greater than {min}"));
            }
        }
        FieldKind::Select => {}
    }

    None
}

/// Validates the whole draft. An empty map signals a valid form.
#[must_use]
pub fn validate_form(
    fields: &[FieldDescriptor],
    draft: &PurchaseDraft,
    today: NaiveDate,
) -> ErrorMap {
    let mut errors = ErrorMap::new();
    for descriptor in fields {
        if let Some(message) = validate_field(descriptor, draft, today) {
            errors.insert(descriptor.name.clone(), vec![message]);
        }
    }
    errors
}
