//! Form field descriptors.
//!
//! The purchase form is descriptor-driven: each field declares its name,
//! kind, label, and validation constraints. The set is externally
//! configurable; `default_fields` matches the built-in purchase form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of a form field, which decides how it is validated and how
/// changing it affects the rest of the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// ISO calendar date input.
    Date,
    /// Currency selector.
    Select,
    /// Numeric input.
    Number,
}

/// Describes one field of the purchase form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, the key used in the draft and in the error map.
    pub name: String,
    /// Human-readable label used in validation messages.
    pub label: String,
    /// Field kind.
    pub kind: FieldKind,
    /// Whether an empty value is a validation error.
    #[serde(default)]
    pub required: bool,
    /// Exclusive lower bound for `Number` fields.
    #[serde(default)]
    pub min: Option<Decimal>,
}

impl FieldDescriptor {
    /// Creates a new field descriptor.
    #[must_use]
    pub fn new(name: &str, label: &str, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required,
            min: None,
        }
    }

    /// Sets the exclusive lower bound for a numeric field.
    #[must_use]
    pub const fn with_min(mut self, min: Decimal) -> Self {
        self.min = Some(min);
        self
    }
}

/// The built-in purchase form fields: date, currency selector, amount, rate.
#[must_use]
pub fn default_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("date", "Date", FieldKind::Date, true),
        FieldDescriptor::new("select", "Currency", FieldKind::Select, true),
        FieldDescriptor::new("amount", "Amount", FieldKind::Number, true)
            .with_min(Decimal::ZERO),
        FieldDescriptor::new("rate", "Exchange rate", FieldKind::Number, true)
            .with_min(Decimal::ZERO),
    ]
}
