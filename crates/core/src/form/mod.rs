//! Purchase form state management and validation.

pub mod draft;
pub mod manager;
pub mod validate;

#[cfg(test)]
mod validate_props;

pub use draft::{FinalizedPurchase, PurchaseDraft};
pub use manager::FormManager;
pub use validate::{ErrorMap, validate_field, validate_form};
