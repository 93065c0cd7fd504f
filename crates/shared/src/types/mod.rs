//! Common types used across the application.

pub mod field;
pub mod id;

pub use field::{FieldDescriptor, FieldKind};
pub use id::*;
