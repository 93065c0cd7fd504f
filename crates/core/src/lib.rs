//! Core business logic for Grosz.
//!
//! This crate contains pure business logic with ZERO web or storage
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `form` - Purchase draft, field validation, and form state management
//! - `rates` - Historical rate tables and derived-rate resolution

pub mod form;
pub mod rates;
