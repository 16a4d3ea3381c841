//! Core types for shopfront page behavior.
//!
//! This module provides type-safe wrappers for the transient page state.

pub mod id;
pub mod quantity;
pub mod search;
pub mod toast;
pub mod validity;

pub use id::*;
pub use quantity::{Quantity, QuantityError, StepDirection};
pub use search::SearchTerm;
pub use toast::ToastKind;
pub use validity::{FieldValidity, ValidationReport};
