//! Shopfront Core - Shared types for storefront page behavior.
//!
//! This crate provides common types used across all shopfront components:
//! - `page` - In-memory page, event wiring, and the behavior controller
//! - `cli` - Scenario runner for page fixtures
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no
//! document access, no timers, no logging. Event handlers in `shopfront-page`
//! read the document, feed a [`PageAction`] into the [`PageViewModel`], and
//! apply the returned [`Patch`] list back onto the document.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for node IDs, quantities, search terms, field validity, and toast kinds
//! - [`view_model`] - Explicit page state, the reducer, and render patches

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;
pub mod view_model;

pub use types::*;
pub use view_model::{DEFAULT_ERROR_CLASS, DisplayMode, PageAction, PageViewModel, Patch, Update};
