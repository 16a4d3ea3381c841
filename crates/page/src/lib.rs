//! Shopfront Page - client-side behavior for storefront pages.
//!
//! The page model is an in-memory document with event dispatch, a
//! deterministic timer queue, and a window log that records alerts, scroll
//! requests, navigations, and form submissions. The behavior controller wires
//! five concerns onto a root container:
//!
//! - Quantity steppers (`.quantity-btn` next to `.quantity-input`)
//! - Smooth scrolling for in-page anchors (`a[href^="#"]`)
//! - Required-field validation on form submit
//! - Live product filtering from `#search-input`
//! - Toast notifications, including server flash messages
//!
//! # Example
//!
//! ```
//! use shopfront_page::{ElementSpec, Page, PageConfig, PageFixture, controller};
//!
//! let fixture = PageFixture::new("https://shop.test/cart").with_body(vec![
//!     ElementSpec::new("div")
//!         .child(ElementSpec::new("button").class("quantity-btn decrease").id("minus"))
//!         .child(ElementSpec::new("input").class("quantity-input").id("qty").value("3"))
//!         .into(),
//! ]);
//! let mut page = Page::from_fixture(&fixture).unwrap();
//! let root = page.document().root();
//! controller::install(&mut page, root, PageConfig::default()).unwrap();
//! page.load().unwrap();
//!
//! page.click_selector("#minus").unwrap();
//! assert_eq!(page.value_of("#qty").unwrap(), "2");
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod behaviors;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod events;
pub mod page;
pub mod render;
pub mod scheduler;
pub mod window;

pub use behaviors::toast::{ToastHandle, show_toast, show_toast_with};
pub use config::{ConfigError, PageConfig};
pub use controller::ControllerHandle;
pub use dom::{Document, ElementSpec, NodeSpec, PageFixture, Selector};
pub use error::{PageError, Result};
pub use events::{Event, EventKind};
pub use page::Page;
pub use scheduler::{PendingTimer, TaskHandle};
pub use window::{ScrollBehavior, ScrollBlock, ScrollRequest, Window};

pub use shopfront_core::{NodeId, ToastKind};
