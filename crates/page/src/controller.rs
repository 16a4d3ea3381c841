//! Wire the storefront behaviors onto a page.
//!
//! Behaviors are scoped to a root node and configured through [`PageConfig`],
//! so several controllers can coexist on one page without sharing state.
//!
//! ```
//! use shopfront_page::{ElementSpec, Page, PageConfig, PageFixture, controller};
//!
//! let fixture = PageFixture::default().with_body(vec![
//!     ElementSpec::new("input").id("search-input").into(),
//! ]);
//! let mut page = Page::from_fixture(&fixture).unwrap();
//! let root = page.document().root();
//!
//! let handle = controller::attach(&mut page, root, PageConfig::default()).unwrap();
//! assert_eq!(handle.listener_count(), 1);
//! assert_eq!(handle.detach(&mut page), 1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use shopfront_core::{NodeId, PageViewModel, ToastKind};

use crate::behaviors::toast::{ToastHandle, show_toast_with};
use crate::behaviors::{BehaviorContext, anchor, flash, quantity, search, validation};
use crate::config::PageConfig;
use crate::error::Result;
use crate::events::EventKind;
use crate::page::Page;

/// Wire every behavior under `root` now.
///
/// # Errors
///
/// Returns `PageError::Config` if the configuration is invalid.
pub fn attach(page: &mut Page, root: NodeId, config: PageConfig) -> Result<ControllerHandle> {
    config.validate()?;
    let handle = ControllerHandle::new(root, config);
    handle.wire(page)?;
    Ok(handle)
}

/// Wire every behavior under `root` once the page has loaded.
///
/// If the page already loaded, the behaviors are wired immediately.
///
/// # Errors
///
/// Returns `PageError::Config` if the configuration is invalid.
pub fn install(page: &mut Page, root: NodeId, config: PageConfig) -> Result<ControllerHandle> {
    config.validate()?;
    let handle = ControllerHandle::new(root, config);
    if page.is_loaded() {
        handle.wire(page)?;
        return Ok(handle);
    }

    let on_load = handle.clone();
    let document = page.document().root();
    handle
        .ctx
        .listen(page, document, EventKind::DomContentLoaded, move |page, _event| {
            on_load.wire(page)
        });
    tracing::debug!(root = %root, "Waiting for DOMContentLoaded");
    Ok(handle)
}

/// Owns the listeners and view-model of one attached controller.
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    ctx: BehaviorContext,
    flash_toasts: Rc<RefCell<Vec<ToastHandle>>>,
}

impl ControllerHandle {
    fn new(root: NodeId, config: PageConfig) -> Self {
        Self {
            ctx: BehaviorContext::new(root, config),
            flash_toasts: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn wire(&self, page: &mut Page) -> Result<()> {
        let steppers = quantity::attach(page, &self.ctx)?;
        let anchors = anchor::attach(page, &self.ctx)?;
        let forms = validation::attach(page, &self.ctx)?;
        let has_search = search::attach(page, &self.ctx)?;
        let toasts = flash::convert(page, &self.ctx)?;
        let flashes = toasts.len();
        self.flash_toasts.borrow_mut().extend(toasts);

        tracing::info!(
            root = %self.ctx.root(),
            steppers,
            anchors,
            forms,
            search = has_search,
            flashes,
            "Attached storefront behaviors"
        );
        Ok(())
    }

    /// Remove every listener this controller registered.
    ///
    /// Toasts already showing keep their scheduled removal. Returns the
    /// number of listeners removed.
    pub fn detach(&self, page: &mut Page) -> usize {
        let removed = self.ctx.unlisten_all(page);
        tracing::info!(root = %self.ctx.root(), removed, "Detached storefront behaviors");
        removed
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.ctx.root()
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        self.ctx.config()
    }

    /// Snapshot of the view-model.
    #[must_use]
    pub fn model(&self) -> PageViewModel {
        self.ctx.model()
    }

    /// Listeners currently registered by this controller.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.ctx.listener_count()
    }

    /// Toasts created from flash messages.
    #[must_use]
    pub fn flash_toasts(&self) -> Vec<ToastHandle> {
        self.flash_toasts.borrow().clone()
    }

    /// Show a toast using this controller's toast settings.
    ///
    /// # Errors
    ///
    /// Propagates document errors.
    pub fn show_toast(&self, page: &mut Page, message: &str, kind: Option<&str>) -> Result<ToastHandle> {
        show_toast_with(page, &self.config().toast, message, ToastKind::from_type(kind))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::dom::{ElementSpec, NodeSpec, PageFixture};
    use crate::error::PageError;

    fn storefront() -> Vec<NodeSpec> {
        vec![
            ElementSpec::new("p").attr("data-flash", "success").text("Welcome back").into(),
            ElementSpec::new("a").id("jump").attr("href", "#cart").into(),
            ElementSpec::new("input").id("search-input").into(),
            ElementSpec::new("div")
                .class("product-card")
                .id("card")
                .child(ElementSpec::new("h3").text("Red Shirt"))
                .into(),
            ElementSpec::new("form")
                .id("cart")
                .child(ElementSpec::new("button").class("quantity-btn").id("plus"))
                .child(ElementSpec::new("input").class("quantity-input").id("qty").value("1"))
                .child(ElementSpec::new("input").id("email").attr("required", ""))
                .into(),
        ]
    }

    fn page() -> Page {
        Page::from_fixture(&PageFixture::default().with_body(storefront())).unwrap()
    }

    #[test]
    fn test_install_waits_for_load() {
        let mut page = page();
        let root = page.document().root();
        let handle = install(&mut page, root, PageConfig::default()).unwrap();

        page.click_selector("#plus").unwrap();
        assert_eq!(page.value_of("#qty").unwrap(), "1");
        assert!(handle.flash_toasts().is_empty());

        page.load().unwrap();
        page.click_selector("#plus").unwrap();
        assert_eq!(page.value_of("#qty").unwrap(), "2");
        assert_eq!(handle.flash_toasts().len(), 1);
    }

    #[test]
    fn test_install_after_load_attaches_immediately() {
        let mut page = page();
        page.load().unwrap();
        let root = page.document().root();
        install(&mut page, root, PageConfig::default()).unwrap();

        page.click_selector("#plus").unwrap();
        assert_eq!(page.value_of("#qty").unwrap(), "2");
    }

    #[test]
    fn test_attach_wires_everything() {
        let mut page = page();
        let root = page.document().root();
        let handle = attach(&mut page, root, PageConfig::default()).unwrap();

        // stepper, anchor, form, search
        assert_eq!(handle.listener_count(), 4);
        assert_eq!(handle.flash_toasts().len(), 1);

        page.click_selector("#jump").unwrap();
        assert_eq!(page.window().scrolls().len(), 1);

        let search = page.select_one("#search-input").unwrap();
        page.type_text(search, "jeans").unwrap();
        let card = page.select_one("#card").unwrap();
        assert_eq!(handle.model().is_card_visible(card), Some(false));
    }

    #[test]
    fn test_detach_stops_behaviors() {
        let mut page = page();
        let root = page.document().root();
        let handle = attach(&mut page, root, PageConfig::default()).unwrap();

        assert_eq!(handle.detach(&mut page), 4);
        assert_eq!(page.listener_count(), 0);

        page.click_selector("#plus").unwrap();
        assert_eq!(page.value_of("#qty").unwrap(), "1");

        // The flash toast still expires.
        page.flush().unwrap();
        assert!(!handle.flash_toasts()[0].is_visible(&page));
    }

    #[test]
    fn test_root_scoping() {
        let mut page = page();
        let form = page.select_one("#cart").unwrap();
        let handle = attach(&mut page, form, PageConfig::default()).unwrap();

        // stepper and form only
        assert_eq!(handle.listener_count(), 2);
        assert!(handle.flash_toasts().is_empty());
        assert_eq!(page.select_all("[data-flash]").unwrap().len(), 1);
    }

    #[test]
    fn test_custom_config() {
        let mut page = page();
        let root = page.document().root();
        let mut config = PageConfig::default();
        config.validation.error_class = "is-invalid".to_string();
        config.validation.alert_message = "Missing fields".to_string();
        config.toast.duration_ms = 100;
        let handle = attach(&mut page, root, config).unwrap();

        page.submit_selector("#cart").unwrap();
        let email = page.select_one("#email").unwrap();
        assert!(page.document().has_class(email, "is-invalid"));
        assert_eq!(page.window().alerts(), ["Missing fields"]);

        let toast = handle.show_toast(&mut page, "Saved!", None).unwrap();
        assert_eq!(toast.removal().due_at(), 100);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut page = page();
        let root = page.document().root();
        let mut config = PageConfig::default();
        config.toast.duration_ms = 0;

        assert!(matches!(
            attach(&mut page, root, config),
            Err(PageError::Config(ConfigError::InvalidValue { .. }))
        ));
        assert_eq!(page.listener_count(), 0);
    }
}
