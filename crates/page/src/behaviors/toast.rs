//! Toast notifications.
//!
//! A toast is a fixed-position `div` appended to `body` and removed after
//! the configured duration. Toasts stack; there is no limit and no
//! deduplication.

use shopfront_core::{NodeId, ToastKind};

use crate::config::ToastConfig;
use crate::error::Result;
use crate::page::Page;
use crate::scheduler::TaskHandle;

/// A toast on the page and its pending removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToastHandle {
    node: NodeId,
    removal: TaskHandle,
}

impl ToastHandle {
    #[must_use]
    pub const fn node(self) -> NodeId {
        self.node
    }

    /// The scheduled removal task.
    #[must_use]
    pub const fn removal(self) -> TaskHandle {
        self.removal
    }

    /// Returns `true` while the toast is attached to the document.
    #[must_use]
    pub fn is_visible(self, page: &Page) -> bool {
        page.document().is_connected(self.node)
    }

    /// Remove the toast now and cancel its scheduled removal.
    ///
    /// Returns `false` if the toast was already gone.
    ///
    /// # Errors
    ///
    /// Returns an error if the node does not belong to the page.
    pub fn dismiss(self, page: &mut Page) -> Result<bool> {
        page.clear_timer(self.removal);
        page.document_mut().remove(self.node)
    }
}

/// Show a toast with the default styling and duration.
///
/// `kind` is parsed leniently: `None` and `"success"` are green, `"error"` is
/// red and anything else is blue.
///
/// # Errors
///
/// Propagates document errors.
pub fn show_toast(page: &mut Page, message: &str, kind: Option<&str>) -> Result<ToastHandle> {
    show_toast_with(page, &ToastConfig::default(), message, ToastKind::from_type(kind))
}

/// Show a toast using `config` for styling and duration.
///
/// # Errors
///
/// Propagates document errors.
pub fn show_toast_with(
    page: &mut Page,
    config: &ToastConfig,
    message: &str,
    kind: ToastKind,
) -> Result<ToastHandle> {
    let doc = page.document_mut();
    let node = doc.create_element("div");
    doc.set_attribute(
        node,
        "class",
        &format!("{} {}", config.container_classes, kind.background_class()),
    )?;
    doc.set_text_content(node, message)?;
    let body = doc.body();
    doc.append_child(body, node)?;

    let removal = page.set_timeout(config.duration_ms, move |page| {
        page.document_mut().remove(node)?;
        Ok(())
    });
    tracing::debug!(%kind, node = %node, due_at = removal.due_at(), "Showing toast");
    Ok(ToastHandle { node, removal })
}
