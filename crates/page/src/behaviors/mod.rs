//! Storefront page behaviors.
//!
//! Each behavior binds listeners to elements under the controller root at
//! attach time. Handlers read the facts they need from the document, fold
//! them into the shared [`PageViewModel`] and apply the resulting patches.
//! Missing markup is a silent no-op.

pub mod anchor;
pub mod flash;
pub mod quantity;
pub mod search;
pub mod toast;
pub mod validation;

use std::cell::RefCell;
use std::rc::Rc;

use shopfront_core::{ListenerId, NodeId, PageAction, PageViewModel, Update};

use crate::config::PageConfig;
use crate::dom::{Document, Selector};
use crate::error::Result;
use crate::events::{Event, EventKind};
use crate::page::Page;
use crate::render;

/// State shared by every handler of one controller.
#[derive(Debug, Clone)]
pub struct BehaviorContext {
    root: NodeId,
    config: Rc<PageConfig>,
    model: Rc<RefCell<PageViewModel>>,
    listeners: Rc<RefCell<Vec<ListenerId>>>,
}

impl BehaviorContext {
    #[must_use]
    pub fn new(root: NodeId, config: PageConfig) -> Self {
        let model = PageViewModel::new(config.validation.error_class.clone());
        Self {
            root,
            config: Rc::new(config),
            model: Rc::new(RefCell::new(model)),
            listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Snapshot of the view-model.
    #[must_use]
    pub fn model(&self) -> PageViewModel {
        self.model.borrow().clone()
    }

    /// Register a listener and remember it for `detach`.
    pub fn listen<F>(&self, page: &mut Page, node: NodeId, kind: EventKind, callback: F) -> ListenerId
    where
        F: Fn(&mut Page, &mut Event) -> Result<()> + 'static,
    {
        let id = page.add_event_listener(node, kind, callback);
        self.listeners.borrow_mut().push(id);
        id
    }

    /// Remove every listener registered through this context.
    pub fn unlisten_all(&self, page: &mut Page) -> usize {
        let ids = std::mem::take(&mut *self.listeners.borrow_mut());
        ids.into_iter()
            .filter(|id| page.remove_event_listener(*id))
            .count()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Fold `action` into the model and patch the document.
    ///
    /// # Errors
    ///
    /// Returns an error if a patch targets a node that is not an element.
    pub fn apply(&self, page: &mut Page, action: PageAction) -> Result<Update> {
        let update = self.model.borrow_mut().apply(action);
        render::apply_patches(page.document_mut(), &update.patches)?;
        Ok(update)
    }
}

/// Elements matching `selector` under `root`, including `root` itself.
pub(crate) fn select_in_scope(doc: &Document, root: NodeId, selector: &Selector) -> Vec<NodeId> {
    let mut nodes = Vec::new();
    if selector.matches(doc, root) {
        nodes.push(root);
    }
    nodes.extend(doc.query_selector_all(root, selector));
    nodes
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::PageConfig;
    use crate::dom::{NodeSpec, PageFixture};
    use crate::page::Page;

    use super::BehaviorContext;

    /// A page built from `body` and a context rooted at the document.
    #[allow(clippy::unwrap_used)]
    pub fn page_with(body: Vec<NodeSpec>) -> (Page, BehaviorContext) {
        let fixture = PageFixture::new("https://shop.test/products").with_body(body);
        let page = Page::from_fixture(&fixture).unwrap();
        let ctx = BehaviorContext::new(page.document().root(), PageConfig::default());
        (page, ctx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::test_support::page_with;
    use super::*;
    use crate::dom::ElementSpec;

    #[test]
    fn test_select_in_scope_includes_root() {
        let (page, _) = page_with(vec![
            ElementSpec::new("form")
                .id("outer")
                .child(ElementSpec::new("form").id("inner"))
                .into(),
        ]);
        let outer = page.select_one("#outer").unwrap();
        let selector = Selector::parse("form").unwrap();
        let forms = select_in_scope(page.document(), outer, &selector);
        assert_eq!(forms, vec![outer, page.select_one("#inner").unwrap()]);
    }

    #[test]
    fn test_unlisten_all() {
        let (mut page, ctx) = page_with(vec![ElementSpec::new("button").into()]);
        let button = page.select_one("button").unwrap();
        ctx.listen(&mut page, button, EventKind::Click, |_, _| Ok(()));
        ctx.listen(&mut page, button, EventKind::KeyUp, |_, _| Ok(()));
        assert_eq!(ctx.listener_count(), 2);

        assert_eq!(ctx.unlisten_all(&mut page), 2);
        assert_eq!(ctx.listener_count(), 0);
        assert_eq!(page.listener_count(), 0);
    }
}
