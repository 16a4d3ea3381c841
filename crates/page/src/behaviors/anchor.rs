//! Smooth scrolling for in-page anchors.

use std::borrow::Cow;

use url::Url;

use super::{BehaviorContext, select_in_scope};
use crate::dom::Selector;
use crate::error::Result;
use crate::events::{Event, EventKind};
use crate::page::Page;
use crate::window::{ScrollBehavior, ScrollBlock};

/// Bind every in-page anchor under the root. Returns the number bound.
///
/// # Errors
///
/// Returns an error if the configured anchor selector does not parse.
pub fn attach(page: &mut Page, ctx: &BehaviorContext) -> Result<usize> {
    let selector = Selector::parse(&ctx.config().markup.anchor_selector)?;
    let anchors = select_in_scope(page.document(), ctx.root(), &selector);

    for anchor in &anchors {
        let handler_ctx = ctx.clone();
        ctx.listen(page, *anchor, EventKind::Click, move |page, event| {
            scroll_to_fragment(page, &handler_ctx, event);
            Ok(())
        });
    }
    Ok(anchors.len())
}

fn scroll_to_fragment(page: &mut Page, ctx: &BehaviorContext, event: &mut Event) {
    event.prevent_default();

    let anchor = event.current_target();
    let doc = page.document();
    let href = doc.get_attribute(anchor, "href").unwrap_or_default();
    let Some(id) = fragment_id(doc.url(), &href) else {
        tracing::debug!(%href, "Anchor has no fragment");
        return;
    };
    let Some(target) = doc.get_element_by_id(ctx.root(), &id) else {
        tracing::debug!(%id, "Anchor target not found");
        return;
    };
    page.window_mut()
        .scroll_into_view(target, ScrollBehavior::Smooth, ScrollBlock::Start);
}

/// The decoded fragment `href` points at, or `None` for an empty fragment.
fn fragment_id(base: &Url, href: &str) -> Option<String> {
    let resolved = base.join(href).ok()?;
    let fragment = resolved.fragment().filter(|f| !f.is_empty())?;
    urlencoding::decode(fragment).ok().map(Cow::into_owned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::behaviors::test_support::page_with;
    use crate::dom::ElementSpec;

    fn anchors_page() -> (Page, BehaviorContext) {
        let (mut page, ctx) = page_with(vec![
            ElementSpec::new("a").id("to-reviews").attr("href", "#reviews").into(),
            ElementSpec::new("a").id("to-missing").attr("href", "#section9").into(),
            ElementSpec::new("a").id("to-top").attr("href", "#").into(),
            ElementSpec::new("a").id("to-cafe").attr("href", "#caf%C3%A9").into(),
            ElementSpec::new("a").id("external").attr("href", "/cart").into(),
            ElementSpec::new("section").id("reviews").into(),
            ElementSpec::new("section").id("café").into(),
        ]);
        assert_eq!(attach(&mut page, &ctx).unwrap(), 4);
        (page, ctx)
    }

    #[test]
    fn test_scrolls_to_existing_target() {
        let (mut page, _) = anchors_page();
        let event = page.click_selector("#to-reviews").unwrap();
        let reviews = page.select_one("#reviews").unwrap();

        assert!(event.default_prevented());
        assert!(page.window().navigations().is_empty());
        let scroll = page.window().scrolls()[0];
        assert_eq!(scroll.target, reviews);
        assert_eq!(scroll.behavior, ScrollBehavior::Smooth);
        assert_eq!(scroll.block, ScrollBlock::Start);
    }

    #[test]
    fn test_missing_target_still_prevents_navigation() {
        let (mut page, _) = anchors_page();
        let event = page.click_selector("#to-missing").unwrap();
        assert!(event.default_prevented());
        assert!(page.window().scrolls().is_empty());
        assert!(page.window().navigations().is_empty());
    }

    #[test]
    fn test_empty_fragment() {
        let (mut page, _) = anchors_page();
        let event = page.click_selector("#to-top").unwrap();
        assert!(event.default_prevented());
        assert!(page.window().scrolls().is_empty());
    }

    #[test]
    fn test_percent_encoded_fragment() {
        let (mut page, _) = anchors_page();
        page.click_selector("#to-cafe").unwrap();
        let cafe = page.select_one("#café").unwrap();
        assert_eq!(page.window().scrolls()[0].target, cafe);
    }

    #[test]
    fn test_other_links_navigate() {
        let (mut page, _) = anchors_page();
        page.click_selector("#external").unwrap();
        assert_eq!(page.window().navigations(), ["https://shop.test/cart"]);
    }

    #[test]
    fn test_fragment_id() {
        let base = Url::parse("https://shop.test/products?page=2").unwrap();
        assert_eq!(fragment_id(&base, "#details").as_deref(), Some("details"));
        assert_eq!(fragment_id(&base, "#café").as_deref(), Some("café"));
        assert_eq!(fragment_id(&base, "#"), None);
        assert_eq!(fragment_id(&base, "/cart"), None);
    }
}
