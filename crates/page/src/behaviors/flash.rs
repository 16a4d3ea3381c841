//! Turn server-rendered flash messages into toasts.
//!
//! The storefront renders flash messages as elements tagged with their
//! category, e.g. `<div data-flash="success">Added to cart</div>`. At attach
//! time each one is replaced by a toast of the matching severity.

use shopfront_core::ToastKind;

use super::toast::{ToastHandle, show_toast_with};
use super::{BehaviorContext, select_in_scope};
use crate::dom::Selector;
use crate::error::Result;
use crate::page::Page;

/// Convert every flash message under the root. Returns the toasts shown.
///
/// # Errors
///
/// Returns an error if the flash attribute does not form a selector.
pub fn convert(page: &mut Page, ctx: &BehaviorContext) -> Result<Vec<ToastHandle>> {
    let attribute = &ctx.config().markup.flash_attribute;
    let flashes = select_in_scope(page.document(), ctx.root(), &Selector::attribute(attribute)?);

    let mut toasts = Vec::with_capacity(flashes.len());
    for flash in flashes {
        let doc = page.document();
        let category = doc.get_attribute(flash, attribute).unwrap_or_default();
        let message = doc.text_content(flash).trim().to_owned();
        page.document_mut().remove(flash)?;

        if message.is_empty() {
            tracing::debug!(%category, "Dropping empty flash message");
            continue;
        }
        let kind = ToastKind::from_flash_category(&category);
        toasts.push(show_toast_with(page, &ctx.config().toast, &message, kind)?);
    }
    Ok(toasts)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::behaviors::test_support::page_with;
    use crate::dom::ElementSpec;

    #[test]
    fn test_flashes_become_toasts() {
        let (mut page, ctx) = page_with(vec![
            ElementSpec::new("div")
                .class("flash-messages")
                .child(ElementSpec::new("p").attr("data-flash", "success").text("Added to cart"))
                .child(ElementSpec::new("p").attr("data-flash", "danger").text(" Out of stock "))
                .child(ElementSpec::new("p").attr("data-flash", "warning").text("Low stock"))
                .into(),
        ]);

        let toasts = convert(&mut page, &ctx).unwrap();
        assert_eq!(toasts.len(), 3);
        assert!(page.select_all("[data-flash]").unwrap().is_empty());

        let doc = page.document();
        let texts: Vec<_> = toasts.iter().map(|t| doc.text_content(t.node())).collect();
        assert_eq!(texts, ["Added to cart", "Out of stock", "Low stock"]);
        assert!(doc.has_class(toasts[0].node(), "bg-green-500"));
        assert!(doc.has_class(toasts[1].node(), "bg-red-500"));
        assert!(doc.has_class(toasts[2].node(), "bg-blue-500"));
    }

    #[test]
    fn test_empty_flash_is_removed_without_toast() {
        let (mut page, ctx) = page_with(vec![
            ElementSpec::new("div").attr("data-flash", "info").text("  ").into(),
        ]);
        assert!(convert(&mut page, &ctx).unwrap().is_empty());
        assert!(page.document().children(page.document().body()).is_empty());
        assert!(page.pending_timers().is_empty());
    }
}
