//! Required-field validation on form submit.

use std::rc::Rc;

use shopfront_core::{NodeId, PageAction};

use super::{BehaviorContext, select_in_scope};
use crate::dom::Selector;
use crate::error::Result;
use crate::events::{Event, EventKind};
use crate::page::Page;

/// Bind every form under the root. Returns the number bound.
///
/// # Errors
///
/// Returns an error if the required attribute does not form a selector.
pub fn attach(page: &mut Page, ctx: &BehaviorContext) -> Result<usize> {
    let forms = select_in_scope(page.document(), ctx.root(), &Selector::parse("form")?);
    let required = Rc::new(Selector::attribute(
        &ctx.config().markup.required_attribute,
    )?);

    for form in &forms {
        let handler_ctx = ctx.clone();
        let required = Rc::clone(&required);
        ctx.listen(page, *form, EventKind::Submit, move |page, event| {
            validate(page, &handler_ctx, &required, event)
        });
    }
    Ok(forms.len())
}

fn validate(page: &mut Page, ctx: &BehaviorContext, required: &Selector, event: &mut Event) -> Result<()> {
    let form = event.current_target();
    let doc = page.document();
    let fields: Vec<(NodeId, String)> = doc
        .query_selector_all(form, required)
        .into_iter()
        .map(|field| (field, doc.value(field).unwrap_or_default().to_owned()))
        .collect();
    let checked = fields.len();

    let update = ctx.apply(page, PageAction::Submit { form, fields })?;
    if update.prevent_default {
        event.prevent_default();
        page.window_mut()
            .alert(&ctx.config().validation.alert_message);
        tracing::debug!(form = %form, checked, "Blocked submit with empty required fields");
    } else {
        tracing::debug!(form = %form, checked, "Required fields present");
    }
    Ok(())
}
