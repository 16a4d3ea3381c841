//! Quantity stepper buttons.
//!
//! A click on a `.quantity-btn` steps the `.quantity-input` that shares its
//! parent. Buttons that also carry `.decrease` step down, never below 1.

use std::rc::Rc;

use shopfront_core::{NodeId, PageAction, Quantity, StepDirection};

use super::{BehaviorContext, select_in_scope};
use crate::dom::Selector;
use crate::error::Result;
use crate::events::EventKind;
use crate::page::Page;

/// Bind every stepper button under the root. Returns the number bound.
///
/// # Errors
///
/// Returns an error if a configured class name does not form a selector.
pub fn attach(page: &mut Page, ctx: &BehaviorContext) -> Result<usize> {
    let markup = &ctx.config().markup;
    let buttons = select_in_scope(
        page.document(),
        ctx.root(),
        &Selector::class(&markup.quantity_button_class)?,
    );
    let input_selector = Rc::new(Selector::class(&markup.quantity_input_class)?);

    for button in &buttons {
        let handler_ctx = ctx.clone();
        let input_selector = Rc::clone(&input_selector);
        ctx.listen(page, *button, EventKind::Click, move |page, event| {
            step(page, &handler_ctx, &input_selector, event.current_target())
        });
    }
    Ok(buttons.len())
}

fn step(page: &mut Page, ctx: &BehaviorContext, input_selector: &Selector, button: NodeId) -> Result<()> {
    let doc = page.document();
    let Some(input) = doc
        .parent(button)
        .and_then(|parent| doc.query_selector(parent, input_selector))
    else {
        tracing::debug!(button = %button, "No quantity input next to stepper");
        return Ok(());
    };

    let direction = if doc.has_class(button, &ctx.config().markup.decrease_class) {
        StepDirection::Decrease
    } else {
        StepDirection::Increase
    };
    let current = doc.value(input).unwrap_or_default().to_owned();
    if let Err(e) = Quantity::parse(&current) {
        tracing::warn!(input = %input, error = %e, "Ignoring non-numeric quantity");
        return Ok(());
    }

    let update = ctx.apply(
        page,
        PageAction::StepQuantity {
            input,
            current,
            direction,
        },
    )?;
    if update.patches.is_empty() {
        tracing::debug!(input = %input, ?direction, "Quantity already at floor");
    }
    Ok(())
}
