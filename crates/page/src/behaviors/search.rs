//! Live product filtering.
//!
//! Every keyup in the search box shows the product cards whose title contains
//! the typed text (case-insensitive) and hides the rest.

use std::rc::Rc;

use shopfront_core::{DisplayMode, NodeId, PageAction, Patch};

use super::{BehaviorContext, select_in_scope};
use crate::dom::Selector;
use crate::error::Result;
use crate::events::EventKind;
use crate::page::Page;

struct CardSelectors {
    card: Selector,
    title: Selector,
}

/// Bind the search input under the root. Returns `false` if there is none.
///
/// # Errors
///
/// Returns an error if the configured card or title selector does not parse.
pub fn attach(page: &mut Page, ctx: &BehaviorContext) -> Result<bool> {
    let markup = &ctx.config().markup;
    let Some(input) = page
        .document()
        .get_element_by_id(ctx.root(), &markup.search_input_id)
    else {
        tracing::debug!(id = %markup.search_input_id, "No search input; product filter not attached");
        return Ok(false);
    };

    let selectors = Rc::new(CardSelectors {
        card: Selector::class(&markup.product_card_class)?,
        title: Selector::parse(&markup.card_title_selector)?,
    });
    let handler_ctx = ctx.clone();
    ctx.listen(page, input, EventKind::KeyUp, move |page, event| {
        filter(page, &handler_ctx, &selectors, event.current_target())
    });
    Ok(true)
}

fn filter(page: &mut Page, ctx: &BehaviorContext, selectors: &CardSelectors, input: NodeId) -> Result<()> {
    let doc = page.document();
    let raw = doc.value(input).unwrap_or_default().to_owned();
    let cards: Vec<(NodeId, String)> = select_in_scope(doc, ctx.root(), &selectors.card)
        .into_iter()
        .map(|card| {
            let title = doc
                .query_selector(card, &selectors.title)
                .map(|heading| doc.text_content(heading))
                .unwrap_or_default();
            (card, title)
        })
        .collect();

    let update = ctx.apply(page, PageAction::Search { raw, cards })?;
    let hidden = update
        .patches
        .iter()
        .filter(|patch| matches!(patch, Patch::SetDisplay { display: DisplayMode::None, .. }))
        .count();
    tracing::debug!(cards = update.patches.len(), hidden, "Filtered products");
    Ok(())
}
