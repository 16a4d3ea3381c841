//! Explicit page state and its pure render step.
//!
//! Event handlers never write to the document directly. They describe what
//! happened as a [`PageAction`], the [`PageViewModel`] folds it into its state,
//! and the returned [`Update`] lists the [`Patch`] values that bring the
//! document in line with that state.
//!
//! ```
//! use shopfront_core::{NodeId, PageAction, PageViewModel, Patch, StepDirection};
//!
//! let mut model = PageViewModel::default();
//! let update = model.apply(PageAction::StepQuantity {
//!     input: NodeId::new(4),
//!     current: "2".to_string(),
//!     direction: StepDirection::Increase,
//! });
//! assert_eq!(
//!     update.patches,
//!     vec![Patch::SetValue { node: NodeId::new(4), value: "3".to_string() }]
//! );
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{
    FieldValidity, NodeId, Quantity, SearchTerm, StepDirection, ValidationReport,
};

/// Default marker class for fields that failed validation.
pub const DEFAULT_ERROR_CLASS: &str = "border-red-500";

/// Inline `display` value written to product cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    Block,
    None,
}

impl DisplayMode {
    #[must_use]
    pub const fn from_visible(visible: bool) -> Self {
        if visible { Self::Block } else { Self::None }
    }

    /// CSS keyword for the inline style.
    #[must_use]
    pub const fn as_css(self) -> &'static str {
        match self {
            Self::Block => "block",
            Self::None => "none",
        }
    }
}

/// A single document mutation produced by the render step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Patch {
    /// Replace the value of a form control.
    SetValue { node: NodeId, value: String },
    /// Set the inline `display` style of an element.
    SetDisplay { node: NodeId, display: DisplayMode },
    /// Add (`present`) or remove a class.
    SetClass {
        node: NodeId,
        class: String,
        present: bool,
    },
}

/// Something the user did, with the document facts the reducer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum PageAction {
    /// A stepper button was pressed next to `input`.
    StepQuantity {
        input: NodeId,
        current: String,
        direction: StepDirection,
    },
    /// A key was released in the search box.
    Search {
        raw: String,
        /// Every product card in scope with its title text.
        cards: Vec<(NodeId, String)>,
    },
    /// A form was submitted.
    Submit {
        form: NodeId,
        /// Every required field of the form with its current value.
        fields: Vec<(NodeId, String)>,
    },
}

/// Result of folding one action into the model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Update {
    pub patches: Vec<Patch>,
    /// The event's default action must be cancelled.
    pub prevent_default: bool,
}

/// State of the interactive parts of a storefront page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageViewModel {
    quantities: BTreeMap<NodeId, Quantity>,
    search_term: SearchTerm,
    card_visibility: BTreeMap<NodeId, bool>,
    validity: BTreeMap<NodeId, FieldValidity>,
    error_class: String,
}

impl Default for PageViewModel {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_CLASS)
    }
}

impl PageViewModel {
    /// Create an empty model that marks invalid fields with `error_class`.
    #[must_use]
    pub fn new(error_class: impl Into<String>) -> Self {
        Self {
            quantities: BTreeMap::new(),
            search_term: SearchTerm::default(),
            card_visibility: BTreeMap::new(),
            validity: BTreeMap::new(),
            error_class: error_class.into(),
        }
    }

    /// Fold an action into the model and render the affected region.
    pub fn apply(&mut self, action: PageAction) -> Update {
        match action {
            PageAction::StepQuantity {
                input,
                current,
                direction,
            } => self.step_quantity(input, &current, direction),
            PageAction::Search { raw, cards } => self.search(&raw, cards),
            PageAction::Submit { fields, .. } => self.submit(&fields),
        }
    }

    fn step_quantity(&mut self, input: NodeId, current: &str, direction: StepDirection) -> Update {
        let Ok(quantity) = Quantity::parse(current) else {
            return Update::default();
        };
        let Some(next) = quantity.step(direction) else {
            self.quantities.insert(input, quantity);
            return Update::default();
        };
        self.quantities.insert(input, next);

        Update {
            patches: self.render_quantity(input).into_iter().collect(),
            prevent_default: false,
        }
    }

    fn search(&mut self, raw: &str, cards: Vec<(NodeId, String)>) -> Update {
        self.search_term = SearchTerm::new(raw);
        let mut patches = Vec::with_capacity(cards.len());
        for (card, title) in cards {
            self.card_visibility
                .insert(card, self.search_term.matches(&title));
            patches.extend(self.render_card(card));
        }
        Update {
            patches,
            prevent_default: false,
        }
    }

    fn submit(&mut self, fields: &[(NodeId, String)]) -> Update {
        let report =
            ValidationReport::evaluate(fields.iter().map(|(node, value)| (*node, value.as_str())));

        let mut patches = Vec::with_capacity(report.len());
        for (node, validity) in report.iter() {
            self.validity.insert(node, validity);
            patches.extend(self.render_field(node));
        }
        Update {
            patches,
            prevent_default: !report.is_valid(),
        }
    }

    /// Render every known node.
    #[must_use]
    pub fn render(&self) -> Vec<Patch> {
        let quantities = self
            .quantities
            .keys()
            .filter_map(|node| self.render_quantity(*node));
        let cards = self
            .card_visibility
            .keys()
            .filter_map(|node| self.render_card(*node));
        let fields = self
            .validity
            .keys()
            .filter_map(|node| self.render_field(*node));
        quantities.chain(cards).chain(fields).collect()
    }

    fn render_quantity(&self, input: NodeId) -> Option<Patch> {
        self.quantities.get(&input).map(|qty| Patch::SetValue {
            node: input,
            value: qty.to_string(),
        })
    }

    fn render_card(&self, card: NodeId) -> Option<Patch> {
        self.card_visibility
            .get(&card)
            .map(|visible| Patch::SetDisplay {
                node: card,
                display: DisplayMode::from_visible(*visible),
            })
    }

    fn render_field(&self, field: NodeId) -> Option<Patch> {
        self.validity.get(&field).map(|validity| Patch::SetClass {
            node: field,
            class: self.error_class.clone(),
            present: !validity.is_valid(),
        })
    }

    #[must_use]
    pub fn quantity(&self, input: NodeId) -> Option<Quantity> {
        self.quantities.get(&input).copied()
    }

    #[must_use]
    pub const fn search_term(&self) -> &SearchTerm {
        &self.search_term
    }

    #[must_use]
    pub fn is_card_visible(&self, card: NodeId) -> Option<bool> {
        self.card_visibility.get(&card).copied()
    }

    #[must_use]
    pub fn field_validity(&self, field: NodeId) -> Option<FieldValidity> {
        self.validity.get(&field).copied()
    }

    #[must_use]
    pub fn error_class(&self) -> &str {
        &self.error_class
    }
}
