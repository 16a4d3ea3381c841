//! Required field validity.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::id::NodeId;

/// Validity of a single required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValidity {
    Valid,
    /// Empty or whitespace-only.
    Missing,
}

impl FieldValidity {
    /// Evaluate a field value: blank after trimming is missing.
    #[must_use]
    pub fn of(value: &str) -> Self {
        if value.trim().is_empty() {
            Self::Missing
        } else {
            Self::Valid
        }
    }

    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Outcome of evaluating every required field of a form.
///
/// Recomputed from scratch on each submission attempt.
///
/// ```
/// use shopfront_core::{NodeId, ValidationReport};
///
/// let report = ValidationReport::evaluate([
///     (NodeId::new(1), "Ada"),
///     (NodeId::new(2), "   "),
/// ]);
/// assert!(!report.is_valid());
/// assert_eq!(report.invalid_fields().collect::<Vec<_>>(), vec![NodeId::new(2)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    fields: BTreeMap<NodeId, FieldValidity>,
}

impl ValidationReport {
    /// Evaluate `(field, value)` pairs.
    pub fn evaluate<'a, I>(fields: I) -> Self
    where
        I: IntoIterator<Item = (NodeId, &'a str)>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(node, value)| (node, FieldValidity::of(value)))
                .collect(),
        }
    }

    /// Returns `true` when every field is valid (vacuously true with no fields).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(|v| v.is_valid())
    }

    /// Fields that failed, ordered by node ID.
    pub fn invalid_fields(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.fields
            .iter()
            .filter(|(_, v)| !v.is_valid())
            .map(|(node, _)| *node)
    }

    /// Validity of one field, if it was evaluated.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<FieldValidity> {
        self.fields.get(&node).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, FieldValidity)> + '_ {
        self.fields.iter().map(|(node, v)| (*node, *v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
