//! Unified error handling for the page model.
//!
//! Behavior handlers treat missing markup as a silent no-op, so these errors
//! only surface for misuse of the page API itself: foreign node IDs, bad
//! selectors, malformed fixtures, or invalid configuration.

use shopfront_core::NodeId;
use thiserror::Error;

use crate::config::ConfigError;

/// Error type for the page model and its behaviors.
#[derive(Debug, Error)]
pub enum PageError {
    /// The node ID does not belong to this document.
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// The operation needs an element but got a text or document node.
    #[error("Node {0} is not an element")]
    NotAnElement(NodeId),

    /// Inserting the child would break the tree.
    #[error("Cannot insert node {child} into {parent}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// No element matched the selector.
    #[error("Selector not found: {0}")]
    SelectorNotFound(String),

    /// The selector could not be parsed.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// The document URL could not be parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The virtual clock cannot move backwards.
    #[error("Time cannot move backwards (now {now_ms}ms, target {target_ms}ms)")]
    TimeReversal { now_ms: u64, target_ms: u64 },

    /// Timers kept rescheduling past the step limit.
    #[error("Timer step limit exceeded after {0} tasks")]
    TimerStepLimit(usize),

    /// The page fixture could not be parsed.
    #[error("Invalid fixture: {0}")]
    Fixture(#[from] serde_json::Error),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for `PageError`.
pub type Result<T> = std::result::Result<T, PageError>;
