//! Page events and the listener registry.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use shopfront_core::{ListenerId, NodeId};

use crate::error::Result;
use crate::page::Page;

/// Events the storefront behaviors react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "DOMContentLoaded")]
    DomContentLoaded,
    #[serde(rename = "click")]
    Click,
    #[serde(rename = "submit")]
    Submit,
    #[serde(rename = "keyup")]
    KeyUp,
}

impl EventKind {
    /// The DOM event type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DomContentLoaded => "DOMContentLoaded",
            Self::Click => "click",
            Self::Submit => "submit",
            Self::KeyUp => "keyup",
        }
    }

    /// Whether the event propagates from the target up through its ancestors.
    #[must_use]
    pub const fn bubbles(self) -> bool {
        !matches!(self, Self::DomContentLoaded)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "DOMContentLoaded" => Ok(Self::DomContentLoaded),
            "click" => Ok(Self::Click),
            "submit" => Ok(Self::Submit),
            "keyup" => Ok(Self::KeyUp),
            _ => Err(format!("unsupported event type: {s}")),
        }
    }
}

/// An event in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: EventKind,
    target: NodeId,
    current_target: NodeId,
    key: Option<String>,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl Event {
    #[must_use]
    pub const fn new(kind: EventKind, target: NodeId) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            key: None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Attach the key name of a keyboard event.
    #[must_use]
    pub fn with_key(mut self, key: &str) -> Self {
        self.key = Some(key.to_owned());
        self
    }

    #[must_use]
    pub const fn kind(&self) -> EventKind {
        self.kind
    }

    /// The node the event was dispatched at.
    #[must_use]
    pub const fn target(&self) -> NodeId {
        self.target
    }

    /// The node whose listener is running.
    #[must_use]
    pub const fn current_target(&self) -> NodeId {
        self.current_target
    }

    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub const fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub const fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    #[must_use]
    pub const fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub(crate) const fn set_current_target(&mut self, node: NodeId) {
        self.current_target = node;
    }
}

/// An event callback.
///
/// Listeners receive the whole page so they can read and patch the document,
/// schedule timers, and record window effects.
pub type Listener = Rc<dyn Fn(&mut Page, &mut Event) -> Result<()>>;

struct Registration {
    id: ListenerId,
    node: NodeId,
    kind: EventKind,
    callback: Listener,
}

/// Listeners keyed by node and event kind, in registration order.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    entries: Vec<Registration>,
    next_id: usize,
}

impl ListenerRegistry {
    pub(crate) fn add(&mut self, node: NodeId, kind: EventKind, callback: Listener) -> ListenerId {
        let id = ListenerId::new(self.next_id);
        self.next_id += 1;
        self.entries.push(Registration {
            id,
            node,
            kind,
            callback,
        });
        id
    }

    pub(crate) fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub(crate) fn is_registered(&self, id: ListenerId) -> bool {
        self.entries.iter().any(|entry| entry.id == id)
    }

    /// Snapshot of the listeners for `node` and `kind`.
    pub(crate) fn matching(&self, node: NodeId, kind: EventKind) -> Vec<(ListenerId, Listener)> {
        self.entries
            .iter()
            .filter(|entry| entry.node == node && entry.kind == kind)
            .map(|entry| (entry.id, Rc::clone(&entry.callback)))
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.entries.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
