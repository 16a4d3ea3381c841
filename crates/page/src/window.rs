//! Window-level side effects recorded by the page.
//!
//! Alerts, scroll requests, navigations, and form submissions have no visible
//! effect in the in-memory document, so the window keeps an ordered log of
//! them for callers and tests to inspect.

use serde::{Deserialize, Serialize};
use shopfront_core::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBlock {
    #[default]
    Start,
    Center,
    End,
    Nearest,
}

/// A `scrollIntoView` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrollRequest {
    pub target: NodeId,
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

/// Log of window effects in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Window {
    alerts: Vec<String>,
    scrolls: Vec<ScrollRequest>,
    navigations: Vec<String>,
    submissions: Vec<NodeId>,
}

impl Window {
    /// Show a modal alert. Recorded only; the page does not block.
    pub fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }

    pub fn scroll_into_view(&mut self, target: NodeId, behavior: ScrollBehavior, block: ScrollBlock) {
        self.scrolls.push(ScrollRequest {
            target,
            behavior,
            block,
        });
    }

    pub fn navigate(&mut self, href: &str) {
        self.navigations.push(href.to_owned());
    }

    pub fn record_submission(&mut self, form: NodeId) {
        self.submissions.push(form);
    }

    #[must_use]
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    #[must_use]
    pub fn scrolls(&self) -> &[ScrollRequest] {
        &self.scrolls
    }

    #[must_use]
    pub fn navigations(&self) -> &[String] {
        &self.navigations
    }

    #[must_use]
    pub fn submissions(&self) -> &[NodeId] {
        &self.submissions
    }

    /// Drain the recorded alerts.
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_effects_in_order() {
        let mut window = Window::default();
        window.alert("one");
        window.alert("two");
        window.scroll_into_view(NodeId::new(4), ScrollBehavior::Smooth, ScrollBlock::Start);
        window.navigate("https://shop.test/cart");
        window.record_submission(NodeId::new(9));

        assert_eq!(window.alerts(), ["one", "two"]);
        assert_eq!(window.scrolls()[0].behavior, ScrollBehavior::Smooth);
        assert_eq!(window.navigations(), ["https://shop.test/cart"]);
        assert_eq!(window.submissions(), [NodeId::new(9)]);

        assert_eq!(window.take_alerts().len(), 2);
        assert!(window.alerts().is_empty());
    }

    #[test]
    fn test_serializes_log() {
        let mut window = Window::default();
        window.scroll_into_view(NodeId::new(2), ScrollBehavior::Smooth, ScrollBlock::Start);
        let json = serde_json::to_value(&window).unwrap_or_default();
        assert_eq!(json["scrolls"][0]["behavior"], "smooth");
        assert_eq!(json["scrolls"][0]["block"], "start");
        assert_eq!(json["scrolls"][0]["target"], 2);
    }
}
