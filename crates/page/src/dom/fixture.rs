//! Declarative page fixtures.
//!
//! A fixture describes a page as nested element specs. It deserializes from
//! JSON for the CLI and builds fluently in Rust for tests:
//!
//! ```
//! use shopfront_page::{ElementSpec, NodeSpec, PageFixture};
//!
//! let fixture = PageFixture::from_json(r#"{
//!     "url": "https://shop.test/products",
//!     "body": [
//!         {"tag": "input", "id": "search-input"},
//!         {"tag": "div", "class": "product-card", "children": [
//!             {"tag": "h3", "text": "Red Shirt"}
//!         ]}
//!     ]
//! }"#).unwrap();
//! assert_eq!(fixture.body.len(), 2);
//!
//! let card = ElementSpec::new("div")
//!     .class("product-card")
//!     .child(ElementSpec::new("h3").text("Red Shirt"));
//! assert_eq!(fixture.body[1], NodeSpec::from(card));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use shopfront_core::NodeId;

use super::Document;
use crate::error::Result;

const DEFAULT_FIXTURE_URL: &str = "https://shop.test/";

fn default_url() -> String {
    DEFAULT_FIXTURE_URL.to_string()
}

/// A whole page: its URL and the children of `body`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFixture {
    #[serde(default = "default_url")]
    pub url: String,
    #[serde(default)]
    pub body: Vec<NodeSpec>,
}

impl Default for PageFixture {
    fn default() -> Self {
        Self {
            url: default_url(),
            body: Vec::new(),
        }
    }
}

impl PageFixture {
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_owned(),
            body: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_body(mut self, body: Vec<NodeSpec>) -> Self {
        self.body = body;
        self
    }

    /// # Errors
    ///
    /// Returns `PageError::Fixture` if the JSON does not describe a page.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the document described by this fixture.
    ///
    /// # Errors
    ///
    /// Returns `PageError::InvalidUrl` if the fixture URL is not absolute.
    pub fn build(&self) -> Result<Document> {
        let mut doc = Document::new(&self.url)?;
        let body = doc.body();
        for spec in &self.body {
            spec.build_into(&mut doc, body)?;
        }
        Ok(doc)
    }
}

/// A text or element node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSpec {
    Text(String),
    Element(ElementSpec),
}

impl From<ElementSpec> for NodeSpec {
    fn from(spec: ElementSpec) -> Self {
        Self::Element(spec)
    }
}

impl From<&str> for NodeSpec {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl NodeSpec {
    /// Create the node and its subtree under `parent`.
    ///
    /// # Errors
    ///
    /// Returns an error if `parent` cannot hold children.
    pub fn build_into(&self, doc: &mut Document, parent: NodeId) -> Result<NodeId> {
        let node = match self {
            Self::Text(text) => doc.create_text(text),
            Self::Element(spec) => spec.build(doc)?,
        };
        doc.append_child(parent, node)?;
        Ok(node)
    }
}

/// An element with its attributes and children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Shorthand for a single leading text child.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSpec>,
}

impl ElementSpec {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_owned(),
            id: None,
            class: None,
            attrs: BTreeMap::new(),
            value: None,
            text: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_owned());
        self
    }

    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        self.class = Some(class.to_owned());
        self
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_owned(), value.to_owned());
        self
    }

    #[must_use]
    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_owned());
        self
    }

    #[must_use]
    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_owned());
        self
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<NodeSpec>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Create the detached element and its subtree.
    ///
    /// # Errors
    ///
    /// Propagates document errors from building children.
    pub fn build(&self, doc: &mut Document) -> Result<NodeId> {
        let node = doc.create_element(&self.tag);
        for (name, value) in &self.attrs {
            doc.set_attribute(node, name, value)?;
        }
        if let Some(id) = &self.id {
            doc.set_attribute(node, "id", id)?;
        }
        if let Some(class) = &self.class {
            doc.set_attribute(node, "class", class)?;
        }
        if let Some(value) = &self.value {
            doc.set_attribute(node, "value", value)?;
        }
        if let Some(text) = &self.text {
            let text_node = doc.create_text(text);
            doc.append_child(node, text_node)?;
        }
        for child in &self.children {
            child.build_into(doc, node)?;
        }
        if !doc.has_attribute(node, "value")
            && let Some(value) = default_value(doc, node)
        {
            doc.set_value(node, &value)?;
        }
        Ok(node)
    }
}

/// Initial value of a control built without a `value`: a textarea's text,
/// or the selected (else first) option of a select.
fn default_value(doc: &Document, node: NodeId) -> Option<String> {
    match doc.tag_name(node)? {
        "textarea" => Some(doc.text_content(node)),
        "select" => {
            let options: Vec<NodeId> = doc
                .descendants(node)
                .into_iter()
                .filter(|option| doc.tag_name(*option) == Some("option"))
                .collect();
            let chosen = options
                .iter()
                .find(|option| doc.has_attribute(**option, "selected"))
                .or_else(|| options.first())?;
            Some(
                doc.get_attribute(*chosen, "value")
                    .unwrap_or_else(|| doc.text_content(*chosen).trim().to_owned()),
            )
        }
        _ => None,
    }
}
