//! In-memory document tree.
//!
//! Nodes live in an arena indexed by [`NodeId`]. Removing a node only detaches
//! it from its parent, so IDs stay valid for the lifetime of the document and a
//! detached toast can still be inspected after it expires.

mod fixture;
mod selector;
mod serialize;

use std::collections::BTreeMap;

use shopfront_core::NodeId;
use url::Url;

pub use fixture::{ElementSpec, NodeSpec, PageFixture};
pub use selector::Selector;

use crate::error::{PageError, Result};

/// Element payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    value: String,
    display: Option<String>,
}

impl Element {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            value: String::new(),
            display: None,
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeData {
    Document,
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: NodeData,
}

/// A page document: a document node with a single `body` element.
///
/// Slots are never reclaimed. Every created node, including toasts that have
/// since been removed, holds its slot until the document is dropped, so the
/// arena grows with the number of nodes ever created. A page is expected to
/// live for one storefront visit; long-running hosts should build a fresh
/// document per page instead of reusing one.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    body: NodeId,
    url: Url,
}

impl Document {
    /// Create an empty document at `url`.
    ///
    /// # Errors
    ///
    /// Returns `PageError::InvalidUrl` if `url` is not absolute.
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        let mut doc = Self {
            nodes: vec![Node {
                parent: None,
                children: Vec::new(),
                data: NodeData::Document,
            }],
            root: NodeId::new(0),
            body: NodeId::new(0),
            url,
        };
        let body = doc.create_element("body");
        doc.append_child(doc.root, body)?;
        doc.body = body;
        Ok(doc)
    }

    /// The document node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.index()).ok_or(PageError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes
            .get_mut(id.index())
            .ok_or(PageError::UnknownNode(id))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            children: Vec::new(),
            data,
        });
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeData::Element(Element::new(tag)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_owned()))
    }

    /// Append `child` to `parent`, moving it out of its current parent.
    ///
    /// # Errors
    ///
    /// Returns `PageError::HierarchyRequest` if `parent` is a text node or
    /// `child` is `parent` or one of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let parent_node = self.node(parent)?;
        self.node(child)?;
        if matches!(parent_node.data, NodeData::Text(_)) || self.contains(child, parent) {
            return Err(PageError::HierarchyRequest { parent, child });
        }

        self.detach(child)?;
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Detach `node` from its parent.
    ///
    /// Returns `false` if the node was already detached.
    ///
    /// # Errors
    ///
    /// Returns `PageError::UnknownNode` for a foreign ID.
    pub fn remove(&mut self, node: NodeId) -> Result<bool> {
        self.detach(node)
    }

    fn detach(&mut self, node: NodeId) -> Result<bool> {
        let Some(parent) = self.node(node)?.parent else {
            return Ok(false);
        };
        self.node_mut(parent)?.children.retain(|c| *c != node);
        self.node_mut(node)?.parent = None;
        Ok(true)
    }

    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).ok().and_then(|n| n.parent)
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// Returns `true` if `node` is `ancestor` or lies beneath it.
    #[must_use]
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Returns `true` if the node is attached to the document.
    #[must_use]
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(self.root, node)
    }

    /// `node` followed by each of its ancestors up to the tree root.
    #[must_use]
    pub fn ancestors_inclusive(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.node(node).ok().map(|_| node);
        while let Some(id) = current {
            path.push(id);
            current = self.parent(id);
        }
        path
    }

    /// Descendants of `scope` in document order, excluding `scope` itself.
    #[must_use]
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    #[must_use]
    pub fn element(&self, node: NodeId) -> Option<&Element> {
        match &self.node(node).ok()?.data {
            NodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    fn element_mut(&mut self, node: NodeId) -> Result<&mut Element> {
        match &mut self.node_mut(node)?.data {
            NodeData::Element(element) => Ok(element),
            _ => Err(PageError::NotAnElement(node)),
        }
    }

    #[must_use]
    pub fn is_element(&self, node: NodeId) -> bool {
        self.element(node).is_some()
    }

    #[must_use]
    pub fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(Element::tag)
    }

    /// Read an attribute; `class` reflects the class list.
    #[must_use]
    pub fn get_attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let element = self.element(node)?;
        if name == "class" {
            return (!element.classes.is_empty()).then(|| element.classes.join(" "));
        }
        element.attribute(name).map(str::to_owned)
    }

    #[must_use]
    pub fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.element(node).is_some_and(|e| {
            if name == "class" {
                !e.classes.is_empty()
            } else {
                e.attrs.contains_key(name)
            }
        })
    }

    /// Set an attribute. `class` replaces the class list and `value`
    /// also sets the control's current value.
    ///
    /// # Errors
    ///
    /// Returns an error if `node` is not an element of this document.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<()> {
        let element = self.element_mut(node)?;
        match name {
            "class" => {
                element.classes = split_classes(value);
            }
            "value" => {
                element.value = value.to_owned();
                element.attrs.insert(name.to_owned(), value.to_owned());
            }
            _ => {
                element.attrs.insert(name.to_ascii_lowercase(), value.to_owned());
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node).is_some_and(|e| e.has_class(class))
    }

    /// # Errors
    ///
    /// Returns an error if `node` is not an element of this document.
    pub fn add_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        let element = self.element_mut(node)?;
        if !element.has_class(class) {
            element.classes.push(class.to_owned());
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if `node` is not an element of this document.
    pub fn remove_class(&mut self, node: NodeId, class: &str) -> Result<()> {
        self.element_mut(node)?.classes.retain(|c| c != class);
        Ok(())
    }

    /// Current value of a form control (empty for other elements).
    #[must_use]
    pub fn value(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.value.as_str())
    }

    /// Set the current value without touching the `value` attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if `node` is not an element of this document.
    pub fn set_value(&mut self, node: NodeId, value: &str) -> Result<()> {
        value.clone_into(&mut self.element_mut(node)?.value);
        Ok(())
    }

    /// Inline `display` style, if one was set.
    #[must_use]
    pub fn display(&self, node: NodeId) -> Option<&str> {
        self.element(node).and_then(|e| e.display.as_deref())
    }

    /// # Errors
    ///
    /// Returns an error if `node` is not an element of this document.
    pub fn set_display(&mut self, node: NodeId, display: Option<&str>) -> Result<()> {
        self.element_mut(node)?.display = display.map(str::to_owned);
        Ok(())
    }

    /// Concatenated text of the node and all its descendants.
    #[must_use]
    pub fn text_content(&self, node: NodeId) -> String {
        std::iter::once(node)
            .chain(self.descendants(node))
            .filter_map(|id| self.text(id))
            .collect()
    }

    /// Replace all children of `node` with a single text node.
    ///
    /// A sole existing text child is rewritten in place, so repeated updates
    /// do not grow the arena.
    ///
    /// # Errors
    ///
    /// Returns an error if `node` is not an element of this document.
    pub fn set_text_content(&mut self, node: NodeId, text: &str) -> Result<()> {
        self.element_mut(node)?;
        let sole_child = match self.children(node) {
            [only] if !text.is_empty() => Some(*only),
            _ => None,
        };
        if let Some(child) = sole_child
            && let NodeData::Text(existing) = &mut self.node_mut(child)?.data
        {
            text.clone_into(existing);
            return Ok(());
        }

        for child in self.children(node).to_vec() {
            self.detach(child)?;
        }
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(node, text_node)?;
        }
        Ok(())
    }

    /// First element under `scope` whose `id` attribute equals `id`.
    #[must_use]
    pub fn get_element_by_id(&self, scope: NodeId, id: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|node| self.element(*node).and_then(Element::id) == Some(id))
    }

    /// Every element under `scope` matching `selector`, in document order.
    #[must_use]
    pub fn query_selector_all(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|node| selector.matches(self, *node))
            .collect()
    }

    /// First element under `scope` matching `selector`.
    #[must_use]
    pub fn query_selector(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|node| selector.matches(self, *node))
    }

    /// Serialize `node` and its subtree as HTML.
    #[must_use]
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        serialize::write_node(self, node, &mut out);
        out
    }

    /// Serialize the children of `node` as HTML.
    #[must_use]
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            serialize::write_node(self, *child, &mut out);
        }
        out
    }

    fn text(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).ok()?.data {
            NodeData::Text(t) => Some(t),
            _ => None,
        }
    }
}

fn split_classes(value: &str) -> Vec<String> {
    let mut classes: Vec<String> = Vec::new();
    for class in value.split_whitespace() {
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
    }
    classes
}
