//! Arena-backed document model: the client's stand-in for the live page.
//!
//! Nodes are addressed by copyable [`NodeId`]s into an append-only arena,
//! so ids handed out by queries stay valid across later insertions.

use std::collections::BTreeMap;

pub mod builder;

pub use builder::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A mutable document rooted at a `body` element.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                tag: "body".to_string(),
                classes: Vec::new(),
                attrs: BTreeMap::new(),
                text: String::new(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Materialize a built element subtree as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, element: Element) -> NodeId {
        let child = self.materialize(element, parent);
        self.node_mut(parent).children.push(child);
        child
    }

    /// Materialize a built element subtree as the first child of `parent`.
    pub fn prepend_child(&mut self, parent: NodeId, element: Element) -> NodeId {
        let child = self.materialize(element, parent);
        self.node_mut(parent).children.insert(0, child);
        child
    }

    fn materialize(&mut self, element: Element, parent: NodeId) -> NodeId {
        let (tag, classes, attrs, text, children) = element.into_parts();
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag,
            classes,
            attrs,
            text,
            parent: Some(parent),
            children: Vec::new(),
        });
        for child in children {
            let child_id = self.materialize(child, id);
            self.node_mut(id).children.push(child_id);
        }
        id
    }

    /// Preorder traversal of the subtree rooted at `from`.
    fn descendants(&self, from: NodeId) -> Vec<NodeId> {
        let mut stack = vec![from];
        let mut out = Vec::new();
        while let Some(id) = stack.pop() {
            out.push(id);
            for &child in self.node(id).children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// First element in document order whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.body())
            .into_iter()
            .find(|&node| self.attr(node, "id") == Some(id))
    }

    /// First element in document order carrying `class`.
    pub fn first_by_class(&self, class: &str) -> Option<NodeId> {
        self.descendants(self.body())
            .into_iter()
            .find(|&node| self.has_class(node, class))
    }

    /// Nearest ancestor-or-self of `from` carrying `class`. This is the
    /// delegation primitive: a listener bound at the body resolves a click
    /// on any descendant to the marked element it bubbles through.
    pub fn closest_with_class(&self, from: NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(from);
        while let Some(node) = current {
            if self.has_class(node, class) {
                return Some(node);
            }
            current = self.node(node).parent;
        }
        None
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.node(node).tag
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    pub fn child_count(&self, node: NodeId) -> usize {
        self.node(node).children.len()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.node_mut(node).classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.node_mut(node).classes.retain(|c| c != class);
    }

    /// Flip `class` on the element, returning whether it is present
    /// afterwards.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    pub fn text(&self, node: NodeId) -> &str {
        &self.node(node).text
    }

    pub fn set_text(&mut self, node: NodeId, text: impl Into<String>) {
        self.node_mut(node).text = text.into();
    }

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, node: NodeId, name: impl Into<String>, value: impl Into<String>) {
        self.node_mut(node).attrs.insert(name.into(), value.into());
    }

    /// Current `value` attribute of a form control, or empty.
    pub fn value(&self, node: NodeId) -> &str {
        self.attr(node, "value").unwrap_or("")
    }

    pub fn set_value(&mut self, node: NodeId, value: impl Into<String>) {
        self.set_attr(node, "value", value);
    }

    /// Rebuild the subtree rooted at `node` as an owned [`Element`].
    pub fn element(&self, node: NodeId) -> Element {
        let data = self.node(node);
        let mut element = Element::new(&data.tag);
        for class in &data.classes {
            element = element.class(class);
        }
        for (name, value) in &data.attrs {
            element = element.attr(name, value);
        }
        if !data.text.is_empty() {
            element = element.text(&data.text);
        }
        for &child in &data.children {
            element = element.child(self.element(child));
        }
        element
    }

    pub fn render_node(&self, node: NodeId) -> String {
        self.element(node).to_html()
    }

    /// Render the whole document, body element included.
    pub fn render(&self) -> String {
        self.render_node(self.body())
    }
}

/// A click raised against a document node. Routing lives with whoever
/// listens at the body; the event only records its target and whether a
/// handler suppressed the default action.
#[derive(Debug)]
pub struct ClickEvent {
    target: NodeId,
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new(target: NodeId) -> Self {
        Self {
            target,
            default_prevented: false,
        }
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
