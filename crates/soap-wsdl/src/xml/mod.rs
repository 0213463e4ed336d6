//! Minimal arena DOM for building and inspecting WSDL documents.
//!
//! Nodes live in a single `Vec` and are addressed by [`NodeId`]. Elements can
//! be created detached and attached later, which is how complex types are
//! built bottom-up before being appended to the schema.

mod reader;
mod writer;

use crate::diagnostic::SoapError;

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeKind {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        children: Vec<NodeId>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
}

/// An XML document tree.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<Node>,
    root: Option<NodeId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an XML string into a new document.
    pub fn parse(xml: &str) -> Result<Self, SoapError> {
        reader::parse(xml)
    }

    /// Serializes the document with an XML declaration.
    pub fn to_xml(&self) -> Result<String, SoapError> {
        writer::write(self)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn set_root(&mut self, id: NodeId) {
        self.detach(id);
        self.root = Some(id);
    }

    /// Creates a detached element with a qualified name such as `xsd:element`.
    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        self.push(NodeKind::Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        })
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text(text.into()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { kind, parent: None });
        id
    }

    /// Appends `child` as the last child of `parent`, moving it if attached.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        if let NodeKind::Element { children, .. } = &mut self.nodes[parent.0].kind {
            children.push(child);
            self.nodes[child.0].parent = Some(parent);
        }
    }

    /// Inserts `child` before every existing child of `parent`.
    pub fn insert_first(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        if let NodeKind::Element { children, .. } = &mut self.nodes[parent.0].kind {
            children.insert(0, child);
            self.nodes[child.0].parent = Some(parent);
        }
    }

    /// Inserts `child` immediately before `reference`, or appends when
    /// `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.detach(child);
        if let NodeKind::Element { children, .. } = &mut self.nodes[parent.0].kind {
            let index = children
                .iter()
                .position(|c| *c == reference)
                .unwrap_or(children.len());
            children.insert(index, child);
            self.nodes[child.0].parent = Some(parent);
        }
    }

    /// Creates an element and appends it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = self.create_element(name);
        self.append_child(parent, id);
        id
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            if let NodeKind::Element { children, .. } = &mut self.nodes[parent.0].kind {
                children.retain(|c| *c != id);
            }
        }
        if self.root == Some(id) {
            self.root = None;
        }
    }

    /// Sets an attribute, replacing the value in place if it already exists.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let NodeKind::Element { attributes, .. } = &mut self.nodes[id.0].kind {
            match attributes.iter_mut().find(|(k, _)| k == name) {
                Some(slot) => slot.1 = value,
                None => attributes.push((name.to_string(), value)),
            }
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        match &self.nodes[id.0].kind {
            NodeKind::Element { attributes, .. } => attributes,
            NodeKind::Text(_) => &[],
        }
    }

    /// Qualified name of an element; empty for text nodes.
    pub fn name(&self, id: NodeId) -> &str {
        match &self.nodes[id.0].kind {
            NodeKind::Element { name, .. } => name,
            NodeKind::Text(_) => "",
        }
    }

    pub fn local_name(&self, id: NodeId) -> &str {
        let name = self.name(id);
        name.rsplit_once(':').map_or(name, |(_, local)| local)
    }

    pub fn prefix(&self, id: NodeId) -> Option<&str> {
        self.name(id).split_once(':').map(|(prefix, _)| prefix)
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Element { .. })
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.0].kind {
            NodeKind::Element { children, .. } => children,
            NodeKind::Text(_) => &[],
        }
    }

    /// Child elements, skipping text.
    pub fn child_elements(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |c| self.is_element(*c))
    }

    /// First child element with the given qualified name.
    pub fn find_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.child_elements(id).find(|c| self.name(*c) == name)
    }

    /// Concatenated text content of a node and its descendants.
    pub fn text(&self, id: NodeId) -> String {
        match &self.nodes[id.0].kind {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Element { children, .. } => {
                children.iter().map(|c| self.text(*c)).collect()
            }
        }
    }

    /// Elements under `id` (inclusive) with the given qualified name, in document order.
    pub fn descendants_named(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        let mut found = Vec::new();
        self.walk(id, &mut |node| {
            if self.name(node) == name {
                found.push(node);
            }
        });
        found
    }

    /// Depth-first pre-order traversal over elements.
    pub fn walk(&self, id: NodeId, visit: &mut dyn FnMut(NodeId)) {
        if !self.is_element(id) {
            return;
        }
        visit(id);
        for child in self.children(id) {
            self.walk(*child, visit);
        }
    }

    /// Rewrites every attribute value of every attached element.
    pub fn map_attribute_values(&mut self, mut rewrite: impl FnMut(&str) -> Option<String>) {
        let Some(root) = self.root else { return };
        let mut attached = Vec::new();
        self.walk(root, &mut |node| attached.push(node));

        for id in attached {
            if let NodeKind::Element { attributes, .. } = &mut self.nodes[id.0].kind {
                for (_, value) in attributes.iter_mut() {
                    if let Some(replaced) = rewrite(value) {
                        *value = replaced;
                    }
                }
            }
        }
    }

    /// Resolves a namespace prefix (or the default namespace for `None`) in scope at `id`.
    pub fn lookup_namespace(&self, id: NodeId, prefix: Option<&str>) -> Option<&str> {
        let key = match prefix {
            Some(prefix) => format!("xmlns:{}", prefix),
            None => "xmlns".to_string(),
        };
        let mut current = Some(id);
        while let Some(node) = current {
            if let Some(uri) = self.attribute(node, &key) {
                return Some(uri);
            }
            current = self.parent(node);
        }
        None
    }

    /// Namespace URI of an element, resolved from its prefix.
    pub fn namespace_uri(&self, id: NodeId) -> Option<&str> {
        self.lookup_namespace(id, self.prefix(id))
    }

    /// Deep-copies a subtree from another document, returning the detached copy.
    pub fn import(&mut self, source: &Document, id: NodeId) -> NodeId {
        match &source.nodes[id.0].kind {
            NodeKind::Text(text) => self.create_text(text.clone()),
            NodeKind::Element { name, attributes, children } => {
                let copy = self.create_element(name.clone());
                for (k, v) in attributes {
                    self.set_attribute(copy, k, v.clone());
                }
                for child in children {
                    let child_copy = self.import(source, *child);
                    self.append_child(copy, child_copy);
                }
                copy
            }
        }
    }
}
