//! Arena-based DOM for HTML parsing.
//!
//! All nodes are stored in a contiguous vector and refer to each other by
//! [`NodeId`]. Ownership flows from a parent to its `children`; the `parent`
//! link is a plain index used only for walking upwards. Every attached node
//! also records its position among its siblings, so positional lookups are
//! O(1) and verified by identity.

use std::borrow::Cow;
use std::collections::HashMap;

use html5ever::{LocalName, QualName};

use crate::error::{Error, Result};
use crate::tree::{DocumentTree, NodeKind};

/// Name reported for ids that are not in the arena.
pub const UNKNOWN_NODE_NAME: &str = "?";

/// Unique identifier for a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The document node (always allocated first).
    pub const DOCUMENT: NodeId = NodeId(0);

    fn slot(self) -> usize {
        self.0 as usize
    }
}

/// Node type in the arena DOM.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document root.
    Document,
    /// Detached fragment, such as `<template>` contents.
    Fragment,
    /// Element with name and attributes.
    Element {
        name: QualName,
        attrs: Vec<Attribute>,
        /// Pre-extracted id for fast lookup.
        id: Option<String>,
    },
    /// Text content.
    Text(String),
    /// Comment (kept so sibling positions match the source).
    Comment(String),
    /// Document type declaration.
    Doctype {
        name: String,
        public_id: String,
        system_id: String,
    },
}

impl NodeData {
    /// The DOM `nodeName` of this node.
    ///
    /// Elements report their qualified name, other nodes the `#`-prefixed
    /// names browsers use (`#document`, `#text`, `#comment`).
    pub fn node_name(&self) -> Cow<'_, str> {
        match self {
            NodeData::Document => Cow::Borrowed("#document"),
            NodeData::Fragment => Cow::Borrowed("#document-fragment"),
            NodeData::Element { name, .. } => match &name.prefix {
                Some(prefix) => Cow::Owned(format!("{}:{}", prefix, name.local)),
                None => Cow::Borrowed(name.local.as_ref()),
            },
            NodeData::Text(_) => Cow::Borrowed("#text"),
            NodeData::Comment(_) => Cow::Borrowed("#comment"),
            NodeData::Doctype { name, .. } => Cow::Borrowed(name.as_str()),
        }
    }
}

/// HTML attribute.
#[derive(Debug, Clone)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// A node in the arena DOM.
#[derive(Debug)]
pub struct ArenaNode {
    pub data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Position in the parent's `children`; meaningless while detached.
    index: usize,
}

impl ArenaNode {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            children: Vec::new(),
            index: 0,
        }
    }

    /// Parent node (None for the document and for detached nodes).
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Zero-based position among the parent's children.
    pub fn sibling_index(&self) -> Option<usize> {
        self.parent.map(|_| self.index)
    }
}

/// Arena-based DOM tree.
///
/// The tree is acyclic by construction: [`ArenaDom::append`] and
/// [`ArenaDom::insert_before`] refuse to place a node under itself or under
/// one of its own descendants.
#[derive(Debug)]
pub struct ArenaDom {
    nodes: Vec<ArenaNode>,
    /// Map from id attribute to the first element carrying it.
    id_map: HashMap<String, NodeId>,
}

impl ArenaDom {
    /// Create a new empty DOM with a document root.
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            id_map: HashMap::new(),
        };
        dom.alloc(NodeData::Document);
        dom
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(ArenaNode::new(data));
        id
    }

    /// Get the document root ID.
    pub fn document(&self) -> NodeId {
        NodeId::DOCUMENT
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&ArenaNode> {
        self.nodes.get(id.slot())
    }

    fn node(&self, id: NodeId) -> Result<&ArenaNode> {
        self.get(id).ok_or(Error::UnknownNode(id))
    }

    /// Create a new, detached element node.
    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> NodeId {
        let id = attrs
            .iter()
            .find(|attr| attr.name.local.as_ref() == "id")
            .map(|attr| attr.value.clone());

        let node_id = self.alloc(NodeData::Element {
            name,
            attrs,
            id: id.clone(),
        });

        if let Some(id_str) = id {
            self.id_map.entry(id_str).or_insert(node_id);
        }

        node_id
    }

    /// Create a new, detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Text(text.into()))
    }

    /// Create a new, detached document fragment.
    pub fn create_fragment(&mut self) -> NodeId {
        self.alloc(NodeData::Fragment)
    }

    /// Create a new, detached comment node.
    pub fn create_comment(&mut self, text: impl Into<String>) -> NodeId {
        self.alloc(NodeData::Comment(text.into()))
    }

    /// Create a new, detached doctype node.
    pub fn create_doctype(
        &mut self,
        name: String,
        public_id: String,
        system_id: String,
    ) -> NodeId {
        self.alloc(NodeData::Doctype {
            name,
            public_id,
            system_id,
        })
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that is already attached elsewhere is moved.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check_insert(parent, child)?;
        self.detach(child)?;

        let index = self.nodes[parent.slot()].children.len();
        self.nodes[parent.slot()].children.push(child);
        let node = &mut self.nodes[child.slot()];
        node.parent = Some(parent);
        node.index = index;
        Ok(())
    }

    /// Insert `new_node` immediately before `sibling`.
    pub fn insert_before(&mut self, sibling: NodeId, new_node: NodeId) -> Result<()> {
        let parent = self.node(sibling)?.parent.ok_or(Error::Detached(sibling))?;
        if sibling == new_node {
            return Ok(());
        }
        self.check_insert(parent, new_node)?;
        self.detach(new_node)?;

        // Detaching may have shifted the sibling.
        let at = self.nodes[sibling.slot()].index;
        self.nodes[parent.slot()].children.insert(at, new_node);
        self.nodes[new_node.slot()].parent = Some(parent);
        self.reindex(parent, at);
        Ok(())
    }

    /// Append text to the last child if it is a text node, or create a new one.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> Result<()> {
        let last_child = self.node(parent)?.children.last().copied();
        if let Some(last) = last_child
            && let NodeData::Text(existing) = &mut self.nodes[last.slot()].data
        {
            existing.push_str(text);
            return Ok(());
        }

        let text_node = self.create_text(text);
        self.append(parent, text_node)
    }

    /// Insert text before `sibling`, merging into a preceding text node.
    pub fn insert_text_before(&mut self, sibling: NodeId, text: &str) -> Result<()> {
        let node = self.node(sibling)?;
        let parent = node.parent.ok_or(Error::Detached(sibling))?;
        let previous = node
            .index
            .checked_sub(1)
            .map(|i| self.nodes[parent.slot()].children[i]);

        if let Some(previous) = previous
            && let NodeData::Text(existing) = &mut self.nodes[previous.slot()].data
        {
            existing.push_str(text);
            return Ok(());
        }

        let text_node = self.create_text(text);
        self.insert_before(sibling, text_node)
    }

    /// Remove a node from its parent. Detached nodes are left alone.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        let node = self.node(id)?;
        let Some(parent) = node.parent else {
            return Ok(());
        };
        let index = node.index;

        let siblings = &mut self.nodes[parent.slot()].children;
        if siblings.get(index) == Some(&id) {
            siblings.remove(index);
        } else {
            siblings.retain(|&sibling| sibling != id);
        }
        self.nodes[id.slot()].parent = None;
        self.reindex(parent, index);
        Ok(())
    }

    /// Move all children of `node` to the end of `new_parent`.
    pub fn reparent_children(&mut self, node: NodeId, new_parent: NodeId) -> Result<()> {
        let children = self.node(node)?.children.clone();
        for child in children {
            self.append(new_parent, child)?;
        }
        Ok(())
    }

    /// Merge attributes into an element, keeping existing values.
    pub fn add_missing_attrs(&mut self, id: NodeId, attrs: Vec<Attribute>) {
        if let Some(node) = self.nodes.get_mut(id.slot())
            && let NodeData::Element {
                attrs: existing, ..
            } = &mut node.data
        {
            for attr in attrs {
                if !existing.iter().any(|a| a.name == attr.name) {
                    existing.push(attr);
                }
            }
        }
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.node(parent)?;
        self.node(child)?;
        if self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(Error::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    fn reindex(&mut self, parent: NodeId, from: usize) {
        let children = std::mem::take(&mut self.nodes[parent.slot()].children);
        for (index, child) in children.iter().enumerate().skip(from) {
            self.nodes[child.slot()].index = index;
        }
        self.nodes[parent.slot()].children = children;
    }

    /// Get node by id attribute.
    pub fn get_by_id(&self, id: &str) -> Option<NodeId> {
        self.id_map.get(id).copied()
    }

    /// Get the number of nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the DOM is empty (only has document root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Children of a node in document order.
    pub fn children(&self, parent: NodeId) -> &[NodeId] {
        self.get(parent).map(ArenaNode::children).unwrap_or(&[])
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(ArenaNode::parent)
    }

    /// Walk from `id` up to its root, starting with `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            dom: self,
            current: self.get(id).map(|_| id),
        }
    }

    /// Number of ancestors above `id` (0 for a root).
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count().saturating_sub(1)
    }

    /// Find the first node matching a predicate, in document order.
    pub fn find<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&ArenaNode) -> bool,
    {
        self.descendants(self.document())
            .find(|&id| self.get(id).is_some_and(&predicate))
    }

    /// Find element by tag name (first match).
    pub fn find_by_tag(&self, tag: &str) -> Option<NodeId> {
        self.find(|node| {
            if let NodeData::Element { name, .. } = &node.data {
                name.local.as_ref() == tag
            } else {
                false
            }
        })
    }

    /// Pre-order traversal of `root` and everything below it.
    pub fn descendants(&self, root: NodeId) -> Descendants<'_> {
        Descendants {
            dom: self,
            stack: self.get(root).map(|_| vec![root]).unwrap_or_default(),
        }
    }
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator from a node up to its root.
pub struct Ancestors<'a> {
    dom: &'a ArenaDom,
    current: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.dom.parent(id);
        Some(id)
    }
}

/// Pre-order iterator over a subtree.
pub struct Descendants<'a> {
    dom: &'a ArenaDom,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack
            .extend(self.dom.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Convenience methods for element and text nodes.
impl ArenaDom {
    /// Get element's local name (tag).
    pub fn element_name(&self, id: NodeId) -> Option<&LocalName> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { name, .. } => Some(&name.local),
            _ => None,
        })
    }

    /// Get an attribute value.
    pub fn get_attr(&self, id: NodeId, attr_name: &str) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name.local.as_ref() == attr_name)
                .map(|a| a.value.as_str()),
            _ => None,
        })
    }

    /// Get element's id attribute.
    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Element { id, .. } => id.as_deref(),
            _ => None,
        })
    }

    /// Get text content of a text node.
    pub fn text_content(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.data {
            NodeData::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }
}

impl DocumentTree for ArenaDom {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        ArenaDom::parent(self, node)
    }

    fn kind(&self, node: NodeId) -> NodeKind<'_> {
        match self.get(node).map(|n| &n.data) {
            Some(NodeData::Text(text)) => NodeKind::Text(Some(text.as_str())),
            Some(data) => NodeKind::Element(data.node_name()),
            None => NodeKind::Element(Cow::Borrowed(UNKNOWN_NODE_NAME)),
        }
    }

    fn child_count(&self, node: NodeId) -> usize {
        self.children(node).len()
    }

    fn child_position(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        let node = self.get(child)?;
        if node.parent != Some(parent) {
            return None;
        }
        (self.children(parent).get(node.index) == Some(&child)).then_some(node.index)
    }
}
