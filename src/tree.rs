//! Read-only view of a document tree.
//!
//! The trail builder only needs to walk upwards and ask each node what it is
//! and where its child sits. [`ArenaDom`](crate::dom::ArenaDom) implements
//! this for parsed HTML; other trees can plug in by implementing
//! [`DocumentTree`].

use std::borrow::Cow;
use std::fmt::Debug;

/// What a node is, as far as trail descriptors are concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind<'a> {
    /// Any node that is not a text leaf, with its DOM node name.
    Element(Cow<'a, str>),
    /// A text-bearing leaf. `None` when the content is unavailable.
    Text(Option<&'a str>),
}

impl NodeKind<'_> {
    /// Name used in descriptors before lower-casing.
    pub fn name(&self) -> &str {
        match self {
            NodeKind::Element(name) => name,
            NodeKind::Text(_) => "#text",
        }
    }
}

/// A finite, acyclic tree reachable through parent links.
pub trait DocumentTree {
    /// Node handle; compared by identity.
    type Node: Copy + Eq + Debug;

    /// Parent of `node`, or `None` at the root.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;

    fn kind(&self, node: Self::Node) -> NodeKind<'_>;

    fn child_count(&self, node: Self::Node) -> usize;

    /// Zero-based position of `child` among the children of `parent`.
    ///
    /// Returns `None` when `child` is not one of them.
    fn child_position(&self, parent: Self::Node, child: Self::Node) -> Option<usize>;
}
