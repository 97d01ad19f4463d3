//! Ancestry trails for selection endpoints.
//!
//! A trail names every node from the document root down to the node a
//! selection endpoint sits in. Each step is a [`Crumb`]: the node's
//! lower-cased name plus, where it helps, a positional suffix.
//!
//! ```
//! use ancestry::{build_trail, parse_html, SelectionEndpoint};
//!
//! let dom = parse_html("<p>Hello <b>there</b></p>");
//! let p = dom.find_by_tag("p").unwrap();
//! let text = dom.children(p)[0];
//!
//! let trail = build_trail(&dom, &SelectionEndpoint::new(text, 2));
//! assert_eq!(
//!     trail.descriptors(),
//!     ["#document", "html[2/2]", "body", "p[1/2]", "#text[2/6]"]
//! );
//! ```
//!
//! The sibling suffix `[i/n]` sits on the *parent's* crumb and says which of
//! its `n` children the trail continues through. It is left out when the
//! parent has a single child. The offset suffix `[offset/length]` appears
//! only on the innermost crumb, and only when that node is text.

use std::fmt;

use log::debug;

use crate::selection::SelectionEndpoint;
use crate::tree::{DocumentTree, NodeKind};

/// Descriptor emitted for an endpoint without a node.
pub const NULL_DESCRIPTOR: &str = "<NULL>";

/// How text lengths are counted in offset suffixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OffsetUnit {
    /// UTF-16 code units, the unit of DOM selection offsets.
    #[default]
    Utf16,
    /// Unicode scalar values.
    Chars,
    /// UTF-8 bytes.
    Bytes,
}

impl OffsetUnit {
    /// Length of `text` in this unit.
    pub fn measure(self, text: &str) -> usize {
        match self {
            OffsetUnit::Utf16 => text.encode_utf16().count(),
            OffsetUnit::Chars => text.chars().count(),
            OffsetUnit::Bytes => text.len(),
        }
    }
}

/// Knobs for [`build_trail_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrailOptions {
    pub unit: OffsetUnit,
}

/// Positional annotation on a crumb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum Position {
    /// The trail continues through child `index` (1-based) of `total`.
    Sibling { index: usize, total: usize },
    /// Selection offset inside a text leaf. `length` is `None` when the
    /// text content is unavailable.
    Offset { offset: i64, length: Option<usize> },
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Sibling { index, total } => write!(f, "[{index}/{total}]"),
            Position::Offset {
                offset,
                length: Some(length),
            } => write!(f, "[{offset}/{length}]"),
            Position::Offset {
                offset,
                length: None,
            } => write!(f, "[{offset}/?]"),
        }
    }
}

/// One step of a trail.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Crumb {
    /// Lower-cased node name.
    pub name: String,
    pub position: Option<Position>,
}

impl fmt::Display for Crumb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(position) = &self.position {
            write!(f, "{position}")?;
        }
        Ok(())
    }
}

/// Root-first ancestry of a selection endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Trail {
    /// The endpoint had no node.
    Null,
    /// Crumbs from the root (first) to the selected node (last).
    Path(Vec<Crumb>),
}

impl Trail {
    /// Crumbs root-first; empty for [`Trail::Null`].
    pub fn crumbs(&self) -> &[Crumb] {
        match self {
            Trail::Null => &[],
            Trail::Path(crumbs) => crumbs,
        }
    }

    /// Number of descriptors (1 for [`Trail::Null`]).
    pub fn len(&self) -> usize {
        match self {
            Trail::Null => 1,
            Trail::Path(crumbs) => crumbs.len(),
        }
    }

    /// A trail always has at least one descriptor.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Descriptor strings, root-first. `["<NULL>"]` for a null endpoint.
    pub fn descriptors(&self) -> Vec<String> {
        match self {
            Trail::Null => vec![NULL_DESCRIPTOR.to_string()],
            Trail::Path(crumbs) => crumbs.iter().map(Crumb::to_string).collect(),
        }
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trail::Null => f.write_str(NULL_DESCRIPTOR),
            Trail::Path(crumbs) => {
                for (i, crumb) in crumbs.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" > ")?;
                    }
                    write!(f, "{crumb}")?;
                }
                Ok(())
            }
        }
    }
}

/// Build the trail for `endpoint` with default options.
pub fn build_trail<T: DocumentTree>(tree: &T, endpoint: &SelectionEndpoint<T::Node>) -> Trail {
    build_trail_with(tree, endpoint, &TrailOptions::default())
}

/// Build the trail for `endpoint`.
///
/// Never fails: a missing node gives [`Trail::Null`], a child that can't be
/// located under its parent gives a crumb without suffix, and text without
/// content gives an unknown length. The tree is only read.
pub fn build_trail_with<T: DocumentTree>(
    tree: &T,
    endpoint: &SelectionEndpoint<T::Node>,
    options: &TrailOptions,
) -> Trail {
    let Some(node) = endpoint.node else {
        return Trail::Null;
    };

    let mut crumbs = Vec::new();
    let mut cursor = Some(node);
    let mut child: Option<T::Node> = None;

    while let Some(current) = cursor {
        let kind = tree.kind(current);
        let position = match child {
            Some(child) => sibling_position(tree, current, child),
            None => match &kind {
                NodeKind::Text(content) => {
                    Some(offset_position(*content, endpoint.offset, options))
                }
                NodeKind::Element(_) => None,
            },
        };

        crumbs.push(Crumb {
            name: kind.name().to_lowercase(),
            position,
        });

        child = Some(current);
        cursor = tree.parent(current);
    }

    crumbs.reverse();
    Trail::Path(crumbs)
}

fn sibling_position<T: DocumentTree>(
    tree: &T,
    parent: T::Node,
    child: T::Node,
) -> Option<Position> {
    let total = tree.child_count(parent);
    if total <= 1 {
        return None;
    }
    match tree.child_position(parent, child) {
        Some(index) => Some(Position::Sibling {
            index: index + 1,
            total,
        }),
        None => {
            debug!("{child:?} not found among the {total} children of {parent:?}");
            None
        }
    }
}

fn offset_position(content: Option<&str>, offset: i64, options: &TrailOptions) -> Position {
    if content.is_none() {
        debug!("text node without content, length unknown");
    }
    Position::Offset {
        offset,
        length: content.map(|text| options.unit.measure(text)),
    }
}
