//! Selection endpoints and how to address them.
//!
//! A [`SelectionEndpoint`] is a node plus an offset, the same shape as the
//! anchor and focus of a DOM selection. [`EndpointLocator`] is a small text
//! syntax for naming an endpoint inside a parsed document:
//!
//! | Locator      | Meaning                                             |
//! |--------------|-----------------------------------------------------|
//! | `/2/1@3`     | 2nd child of the document, its 1st child, offset 3  |
//! | `#intro/1@2` | 1st child of the element with `id="intro"`, offset 2 |
//! | `#intro`     | the element itself, offset 0                        |
//! | `/`          | the document node                                   |
//! | `null@5`     | no node, offset 5                                   |
//!
//! Steps are 1-based, matching the `[i/n]` suffixes in trails.

use std::fmt;
use std::str::FromStr;

use crate::dom::{ArenaDom, NodeId};
use crate::error::{Error, Result};

/// One boundary of a selection.
///
/// `node` is `None` when there is nothing selected. `offset` is kept
/// verbatim and never range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionEndpoint<N> {
    pub node: Option<N>,
    pub offset: i64,
}

impl<N> SelectionEndpoint<N> {
    pub fn new(node: N, offset: i64) -> Self {
        Self {
            node: Some(node),
            offset,
        }
    }

    /// An endpoint without a node.
    pub fn null(offset: i64) -> Self {
        Self { node: None, offset }
    }

    pub fn is_null(&self) -> bool {
        self.node.is_none()
    }
}

/// Anchor and focus of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<N> {
    pub anchor: SelectionEndpoint<N>,
    pub focus: SelectionEndpoint<N>,
}

impl<N> Selection<N> {
    pub fn new(anchor: SelectionEndpoint<N>, focus: SelectionEndpoint<N>) -> Self {
        Self { anchor, focus }
    }

    /// A caret: anchor and focus at the same place.
    pub fn collapsed(endpoint: SelectionEndpoint<N>) -> Self
    where
        N: Copy,
    {
        Self {
            anchor: endpoint,
            focus: endpoint,
        }
    }

    pub fn is_collapsed(&self) -> bool
    where
        N: PartialEq,
    {
        self.anchor == self.focus
    }
}

/// Where a locator path starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorOrigin {
    Document,
    /// Element with this `id` attribute.
    Id(String),
}

/// Textual address of a selection endpoint in an [`ArenaDom`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointLocator {
    Null {
        offset: i64,
    },
    Node {
        origin: LocatorOrigin,
        /// 1-based child positions, outermost first.
        steps: Vec<usize>,
        offset: i64,
    },
}

impl EndpointLocator {
    /// Document-relative locator for `node`, if it is attached to the document.
    pub fn for_node(dom: &ArenaDom, node: NodeId, offset: i64) -> Option<Self> {
        let mut steps = Vec::new();
        for id in dom.ancestors(node) {
            match dom.get(id)?.sibling_index() {
                Some(index) => steps.push(index + 1),
                None if id == dom.document() => {
                    steps.reverse();
                    return Some(EndpointLocator::Node {
                        origin: LocatorOrigin::Document,
                        steps,
                        offset,
                    });
                }
                None => return None,
            }
        }
        None
    }

    /// Find the endpoint this locator names.
    pub fn resolve(&self, dom: &ArenaDom) -> Result<SelectionEndpoint<NodeId>> {
        let (origin, steps, offset) = match self {
            EndpointLocator::Null { offset } => return Ok(SelectionEndpoint::null(*offset)),
            EndpointLocator::Node {
                origin,
                steps,
                offset,
            } => (origin, steps, *offset),
        };

        let not_found = || Error::NodeNotFound(self.to_string());
        let mut node = match origin {
            LocatorOrigin::Document => dom.document(),
            LocatorOrigin::Id(id) => dom.get_by_id(id).ok_or_else(not_found)?,
        };
        for &step in steps {
            node = step
                .checked_sub(1)
                .and_then(|i| dom.children(node).get(i).copied())
                .ok_or_else(not_found)?;
        }
        Ok(SelectionEndpoint::new(node, offset))
    }
}

impl FromStr for EndpointLocator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidLocator {
            locator: s.to_string(),
            reason: reason.to_string(),
        };

        let locator = s.trim();
        if locator.is_empty() {
            return Err(invalid("empty locator"));
        }

        let (path, offset) = match locator.rsplit_once('@') {
            Some((path, offset)) => {
                let offset = offset
                    .parse::<i64>()
                    .map_err(|_| invalid("offset is not an integer"))?;
                (path, offset)
            }
            None => (locator, 0),
        };

        if path == "null" {
            return Ok(EndpointLocator::Null { offset });
        }

        let (origin, rest) = if let Some(after_hash) = path.strip_prefix('#') {
            let (id, rest) = match after_hash.split_once('/') {
                Some((id, rest)) => (id, Some(rest)),
                None => (after_hash, None),
            };
            if id.is_empty() {
                return Err(invalid("empty id"));
            }
            if id.contains('@') {
                return Err(invalid("ids containing `@` cannot be addressed"));
            }
            (LocatorOrigin::Id(id.to_string()), rest)
        } else if let Some(rest) = path.strip_prefix('/') {
            (LocatorOrigin::Document, Some(rest))
        } else {
            return Err(invalid("expected `/`, `#id` or `null`"));
        };

        let steps = match rest {
            None | Some("") => Vec::new(),
            Some(rest) => rest
                .split('/')
                .map(|step| match step.parse::<usize>() {
                    Ok(n) if n > 0 => Ok(n),
                    _ => Err(invalid("steps must be positive integers")),
                })
                .collect::<Result<Vec<_>>>()?,
        };

        Ok(EndpointLocator::Node {
            origin,
            steps,
            offset,
        })
    }
}

impl fmt::Display for EndpointLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointLocator::Null { offset } => write!(f, "null@{offset}"),
            EndpointLocator::Node {
                origin,
                steps,
                offset,
            } => {
                match origin {
                    LocatorOrigin::Document if steps.is_empty() => f.write_str("/")?,
                    LocatorOrigin::Document => {}
                    LocatorOrigin::Id(id) => write!(f, "#{id}")?,
                }
                for step in steps {
                    write!(f, "/{step}")?;
                }
                write!(f, "@{offset}")
            }
        }
    }
}
