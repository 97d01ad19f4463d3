//! Error types for ancestry operations.

use thiserror::Error;

use crate::dom::NodeId;

/// Errors that can occur while building or addressing a document tree.
///
/// Trail building itself never fails; these cover loading documents,
/// mutating the arena and resolving endpoint locators.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid endpoint locator {locator:?}: {reason}")]
    InvalidLocator { locator: String, reason: String },

    #[error("No node matches locator {0:?}")]
    NodeNotFound(String),

    #[error("Unknown node {0:?}")]
    UnknownNode(NodeId),

    #[error("Node {0:?} has no parent")]
    Detached(NodeId),

    #[error("Cannot insert {child:?} under {parent:?}: would create a cycle")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    #[cfg(any(feature = "cli", feature = "wasm"))]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
