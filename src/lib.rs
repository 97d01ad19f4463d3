//! # ancestry
//!
//! Breadcrumb trails for text selections in an HTML document.
//!
//! Given a selection endpoint (a node and an offset), ancestry walks from the
//! node up to the document root and describes every step: the node name, the
//! position of the child the walk came through, and for text the offset
//! within it.
//!
//! ## Quick Start
//!
//! ```
//! use ancestry::{Document, EndpointLocator, TrailOptions};
//!
//! let mut doc = Document::from_html(r#"<p id="greeting">Hello <em>world</em></p>"#);
//!
//! let anchor: EndpointLocator = "#greeting/1@2".parse().unwrap();
//! let focus: EndpointLocator = "#greeting/2/1@5".parse().unwrap();
//! doc.select_locators(&anchor, Some(&focus)).unwrap();
//!
//! let crumbs = doc.breadcrumbs(&TrailOptions::default());
//! assert_eq!(crumbs.anchor.last().unwrap(), "#text[2/6]");
//! assert_eq!(crumbs.focus[3], "p[2/2]");
//! ```
//!
//! ## Working with other trees
//!
//! [`build_trail`] works on anything implementing [`DocumentTree`], not just
//! the parsed [`ArenaDom`].

pub mod breadcrumbs;
pub mod document;
pub mod dom;
pub mod error;
pub mod selection;
pub mod trail;
pub mod tree;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use breadcrumbs::{Breadcrumbs, NO_SELECTION};
pub use document::Document;
pub use dom::{ArenaDom, NodeData, NodeId, parse_html, read_html};
pub use error::{Error, Result};
pub use selection::{EndpointLocator, LocatorOrigin, Selection, SelectionEndpoint};
pub use trail::{
    Crumb, NULL_DESCRIPTOR, OffsetUnit, Position, Trail, TrailOptions, build_trail,
    build_trail_with,
};
pub use tree::{DocumentTree, NodeKind};
