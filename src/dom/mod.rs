//! Document tree built from HTML.
//!
//! [`ArenaDom`] holds the nodes; [`ArenaSink`] lets html5ever parse into it.

mod arena;
mod tree_sink;

pub use arena::{UNKNOWN_NODE_NAME, Ancestors, ArenaDom, ArenaNode, Attribute, Descendants, NodeData, NodeId};
pub use tree_sink::{ArenaSink, NodeHandle};

use std::path::Path;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

use crate::error::Result;

/// Parse an HTML document into an arena DOM.
///
/// Parsing is lenient: malformed markup is repaired the way browsers do it.
pub fn parse_html(html: &str) -> ArenaDom {
    parse_html_bytes(html.as_bytes())
}

/// Parse UTF-8 encoded HTML bytes, replacing invalid sequences.
pub fn parse_html_bytes(bytes: &[u8]) -> ArenaDom {
    let sink = ArenaSink::new();
    let result = parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(bytes);
    let dom = result.into_dom();
    log::debug!("parsed {} bytes of html into {} nodes", bytes.len(), dom.len());
    dom
}

/// Read and parse an HTML file.
pub fn read_html(path: impl AsRef<Path>) -> Result<ArenaDom> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    log::debug!("read {} ({} bytes)", path.display(), bytes.len());
    Ok(parse_html_bytes(&bytes))
}
