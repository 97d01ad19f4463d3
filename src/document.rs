//! A parsed document together with its current selection.

use std::path::Path;

use crate::breadcrumbs::Breadcrumbs;
use crate::dom::{ArenaDom, NodeId, parse_html, read_html};
use crate::error::Result;
use crate::selection::{EndpointLocator, Selection, SelectionEndpoint};
use crate::trail::TrailOptions;

/// Document tree plus the selection a caller last reported on it.
#[derive(Debug, Default)]
pub struct Document {
    dom: ArenaDom,
    selection: Option<Selection<NodeId>>,
}

impl Document {
    pub fn new(dom: ArenaDom) -> Self {
        Self {
            dom,
            selection: None,
        }
    }

    pub fn from_html(html: &str) -> Self {
        Self::new(parse_html(html))
    }

    /// Read and parse an HTML file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(read_html(path)?))
    }

    pub fn dom(&self) -> &ArenaDom {
        &self.dom
    }

    /// The current selection, `None` when nothing is selected.
    pub fn selection(&self) -> Option<&Selection<NodeId>> {
        self.selection.as_ref()
    }

    /// Replace the selection.
    pub fn select(&mut self, anchor: SelectionEndpoint<NodeId>, focus: SelectionEndpoint<NodeId>) {
        self.selection = Some(Selection::new(anchor, focus));
    }

    /// Place a caret.
    pub fn select_collapsed(&mut self, endpoint: SelectionEndpoint<NodeId>) {
        self.selection = Some(Selection::collapsed(endpoint));
    }

    /// Select by locators. A missing focus collapses onto the anchor.
    pub fn select_locators(
        &mut self,
        anchor: &EndpointLocator,
        focus: Option<&EndpointLocator>,
    ) -> Result<()> {
        let anchor = anchor.resolve(&self.dom)?;
        let focus = match focus {
            Some(focus) => focus.resolve(&self.dom)?,
            None => anchor,
        };
        self.select(anchor, focus);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Trails for the current selection.
    pub fn breadcrumbs(&self, options: &TrailOptions) -> Breadcrumbs {
        Breadcrumbs::from_selection(&self.dom, self.selection.as_ref(), options)
    }
}
