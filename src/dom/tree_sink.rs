//! html5ever TreeSink implementation for ArenaDom.

use std::borrow::Cow;
use std::cell::RefCell;
use std::rc::Rc;

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as Html5Attribute, QualName};
use log::{trace, warn};

use super::arena::{ArenaDom, Attribute, NodeId};
use crate::error::Result;

/// Handle used by TreeSink to reference nodes.
///
/// Element handles carry their name so `elem_name` can hand out a
/// reference without borrowing the arena.
#[derive(Debug, Clone)]
pub struct NodeHandle {
    pub id: NodeId,
    name: Option<Rc<QualName>>,
}

impl NodeHandle {
    fn plain(id: NodeId) -> Self {
        Self { id, name: None }
    }
}

/// TreeSink implementation that builds an ArenaDom.
///
/// Uses interior mutability (RefCell) because html5ever's TreeSink trait
/// requires methods to take `&self` but we need to mutate the DOM.
pub struct ArenaSink {
    dom: RefCell<ArenaDom>,
    /// Template element -> its contents fragment.
    templates: RefCell<Vec<(NodeId, NodeId)>>,
}

impl Default for ArenaSink {
    fn default() -> Self {
        Self::new()
    }
}

impl ArenaSink {
    pub fn new() -> Self {
        Self {
            dom: RefCell::new(ArenaDom::new()),
            templates: RefCell::new(Vec::new()),
        }
    }

    /// Consume the sink and return the DOM.
    pub fn into_dom(self) -> ArenaDom {
        self.dom.into_inner()
    }

    /// Run a structural edit. The parser never asks for a cycle, so a
    /// refusal is logged and the edit dropped.
    fn edit(&self, what: &str, op: impl FnOnce(&mut ArenaDom) -> Result<()>) {
        if let Err(e) = op(&mut self.dom.borrow_mut()) {
            warn!("ignoring tree-builder {what}: {e}");
        }
    }
}

impl TreeSink for ArenaSink {
    type Handle = NodeHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, msg: Cow<'static, str>) {
        // Lenient like browsers.
        trace!("html parse error: {msg}");
    }

    fn get_document(&self) -> Self::Handle {
        NodeHandle::plain(self.dom.borrow().document())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static EMPTY: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        target.name.as_deref().unwrap_or(&EMPTY)
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<Html5Attribute>,
        flags: ElementFlags,
    ) -> Self::Handle {
        let converted_attrs: Vec<Attribute> = attrs
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                value: a.value.to_string(),
            })
            .collect();

        let mut dom = self.dom.borrow_mut();
        let id = dom.create_element(name.clone(), converted_attrs);
        if flags.template {
            let contents = dom.create_fragment();
            self.templates.borrow_mut().push((id, contents));
        }

        NodeHandle {
            id,
            name: Some(Rc::new(name)),
        }
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        NodeHandle::plain(self.dom.borrow_mut().create_comment(text.to_string()))
    }

    fn create_pi(&self, _target: StrTendril, data: StrTendril) -> Self::Handle {
        // Processing instructions - create as comment
        NodeHandle::plain(self.dom.borrow_mut().create_comment(data.to_string()))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        match child {
            NodeOrText::AppendNode(node) => {
                self.edit("append", |dom| dom.append(parent.id, node.id))
            }
            NodeOrText::AppendText(text) => {
                self.edit("append text", |dom| dom.append_text(parent.id, &text))
            }
        }
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        // If element has parent, insert next to it; otherwise use prev_element
        let has_parent = self.dom.borrow().parent(element.id).is_some();
        if has_parent {
            self.append_before_sibling(element, child);
        } else {
            self.append(prev_element, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        name: StrTendril,
        public_id: StrTendril,
        system_id: StrTendril,
    ) {
        self.edit("doctype", |dom| {
            let doc = dom.document();
            let doctype = dom.create_doctype(
                name.to_string(),
                public_id.to_string(),
                system_id.to_string(),
            );
            dom.append(doc, doctype)
        });
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        let contents = self
            .templates
            .borrow()
            .iter()
            .find(|(template, _)| *template == target.id)
            .map(|&(_, contents)| contents);
        // Template contents stay out of the document, like in a browser.
        NodeHandle::plain(contents.unwrap_or(target.id))
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.id == y.id
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        // Quirks only affect layout, never the tree shape.
        trace!("quirks mode: {mode:?}");
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        match new_node {
            NodeOrText::AppendNode(node) => {
                self.edit("insert", |dom| dom.insert_before(sibling.id, node.id))
            }
            NodeOrText::AppendText(text) => {
                self.edit("insert text", |dom| dom.insert_text_before(sibling.id, &text))
            }
        }
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<Html5Attribute>) {
        let attrs = attrs
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                value: a.value.to_string(),
            })
            .collect();
        self.dom.borrow_mut().add_missing_attrs(target.id, attrs);
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.edit("remove", |dom| dom.detach(target.id));
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        self.edit("reparent", |dom| dom.reparent_children(node.id, new_parent.id));
    }
}

#[cfg(test)]
mod tests {
    use html5ever::driver::ParseOpts;
    use html5ever::parse_document;
    use html5ever::tendril::TendrilSink;

    use super::*;
    use crate::dom::NodeData;
    use crate::tree::DocumentTree;

    fn parse_html(html: &str) -> ArenaDom {
        let sink = ArenaSink::new();
        let result = parse_document(sink, ParseOpts::default())
            .from_utf8()
            .one(html.as_bytes());
        result.into_dom()
    }

    #[test]
    fn test_basic_parse() {
        let dom = parse_html("<html><body><p>Hello</p></body></html>");

        // Should have document + html + head + body + p + text
        assert!(dom.len() > 3);

        let p = dom.find_by_tag("p").expect("should find p");
        assert_eq!(dom.element_name(p).unwrap().as_ref(), "p");

        let text_id = dom.children(p)[0];
        assert_eq!(dom.text_content(text_id), Some("Hello"));
    }

    #[test]
    fn test_doctype_is_first_child() {
        let dom = parse_html("<!DOCTYPE html><p>x</p>");

        let first = dom.children(dom.document())[0];
        assert!(matches!(
            dom.get(first).unwrap().data,
            NodeData::Doctype { ref name, .. } if name == "html"
        ));
    }

    #[test]
    fn test_template_contents_stay_detached() {
        let dom = parse_html("<body><template><p>hidden</p></template></body>");

        let p = dom.find_by_tag("p");
        assert!(p.is_none(), "template contents are not in the document");
        let template = dom.find_by_tag("template").unwrap();
        assert!(dom.children(template).is_empty());
    }

    #[test]
    fn test_attributes() {
        let dom = parse_html(r#"<div id="main" class="container header">Content</div>"#);

        let div = dom.find_by_tag("div").expect("should find div");
        assert_eq!(dom.element_id(div), Some("main"));
        assert_eq!(dom.get_attr(div, "class"), Some("container header"));
    }

    #[test]
    fn test_implied_end_tags() {
        // The parser has to know the current node is a <p> to close it.
        let dom = parse_html("<body><p>one<p>two</body>");

        let body = dom.find_by_tag("body").unwrap();
        let paragraphs: Vec<_> = dom
            .children(body)
            .iter()
            .filter(|&&c| dom.element_name(c).is_some_and(|n| n.as_ref() == "p"))
            .collect();
        assert_eq!(paragraphs.len(), 2);
    }

    #[test]
    fn test_foster_parenting_keeps_indices() {
        let dom = parse_html("<table>oops<tr><td>cell</td></tr></table>");

        let body = dom.find_by_tag("body").unwrap();
        let children = dom.children(body);
        assert_eq!(dom.text_content(children[0]), Some("oops"));
        for (i, &child) in children.iter().enumerate() {
            assert_eq!(dom.child_position(body, child), Some(i));
        }
    }

    #[test]
    fn test_nested_structure() {
        let dom = parse_html(
            r#"
            <div>
                <p>First</p>
                <p>Second</p>
            </div>
        "#,
        );

        let div = dom.find_by_tag("div").expect("should find div");

        // Two p children, plus whitespace text nodes between them
        let p_children: Vec<_> = dom
            .children(div)
            .iter()
            .filter(|&&c| dom.element_name(c).is_some_and(|n| n.as_ref() == "p"))
            .collect();
        assert_eq!(p_children.len(), 2);
        assert_eq!(dom.children(div).len(), 5);
    }
}
