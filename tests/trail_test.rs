//! End-to-end trail tests over parsed HTML.

use std::io::Write;

use ancestry::dom::Attribute;
use ancestry::{
    ArenaDom, Breadcrumbs, Document, EndpointLocator, Error, NodeId, Selection, SelectionEndpoint,
    Trail, TrailOptions, build_trail, parse_html, read_html,
};
use html5ever::{LocalName, QualName, ns};

fn qname(local: &str) -> QualName {
    QualName::new(None, ns!(html), LocalName::from(local))
}

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Notes</title></head><body><div id="main"><h1>Notes</h1><p id="intro">Select <b>some</b> text.</p><ul><li>one</li><li>two</li><li>three</li></ul></div></body></html>"#;

fn endpoint(dom: &ArenaDom, locator: &str) -> SelectionEndpoint<NodeId> {
    locator
        .parse::<EndpointLocator>()
        .unwrap()
        .resolve(dom)
        .unwrap()
}

// ============================================================================
// Hand-built trees
// ============================================================================

#[test]
fn test_detached_subtree() {
    // div -> p -> [text "Hello", span]; div is the root.
    let mut dom = ArenaDom::new();
    let div = dom.create_element(qname("div"), vec![]);
    let p = dom.create_element(qname("p"), vec![]);
    let span = dom.create_element(qname("span"), vec![]);
    dom.append(div, p).unwrap();
    dom.append_text(p, "Hello").unwrap();
    dom.append(p, span).unwrap();
    let text = dom.children(p)[0];

    let trail = build_trail(&dom, &SelectionEndpoint::new(text, 2));
    assert_eq!(trail.descriptors(), ["div", "p[1/2]", "#text[2/5]"]);
}

#[test]
fn test_names_are_lowercased() {
    let mut dom = ArenaDom::new();
    let custom = dom.create_element(
        qname("My-Widget"),
        vec![Attribute {
            name: qname("id"),
            value: "w".to_string(),
        }],
    );
    dom.append(dom.document(), custom).unwrap();

    let trail = build_trail(&dom, &SelectionEndpoint::new(custom, 0));
    assert_eq!(trail.descriptors(), ["#document", "my-widget"]);
}

// ============================================================================
// Parsed HTML
// ============================================================================

#[test]
fn test_text_in_paragraph() {
    init_logger();
    let dom = parse_html(PAGE);

    let trail = build_trail(&dom, &endpoint(&dom, "#intro/1@3"));
    assert_eq!(
        trail.descriptors(),
        [
            "#document[2/2]",
            "html[2/2]",
            "body",
            "div[2/3]",
            "p[1/3]",
            "#text[3/7]"
        ]
    );
}

#[test]
fn test_list_items() {
    let dom = parse_html(PAGE);

    for (step, expected) in [(1, "ul[1/3]"), (2, "ul[2/3]"), (3, "ul[3/3]")] {
        let trail = build_trail(&dom, &endpoint(&dom, &format!("#main/3/{step}/1@0")));
        let descriptors = trail.descriptors();
        assert_eq!(descriptors[3], "div[3/3]");
        assert_eq!(descriptors[4], expected);
        assert_eq!(descriptors[5], "li");
    }
}

#[test]
fn test_element_endpoint() {
    let dom = parse_html(PAGE);

    // Offset on an element is a child index and never shown.
    let trail = build_trail(&dom, &endpoint(&dom, "#intro@2"));
    assert_eq!(trail.descriptors().last().unwrap(), "p");
    assert!(trail.crumbs().last().unwrap().position.is_none());
}

#[test]
fn test_document_endpoint() {
    let dom = parse_html(PAGE);
    let trail = build_trail(&dom, &endpoint(&dom, "/@1"));
    assert_eq!(trail.descriptors(), ["#document"]);
}

#[test]
fn test_null_endpoint() {
    let dom = parse_html(PAGE);
    let trail = build_trail(&dom, &endpoint(&dom, "null@4"));
    assert_eq!(trail, Trail::Null);
    assert_eq!(trail.descriptors(), ["<NULL>"]);
}

#[test]
fn test_root_first_leaf_last() {
    let dom = parse_html(PAGE);
    let end = endpoint(&dom, "#main/3/2/1@1");
    let node = end.node.unwrap();

    let trail = build_trail(&dom, &end);
    let crumbs = trail.crumbs();
    assert_eq!(crumbs[0].name, "#document");
    assert_eq!(crumbs.last().unwrap().name, "#text");
    assert_eq!(trail.len(), dom.depth(node) + 1);
}

#[test]
fn test_non_ascii_text_uses_utf16_length() {
    let dom = parse_html("<p>caf\u{e9} \u{1f375}</p>");
    let trail = build_trail(&dom, &endpoint(&dom, "/1/2/1/1@4"));
    assert_eq!(trail.descriptors().last().unwrap(), "#text[4/7]");
}

#[test]
fn test_trails_do_not_touch_the_tree() {
    let dom = parse_html(PAGE);
    let before = format!("{dom:?}");
    let end = endpoint(&dom, "#intro/2/1@2");

    let first = build_trail(&dom, &end);
    let second = build_trail(&dom, &end);
    assert_eq!(first, second);
    assert_eq!(format!("{dom:?}"), before);
}

// ============================================================================
// Selections and documents
// ============================================================================

#[test]
fn test_anchor_and_focus() {
    let dom = parse_html(PAGE);
    let selection = Selection::new(
        endpoint(&dom, "#intro/1@0"),
        endpoint(&dom, "#intro/3@5"),
    );

    let crumbs = Breadcrumbs::from_selection(&dom, Some(&selection), &TrailOptions::default());
    assert_eq!(crumbs.anchor[4], "p[1/3]");
    assert_eq!(crumbs.focus[4], "p[3/3]");
    assert_eq!(crumbs.focus[5], "#text[5/6]");

    let text = crumbs.to_string();
    assert!(text.starts_with("Anchor:\n"));
    assert!(text.contains("Focus:\n"));
}

#[test]
fn test_open_document_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PAGE.as_bytes()).unwrap();

    let mut doc = Document::open(file.path()).unwrap();
    let anchor: EndpointLocator = "#intro/2/1@4".parse().unwrap();
    doc.select_locators(&anchor, None).unwrap();

    let crumbs = doc.breadcrumbs(&TrailOptions::default());
    assert_eq!(crumbs.anchor, crumbs.focus);
    assert_eq!(crumbs.anchor.last().unwrap(), "#text[4/4]");
    assert_eq!(crumbs.anchor[crumbs.anchor.len() - 2], "b");
}

#[test]
fn test_open_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = Document::open(dir.path().join("missing.html"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_read_html_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(PAGE.as_bytes()).unwrap();

    let dom = read_html(file.path()).unwrap();
    let intro = dom.get_by_id("intro").unwrap();
    assert_eq!(dom.element_name(intro).unwrap().as_ref(), "p");
    let trail = build_trail(&dom, &endpoint(&dom, "#intro/1@0"));
    assert_eq!(trail.descriptors().last().unwrap(), "#text[0/7]");

    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        read_html(dir.path().join("missing.html")),
        Err(Error::Io(_))
    ));
}
