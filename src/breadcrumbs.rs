//! Anchor and focus trails, side by side.

use std::fmt;

use crate::selection::Selection;
use crate::trail::{TrailOptions, build_trail_with};
use crate::tree::DocumentTree;

/// Placeholder shown in both lists when there is no selection at all.
pub const NO_SELECTION: &str = "<No selection>";

/// Descriptor lists for both ends of a selection.
///
/// Built fresh from the tree each time; nothing is cached between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Breadcrumbs {
    pub anchor: Vec<String>,
    pub focus: Vec<String>,
}

impl Breadcrumbs {
    /// Trails for `selection`, or the no-selection placeholder.
    pub fn from_selection<T: DocumentTree>(
        tree: &T,
        selection: Option<&Selection<T::Node>>,
        options: &TrailOptions,
    ) -> Self {
        match selection {
            Some(selection) => Self {
                anchor: build_trail_with(tree, &selection.anchor, options).descriptors(),
                focus: build_trail_with(tree, &selection.focus, options).descriptors(),
            },
            None => Self::empty(),
        }
    }

    /// Lists for a document without any selection.
    pub fn empty() -> Self {
        Self {
            anchor: vec![NO_SELECTION.to_string()],
            focus: vec![NO_SELECTION.to_string()],
        }
    }
}

impl fmt::Display for Breadcrumbs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_list(f, "Anchor", &self.anchor)?;
        write_list(f, "Focus", &self.focus)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, title: &str, items: &[String]) -> fmt::Result {
    writeln!(f, "{title}:")?;
    let width = items.len().to_string().len();
    for (i, item) in items.iter().enumerate() {
        writeln!(f, "  {:>width$}. {item}", i + 1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;
    use crate::selection::SelectionEndpoint;

    #[test]
    fn test_no_selection() {
        let dom = parse_html("<p>x</p>");
        let crumbs = Breadcrumbs::from_selection(&dom, None, &TrailOptions::default());
        assert_eq!(crumbs.anchor, ["<No selection>"]);
        assert_eq!(crumbs.focus, ["<No selection>"]);
    }

    #[test]
    fn test_null_and_real_endpoints() {
        let dom = parse_html("<p>abc</p>");
        let p = dom.find_by_tag("p").unwrap();
        let text = dom.children(p)[0];
        let selection = Selection::new(SelectionEndpoint::null(0), SelectionEndpoint::new(text, 3));

        let crumbs = Breadcrumbs::from_selection(&dom, Some(&selection), &TrailOptions::default());
        assert_eq!(crumbs.anchor, ["<NULL>"]);
        assert_eq!(
            crumbs.focus,
            ["#document", "html[2/2]", "body", "p", "#text[3/3]"]
        );
    }

    #[test]
    fn test_render() {
        let crumbs = Breadcrumbs {
            anchor: (1..=10).map(|i| format!("n{i}")).collect(),
            focus: vec!["<NULL>".to_string()],
        };
        let text = crumbs.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Anchor:");
        assert_eq!(lines[1], "   1. n1");
        assert_eq!(lines[10], "  10. n10");
        assert_eq!(lines[11], "Focus:");
        assert_eq!(lines[12], "  1. <NULL>");
        assert_eq!(lines.len(), 13);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_shape() {
        let dom = parse_html("<p>abc</p>");
        let p = dom.find_by_tag("p").unwrap();
        let selection = Selection::new(
            SelectionEndpoint::new(dom.children(p)[0], 1),
            SelectionEndpoint::null(0),
        );

        let crumbs = Breadcrumbs::from_selection(&dom, Some(&selection), &TrailOptions::default());
        assert_eq!(
            serde_json::to_value(&crumbs).unwrap(),
            serde_json::json!({
                "anchor": ["#document", "html[2/2]", "body", "p", "#text[1/3]"],
                "focus": ["<NULL>"],
            })
        );
        assert_eq!(
            serde_json::to_value(Breadcrumbs::empty()).unwrap(),
            serde_json::json!({ "anchor": ["<No selection>"], "focus": ["<No selection>"] })
        );
    }
}
