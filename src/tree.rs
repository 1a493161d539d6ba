//! Nested lists drawn as trees.
//!
//! A `tree` list has no bullets. Top-level items sit at column 0 and each
//! nested level is indented by four columns with box-drawing connectors, so
//! every item label starts on a cell boundary that is a multiple of four.
//!
//! ```text
//! src
//! ├── lib.rs
//! └── layout
//!     ├── grid.rs
//!     └── table.rs
//! ```

use crate::text::{self, Sanitizer};

/// Columns each nesting level is indented by.
pub const INDENT: usize = 4;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const BLANK: &str = "    ";

/// A tree item and its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Item text.
    pub label: String,
    /// Nested items.
    pub children: Vec<Node>,
}

impl Node {
    /// A leaf item.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Adds children.
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    fn sanitized(self, sanitizer: &Sanitizer) -> Self {
        Self {
            label: sanitizer.sanitize_str(&self.label),
            children: self
                .children
                .into_iter()
                .map(|c| c.sanitized(sanitizer))
                .collect(),
        }
    }
}

/// A forest of top-level items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    /// Top-level items.
    pub nodes: Vec<Node>,
}

impl Model {
    /// Creates a tree from its top-level items.
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Returns the tree with every label passed through `sanitizer`.
    ///
    /// Labels are drawn on a single line, so the sanitizer should replace
    /// line breaks.
    pub fn sanitized(self, sanitizer: &Sanitizer) -> Self {
        Self {
            nodes: self
                .nodes
                .into_iter()
                .map(|n| n.sanitized(sanitizer))
                .collect(),
        }
    }

    /// Columns needed to show every label in full.
    pub fn content_width(&self) -> usize {
        fn widest(node: &Node, level: usize) -> usize {
            node.children
                .iter()
                .map(|c| widest(c, level + 1))
                .fold(level * INDENT + text::display_width(&node.label), usize::max)
        }
        self.nodes.iter().map(|n| widest(n, 0)).max().unwrap_or(0)
    }

    /// Renders the tree, clipping each line to `available` columns.
    pub fn lines(&self, available: usize) -> Vec<String> {
        let mut out = Vec::new();
        for node in &self.nodes {
            out.push(text::truncate(&node.label, available));
            push_children(&node.children, String::new(), available, &mut out);
        }
        out
    }
}

fn push_children(children: &[Node], prefix: String, available: usize, out: &mut Vec<String>) {
    for (i, child) in children.iter().enumerate() {
        let last = i + 1 == children.len();
        let connector = if last { LAST_BRANCH } else { BRANCH };
        out.push(text::truncate(&format!("{prefix}{connector}{}", child.label), available));
        let nested = format!("{prefix}{}", if last { BLANK } else { PIPE });
        push_children(&child.children, nested, available, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Model {
        Model::new(vec![Node::new("src").with_children(vec![
            Node::new("lib.rs"),
            Node::new("layout").with_children(vec![Node::new("grid.rs"), Node::new("table.rs")]),
            Node::new("page.rs"),
        ])])
    }

    #[test]
    fn test_render() {
        assert_eq!(
            sample().lines(80),
            vec![
                "src",
                "├── lib.rs",
                "├── layout",
                "│   ├── grid.rs",
                "│   └── table.rs",
                "└── page.rs",
            ]
        );
    }

    #[test]
    fn test_labels_start_on_indent_multiples() {
        for line in sample().lines(80) {
            let label_start = line
                .chars()
                .position(|c| c.is_alphanumeric())
                .unwrap_or(0);
            assert_eq!(label_start % INDENT, 0, "{line}");
        }
    }

    #[test]
    fn test_content_width() {
        assert_eq!(sample().content_width(), 4 * 2 + "table.rs".len());
    }

    #[test]
    fn test_sanitized_labels_stay_on_one_line() {
        let sanitizer = text::new_sanitizer(vec![text::replace_newlines(" ")]);
        let t = Model::new(vec![Node::new("root\nsecond\tx")
            .with_children(vec![Node::new("a\r\nb")])])
        .sanitized(&sanitizer);
        assert_eq!(t.lines(80), vec!["root second    x", "└── a b"]);
    }

    #[test]
    fn test_clipped() {
        for line in sample().lines(6) {
            assert!(text::display_width(&line) <= 6);
        }
        assert!(sample().lines(0).iter().all(String::is_empty));
    }
}
