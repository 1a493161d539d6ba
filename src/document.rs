//! The typed block tree a page is made of.
//!
//! A [`Document`] is an ordered list of [`Block`]s. Each block kind stands for
//! one of the semantic elements of a monospace page and knows which
//! [`LayoutRole`]s it carries. Blocks hold content only; the layout engine
//! decides their size.

use crate::grid::GridCell;
use crate::header::{FrontMatter, Header};
use crate::incremental;
use crate::media::Media;
use crate::role::LayoutRole;
use crate::table;
use crate::text::{self, Sanitizer};
use crate::tree;

/// A labelled form input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Text before the input.
    pub label: String,
    /// Current input value.
    pub value: String,
}

impl FormField {
    /// Creates a field.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// One block-level element.
#[derive(Debug, Clone)]
pub enum Block {
    /// The page header: title, subtitle and author.
    Header(Header),
    /// Table of contents with this title, listing the document's headings.
    Toc(String),
    /// Top-level heading, underlined with `=`.
    Heading(String),
    /// Word-wrapped prose.
    Paragraph(String),
    /// Preformatted text: clipped, never wrapped.
    Pre(String),
    /// Horizontal rule across the full width.
    Rule,
    /// A `grid` container.
    Grid(Vec<GridCell>),
    /// A table with sizing hints on its columns.
    Table(table::Model),
    /// A `tree` list.
    Tree(tree::Model),
    /// An `incremental` list.
    Incremental(incremental::Model),
    /// An image or video with its caption.
    Media(Media),
    /// Labelled inputs; inputs take the remaining width.
    Form(Vec<FormField>),
    /// A collapsible section.
    Details {
        /// Always-visible summary line.
        summary: String,
        /// Text shown when open.
        body: String,
        /// Whether the body is shown.
        open: bool,
    },
    /// The `debug-toggle` checkbox with this `debug-toggle-label`.
    DebugToggle(String),
}

impl Block {
    /// Short name used in logs and element reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Block::Header(_) => "header",
            Block::Toc(_) => "toc",
            Block::Heading(_) => "heading",
            Block::Paragraph(_) => "paragraph",
            Block::Pre(_) => "pre",
            Block::Rule => "rule",
            Block::Grid(_) => "grid",
            Block::Table(_) => "table",
            Block::Tree(_) => "tree",
            Block::Incremental(_) => "incremental",
            Block::Media(_) => "media",
            Block::Form(_) => "form",
            Block::Details { .. } => "details",
            Block::DebugToggle(_) => "debug-toggle",
        }
    }

    /// Layout roles this block carries.
    pub fn roles(&self) -> Vec<LayoutRole> {
        match self {
            Block::Grid(_) => vec![LayoutRole::Grid],
            Block::Tree(_) => vec![LayoutRole::Tree],
            Block::Incremental(_) => vec![LayoutRole::Incremental],
            Block::Table(t) => {
                let mut roles = Vec::new();
                for c in t.columns() {
                    let role = match c.sizing {
                        table::ColumnSizing::Min => LayoutRole::WidthMin,
                        table::ColumnSizing::Auto => LayoutRole::WidthAuto,
                        _ => continue,
                    };
                    if !roles.contains(&role) {
                        roles.push(role);
                    }
                }
                roles
            }
            Block::DebugToggle(_) => vec![LayoutRole::DebugToggle, LayoutRole::DebugToggleLabel],
            _ => Vec::new(),
        }
    }

    /// Returns the block with all its text cleaned.
    ///
    /// Text that may span lines goes through `multiline`. Text drawn on a
    /// single line goes through `inline`, which should replace line breaks.
    pub fn sanitized(self, multiline: &Sanitizer, inline: &Sanitizer) -> Self {
        let block = |s: String| multiline.sanitize_str(&s);
        let line = |s: String| inline.sanitize_str(&s);
        match self {
            Block::Header(header) => Block::Header(header.sanitized(inline)),
            Block::Toc(title) => Block::Toc(line(title)),
            Block::Heading(s) => Block::Heading(block(s)),
            Block::Paragraph(s) => Block::Paragraph(block(s)),
            Block::Pre(s) => Block::Pre(block(s)),
            Block::Rule => Block::Rule,
            Block::Grid(cells) => Block::Grid(
                cells
                    .into_iter()
                    .map(|c| GridCell {
                        content: block(c.content),
                        grow: c.grow,
                    })
                    .collect(),
            ),
            Block::Table(table) => Block::Table(table.sanitized(multiline, inline)),
            Block::Tree(tree) => Block::Tree(tree.sanitized(inline)),
            Block::Incremental(list) => Block::Incremental(list.sanitized(multiline)),
            Block::Media(media) => Block::Media(media.sanitized(inline)),
            Block::Form(fields) => Block::Form(
                fields
                    .into_iter()
                    .map(|f| FormField::new(line(f.label), line(f.value)))
                    .collect(),
            ),
            Block::Details { summary, body, open } => Block::Details {
                summary: line(summary),
                body: block(body),
                open,
            },
            Block::DebugToggle(label) => Block::DebugToggle(line(label)),
        }
    }
}

/// A page: blocks in reading order.
#[derive(Debug, Clone, Default)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document, sanitizing every block.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        let mut doc = Self::new();
        for block in blocks {
            doc.push(block);
        }
        doc
    }

    /// Builds a document that opens with the header and table of contents
    /// described by `front`.
    pub fn with_front_matter(front: &FrontMatter, blocks: Vec<Block>) -> Self {
        let mut doc = Self::new();
        doc.push(Block::Header(front.header()));
        doc.push(Block::Toc(front.toc_title.clone()));
        for block in blocks {
            doc.push(block);
        }
        doc
    }

    /// Appends a block after sanitizing its text.
    pub fn push(&mut self, block: Block) {
        let multiline = text::new_sanitizer(vec![]);
        let inline = text::new_sanitizer(vec![text::replace_newlines(" ")]);
        self.blocks.push(block.sanitized(&multiline, &inline));
    }

    /// The blocks.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Mutable access to a block, e.g. to reveal list items.
    pub fn block_mut(&mut self, index: usize) -> Option<&mut Block> {
        self.blocks.get_mut(index)
    }

    /// Heading texts in document order, for the table of contents.
    pub fn headings(&self) -> Vec<&str> {
        self.blocks
            .iter()
            .filter_map(|b| match b {
                Block::Heading(title) => Some(title.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Indices of the `incremental` blocks.
    pub fn incremental_indices(&self) -> Vec<usize> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| matches!(b, Block::Incremental(_)))
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether there are no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
