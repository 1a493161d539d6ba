//! The grid layout engine.
//!
//! [`compute_layout`] is a pure function of a [`LayoutState`] (viewport, font
//! metrics and debug flag) and a [`Document`]. It gives every block a box
//! measured in whole columns and whole lines, so in pixels each box is an
//! integer multiple of the character cell. Nothing here keeps state between
//! calls: the event shell owns the state and calls in again after every
//! resize or toggle.
//!
//! # Examples
//!
//! ```rust
//! use monogrid::document::{Block, Document};
//! use monogrid::grid::GridCell;
//! use monogrid::layout::{compute_layout, LayoutState};
//! use monogrid::metrics::{CharacterCell, Viewport};
//!
//! let cell = CharacterCell::new(10.0, 20.0).unwrap();
//! let state = LayoutState::new(Viewport::new(810.0, 400.0), cell);
//! let doc = Document::from_blocks(vec![Block::Grid(vec![
//!     GridCell::new("one"),
//!     GridCell::new("two"),
//!     GridCell::new("three"),
//! ])]);
//!
//! let layout = compute_layout(&state, &doc);
//! assert_eq!(layout.columns, 81);
//! assert_eq!(layout.blocks[0].cell_widths, vec![27, 27, 27]);
//! ```

use crate::debug::ElementBox;
use crate::document::{Block, Document, FormField};
use crate::grid::{self, GridCell};
use crate::metrics::{CharacterCell, Viewport};
use crate::text;
use crate::tree::{Model as Tree, Node};

/// Blank lines between consecutive blocks.
pub const BLOCK_GAP: usize = 1;

/// Everything layout depends on besides the document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutState {
    /// Current viewport in pixels.
    pub viewport: Viewport,
    /// Glyph cell of the active font.
    pub cell: CharacterCell,
    /// Whether the debug overlay is shown.
    pub debug: bool,
}

impl LayoutState {
    /// State with the overlay off.
    pub fn new(viewport: Viewport, cell: CharacterCell) -> Self {
        Self {
            viewport,
            cell,
            debug: false,
        }
    }

    /// Whole columns that fit the viewport.
    pub fn columns(&self) -> usize {
        self.viewport.columns(&self.cell)
    }

    /// Whole lines that fit the viewport.
    pub fn rows(&self) -> usize {
        self.viewport.rows(&self.cell)
    }
}

/// Where one block landed.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockLayout {
    /// Index of the block in the document.
    pub index: usize,
    /// Block kind, see [`Block::kind`].
    pub kind: &'static str,
    /// First line of the block, counted from the top of the page.
    pub row: usize,
    /// Width of the block's box in columns.
    pub columns: usize,
    /// Rendered lines. Their count is the block's height in lines.
    pub lines: Vec<String>,
    /// Per-cell widths for grids, tables and forms; empty otherwise.
    pub cell_widths: Vec<usize>,
}

impl BlockLayout {
    /// Height in lines.
    pub fn rows(&self) -> usize {
        self.lines.len()
    }

    /// The block's box in pixels.
    pub fn element_box(&self, cell: &CharacterCell) -> ElementBox {
        ElementBox::new(
            format!("{}#{}", self.kind, self.index),
            0.0,
            cell.rows_to_px(self.row),
            cell.columns_to_px(self.columns),
            cell.rows_to_px(self.rows()),
        )
    }
}

/// The laid-out page.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    /// Columns available to every block.
    pub columns: usize,
    /// Lines visible in the viewport.
    pub rows: usize,
    /// Blocks in document order.
    pub blocks: Vec<BlockLayout>,
    /// Whether the overlay should be drawn.
    pub debug: bool,
}

impl Layout {
    /// Every line of the page, blocks separated by [`BLOCK_GAP`] blank lines.
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        for block in &self.blocks {
            while out.len() < block.row {
                out.push(String::new());
            }
            out.extend(block.lines.iter().cloned());
        }
        out
    }

    /// Total height of the page in lines.
    pub fn total_rows(&self) -> usize {
        self.blocks.last().map_or(0, |b| b.row + b.rows())
    }

    /// Pixel boxes of every block, for [`crate::debug::check_offsets`].
    pub fn element_boxes(&self, cell: &CharacterCell) -> Vec<ElementBox> {
        self.blocks.iter().map(|b| b.element_box(cell)).collect()
    }
}

/// Lays out `document` for `state`.
///
/// Deterministic: the same state and document always give the same layout.
/// A viewport narrower than one cell gives zero columns, and every block then
/// collapses to empty lines of zero width.
pub fn compute_layout(state: &LayoutState, document: &Document) -> Layout {
    let columns = state.columns();
    let rows = state.rows();
    log::debug!(
        "layout {}x{}px -> {columns} columns, {rows} rows, {} blocks",
        state.viewport.width,
        state.viewport.height,
        document.len()
    );

    let headings = document.headings();
    let mut blocks = Vec::with_capacity(document.len());
    let mut row = 0;
    for (index, block) in document.blocks().iter().enumerate() {
        let (lines, cell_widths) = layout_block(block, columns, state, &headings);
        if lines.is_empty() {
            log::trace!("{}#{index} is empty", block.kind());
            continue;
        }
        let width = match block {
            Block::Header(_) | Block::Grid(_) | Block::Rule | Block::Form(_) => columns,
            _ => lines.iter().map(|l| text::display_width(l)).max().unwrap_or(0),
        };
        if !blocks.is_empty() {
            row += BLOCK_GAP;
        }
        let height = lines.len();
        blocks.push(BlockLayout {
            index,
            kind: block.kind(),
            row,
            columns: width,
            lines,
            cell_widths,
        });
        row += height;
    }

    Layout {
        columns,
        rows,
        blocks,
        debug: state.debug,
    }
}

fn layout_block(
    block: &Block,
    columns: usize,
    state: &LayoutState,
    headings: &[&str],
) -> (Vec<String>, Vec<usize>) {
    match block {
        Block::Header(header) => (header.lines(columns), header.cell_widths(columns)),
        Block::Toc(title) => {
            let entries = headings.iter().map(|h| Node::new(*h)).collect();
            let toc = Tree::new(vec![Node::new(title.as_str()).with_children(entries)]);
            (toc.lines(columns), Vec::new())
        }
        Block::Heading(title) => {
            let mut lines = text::wrap(title, columns);
            let underline = lines.iter().map(|l| text::display_width(l)).max().unwrap_or(0);
            if underline > 0 {
                lines.push("=".repeat(underline));
            }
            (lines, Vec::new())
        }
        Block::Paragraph(body) => (text::wrap(body, columns), Vec::new()),
        Block::Pre(body) => (
            body.lines().map(|l| text::truncate(l, columns)).collect(),
            Vec::new(),
        ),
        Block::Rule => (vec!["-".repeat(columns)], Vec::new()),
        Block::Grid(cells) => {
            let widths = grid::apply_grid_width(cells, columns);
            log::trace!("grid of {} cells -> {widths:?}", cells.len());
            (grid::render(cells, &widths, columns), widths)
        }
        Block::Table(table) => (table.lines(columns), table.column_widths(columns)),
        Block::Tree(tree) => (tree.lines(columns), Vec::new()),
        Block::Incremental(list) => (list.lines(columns), Vec::new()),
        Block::Media(media) => {
            let snapped = media.snap(columns, &state.cell);
            (media.lines(&snapped, columns), vec![snapped.columns])
        }
        Block::Form(fields) => layout_form(fields, columns),
        Block::Details { summary, body, open } => {
            let marker = if *open { "▼ " } else { "▶ " };
            let mut lines = vec![text::truncate(&format!("{marker}{summary}"), columns)];
            if *open {
                let indent = marker.chars().count();
                lines.extend(
                    text::wrap(body, columns.saturating_sub(indent))
                        .into_iter()
                        .map(|l| format!("{}{l}", " ".repeat(indent))),
                );
            }
            (lines, Vec::new())
        }
        Block::DebugToggle(label) => {
            let mark = if state.debug { 'x' } else { ' ' };
            (
                vec![text::truncate(&format!("[{mark}] {label}"), columns)],
                Vec::new(),
            )
        }
    }
}

/// Each field is a two-cell grid row: the label sized to the widest label and
/// a growing input.
fn layout_form(fields: &[FormField], columns: usize) -> (Vec<String>, Vec<usize>) {
    let label_width = fields
        .iter()
        .map(|f| text::display_width(&f.label) + 1)
        .max()
        .unwrap_or(0);
    let mut lines = Vec::with_capacity(fields.len());
    let mut widths = Vec::new();
    for field in fields {
        let cells = vec![
            GridCell::new(text::fit(&field.label, label_width)),
            GridCell::new("[]").grow(),
        ];
        widths = grid::apply_grid_width(&cells, columns);
        let input_width = widths[1];
        let input = if input_width >= 2 {
            format!("[{}]", text::fit(&field.value, input_width - 2))
        } else {
            String::new()
        };
        let line = format!("{}{input}", text::fit(&field.label, widths[0]));
        lines.push(text::fit(&line, columns));
    }
    (lines, widths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::FormField;
    use crate::incremental;
    use crate::media::Media;
    use crate::table::{Column, Model as Table, Row};
    use crate::tree::{Model as Tree, Node};

    fn cell() -> CharacterCell {
        CharacterCell::new(10.0, 20.0).unwrap()
    }

    fn state(width: f64) -> LayoutState {
        LayoutState::new(Viewport::new(width, 200.0), cell())
    }

    fn showcase() -> Document {
        Document::from_blocks(vec![
            Block::Heading("The Monospace Grid".into()),
            Block::Paragraph("Every element is a whole number of cells wide and lines tall.".into()),
            Block::Grid(vec![GridCell::new("a"), GridCell::new("b"), GridCell::new("c")]),
            Block::Table(
                Table::new(vec![
                    Column::new("Key").with_class("width-min"),
                    Column::new("Meaning").with_class("width-auto"),
                ])
                .with_rows(vec![Row::new(vec!["d".into(), "debug".into()])]),
            ),
            Block::Tree(Tree::new(vec![Node::new("root").with_children(vec![Node::new("leaf")])])),
            Block::Incremental({
                let mut l = incremental::Model::new(vec!["first".into(), "second".into()]);
                l.reveal_all();
                l
            }),
            Block::Media(Media::new("figure", 300.0, 150.0)),
            Block::Form(vec![FormField::new("Name", "Ada"), FormField::new("Email", "")]),
            Block::Details {
                summary: "More".into(),
                body: "Hidden text".into(),
                open: true,
            },
            Block::Pre("+---+\n| x |\n+---+".into()),
            Block::Rule,
            Block::DebugToggle("Debug mode".into()),
        ])
    }

    #[test]
    fn test_column_counts() {
        assert_eq!(compute_layout(&state(800.0), &Document::new()).columns, 80);
        assert_eq!(compute_layout(&state(805.0), &Document::new()).columns, 80);
        assert_eq!(compute_layout(&state(200.0), &Document::new()).rows, 10);
    }

    #[test]
    fn test_grid_block_widths() {
        let layout = compute_layout(&state(810.0), &showcase());
        let grid = layout.blocks.iter().find(|b| b.kind == "grid").unwrap();
        assert_eq!(grid.cell_widths, vec![27, 27, 27]);
        assert_eq!(grid.columns, 81);
    }

    #[test]
    fn test_no_block_overflows() {
        let doc = showcase();
        for width in [0.0, 5.0, 95.0, 200.0, 333.0, 805.0, 1200.0] {
            let layout = compute_layout(&state(width), &doc);
            for block in &layout.blocks {
                assert!(block.columns <= layout.columns, "{} at {width}", block.kind);
                for line in &block.lines {
                    assert!(text::display_width(line) <= layout.columns, "{} at {width}: {line:?}", block.kind);
                }
            }
        }
    }

    #[test]
    fn test_boxes_are_cell_multiples() {
        let c = cell();
        let layout = compute_layout(&state(805.0), &showcase());
        assert!(crate::debug::check_offsets(&layout.element_boxes(&c), &c).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let doc = showcase();
        let s = state(733.0);
        assert_eq!(compute_layout(&s, &doc), compute_layout(&s, &doc));
    }

    #[test]
    fn test_zero_width_viewport_collapses() {
        let layout = compute_layout(&state(5.0), &showcase());
        assert_eq!(layout.columns, 0);
        assert!(layout.blocks.iter().all(|b| b.columns == 0));
    }

    #[test]
    fn test_blocks_separated_by_gap() {
        let layout = compute_layout(&state(800.0), &showcase());
        for pair in layout.blocks.windows(2) {
            assert_eq!(pair[1].row, pair[0].row + pair[0].rows() + BLOCK_GAP);
        }
        assert_eq!(layout.lines().len(), layout.total_rows());
    }

    #[test]
    fn test_debug_toggle_reflects_state() {
        let doc = Document::from_blocks(vec![Block::DebugToggle("Debug mode".into())]);
        let mut s = state(400.0);
        assert_eq!(compute_layout(&s, &doc).blocks[0].lines, vec!["[ ] Debug mode"]);
        s.debug = true;
        assert_eq!(compute_layout(&s, &doc).blocks[0].lines, vec!["[x] Debug mode"]);
    }

    #[test]
    fn test_form_inputs_fill_width() {
        let doc = Document::from_blocks(vec![Block::Form(vec![
            FormField::new("Name", "Ada"),
            FormField::new("Email", ""),
        ])]);
        let layout = compute_layout(&state(200.0), &doc);
        assert_eq!(
            layout.blocks[0].lines,
            vec!["Name  [Ada         ]", "Email [            ]"]
        );
    }

    #[test]
    fn test_toc_lists_headings_as_tree() {
        let doc = Document::from_blocks(vec![
            Block::Toc("Contents".into()),
            Block::Heading("Grid".into()),
            Block::Paragraph("text".into()),
            Block::Heading("Tables".into()),
        ]);
        let layout = compute_layout(&state(400.0), &doc);
        assert_eq!(layout.blocks[0].kind, "toc");
        assert_eq!(
            layout.blocks[0].lines,
            vec!["Contents", "├── Grid", "└── Tables"]
        );
    }

    #[test]
    fn test_toc_without_headings_is_title_only() {
        let doc = Document::from_blocks(vec![Block::Toc("Contents".into())]);
        assert_eq!(compute_layout(&state(400.0), &doc).blocks[0].lines, vec!["Contents"]);
    }

    #[test]
    fn test_header_spans_full_width() {
        let front = crate::header::FrontMatter::from_toml_str(
            "title = \"Grid\"\nauthor = \"Ada\"\n",
        )
        .unwrap();
        let doc = Document::with_front_matter(&front, vec![Block::Heading("Intro".into())]);
        let layout = compute_layout(&state(120.0), &doc);
        let header = &layout.blocks[0];
        assert_eq!(header.kind, "header");
        assert_eq!(header.columns, 12);
        assert_eq!(header.cell_widths, vec![7, 5]);
        assert_eq!(header.lines, vec!["Grid     Ada", "============"]);
        assert_eq!(layout.blocks[1].lines, vec!["Contents", "└── Intro"]);
        assert!(crate::debug::check_offsets(&layout.element_boxes(&cell()), &cell()).is_empty());
    }

    #[test]
    fn test_media_caption_below_box() {
        let doc = Document::from_blocks(vec![Block::Media(Media::new("figure", 300.0, 150.0))]);
        let layout = compute_layout(&state(800.0), &doc);
        let media = &layout.blocks[0];
        // 300x150 at 10x20 cells: 30 columns, 8 lines, then the caption.
        assert_eq!(media.rows(), 9);
        assert_eq!(media.lines[8], "figure");
        assert_eq!(media.cell_widths, vec![30]);
    }

    #[test]
    fn test_details_closed_hides_body() {
        let doc = Document::from_blocks(vec![Block::Details {
            summary: "More".into(),
            body: "Hidden".into(),
            open: false,
        }]);
        assert_eq!(compute_layout(&state(200.0), &doc).blocks[0].lines, vec!["▶ More"]);
    }
}
