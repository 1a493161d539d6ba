//! The page: event shell around the layout engine.
//!
//! The page owns the only mutable state in the crate: the viewport, the debug
//! checkbox and the reveal state of incremental lists. It reacts to two kinds
//! of event, viewport resizes and debug-toggle interaction (plus the reveal
//! keys of the focused incremental list), and after each one recomputes the
//! layout synchronously with [`compute_layout`].
//!
//! # Integration with Bubble Tea
//!
//! ```rust
//! use monogrid::document::{Block, Document};
//! use monogrid::page::{Model as Page, ResizeMsg};
//! use monogrid::debug::ToggleDebugMsg;
//! use bubbletea_rs::{Model as BubbleTeaModel, Msg};
//!
//! let doc = Document::from_blocks(vec![Block::Paragraph("Hello, grid.".into())]);
//! let mut page = Page::new(doc);
//!
//! page.update(Box::new(ResizeMsg { width_px: 800.0, height_px: 384.0 }) as Msg);
//! assert_eq!(page.layout().columns, 83);
//!
//! page.update(Box::new(ToggleDebugMsg) as Msg);
//! assert!(page.debug_enabled());
//! ```

use crate::config::StyleConfig;
use crate::debug::{self, check_offsets};
use crate::document::{Block, Document};
use crate::key::{self, KeyMap as KeyMapTrait};
use crate::layout::{compute_layout, Layout, LayoutState};
use crate::metrics::{CharacterCell, Viewport};
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg, WindowSizeMsg};
use lipgloss_extras::prelude::*;

/// Resize in pixels, as a browser reports it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeMsg {
    /// New viewport width in pixels.
    pub width_px: f64,
    /// New viewport height in pixels.
    pub height_px: f64,
}

/// Key bindings handled by the page itself.
#[derive(Debug, Clone)]
pub struct PageKeyMap {
    /// Move reveal focus to the next incremental list. Default key: Tab.
    pub next_list: key::Binding,
}

impl Default for PageKeyMap {
    fn default() -> Self {
        Self {
            next_list: key::new_binding(vec![
                key::with_keys_str(&["tab"]),
                key::with_help("tab", "next list"),
            ]),
        }
    }
}

impl KeyMapTrait for PageKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.next_list]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.next_list]]
    }
}

/// Styles applied to rendered lines. Styling never changes widths.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Header and heading text with their rules.
    pub heading: Style,
    /// The debug checkbox line.
    pub checkbox: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            heading: Style::new().bold(true),
            checkbox: Style::new().foreground(AdaptiveColor {
                Light: "#5A5A5A",
                Dark: "#A8A8A8",
            }),
        }
    }
}

/// A monospace page: document plus the state it is laid out under.
#[derive(Debug, Clone)]
pub struct Model {
    document: Document,
    viewport: Viewport,
    cell: CharacterCell,
    checkbox: debug::Model,
    focus: Option<usize>,
    layout: Layout,
    /// Page key bindings.
    pub keymap: PageKeyMap,
    /// Line styles.
    pub styles: Styles,
}

impl Model {
    /// A page with the default cell and an 80 × 24 cell viewport.
    pub fn new(document: Document) -> Self {
        let cell = CharacterCell::default();
        Self::with_cell(document, cell)
    }

    /// A page using the metrics of `config`.
    pub fn with_config(document: Document, config: &StyleConfig) -> crate::Result<Self> {
        let cell = config.character_cell()?;
        let mut page = Self::with_cell(document, cell);
        page.checkbox = page.checkbox.clone().with_major_every(config.major_every);
        Ok(page)
    }

    fn with_cell(document: Document, cell: CharacterCell) -> Self {
        let focus = document.incremental_indices().first().copied();
        let checkbox = match document.blocks().iter().find_map(|b| match b {
            Block::DebugToggle(label) => Some(label.clone()),
            _ => None,
        }) {
            Some(label) => debug::Model::new().with_label(label),
            None => debug::Model::new(),
        };
        let viewport = Viewport::from_cells(80, 24, &cell);
        let state = LayoutState::new(viewport, cell);
        let layout = compute_layout(&state, &document);
        Self {
            document,
            viewport,
            cell,
            checkbox,
            focus,
            layout,
            keymap: PageKeyMap::default(),
            styles: Styles::default(),
        }
    }

    /// The state the current layout was computed from.
    pub fn state(&self) -> LayoutState {
        LayoutState {
            viewport: self.viewport,
            cell: self.cell,
            debug: self.checkbox.checked(),
        }
    }

    /// The current layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Whether the debug overlay is shown.
    pub fn debug_enabled(&self) -> bool {
        self.checkbox.checked()
    }

    /// Index of the incremental list that receives reveal keys.
    pub fn focused_list(&self) -> Option<usize> {
        self.focus
    }

    /// Sets the viewport in pixels and relayouts.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.relayout();
    }

    /// Flips the debug overlay and relayouts. Returns the new state.
    pub fn toggle_debug(&mut self) -> bool {
        let on = self.checkbox.toggle();
        self.relayout();
        on
    }

    /// Moves reveal focus to the next incremental list, wrapping around.
    pub fn focus_next_list(&mut self) {
        let lists = self.document.incremental_indices();
        self.focus = match self.focus.and_then(|f| lists.iter().position(|i| *i == f)) {
            Some(pos) => lists.get((pos + 1) % lists.len()).copied(),
            None => lists.first().copied(),
        };
    }

    fn relayout(&mut self) {
        self.layout = compute_layout(&self.state(), &self.document);
        if self.layout.debug {
            let off = check_offsets(&self.layout.element_boxes(&self.cell), &self.cell);
            if !off.is_empty() {
                log::warn!("{} blocks off the grid", off.len());
            }
        }
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> bool {
        if self.keymap.next_list.matches(key_msg) {
            self.focus_next_list();
            return false;
        }
        let Some(index) = self.focus else {
            return false;
        };
        match self.document.block_mut(index) {
            Some(Block::Incremental(list)) => list.handle_key(key_msg),
            _ => false,
        }
    }

    /// Renders the page lines with the overlay composed in when enabled.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.layout.lines();
        if self.layout.debug {
            let rows = self.layout.rows;
            let mut composed = debug::compose(
                &lines,
                self.layout.columns,
                rows,
                self.checkbox.major_every,
            );
            if lines.len() > rows {
                composed.extend(lines.drain(rows..));
            }
            lines = composed;
        }
        lines
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(Document::new()), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(size) = msg.downcast_ref::<WindowSizeMsg>() {
            self.resize(Viewport::from_cells(
                size.width as usize,
                size.height as usize,
                &self.cell,
            ));
            return None;
        }
        if let Some(size) = msg.downcast_ref::<ResizeMsg>() {
            self.resize(Viewport::new(size.width_px, size.height_px));
            return None;
        }
        if self.checkbox.handle(&msg) {
            self.relayout();
            return None;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.handle_key(key_msg) {
                self.relayout();
            }
        }
        None
    }

    fn view(&self) -> String {
        let headings: Vec<usize> = self
            .layout
            .blocks
            .iter()
            .filter(|b| matches!(b.kind, "heading" | "header"))
            .flat_map(|b| b.row..b.row + b.rows())
            .collect();
        let checkboxes: Vec<usize> = self
            .layout
            .blocks
            .iter()
            .filter(|b| b.kind == "debug-toggle")
            .map(|b| b.row)
            .collect();

        self.lines()
            .iter()
            .enumerate()
            .map(|(row, line)| {
                if headings.contains(&row) {
                    self.styles.heading.clone().render(line)
                } else if checkboxes.contains(&row) {
                    self.styles.checkbox.clone().render(line)
                } else {
                    line.clone()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
