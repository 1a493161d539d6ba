//! The debug grid overlay and its toggle.
//!
//! The overlay draws a mark in every character cell of the viewport so the
//! grid alignment of the content can be checked by eye. It is controlled by a
//! checkbox: the state starts unchecked, only changes through interaction and
//! is never persisted.
//!
//! While the overlay is on, [`check_offsets`] can be used to report element
//! boxes whose pixel position or size is off the grid.
//!
//! ```rust
//! use monogrid::debug::{guidelines, toggle_debug_overlay};
//!
//! assert!(toggle_debug_overlay(false));
//! assert!(!toggle_debug_overlay(toggle_debug_overlay(false)));
//!
//! assert_eq!(guidelines(10, 1, 4), vec!["+···+···+·"]);
//! ```

use crate::key::{self, KeyMap as KeyMapTrait};
use crate::metrics::CharacterCell;
use crate::text;
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

const MAJOR_MARK: char = '+';
const MINOR_MARK: char = '·';

/// Flips the overlay state.
pub fn toggle_debug_overlay(current: bool) -> bool {
    !current
}

/// Guideline marks for a `columns × rows` grid: a major mark every
/// `major_every` columns and a minor mark in every other cell. A
/// `major_every` of 0 draws minor marks only.
pub fn guidelines(columns: usize, rows: usize, major_every: usize) -> Vec<String> {
    let line: String = (0..columns).map(|col| mark(col, major_every)).collect();
    vec![line; rows]
}

fn mark(column: usize, major_every: usize) -> char {
    if major_every > 0 && column % major_every == 0 {
        MAJOR_MARK
    } else {
        MINOR_MARK
    }
}

/// Lays guideline marks under `content`: every blank cell of the content shows
/// the mark of its column. The result is exactly `columns × rows` cells; a
/// wide glyph covers the marks of both cells it spans.
pub fn compose(content: &[String], columns: usize, rows: usize, major_every: usize) -> Vec<String> {
    (0..rows)
        .map(|row| {
            let line = content.get(row).map(String::as_str).unwrap_or("");
            let line = text::fit(line, columns);
            let mut out = String::with_capacity(line.len());
            let mut column = 0;
            for g in line.graphemes(true) {
                if g == " " {
                    out.push(mark(column, major_every));
                } else {
                    out.push_str(g);
                }
                column += UnicodeWidthStr::width(g);
            }
            out
        })
        .collect()
}

/// A named element box in pixels, as measured by the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementBox {
    /// Identifies the element in reports.
    pub name: String,
    /// Left edge in pixels.
    pub x: f64,
    /// Top edge in pixels.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ElementBox {
    /// Creates a box.
    pub fn new(name: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
        }
    }
}

/// An element found off the grid, and along which edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffGrid {
    /// The element's name.
    pub name: String,
    /// Left edge not on a column boundary.
    pub x: bool,
    /// Top edge not on a line boundary.
    pub y: bool,
    /// Width not a whole number of columns.
    pub width: bool,
    /// Height not a whole number of lines.
    pub height: bool,
}

/// Reports every box whose position or size is not a whole multiple of the
/// cell. Each report is also logged at `warn`.
pub fn check_offsets(boxes: &[ElementBox], cell: &CharacterCell) -> Vec<OffGrid> {
    boxes
        .iter()
        .filter_map(|b| {
            let report = OffGrid {
                name: b.name.clone(),
                x: !cell.is_column_aligned(b.x),
                y: !cell.is_row_aligned(b.y),
                width: !cell.is_column_aligned(b.width),
                height: !cell.is_row_aligned(b.height),
            };
            if report.x || report.y || report.width || report.height {
                log::warn!(
                    "{} is off the grid at ({}, {}) size {}x{}",
                    b.name,
                    b.x,
                    b.y,
                    b.width,
                    b.height
                );
                Some(report)
            } else {
                None
            }
        })
        .collect()
}

/// Sent to flip the overlay programmatically, as a checkbox change would.
#[derive(Debug, Clone, Copy)]
pub struct ToggleDebugMsg;

/// Key bindings for the debug checkbox.
#[derive(Debug, Clone)]
pub struct DebugKeyMap {
    /// Toggle the overlay. Default keys: `d`, Space.
    pub toggle: key::Binding,
}

impl Default for DebugKeyMap {
    fn default() -> Self {
        Self {
            toggle: key::new_binding(vec![
                key::with_keys_str(&["d", "space"]),
                key::with_help("d", "debug grid"),
            ]),
        }
    }
}

impl KeyMapTrait for DebugKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.toggle]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.toggle]]
    }
}

/// The `debug-toggle` checkbox with its `debug-toggle-label`.
#[derive(Debug, Clone)]
pub struct Model {
    checked: bool,
    /// Label drawn after the box.
    pub label: String,
    /// Major guideline spacing in columns.
    pub major_every: usize,
    /// Key bindings.
    pub keymap: DebugKeyMap,
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}

impl Model {
    /// An unchecked checkbox labelled "Debug mode".
    pub fn new() -> Self {
        Self {
            checked: false,
            label: "Debug mode".to_string(),
            major_every: 8,
            keymap: DebugKeyMap::default(),
        }
    }

    /// Sets the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the major guideline spacing.
    pub fn with_major_every(mut self, major_every: usize) -> Self {
        self.major_every = major_every;
        self
    }

    /// Whether the overlay is shown.
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Flips the checkbox and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.checked = toggle_debug_overlay(self.checked);
        log::debug!("debug overlay {}", if self.checked { "on" } else { "off" });
        self.checked
    }

    /// The checkbox line, clipped to `available` columns.
    pub fn checkbox_line(&self, available: usize) -> String {
        let mark = if self.checked { 'x' } else { ' ' };
        text::truncate(&format!("[{mark}] {}", self.label), available)
    }

    /// The overlay for a `columns × rows` viewport, or `None` while unchecked.
    pub fn overlay(&self, columns: usize, rows: usize) -> Option<Vec<String>> {
        self.checked
            .then(|| guidelines(columns, rows, self.major_every))
    }

    /// Handles a message, returning whether the state changed.
    pub fn handle(&mut self, msg: &Msg) -> bool {
        let toggled = msg.downcast_ref::<ToggleDebugMsg>().is_some()
            || msg
                .downcast_ref::<KeyMsg>()
                .is_some_and(|k| self.keymap.toggle.matches(k));
        if toggled {
            self.toggle();
        }
        toggled
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.handle(&msg);
        None
    }

    fn view(&self) -> String {
        self.checkbox_line(usize::MAX)
    }
}
