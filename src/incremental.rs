//! Ordered lists revealed one item at a time.
//!
//! An `incremental` list starts with nothing shown. Each reveal adds the next
//! item. Number markers are right-aligned to the widest marker the list will
//! ever need, so item text starts on the same column before and after every
//! reveal and long items wrap with a hanging indent onto that column.
//!
//! ```rust
//! use monogrid::incremental::Model;
//!
//! let mut list = Model::new(vec!["Measure the glyph".into(), "Count the columns".into()]);
//! assert!(list.lines(40).is_empty());
//!
//! list.reveal_next();
//! assert_eq!(list.lines(40), vec!["1. Measure the glyph"]);
//! ```

use crate::key::{self, KeyMap as KeyMapTrait};
use crate::text::{self, Sanitizer};
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};

/// Key bindings for revealing and hiding items.
#[derive(Debug, Clone)]
pub struct IncrementalKeyMap {
    /// Reveal the next item. Default keys: `n`, Right Arrow.
    pub reveal: key::Binding,
    /// Hide the last revealed item. Default keys: `p`, Left Arrow.
    pub hide: key::Binding,
}

impl Default for IncrementalKeyMap {
    fn default() -> Self {
        Self {
            reveal: key::new_binding(vec![
                key::with_keys_str(&["n", "right"]),
                key::with_help("→/n", "reveal next"),
            ]),
            hide: key::new_binding(vec![
                key::with_keys_str(&["p", "left"]),
                key::with_help("←/p", "hide last"),
            ]),
        }
    }
}

impl KeyMapTrait for IncrementalKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.reveal, &self.hide]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.reveal, &self.hide]]
    }
}

/// An incrementally revealed ordered list.
#[derive(Debug, Clone, Default)]
pub struct Model {
    items: Vec<String>,
    revealed: usize,
    /// Columns used by [`BubbleTeaModel::view`]. Layout passes its own width.
    pub width: usize,
    /// Key bindings.
    pub keymap: IncrementalKeyMap,
}

impl Model {
    /// Creates a list with every item hidden.
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            revealed: 0,
            width: 80,
            keymap: IncrementalKeyMap::default(),
        }
    }

    /// Returns the list with every item passed through `sanitizer`. Reveal
    /// state is kept.
    pub fn sanitized(mut self, sanitizer: &Sanitizer) -> Self {
        self.items = self.items.iter().map(|i| sanitizer.sanitize_str(i)).collect();
        self
    }

    /// Number of items currently shown.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Total number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether every item is shown.
    pub fn fully_revealed(&self) -> bool {
        self.revealed == self.items.len()
    }

    /// Shows one more item. Returns `false` if all were already shown.
    pub fn reveal_next(&mut self) -> bool {
        if self.fully_revealed() {
            return false;
        }
        self.revealed += 1;
        true
    }

    /// Hides the last shown item. Returns `false` if none was shown.
    pub fn hide_last(&mut self) -> bool {
        if self.revealed == 0 {
            return false;
        }
        self.revealed -= 1;
        true
    }

    /// Shows every item.
    pub fn reveal_all(&mut self) {
        self.revealed = self.items.len();
    }

    /// Hides every item.
    pub fn reset(&mut self) {
        self.revealed = 0;
    }

    /// Columns taken by the widest marker, `"N. "`.
    pub fn marker_width(&self) -> usize {
        self.items.len().max(1).to_string().len() + 2
    }

    /// Renders the revealed items within `available` columns.
    pub fn lines(&self, available: usize) -> Vec<String> {
        let marker_width = self.marker_width();
        let body_width = available.saturating_sub(marker_width);
        let mut out = Vec::new();
        for (i, item) in self.items.iter().take(self.revealed).enumerate() {
            let marker = text::fit_right(&format!("{}. ", i + 1), marker_width);
            let mut body = text::wrap(item, body_width);
            if body.is_empty() {
                body.push(String::new());
            }
            for (j, line) in body.iter().enumerate() {
                let lead = if j == 0 { marker.clone() } else { " ".repeat(marker_width) };
                out.push(text::truncate(format!("{lead}{line}").trim_end(), available));
            }
        }
        out
    }

    /// Handles a key press, returning whether it changed the list.
    pub fn handle_key(&mut self, msg: &KeyMsg) -> bool {
        if self.keymap.reveal.matches(msg) {
            self.reveal_next()
        } else if self.keymap.hide.matches(msg) {
            self.hide_last()
        } else {
            false
        }
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(Vec::new()), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            self.handle_key(key_msg);
        }
        None
    }

    fn view(&self) -> String {
        self.lines(self.width).join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn items(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("item {i}")).collect()
    }

    fn press(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg
    }

    #[test]
    fn test_reveal_and_hide_bounds() {
        let mut list = Model::new(items(2));
        assert!(!list.hide_last());
        assert!(list.reveal_next());
        assert!(list.reveal_next());
        assert!(!list.reveal_next());
        assert!(list.fully_revealed());
        list.reset();
        assert_eq!(list.revealed(), 0);
    }

    #[test]
    fn test_markers_align_for_two_digit_lists() {
        let mut list = Model::new(items(10));
        list.reveal_all();
        let lines = list.lines(40);
        assert_eq!(lines[0], " 1. item 1");
        assert_eq!(lines[9], "10. item 10");
    }

    #[test]
    fn test_text_column_stable_across_reveals() {
        let mut list = Model::new(items(12));
        list.reveal_next();
        let before = list.lines(40)[0].find('i');
        list.reveal_all();
        assert_eq!(list.lines(40)[0].find('i'), before);
    }

    #[test]
    fn test_hanging_indent() {
        let mut list = Model::new(vec!["alpha beta gamma".into()]);
        list.reveal_all();
        assert_eq!(list.lines(14), vec!["1. alpha beta", "   gamma"]);
    }

    #[test]
    fn test_sanitized_items() {
        let mut list = Model::new(vec!["a\tb\x07c\nd".into()]);
        list.reveal_next();
        let list = list.sanitized(&text::new_sanitizer(vec![]));
        assert_eq!(list.revealed(), 1);
        assert_eq!(list.lines(20), vec!["1. a bc", "   d"]);
    }

    #[test]
    fn test_keys_drive_reveal() {
        let mut list = Model::new(items(3));
        list.update(press(KeyCode::Char('n')));
        list.update(press(KeyCode::Right));
        assert_eq!(list.revealed(), 2);
        list.update(press(KeyCode::Left));
        assert_eq!(list.revealed(), 1);
        list.update(press(KeyCode::Char('x')));
        assert_eq!(list.revealed(), 1);
    }

    #[test]
    fn test_narrow_width_never_overflows() {
        let mut list = Model::new(items(3));
        list.reveal_all();
        for width in 0..12 {
            for line in list.lines(width) {
                assert!(text::display_width(&line) <= width);
            }
        }
    }
}
