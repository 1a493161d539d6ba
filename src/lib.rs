#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/monogrid/")]

//! # monogrid
//!
//! Monospace grid layout for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications: text, lists, tables, forms, diagrams and media aligned to a
//! fixed-width character grid.
//!
//! ## Overview
//!
//! Every box on a monospace page is a whole number of character cells wide and
//! a whole number of lines tall. monogrid computes those boxes. Given the pixel
//! size of one glyph and the pixel size of the viewport it works out how many
//! columns fit, shares them among the children of `grid` containers, sizes
//! table columns from `width-min`/`width-auto` hints and snaps media to the
//! line grid. A debug overlay, toggled by a checkbox, marks every cell so the
//! alignment can be verified by eye.
//!
//! Layout is a pure function of explicit state. The [`page::Model`] event shell
//! owns that state, updates it on resize and toggle messages, and calls
//! [`layout::compute_layout`] again.
//!
//! ## Quick Start
//!
//! ```rust
//! use monogrid::prelude::*;
//! use bubbletea_rs::{Model as BubbleTeaModel, Msg};
//!
//! let doc = Document::from_blocks(vec![
//!     Block::Heading("Monospace".into()),
//!     Block::Grid(vec![GridCell::new("one"), GridCell::new("two"), GridCell::new("three")]),
//!     Block::DebugToggle("Debug mode".into()),
//! ]);
//! let mut page = Page::new(doc);
//! page.update(Box::new(ResizeMsg { width_px: 780.0, height_px: 480.0 }) as Msg);
//!
//! assert_eq!(page.layout().columns, 81);
//! assert_eq!(page.layout().blocks[1].cell_widths, vec![27, 27, 27]);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`metrics`] | Character cell, viewport, column counts |
//! | [`grid`] | Even column distribution for `grid` containers |
//! | [`table`] | `width-min` / `width-auto` column sizing |
//! | [`tree`] | Nested lists with connectors instead of bullets |
//! | [`incremental`] | Lists revealed one item at a time |
//! | [`media`] | Media snapped to whole lines, with captions |
//! | [`header`] | Page header and front matter |
//! | [`debug`] | Overlay toggle, guidelines, off-grid checks |
//! | [`role`] | Typed class markers |
//! | [`layout`] | The pure layout function |
//! | [`page`] | Event shell |
//! | [`config`] | Font metrics from TOML |

pub mod config;
pub mod debug;
pub mod document;
pub mod error;
pub mod grid;
pub mod header;
pub mod incremental;
pub mod key;
pub mod layout;
pub mod media;
pub mod metrics;
pub mod page;
pub mod role;
pub mod table;
pub mod text;
pub mod tree;

pub use config::StyleConfig;
pub use debug::{check_offsets, toggle_debug_overlay, ToggleDebugMsg};
pub use document::{Block, Document, FormField};
pub use error::{Error, Result};
pub use grid::{apply_grid_width, GridCell};
pub use header::FrontMatter;
pub use layout::{compute_layout, Layout, LayoutState};
pub use metrics::{compute_column_count, CharacterCell, Viewport};
pub use page::{Model as Page, ResizeMsg};
pub use role::{LayoutRole, LayoutRule};

/// Prelude module for convenient imports.
///
/// ```rust
/// use monogrid::prelude::*;
///
/// assert_eq!(compute_column_count(800.0, 10.0), 80);
/// ```
pub mod prelude {
    pub use crate::config::StyleConfig;
    pub use crate::debug::{check_offsets, toggle_debug_overlay, ElementBox, ToggleDebugMsg};
    pub use crate::document::{Block, Document, FormField};
    pub use crate::error::Error;
    pub use crate::grid::{apply_grid_width, GridCell};
    pub use crate::header::{FrontMatter, Header};
    pub use crate::incremental::Model as IncrementalList;
    pub use crate::key::{Binding, KeyMap, KeyPress};
    pub use crate::layout::{compute_layout, Layout, LayoutState};
    pub use crate::media::{snap_media_height, Media};
    pub use crate::metrics::{compute_column_count, CharacterCell, Viewport};
    pub use crate::page::{Model as Page, ResizeMsg};
    pub use crate::role::{LayoutRole, LayoutRule};
    pub use crate::table::{Column, ColumnSizing, Model as Table, Row};
    pub use crate::tree::{Model as Tree, Node};
}
