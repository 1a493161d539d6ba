//! Style configuration: the font metrics the grid is derived from.
//!
//! The stylesheet side of the page only needs to tell the layout engine how
//! big one glyph is. That is expressed here as a font size plus two ratios,
//! loadable from TOML:
//!
//! ```toml
//! font_family = "JetBrains Mono"
//! font_size_px = 16.0
//! advance_ratio = 0.6
//! line_height_ratio = 1.2
//! major_every = 8
//! ```

use crate::error::{Error, Result};
use crate::metrics::CharacterCell;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Font metrics and overlay settings for a monospace grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Monospace font stack, informational only.
    pub font_family: String,
    /// Font size in pixels.
    pub font_size_px: f64,
    /// Glyph advance as a fraction of the font size.
    pub advance_ratio: f64,
    /// Line height as a multiple of the font size.
    pub line_height_ratio: f64,
    /// Draw a major guideline every this many cells in the debug overlay.
    pub major_every: usize,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_family: "JetBrains Mono, monospace".to_string(),
            font_size_px: 16.0,
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
            major_every: 8,
        }
    }
}

impl StyleConfig {
    /// Parses a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("loaded style config from {}", path.display());
        Ok(config)
    }

    /// Derives the character cell from the font size and ratios.
    pub fn character_cell(&self) -> Result<CharacterCell> {
        CharacterCell::new(
            self.font_size_px * self.advance_ratio,
            self.font_size_px * self.line_height_ratio,
        )
    }
}
