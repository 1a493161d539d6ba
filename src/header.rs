//! Page header and front matter.
//!
//! A monospace page opens with a header naming the document and its author,
//! followed by a table of contents. Both are driven by front matter, read here
//! from TOML:
//!
//! ```toml
//! title = "The Monospace Web"
//! subtitle = "A minimalist design exploration"
//! author = "Oskar Wickström"
//! author-url = "https://wickstrom.tech"
//! toc-title = "Contents"
//! ```
//!
//! The header is laid out as a two-cell grid row: title and subtitle in a
//! growing left cell, author and URL on the right behind a two-column gutter,
//! closed by a full-width `=` rule.
//!
//! ```rust
//! use monogrid::header::FrontMatter;
//!
//! let front = FrontMatter::from_toml_str("title = \"Grid\"\nauthor = \"Ada\"\n").unwrap();
//! assert_eq!(front.toc_title, "Contents");
//! assert_eq!(front.header().lines(12), vec!["Grid     Ada", "============"]);
//! ```

use crate::error::Result;
use crate::grid::{self, GridCell};
use crate::text::Sanitizer;
use serde::{Deserialize, Serialize};

const GUTTER: &str = "  ";

/// Document metadata that drives the header and the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FrontMatter {
    /// Document title.
    pub title: String,
    /// Line under the title; empty for none.
    pub subtitle: String,
    /// Author name; empty for none.
    pub author: String,
    /// Link shown under the author; empty for none.
    pub author_url: String,
    /// Title of the table of contents.
    pub toc_title: String,
}

impl Default for FrontMatter {
    fn default() -> Self {
        Self {
            title: "The Monospace Web".to_string(),
            subtitle: String::new(),
            author: String::new(),
            author_url: String::new(),
            toc_title: "Contents".to_string(),
        }
    }
}

impl FrontMatter {
    /// Parses front matter from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// The header block content.
    pub fn header(&self) -> Header {
        Header {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            author: self.author.clone(),
            author_url: self.author_url.clone(),
        }
    }
}

/// The page header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    /// Document title.
    pub title: String,
    /// Line under the title.
    pub subtitle: String,
    /// Author name.
    pub author: String,
    /// Author link.
    pub author_url: String,
}

impl Header {
    /// Returns the header with every field on a single clean line.
    pub fn sanitized(self, inline: &Sanitizer) -> Self {
        Self {
            title: inline.sanitize_str(&self.title),
            subtitle: inline.sanitize_str(&self.subtitle),
            author: inline.sanitize_str(&self.author),
            author_url: inline.sanitize_str(&self.author_url),
        }
    }

    fn cells(&self) -> Vec<GridCell> {
        let left = join_present(&[self.title.as_str(), self.subtitle.as_str()]);
        let right = join_present(&[self.author.as_str(), self.author_url.as_str()]);
        let mut cells = vec![GridCell::new(left).grow()];
        if !right.is_empty() {
            let right: Vec<String> = right.lines().map(|l| format!("{GUTTER}{l}")).collect();
            cells.push(GridCell::new(right.join("\n")));
        }
        cells
    }

    /// Per-cell widths in `columns`.
    pub fn cell_widths(&self, columns: usize) -> Vec<usize> {
        grid::apply_grid_width(&self.cells(), columns)
    }

    /// Renders the header rows and the closing rule, each exactly `columns`
    /// wide. Nothing is drawn at zero columns.
    pub fn lines(&self, columns: usize) -> Vec<String> {
        if columns == 0 {
            return Vec::new();
        }
        let cells = self.cells();
        let widths = grid::apply_grid_width(&cells, columns);
        let mut lines = grid::render(&cells, &widths, columns);
        lines.push("=".repeat(columns));
        lines
    }
}

fn join_present(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text;

    fn front() -> FrontMatter {
        FrontMatter::from_toml_str(
            "title = \"The Monospace Web\"\n\
             subtitle = \"A grid study\"\n\
             author = \"Oskar\"\n\
             author-url = \"https://x.y\"\n\
             toc-title = \"On this page\"\n",
        )
        .unwrap()
    }

    #[test]
    fn test_kebab_case_keys() {
        let f = front();
        assert_eq!(f.author_url, "https://x.y");
        assert_eq!(f.toc_title, "On this page");
    }

    #[test]
    fn test_defaults() {
        let f = FrontMatter::from_toml_str("").unwrap();
        assert_eq!(f, FrontMatter::default());
        assert_eq!(f.title, "The Monospace Web");
        assert!(FrontMatter::from_toml_str("title = 3").is_err());
    }

    #[test]
    fn test_two_cell_row() {
        let h = front().header();
        // Right cell is "  https://x.y", 13 columns; the title cell grows.
        assert_eq!(h.cell_widths(40), vec![27, 13]);
        assert_eq!(
            h.lines(40),
            vec![
                "The Monospace Web            Oskar      ",
                "A grid study                 https://x.y",
                "========================================",
            ]
        );
    }

    #[test]
    fn test_every_line_is_full_width() {
        let h = front().header();
        for columns in [0, 1, 5, 17, 30, 80] {
            for line in h.lines(columns) {
                assert_eq!(text::display_width(&line), columns);
            }
        }
    }

    #[test]
    fn test_title_only() {
        let h = Header {
            title: "Grid".into(),
            ..Header::default()
        };
        assert_eq!(h.lines(6), vec!["Grid  ", "======"]);
    }

    #[test]
    fn test_sanitized_fields() {
        let sanitizer = text::new_sanitizer(vec![text::replace_newlines(" ")]);
        let h = Header {
            title: "a\nb".into(),
            author: "c\td".into(),
            ..Header::default()
        }
        .sanitized(&sanitizer);
        assert_eq!(h.title, "a b");
        assert_eq!(h.author, "c    d");
    }
}
