//! Images and video snapped to the line grid.
//!
//! Media has an intrinsic pixel size that rarely matches the grid. It is scaled
//! down to fit the available width, keeping its aspect ratio, then padded at
//! the bottom so the box is a whole number of lines tall. Text that follows
//! therefore stays on the baseline grid. A figure's caption, taken from its alt
//! text, is set on whole lines below the box.
//!
//! ```rust
//! use monogrid::media::snap_media_height;
//! use monogrid::metrics::CharacterCell;
//!
//! let cell = CharacterCell::new(10.0, 20.0).unwrap();
//! let snapped = snap_media_height(400.0, 300.0, 200.0, &cell);
//! assert_eq!(snapped.width_px, 200.0);
//! assert_eq!(snapped.height_px, 150.0);
//! assert_eq!(snapped.lines, 8);
//! assert_eq!(snapped.padding_bottom_px, 10.0);
//! ```

use crate::metrics::{compute_column_count, CharacterCell};
use crate::text::{self, Sanitizer};

/// Tallest box media may occupy, in lines. Taller media is scaled down.
pub const MAX_MEDIA_LINES: usize = 1024;

/// Where a piece of media lands on the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnappedMedia {
    /// Rendered width in pixels after scaling.
    pub width_px: f64,
    /// Rendered height in pixels after scaling, before padding.
    pub height_px: f64,
    /// Padding added below so the box is a whole number of lines.
    pub padding_bottom_px: f64,
    /// Columns the box occupies.
    pub columns: usize,
    /// Lines the box occupies, padding included.
    pub lines: usize,
}

/// Scales media of intrinsic size `width × height` into `available_width_px`
/// and pads it to the next whole line.
///
/// Media is never scaled up. Degenerate sizes produce an empty box. Media that
/// would still be taller than [`MAX_MEDIA_LINES`] is scaled down until it fits.
pub fn snap_media_height(
    width: f64,
    height: f64,
    available_width_px: f64,
    cell: &CharacterCell,
) -> SnappedMedia {
    if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
        return SnappedMedia {
            width_px: 0.0,
            height_px: 0.0,
            padding_bottom_px: 0.0,
            columns: 0,
            lines: 0,
        };
    }
    let mut width_px = width.min(available_width_px.max(0.0));
    let mut height_px = height * width_px / width;
    let max_height_px = cell.rows_to_px(MAX_MEDIA_LINES);
    if height_px > max_height_px {
        log::debug!("media {width}x{height} capped at {MAX_MEDIA_LINES} lines");
        height_px = max_height_px;
        width_px = width * height_px / height;
    }
    let lines = cell.lines_covering(height_px).min(MAX_MEDIA_LINES);
    let padding_bottom_px = (cell.rows_to_px(lines) - height_px).max(0.0);

    let available_columns = compute_column_count(available_width_px, cell.width());
    let mut columns = compute_column_count(width_px, cell.width());
    if cell.columns_to_px(columns) < width_px {
        columns += 1;
    }

    SnappedMedia {
        width_px,
        height_px,
        padding_bottom_px,
        columns: columns.min(available_columns),
        lines,
    }
}

/// A figure: media plus its alt text, which doubles as the caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    /// Alt text, shown as the caption.
    pub alt: String,
    /// Intrinsic width in pixels.
    pub width: f64,
    /// Intrinsic height in pixels.
    pub height: f64,
}

impl Media {
    /// Creates a figure of the given intrinsic size.
    pub fn new(alt: impl Into<String>, width: f64, height: f64) -> Self {
        Self {
            alt: alt.into(),
            width,
            height,
        }
    }

    /// Returns the figure with its alt text on a single clean line.
    pub fn sanitized(mut self, inline: &Sanitizer) -> Self {
        self.alt = inline.sanitize_str(&self.alt);
        self
    }

    /// Snaps this figure into `available_columns` columns.
    pub fn snap(&self, available_columns: usize, cell: &CharacterCell) -> SnappedMedia {
        snap_media_height(self.width, self.height, cell.columns_to_px(available_columns), cell)
    }

    /// Draws the figure: a framed placeholder of the snapped size labelled
    /// with the intrinsic size, then the caption wrapped to `available`
    /// columns.
    pub fn lines(&self, snapped: &SnappedMedia, available: usize) -> Vec<String> {
        let mut out = self.frame(snapped);
        out.extend(self.caption(available));
        out
    }

    /// Caption lines. Empty when there is no alt text.
    pub fn caption(&self, available: usize) -> Vec<String> {
        if self.alt.trim().is_empty() {
            return Vec::new();
        }
        text::wrap(&self.alt, available)
    }

    fn frame(&self, snapped: &SnappedMedia) -> Vec<String> {
        let (w, h) = (snapped.columns, snapped.lines);
        if w < 2 || h < 2 {
            return vec![" ".repeat(w); h];
        }
        let inner = w - 2;
        let size = format!("{}×{}", self.width, self.height);
        let mut out = Vec::with_capacity(h);
        out.push(format!("┌{}┐", "─".repeat(inner)));
        for row in 0..h - 2 {
            let label = if row == 0 { size.as_str() } else { "" };
            out.push(format!("│{}│", text::fit(label, inner)));
        }
        out.push(format!("└{}┘", "─".repeat(inner)));
        out
    }
}
