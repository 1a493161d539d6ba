//! Character cell metrics and viewport arithmetic.
//!
//! Everything in monogrid is measured in whole character cells. This module
//! holds the two pixel quantities the rest of the crate is derived from, the
//! [`Viewport`] and the [`CharacterCell`], and the functions that convert
//! between pixels and cells.
//!
//! # Examples
//!
//! ```rust
//! use monogrid::metrics::{compute_column_count, CharacterCell, Viewport};
//!
//! assert_eq!(compute_column_count(800.0, 10.0), 80);
//! assert_eq!(compute_column_count(805.0, 10.0), 80);
//!
//! let cell = CharacterCell::new(10.0, 20.0).unwrap();
//! let viewport = Viewport::new(805.0, 410.0);
//! assert_eq!(viewport.columns(&cell), 80);
//! assert_eq!(viewport.rows(&cell), 20);
//! ```

use crate::error::{Error, Result};

/// Size of the rendering surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Viewport {
    /// Creates a viewport of the given pixel size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Creates the viewport that exactly covers `columns × rows` cells.
    ///
    /// Terminals report their size in cells rather than pixels; this maps such
    /// a report back into pixel space.
    pub fn from_cells(columns: usize, rows: usize, cell: &CharacterCell) -> Self {
        Self {
            width: cell.columns_to_px(columns),
            height: cell.rows_to_px(rows),
        }
    }

    /// Number of whole columns that fit horizontally.
    pub fn columns(&self, cell: &CharacterCell) -> usize {
        compute_column_count(self.width, cell.width)
    }

    /// Number of whole lines that fit vertically.
    pub fn rows(&self, cell: &CharacterCell) -> usize {
        compute_row_count(self.height, cell.height)
    }
}

/// The pixel box of a single monospace glyph.
///
/// `width` is the glyph advance and `height` is the line height. Both are
/// guaranteed finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterCell {
    width: f64,
    height: f64,
}

impl CharacterCell {
    /// Creates a cell, rejecting non-finite or non-positive dimensions.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        if !is_positive(width) || !is_positive(height) {
            log::warn!("rejecting character cell {width}x{height}");
            return Err(Error::InvalidMetrics { width, height });
        }
        Ok(Self { width, height })
    }

    /// Glyph advance width in pixels.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Line height in pixels.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Pixel width of `columns` cells.
    pub fn columns_to_px(&self, columns: usize) -> f64 {
        columns as f64 * self.width
    }

    /// Pixel height of `rows` lines.
    pub fn rows_to_px(&self, rows: usize) -> f64 {
        rows as f64 * self.height
    }

    /// Smallest number of lines whose height is at least `px`.
    pub fn lines_covering(&self, px: f64) -> usize {
        if !is_positive(px) {
            return 0;
        }
        let lines = compute_row_count(px, self.height);
        if self.rows_to_px(lines) < px {
            lines + 1
        } else {
            lines
        }
    }

    /// Whether `px` is a whole multiple of the cell width.
    pub fn is_column_aligned(&self, px: f64) -> bool {
        is_multiple(px, self.width)
    }

    /// Whether `px` is a whole multiple of the line height.
    pub fn is_row_aligned(&self, px: f64) -> bool {
        is_multiple(px, self.height)
    }
}

impl Default for CharacterCell {
    /// A 16px font with a 0.6 advance and 1.2 line height.
    fn default() -> Self {
        Self {
            width: 9.6,
            height: 19.2,
        }
    }
}

/// Returns how many whole cells of `cell_width_px` fit in `viewport_width_px`.
///
/// This is `floor(viewport / cell)`, corrected for floating-point rounding so
/// that `result * cell_width_px <= viewport_width_px` always holds. Inputs that
/// are not finite or not positive give 0.
pub fn compute_column_count(viewport_width_px: f64, cell_width_px: f64) -> usize {
    whole_cells(viewport_width_px, cell_width_px)
}

/// Vertical counterpart of [`compute_column_count`].
pub fn compute_row_count(viewport_height_px: f64, line_height_px: f64) -> usize {
    whole_cells(viewport_height_px, line_height_px)
}

fn whole_cells(extent: f64, quantum: f64) -> usize {
    if !is_positive(extent) || !is_positive(quantum) {
        return 0;
    }
    let quotient = extent / quantum;
    if !quotient.is_finite() || quotient >= MAX_EXACT {
        // Past 2^53 consecutive counts are no longer distinct floats.
        log::debug!("{extent}/{quantum} saturates the cell count");
        return saturate(quotient);
    }
    let mut n = quotient.floor();
    // The rounded quotient is at most one off in either direction.
    if n > 0.0 && n * quantum > extent {
        n -= 1.0;
    } else if (n + 1.0) * quantum <= extent {
        n += 1.0;
    }
    n as usize
}

/// 2^53, the first integer above which `f64` cannot count by ones.
const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

fn saturate(quotient: f64) -> usize {
    if quotient.is_finite() {
        // `as` saturates at `usize::MAX`.
        quotient as usize
    } else {
        usize::MAX
    }
}

fn is_positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn is_multiple(px: f64, quantum: f64) -> bool {
    if !px.is_finite() {
        return false;
    }
    let ratio = px / quantum;
    (ratio - ratio.round()).abs() < 1e-6
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_count_scenarios() {
        assert_eq!(compute_column_count(800.0, 10.0), 80);
        assert_eq!(compute_column_count(805.0, 10.0), 80);
        assert_eq!(compute_column_count(809.999, 10.0), 80);
        assert_eq!(compute_column_count(810.0, 10.0), 81);
    }

    #[test]
    fn test_column_count_never_overflows() {
        for cell in [0.1, 0.7, 3.0, 7.3, 9.6, 10.0, 12.5] {
            for w in 0..2000 {
                let w = w as f64 * 0.37;
                let n = compute_column_count(w, cell);
                assert!(n as f64 * cell <= w, "w={w} cell={cell} n={n}");
                assert!((n + 1) as f64 * cell > w, "w={w} cell={cell} n={n}");
            }
        }
    }

    #[test]
    fn test_fractional_cell_exact_multiple() {
        assert_eq!(compute_column_count(960.0, 9.6), 100);
        assert_eq!(compute_column_count(19.2 * 3.0, 19.2), 3);
    }

    #[test]
    fn test_viewport_narrower_than_cell() {
        assert_eq!(compute_column_count(9.0, 10.0), 0);
        assert_eq!(compute_column_count(0.0, 10.0), 0);
    }

    #[test]
    fn test_degenerate_inputs_give_zero() {
        assert_eq!(compute_column_count(-5.0, 10.0), 0);
        assert_eq!(compute_column_count(100.0, 0.0), 0);
        assert_eq!(compute_column_count(100.0, -1.0), 0);
        assert_eq!(compute_column_count(f64::NAN, 10.0), 0);
        assert_eq!(compute_column_count(100.0, f64::INFINITY), 0);
    }

    #[test]
    fn test_huge_quotients_saturate() {
        assert_eq!(compute_column_count(1e300, 1e-300), usize::MAX);
        assert_eq!(compute_column_count(f64::MAX, f64::MIN_POSITIVE), usize::MAX);
        assert_eq!(compute_row_count(1e300, 1e-300), usize::MAX);
        let big = compute_column_count(1e20, 1.0);
        assert!(big as f64 >= 1e19);
    }

    #[test]
    fn test_just_below_exact_limit() {
        assert_eq!(compute_column_count(4_503_599_627_370_496.0, 1.0), 1 << 52);
        assert_eq!(compute_column_count(1_000_000.5, 0.5), 2_000_001);
    }

    #[test]
    fn test_cell_rejects_bad_metrics() {
        assert!(CharacterCell::new(0.0, 10.0).is_err());
        assert!(CharacterCell::new(10.0, f64::NAN).is_err());
        assert!(CharacterCell::new(-1.0, 10.0).is_err());
        assert!(CharacterCell::new(9.6, 19.2).is_ok());
    }

    #[test]
    fn test_viewport_from_cells_round_trips_counts() {
        let cell = CharacterCell::default();
        let vp = Viewport::from_cells(80, 24, &cell);
        assert_eq!(vp.columns(&cell), 80);
        assert_eq!(vp.rows(&cell), 24);
    }

    #[test]
    fn test_lines_covering() {
        let cell = CharacterCell::new(10.0, 20.0).unwrap();
        assert_eq!(cell.lines_covering(0.0), 0);
        assert_eq!(cell.lines_covering(1.0), 1);
        assert_eq!(cell.lines_covering(20.0), 1);
        assert_eq!(cell.lines_covering(20.5), 2);
    }

    #[test]
    fn test_alignment_checks() {
        let cell = CharacterCell::new(10.0, 20.0).unwrap();
        assert!(cell.is_column_aligned(30.0));
        assert!(!cell.is_column_aligned(35.0));
        assert!(cell.is_row_aligned(0.0));
        assert!(!cell.is_row_aligned(10.0));
    }
}
