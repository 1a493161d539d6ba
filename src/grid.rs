//! Even column distribution for `grid` containers.
//!
//! A grid container shares its columns among its children. Fixed cells get an
//! equal share; the remainder of the integer division is left as trailing
//! whitespace so the row never exceeds its columns. A cell marked *grow* takes
//! whatever the fixed cells leave over.
//!
//! # Examples
//!
//! ```rust
//! use monogrid::grid::{apply_grid_width, GridCell};
//!
//! let cells = vec![GridCell::new("a"), GridCell::new("b"), GridCell::new("c")];
//! assert_eq!(apply_grid_width(&cells, 81), vec![27, 27, 27]);
//!
//! let cells = vec![GridCell::new("name:"), GridCell::new("").grow()];
//! assert_eq!(apply_grid_width(&cells, 40), vec![5, 35]);
//! ```

use crate::text;

/// One child of a grid container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// Cell text. Multiple lines are allowed.
    pub content: String,
    /// Whether the cell absorbs leftover columns.
    pub grow: bool,
}

impl GridCell {
    /// Creates a fixed cell.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            grow: false,
        }
    }

    /// Marks the cell as growing.
    pub fn grow(mut self) -> Self {
        self.grow = true;
        self
    }

    /// Columns the content needs: the widest line.
    pub fn content_width(&self) -> usize {
        text::max_line_width(&self.content)
    }
}

/// Assigns a width in columns to each cell.
///
/// Guarantees:
///
/// - the widths sum to at most `total_columns`;
/// - when the contents fit at all, no cell is narrower than its content;
/// - with no grow cells, cells get equal shares and the division remainder is
///   left unassigned;
/// - with grow cells, fixed cells take their content width and the grow cells
///   split the rest evenly, the last one taking the remainder.
///
/// When contents cannot all fit, cells are given their content width from left
/// to right until the columns run out.
pub fn apply_grid_width(cells: &[GridCell], total_columns: usize) -> Vec<usize> {
    if cells.is_empty() {
        return Vec::new();
    }
    let needs: Vec<usize> = cells.iter().map(GridCell::content_width).collect();
    let needed: usize = needs.iter().sum();
    if needed > total_columns {
        log::trace!("grid content needs {needed} of {total_columns} columns, clipping");
        return fill_left_to_right(&needs, total_columns);
    }

    let growing = cells.iter().filter(|c| c.grow).count();
    if growing > 0 {
        let fixed: usize = cells
            .iter()
            .zip(&needs)
            .filter(|(c, _)| !c.grow)
            .map(|(_, n)| n)
            .sum();
        let shares = split_growing(cells, &needs, total_columns - fixed, growing);
        return cells
            .iter()
            .zip(needs)
            .zip(shares)
            .map(|((c, need), share)| if c.grow { share } else { need })
            .collect();
    }

    even_split(&needs, total_columns)
}

/// Equal shares, except that cells wider than a share keep their content width
/// and the others split what remains.
fn even_split(needs: &[usize], total_columns: usize) -> Vec<usize> {
    let mut widths = vec![0; needs.len()];
    let mut pinned = vec![false; needs.len()];
    loop {
        let free = pinned.iter().filter(|p| !**p).count();
        let taken: usize = widths
            .iter()
            .zip(&pinned)
            .filter(|(_, p)| **p)
            .map(|(w, _)| w)
            .sum();
        if free == 0 {
            return widths;
        }
        let share = (total_columns - taken) / free;
        let mut changed = false;
        for (i, need) in needs.iter().enumerate() {
            if !pinned[i] && *need > share {
                pinned[i] = true;
                widths[i] = *need;
                changed = true;
            }
        }
        if !changed {
            for (i, width) in widths.iter_mut().enumerate() {
                if !pinned[i] {
                    *width = share;
                }
            }
            return widths;
        }
    }
}

/// Splits `available` among grow cells, keeping each at least its content
/// width. Non-grow positions get 0 in the returned vector.
fn split_growing(cells: &[GridCell], needs: &[usize], available: usize, growing: usize) -> Vec<usize> {
    let grow_needs: Vec<usize> = cells
        .iter()
        .zip(needs)
        .filter(|(c, _)| c.grow)
        .map(|(_, n)| *n)
        .collect();
    let mut grow_widths = even_split(&grow_needs, available);
    let used: usize = grow_widths.iter().sum();
    if let Some(last) = grow_widths.last_mut() {
        *last += available - used;
    }
    debug_assert_eq!(grow_widths.len(), growing);

    let mut grow_widths = grow_widths.into_iter();
    cells
        .iter()
        .map(|c| if c.grow { grow_widths.next().unwrap_or(0) } else { 0 })
        .collect()
}

fn fill_left_to_right(needs: &[usize], total_columns: usize) -> Vec<usize> {
    let mut left = total_columns;
    needs
        .iter()
        .map(|need| {
            let w = (*need).min(left);
            left -= w;
            w
        })
        .collect()
}

/// Renders cells side by side using the given widths.
///
/// Every output line is exactly `total_columns` wide: each cell is padded or
/// clipped to its width and the unassigned remainder becomes trailing spaces.
/// Cells with fewer lines than the tallest are padded with blank lines.
pub fn render(cells: &[GridCell], widths: &[usize], total_columns: usize) -> Vec<String> {
    let columns: Vec<Vec<&str>> = cells.iter().map(|c| c.content.lines().collect()).collect();
    let height = columns.iter().map(Vec::len).max().unwrap_or(0).max(1);
    (0..height)
        .map(|row| {
            let mut line = String::new();
            for (lines, width) in columns.iter().zip(widths) {
                line.push_str(&text::fit(lines.get(row).copied().unwrap_or(""), *width));
            }
            text::fit(&line, total_columns)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(contents: &[&str]) -> Vec<GridCell> {
        contents.iter().map(|c| GridCell::new(*c)).collect()
    }

    #[test]
    fn test_three_children_split_evenly() {
        assert_eq!(apply_grid_width(&cells(&["a", "b", "c"]), 81), vec![27, 27, 27]);
    }

    #[test]
    fn test_remainder_left_unassigned() {
        let widths = apply_grid_width(&cells(&["a", "b", "c"]), 80);
        assert_eq!(widths, vec![26, 26, 26]);
        assert!(widths.iter().sum::<usize>() <= 80);
    }

    #[test]
    fn test_sum_never_exceeds_total() {
        let cs = cells(&["alpha", "beta gamma", "", "delta epsilon zeta"]);
        for total in 0..120 {
            let widths = apply_grid_width(&cs, total);
            assert_eq!(widths.len(), cs.len());
            assert!(widths.iter().sum::<usize>() <= total, "total={total}");
        }
    }

    #[test]
    fn test_wide_content_is_not_squeezed() {
        let cs = cells(&["a very long cell here", "b", "c"]);
        let widths = apply_grid_width(&cs, 30);
        assert_eq!(widths[0], 21);
        assert_eq!(widths[1], 4);
        assert_eq!(widths[2], 4);
    }

    #[test]
    fn test_zero_columns_collapse() {
        assert_eq!(apply_grid_width(&cells(&["", ""]), 0), vec![0, 0]);
        assert_eq!(apply_grid_width(&cells(&["abc", "de"]), 0), vec![0, 0]);
    }

    #[test]
    fn test_empty_grid() {
        assert!(apply_grid_width(&[], 80).is_empty());
    }

    #[test]
    fn test_overflowing_content_fills_left_to_right() {
        assert_eq!(apply_grid_width(&cells(&["abcdef", "ghijkl"]), 8), vec![6, 2]);
    }

    #[test]
    fn test_grow_takes_leftover() {
        let cs = vec![GridCell::new("Name"), GridCell::new("").grow(), GridCell::new("[ok]")];
        assert_eq!(apply_grid_width(&cs, 40), vec![4, 32, 4]);
    }

    #[test]
    fn test_two_growers_share_with_remainder_last() {
        let cs = vec![GridCell::new("ab"), GridCell::new("").grow(), GridCell::new("").grow()];
        assert_eq!(apply_grid_width(&cs, 11), vec![2, 4, 5]);
    }

    #[test]
    fn test_idempotent() {
        let cs = cells(&["one", "two", "three"]);
        assert_eq!(apply_grid_width(&cs, 50), apply_grid_width(&cs, 50));
    }

    #[test]
    fn test_render_pads_to_total() {
        let cs = cells(&["a", "b\nc"]);
        let widths = apply_grid_width(&cs, 9);
        let lines = render(&cs, &widths, 9);
        assert_eq!(lines, vec!["a   b    ", "    c    "]);
    }
}
