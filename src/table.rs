//! Tables whose columns are sized in whole cells.
//!
//! Columns carry a sizing hint. `width-min` columns shrink to their widest
//! content, `width-auto` columns absorb whatever is left of the available
//! columns, fixed columns keep their width and unhinted columns take their
//! content width. Separators (` | `) occupy three cells each.
//!
//! When several columns are `width-auto`, the leftover is split evenly between
//! them and the last one gets the remainder.
//!
//! ```rust
//! use monogrid::table::{Column, Model, Row};
//!
//! let table = Model::new(vec![
//!     Column::new("Key").with_class("width-min"),
//!     Column::new("Description").with_class("width-auto"),
//! ])
//! .with_rows(vec![Row::new(vec!["d".into(), "toggle the debug grid".into()])]);
//!
//! assert_eq!(table.column_widths(40), vec![3, 34]);
//! ```

use crate::role::{LayoutRole, LayoutRule};
use crate::text::{self, Sanitizer};

const SEPARATOR: &str = " | ";
const SEPARATOR_WIDTH: usize = 3;

/// How a column's width is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnSizing {
    /// Content width, no hint given.
    #[default]
    Natural,
    /// Exactly this many columns.
    Fixed(usize),
    /// `width-min`: minimal content width.
    Min,
    /// `width-auto`: leftover width.
    Auto,
}

#[derive(Debug, Clone)]
pub struct Column {
    pub title: String,
    pub sizing: ColumnSizing,
}

impl Column {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sizing: ColumnSizing::Natural,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.sizing = ColumnSizing::Fixed(width);
        self
    }

    /// Applies sizing hints from a class attribute. The last sizing marker
    /// wins; other markers are ignored.
    pub fn with_class(mut self, classes: &str) -> Self {
        for role in LayoutRole::from_classes(classes) {
            match role.rule() {
                LayoutRule::MinContentWidth => self.sizing = ColumnSizing::Min,
                LayoutRule::AbsorbLeftover => self.sizing = ColumnSizing::Auto,
                _ => {}
            }
        }
        self
    }
}

#[derive(Debug, Clone)]
pub struct Row {
    pub cells: Vec<String>,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }
}

#[derive(Debug, Clone)]
pub struct Model {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Model {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
        self.rows = rows;
        self
    }

    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Returns the table with its text cleaned. Titles go through `inline`,
    /// which should replace line breaks; body cells go through `multiline`
    /// and may keep them, a row growing as tall as its tallest cell.
    pub fn sanitized(self, multiline: &Sanitizer, inline: &Sanitizer) -> Self {
        Self {
            columns: self
                .columns
                .into_iter()
                .map(|c| Column {
                    title: inline.sanitize_str(&c.title),
                    sizing: c.sizing,
                })
                .collect(),
            rows: self
                .rows
                .into_iter()
                .map(|r| Row::new(r.cells.iter().map(|c| multiline.sanitize_str(c)).collect()))
                .collect(),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Widest of the header and every cell in column `index`.
    pub fn content_width(&self, index: usize) -> usize {
        let header = self
            .columns
            .get(index)
            .map_or(0, |c| text::display_width(&c.title));
        self.rows
            .iter()
            .filter_map(|r| r.cells.get(index))
            .map(|c| text::max_line_width(c))
            .fold(header, usize::max)
    }

    /// Width of each column when the table may use `available` columns.
    ///
    /// The widths plus separators never exceed `available`; columns that do
    /// not fit are clipped from the right, possibly to zero.
    pub fn column_widths(&self, available: usize) -> Vec<usize> {
        let n = self.columns.len();
        if n == 0 {
            return Vec::new();
        }
        let separators = SEPARATOR_WIDTH * (n - 1);

        let mut widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| match c.sizing {
                ColumnSizing::Fixed(w) => w,
                ColumnSizing::Auto => 0,
                ColumnSizing::Natural | ColumnSizing::Min => self.content_width(i),
            })
            .collect();

        let autos: Vec<usize> = (0..n)
            .filter(|i| self.columns[*i].sizing == ColumnSizing::Auto)
            .collect();
        if !autos.is_empty() {
            let used = separators + widths.iter().sum::<usize>();
            let leftover = available.saturating_sub(used);
            let share = leftover / autos.len();
            for i in &autos {
                widths[*i] = share;
            }
            if let Some(last) = autos.last() {
                widths[*last] += leftover - share * autos.len();
            }
            if autos.len() > 1 {
                log::trace!("{} width-auto columns share {leftover} columns", autos.len());
            }
        }

        clip_to(&mut widths, available);
        widths
    }

    /// Renders header, rule and rows within `available` columns.
    pub fn lines(&self, available: usize) -> Vec<String> {
        let widths = self.column_widths(available);
        if widths.is_empty() {
            return Vec::new();
        }
        let mut output = Vec::with_capacity(self.rows.len() + 2);

        let titles: Vec<&str> = self.columns.iter().map(|c| c.title.as_str()).collect();
        output.push(join_cells(&titles, &widths, SEPARATOR, available));

        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
        output.push(join_cells(&rule, &widths, "-+-", available));

        for row in &self.rows {
            let height = row.cells.iter().map(|c| c.lines().count()).max().unwrap_or(0).max(1);
            for line in 0..height {
                let cells: Vec<&str> = (0..widths.len())
                    .map(|i| {
                        row.cells
                            .get(i)
                            .and_then(|c| c.lines().nth(line))
                            .unwrap_or("")
                    })
                    .collect();
                output.push(join_cells(&cells, &widths, SEPARATOR, available));
            }
        }

        output
    }
}

fn clip_to(widths: &mut [usize], available: usize) {
    let mut budget = available;
    for (i, w) in widths.iter_mut().enumerate() {
        if i > 0 {
            budget -= budget.min(SEPARATOR_WIDTH);
        }
        *w = (*w).min(budget);
        budget -= *w;
    }
}

fn join_cells(cells: &[&str], widths: &[usize], separator: &str, available: usize) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(separator);
        }
        line.push_str(&text::fit(cell, *width));
    }
    text::truncate(line.trim_end(), available)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Row {
        Row::new(cells.iter().map(|c| c.to_string()).collect())
    }

    fn sample(second: &str) -> Model {
        Model::new(vec![
            Column::new("Key").with_class("width-min"),
            Column::new("Action").with_class(second),
            Column::new("Mode").with_class("width-min"),
        ])
        .with_rows(vec![row(&["ctrl+d", "toggle", "any"])])
    }

    #[test]
    fn test_min_and_auto() {
        let t = sample("width-auto");
        // 6 + 4 for the min columns, 6 for separators.
        assert_eq!(t.column_widths(40), vec![6, 24, 4]);
    }

    #[test]
    fn test_natural_column_uses_content() {
        let t = sample("");
        assert_eq!(t.column_widths(40), vec![6, 6, 4]);
    }

    #[test]
    fn test_two_auto_columns_split_evenly() {
        let t = Model::new(vec![
            Column::new("a").with_class("width-auto"),
            Column::new("bb").with_class("width-min"),
            Column::new("c").with_class("width-auto"),
        ]);
        // 21 - 6 separators - 2 = 13 leftover
        assert_eq!(t.column_widths(21), vec![6, 2, 7]);
    }

    #[test]
    fn test_never_wider_than_available() {
        let t = sample("width-auto");
        for available in 0..60 {
            let widths = t.column_widths(available);
            assert!(widths.iter().sum::<usize>() <= available);
            for line in t.lines(available) {
                assert!(text::display_width(&line) <= available, "available={available}");
            }
        }
    }

    #[test]
    fn test_overflow_clips_right() {
        let t = sample("");
        assert_eq!(t.column_widths(10), vec![6, 1, 0]);
    }

    #[test]
    fn test_fixed_width() {
        let t = Model::new(vec![Column::new("id").with_width(5), Column::new("name")]);
        assert_eq!(t.column_widths(80), vec![5, 4]);
    }

    #[test]
    fn test_lines_render() {
        let t = Model::new(vec![
            Column::new("Key").with_class("width-min"),
            Column::new("Action").with_class("width-auto"),
        ])
        .with_rows(vec![row(&["d", "debug"])]);
        assert_eq!(
            t.lines(16),
            vec!["Key | Action", "----+-----------", "d   | debug"]
        );
    }

    #[test]
    fn test_sanitized_header_and_cells() {
        let multiline = text::new_sanitizer(vec![]);
        let inline = text::new_sanitizer(vec![text::replace_newlines(" ")]);
        let t = Model::new(vec![Column::new("k\tk"), Column::new("a\nb")])
            .with_rows(vec![row(&["x\ny", "z"])])
            .sanitized(&multiline, &inline);
        assert_eq!(t.column_widths(80), vec![6, 3]);
        assert_eq!(
            t.lines(80),
            vec!["k    k | a b", "-------+----", "x      | z", "y"]
        );
    }

    #[test]
    fn test_empty_table() {
        let t = Model::new(Vec::new());
        assert!(t.column_widths(80).is_empty());
        assert!(t.lines(80).is_empty());
    }
}
