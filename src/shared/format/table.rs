//! Fixed-width column output for catalog listings.
//!
//! Widths are measured in terminal cells, so CJK and Cyrillic titles line up.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Longest prefix of `s` that fits in `max_width` cells.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut used = 0;

    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width {
            break;
        }
        result.push(c);
        used += w;
    }

    result
}

/// Pad with spaces or cut with "..." so the result is exactly `width` cells.
pub fn pad_or_truncate(s: &str, width: usize) -> String {
    let current = s.width();
    if current <= width {
        return format!("{s}{}", " ".repeat(width - current));
    }
    if width < 3 {
        let cut = truncate_to_width(s, width);
        let pad = width.saturating_sub(cut.width());
        return format!("{cut}{}", " ".repeat(pad));
    }
    let cut = truncate_to_width(s, width - 3);
    let pad = width.saturating_sub(cut.width() + 3);
    format!("{cut}...{}", " ".repeat(pad))
}

/// Rows of cells rendered under a header, each column sized to its widest
/// cell and capped at `max_column_width`.
#[derive(Debug, Clone)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    max_column_width: usize,
}

impl Table {
    pub fn new<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
            max_column_width: 48,
        }
    }

    pub fn max_column_width(mut self, width: usize) -> Self {
        self.max_column_width = width;
        self
    }

    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.width()).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                if i >= widths.len() {
                    widths.push(0);
                }
                widths[i] = widths[i].max(cell.width());
            }
        }
        widths
            .into_iter()
            .map(|w| w.min(self.max_column_width))
            .collect()
    }

    /// Render header and rows, one line each, without trailing spaces.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut out = String::new();
        for row in std::iter::once(&self.header).chain(&self.rows) {
            let line: Vec<String> = row
                .iter()
                .enumerate()
                .map(|(i, cell)| pad_or_truncate(cell, widths[i]))
                .collect();
            out.push_str(line.join("  ").trim_end());
            out.push('\n');
        }
        out
    }
}
