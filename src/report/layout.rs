//! Page geometry for the PDF report
//!
//! Columns share the usable width evenly. Wide tables switch to landscape,
//! then shrink the font down to a floor, then truncate cell text.

use crate::types::{CellValue, Table};

/// Rendered in place of a missing value
pub const NULL_PLACEHOLDER: &str = "(null)";

pub const A4_SHORT_MM: f32 = 210.0;
pub const A4_LONG_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 15.0;

pub const BASE_FONT_PT: f32 = 7.0;
pub const MIN_FONT_PT: f32 = 4.0;
/// 0.25 pt
pub const GRID_LINE_PT: f32 = 0.25;
pub const CELL_PADDING_PT: f32 = 3.0;

/// More columns than this go landscape
pub const PORTRAIT_MAX_COLUMNS: usize = 8;
/// A column should hold at least this many characters before truncation kicks in
const MIN_CHARS_PER_COLUMN: f32 = 10.0;
/// Average Helvetica advance width, in em
const AVG_CHAR_EM: f32 = 0.5;
const LINE_SPACING: f32 = 1.2;

pub const PT_TO_MM: f32 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Computed geometry shared by every page of one report
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLayout {
    pub orientation: Orientation,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub font_size_pt: f32,
    pub column_width_mm: f32,
    pub row_height_mm: f32,
    /// Data rows per page, not counting the repeated header
    pub rows_per_page: usize,
    pub columns: usize,
}

impl ReportLayout {
    pub fn for_table(table: &Table) -> Self {
        let columns = table.column_count();
        let orientation = if columns > PORTRAIT_MAX_COLUMNS {
            Orientation::Landscape
        } else {
            Orientation::Portrait
        };
        let (page_width_mm, page_height_mm) = match orientation {
            Orientation::Portrait => (A4_SHORT_MM, A4_LONG_MM),
            Orientation::Landscape => (A4_LONG_MM, A4_SHORT_MM),
        };

        let usable_width_mm = page_width_mm - 2.0 * MARGIN_MM;
        let column_width_mm = usable_width_mm / columns.max(1) as f32;

        let text_width_pt = column_width_mm / PT_TO_MM - 2.0 * CELL_PADDING_PT;
        let fitted = text_width_pt / (MIN_CHARS_PER_COLUMN * AVG_CHAR_EM);
        let font_size_pt = fitted.clamp(MIN_FONT_PT, BASE_FONT_PT);

        let row_height_mm = (font_size_pt * LINE_SPACING + 2.0 * CELL_PADDING_PT) * PT_TO_MM;
        let usable_height_mm = page_height_mm - 2.0 * MARGIN_MM;
        let rows_on_page = (usable_height_mm / row_height_mm).floor() as usize;
        let rows_per_page = rows_on_page.saturating_sub(1).max(1);

        Self {
            orientation,
            page_width_mm,
            page_height_mm,
            font_size_pt,
            column_width_mm,
            row_height_mm,
            rows_per_page,
            columns,
        }
    }

    /// Data row ranges for each page; a table with no rows still gets one
    /// header-only page
    pub fn pages(&self, row_count: usize) -> Vec<std::ops::Range<usize>> {
        if row_count == 0 {
            return vec![0..0];
        }
        (0..row_count)
            .step_by(self.rows_per_page)
            .map(|start| start..(start + self.rows_per_page).min(row_count))
            .collect()
    }

    /// Most characters that fit in one cell at the chosen font size
    pub fn max_chars(&self) -> usize {
        let text_width_pt = self.column_width_mm / PT_TO_MM - 2.0 * CELL_PADDING_PT;
        (text_width_pt / (self.font_size_pt * AVG_CHAR_EM)).floor().max(1.0) as usize
    }

    /// Cell text as drawn: placeholder for nulls, ASCII only, truncated to fit
    pub fn cell_text(&self, cell: &CellValue) -> String {
        match cell.as_text() {
            Some(text) => self.fit(&text),
            None => self.fit(NULL_PLACEHOLDER),
        }
    }

    /// Builtin PDF fonts only cover a fixed character set
    pub fn fit(&self, text: &str) -> String {
        let clean: Vec<char> = text
            .chars()
            .map(|c| match c {
                ' '..='~' => c,
                '\t' | '\n' | '\r' => ' ',
                _ => '?',
            })
            .collect();

        let limit = self.max_chars();
        if clean.len() <= limit {
            return clean.into_iter().collect();
        }
        if limit <= 3 {
            return clean.into_iter().take(limit).collect();
        }
        let mut out: String = clean.into_iter().take(limit - 3).collect();
        out.push_str("...");
        out
    }
}
