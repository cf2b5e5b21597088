//! Excel importer implementation - spreadsheet bytes → Table

use crate::error::{SheetError, SheetResult};
use crate::types::{CellValue, Table};
use calamine::{open_workbook_auto_from_rs, Data, DataType, Range, Reader};
use chrono::Timelike;
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

/// Importer for the first sheet of an uploaded workbook
pub struct ExcelImporter;

impl ExcelImporter {
    /// Import a workbook held in memory (xlsx, xlsm, xlsb, xls or ods)
    pub fn from_bytes(bytes: &[u8]) -> SheetResult<Table> {
        if bytes.is_empty() {
            return Err(SheetError::Parse("Uploaded file is empty".to_string()));
        }

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
            .map_err(|e| SheetError::Parse(format!("Failed to open spreadsheet: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| SheetError::Parse("Workbook has no sheets".to_string()))?
            .map_err(|e| SheetError::Parse(format!("Failed to read first sheet: {}", e)))?;

        Self::table_from_range(&range)
    }

    /// Import a workbook from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> SheetResult<Table> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    fn table_from_range(range: &Range<Data>) -> SheetResult<Table> {
        let mut rows = range.rows();
        let header = rows
            .next()
            .ok_or_else(|| SheetError::Parse("First sheet has no header row".to_string()))?;

        // Placeholder names count from column A even when the used range starts later
        let first_col = range.start().map_or(0, |(_, col)| col as usize);
        let columns = Self::column_names(header, first_col);
        let data = rows
            .map(|row| row.iter().map(Self::convert_cell).collect())
            .collect();

        Table::new(columns, data)
    }

    /// Header names, with duplicates renamed `name.1`, `name.2`, ...
    /// `first_col` is the sheet column index of `header[0]`.
    fn column_names(header: &[Data], first_col: usize) -> Vec<String> {
        let raw: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(idx, cell)| match Self::convert_cell(cell).as_text() {
                Some(text) if !text.is_empty() => text.into_owned(),
                _ => format!("Unnamed: {}", first_col + idx),
            })
            .collect();

        let mut taken: HashSet<String> = raw.iter().cloned().collect();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut names = Vec::with_capacity(raw.len());
        for name in &raw {
            if seen.insert(name.as_str()) {
                names.push(name.clone());
                continue;
            }
            let mut suffix = 1;
            let renamed = loop {
                let candidate = format!("{}.{}", name, suffix);
                if !taken.contains(&candidate) {
                    break candidate;
                }
                suffix += 1;
            };
            taken.insert(renamed.clone());
            names.push(renamed);
        }
        names
    }

    fn convert_cell(cell: &Data) -> CellValue {
        match cell {
            Data::Empty => CellValue::Empty,
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => match cell.as_datetime() {
                Some(ts) if ts.num_seconds_from_midnight() == 0 => {
                    CellValue::Text(ts.format("%Y-%m-%d").to_string())
                }
                Some(ts) => CellValue::Text(ts.format("%Y-%m-%d %H:%M:%S").to_string()),
                None => CellValue::Number(dt.as_f64()),
            },
            Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
            Data::Error(e) => CellValue::Text(e.to_string()),
        }
    }
}
