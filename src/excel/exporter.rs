//! Excel exporter implementation - Table → .xlsx bytes

use crate::error::{SheetError, SheetResult};
use crate::types::{CellValue, Table};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

/// Name of the single worksheet written on export
pub const SHEET_NAME: &str = "Sheet1";

/// Excel exporter for the current table
pub struct ExcelExporter<'a> {
    table: &'a Table,
}

impl<'a> ExcelExporter<'a> {
    /// Create a new Excel exporter
    pub fn new(table: &'a Table) -> Self {
        Self { table }
    }

    /// Serialize to an in-memory .xlsx workbook
    pub fn to_bytes(&self) -> SheetResult<Vec<u8>> {
        let mut workbook = self.build_workbook()?;
        workbook
            .save_to_buffer()
            .map_err(|e| SheetError::Export(format!("Failed to serialize workbook: {}", e)))
    }

    /// Write the workbook to disk
    pub fn save(&self, output_path: &Path) -> SheetResult<()> {
        let mut workbook = self.build_workbook()?;
        workbook
            .save(output_path)
            .map_err(|e| SheetError::Export(format!("Failed to save Excel file: {}", e)))
    }

    fn build_workbook(&self) -> SheetResult<Workbook> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(SHEET_NAME)
            .map_err(|e| SheetError::Export(format!("Failed to set worksheet name: {}", e)))?;

        // Header row (row 0)
        let bold = Format::new().set_bold();
        for (col_idx, name) in self.table.columns().iter().enumerate() {
            let col = Self::column_number(col_idx)?;
            worksheet
                .write_string_with_format(0, col, name, &bold)
                .map_err(|e| SheetError::Export(format!("Failed to write header: {}", e)))?;
        }

        // Data rows start at row 1; no index column
        for (row_idx, row) in self.table.rows().iter().enumerate() {
            let excel_row = u32::try_from(row_idx + 1)
                .map_err(|_| SheetError::Export("Too many rows for a worksheet".to_string()))?;
            for (col_idx, cell) in row.iter().enumerate() {
                Self::write_cell(worksheet, excel_row, Self::column_number(col_idx)?, cell)?;
            }
        }

        Ok(workbook)
    }

    fn column_number(idx: usize) -> SheetResult<u16> {
        u16::try_from(idx)
            .map_err(|_| SheetError::Export("Too many columns for a worksheet".to_string()))
    }

    /// Write a single cell value based on its variant; empty cells stay blank
    fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &CellValue) -> SheetResult<()> {
        let result = match cell {
            CellValue::Empty => return Ok(()),
            CellValue::Text(text) => worksheet.write_string(row, col, text),
            CellValue::Number(value) => worksheet.write_number(row, col, *value),
            CellValue::Bool(value) => worksheet.write_boolean(row, col, *value),
        };
        result.map(|_| ()).map_err(|e| {
            SheetError::Export(format!(
                "Failed to write {} at row {}, column {}: {}",
                cell.type_name(),
                row + 1,
                col + 1,
                e
            ))
        })
    }
}
