//! Excel import/export
//!
//! - Import: spreadsheet bytes (first sheet) → Table
//! - Export: Table → .xlsx bytes

mod exporter;
mod importer;

pub use exporter::{ExcelExporter, SHEET_NAME};
pub use importer::ExcelImporter;
