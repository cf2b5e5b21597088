//! Sheetfix - spreadsheet find/replace with Excel and PDF export
//!
//! A spreadsheet is loaded into a [`Table`], rewritten by a validated
//! [`ReplaceRule`], and exported back to `.xlsx` or to a paginated PDF report.
//! The HTTP server keeps one current table in a [`Session`].
//!
//! # Example
//!
//! ```no_run
//! use royalbit_sheetfix::excel::{ExcelExporter, ExcelImporter};
//! use royalbit_sheetfix::{CellValue, ReplaceRule};
//!
//! let table = ExcelImporter::from_path("people.xlsx")?;
//! let rule = ReplaceRule::new(
//!     "single-column",
//!     "nyc",
//!     CellValue::text("New York"),
//!     Some("city".to_string()),
//! )?;
//! let result = rule.apply(&table)?;
//! println!("Replaced {} cells", result.replaced);
//!
//! let bytes = ExcelExporter::new(&result.table).to_bytes()?;
//! # Ok::<(), royalbit_sheetfix::error::SheetError>(())
//! ```

pub mod api;
pub mod cli;
pub mod error;
pub mod excel;
pub mod replace;
pub mod report;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use error::{SheetError, SheetResult, ValidationError};
pub use replace::{ReplaceMode, ReplaceRule, Replacement};
pub use session::{Session, SessionState};
pub use types::{CellValue, Table};
