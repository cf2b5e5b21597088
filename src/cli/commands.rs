use crate::error::SheetResult;
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::replace::{ReplaceMode, ReplaceRule};
use crate::report::ReportExporter;
use crate::types::CellValue;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// Execute the columns command
pub fn columns(file: PathBuf) -> SheetResult<()> {
    let table = ExcelImporter::from_path(&file)?;

    println!("{}", "Sheetfix - Columns".bold().green());
    println!("   File: {}", file.display());
    println!("   Rows: {}", table.row_count());
    println!();
    for (idx, name) in table.columns().iter().enumerate() {
        println!("   {:>3}  {}", idx + 1, name.bright_blue());
    }
    Ok(())
}

/// Execute the replace command
pub fn replace(
    input: PathBuf,
    output: PathBuf,
    find: String,
    replacement: String,
    column: Option<String>,
    mode: Option<String>,
) -> SheetResult<()> {
    let mode = mode.unwrap_or_else(|| {
        let default = if column.is_some() {
            ReplaceMode::SingleColumn
        } else {
            ReplaceMode::AllCells
        };
        default.as_str().to_string()
    });
    let rule = ReplaceRule::new(&mode, &find, CellValue::Text(replacement), column)?;

    println!("{}", "Sheetfix - Find/replace".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}", output.display());
    println!(
        "   Scope:  {}",
        rule.column().unwrap_or("all cells").bright_yellow()
    );
    println!();

    let table = ExcelImporter::from_path(&input)?;
    let result = rule.apply(&table)?;
    ExcelExporter::new(&result.table).save(&output)?;

    let summary = format!(
        "Replaced {} cell(s) across {} row(s)",
        result.replaced,
        result.table.row_count()
    );
    if result.replaced == 0 {
        println!("{}", summary.yellow());
    } else {
        println!("{}", summary.bold().green());
    }
    Ok(())
}

/// Execute the report command
pub fn report(input: PathBuf, output: PathBuf) -> SheetResult<()> {
    let table = ExcelImporter::from_path(&input)?;
    let exporter = ReportExporter::new(&table);
    let bytes = exporter.to_bytes()?;
    fs::write(&output, bytes)?;

    let layout = exporter.layout();
    println!("{}", "Sheetfix - PDF report".bold().green());
    println!("   Output: {}", output.display());
    println!(
        "   {} page(s), {:.1} pt font",
        layout.pages(table.row_count()).len(),
        layout.font_size_pt
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SheetError, ValidationError};
    use crate::types::Table;
    use tempfile::TempDir;

    fn write_sample(dir: &TempDir) -> PathBuf {
        let table = Table::new(
            vec!["name".to_string(), "city".to_string()],
            vec![
                vec![CellValue::text("Alice"), CellValue::Empty],
                vec![CellValue::text("Bob"), CellValue::text("NYC")],
            ],
        )
        .unwrap();
        let path = dir.path().join("people.xlsx");
        ExcelExporter::new(&table).save(&path).unwrap();
        path
    }

    #[test]
    fn test_replace_writes_output() {
        let dir = TempDir::new().unwrap();
        let input = write_sample(&dir);
        let output = dir.path().join("out.xlsx");

        replace(
            input,
            output.clone(),
            "nyc".to_string(),
            "New York".to_string(),
            Some("city".to_string()),
            None,
        )
        .unwrap();

        let table = ExcelImporter::from_path(&output).unwrap();
        assert_eq!(table.cell(1, 1), Some(&CellValue::text("New York")));
        assert_eq!(table.cell(0, 1), Some(&CellValue::Empty));
    }

    #[test]
    fn test_replace_unknown_column_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let input = write_sample(&dir);
        let output = dir.path().join("out.xlsx");

        let err = replace(
            input,
            output.clone(),
            "nyc".to_string(),
            "x".to_string(),
            Some("zip".to_string()),
            None,
        )
        .unwrap_err();

        assert!(matches!(
            err,
            SheetError::Validation(ValidationError::InvalidColumn(_))
        ));
        assert!(!output.exists());
    }

    #[test]
    fn test_report_writes_pdf() {
        let dir = TempDir::new().unwrap();
        let input = write_sample(&dir);
        let output = dir.path().join("out.pdf");

        report(input, output.clone()).unwrap();
        assert!(fs::read(&output).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_columns_missing_file() {
        let err = columns(PathBuf::from("/nonexistent/book.xlsx")).unwrap_err();
        assert!(matches!(err, SheetError::Io(_)));
    }
}
