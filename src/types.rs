use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::error::{SheetError, SheetResult};

//==============================================================================
// Cell Values
//==============================================================================

/// A single cell. `Empty` is a real missing value, distinct from `Text("")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum CellValue {
    Bool(bool),
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Textual representation used for matching and rendering.
    ///
    /// Returns `None` for `Empty`: a missing value has no text, so it can
    /// never compare equal to anything a user types.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            CellValue::Empty => None,
            CellValue::Text(s) => Some(Cow::Borrowed(s.as_str())),
            CellValue::Number(n) => Some(Cow::Owned(n.to_string())),
            CellValue::Bool(true) => Some(Cow::Borrowed("TRUE")),
            CellValue::Bool(false) => Some(Cow::Borrowed("FALSE")),
        }
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Empty => "Empty",
            CellValue::Text(_) => "Text",
            CellValue::Number(_) => "Number",
            CellValue::Bool(_) => "Boolean",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => f.write_str(&text),
            None => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

//==============================================================================
// Table
//==============================================================================

/// The loaded sheet: a header plus rows stored positionally in header order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table, rejecting any row whose width differs from the header
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> SheetResult<Self> {
        let width = columns.len();
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(SheetError::Parse(format!(
                "Row {} has {} cells, expected {}",
                idx + 1,
                row.len(),
                width
            )));
        }
        Ok(Self { columns, rows })
    }

    /// Header-only table
    pub fn with_columns(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a column by name (first match)
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// All values of one column, top to bottom
    pub fn column_values(&self, name: &str) -> Option<Vec<&CellValue>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people() -> Table {
        Table::new(
            vec!["name".to_string(), "city".to_string()],
            vec![
                vec![CellValue::text("Alice"), CellValue::Empty],
                vec![CellValue::text("Bob"), CellValue::text("NYC")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_as_text_of_each_variant() {
        assert_eq!(CellValue::text("x").as_text().as_deref(), Some("x"));
        assert_eq!(CellValue::Number(3.0).as_text().as_deref(), Some("3"));
        assert_eq!(CellValue::Number(2.5).as_text().as_deref(), Some("2.5"));
        assert_eq!(CellValue::Bool(true).as_text().as_deref(), Some("TRUE"));
        assert_eq!(CellValue::Empty.as_text(), None);
    }

    #[test]
    fn test_empty_text_is_not_missing() {
        let blank = CellValue::text("");
        assert!(!blank.is_empty());
        assert_eq!(blank.as_text().as_deref(), Some(""));
        assert!(CellValue::Empty.is_empty());
    }

    #[test]
    fn test_cell_value_json_shapes() {
        let parsed: Vec<CellValue> =
            serde_json::from_str(r#"[null, "Unknown", 4.5, true, ""]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                CellValue::Empty,
                CellValue::text("Unknown"),
                CellValue::Number(4.5),
                CellValue::Bool(true),
                CellValue::text(""),
            ]
        );
        assert_eq!(serde_json::to_string(&CellValue::Empty).unwrap(), "null");
    }

    #[test]
    fn test_table_rejects_ragged_rows() {
        let result = Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![CellValue::Number(1.0)]],
        );
        assert!(matches!(result, Err(SheetError::Parse(_))));
    }

    #[test]
    fn test_table_accessors() {
        let table = people();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_index("city"), Some(1));
        assert!(!table.has_column("zip"));
        assert_eq!(table.cell(1, 1), Some(&CellValue::text("NYC")));
        assert_eq!(
            table.column_values("city").unwrap(),
            vec![&CellValue::Empty, &CellValue::text("NYC")]
        );
    }

    #[test]
    fn test_header_only_table() {
        let table = Table::with_columns(vec!["only".to_string()]);
        assert_eq!(table.row_count(), 0);
        assert_eq!(table.columns(), &["only".to_string()]);
    }
}
