//! Bulk find/replace over a table
//!
//! A cell matches when its text, trimmed and lower-cased, equals the trimmed,
//! lower-cased find value. Missing cells never match.

use std::str::FromStr;

use crate::error::{SheetResult, ValidationError};
use crate::types::{CellValue, Table};

/// Which cells a rule looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplaceMode {
    AllCells,
    SingleColumn,
}

impl ReplaceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplaceMode::AllCells => "all-cells",
            ReplaceMode::SingleColumn => "single-column",
        }
    }
}

impl FromStr for ReplaceMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all-cells" => Ok(ReplaceMode::AllCells),
            "single-column" => Ok(ReplaceMode::SingleColumn),
            other => Err(ValidationError::InvalidMode(other.to_string())),
        }
    }
}

/// A validated find/replace rule
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceRule {
    mode: ReplaceMode,
    needle: String,
    replace: CellValue,
    column: Option<String>,
}

/// Result of applying a rule: the new table and how many cells changed
#[derive(Debug, Clone, PartialEq)]
pub struct Replacement {
    pub table: Table,
    pub replaced: usize,
}

impl ReplaceRule {
    pub fn new(
        mode: &str,
        find: &str,
        replace: CellValue,
        column: Option<String>,
    ) -> Result<Self, ValidationError> {
        let needle = normalize(find);
        if needle.is_empty() {
            return Err(ValidationError::EmptyFind);
        }

        let mode: ReplaceMode = mode.parse()?;
        let column = match mode {
            ReplaceMode::AllCells => None,
            ReplaceMode::SingleColumn => match column {
                Some(name) if !name.is_empty() => Some(name),
                _ => return Err(ValidationError::MissingColumn),
            },
        };

        Ok(Self {
            mode,
            needle,
            replace,
            column,
        })
    }

    pub fn mode(&self) -> ReplaceMode {
        self.mode
    }

    pub fn column(&self) -> Option<&str> {
        self.column.as_deref()
    }

    /// True if `cell` would be rewritten by this rule
    pub fn matches(&self, cell: &CellValue) -> bool {
        cell.as_text()
            .is_some_and(|text| normalize(&text) == self.needle)
    }

    /// Apply the rule, producing a new table of identical shape.
    ///
    /// Fails without building anything if the target column is unknown.
    pub fn apply(&self, table: &Table) -> SheetResult<Replacement> {
        let target = match &self.column {
            Some(name) => Some(
                table
                    .column_index(name)
                    .ok_or_else(|| ValidationError::InvalidColumn(name.clone()))?,
            ),
            None => None,
        };

        let mut replaced = 0;
        let rows = table
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(col, cell)| {
                        let in_scope = target.map_or(true, |t| t == col);
                        if in_scope && self.matches(cell) {
                            replaced += 1;
                            self.replace.clone()
                        } else {
                            cell.clone()
                        }
                    })
                    .collect()
            })
            .collect();

        let table = Table::new(table.columns().to_vec(), rows)?;
        Ok(Replacement { table, replaced })
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheetError;
    use pretty_assertions::assert_eq;

    fn people() -> Table {
        Table::new(
            vec!["name".to_string(), "city".to_string()],
            vec![
                vec![CellValue::text("Alice"), CellValue::Empty],
                vec![CellValue::text("Bob"), CellValue::text("NYC")],
                vec![CellValue::text("nyc"), CellValue::text(" NYC ")],
            ],
        )
        .unwrap()
    }

    // ==================== Validation ====================

    #[test]
    fn test_empty_find_rejected() {
        let err = ReplaceRule::new("all-cells", "   ", CellValue::text("x"), None).unwrap_err();
        assert_eq!(err, ValidationError::EmptyFind);
    }

    #[test]
    fn test_unknown_mode_rejected() {
        let err = ReplaceRule::new("everything", "a", CellValue::text("x"), None).unwrap_err();
        assert_eq!(err, ValidationError::InvalidMode("everything".to_string()));
    }

    #[test]
    fn test_single_column_requires_column() {
        let err = ReplaceRule::new("single-column", "a", CellValue::text("x"), None).unwrap_err();
        assert_eq!(err, ValidationError::MissingColumn);
    }

    #[test]
    fn test_only_exact_mode_names_accepted() {
        for mode in ["find", "row", " all-cells ", "All-Cells", "single-column\n", ""] {
            let err = ReplaceRule::new(mode, "a", CellValue::text("x"), Some("a".to_string()))
                .unwrap_err();
            assert_eq!(err, ValidationError::InvalidMode(mode.to_string()), "{:?}", mode);
        }
        assert_eq!("all-cells".parse::<ReplaceMode>().unwrap(), ReplaceMode::AllCells);
        assert_eq!("single-column".parse::<ReplaceMode>().unwrap(), ReplaceMode::SingleColumn);
        assert_eq!(ReplaceMode::SingleColumn.as_str(), "single-column");
    }

    #[test]
    fn test_unknown_column_fails_on_apply() {
        let rule = ReplaceRule::new(
            "single-column",
            "nyc",
            CellValue::text("New York"),
            Some("zip".to_string()),
        )
        .unwrap();
        let err = rule.apply(&people()).unwrap_err();
        assert!(matches!(
            err,
            SheetError::Validation(ValidationError::InvalidColumn(ref c)) if c == "zip"
        ));
    }

    // ==================== Matching ====================

    #[test]
    fn test_match_is_trimmed_and_case_insensitive() {
        let rule = ReplaceRule::new("all-cells", " NaN ", CellValue::text("Unknown"), None).unwrap();
        assert!(rule.matches(&CellValue::text("nan")));
        assert!(rule.matches(&CellValue::text("  NaN")));
        assert!(!rule.matches(&CellValue::text("banana")));
        assert!(!rule.matches(&CellValue::Empty));
    }

    #[test]
    fn test_numbers_and_booleans_match_by_text() {
        let rule = ReplaceRule::new("all-cells", "42", CellValue::Empty, None).unwrap();
        assert!(rule.matches(&CellValue::Number(42.0)));
        let rule = ReplaceRule::new("all-cells", "true", CellValue::Empty, None).unwrap();
        assert!(rule.matches(&CellValue::Bool(true)));
    }

    // ==================== Application ====================

    #[test]
    fn test_all_cells_replaces_everywhere() {
        let rule =
            ReplaceRule::new("all-cells", "nyc", CellValue::text("New York"), None).unwrap();
        let out = rule.apply(&people()).unwrap();

        assert_eq!(out.replaced, 3);
        assert_eq!(out.table.columns(), people().columns());
        assert_eq!(out.table.cell(0, 1), Some(&CellValue::Empty));
        assert_eq!(out.table.cell(1, 1), Some(&CellValue::text("New York")));
        assert_eq!(out.table.cell(2, 0), Some(&CellValue::text("New York")));
        assert_eq!(out.table.cell(2, 1), Some(&CellValue::text("New York")));
    }

    #[test]
    fn test_single_column_leaves_other_columns() {
        let rule = ReplaceRule::new(
            "single-column",
            "nyc",
            CellValue::text("New York"),
            Some("city".to_string()),
        )
        .unwrap();
        let before = people();
        let out = rule.apply(&before).unwrap();

        assert_eq!(out.replaced, 2);
        assert_eq!(out.table.column_values("name"), before.column_values("name"));
        assert_eq!(out.table.cell(1, 1), Some(&CellValue::text("New York")));
    }

    #[test]
    fn test_null_never_stringified() {
        let rule =
            ReplaceRule::new("all-cells", " NaN ", CellValue::text("Unknown"), None).unwrap();
        let table = Table::new(
            vec!["name".to_string(), "city".to_string()],
            vec![
                vec![CellValue::text("Alice"), CellValue::Empty],
                vec![CellValue::text("Bob"), CellValue::text("NYC")],
            ],
        )
        .unwrap();
        let out = rule.apply(&table).unwrap();
        assert_eq!(out.replaced, 0);
        assert_eq!(out.table, table);
    }

    #[test]
    fn test_replace_with_empty_text_or_null() {
        let table = people();
        let rule = ReplaceRule::new("all-cells", "bob", CellValue::text(""), None).unwrap();
        let out = rule.apply(&table).unwrap();
        assert_eq!(out.table.cell(1, 0), Some(&CellValue::text("")));

        let rule = ReplaceRule::new("all-cells", "bob", CellValue::Empty, None).unwrap();
        let out = rule.apply(&table).unwrap();
        assert_eq!(out.table.cell(1, 0), Some(&CellValue::Empty));
    }

    #[test]
    fn test_no_match_preserves_table() {
        let rule = ReplaceRule::new("all-cells", "zzz", CellValue::text("x"), None).unwrap();
        let table = people();
        let out = rule.apply(&table).unwrap();
        assert_eq!(out.replaced, 0);
        assert_eq!(out.table, table);
    }
}
