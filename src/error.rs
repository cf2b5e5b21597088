use thiserror::Error;

pub type SheetResult<T> = Result<T, SheetError>;

#[derive(Error, Debug)]
pub enum SheetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("No file uploaded")]
    NoData,

    #[error("Export error: {0}")]
    Export(String),
}

/// Reasons a replace rule is rejected before it touches the table
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("empty find value")]
    EmptyFind,

    #[error("invalid mode '{0}' (expected 'all-cells' or 'single-column')")]
    InvalidMode(String),

    #[error("invalid column: single-column mode requires a column name")]
    MissingColumn,

    #[error("invalid column '{0}'")]
    InvalidColumn(String),
}

impl SheetError {
    /// True for failures caused by the caller's input rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SheetError::Parse(_) | SheetError::Validation(_) | SheetError::NoData
        )
    }
}
