use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Required column '{0}' is missing")]
    MissingColumn(String),

    #[error("Column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("Column '{column}' has {actual} rows, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Index has {index} entries but the table has {rows} rows")]
    IndexLength { index: usize, rows: usize },

    #[error("Column '{column}' row {row}: expected {expected}, found {found}")]
    ColumnType {
        column: String,
        row: usize,
        expected: &'static str,
        found: &'static str,
    },
}
