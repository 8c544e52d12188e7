use crate::cell::Cell;
use crate::error::TableError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named column of loosely typed cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// An ordered set of equal-length, uniquely named columns.
///
/// Tables are values: every operation that changes shape returns a new `Table` and
/// leaves `self` untouched. Deserialization goes through `Table::new`, so a table read
/// from JSON upholds the same invariants as one built in code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    columns: Vec<Column>,
    #[serde(skip)]
    rows: usize,
}

#[derive(Deserialize)]
struct RawTable {
    columns: Vec<Column>,
}

impl TryFrom<RawTable> for Table {
    type Error = TableError;

    fn try_from(raw: RawTable) -> Result<Self, Self::Error> {
        Table::new(raw.columns)
    }
}

impl Table {
    /// Builds a table, checking that names are unique and every column has the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let rows = columns.first().map_or(0, |c| c.values.len());
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(TableError::DuplicateColumn(column.name.clone()));
            }
            if column.values.len() != rows {
                return Err(TableError::ColumnLength {
                    column: column.name.clone(),
                    expected: rows,
                    actual: column.values.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    /// A table with the given column names and no rows.
    pub fn empty<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Result<Self, TableError> {
        Self::new(names.into_iter().map(|n| Column::new(n, Vec::new())).collect())
    }

    pub fn len(&self) -> usize {
        self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like `column`, but a missing column is a structural error.
    pub fn require_column(&self, name: &str) -> Result<&Column, TableError> {
        self.column(name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Reads a column as numbers, mapping anything non-numeric to `None`.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, TableError> {
        let column = self.require_column(name)?;
        Ok(column.values.iter().map(Cell::to_numeric).collect())
    }

    /// Reads a column as timestamps. `Null` cells become `None`; any other non-timestamp
    /// cell is a type error.
    pub fn timestamp_column(&self, name: &str) -> Result<Vec<Option<NaiveDateTime>>, TableError> {
        let column = self.require_column(name)?;
        column
            .values
            .iter()
            .enumerate()
            .map(|(row, cell)| match cell {
                Cell::Timestamp(ts) => Ok(Some(*ts)),
                Cell::Null => Ok(None),
                other => Err(TableError::ColumnType {
                    column: name.to_string(),
                    row,
                    expected: "timestamp",
                    found: other.kind(),
                }),
            })
            .collect()
    }

    /// Selects rows by position, in the order given. Positions past the end are skipped.
    pub fn take(&self, positions: &[usize]) -> Table {
        let columns: Vec<Column> = self
            .columns
            .iter()
            .map(|c| {
                let values = positions
                    .iter()
                    .filter_map(|&i| c.values.get(i).cloned())
                    .collect();
                Column::new(c.name.clone(), values)
            })
            .collect();
        let rows = positions.iter().filter(|&&i| i < self.rows).count();
        Table { columns, rows }
    }

    /// Returns a copy with `column` appended, or replacing the column of the same name.
    pub fn with_column(&self, column: Column) -> Result<Table, TableError> {
        if !self.columns.is_empty() && column.values.len() != self.rows {
            return Err(TableError::ColumnLength {
                column: column.name,
                expected: self.rows,
                actual: column.values.len(),
            });
        }
        let rows = column.values.len();
        let mut columns = self.columns.clone();
        match columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => columns.push(column),
        }
        Ok(Table { columns, rows })
    }

    /// Returns a copy where the text cells of `name` are parsed into timestamps.
    ///
    /// See `Cell::parse_timestamp` for the accepted formats.
    pub fn parse_timestamps(&self, name: &str) -> Result<Table, TableError> {
        let column = self.require_column(name)?;
        let parsed: Vec<Cell> = column.values.iter().map(Cell::parse_timestamp).collect();
        let unparsed = column
            .values
            .iter()
            .zip(&parsed)
            .filter(|(before, after)| !before.is_null() && after.is_null())
            .count();
        if unparsed > 0 {
            tracing::warn!(column = name, unparsed, "Some values could not be parsed as dates");
        }
        self.with_column(Column::new(name, parsed))
    }
}
