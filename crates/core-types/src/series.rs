use crate::error::TableError;
use crate::table::{Column, Table};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A `Table` indexed by timestamp, one timestamp per row.
///
/// The index is expected to be strictly increasing. This is not enforced; operations
/// that select by date range filter on the timestamp values, so an unsorted index still
/// gives well-defined (if surprising) results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct TimeSeries {
    index: Vec<NaiveDateTime>,
    #[serde(flatten)]
    table: Table,
}

#[derive(Deserialize)]
struct RawSeries {
    index: Vec<NaiveDateTime>,
    columns: Vec<Column>,
}

impl TryFrom<RawSeries> for TimeSeries {
    type Error = TableError;

    fn try_from(raw: RawSeries) -> Result<Self, Self::Error> {
        TimeSeries::new(raw.index, Table::new(raw.columns)?)
    }
}

impl TimeSeries {
    pub fn new(index: Vec<NaiveDateTime>, table: Table) -> Result<Self, TableError> {
        // A table with no columns has no row count of its own.
        if !table.columns().is_empty() && index.len() != table.len() {
            return Err(TableError::IndexLength {
                index: index.len(),
                rows: table.len(),
            });
        }
        Ok(Self { index, table })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[NaiveDateTime] {
        &self.index
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn timestamp_at(&self, position: usize) -> Option<NaiveDateTime> {
        self.index.get(position).copied()
    }

    /// Selects rows by position, keeping index and columns aligned.
    pub fn take(&self, positions: &[usize]) -> TimeSeries {
        let index = positions
            .iter()
            .filter_map(|&i| self.index.get(i).copied())
            .collect();
        TimeSeries {
            index,
            table: self.table.take(positions),
        }
    }

    /// Returns a copy with `column` appended, or replacing the column of the same name.
    pub fn with_column(&self, column: Column) -> Result<TimeSeries, TableError> {
        TimeSeries::new(self.index.clone(), self.table.with_column(column)?)
    }
}
