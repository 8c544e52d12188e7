use core_types::TableError;
use thiserror::Error;

/// Structural failures only. Degenerate numbers (empty slices, zero prices, a single
/// observation) are reported as NaN inside the results, never as errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Malformed input table: {0}")]
    Table(#[from] TableError),
}
