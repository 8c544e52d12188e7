//! # Core Types
//!
//! The tabular data model shared by every crate in the workspace: loosely typed cells,
//! validated tables, and timestamp-indexed series.
//!
//! As a Layer 0 crate it has no knowledge of the statistics computed on top of it.

pub mod cell;
pub mod error;
pub mod series;
pub mod table;

// Re-export the core types to provide a clean public API.
pub use cell::Cell;
pub use error::TableError;
pub use series::TimeSeries;
pub use table::{Column, Table};
