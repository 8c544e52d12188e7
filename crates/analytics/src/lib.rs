//! # Changepoint Analytics
//!
//! This crate measures what happened around a changepoint in a price series: how prices
//! and log returns differ before and after it, and which labeled events sit close to it.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of files,
//!   configuration or output formats. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every operation takes its inputs by reference and returns
//!   fresh values. Caller tables are never modified.
//! - **NaN over errors:** Degenerate statistics come back as NaN. Only structurally
//!   broken input (a required column is missing or mistyped) is an error.
//!
//! ## Public API
//!
//! - `compute_returns`: prices to forward-filled prices plus `log_ret`.
//! - `summarize_impact`: before/after statistics as an `ImpactSummary`.
//! - `nearest_events` / `events_within_window`: event proximity to the changepoint.
//! - `AnalyticsEngine`: runs all of the above and returns a `ChangepointReport`.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod events;
pub mod impact;
pub mod report;
pub mod returns;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use engine::{AnalyticsEngine, ImpactParams};
pub use error::AnalyticsError;
pub use events::{events_within_window, nearest_events};
pub use impact::summarize_impact;
pub use report::{ChangepointReport, ImpactSummary};
pub use returns::compute_returns;

pub const PRICE_COLUMN: &str = "Price";
pub const LOG_RET_COLUMN: &str = "log_ret";
pub const START_DATE_COLUMN: &str = "start_date";
pub const GAP_DAYS_COLUMN: &str = "gap_days";

pub const DEFAULT_NEAREST_K: usize = 3;
pub const DEFAULT_EVENT_WINDOW_DAYS: u32 = 90;
