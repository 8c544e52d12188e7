use chrono::{NaiveDate, NaiveDateTime};
use core_types::{Table, TimeSeries};
use serde::{Deserialize, Serialize};

/// Before/after statistics around a changepoint.
///
/// This struct is the output of `summarize_impact`. Undefined statistics (empty slices,
/// a single observation, a zero baseline price) are NaN rather than errors, and serialize
/// to `null` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactSummary {
    pub tau_index: usize,
    /// Calendar date of the row at `tau_index`; `None` when the index is out of range.
    pub tau_date: Option<NaiveDate>,

    // I. Price levels
    pub pre_price_mean: f64,
    pub post_price_mean: f64,
    pub price_pct_change: f64,

    // II. Log returns
    pub pre_ret_mean: f64,
    pub post_ret_mean: f64,
    pub ret_mean_diff: f64,
    pub pre_ret_std: f64,
    pub post_ret_std: f64,
}

/// Everything the `AnalyticsEngine` derives for one changepoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangepointReport {
    pub returns: TimeSeries,
    pub summary: ImpactSummary,
    /// Full timestamp of the changepoint row, used as the reference for event distances.
    pub tau_timestamp: Option<NaiveDateTime>,
    /// The closest events, with a `gap_days` column. `None` when no event table was given
    /// or the changepoint could not be dated.
    pub nearest_events: Option<Table>,
    /// Events inside the configured day window.
    pub events_in_window: Option<Table>,
}
