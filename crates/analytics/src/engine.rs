use crate::error::AnalyticsError;
use crate::events::{events_within_window, nearest_events};
use crate::impact::summarize_impact;
use crate::report::ChangepointReport;
use crate::returns::compute_returns;
use crate::{DEFAULT_EVENT_WINDOW_DAYS, DEFAULT_NEAREST_K};
use core_types::{Table, TimeSeries};

/// Tunable windows for a changepoint analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpactParams {
    /// Day window for the before/after slices; `None` splits the whole series at tau.
    pub impact_window_days: Option<u32>,
    pub nearest_k: usize,
    pub event_window_days: u32,
}

impl Default for ImpactParams {
    fn default() -> Self {
        Self {
            impact_window_days: None,
            nearest_k: DEFAULT_NEAREST_K,
            event_window_days: DEFAULT_EVENT_WINDOW_DAYS,
        }
    }
}

/// A stateless calculator that runs the full changepoint pipeline.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {
    params: ImpactParams,
}

impl AnalyticsEngine {
    pub fn new(params: ImpactParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ImpactParams {
        &self.params
    }

    /// The main entry point for analysing a changepoint.
    ///
    /// # Arguments
    ///
    /// * `prices` - A series with a `Price` column, in any state of cleanliness.
    /// * `tau_index` - Position of the changepoint in the *returns* series.
    /// * `events` - Optional table of labeled events with a `start_date` column.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `ChangepointReport` or an `AnalyticsError`.
    pub fn analyze(
        &self,
        prices: &TimeSeries,
        tau_index: usize,
        events: Option<&Table>,
    ) -> Result<ChangepointReport, AnalyticsError> {
        let returns = compute_returns(prices)?;
        let summary = summarize_impact(&returns, tau_index, self.params.impact_window_days)?;
        let tau_timestamp = returns.timestamp_at(tau_index);

        let (nearest, in_window) = match (events, tau_timestamp) {
            (Some(events), Some(tau)) => (
                Some(nearest_events(tau, events, self.params.nearest_k)?),
                Some(events_within_window(tau, events, self.params.event_window_days)?),
            ),
            (Some(_), None) => {
                tracing::warn!(tau_index, "Changepoint has no date, skipping event lookup");
                (None, None)
            }
            (None, _) => (None, None),
        };

        Ok(ChangepointReport {
            returns,
            summary,
            tau_timestamp,
            nearest_events: nearest,
            events_in_window: in_window,
        })
    }
}
