use crate::error::AnalyticsError;
use crate::stats::{day_window, floor_days};
use crate::{GAP_DAYS_COLUMN, START_DATE_COLUMN};
use chrono::NaiveDateTime;
use core_types::{Cell, Column, Table};

/// Returns the `k` events whose `start_date` is closest to `tau_date`.
///
/// The result is sorted by distance with ties kept in input order, and carries a
/// `gap_days` column holding the absolute whole-day distance. Events without a
/// `start_date` have no gap and sort last.
pub fn nearest_events(
    tau_date: NaiveDateTime,
    events: &Table,
    k: usize,
) -> Result<Table, AnalyticsError> {
    let starts = events.timestamp_column(START_DATE_COLUMN)?;
    let gaps: Vec<Option<i64>> = starts
        .iter()
        .map(|start| start.map(|s| floor_days(s - tau_date).abs()))
        .collect();

    // `sort_by_key` is stable; `None` gaps go after every known gap.
    let mut order: Vec<usize> = (0..gaps.len()).collect();
    order.sort_by_key(|&i| (gaps[i].is_none(), gaps[i]));
    order.truncate(k);

    tracing::debug!(%tau_date, k, candidates = gaps.len(), selected = order.len(), "Ranked events by distance");

    let gap_cells = gaps.into_iter().map(Cell::from).collect();
    let ranked = events.with_column(Column::new(GAP_DAYS_COLUMN, gap_cells))?;
    Ok(ranked.take(&order))
}

/// Returns the events whose `start_date` falls within `window_days` of `tau_date`,
/// both ends inclusive, in their original order.
pub fn events_within_window(
    tau_date: NaiveDateTime,
    events: &Table,
    window_days: u32,
) -> Result<Table, AnalyticsError> {
    let (start, end) = day_window(tau_date, window_days);
    let keep: Vec<usize> = events
        .timestamp_column(START_DATE_COLUMN)?
        .iter()
        .enumerate()
        .filter(|(_, ts)| ts.is_some_and(|ts| start <= ts && ts <= end))
        .map(|(i, _)| i)
        .collect();

    tracing::debug!(%tau_date, window_days, matched = keep.len(), "Filtered events by window");
    Ok(events.take(&keep))
}
