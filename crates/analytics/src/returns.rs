use crate::error::AnalyticsError;
use crate::{LOG_RET_COLUMN, PRICE_COLUMN};
use core_types::{Cell, Column, TimeSeries};

/// Converts a price series into a log-return series.
///
/// `Price` is coerced to numbers (junk becomes missing) and forward-filled; `log_ret` is
/// `ln(price[i] / price[i - 1])`. Rows without a return are dropped, which always
/// includes the first row. Other columns are carried along untouched.
///
/// Bad data never fails: a `Price` column with nothing numeric in it produces an empty
/// series. The only error is a missing `Price` column.
pub fn compute_returns(series: &TimeSeries) -> Result<TimeSeries, AnalyticsError> {
    let prices = forward_fill(&series.table().numeric_column(PRICE_COLUMN)?);
    let log_rets = log_returns(&prices);

    let keep: Vec<usize> = log_rets
        .iter()
        .enumerate()
        .filter_map(|(i, r)| r.map(|_| i))
        .collect();

    if keep.is_empty() && !series.is_empty() {
        tracing::warn!(rows = series.len(), "No usable prices, returns series is empty");
    }
    tracing::debug!(rows_in = series.len(), rows_out = keep.len(), "Computed log returns");

    let out = series
        .with_column(Column::new(PRICE_COLUMN, to_cells(&prices)))?
        .with_column(Column::new(LOG_RET_COLUMN, to_cells(&log_rets)))?;
    Ok(out.take(&keep))
}

/// Replaces each gap with the most recent value before it. Leading gaps stay gaps.
fn forward_fill(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut last = None;
    values
        .iter()
        .map(|v| {
            if v.is_some() {
                last = *v;
            }
            last
        })
        .collect()
}

fn log_returns(prices: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(prices.len());
    if prices.is_empty() {
        return out;
    }
    out.push(None);
    out.extend(prices.windows(2).map(|w| match (w[0], w[1]) {
        // 0/0 and negative ratios give NaN and are dropped; x/0 gives +inf and is kept.
        (Some(prev), Some(cur)) => Some((cur / prev).ln()).filter(|r| !r.is_nan()),
        _ => None,
    }));
    out
}

fn to_cells(values: &[Option<f64>]) -> Vec<Cell> {
    values.iter().map(|&v| Cell::from(v)).collect()
}
