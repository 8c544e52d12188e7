use crate::error::AnalyticsError;
use crate::report::ImpactSummary;
use crate::stats::{day_window, mean, pct_change, sample_std};
use crate::{LOG_RET_COLUMN, PRICE_COLUMN};
use chrono::NaiveDateTime;
use core_types::TimeSeries;

/// Computes before/after statistics for the changepoint at row `tau_index`.
///
/// Without `window_days`, `pre` is every row before `tau_index` and `post` is every row
/// from `tau_index` on. With `window_days`, both slices are cut by date around the
/// changepoint's timestamp: `pre` covers `[tau - days, tau]` and `post` covers
/// `[tau, tau + days]`. A row stamped exactly at the changepoint therefore counts in
/// both slices.
///
/// An out-of-range `tau_index` yields empty slices and an all-NaN summary.
///
/// # Errors
///
/// Fails only when `Price` or `log_ret` is missing from the series.
pub fn summarize_impact(
    series: &TimeSeries,
    tau_index: usize,
    window_days: Option<u32>,
) -> Result<ImpactSummary, AnalyticsError> {
    let table = series.table();
    let prices = table.numeric_column(PRICE_COLUMN)?;
    let rets = table.numeric_column(LOG_RET_COLUMN)?;
    let tau = series.timestamp_at(tau_index);

    let (pre, post): (Vec<usize>, Vec<usize>) = match (tau, window_days) {
        (None, _) => {
            tracing::warn!(tau_index, rows = series.len(), "Changepoint index out of range");
            (Vec::new(), Vec::new())
        }
        (Some(_), None) => ((0..tau_index).collect(), (tau_index..series.len()).collect()),
        (Some(tau), Some(days)) => {
            let (start, end) = day_window(tau, days);
            let within = |lo: NaiveDateTime, hi: NaiveDateTime| {
                series
                    .index()
                    .iter()
                    .enumerate()
                    .filter(move |&(_, ts)| lo <= *ts && *ts <= hi)
                    .map(|(i, _)| i)
                    .collect::<Vec<_>>()
            };
            (within(start, tau), within(tau, end))
        }
    };
    tracing::debug!(
        tau_index,
        ?window_days,
        pre_rows = pre.len(),
        post_rows = post.len(),
        "Selected changepoint slices"
    );

    let pick = |values: &[Option<f64>], rows: &[usize]| -> Vec<f64> {
        rows.iter().filter_map(|&i| values[i]).collect()
    };
    let (pre_prices, post_prices) = (pick(&prices, &pre), pick(&prices, &post));
    let (pre_rets, post_rets) = (pick(&rets, &pre), pick(&rets, &post));

    let pre_price_mean = mean(&pre_prices);
    let post_price_mean = mean(&post_prices);
    let pre_ret_mean = mean(&pre_rets);
    let post_ret_mean = mean(&post_rets);

    Ok(ImpactSummary {
        tau_index,
        tau_date: tau.map(|ts| ts.date()),
        pre_price_mean,
        post_price_mean,
        price_pct_change: pct_change(pre_price_mean, post_price_mean),
        pre_ret_mean,
        post_ret_mean,
        ret_mean_diff: post_ret_mean - pre_ret_mean,
        pre_ret_std: sample_std(&pre_rets),
        post_ret_std: sample_std(&post_rets),
    })
}
