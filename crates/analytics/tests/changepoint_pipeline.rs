use analytics::{
    compute_returns, events_within_window, nearest_events, summarize_impact, GAP_DAYS_COLUMN,
    LOG_RET_COLUMN, PRICE_COLUMN, START_DATE_COLUMN,
};
use approx::assert_relative_eq;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use core_types::{Cell, Column, Table, TimeSeries};

fn day(offset: i64) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2020, 3, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + Duration::days(offset)
}

fn daily_prices(prices: &[f64]) -> TimeSeries {
    let index = (0..prices.len() as i64).map(day).collect();
    let table = Table::new(vec![Column::new(
        PRICE_COLUMN,
        prices.iter().copied().map(Cell::Float).collect(),
    )])
    .unwrap();
    TimeSeries::new(index, table).unwrap()
}

fn event_table(offsets: &[i64]) -> Table {
    Table::new(vec![
        Column::new(
            START_DATE_COLUMN,
            offsets.iter().map(|&o| Cell::Timestamp(day(o))).collect(),
        ),
        Column::new(
            "name",
            (0..offsets.len()).map(|i| Cell::Text(format!("e{i}"))).collect(),
        ),
    ])
    .unwrap()
}

#[test]
fn log_returns_of_the_reference_example() {
    let returns = compute_returns(&daily_prices(&[100.0, 105.0, 105.0, 110.0])).unwrap();

    assert_eq!(returns.index(), &[day(1), day(2), day(3)]);
    let rets = returns.table().numeric_column(LOG_RET_COLUMN).unwrap();
    assert_relative_eq!(rets[0].unwrap(), 1.05f64.ln(), epsilon = 1e-12);
    assert_relative_eq!(rets[1].unwrap(), 0.0);
    assert_relative_eq!(rets[2].unwrap(), (110.0f64 / 105.0).ln(), epsilon = 1e-12);
}

#[test]
fn clean_prices_lose_exactly_one_row() {
    let prices: Vec<f64> = (1..=50).map(|i| 100.0 + (i as f64).sin()).collect();
    let returns = compute_returns(&daily_prices(&prices)).unwrap();
    assert_eq!(returns.len(), prices.len() - 1);
    assert!(
        returns
            .table()
            .numeric_column(LOG_RET_COLUMN)
            .unwrap()
            .iter()
            .all(Option::is_some)
    );
}

#[test]
fn log_ret_can_be_rederived_from_the_filled_prices() {
    let raw = Table::new(vec![Column::new(
        PRICE_COLUMN,
        vec![
            Cell::Float(50.0),
            Cell::Null,
            Cell::from("52.5"),
            Cell::from("halted"),
            Cell::Float(49.0),
            Cell::Int(51),
        ],
    )])
    .unwrap();
    let series = TimeSeries::new((0..6).map(day).collect(), raw).unwrap();
    let first = compute_returns(&series).unwrap();
    let second = compute_returns(&first).unwrap();

    let prices = first.table().numeric_column(PRICE_COLUMN).unwrap();
    let rets = first.table().numeric_column(LOG_RET_COLUMN).unwrap();
    let rederived = second.table().numeric_column(LOG_RET_COLUMN).unwrap();

    // The second pass drops one more leading row; the rest must agree.
    assert_eq!(rederived.len(), rets.len() - 1);
    for (i, r) in rederived.iter().enumerate() {
        let expected = (prices[i + 1].unwrap() / prices[i].unwrap()).ln();
        assert_relative_eq!(r.unwrap(), expected, epsilon = 1e-12);
        assert_relative_eq!(r.unwrap(), rets[i + 1].unwrap(), epsilon = 1e-12);
    }
}

#[test]
fn windowed_summary_after_compute_returns() {
    let prices = [10.0, 10.0, 10.0, 20.0, 20.0, 20.0];
    let returns = compute_returns(&daily_prices(&prices)).unwrap();
    // Returns rows are days 1..=5; tau at row 2 is day 3, the jump to 20.
    let summary = summarize_impact(&returns, 2, Some(1)).unwrap();

    assert_eq!(summary.tau_date, Some(day(3).date()));
    // pre = days 2..=3 -> prices 10, 20; post = days 3..=4 -> prices 20, 20.
    assert_relative_eq!(summary.pre_price_mean, 15.0);
    assert_relative_eq!(summary.post_price_mean, 20.0);
    assert_relative_eq!(summary.price_pct_change, 100.0 / 3.0, epsilon = 1e-12);
    assert_relative_eq!(summary.pre_ret_mean, 2.0f64.ln() / 2.0, epsilon = 1e-12);
    assert_relative_eq!(summary.post_ret_mean, 2.0f64.ln() / 2.0, epsilon = 1e-12);
    assert_relative_eq!(summary.ret_mean_diff, 0.0, epsilon = 1e-12);
}

#[test]
fn nearest_events_reference_ordering() {
    let events = event_table(&[10, -3, 3, 20]);
    let nearest = nearest_events(day(0), &events, 2).unwrap();

    assert_eq!(
        nearest.column("name").unwrap().values,
        vec![Cell::from("e1"), Cell::from("e2")]
    );
    assert_eq!(
        nearest.column(GAP_DAYS_COLUMN).unwrap().values,
        vec![Cell::Int(3), Cell::Int(3)]
    );

    // Fewer than k events returns all of them, closest first.
    let all = nearest_events(day(0), &events, 10).unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(
        all.column(GAP_DAYS_COLUMN).unwrap().values,
        vec![Cell::Int(3), Cell::Int(3), Cell::Int(10), Cell::Int(20)]
    );
}

#[test]
fn window_filter_boundary() {
    let events = event_table(&[-31, -30, 0, 30, 31]);
    let inside = events_within_window(day(0), &events, 30).unwrap();
    assert_eq!(
        inside.column("name").unwrap().values,
        vec![Cell::from("e1"), Cell::from("e2"), Cell::from("e3")]
    );
}

#[test]
fn empty_event_tables_stay_empty() {
    let empty = Table::empty([START_DATE_COLUMN, "name"]).unwrap();
    for k in [0, 1, 3, 100] {
        assert!(nearest_events(day(0), &empty, k).unwrap().is_empty());
    }
    assert!(events_within_window(day(0), &empty, 90).unwrap().is_empty());
}

#[test]
fn summary_serializes_nan_as_null() {
    let returns = compute_returns(&daily_prices(&[1.0, 2.0])).unwrap();
    let summary = summarize_impact(&returns, 0, None).unwrap();
    let json = serde_json::to_value(summary).unwrap();

    assert_eq!(json["tau_index"], 0);
    assert_eq!(json["tau_date"], "2020-03-02");
    assert!(json["pre_price_mean"].is_null());
    assert_eq!(json["post_price_mean"], 2.0);
}
