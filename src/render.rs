use analytics::ImpactSummary;
use chrono::NaiveDateTime;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table as TextTable};
use core_types::{Cell, Table};

/// Formats a float for display. NaN reads as "NaN" rather than disappearing.
pub fn format_float(value: f64, precision: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.precision$}")
    }
}

fn format_cell(cell: &Cell, precision: usize) -> String {
    match cell {
        Cell::Null => String::new(),
        Cell::Bool(b) => b.to_string(),
        Cell::Int(i) => i.to_string(),
        Cell::Float(f) => format_float(*f, precision),
        Cell::Timestamp(ts) => ts.to_string(),
        Cell::Text(s) => s.clone(),
    }
}

fn text_table() -> TextTable {
    let mut table = TextTable::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Two-column metric/value view of an `ImpactSummary`.
pub fn summary_table(summary: &ImpactSummary, precision: usize) -> TextTable {
    let tau_date = summary
        .tau_date
        .map_or_else(|| "out of range".to_string(), |d| d.to_string());
    let metrics = [
        ("pre_price_mean", summary.pre_price_mean),
        ("post_price_mean", summary.post_price_mean),
        ("price_pct_change", summary.price_pct_change),
        ("pre_ret_mean", summary.pre_ret_mean),
        ("post_ret_mean", summary.post_ret_mean),
        ("ret_mean_diff", summary.ret_mean_diff),
        ("pre_ret_std", summary.pre_ret_std),
        ("post_ret_std", summary.post_ret_std),
    ];

    let mut table = text_table();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["tau_index".to_string(), summary.tau_index.to_string()]);
    table.add_row(vec!["tau_date".to_string(), tau_date]);
    for (name, value) in metrics {
        table.add_row(vec![name.to_string(), format_float(value, precision)]);
    }
    table
}

/// Renders a data table, with a leading timestamp column when an index is given.
pub fn data_table(index: Option<&[NaiveDateTime]>, data: &Table, precision: usize) -> TextTable {
    let mut table = text_table();
    let mut header: Vec<String> = Vec::new();
    if index.is_some() {
        header.push("timestamp".to_string());
    }
    header.extend(data.column_names().map(str::to_string));
    table.set_header(header);

    for row in 0..data.len() {
        let mut cells = Vec::with_capacity(data.columns().len() + 1);
        if let Some(ts) = index.and_then(|idx| idx.get(row)) {
            cells.push(ts.to_string());
        }
        cells.extend(
            data.columns()
                .iter()
                .map(|c| format_cell(&c.values[row], precision)),
        );
        table.add_row(cells);
    }
    table
}
