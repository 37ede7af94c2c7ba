use crate::analyzers::{ColumnProfile, TableProfile};
use crate::models::{DailyMean, GroupStats, PeriodStats, RawTable, WeatherRecord};
use comfy_table::{presets, CellAlignment, Table};
use std::fmt::Display;

/// Placeholder for undefined statistics
pub const MISSING: &str = "NaN";

pub fn format_value(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn format_optional(value: Option<f64>) -> String {
    value.map(format_value).unwrap_or_else(|| MISSING.to_string())
}

/// Plain ASCII table; every column after the first is right-aligned
fn new_table(headers: Vec<String>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::ASCII_MARKDOWN);
    table.set_header(headers);
    for column in table.column_iter_mut().skip(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

fn strings(headers: &[&str]) -> Vec<String> {
    headers.iter().map(|h| h.to_string()).collect()
}

pub fn render_raw_head(raw: &RawTable, n: usize) -> String {
    let mut table = Table::new();
    table.load_preset(presets::ASCII_MARKDOWN);
    table.set_header(raw.headers().to_vec());
    for row in raw.head(n) {
        table.add_row(row.clone());
    }
    table.to_string()
}

pub fn render_records(records: &[WeatherRecord]) -> String {
    let mut table = new_table(strings(&["date", "temp", "rain", "humidity"]));
    for record in records {
        table.add_row(vec![
            record.date.to_string(),
            format_value(record.temp),
            format_value(record.rain),
            format_value(record.humidity),
        ]);
    }
    table.to_string()
}

pub fn render_daily(daily: &[DailyMean]) -> String {
    let mut table = new_table(strings(&["date", "temp_mean"]));
    for day in daily {
        table.add_row(vec![day.date.to_string(), format_optional(day.temp_mean)]);
    }
    table.to_string()
}

pub fn render_period_stats<K: Display>(period_label: &str, stats: &[PeriodStats<K>]) -> String {
    let mut table = new_table(strings(&[
        period_label,
        "count",
        "temp_mean",
        "temp_min",
        "temp_max",
        "temp_std",
        "rain_sum",
        "rain_mean",
        "humidity_mean",
    ]));
    for row in stats {
        table.add_row(vec![
            row.period.to_string(),
            row.count.to_string(),
            format_value(row.temp_mean),
            format_value(row.temp_min),
            format_value(row.temp_max),
            format_optional(row.temp_std),
            format_value(row.rain_sum),
            format_value(row.rain_mean),
            format_value(row.humidity_mean),
        ]);
    }
    table.to_string()
}

pub fn render_group_stats<K: Display>(key_label: &str, groups: &[GroupStats<K>]) -> String {
    let mut table = new_table(strings(&[key_label, "count", "temp", "rain", "humidity"]));
    for group in groups {
        table.add_row(vec![
            group.key.to_string(),
            group.count.to_string(),
            format_value(group.temp_mean),
            format_value(group.rain_sum),
            format_value(group.humidity_mean),
        ]);
    }
    table.to_string()
}

const DESCRIBE_ROWS: [&str; 11] = [
    "count", "unique", "top", "freq", "mean", "std", "min", "25%", "50%", "75%", "max",
];

fn describe_cell(column: &ColumnProfile, statistic: &str) -> Option<String> {
    let text = column.text.as_ref();
    let numeric = column.numeric.as_ref();
    match statistic {
        "count" => Some(column.non_null.to_string()),
        "unique" => text.map(|t| t.unique.to_string()),
        "top" => text.map(|t| t.top.clone()),
        "freq" => text.map(|t| t.freq.to_string()),
        "mean" => numeric.map(|n| format_value(n.mean)),
        "std" => numeric.map(|n| format_optional(n.std)),
        "min" => numeric.map(|n| format_value(n.min)),
        "25%" => numeric.map(|n| format_value(n.q25)),
        "50%" => numeric.map(|n| format_value(n.median)),
        "75%" => numeric.map(|n| format_value(n.q75)),
        "max" => numeric.map(|n| format_value(n.max)),
        _ => None,
    }
}

/// Describe-style table: one column per input column, one row per statistic
pub fn render_profile(profile: &TableProfile) -> String {
    let mut headers = vec![String::new()];
    headers.extend(profile.columns.iter().map(|c| c.name.clone()));
    let mut table = new_table(headers);

    for statistic in DESCRIBE_ROWS {
        let mut row = vec![statistic.to_string()];
        row.extend(profile.columns.iter().map(|column| {
            describe_cell(column, statistic).unwrap_or_else(|| MISSING.to_string())
        }));
        table.add_row(row);
    }
    table.to_string()
}
