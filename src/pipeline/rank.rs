use std::cmp::Ordering;

use crate::model::{MergedRecord, RankedRow};

/// Size of the table shown under the map.
pub const TOP_N: usize = 10;

pub const MISSING_VALUE: &str = "N/A";

/// Highest-valued counties first, nulls last, ties in merge order.
pub fn top_n(merged: &[MergedRecord], n: usize) -> Vec<RankedRow> {
    let mut order: Vec<&MergedRecord> = merged.iter().collect();
    // Vec::sort_by is stable, so equal values keep merge order.
    order.sort_by(|a, b| descending_nulls_last(a.metric_value, b.metric_value));
    order
        .into_iter()
        .take(n)
        .map(|r| RankedRow {
            county_name: r.county_name.clone(),
            fips: r.fips.clone(),
            value: r.metric_value,
            formatted_value: r
                .metric_value
                .map(format_thousands)
                .unwrap_or_else(|| MISSING_VALUE.to_string()),
        })
        .collect()
}

fn descending_nulls_last(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Round to a whole number (ties to even) and group digits in threes: `1234567.4` -> `1,234,567`.
pub fn format_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let negative = value < 0.0 && digits.bytes().any(|b| b != b'0');

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
