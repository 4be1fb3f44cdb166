use crate::models::{Metric, MetricKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Renders a fraction as a whole-number percentage. Values below one
/// percentage point collapse to `0%`.
pub fn format_percentage(fraction: f64) -> String {
    let pct = fraction * 100.0;
    if pct < 1.0 {
        "0%".to_string()
    } else {
        format!("{}%", pct.round() as i64)
    }
}

pub fn format_currency(value: f64) -> String {
    format!("¥{value:.2}")
}

pub fn format_ratio(value: f64) -> String {
    format!("{value:.2}")
}

/// Grouped count, e.g. `1,234,567`.
pub fn format_count(value: f64) -> String {
    let n = value.round() as i64;
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
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

pub fn format_metric(value: f64, metric: Metric) -> String {
    match metric.kind() {
        MetricKind::Rate => format_percentage(value),
        MetricKind::Currency => format_currency(value),
        MetricKind::Ratio => format_ratio(value),
        MetricKind::Count => format_count(value),
    }
}

/// Magnitude of an overview percent change, always two decimals.
pub fn format_change(change_pct: f64) -> String {
    format!("{:.2}%", change_pct.abs())
}

/// `YYYY-MM-DD HH:MM` for tables; the raw string when it does not parse.
pub fn format_record_date(raw: &str) -> String {
    match parse_record_date(raw) {
        Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
        None => raw.to_string(),
    }
}

/// `HH:MM` for chart axis labels; the raw string when it does not parse.
pub fn format_record_time(raw: &str) -> String {
    match parse_record_date(raw) {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => raw.to_string(),
    }
}

fn parse_record_date(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    for pattern in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, pattern) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
