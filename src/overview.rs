use crate::format;
use crate::models::{Metric, MetricSample};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Up,
    Down,
    Flat,
}

/// One overview card: the formatted current value of a metric and its change
/// against the previous sample.
#[derive(Debug, Serialize)]
pub struct OverviewCard {
    pub key: &'static str,
    pub label: &'static str,
    pub value: String,
    pub direction: ChangeDirection,
    pub change: String,
}

pub fn build_overview(current: &MetricSample, previous: Option<&MetricSample>) -> Vec<OverviewCard> {
    Metric::ALL
        .iter()
        .map(|&metric| {
            let value = metric.value_of(current);
            let (direction, change) =
                percent_change(value, previous.map(|sample| metric.value_of(sample)));
            OverviewCard {
                key: metric.key(),
                label: metric.label(),
                value: format::format_metric(value, metric),
                direction,
                change,
            }
        })
        .collect()
}

/// Percent change against the previous value. A missing or zero previous
/// value is neutral, rendered as `-`.
pub fn percent_change(current: f64, previous: Option<f64>) -> (ChangeDirection, String) {
    let change = match previous {
        Some(prev) if prev != 0.0 => (current - prev) / prev * 100.0,
        _ => 0.0,
    };

    if change > 0.0 {
        (ChangeDirection::Up, format::format_change(change))
    } else if change < 0.0 {
        (ChangeDirection::Down, format::format_change(change))
    } else {
        (ChangeDirection::Flat, "-".to_string())
    }
}
