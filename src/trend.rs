use crate::format;
use crate::models::{Metric, MetricKind, MetricSample};
use serde::Serialize;

/// Chart payload for one material: chronological axis labels plus the raw
/// value series of every metric. The page picks two series and redraws
/// without another fetch.
#[derive(Debug, Serialize)]
pub struct TrendData {
    /// `HH:MM` labels along the x axis, oldest first.
    pub labels: Vec<String>,
    /// Full `YYYY-MM-DD HH:MM` stamps matching `labels`, for tooltips.
    pub dates: Vec<String>,
    pub series: Vec<TrendSeries>,
}

#[derive(Debug, Serialize)]
pub struct TrendSeries {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: MetricKind,
    pub values: Vec<f64>,
}

/// Samples arrive newest-first; the chart wants them chronological.
pub fn build_trend(samples: &[MetricSample]) -> TrendData {
    let chronological: Vec<&MetricSample> = samples.iter().rev().collect();

    TrendData {
        labels: chronological
            .iter()
            .map(|sample| format::format_record_time(&sample.record_date))
            .collect(),
        dates: chronological
            .iter()
            .map(|sample| format::format_record_date(&sample.record_date))
            .collect(),
        series: Metric::ALL
            .iter()
            .map(|&metric| TrendSeries {
                key: metric.key(),
                label: metric.label(),
                kind: metric.kind(),
                values: chronological
                    .iter()
                    .map(|sample| metric.value_of(sample))
                    .collect(),
            })
            .collect(),
    }
}
