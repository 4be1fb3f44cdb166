use serde::{Deserialize, Serialize};

/// The seven lifecycle labels the data pipeline assigns to a material.
/// The wire format carries the labels verbatim; filtering is exact string
/// equality on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "跑量素材")]
    Scaling,
    #[serde(rename = "跑量素材-阶段放弃")]
    ScalingAbandoned,
    #[serde(rename = "投放中")]
    Live,
    #[serde(rename = "投放中-阶段放弃")]
    LiveAbandoned,
    #[serde(rename = "一轮测试")]
    FirstRoundTest,
    #[serde(rename = "一阶段测试-暂停")]
    PhaseOneTestPaused,
    #[serde(rename = "二阶段刺激")]
    PhaseTwoBoost,
}

impl Status {
    pub const ALL: [Status; 7] = [
        Status::Scaling,
        Status::ScalingAbandoned,
        Status::Live,
        Status::LiveAbandoned,
        Status::FirstRoundTest,
        Status::PhaseOneTestPaused,
        Status::PhaseTwoBoost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Scaling => "跑量素材",
            Status::ScalingAbandoned => "跑量素材-阶段放弃",
            Status::Live => "投放中",
            Status::LiveAbandoned => "投放中-阶段放弃",
            Status::FirstRoundTest => "一轮测试",
            Status::PhaseOneTestPaused => "一阶段测试-暂停",
            Status::PhaseTwoBoost => "二阶段刺激",
        }
    }
}

/// One entry of the remote index document. `current_status` stays a plain
/// string so an index carrying a label outside [`Status::ALL`] still decodes.
#[derive(Debug, Clone, Deserialize)]
pub struct Material {
    pub id: String,
    pub current_status: String,
}

#[derive(Debug, Deserialize)]
pub struct MaterialIndex {
    pub materials: Vec<Material>,
}

/// One time-stamped metrics record of a material's history. Sequences are
/// delivered newest-first: index 0 is the current sample.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricSample {
    pub overall_impressions: f64,
    pub overall_clicks: f64,
    pub overall_ctr: f64,
    pub overall_conversion_rate: f64,
    pub overall_orders: f64,
    pub overall_sales: f64,
    pub overall_spend: f64,
    pub spend_percentage: f64,
    pub basic_spend: f64,
    pub roi: f64,
    pub cost_per_order: f64,
    pub record_date: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct MaterialDetail {
    pub id: String,
    pub current_status: String,
    pub data: Vec<MetricSample>,
}

/// Flat record of the legacy single-file feed, newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacyRecord {
    #[serde(rename = "ID")]
    pub id: String,
    pub roi: f64,
    pub overall_clicks: f64,
    pub overall_impressions: f64,
    pub record_date: String,
}

/// How a metric's values render: as a percentage of a fraction, a ¥ amount,
/// a bare two-decimal ratio, or a grouped count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    Rate,
    Currency,
    Ratio,
    Count,
}

/// The eleven tracked metrics of a [`MetricSample`], in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Impressions,
    Clicks,
    Ctr,
    ConversionRate,
    Orders,
    Sales,
    Spend,
    SpendPercentage,
    BasicSpend,
    Roi,
    CostPerOrder,
}

impl Metric {
    pub const ALL: [Metric; 11] = [
        Metric::Impressions,
        Metric::Clicks,
        Metric::Ctr,
        Metric::ConversionRate,
        Metric::Orders,
        Metric::Sales,
        Metric::Spend,
        Metric::SpendPercentage,
        Metric::BasicSpend,
        Metric::Roi,
        Metric::CostPerOrder,
    ];

    /// Wire key of the metric, as it appears in detail documents.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Impressions => "overall_impressions",
            Metric::Clicks => "overall_clicks",
            Metric::Ctr => "overall_ctr",
            Metric::ConversionRate => "overall_conversion_rate",
            Metric::Orders => "overall_orders",
            Metric::Sales => "overall_sales",
            Metric::Spend => "overall_spend",
            Metric::SpendPercentage => "spend_percentage",
            Metric::BasicSpend => "basic_spend",
            Metric::Roi => "roi",
            Metric::CostPerOrder => "cost_per_order",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Metric::Impressions => "整体展现次数",
            Metric::Clicks => "整体点击次数",
            Metric::Ctr => "整体点击率",
            Metric::ConversionRate => "整体转化率",
            Metric::Orders => "整体成交订单数",
            Metric::Sales => "整体成交金额",
            Metric::Spend => "整体消耗",
            Metric::SpendPercentage => "整体消耗占比",
            Metric::BasicSpend => "基础消耗",
            Metric::Roi => "整体支付ROI",
            Metric::CostPerOrder => "整体成交订单成本",
        }
    }

    /// One explicit mapping instead of substring probing on metric names, so
    /// the click-through rate formats as a rate on every surface.
    pub fn kind(self) -> MetricKind {
        match self {
            Metric::Ctr | Metric::ConversionRate | Metric::SpendPercentage => MetricKind::Rate,
            Metric::Sales | Metric::Spend | Metric::BasicSpend | Metric::CostPerOrder => {
                MetricKind::Currency
            }
            Metric::Roi => MetricKind::Ratio,
            Metric::Impressions | Metric::Clicks | Metric::Orders => MetricKind::Count,
        }
    }

    pub fn value_of(self, sample: &MetricSample) -> f64 {
        match self {
            Metric::Impressions => sample.overall_impressions,
            Metric::Clicks => sample.overall_clicks,
            Metric::Ctr => sample.overall_ctr,
            Metric::ConversionRate => sample.overall_conversion_rate,
            Metric::Orders => sample.overall_orders,
            Metric::Sales => sample.overall_sales,
            Metric::Spend => sample.overall_spend,
            Metric::SpendPercentage => sample.spend_percentage,
            Metric::BasicSpend => sample.basic_spend,
            Metric::Roi => sample.roi,
            Metric::CostPerOrder => sample.cost_per_order,
        }
    }
}
