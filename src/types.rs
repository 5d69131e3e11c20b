// Typed records and summary structs flowing through the pipeline.
//
// Percentage-valued fields are fractions (0.05 = 5%) everywhere; formatting
// to percent strings happens only at presentation time. Undefined
// computations are `None`, never NaN.
use serde::Serialize;
use tabled::Tabled;

use crate::format::{format_pct_opt, human_format};

/// One product row of the year-over-year spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct YoyRecord {
    pub product: String,
    pub qty_prior_year: f64,
    pub qty_campaign: f64,
    /// Fractional change vs the prior-year average; `None` when the source
    /// cell is blank.
    pub change: Option<f64>,
}

/// One product row of the prior-periods spreadsheet, located by fuzzy
/// column match.
#[derive(Debug, Clone, PartialEq)]
pub struct PriorPeriodRecord {
    pub product: String,
    pub prior_year: Option<f64>,
    pub feb_to_may: Option<f64>,
    pub campaign: Option<f64>,
    pub change: Option<f64>,
    /// Row-wise mean of `prior_year` and `feb_to_may`; `None` when either
    /// side is missing.
    pub avg_prior: Option<f64>,
}

/// The extremum row of a delta column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremumRow {
    pub product: String,
    pub change: f64,
}

/// Shared descriptive aggregate over a (before, during, delta) dataset.
///
/// `total_growth` is `(during - before) / before`, undefined when the
/// before-total is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeltaSummary {
    pub row_count: usize,
    pub increase_count: usize,
    pub decrease_count: usize,
    pub mean_change: Option<f64>,
    pub top_grower: Option<ExtremumRow>,
    pub top_decliner: Option<ExtremumRow>,
    pub total_before: f64,
    pub total_during: f64,
    pub total_growth: Option<f64>,
}

/// Aggregate for the prior-periods report: the shared delta summary plus the
/// campaign-vs-prior-average comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriorPeriodsSummary {
    pub delta: DeltaSummary,
    pub above_prior_avg: Vec<String>,
    pub below_prior_avg: Vec<String>,
    pub top_campaign_product: Option<String>,
    pub top_prior_avg_product: Option<String>,
}

/// Aggregate for the category-share report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShareSummary {
    pub row_count: usize,
    pub avg_campaign_share: f64,
    pub avg_competitor_share: f64,
    pub gain_count: usize,
    pub loss_count: usize,
    pub largest_gain: Option<ExtremumRow>,
    pub largest_loss: Option<ExtremumRow>,
}

/// Aggregate for the pre/during/post campaign reports (units and sales
/// amount share this shape).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseSummary {
    pub row_count: usize,
    pub total_pre: f64,
    pub total_campaign: f64,
    pub total_post: f64,
    pub vs_pre: DeltaSummary,
    pub vs_post: DeltaSummary,
}

/// One labeled share bucket (fraction of its group, 0..=1).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareBucket {
    pub label: String,
    pub share: f64,
}

/// Aggregate for the shopper-demographics report. Shares within each group
/// sum to 1 for non-empty input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicsSummary {
    pub day_shares: Vec<ShareBucket>,
    pub gender_shares: Vec<ShareBucket>,
    pub age_shares: Vec<ShareBucket>,
    pub top_day: Option<ShareBucket>,
    pub low_day: Option<ShareBucket>,
    pub female_share: f64,
    pub male_share: f64,
    pub top_age_group: Option<ShareBucket>,
}

/// Console preview row for the YOY dataset.
#[derive(Debug, Clone, Tabled)]
pub struct YoyPreviewRow {
    #[tabled(rename = "Product Description")]
    pub product: String,
    #[tabled(rename = "QTY Prior Year")]
    pub qty_prior_year: String,
    #[tabled(rename = "QTY Campaign")]
    pub qty_campaign: String,
    #[tabled(rename = "Change")]
    pub change: String,
}

impl From<&YoyRecord> for YoyPreviewRow {
    fn from(r: &YoyRecord) -> Self {
        YoyPreviewRow {
            product: r.product.clone(),
            qty_prior_year: human_format(r.qty_prior_year),
            qty_campaign: human_format(r.qty_campaign),
            change: format_pct_opt(r.change, 1),
        }
    }
}

/// Console preview row for a chart series point.
#[derive(Debug, Clone, Tabled)]
pub struct ChartPreviewRow {
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Series")]
    pub series: String,
    #[tabled(rename = "Value")]
    pub value: String,
}
