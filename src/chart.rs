// Chart specifications handed to the charting collaborator.
//
// A `ChartSpec` is plain data: ordered (label, value) series plus axis
// metadata, never mutated after construction. Fraction-valued inputs are
// scaled to percent points here so every chart axis reads in display units.
use serde::Serialize;

use crate::fixtures::{CategoryShareFixture, PhaseFixture};
use crate::types::{DemographicsSummary, PriorPeriodRecord, YoyRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Bar,
    GroupedBar,
    Pie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub points: Vec<DataPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

fn series<'a, I>(name: &str, points: I) -> Series
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    Series {
        name: name.to_string(),
        points: points
            .into_iter()
            .map(|(label, value)| DataPoint {
                label: label.to_string(),
                value,
            })
            .collect(),
    }
}

pub fn yoy_change_chart(records: &[YoyRecord]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: "YOY Sales Change by Product".to_string(),
        y_label: "Increase in Sales from Prior Year (%)".to_string(),
        series: vec![series(
            "YOY Change",
            records
                .iter()
                .filter_map(|r| r.change.map(|c| (r.product.as_str(), c * 100.0))),
        )],
    }
}

pub fn yoy_volume_chart(records: &[YoyRecord]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::GroupedBar,
        title: "YOY Sales Comparison by Product".to_string(),
        y_label: "Quantity Sold".to_string(),
        series: vec![
            series(
                "Prior Year",
                records.iter().map(|r| (r.product.as_str(), r.qty_prior_year)),
            ),
            series(
                "Campaign Period",
                records.iter().map(|r| (r.product.as_str(), r.qty_campaign)),
            ),
        ],
    }
}

pub fn prior_campaign_vs_avg_chart(records: &[PriorPeriodRecord]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::GroupedBar,
        title: "Campaign Period Sales vs. Average of Prior Months".to_string(),
        y_label: "Quantity Sold".to_string(),
        series: vec![
            series(
                "Campaign Period Sales",
                records
                    .iter()
                    .filter_map(|r| r.campaign.map(|v| (r.product.as_str(), v))),
            ),
            series(
                "Avg of Prior Months",
                records
                    .iter()
                    .filter_map(|r| r.avg_prior.map(|v| (r.product.as_str(), v))),
            ),
        ],
    }
}

pub fn prior_increase_chart(records: &[PriorPeriodRecord]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: "Sales Increase During Campaign vs. Avg of Prior Months".to_string(),
        y_label: "Sales Increase (%)".to_string(),
        series: vec![series(
            "Increase",
            records
                .iter()
                .filter_map(|r| r.change.map(|c| (r.product.as_str(), c * 100.0))),
        )],
    }
}

pub fn category_share_chart(fixture: &CategoryShareFixture, brand: &str) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::GroupedBar,
        title: "Category Share During Campaign Period by Product".to_string(),
        y_label: "Category Share (%)".to_string(),
        series: vec![
            series(
                brand,
                fixture
                    .rows
                    .iter()
                    .map(|r| (r.product.as_str(), r.campaign_share * 100.0)),
            ),
            series(
                "Competitors",
                fixture
                    .rows
                    .iter()
                    .map(|r| (r.product.as_str(), r.competitor_share * 100.0)),
            ),
        ],
    }
}

pub fn category_pre_campaign_chart(fixture: &CategoryShareFixture, brand: &str) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: format!("Pre-Campaign {brand} Share by Product"),
        y_label: format!("Pre-Campaign {brand} Share (%)"),
        series: vec![series(
            &format!("Pre-Campaign {brand}"),
            fixture
                .rows
                .iter()
                .map(|r| (r.product.as_str(), r.pre_campaign_share * 100.0)),
        )],
    }
}

pub fn category_comparison_chart(fixture: &CategoryShareFixture, brand: &str) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::GroupedBar,
        title: "Category Share Comparison by Product (Campaign vs Pre-Campaign)".to_string(),
        y_label: "Category Share (%)".to_string(),
        series: vec![
            series(
                &format!("{brand} (Campaign)"),
                fixture
                    .rows
                    .iter()
                    .map(|r| (r.product.as_str(), r.campaign_share * 100.0)),
            ),
            series(
                &format!("{brand} (Pre-Campaign)"),
                fixture
                    .rows
                    .iter()
                    .map(|r| (r.product.as_str(), r.pre_campaign_share * 100.0)),
            ),
            series(
                "Competitor (Campaign)",
                fixture
                    .rows
                    .iter()
                    .map(|r| (r.product.as_str(), r.competitor_share * 100.0)),
            ),
        ],
    }
}

/// Three-phase volume chart shared by the units and sales-amount reports.
pub fn phase_volume_chart(fixture: &PhaseFixture, title: &str, y_label: &str) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::GroupedBar,
        title: title.to_string(),
        y_label: y_label.to_string(),
        series: vec![
            series(
                "Pre-Campaign",
                fixture.rows.iter().map(|r| (r.product.as_str(), r.pre)),
            ),
            series(
                "Campaign",
                fixture.rows.iter().map(|r| (r.product.as_str(), r.campaign)),
            ),
            series(
                "Post-Campaign",
                fixture.rows.iter().map(|r| (r.product.as_str(), r.post)),
            ),
        ],
    }
}

/// Which phase comparison a change chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseComparison {
    VsPre,
    VsPost,
}

pub fn phase_change_chart(
    fixture: &PhaseFixture,
    comparison: PhaseComparison,
    title: &str,
    y_label: &str,
) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: title.to_string(),
        y_label: y_label.to_string(),
        series: vec![series(
            "% Change",
            fixture.rows.iter().map(|r| {
                let change = match comparison {
                    PhaseComparison::VsPre => r.change_vs_pre,
                    PhaseComparison::VsPost => r.change_vs_post,
                };
                (r.product.as_str(), change * 100.0)
            }),
        )],
    }
}

pub fn demographics_day_chart(summary: &DemographicsSummary) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: "Shoppers by Day of Week (Average % Split)".to_string(),
        y_label: "Share of Shoppers (%)".to_string(),
        series: vec![series(
            "Share",
            summary
                .day_shares
                .iter()
                .map(|b| (b.label.as_str(), b.share * 100.0)),
        )],
    }
}

pub fn demographics_gender_chart(summary: &DemographicsSummary) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Pie,
        title: "Gender Breakdown (Average % Split)".to_string(),
        y_label: "Share of Shoppers (%)".to_string(),
        series: vec![series(
            "Share",
            summary
                .gender_shares
                .iter()
                .map(|b| (b.label.as_str(), b.share * 100.0)),
        )],
    }
}

pub fn demographics_age_chart(summary: &DemographicsSummary) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: "Age Breakdown (Average % Split)".to_string(),
        y_label: "Share of Shoppers (%)".to_string(),
        series: vec![series(
            "Share",
            summary
                .age_shares
                .iter()
                .map(|b| (b.label.as_str(), b.share * 100.0)),
        )],
    }
}
