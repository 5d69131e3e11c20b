// Executive-summary documents assembled from already-computed summaries.
//
// The document itself is structured data: title, intro, the key-findings
// bullets reused from the page view, one section per chart with
// Observations/Interpretation/Opportunities commentary, and a closing
// paragraph. Rendering to wordprocessing XML is the collaborator's job; here
// the document renders deterministically to Markdown, with each chart
// section referencing the exported series file by slug.
use serde::Serialize;

use crate::chart::{self, ChartSpec, PhaseComparison};
use crate::fixtures::{CategoryShareFixture, PhaseFixture};
use crate::format::{format_pct, format_pct_signed};
use crate::narrative;
use crate::types::{
    CategoryShareSummary, DeltaSummary, DemographicsSummary, PhaseSummary, PriorPeriodRecord,
    PriorPeriodsSummary, YoyRecord,
};

/// MIME type of the downloadable artifact the document feeds into.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Commentary {
    pub label: String,
    pub text: String,
}

fn commentary(items: &[(&str, String)]) -> Vec<Commentary> {
    items
        .iter()
        .map(|(label, text)| Commentary {
            label: label.to_string(),
            text: text.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSection {
    pub heading: String,
    pub chart: ChartSpec,
    pub commentary: Vec<Commentary>,
}

impl ChartSection {
    fn new(chart: ChartSpec, commentary: Vec<Commentary>) -> Self {
        ChartSection {
            heading: chart.title.clone(),
            chart,
            commentary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    /// Fixed artifact filename offered for download.
    pub file_name: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub intro: String,
    pub key_findings: Vec<String>,
    pub sections: Vec<ChartSection>,
    pub closing: String,
}

/// Filesystem-safe slug for chart artifact names.
pub fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut last_sep = true;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_sep = false;
        } else if !last_sep {
            out.push('_');
            last_sep = true;
        }
    }
    out.trim_end_matches('_').to_string()
}

impl ExportDocument {
    /// Deterministic Markdown rendering of the whole document.
    pub fn render_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n\n", self.title));
        if let Some(subtitle) = &self.subtitle {
            out.push_str(&format!("*{}*\n\n", subtitle));
        }
        out.push_str(&self.intro);
        out.push_str("\n\n## Key Findings\n\n");
        for finding in &self.key_findings {
            out.push_str(&format!("- {}\n", finding));
        }
        for section in &self.sections {
            out.push_str(&format!("\n## {}\n\n", section.heading));
            out.push_str(&format!(
                "![{}]({}.csv)\n\n",
                section.chart.title,
                slug(&section.chart.title)
            ));
            for c in &section.commentary {
                out.push_str(&format!("**{}** {}\n\n", c.label, c.text));
            }
        }
        out.push_str(&format!("\n## Summary\n\n{}\n", self.closing));
        out
    }
}

pub fn yoy_document(records: &[YoyRecord], s: &DeltaSummary) -> ExportDocument {
    let top_grower = s
        .top_grower
        .as_ref()
        .map(|t| t.product.clone())
        .unwrap_or_default();
    let top_campaign = records
        .iter()
        .fold(None::<&YoyRecord>, |best, r| match best {
            Some(b) if r.qty_campaign <= b.qty_campaign => Some(b),
            _ => Some(r),
        })
        .map(|r| r.product.clone())
        .unwrap_or_default();
    let avg = s.mean_change.map(|m| format_pct(m, 1)).unwrap_or_default();

    ExportDocument {
        file_name: "YOY_Executive_Summary.docx".to_string(),
        title: "Executive Summary".to_string(),
        subtitle: Some("Year-on-Year Sales Analysis".to_string()),
        intro: "This executive summary provides a concise overview of key findings from the \
                year-on-year (YOY) sales analysis. The analysis compares product sales between \
                the prior year and the recent campaign period, highlighting significant trends \
                and changes in performance metrics."
            .to_string(),
        key_findings: narrative::yoy_key_findings(s),
        sections: vec![
            ChartSection::new(
                chart::yoy_change_chart(records),
                commentary(&[
                    (
                        "Observations:",
                        format!(
                            "This chart displays YOY % change. {} products grew, {} declined. \
                             Top grower: {}.",
                            s.increase_count, s.decrease_count, top_grower
                        ),
                    ),
                    (
                        "Interpretation:",
                        format!(
                            "Green bars indicate positive momentum; red indicate decline. \
                             Avg change: {avg}."
                        ),
                    ),
                    (
                        "Opportunities:",
                        "Sustain successful tactics and investigate declines.".to_string(),
                    ),
                ]),
            ),
            ChartSection::new(
                chart::yoy_volume_chart(records),
                commentary(&[
                    (
                        "Observations:",
                        format!(
                            "Prior vs campaign volumes. Top campaign product: {top_campaign}."
                        ),
                    ),
                    (
                        "Interpretation:",
                        "Higher campaign volumes indicate campaign impact.".to_string(),
                    ),
                    (
                        "Opportunities:",
                        "Replicate successful campaign tactics.".to_string(),
                    ),
                ]),
            ),
        ],
        closing: "Overall positive trend observed. Focus on sustaining momentum for high \
                  performers and diagnose declines for targeted interventions."
            .to_string(),
    }
}

pub fn prior_periods_document(
    records: &[PriorPeriodRecord],
    s: &PriorPeriodsSummary,
) -> ExportDocument {
    ExportDocument {
        file_name: "Prior_Periods_Summary.docx".to_string(),
        title: "Executive Summary: Prior Periods Analysis".to_string(),
        subtitle: None,
        intro: "This executive summary provides a concise overview of key findings from the \
                campaign sales analysis. The analysis compares product sales during the \
                campaign period to the average of prior months."
            .to_string(),
        key_findings: narrative::prior_periods_key_findings(s),
        sections: vec![
            ChartSection::new(
                chart::prior_campaign_vs_avg_chart(records),
                commentary(&[
                    (
                        "Observations:",
                        format!(
                            "{} out of {} products achieved higher sales during the campaign \
                             than their prior average.",
                            s.above_prior_avg.len(),
                            s.delta.row_count
                        ),
                    ),
                    (
                        "Interpretation:",
                        "Products above average likely benefited from campaign activities."
                            .to_string(),
                    ),
                    (
                        "Opportunities:",
                        "Replicate successful tactics and investigate underperformers."
                            .to_string(),
                    ),
                ]),
            ),
            ChartSection::new(
                chart::prior_increase_chart(records),
                commentary(&[
                    (
                        "Observations:",
                        format!(
                            "{} products experienced growth, while {} declined.",
                            s.delta.increase_count, s.delta.decrease_count
                        ),
                    ),
                    (
                        "Interpretation:",
                        "Green bars indicate positive campaign impact.".to_string(),
                    ),
                    (
                        "Opportunities:",
                        "Double down on growth products.".to_string(),
                    ),
                ]),
            ),
        ],
        closing: "The data indicates a generally positive trend in sales performance during \
                  the campaign period. Stakeholders should focus on sustaining the momentum \
                  for top-performing products while investigating the causes behind declining \
                  products."
            .to_string(),
    }
}

pub fn category_document(
    fixture: &CategoryShareFixture,
    s: &CategoryShareSummary,
    brand: &str,
) -> ExportDocument {
    ExportDocument {
        file_name: "Category_Share_Executive_Summary.docx".to_string(),
        title: "Executive Summary: Category Share Analysis".to_string(),
        subtitle: None,
        intro: format!(
            "This executive summary provides a concise overview of key findings from the \
             category share analysis. The analysis compares {brand} and competitor category \
             shares during the campaign period."
        ),
        key_findings: narrative::category_key_findings(s, brand),
        sections: vec![
            ChartSection::new(
                chart::category_share_chart(fixture, brand),
                commentary(&[(
                    "Observations:",
                    format!(
                        "{brand} held an average share of {}.",
                        format_pct(s.avg_campaign_share, 0)
                    ),
                )]),
            ),
            ChartSection::new(
                chart::category_pre_campaign_chart(fixture, brand),
                commentary(&[(
                    "Observations:",
                    "Pre-campaign baseline and % change are shown on the bars.".to_string(),
                )]),
            ),
            ChartSection::new(
                chart::category_comparison_chart(fixture, brand),
                commentary(&[(
                    "Observations:",
                    format!(
                        "{} products improved {brand} share vs pre-campaign.",
                        s.gain_count
                    ),
                )]),
            ),
        ],
        closing: format!(
            "{brand} maintained a strong category share in most products during the campaign \
             period. Focus on sustaining growth where observed."
        ),
    }
}

pub fn units_document(fixture: &PhaseFixture, s: &PhaseSummary) -> ExportDocument {
    let top_gain = s
        .vs_pre
        .top_grower
        .as_ref()
        .map(|t| format!("{} ({})", t.product, format_pct_signed(t.change, 0)))
        .unwrap_or_default();
    ExportDocument {
        file_name: "Pre_During_Post_Campaign_Executive_Summary.docx".to_string(),
        title: "Executive Summary: Pre-, During-, and Post-Campaign Units Analysis".to_string(),
        subtitle: None,
        intro: "This executive summary provides a concise overview of key findings from the \
                units analysis before, during, and after the campaign."
            .to_string(),
        key_findings: narrative::units_key_findings(s),
        sections: vec![
            ChartSection::new(
                chart::phase_volume_chart(
                    fixture,
                    "Units Sold per Product: Pre-, During-, and Post-Campaign",
                    "Units Sold",
                ),
                commentary(&[
                    (
                        "Observations:",
                        "This chart compares units sold per product before, during, and after \
                         the campaign."
                            .to_string(),
                    ),
                    (
                        "Interpretation:",
                        "Campaign period generally drove higher weekly sales across the \
                         portfolio."
                            .to_string(),
                    ),
                    (
                        "Opportunities:",
                        "Focus on strategies to extend the positive effects of campaigns."
                            .to_string(),
                    ),
                ]),
            ),
            ChartSection::new(
                chart::phase_change_chart(
                    fixture,
                    PhaseComparison::VsPre,
                    "% Change in Units Sold: Campaign vs Pre-Campaign",
                    "% Change (Campaign vs Pre)",
                ),
                commentary(&[
                    (
                        "Observations:",
                        format!(
                            "{} products experienced an increase in units sold during the \
                             campaign compared to pre-campaign.",
                            s.vs_pre.increase_count
                        ),
                    ),
                    (
                        "Interpretation:",
                        "Products with strong positive change likely benefited from campaign \
                         activities."
                            .to_string(),
                    ),
                    (
                        "Opportunities:",
                        format!("Replicate successful tactics from top performers like {top_gain}."),
                    ),
                ]),
            ),
            ChartSection::new(
                chart::phase_change_chart(
                    fixture,
                    PhaseComparison::VsPost,
                    "% Change in Units Sold: Campaign vs Post-Campaign",
                    "% Change (Campaign vs Post)",
                ),
                commentary(&[
                    (
                        "Observations:",
                        format!(
                            "{} products maintained or increased sales post-campaign compared \
                             to the campaign period.",
                            s.vs_post.increase_count
                        ),
                    ),
                    (
                        "Interpretation:",
                        "Most products saw a drop in sales after the campaign.".to_string(),
                    ),
                    (
                        "Opportunities:",
                        "Develop post-campaign plans to sustain gains.".to_string(),
                    ),
                ]),
            ),
        ],
        closing: "Campaign period drove higher weekly sales for most products, but these gains \
                  were not always sustained post-campaign."
            .to_string(),
    }
}

pub fn sales_document(fixture: &PhaseFixture, s: &PhaseSummary, currency: &str) -> ExportDocument {
    ExportDocument {
        file_name: "Pre_During_Post_Campaign_Sales_Executive_Summary.docx".to_string(),
        title: "Executive Summary: Pre-, During-, and Post-Campaign Sales Amount Analysis"
            .to_string(),
        subtitle: None,
        intro: "This executive summary provides a concise overview of key findings from the \
                sales amount analysis before, during, and after the campaign."
            .to_string(),
        key_findings: narrative::sales_key_findings(s, currency),
        sections: vec![
            ChartSection::new(
                chart::phase_volume_chart(
                    fixture,
                    "Sales Amount per Product: Pre-, During-, and Post-Campaign",
                    "Sales Amount (ZAR)",
                ),
                commentary(&[(
                    "Observations:",
                    "Most products saw a notable increase in sales during the campaign \
                     compared to the pre-campaign period."
                        .to_string(),
                )]),
            ),
            ChartSection::new(
                chart::phase_change_chart(
                    fixture,
                    PhaseComparison::VsPre,
                    "% Change in Sales Amount: Campaign vs Pre-Campaign",
                    "% Change (Campaign vs Pre Sales)",
                ),
                commentary(&[(
                    "Observations:",
                    format!(
                        "{} products experienced an increase in sales amount during the \
                         campaign compared to pre-campaign.",
                        s.vs_pre.increase_count
                    ),
                )]),
            ),
            ChartSection::new(
                chart::phase_change_chart(
                    fixture,
                    PhaseComparison::VsPost,
                    "% Change in Sales Amount: Campaign vs Post-Campaign",
                    "% Change (Campaign vs Post Sales)",
                ),
                commentary(&[(
                    "Observations:",
                    "Many products saw declines post-campaign.".to_string(),
                )]),
            ),
        ],
        closing: "Campaign increased sales for many products but not all gains were sustained \
                  post-campaign."
            .to_string(),
    }
}

pub fn demographics_document(s: &DemographicsSummary) -> ExportDocument {
    let top_day = s
        .top_day
        .as_ref()
        .map(|d| format!("{} had the highest activity ({}).", d.label, format_pct(d.share, 1)))
        .unwrap_or_default();
    let top_age = s
        .top_age_group
        .as_ref()
        .map(|a| format!("The largest age group was {} ({}).", a.label, format_pct(a.share, 1)))
        .unwrap_or_default();
    ExportDocument {
        file_name: "Shopper_Demographics_Executive_Summary.docx".to_string(),
        title: "Executive Summary: Shopper Demographics During Campaign".to_string(),
        subtitle: None,
        intro: "This executive summary provides a concise overview of shopper demographics \
                during the campaign period."
            .to_string(),
        key_findings: narrative::demographics_key_findings(s),
        sections: vec![
            ChartSection::new(
                chart::demographics_day_chart(s),
                commentary(&[("Observations:", top_day)]),
            ),
            ChartSection::new(
                chart::demographics_gender_chart(s),
                commentary(&[(
                    "Observations:",
                    format!(
                        "Female shoppers made up {} of shoppers.",
                        format_pct(s.female_share, 1)
                    ),
                )]),
            ),
            ChartSection::new(
                chart::demographics_age_chart(s),
                commentary(&[("Observations:", top_age)]),
            ),
        ],
        closing: "The demographic analysis reveals patterns that should inform timing, \
                  targeting, and messaging of future campaigns."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::summarize_yoy;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<YoyRecord> {
        vec![
            YoyRecord {
                product: "A".to_string(),
                qty_prior_year: 100.0,
                qty_campaign: 150.0,
                change: Some(0.5),
            },
            YoyRecord {
                product: "B".to_string(),
                qty_prior_year: 200.0,
                qty_campaign: 150.0,
                change: Some(-0.25),
            },
        ]
    }

    #[test]
    fn slug_is_filesystem_safe() {
        assert_eq!(
            slug("% Change in Units Sold: Campaign vs Pre-Campaign"),
            "change_in_units_sold_campaign_vs_pre_campaign"
        );
        assert_eq!(slug("YOY Sales Change by Product"), "yoy_sales_change_by_product");
    }

    #[test]
    fn rendering_is_deterministic() {
        let records = records();
        let summary = summarize_yoy(&records);
        let doc = yoy_document(&records, &summary);
        assert_eq!(doc.render_markdown(), yoy_document(&records, &summary).render_markdown());
    }

    #[test]
    fn yoy_document_carries_findings_and_charts() {
        let records = records();
        let summary = summarize_yoy(&records);
        let doc = yoy_document(&records, &summary);
        assert_eq!(doc.file_name, "YOY_Executive_Summary.docx");
        assert_eq!(doc.sections.len(), 2);
        let md = doc.render_markdown();
        assert!(md.starts_with("# Executive Summary\n"));
        assert!(md.contains("## Key Findings"));
        assert!(md.contains("The average change in sales across all products was 12.50%."));
        assert!(md.contains("![YOY Sales Change by Product](yoy_sales_change_by_product.csv)"));
        assert!(md.contains("## Summary"));
    }

    #[test]
    fn tie_on_campaign_volume_keeps_first_product() {
        let records = records();
        let summary = summarize_yoy(&records);
        let doc = yoy_document(&records, &summary);
        // both products sold 150 during the campaign; A comes first
        let obs = &doc.sections[1].commentary[0].text;
        assert!(obs.contains("Top campaign product: A."), "{obs}");
    }

    #[test]
    fn mime_type_is_wordprocessing() {
        assert!(DOCX_MIME.ends_with("wordprocessingml.document"));
    }
}
