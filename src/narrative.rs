// Key-findings sentences built by pure templating of summary fields.
//
// The same sentences are shown on the console page and embedded verbatim in
// the export document, so they must be byte-for-byte reproducible from the
// same summary. Sentences whose value is undefined are omitted rather than
// rendered with a blank.
use crate::format::{format_pct, format_pct_signed, human_currency, human_format};
use crate::types::{
    CategoryShareSummary, DeltaSummary, DemographicsSummary, PhaseSummary, PriorPeriodsSummary,
};

pub fn yoy_key_findings(s: &DeltaSummary) -> Vec<String> {
    let mut out = vec![format!(
        "Out of {} products analyzed, {} showed an increase in sales, while {} experienced \
         a decline during the campaign period compared to the prior year.",
        s.row_count, s.increase_count, s.decrease_count
    )];
    if let Some(mean) = s.mean_change {
        out.push(format!(
            "The average change in sales across all products was {}.",
            format_pct(mean, 2)
        ));
    }
    if let Some(top) = &s.top_grower {
        out.push(format!(
            "The product with the highest sales growth was {} with a {} increase.",
            top.product,
            format_pct(top.change, 2)
        ));
    }
    if let Some(bottom) = &s.top_decliner {
        out.push(format!(
            "The product with the largest decline was {} with a {} decrease.",
            bottom.product,
            format_pct(bottom.change, 2)
        ));
    }
    if let Some(growth) = s.total_growth {
        out.push(format!(
            "Overall, total sales moved from {} units in the prior year to {} units in the \
             campaign period, representing a total growth of {}.",
            human_format(s.total_before),
            human_format(s.total_during),
            format_pct(growth, 2)
        ));
    }
    out
}

pub fn prior_periods_key_findings(s: &PriorPeriodsSummary) -> Vec<String> {
    let mut out = vec![format!(
        "Out of {} products analyzed, {} showed an increase in sales during the campaign \
         period compared to the average of prior months, while {} experienced a decline.",
        s.delta.row_count, s.delta.increase_count, s.delta.decrease_count
    )];
    if let Some(mean) = s.delta.mean_change {
        out.push(format!(
            "The average change in sales across all products was {}.",
            format_pct(mean, 2)
        ));
    }
    out.push(format!(
        "{} out of {} products achieved higher sales during the campaign than their prior \
         average.",
        s.above_prior_avg.len(),
        s.delta.row_count
    ));
    if let Some(top) = &s.delta.top_grower {
        out.push(format!(
            "Top grower vs prior average: {} ({}).",
            top.product,
            format_pct_signed(top.change, 1)
        ));
    }
    out
}

pub fn category_key_findings(s: &CategoryShareSummary, brand: &str) -> Vec<String> {
    let mut out = vec![
        format!(
            "{brand}'s average category share during the campaign was {}, compared to \
             competitors' {}.",
            format_pct(s.avg_campaign_share, 0),
            format_pct(s.avg_competitor_share, 0)
        ),
        format!(
            "{} products increased their {brand} category share during the campaign, while \
             {} saw a decrease.",
            s.gain_count, s.loss_count
        ),
    ];
    if let (Some(gain), Some(loss)) = (&s.largest_gain, &s.largest_loss) {
        out.push(format!(
            "The largest gain in share was for {} ({}), while the largest loss was for {} ({}).",
            gain.product,
            format_pct_signed(gain.change, 0),
            loss.product,
            format_pct_signed(loss.change, 0)
        ));
    }
    out
}

pub fn units_key_findings(s: &PhaseSummary) -> Vec<String> {
    let mut out = vec![format!(
        "{} of {} products saw an increase in weekly units sold during the campaign compared \
         to the pre-campaign period, while {} declined.",
        s.vs_pre.increase_count, s.row_count, s.vs_pre.decrease_count
    )];
    if let Some(top) = &s.vs_pre.top_grower {
        out.push(format!(
            "The largest campaign gain was for {} ({}).",
            top.product,
            format_pct_signed(top.change, 0)
        ));
    }
    if let Some(mean) = s.vs_pre.mean_change {
        out.push(format!(
            "The average change versus the pre-campaign period was {}.",
            format_pct(mean, 2)
        ));
    }
    out.push(format!(
        "{} products maintained or increased sales post-campaign compared to the campaign \
         period.",
        s.vs_post.increase_count
    ));
    out
}

pub fn sales_key_findings(s: &PhaseSummary, currency: &str) -> Vec<String> {
    let mut out = vec![format!(
        "{} of {} products saw an increase in weekly sales amount during the campaign \
         compared to the pre-campaign period, while {} declined.",
        s.vs_pre.increase_count, s.row_count, s.vs_pre.decrease_count
    )];
    if let Some(top) = &s.vs_pre.top_grower {
        out.push(format!(
            "The largest campaign gain was for {} ({}).",
            top.product,
            format_pct_signed(top.change, 0)
        ));
    }
    out.push(format!(
        "Total weekly sales moved from {} pre-campaign to {} during the campaign and {} \
         after it.",
        human_currency(s.total_pre, currency),
        human_currency(s.total_campaign, currency),
        human_currency(s.total_post, currency)
    ));
    out.push(format!(
        "{} products maintained or increased sales post-campaign compared to the campaign \
         period.",
        s.vs_post.increase_count
    ));
    out
}

pub fn demographics_key_findings(s: &DemographicsSummary) -> Vec<String> {
    let mut out = Vec::new();
    if let (Some(top), Some(low)) = (&s.top_day, &s.low_day) {
        out.push(format!(
            "Shopper activity peaked on {} ({}) and was lowest on {} ({}).",
            top.label,
            format_pct(top.share, 1),
            low.label,
            format_pct(low.share, 1)
        ));
    }
    out.push(format!(
        "Female shoppers represented {} of the total, with males at {}.",
        format_pct(s.female_share, 1),
        format_pct(s.male_share, 1)
    ));
    if let Some(age) = &s.top_age_group {
        out.push(format!(
            "The largest age group was {} ({}).",
            age.label,
            format_pct(age.share, 1)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::DemographicsFixture;
    use crate::reports::{summarize_demographics, summarize_yoy};
    use crate::types::YoyRecord;
    use pretty_assertions::assert_eq;

    fn reference_summary() -> DeltaSummary {
        summarize_yoy(&[
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
        ])
    }

    #[test]
    fn yoy_sentences_from_reference_scenario() {
        let findings = yoy_key_findings(&reference_summary());
        assert_eq!(
            findings,
            vec![
                "Out of 2 products analyzed, 1 showed an increase in sales, while 1 experienced \
                 a decline during the campaign period compared to the prior year."
                    .to_string(),
                "The average change in sales across all products was 12.50%.".to_string(),
                "The product with the highest sales growth was A with a 50.00% increase."
                    .to_string(),
                "The product with the largest decline was B with a -25.00% decrease."
                    .to_string(),
                "Overall, total sales moved from 300 units in the prior year to 300 units in \
                 the campaign period, representing a total growth of 0.00%."
                    .to_string(),
            ]
        );
    }

    #[test]
    fn sentences_are_deterministic() {
        let summary = reference_summary();
        assert_eq!(yoy_key_findings(&summary), yoy_key_findings(&summary));

        let demo = summarize_demographics(&DemographicsFixture::default());
        assert_eq!(
            demographics_key_findings(&demo),
            demographics_key_findings(&demo)
        );
    }

    #[test]
    fn undefined_values_omit_their_sentences() {
        let empty = summarize_yoy(&[]);
        let findings = yoy_key_findings(&empty);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].starts_with("Out of 0 products"));
    }
}
