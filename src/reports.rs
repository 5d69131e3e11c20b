// Report aggregators: pure functions from a dataset to its summary record.
//
// Every summary is recomputed from source data on each page view; nothing
// here is cached or mutated after construction.
use crate::fixtures::{
    CategoryShareFixture, DemographicsFixture, PhaseFixture, AGE_LABELS, DAY_LABELS,
    GENDER_LABELS,
};
use crate::types::{
    CategoryShareSummary, DeltaSummary, DemographicsSummary, ExtremumRow, PhaseSummary,
    PriorPeriodRecord, PriorPeriodsSummary, ShareBucket, YoyRecord,
};
use crate::util::{average, mean_defined};

/// Descriptive aggregate over (name, before, during, delta) rows.
///
/// Zero deltas count as neither increase nor decrease; undefined deltas are
/// skipped by the mean and the extrema. Extremum ties keep the first row in
/// input order. The growth ratio is undefined when the before-total is zero.
pub fn delta_summary<'a, I>(rows: I) -> DeltaSummary
where
    I: IntoIterator<Item = (&'a str, f64, f64, Option<f64>)>,
{
    let mut row_count = 0usize;
    let mut increase_count = 0usize;
    let mut decrease_count = 0usize;
    let mut changes: Vec<Option<f64>> = Vec::new();
    let mut top_grower: Option<ExtremumRow> = None;
    let mut top_decliner: Option<ExtremumRow> = None;
    let mut total_before = 0.0;
    let mut total_during = 0.0;

    for (name, before, during, change) in rows {
        row_count += 1;
        total_before += before;
        total_during += during;
        changes.push(change);
        let Some(change) = change else { continue };
        if change > 0.0 {
            increase_count += 1;
        } else if change < 0.0 {
            decrease_count += 1;
        }
        if top_grower.as_ref().map_or(true, |t| change > t.change) {
            top_grower = Some(ExtremumRow {
                product: name.to_string(),
                change,
            });
        }
        if top_decliner.as_ref().map_or(true, |t| change < t.change) {
            top_decliner = Some(ExtremumRow {
                product: name.to_string(),
                change,
            });
        }
    }

    let total_growth = if total_before == 0.0 {
        None
    } else {
        Some((total_during - total_before) / total_before)
    };
    DeltaSummary {
        row_count,
        increase_count,
        decrease_count,
        mean_change: mean_defined(&changes),
        top_grower,
        top_decliner,
        total_before,
        total_during,
        total_growth,
    }
}

/// Year-over-year comparison: prior-year volumes against the campaign period.
pub fn summarize_yoy(records: &[YoyRecord]) -> DeltaSummary {
    delta_summary(records.iter().map(|r| {
        (
            r.product.as_str(),
            r.qty_prior_year,
            r.qty_campaign,
            r.change,
        )
    }))
}

fn max_by_value<'a, I>(rows: I) -> Option<String>
where
    I: IntoIterator<Item = (&'a str, Option<f64>)>,
{
    let mut best: Option<(String, f64)> = None;
    for (name, value) in rows {
        let Some(value) = value else { continue };
        if best.as_ref().map_or(true, |(_, b)| value > *b) {
            best = Some((name.to_string(), value));
        }
    }
    best.map(|(name, _)| name)
}

/// Campaign sales against the average of the prior comparison months.
pub fn summarize_prior_periods(records: &[PriorPeriodRecord]) -> PriorPeriodsSummary {
    let delta = delta_summary(records.iter().map(|r| {
        (
            r.product.as_str(),
            r.avg_prior.unwrap_or(0.0),
            r.campaign.unwrap_or(0.0),
            r.change,
        )
    }));
    let mut above = Vec::new();
    let mut below = Vec::new();
    for r in records {
        if let (Some(campaign), Some(avg)) = (r.campaign, r.avg_prior) {
            if campaign > avg {
                above.push(r.product.clone());
            } else if campaign < avg {
                below.push(r.product.clone());
            }
        }
    }
    PriorPeriodsSummary {
        delta,
        above_prior_avg: above,
        below_prior_avg: below,
        top_campaign_product: max_by_value(
            records.iter().map(|r| (r.product.as_str(), r.campaign)),
        ),
        top_prior_avg_product: max_by_value(
            records.iter().map(|r| (r.product.as_str(), r.avg_prior)),
        ),
    }
}

/// Category share held against competitors during and before the campaign.
pub fn summarize_category(fixture: &CategoryShareFixture) -> CategoryShareSummary {
    let rows = &fixture.rows;
    let campaign: Vec<f64> = rows.iter().map(|r| r.campaign_share).collect();
    let competitor: Vec<f64> = rows.iter().map(|r| r.competitor_share).collect();
    let mut gain_count = 0usize;
    let mut loss_count = 0usize;
    let mut largest_gain: Option<ExtremumRow> = None;
    let mut largest_loss: Option<ExtremumRow> = None;
    for r in rows {
        if r.change > 0.0 {
            gain_count += 1;
        } else if r.change < 0.0 {
            loss_count += 1;
        }
        if largest_gain.as_ref().map_or(true, |g| r.change > g.change) {
            largest_gain = Some(ExtremumRow {
                product: r.product.clone(),
                change: r.change,
            });
        }
        if largest_loss.as_ref().map_or(true, |l| r.change < l.change) {
            largest_loss = Some(ExtremumRow {
                product: r.product.clone(),
                change: r.change,
            });
        }
    }
    CategoryShareSummary {
        row_count: rows.len(),
        avg_campaign_share: average(&campaign),
        avg_competitor_share: average(&competitor),
        gain_count,
        loss_count,
        largest_gain,
        largest_loss,
    }
}

/// Pre/during/post comparison used by both the units and the sales-amount
/// reports. `vs_post` measures the drop-off after the campaign, so its delta
/// runs from the campaign phase to the post phase.
pub fn summarize_phases(fixture: &PhaseFixture) -> PhaseSummary {
    let rows = &fixture.rows;
    let vs_pre = delta_summary(rows.iter().map(|r| {
        (
            r.product.as_str(),
            r.pre,
            r.campaign,
            Some(r.change_vs_pre),
        )
    }));
    let vs_post = delta_summary(rows.iter().map(|r| {
        (
            r.product.as_str(),
            r.campaign,
            r.post,
            Some(r.change_vs_post),
        )
    }));
    PhaseSummary {
        row_count: rows.len(),
        total_pre: rows.iter().map(|r| r.pre).sum(),
        total_campaign: rows.iter().map(|r| r.campaign).sum(),
        total_post: rows.iter().map(|r| r.post).sum(),
        vs_pre,
        vs_post,
    }
}

/// Normalize per-bucket averages into fractional shares of the group total.
fn normalized_shares(labels: &[&str], means: &[f64]) -> Vec<ShareBucket> {
    let total: f64 = means.iter().sum();
    labels
        .iter()
        .zip(means)
        .map(|(label, mean)| ShareBucket {
            label: label.to_string(),
            share: if total > 0.0 { mean / total } else { 0.0 },
        })
        .collect()
}

fn max_bucket(buckets: &[ShareBucket]) -> Option<ShareBucket> {
    buckets
        .iter()
        .fold(None, |best: Option<&ShareBucket>, b| match best {
            Some(cur) if b.share <= cur.share => Some(cur),
            _ => Some(b),
        })
        .cloned()
}

fn min_bucket(buckets: &[ShareBucket]) -> Option<ShareBucket> {
    buckets
        .iter()
        .fold(None, |best: Option<&ShareBucket>, b| match best {
            Some(cur) if b.share >= cur.share => Some(cur),
            _ => Some(b),
        })
        .cloned()
}

/// Shopper-demographics breakdown: average each bucket across products, then
/// normalize within its group so shares sum to 100%. The two youngest age
/// brackets merge into "0-24" before averaging.
pub fn summarize_demographics(fixture: &DemographicsFixture) -> DemographicsSummary {
    let rows = &fixture.rows;

    let day_means: Vec<f64> = (0..DAY_LABELS.len())
        .map(|d| average(&rows.iter().map(|r| r.days[d]).collect::<Vec<_>>()))
        .collect();
    let day_shares = normalized_shares(&DAY_LABELS, &day_means);

    let gender_means = [
        average(&rows.iter().map(|r| r.female).collect::<Vec<_>>()),
        average(&rows.iter().map(|r| r.male).collect::<Vec<_>>()),
    ];
    let gender_shares = normalized_shares(&GENDER_LABELS, &gender_means);

    let age_means: Vec<f64> = (0..AGE_LABELS.len())
        .map(|g| {
            average(
                &rows
                    .iter()
                    .map(|r| {
                        // index 0 is the merged 0-24 bracket
                        if g == 0 {
                            r.ages[0] + r.ages[1]
                        } else {
                            r.ages[g + 1]
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    let age_shares = normalized_shares(&AGE_LABELS, &age_means);

    let female_share = gender_shares.first().map(|b| b.share).unwrap_or(0.0);
    let male_share = gender_shares.get(1).map(|b| b.share).unwrap_or(0.0);
    DemographicsSummary {
        top_day: max_bucket(&day_shares),
        low_day: min_bucket(&day_shares),
        top_age_group: max_bucket(&age_shares),
        female_share,
        male_share,
        day_shares,
        gender_shares,
        age_shares,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{campaign_sales_amount, campaign_units};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn yoy(product: &str, before: f64, during: f64, change: Option<f64>) -> YoyRecord {
        YoyRecord {
            product: product.to_string(),
            qty_prior_year: before,
            qty_campaign: during,
            change,
        }
    }

    #[test]
    fn yoy_reference_scenario() {
        let records = vec![
            yoy("A", 100.0, 150.0, Some(0.5)),
            yoy("B", 200.0, 150.0, Some(-0.25)),
        ];
        let s = summarize_yoy(&records);
        assert_eq!(s.row_count, 2);
        assert_eq!(s.increase_count, 1);
        assert_eq!(s.decrease_count, 1);
        assert_eq!(s.mean_change, Some(0.125));
        assert_eq!(s.top_grower.unwrap().product, "A");
        assert_eq!(s.top_decliner.unwrap().product, "B");
        assert_eq!(s.total_before, 300.0);
        assert_eq!(s.total_during, 300.0);
        assert_eq!(s.total_growth, Some(0.0));
    }

    #[test]
    fn zero_change_counts_as_neither() {
        let records = vec![
            yoy("A", 1.0, 1.0, Some(0.0)),
            yoy("B", 1.0, 1.0, Some(0.1)),
            yoy("C", 1.0, 1.0, None),
        ];
        let s = summarize_yoy(&records);
        assert_eq!(s.increase_count, 1);
        assert_eq!(s.decrease_count, 0);
        // mean skips the undefined entry
        assert_eq!(s.mean_change, Some(0.05));
    }

    #[test]
    fn extremum_ties_keep_first_row() {
        let records = vec![
            yoy("first", 1.0, 1.0, Some(0.3)),
            yoy("second", 1.0, 1.0, Some(0.3)),
            yoy("third", 1.0, 1.0, Some(-0.3)),
            yoy("fourth", 1.0, 1.0, Some(-0.3)),
        ];
        let s = summarize_yoy(&records);
        assert_eq!(s.top_grower.unwrap().product, "first");
        assert_eq!(s.top_decliner.unwrap().product, "third");
    }

    #[test]
    fn growth_is_undefined_over_zero_baseline() {
        let s = summarize_yoy(&[yoy("A", 0.0, 10.0, Some(1.0))]);
        assert_eq!(s.total_growth, None);
    }

    #[test]
    fn empty_dataset_yields_empty_summary() {
        let s = summarize_yoy(&[]);
        assert_eq!(s.row_count, 0);
        assert_eq!(s.mean_change, None);
        assert_eq!(s.top_grower, None);
        assert_eq!(s.total_growth, None);
    }

    #[test]
    fn prior_periods_compare_against_average() {
        let rec = |p: &str, prior, feb, campaign, change| PriorPeriodRecord {
            product: p.to_string(),
            prior_year: prior,
            feb_to_may: feb,
            campaign,
            change,
            avg_prior: match (prior, feb) {
                (Some(a), Some(b)) => Some((a + b) / 2.0),
                _ => None,
            },
        };
        let records = vec![
            rec("A", Some(100.0), Some(200.0), Some(180.0), Some(0.2)),
            rec("B", Some(100.0), Some(100.0), Some(80.0), Some(-0.2)),
            rec("C", None, Some(50.0), Some(90.0), Some(0.8)),
        ];
        let s = summarize_prior_periods(&records);
        assert_eq!(s.above_prior_avg, vec!["A".to_string()]);
        assert_eq!(s.below_prior_avg, vec!["B".to_string()]);
        assert_eq!(s.delta.increase_count, 2);
        assert_eq!(s.top_campaign_product.as_deref(), Some("A"));
        assert_eq!(s.top_prior_avg_product.as_deref(), Some("A"));
    }

    #[test]
    fn category_summary_over_default_fixture() {
        let s = summarize_category(&CategoryShareFixture::default());
        assert_eq!(s.row_count, 11);
        assert_eq!(s.gain_count, 6);
        assert_eq!(s.loss_count, 5);
        assert_eq!(
            s.largest_gain.unwrap().product,
            "BOKOMO CORN FLAKES CEREALS ORIGINAL 1KG"
        );
        assert_eq!(
            s.largest_loss.unwrap().product,
            "WELLINGTONS SWEET CHILLI SAUCE 700ML"
        );
        assert!((s.avg_campaign_share + s.avg_competitor_share - 1.0).abs() < 1e-9);
    }

    #[test]
    fn units_fixture_gains_during_campaign() {
        let s = summarize_phases(&campaign_units());
        assert_eq!(s.vs_pre.increase_count, 11);
        assert_eq!(s.vs_post.decrease_count, 11);
        assert_eq!(
            s.vs_pre.top_grower.unwrap().product,
            "BOKOMO TRADITIONAL OATS 1KG"
        );
        assert!(s.total_campaign > s.total_post);
    }

    #[test]
    fn sales_fixture_has_one_campaign_decliner() {
        let s = summarize_phases(&campaign_sales_amount());
        assert_eq!(s.vs_pre.increase_count, 10);
        assert_eq!(s.vs_pre.decrease_count, 1);
        assert_eq!(
            s.vs_pre.top_decliner.unwrap().product,
            "WHITE STAR M/MEAL 10KG"
        );
    }

    #[test]
    fn demographic_shares_sum_to_one_per_group() {
        let s = summarize_demographics(&DemographicsFixture::default());
        for group in [&s.day_shares, &s.gender_shares, &s.age_shares] {
            let total: f64 = group.iter().map(|b| b.share).sum();
            assert!((total - 1.0).abs() < 1e-9, "group sums to {total}");
        }
        assert_eq!(s.top_day.unwrap().label, "Fri");
        assert_eq!(s.top_age_group.unwrap().label, "35-44");
        assert!((s.female_share + s.male_share - 1.0).abs() < 1e-9);
        assert!(s.female_share > s.male_share);
    }

    proptest! {
        #[test]
        fn counts_partition_the_rows(deltas in proptest::collection::vec(-1.0f64..1.0, 0..40)) {
            let records: Vec<YoyRecord> = deltas
                .iter()
                .enumerate()
                .map(|(i, d)| yoy(&format!("p{i}"), 1.0, 1.0, Some(*d)))
                .collect();
            let s = summarize_yoy(&records);
            let zeros = deltas.iter().filter(|d| **d == 0.0).count();
            prop_assert_eq!(s.increase_count + s.decrease_count + zeros, s.row_count);
        }

        #[test]
        fn mean_lies_between_extrema(deltas in proptest::collection::vec(-1.0f64..1.0, 1..40)) {
            let records: Vec<YoyRecord> = deltas
                .iter()
                .enumerate()
                .map(|(i, d)| yoy(&format!("p{i}"), 1.0, 1.0, Some(*d)))
                .collect();
            let s = summarize_yoy(&records);
            let mean = s.mean_change.unwrap();
            let max = s.top_grower.unwrap().change;
            let min = s.top_decliner.unwrap().change;
            prop_assert!(min <= mean + 1e-12 && mean <= max + 1e-12);
            for d in &deltas {
                prop_assert!(*d <= max && *d >= min);
            }
        }
    }
}
