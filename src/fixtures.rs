// Literal datasets for the five reports that do not read a spreadsheet.
//
// The figures are campaign deliverables handed over as-is, so they ship as
// built-in defaults; each fixture can be overridden by a JSON file named in
// the config, keeping the aggregation logic separate from sample data.
use std::path::Path;

use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const PRODUCTS: [&str; 11] = [
    "BOKOMO CORN FLAKES CEREALS ORIGINAL 1KG",
    "BOKOMO TRADITIONAL OATS 1KG",
    "LIQUI FRUIT 2L",
    "SIMBA CHIPS 120G",
    "WEET BIX CEREALS BOX 450G",
    "WEET BIX CEREALS BOX 900G",
    "WELLINGTONS SWEET CHILLI SAUCE 700ML",
    "WELLINGTONS TOMATO SAUCE 700ml",
    "WHITE STAR INSTANT MAIZE PORRIDGE 1KG",
    "WHITE STAR SUPER MAIZE MEAL MAIZE BAG 2.5KG",
    "WHITE STAR M/MEAL 10KG",
];

/// Load a fixture from a JSON override file, falling back to the built-in
/// data when no override is configured or the file cannot be parsed.
pub fn load_or<T, F>(path: Option<&Path>, fallback: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    let Some(path) = path else {
        return fallback();
    };
    match std::fs::read_to_string(path).map_err(|e| e.to_string()).and_then(|s| {
        serde_json::from_str::<T>(&s).map_err(|e| e.to_string())
    }) {
        Ok(fixture) => {
            info!("loaded fixture override from {}", path.display());
            fixture
        }
        Err(e) => {
            warn!(
                "fixture override {} unusable ({e}); using built-in data",
                path.display()
            );
            fallback()
        }
    }
}

/// Category share during and before the campaign, per product. All shares
/// and changes are fractions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryShareRow {
    pub product: String,
    pub campaign_share: f64,
    pub competitor_share: f64,
    pub pre_campaign_share: f64,
    pub change: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryShareFixture {
    pub rows: Vec<CategoryShareRow>,
}

impl Default for CategoryShareFixture {
    fn default() -> Self {
        let campaign = [0.80, 0.14, 0.82, 0.74, 0.79, 0.83, 0.62, 0.45, 0.33, 0.09, 0.06];
        let competitor = [0.20, 0.86, 0.18, 0.26, 0.21, 0.17, 0.38, 0.55, 0.67, 0.91, 0.94];
        let pre = [0.76, 0.10, 0.85, 0.73, 0.77, 0.80, 0.69, 0.47, 0.30, 0.12, 0.07];
        let change = [0.05, 0.04, -0.03, 0.01, 0.02, 0.02, -0.06, -0.02, 0.03, -0.03, -0.01];
        let rows = PRODUCTS
            .iter()
            .enumerate()
            .map(|(i, p)| CategoryShareRow {
                product: p.to_string(),
                campaign_share: campaign[i],
                competitor_share: competitor[i],
                pre_campaign_share: pre[i],
                change: change[i],
            })
            .collect();
        CategoryShareFixture { rows }
    }
}

/// One product across the pre/during/post campaign phases. Used for both the
/// units report and the sales-amount report; `change_*` are fractions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseRow {
    pub product: String,
    pub pre: f64,
    pub campaign: f64,
    pub post: f64,
    pub change_vs_pre: f64,
    pub change_vs_post: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhaseFixture {
    pub rows: Vec<PhaseRow>,
}

fn phase_rows(
    pre: [f64; 11],
    campaign: [f64; 11],
    post: [f64; 11],
    vs_pre: [f64; 11],
    vs_post: [f64; 11],
) -> Vec<PhaseRow> {
    PRODUCTS
        .iter()
        .enumerate()
        .map(|(i, p)| PhaseRow {
            product: p.to_string(),
            pre: pre[i],
            campaign: campaign[i],
            post: post[i],
            change_vs_pre: vs_pre[i],
            change_vs_post: vs_post[i],
        })
        .collect()
}

/// Weekly units sold per phase.
pub fn campaign_units() -> PhaseFixture {
    PhaseFixture {
        rows: phase_rows(
            [41134.0, 1116.0, 43481.0, 139366.0, 16784.0, 21149.0, 1091.0, 6336.0, 34407.0, 1168.0, 9259.0],
            [47657.0, 2146.0, 53466.0, 153274.0, 20570.0, 21155.0, 1445.0, 8003.0, 36302.0, 1412.0, 9409.0],
            [37502.0, 2115.0, 44185.0, 113034.0, 18148.0, 17783.0, 849.0, 4889.0, 30976.0, 1084.0, 7371.0],
            [0.16, 0.92, 0.23, 0.10, 0.23, 0.0003, 0.32, 0.26, 0.06, 0.21, 0.02],
            [-0.21, -0.01, -0.17, -0.26, -0.12, -0.16, -0.41, -0.39, -0.15, -0.23, -0.22],
        ),
    }
}

/// Weekly sales amount (ZAR) per phase.
pub fn campaign_sales_amount() -> PhaseFixture {
    PhaseFixture {
        rows: phase_rows(
            [2146039.02, 40101.00, 1959100.98, 2458327.73, 486957.01, 1119207.82, 53829.88, 194247.98, 993367.85, 49663.65, 1215487.70],
            [2512772.12, 81147.63, 2403505.63, 2695830.06, 595658.98, 1127400.03, 72150.90, 258569.12, 1051719.19, 59890.38, 1154819.48],
            [1910801.08, 76227.17, 2006715.47, 2047509.76, 511282.47, 959973.53, 44785.86, 163818.96, 882593.02, 44569.48, 852939.35],
            [0.17, 1.02, 0.23, 0.10, 0.22, 0.01, 0.34, 0.33, 0.06, 0.21, -0.05],
            [-0.24, -0.06, -0.17, -0.24, -0.14, -0.15, -0.38, -0.37, -0.16, -0.26, -0.26],
        ),
    }
}

/// Raw shopper counts per product: day of week, gender, and age bracket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemographicsRow {
    pub product: String,
    pub days: [f64; 7],
    pub female: f64,
    pub male: f64,
    /// Brackets 0-18, 18-24, 25-34, 35-44, 45-54, 55-64, 65+.
    pub ages: [f64; 7],
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemographicsFixture {
    pub rows: Vec<DemographicsRow>,
}

pub const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
pub const GENDER_LABELS: [&str; 2] = ["Female", "Male"];
/// Labels after merging the two youngest brackets.
pub const AGE_LABELS: [&str; 6] = ["0-24", "25-34", "35-44", "45-54", "55-64", "65+"];

impl Default for DemographicsFixture {
    fn default() -> Self {
        let days = [
            [10.0, 14.0, 13.0, 18.0, 22.0, 18.0, 4.0],
            [12.0, 13.0, 14.0, 19.0, 16.0, 14.0, 13.0],
            [8.0, 12.0, 12.0, 15.0, 22.0, 18.0, 12.0],
            [9.0, 14.0, 11.0, 14.0, 18.0, 18.0, 16.0],
            [12.0, 15.0, 12.0, 15.0, 20.0, 17.0, 8.0],
            [11.0, 15.0, 12.0, 16.0, 20.0, 17.0, 9.0],
            [8.0, 14.0, 11.0, 14.0, 17.0, 18.0, 18.0],
            [10.0, 15.0, 10.0, 13.0, 16.0, 21.0, 16.0],
            [12.0, 15.0, 13.0, 17.0, 21.0, 18.0, 5.0],
            [16.0, 16.0, 10.0, 12.0, 17.0, 16.0, 12.0],
            [9.0, 17.0, 16.0, 14.0, 18.0, 17.0, 9.0],
        ];
        let female = [84.0, 79.0, 66.0, 60.0, 76.0, 74.0, 64.0, 68.0, 79.0, 62.0, 57.0];
        let male = [16.0, 21.0, 34.0, 40.0, 24.0, 26.0, 36.0, 32.0, 21.0, 38.0, 43.0];
        let ages = [
            [4.0, 6.0, 30.0, 32.0, 17.0, 6.0, 4.0],
            [5.0, 6.0, 17.0, 40.0, 18.0, 8.0, 6.0],
            [7.0, 3.0, 18.0, 31.0, 25.0, 10.0, 6.0],
            [6.0, 5.0, 23.0, 30.0, 23.0, 9.0, 4.0],
            [4.0, 6.0, 28.0, 32.0, 18.0, 8.0, 4.0],
            [6.0, 3.0, 20.0, 33.0, 23.0, 11.0, 5.0],
            [8.0, 3.0, 16.0, 33.0, 24.0, 10.0, 6.0],
            [9.0, 3.0, 17.0, 35.0, 20.0, 9.0, 6.0],
            [2.0, 7.0, 32.0, 33.0, 16.0, 7.0, 2.0],
            [6.0, 6.0, 22.0, 26.0, 25.0, 9.0, 7.0],
            [5.0, 5.0, 18.0, 35.0, 23.0, 10.0, 5.0],
        ];
        let rows = PRODUCTS
            .iter()
            .enumerate()
            .map(|(i, p)| DemographicsRow {
                product: p.to_string(),
                days: days[i],
                female: female[i],
                male: male[i],
                ages: ages[i],
            })
            .collect();
        DemographicsFixture { rows }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_carry_full_product_list() {
        assert_eq!(CategoryShareFixture::default().rows.len(), 11);
        assert_eq!(campaign_units().rows.len(), 11);
        assert_eq!(campaign_sales_amount().rows.len(), 11);
        assert_eq!(DemographicsFixture::default().rows.len(), 11);
    }

    #[test]
    fn override_file_wins() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"{{"rows":[{{"product":"TEST","campaign_share":0.5,"competitor_share":0.5,"pre_campaign_share":0.4,"change":0.1}}]}}"#
        )
        .unwrap();
        let fixture: CategoryShareFixture =
            load_or(Some(f.path()), CategoryShareFixture::default);
        assert_eq!(fixture.rows.len(), 1);
        assert_eq!(fixture.rows[0].product, "TEST");
    }

    #[test]
    fn unreadable_override_falls_back() {
        let fixture: CategoryShareFixture = load_or(
            Some(std::path::Path::new("/nonexistent/fixture.json")),
            CategoryShareFixture::default,
        );
        assert_eq!(fixture.rows.len(), 11);
    }
}
