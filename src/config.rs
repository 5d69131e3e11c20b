// Runtime configuration for the dashboard.
//
// Everything has a built-in default matching the campaign deliverable; an
// optional `report_config.json` next to the binary overrides fields. Config
// problems never abort the session.
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::{info, warn};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the spreadsheet sources.
    pub data_dir: PathBuf,
    /// Directory that export artifacts are written into.
    pub export_dir: PathBuf,
    pub yoy_file: String,
    pub prior_periods_file: String,
    /// Brand name used in category-share narrative and chart labels.
    pub brand: String,
    pub currency_symbol: String,
    pub campaign_start: NaiveDate,
    pub campaign_end: NaiveDate,
    /// Optional JSON overrides for the literal datasets.
    pub category_fixture: Option<PathBuf>,
    pub units_fixture: Option<PathBuf>,
    pub sales_fixture: Option<PathBuf>,
    pub demographics_fixture: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_dir: PathBuf::from("."),
            export_dir: PathBuf::from("exports"),
            yoy_file: "YOY Analysis.xlsx".to_string(),
            prior_periods_file: "Prior Periods.xlsx".to_string(),
            brand: "PepsiCo".to_string(),
            currency_symbol: "R".to_string(),
            campaign_start: NaiveDate::from_ymd_opt(2025, 5, 14).expect("valid date"),
            campaign_end: NaiveDate::from_ymd_opt(2025, 8, 14).expect("valid date"),
            category_fixture: None,
            units_fixture: None,
            sales_fixture: None,
            demographics_fixture: None,
        }
    }
}

impl AppConfig {
    /// Read the config file if present; fall back to defaults otherwise.
    pub fn load(path: &Path) -> AppConfig {
        match std::fs::read_to_string(path) {
            Ok(s) => match serde_json::from_str(&s) {
                Ok(cfg) => {
                    info!("loaded config from {}", path.display());
                    cfg
                }
                Err(e) => {
                    warn!("config {} unusable ({e}); using defaults", path.display());
                    AppConfig::default()
                }
            },
            Err(_) => AppConfig::default(),
        }
    }

    pub fn yoy_path(&self) -> PathBuf {
        self.data_dir.join(&self.yoy_file)
    }

    pub fn prior_periods_path(&self) -> PathBuf {
        self.data_dir.join(&self.prior_periods_file)
    }

    pub fn dashboard_title(&self) -> String {
        format!(
            "{} Campaign Analysis Dashboard - {} to {}",
            self.brand,
            self.campaign_start.format("%-d %B %Y"),
            self.campaign_end.format("%-d %B %Y")
        )
    }
}
