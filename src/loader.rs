// Spreadsheet ingestion for the two file-backed reports.
//
// Both sources carry a one-row title offset, so the header lives at row
// index 1. Everything after `read_sheet` is a pure transform over the
// in-memory table.
use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use log::info;

use crate::error::{ReportError, Result};
use crate::table::{Cell, RawTable};
use crate::types::{PriorPeriodRecord, YoyRecord};

/// Expected column set of the YOY workbook.
pub const YOY_COLUMNS: [&str; 4] = [
    "Product Description",
    "QTY Sold Prior Year",
    "QTY Sold CAMPAIGN PERIOD",
    "Increase in sales from Prior Year AVE",
];

/// What happened during a load, reported back to the page for display.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub total_rows: usize,
    pub kept_rows: usize,
    pub dropped_rows: usize,
    pub warnings: Vec<String>,
}

fn cell_from(d: &Data) -> Cell {
    match d {
        Data::String(s) => {
            let t = s.trim();
            if t.is_empty() {
                Cell::Empty
            } else {
                Cell::Text(t.to_string())
            }
        }
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => Cell::Number(dt.as_f64()),
        _ => Cell::Empty,
    }
}

/// Open the first sheet of an xlsx workbook as a [`RawTable`].
pub fn read_sheet(path: &Path, header_row: usize) -> Result<RawTable> {
    if !path.exists() {
        return Err(ReportError::SourceNotFound(path.to_path_buf()));
    }
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|source| ReportError::Workbook {
        path: path.to_path_buf(),
        source,
    })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ReportError::EmptySheet(path.to_path_buf()))?
        .map_err(|source| ReportError::Workbook {
            path: path.to_path_buf(),
            source,
        })?;
    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_from).collect())
        .collect();
    RawTable::from_rows(rows, header_row)
}

/// Build YOY records from an already-loaded table. Selection is by exact
/// column name, falling back to the first four columns when the header has
/// drifted; non-text product rows are dropped.
pub fn yoy_records_from(table: &RawTable) -> Result<(Vec<YoyRecord>, LoadReport)> {
    let total_rows = table.len();
    let (mut selected, fallback) = table.select(&YOY_COLUMNS)?;
    let mut warnings = Vec::new();
    if fallback {
        warnings.push(
            "Expected column names not found; mapped the first four columns positionally."
                .to_string(),
        );
    }
    selected.retain_text_rows("Product Description");
    let records: Vec<YoyRecord> = selected
        .rows()
        .iter()
        .map(|row| YoyRecord {
            product: row[0].as_text().unwrap_or_default().to_string(),
            qty_prior_year: row[1].as_number().unwrap_or(0.0),
            qty_campaign: row[2].as_number().unwrap_or(0.0),
            change: row[3].as_number(),
        })
        .collect();
    let kept_rows = records.len();
    Ok((
        records,
        LoadReport {
            total_rows,
            kept_rows,
            dropped_rows: total_rows - kept_rows,
            warnings,
        },
    ))
}

/// Load the YOY workbook.
pub fn load_yoy(path: &Path) -> Result<(Vec<YoyRecord>, LoadReport)> {
    let table = read_sheet(path, 1)?;
    let out = yoy_records_from(&table)?;
    info!(
        "YOY: {} rows loaded, {} kept after cleaning",
        out.1.total_rows, out.1.kept_rows
    );
    Ok(out)
}

/// Build prior-period records from an already-loaded table.
///
/// The prior-periods workbook renames its value columns between exports, so
/// they are located by case-insensitive substring rather than exact name. A
/// missing value column is a warning, not a failure; only the product column
/// is required. The derived prior-average is the row-wise mean of the
/// prior-year and Feb-May columns, undefined when either is missing.
pub fn prior_records_from(table: &RawTable) -> Result<(Vec<PriorPeriodRecord>, LoadReport)> {
    let total_rows = table.len();
    if table.column_index("Product Description").is_none() {
        return Err(ReportError::SchemaMismatch(
            "Product Description column missing from prior-periods sheet".to_string(),
        ));
    }
    let col_prior = table.find_column("Prior Year");
    let col_feb = table.find_column("Feb");
    let col_campaign = table.find_column("CAMPAIGN");
    let col_increase = table.find_column("Increase");

    let mut warnings = Vec::new();
    if col_prior.is_none() || col_feb.is_none() || col_campaign.is_none() || col_increase.is_none()
    {
        warnings.push(
            "Could not detect all expected columns automatically. Please ensure the \
             spreadsheet structure matches the expected layout."
                .to_string(),
        );
    }

    let mut cleaned = table.clone();
    cleaned.retain_text_rows("Product Description");
    let product_col = cleaned
        .column_index("Product Description")
        .unwrap_or_default();

    let records: Vec<PriorPeriodRecord> = (0..cleaned.len())
        .map(|i| {
            let prior_year = col_prior.and_then(|c| cleaned.number(i, c));
            let feb_to_may = col_feb.and_then(|c| cleaned.number(i, c));
            let avg_prior = match (prior_year, feb_to_may) {
                (Some(a), Some(b)) => Some((a + b) / 2.0),
                _ => None,
            };
            PriorPeriodRecord {
                product: cleaned.text(i, product_col).unwrap_or_default().to_string(),
                prior_year,
                feb_to_may,
                campaign: col_campaign.and_then(|c| cleaned.number(i, c)),
                change: col_increase.and_then(|c| cleaned.number(i, c)),
                avg_prior,
            }
        })
        .collect();
    let kept_rows = records.len();
    Ok((
        records,
        LoadReport {
            total_rows,
            kept_rows,
            dropped_rows: total_rows - kept_rows,
            warnings,
        },
    ))
}

/// Load the prior-periods workbook.
pub fn load_prior_periods(path: &Path) -> Result<(Vec<PriorPeriodRecord>, LoadReport)> {
    let table = read_sheet(path, 1)?;
    let out = prior_records_from(&table)?;
    info!(
        "Prior periods: {} rows loaded, {} kept after cleaning",
        out.1.total_rows, out.1.kept_rows
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn t(s: &str) -> Cell {
        Cell::Text(s.to_string())
    }

    fn n(v: f64) -> Cell {
        Cell::Number(v)
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_yoy(&dir.path().join("YOY Analysis.xlsx")).unwrap_err();
        assert!(matches!(err, ReportError::SourceNotFound(_)));
    }

    #[test]
    fn yoy_records_drop_non_text_rows() {
        let table = RawTable::from_rows(
            vec![
                vec![
                    t("Product Description"),
                    t("QTY Sold Prior Year"),
                    t("QTY Sold CAMPAIGN PERIOD"),
                    t("Increase in sales from Prior Year AVE"),
                ],
                vec![t("A"), n(100.0), n(150.0), n(0.5)],
                vec![Cell::Empty, n(300.0), n(300.0), n(0.0)],
                vec![t("B"), n(200.0), n(150.0), Cell::Empty],
            ],
            0,
        )
        .unwrap();
        let (records, report) = yoy_records_from(&table).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(report.total_rows, 3);
        assert_eq!(report.dropped_rows, 1);
        assert_eq!(records[0].product, "A");
        assert_eq!(records[1].change, None);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn yoy_positional_fallback_warns() {
        let table = RawTable::from_rows(
            vec![
                vec![t("Item"), t("Before"), t("During"), t("Delta"), t("Notes")],
                vec![t("A"), n(1.0), n(2.0), n(1.0), t("x")],
            ],
            0,
        )
        .unwrap();
        let (records, report) = yoy_records_from(&table).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(records[0].qty_campaign, 2.0);
    }

    #[test]
    fn prior_records_locate_columns_fuzzily() {
        let table = RawTable::from_rows(
            vec![
                vec![
                    t("Product Description"),
                    t("QTY Sold Prior Year AVE"),
                    t("14 Feb - 14 May"),
                    t("QTY Sold CAMPAIGN PERIOD"),
                    t("Increase in sales"),
                ],
                vec![t("A"), n(100.0), n(200.0), n(180.0), n(0.2)],
                vec![t("B"), n(50.0), Cell::Empty, n(60.0), n(-0.1)],
            ],
            0,
        )
        .unwrap();
        let (records, report) = prior_records_from(&table).unwrap();
        assert!(report.warnings.is_empty());
        assert_eq!(records[0].avg_prior, Some(150.0));
        // one side missing leaves the derived average undefined
        assert_eq!(records[1].avg_prior, None);
        assert_eq!(records[1].campaign, Some(60.0));
    }

    #[test]
    fn prior_records_warn_on_missing_value_columns() {
        let table = RawTable::from_rows(
            vec![
                vec![t("Product Description"), t("Something Else")],
                vec![t("A"), n(1.0)],
            ],
            0,
        )
        .unwrap();
        let (records, report) = prior_records_from(&table).unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(records[0].avg_prior, None);
        assert_eq!(records[0].change, None);
    }

    #[test]
    fn prior_records_require_product_column() {
        let table = RawTable::from_rows(
            vec![vec![t("Prior Year"), t("CAMPAIGN")], vec![n(1.0), n(2.0)]],
            0,
        )
        .unwrap();
        assert!(matches!(
            prior_records_from(&table).unwrap_err(),
            ReportError::SchemaMismatch(_)
        ));
    }
}
